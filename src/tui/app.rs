//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Synchronous prediction on submit

use std::io;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::application::{ModelLoader, Simulator, SubmissionState};
use crate::config::AppConfig;
use crate::domain::FEATURE_COUNT;

use super::ui::{
    features::{render_processed_data, row_count},
    patient::{render_patient_form, PatientFormState},
    render_disclaimer,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    PatientForm,
    ProcessedData,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Encoder and predictor over the cached model
    simulator: Simulator,

    /// Patient form state
    patient_form_state: PatientFormState,

    /// Outcome of the last submission
    submission: SubmissionState,

    /// Selected row in the processed-data table
    data_row: usize,
}

impl App {
    /// Create the application, loading the model up front.
    ///
    /// # Errors
    /// Returns error if the model cannot be loaded. No form is shown in
    /// that case.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let loader = ModelLoader::from_path(&config.model_path);
        let simulator = Simulator::new(loader).map_err(|e| {
            anyhow!(
                "❌ Erro ao carregar o modelo. Certifique-se de que {:?} existe e é válido. ({})",
                config.model_path,
                e
            )
        })?;

        Ok(Self::with_simulator(simulator))
    }

    /// Create application around an already loaded simulator.
    #[must_use]
    pub fn with_simulator(simulator: Simulator) -> Self {
        Self {
            screen: Screen::PatientForm,
            should_quit: false,
            simulator,
            patient_form_state: PatientFormState::default(),
            submission: SubmissionState::Awaiting,
            data_row: 0,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    #[must_use]
    pub fn form(&self) -> &PatientFormState {
        &self.patient_form_state
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the current screen.
    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        let content_area = chunks[0];
        let disclaimer_area = chunks[1];

        match self.screen {
            Screen::PatientForm => {
                let fingerprint = self
                    .simulator
                    .model()
                    .ok()
                    .map(|m| m.short_fingerprint().to_string());
                render_patient_form(
                    f,
                    content_area,
                    &self.patient_form_state,
                    &self.submission,
                    fingerprint.as_deref(),
                );
            }
            Screen::ProcessedData => {
                let features = self
                    .simulator
                    .encode(&self.patient_form_state.to_attributes());
                render_processed_data(f, content_area, &features, self.data_row);
            }
        }

        render_disclaimer(f, disclaimer_area);
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::PatientForm => self.handle_patient_form_key(key),
            Screen::ProcessedData => self.handle_processed_data_key(key),
        }
    }

    fn handle_patient_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.patient_form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.patient_form_state.next_field();
            }
            KeyCode::Left => self.edit(|form| form.step(-1)),
            KeyCode::Right | KeyCode::Char(' ') => self.edit(|form| form.step(1)),
            KeyCode::PageUp => self.edit(|form| form.step(10)),
            KeyCode::PageDown => self.edit(|form| form.step(-10)),
            KeyCode::Backspace => self.edit(PatientFormState::delete_char),
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.screen = Screen::ProcessedData;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.edit(PatientFormState::load_sample_data);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.edit(PatientFormState::reset);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.edit(|form| form.input_char(c));
            }
            KeyCode::Enter => {
                self.submit_patient_form();
            }
            _ => {}
        }
    }

    fn handle_processed_data_key(&mut self, key: KeyCode) {
        let last_row = row_count(FEATURE_COUNT).saturating_sub(1);
        match key {
            KeyCode::Up => self.data_row = self.data_row.saturating_sub(1),
            KeyCode::Down => self.data_row = (self.data_row + 1).min(last_row),
            KeyCode::PageUp => self.data_row = self.data_row.saturating_sub(10),
            KeyCode::PageDown => self.data_row = (self.data_row + 10).min(last_row),
            KeyCode::Home => self.data_row = 0,
            KeyCode::End => self.data_row = last_row,
            KeyCode::Esc | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.screen = Screen::PatientForm;
            }
            KeyCode::Enter => {
                self.submit_patient_form();
                self.screen = Screen::PatientForm;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Apply a form edit. A shown result no longer matches the inputs, so
    /// the panel goes back to awaiting submission.
    fn edit(&mut self, change: impl FnOnce(&mut PatientFormState)) {
        change(&mut self.patient_form_state);
        self.submission = SubmissionState::Awaiting;
    }

    fn submit_patient_form(&mut self) {
        let attrs = self.patient_form_state.to_attributes();
        self.submission = self.simulator.submit(&attrs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LoadedModel;
    use crate::domain::FEATURE_COUNT;
    use crate::ports::{Classifier, ModelError};
    use crate::tui::ui::patient::FieldInput;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Predicts Oseltamivir at 82%, or fails while `broken` is set.
    struct ToggleClassifier {
        broken: AtomicBool,
    }

    impl Classifier for ToggleClassifier {
        fn predict(&self, _features: &[f64]) -> Result<i64, ModelError> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(ModelError::Prediction("boom".into()));
            }
            Ok(1)
        }

        fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, ModelError> {
            Ok(vec![0.1, 0.82, 0.05, 0.03])
        }

        fn classes(&self) -> &[i64] {
            &[0, 1, 2, 3]
        }

        fn n_features(&self) -> usize {
            FEATURE_COUNT
        }
    }

    fn test_app(broken: bool) -> (App, Arc<ToggleClassifier>) {
        let classifier = Arc::new(ToggleClassifier {
            broken: AtomicBool::new(broken),
        });
        let shared = classifier.clone();
        let loader = ModelLoader::with_loader("memory", move || {
            Ok(LoadedModel {
                classifier: shared.clone(),
                fingerprint: "0123456789abcdef".repeat(4),
                source: PathBuf::from("memory"),
            })
        });
        let simulator = Simulator::new(loader).expect("simulator");
        (App::with_simulator(simulator), classifier)
    }

    fn screen_text(app: &App) -> String {
        sized_screen_text(app, 140, 50)
    }

    fn sized_screen_text(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| app.draw(f)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_missing_model_fails_startup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            model_path: dir.path().join("modelo_antiviral.json"),
            ..AppConfig::default()
        };
        assert!(App::new(&config).is_err());
    }

    #[test]
    fn test_submit_displays_recommendation() {
        let (mut app, _) = test_app(false);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        match app.submission() {
            SubmissionState::Displayed(result) => {
                assert_eq!(result.recommendation.label(), "🧪 Oseltamivir");
                assert_eq!(result.confidence_display(), "82.00%");
            }
            other => panic!("unexpected state: {other:?}"),
        }

        let text = screen_text(&app);
        assert!(text.contains("Oseltamivir"));
        assert!(text.contains("82.00%"));
    }

    #[test]
    fn test_inference_error_keeps_form_available() {
        let (mut app, classifier) = test_app(true);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert!(matches!(app.submission(), SubmissionState::Failed(_)));
        assert_eq!(app.screen(), Screen::PatientForm);
        assert!(!app.should_quit());
        assert!(screen_text(&app).contains("Erro"));

        // Form still editable, and a resubmission can succeed.
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.form().selected_field, 1);
        classifier.broken.store(false, Ordering::SeqCst);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(app.submission(), SubmissionState::Displayed(_)));
    }

    #[test]
    fn test_edit_clears_result() {
        let (mut app, _) = test_app(false);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert!(matches!(app.submission(), SubmissionState::Awaiting));
        assert_eq!(app.form().to_attributes().age, 46);
    }

    #[test]
    fn test_processed_data_view() {
        let (mut app, _) = test_app(false);
        app.handle_key(KeyCode::Char('d'), KeyModifiers::NONE);
        assert_eq!(app.screen(), Screen::ProcessedData);

        let text = screen_text(&app);
        assert!(text.contains("Dados processados"));
        assert!(text.contains("classi_fin_bin"));

        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.screen(), Screen::PatientForm);
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _) = test_app(false);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());

        let (mut app, _) = test_app(false);
        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.should_quit());
    }

    #[test]
    fn test_form_values_visible_at_80x24() {
        let (mut app, _) = test_app(false);
        let text = sized_screen_text(&app, 80, 24);
        assert_eq!(
            text.matches("[Sim]").count() + text.matches("[Masculino]").count(),
            17
        );
        assert!(text.contains("Dispneia"));
        assert!(text.contains("Obesidade"));

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(sized_screen_text(&app, 80, 24).contains("82.00%"));
    }

    #[test]
    fn test_processed_data_scrolls_at_80x24() {
        let (mut app, _) = test_app(false);
        app.handle_key(KeyCode::Char('d'), KeyModifiers::NONE);
        assert!(sized_screen_text(&app, 80, 24).contains("age"));

        app.handle_key(KeyCode::End, KeyModifiers::NONE);
        assert!(sized_screen_text(&app, 80, 24).contains("classi_fin_bin"));

        for _ in 0..40 {
            app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        }
        // Down stops at the last row, so one Up scrolls back immediately.
        app.handle_key(KeyCode::Up, KeyModifiers::NONE);
        let text = sized_screen_text(&app, 80, 24);
        assert!(text.contains("co_detec_bin"));
        assert!(!text.contains("classi_fin_bin"));

        app.handle_key(KeyCode::Home, KeyModifiers::NONE);
        assert!(sized_screen_text(&app, 80, 24).contains("sex_m"));
    }

    #[test]
    fn test_invalid_attributes_replace_previous_result() {
        let (mut app, _) = test_app(false);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(app.submission(), SubmissionState::Displayed(_)));

        app.patient_form_state.fields[0].input = FieldInput::Slider {
            value: 120,
            min: 0,
            max: 120,
        };
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        match app.submission() {
            SubmissionState::Failed(message) => {
                assert!(message.starts_with("Erro ao realizar predição"));
                assert!(message.contains("120"));
            }
            other => panic!("unexpected state: {other:?}"),
        }
        let text = screen_text(&app);
        assert!(!text.contains("82.00%"));
    }
}
