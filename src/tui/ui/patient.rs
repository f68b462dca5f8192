//! Patient data input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::SubmissionState;
use crate::domain::{
    ClinicalFlag, PatientAttributes, AFFIRMATIVE, AGE_RANGE, DEFAULT_AGE, FEMALE, MALE, NEGATIVE,
};
use crate::tui::styles::MedicalTheme;

use super::result::render_result_panel;

static SEX_OPTIONS: [&str; 2] = [MALE, FEMALE];
static ANSWER_OPTIONS: [&str; 2] = [AFFIRMATIVE, NEGATIVE];

const AGE_FIELD: usize = 0;
const SEX_FIELD: usize = 1;
const FIRST_FLAG_FIELD: usize = 2;

/// Width of the age bar, in cells
const AGE_BAR_WIDTH: usize = 10;

/// Label column width; fits the longest flag label
const LABEL_WIDTH: usize = 21;

/// Widget behind a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Integer slider
    Slider { value: u8, min: u8, max: u8 },
    /// One of a fixed list of literals; the first is the default
    Select {
        options: &'static [&'static str],
        selected: usize,
    },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub input: FieldInput,
}

impl FormField {
    fn slider(label: &'static str, value: u8, min: u8, max: u8) -> Self {
        Self {
            label,
            input: FieldInput::Slider { value, min, max },
        }
    }

    fn select(label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            label,
            input: FieldInput::Select {
                options,
                selected: 0,
            },
        }
    }

    /// Literal currently shown by the widget.
    #[must_use]
    pub fn value(&self) -> String {
        match &self.input {
            FieldInput::Slider { value, .. } => value.to_string(),
            FieldInput::Select { options, selected } => options[*selected].to_string(),
        }
    }

    /// Move the slider by `delta`, or cycle the selection by its sign.
    fn step(&mut self, delta: i16) {
        match &mut self.input {
            FieldInput::Slider { value, min, max } => {
                let next = (i16::from(*value) + delta).clamp(i16::from(*min), i16::from(*max));
                *value = next as u8;
            }
            FieldInput::Select { options, selected } => {
                let n = options.len();
                *selected = if delta >= 0 {
                    (*selected + 1) % n
                } else {
                    (*selected + n - 1) % n
                };
            }
        }
    }

    fn select_literal(&mut self, literal: &str) {
        if let FieldInput::Select { options, selected } = &mut self.input {
            if let Some(i) = options.iter().position(|o| *o == literal) {
                *selected = i;
            }
        }
    }
}

/// Patient form state
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
}

impl Default for PatientFormState {
    fn default() -> Self {
        let mut fields = vec![
            FormField::slider("Idade (anos)", DEFAULT_AGE, *AGE_RANGE.start(), *AGE_RANGE.end()),
            FormField::select("Sexo", &SEX_OPTIONS),
        ];
        fields.extend(
            ClinicalFlag::ALL
                .iter()
                .map(|flag| FormField::select(flag.label(), &ANSWER_OPTIONS)),
        );

        Self {
            fields,
            selected_field: 0,
        }
    }
}

impl PatientFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Change the current field by `delta` steps
    pub fn step(&mut self, delta: i16) {
        self.fields[self.selected_field].step(delta);
    }

    /// Type a digit into the age slider
    pub fn input_char(&mut self, c: char) {
        let Some(digit) = c.to_digit(10) else {
            return;
        };
        if let FieldInput::Slider { value, max, .. } = &mut self.fields[self.selected_field].input
        {
            let appended = u32::from(*value) * 10 + digit;
            *value = if appended <= u32::from(*max) {
                appended as u8
            } else {
                digit as u8
            };
        }
    }

    /// Drop the last digit of the age slider
    pub fn delete_char(&mut self) {
        if let FieldInput::Slider { value, min, .. } = &mut self.fields[self.selected_field].input
        {
            *value = (*value / 10).max(*min);
        }
    }

    /// Restore every widget to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Read the form as patient attributes
    #[must_use]
    pub fn to_attributes(&self) -> PatientAttributes {
        let age = match self.fields[AGE_FIELD].input {
            FieldInput::Slider { value, .. } => value,
            FieldInput::Select { .. } => DEFAULT_AGE,
        };

        let mut attrs = PatientAttributes::uniform(age, self.fields[SEX_FIELD].value(), "");
        for (i, flag) in ClinicalFlag::ALL.iter().enumerate() {
            attrs = attrs.with_flag(*flag, self.fields[FIRST_FLAG_FIELD + i].value());
        }
        attrs
    }

    /// Load a sample patient: 45yo male with fever, cough and dyspnea
    pub fn load_sample_data(&mut self) {
        self.reset();
        self.fields[SEX_FIELD].select_literal(MALE);
        for (i, flag) in ClinicalFlag::ALL.iter().enumerate() {
            let answer = match flag {
                ClinicalFlag::Febre | ClinicalFlag::Tosse | ClinicalFlag::Dispneia => AFFIRMATIVE,
                _ => NEGATIVE,
            };
            self.fields[FIRST_FLAG_FIELD + i].select_literal(answer);
        }
    }
}

/// Render the patient form with the result panel below it
pub fn render_patient_form(
    f: &mut Frame,
    area: Rect,
    state: &PatientFormState,
    submission: &SubmissionState,
    fingerprint: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Form
            Constraint::Length(5), // Result
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_form_header(f, chunks[0], fingerprint);
    render_form_fields(f, chunks[1], state);
    render_result_panel(f, chunks[2], submission);
    render_form_footer(f, chunks[3]);
}

fn render_form_header(f: &mut Frame, area: Rect, fingerprint: Option<&str>) {
    let mut spans = vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Simulador de Tratamento — SRAG/INFLUD", MedicalTheme::title()),
    ];
    if let Some(fp) = fingerprint {
        spans.push(Span::styled(" │ modelo ", MedicalTheme::text_muted()));
        spans.push(Span::styled(fp.to_string(), MedicalTheme::text_secondary()));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

/// First visible row so that `selected_row` fits in `height` rows.
fn scroll_offset(selected_row: usize, height: usize) -> usize {
    if height == 0 {
        return selected_row;
    }
    (selected_row + 1).saturating_sub(height)
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let block = Block::default()
        .title(Span::styled(" Dados do Paciente ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    // Column-major: both columns scroll together so the selection stays visible.
    let rows = state.fields.len().div_ceil(2);
    let offset = scroll_offset(state.selected_field % rows, usize::from(inner.height));

    for (col, fields) in state.fields.chunks(rows).enumerate() {
        let lines: Vec<Line> = fields
            .iter()
            .enumerate()
            .skip(offset)
            .map(|(i, field)| field_line(field, col * rows + i == state.selected_field))
            .collect();
        f.render_widget(Paragraph::new(lines), columns[col]);
    }
}

fn field_line(field: &FormField, is_selected: bool) -> Line<'static> {
    let (marker, label_style) = if is_selected {
        ("▸ ", MedicalTheme::focused())
    } else {
        ("  ", MedicalTheme::text_secondary())
    };

    let mut spans = vec![
        Span::styled(marker, MedicalTheme::focused()),
        Span::styled(
            format!("{:<width$}", field.label, width = LABEL_WIDTH),
            label_style,
        ),
    ];
    spans.extend(field_spans(&field.input, is_selected));
    Line::from(spans)
}

fn field_spans(input: &FieldInput, is_selected: bool) -> Vec<Span<'static>> {
    match input {
        FieldInput::Slider { value, min, max } => {
            let span = usize::from(max.saturating_sub(*min)).max(1);
            let filled = usize::from(value.saturating_sub(*min)) * AGE_BAR_WIDTH / span;
            vec![
                Span::styled(format!("{value:>3} "), MedicalTheme::text()),
                Span::styled("━".repeat(filled), MedicalTheme::focused()),
                Span::styled("●", MedicalTheme::text()),
                Span::styled(
                    "─".repeat(AGE_BAR_WIDTH - filled),
                    MedicalTheme::text_muted(),
                ),
            ]
        }
        FieldInput::Select { options, selected } => options
            .iter()
            .enumerate()
            .flat_map(|(i, option)| {
                let style = match (i == *selected, is_selected) {
                    (true, true) => MedicalTheme::focused(),
                    (true, false) => MedicalTheme::text(),
                    _ => MedicalTheme::text_muted(),
                };
                let text = if i == *selected {
                    format!("[{option}]")
                } else {
                    format!(" {option} ")
                };
                [Span::styled(text, style), Span::raw(" ")]
            })
            .collect(),
    }
}

fn render_form_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[↑↓] ", MedicalTheme::key_hint()),
        Span::styled("Campo ", MedicalTheme::key_desc()),
        Span::styled("[←→] ", MedicalTheme::key_hint()),
        Span::styled("Valor ", MedicalTheme::key_desc()),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Prever ", MedicalTheme::key_desc()),
        Span::styled("[D] ", MedicalTheme::key_hint()),
        Span::styled("Dados ", MedicalTheme::key_desc()),
        Span::styled("[S] ", MedicalTheme::key_hint()),
        Span::styled("Exemplo ", MedicalTheme::key_desc()),
        Span::styled("[R] ", MedicalTheme::key_hint()),
        Span::styled("Limpar ", MedicalTheme::key_desc()),
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled("Sair", MedicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_default_form_matches_widget_defaults() {
        let state = PatientFormState::default();
        assert_eq!(state.fields.len(), 18);

        let attrs = state.to_attributes();
        assert_eq!(attrs, PatientAttributes::default());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = PatientFormState::default();
        state.prev_field();
        assert_eq!(state.selected_field, 17);
        state.next_field();
        assert_eq!(state.selected_field, 0);
    }

    #[test]
    fn test_age_slider_clamps() {
        let mut state = PatientFormState::default();
        state.step(100);
        assert_eq!(state.to_attributes().age, 100);
        state.step(-200);
        assert_eq!(state.to_attributes().age, 0);
    }

    #[test]
    fn test_age_typing() {
        let mut state = PatientFormState::default();
        state.input_char('7'); // 457 > 100 restarts
        assert_eq!(state.to_attributes().age, 7);
        state.input_char('2');
        assert_eq!(state.to_attributes().age, 72);
        state.delete_char();
        assert_eq!(state.to_attributes().age, 7);
        state.input_char('x');
        assert_eq!(state.to_attributes().age, 7);
    }

    #[test]
    fn test_select_cycles() {
        let mut state = PatientFormState::default();
        state.next_field(); // Sexo
        state.step(1);
        assert_eq!(state.to_attributes().sex, FEMALE);
        state.step(-1);
        assert_eq!(state.to_attributes().sex, MALE);

        state.next_field(); // Febre
        state.input_char('1'); // digits do nothing on selects
        state.step(1);
        assert_eq!(state.to_attributes().flag(ClinicalFlag::Febre), NEGATIVE);
    }

    #[test]
    fn test_sample_data() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        let attrs = state.to_attributes();
        assert_eq!(attrs.flag(ClinicalFlag::Febre), AFFIRMATIVE);
        assert_eq!(attrs.flag(ClinicalFlag::Tosse), AFFIRMATIVE);
        assert_eq!(attrs.flag(ClinicalFlag::Asma), NEGATIVE);
    }

    fn render(state: &PatientFormState, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|f| {
                let area = f.area();
                render_patient_form(f, area, state, &SubmissionState::Awaiting, None);
            })
            .expect("draw");
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn count(lines: &[String], needle: &str) -> usize {
        lines.iter().map(|l| l.matches(needle).count()).sum()
    }

    #[test]
    fn test_labels_fit_label_column() {
        let state = PatientFormState::default();
        for field in &state.fields {
            assert!(field.label.chars().count() < LABEL_WIDTH, "{}", field.label);
        }
    }

    #[test]
    fn test_every_value_visible_on_small_terminal() {
        // 80x21 is what an 80x24 terminal leaves after the disclaimer.
        let lines = render(&PatientFormState::default(), 80, 21);
        assert_eq!(count(&lines, "[Sim]") + count(&lines, "[Masculino]"), 17);
        assert_eq!(count(&lines, " 45 "), 1);
        for label in ["Dispneia", "Obesidade", "Pneumopatia", "Doença renal crônica"] {
            assert_eq!(count(&lines, label), 1, "{label}");
        }
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let mut state = PatientFormState::default();
        for _ in 0..8 {
            state.next_field(); // Dor abdominal, last row of the left column
        }
        state.step(1);

        // Room for only 4 field rows: the selected one must still be shown.
        let lines = render(&state, 80, 15);
        let row = lines
            .iter()
            .find(|l| l.contains("▸ Dor abdominal"))
            .expect("selected field visible");
        assert!(row.contains("[Não]"));
        assert_eq!(count(&lines, "Febre"), 0);
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 9), 0);
        assert_eq!(scroll_offset(8, 9), 0);
        assert_eq!(scroll_offset(8, 4), 5);
        assert_eq!(scroll_offset(3, 0), 3);
    }
}
