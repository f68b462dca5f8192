//! Prediction result panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::application::SubmissionState;
use crate::domain::PredictionResult;
use crate::tui::styles::MedicalTheme;

/// Render the panel for the current submission state
pub fn render_result_panel(f: &mut Frame, area: Rect, state: &SubmissionState) {
    match state {
        SubmissionState::Awaiting => render_awaiting(f, area),
        SubmissionState::Displayed(result) => render_result(f, area, result),
        SubmissionState::Failed(message) => render_error(f, area, message),
    }
}

fn render_awaiting(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Preencha os dados e pressione [Enter] para prever o antiviral recomendado",
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_result(f: &mut Frame, area: Rect, result: &PredictionResult) {
    let block = Block::default()
        .title(Span::styled(
            " 🏥 Resultado da predição ",
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let rec_style = MedicalTheme::recommendation(result.recommendation);
    let recommendation = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Recomendação: ", MedicalTheme::text_secondary()),
            Span::styled(
                result.recommendation.label(),
                rec_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Confiança da predição: ", MedicalTheme::text_secondary()),
            Span::styled(result.confidence_display(), MedicalTheme::text()),
        ]),
        Line::from(Span::styled(
            format!("Classe {} │ {}", result.class_index, result.created_at.format("%H:%M:%S")),
            MedicalTheme::text_muted(),
        )),
    ]);
    f.render_widget(recommendation, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(MedicalTheme::gauge(result.confidence))
        .ratio(result.confidence.clamp(0.0, 1.0))
        .label(result.confidence_display());
    f.render_widget(gauge, chunks[1]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(Span::styled("! Erro", MedicalTheme::danger())),
        Line::from(Span::styled(message.to_string(), MedicalTheme::text())),
        Line::from(Span::styled(
            "Ajuste os dados e pressione [Enter] para tentar novamente",
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}
