//! UI module: View components for the TUI.

pub mod features;
pub mod patient;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "AVISO: simulação baseada em modelo treinado; não substitui avaliação médica profissional.",
            MedicalTheme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Campos não coletados no formulário são enviados ao modelo como 0.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
