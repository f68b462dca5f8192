//! Processed-data view: the encoded vector exactly as the model sees it.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::domain::FeatureVector;
use crate::tui::styles::MedicalTheme;

/// Features shown side by side on one table row
pub const ENTRIES_PER_ROW: usize = 3;

/// Table rows needed for `len` features.
#[must_use]
pub fn row_count(len: usize) -> usize {
    len.div_ceil(ENTRIES_PER_ROW)
}

/// Render the vector as a scrollable table; `selected_row` is kept in view.
pub fn render_processed_data(
    f: &mut Frame,
    area: Rect,
    features: &FeatureVector,
    selected_row: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("🧾 Dados processados", MedicalTheme::title()),
        Span::styled(
            format!(" │ {} colunas na ordem do modelo", features.len()),
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, chunks[0]);

    let entries: Vec<(usize, &'static str, f64)> = features
        .iter()
        .enumerate()
        .map(|(i, (name, value))| (i, name, value))
        .collect();

    let rows = entries.chunks(ENTRIES_PER_ROW).map(|chunk| {
        let cells = chunk.iter().flat_map(|(i, name, value)| {
            let style = if *value != 0.0 {
                MedicalTheme::active_value()
            } else {
                MedicalTheme::text_muted()
            };
            [
                Cell::from(Span::styled(format!("{i:>2}"), MedicalTheme::text_muted())),
                Cell::from(Span::styled(*name, MedicalTheme::text())),
                Cell::from(Span::styled(format!("{value:>3}"), style)),
            ]
        });
        Row::new(cells)
    });

    let widths = [Constraint::Length(2), Constraint::Length(14), Constraint::Length(3)]
        .repeat(ENTRIES_PER_ROW);

    let total_rows = row_count(entries.len());
    let table = Table::new(rows, widths)
        .column_spacing(1)
        .row_highlight_style(MedicalTheme::focused())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );
    let mut state = TableState::default()
        .with_selected(Some(selected_row.min(total_rows.saturating_sub(1))));
    f.render_stateful_widget(table, chunks[1], &mut state);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[↑↓] ", MedicalTheme::key_hint()),
        Span::styled("Rolar ", MedicalTheme::key_desc()),
        Span::styled("[D/Esc] ", MedicalTheme::key_hint()),
        Span::styled("Voltar ", MedicalTheme::key_desc()),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Prever antiviral", MedicalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, chunks[2]);
}
