//! Cover card grid

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::super::app::{App, CARD_HEIGHT, SelectableList};
use super::helpers::{format_relative_time, truncate};

pub fn render_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme();
    let grid = &mut app.view.grid;
    grid.layout(area);

    let columns = grid.columns().max(1);
    let card_width = area.width / columns as u16;
    let visible_rows = usize::from(area.height / CARD_HEIGHT);
    let first = grid.offset_row() * columns;
    let selected = grid.selected_index();

    for (slot, (index, item)) in app
        .view
        .items
        .iter()
        .enumerate()
        .skip(first)
        .take(visible_rows * columns)
        .enumerate()
    {
        let rect = Rect::new(
            area.x + (slot % columns) as u16 * card_width,
            area.y + (slot / columns) as u16 * CARD_HEIGHT,
            card_width,
            CARD_HEIGHT,
        );
        let is_selected = index == selected;
        let inner_width = usize::from(card_width.saturating_sub(2));

        let border_style = if is_selected {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.border)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if is_selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .style(Style::default().bg(if is_selected {
                theme.surface
            } else {
                theme.background
            }));

        let added = item
            .added_at
            .as_ref()
            .map(format_relative_time)
            .unwrap_or_default();
        let cover = if item.cover_url.is_some() { "▣ " } else { "□ " };

        let title_style = if is_selected {
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        let lines = vec![
            Line::from(Span::styled(
                truncate(&item.title, inner_width),
                title_style,
            )),
            Line::from(vec![
                Span::styled(cover, Style::default().fg(theme.muted_text)),
                Span::styled(
                    truncate(&item.video_code, inner_width.saturating_sub(8)),
                    Style::default().fg(theme.muted_text),
                ),
            ]),
            Line::from(Span::styled(added, Style::default().fg(theme.muted_text))),
        ];

        frame.render_widget(Paragraph::new(lines).block(block), rect);
    }
}
