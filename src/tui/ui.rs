//! UI rendering for the TUI

mod grid;
mod helpers;
mod overlays;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::{App, LoadMoreStatus, Placeholder};
use super::theme::Theme;
use grid::render_grid;
use overlays::{render_confirm_dialog, render_help_overlay, render_notice, render_placeholder};

/// Main render function
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let theme = app.theme();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Grid
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, app, &theme, chunks[0]);
    render_body(frame, app, &theme, chunks[1]);
    render_footer(frame, app, &theme, chunks[2]);

    if let Some(active) = &app.view.notice {
        render_notice(frame, &theme, active, chunks[1]);
    }

    if app.show_help {
        let ctx = app.overlay_context("help");
        render_help_overlay(frame, &ctx, area);
    }

    // Confirmation dialog takes highest priority
    if let Some(request) = &app.view.pending_delete {
        let ctx = app.overlay_context("confirm-delete");
        render_confirm_dialog(frame, &ctx, request, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let title = app.screen_title(app.screen_context());
    let count = app.view.items.len();

    let mut spans = vec![Span::styled(
        format!(" {count} loaded"),
        Style::default().fg(theme.muted_text),
    )];
    if app.view.refreshing {
        spans.push(Span::styled(
            "  ⟳ refreshing",
            Style::default().fg(theme.warning),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                format!(" {title} "),
                Style::default().fg(theme.accent).bold(),
            )),
    );
    frame.render_widget(header, area);
}

fn render_body(frame: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    // Errors with content already on screen only show in the footer
    let show_grid = match &app.view.placeholder {
        Placeholder::None => true,
        Placeholder::Error(_) => !app.view.items.is_empty(),
        Placeholder::Empty => false,
    };
    if show_grid {
        render_grid(frame, app, area);
    } else {
        render_placeholder(frame, theme, &app.view.placeholder, area);
    }
}

fn render_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let mut spans = vec![
        Span::styled(" hjkl", Style::default().fg(theme.highlight)),
        Span::styled(" move ", Style::default().fg(theme.muted_text)),
        Span::styled(" r", Style::default().fg(theme.highlight)),
        Span::styled(" refresh ", Style::default().fg(theme.muted_text)),
        Span::styled(" D", Style::default().fg(theme.error)),
        Span::styled(" remove ", Style::default().fg(theme.muted_text)),
        Span::styled(" ?", Style::default().fg(theme.highlight)),
        Span::styled(" help ", Style::default().fg(theme.muted_text)),
        Span::styled(" │ ", Style::default().fg(theme.border)),
    ];

    let (status, color) = match app.view.load_more {
        LoadMoreStatus::Idle => ("", theme.muted_text),
        LoadMoreStatus::Loading => ("loading more…", theme.warning),
        LoadMoreStatus::Failed => ("load failed, press m to retry", theme.error),
        LoadMoreStatus::NoMoreData => ("no more favorites", theme.muted_text),
    };
    spans.push(Span::styled(status, Style::default().fg(color)));

    if let Placeholder::Error(message) = &app.view.placeholder {
        if !app.view.items.is_empty() {
            spans.push(Span::styled(
                format!("  {message}"),
                Style::default().fg(theme.error),
            ));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.surface)),
        area,
    );
}
