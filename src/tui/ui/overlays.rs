//! Overlay rendering
//!
//! Help, the delete confirmation, notices and the empty/error placeholder.
//! Overlays resolve their colors through the context they are drawn in.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::super::app::{ActiveNotice, Placeholder};
use super::super::context::{UiContext, theme_color, theme_of};
use super::super::theme::{Theme, ThemeAttr};
use super::helpers::{centered_fixed, centered_rect};
use crate::binding::{ConfirmRequest, NoticeLevel};

fn key_line<'a>(key: &'a str, action: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {key:<10}"), Style::default().fg(theme.warning)),
        Span::styled(action, Style::default().fg(theme.text)),
    ])
}

/// Render the help overlay
pub fn render_help_overlay(frame: &mut Frame, ctx: &dyn UiContext, area: Rect) {
    let theme = theme_of(ctx).unwrap_or_default();
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().fg(theme.accent).bold(),
        )),
        Line::from(""),
        key_line("h/j/k/l", "Move around the grid", &theme),
        key_line("g / G", "First / last favorite", &theme),
        key_line("r", "Refresh", &theme),
        key_line("m", "Load more", &theme),
        key_line("t", "Cycle theme", &theme),
        key_line("q", "Quit", &theme),
        Line::from(""),
        Line::from(Span::styled(
            "Removing favorites",
            Style::default().fg(theme.highlight).bold(),
        )),
        Line::from(Span::styled(
            "  Press D (or right-click) on a video to remove it from favorites.",
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(
            "  Scrolling past the last row loads the next page.",
            Style::default().fg(theme.muted_text),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.background));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(
        Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false }),
        popup_area,
    );
}

/// Render the yes/no dialog for a pending delete
pub fn render_confirm_dialog(
    frame: &mut Frame,
    ctx: &dyn UiContext,
    request: &ConfirmRequest,
    area: Rect,
) {
    let color = |attr| theme_color(ctx, attr).unwrap_or_else(|_| Theme::default().color(attr));
    let popup_area = centered_fixed(52, 7, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            request.message.as_str(),
            Style::default().fg(color(ThemeAttr::Text)),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(color(ThemeAttr::Error)).bold()),
            Span::styled(" delete   ", Style::default().fg(color(ThemeAttr::MutedText))),
            Span::styled("n", Style::default().fg(color(ThemeAttr::Success)).bold()),
            Span::styled(" keep", Style::default().fg(color(ThemeAttr::MutedText))),
        ]),
    ];

    let block = Block::default()
        .title(format!(" {} ", request.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(ThemeAttr::Error)))
        .style(Style::default().bg(color(ThemeAttr::Surface)));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup_area,
    );
}

/// Toast in the bottom-right corner
pub fn render_notice(frame: &mut Frame, theme: &Theme, active: &ActiveNotice, area: Rect) {
    let color = match active.notice.level {
        NoticeLevel::Info => theme.highlight,
        NoticeLevel::Success => theme.success,
        NoticeLevel::Error => theme.error,
    };
    let width = (active.notice.text.chars().count() as u16 + 4).min(area.width);
    let height = 3.min(area.height);
    let rect = Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    );

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Span::styled(
            active.notice.text.as_str(),
            Style::default().fg(color),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme.surface)),
        ),
        rect,
    );
}

/// Empty or error placeholder covering the grid
pub fn render_placeholder(frame: &mut Frame, theme: &Theme, placeholder: &Placeholder, area: Rect) {
    let (headline, detail, color) = match placeholder {
        Placeholder::None => return,
        Placeholder::Empty => (
            "No favorites yet",
            "Videos you favorite show up here.".to_string(),
            theme.muted_text,
        ),
        Placeholder::Error(message) => (
            "Couldn't load favorites",
            format!("{message}\nPress r to try again."),
            theme.error,
        ),
    };

    let mut lines = vec![
        Line::from(Span::styled(headline, Style::default().fg(color).bold())),
        Line::from(""),
    ];
    lines.extend(
        detail
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.text)))),
    );

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered_fixed(area.width.saturating_sub(4), 6, area),
    );
}
