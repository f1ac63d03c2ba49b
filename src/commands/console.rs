//! Console rendering of a favorites list

use std::time::Duration;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table, presets::UTF8_BORDERS_ONLY};
use indicatif::{ProgressBar, ProgressStyle};

use crate::binding::{
    Notice, NoticeLevel, Notifier, RefreshIndicator, RenderSurface, StateSurface,
};
use crate::controller::ItemList;
use crate::error::ProviderError;
use crate::models::VideoSummary;

/// Width used when the terminal size is unknown
const FALLBACK_WIDTH: u16 = 100;

/// Collects binding output for printing once the command is done
#[derive(Debug, Default)]
pub struct ConsoleView {
    items: ItemList,
    spinner: Option<ProgressBar>,
    show_progress: bool,
    exhausted: bool,
    empty: bool,
    error: Option<String>,
    delete_failed: bool,
}

impl ConsoleView {
    /// `show_progress` enables the spinner; off for machine-readable output
    pub fn new(show_progress: bool) -> Self {
        Self {
            show_progress,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[VideoSummary] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn delete_failed(&self) -> bool {
        self.delete_failed
    }

    /// Another page is worth asking for
    pub fn wants_more(&self) -> bool {
        !self.exhausted && self.error.is_none()
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl RenderSurface for ConsoleView {
    fn submit_list(&mut self, items: ItemList) {
        self.items = items;
    }
}

impl RefreshIndicator for ConsoleView {
    fn auto_refresh(&mut self) {
        if !self.show_progress || self.spinner.is_some() {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Loading favorites...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn finish_refresh(&mut self) {
        self.stop_spinner();
    }

    fn finish_load_more(&mut self, _success: bool) {
        self.stop_spinner();
    }

    fn finish_load_more_with_no_more_data(&mut self) {
        self.stop_spinner();
        self.exhausted = true;
    }
}

impl StateSurface for ConsoleView {
    fn clear_state_view(&mut self) {
        self.empty = false;
        self.error = None;
    }

    fn show_empty(&mut self) {
        self.empty = true;
    }

    fn show_error(&mut self, cause: &ProviderError) {
        self.error = Some(cause.cause_message());
    }

    fn show_content(&mut self) {
        self.empty = false;
    }
}

impl Notifier for ConsoleView {
    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => eprintln!("{} {}", ">".cyan(), notice.text),
            NoticeLevel::Success => eprintln!("{} {}", "✓".green(), notice.text),
            NoticeLevel::Error => {
                self.delete_failed = true;
                eprintln!("{} {}", "✗".red(), notice.text);
            }
        }
    }
}

/// Current terminal width in columns
pub fn terminal_width() -> u16 {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Table of favorites numbered from `first_number`, titles cut to fit `width`
pub fn favorites_table(items: &[VideoSummary], first_number: usize, width: u16) -> Table {
    let title_width = usize::from(width.saturating_sub(40)).max(12);

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width);
    table.set_header(vec!["#", "Code", "Title", "Added"]);

    for (i, item) in items.iter().enumerate() {
        let title = if item.title.chars().count() > title_width {
            let cut: String = item.title.chars().take(title_width - 1).collect();
            format!("{cut}…")
        } else {
            item.title.clone()
        };
        let added = item
            .added_at
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            (first_number + i).to_string(),
            item.video_code.clone(),
            title,
            added,
        ]);
    }
    table
}
