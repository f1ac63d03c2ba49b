//! `favreel remove`

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use super::Session;
use super::console::ConsoleView;
use crate::binding::{ConfirmPrompt, ConfirmRequest};
use crate::config::FavreelConfig;
use crate::db::Database;

/// Holds the request the binding asked to confirm
#[derive(Debug, Default)]
struct TerminalPrompt {
    request: Option<ConfirmRequest>,
}

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&mut self, request: ConfirmRequest) {
        self.request = Some(request);
    }
}

fn ask(request: &ConfirmRequest) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(&request.message)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

/// Remove a favorite by code, asking first unless `yes`
pub fn cmd_remove(config: &FavreelConfig, db: Arc<Database>, code: &str, yes: bool) -> Result<()> {
    remove_with(config, db, code, |request| {
        if yes { Ok(true) } else { ask(request) }
    })
}

fn remove_with<F>(config: &FavreelConfig, db: Arc<Database>, code: &str, decide: F) -> Result<()>
where
    F: FnOnce(&ConfirmRequest) -> Result<bool>,
{
    let mut session = Session::new(db, config.page_size)?;
    let mut view = ConsoleView::new(true);
    session.load_all(&mut view)?;
    if let Some(message) = view.error() {
        bail!("Failed to load favorites: {}", message);
    }

    let position = view
        .items()
        .iter()
        .position(|item| item.video_code == code)
        .with_context(|| format!("'{}' is not in your favorites", code))?;

    let mut prompt = TerminalPrompt::default();
    session.binding().on_item_long_press(position, &mut prompt);
    let request = prompt
        .request
        .with_context(|| format!("'{}' is no longer in the list", code))?;

    if !decide(&request)? {
        println!("{} Kept {}", "!".yellow(), request.pending.title.cyan());
        return Ok(());
    }

    let task = session.binding().confirm_delete(request.pending);
    session.settle(task, &mut view)?;
    if view.delete_failed() {
        bail!("Could not remove '{}'", code);
    }
    Ok(())
}
