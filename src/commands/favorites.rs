//! Store management commands: add, import, config, completions

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::FavreelConfig;
use crate::db::Database;
use crate::models::NewFavorite;

/// Add a single favorite
pub fn cmd_add(db: &Database, code: &str, title: &str, cover: Option<&str>) -> Result<()> {
    let favorite = NewFavorite {
        video_code: code.to_string(),
        title: title.to_string(),
        cover_url: cover.map(str::to_string),
    };

    if db.insert_favorite(&favorite)? {
        info!(video_code = code, "favorite added");
        println!("{} Added {} ({})", "+".green(), title.cyan(), code);
    } else {
        let existing = db
            .get_favorite(code)?
            .map(|summary| summary.title)
            .unwrap_or_default();
        println!(
            "{} {} is already a favorite as {}",
            "!".yellow(),
            code.cyan(),
            existing.cyan()
        );
    }
    Ok(())
}

/// Counts from an import run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
}

/// Add favorites from a JSON array
pub fn cmd_import(db: &Database, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let favorites: Vec<NewFavorite> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let summary = import_favorites(db, &favorites)?;
    println!(
        "{} Imported {} favorite{} ({} already present)",
        "+".green(),
        summary.added,
        if summary.added == 1 { "" } else { "s" },
        summary.skipped
    );
    Ok(())
}

pub fn import_favorites(db: &Database, favorites: &[NewFavorite]) -> Result<ImportSummary> {
    let progress = ProgressBar::new(favorites.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut summary = ImportSummary::default();
    for favorite in favorites {
        progress.set_message(favorite.video_code.clone());
        if db.insert_favorite(favorite)? {
            summary.added += 1;
        } else {
            summary.skipped += 1;
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    // Positions held by open screens no longer match the store
    if summary.added > 0 {
        db.rotate_session_token()?;
        debug!("session token rotated after import");
    }

    info!(added = summary.added, skipped = summary.skipped, "import finished");
    Ok(summary)
}

/// Show the effective configuration, or only where it lives
pub fn cmd_config(config: &FavreelConfig, config_path: &Path, path_only: bool) -> Result<()> {
    if path_only {
        println!("{}", config_path.display());
        return Ok(());
    }

    println!("{} {}", "#".dimmed(), config_path.display().to_string().dimmed());
    if !config_path.exists() {
        println!("{}", "# (file not found, showing defaults)".dimmed());
    }
    print!("{}", toml::to_string_pretty(config)?);
    println!(
        "{} database = {}",
        "#".dimmed(),
        config.database_path()?.display()
    );
    Ok(())
}

pub fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "favreel", &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::commands::{ConsoleView, Session};

    fn favorite(code: &str) -> NewFavorite {
        NewFavorite {
            video_code: code.to_string(),
            title: format!("Title {code}"),
            cover_url: None,
        }
    }

    #[test]
    fn test_import_counts_duplicates() {
        let db = Database::open_in_memory().unwrap();
        db.insert_favorite(&favorite("a")).unwrap();

        let summary = import_favorites(&db, &[favorite("a"), favorite("b"), favorite("c")]).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                added: 2,
                skipped: 1
            }
        );
        assert_eq!(db.count_favorites().unwrap(), 3);
    }

    #[test]
    fn test_import_rotates_session_token() {
        let db = Database::open_in_memory().unwrap();
        let before = db.session_token().unwrap();

        import_favorites(&db, &[favorite("a")]).unwrap();
        let after = db.session_token().unwrap();
        assert_ne!(after, before);

        import_favorites(&db, &[favorite("a")]).unwrap();
        assert_eq!(db.session_token().unwrap(), after);
    }

    #[test]
    fn test_delete_from_listing_opened_before_import_is_rejected() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.insert_favorite(&favorite("a")).unwrap();
        let mut session = Session::new(Arc::clone(&db), 20).unwrap();
        let mut view = ConsoleView::new(false);
        let task = session.binding().refresh();
        session.settle(task, &mut view).unwrap();

        import_favorites(&db, &[favorite("b")]).unwrap();
        let task = session.controller().delete_item("a", 0);
        session.settle(task, &mut view).unwrap();

        assert!(view.delete_failed());
        assert!(db.get_favorite("a").unwrap().is_some());
    }

    #[test]
    fn test_import_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(
            &path,
            r#"[{"video_code": "x1", "title": "One"}, {"video_code": "x2", "title": "Two", "cover_url": "https://example.com/x2.jpg"}]"#,
        )
        .unwrap();
        let db = Database::open_in_memory().unwrap();

        cmd_import(&db, &path).unwrap();

        let stored = db.get_favorite("x2").unwrap().unwrap();
        assert_eq!(stored.cover_url.as_deref(), Some("https://example.com/x2.jpg"));
        assert_eq!(db.count_favorites().unwrap(), 2);
    }

    #[test]
    fn test_add_twice_is_not_an_error() {
        let db = Database::open_in_memory().unwrap();
        cmd_add(&db, "v1", "Video", None).unwrap();
        cmd_add(&db, "v1", "Video", None).unwrap();
        assert_eq!(db.count_favorites().unwrap(), 1);
    }
}
