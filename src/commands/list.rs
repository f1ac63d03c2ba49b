//! `favreel list`

use std::sync::Arc;

use anyhow::{Result, bail};
use colored::Colorize;

use super::Session;
use super::console::{ConsoleView, favorites_table, terminal_width};
use crate::config::FavreelConfig;
use crate::controller::FIRST_PAGE;
use crate::db::Database;

/// Load one page (or every page with `all`) into `view`
pub fn load_favorites(
    session: &mut Session,
    view: &mut ConsoleView,
    page: u32,
    all: bool,
) -> Result<()> {
    if all {
        session.load_all(view)?;
    } else if page <= FIRST_PAGE {
        let task = session.binding().refresh();
        session.settle(task, view)?;
    } else {
        let task = session.controller().request_page(page);
        session.settle(task, view)?;
    }
    Ok(())
}

/// Message for a listing that came back with no items
///
/// A later page that loaded nothing only says the store ends before it.
fn nothing_listed(page: u32, all: bool) -> String {
    if all || page <= FIRST_PAGE {
        "No favorites yet. Add one with `favreel add`.".to_string()
    } else {
        format!("Page {page} is past the end of your favorites.")
    }
}

/// Print favorites as a table or JSON
pub fn cmd_list(config: &FavreelConfig, db: Arc<Database>, page: u32, all: bool, json: bool) -> Result<()> {
    let mut session = Session::new(db, config.page_size)?;
    let mut view = ConsoleView::new(!json);
    load_favorites(&mut session, &mut view, page, all)?;

    if let Some(message) = view.error() {
        bail!("Failed to load favorites: {}", message);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(view.items())?);
        return Ok(());
    }

    if view.items().is_empty() {
        println!("{} {}", "!".yellow(), nothing_listed(page, all));
        return Ok(());
    }

    let first_number = if all {
        1
    } else {
        (page.max(FIRST_PAGE) as usize - 1) * config.page_size.max(1) as usize + 1
    };
    println!(
        "{}",
        favorites_table(view.items(), first_number, terminal_width())
    );

    let count = view.items().len();
    if all || !view.wants_more() {
        println!(
            "{} {} favorite{}",
            ">".cyan(),
            count,
            if count == 1 { "" } else { "s" }
        );
    } else {
        println!(
            "{} {} shown, more with `favreel list --page {}`",
            ">".cyan(),
            count,
            page.max(FIRST_PAGE) + 1
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewFavorite;

    fn seeded(count: usize) -> Arc<Database> {
        let db = Database::open_in_memory().unwrap();
        for i in 0..count {
            db.insert_favorite(&NewFavorite {
                video_code: format!("v{i}"),
                title: format!("Video {i}"),
                cover_url: None,
            })
            .unwrap();
        }
        Arc::new(db)
    }

    #[test]
    fn test_all_pages_are_loaded() {
        let mut session = Session::new(seeded(5), 2).unwrap();
        let mut view = ConsoleView::new(false);

        load_favorites(&mut session, &mut view, FIRST_PAGE, true).unwrap();

        assert_eq!(view.items().len(), 5);
        assert!(!view.wants_more());
        // Pages 1 and 2 succeeded, page 3 hit the end
        assert_eq!(session.controller().page_cursor(), 3);
    }

    #[test]
    fn test_single_page() {
        let mut session = Session::new(seeded(5), 2).unwrap();
        let mut view = ConsoleView::new(false);

        load_favorites(&mut session, &mut view, FIRST_PAGE, false).unwrap();

        assert_eq!(view.items().len(), 2);
        assert!(view.wants_more());
    }

    #[test]
    fn test_explicit_later_page() {
        let mut session = Session::new(seeded(5), 2).unwrap();
        let mut view = ConsoleView::new(false);

        load_favorites(&mut session, &mut view, 3, false).unwrap();

        assert_eq!(view.items().len(), 1);
        assert!(!view.wants_more());
        assert!(!view.is_empty());
    }

    #[test]
    fn test_page_past_the_end() {
        let mut session = Session::new(seeded(5), 2).unwrap();
        let mut view = ConsoleView::new(false);

        load_favorites(&mut session, &mut view, 9, false).unwrap();

        assert!(view.items().is_empty());
        assert_eq!(
            nothing_listed(9, false),
            "Page 9 is past the end of your favorites."
        );
    }

    #[test]
    fn test_nothing_listed_on_first_page() {
        assert!(nothing_listed(FIRST_PAGE, false).starts_with("No favorites yet"));
        assert!(nothing_listed(0, false).starts_with("No favorites yet"));
        assert!(nothing_listed(4, true).starts_with("No favorites yet"));
    }

    #[test]
    fn test_empty_store() {
        let mut session = Session::new(seeded(0), 2).unwrap();
        let mut view = ConsoleView::new(false);

        load_favorites(&mut session, &mut view, FIRST_PAGE, true).unwrap();

        assert!(view.items().is_empty());
        assert!(view.is_empty());
    }
}
