//! Session token storage
//!
//! The local store hands out a token with every page, and deletes must echo
//! the current one back.

use anyhow::Result;
use chrono::Utc;
use rusqlite::{OptionalExtension, params};

use super::Database;

fn new_token() -> String {
    let now = Utc::now();
    format!(
        "{:x}{:08x}",
        now.timestamp(),
        now.timestamp_subsec_nanos()
    )
}

impl Database {
    /// Current session token, issuing one if none exists yet
    pub fn session_token(&self) -> Result<String> {
        let conn = self.conn()?;
        let existing: Option<String> = conn
            .query_row("SELECT csrf_token FROM session WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        if let Some(token) = existing {
            return Ok(token);
        }

        let token = new_token();
        conn.execute(
            "INSERT INTO session (id, csrf_token, issued_at) VALUES (1, ?1, ?2)",
            params![token, Utc::now().to_rfc3339()],
        )?;
        Ok(token)
    }

    /// Replace the session token, invalidating tokens held by open screens
    pub fn rotate_session_token(&self) -> Result<String> {
        let token = new_token();
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO session (id, csrf_token, issued_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET csrf_token = excluded.csrf_token, issued_at = excluded.issued_at",
            params![token, Utc::now().to_rfc3339()],
        )?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_is_stable() {
        let db = Database::open_in_memory().unwrap();
        let first = db.session_token().unwrap();
        assert_eq!(db.session_token().unwrap(), first);
    }

    #[test]
    fn test_rotate_replaces_token() {
        let db = Database::open_in_memory().unwrap();
        db.session_token().unwrap();
        let rotated = db.rotate_session_token().unwrap();
        assert_eq!(db.session_token().unwrap(), rotated);
    }
}
