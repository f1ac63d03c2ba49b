//! Database schema initialization

use anyhow::Result;
use rusqlite::Connection;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS favorites (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            video_code TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            cover_url TEXT,
            added_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_favorites_added ON favorites(added_at);

        CREATE TABLE IF NOT EXISTS session (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            csrf_token TEXT NOT NULL,
            issued_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}
