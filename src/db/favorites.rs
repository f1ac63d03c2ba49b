//! Favorite database operations

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use rusqlite::{OptionalExtension, params};

use crate::models::{NewFavorite, VideoSummary};

use super::{Database, parse_datetime};

const SELECT_COLUMNS: &str = "SELECT video_code, title, cover_url, added_at FROM favorites";

fn row_to_summary(row: &rusqlite::Row<'_>) -> rusqlite::Result<VideoSummary> {
    Ok(VideoSummary {
        video_code: row.get(0)?,
        title: row.get(1)?,
        cover_url: row.get(2)?,
        added_at: Some(parse_datetime(row.get(3)?)),
    })
}

impl Database {
    /// Store a favorite. Returns false if the code is already present.
    pub fn insert_favorite(&self, favorite: &NewFavorite) -> Result<bool> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO favorites (video_code, title, cover_url, added_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                favorite.video_code,
                favorite.title,
                favorite.cover_url,
                Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        Ok(inserted > 0)
    }

    /// One page of favorites, newest first. Pages are 1-based; 0 reads as 1.
    pub fn list_favorites_page(&self, page: u32, page_size: u32) -> Result<Vec<VideoSummary>> {
        let offset = u64::from(page.max(1) - 1) * u64::from(page_size);
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_COLUMNS} ORDER BY added_at DESC, id DESC LIMIT ?1 OFFSET ?2"
        ))?;
        let items = stmt
            .query_map(params![page_size, offset as i64], row_to_summary)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    pub fn count_favorites(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM favorites", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    pub fn get_favorite(&self, video_code: &str) -> Result<Option<VideoSummary>> {
        let conn = self.conn()?;
        let summary = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE video_code = ?1"),
                [video_code],
                row_to_summary,
            )
            .optional()?;
        Ok(summary)
    }

    /// Remove a favorite. Returns false if nothing matched.
    pub fn delete_favorite(&self, video_code: &str) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM favorites WHERE video_code = ?1", [video_code])?;
        Ok(deleted > 0)
    }
}
