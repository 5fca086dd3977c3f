// src/db/view_state.rs
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::connection::Database;
use crate::errors::ServerError;

pub const KEY_BOUNDS: &str = "bounds";
pub const KEY_VIEWPORT: &str = "viewport";

pub fn load_raw(
    conn: &Connection,
    session_hash: &[u8],
    key: &str,
) -> Result<Option<String>, ServerError> {
    conn.query_row(
        "select value from view_state where session_hash = ? and key = ?",
        params![session_hash, key],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("view_state lookup failed: {e}")))
}

pub fn store_raw(
    conn: &Connection,
    session_hash: &[u8],
    key: &str,
    value: &str,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into view_state (session_hash, key, value, updated_at)
        values (?, ?, ?, ?)
        on conflict(session_hash, key) do update set
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
        params![session_hash, key, value, now],
    )
    .map_err(|e| ServerError::DbError(format!("view_state write failed: {e}")))?;
    Ok(())
}

/// Key-value UI state for one view session, persisted across reloads.
pub struct ViewStateStore<'a> {
    db: &'a Database,
    session_hash: [u8; 32],
}

impl<'a> ViewStateStore<'a> {
    pub fn new(db: &'a Database, session_hash: [u8; 32]) -> Self {
        Self { db, session_hash }
    }

    /// Stored value for `key`, or `default` when nothing usable is stored.
    /// The default is not written back.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, ServerError> {
        let raw = self
            .db
            .with_conn(|conn| load_raw(conn, &self.session_hash, key))?;

        let Some(raw) = raw else {
            return Ok(default);
        };

        match serde_json::from_str(&raw) {
            Ok(v) => Ok(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring undecodable view state");
                Ok(default)
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), ServerError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| ServerError::BadRequest(format!("unserializable view state: {e}")))?;
        let now = Utc::now().timestamp();
        self.db
            .with_conn(|conn| store_raw(conn, &self.session_hash, key, &raw, now))
    }
}

/// Drop view state not written since `cutoff` (unix seconds).
pub fn purge_older_than(db: &Database, cutoff: i64) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        conn.execute("delete from view_state where updated_at < ?", params![cutoff])
            .map_err(|e| ServerError::DbError(format!("view_state purge failed: {e}")))
    })
}
