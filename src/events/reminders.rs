use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::APP_DIR_NAME;
use crate::error::{GalleryError, Result};

/// A reminder the user set on an event
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    /// When the reminder was set
    pub timestamp: DateTime<Utc>,
    /// Whether the user has been notified yet
    pub notified: bool,
}

/// The ReminderStore keeps per-event reminder flags in a small SQLite
/// database, keyed by the synthesized event id.
pub struct ReminderStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl ReminderStore {
    /// Open the store at its default location:
    /// - Linux: ~/.local/share/ultrabots-gallery/reminders.db
    /// - macOS: ~/Library/Application Support/ultrabots-gallery/reminders.db
    /// - Windows: %APPDATA%\ultrabots-gallery\reminders.db
    pub fn open_default() -> Result<Self> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(GalleryError::NoDataDir)?;

        path.push(APP_DIR_NAME);
        path.push("reminders.db");
        Self::open(&path)
    }

    /// Open or create the store at `path`
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        log::info!("Reminder database at: {}", path.display());

        let store = ReminderStore {
            conn,
            db_path: Some(path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Non-persistent store, used when no data directory is available
    pub fn open_in_memory() -> Result<Self> {
        let store = ReminderStore {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS reminders (
                event_id        TEXT PRIMARY KEY,
                created_at      TEXT NOT NULL,
                notified        INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Set a reminder for `event_id`. Setting it again refreshes the
    /// timestamp and clears the notified flag.
    pub fn set_reminder(&self, event_id: &str) -> Result<Reminder> {
        let reminder = Reminder {
            timestamp: Utc::now(),
            notified: false,
        };

        self.conn.execute(
            "INSERT INTO reminders (event_id, created_at, notified) VALUES (?1, ?2, 0)
             ON CONFLICT(event_id) DO UPDATE SET created_at = excluded.created_at, notified = 0",
            rusqlite::params![event_id, reminder.timestamp.to_rfc3339()],
        )?;

        log::debug!("Reminder set for {}", event_id);
        Ok(reminder)
    }

    /// Look up the reminder for one event
    pub fn get(&self, event_id: &str) -> Result<Option<Reminder>> {
        let row: Option<(String, bool)> = self
            .conn
            .query_row(
                "SELECT created_at, notified FROM reminders WHERE event_id = ?1",
                [event_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        Ok(row.and_then(|(created_at, notified)| to_reminder(event_id, &created_at, notified)))
    }

    pub fn has_reminder(&self, event_id: &str) -> Result<bool> {
        Ok(self.get(event_id)?.is_some())
    }

    /// Every stored reminder, keyed by event id
    pub fn all(&self) -> Result<HashMap<String, Reminder>> {
        let mut stmt = self
            .conn
            .prepare("SELECT event_id, created_at, notified FROM reminders")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, bool>(2)?,
            ))
        })?;

        let mut reminders = HashMap::new();
        for row in rows {
            let (event_id, created_at, notified) = row?;
            if let Some(reminder) = to_reminder(&event_id, &created_at, notified) {
                reminders.insert(event_id, reminder);
            }
        }

        Ok(reminders)
    }
}

/// Rows with an unreadable timestamp are treated as absent
fn to_reminder(event_id: &str, created_at: &str, notified: bool) -> Option<Reminder> {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(timestamp) => Some(Reminder {
            timestamp: timestamp.with_timezone(&Utc),
            notified,
        }),
        Err(e) => {
            log::warn!("Ignoring reminder for {} with bad timestamp: {}", event_id, e);
            None
        }
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for ReminderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_and_query() {
        let store = ReminderStore::open_in_memory().unwrap();
        assert!(!store.has_reminder("event-2025-03-14-regional-0").unwrap());

        let reminder = store.set_reminder("event-2025-03-14-regional-0").unwrap();
        assert!(!reminder.notified);
        assert!(store.has_reminder("event-2025-03-14-regional-0").unwrap());
        assert!(!store.has_reminder("event-2025-03-15-other-1").unwrap());

        let stored = store.get("event-2025-03-14-regional-0").unwrap().unwrap();
        assert_eq!(stored.timestamp.timestamp(), reminder.timestamp.timestamp());
    }

    #[test]
    fn test_setting_again_resets_notified() {
        let store = ReminderStore::open_in_memory().unwrap();
        store.set_reminder("a").unwrap();
        store
            .conn
            .execute("UPDATE reminders SET notified = 1 WHERE event_id = 'a'", [])
            .unwrap();
        assert!(store.get("a").unwrap().unwrap().notified);

        store.set_reminder("a").unwrap();
        assert!(!store.get("a").unwrap().unwrap().notified);
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("reminders.db");

        {
            let store = ReminderStore::open(&path).unwrap();
            store.set_reminder("event-2025-01-04-season-kickoff-0").unwrap();
            assert_eq!(store.path(), Some(path.as_path()));
        }

        let store = ReminderStore::open(&path).unwrap();
        let all = store.all().unwrap();
        assert!(all.contains_key("event-2025-01-04-season-kickoff-0"));
    }

    #[test]
    fn test_bad_timestamp_is_ignored() {
        let store = ReminderStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO reminders (event_id, created_at) VALUES ('broken', 'yesterday')",
                [],
            )
            .unwrap();
        assert_eq!(store.get("broken").unwrap(), None);
        assert!(store.all().unwrap().is_empty());
    }
}
