// SQLite-backed task storage

use crate::backend::TaskBackend;
use crate::task::Task;
use eyre::{Context, Result};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Durable [`TaskBackend`] over a single SQLite database file.
///
/// One row per task, keyed by `id`. `rowid` preserves insertion order, which
/// is the order `load_all` returns.
pub struct SqliteBackend {
    path: PathBuf,
    db: Connection,
}

impl SqliteBackend {
    /// Open or create the database at the given file path.
    ///
    /// The parent directory is created if it doesn't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create storage directory")?;
        }

        let db = Connection::open(&path).context("Failed to open SQLite database")?;

        let backend = Self { path, db };
        backend.create_schema()?;
        Ok(backend)
    }

    /// Database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create_schema(&self) -> Result<()> {
        debug!("Creating database schema");

        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                body TEXT NOT NULL,
                is_complete INTEGER NOT NULL,
                created_at REAL NOT NULL,
                updated_at REAL NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

impl TaskBackend for SqliteBackend {
    fn load_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self.db.prepare(
            "SELECT id, body, is_complete, created_at, updated_at FROM tasks ORDER BY rowid",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Task {
                id: row.get(0)?,
                body: row.get(1)?,
                is_complete: row.get::<_, i64>(2)? != 0,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }

        debug!(count = tasks.len(), "Loaded tasks from SQLite");
        Ok(tasks)
    }

    fn insert(&mut self, task: &Task) -> Result<()> {
        self.db
            .execute(
                "INSERT OR REPLACE INTO tasks (id, body, is_complete, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    task.id,
                    task.body,
                    task.is_complete as i64,
                    task.created_at,
                    task.updated_at
                ],
            )
            .context("Failed to insert task")?;
        Ok(())
    }

    fn save(&mut self, task: &Task) -> Result<()> {
        // Upsert in place: OR REPLACE would re-insert under a new rowid and
        // move the task to the end of load_all's order.
        self.db
            .execute(
                "INSERT INTO tasks (id, body, is_complete, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                     body = excluded.body,
                     is_complete = excluded.is_complete,
                     created_at = excluded.created_at,
                     updated_at = excluded.updated_at",
                rusqlite::params![
                    task.id,
                    task.body,
                    task.is_complete as i64,
                    task.created_at,
                    task.updated_at
                ],
            )
            .context("Failed to save task")?;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.db
            .execute("DELETE FROM tasks WHERE id = ?1", [id])
            .context("Failed to delete task")?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.db
            .execute("DELETE FROM tasks", [])
            .context("Failed to clear tasks")?;
        Ok(())
    }
}
