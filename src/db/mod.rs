//! SQLite-backed persistence for todos.
//!
//! The methods here are synchronous and take already-validated input. The async
//! [`TodoStore`](crate::store::TodoStore) implementation wraps them.

mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::models::{NewTodo, Todo};

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    // ============================================================
    // Todo operations
    // ============================================================

    pub fn get_all_todos(&self) -> Result<Vec<Todo>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, title, done FROM todos ORDER BY seq")?;

        let todos = stmt
            .query_map([], todo_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(todos)
    }

    pub fn get_todo(&self, id: Uuid) -> Result<Option<Todo>> {
        let conn = self.lock()?;
        let todo = conn
            .query_row(
                "SELECT id, title, done FROM todos WHERE id = ?",
                [id.to_string()],
                todo_from_row,
            )
            .optional()?;
        Ok(todo)
    }

    pub fn create_todo(&self, input: NewTodo) -> Result<Todo> {
        let conn = self.lock()?;
        let id = Uuid::new_v4();

        conn.execute(
            "INSERT INTO todos (id, title, done) VALUES (?, ?, ?)",
            (id.to_string(), &input.title, input.done),
        )?;

        Ok(input.into_todo(id))
    }

    /// Replace title and done wholesale. `None` when no todo has this id.
    pub fn update_todo(&self, id: Uuid, input: NewTodo) -> Result<Option<Todo>> {
        let conn = self.lock()?;
        let rows = conn.execute(
            "UPDATE todos SET title = ?, done = ? WHERE id = ?",
            (&input.title, input.done, id.to_string()),
        )?;

        if rows == 0 {
            return Ok(None);
        }
        Ok(Some(input.into_todo(id)))
    }

    /// Remove a todo and hand back the row as it was just before deletion.
    pub fn delete_todo(&self, id: Uuid) -> Result<Option<Todo>> {
        let conn = self.lock()?;
        let todo = conn
            .query_row(
                "DELETE FROM todos WHERE id = ? RETURNING id, title, done",
                [id.to_string()],
                todo_from_row,
            )
            .optional()?;
        Ok(todo)
    }
}

/// `<platform data dir>/todo-api/todos.db`.
pub fn default_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "todo-api")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join("todos.db"))
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Todo {
        id,
        title: row.get(1)?,
        done: row.get(2)?,
    })
}
