use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

struct Migration {
    version: &'static str,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: "001",
    name: "create_todos",
    sql: include_str!("migrations/001_create_todos.sql"),
}];

const TRACKING_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    version TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL
)";

/// Bring the schema up to date. Already-recorded versions are skipped.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(TRACKING_TABLE)
        .context("Failed to create schema_migrations table")?;

    let pending = MIGRATIONS
        .iter()
        .filter_map(|m| match is_recorded(conn, m.version) {
            Ok(true) => None,
            Ok(false) => Some(Ok(m)),
            Err(e) => Some(Err(e)),
        })
        .collect::<Result<Vec<_>>>()?;

    if pending.is_empty() {
        tracing::debug!("Schema is up to date");
    }
    pending.into_iter().try_for_each(|m| apply(conn, m))
}

fn is_recorded(conn: &Connection, version: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM schema_migrations WHERE version = ?",
            [version],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Run one migration and record it, atomically.
fn apply(conn: &Connection, migration: &Migration) -> Result<()> {
    let label = format!("{} ({})", migration.version, migration.name);
    tracing::info!("Applying migration {}", label);

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql)
        .with_context(|| format!("Migration {} failed", label))?;
    tx.execute(
        "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)",
        (
            migration.version,
            migration.name,
            chrono::Utc::now().to_rfc3339(),
        ),
    )?;
    tx.commit()?;

    Ok(())
}
