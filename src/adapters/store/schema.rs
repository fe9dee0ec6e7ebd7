use std::collections::BTreeSet;

use rusqlite::{Connection, OptionalExtension};

use crate::core::errors::Result;

const CREATE_LOGS: &str = "CREATE TABLE IF NOT EXISTS logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    category TEXT NOT NULL,
    content TEXT NOT NULL,
    tags TEXT,
    file_path TEXT,
    line_start INTEGER,
    line_end INTEGER,
    git_branch TEXT,
    git_commit TEXT,
    project_path TEXT
)";

const CREATE_INDEXES: &str = "
    CREATE INDEX IF NOT EXISTS idx_logs_timestamp ON logs(timestamp);
    CREATE INDEX IF NOT EXISTS idx_logs_category ON logs(category);
";

/// Context columns added after the first five-column schema.
const CONTEXT_COLUMNS: &[(&str, &str)] = &[
    ("file_path", "TEXT"),
    ("line_start", "INTEGER"),
    ("line_end", "INTEGER"),
    ("git_branch", "TEXT"),
    ("git_commit", "TEXT"),
    ("project_path", "TEXT"),
];

/// Column list shared by every `SELECT` on `logs`, in row-mapping order.
pub const LOG_COLUMNS: &str = "id, timestamp, category, content, tags, \
     file_path, line_start, line_end, git_branch, git_commit, project_path";

/// Create the `logs` table, or bring an older one up to date.
///
/// Older databases lack the context columns and use a plain rowid key,
/// which lets SQLite hand out the id of a deleted newest row again. They
/// are upgraded in place.
pub fn install(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(CREATE_LOGS)?;

    let existing = existing_columns(conn)?;
    for (name, sql_type) in CONTEXT_COLUMNS {
        if !existing.contains(*name) {
            tracing::warn!(column = *name, "adding missing column to logs table");
            conn.execute_batch(&format!("ALTER TABLE logs ADD COLUMN {name} {sql_type}"))?;
        }
    }

    if !uses_autoincrement(conn)? {
        tracing::warn!("rebuilding logs table with AUTOINCREMENT ids");
        rebuild_with_autoincrement(conn)?;
    }

    conn.execute_batch(CREATE_INDEXES)?;
    Ok(())
}

fn existing_columns(conn: &Connection) -> Result<BTreeSet<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info(logs)")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<BTreeSet<_>, _>>()?;
    Ok(names)
}

fn uses_autoincrement(conn: &Connection) -> Result<bool> {
    let sql: Option<String> = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'logs'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(sql.is_some_and(|s| s.to_ascii_uppercase().contains("AUTOINCREMENT")))
}

fn rebuild_with_autoincrement(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch("ALTER TABLE logs RENAME TO logs_legacy")?;
    tx.execute_batch(CREATE_LOGS)?;
    tx.execute_batch(&format!(
        "INSERT INTO logs ({LOG_COLUMNS}) SELECT {LOG_COLUMNS} FROM logs_legacy ORDER BY id"
    ))?;
    tx.execute_batch("DROP TABLE logs_legacy")?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE logs (
                id INTEGER PRIMARY KEY,
                timestamp TEXT NOT NULL,
                category TEXT NOT NULL,
                content TEXT NOT NULL,
                tags TEXT
            );
            INSERT INTO logs (timestamp, category, content, tags)
                VALUES ('2025-11-01T09:00:00', '開発', 'legacy row', 'a,b');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn install_creates_fresh_table() {
        let mut conn = Connection::open_in_memory().unwrap();
        install(&mut conn).unwrap();

        let columns = existing_columns(&conn).unwrap();
        for (name, _) in CONTEXT_COLUMNS {
            assert!(columns.contains(*name), "missing column {name}");
        }
        assert!(uses_autoincrement(&conn).unwrap());
    }

    #[test]
    fn install_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        install(&mut conn).unwrap();
        install(&mut conn).unwrap();
        assert_eq!(existing_columns(&conn).unwrap().len(), 11);
    }

    #[test]
    fn install_upgrades_legacy_table_and_keeps_rows() {
        let mut conn = legacy_db();
        install(&mut conn).unwrap();

        assert!(existing_columns(&conn).unwrap().contains("project_path"));
        assert!(uses_autoincrement(&conn).unwrap());

        let (id, content, branch): (i64, String, Option<String>) = conn
            .query_row(
                "SELECT id, content, git_branch FROM logs",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(content, "legacy row");
        assert!(branch.is_none());
    }

    #[test]
    fn upgraded_table_does_not_reuse_ids() {
        let mut conn = legacy_db();
        install(&mut conn).unwrap();

        conn.execute("DELETE FROM logs WHERE id = 1", []).unwrap();
        conn.execute(
            "INSERT INTO logs (timestamp, category, content) VALUES ('2025-11-02T09:00:00', 'x', 'y')",
            [],
        )
        .unwrap();
        assert_eq!(conn.last_insert_rowid(), 2);
    }
}
