use std::path::Path;
use std::time::Duration;

use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use crate::adapters::store::filter_compiler;
use crate::adapters::store::schema::{self, LOG_COLUMNS};
use crate::core::errors::{Result, WorklogError};
use crate::core::models::log_entry::{LogContext, LogEntry, LogUpdate, NewLogEntry, TIMESTAMP_FORMAT};
use crate::core::models::results::CategoryCount;
use crate::core::models::search_filter::{SearchFilter, SortOrder};
use crate::core::services::audit_trail::{self, DEFAULT_PREVIEW_CHARS};
use crate::core::services::validation;
use crate::core::traits::clock::{Clock, SystemClock};
use crate::core::traits::log_store::LogStore;

/// SQLite-backed log store.
///
/// Tags live in a single comma-joined column; everywhere outside this
/// file they are a `Vec<String>`. Each update or delete runs in one
/// transaction together with its audit entry, so readers never see one
/// without the other.
pub struct SqliteLogStore {
    conn: Connection,
    clock: Box<dyn Clock>,
    preview_chars: usize,
}

impl SqliteLogStore {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        tracing::debug!(path = %path.display(), "opened log database");
        Self::from_connection(conn)
    }

    /// A private in-memory database.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        schema::install(&mut conn)?;
        Ok(Self {
            conn,
            clock: Box::new(SystemClock),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        })
    }

    /// Replace the timestamp source.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Set how many characters of content audit entries quote.
    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }
}

impl LogStore for SqliteLogStore {
    fn insert(&mut self, entry: &NewLogEntry) -> Result<LogEntry> {
        let timestamp = self.clock.now();
        let id = insert_row(&self.conn, timestamp, entry)?;
        tracing::info!(id, category = %entry.category, "inserted log entry");
        Ok(into_entry(id, timestamp, entry.clone()))
    }

    fn get(&self, id: i64) -> Result<Option<LogEntry>> {
        fetch_one(&self.conn, id)
    }

    fn update(&mut self, id: i64, changes: &LogUpdate) -> Result<Option<LogEntry>> {
        let now = self.clock.now();
        let preview_chars = self.preview_chars;
        let tx = self.conn.transaction()?;

        let Some(before) = fetch_one(&tx, id)? else {
            tracing::warn!(id, "update target not found");
            return Ok(None);
        };
        let after = changes.apply_to(&before);
        validation::validate_context(&after.context)?;

        tx.execute(
            "UPDATE logs SET category = ?1, content = ?2, tags = ?3, file_path = ?4, \
             line_start = ?5, line_end = ?6, git_branch = ?7, git_commit = ?8, project_path = ?9 \
             WHERE id = ?10",
            params![
                after.category,
                after.content,
                tags_to_column(&after.tags),
                after.context.file_path,
                after.context.line_start,
                after.context.line_end,
                after.context.git_branch,
                after.context.git_commit,
                after.context.project_path,
                id,
            ],
        )?;

        let audit = audit_trail::edit_record(&before, &after, preview_chars);
        let audit_id = insert_row(&tx, now, &audit)?;
        tx.commit()?;

        tracing::info!(id, audit_id, "updated log entry");
        Ok(Some(after))
    }

    fn delete(&mut self, id: i64) -> Result<Option<LogEntry>> {
        let now = self.clock.now();
        let preview_chars = self.preview_chars;
        let tx = self.conn.transaction()?;

        let Some(removed) = fetch_one(&tx, id)? else {
            tracing::warn!(id, "delete target not found");
            return Ok(None);
        };

        tx.execute("DELETE FROM logs WHERE id = ?1", params![id])?;
        let audit = audit_trail::delete_record(&removed, preview_chars);
        let audit_id = insert_row(&tx, now, &audit)?;
        tx.commit()?;

        tracing::info!(id, audit_id, "deleted log entry");
        Ok(Some(removed))
    }

    fn query(
        &self,
        filter: &SearchFilter,
        order: SortOrder,
        limit: Option<usize>,
    ) -> Result<Vec<LogEntry>> {
        let compiled = filter_compiler::compile(filter);
        let direction = match order {
            SortOrder::NewestFirst => "DESC",
            SortOrder::OldestFirst => "ASC",
        };

        let mut sql = format!(
            "SELECT {LOG_COLUMNS} FROM logs{} ORDER BY timestamp {direction}, id {direction}",
            compiled.where_sql()
        );
        let mut params = compiled.params.clone();
        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            params.push(rusqlite::types::Value::Integer(
                i64::try_from(limit).unwrap_or(i64::MAX),
            ));
        }

        tracing::debug!(
            conditions = compiled.condition_count(),
            ?order,
            ?limit,
            "querying log entries"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(RawRow::read(row)?.into_entry()?);
        }
        Ok(out)
    }

    fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    fn category_counts(&self) -> Result<Vec<CategoryCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, COUNT(*) FROM logs GROUP BY category ORDER BY COUNT(*) DESC, category ASC",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let count: i64 = row.get(1)?;
            out.push(CategoryCount {
                category: row.get(0)?,
                count: u64::try_from(count).unwrap_or(0),
            });
        }
        Ok(out)
    }
}

fn insert_row(conn: &Connection, timestamp: NaiveDateTime, entry: &NewLogEntry) -> Result<i64> {
    conn.execute(
        "INSERT INTO logs (timestamp, category, content, tags, file_path, line_start, line_end, \
         git_branch, git_commit, project_path) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            timestamp.format(TIMESTAMP_FORMAT).to_string(),
            entry.category,
            entry.content,
            tags_to_column(&entry.tags),
            entry.context.file_path,
            entry.context.line_start,
            entry.context.line_end,
            entry.context.git_branch,
            entry.context.git_commit,
            entry.context.project_path,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn fetch_one(conn: &Connection, id: i64) -> Result<Option<LogEntry>> {
    let raw = conn
        .query_row(
            &format!("SELECT {LOG_COLUMNS} FROM logs WHERE id = ?1"),
            params![id],
            RawRow::read,
        )
        .optional()?;
    raw.map(RawRow::into_entry).transpose()
}

fn into_entry(id: i64, timestamp: NaiveDateTime, entry: NewLogEntry) -> LogEntry {
    LogEntry {
        id,
        timestamp,
        category: entry.category,
        content: entry.content,
        tags: entry.tags,
        context: entry.context,
    }
}

/// Comma-joined tags; an empty list is stored as an empty string.
fn tags_to_column(tags: &[String]) -> String {
    tags.join(",")
}

fn tags_from_column(column: Option<&str>) -> Vec<String> {
    match column {
        Some(s) if !s.is_empty() => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// A `logs` row as stored, before timestamp parsing.
struct RawRow {
    id: i64,
    timestamp: String,
    category: String,
    content: String,
    tags: Option<String>,
    context: LogContext,
}

impl RawRow {
    fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            category: row.get(2)?,
            content: row.get(3)?,
            tags: row.get(4)?,
            context: LogContext {
                file_path: row.get(5)?,
                line_start: row.get(6)?,
                line_end: row.get(7)?,
                git_branch: row.get(8)?,
                git_commit: row.get(9)?,
                project_path: row.get(10)?,
            },
        })
    }

    fn into_entry(self) -> Result<LogEntry> {
        let timestamp = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| WorklogError::CorruptRow {
                id: self.id,
                detail: format!("bad timestamp '{}': {e}", self.timestamp),
            })?;

        Ok(LogEntry {
            id: self.id,
            timestamp,
            category: self.category,
            content: self.content,
            tags: tags_from_column(self.tags.as_deref()),
            context: self.context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::audit_trail::{AUTO_TAG, DELETE_TAG, EDIT_TAG, SYSTEM_CATEGORY};
    use crate::core::traits::clock::ManualClock;
    use tempfile::TempDir;

    fn store_at(timestamp: &str) -> (SqliteLogStore, ManualClock) {
        let clock = ManualClock::at(timestamp);
        let store = SqliteLogStore::open_in_memory()
            .unwrap()
            .with_clock(clock.clone());
        (store, clock)
    }

    fn audit_entries(store: &SqliteLogStore) -> Vec<LogEntry> {
        store
            .query(
                &SearchFilter::by_category(SYSTEM_CATEGORY),
                SortOrder::OldestFirst,
                None,
            )
            .unwrap()
    }

    fn full_context() -> LogContext {
        LogContext {
            file_path: Some("src/lib.rs".to_string()),
            line_start: Some(10),
            line_end: Some(20),
            git_branch: Some("feature/x".to_string()),
            git_commit: Some("abc123".to_string()),
            project_path: Some("/home/me/worklog".to_string()),
        }
    }

    #[test]
    fn insert_assigns_id_and_clock_time() {
        let (mut store, _clock) = store_at("2025-11-01T09:15:00");
        let entry = store.insert(&NewLogEntry::new("first")).unwrap();

        assert_eq!(entry.id, 1);
        assert_eq!(entry.timestamp_string(), "2025-11-01T09:15:00");
        assert_eq!(entry.category, "General");
        assert_eq!(store.get(1).unwrap(), Some(entry));
    }

    #[test]
    fn ids_strictly_increase_across_deletes() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        let a = store.insert(&NewLogEntry::new("a")).unwrap().id;
        let b = store.insert(&NewLogEntry::new("b")).unwrap().id;
        store.delete(b).unwrap();
        // b's deletion audit entry took the next id
        let c = store.insert(&NewLogEntry::new("c")).unwrap().id;

        assert!(a < b);
        assert!(b < c);
        assert_eq!(c, b + 2);
    }

    #[test]
    fn deleting_newest_row_never_frees_its_id() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        let first = store.insert(&NewLogEntry::new("a")).unwrap().id;
        store.delete(first).unwrap();
        let audit_id = audit_entries(&store)[0].id;
        store.conn.execute("DELETE FROM logs", []).unwrap();

        let next = store.insert(&NewLogEntry::new("b")).unwrap().id;
        assert!(next > audit_id);
    }

    #[test]
    fn tags_round_trip_in_order() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        let id = store
            .insert(&NewLogEntry::new("tagged").tags(["a", "b"]))
            .unwrap()
            .id;
        assert_eq!(store.get(id).unwrap().unwrap().tags, vec!["a", "b"]);
    }

    #[test]
    fn empty_tags_read_back_as_empty_list() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        let id = store.insert(&NewLogEntry::new("untagged")).unwrap().id;

        let stored: Option<String> = store
            .conn
            .query_row("SELECT tags FROM logs WHERE id = ?1", [id], |r| r.get(0))
            .unwrap();
        assert_eq!(stored.as_deref(), Some(""));
        assert!(store.get(id).unwrap().unwrap().tags.is_empty());
    }

    #[test]
    fn context_fields_persist_and_default_to_absent() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        let with = store
            .insert(&NewLogEntry::new("with").context(full_context()))
            .unwrap()
            .id;
        let without = store.insert(&NewLogEntry::new("without")).unwrap().id;

        assert_eq!(store.get(with).unwrap().unwrap().context, full_context());
        assert!(store.get(without).unwrap().unwrap().context.is_empty());
    }

    #[test]
    fn content_only_update_keeps_other_fields_and_writes_one_audit_entry() {
        let (mut store, clock) = store_at("2025-11-01T09:00:00");
        let original = store
            .insert(
                &NewLogEntry::new("old content")
                    .category("開発")
                    .tags(["rust", "db"])
                    .context(full_context()),
            )
            .unwrap();

        clock.set("2025-11-02T14:30:00");
        let updated = store
            .update(
                original.id,
                &LogUpdate {
                    content: Some("new content".to_string()),
                    ..LogUpdate::default()
                },
            )
            .unwrap()
            .unwrap();

        let stored = store.get(original.id).unwrap().unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.content, "new content");
        assert_eq!(stored.category, "開発");
        assert_eq!(stored.tags, vec!["rust", "db"]);
        assert_eq!(stored.context, full_context());
        assert_eq!(stored.timestamp_string(), "2025-11-01T09:00:00");

        let audits = audit_entries(&store);
        assert_eq!(audits.len(), 1);
        let audit = &audits[0];
        assert_eq!(audit.tags, vec![EDIT_TAG, AUTO_TAG]);
        assert_eq!(audit.timestamp_string(), "2025-11-02T14:30:00");
        assert!(audit.context.is_empty());
        assert!(audit.content.contains(&format!("#{}", original.id)));
        assert!(audit.content.contains("old content"));
        assert!(audit.content.contains("new content"));
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn update_missing_id_has_no_side_effects() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        store.insert(&NewLogEntry::new("only")).unwrap();

        let result = store
            .update(
                999_999,
                &LogUpdate {
                    content: Some("x".to_string()),
                    ..LogUpdate::default()
                },
            )
            .unwrap();
        assert!(result.is_none());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn update_rejects_line_range_broken_by_merge() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        let started = LogContext {
            file_path: Some("a.rs".to_string()),
            line_start: Some(20),
            ..LogContext::default()
        };
        let id = store
            .insert(&NewLogEntry::new("body").context(started.clone()))
            .unwrap()
            .id;

        let end_before_start = LogUpdate {
            context: LogContext {
                line_end: Some(10),
                ..LogContext::default()
            },
            ..LogUpdate::default()
        };
        assert!(matches!(
            store.update(id, &end_before_start),
            Err(WorklogError::InvalidLineRange { start: Some(20), end: 10 })
        ));
        assert_eq!(store.get(id).unwrap().unwrap().context, started);
        assert!(audit_entries(&store).is_empty());

        let unstarted = store.insert(&NewLogEntry::new("no lines")).unwrap().id;
        assert!(matches!(
            store.update(unstarted, &end_before_start),
            Err(WorklogError::InvalidLineRange { start: None, end: 10 })
        ));
        assert!(audit_entries(&store).is_empty());

        let end_after_start = LogUpdate {
            context: LogContext {
                line_end: Some(30),
                ..LogContext::default()
            },
            ..LogUpdate::default()
        };
        let updated = store.update(id, &end_after_start).unwrap().unwrap();
        assert_eq!(updated.context.location().as_deref(), Some("a.rs:20-30"));
    }

    #[test]
    fn delete_removes_row_and_records_deletion() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        let id = store
            .insert(&NewLogEntry::new("to be removed").category("調査"))
            .unwrap()
            .id;

        let removed = store.delete(id).unwrap().unwrap();
        assert_eq!(removed.content, "to be removed");
        assert!(store.get(id).unwrap().is_none());

        let audits = audit_entries(&store);
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].tags, vec![DELETE_TAG, AUTO_TAG]);
        assert!(audits[0].content.contains("調査"));
        assert!(audits[0].content.contains("to be removed"));
    }

    #[test]
    fn delete_missing_id_inserts_nothing() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        store.insert(&NewLogEntry::new("a")).unwrap();
        store.insert(&NewLogEntry::new("b")).unwrap();

        assert!(store.delete(999_999).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn failed_audit_insert_rolls_back_update() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        let id = store.insert(&NewLogEntry::new("original")).unwrap().id;
        store
            .conn
            .execute_batch(&format!(
                "CREATE TRIGGER block_audit BEFORE INSERT ON logs \
                 WHEN NEW.category = '{SYSTEM_CATEGORY}' \
                 BEGIN SELECT RAISE(ABORT, 'audit blocked'); END;"
            ))
            .unwrap();

        let result = store.update(
            id,
            &LogUpdate {
                content: Some("changed".to_string()),
                ..LogUpdate::default()
            },
        );
        assert!(matches!(result, Err(WorklogError::Storage(_))));
        assert_eq!(store.get(id).unwrap().unwrap().content, "original");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn failed_audit_insert_rolls_back_delete() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        let id = store.insert(&NewLogEntry::new("keep me")).unwrap().id;
        store
            .conn
            .execute_batch(&format!(
                "CREATE TRIGGER block_audit BEFORE INSERT ON logs \
                 WHEN NEW.category = '{SYSTEM_CATEGORY}' \
                 BEGIN SELECT RAISE(ABORT, 'audit blocked'); END;"
            ))
            .unwrap();

        assert!(store.delete(id).is_err());
        assert!(store.get(id).unwrap().is_some());
    }

    #[test]
    fn corrupt_timestamp_is_reported() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        let id = store.insert(&NewLogEntry::new("a")).unwrap().id;
        store
            .conn
            .execute("UPDATE logs SET timestamp = 'garbage' WHERE id = ?1", [id])
            .unwrap();

        assert!(matches!(
            store.get(id),
            Err(WorklogError::CorruptRow { id: bad, .. }) if bad == id
        ));
    }

    #[test]
    fn category_counts_group_and_sort() {
        let (mut store, _clock) = store_at("2025-11-01T09:00:00");
        store.insert(&NewLogEntry::new("a").category("開発")).unwrap();
        store.insert(&NewLogEntry::new("b").category("調査")).unwrap();
        store.insert(&NewLogEntry::new("c").category("開発")).unwrap();

        let counts = store.category_counts().unwrap();
        assert_eq!(counts[0].category, "開発");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].category, "調査");
        assert_eq!(counts[1].count, 1);
    }

    #[test]
    fn open_creates_parent_directories_and_persists() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/logs.db");

        {
            let mut store = SqliteLogStore::open(&path).unwrap();
            store.insert(&NewLogEntry::new("persisted")).unwrap();
        }

        let store = SqliteLogStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.get(1).unwrap().unwrap().content, "persisted");
    }

    #[test]
    fn tags_column_helpers() {
        assert_eq!(tags_to_column(&[]), "");
        assert_eq!(tags_to_column(&["a".to_string(), "b".to_string()]), "a,b");
        assert!(tags_from_column(None).is_empty());
        assert!(tags_from_column(Some("")).is_empty());
        assert_eq!(tags_from_column(Some("x,y")), vec!["x", "y"]);
    }
}
