use crate::core::errors::Result;
use crate::core::models::log_entry::{LogEntry, LogUpdate, NewLogEntry};
use crate::core::models::results::CategoryCount;
use crate::core::models::search_filter::{SearchFilter, SortOrder};

/// Port for durable storage of log entries.
///
/// Implementations own id and timestamp assignment, and must pair every
/// successful update or delete with a system-authored audit entry in the
/// same transaction.
pub trait LogStore {
    /// Persist a new entry, assigning a fresh id and the current time.
    fn insert(&mut self, entry: &NewLogEntry) -> Result<LogEntry>;

    /// Look up a single entry.
    fn get(&self, id: i64) -> Result<Option<LogEntry>>;

    /// Apply `changes` to entry `id` and record an edit audit entry.
    ///
    /// Returns the updated entry, or `None` (with no side effects) if
    /// the id does not exist.
    fn update(&mut self, id: i64, changes: &LogUpdate) -> Result<Option<LogEntry>>;

    /// Remove entry `id` and record a deletion audit entry.
    ///
    /// Returns the removed entry, or `None` (with no side effects) if
    /// the id does not exist.
    fn delete(&mut self, id: i64) -> Result<Option<LogEntry>>;

    /// Entries matching `filter`, ordered, then truncated to `limit`.
    fn query(
        &self,
        filter: &SearchFilter,
        order: SortOrder,
        limit: Option<usize>,
    ) -> Result<Vec<LogEntry>>;

    /// Total number of stored entries.
    fn count(&self) -> Result<u64>;

    /// Entry counts per category, largest first.
    fn category_counts(&self) -> Result<Vec<CategoryCount>>;
}
