use chrono::NaiveDate;

use crate::core::errors::{Result, WorklogError};
use crate::core::models::log_entry::LogEntry;
use crate::core::models::search_filter::{SearchFilter, SortOrder};
use crate::core::services::validation;
use crate::core::traits::log_store::LogStore;

/// Default number of entries returned by `search` and `list_by_category`.
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// Default number of entries returned by `recent`.
pub const DEFAULT_RECENT_LIMIT: i64 = 5;

/// Filtered, newest-first reads over a `LogStore`.
pub struct QueryEngine<'a, S: LogStore + ?Sized> {
    pub store: &'a S,
}

impl<'a, S: LogStore + ?Sized> QueryEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Entries matching `filter`, newest first, at most `limit` of them.
    ///
    /// Ties on the timestamp fall back to id, newest first. Truncation
    /// happens only after filtering and ordering.
    pub fn search(&self, filter: &SearchFilter, limit: i64) -> Result<Vec<LogEntry>> {
        let limit = validation::validate_limit(limit)?;
        let filter = filter.clone().normalized();
        validation::check_range(filter.start_date, filter.end_date)?;
        self.store
            .query(&filter, SortOrder::NewestFirst, Some(limit))
    }

    /// Entries in exactly `category`. A blank category is rejected rather
    /// than read as "no filter".
    pub fn list_by_category(&self, category: &str, limit: i64) -> Result<Vec<LogEntry>> {
        if category.trim().is_empty() {
            return Err(WorklogError::EmptyCategory);
        }
        self.search(&SearchFilter::by_category(category), limit)
    }

    /// Every entry dated within `[start, end]`, oldest first and untruncated.
    pub fn timeline(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<LogEntry>> {
        validation::check_range(Some(start), Some(end))?;
        self.store
            .query(&SearchFilter::between(start, end), SortOrder::OldestFirst, None)
    }

    /// The newest entries, unfiltered.
    pub fn recent(&self, limit: i64) -> Result<Vec<LogEntry>> {
        self.search(&SearchFilter::default(), limit)
    }
}
