use crate::core::errors::Result;
use crate::core::models::log_entry::{LogEntry, LogUpdate, NewLogEntry};
use crate::core::models::results::{AddLogResult, MutationResult, SearchLogsResult, StatsResult};
use crate::core::models::search_filter::SearchFilter;
use crate::core::services::query_engine::QueryEngine;
use crate::core::services::report_service::ReportAggregator;
use crate::core::services::validation;
use crate::core::traits::log_store::LogStore;

/// The operations exposed to callers, on top of a `LogStore`.
///
/// A missing update/delete target becomes `success: false`; storage
/// failures propagate as errors.
pub struct LogService<S: LogStore> {
    pub store: S,
}

impl<S: LogStore> LogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a new entry.
    pub fn add_log(&mut self, entry: NewLogEntry) -> Result<AddLogResult> {
        validation::validate_new_entry(&entry)?;
        let stored = self.store.insert(&entry)?;
        Ok(AddLogResult {
            message: "作業記録を正常に追加しました。".to_string(),
            log_id: stored.id,
            timestamp: stored.timestamp_string(),
        })
    }

    pub fn search_logs(&self, filter: &SearchFilter, limit: i64) -> Result<SearchLogsResult> {
        let logs = self.queries().search(filter, limit)?;
        Ok(found(logs))
    }

    pub fn get_recent_logs(&self, limit: i64) -> Result<SearchLogsResult> {
        let logs = self.queries().recent(limit)?;
        Ok(found(logs))
    }

    pub fn get_logs_by_category(&self, category: &str, limit: i64) -> Result<SearchLogsResult> {
        let logs = self.queries().list_by_category(category, limit)?;
        Ok(found(logs))
    }

    /// Point lookup; `None` when the id does not exist.
    pub fn get_log(&self, id: i64) -> Result<Option<LogEntry>> {
        self.store.get(id)
    }

    pub fn update_log(&mut self, id: i64, update: &LogUpdate) -> Result<MutationResult> {
        validation::validate_update(id, update)?;
        Ok(match self.store.update(id, update)? {
            Some(_) => MutationResult {
                message: format!("ログ #{id} を更新しました。"),
                success: true,
                log_id: Some(id),
            },
            None => not_found(id),
        })
    }

    pub fn delete_log(&mut self, id: i64) -> Result<MutationResult> {
        Ok(match self.store.delete(id)? {
            Some(_) => MutationResult {
                message: format!("ログ #{id} を削除しました。"),
                success: true,
                log_id: Some(id),
            },
            None => not_found(id),
        })
    }

    pub fn stats(&self) -> Result<StatsResult> {
        let total = self.store.count()?;
        let categories = self.store.category_counts()?;
        Ok(StatsResult {
            message: format!(
                "{total}件のログが{}個のカテゴリに記録されています。",
                categories.len()
            ),
            total,
            categories,
        })
    }

    pub fn queries(&self) -> QueryEngine<'_, S> {
        QueryEngine::new(&self.store)
    }

    pub fn reports(&self) -> ReportAggregator<'_, S> {
        ReportAggregator::new(&self.store)
    }
}

fn found(logs: Vec<LogEntry>) -> SearchLogsResult {
    SearchLogsResult {
        message: format!("検索条件に一致する{}件のログが見つかりました。", logs.len()),
        logs,
    }
}

fn not_found(id: i64) -> MutationResult {
    MutationResult {
        message: format!("ログ #{id} が見つかりませんでした。"),
        success: false,
        log_id: None,
    }
}
