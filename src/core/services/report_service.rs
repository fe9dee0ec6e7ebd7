use chrono::NaiveDate;

use crate::core::errors::Result;
use crate::core::models::log_entry::LogEntry;
use crate::core::services::query_engine::QueryEngine;
use crate::core::services::validation::DATE_FORMAT;
use crate::core::traits::log_store::LogStore;

/// Rendered in place of a report when the date or range has no entries.
pub const NO_ENTRIES_MESSAGE: &str = "該当する作業ログはありません。";

/// Renders chronological, human-readable reports of stored entries.
///
/// Reports read top to bottom as a timeline, oldest entry first.
pub struct ReportAggregator<'a, S: LogStore + ?Sized> {
    pub store: &'a S,
}

impl<'a, S: LogStore + ?Sized> ReportAggregator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Report of every entry on `date`.
    pub fn render_for_date(&self, date: NaiveDate) -> Result<String> {
        let entries = self.load(date, date)?;
        if entries.is_empty() {
            return Ok(NO_ENTRIES_MESSAGE.to_string());
        }

        let mut out = format!("# {} の作業ログ\n", date.format(DATE_FORMAT));
        for entry in &entries {
            out.push('\n');
            render_entry(&mut out, entry, "##");
        }
        Ok(out)
    }

    /// Report of every entry in `[start, end]`, with a sub-header each
    /// time the day changes. Days without entries get no section.
    pub fn render_for_period(&self, start: NaiveDate, end: NaiveDate) -> Result<String> {
        let entries = self.load(start, end)?;
        if entries.is_empty() {
            return Ok(NO_ENTRIES_MESSAGE.to_string());
        }

        let mut out = format!(
            "# {} 〜 {} の作業ログ\n",
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT)
        );
        let mut current_day: Option<NaiveDate> = None;
        for entry in &entries {
            let day = entry.timestamp.date();
            if current_day != Some(day) {
                out.push_str(&format!("\n## {}\n", day.format(DATE_FORMAT)));
                current_day = Some(day);
            }
            out.push('\n');
            render_entry(&mut out, entry, "###");
        }
        Ok(out)
    }

    fn load(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<LogEntry>> {
        QueryEngine::new(self.store).timeline(start, end)
    }
}

/// Append one entry section: header, optional context line, then body.
fn render_entry(out: &mut String, entry: &LogEntry, heading: &str) {
    out.push_str(&format!(
        "{heading} [{}] {}",
        entry.category,
        entry.timestamp.format("%H:%M:%S")
    ));
    if !entry.tags.is_empty() {
        out.push_str(&format!(" (タグ: {})", entry.tags.join(", ")));
    }
    out.push('\n');

    if let Some(context) = context_line(entry) {
        out.push_str(&context);
        out.push('\n');
    }

    out.push_str(&entry.content);
    if !entry.content.ends_with('\n') {
        out.push('\n');
    }
}

fn context_line(entry: &LogEntry) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(location) = entry.context.location() {
        parts.push(format!("ファイル: {location}"));
    }
    if let Some(branch) = &entry.context.git_branch {
        parts.push(format!("ブランチ: {branch}"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}
