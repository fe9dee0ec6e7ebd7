use chrono::NaiveDate;

use crate::core::errors::{Result, WorklogError};
use crate::core::models::log_entry::{LogContext, LogUpdate, NewLogEntry};

/// Calendar date form used by every interface.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    // chrono accepts unpadded fields; the interface form is strictly padded.
    if trimmed.len() != 10 {
        return Err(WorklogError::InvalidDate {
            value: value.to_string(),
        });
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| WorklogError::InvalidDate {
        value: value.to_string(),
    })
}

/// Parse an optional date argument.
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    value.map(parse_date).transpose()
}

/// Reject a range whose start lies after its end.
pub fn check_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        return Err(WorklogError::InvalidDateRange {
            start: start.format(DATE_FORMAT).to_string(),
            end: end.format(DATE_FORMAT).to_string(),
        });
    }
    Ok(())
}

/// Validate a caller-supplied result limit.
pub fn validate_limit(limit: i64) -> Result<usize> {
    if limit < 1 {
        return Err(WorklogError::InvalidLimit { value: limit });
    }
    usize::try_from(limit).map_err(|_| WorklogError::InvalidLimit { value: limit })
}

/// Split a comma-separated tag argument, trimming and dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate a new entry before it reaches storage.
pub fn validate_new_entry(entry: &NewLogEntry) -> Result<()> {
    if entry.content.trim().is_empty() {
        return Err(WorklogError::EmptyContent);
    }
    validate_tags(&entry.tags)?;
    validate_context(&entry.context)
}

/// Validate an update request before it reaches storage.
pub fn validate_update(id: i64, update: &LogUpdate) -> Result<()> {
    if update.is_empty() {
        return Err(WorklogError::EmptyUpdate { id });
    }
    if update
        .content
        .as_deref()
        .is_some_and(|c| c.trim().is_empty())
    {
        return Err(WorklogError::EmptyContent);
    }
    if let Some(tags) = &update.tags {
        validate_tags(tags)?;
    }
    // The stored entry may already carry a line start; the merged row is
    // checked again with `validate_context` by the store.
    match (update.context.line_start, update.context.line_end) {
        (Some(start), Some(end)) if end < start => Err(WorklogError::InvalidLineRange {
            start: Some(start),
            end,
        }),
        _ => Ok(()),
    }
}

/// Reject a line end without a start, or one before its start.
pub fn validate_context(context: &LogContext) -> Result<()> {
    match (context.line_start, context.line_end) {
        (Some(start), Some(end)) if end < start => Err(WorklogError::InvalidLineRange {
            start: Some(start),
            end,
        }),
        (None, Some(end)) => Err(WorklogError::InvalidLineRange { start: None, end }),
        _ => Ok(()),
    }
}

/// Tags are stored comma-joined, so each must be non-blank and comma-free.
fn validate_tags(tags: &[String]) -> Result<()> {
    match tags
        .iter()
        .find(|t| t.trim().is_empty() || t.contains(','))
    {
        Some(tag) => Err(WorklogError::InvalidTag { tag: tag.clone() }),
        None => Ok(()),
    }
}
