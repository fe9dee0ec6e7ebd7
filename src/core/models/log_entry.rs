use chrono::NaiveDateTime;
use serde::Serialize;

/// Category used when the caller does not supply one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Wire and storage format of entry timestamps (local time, seconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Optional location metadata attached to an entry.
///
/// Every field is independently absent or present. Absent fields are
/// omitted from serialized output instead of being emitted as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
}

impl LogContext {
    /// Returns true when no contextual field is set.
    pub fn is_empty(&self) -> bool {
        self.file_path.is_none()
            && self.line_start.is_none()
            && self.line_end.is_none()
            && self.git_branch.is_none()
            && self.git_commit.is_none()
            && self.project_path.is_none()
    }

    /// File location as `path`, `path:start` or `path:start-end`.
    ///
    /// Returns `None` when there is no file path.
    pub fn location(&self) -> Option<String> {
        let path = self.file_path.as_deref()?;
        Some(match (self.line_start, self.line_end) {
            (Some(start), Some(end)) => format!("{path}:{start}-{end}"),
            (Some(start), None) => format!("{path}:{start}"),
            _ => path.to_string(),
        })
    }

    /// Overlay every field set in `other` on top of `self`.
    pub fn merged_with(&self, other: &LogContext) -> LogContext {
        LogContext {
            file_path: other.file_path.clone().or_else(|| self.file_path.clone()),
            line_start: other.line_start.or(self.line_start),
            line_end: other.line_end.or(self.line_end),
            git_branch: other.git_branch.clone().or_else(|| self.git_branch.clone()),
            git_commit: other.git_commit.clone().or_else(|| self.git_commit.clone()),
            project_path: other
                .project_path
                .clone()
                .or_else(|| self.project_path.clone()),
        }
    }
}

/// A persisted work log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: i64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub category: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub context: LogContext,
}

impl LogEntry {
    /// Timestamp rendered as `YYYY-MM-DDTHH:MM:SS`.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

fn serialize_timestamp<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

/// Fields supplied by the caller when creating an entry.
///
/// The id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub category: String,
    pub content: String,
    pub tags: Vec<String>,
    pub context: LogContext,
}

impl NewLogEntry {
    /// An entry in the default category with no tags and no context.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            content: content.into(),
            tags: Vec::new(),
            context: LogContext::default(),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }
}

/// A partial update. `None` means "keep the current value".
///
/// Supplying `tags` replaces the whole tag list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogUpdate {
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub context: LogContext,
}

impl LogUpdate {
    /// Returns true if the update would not change any field.
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.context.is_empty()
    }

    /// Produce the entry that results from applying this update to `current`.
    ///
    /// `id` and `timestamp` are carried over untouched.
    pub fn apply_to(&self, current: &LogEntry) -> LogEntry {
        LogEntry {
            id: current.id,
            timestamp: current.timestamp,
            category: self
                .category
                .clone()
                .unwrap_or_else(|| current.category.clone()),
            content: self
                .content
                .clone()
                .unwrap_or_else(|| current.content.clone()),
            tags: self.tags.clone().unwrap_or_else(|| current.tags.clone()),
            context: current.context.merged_with(&self.context),
        }
    }
}
