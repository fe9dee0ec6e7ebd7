use chrono::NaiveDate;

/// Optional search criteria. Every supplied criterion is AND-ed; omitted
/// ones impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Unanchored substring of content, category or tags.
    pub keyword: Option<String>,
    /// Inclusive lower bound, from 00:00:00 of that day.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound, until 23:59:59 of that day.
    pub end_date: Option<NaiveDate>,
    /// Substring of the file path.
    pub file_path: Option<String>,
    /// Substring of the project path.
    pub project_path: Option<String>,
    /// Exact branch name.
    pub git_branch: Option<String>,
    /// Exact category.
    pub category: Option<String>,
}

impl SearchFilter {
    /// Entries in exactly this category.
    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Entries dated within `[start, end]`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Self::default()
        }
    }

    /// Treat blank text criteria as absent.
    pub fn normalized(self) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            keyword: non_blank(self.keyword),
            file_path: non_blank(self.file_path),
            project_path: non_blank(self.project_path),
            git_branch: non_blank(self.git_branch),
            category: non_blank(self.category),
            ..self
        }
    }
}

/// Result ordering by timestamp, ties broken by id in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    NewestFirst,
    OldestFirst,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_drops_blank_criteria() {
        let filter = SearchFilter {
            keyword: Some("  ".to_string()),
            category: Some(String::new()),
            git_branch: Some("main".to_string()),
            ..SearchFilter::default()
        }
        .normalized();

        assert!(filter.keyword.is_none());
        assert!(filter.category.is_none());
        assert_eq!(filter.git_branch.as_deref(), Some("main"));
    }
}
