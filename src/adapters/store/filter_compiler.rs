use rusqlite::types::Value;

use crate::core::models::search_filter::SearchFilter;

/// A `WHERE` predicate with its positional parameters.
///
/// User-supplied text only ever travels in `params`; `clause` is built
/// from fixed fragments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    pub clause: String,
    pub params: Vec<Value>,
}

impl CompiledFilter {
    /// The clause prefixed with ` WHERE `, or empty when unfiltered.
    pub fn where_sql(&self) -> String {
        if self.clause.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clause)
        }
    }

    /// Number of AND-ed conditions.
    pub fn condition_count(&self) -> usize {
        if self.clause.is_empty() {
            0
        } else {
            self.clause.matches(" AND ").count() + 1
        }
    }
}

/// Compile search criteria into one AND-ed predicate over `logs`.
///
/// Keyword, file path and project path are unanchored substring matches
/// (`LIKE` with wildcards escaped); branch and category match exactly.
/// Date bounds are inclusive: the start day from 00:00:00, the end day
/// until 23:59:59.
pub fn compile(filter: &SearchFilter) -> CompiledFilter {
    let mut conditions: Vec<&'static str> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(keyword) = &filter.keyword {
        conditions.push(
            "(content LIKE ? ESCAPE '\\' OR category LIKE ? ESCAPE '\\' OR tags LIKE ? ESCAPE '\\')",
        );
        let pattern = like_pattern(keyword);
        params.extend(std::iter::repeat_n(Value::Text(pattern), 3));
    }

    if let Some(start) = filter.start_date {
        conditions.push("timestamp >= ?");
        params.push(Value::Text(format!("{}T00:00:00", start.format("%Y-%m-%d"))));
    }

    if let Some(end) = filter.end_date {
        conditions.push("timestamp <= ?");
        params.push(Value::Text(format!("{}T23:59:59", end.format("%Y-%m-%d"))));
    }

    if let Some(file_path) = &filter.file_path {
        conditions.push("file_path LIKE ? ESCAPE '\\'");
        params.push(Value::Text(like_pattern(file_path)));
    }

    if let Some(project_path) = &filter.project_path {
        conditions.push("project_path LIKE ? ESCAPE '\\'");
        params.push(Value::Text(like_pattern(project_path)));
    }

    if let Some(branch) = &filter.git_branch {
        conditions.push("git_branch = ?");
        params.push(Value::Text(branch.clone()));
    }

    if let Some(category) = &filter.category {
        conditions.push("category = ?");
        params.push(Value::Text(category.clone()));
    }

    CompiledFilter {
        clause: conditions.join(" AND "),
        params,
    }
}

/// `%needle%` with LIKE metacharacters in `needle` escaped by `\`.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
