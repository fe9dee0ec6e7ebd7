use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::search_filter::SearchFilter;
use crate::core::services::log_service::LogService;
use crate::core::services::validation;
use crate::core::traits::log_store::LogStore;

/// Raw `worklog search` arguments, before date validation.
#[derive(Debug, Default)]
pub struct SearchArgs<'a> {
    pub keyword: Option<&'a str>,
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
    pub file: Option<&'a str>,
    pub project: Option<&'a str>,
    pub branch: Option<&'a str>,
    pub category: Option<&'a str>,
}

/// Execute the `worklog search` command.
pub fn execute<S: LogStore>(service: &LogService<S>, args: &SearchArgs<'_>, limit: i64) -> Result<()> {
    let filter = SearchFilter {
        keyword: args.keyword.map(str::to_string),
        start_date: validation::parse_optional_date(args.start)?,
        end_date: validation::parse_optional_date(args.end)?,
        file_path: args.file.map(str::to_string),
        project_path: args.project.map(str::to_string),
        git_branch: args.branch.map(str::to_string),
        category: args.category.map(str::to_string),
    };
    output::json(&service.search_logs(&filter, limit)?)
}

/// Execute the `worklog recent` command.
pub fn execute_recent<S: LogStore>(service: &LogService<S>, limit: i64) -> Result<()> {
    output::json(&service.get_recent_logs(limit)?)
}

/// Execute the `worklog category` command.
pub fn execute_category<S: LogStore>(
    service: &LogService<S>,
    category: &str,
    limit: i64,
) -> Result<()> {
    output::json(&service.get_logs_by_category(category, limit)?)
}

/// Execute the `worklog get` command.
///
/// A missing id is reported in the JSON body, like update and delete.
pub fn execute_get<S: LogStore>(service: &LogService<S>, id: i64) -> Result<()> {
    match service.get_log(id)? {
        Some(entry) => output::json(&entry),
        None => output::json(&serde_json::json!({
            "message": format!("ログ #{id} が見つかりませんでした。"),
            "success": false,
        })),
    }
}
