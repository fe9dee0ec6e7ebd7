use crate::cli::{ContextArgs, output};
use crate::core::errors::Result;
use crate::core::models::log_entry::LogUpdate;
use crate::core::services::log_service::LogService;
use crate::core::services::validation;
use crate::core::traits::log_store::LogStore;

/// Execute the `worklog update` command.
///
/// Only the supplied options change; `--tags ""` clears the tag list.
pub fn execute_update<S: LogStore>(
    service: &mut LogService<S>,
    id: i64,
    content: Option<&str>,
    category: Option<&str>,
    tags: Option<&str>,
    context: &ContextArgs,
) -> Result<()> {
    let update = LogUpdate {
        content: content.map(str::to_string),
        category: category.map(str::to_string),
        tags: tags.map(validation::parse_tags),
        context: context.clone().into_context(),
    };
    output::json(&service.update_log(id, &update)?)
}

/// Execute the `worklog delete` command.
pub fn execute_delete<S: LogStore>(service: &mut LogService<S>, id: i64) -> Result<()> {
    output::json(&service.delete_log(id)?)
}
