use crate::cli::{ContextArgs, output};
use crate::core::errors::Result;
use crate::core::models::log_entry::NewLogEntry;
use crate::core::services::log_service::LogService;
use crate::core::services::validation;
use crate::core::traits::log_store::LogStore;

/// Execute the `worklog add` command.
pub fn execute<S: LogStore>(
    service: &mut LogService<S>,
    content: &str,
    category: &str,
    tags: Option<&str>,
    context: &ContextArgs,
) -> Result<()> {
    let entry = NewLogEntry::new(content)
        .category(category)
        .tags(tags.map(validation::parse_tags).unwrap_or_default())
        .context(context.clone().into_context());

    let result = service.add_log(entry)?;
    output::json(&result)
}
