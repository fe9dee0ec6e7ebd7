use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::log_service::LogService;
use crate::core::traits::log_store::LogStore;

/// Execute the `worklog stats` command.
pub fn execute<S: LogStore>(service: &LogService<S>) -> Result<()> {
    output::json(&service.stats()?)
}
