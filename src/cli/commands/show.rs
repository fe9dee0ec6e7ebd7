use chrono::NaiveDate;

use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::log_service::LogService;
use crate::core::services::validation;
use crate::core::traits::clock::{Clock, SystemClock};
use crate::core::traits::log_store::LogStore;

/// Execute the `worklog show` command: the report for one day.
pub fn execute<S: LogStore>(service: &LogService<S>, date: Option<&str>) -> Result<()> {
    let date = date_or_today(date)?;
    let report = service.reports().render_for_date(date)?;
    output::report(&report);
    Ok(())
}

/// Parse `date`, defaulting to today in local time.
pub fn date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(raw) => validation::parse_date(raw),
        None => Ok(SystemClock.now().date()),
    }
}
