pub mod log_entry;
pub mod results;
pub mod search_filter;
