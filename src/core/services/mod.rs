pub mod audit_trail;
pub mod log_service;
pub mod period;
pub mod query_engine;
pub mod report_service;
pub mod validation;
