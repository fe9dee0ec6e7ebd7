pub mod clock;
pub mod log_store;
