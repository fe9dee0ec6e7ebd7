pub mod add;
pub mod config;
pub mod edit;
pub mod prompt;
pub mod search;
pub mod show;
pub mod stats;
