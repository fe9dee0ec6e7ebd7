pub mod filter_compiler;
pub mod schema;
pub mod sqlite_store;
