pub mod check;
pub mod dump;
pub mod run_common;
pub mod schema_loader;
