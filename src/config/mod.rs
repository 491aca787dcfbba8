pub mod loader;
pub mod runner;
pub mod schema;

pub use loader::{load_from_path, load_from_str, ConfigError};
pub use runner::{format_path, run_queries, select, QueryError};
pub use schema::{Metadata, QueryConfig, QueryDefinition, ValidationError, ValidationIssue};
