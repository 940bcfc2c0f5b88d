// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{CliOverrides, RunOutcome, expand_path, load_run_config, run_inventory};
