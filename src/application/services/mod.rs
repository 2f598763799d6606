//! Application services
//!
//! Concrete service implementations that orchestrate API calls.
//! Services depend on I/O boundary traits (ApiClient, Prompter)
//! but are themselves concrete structs, not traits.

mod configs;
mod logs;

pub use configs::{ConfigService, DeleteOutcome};
pub use logs::{ConfigLogService, DEFAULT_LOG_COUNT};
