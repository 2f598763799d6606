//! Domain layer: records and input resolution
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod resolve;

pub use entities::*;
pub use error::DomainError;
pub use resolve::{derive_environment, prefer_positional, require_project};
