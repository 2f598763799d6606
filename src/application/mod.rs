//! Application layer: services and use cases
//!
//! This layer orchestrates API calls and depends on I/O boundary traits.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
