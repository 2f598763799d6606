//! Doppler CLI: list, create, rename, delete and audit the configs of a project.
//!
//! Layers, innermost first: [`domain`] (records, input resolution),
//! [`application`] (services), [`infrastructure`] (HTTP client, prompt, wiring),
//! [`cli`] (arguments, dispatch, rendering). [`config`] resolves settings.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
