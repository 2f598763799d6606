//! CLI-level errors (wraps application and infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::{ApiError, InfraError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error("cannot render output: {context}")]
    Render {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write output")]
    Output(#[from] std::io::Error),
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(e.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

fn application_exit_code(e: &ApplicationError) -> i32 {
    match e {
        ApplicationError::Domain(_) => crate::exitcode::USAGE,
        ApplicationError::Api(api) => match api {
            ApiError::Decode { .. } => crate::exitcode::DATAERR,
            _ if matches!(api.status(), Some(401 | 403)) => crate::exitcode::NOPERM,
            _ => crate::exitcode::UNAVAILABLE,
        },
        ApplicationError::Config { .. } => crate::exitcode::CONFIG,
        ApplicationError::Prompt { .. } => crate::exitcode::SOFTWARE,
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render { .. } | CliError::Output(_) => crate::exitcode::SOFTWARE,
            CliError::Application(e) => application_exit_code(e),
            CliError::Infra(e) => match e {
                InfraError::MissingToken => crate::exitcode::CONFIG,
                InfraError::Http { .. } => crate::exitcode::SOFTWARE,
            },
        }
    }
}
