//! Terminal status output with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print the source chain of an error, one indented line per cause, to stderr
pub fn causes(err: &(dyn std::error::Error + 'static)) {
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  {}: {}", "caused by".dimmed(), cause);
        source = cause.source();
    }
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}
