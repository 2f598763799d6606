//! Standard exit codes (BSD sysexits.h compatible)

/// Command line usage or input validation error
pub const USAGE: i32 = 64;

/// API response did not match the expected schema
pub const DATAERR: i32 = 65;

/// API unreachable or returned an error status
pub const UNAVAILABLE: i32 = 69;

/// Internal software error (rendering, prompt)
pub const SOFTWARE: i32 = 70;

/// Permission denied (HTTP 401/403)
pub const NOPERM: i32 = 77;

/// Configuration error (settings file, missing token)
pub const CONFIG: i32 = 78;
