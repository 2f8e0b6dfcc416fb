//! CLI-specific error formatting and exit codes.

use genai_prompt::{Error, ErrorKind};

/// Map an [`Error`] to a user-facing message with actionable guidance.
pub fn format_error_help(err: &Error) -> String {
    match err.kind() {
        ErrorKind::Credential => {
            format!("{err}. Set GEMINI_API_KEY (or GOOGLE_API_KEY) to a Gemini API key")
        }
        ErrorKind::Authentication => {
            format!("Authentication failed: {err}. Check the value of GEMINI_API_KEY")
        }
        ErrorKind::Network => format!("Could not reach the Gemini API: {err}"),
        ErrorKind::Service => format!("Gemini API rejected the request: {err}"),
        ErrorKind::Config | ErrorKind::Internal => format!("{err}"),
    }
}

/// Process exit status for a failed run. Clap itself exits with 2 on usage errors.
pub fn exit_code(err: &Error) -> u8 {
    match err.kind() {
        ErrorKind::Credential => 3,
        ErrorKind::Authentication => 4,
        ErrorKind::Network => 5,
        ErrorKind::Service => 6,
        ErrorKind::Config => 2,
        ErrorKind::Internal => 1,
    }
}
