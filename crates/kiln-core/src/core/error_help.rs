//! Attach remediation hints to errors shown on the command line

use crate::core::error::KilnError;

/// A hint printed under an error message
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for KilnError {
    fn help(&self) -> Option<String> {
        match self {
            KilnError::Server { .. } => Some(
                "The release host is having trouble. Try again later, or build locally with `kiln install`."
                    .to_string(),
            ),
            KilnError::Http(_) => {
                Some("Check your network connection and proxy settings.".to_string())
            }
            KilnError::Config(_) => Some(
                "Check the [package.metadata.kiln] table in Cargo.toml and your kiln config.yaml."
                    .to_string(),
            ),
            KilnError::Manifest(_) | KilnError::Toml(_) => Some(
                "Run kiln from a package directory or pass --manifest-path.".to_string(),
            ),
            KilnError::Build(_) => Some(
                "Make sure a Rust toolchain is installed: https://rustup.rs".to_string(),
            ),
            KilnError::Unpack(_) => Some(
                "The downloaded tarball looks corrupt. Re-upload the release asset.".to_string(),
            ),
            _ => None,
        }
    }
}

/// Format an error followed by its hint, if any
pub fn format_error_with_help(error: &KilnError) -> String {
    match error.help() {
        Some(help) => format!("error: {}\n\nhelp: {}", error, help),
        None => format!("error: {}", error),
    }
}
