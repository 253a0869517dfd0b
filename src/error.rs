//! Error types for postpage

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for postpage
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Unterminated reference: '{{{{' at byte {offset} has no closing '}}}}'")]
    UnterminatedReference { offset: usize },

    #[error("Missing variable: {0}")]
    MissingVariable(String),

    #[error("Missing filter: {0}")]
    MissingFilter(String),

    #[error("Malformed timestamp: '{0}' (expected YYYY-MM-DD HH:MM:SS)")]
    MalformedTimestamp(String),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Posts directory not found: {0}")]
    PostsDirectoryNotFound(PathBuf),

    #[error("Invalid variable: {0}")]
    InvalidVariable(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiteError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SiteError::UnterminatedReference { .. } => 2,
            SiteError::MissingVariable(_)
            | SiteError::MissingFilter(_)
            | SiteError::UnknownFilter(_)
            | SiteError::TypeMismatch { .. } => 3,
            SiteError::MalformedTimestamp(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            SiteError::UnterminatedReference { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Close every reference with '}}}}', e.g. {{{{ text }}}}\n\
                    • Braces cannot be escaped or nested",
                    self
                )
            }
            SiteError::MissingVariable(key) => {
                format!(
                    "Missing variable: '{}'\n\n\
                    Suggestions:\n\
                    • Page templates can use: posts\n\
                    • Post templates can use: datetime, text\n\
                    • Variable names are case-sensitive",
                    key
                )
            }
            SiteError::MissingFilter(name) | SiteError::UnknownFilter(name) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Run 'postpage filters' to see available filters\n\
                    • Filters are applied left to right: {{{{ posts | postify-each | join-lines }}}}\n\
                    • '{}' must be spelled exactly as registered",
                    self, name
                )
            }
            SiteError::MalformedTimestamp(_) => {
                format!(
                    "{}\n\n\
                    Post files are named after their timestamp:\n\
                    • YYYY-MM-DD_HH.MM.SS.txt (e.g., 2021-03-05_09.07.00.txt)",
                    self
                )
            }
            SiteError::PostsDirectoryNotFound(path) => {
                format!(
                    "Posts directory not found: {}\n\n\
                    Suggestions:\n\
                    • Create a 'posts' directory with .txt files\n\
                    • Point to another directory: postpage build --posts <DIR>\n\
                    • Set POSTPAGE_POSTS environment variable",
                    path.display()
                )
            }
            SiteError::InvalidVariable(_) => {
                format!(
                    "{}\n\n\
                    Expected format: KEY=VALUE\n\
                    Example: postpage render page.html --var title=Hello",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using SiteError
pub type Result<T> = std::result::Result<T, SiteError>;
