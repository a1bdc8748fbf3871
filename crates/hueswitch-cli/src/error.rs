// CLI error types

use hueswitch_storage::StorageError;
use hueswitch_themes::ThemeError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Unknown theme: {id}")]
    UnknownTheme { id: String },

    #[error("No themes available")]
    NoThemes,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'hue --help' for usage information.", message)
            }
            CliError::UnknownTheme { id } => {
                format!("Theme '{}' does not exist.\n\nRun 'hue list' to see the available themes.", id)
            }
            CliError::NoThemes => {
                "No themes are available.\n\nCheck the themes directory or remove --themes-dir to use the built-in themes.".to_string()
            }
            CliError::Io(e) => format!("File operation failed: {}", e),
            CliError::Config(msg) => {
                format!("Configuration error: {}\n\nCheck the file passed with --config.", msg)
            }
            CliError::Theme(e) => format!("Theme error: {}", e),
            CliError::Storage(e) => {
                format!("Storage error: {}\n\nCheck the path passed with --store.", e)
            }
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

pub type CliResult<T> = Result<T, CliError>;
