//! Error handling for the WireGuard endpoint pinger

use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for the endpoint pinger
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad or missing command-line input
    #[error("Usage error: {0}")]
    Usage(String),

    /// Configuration-related errors (.env, environment variables)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Parsing errors (numbers, booleans, JSON)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Input directory does not exist or is not a directory
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Input directory contains no `.conf` files
    #[error("No .conf files found in {}", .0.display())]
    NoConfigFiles(PathBuf),

    /// Config files were found but none declared a peer endpoint
    #[error("No endpoints found in {files} configuration file(s)")]
    NoEndpoints { files: usize },

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new usage error
    pub fn usage<S: Into<String>>(message: S) -> Self {
        Self::Usage(message.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new directory-not-found error
    pub fn directory_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::DirectoryNotFound(path.into())
    }

    /// Create a new no-config-files error
    pub fn no_config_files<P: Into<PathBuf>>(path: P) -> Self {
        Self::NoConfigFiles(path.into())
    }

    /// Create a new no-endpoints error
    pub fn no_endpoints(files: usize) -> Self {
        Self::NoEndpoints { files }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Usage(_) => "USAGE",
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Parse(_) => "PARSE",
            Self::DirectoryNotFound(_) | Self::NoConfigFiles(_) => "INPUT",
            Self::NoEndpoints { .. } => "EXTRACT",
            Self::Io(_) => "IO",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Usage(msg) => {
                format!("Invalid command line: {}\n\nSuggestion: Run with --help to see the accepted arguments.", msg)
            }
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file and WGPING_* environment variables.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Check the ranges of --count, --concurrency and --timeout.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse data: {}\n\nSuggestion: Check the format of the value you supplied.", msg)
            }
            Self::DirectoryNotFound(path) => {
                format!("Directory '{}' does not exist.\n\nSuggestion: Point the tool at the directory holding your WireGuard .conf files.", path.display())
            }
            Self::NoConfigFiles(path) => {
                format!("Directory '{}' holds no .conf files.\n\nSuggestion: Use --recursive if the configs live in subdirectories.", path.display())
            }
            Self::NoEndpoints { files } => {
                format!("None of the {} configuration file(s) contain an Endpoint line inside a [Peer] section.\n\nSuggestion: Only [Peer] endpoints are probed; check that your configs define peers.", files)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check file permissions.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Config(_) | Self::Validation(_) | Self::Parse(_) | Self::Io(_) => 1,
            Self::DirectoryNotFound(_) | Self::NoConfigFiles(_) => 2,
            Self::NoEndpoints { .. } => 3,
            Self::Internal(_) => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Usage(_) | Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::DirectoryNotFound(_) | Self::NoConfigFiles(_) | Self::NoEndpoints { .. } => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", error))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::internal(format!("Task failed: {}", error))
    }
}

// Anyhow integration
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error reporter for structured error output and user feedback
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Render an error with its category tag and, when verbose, a suggestion
    pub fn render(&self, error: &AppError) -> String {
        let mut out = error.format_for_console(self.use_color);
        if self.verbose {
            out.push_str("\n\n");
            out.push_str(&error.user_friendly_message());
        }
        out
    }
}
