use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the report was produced (individual cookbooks may still carry errors)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (catalog listing failed, bad credentials, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Run-level errors for report generation.
///
/// Only these abort a report. Failures that concern a single cookbook version
/// are captured on its record as a `StageError` instead.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to list cookbooks from the Chef Infra Server\nDetails: {details}\n\n💡 Hint: Verify the server URL and that the client has read access to cookbooks")]
    CatalogUnavailable { details: String },

    #[error("Failed to search nodes on the Chef Infra Server\nDetails: {details}\n\n💡 Hint: Verify that the client has read access to the node search index")]
    NodeSearchFailed { details: String },

    #[error("Chef credentials file not found: {path}\n\n💡 Hint: {suggestion}")]
    CredentialsNotFound { path: PathBuf, suggestion: String },

    #[error("Invalid Chef credentials: {reason}\n\n💡 Hint: {hint}")]
    InvalidCredentials { reason: String, hint: String },

    #[error("Failed to load client key: {source_name}\nDetails: {details}\n\n💡 Hint: The client key must be an RSA private key in PEM format")]
    ClientKeyError {
        source_name: String,
        details: String,
    },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for options and builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_catalog_unavailable_display() {
        let error = ReportError::CatalogUnavailable {
            details: "connection refused".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to list cookbooks"));
        assert!(display.contains("connection refused"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_node_search_failed_display() {
        let error = ReportError::NodeSearchFailed {
            details: "403 Forbidden".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to search nodes"));
        assert!(display.contains("403 Forbidden"));
    }

    #[test]
    fn test_credentials_not_found_display() {
        let error = ReportError::CredentialsNotFound {
            path: PathBuf::from("/home/user/.chef/credentials"),
            suggestion: "Create one".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("credentials file not found"));
        assert!(display.contains("/home/user/.chef/credentials"));
        assert!(display.contains("Create one"));
    }

    #[test]
    fn test_invalid_credentials_display() {
        let error = ReportError::InvalidCredentials {
            reason: "profile 'prod' missing client_name".to_string(),
            hint: "Add client_name".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid Chef credentials"));
        assert!(display.contains("profile 'prod'"));
        assert!(display.contains("Add client_name"));
    }

    #[test]
    fn test_client_key_error_display() {
        let error = ReportError::ClientKeyError {
            source_name: "/keys/me.pem".to_string(),
            details: "bad base64".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("/keys/me.pem"));
        assert!(display.contains("PEM format"));
    }

    #[test]
    fn test_file_write_error_display() {
        let error = ReportError::FileWriteError {
            path: PathBuf::from("/test/report.csv"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("/test/report.csv"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_security_error_display() {
        let error = ReportError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("Symbolic links are not allowed"));
        assert!(display.contains("Use a regular file instead"));
    }
}
