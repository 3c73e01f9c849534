use crate::types::FetchError;
use std::path::PathBuf;

/// Result type alias for envgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for envgen operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed variable configuration (bad source name, bad secret reference)
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A required variable resolved to nothing
    #[error("Required variable \"{variable}\" has no value")]
    UnresolvedRequired { variable: String },

    /// The secret store failed and no default was available
    #[error("failed to fetch secret bundle \"{bundle}\" for variable \"{variable}\": {source}")]
    Upstream {
        bundle: String,
        variable: String,
        #[source]
        source: FetchError,
    },

    /// Template file extension is not one of the supported document formats
    #[error("unsupported template format '{extension}' for '{path}' (supported: json, yaml, yml, toml)")]
    Format { path: PathBuf, extension: String },

    /// Template document could not be parsed
    #[error("failed to parse {format} template '{path}': {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// Template could not be serialized back to its document format
    #[error("failed to serialize {format} template: {message}")]
    Serialize { format: String, message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Command execution errors
    #[error("{}", format_command_error(.command, .args, .message, .exit_code))]
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
    },
}

fn format_command_error(
    command: &str,
    args: &[String],
    message: &str,
    exit_code: &Option<i32>,
) -> String {
    let args_str = args.join(" ");
    let invocation = if args_str.is_empty() {
        command.to_string()
    } else {
        format!("{command} {args_str}")
    };
    match exit_code {
        Some(code) => format!("command '{invocation}' failed with exit code {code}: {message}"),
        None => format!("command '{invocation}' failed: {message}"),
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create an unresolved-required error for a variable
    #[must_use]
    pub fn unresolved_required(variable: impl Into<String>) -> Self {
        Error::UnresolvedRequired {
            variable: variable.into(),
        }
    }

    /// Create an upstream failure for a secret bundle fetch
    #[must_use]
    pub fn upstream(
        bundle: impl Into<String>,
        variable: impl Into<String>,
        source: FetchError,
    ) -> Self {
        Error::Upstream {
            bundle: bundle.into(),
            variable: variable.into(),
            source,
        }
    }

    /// Create an unsupported format error
    #[must_use]
    pub fn format(path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Error::Format {
            path: path.into(),
            extension: extension.into(),
        }
    }

    /// Create a document parse error
    #[must_use]
    pub fn parse(
        path: impl Into<PathBuf>,
        format: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Parse {
            path: path.into(),
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create a document serialization error
    #[must_use]
    pub fn serialize(format: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Serialize {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        args: Vec<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            args,
            message: message.into(),
            exit_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_required_message() {
        let err = Error::unresolved_required("B");
        assert_eq!(err.to_string(), r#"Required variable "B" has no value"#);
    }

    #[test]
    fn test_upstream_message_carries_context() {
        let err = Error::upstream(
            "prod/db",
            "DB_PASSWORD",
            FetchError::AccessDenied("not authorized".to_string()),
        );
        let message = err.to_string();
        assert!(message.contains("prod/db"));
        assert!(message.contains("DB_PASSWORD"));
        assert!(message.contains("not authorized"));
    }

    #[test]
    fn test_command_error_formatting() {
        let err = Error::command_execution("aws", vec!["secretsmanager".to_string()], "boom", Some(255));
        assert_eq!(
            err.to_string(),
            "command 'aws secretsmanager' failed with exit code 255: boom"
        );

        let err = Error::command_execution("aws", vec![], "not found", None);
        assert_eq!(err.to_string(), "command 'aws' failed: not found");
    }

    #[test]
    fn test_format_error_names_extension() {
        let err = Error::format("template.ini", "ini");
        assert!(err.to_string().contains("'ini'"));
    }
}
