//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for middleware generation
#[derive(Debug, Error)]
pub enum Error {
    /// The interface query is not of the form `path/to/package.Type`
    #[error("--interface (-i) flag should be like path/to/package.type")]
    InvalidQuery(String),

    /// The named type does not exist in the package
    #[error("Interface {name:?} not found in package {package:?}")]
    NotFound { name: String, package: String },

    /// The named type exists but is not an interface
    #[error("Passed type name {name:?} in package {package:?} is not an interface (found {kind})")]
    WrongKind {
        name: String,
        package: String,
        kind: String,
    },

    /// No directory could be found for an import path
    #[error("Package {package:?} not found (searched {})", display_searched(.searched))]
    PackageNotFound {
        package: String,
        searched: Vec<PathBuf>,
    },

    /// Parsing errors
    #[error("Parse error in {file}:{line}:{column}: {message}")]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn display_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "no locations".to_string();
    }
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a parse error with location
    pub fn parse(
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }

    /// Errors caused by what the user asked for rather than by the environment.
    /// They are definitional and never worth retrying.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuery(_)
                | Self::NotFound { .. }
                | Self::WrongKind { .. }
                | Self::PackageNotFound { .. }
                | Self::Configuration(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_type_and_package() {
        let err = Error::NotFound {
            name: "Reader".into(),
            package: "io".into(),
        };
        assert_eq!(
            err.to_string(),
            "Interface \"Reader\" not found in package \"io\""
        );
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_wrong_kind_is_configuration_error() {
        let err = Error::WrongKind {
            name: "Buffer".into(),
            package: "bytes".into(),
            kind: "struct".into(),
        };
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("is not an interface"));
    }

    #[test]
    fn test_package_not_found_lists_searched_dirs() {
        let err = Error::PackageNotFound {
            package: "example.com/missing".into(),
            searched: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        };
        assert!(err.to_string().contains("/a, /b"));
    }

    #[test]
    fn test_io_error_is_not_configuration_error() {
        let err: Error = std::io::Error::other("disk on fire").into();
        assert!(!err.is_configuration_error());
    }
}
