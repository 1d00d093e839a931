//! Fallible boundaries of the core.
//!
//! Only three things can fail here: parsing an import payload, talking to the
//! durable store, and loading a persisted collection written by a newer
//! version. Task operations, the history manager, and the view pipeline are
//! total; their "error" conditions are no-ops by design.

use thiserror::Error as ThisError;

/// Errors surfaced by tick-core.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Import payload is not valid JSON at all.
    #[error("import payload is not valid JSON: {0}")]
    ImportParse(#[source] serde_json::Error),

    /// Import payload parsed but does not match the export schema.
    #[error("import payload has the wrong shape: {0}")]
    ImportFormat(String),

    /// The durable store failed to read or write.
    #[error("storage failure: {0}")]
    Storage(#[source] anyhow::Error),

    /// Persisted data was written by a newer tick than this one.
    #[error("persisted data is version {found}, this build supports up to {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl Error {
    /// Stable machine-readable code for agent-friendly output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ImportParse(_) => "import_parse",
            Self::ImportFormat(_) => "import_format",
            Self::Storage(_) => "storage",
            Self::UnsupportedVersion { .. } => "unsupported_version",
        }
    }

    /// Optional remediation hint surfaced next to the message.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ImportParse(_) => Some("Check that the file is a tick JSON export."),
            Self::ImportFormat(_) => {
                Some("Exports contain a top-level 'tasks' array; re-export and retry.")
            }
            Self::Storage(_) => Some("Check disk space and permissions on the .tick directory."),
            Self::UnsupportedVersion { .. } => Some("Upgrade tick to read this data."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn error_codes_are_stable() {
        let err = Error::ImportFormat("tasks is not an array".to_string());
        assert_eq!(err.error_code(), "import_format");
        assert!(err.suggestion().is_some());

        let err = Error::UnsupportedVersion {
            found: 9,
            supported: 1,
        };
        assert_eq!(err.error_code(), "unsupported_version");
        assert!(err.to_string().contains("version 9"));
    }
}
