use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    StoreMissing,
    InvalidMode,
    InvalidPagination,
    CollaboratorFailure,
    ImportParseError,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::StoreMissing => "E1003",
            Self::InvalidMode => "E2001",
            Self::InvalidPagination => "E2002",
            Self::CollaboratorFailure => "E3001",
            Self::ImportParseError => "E4001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Project not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::StoreMissing => "Document store not found",
            Self::InvalidMode => "Invalid search mode",
            Self::InvalidPagination => "Invalid page or page size",
            Self::CollaboratorFailure => "Document store request failed",
            Self::ImportParseError => "Import file parse error",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `sift init` to initialize this directory."),
            Self::ConfigParseError => Some("Fix syntax in .sift/config.toml and retry."),
            Self::StoreMissing => Some("Run `sift init`, then `sift add` or `sift import`."),
            Self::InvalidMode => Some("Use one of: basic, fulltext, vector, hybrid."),
            Self::InvalidPagination => Some("Page and page size must both be at least 1."),
            Self::CollaboratorFailure => None,
            Self::ImportParseError => {
                Some("Each line must be a JSON object with id, title, content and url.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
