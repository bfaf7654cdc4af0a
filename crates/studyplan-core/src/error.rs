use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InputNotFound,
    InputReadFailed,
    InputParseError,
    ConfigParseError,
    CycleDetected,
    TooManyChapters,
    InvalidChapter,
    DuplicateChapterId,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InputNotFound => "E1001",
            Self::InputReadFailed => "E1002",
            Self::InputParseError => "E1003",
            Self::ConfigParseError => "E1004",
            Self::CycleDetected => "E2001",
            Self::TooManyChapters => "E2002",
            Self::InvalidChapter => "E3001",
            Self::DuplicateChapterId => "E3002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InputNotFound => "Chapter file not found",
            Self::InputReadFailed => "Chapter file could not be read",
            Self::InputParseError => "Chapter file parse error",
            Self::ConfigParseError => "Config file parse error",
            Self::CycleDetected => "Prerequisite cycle detected",
            Self::TooManyChapters => "Too many chapters for exact search",
            Self::InvalidChapter => "Invalid chapter record",
            Self::DuplicateChapterId => "Duplicate chapter ID",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InputNotFound => Some("Pass a chapter file or set [input] path in studyplan.toml."),
            Self::InputReadFailed => Some("Check that the file exists and is readable."),
            Self::InputParseError => {
                Some("Each chapter needs `id`, `time_minutes` and `score_value`.")
            }
            Self::ConfigParseError => Some("Fix syntax in studyplan.toml and retry."),
            Self::CycleDetected => Some("Remove a prerequisite on the reported cycle and retry."),
            Self::TooManyChapters => {
                Some("Split the chapter list or raise [plan] max_chapters (runtime doubles per chapter).")
            }
            Self::InvalidChapter => {
                Some("IDs must be non-empty, times positive, scores finite and non-negative.")
            }
            Self::DuplicateChapterId => Some("Give every chapter a unique `id`."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
