//! JSON chapter ingestion.
//!
//! The input is a JSON array of chapter objects:
//!
//! ```json
//! [
//!   { "id": "C1", "title": "Basics", "time_minutes": 120, "score_value": 8 },
//!   { "id": "C2", "time_minutes": 180, "score_value": 12, "prerequisites": ["C1"] }
//! ]
//! ```
//!
//! `id`, `time_minutes` and `score_value` are required; `title` and
//! `prerequisites` default to empty. Records are validated here so the solver
//! never has to re-check them.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::ErrorCode;
use crate::model::Chapter;

/// Errors from reading or validating a chapter file.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The chapter file does not exist.
    #[error("chapter file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The chapter file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The content is not a JSON array of chapter objects.
    #[error("invalid chapter JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record parsed but violates a field constraint.
    #[error("chapter #{index} ({id:?}): {reason}")]
    InvalidChapter {
        /// Zero-based position in the input array.
        index: usize,
        id: String,
        reason: &'static str,
    },

    /// Two records share the same `id`.
    #[error("duplicate chapter id: {0}")]
    DuplicateId(String),
}

impl IngestError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::InputNotFound,
            Self::Io { .. } => ErrorCode::InputReadFailed,
            Self::Parse(_) => ErrorCode::InputParseError,
            Self::InvalidChapter { .. } => ErrorCode::InvalidChapter,
            Self::DuplicateId(_) => ErrorCode::DuplicateChapterId,
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

/// Read and validate the chapter list stored at `path`.
///
/// # Errors
///
/// Returns [`IngestError::NotFound`] if `path` does not exist,
/// [`IngestError::Io`] if it cannot be read, and any error from
/// [`parse_chapters_json`] for its content.
#[instrument]
pub fn read_chapters_json(path: &Path) -> Result<Vec<Chapter>, IngestError> {
    if !path.exists() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let chapters = parse_chapters_json(&content)?;
    debug!(count = chapters.len(), "loaded chapters");
    Ok(chapters)
}

/// Parse and validate a chapter list from a JSON string.
///
/// # Errors
///
/// Returns [`IngestError::Parse`] for malformed JSON or missing required
/// fields, [`IngestError::InvalidChapter`] for an empty id, a zero time, or a
/// negative/non-finite score, and [`IngestError::DuplicateId`] when an id
/// repeats.
pub fn parse_chapters_json(content: &str) -> Result<Vec<Chapter>, IngestError> {
    let chapters: Vec<Chapter> = serde_json::from_str(content)?;
    validate(&chapters)?;
    Ok(chapters)
}

fn validate(chapters: &[Chapter]) -> Result<(), IngestError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(chapters.len());

    for (index, ch) in chapters.iter().enumerate() {
        let reason = if ch.id.trim().is_empty() {
            Some("id must not be empty")
        } else if ch.time_minutes == 0 {
            Some("time_minutes must be positive")
        } else if !ch.score_value.is_finite() || ch.score_value < 0.0 {
            Some("score_value must be finite and non-negative")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(IngestError::InvalidChapter {
                index,
                id: ch.id.clone(),
                reason,
            });
        }

        if !seen.insert(ch.id.as_str()) {
            return Err(IngestError::DuplicateId(ch.id.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_required_and_optional_fields() {
        let chapters = parse_chapters_json(
            r#"[
                {"id":"C1","title":"Basics","time_minutes":120,"score_value":8},
                {"id":"C2","time_minutes":180,"score_value":12.5,"prerequisites":["C1"]}
            ]"#,
        )
        .expect("parse");

        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "Basics");
        assert!(chapters[0].prerequisites.is_empty());
        assert_eq!(chapters[1].title, "");
        assert_eq!(chapters[1].prerequisites, vec!["C1".to_string()]);
        assert!((chapters[1].score_value - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn dangling_prerequisites_are_accepted() {
        let chapters =
            parse_chapters_json(r#"[{"id":"C2","time_minutes":60,"score_value":10,"prerequisites":["X"]}]"#)
                .expect("parse");
        assert_eq!(chapters[0].prerequisites, vec!["X".to_string()]);
    }

    #[test]
    fn missing_required_field_is_parse_error() {
        let err = parse_chapters_json(r#"[{"id":"C1","score_value":1}]"#).unwrap_err();
        assert!(matches!(err, IngestError::Parse(_)));
        assert_eq!(err.code(), ErrorCode::InputParseError);
    }

    #[test]
    fn negative_time_is_parse_error() {
        let err =
            parse_chapters_json(r#"[{"id":"C1","time_minutes":-5,"score_value":1}]"#).unwrap_err();
        assert!(matches!(err, IngestError::Parse(_)));
    }

    #[test]
    fn empty_id_rejected() {
        let err =
            parse_chapters_json(r#"[{"id":"  ","time_minutes":5,"score_value":1}]"#).unwrap_err();
        assert!(matches!(err, IngestError::InvalidChapter { index: 0, .. }));
    }

    #[test]
    fn zero_time_rejected() {
        let err =
            parse_chapters_json(r#"[{"id":"A","time_minutes":0,"score_value":1}]"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidChapter);
    }

    #[test]
    fn negative_score_rejected() {
        let err =
            parse_chapters_json(r#"[{"id":"A","time_minutes":3,"score_value":-0.5}]"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidChapter);
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = parse_chapters_json(
            r#"[{"id":"A","time_minutes":3,"score_value":1},{"id":"A","time_minutes":4,"score_value":2}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::DuplicateId(ref id) if id == "A"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_chapters_json(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, IngestError::NotFound { .. }));
        assert!(err.hint().is_some());
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"[{{"id":"A","time_minutes":10,"score_value":1.0}}]"#
        )
        .expect("write");

        let chapters = read_chapters_json(file.path()).expect("read");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].id, "A");
    }
}
