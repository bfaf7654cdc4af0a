use serde::{Deserialize, Serialize};

/// A schedulable unit of study.
///
/// `prerequisites` may name IDs that are not part of the current chapter
/// list. Such dangling references are kept as-is: the graph still records
/// them, and the optimizer treats the chapter as unselectable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub time_minutes: u32,
    pub score_value: f64,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl Chapter {
    /// Build a chapter with an empty title.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        time_minutes: u32,
        score_value: f64,
        prerequisites: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            time_minutes,
            score_value,
            prerequisites: prerequisites.iter().map(ToString::to_string).collect(),
        }
    }

    /// Set the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
