//! Collection definitions for studylog.
//!
//! Each collection is a single JSON array stored in its own file inside the
//! data directory.

use serde::{Deserialize, Serialize};

/// One of the three persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Research projects.
    Projects,
    /// Subjects enrolled in projects.
    Subjects,
    /// Observations logged against subjects.
    Observations,
}

impl Collection {
    /// All collections, in dependency order.
    pub const ALL: [Self; 3] = [Self::Projects, Self::Subjects, Self::Observations];

    /// File name of the collection inside the data directory.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Projects => "projects.json",
            Self::Subjects => "subjects.json",
            Self::Observations => "observations.json",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Projects => write!(f, "projects"),
            Self::Subjects => write!(f, "subjects"),
            Self::Observations => write!(f, "observations"),
        }
    }
}
