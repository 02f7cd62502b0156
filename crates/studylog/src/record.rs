//! Record types for studylog.
//!
//! This module defines the three persisted record kinds and the raw form
//! submissions they are created from. Field names match the on-disk JSON.

use serde::{Deserialize, Serialize};

/// A research project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// User-supplied number, unique across all projects.
    pub unique_number: i64,
    /// Project title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Trimmed, non-empty tags in submission order.
    pub tags: Vec<String>,
}

/// A subject enrolled in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// The owning project's `unique_number`.
    pub project_number: i64,
    /// Subject number, unique across all subjects in every project.
    pub subject_number: i64,
    /// Given name.
    pub first_name: String,
    /// Middle name.
    pub middle_name: String,
    /// Family name.
    pub last_name: String,
    /// Nickname.
    pub nick_name: String,
    /// Phone number in `###-###-####` form.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Free-text URL.
    pub url: String,
}

impl Subject {
    /// Full display name, skipping blank parts.
    #[must_use]
    pub fn display_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if this subject is the given subject number within the given project.
    #[must_use]
    pub fn belongs_to(&self, project_number: i64, subject_number: i64) -> bool {
        self.project_number == project_number && self.subject_number == subject_number
    }
}

/// A free-text observation logged against a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// The subject's project number.
    pub project_number: i64,
    /// The subject number.
    pub subject_number: i64,
    /// Observation text.
    pub observation: String,
    /// Identifier assigned on creation.
    pub unique_observation_id: i64,
}

/// Raw project submission, as posted by the projects form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewProject {
    /// Unparsed project number.
    pub unique_number: String,
    /// Project title.
    pub title: String,
    /// Project description.
    pub description: String,
    /// Comma-separated tags.
    pub tags: String,
}

/// Raw subject submission, as posted by the subjects form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewSubject {
    /// Unparsed project number.
    pub project_number: String,
    /// Unparsed subject number.
    pub subject_number: String,
    /// Given name.
    pub first_name: String,
    /// Middle name.
    pub middle_name: String,
    /// Family name.
    pub last_name: String,
    /// Nickname.
    pub nick_name: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// URL.
    pub url: String,
}

/// Raw observation submission, as posted by the observations form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewObservation {
    /// Unparsed project number.
    pub project_number: String,
    /// Unparsed subject number.
    pub subject_number: String,
    /// Observation text.
    pub observation: String,
}
