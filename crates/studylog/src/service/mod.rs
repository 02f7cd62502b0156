//! Record services for studylog.
//!
//! Each service lists and creates one kind of record. A create is a single
//! load, validate, append and save pass over the whole collection; it either
//! persists the new record or leaves storage untouched.

pub mod observation;
pub mod project;
pub mod subject;

pub use observation::{ObservationEntry, ObservationService, SubjectObservations};
pub use project::ProjectService;
pub use subject::{SubjectEntry, SubjectService};

use crate::config::Config;
use crate::error::Result;
use crate::storage::Storage;

/// Message for a project number that isn't an integer.
pub const PROJECT_NUMBER_NOT_INTEGER: &str = "Unique number must be an integer.";

/// Message for subject or observation numbers that aren't integers.
pub const NUMBERS_NOT_INTEGERS: &str = "Project and Subject numbers must be integers.";

/// Message for a project number that matches no project.
pub const INVALID_PROJECT_NUMBER: &str = "Invalid project number.";

/// The three record services, sharing one storage root.
#[derive(Debug, Clone)]
pub struct Services {
    /// Project listing and creation.
    pub projects: ProjectService,
    /// Subject listing and creation.
    pub subjects: SubjectService,
    /// Observation listing and creation.
    pub observations: ObservationService,
}

impl Services {
    /// Build the services over the given storage.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self {
            projects: ProjectService::new(storage.clone()),
            subjects: SubjectService::new(storage.clone()),
            observations: ObservationService::new(storage),
        }
    }

    /// Build the services from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Storage::from_config(config)?))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::record::{NewObservation, NewProject, NewSubject};
    use crate::storage::Storage;

    pub fn storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path(), true).unwrap();
        (dir, storage)
    }

    pub fn new_project(number: &str) -> NewProject {
        NewProject {
            unique_number: number.to_string(),
            title: format!("Project {number}"),
            description: "Longitudinal study".to_string(),
            tags: "sleep, diet".to_string(),
        }
    }

    pub fn new_subject(project: &str, subject: &str) -> NewSubject {
        NewSubject {
            project_number: project.to_string(),
            subject_number: subject.to_string(),
            first_name: "Ada".to_string(),
            middle_name: String::new(),
            last_name: "Lovelace".to_string(),
            nick_name: "Countess".to_string(),
            phone: "555-123-4567".to_string(),
            email: "ada@example.org".to_string(),
            url: "https://example.org/ada".to_string(),
        }
    }

    pub fn new_observation(project: &str, subject: &str, text: &str) -> NewObservation {
        NewObservation {
            project_number: project.to_string(),
            subject_number: subject.to_string(),
            observation: text.to_string(),
        }
    }
}
