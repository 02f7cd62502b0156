//! Project listing and creation.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{NewProject, Project};
use crate::storage::{Collection, Storage};
use crate::validation::{parse_integer, split_tags};

use super::PROJECT_NUMBER_NOT_INTEGER;

/// Service for the projects collection.
#[derive(Debug, Clone)]
pub struct ProjectService {
    storage: Storage,
}

impl ProjectService {
    /// Create a project service over the given storage.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// List every project in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the projects collection cannot be loaded.
    pub fn list(&self) -> Result<Vec<Project>> {
        self.storage.projects()
    }

    /// Create a project from a form submission.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFormat`] if the project number isn't an integer
    /// - [`Error::DuplicateKey`] if the number is already taken
    /// - [`Error::TooManyTags`] if more than 100 tags were given
    /// - storage errors if the collection can't be loaded or saved
    pub fn create(&self, form: &NewProject) -> Result<Project> {
        let unique_number = parse_integer(
            "unique_number",
            &form.unique_number,
            PROJECT_NUMBER_NOT_INTEGER,
        )?;

        let mut projects = self.storage.projects()?;
        if projects.iter().any(|p| p.unique_number == unique_number) {
            debug!("Rejecting duplicate project number {}", unique_number);
            return Err(Error::duplicate_key(
                unique_number,
                "Project number must be unique.",
            ));
        }

        let tags = split_tags(&form.tags)?;

        let project = Project {
            unique_number,
            title: form.title.clone(),
            description: form.description.clone(),
            tags,
        };
        projects.push(project.clone());
        self.storage.save(Collection::Projects, &projects)?;

        info!("Created project {}", unique_number);
        Ok(project)
    }
}
