//! Subject listing and creation.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{NewSubject, Project, Subject};
use crate::storage::{Collection, Storage};
use crate::validation::{parse_integer, validate_email, validate_phone};

use super::{INVALID_PROJECT_NUMBER, NUMBERS_NOT_INTEGERS};

/// A subject together with the project it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectEntry {
    /// The subject.
    pub subject: Subject,
    /// The owning project, if it still exists.
    pub project: Option<Project>,
}

/// Service for the subjects collection.
#[derive(Debug, Clone)]
pub struct SubjectService {
    storage: Storage,
}

impl SubjectService {
    /// Create a subject service over the given storage.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// List every subject in stored order, joined with its project.
    ///
    /// # Errors
    ///
    /// Returns an error if the subjects or projects collection cannot be loaded.
    pub fn list(&self) -> Result<Vec<SubjectEntry>> {
        let projects = self.storage.projects()?;
        let entries = self
            .storage
            .subjects()?
            .into_iter()
            .map(|subject| {
                let project = projects
                    .iter()
                    .find(|p| p.unique_number == subject.project_number)
                    .cloned();
                SubjectEntry { subject, project }
            })
            .collect();
        Ok(entries)
    }

    /// Create a subject from a form submission.
    ///
    /// Checks run in order and the first failure is reported.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFormat`] if either number isn't an integer
    /// - [`Error::Reference`] if no project has the given number
    /// - [`Error::DuplicateKey`] if the subject number is already taken
    /// - [`Error::InvalidFormat`] if the phone, then the email, is malformed
    /// - storage errors if a collection can't be loaded or saved
    pub fn create(&self, form: &NewSubject) -> Result<Subject> {
        let project_number =
            parse_integer("project_number", &form.project_number, NUMBERS_NOT_INTEGERS)?;
        let subject_number =
            parse_integer("subject_number", &form.subject_number, NUMBERS_NOT_INTEGERS)?;

        let projects = self.storage.projects()?;
        if !projects.iter().any(|p| p.unique_number == project_number) {
            debug!("Rejecting subject for unknown project {}", project_number);
            return Err(Error::reference(project_number, INVALID_PROJECT_NUMBER));
        }

        let mut subjects = self.storage.subjects()?;
        if subjects.iter().any(|s| s.subject_number == subject_number) {
            debug!("Rejecting duplicate subject number {}", subject_number);
            return Err(Error::duplicate_key(
                subject_number,
                "Subject number must be unique.",
            ));
        }

        if !validate_phone(&form.phone) {
            return Err(Error::invalid_format(
                "phone",
                "Invalid phone number format. Use ###-###-####.",
            ));
        }
        if !validate_email(&form.email) {
            return Err(Error::invalid_format(
                "email",
                "Invalid email format or unsupported domain.",
            ));
        }

        let subject = Subject {
            project_number,
            subject_number,
            first_name: form.first_name.clone(),
            middle_name: form.middle_name.clone(),
            last_name: form.last_name.clone(),
            nick_name: form.nick_name.clone(),
            phone: form.phone.clone(),
            email: form.email.clone(),
            url: form.url.clone(),
        };
        subjects.push(subject.clone());
        self.storage.save(Collection::Subjects, &subjects)?;

        info!(
            "Created subject {} in project {}",
            subject_number, project_number
        );
        Ok(subject)
    }
}
