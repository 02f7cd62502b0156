//! Observation listing and creation.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{NewObservation, Observation, Project, Subject};
use crate::storage::{Collection, Storage};
use crate::validation::{check_observation_length, parse_integer};

use super::{INVALID_PROJECT_NUMBER, NUMBERS_NOT_INTEGERS};

/// An observation together with its project and subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationEntry {
    /// The observation.
    pub observation: Observation,
    /// The project, if it still exists.
    pub project: Option<Project>,
    /// The subject, if it still exists.
    pub subject: Option<Subject>,
}

/// One subject and the observations logged against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectObservations {
    /// The subject.
    pub subject: Subject,
    /// Its observations, in stored order.
    pub observations: Vec<Observation>,
}

/// Service for the observations collection.
#[derive(Debug, Clone)]
pub struct ObservationService {
    storage: Storage,
}

impl ObservationService {
    /// Create an observation service over the given storage.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// List every observation in stored order, joined with project and subject.
    ///
    /// # Errors
    ///
    /// Returns an error if any collection cannot be loaded.
    pub fn list(&self) -> Result<Vec<ObservationEntry>> {
        let projects = self.storage.projects()?;
        let subjects = self.storage.subjects()?;
        let entries = self
            .storage
            .observations()?
            .into_iter()
            .map(|observation| {
                let project = projects
                    .iter()
                    .find(|p| p.unique_number == observation.project_number)
                    .cloned();
                let subject = subjects
                    .iter()
                    .find(|s| s.belongs_to(observation.project_number, observation.subject_number))
                    .cloned();
                ObservationEntry {
                    observation,
                    project,
                    subject,
                }
            })
            .collect();
        Ok(entries)
    }

    /// List the observations for one subject.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no subject has the given number, or a
    /// storage error if a collection cannot be loaded.
    pub fn list_for_subject(&self, subject_number: i64) -> Result<SubjectObservations> {
        let subject = self
            .storage
            .subjects()?
            .into_iter()
            .find(|s| s.subject_number == subject_number)
            .ok_or_else(|| Error::not_found("Subject not found."))?;

        let observations = self
            .storage
            .observations()?
            .into_iter()
            .filter(|o| o.subject_number == subject_number)
            .collect();

        Ok(SubjectObservations {
            subject,
            observations,
        })
    }

    /// Create an observation from a form submission.
    ///
    /// The new observation's id is one more than the largest id stored, or 1
    /// for the first observation.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFormat`] if either number isn't an integer
    /// - [`Error::Reference`] if the project, or the subject within it, is unknown
    /// - [`Error::TooLong`] if the text is over 1000 characters
    /// - storage errors if a collection can't be loaded or saved
    pub fn create(&self, form: &NewObservation) -> Result<Observation> {
        let project_number =
            parse_integer("project_number", &form.project_number, NUMBERS_NOT_INTEGERS)?;
        let subject_number =
            parse_integer("subject_number", &form.subject_number, NUMBERS_NOT_INTEGERS)?;

        let projects = self.storage.projects()?;
        if !projects.iter().any(|p| p.unique_number == project_number) {
            debug!("Rejecting observation for unknown project {}", project_number);
            return Err(Error::reference(project_number, INVALID_PROJECT_NUMBER));
        }

        let subjects = self.storage.subjects()?;
        if !subjects
            .iter()
            .any(|s| s.belongs_to(project_number, subject_number))
        {
            debug!(
                "Rejecting observation for subject {} not in project {}",
                subject_number, project_number
            );
            return Err(Error::reference(
                subject_number,
                "Invalid subject number for the selected project.",
            ));
        }

        check_observation_length(&form.observation)?;

        let mut observations = self.storage.observations()?;
        let unique_observation_id = next_id(&observations)?;
        let observation = Observation {
            project_number,
            subject_number,
            observation: form.observation.clone(),
            unique_observation_id,
        };
        observations.push(observation.clone());
        self.storage.save(Collection::Observations, &observations)?;

        info!(
            "Created observation {} for subject {}",
            unique_observation_id, subject_number
        );
        Ok(observation)
    }
}

/// One more than the largest stored id, or 1 when there are none.
fn next_id(observations: &[Observation]) -> Result<i64> {
    observations
        .iter()
        .map(|o| o.unique_observation_id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| Error::internal("observation ids exhausted"))
}
