//! HTML pages.
//!
//! Each page is an askama template under `templates/`; values are HTML-escaped
//! on output.

use askama::Template;
use axum::response::Html;

use crate::error::Result;
use crate::record::{Observation, Project, Subject};
use crate::service::{ObservationEntry, SubjectEntry};

use super::flash::Flash;

/// Landing page.
#[derive(Debug, Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    /// Status message to show.
    pub flash: Option<Flash>,
}

/// Project listing and creation form.
#[derive(Debug, Template)]
#[template(path = "projects.html")]
pub struct ProjectsPage {
    /// Status message to show.
    pub flash: Option<Flash>,
    /// All projects.
    pub projects: Vec<Project>,
}

/// Subject listing and creation form.
#[derive(Debug, Template)]
#[template(path = "subjects.html")]
pub struct SubjectsPage {
    /// Status message to show.
    pub flash: Option<Flash>,
    /// All subjects with their projects.
    pub subjects: Vec<SubjectEntry>,
    /// Projects offered in the creation form.
    pub projects: Vec<Project>,
}

/// Observation listing and creation form.
#[derive(Debug, Template)]
#[template(path = "observations.html")]
pub struct ObservationsPage {
    /// Status message to show.
    pub flash: Option<Flash>,
    /// All observations with their project and subject.
    pub observations: Vec<ObservationEntry>,
    /// Projects offered in the creation form.
    pub projects: Vec<Project>,
    /// Subjects offered in the creation form.
    pub subjects: Vec<SubjectEntry>,
}

/// Observations for a single subject.
#[derive(Debug, Template)]
#[template(path = "view_observations.html")]
pub struct SubjectPage {
    /// Status message to show.
    pub flash: Option<Flash>,
    /// The subject.
    pub subject: Subject,
    /// Its observations.
    pub observations: Vec<Observation>,
}

/// Render a page into an HTML response body.
///
/// # Errors
///
/// Returns [`crate::Error::Template`] if rendering fails.
pub fn render<T: Template>(page: &T) -> Result<Html<String>> {
    Ok(Html(page.render()?))
}
