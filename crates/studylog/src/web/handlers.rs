//! Route handlers.
//!
//! Record services do blocking file I/O, so every call into them goes through
//! [`with_services`], which runs it on tokio's blocking thread pool.

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::{NewObservation, NewProject, NewSubject};
use crate::service::Services;

use super::flash::{Flash, FlashQuery};
use super::pages::{
    render, IndexPage, ObservationsPage, ProjectsPage, SubjectPage, SubjectsPage,
};
use super::AppState;

/// Run a blocking service call off the async worker threads.
async fn with_services<F, T>(state: &AppState, f: F) -> Result<T>
where
    F: FnOnce(&Services) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let services = state.services.clone();
    tokio::task::spawn_blocking(move || f(&services))
        .await
        .map_err(|e| Error::internal(format!("record task failed: {e}")))?
}

pub(super) async fn index() -> Result<Html<String>> {
    render(&IndexPage { flash: None })
}

pub(super) async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<FlashQuery>,
) -> Result<Html<String>> {
    let projects = with_services(&state, |s| s.projects.list()).await?;
    render(&ProjectsPage {
        flash: query.into_flash(),
        projects,
    })
}

pub(super) async fn create_project(
    State(state): State<AppState>,
    Form(form): Form<NewProject>,
) -> Result<Redirect> {
    let outcome = with_services(&state, move |s| s.projects.create(&form))
        .await
        .map(|_| "Project added successfully!");
    Ok(Flash::from_outcome(outcome)?.redirect("/projects"))
}

pub(super) async fn list_subjects(
    State(state): State<AppState>,
    Query(query): Query<FlashQuery>,
) -> Result<Html<String>> {
    let (subjects, projects) =
        with_services(&state, |s| Ok((s.subjects.list()?, s.projects.list()?))).await?;
    render(&SubjectsPage {
        flash: query.into_flash(),
        subjects,
        projects,
    })
}

pub(super) async fn create_subject(
    State(state): State<AppState>,
    Form(form): Form<NewSubject>,
) -> Result<Redirect> {
    let outcome = with_services(&state, move |s| s.subjects.create(&form))
        .await
        .map(|_| "Subject added successfully!");
    Ok(Flash::from_outcome(outcome)?.redirect("/subjects"))
}

pub(super) async fn list_observations(
    State(state): State<AppState>,
    Query(query): Query<FlashQuery>,
) -> Result<Html<String>> {
    let (observations, projects, subjects) = with_services(&state, |s| {
        Ok((
            s.observations.list()?,
            s.projects.list()?,
            s.subjects.list()?,
        ))
    })
    .await?;
    render(&ObservationsPage {
        flash: query.into_flash(),
        observations,
        projects,
        subjects,
    })
}

pub(super) async fn create_observation(
    State(state): State<AppState>,
    Form(form): Form<NewObservation>,
) -> Result<Redirect> {
    let outcome = with_services(&state, move |s| s.observations.create(&form))
        .await
        .map(|_| "Observation added successfully!");
    Ok(Flash::from_outcome(outcome)?.redirect("/observations"))
}

pub(super) async fn view_subject_observations(
    State(state): State<AppState>,
    Path(subject_number): Path<String>,
) -> Result<Response> {
    let Ok(subject_number) = subject_number.trim().parse::<i64>() else {
        debug!("Non-numeric subject number in path: {}", subject_number);
        return Ok(subject_not_found("Subject not found."));
    };

    let found = with_services(&state, move |s| {
        s.observations.list_for_subject(subject_number)
    })
    .await;
    match found {
        Ok(found) => {
            let page = render(&SubjectPage {
                flash: None,
                subject: found.subject,
                observations: found.observations,
            })?;
            Ok(page.into_response())
        }
        Err(e) if e.is_not_found() => Ok(subject_not_found(&e.to_string())),
        Err(e) => Err(e),
    }
}

fn subject_not_found(message: &str) -> Response {
    Flash::error(message)
        .redirect("/observations")
        .into_response()
}
