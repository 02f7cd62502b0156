//! `studylog` - Record keeping for research projects
//!
//! This library provides the storage, validation and record services behind
//! the studylog web application, which tracks projects, the subjects enrolled
//! in them, and observations logged against subjects.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod service;
pub mod storage;
pub mod validation;
pub mod web;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{Observation, Project, Subject};
pub use service::Services;
pub use storage::{Storage, StorageStats};
