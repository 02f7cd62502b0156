//! One-shot status messages.
//!
//! A POST handler never renders its result. It redirects to the listing page
//! and carries the outcome in the query string, which the listing page shows
//! once. Nothing is kept between requests.

use axum::response::Redirect;
use serde::Deserialize;

use crate::error::Result;

/// Whether a status message reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    /// The submission was stored.
    Success,
    /// The submission was rejected.
    Error,
}

impl FlashLevel {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A status message to show once on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    /// Success or error.
    pub level: FlashLevel,
    /// Text shown to the user.
    pub message: String,
}

/// The result of a form submission: a success message or the error that
/// rejected it.
pub type Outcome = Result<&'static str>;

impl Flash {
    /// Create a success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// Create an error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// Turn a submission outcome into a status message.
    ///
    /// # Errors
    ///
    /// Errors not caused by user input are passed through so the request
    /// fails instead of reporting them as a status message.
    pub fn from_outcome(outcome: Outcome) -> Result<Self> {
        match outcome {
            Ok(message) => Ok(Self::success(message)),
            Err(e) if e.is_user_error() => Ok(Self::error(e.to_string())),
            Err(e) => Err(e),
        }
    }

    /// Redirect to `path`, carrying this message in the query string.
    #[must_use]
    pub fn redirect(&self, path: &str) -> Redirect {
        Redirect::to(&format!(
            "{path}?level={}&message={}",
            self.level,
            urlencoding::encode(&self.message)
        ))
    }
}

/// Query parameters a listing page reads its status message from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FlashQuery {
    /// `success` or `error`.
    pub level: Option<String>,
    /// Message text.
    pub message: Option<String>,
}

impl FlashQuery {
    /// The status message, if the query carries a well-formed one.
    #[must_use]
    pub fn into_flash(self) -> Option<Flash> {
        let level = FlashLevel::parse(self.level.as_deref()?)?;
        let message = self.message.filter(|m| !m.is_empty())?;
        Some(Flash { level, message })
    }
}
