//! Decides whether an upstream error is shown to the user
//!
//! An error only surfaces when the feed would otherwise be blank. As soon as
//! the projection has content the banner goes away, even if the error persists.

use serde::{Deserialize, Serialize};

use crate::domain::error::FeedError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorVisibility {
    #[default]
    Hidden,
    Shown,
}

impl ErrorVisibility {
    /// One transition step for the current (error, projected count) pair
    pub fn step(self, error: Option<&FeedError>, count: usize) -> Self {
        match (self, error) {
            _ if count > 0 => Self::Hidden,
            (Self::Hidden, Some(_)) => Self::Shown,
            (state, _) => state,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ErrorGate {
    visibility: ErrorVisibility,
    /// Error displayed while shown; kept after the source clears it
    shown_error: Option<FeedError>,
}

impl ErrorGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> ErrorVisibility {
        self.visibility
    }

    /// Error to display, if the gate is open
    pub fn shown_error(&self) -> Option<&FeedError> {
        self.shown_error.as_ref()
    }

    /// Re-evaluate on every change to the error or the projection
    pub fn evaluate(&mut self, error: Option<&FeedError>, count: usize) -> ErrorVisibility {
        self.visibility = self.visibility.step(error, count);

        match self.visibility {
            ErrorVisibility::Hidden => self.shown_error = None,
            ErrorVisibility::Shown => {
                if let Some(error) = error {
                    self.shown_error = Some(error.clone());
                }
            }
        }

        self.visibility
    }
}
