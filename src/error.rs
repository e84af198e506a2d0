// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for each boundary of the draw-capture-submit workflow.
//!
//! None of these are fatal: every one is recovered by returning the
//! controller to an interactive state and telling the user.

use crate::services::capture::ShapeHandle;
use crate::services::form::SpotField;

/// A drawn shape that cannot become a spot geometry.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Unsupported geometry type {0} (expected Point, LineString or Polygon)")]
    UnsupportedGeometry(String),

    #[error("Geometry has no coordinates")]
    EmptyGeometry,

    #[error("Unknown shape {0}")]
    UnknownShape(ShapeHandle),
}

/// A field update the form cannot accept.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("{value:?} is not a valid choice for {field}")]
    UnknownChoice { field: SpotField, value: String },

    #[error("The form is locked while a submission is in flight")]
    Locked,
}

/// Required draft fields are missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields: {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<SpotField>,
}

fn join_fields(fields: &[SpotField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Loading existing spots failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error loading spots: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Loading spots failed ({0})")]
    Status(u16),

    #[error("Request timed out")]
    TimedOut,
}

/// Saving a new spot failed.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Network error saving spot")]
    Transport(#[source] reqwest::Error),

    /// The store refused the record. The message is the store's own
    /// `error` text when it sent one.
    #[error("{0}")]
    Rejected(String),

    #[error("Request timed out")]
    TimedOut,
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::TimedOut
        } else {
            FetchError::Transport(err)
        }
    }
}

impl SaveError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SaveError::TimedOut
        } else {
            SaveError::Transport(err)
        }
    }

    /// Text shown to the user in the failure notification.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
