// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rendering and notification sinks the controller drives.
//!
//! The host map (tiles, shapes, popups) and the toast area are outside this
//! crate; they implement [`MapRenderer`] and [`Notifier`].

use crate::config::FitOptions;
use crate::models::Spot;
use crate::time_utils::{format_popup_date, parse_store_timestamp};
use std::fmt;

const MISSING: &str = "—";

/// Opaque handle to a rendered feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureHandle(pub u64);

/// Style for rendered spots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureStyle {
    /// A spot loaded from the store on mount
    Persisted,
    /// A spot saved during this session
    JustSaved,
}

/// The map rendering collaborator.
pub trait MapRenderer {
    /// Set the view center (latitude, longitude) and zoom.
    fn set_view(&mut self, center: (f64, f64), zoom: u8);

    /// Draw a display-only feature and return its handle.
    fn add_feature(&mut self, geometry: &geojson::Geometry, style: FeatureStyle) -> FeatureHandle;

    fn bind_popup(&mut self, feature: FeatureHandle, popup: &PopupContent);

    fn open_popup(&mut self, feature: FeatureHandle);

    fn close_popup(&mut self, feature: FeatureHandle);

    /// Frame the view around a rectangle in lon/lat.
    fn fit_bounds(&mut self, bounds: geo::Rect<f64>, options: FitOptions) -> anyhow::Result<()>;
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn destructive(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            severity: Severity::Destructive,
        }
    }
}

/// The notification collaborator. Fire-and-forget.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Popup summary of a spot.
///
/// Kept structured so the renderer decides markup and escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub title: String,
    pub rows: Vec<(&'static str, String)>,
    pub footer: String,
}

impl PopupContent {
    /// Popup for a spot loaded from the store.
    pub fn for_loaded(spot: &Spot) -> Self {
        let mut popup = Self::summary(spot, format!("ID: {}", spot.id));
        if let Some(date) = spot.created_at.as_deref().and_then(parse_store_timestamp) {
            popup.rows.push(("Added", format_popup_date(date)));
        }
        popup
    }

    /// Popup for a spot the user just saved.
    pub fn for_saved(spot: &Spot) -> Self {
        Self::summary(spot, format!("Saved as ID {}", spot.id))
    }

    fn summary(spot: &Spot, footer: String) -> Self {
        Self {
            title: or_default(&spot.description, "Untitled spot"),
            rows: vec![
                ("By", or_default(&spot.name, "Anonymous")),
                ("Category", or_default(&spot.views, MISSING)),
                ("ADA", or_default(spot.ada.as_deref().unwrap_or(""), MISSING)),
                ("Parking", spot.parking.to_string()),
                ("Distance (mi)", spot.distance.to_string()),
            ],
            footer,
        }
    }

    /// Plain-text rendering, one line per row.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PopupContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for (label, value) in &self.rows {
            writeln!(f, "{}: {}", label, value)?;
        }
        write!(f, "{}", self.footer)
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
