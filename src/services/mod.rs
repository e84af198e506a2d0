// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the components the sync controller orchestrates.

pub mod capture;
pub mod form;
pub mod render;
pub mod repository;

pub use capture::{DrawEvent, DrawingSurface, GeometryCapture, ShapeHandle};
pub use form::{DraftSpot, SpotField, SpotFormState, Validation};
pub use render::{
    FeatureHandle, FeatureStyle, MapRenderer, Notification, Notifier, PopupContent, Severity,
};
pub use repository::SpotRepository;
