// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Spot-Map: draw, describe and save scenic spots on an interactive map
//!
//! This crate provides the draw-capture-submit workflow behind a map of
//! community scenic spots: capturing drawn shapes, holding and validating
//! the pending metadata, talking to the spot record store, and rendering
//! persisted spots back onto the map. The map, drawing toolkit and toasts
//! are supplied by the host through the traits in [`services`].

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod time_utils;

pub use config::Config;
pub use controller::{ControllerState, MapSyncController};
pub use session::UiEvent;
