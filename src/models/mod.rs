// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod geometry;
pub mod spot;

pub use geometry::{GeometryKind, SpotBounds};
pub use spot::{AdaAccessibility, Category, NewSpot, Spot, SpotList};
