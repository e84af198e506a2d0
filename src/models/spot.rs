// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Scenic spot records as exchanged with the record store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Kind of view a spot offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Category {
    #[serde(rename = "City lights")]
    CityLights,
    #[serde(rename = "Water Bodies")]
    WaterBodies,
    Nature,
    Hikes,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::CityLights,
        Category::WaterBodies,
        Category::Nature,
        Category::Hikes,
        Category::Other,
    ];

    /// Value sent to the store in the `views` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::CityLights => "City lights",
            Category::WaterBodies => "Water Bodies",
            Category::Nature => "Nature",
            Category::Hikes => "Hikes",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    /// Accepts the store value case-insensitively, so "City Lights" from a
    /// select label parses as well as "City lights".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// ADA accessibility of a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum AdaAccessibility {
    Accessible,
    #[serde(rename = "Not Accessible")]
    NotAccessible,
}

impl AdaAccessibility {
    pub fn as_str(self) -> &'static str {
        match self {
            AdaAccessibility::Accessible => "Accessible",
            AdaAccessibility::NotAccessible => "Not Accessible",
        }
    }
}

impl fmt::Display for AdaAccessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdaAccessibility {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [AdaAccessibility::Accessible, AdaAccessibility::NotAccessible]
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Submission payload for `POST /api/spots`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NewSpot {
    pub description: String,
    /// Author's name
    pub name: String,
    /// Category
    pub views: Category,
    pub ada: AdaAccessibility,
    /// Number of parking spots
    pub parking: u32,
    /// Distance from the nearest main road, in miles
    pub distance: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub geometry: geojson::Geometry,
}

/// A persisted spot as returned by the store.
///
/// Text fields are kept as the store sent them, so records written by
/// other clients still render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Spot {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    /// Author's name
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Category
    #[serde(default, deserialize_with = "lenient_text")]
    pub views: String,
    #[serde(default)]
    pub ada: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub parking: u32,
    #[serde(default, deserialize_with = "lenient_miles")]
    pub distance: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub geometry: geojson::Geometry,
    /// When the store created the record (RFC 3339)
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Spot {
    /// Build the persisted record from a submitted payload and the
    /// store-assigned fields.
    pub fn from_submission(new_spot: &NewSpot, id: u64, created_at: Option<String>) -> Self {
        Self {
            id,
            description: new_spot.description.clone(),
            name: new_spot.name.clone(),
            views: new_spot.views.as_str().to_string(),
            ada: Some(new_spot.ada.as_str().to_string()),
            parking: new_spot.parking,
            distance: new_spot.distance,
            geometry: new_spot.geometry.clone(),
            created_at,
        }
    }
}

/// Coerce a raw numeric input to a parking count: non-finite or negative
/// values become 0 and fractions are truncated.
pub fn coerce_count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Coerce a raw numeric input to a distance: non-finite values become 0.
pub fn coerce_miles(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn lenient_text<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_count<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(coerce_count).unwrap_or(0))
}

fn lenient_miles<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(coerce_miles).unwrap_or(0.0))
}

/// Response body of `GET /api/spots`.
///
/// Items are kept as raw JSON so one unreadable record does not hide the rest.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotList {
    pub items: Vec<serde_json::Value>,
}
