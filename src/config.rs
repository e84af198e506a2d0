// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Configuration passed into the capture and sync components at construction.
//!
//! Only the record store base URL comes from the environment. Everything else
//! (map view, basemap, draw tools, request timeout) is an explicit value with
//! a sensible default that the host can override before building a controller.

use std::env;
use std::time::Duration;

/// Environment variable holding the record store base URL.
pub const API_BASE_ENV: &str = "SPOT_MAP_API_BASE";

const DEFAULT_API_BASE: &str = "http://localhost:8080";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the spot record store (no trailing slash)
    pub api_base: String,
    /// Upper bound on a single store request
    pub request_timeout: Duration,
    /// Initial map view and basemap
    pub map: MapViewConfig,
    /// Drawing tools offered by the surface
    pub draw_tools: DrawToolsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            map: MapViewConfig::default(),
            draw_tools: DrawToolsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the environment (and a `.env` file if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_base = match env::var(API_BASE_ENV) {
            Ok(value) if !value.trim().is_empty() => normalize_base(&value)?,
            _ => DEFAULT_API_BASE.to_string(),
        };

        Ok(Self {
            api_base,
            ..Self::default()
        })
    }

    /// Override the store base URL.
    pub fn with_api_base(mut self, base: &str) -> Result<Self, ConfigError> {
        self.api_base = normalize_base(base)?;
        Ok(self)
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// URL of the spots collection endpoint.
    pub fn spots_url(&self) -> String {
        format!("{}/api/spots", self.api_base)
    }
}

fn normalize_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_string())
}

/// Initial view, basemap, and framing behaviour.
#[derive(Debug, Clone)]
pub struct MapViewConfig {
    /// Initial center as (latitude, longitude)
    pub center: (f64, f64),
    pub zoom: u8,
    /// Tile URL template with `{id}`, `{z}`, `{x}`, `{y}` and `{accessToken}` slots
    pub tile_url_template: String,
    pub tile_style_id: String,
    pub attribution: String,
    /// Basemap access token; the host supplies it, it is never read from the environment
    pub access_token: Option<String>,
    pub max_zoom: u8,
    pub tile_size: u32,
    pub zoom_offset: i8,
    /// Options used when framing loaded spots
    pub fit: FitOptions,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            center: (47.267, -122.437),
            zoom: 7,
            tile_url_template:
                "https://api.mapbox.com/styles/v1/{id}/tiles/{z}/{x}/{y}?access_token={accessToken}"
                    .to_string(),
            tile_style_id: "mapbox/satellite-streets-v12".to_string(),
            attribution: "Map data &copy; OpenStreetMap contributors, Imagery &copy; Mapbox"
                .to_string(),
            access_token: None,
            max_zoom: 22,
            tile_size: 512,
            zoom_offset: -1,
            fit: FitOptions::default(),
        }
    }
}

/// How the view is framed around a set of features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub max_zoom: u8,
    /// Padding in pixels on every side
    pub padding: u32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_zoom: 14,
            padding: 20,
        }
    }
}

/// Which drawing tools the surface offers.
///
/// There is no circle option: circles have no representation in the
/// interchange format the store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawToolsConfig {
    pub marker: bool,
    pub polyline: bool,
    pub polygon: bool,
    pub rectangle: bool,
}

impl Default for DrawToolsConfig {
    fn default() -> Self {
        Self {
            marker: true,
            polyline: true,
            polygon: true,
            rectangle: true,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid store base URL {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}
