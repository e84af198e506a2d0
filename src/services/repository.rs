// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the spot record store.
//!
//! Each call is a single attempt bounded by the configured timeout; retries
//! are left to the user.

use crate::config::Config;
use crate::error::{FetchError, SaveError};
use crate::models::{NewSpot, Spot, SpotList};
use serde_json::Value;

/// Record store client.
#[derive(Clone)]
pub struct SpotRepository {
    http: reqwest::Client,
    spots_url: String,
}

impl SpotRepository {
    /// Create a client for the store configured in `config`.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            spots_url: config.spots_url(),
        })
    }

    /// Fetch every persisted spot.
    ///
    /// A success response that is not shaped as `{ items: [...] }` counts as
    /// zero spots; unreadable items are skipped.
    pub async fn list_all(&self) -> Result<Vec<Spot>, FetchError> {
        let response = self
            .http
            .get(&self.spots_url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Spot list request failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FetchError::from_reqwest)?;

        let list: SpotList = match serde_json::from_slice(&body) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed spot list, treating as empty");
                return Ok(Vec::new());
            }
        };

        let total = list.items.len();
        let spots: Vec<Spot> = list
            .items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Spot>(item) {
                Ok(spot) => Some(spot),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable spot");
                    None
                }
            })
            .collect();

        tracing::info!(count = spots.len(), skipped = total - spots.len(), "Loaded spots");
        Ok(spots)
    }

    /// Submit a new spot. The store assigns `id` and `created_at`.
    pub async fn create(&self, new_spot: &NewSpot) -> Result<Spot, SaveError> {
        let response = self
            .http
            .post(&self.spots_url)
            .json(new_spot)
            .send()
            .await
            .map_err(SaveError::from_reqwest)?;

        let status = response.status();
        let body = response.bytes().await.map_err(SaveError::from_reqwest)?;
        let json: Option<Value> = serde_json::from_slice(&body).ok();

        let id = json
            .as_ref()
            .and_then(|b| b.get("id"))
            .and_then(Value::as_u64)
            .filter(|id| *id != 0);

        match id {
            Some(id) if status.is_success() => {
                let created_at = json
                    .as_ref()
                    .and_then(|b| b.get("created_at"))
                    .and_then(Value::as_str)
                    .map(str::to_string);

                tracing::info!(id, status = status.as_u16(), "Spot saved");
                Ok(Spot::from_submission(new_spot, id, created_at))
            }
            _ => {
                let message = json
                    .as_ref()
                    .and_then(|b| b.get("error"))
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Save failed ({})", status.as_u16()));

                tracing::warn!(status = status.as_u16(), error = %message, "Spot save rejected");
                Err(SaveError::Rejected(message))
            }
        }
    }
}
