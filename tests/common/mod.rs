// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use spot_map::config::{Config, DrawToolsConfig, FitOptions};
use spot_map::controller::MapSyncController;
use spot_map::services::{
    DrawingSurface, FeatureHandle, FeatureStyle, MapRenderer, Notification, Notifier,
    PopupContent, SpotRepository,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ─── Mock Record Store ───────────────────────────────────────

/// Canned responses and recorded requests for the mock store.
#[derive(Default)]
pub struct StoreState {
    pub list_response: Option<(StatusCode, String)>,
    pub create_responses: VecDeque<(StatusCode, String)>,
    pub list_calls: usize,
    pub created: Vec<Value>,
    /// When set, POST handlers wait for a notification before answering.
    pub create_gate: Option<Arc<Notify>>,
}

#[derive(Clone, Default)]
pub struct MockStore {
    pub state: Arc<Mutex<StoreState>>,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spots(self, items: Value) -> Self {
        self.set_list(StatusCode::OK, json!({ "items": items }).to_string());
        self
    }

    pub fn set_list(&self, status: StatusCode, body: String) {
        self.state.lock().unwrap().list_response = Some((status, body));
    }

    pub fn push_create(&self, status: StatusCode, body: Value) {
        self.push_create_raw(status, body.to_string());
    }

    pub fn push_create_raw(&self, status: StatusCode, body: String) {
        self.state
            .lock()
            .unwrap()
            .create_responses
            .push_back((status, body));
    }

    pub fn gate_creates(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().unwrap().create_gate = Some(gate.clone());
        gate
    }

    pub fn created(&self) -> Vec<Value> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    /// Serve the store on an ephemeral port and return its base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/spots", get(list_spots).post(create_spot))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock store");
        let addr = listener.local_addr().expect("mock store addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock store");
        });

        format!("http://{}", addr)
    }
}

async fn list_spots(State(store): State<MockStore>) -> (StatusCode, String) {
    let mut state = store.state.lock().unwrap();
    state.list_calls += 1;
    state
        .list_response
        .clone()
        .unwrap_or_else(|| (StatusCode::OK, json!({ "items": [] }).to_string()))
}

async fn create_spot(
    State(store): State<MockStore>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let gate = {
        let mut state = store.state.lock().unwrap();
        state.created.push(body);
        state.create_gate.clone()
    };

    if let Some(gate) = gate {
        gate.notified().await;
    }

    let mut state = store.state.lock().unwrap();
    let next_id = state.created.len() as u64;
    state
        .create_responses
        .pop_front()
        .unwrap_or_else(|| (StatusCode::CREATED, json!({ "id": next_id }).to_string()))
}

/// A base URL nothing listens on.
#[allow(dead_code)]
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}

// ─── Recording Collaborators ─────────────────────────────────

/// Everything the controller asked the host to do.
#[derive(Default)]
pub struct MapLog {
    pub tools: Option<DrawToolsConfig>,
    pub surface_clears: usize,
    pub view: Option<((f64, f64), u8)>,
    pub features: Vec<(geojson::Geometry, FeatureStyle)>,
    pub popups: Vec<(FeatureHandle, PopupContent)>,
    pub opened: Vec<FeatureHandle>,
    pub fitted: Vec<(geo::Rect<f64>, FitOptions)>,
    pub fail_fit: bool,
    pub notifications: Vec<Notification>,
}

#[allow(dead_code)]
impl MapLog {
    pub fn popup_for(&self, feature: FeatureHandle) -> Option<&PopupContent> {
        self.popups
            .iter()
            .rev()
            .find(|(h, _)| *h == feature)
            .map(|(_, p)| p)
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}

pub type SharedLog = Arc<Mutex<MapLog>>;

pub struct RecordingSurface(pub SharedLog);

impl DrawingSurface for RecordingSurface {
    fn configure(&mut self, tools: &DrawToolsConfig) {
        self.0.lock().unwrap().tools = Some(*tools);
    }

    fn clear(&mut self) {
        self.0.lock().unwrap().surface_clears += 1;
    }
}

pub struct RecordingRenderer(pub SharedLog);

impl MapRenderer for RecordingRenderer {
    fn set_view(&mut self, center: (f64, f64), zoom: u8) {
        self.0.lock().unwrap().view = Some((center, zoom));
    }

    fn add_feature(&mut self, geometry: &geojson::Geometry, style: FeatureStyle) -> FeatureHandle {
        let mut log = self.0.lock().unwrap();
        log.features.push((geometry.clone(), style));
        FeatureHandle(log.features.len() as u64)
    }

    fn bind_popup(&mut self, feature: FeatureHandle, popup: &PopupContent) {
        self.0.lock().unwrap().popups.push((feature, popup.clone()));
    }

    fn open_popup(&mut self, feature: FeatureHandle) {
        self.0.lock().unwrap().opened.push(feature);
    }

    fn close_popup(&mut self, feature: FeatureHandle) {
        self.0.lock().unwrap().opened.retain(|h| *h != feature);
    }

    fn fit_bounds(&mut self, bounds: geo::Rect<f64>, options: FitOptions) -> anyhow::Result<()> {
        let mut log = self.0.lock().unwrap();
        if log.fail_fit {
            anyhow::bail!("map has no size yet");
        }
        log.fitted.push((bounds, options));
        Ok(())
    }
}

pub struct RecordingNotifier(pub SharedLog);

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.0.lock().unwrap().notifications.push(notification);
    }
}

// ─── Builders ────────────────────────────────────────────────

#[allow(dead_code)]
pub fn test_config(base: &str) -> Config {
    Config::default()
        .with_api_base(base)
        .expect("valid base")
        .with_request_timeout(Duration::from_secs(5))
}

/// Build a controller against `config` with recording collaborators.
#[allow(dead_code)]
pub fn controller_with(config: Config, log: SharedLog) -> MapSyncController {
    let repository = SpotRepository::new(&config).expect("http client");
    MapSyncController::new(
        config,
        repository,
        Box::new(RecordingSurface(log.clone())),
        Box::new(RecordingRenderer(log.clone())),
        Box::new(RecordingNotifier(log)),
    )
}

#[allow(dead_code)]
pub fn test_controller(base: &str) -> (MapSyncController, SharedLog) {
    let log = SharedLog::default();
    (controller_with(test_config(base), log.clone()), log)
}

// ─── Geometry Fixtures ───────────────────────────────────────

#[allow(dead_code)]
pub fn point(x: f64, y: f64) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::Point(vec![x, y]))
}

#[allow(dead_code)]
pub fn polygon() -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
        vec![-122.3, 47.5],
        vec![-122.2, 47.5],
        vec![-122.2, 47.6],
        vec![-122.3, 47.5],
    ]]))
}
