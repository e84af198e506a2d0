// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map sync controller.
//!
//! Orchestrates the draw-capture-submit workflow:
//! 1. On mount, load persisted spots and render them with popups
//! 2. On a finalized shape, open the form for it
//! 3. On submit, validate the draft and send it to the store
//! 4. On success, render the saved spot and clear the draft; on failure,
//!    keep the draft and geometry so the user can retry
//!
//! Toolkit edit/delete sessions only hide and restore the form; the toolkit
//! mutates shapes itself.

use crate::config::Config;
use crate::error::{FetchError, FormError, SaveError};
use crate::models::{NewSpot, Spot, SpotBounds};
use crate::services::{
    DraftSpot, DrawEvent, DrawingSurface, FeatureHandle, FeatureStyle, GeometryCapture,
    MapRenderer, Notification, Notifier, PopupContent, ShapeHandle, SpotField, SpotFormState,
    SpotRepository,
};
use futures_util::future::BoxFuture;

/// Workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No form shown
    Idle,
    /// Form shown for the current geometry
    Drafting,
    /// Form disabled while `create` is in flight
    Submitting,
}

/// A toolkit-native interaction in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolkitSession {
    Editing,
    Deleting,
}

/// Association between a map shape and what it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureBinding {
    /// The pending, editable shape
    Draft(ShapeHandle),
    /// A display-only persisted spot
    Persisted { spot_id: u64, feature: FeatureHandle },
}

/// A rendered persisted spot.
#[derive(Debug, Clone)]
pub struct PersistedFeature {
    pub spot: Spot,
    pub feature: FeatureHandle,
}

/// A validated submission waiting on the store.
#[derive(Debug, Clone)]
pub struct Submission {
    pub new_spot: NewSpot,
    pub shape: ShapeHandle,
}

/// Drives capture, form and repository from UI events.
pub struct MapSyncController {
    config: Config,
    repository: SpotRepository,
    capture: GeometryCapture,
    form: SpotFormState,
    renderer: Box<dyn MapRenderer + Send>,
    notifier: Box<dyn Notifier + Send>,
    state: ControllerState,
    session: Option<ToolkitSession>,
    current: Option<ShapeHandle>,
    persisted: Vec<PersistedFeature>,
    open_popup: Option<FeatureHandle>,
    cancel_requested: bool,
    mounted: bool,
}

impl MapSyncController {
    pub fn new(
        config: Config,
        repository: SpotRepository,
        surface: Box<dyn DrawingSurface + Send>,
        renderer: Box<dyn MapRenderer + Send>,
        notifier: Box<dyn Notifier + Send>,
    ) -> Self {
        let capture = GeometryCapture::new(surface, &config.draw_tools);
        Self {
            config,
            repository,
            capture,
            form: SpotFormState::new(),
            renderer,
            notifier,
            state: ControllerState::Idle,
            session: None,
            current: None,
            persisted: Vec::new(),
            open_popup: None,
            cancel_requested: false,
            mounted: false,
        }
    }

    // ─── Mount ───────────────────────────────────────────────────

    /// Set the initial view and load persisted spots. Runs once.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        let view = &self.config.map;
        self.renderer.set_view(view.center, view.zoom);

        let result = self.repository.list_all().await;
        self.load_spots(result);
    }

    /// Render the result of a spot list request.
    fn load_spots(&mut self, result: Result<Vec<Spot>, FetchError>) {
        let spots = match result {
            Ok(spots) => spots,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load spots");
                self.notifier.notify(Notification::destructive(
                    "Failed to load spots",
                    "Could not load existing scenic spots from the server.",
                ));
                return;
            }
        };

        for spot in spots {
            let feature = self
                .renderer
                .add_feature(&spot.geometry, FeatureStyle::Persisted);
            self.renderer
                .bind_popup(feature, &PopupContent::for_loaded(&spot));
            self.persisted.push(PersistedFeature { spot, feature });
        }

        if self.persisted.is_empty() {
            return;
        }

        let bounds: SpotBounds = self.persisted.iter().map(|p| &p.spot.geometry).collect();
        let Some(rect) = bounds.rect() else {
            return;
        };
        if let Err(e) = self.renderer.fit_bounds(rect, self.config.map.fit) {
            tracing::debug!(error = %e, "Ignoring framing failure");
        }
    }

    // ─── Toolkit Events ──────────────────────────────────────────

    /// React to an event from the drawing toolkit.
    pub fn handle_draw_event(&mut self, event: DrawEvent) {
        match event {
            DrawEvent::ShapeFinalized(geometry) => self.on_shape_finalized(geometry),
            DrawEvent::ShapeEdited { handle, geometry } => {
                if let Err(e) = self.capture.edit_shape(handle, geometry) {
                    tracing::warn!(%handle, error = %e, "Ignoring shape edit");
                }
            }
            DrawEvent::ShapesDeleted(handles) => {
                self.capture.remove_shapes(&handles);
                if self.state != ControllerState::Submitting {
                    self.repoint_current();
                }
            }
            DrawEvent::EditSessionStart => self.open_session(ToolkitSession::Editing),
            DrawEvent::DeleteSessionStart => self.open_session(ToolkitSession::Deleting),
            DrawEvent::EditSessionEnd | DrawEvent::DeleteSessionEnd => self.close_session(),
        }
    }

    fn on_shape_finalized(&mut self, geometry: geojson::Geometry) {
        let handle = match self.capture.finalize_shape(geometry) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected drawn shape");
                self.notifier
                    .notify(Notification::destructive("Unsupported Shape", e.to_string()));
                return;
            }
        };

        // The in-flight submission already holds its geometry.
        if self.state == ControllerState::Submitting {
            tracing::debug!(%handle, "Shape drawn during submission");
            return;
        }

        self.current = Some(handle);
        self.state = ControllerState::Drafting;
    }

    fn open_session(&mut self, session: ToolkitSession) {
        self.session = Some(session);
        if self.state == ControllerState::Drafting {
            self.state = ControllerState::Idle;
        }
        tracing::debug!(?session, state = ?self.state, "Toolkit session started");
    }

    fn close_session(&mut self) {
        let session = self.session.take();
        if self.state == ControllerState::Idle && !self.capture.is_empty() {
            self.repoint_current();
            self.state = ControllerState::Drafting;
        }
        tracing::debug!(?session, state = ?self.state, "Toolkit session ended");
    }

    /// Fall back to the most recent shape if the current one was deleted.
    fn repoint_current(&mut self) {
        if !self.current.is_some_and(|h| self.capture.contains(h)) {
            self.current = self.capture.latest();
        }
    }

    // ─── Form ────────────────────────────────────────────────────

    /// Set one draft field. Rejected while a submission is in flight.
    pub fn update_field(&mut self, field: SpotField, value: &str) -> Result<(), FormError> {
        if self.state == ControllerState::Submitting {
            return Err(FormError::Locked);
        }
        self.form.update(field, value)
    }

    /// Validate the draft and move to `Submitting`.
    ///
    /// Returns `None` (and changes nothing) when already submitting, when
    /// the form is not open, when there is no current geometry, or when
    /// validation fails. A validation failure notifies the user.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        match self.state {
            ControllerState::Submitting => {
                tracing::debug!("Submit ignored, request already in flight");
                return None;
            }
            ControllerState::Idle => return None,
            ControllerState::Drafting => {}
        }

        let shape = self.current?;
        let Some(geometry) = self.capture.export(shape) else {
            tracing::warn!(%shape, "Current shape missing from collection");
            return None;
        };

        let new_spot = match self.form.to_new_spot(geometry) {
            Ok(new_spot) => new_spot,
            Err(e) => {
                tracing::debug!(missing = ?e.missing, "Draft incomplete");
                self.notifier.notify(Notification::destructive(
                    "Missing Information",
                    "Please fill in all required fields.",
                ));
                return None;
            }
        };

        self.state = ControllerState::Submitting;
        Some(Submission { new_spot, shape })
    }

    /// Request future for a submission, detached from the controller.
    pub fn submission_request(
        &self,
        submission: &Submission,
    ) -> BoxFuture<'static, Result<Spot, SaveError>> {
        let repository = self.repository.clone();
        let new_spot = submission.new_spot.clone();
        Box::pin(async move { repository.create(&new_spot).await })
    }

    /// Apply the store's answer to a submission.
    pub fn finish_submit(&mut self, submission: Submission, result: Result<Spot, SaveError>) {
        match result {
            Ok(spot) => {
                let feature = self
                    .renderer
                    .add_feature(&spot.geometry, FeatureStyle::JustSaved);
                self.renderer
                    .bind_popup(feature, &PopupContent::for_saved(&spot));
                // Only the most recently saved spot keeps its popup open.
                if let Some(previous) = self.open_popup.replace(feature) {
                    self.renderer.close_popup(previous);
                }
                self.renderer.open_popup(feature);
                tracing::info!(spot_id = spot.id, shape = %submission.shape, "Spot bound to map");
                self.persisted.push(PersistedFeature { spot, feature });

                self.clear_draft();
                self.notifier.notify(Notification::info(
                    "Location Saved!",
                    "Your scenic spot has been saved successfully.",
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Spot submission failed");
                self.notifier
                    .notify(Notification::destructive("Save Failed", e.user_message()));

                if self.cancel_requested {
                    self.clear_draft();
                } else {
                    self.repoint_current();
                    self.state = if self.current.is_some() {
                        ControllerState::Drafting
                    } else {
                        ControllerState::Idle
                    };
                }
            }
        }
        self.cancel_requested = false;
    }

    /// Validate, submit and apply the result in one step.
    pub async fn submit(&mut self) {
        let Some(submission) = self.begin_submit() else {
            return;
        };
        let result = self.repository.create(&submission.new_spot).await;
        self.finish_submit(submission, result);
    }

    /// Discard the draft and every editable shape.
    ///
    /// While a submission is in flight the cancel is deferred until it
    /// resolves.
    pub fn cancel(&mut self) {
        if self.state == ControllerState::Submitting {
            tracing::debug!("Cancel deferred until submission resolves");
            self.cancel_requested = true;
            return;
        }
        self.clear_draft();
    }

    fn clear_draft(&mut self) {
        self.form.reset();
        self.capture.clear();
        self.current = None;
        self.state = ControllerState::Idle;
    }

    // ─── Accessors ───────────────────────────────────────────────

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn toolkit_session(&self) -> Option<ToolkitSession> {
        self.session
    }

    /// The form is shown while drafting or submitting, unless a toolkit
    /// session is open.
    pub fn form_visible(&self) -> bool {
        self.session.is_none()
            && matches!(
                self.state,
                ControllerState::Drafting | ControllerState::Submitting
            )
    }

    /// The form accepts input only while drafting.
    pub fn form_enabled(&self) -> bool {
        self.form_visible() && self.state == ControllerState::Drafting
    }

    pub fn draft(&self) -> &DraftSpot {
        self.form.draft()
    }

    pub fn current_shape(&self) -> Option<ShapeHandle> {
        self.current
    }

    /// GeoJSON of the current shape, if there is one.
    pub fn export_current_geometry(&self) -> Option<geojson::Geometry> {
        self.current.and_then(|h| self.capture.export(h))
    }

    pub fn capture(&self) -> &GeometryCapture {
        &self.capture
    }

    pub fn persisted_features(&self) -> &[PersistedFeature] {
        &self.persisted
    }

    /// Every shape binding: the draft (if any) followed by persisted spots.
    pub fn bindings(&self) -> Vec<FeatureBinding> {
        self.current
            .map(FeatureBinding::Draft)
            .into_iter()
            .chain(self.persisted.iter().map(|p| FeatureBinding::Persisted {
                spot_id: p.spot.id,
                feature: p.feature,
            }))
            .collect()
    }

    pub fn cancel_pending(&self) -> bool {
        self.cancel_requested
    }
}
