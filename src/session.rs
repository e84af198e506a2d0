// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-task event loop around a [`MapSyncController`].
//!
//! UI events arrive on a channel. A submission's request runs alongside the
//! channel so cancel and toolkit events that arrive mid-request are still
//! seen; the controller decides what they mean while `Submitting`.

use crate::controller::{MapSyncController, Submission};
use crate::error::SaveError;
use crate::models::Spot;
use crate::services::{DrawEvent, SpotField};
use futures_util::future::BoxFuture;
use tokio::sync::mpsc;

/// Events from the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Draw(DrawEvent),
    FieldChanged { field: SpotField, value: String },
    Submit,
    Cancel,
}

impl From<DrawEvent> for UiEvent {
    fn from(event: DrawEvent) -> Self {
        UiEvent::Draw(event)
    }
}

struct InFlight {
    submission: Submission,
    request: BoxFuture<'static, Result<Spot, SaveError>>,
}

enum Step {
    Event(Option<UiEvent>),
    Resolved(Result<Spot, SaveError>),
}

/// Mount the controller, then process events until the channel closes.
///
/// A request still in flight when the channel closes is awaited and
/// applied before returning.
pub async fn run(controller: &mut MapSyncController, mut events: mpsc::Receiver<UiEvent>) {
    controller.mount().await;

    let mut in_flight: Option<InFlight> = None;
    let mut closed = false;

    loop {
        let step = match in_flight.as_mut() {
            Some(pending) if closed => Step::Resolved((&mut pending.request).await),
            Some(pending) => tokio::select! {
                event = events.recv() => Step::Event(event),
                result = &mut pending.request => Step::Resolved(result),
            },
            None if closed => break,
            None => Step::Event(events.recv().await),
        };

        match step {
            Step::Resolved(result) => {
                if let Some(done) = in_flight.take() {
                    controller.finish_submit(done.submission, result);
                }
            }
            Step::Event(None) => {
                tracing::debug!("UI event channel closed");
                closed = true;
            }
            Step::Event(Some(event)) => {
                if let Some(submission) = dispatch(controller, event) {
                    let request = controller.submission_request(&submission);
                    in_flight = Some(InFlight {
                        submission,
                        request,
                    });
                }
            }
        }
    }
}

/// Apply one event; returns a submission that needs a request.
fn dispatch(controller: &mut MapSyncController, event: UiEvent) -> Option<Submission> {
    match event {
        UiEvent::Draw(draw) => {
            controller.handle_draw_event(draw);
            None
        }
        UiEvent::FieldChanged { field, value } => {
            if let Err(e) = controller.update_field(field, &value) {
                tracing::debug!(%field, error = %e, "Field update rejected");
            }
            None
        }
        UiEvent::Submit => controller.begin_submit(),
        UiEvent::Cancel => {
            controller.cancel();
            None
        }
    }
}
