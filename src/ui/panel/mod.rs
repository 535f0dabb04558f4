// SPDX-License-Identifier: MPL-2.0
//! AI diagnosis panel.
//!
//! This module follows a "state down, messages up" pattern: [`State`] is the
//! workflow state machine, updated synchronously by messages and answering
//! with an [`Event`] when a network operation must be started. The [`Panel`]
//! facade maps events onto `iced::Task`s running on the
//! [`InferenceClient`](crate::infrastructure::http::InferenceClient).
//!
//! The rendering engine and the overlay compositor are reached only through
//! the injected [`ViewportAccessor`] and [`OverlaySurface`] ports, so the
//! entire workflow is drivable in tests with fakes.

mod component;
mod messages;
mod view;


pub use component::Panel;
pub use messages::{Event, Message, PredictionToken};

use crate::application::overlay::{OverlayLifecycle, OverlaySynchronizer};
use crate::application::port::{OverlaySurface, ViewportAccessor};
use crate::domain::inference::{ModelDescriptor, ModelId, PredictionResult};
use crate::domain::review::{ReviewDraft, ReviewStatus};
use crate::domain::ui::OpacityPercent;
use crate::infrastructure::http::{PredictionRequest, ReviewRequest, ServiceError};
use log::debug;

/// Where the workflow currently stands.
///
/// `Failed` is recoverable: the operator may retry the prediction or, while a
/// reviewable result is still present, retry the submission. There is no
/// terminal phase; the panel lives until the host discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Predicting,
    Resulted,
    Reviewing,
    Submitting,
    Failed,
}

/// Workflow state machine of the panel.
pub struct State {
    viewport: Box<dyn ViewportAccessor>,
    overlay: OverlayLifecycle,
    synchronizer: OverlaySynchronizer,
    phase: Phase,
    models: Vec<ModelDescriptor>,
    selected_model: Option<ModelId>,
    result: Option<PredictionResult>,
    draft: ReviewDraft,
    opacity: OpacityPercent,
    last_error: Option<String>,
    notice: Option<String>,
    issued_tokens: u64,
    active_token: Option<PredictionToken>,
}

impl State {
    /// Creates the panel state over the host-provided ports.
    #[must_use]
    pub fn new(
        viewport: Box<dyn ViewportAccessor>,
        surface: Box<dyn OverlaySurface>,
        initial_opacity: OpacityPercent,
    ) -> Self {
        Self {
            viewport,
            overlay: OverlayLifecycle::new(surface),
            synchronizer: OverlaySynchronizer::new(),
            phase: Phase::Idle,
            models: Vec::new(),
            selected_model: None,
            result: None,
            draft: ReviewDraft::default(),
            opacity: initial_opacity,
            last_error: None,
            notice: None,
            issued_tokens: 0,
            active_token: None,
        }
    }

    /// Update the state and emit an [`Event`] for the wrapper when needed.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::ModelsLoaded(outcome) => self.handle_models_loaded(outcome),
            Message::ModelSelected(id) => {
                self.selected_model = Some(id);
                Event::None
            }
            Message::RunPredictionPressed => self.handle_run_prediction(),
            Message::PredictionCompleted { token, outcome } => {
                self.handle_prediction_completed(token, outcome)
            }
            Message::ToggleHeatmapPressed => self.handle_toggle_heatmap(),
            Message::OpacityChanged(percent) => {
                self.opacity = OpacityPercent::new(percent);
                self.overlay.set_opacity(self.opacity);
                Event::None
            }
            Message::HeatmapLoadFailed => self.handle_heatmap_load_failed(),
            Message::ReviewStatusSelected(status) => self.handle_review_status(status),
            Message::ReviewCommentsEdited(comments) => self.handle_review_comments(comments),
            Message::SubmitReviewPressed => self.handle_submit_review(),
            Message::ReviewSubmitted(outcome) => self.handle_review_submitted(outcome),
            Message::ViewportRendered => {
                self.synchronizer
                    .realign(self.viewport.as_mut(), &mut self.overlay);
                Event::None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Message handlers
    // -------------------------------------------------------------------------

    fn handle_models_loaded(
        &mut self,
        outcome: Result<Vec<ModelDescriptor>, ServiceError>,
    ) -> Event {
        match outcome {
            Ok(models) => {
                if models.is_empty() {
                    self.last_error = Some("No models available.".to_string());
                }
                let selection_still_valid = self
                    .selected_model
                    .as_ref()
                    .is_some_and(|selected| models.iter().any(|m| &m.id == selected));
                if !selection_still_valid {
                    self.selected_model = models.first().map(|m| m.id.clone());
                }
                self.models = models;
            }
            Err(err) => {
                self.models.clear();
                self.selected_model = None;
                self.last_error = Some(format!("Could not load models: {err}"));
            }
        }
        Event::None
    }

    fn handle_run_prediction(&mut self) -> Event {
        if self.request_in_flight() {
            return Event::None;
        }
        let Some(model) = self.selected_model.clone() else {
            self.last_error = Some("Please select an AI model.".to_string());
            return Event::None;
        };

        // Capture before touching any state: an unavailable viewport must
        // leave the current result and overlay exactly as they were.
        let frame = match self.viewport.capture_frame() {
            Ok(frame) => frame,
            Err(err) => {
                self.last_error = Some(err.to_string());
                return Event::None;
            }
        };

        self.hide_overlay();
        self.result = None;
        self.draft.reset();
        self.last_error = None;
        self.notice = None;

        self.issued_tokens += 1;
        let token = PredictionToken::new(self.issued_tokens);
        self.active_token = Some(token);
        self.phase = Phase::Predicting;

        Event::PredictionStarted {
            token,
            request: PredictionRequest { frame, model },
        }
    }

    fn handle_prediction_completed(
        &mut self,
        token: PredictionToken,
        outcome: Result<PredictionResult, ServiceError>,
    ) -> Event {
        if self.active_token != Some(token) {
            debug!("dropping prediction response for superseded request");
            return Event::None;
        }
        self.active_token = None;

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.last_error = None;
                self.phase = Phase::Resulted;
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                self.phase = Phase::Failed;
            }
        }
        Event::None
    }

    fn handle_toggle_heatmap(&mut self) -> Event {
        if !matches!(self.phase, Phase::Resulted | Phase::Reviewing) {
            return Event::None;
        }

        if self.overlay.is_attached() {
            self.hide_overlay();
            return Event::None;
        }

        let Some(heatmap) = self.result.as_ref().and_then(|r| r.heatmap.clone()) else {
            self.last_error = Some("No heatmap available.".to_string());
            return Event::None;
        };

        if let Err(err) = self.overlay.attach(&heatmap, self.opacity) {
            self.last_error = Some(err.to_string());
            return Event::None;
        }
        if let Err(err) = self
            .synchronizer
            .start(self.viewport.as_mut(), &mut self.overlay)
        {
            self.overlay.destroy();
            self.last_error = Some(err.to_string());
            return Event::None;
        }

        self.last_error = None;
        Event::None
    }

    fn handle_heatmap_load_failed(&mut self) -> Event {
        if self.overlay.is_attached() {
            self.synchronizer.stop(self.viewport.as_mut());
            self.overlay.mark_not_visible();
        }
        self.last_error = Some("Failed to load heatmap image.".to_string());
        Event::None
    }

    fn handle_review_status(&mut self, status: ReviewStatus) -> Event {
        if !self.can_edit_review() {
            return Event::None;
        }
        self.draft.status = Some(status);
        if self.phase == Phase::Resulted {
            self.phase = Phase::Reviewing;
        }
        Event::None
    }

    fn handle_review_comments(&mut self, comments: String) -> Event {
        if !self.can_edit_review() {
            return Event::None;
        }
        self.draft.comments = comments;
        if self.phase == Phase::Resulted {
            self.phase = Phase::Reviewing;
        }
        Event::None
    }

    fn handle_submit_review(&mut self) -> Event {
        if self.request_in_flight() {
            return Event::None;
        }
        let Some(status) = self.draft.status else {
            self.last_error = Some("Please select a review status.".to_string());
            return Event::None;
        };
        let Some(report) = self.result.as_ref().and_then(|r| r.report_id.clone()) else {
            self.last_error = Some("No report available to review.".to_string());
            return Event::None;
        };

        self.last_error = None;
        self.notice = None;
        self.phase = Phase::Submitting;

        Event::ReviewSubmissionStarted {
            request: ReviewRequest {
                report,
                status,
                comments: self.draft.comments.clone(),
            },
        }
    }

    fn handle_review_submitted(&mut self, outcome: Result<(), ServiceError>) -> Event {
        if self.phase != Phase::Submitting {
            return Event::None;
        }
        match outcome {
            Ok(()) => {
                self.draft.reset();
                self.last_error = None;
                self.notice = Some("Review submitted.".to_string());
                self.phase = Phase::Resulted;
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                self.phase = Phase::Failed;
            }
        }
        Event::None
    }

    // -------------------------------------------------------------------------
    // Helpers & accessors
    // -------------------------------------------------------------------------

    fn hide_overlay(&mut self) {
        self.synchronizer.stop(self.viewport.as_mut());
        self.overlay.destroy();
    }

    fn request_in_flight(&self) -> bool {
        matches!(self.phase, Phase::Predicting | Phase::Submitting)
    }

    fn can_edit_review(&self) -> bool {
        match self.phase {
            Phase::Resulted | Phase::Reviewing => true,
            Phase::Failed => self.result.as_ref().is_some_and(|r| r.is_reviewable()),
            _ => false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    #[must_use]
    pub fn selected_model(&self) -> Option<&ModelId> {
        self.selected_model.as_ref()
    }

    /// Descriptor of the currently selected model, if it is still listed.
    #[must_use]
    pub fn selected_descriptor(&self) -> Option<&ModelDescriptor> {
        let selected = self.selected_model.as_ref()?;
        self.models.iter().find(|m| &m.id == selected)
    }

    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    #[must_use]
    pub fn opacity(&self) -> OpacityPercent {
        self.opacity
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether an overlay element currently exists (shown or load-failed).
    #[must_use]
    pub fn overlay_attached(&self) -> bool {
        self.overlay.is_attached()
    }

    /// Whether the heatmap is currently shown to the operator.
    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.overlay.is_visible()
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("phase", &self.phase)
            .field("models", &self.models.len())
            .field("selected_model", &self.selected_model)
            .field("result", &self.result)
            .field("draft", &self.draft)
            .field("last_error", &self.last_error)
            .finish()
    }
}
