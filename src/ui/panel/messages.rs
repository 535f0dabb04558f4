// SPDX-License-Identifier: MPL-2.0
//! Panel message/event types re-exported by the facade.

use crate::domain::inference::{ModelDescriptor, ModelId, PredictionResult};
use crate::domain::review::ReviewStatus;
use crate::infrastructure::http::{PredictionRequest, ReviewRequest, ServiceError};

/// Identifies one prediction invocation.
///
/// Completion messages echo the token they were started with; the state
/// machine only applies the outcome whose token matches the latest issued
/// one, so a superseded request can never overwrite newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PredictionToken(u64);

impl PredictionToken {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }
}

/// Messages handled by the panel.
#[derive(Debug, Clone)]
pub enum Message {
    /// Startup model listing completed.
    ModelsLoaded(Result<Vec<ModelDescriptor>, ServiceError>),
    ModelSelected(ModelId),
    RunPredictionPressed,
    /// A prediction request completed (possibly a superseded one).
    PredictionCompleted {
        token: PredictionToken,
        outcome: Result<PredictionResult, ServiceError>,
    },
    ToggleHeatmapPressed,
    OpacityChanged(f32),
    /// The compositor failed to load the heatmap image.
    HeatmapLoadFailed,
    ReviewStatusSelected(ReviewStatus),
    ReviewCommentsEdited(String),
    SubmitReviewPressed,
    ReviewSubmitted(Result<(), ServiceError>),
    /// Forwarded "re-rendered" notification from the rendering engine.
    ViewportRendered,
}

/// Side effects the state machine asks its wrapper to perform.
#[derive(Debug)]
pub enum Event {
    None,
    /// Start a prediction request for the captured frame.
    PredictionStarted {
        token: PredictionToken,
        request: PredictionRequest,
    },
    /// Start a review submission.
    ReviewSubmissionStarted { request: ReviewRequest },
}
