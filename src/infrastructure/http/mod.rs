// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the inference service.
//!
//! [`InferenceClient`] carries the three operations the panel needs (list
//! models, run a prediction, submit a review) and normalizes every failure
//! into [`ServiceError`] with the most specific message the service provided.
//! Nothing here retries automatically; a retry is an explicit operator
//! action.

mod wire;

use crate::application::port::CapturedFrame;
use crate::config::Config;
use crate::domain::inference::{
    Confidence, HeatmapRef, ModelDescriptor, ModelId, PredictionResult, ReportId, SeverityClass,
};
use crate::domain::review::ReviewStatus;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::fmt;
use std::time::Duration;

// =============================================================================
// ServiceError
// =============================================================================

/// Failures of the inference service, normalized for the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service could not be reached at all.
    Unreachable(String),

    /// The service answered with a non-2xx status. The message is the most
    /// specific text the service provided and is shown to the operator
    /// verbatim.
    Rejected { status: u16, message: String },

    /// The service answered 2xx but the body was not usable.
    InvalidResponse(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Unreachable(msg) => {
                write!(f, "Inference service unreachable: {msg}")
            }
            ServiceError::Rejected { message, .. } => f.write_str(message),
            ServiceError::InvalidResponse(msg) => {
                write!(f, "Malformed service response: {msg}")
            }
        }
    }
}

impl std::error::Error for ServiceError {}

// =============================================================================
// Requests
// =============================================================================

/// Everything needed to run one prediction.
#[derive(Debug, Clone)]
pub struct PredictionRequest {
    pub frame: CapturedFrame,
    pub model: ModelId,
}

/// Everything needed to submit one review.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub report: ReportId,
    pub status: ReviewStatus,
    pub comments: String,
}

// =============================================================================
// InferenceClient
// =============================================================================

/// Async client for the inference service API.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    base_url: String,
}

impl InferenceClient {
    /// Builds a client from the panel configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unreachable`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .user_agent(concat!("NeuroLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.service_base_url().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Fetches the models the service offers.
    ///
    /// # Errors
    ///
    /// Any failure (unreachable service, non-2xx status, undecodable body)
    /// is returned as a [`ServiceError`]; the panel reports it as a
    /// "no models available" condition.
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ServiceError> {
        let response = self
            .http
            .get(self.url("models/"))
            .send()
            .await
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message: wire::ErrorRecord::from_body(&body).prediction_message(status.as_u16()),
            });
        }

        let records: Vec<wire::ModelRecord> = response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        Ok(records
            .into_iter()
            .map(|record| ModelDescriptor {
                id: ModelId::new(record.model_id),
                name: record.model_name,
                version: record.model_version,
            })
            .collect())
    }

    /// Runs one prediction over the captured frame.
    ///
    /// # Errors
    ///
    /// Non-2xx responses carry the most specific message the service
    /// provided (`details`, then `error`, then a generic status line).
    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, ServiceError> {
        let image_data = format!(
            "data:image/png;base64,{}",
            BASE64.encode(&request.frame.png_data)
        );
        let body = wire::PredictBody {
            image_data,
            study_instance_uid: &request.frame.study_instance_uid,
            model_id: request.model.as_str(),
        };

        let response = self
            .http
            .post(self.url("predict-frame/"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message: wire::ErrorRecord::from_body(&body).prediction_message(status.as_u16()),
            });
        }

        let record: wire::PredictionRecord = response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        decode_prediction(record)
    }

    /// Submits the operator's review for a report.
    ///
    /// # Errors
    ///
    /// Non-2xx responses carry the most specific message the service
    /// provided (`detail`, then `error`, then the raw body).
    pub async fn submit_review(&self, request: &ReviewRequest) -> Result<(), ServiceError> {
        let body = wire::ReviewBody {
            report: request.report.as_str(),
            reviewer_status: request.status.wire_name(),
            reviewer_comments: &request.comments,
        };

        let response = self
            .http
            .post(self.url("save-review/"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message: wire::ErrorRecord::from_body(&body)
                    .review_message(status.as_u16(), &body),
            });
        }

        Ok(())
    }
}

fn decode_prediction(record: wire::PredictionRecord) -> Result<PredictionResult, ServiceError> {
    let class_name = record.prediction_result.class_name;
    let class = SeverityClass::from_wire(&class_name).ok_or_else(|| {
        ServiceError::InvalidResponse(format!("unknown severity class '{class_name}'"))
    })?;

    Ok(PredictionResult {
        class,
        confidence: Confidence::new(record.prediction_result.confidence),
        heatmap: record.heatmap_url.map(HeatmapRef::new),
        source_width: record.image_width,
        source_height: record.image_height,
        report_id: record.report_id.map(ReportId::new),
        received_at: chrono::Utc::now(),
    })
}
