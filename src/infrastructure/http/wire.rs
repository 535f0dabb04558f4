// SPDX-License-Identifier: MPL-2.0
//! Wire-format types for the inference service API.
//!
//! Field names mirror the service's JSON exactly; conversion into domain
//! types (and rejection of malformed payloads) happens in the client.

use serde::{Deserialize, Serialize};

// =============================================================================
// Responses
// =============================================================================

/// One entry of `GET /models/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelRecord {
    pub model_id: String,
    pub model_name: String,
    pub model_version: String,
}

/// The classification part of a `POST /predict-frame/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationRecord {
    pub class_name: String,
    #[serde(default)]
    pub confidence: f32,
}

/// Full `POST /predict-frame/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRecord {
    pub prediction_result: ClassificationRecord,
    #[serde(default)]
    pub heatmap_url: Option<String>,
    #[serde(default)]
    pub image_width: u32,
    #[serde(default)]
    pub image_height: u32,
    #[serde(default)]
    pub report_id: Option<String>,
}

/// Error body attached to non-2xx responses. The service is inconsistent
/// about the field it uses, so all known spellings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorRecord {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorRecord {
    /// Parses an error body, tolerating non-JSON payloads.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Most specific message for a failed prediction:
    /// `details`, then `error`, then a generic status line.
    #[must_use]
    pub fn prediction_message(&self, status: u16) -> String {
        self.details
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| format!("Server responded with {status}"))
    }

    /// Most specific message for a failed review submission:
    /// `detail`, then `error`, then the raw body, then a generic status line.
    #[must_use]
    pub fn review_message(&self, status: u16, body: &str) -> String {
        self.detail
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("Server responded with {status}")
                } else {
                    trimmed.to_string()
                }
            })
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /predict-frame/`.
#[derive(Debug, Serialize)]
pub struct PredictBody<'a> {
    /// PNG data URL of the rendered frame.
    #[serde(rename = "imageData")]
    pub image_data: String,
    #[serde(rename = "studyInstanceUID")]
    pub study_instance_uid: &'a str,
    #[serde(rename = "modelId")]
    pub model_id: &'a str,
}

/// Body of `POST /save-review/`.
#[derive(Debug, Serialize)]
pub struct ReviewBody<'a> {
    pub report: &'a str,
    pub reviewer_status: &'static str,
    pub reviewer_comments: &'a str,
}
