// SPDX-License-Identifier: MPL-2.0
//! Inference domain types: model descriptors, severity classes, confidence,
//! and prediction results.

use chrono::{DateTime, Utc};
use std::fmt;

// =============================================================================
// ModelId / ModelDescriptor
// =============================================================================

/// Backend-assigned identifier of an AI model. Selection is by id uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId(String);

impl ModelId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An AI model offered by the inference service. Immutable; supplied by the
/// backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: ModelId,
    pub name: String,
    pub version: String,
}

impl fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (v{})", self.name, self.version)
    }
}

// =============================================================================
// SeverityClass
// =============================================================================

/// The closed set of dementia severity categories a model can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityClass {
    NonDementia,
    VeryMildDementia,
    MildDementia,
    ModerateDementia,
}

impl SeverityClass {
    /// All classes in increasing severity order, as listed in the panel.
    pub const ALL: [SeverityClass; 4] = [
        SeverityClass::NonDementia,
        SeverityClass::VeryMildDementia,
        SeverityClass::MildDementia,
        SeverityClass::ModerateDementia,
    ];

    /// Parses the service's wire name for a class.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "Non_Dementia" => Some(SeverityClass::NonDementia),
            "Very_mild_Dementia" => Some(SeverityClass::VeryMildDementia),
            "Mild_Dementia" => Some(SeverityClass::MildDementia),
            "Moderate_Dementia" => Some(SeverityClass::ModerateDementia),
            _ => None,
        }
    }

    /// The service's wire name for this class.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            SeverityClass::NonDementia => "Non_Dementia",
            SeverityClass::VeryMildDementia => "Very_mild_Dementia",
            SeverityClass::MildDementia => "Mild_Dementia",
            SeverityClass::ModerateDementia => "Moderate_Dementia",
        }
    }

    /// Human-readable label shown in the classification list.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            SeverityClass::NonDementia => "Non Dementia",
            SeverityClass::VeryMildDementia => "Very Mild Dementia",
            SeverityClass::MildDementia => "Mild Dementia",
            SeverityClass::ModerateDementia => "Moderate Dementia",
        }
    }
}

impl fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// Confidence
// =============================================================================

/// Model confidence, guaranteed to be within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confidence(f32);

impl Confidence {
    /// Creates a confidence value, clamping to the valid range.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Renders the confidence as a whole-number percent label, e.g. "89%".
    #[must_use]
    pub fn percent_label(self) -> String {
        format!("{:.0}%", self.0 * 100.0)
    }
}

// =============================================================================
// HeatmapRef / ReportId
// =============================================================================

/// URI of a rendered heatmap image served by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapRef(String);

impl HeatmapRef {
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Server-assigned handle correlating a prediction with review submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportId(String);

impl ReportId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// PredictionResult
// =============================================================================

/// The outcome of one successful inference call.
///
/// Immutable once created; a new prediction supersedes (never mutates) the
/// previous one. `source_width`/`source_height` record the base image size
/// the backend saw at inference time: advisory context only, never used for
/// overlay alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub class: SeverityClass,
    pub confidence: Confidence,
    pub heatmap: Option<HeatmapRef>,
    pub source_width: u32,
    pub source_height: u32,
    pub report_id: Option<ReportId>,
    pub received_at: DateTime<Utc>,
}

impl PredictionResult {
    /// Whether this result can still be reviewed (the backend issued a report
    /// handle for it).
    #[must_use]
    pub fn is_reviewable(&self) -> bool {
        self.report_id.is_some()
    }
}
