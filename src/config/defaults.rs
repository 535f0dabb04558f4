// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the panel. Constants are organized by category.

// ==========================================================================
// Inference Service Defaults
// ==========================================================================

/// Default base URL of the inference service API.
pub const DEFAULT_SERVICE_BASE_URL: &str = "http://localhost:8000/api/ai";

/// Default timeout for a single service request (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ==========================================================================
// Heatmap Overlay Defaults
// ==========================================================================

/// Default heatmap overlay opacity when a result is first shown.
pub const DEFAULT_HEATMAP_OPACITY_PERCENT: f32 = 50.0;
