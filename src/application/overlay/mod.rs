// SPDX-License-Identifier: MPL-2.0
//! Heatmap overlay services: single-handle lifecycle ownership and continuous
//! re-alignment against the live viewport transform.

mod lifecycle;
mod sync;

pub use lifecycle::OverlayLifecycle;
pub use sync::OverlaySynchronizer;
