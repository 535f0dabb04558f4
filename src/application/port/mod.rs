// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that the host application
//! implements. These traits use only domain types, ensuring the workflow
//! remains independent of any concrete rendering engine or compositor.
//!
//! # Available Ports
//!
//! - [`viewport`]: sampling, frame capture, and re-render notifications for
//!   the active viewport
//! - [`overlay`]: creation and manipulation of the heatmap overlay element
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles, no engine types)
//! - Methods are synchronous; the panel runs single-threaded and the only
//!   suspension points are the network futures spawned by the component
//! - Methods return `Result` with per-port error types

pub mod overlay;
pub mod viewport;

// Re-export main types for convenience
pub use overlay::{OverlayError, OverlaySurface, SurfaceId};
pub use viewport::{CapturedFrame, SubscriptionId, ViewportAccessor, ViewportError};
