// SPDX-License-Identifier: MPL-2.0
//! Overlay surface port definition.
//!
//! The compositor owns the actual visual element stacked above the base
//! image; this port exposes just enough of it to create, place, fade, and
//! remove a single heatmap layer. Image loading is asynchronous on the host
//! side; a load failure comes back to the panel as
//! [`Message::HeatmapLoadFailed`](crate::ui::panel::Message::HeatmapLoadFailed).

use crate::domain::inference::HeatmapRef;
use crate::domain::ui::OpacityPercent;
use crate::domain::viewport::OverlayPlacement;
use std::fmt;

// =============================================================================
// OverlayError
// =============================================================================

/// Errors reported by the overlay surface port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// An overlay element already exists; it must be destroyed first.
    AlreadyAttached,

    /// The compositor could not create the element.
    AttachFailed(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::AlreadyAttached => {
                write!(f, "A heatmap overlay is already attached.")
            }
            OverlayError::AttachFailed(msg) => {
                write!(f, "Could not attach the heatmap overlay: {msg}")
            }
        }
    }
}

impl std::error::Error for OverlayError {}

// =============================================================================
// SurfaceId
// =============================================================================

/// Token for a live overlay element owned by the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

// =============================================================================
// OverlaySurface Trait
// =============================================================================

/// Port for the compositor that renders the heatmap layer.
pub trait OverlaySurface {
    /// Creates a new overlay element displaying `image` at the given opacity.
    ///
    /// The element starts at its natural size at the image origin; placement
    /// follows via [`OverlaySurface::set_placement`].
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::AttachFailed`] if the compositor cannot create
    /// the element.
    fn attach(
        &mut self,
        image: &HeatmapRef,
        opacity: OpacityPercent,
    ) -> Result<SurfaceId, OverlayError>;

    /// Updates the element's opacity. Unknown ids are ignored.
    fn set_opacity(&mut self, id: SurfaceId, opacity: OpacityPercent);

    /// Moves the element to the given placement. Unknown ids are ignored.
    fn set_placement(&mut self, id: SurfaceId, placement: &OverlayPlacement);

    /// Removes the element. Unknown ids are ignored.
    fn remove(&mut self, id: SurfaceId);
}
