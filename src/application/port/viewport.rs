// SPDX-License-Identifier: MPL-2.0
//! Viewport access port definition.
//!
//! The rendering engine owns the base image and its transform; this port is
//! the panel's only window into it. Hosts implement it against their engine;
//! tests implement it with fakes.
//!
//! # Notifications
//!
//! `subscribe` registers interest in the engine's per-element "re-rendered"
//! notification stream. While at least one subscription is active the host
//! forwards each notification to the panel as
//! [`Message::ViewportRendered`](crate::ui::panel::Message::ViewportRendered);
//! the panel never holds a raw listener itself, so releasing the
//! [`SubscriptionId`] is sufficient to guarantee nothing dangles.

use crate::domain::viewport::ViewportSnapshot;
use std::fmt;

// =============================================================================
// ViewportError
// =============================================================================

/// Errors reported by the viewport port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewportError {
    /// No base image/viewport is currently bound.
    Unavailable,

    /// The engine failed to encode the current frame.
    CaptureFailed(String),
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewportError::Unavailable => {
                write!(f, "No image is currently displayed in the viewport.")
            }
            ViewportError::CaptureFailed(msg) => {
                write!(f, "Could not capture the current frame: {msg}")
            }
        }
    }
}

impl std::error::Error for ViewportError {}

// =============================================================================
// SubscriptionId / CapturedFrame
// =============================================================================

/// Token for an active re-render notification subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A rendered snapshot of the current frame plus its identifying context,
/// as handed to the inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    /// PNG-encoded pixels of the frame as currently rendered.
    pub png_data: Vec<u8>,
    /// Study instance UID of the displayed series.
    pub study_instance_uid: String,
}

// =============================================================================
// ViewportAccessor Trait
// =============================================================================

/// Port for reading and observing the active viewport.
pub trait ViewportAccessor {
    /// Reads the current transform and base-image size.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::Unavailable`] if no image is bound.
    fn sample(&self) -> Result<ViewportSnapshot, ViewportError>;

    /// Encodes the currently rendered frame together with its study context.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::Unavailable`] if no image is bound, or
    /// [`ViewportError::CaptureFailed`] if encoding fails.
    fn capture_frame(&self) -> Result<CapturedFrame, ViewportError>;

    /// Registers interest in re-render notifications for the bound element.
    fn subscribe(&mut self) -> SubscriptionId;

    /// Releases a previously issued subscription. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::viewport::ViewportTransform;

    struct MockViewport {
        bound: bool,
        next_subscription: u64,
        active: Vec<SubscriptionId>,
    }

    impl MockViewport {
        fn new(bound: bool) -> Self {
            Self {
                bound,
                next_subscription: 0,
                active: Vec::new(),
            }
        }
    }

    impl ViewportAccessor for MockViewport {
        fn sample(&self) -> Result<ViewportSnapshot, ViewportError> {
            if !self.bound {
                return Err(ViewportError::Unavailable);
            }
            Ok(ViewportSnapshot {
                transform: ViewportTransform::identity(),
                image_width: 256,
                image_height: 256,
            })
        }

        fn capture_frame(&self) -> Result<CapturedFrame, ViewportError> {
            if !self.bound {
                return Err(ViewportError::Unavailable);
            }
            Ok(CapturedFrame {
                png_data: vec![0x89, 0x50, 0x4e, 0x47],
                study_instance_uid: "1.2.3".to_string(),
            })
        }

        fn subscribe(&mut self) -> SubscriptionId {
            self.next_subscription += 1;
            let id = SubscriptionId::new(self.next_subscription);
            self.active.push(id);
            id
        }

        fn unsubscribe(&mut self, id: SubscriptionId) {
            self.active.retain(|active| *active != id);
        }
    }

    #[test]
    fn unbound_viewport_reports_unavailable() {
        let viewport = MockViewport::new(false);
        assert_eq!(viewport.sample().unwrap_err(), ViewportError::Unavailable);
        assert_eq!(
            viewport.capture_frame().unwrap_err(),
            ViewportError::Unavailable
        );
    }

    #[test]
    fn bound_viewport_samples_and_captures() {
        let viewport = MockViewport::new(true);
        let snapshot = viewport.sample().expect("sample");
        assert_eq!(snapshot.image_width, 256);
        let frame = viewport.capture_frame().expect("capture");
        assert_eq!(frame.study_instance_uid, "1.2.3");
    }

    #[test]
    fn subscriptions_are_balanced_by_id() {
        let mut viewport = MockViewport::new(true);
        let first = viewport.subscribe();
        let second = viewport.subscribe();
        assert_ne!(first, second);

        viewport.unsubscribe(first);
        assert_eq!(viewport.active, vec![second]);

        // unknown id is ignored
        viewport.unsubscribe(first);
        assert_eq!(viewport.active, vec![second]);
    }

    #[test]
    fn error_display_is_operator_readable() {
        assert_eq!(
            ViewportError::Unavailable.to_string(),
            "No image is currently displayed in the viewport."
        );
        assert!(ViewportError::CaptureFailed("encoder busy".to_string())
            .to_string()
            .contains("encoder busy"));
    }
}
