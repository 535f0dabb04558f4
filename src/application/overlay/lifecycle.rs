// SPDX-License-Identifier: MPL-2.0
//! Ownership of the single live heatmap overlay element.
//!
//! Exactly one overlay element may exist at a time, and only this manager may
//! create or destroy it. The handle is held as state, never rediscovered by
//! scanning the environment.

use crate::application::port::{OverlayError, OverlaySurface, SurfaceId};
use crate::domain::inference::HeatmapRef;
use crate::domain::ui::OpacityPercent;
use crate::domain::viewport::OverlayPlacement;

/// Ownership token for the live overlay element.
#[derive(Debug, Clone, Copy)]
struct OverlayHandle {
    surface: SurfaceId,
    visible: bool,
}

/// Creates, places, fades, and removes the one heatmap overlay.
pub struct OverlayLifecycle {
    surface: Box<dyn OverlaySurface>,
    handle: Option<OverlayHandle>,
}

impl OverlayLifecycle {
    #[must_use]
    pub fn new(surface: Box<dyn OverlaySurface>) -> Self {
        Self {
            surface,
            handle: None,
        }
    }

    /// Creates the overlay element for `image` at the given opacity.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::AlreadyAttached`] if a handle is live (callers
    /// must [`destroy`](Self::destroy) first), or the compositor's failure.
    pub fn attach(
        &mut self,
        image: &HeatmapRef,
        opacity: OpacityPercent,
    ) -> Result<(), OverlayError> {
        if self.handle.is_some() {
            return Err(OverlayError::AlreadyAttached);
        }
        let surface = self.surface.attach(image, opacity)?;
        self.handle = Some(OverlayHandle {
            surface,
            visible: true,
        });
        Ok(())
    }

    /// Removes the overlay element and invalidates the handle.
    /// No-op when no handle exists.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.surface.remove(handle.surface);
        }
    }

    /// Applies an opacity to the live element, if any.
    pub fn set_opacity(&mut self, opacity: OpacityPercent) {
        if let Some(handle) = &self.handle {
            self.surface.set_opacity(handle.surface, opacity);
        }
    }

    /// Moves the live element, if any, to the given placement.
    pub fn apply(&mut self, placement: &OverlayPlacement) {
        if let Some(handle) = &self.handle {
            self.surface.set_placement(handle.surface, placement);
        }
    }

    /// Marks the element as not visible while keeping it structurally
    /// attached (the heatmap-load-failure path).
    pub fn mark_not_visible(&mut self) {
        if let Some(handle) = &mut self.handle {
            handle.visible = false;
        }
    }

    /// Whether an overlay element currently exists.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether an overlay element exists and is shown to the operator.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.handle.is_some_and(|handle| handle.visible)
    }
}

impl std::fmt::Debug for OverlayLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayLifecycle")
            .field("handle", &self.handle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct SurfaceLog {
        next_id: u64,
        live: Vec<SurfaceId>,
        opacities: Vec<f32>,
        removals: u32,
    }

    struct SharedSurface(Rc<RefCell<SurfaceLog>>);

    impl OverlaySurface for SharedSurface {
        fn attach(
            &mut self,
            _image: &HeatmapRef,
            opacity: OpacityPercent,
        ) -> Result<SurfaceId, OverlayError> {
            let mut log = self.0.borrow_mut();
            log.next_id += 1;
            let id = SurfaceId::new(log.next_id);
            log.live.push(id);
            log.opacities.push(opacity.value());
            Ok(id)
        }

        fn set_opacity(&mut self, _id: SurfaceId, opacity: OpacityPercent) {
            self.0.borrow_mut().opacities.push(opacity.value());
        }

        fn set_placement(&mut self, _id: SurfaceId, _placement: &OverlayPlacement) {}

        fn remove(&mut self, id: SurfaceId) {
            let mut log = self.0.borrow_mut();
            log.live.retain(|live| *live != id);
            log.removals += 1;
        }
    }

    fn lifecycle() -> (OverlayLifecycle, Rc<RefCell<SurfaceLog>>) {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let lifecycle = OverlayLifecycle::new(Box::new(SharedSurface(log.clone())));
        (lifecycle, log)
    }

    fn heatmap() -> HeatmapRef {
        HeatmapRef::new("http://backend/media/heatmaps/42.png")
    }

    #[test]
    fn attach_rejects_second_overlay() {
        let (mut lifecycle, log) = lifecycle();
        lifecycle
            .attach(&heatmap(), OpacityPercent::new(50.0))
            .expect("first attach");
        let err = lifecycle
            .attach(&heatmap(), OpacityPercent::new(50.0))
            .unwrap_err();
        assert_eq!(err, OverlayError::AlreadyAttached);
        assert_eq!(log.borrow().live.len(), 1);
    }

    #[test]
    fn destroy_removes_element_and_is_idempotent() {
        let (mut lifecycle, log) = lifecycle();
        lifecycle
            .attach(&heatmap(), OpacityPercent::new(50.0))
            .expect("attach");
        lifecycle.destroy();
        assert!(!lifecycle.is_attached());
        assert!(log.borrow().live.is_empty());

        lifecycle.destroy();
        assert_eq!(log.borrow().removals, 1);
    }

    #[test]
    fn destroy_then_attach_creates_fresh_element() {
        let (mut lifecycle, log) = lifecycle();
        lifecycle
            .attach(&heatmap(), OpacityPercent::new(50.0))
            .expect("attach");
        lifecycle.destroy();
        lifecycle
            .attach(&heatmap(), OpacityPercent::new(50.0))
            .expect("re-attach");
        assert_eq!(log.borrow().live.len(), 1);
        assert_eq!(log.borrow().next_id, 2);
    }

    #[test]
    fn set_opacity_reaches_live_element_only() {
        let (mut lifecycle, log) = lifecycle();
        lifecycle.set_opacity(OpacityPercent::new(30.0));
        assert!(log.borrow().opacities.is_empty());

        lifecycle
            .attach(&heatmap(), OpacityPercent::new(50.0))
            .expect("attach");
        lifecycle.set_opacity(OpacityPercent::new(30.0));
        assert_eq!(log.borrow().opacities, vec![50.0, 30.0]);
    }

    #[test]
    fn load_failure_leaves_handle_attached_but_hidden() {
        let (mut lifecycle, _log) = lifecycle();
        lifecycle
            .attach(&heatmap(), OpacityPercent::new(50.0))
            .expect("attach");
        assert!(lifecycle.is_visible());

        lifecycle.mark_not_visible();
        assert!(lifecycle.is_attached());
        assert!(!lifecycle.is_visible());
    }
}
