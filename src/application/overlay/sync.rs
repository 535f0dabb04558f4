// SPDX-License-Identifier: MPL-2.0
//! Continuous overlay re-alignment against the live viewport.
//!
//! While the overlay is shown, every "re-rendered" notification from the
//! engine triggers a fresh transform sample and a placement update. The
//! subscription is held as a token so that start/stop stay balanced across
//! arbitrary toggle sequences.

use crate::application::overlay::OverlayLifecycle;
use crate::application::port::{SubscriptionId, ViewportAccessor, ViewportError};
use log::warn;

/// Keeps the overlay placed exactly where the base image is drawn.
#[derive(Debug, Default)]
pub struct OverlaySynchronizer {
    subscription: Option<SubscriptionId>,
}

impl OverlaySynchronizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to re-render notifications and applies the initial
    /// placement immediately, since the viewport may already be panned,
    /// zoomed, or flipped when the overlay first appears.
    ///
    /// Already-running synchronizers are left untouched.
    ///
    /// # Errors
    ///
    /// Fails without subscribing if the viewport cannot be sampled.
    pub fn start(
        &mut self,
        viewport: &mut dyn ViewportAccessor,
        overlay: &mut OverlayLifecycle,
    ) -> Result<(), ViewportError> {
        if self.subscription.is_some() {
            return Ok(());
        }
        let snapshot = viewport.sample()?;
        self.subscription = Some(viewport.subscribe());
        overlay.apply(&snapshot.placement());
        Ok(())
    }

    /// Re-samples the transform and re-applies placement. Called once per
    /// forwarded render notification; does nothing while stopped or while the
    /// overlay is hidden.
    ///
    /// A failed sample is skipped rather than surfaced: a one-frame lag is
    /// acceptable, tearing down the overlay mid-interaction is not.
    pub fn realign(&mut self, viewport: &mut dyn ViewportAccessor, overlay: &mut OverlayLifecycle) {
        if self.subscription.is_none() || !overlay.is_visible() {
            return;
        }
        match viewport.sample() {
            Ok(snapshot) => overlay.apply(&snapshot.placement()),
            Err(err) => warn!("skipping overlay re-alignment: {err}"),
        }
    }

    /// Releases the subscription. Safe to call repeatedly; only the first
    /// call after a `start` unsubscribes.
    pub fn stop(&mut self, viewport: &mut dyn ViewportAccessor) {
        if let Some(id) = self.subscription.take() {
            viewport.unsubscribe(id);
        }
    }

    /// Whether a subscription is currently held.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.subscription.is_some()
    }
}
