// SPDX-License-Identifier: MPL-2.0
//! `neurolens` is an embeddable operator panel for AI-assisted review of
//! medical images, built with the Iced GUI toolkit.
//!
//! The panel lets an operator request an inference over the currently
//! displayed image, shows the returned classification and confidence, keeps
//! the result's heatmap overlay pixel-registered to a freely panned, zoomed,
//! and flipped viewport owned by an external rendering engine, and records a
//! structured human review of the result.
//!
//! The rendering engine and the overlay compositor are reached exclusively
//! through the capability traits in [`application::port`], so the whole
//! workflow is testable against fakes. The inference backend is reached over
//! HTTP via [`infrastructure::http::InferenceClient`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

#[cfg(test)]
mod test_utils;
