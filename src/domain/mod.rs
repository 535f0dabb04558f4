// SPDX-License-Identifier: MPL-2.0
//! Pure domain types for the review panel.
//!
//! Nothing in this tree depends on Iced, reqwest, or any other external
//! service; infrastructure adapters convert to and from these types at the
//! boundary.

pub mod inference;
pub mod review;
pub mod ui;
pub mod viewport;
