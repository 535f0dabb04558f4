// SPDX-License-Identifier: MPL-2.0
//! Application layer: capability ports and the services built on top of them.
//!
//! The panel never reaches into the rendering engine or the compositor
//! directly; everything flows through the traits in [`port`], which hosts
//! implement and tests fake.

pub mod overlay;
pub mod port;
