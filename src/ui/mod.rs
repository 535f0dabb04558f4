// SPDX-License-Identifier: MPL-2.0
//! Iced UI components.

pub mod panel;
