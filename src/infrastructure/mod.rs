// SPDX-License-Identifier: MPL-2.0
//! Infrastructure adapters for external services.

pub mod http;
