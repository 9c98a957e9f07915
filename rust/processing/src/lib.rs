// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Layercore Processing
//!
//! The nine-stage layer analysis pipeline (`spec.md` §2) as one module per
//! stage, plus [`pipeline::run`] tying them together in the order §5
//! requires. [`layercore_engine`](../layercore_engine/index.html) is the
//! stable facade callers should depend on; this crate is the implementation
//! shared by that facade and the integration tests in `tests/scenarios.rs`.

pub mod bridge;
pub mod clip_fill;
pub mod combine;
pub mod construct;
pub mod error;
pub mod pipeline;
pub mod repair;
pub mod shells;
pub mod slice;
pub mod support;
pub mod surface_type;
pub mod trim;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
pub use pipeline::{run, SliceWarnings};
