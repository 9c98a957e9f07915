// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors the facade can raise. This is a thin wrapper — the interesting
/// variants all live in [`layercore_processing::Error`]; this crate adds
/// nothing of its own, matching `rust/geometry/src/error.rs`'s pattern of
/// wrapping a lower crate's error with `#[from]` rather than re-deriving it.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Pipeline(#[from] layercore_processing::Error),
}
