// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry extraction

use thiserror::Error;

/// Geometry result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry extraction errors
#[derive(Error, Debug)]
pub enum Error {
    /// Not enough curves to form the requested footprint
    #[error("Footprint needs at least {expected} curves, got {actual}")]
    TooFewCurves { expected: usize, actual: usize },
}
