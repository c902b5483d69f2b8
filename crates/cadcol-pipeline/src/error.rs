// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the reconstruction pipeline

use cadcol_model::{DocumentError, ElementId};
use thiserror::Error;

/// Pipeline result type
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
///
/// Hard failures abort the whole operation; per-item creation failures never
/// surface here, they are isolated inside the batch loop.
#[derive(Error, Debug)]
pub enum Error {
    /// Extraction requested with an empty layer name
    #[error("No layer selected")]
    EmptyLayerName,

    /// Extraction requested for a layer the import does not carry
    #[error("Layer '{0}' not found in the import")]
    LayerNotFound(String),

    /// Creation requested with no extracted columns
    #[error("No extracted columns found")]
    NoExtractedColumns,

    /// A configured family has no types to search or duplicate
    #[error("Family {0} has no types")]
    FamilyHasNoTypes(ElementId),

    /// A configured parameter name is missing on the family's types
    #[error("Parameter '{name}' not found on the types of family {family}")]
    ParameterMissing { family: ElementId, name: String },

    /// Document operation failed
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Geometry extraction failed
    #[error(transparent)]
    Geometry(#[from] cadcol_geometry::Error),
}
