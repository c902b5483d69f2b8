// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! cadcol-model - Trait definitions and shared types for column reconstruction
//!
//! This crate provides the core abstractions for mutating a parametric
//! building-design document. It defines traits that can be implemented by
//! different document backends (the live host API, or an in-memory document
//! for headless runs and tests), allowing the reconstruction pipeline to work
//! with a document in a backend-agnostic way.
//!
//! # Architecture
//!
//! The crate is organized around several key pieces:
//!
//! - [`Document`] - Mutable access to the host project: transactions,
//!   transaction groups, family symbols, element creation
//! - [`FailurePreprocessor`] - Chain-of-responsibility hook invoked before a
//!   transaction commit resolves posted failures
//! - [`UnitConverter`] - Display-unit aware length conversion
//! - [`ImportSelector`] / [`SettingsStore`] - Collaborator seams owned by the
//!   excluded UI layer, defined here as call contracts only
//!
//! # Example
//!
//! ```ignore
//! use cadcol_model::{Document, ElementId, ParamValue};
//!
//! fn widen(doc: &mut dyn Document, symbol: ElementId) -> cadcol_model::Result<()> {
//!     doc.tx_begin("Widen symbol")?;
//!     doc.set_parameter(symbol, "b", ParamValue::Double(1.5))?;
//!     doc.tx_commit(None)?;
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod error;
pub mod failures;
pub mod traits;
pub mod types;
pub mod units;

// Re-export all public types
pub use document::*;
pub use error::*;
pub use failures::*;
pub use traits::*;
pub use types::*;
pub use units::*;
