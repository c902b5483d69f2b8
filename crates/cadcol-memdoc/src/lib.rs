// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! cadcol-memdoc - In-memory document backend
//!
//! [`MemoryDocument`] implements the `cadcol-model` [`Document`] trait with
//! genuine transactional semantics (snapshot and restore), so the pipeline
//! can be exercised headlessly: integration tests, benchmarks, dry runs.
//!
//! # Example
//!
//! ```
//! use cadcol_memdoc::MemoryDocument;
//! use cadcol_model::{Document, ParamValue};
//!
//! let mut doc = MemoryDocument::new();
//! let family = doc.add_family("Concrete Column");
//! let symbol = doc.add_symbol(family, "300x450", &[
//!     ("b", ParamValue::Double(0.984)),
//!     ("h", ParamValue::Double(1.476)),
//! ]);
//!
//! doc.tx_begin("Rename").unwrap();
//! doc.set_parameter(symbol, "b", ParamValue::Double(1.0)).unwrap();
//! doc.tx_rollback().unwrap();
//! assert_eq!(doc.parameter(symbol, "b"), Some(ParamValue::Double(0.984)));
//! ```
//!
//! [`Document`]: cadcol_model::Document

pub mod document;
pub mod element;

pub use document::MemoryDocument;
pub use element::{ColumnInstance, Element, ElementKind};
