// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! cadcol-pipeline - Transactional column reconstruction pipeline
//!
//! Consumes the extraction results of `cadcol-geometry` and creates the
//! corresponding parametric column elements in a document, with per-item
//! failure isolation and progress reporting.
//!
//! # Control flow
//!
//! ```ignore
//! use cadcol_pipeline::{ColumnFromCadOrchestrator, ExtractionMode};
//!
//! let orchestrator = ColumnFromCadOrchestrator::new();
//! let extraction =
//!     orchestrator.extract_column_data(&import, "S-COLS", ExtractionMode::BoundaryLines)?;
//! let created = orchestrator.create_columns(&extraction, &mut doc, &context)?;
//! println!("created {} of {} columns", created.len(), extraction.len());
//! ```
//!
//! Extraction is read-only and may run off the document thread; creation
//! must run on the thread owning the document. Each column is created in its
//! own committed transaction so elements become visible incrementally, and
//! the whole batch is assimilated into one undo step by an outer transaction
//! group.

pub mod context;
pub mod error;
pub mod orchestrator;
pub mod settings;
pub mod strategy;
pub mod transaction;

pub use context::ColumnCreationContext;
pub use error::{Error, Result};
pub use orchestrator::{ColumnExtraction, ColumnFromCadOrchestrator, ExtractionMode};
pub use settings::ColumnFromCadSettings;
pub use strategy::ColumnCreationStrategy;
pub use transaction::{TransactionGroupScope, TransactionScope};
