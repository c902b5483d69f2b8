// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! cadcol-geometry - Drawing-import geometry and column footprint extraction
//!
//! This crate turns raw import geometry (layer-tagged polylines, arcs and
//! planar faces materialized by the host from a 2-D/3-D drawing file) into
//! shape-specific column models. Extraction is deterministic, side-effect
//! free and independent of the document, so it may run off the document
//! thread.
//!
//! # Pipeline position
//!
//! ```text
//! ImportGeometry --extractors--> ColumnModel list --pipeline--> elements
//! ```
//!
//! Two extractors exist per footprint shape:
//!
//! - [`RectangularColumnExtractor`] - closed 4-corner polylines, or planar
//!   faces whose outer loop has exactly 4 curves
//! - [`CircularColumnExtractor`] - arcs, or planar faces whose outer loop
//!   fits a circle within tolerance

pub mod curve;
pub mod error;
pub mod extract;
pub mod import;
pub mod models;

pub use curve::{angle_to, Arc, ArcSegment, Curve, Line, PolyLine};
pub use error::{Error, Result};
pub use extract::{CircularColumnExtractor, RectangularColumnExtractor};
pub use import::{ImportArc, ImportFace, ImportGeometry, ImportPolyline};
pub use models::{CircularColumnModel, ColumnModel, RectangularColumnModel};
