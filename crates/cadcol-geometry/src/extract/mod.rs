// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint extractors
//!
//! One extractor per footprint shape, each offering the two source modes:
//! boundary curves (polylines and arcs drawn directly) and planar faces
//! (hatch fills). Candidates that do not match the shape are silently
//! skipped; extraction never fails on bad geometry.

mod circular;
mod rectangular;

pub use circular::CircularColumnExtractor;
pub use rectangular::RectangularColumnExtractor;
