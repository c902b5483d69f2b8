// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Creation-phase parameter bag

use cadcol_model::{ElementId, ProgressCallback};

/// Inputs for one creation batch
///
/// Built fresh per call by the orchestration layer and not persisted. The
/// target document is not part of the context; it is threaded explicitly as
/// `&mut dyn Document` through the creation entry points, making the
/// caller's exclusive ownership for the duration of the batch visible in
/// the signatures.
pub struct ColumnCreationContext {
    /// Family searched/extended for rectangular footprints
    pub rectangular_family: ElementId,
    /// Family searched/extended for circular footprints
    pub circular_family: ElementId,
    /// Type parameter holding the rectangular width (short side)
    pub width_parameter: String,
    /// Type parameter holding the rectangular height (long side)
    pub height_parameter: String,
    /// Type parameter holding the circular diameter
    pub diameter_parameter: String,
    /// Level the column bases are bound to
    pub base_level: ElementId,
    /// Level the column tops are bound to
    pub top_level: ElementId,
    /// Base offset, already in internal units
    pub base_offset: f64,
    /// Top offset, already in internal units
    pub top_offset: f64,
    /// Invoked with (current, total) before each item; current is 1-based
    pub progress: Option<ProgressCallback>,
}
