// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element records of the in-memory document

use cadcol_model::{ElementId, ParamValue};
use nalgebra::Point3;
use rustc_hash::FxHashMap;

/// One element of the document
#[derive(Clone, Debug)]
pub struct Element {
    pub name: String,
    pub kind: ElementKind,
    /// Named parameters; lengths in internal units
    pub params: FxHashMap<String, ParamValue>,
}

/// What kind of element a record is
#[derive(Clone, Debug)]
pub enum ElementKind {
    /// Family (type group)
    Family,
    /// Parametric type inside a family
    FamilySymbol { family: ElementId, active: bool },
    /// Horizontal reference elevation
    Level { elevation: f64 },
    /// Placed structural column
    ColumnInstance(ColumnInstance),
}

/// Instance data of a placed column
#[derive(Clone, Debug)]
pub struct ColumnInstance {
    pub symbol: ElementId,
    pub location: Point3<f64>,
    pub base_level: ElementId,
    pub top_level: ElementId,
    /// Offset from the base level, internal units
    pub base_offset: f64,
    /// Offset from the top level, internal units
    pub top_offset: f64,
    /// Accumulated rotation about the vertical axis through the location
    pub rotation: f64,
}
