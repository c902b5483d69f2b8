// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types shared across the column reconstruction crates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe element identifier
///
/// Wraps the raw document element ID (e.g., element 123 becomes ElementId(123))
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ElementId {
    fn from(id: u32) -> Self {
        ElementId(id)
    }
}

impl From<ElementId> for u32 {
    fn from(id: ElementId) -> Self {
        id.0
    }
}

/// A parameter value stored on an element
///
/// Documents store parameters with one of a few storage types. Numeric
/// comparisons in the pipeline treat `Double` and `Integer` uniformly, which
/// is what [`ParamValue::as_double`] provides.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum ParamValue {
    /// Real-valued parameter, in internal units for lengths
    Double(f64),
    /// Integer-valued parameter
    Integer(i64),
    /// Text parameter
    Text(String),
    /// Reference to another element (e.g., a level)
    Element(ElementId),
}

impl ParamValue {
    /// Numeric view of the value; integers widen to f64
    pub fn as_double(&self) -> Option<f64> {
        match self {
            ParamValue::Double(v) => Some(*v),
            ParamValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Element reference view of the value
    pub fn as_element_id(&self) -> Option<ElementId> {
        match self {
            ParamValue::Element(id) => Some(*id),
            _ => None,
        }
    }
}

/// Built-in instance parameters assigned by the creation step
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BuiltinParam {
    /// Level the instance base is bound to
    BaseLevel,
    /// Level the instance top is bound to
    TopLevel,
    /// Vertical offset from the base level, internal units
    BaseLevelOffset,
    /// Vertical offset from the top level, internal units
    TopLevelOffset,
}

/// Structural role assigned to a newly created instance
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum StructuralKind {
    Column,
}

/// Final status of a committed or rolled back transaction
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransactionStatus {
    /// Changes were accepted by the document
    Committed,
    /// The document discarded the changes
    RolledBack,
}
