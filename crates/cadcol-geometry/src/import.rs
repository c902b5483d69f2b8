// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Import geometry container
//!
//! [`ImportGeometry`] holds the drawing entities the host materialized from
//! an imported 2-D/3-D file: polylines, arcs and planar faces, each tagged
//! with the drawing layer it came from. The layer tag is the sole extraction
//! filter.

use crate::curve::{Arc, Curve, PolyLine};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Layer-tagged polyline
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ImportPolyline {
    pub layer: String,
    pub polyline: PolyLine,
}

/// Layer-tagged arc
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ImportArc {
    pub layer: String,
    pub arc: Arc,
}

/// Layer-tagged planar face, represented by its outer edge loop
///
/// The loop is the ordered curve list of the face boundary. Hatch fills
/// import as planar faces, which is what the hatch extraction mode reads.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ImportFace {
    pub layer: String,
    pub outer_loop: Vec<Curve>,
}

/// All drawing entities of one import, addressable by layer
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct ImportGeometry {
    polylines: Vec<ImportPolyline>,
    arcs: Vec<ImportArc>,
    faces: Vec<ImportFace>,
}

impl ImportGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_polyline(&mut self, layer: impl Into<String>, polyline: PolyLine) {
        self.polylines.push(ImportPolyline {
            layer: layer.into(),
            polyline,
        });
    }

    pub fn push_arc(&mut self, layer: impl Into<String>, arc: Arc) {
        self.arcs.push(ImportArc {
            layer: layer.into(),
            arc,
        });
    }

    pub fn push_face(&mut self, layer: impl Into<String>, outer_loop: Vec<Curve>) {
        self.faces.push(ImportFace {
            layer: layer.into(),
            outer_loop,
        });
    }

    /// Polylines tagged with `layer`, in import order
    pub fn polylines_on_layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a PolyLine> {
        self.polylines
            .iter()
            .filter(move |p| p.layer == layer)
            .map(|p| &p.polyline)
    }

    /// Arcs tagged with `layer`, in import order
    pub fn arcs_on_layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a Arc> {
        self.arcs
            .iter()
            .filter(move |a| a.layer == layer)
            .map(|a| &a.arc)
    }

    /// Faces tagged with `layer`, in import order
    pub fn faces_on_layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a ImportFace> {
        self.faces.iter().filter(move |f| f.layer == layer)
    }

    /// Distinct layer names across all entities
    pub fn layer_names(&self) -> FxHashSet<&str> {
        let mut names = FxHashSet::default();
        names.extend(self.polylines.iter().map(|p| p.layer.as_str()));
        names.extend(self.arcs.iter().map(|a| a.layer.as_str()));
        names.extend(self.faces.iter().map(|f| f.layer.as_str()));
        names
    }

    pub fn has_layer(&self, layer: &str) -> bool {
        self.polylines.iter().any(|p| p.layer == layer)
            || self.arcs.iter().any(|a| a.layer == layer)
            || self.faces.iter().any(|f| f.layer == layer)
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty() && self.arcs.is_empty() && self.faces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_layer_filtering() {
        let mut import = ImportGeometry::new();
        import.push_arc("S-COLS", Arc::new(Point3::origin(), 1.0));
        import.push_arc("S-WALL", Arc::new(Point3::origin(), 2.0));
        import.push_polyline("S-COLS", PolyLine::new(vec![Point3::origin()]));

        assert_eq!(import.arcs_on_layer("S-COLS").count(), 1);
        assert_eq!(import.arcs_on_layer("S-WALL").count(), 1);
        assert_eq!(import.polylines_on_layer("S-COLS").count(), 1);
        assert_eq!(import.faces_on_layer("S-COLS").count(), 0);

        assert!(import.has_layer("S-WALL"));
        assert!(!import.has_layer("A-ANNO"));
        assert_eq!(import.layer_names().len(), 2);
    }
}
