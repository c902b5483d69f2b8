// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rectangular footprint extraction

use crate::curve::{Curve, Line};
use crate::import::ImportGeometry;
use crate::models::RectangularColumnModel;
use rayon::prelude::*;

/// Coordinates of a closed 4-corner polyline (corners plus repeated start)
const CLOSED_RECTANGLE_COORDINATES: usize = 5;

/// Extracts rectangular column footprints from import geometry
#[derive(Clone, Copy, Default, Debug)]
pub struct RectangularColumnExtractor;

impl RectangularColumnExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract from boundary polylines on `layer`
    ///
    /// Only closed polylines with exactly 5 coordinates are accepted; each is
    /// split into 4 bound segments in vertex order. Any other vertex count is
    /// skipped without error.
    pub fn extract_from_boundary_lines(
        &self,
        import: &ImportGeometry,
        layer: &str,
    ) -> Vec<RectangularColumnModel> {
        import
            .polylines_on_layer(layer)
            .filter_map(|polyline| {
                if polyline.vertex_count() != CLOSED_RECTANGLE_COORDINATES {
                    return None;
                }

                let c = &polyline.coordinates;
                let curves = [
                    Curve::Line(Line::new(c[0], c[1])),
                    Curve::Line(Line::new(c[1], c[2])),
                    Curve::Line(Line::new(c[2], c[3])),
                    Curve::Line(Line::new(c[3], c[4])),
                ];

                RectangularColumnModel::from_curves(&curves).ok()
            })
            .collect()
    }

    /// Extract from planar faces (hatch fills) on `layer`
    ///
    /// Accepts faces whose outer loop has exactly 4 curves. Other loop sizes
    /// are left for the circular extractor or dropped.
    pub fn extract_from_planar_faces(
        &self,
        import: &ImportGeometry,
        layer: &str,
    ) -> Vec<RectangularColumnModel> {
        let faces: Vec<_> = import.faces_on_layer(layer).collect();

        // Read-only scan; indexed parallel iteration keeps result order
        faces
            .par_iter()
            .filter_map(|face| {
                if face.outer_loop.len() != 4 {
                    return None;
                }
                RectangularColumnModel::from_curves(&face.outer_loop).ok()
            })
            .collect()
    }
}
