// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Circular footprint extraction

use crate::curve::Arc;
use crate::import::{ImportFace, ImportGeometry};
use crate::models::CircularColumnModel;
use rayon::prelude::*;

/// Max deviation of a sampled vertex from the fitted radius, internal units
const FIT_TOLERANCE: f64 = 1e-4;

/// Extracts circular column footprints from import geometry
#[derive(Clone, Copy, Default, Debug)]
pub struct CircularColumnExtractor;

impl CircularColumnExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract from boundary arcs on `layer`
    ///
    /// Every arc on the layer becomes one model; drawing circles import as
    /// arcs, so no further filtering applies.
    pub fn extract_from_boundary_lines(
        &self,
        import: &ImportGeometry,
        layer: &str,
    ) -> Vec<CircularColumnModel> {
        import
            .arcs_on_layer(layer)
            .map(CircularColumnModel::from_arc)
            .collect()
    }

    /// Extract from planar faces (hatch fills) on `layer`
    ///
    /// Circular hatch boundaries tessellate into many-sided loops. Faces with
    /// a 4-curve loop belong to the rectangular extractor and are skipped;
    /// the rest are accepted only when every sampled loop vertex lies on one
    /// fitted circle within tolerance, which rejects irregular polygons.
    pub fn extract_from_planar_faces(
        &self,
        import: &ImportGeometry,
        layer: &str,
    ) -> Vec<CircularColumnModel> {
        let faces: Vec<_> = import.faces_on_layer(layer).collect();

        // Read-only scan; indexed parallel iteration keeps result order
        faces
            .par_iter()
            .filter_map(|face| Self::fit_face(face))
            .collect()
    }

    fn fit_face(face: &ImportFace) -> Option<CircularColumnModel> {
        if face.outer_loop.len() == 4 {
            return None;
        }

        // Sample the loop at each curve start, in loop order
        let points: Vec<_> = face.outer_loop.iter().map(|c| c.start()).collect();

        // The fit uses points 1, 3 and 2; shorter loops cannot be sampled
        if points.len() < 4 {
            return None;
        }

        let arc = Arc::from_three_points(points[1], points[3], points[2])?;

        let reference = (points[0] - arc.center).norm();
        let all_on_circle = points
            .iter()
            .all(|p| ((*p - arc.center).norm() - reference).abs() < FIT_TOLERANCE);

        all_on_circle.then(|| CircularColumnModel::from_arc(&arc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{Curve, Line};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    /// Regular n-gon loop inscribed in a circle
    fn polygon_loop(cx: f64, cy: f64, radius: f64, sides: usize) -> Vec<Curve> {
        (0..sides)
            .map(|i| {
                let a = (i as f64) * std::f64::consts::TAU / (sides as f64);
                let b = ((i + 1) as f64) * std::f64::consts::TAU / (sides as f64);
                Curve::Line(Line::new(
                    Point3::new(cx + radius * a.cos(), cy + radius * a.sin(), 0.0),
                    Point3::new(cx + radius * b.cos(), cy + radius * b.sin(), 0.0),
                ))
            })
            .collect()
    }

    #[test]
    fn test_boundary_mode_takes_every_arc_on_layer() {
        let mut import = ImportGeometry::new();
        import.push_arc("S-COLS", Arc::new(Point3::new(1.0, 2.0, 0.0), 0.5));
        import.push_arc("S-COLS", Arc::new(Point3::new(4.0, 2.0, 0.0), 0.75));
        import.push_arc("S-WALL", Arc::new(Point3::new(9.0, 9.0, 0.0), 1.0));

        let models =
            CircularColumnExtractor::new().extract_from_boundary_lines(&import, "S-COLS");

        assert_eq!(models.len(), 2);
        assert_relative_eq!(models[0].diameter(), 1.0);
        assert_relative_eq!(models[1].diameter(), 1.5);
    }

    #[test]
    fn test_face_mode_accepts_circular_loop() {
        let mut import = ImportGeometry::new();
        import.push_face("S-COLS", polygon_loop(3.0, -1.0, 0.6, 12));

        let models =
            CircularColumnExtractor::new().extract_from_planar_faces(&import, "S-COLS");

        assert_eq!(models.len(), 1);
        assert_relative_eq!(models[0].center().x, 3.0, epsilon = 1e-9);
        assert_relative_eq!(models[0].center().y, -1.0, epsilon = 1e-9);
        assert_relative_eq!(models[0].diameter(), 1.2, epsilon = 1e-9);
    }

    #[test]
    fn test_face_mode_rejects_perturbed_vertex() {
        let mut loop_curves = polygon_loop(0.0, 0.0, 0.6, 12);
        // Push one sampled vertex radially outward beyond tolerance
        if let Curve::Line(line) = &mut loop_curves[5] {
            let dir = (line.start - Point3::origin()).normalize();
            line.start += dir * 1e-3;
        }
        let mut import = ImportGeometry::new();
        import.push_face("S-COLS", loop_curves);

        let models =
            CircularColumnExtractor::new().extract_from_planar_faces(&import, "S-COLS");
        assert!(models.is_empty());
    }

    #[test]
    fn test_face_mode_skips_rectangular_and_short_loops() {
        let mut import = ImportGeometry::new();
        import.push_face("S-COLS", polygon_loop(0.0, 0.0, 0.6, 4));
        import.push_face("S-COLS", polygon_loop(5.0, 0.0, 0.6, 3));

        let models =
            CircularColumnExtractor::new().extract_from_planar_faces(&import, "S-COLS");
        assert!(models.is_empty());
    }
}
