// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Column footprint models
//!
//! Immutable value objects computed once at extraction time. A model never
//! mutates after construction; the creation phase only reads from it.

use crate::curve::{angle_to, Arc, Curve, Line};
use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Rectangular column footprint
///
/// Built from the 4 ordered boundary curves of the footprint. The source
/// curves for the short and long side are retained for diagnostics.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RectangularColumnModel {
    center: Point3<f64>,
    short_side: f64,
    long_side: f64,
    short_side_curve: Curve,
    long_side_curve: Curve,
    rotation_angle: f64,
}

impl RectangularColumnModel {
    /// Build a model from the ordered boundary curves of a footprint
    ///
    /// Only the first two curves decide the side lengths: the shorter is the
    /// short side, ties default to `curves[0]`. The center is the midpoint
    /// of the diagonal from the start of `curves[0]` to the end of
    /// `curves[1]`.
    pub fn from_curves(curves: &[Curve]) -> Result<Self> {
        if curves.len() < 4 {
            return Err(Error::TooFewCurves {
                expected: 4,
                actual: curves.len(),
            });
        }

        let (short_side_curve, long_side_curve) = if curves[0].length() > curves[1].length() {
            (curves[1].clone(), curves[0].clone())
        } else {
            (curves[0].clone(), curves[1].clone())
        };

        let diagonal = Line::new(curves[0].start(), curves[1].end());
        let center = diagonal.midpoint();

        let rotation_angle = short_side_curve
            .direction()
            .map(rotation_from_direction)
            .unwrap_or(0.0);

        Ok(Self {
            center,
            short_side: short_side_curve.length(),
            long_side: long_side_curve.length(),
            short_side_curve,
            long_side_curve,
            rotation_angle,
        })
    }

    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    /// Short side length; always <= `long_side`
    pub fn short_side(&self) -> f64 {
        self.short_side
    }

    pub fn long_side(&self) -> f64 {
        self.long_side
    }

    /// Source curve the short side was measured on
    pub fn short_side_curve(&self) -> &Curve {
        &self.short_side_curve
    }

    /// Source curve the long side was measured on
    pub fn long_side_curve(&self) -> &Curve {
        &self.long_side_curve
    }

    /// Angle between the x basis axis and the short-side direction,
    /// quadrant-corrected; always in [0, π]
    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }
}

/// Quadrant-corrected rotation angle for a short-side direction
///
/// `angle_to` alone cannot distinguish a direction from its mirror across
/// the x axis, so the raw angle is corrected by the signs of the planar
/// components. Axis-aligned directions pass through uncorrected.
fn rotation_from_direction(direction: Vector3<f64>) -> f64 {
    let angle = angle_to(&Vector3::x(), &direction);

    if direction.x > 0.0 && direction.y < 0.0 {
        // Quadrant IV
        PI - angle
    } else if direction.x > 0.0 && direction.y > 0.0 {
        // Quadrant I
        FRAC_PI_2 + angle
    } else if direction.x < 0.0 && direction.y < 0.0 {
        // Quadrant III
        PI - angle
    } else {
        // Quadrant II and axis-aligned directions
        angle
    }
}

/// Circular column footprint
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CircularColumnModel {
    center: Point3<f64>,
    diameter: f64,
}

impl CircularColumnModel {
    pub fn from_arc(arc: &Arc) -> Self {
        Self {
            center: arc.center,
            diameter: arc.radius * 2.0,
        }
    }

    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }
}

/// Column footprint, tagged by shape
///
/// The creation phase dispatches on the variant; future shapes extend this
/// enum and the strategy factory.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum ColumnModel {
    Rectangular(RectangularColumnModel),
    Circular(CircularColumnModel),
}

impl ColumnModel {
    pub fn center(&self) -> Point3<f64> {
        match self {
            ColumnModel::Rectangular(m) => m.center(),
            ColumnModel::Circular(m) => m.center(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Planar unit vector at `theta`, with near-zero components snapped to
    /// exact zero the way axis-aligned drawing coordinates are stored
    fn planar_unit(theta: f64) -> Vector3<f64> {
        let snap = |t: f64| if t.abs() < 1e-12 { 0.0 } else { t };
        Vector3::new(snap(theta.cos()), snap(theta.sin()), 0.0)
    }

    /// Boundary curves of a rectangle whose short side (length `s`) points
    /// along `theta` and whose long side (length `l`) is perpendicular
    fn rect_curves(cx: f64, cy: f64, s: f64, l: f64, theta: f64) -> Vec<Curve> {
        let u = planar_unit(theta);
        let v = planar_unit(theta + FRAC_PI_2);
        let c = Point3::new(cx, cy, 0.0);
        let p0 = c - u * (s / 2.0) - v * (l / 2.0);
        let p1 = p0 + u * s;
        let p2 = p1 + v * l;
        let p3 = p0 + v * l;
        vec![
            Curve::Line(Line::new(p0, p1)),
            Curve::Line(Line::new(p1, p2)),
            Curve::Line(Line::new(p2, p3)),
            Curve::Line(Line::new(p3, p0)),
        ]
    }

    #[test]
    fn test_sides_ordered_short_before_long() {
        let model = RectangularColumnModel::from_curves(&rect_curves(0.0, 0.0, 1.0, 2.0, 0.0))
            .unwrap();
        assert_relative_eq!(model.short_side(), 1.0);
        assert_relative_eq!(model.long_side(), 2.0);
        assert!(model.short_side() <= model.long_side());
    }

    #[test]
    fn test_tie_defaults_to_first_curve() {
        let curves = rect_curves(0.0, 0.0, 1.5, 1.5, 0.0);
        let model = RectangularColumnModel::from_curves(&curves).unwrap();
        assert_eq!(model.short_side_curve(), &curves[0]);
    }

    #[test]
    fn test_center_is_diagonal_midpoint() {
        let model = RectangularColumnModel::from_curves(&rect_curves(3.0, -2.0, 1.0, 2.0, 0.7))
            .unwrap();
        assert_relative_eq!(model.center().x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(model.center().y, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_axis_aligned_rotation_angles() {
        let east = RectangularColumnModel::from_curves(&rect_curves(0.0, 0.0, 1.0, 2.0, 0.0))
            .unwrap();
        assert_relative_eq!(east.rotation_angle(), 0.0);

        let north =
            RectangularColumnModel::from_curves(&rect_curves(0.0, 0.0, 1.0, 2.0, FRAC_PI_2))
                .unwrap();
        assert_relative_eq!(north.rotation_angle(), FRAC_PI_2);

        let west = RectangularColumnModel::from_curves(&rect_curves(0.0, 0.0, 1.0, 2.0, PI))
            .unwrap();
        assert_relative_eq!(west.rotation_angle(), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_quadrant_corrections() {
        // Quadrant I direction (theta = 39°) maps to 90° + 39° = 129°
        let q1 = RectangularColumnModel::from_curves(&rect_curves(
            0.0,
            0.0,
            1.0,
            2.0,
            39f64.to_radians(),
        ))
        .unwrap();
        assert_relative_eq!(q1.rotation_angle(), 129f64.to_radians(), epsilon = 1e-12);

        // Quadrant IV direction (theta = -51°) maps to 180° - 51° = 129°
        let q4 = RectangularColumnModel::from_curves(&rect_curves(
            0.0,
            0.0,
            1.0,
            2.0,
            (-51f64).to_radians(),
        ))
        .unwrap();
        assert_relative_eq!(q4.rotation_angle(), 129f64.to_radians(), epsilon = 1e-12);

        // Quadrant III direction (theta = 235°) maps to 180° - 125° = 55°
        let q3 = RectangularColumnModel::from_curves(&rect_curves(
            0.0,
            0.0,
            1.0,
            2.0,
            235f64.to_radians(),
        ))
        .unwrap();
        assert_relative_eq!(q3.rotation_angle(), 55f64.to_radians(), epsilon = 1e-12);

        // Quadrant II direction (theta = 125°) keeps the raw angle 125°
        let q2 = RectangularColumnModel::from_curves(&rect_curves(
            0.0,
            0.0,
            1.0,
            2.0,
            125f64.to_radians(),
        ))
        .unwrap();
        assert_relative_eq!(q2.rotation_angle(), 125f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_angle_stays_in_range() {
        for degrees in (0..360).step_by(7) {
            let theta = (degrees as f64).to_radians();
            let model =
                RectangularColumnModel::from_curves(&rect_curves(0.0, 0.0, 1.0, 2.0, theta))
                    .unwrap();
            let angle = model.rotation_angle();
            assert!(
                (0.0..=PI + 1e-12).contains(&angle),
                "angle {angle} outside [0, π] for theta {degrees}°"
            );
        }
    }

    #[test]
    fn test_degenerate_short_side_defaults_rotation_to_zero() {
        let p = Point3::new(1.0, 1.0, 0.0);
        let q = Point3::new(1.0, 3.0, 0.0);
        let curves = vec![
            Curve::Line(Line::new(p, p)), // zero-length short side
            Curve::Line(Line::new(p, q)),
            Curve::Line(Line::new(q, q)),
            Curve::Line(Line::new(q, p)),
        ];
        let model = RectangularColumnModel::from_curves(&curves).unwrap();
        assert_relative_eq!(model.rotation_angle(), 0.0);
        assert_relative_eq!(model.short_side(), 0.0);
    }

    #[test]
    fn test_arc_sided_loop_builds_with_zero_rotation() {
        use crate::curve::ArcSegment;

        // Stadium-like loop: bulged short sides, straight long sides
        let bulge = |center: Point3<f64>, start: Point3<f64>, end: Point3<f64>| {
            Curve::Arc(ArcSegment {
                arc: Arc::new(center, 0.5),
                start,
                end,
            })
        };
        let curves = vec![
            bulge(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, -0.5, 0.0),
                Point3::new(0.0, 0.5, 0.0),
            ),
            Curve::Line(Line::new(
                Point3::new(0.0, 0.5, 0.0),
                Point3::new(2.0, 0.5, 0.0),
            )),
            bulge(
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 0.5, 0.0),
                Point3::new(2.0, -0.5, 0.0),
            ),
            Curve::Line(Line::new(
                Point3::new(2.0, -0.5, 0.0),
                Point3::new(0.0, -0.5, 0.0),
            )),
        ];

        let model = RectangularColumnModel::from_curves(&curves).unwrap();
        // The arc short side has no single direction, so rotation defaults
        assert_relative_eq!(model.rotation_angle(), 0.0);
        assert!(model.short_side() <= model.long_side());
        assert!(matches!(model.short_side_curve(), Curve::Arc(_)));
        assert_relative_eq!(model.center().x, 1.0);
        assert_relative_eq!(model.center().y, 0.0);
    }

    #[test]
    fn test_too_few_curves_rejected() {
        let curves = rect_curves(0.0, 0.0, 1.0, 2.0, 0.0);
        assert!(RectangularColumnModel::from_curves(&curves[..3]).is_err());
    }

    #[test]
    fn test_circular_model_doubles_radius() {
        let model = CircularColumnModel::from_arc(&Arc::new(Point3::new(2.0, 5.0, 0.0), 0.75));
        assert_relative_eq!(model.diameter(), 1.5);
        assert_relative_eq!(model.center().x, 2.0);
    }
}
