// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Curve primitives for import geometry
//!
//! All coordinates live in the document's internal length unit. Import
//! geometry is planar in practice (drawing layers), but points carry a z
//! component so elevations survive extraction.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Lengths below this are treated as degenerate
const LENGTH_EPSILON: f64 = 1e-9;

/// Unsigned angle between two vectors, in [0, π]
pub fn angle_to(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < LENGTH_EPSILON {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}

/// Bound line segment
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Line {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Unit direction from start to end; `None` when the segment is degenerate
    pub fn direction(&self) -> Option<Vector3<f64>> {
        let v = self.end - self.start;
        let norm = v.norm();
        if norm < LENGTH_EPSILON {
            None
        } else {
            Some(v / norm)
        }
    }
}

/// Full circle (center and radius); drawing circles import as arcs
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point3<f64>,
    pub radius: f64,
}

impl Arc {
    pub fn new(center: Point3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Circle through three points in the XY plane
    ///
    /// Returns `None` when the points are (near-)collinear.
    pub fn from_three_points(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Option<Self> {
        let (ax, ay) = (a.x, a.y);
        let (bx, by) = (b.x, b.y);
        let (cx, cy) = (c.x, c.y);

        let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        if d.abs() < LENGTH_EPSILON {
            return None;
        }

        let a2 = ax * ax + ay * ay;
        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;

        let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
        let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;

        let center = Point3::new(ux, uy, a.z);
        let radius = (center - a).norm();
        Some(Self { center, radius })
    }
}

/// Bounded arc: the carrying circle plus start and end points
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ArcSegment {
    pub arc: Arc,
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl ArcSegment {
    /// Arc length along the minor sweep between start and end
    pub fn length(&self) -> f64 {
        let u = self.start - self.arc.center;
        let v = self.end - self.arc.center;
        self.arc.radius * angle_to(&u, &v)
    }
}

/// Polyline as an ordered coordinate list
///
/// Closed polylines repeat their first coordinate at the end, so a closed
/// 4-corner rectangle has 5 coordinates.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PolyLine {
    pub coordinates: Vec<Point3<f64>>,
}

impl PolyLine {
    pub fn new(coordinates: Vec<Point3<f64>>) -> Self {
        Self { coordinates }
    }

    pub fn vertex_count(&self) -> usize {
        self.coordinates.len()
    }
}

/// Bounded curve of an edge loop
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Curve {
    Line(Line),
    Arc(ArcSegment),
}

impl Curve {
    pub fn length(&self) -> f64 {
        match self {
            Curve::Line(line) => line.length(),
            Curve::Arc(segment) => segment.length(),
        }
    }

    pub fn start(&self) -> Point3<f64> {
        match self {
            Curve::Line(line) => line.start,
            Curve::Arc(segment) => segment.start,
        }
    }

    pub fn end(&self) -> Point3<f64> {
        match self {
            Curve::Line(line) => line.end,
            Curve::Arc(segment) => segment.end,
        }
    }

    /// Unit direction for line curves; arcs have no single direction
    pub fn direction(&self) -> Option<Vector3<f64>> {
        match self {
            Curve::Line(line) => line.direction(),
            Curve::Arc(_) => None,
        }
    }
}
