// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes.
//!
//! A standalone capability module composed by delegation: anything that can
//! produce points can grow a box. Solid bounds are computed from vertices
//! plus sampled edge curves, which is exact for polyhedra and a chordal
//! approximation for curved shells.

use nalgebra::{Point3, Vector3};

use crate::keys::EdgeKey;
use crate::solid::Solid;

/// Number of samples taken along each curved edge for solid bounds.
const EDGE_SAMPLES: usize = 16;

/// An axis-aligned box. Always contains at least one point; emptiness is
/// expressed as `Option<BoundingBox>` at API boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// The degenerate box containing a single point.
    pub fn of_point(p: Point3<f64>) -> Self {
        Self { min: p, max: p }
    }

    /// The smallest box containing all given points, or `None` for an empty
    /// iterator.
    pub fn of_points(points: impl IntoIterator<Item = Point3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bbox = Self::of_point(iter.next()?);
        for p in iter {
            bbox.encompass_point(p);
        }
        Some(bbox)
    }

    /// Grows the box to contain `p`.
    pub fn encompass_point(&mut self, p: Point3<f64>) {
        self.min = Point3::from(self.min.coords.inf(&p.coords));
        self.max = Point3::from(self.max.coords.sup(&p.coords));
    }

    /// Grows the box to contain `other`.
    pub fn encompass(&mut self, other: &BoundingBox) {
        self.encompass_point(other.min);
        self.encompass_point(other.max);
    }

    /// Center of the box.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths of the box.
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Largest edge length.
    pub fn max_extent(&self) -> f64 {
        let e = self.extents();
        e.x.max(e.y).max(e.z)
    }

    /// Whether `p` lies inside the box (bounds included).
    pub fn contains(&self, p: Point3<f64>) -> bool {
        self.min.iter().zip(p.iter()).all(|(lo, v)| lo <= v)
            && p.iter().zip(self.max.iter()).all(|(v, hi)| v <= hi)
    }
}

/// Points sampled uniformly along an edge's curve; empty for degenerate
/// edges.
fn edge_sample_points(solid: &Solid, edge: EdgeKey) -> Vec<Point3<f64>> {
    let Some(domain) = solid.edge_domain(edge) else {
        return Vec::new();
    };
    (0..EDGE_SAMPLES)
        .filter_map(|i| {
            let t = domain.interpolate(i as f64 / (EDGE_SAMPLES - 1) as f64);
            solid.edge_point(edge, t)
        })
        .collect()
}

/// Bounds of a solid from its vertices and sampled edge curves, or `None`
/// for an empty solid.
pub fn solid_bounds(solid: &Solid) -> Option<BoundingBox> {
    let vertex_points = solid.vertices().filter_map(|v| solid.vertex_point(v));
    let edge_points = solid
        .edges()
        .flat_map(|e| edge_sample_points(solid, e));
    BoundingBox::of_points(vertex_points.chain(edge_points))
}
