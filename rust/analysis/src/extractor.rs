// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point, tangent, and normal samples across an edge's two adjacent faces,
//! and the edge convexity derived from them.
//!
//! Samples are taken at N parameters along the edge (arc-length-equalized
//! or uniform), ordered by the edge's traversal direction: for a reversed
//! edge the parameter sequence is reversed and tangents are negated.
//! Normals come from each face's surface through that face's pcurve and are
//! corrected for face reversal by the kernel. All output arrays are N rows,
//! index-aligned.
//!
//! Failure to produce samples (no left/right resolution at degenerate pole
//! edges, a missing curve or pcurve, an undefined normal) is reported as
//! a checked error from [`EdgeSamples::extract`]; a successfully
//! constructed value is always fully populated.

use nalgebra::{Point2, Point3, Vector3};
use serde::Serialize;

use brep_lite_kernel::{Curve2, FaceKey, OrientedEdge, Solid};

use crate::arclength::{ArcLengthSampler, DEFAULT_ARC_LENGTH_SAMPLES};
use crate::error::{Error, Result};
use crate::orientation::find_left_right;

/// How sample parameters are distributed along the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Near-uniform arc length (see [`crate::arclength`]).
    ArcLength,
    /// Uniform in the curve parameter.
    Uniform,
}

/// Convexity of the dihedral fold at an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeConvexity {
    Concave,
    Convex,
    Smooth,
}

/// Row-aligned geometric samples along an oriented edge.
#[derive(Debug, Clone)]
pub struct EdgeSamples {
    pub coedge: OrientedEdge,
    pub left_face: FaceKey,
    pub right_face: FaceKey,
    /// Curve parameters, ordered by the edge's traversal direction.
    pub params: Vec<f64>,
    /// 3D points on the edge curve.
    pub points: Vec<Point3<f64>>,
    /// Unit tangents, negated for a reversed edge.
    pub tangents: Vec<Vector3<f64>>,
    /// Pcurve evaluations on the left face.
    pub left_uvs: Vec<Point2<f64>>,
    /// Pcurve evaluations on the right face.
    pub right_uvs: Vec<Point2<f64>>,
    /// Left-face outward normals at `left_uvs`.
    pub left_normals: Vec<Vector3<f64>>,
    /// Right-face outward normals at `right_uvs`.
    pub right_normals: Vec<Vector3<f64>>,
}

impl EdgeSamples {
    /// Samples `num_samples` rows of edge data for `coedge` between its 1–2
    /// incident faces.
    ///
    /// Degenerate inputs (pole edges without a curve, unresolvable
    /// left/right orientation, missing pcurves, undefined normals) fail
    /// with a checked error; nothing panics.
    pub fn extract(
        solid: &Solid,
        coedge: OrientedEdge,
        faces: &[FaceKey],
        num_samples: usize,
        sampling: Sampling,
    ) -> Result<Self> {
        assert!(num_samples >= 2, "need at least two samples");
        let (left_face, right_face) = find_left_right(solid, coedge, faces)?;

        let mut params = match sampling {
            Sampling::ArcLength => {
                ArcLengthSampler::from_edge(solid, coedge.edge, DEFAULT_ARC_LENGTH_SAMPLES)?
                    .parameters(num_samples)
            }
            Sampling::Uniform => {
                let domain = solid
                    .edge_domain(coedge.edge)
                    .ok_or(Error::DegenerateGeometry)?;
                (0..num_samples)
                    .map(|i| domain.interpolate(i as f64 / (num_samples - 1) as f64))
                    .collect()
            }
        };
        // Order samples along the traversal direction.
        if coedge.reversed {
            params.reverse();
        }

        // The left face's wire carries the edge in the traversal direction,
        // the right face's wire in the opposite one; each lookup selects
        // that face's side of a seam.
        let left_pcurve = solid
            .pcurve(left_face, coedge)
            .ok_or(Error::DegenerateGeometry)?;
        let right_pcurve = solid
            .pcurve(right_face, coedge.opposite())
            .ok_or(Error::DegenerateGeometry)?;

        let left_uvs = evaluate_uvs(left_pcurve, &params);
        let right_uvs = evaluate_uvs(right_pcurve, &params);

        let mut points = Vec::with_capacity(num_samples);
        let mut tangents = Vec::with_capacity(num_samples);
        for &t in &params {
            points.push(
                solid
                    .edge_point(coedge.edge, t)
                    .ok_or(Error::DegenerateGeometry)?,
            );
            let tangent = solid
                .edge_tangent(coedge.edge, t)
                .ok_or(Error::DegenerateGeometry)?;
            tangents.push(if coedge.reversed { -tangent } else { tangent });
        }

        let left_normals = evaluate_normals(solid, left_face, &left_uvs)?;
        let right_normals = evaluate_normals(solid, right_face, &right_uvs)?;

        Ok(Self {
            coedge,
            left_face,
            right_face,
            params,
            points,
            tangents,
            left_uvs,
            right_uvs,
            left_normals,
            right_normals,
        })
    }

    /// Number of sample rows.
    pub fn num_samples(&self) -> usize {
        self.params.len()
    }

    /// Classifies the dihedral fold at the edge.
    ///
    /// If the average dot product of left and right unit normals reaches
    /// `cos(angle_tolerance)` the faces meet tangentially: [`Smooth`].
    /// Otherwise the sign of Σ (left × right) · tangent decides: positive
    /// is [`Convex`], non-positive [`Concave`]. The triple product flips
    /// sign twice under edge reversal (left/right swap and the tangent
    /// negates), so the classification is traversal-invariant.
    ///
    /// [`Smooth`]: EdgeConvexity::Smooth
    /// [`Convex`]: EdgeConvexity::Convex
    /// [`Concave`]: EdgeConvexity::Concave
    pub fn edge_convexity(&self, angle_tolerance: f64) -> EdgeConvexity {
        let n = self.num_samples() as f64;
        let average_dot: f64 = self
            .left_normals
            .iter()
            .zip(&self.right_normals)
            .map(|(l, r)| l.dot(r))
            .sum::<f64>()
            / n;
        if average_dot >= angle_tolerance.cos() {
            return EdgeConvexity::Smooth;
        }

        let signed: f64 = self
            .left_normals
            .iter()
            .zip(&self.right_normals)
            .zip(&self.tangents)
            .map(|((l, r), t)| l.cross(r).dot(t))
            .sum();
        if signed > 0.0 {
            EdgeConvexity::Convex
        } else {
            EdgeConvexity::Concave
        }
    }

    /// Validates that both faces' pcurves land within `tolerance` of the 3D
    /// edge points. Intended for testing and debugging.
    pub fn check_uvs(&self, solid: &Solid, tolerance: f64) -> bool {
        (0..self.num_samples()).all(|i| {
            let point = self.points[i];
            let on_left = solid.face_point(self.left_face, self.left_uvs[i]);
            let on_right = solid.face_point(self.right_face, self.right_uvs[i]);
            match (on_left, on_right) {
                (Some(l), Some(r)) => {
                    (point - l).norm() <= tolerance && (point - r).norm() <= tolerance
                }
                _ => false,
            }
        })
    }
}

fn evaluate_uvs(pcurve: &Curve2, params: &[f64]) -> Vec<Point2<f64>> {
    params.iter().map(|&t| pcurve.point(t)).collect()
}

fn evaluate_normals(
    solid: &Solid,
    face: FaceKey,
    uvs: &[Point2<f64>],
) -> Result<Vec<Vector3<f64>>> {
    uvs.iter()
        .map(|&uv| {
            solid
                .face_normal(face, uv)
                .ok_or(Error::DegenerateGeometry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_lite_kernel::primitives::make_box;

    #[test]
    fn samples_are_row_aligned() {
        let solid = make_box(1.0, 1.0, 1.0).unwrap();
        let edge = solid.edges().next().unwrap();
        let faces = solid.faces_of_edge(edge);

        let samples = EdgeSamples::extract(
            &solid,
            OrientedEdge::forward(edge),
            faces,
            10,
            Sampling::ArcLength,
        )
        .unwrap();
        assert_eq!(samples.num_samples(), 10);
        assert_eq!(samples.points.len(), 10);
        assert_eq!(samples.tangents.len(), 10);
        assert_eq!(samples.left_normals.len(), 10);
        assert_eq!(samples.right_normals.len(), 10);
        assert!(samples.check_uvs(&solid, 1e-9));
    }

    #[test]
    fn reversal_flips_points_and_tangents() {
        let solid = make_box(1.0, 1.0, 1.0).unwrap();
        let edge = solid.edges().next().unwrap();
        let faces = solid.faces_of_edge(edge);

        let fwd = EdgeSamples::extract(
            &solid,
            OrientedEdge::forward(edge),
            faces,
            5,
            Sampling::Uniform,
        )
        .unwrap();
        let rev = EdgeSamples::extract(
            &solid,
            OrientedEdge::backward(edge),
            faces,
            5,
            Sampling::Uniform,
        )
        .unwrap();

        for i in 0..5 {
            assert_eq!(fwd.points[i], rev.points[4 - i]);
            assert_eq!(fwd.tangents[i], -rev.tangents[4 - i]);
        }
        // Left and right swap under reversal.
        assert_eq!(fwd.left_face, rev.right_face);
        assert_eq!(fwd.right_face, rev.left_face);
    }
}
