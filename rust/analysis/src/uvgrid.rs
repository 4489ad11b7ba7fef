// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Regular grids of geometric samples over faces and edges.
//!
//! Feature-extraction pipelines consume fixed-size grids of points and
//! normals per face, and points or tangents per edge. The sample kind is a
//! closed tagged union dispatched to a typed evaluator; there is no
//! string-keyed method lookup.
//!
//! Grids are orientation-consistent: for a reversed face (or edge) the
//! sample rows are flipped along u so that grids of mating entities line
//! up. Undefined normals (e.g. sphere poles) are emitted as zero rows, and
//! entities without geometry yield `None`.

use nalgebra::Point2;

use brep_lite_kernel::{EdgeKey, FaceKey, OrientedEdge, Solid};

/// Quantity sampled over a face's (u, v) domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSample {
    /// 3D surface points.
    Point,
    /// Outward unit normals (zero where undefined).
    Normal,
}

/// Quantity sampled along an edge's parameter domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSample {
    /// 3D curve points.
    Point,
    /// Unit tangents in the traversal direction.
    Tangent,
}

/// A `num_u × num_v` grid of 3-vectors sampled over a face, row-major in u.
#[derive(Debug, Clone)]
pub struct FaceGrid {
    pub num_u: usize,
    pub num_v: usize,
    /// Sampled quantity per grid node.
    pub values: Vec<[f64; 3]>,
    /// (u, v) location of each grid node.
    pub uvs: Vec<[f64; 2]>,
}

impl FaceGrid {
    /// Value at grid node `(i, j)`.
    pub fn at(&self, i: usize, j: usize) -> [f64; 3] {
        self.values[i * self.num_v + j]
    }

    fn reverse_u(&mut self) {
        for i in 0..self.num_u / 2 {
            for j in 0..self.num_v {
                let (a, b) = (i * self.num_v + j, (self.num_u - 1 - i) * self.num_v + j);
                self.values.swap(a, b);
                self.uvs.swap(a, b);
            }
        }
    }
}

/// A 1D grid of 3-vectors sampled along an edge.
#[derive(Debug, Clone)]
pub struct EdgeGrid {
    /// Sampled quantity per node.
    pub values: Vec<[f64; 3]>,
    /// Curve parameter of each node.
    pub params: Vec<f64>,
}

/// Samples a `num_u × num_v` grid of the requested quantity over a face's
/// trimmed uv domain. Returns `None` for `num_u`/`num_v` < 2 or a missing
/// face.
pub fn uvgrid(
    solid: &Solid,
    face: FaceKey,
    num_u: usize,
    num_v: usize,
    kind: FaceSample,
) -> Option<FaceGrid> {
    if num_u < 2 || num_v < 2 {
        return None;
    }
    let (u_domain, v_domain) = solid.face_uv_domain(face)?;

    let mut grid = FaceGrid {
        num_u,
        num_v,
        values: Vec::with_capacity(num_u * num_v),
        uvs: Vec::with_capacity(num_u * num_v),
    };
    for i in 0..num_u {
        let u = u_domain.interpolate(i as f64 / (num_u - 1) as f64);
        for j in 0..num_v {
            let v = v_domain.interpolate(j as f64 / (num_v - 1) as f64);
            let uv = Point2::new(u, v);
            let value = match kind {
                FaceSample::Point => solid.face_point(face, uv)?.coords,
                FaceSample::Normal => solid
                    .face_normal(face, uv)
                    .unwrap_or_else(nalgebra::Vector3::zeros),
            };
            grid.values.push([value.x, value.y, value.z]);
            grid.uvs.push([u, v]);
        }
    }

    if solid.face_reversed(face) {
        grid.reverse_u();
    }
    Some(grid)
}

/// Samples `num_u` values of the requested quantity along an oriented
/// edge. Returns `None` for `num_u` < 2 or an edge without a curve.
pub fn ugrid(
    solid: &Solid,
    coedge: OrientedEdge,
    num_u: usize,
    kind: EdgeSample,
) -> Option<EdgeGrid> {
    if num_u < 2 {
        return None;
    }
    let domain = solid.edge_domain(coedge.edge)?;

    let mut grid = EdgeGrid {
        values: Vec::with_capacity(num_u),
        params: Vec::with_capacity(num_u),
    };
    for i in 0..num_u {
        let t = domain.interpolate(i as f64 / (num_u - 1) as f64);
        let value = match kind {
            EdgeSample::Point => solid.edge_point(coedge.edge, t)?.coords,
            EdgeSample::Tangent => {
                let tangent = solid.edge_tangent(coedge.edge, t)?;
                if coedge.reversed {
                    -tangent
                } else {
                    tangent
                }
            }
        };
        grid.values.push([value.x, value.y, value.z]);
        grid.params.push(t);
    }

    if coedge.reversed {
        grid.values.reverse();
        grid.params.reverse();
    }
    Some(grid)
}

/// Convenience: sample an edge by key in its curve's own direction.
pub fn ugrid_forward(
    solid: &Solid,
    edge: EdgeKey,
    num_u: usize,
    kind: EdgeSample,
) -> Option<EdgeGrid> {
    ugrid(solid, OrientedEdge::forward(edge), num_u, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use brep_lite_kernel::primitives::{make_box, make_box_with_blind_hole, make_sphere};

    #[test]
    fn face_point_grid_covers_the_domain() {
        let solid = make_box(2.0, 2.0, 2.0).unwrap();
        let face = solid.faces().next().unwrap();
        let grid = uvgrid(&solid, face, 5, 3, FaceSample::Point).unwrap();
        assert_eq!(grid.values.len(), 15);

        let (u_domain, v_domain) = solid.face_uv_domain(face).unwrap();
        assert_relative_eq!(grid.uvs[0][0], u_domain.min());
        assert_relative_eq!(grid.uvs[14][0], u_domain.max());
        assert_relative_eq!(grid.uvs[14][1], v_domain.max());
    }

    #[test]
    fn reversed_face_flips_u_order() {
        let solid = make_box_with_blind_hole(4.0, 4.0, 2.0, 1.0, 1.5).unwrap();
        let wall = solid.faces().find(|&f| solid.face_reversed(f)).unwrap();

        let grid = uvgrid(&solid, wall, 4, 3, FaceSample::Point).unwrap();
        let (u_domain, _) = solid.face_uv_domain(wall).unwrap();
        // First row now holds the largest u.
        assert_relative_eq!(grid.uvs[0][0], u_domain.max());
    }

    #[test]
    fn normals_at_sphere_poles_are_zero() {
        let solid = make_sphere(1.0).unwrap();
        let face = solid.faces().next().unwrap();
        let grid = uvgrid(&solid, face, 4, 5, FaceSample::Normal).unwrap();
        // v spans the full latitude range, so the first and last columns sit
        // on the poles.
        assert_eq!(grid.at(0, 0), [0.0, 0.0, 0.0]);
        assert_eq!(grid.at(0, 4), [0.0, 0.0, 0.0]);
        let equator = grid.at(0, 2);
        assert_relative_eq!(
            (equator[0] * equator[0] + equator[1] * equator[1] + equator[2] * equator[2]).sqrt(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn degenerate_edge_yields_no_grid() {
        let solid = make_sphere(1.0).unwrap();
        let pole = solid.edges().find(|&e| !solid.edge_has_curve(e)).unwrap();
        assert!(ugrid_forward(&solid, pole, 5, EdgeSample::Point).is_none());
    }

    #[test]
    fn reversed_edge_reverses_and_negates_tangents() {
        let solid = make_box(1.0, 1.0, 1.0).unwrap();
        let edge = solid.edges().next().unwrap();
        let fwd = ugrid(&solid, OrientedEdge::forward(edge), 4, EdgeSample::Tangent).unwrap();
        let rev = ugrid(&solid, OrientedEdge::backward(edge), 4, EdgeSample::Tangent).unwrap();
        for i in 0..4 {
            for c in 0..3 {
                assert_relative_eq!(fwd.values[i][c], -rev.values[3 - i][c]);
            }
        }
    }
}
