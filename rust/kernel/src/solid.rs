// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for one B-rep solid.
//!
//! The [`Solid`] is the central owner of all topology and geometry. Entities
//! (vertices, edges, wires, faces) live inside slot maps with stable,
//! type-safe keys; insertion-ordered key vectors provide the deterministic
//! topology walk, and upward adjacency maps enable edge → wire and
//! edge → face traversal.
//!
//! A solid is assembled once (see [`crate::construction`]) and then queried
//! read-only; nothing here mutates incrementally during analysis.

use nalgebra::{Point2, Point3, Vector3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::curve::{Curve2, Curve3};
use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::keys::*;
use crate::surface::Surface;

/// Default deviation tolerance assigned to edges at construction.
pub const DEFAULT_EDGE_TOLERANCE: f64 = 1e-7;

/// A 3D curve trimmed to a parameter domain.
#[derive(Debug, Clone)]
pub struct EdgeGeometry {
    pub curve: Curve3,
    pub domain: Interval,
}

/// Data stored for a vertex: a point in 3D space.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub point: Point3<f64>,
}

/// Data stored for an edge.
///
/// `geometry` is `None` for degenerate edges that carry no 3D curve, such as
/// the edge at the pole of a sphere. A ring edge (closed loop bounded by a
/// single vertex) has `start == end`.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub geometry: Option<EdgeGeometry>,
    pub start: VertexKey,
    pub end: VertexKey,
    /// The 3D curve should not deviate from adjacent surfaces by more than
    /// this value.
    pub tolerance: f64,
}

/// Data stored for a wire: an ordered closed loop of oriented edges.
#[derive(Debug, Clone)]
pub struct WireData {
    pub coedges: Vec<OrientedEdge>,
}

/// Data stored for a face: a surface region bounded by wires.
///
/// `reversed == true` means the face's outward normal is the negated surface
/// normal. Pcurves are keyed by `(edge, sense)` so a seam edge can carry one
/// pcurve per side of a periodic parameter domain; for ordinary edges both
/// senses map to the same pcurve.
#[derive(Debug, Clone)]
pub struct FaceData {
    pub surface: Surface,
    pub wires: Vec<WireKey>,
    pub reversed: bool,
    pub uv_domain: (Interval, Interval),
    pub(crate) pcurves: FxHashMap<(EdgeKey, bool), Curve2>,
}

/// The arena that owns one solid's topology and geometry.
#[derive(Debug, Default)]
pub struct Solid {
    pub(crate) vertices: SlotMap<VertexKey, VertexData>,
    pub(crate) edges: SlotMap<EdgeKey, EdgeData>,
    pub(crate) wires: SlotMap<WireKey, WireData>,
    pub(crate) faces: SlotMap<FaceKey, FaceData>,

    // Deterministic topology-walk order (insertion order).
    pub(crate) vertex_order: Vec<VertexKey>,
    pub(crate) edge_order: Vec<EdgeKey>,
    pub(crate) wire_order: Vec<WireKey>,
    pub(crate) face_order: Vec<FaceKey>,

    // Upward adjacency: child → parents.
    pub(crate) edge_to_wires: FxHashMap<EdgeKey, Vec<WireKey>>,
    pub(crate) edge_to_faces: FxHashMap<EdgeKey, SmallVec<[FaceKey; 2]>>,
    pub(crate) wire_to_face: FxHashMap<WireKey, FaceKey>,
}

impl Solid {
    /// Creates a new, empty solid arena.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Topology walk ---

    /// Faces in deterministic walk order.
    pub fn faces(&self) -> impl Iterator<Item = FaceKey> + '_ {
        self.face_order.iter().copied()
    }

    /// Wires in deterministic walk order.
    pub fn wires(&self) -> impl Iterator<Item = WireKey> + '_ {
        self.wire_order.iter().copied()
    }

    /// Edges in deterministic walk order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edge_order.iter().copied()
    }

    /// Vertices in deterministic walk order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexKey> + '_ {
        self.vertex_order.iter().copied()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    // --- Entity access ---

    /// Returns the vertex data for the given key, or `None` if not found.
    pub fn vertex(&self, key: VertexKey) -> Option<&VertexData> {
        self.vertices.get(key)
    }

    /// Returns the edge data for the given key, or `None` if not found.
    pub fn edge(&self, key: EdgeKey) -> Option<&EdgeData> {
        self.edges.get(key)
    }

    /// Returns the wire data for the given key, or `None` if not found.
    pub fn wire(&self, key: WireKey) -> Option<&WireData> {
        self.wires.get(key)
    }

    /// Returns the face data for the given key, or `None` if not found.
    pub fn face(&self, key: FaceKey) -> Option<&FaceData> {
        self.faces.get(key)
    }

    // --- Downward and upward traversal ---

    /// Oriented edges of a wire in traversal order.
    pub fn wire_coedges(&self, key: WireKey) -> Option<&[OrientedEdge]> {
        self.wires.get(key).map(|w| w.coedges.as_slice())
    }

    /// Wires of a face, outer wire first.
    pub fn face_wires(&self, key: FaceKey) -> Option<&[WireKey]> {
        self.faces.get(key).map(|f| f.wires.as_slice())
    }

    /// Unique faces incident to an edge, in first-use order.
    pub fn faces_of_edge(&self, key: EdgeKey) -> &[FaceKey] {
        self.edge_to_faces
            .get(&key)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Wires using an edge, in first-use order.
    pub fn wires_of_edge(&self, key: EdgeKey) -> &[WireKey] {
        self.edge_to_wires
            .get(&key)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The face a wire bounds.
    pub fn face_of_wire(&self, key: WireKey) -> Option<FaceKey> {
        self.wire_to_face.get(&key).copied()
    }

    /// Start and end vertex of an edge (equal for a ring edge).
    pub fn edge_vertices(&self, key: EdgeKey) -> Option<(VertexKey, VertexKey)> {
        self.edges.get(key).map(|e| (e.start, e.end))
    }

    /// The 3D position of a vertex.
    pub fn vertex_point(&self, key: VertexKey) -> Option<Point3<f64>> {
        self.vertices.get(key).map(|v| v.point)
    }

    // --- Edge geometry queries ---

    /// Whether the edge carries a 3D curve. Some edges don't, e.g. the edge
    /// at the pole of a sphere.
    pub fn edge_has_curve(&self, key: EdgeKey) -> bool {
        self.edges
            .get(key)
            .is_some_and(|e| e.geometry.is_some())
    }

    /// Parameter domain of the edge curve, or `None` for a degenerate edge.
    pub fn edge_domain(&self, key: EdgeKey) -> Option<Interval> {
        self.edges
            .get(key)
            .and_then(|e| e.geometry.as_ref())
            .map(|g| g.domain)
    }

    /// Evaluates the edge curve at parameter `t`.
    pub fn edge_point(&self, key: EdgeKey, t: f64) -> Option<Point3<f64>> {
        self.edges
            .get(key)
            .and_then(|e| e.geometry.as_ref())
            .map(|g| g.curve.point(t))
    }

    /// Unit tangent of the edge curve at parameter `t`, in the curve's own
    /// direction. Returns `None` for a degenerate edge or a vanishing
    /// derivative; traversal-direction negation is the caller's concern.
    pub fn edge_tangent(&self, key: EdgeKey, t: f64) -> Option<Vector3<f64>> {
        let geometry = self.edges.get(key)?.geometry.as_ref()?;
        let der = geometry.curve.derivative(t);
        let norm = der.norm();
        if norm <= f64::EPSILON {
            return None;
        }
        Some(der / norm)
    }

    /// Whether the edge's 3D curve closes on itself (start and end points
    /// coincide). `false` for degenerate edges.
    pub fn edge_closed_curve(&self, key: EdgeKey) -> bool {
        self.edges
            .get(key)
            .and_then(|e| e.geometry.as_ref())
            .is_some_and(|g| g.curve.is_closed(&g.domain))
    }

    /// Whether the edge forms a closed ring, i.e. its start and end vertices
    /// are the same.
    pub fn edge_closed_ring(&self, key: EdgeKey) -> bool {
        self.edges.get(key).is_some_and(|e| e.start == e.end)
    }

    /// Whether the edge is a seam on the given face: incident to that face
    /// only, but used twice by its wires (once per direction), as on a
    /// periodic surface.
    pub fn edge_is_seam(&self, edge: EdgeKey, face: FaceKey) -> bool {
        let Some(face_data) = self.faces.get(face) else {
            return false;
        };
        let mut uses = 0;
        for &wire in &face_data.wires {
            if let Some(wire_data) = self.wires.get(wire) {
                uses += wire_data
                    .coedges
                    .iter()
                    .filter(|ce| ce.edge == edge)
                    .count();
            }
        }
        uses >= 2
    }

    /// Deviation tolerance of the edge.
    pub fn edge_tolerance(&self, key: EdgeKey) -> Option<f64> {
        self.edges.get(key).map(|e| e.tolerance)
    }

    // --- Face geometry queries ---

    /// Whether the face's outward normal is the negated surface normal.
    pub fn face_reversed(&self, key: FaceKey) -> bool {
        self.faces.get(key).is_some_and(|f| f.reversed)
    }

    /// Trimmed (u, v) parameter bounds of the face.
    pub fn face_uv_domain(&self, key: FaceKey) -> Option<(Interval, Interval)> {
        self.faces.get(key).map(|f| f.uv_domain)
    }

    /// Evaluates the face surface at the given parameters.
    pub fn face_point(&self, key: FaceKey, uv: Point2<f64>) -> Option<Point3<f64>> {
        self.faces.get(key).map(|f| f.surface.point(uv))
    }

    /// Unit outward normal of the face at the given parameters, corrected
    /// for the face's `reversed` flag. `None` where the surface normal
    /// degenerates.
    pub fn face_normal(&self, key: FaceKey, uv: Point2<f64>) -> Option<Vector3<f64>> {
        let face = self.faces.get(key)?;
        let normal = face.surface.normal(uv)?;
        Some(if face.reversed { -normal } else { normal })
    }

    /// The pcurve of an oriented edge on the given face.
    ///
    /// The pcurve is parameter-aligned with the edge's 3D curve. For a seam
    /// edge the two senses select the two sides of the face's parameter
    /// domain; for ordinary edges both senses yield the same pcurve.
    pub fn pcurve(&self, face: FaceKey, coedge: OrientedEdge) -> Option<&Curve2> {
        self.faces
            .get(face)?
            .pcurves
            .get(&(coedge.edge, coedge.reversed))
    }

    /// Whether the face lies on the left-hand side of the oriented edge.
    ///
    /// ```text
    ///          edge direction
    ///                ^
    ///        left    |    right
    ///        face    |    face
    ///                |
    /// ```
    ///
    /// The face is left of the edge when one of its wires traverses the edge
    /// in the same direction as `coedge`. A face whose wires use both
    /// directions (a seam) is on both sides and tests `true`. Fails with
    /// [`Error::EdgeNotOnFace`] if no wire of the face uses the edge at all.
    pub fn is_left_of(&self, face: FaceKey, coedge: OrientedEdge) -> Result<bool> {
        let face_data = self
            .faces
            .get(face)
            .ok_or(Error::FaceNotFound(face))?;

        let mut found = false;
        for &wire in &face_data.wires {
            let Some(wire_data) = self.wires.get(wire) else {
                continue;
            };
            for ce in &wire_data.coedges {
                if ce.edge == coedge.edge {
                    if ce.reversed == coedge.reversed {
                        return Ok(true);
                    }
                    found = true;
                }
            }
        }

        if found {
            Ok(false)
        } else {
            Err(Error::EdgeNotOnFace {
                edge: coedge.edge,
                face,
            })
        }
    }

    // --- Validity ---

    /// Whether the solid is closed: every edge is used by at least one wire.
    /// Open-boundary edges (adjacent to a hole in the shell) make this
    /// `false`.
    pub fn is_closed(&self) -> bool {
        self.edge_order
            .iter()
            .all(|e| self.edge_to_wires.contains_key(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{make_box, make_cylinder};

    #[test]
    fn new_solid_is_empty() {
        let solid = Solid::new();
        assert_eq!(solid.num_vertices(), 0);
        assert_eq!(solid.num_edges(), 0);
        assert_eq!(solid.num_wires(), 0);
        assert_eq!(solid.num_faces(), 0);
        assert!(solid.is_closed());
    }

    #[test]
    fn box_counts_and_closedness() {
        let solid = make_box(1.0, 1.0, 1.0).unwrap();
        assert_eq!(solid.num_vertices(), 8);
        assert_eq!(solid.num_edges(), 12);
        assert_eq!(solid.num_wires(), 6);
        assert_eq!(solid.num_faces(), 6);
        assert!(solid.is_closed());
    }

    #[test]
    fn box_edges_have_two_incident_faces() {
        let solid = make_box(2.0, 1.0, 3.0).unwrap();
        for edge in solid.edges() {
            assert_eq!(solid.faces_of_edge(edge).len(), 2);
        }
    }

    #[test]
    fn box_left_and_right_face_disagree() {
        let solid = make_box(1.0, 1.0, 1.0).unwrap();
        for edge in solid.edges() {
            let faces = solid.faces_of_edge(edge);
            let fwd = OrientedEdge::forward(edge);
            let left0 = solid.is_left_of(faces[0], fwd).unwrap();
            let left1 = solid.is_left_of(faces[1], fwd).unwrap();
            // Exactly one of the two incident faces traverses the edge
            // forward.
            assert_ne!(left0, left1);
        }
    }

    #[test]
    fn cylinder_seam_detection() {
        let solid = make_cylinder(1.0, 2.0).unwrap();
        let seams: Vec<_> = solid
            .edges()
            .filter(|&e| {
                let faces = solid.faces_of_edge(e);
                faces.len() == 1 && solid.edge_is_seam(e, faces[0])
            })
            .collect();
        assert_eq!(seams.len(), 1);

        // The seam's single face is on both sides of the edge.
        let seam = seams[0];
        let face = solid.faces_of_edge(seam)[0];
        assert!(solid.is_left_of(face, OrientedEdge::forward(seam)).unwrap());
        assert!(solid
            .is_left_of(face, OrientedEdge::backward(seam))
            .unwrap());
    }

    #[test]
    fn cylinder_ring_edges() {
        let solid = make_cylinder(1.0, 2.0).unwrap();
        let rings: Vec<_> = solid
            .edges()
            .filter(|&e| solid.edge_closed_ring(e))
            .collect();
        assert_eq!(rings.len(), 2);
        for ring in rings {
            assert!(solid.edge_closed_curve(ring));
        }
    }

    #[test]
    fn is_left_of_rejects_foreign_edge() {
        let solid = make_box(1.0, 1.0, 1.0).unwrap();
        let edge = solid.edges().next().unwrap();
        // Find a face not incident to this edge.
        let foreign = solid
            .faces()
            .find(|f| !solid.faces_of_edge(edge).contains(f))
            .unwrap();
        assert!(matches!(
            solid.is_left_of(foreign, OrientedEdge::forward(edge)),
            Err(Error::EdgeNotOnFace { .. })
        ));
    }
}
