// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction methods for solid entities.
//!
//! Each entity is created through the arena, which checks referential
//! integrity (all referenced sub-entities must exist), records the
//! deterministic walk order, and maintains the upward adjacency maps.
//! Construction happens once per solid, before any analysis runs.

use nalgebra::Point3;

use crate::curve::{Curve2, Curve3};
use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::keys::*;
use crate::solid::{
    EdgeData, EdgeGeometry, FaceData, Solid, VertexData, WireData, DEFAULT_EDGE_TOLERANCE,
};
use crate::surface::Surface;

impl Solid {
    /// Adds a vertex at the given 3D point.
    pub fn add_vertex(&mut self, point: Point3<f64>) -> VertexKey {
        let key = self.vertices.insert(VertexData { point });
        self.vertex_order.push(key);
        key
    }

    /// Adds an edge carrying a trimmed 3D curve between two existing
    /// vertices. Pass the same vertex twice for a ring edge (e.g. a full
    /// circle).
    pub fn add_edge(
        &mut self,
        curve: Curve3,
        domain: Interval,
        start: VertexKey,
        end: VertexKey,
    ) -> Result<EdgeKey> {
        self.check_vertex(start)?;
        self.check_vertex(end)?;

        let key = self.edges.insert(EdgeData {
            geometry: Some(EdgeGeometry { curve, domain }),
            start,
            end,
            tolerance: DEFAULT_EDGE_TOLERANCE,
        });
        self.edge_order.push(key);
        Ok(key)
    }

    /// Adds a degenerate edge without a 3D curve (e.g. the edge at the pole
    /// of a sphere).
    pub fn add_degenerate_edge(&mut self, start: VertexKey, end: VertexKey) -> Result<EdgeKey> {
        self.check_vertex(start)?;
        self.check_vertex(end)?;

        let key = self.edges.insert(EdgeData {
            geometry: None,
            start,
            end,
            tolerance: DEFAULT_EDGE_TOLERANCE,
        });
        self.edge_order.push(key);
        Ok(key)
    }

    /// Adds a wire from an ordered, non-empty loop of oriented edges and
    /// links it into the edge → wire adjacency.
    pub fn add_wire(&mut self, coedges: Vec<OrientedEdge>) -> Result<WireKey> {
        if coedges.is_empty() {
            return Err(Error::EmptyWire);
        }
        for ce in &coedges {
            if !self.edges.contains_key(ce.edge) {
                return Err(Error::EdgeNotFound(ce.edge));
            }
        }

        let key = self.wires.insert(WireData {
            coedges: coedges.clone(),
        });
        self.wire_order.push(key);

        for ce in &coedges {
            let wires = self.edge_to_wires.entry(ce.edge).or_default();
            if !wires.contains(&key) {
                wires.push(key);
            }
        }
        Ok(key)
    }

    /// Adds a face bounded by existing wires (outer wire first) and links it
    /// into the wire → face and edge → face adjacency. Each wire can bound
    /// only one face.
    pub fn add_face(
        &mut self,
        surface: Surface,
        wires: Vec<WireKey>,
        reversed: bool,
        uv_domain: (Interval, Interval),
    ) -> Result<FaceKey> {
        for &wire in &wires {
            if !self.wires.contains_key(wire) {
                return Err(Error::WireNotFound(wire));
            }
            if self.wire_to_face.contains_key(&wire) {
                return Err(Error::WireAlreadyBound(wire));
            }
        }

        let key = self.faces.insert(FaceData {
            surface,
            wires: wires.clone(),
            reversed,
            uv_domain,
            pcurves: Default::default(),
        });
        self.face_order.push(key);

        for &wire in &wires {
            self.wire_to_face.insert(wire, key);
            // Collect the face's edges into the upward adjacency, keeping
            // incident-face lists unique.
            let coedges: Vec<EdgeKey> = self.wires[wire]
                .coedges
                .iter()
                .map(|ce| ce.edge)
                .collect();
            for edge in coedges {
                let faces = self.edge_to_faces.entry(edge).or_default();
                if !faces.contains(&key) {
                    faces.push(key);
                }
            }
        }
        Ok(key)
    }

    /// Registers the pcurve of an edge on a face for one traversal sense.
    /// Seam edges need one registration per sense.
    pub fn add_pcurve(
        &mut self,
        face: FaceKey,
        edge: EdgeKey,
        reversed: bool,
        pcurve: Curve2,
    ) -> Result<()> {
        if !self.edges.contains_key(edge) {
            return Err(Error::EdgeNotFound(edge));
        }
        let face_data = self.faces.get_mut(face).ok_or(Error::FaceNotFound(face))?;
        face_data.pcurves.insert((edge, reversed), pcurve);
        Ok(())
    }

    /// Registers the same pcurve for both traversal senses of an ordinary
    /// (non-seam) edge.
    pub fn add_pcurve_both(&mut self, face: FaceKey, edge: EdgeKey, pcurve: Curve2) -> Result<()> {
        self.add_pcurve(face, edge, false, pcurve.clone())?;
        self.add_pcurve(face, edge, true, pcurve)
    }

    fn check_vertex(&self, key: VertexKey) -> Result<()> {
        if self.vertices.contains_key(key) {
            Ok(())
        } else {
            Err(Error::VertexNotFound(key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn line_between(a: Point3<f64>, b: Point3<f64>) -> (Curve3, Interval) {
        let dir = (b - a).normalize();
        let len = (b - a).norm();
        (Curve3::Line { origin: a, dir }, Interval::new(0.0, len))
    }

    #[test]
    fn add_edge_requires_existing_vertices() {
        let mut solid = Solid::new();
        let v0 = solid.add_vertex(Point3::new(0.0, 0.0, 0.0));

        let mut other = Solid::new();
        let foreign = other.add_vertex(Point3::new(1.0, 0.0, 0.0));

        let (curve, domain) = line_between(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        assert!(matches!(
            solid.add_edge(curve, domain, v0, foreign),
            Err(Error::VertexNotFound(_))
        ));
    }

    #[test]
    fn empty_wire_is_rejected() {
        let mut solid = Solid::new();
        assert!(matches!(solid.add_wire(Vec::new()), Err(Error::EmptyWire)));
    }

    #[test]
    fn wire_cannot_bound_two_faces() {
        let mut solid = Solid::new();
        let v = solid.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let circle = Curve3::Circle {
            center: Point3::new(0.0, 0.0, 0.0),
            x_axis: Vector3::new(1.0, 0.0, 0.0),
            y_axis: Vector3::new(0.0, 1.0, 0.0),
            radius: 1.0,
        };
        let e = solid
            .add_edge(
                circle,
                Interval::new(0.0, 2.0 * std::f64::consts::PI),
                v,
                v,
            )
            .unwrap();
        let w = solid.add_wire(vec![OrientedEdge::forward(e)]).unwrap();

        let plane = || Surface::Plane {
            origin: Point3::new(0.0, 0.0, 0.0),
            x_axis: Vector3::new(1.0, 0.0, 0.0),
            y_axis: Vector3::new(0.0, 1.0, 0.0),
        };
        let uv = (Interval::new(-1.0, 1.0), Interval::new(-1.0, 1.0));
        solid.add_face(plane(), vec![w], false, uv).unwrap();
        assert!(matches!(
            solid.add_face(plane(), vec![w], false, uv),
            Err(Error::WireAlreadyBound(_))
        ));
    }

    #[test]
    fn walk_order_is_insertion_order() {
        let mut solid = Solid::new();
        let a = solid.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = solid.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = solid.add_vertex(Point3::new(2.0, 0.0, 0.0));
        let walked: Vec<_> = solid.vertices().collect();
        assert_eq!(walked, vec![a, b, c]);
    }
}
