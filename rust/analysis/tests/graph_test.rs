// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adjacency-graph construction: arc symmetry, seam self-loops, and the
//! rejection of unsuitable solids.

use brep_lite_analysis::{face_adjacency, vertex_adjacency, AdjacencyGraph, Error};
use brep_lite_kernel::primitives::{
    make_box, make_box_with_blind_hole, make_cylinder, make_fillet_strip, make_sphere,
};
use brep_lite_kernel::{Curve3, Interval, OrientedEdge, Solid, Surface};
use nalgebra::{Point3, Vector3};

/// Every non-loop arc (a, b) must have a mirror arc (b, a) over the same
/// edge whose coedge is the topological reversal.
fn assert_arc_symmetry<K>(graph: &AdjacencyGraph<K>) {
    for arc in &graph.arcs {
        if arc.source == arc.target {
            continue;
        }
        let mirror = graph
            .arcs
            .iter()
            .find(|m| {
                m.source == arc.target
                    && m.target == arc.source
                    && m.edge_index == arc.edge_index
                    && m.coedge == arc.coedge.opposite()
            });
        assert!(
            mirror.is_some(),
            "arc {} -> {} over edge {} has no reversed mirror",
            arc.source,
            arc.target,
            arc.edge_index
        );
    }
}

#[test]
fn face_and_vertex_arcs_come_in_reversed_pairs() {
    for solid in [
        make_box(1.0, 1.0, 1.0).unwrap(),
        make_cylinder(1.0, 2.0).unwrap(),
        make_box_with_blind_hole(4.0, 4.0, 2.0, 1.0, 1.5).unwrap(),
    ] {
        assert_arc_symmetry(&face_adjacency(&solid, true).unwrap());
        assert_arc_symmetry(&vertex_adjacency(&solid, true).unwrap());
    }
}

#[test]
fn cylinder_seam_becomes_a_self_loop_on_request() {
    let solid = make_cylinder(1.0, 2.0).unwrap();

    let without = face_adjacency(&solid, false).unwrap();
    // Two circle edges with two incident faces each, two arcs per edge.
    assert_eq!(without.num_arcs(), 4);
    assert!(without.arcs.iter().all(|a| a.source != a.target));

    let with = face_adjacency(&solid, true).unwrap();
    assert_eq!(with.num_arcs(), 5);
    let loops: Vec<_> = with.arcs.iter().filter(|a| a.source == a.target).collect();
    assert_eq!(loops.len(), 1);
    // The self-loop sits on the lateral face, carrying the seam forward.
    assert!(!loops[0].coedge.reversed);
    let lateral = with.nodes[loops[0].source];
    assert!(solid.edge_is_seam(loops[0].edge, lateral));
}

#[test]
fn cylinder_ring_edges_become_vertex_self_loops_on_request() {
    let solid = make_cylinder(1.0, 2.0).unwrap();

    // Only the seam joins the two ring vertices.
    let without = vertex_adjacency(&solid, false).unwrap();
    assert_eq!(without.num_nodes, 2);
    assert_eq!(without.num_arcs(), 2);

    // The two circles are single-vertex closed curves.
    let with = vertex_adjacency(&solid, true).unwrap();
    assert_eq!(with.num_arcs(), 4);
    assert_eq!(
        with.arcs.iter().filter(|a| a.source == a.target).count(),
        2
    );
}

#[test]
fn sphere_pole_edges_are_skipped() {
    let solid = make_sphere(1.0).unwrap();

    // The only arc-producing edge is the meridian seam.
    let faces = face_adjacency(&solid, true).unwrap();
    assert_eq!(faces.num_nodes, 1);
    assert_eq!(faces.num_arcs(), 1);
    assert_eq!(faces.arcs[0].source, faces.arcs[0].target);

    let verts = vertex_adjacency(&solid, true).unwrap();
    assert_eq!(verts.num_nodes, 2);
    // Degenerate pole edges contribute nothing, even with self-loops on.
    assert_eq!(verts.num_arcs(), 2);
    assert_arc_symmetry(&verts);
}

#[test]
fn open_solid_is_rejected() {
    let solid = make_fillet_strip(0.25, 2.0).unwrap();
    assert!(matches!(
        face_adjacency(&solid, false),
        Err(Error::OpenSolid)
    ));
    assert!(matches!(
        vertex_adjacency(&solid, false),
        Err(Error::OpenSolid)
    ));
}

#[test]
fn duplicate_coedges_are_rejected() {
    let mut solid = Solid::new();
    let v = solid.add_vertex(Point3::new(1.0, 0.0, 0.0));
    let circle = solid
        .add_edge(
            Curve3::Circle {
                center: Point3::origin(),
                x_axis: Vector3::x(),
                y_axis: Vector3::y(),
                radius: 1.0,
            },
            Interval::new(0.0, 2.0 * std::f64::consts::PI),
            v,
            v,
        )
        .unwrap();
    let plane = Surface::Plane {
        origin: Point3::origin(),
        x_axis: Vector3::x(),
        y_axis: Vector3::y(),
    };
    let uv = (Interval::new(-1.0, 1.0), Interval::new(-1.0, 1.0));
    let w1 = solid.add_wire(vec![OrientedEdge::forward(circle)]).unwrap();
    let w2 = solid.add_wire(vec![OrientedEdge::forward(circle)]).unwrap();
    solid.add_face(plane.clone(), vec![w1], false, uv).unwrap();
    solid.add_face(plane, vec![w2], true, uv).unwrap();

    assert!(matches!(
        face_adjacency(&solid, false),
        Err(Error::DuplicateCoedge(_))
    ));
}

#[test]
fn graphs_serialize_to_json() {
    let solid = make_box(1.0, 1.0, 1.0).unwrap();
    let graph = face_adjacency(&solid, false).unwrap();

    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["num_nodes"], 6);
    assert_eq!(json["arcs"].as_array().unwrap().len(), 24);
    let arc = &json["arcs"][0];
    for field in ["source", "target", "edge_index", "coedge_index"] {
        assert!(arc.get(field).is_some());
    }
    // Kernel keys stay out of the serialized form.
    assert!(arc.get("edge").is_none());
}
