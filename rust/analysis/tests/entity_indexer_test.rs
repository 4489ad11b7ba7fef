// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Index bijection and coedge coverage over the reference solids.

use brep_lite_analysis::{EntityIndexer, Error};
use brep_lite_kernel::primitives::{
    make_box, make_box_with_blind_hole, make_cylinder, make_fillet_strip, make_sphere,
};
use brep_lite_kernel::{Curve3, Interval, OrientedEdge, Solid, Surface};
use nalgebra::{Point3, Vector3};

fn reference_solids() -> Vec<Solid> {
    vec![
        make_box(1.0, 2.0, 3.0).unwrap(),
        make_cylinder(1.0, 2.0).unwrap(),
        make_sphere(1.5).unwrap(),
        make_box_with_blind_hole(4.0, 4.0, 2.0, 1.0, 1.5).unwrap(),
        make_fillet_strip(0.25, 2.0).unwrap(),
    ]
}

/// Indices of every entity kind must exactly cover `0..N`: no gaps, no
/// repeats, assigned in walk order.
#[test]
fn indices_are_a_bijection_onto_contiguous_ranges() {
    for solid in reference_solids() {
        let indexer = EntityIndexer::new(&solid);

        let face_indices: Vec<usize> = solid
            .faces()
            .map(|f| indexer.face_index(f).unwrap())
            .collect();
        assert_eq!(face_indices, (0..indexer.num_faces()).collect::<Vec<_>>());

        let wire_indices: Vec<usize> = solid
            .wires()
            .map(|w| indexer.wire_index(w).unwrap())
            .collect();
        assert_eq!(wire_indices, (0..indexer.num_wires()).collect::<Vec<_>>());

        let edge_indices: Vec<usize> = solid
            .edges()
            .map(|e| indexer.edge_index(e).unwrap())
            .collect();
        assert_eq!(edge_indices, (0..indexer.num_edges()).collect::<Vec<_>>());

        let vertex_indices: Vec<usize> = solid
            .vertices()
            .map(|v| indexer.vertex_index(v).unwrap())
            .collect();
        assert_eq!(
            vertex_indices,
            (0..indexer.num_vertices()).collect::<Vec<_>>()
        );
    }
}

/// Coedges are indexed in wire-traversal order and every wire coedge is
/// known to the indexer.
#[test]
fn wire_coedges_are_covered_in_traversal_order() {
    for solid in reference_solids() {
        let indexer = EntityIndexer::new(&solid);
        let mut expected = 0;
        for wire in solid.wires() {
            for &coedge in solid.wire_coedges(wire).unwrap() {
                assert!(indexer.oriented_edge_exists(coedge));
                assert_eq!(indexer.oriented_edge_index(coedge).unwrap(), expected);
                expected += 1;
            }
        }
        assert_eq!(indexer.num_oriented_edges(), expected);
    }
}

/// On an open shell, a boundary edge is used in exactly one direction; the
/// interior edge keeps both.
#[test]
fn open_boundary_edges_have_one_direction() {
    let solid = make_fillet_strip(0.25, 2.0).unwrap();
    let indexer = EntityIndexer::new(&solid);

    for edge in solid.edges() {
        let fwd = indexer.oriented_edge_exists(OrientedEdge::forward(edge));
        let rev = indexer.oriented_edge_exists(OrientedEdge::backward(edge));
        let directions = usize::from(fwd) + usize::from(rev);
        if solid.faces_of_edge(edge).len() == 2 {
            assert_eq!(directions, 2);
        } else {
            assert_eq!(directions, 1);
        }
    }

    // Looking up the absent direction is an error, not a panic.
    let boundary = solid
        .edges()
        .find(|&e| solid.faces_of_edge(e).len() == 1)
        .unwrap();
    let missing = if indexer.oriented_edge_exists(OrientedEdge::forward(boundary)) {
        OrientedEdge::backward(boundary)
    } else {
        OrientedEdge::forward(boundary)
    };
    assert!(matches!(
        indexer.oriented_edge_index(missing),
        Err(Error::OrientedEdgeNotIndexed(_))
    ));
}

/// A solid that uses the same (edge, direction) twice across wires: the
/// first use keeps its index, the reuse is flagged, nothing crashes.
#[test]
fn duplicate_coedges_are_flagged_not_overwritten() {
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

    let plane = |z: f64| Surface::Plane {
        origin: Point3::new(0.0, 0.0, z),
        x_axis: Vector3::x(),
        y_axis: Vector3::y(),
    };
    let uv = (Interval::new(-1.0, 1.0), Interval::new(-1.0, 1.0));
    // Both wires take the circle forward, a data-quality defect.
    let w1 = solid.add_wire(vec![OrientedEdge::forward(circle)]).unwrap();
    let w2 = solid.add_wire(vec![OrientedEdge::forward(circle)]).unwrap();
    solid.add_face(plane(0.0), vec![w1], false, uv).unwrap();
    solid.add_face(plane(0.0), vec![w2], true, uv).unwrap();

    let indexer = EntityIndexer::new(&solid);
    assert!(indexer.has_duplicate_coedges());
    assert_eq!(indexer.duplicate_coedges().len(), 1);
    // Warn-and-keep-first: the coedge still resolves to its first index.
    assert_eq!(
        indexer
            .oriented_edge_index(OrientedEdge::forward(circle))
            .unwrap(),
        0
    );
}
