// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dense integer indices for the entities of one solid.
//!
//! The [`EntityIndexer`] maps faces, wires, edges, vertices, and *used*
//! oriented edges onto contiguous `0..N` ranges, in topology-walk order.
//! The indices are what downstream feature extraction consumes: rows of
//! feature matrices, node ids of adjacency graphs.
//!
//! Only oriented edges actually used by some wire are indexed. An edge on
//! an open boundary has exactly one used direction; check
//! [`EntityIndexer::oriented_edge_exists`] before asking for its index.

use rustc_hash::FxHashMap;
use tracing::warn;

use brep_lite_kernel::{EdgeKey, FaceKey, OrientedEdge, Solid, VertexKey, WireKey};

use crate::error::{Error, Result};

/// Maps the entities of one solid to dense integer identifiers.
///
/// Built in a single topology walk; immutable afterwards. Duplicate
/// (edge, direction) pairs across wires are a data-quality defect: the first
/// occurrence keeps its index, later ones are recorded and the solid should
/// be excluded from adjacency-graph construction.
#[derive(Debug)]
pub struct EntityIndexer {
    face_map: FxHashMap<FaceKey, usize>,
    wire_map: FxHashMap<WireKey, usize>,
    edge_map: FxHashMap<EdgeKey, usize>,
    vertex_map: FxHashMap<VertexKey, usize>,
    oriented_edge_map: FxHashMap<OrientedEdge, usize>,
    duplicates: Vec<OrientedEdge>,
}

impl EntityIndexer {
    /// Builds the index maps for `solid` in one pass.
    pub fn new(solid: &Solid) -> Self {
        let face_map = solid.faces().enumerate().map(|(i, k)| (k, i)).collect();
        let wire_map = solid.wires().enumerate().map(|(i, k)| (k, i)).collect();
        let edge_map = solid.edges().enumerate().map(|(i, k)| (k, i)).collect();
        let vertex_map = solid.vertices().enumerate().map(|(i, k)| (k, i)).collect();

        let mut oriented_edge_map = FxHashMap::default();
        let mut duplicates = Vec::new();
        for wire in solid.wires() {
            let Some(coedges) = solid.wire_coedges(wire) else {
                continue;
            };
            for &coedge in coedges {
                let next = oriented_edge_map.len();
                if oriented_edge_map.contains_key(&coedge) {
                    // Keep the first index; flag the reuse without failing
                    // the walk.
                    warn!(?coedge, "oriented edge appears twice in the same solid");
                    duplicates.push(coedge);
                } else {
                    oriented_edge_map.insert(coedge, next);
                }
            }
        }

        Self {
            face_map,
            wire_map,
            edge_map,
            vertex_map,
            oriented_edge_map,
            duplicates,
        }
    }

    /// Index of a face.
    pub fn face_index(&self, face: FaceKey) -> Result<usize> {
        self.face_map
            .get(&face)
            .copied()
            .ok_or(Error::NotIndexed(face.into()))
    }

    /// Index of a wire.
    pub fn wire_index(&self, wire: WireKey) -> Result<usize> {
        self.wire_map
            .get(&wire)
            .copied()
            .ok_or(Error::NotIndexed(wire.into()))
    }

    /// Index of an edge.
    pub fn edge_index(&self, edge: EdgeKey) -> Result<usize> {
        self.edge_map
            .get(&edge)
            .copied()
            .ok_or(Error::NotIndexed(edge.into()))
    }

    /// Index of a vertex.
    pub fn vertex_index(&self, vertex: VertexKey) -> Result<usize> {
        self.vertex_map
            .get(&vertex)
            .copied()
            .ok_or(Error::NotIndexed(vertex.into()))
    }

    /// Index of an oriented edge (coedge). Only call after
    /// [`oriented_edge_exists`](Self::oriented_edge_exists) returns `true`.
    pub fn oriented_edge_index(&self, coedge: OrientedEdge) -> Result<usize> {
        self.oriented_edge_map
            .get(&coedge)
            .copied()
            .ok_or(Error::OrientedEdgeNotIndexed(coedge))
    }

    /// Whether the oriented edge is used by some wire and known to the
    /// indexer.
    pub fn oriented_edge_exists(&self, coedge: OrientedEdge) -> bool {
        self.oriented_edge_map.contains_key(&coedge)
    }

    /// Whether any (edge, direction) pair was used by more than one wire.
    /// Such solids are unsuitable for adjacency-graph construction.
    pub fn has_duplicate_coedges(&self) -> bool {
        !self.duplicates.is_empty()
    }

    /// The flagged duplicate coedges, in discovery order.
    pub fn duplicate_coedges(&self) -> &[OrientedEdge] {
        &self.duplicates
    }

    pub fn num_faces(&self) -> usize {
        self.face_map.len()
    }

    pub fn num_wires(&self) -> usize {
        self.wire_map.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_map.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertex_map.len()
    }

    pub fn num_oriented_edges(&self) -> usize {
        self.oriented_edge_map.len()
    }
}
