// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face- and vertex-adjacency graphs of a solid.
//!
//! Nodes are faces (or vertices) in index order; every interior edge
//! contributes a pair of directed arcs, one per traversal direction, each
//! annotated with the edge index and the coedge index of that direction.
//! The left face of an edge is the arc's source carrying the edge forward;
//! the right face carries its reversal (see [`crate::orientation`]).
//!
//! Preconditions are validated up front: the solid must be closed and free
//! of duplicate coedges, and every edge manifold (≤ 2 incident faces).
//! Edges whose left/right resolution fails are skipped with a debug log,
//! matching the warn-and-continue policy for recoverable data defects.

use serde::Serialize;
use tracing::debug;

use brep_lite_kernel::{EdgeKey, FaceKey, OrientedEdge, Solid, VertexKey};

use crate::error::{Error, Result};
use crate::indexer::EntityIndexer;
use crate::orientation::find_left_right;

/// A directed arc between two graph nodes, annotated with the B-rep edge it
/// crosses and the coedge realizing this direction.
#[derive(Debug, Clone, Serialize)]
pub struct GraphArc {
    /// Source node index.
    pub source: usize,
    /// Target node index.
    pub target: usize,
    /// Index of the underlying edge.
    pub edge_index: usize,
    /// Index of the oriented edge this arc carries.
    pub coedge_index: usize,
    /// Key of the underlying edge, for geometry lookups.
    #[serde(skip)]
    pub edge: EdgeKey,
    /// The oriented edge this arc carries.
    #[serde(skip)]
    pub coedge: OrientedEdge,
}

/// A directed adjacency graph over entity nodes `0..num_nodes`.
#[derive(Debug, Clone, Serialize)]
pub struct AdjacencyGraph<K> {
    /// Number of nodes; node `i` is `nodes[i]`.
    pub num_nodes: usize,
    /// Directed arcs in discovery order.
    pub arcs: Vec<GraphArc>,
    /// Node keys in index order.
    #[serde(skip)]
    pub nodes: Vec<K>,
    /// Outgoing arc indices per node.
    #[serde(skip)]
    adjacency: Vec<Vec<usize>>,
}

/// Face-adjacency graph: nodes are faces.
pub type FaceAdjacency = AdjacencyGraph<FaceKey>;

/// Vertex-adjacency graph: nodes are vertices.
pub type VertexAdjacency = AdjacencyGraph<VertexKey>;

impl<K> AdjacencyGraph<K> {
    fn with_nodes(nodes: Vec<K>) -> Self {
        let num_nodes = nodes.len();
        Self {
            num_nodes,
            arcs: Vec::new(),
            nodes,
            adjacency: vec![Vec::new(); num_nodes],
        }
    }

    fn add_arc(&mut self, arc: GraphArc) {
        self.adjacency[arc.source].push(self.arcs.len());
        self.arcs.push(arc);
    }

    /// Outgoing arcs of a node.
    pub fn arcs_from(&self, node: usize) -> impl Iterator<Item = &GraphArc> + '_ {
        self.adjacency[node].iter().map(|&i| &self.arcs[i])
    }

    /// Neighbor node indices of a node (with multiplicity, self-loops
    /// included).
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.arcs_from(node).map(|arc| arc.target)
    }

    /// Total number of directed arcs.
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }
}

/// Validates the graph-construction preconditions and returns the indexer.
fn indexed_for_graphs(solid: &Solid) -> Result<EntityIndexer> {
    if !solid.is_closed() {
        return Err(Error::OpenSolid);
    }
    let indexer = EntityIndexer::new(solid);
    if let Some(&dup) = indexer.duplicate_coedges().first() {
        return Err(Error::DuplicateCoedge(dup));
    }
    Ok(indexer)
}

/// Builds the directed face-adjacency graph of a closed solid.
///
/// Every interior edge with a 3D curve adds the arc left → right carrying
/// the edge forward and right → left carrying its reversal. A seam edge
/// (one incident face) adds a self-loop on that face iff `self_loops`.
/// More than two incident faces is a fatal non-manifold condition.
pub fn face_adjacency(solid: &Solid, self_loops: bool) -> Result<FaceAdjacency> {
    let indexer = indexed_for_graphs(solid)?;
    let mut graph = AdjacencyGraph::with_nodes(solid.faces().collect());

    for edge in solid.edges() {
        if !solid.edge_has_curve(edge) {
            continue;
        }
        let faces = solid.faces_of_edge(edge);
        match faces.len() {
            0 => continue,
            1 => {
                if self_loops && solid.edge_is_seam(edge, faces[0]) {
                    let node = indexer.face_index(faces[0])?;
                    let coedge = OrientedEdge::forward(edge);
                    graph.add_arc(GraphArc {
                        source: node,
                        target: node,
                        edge_index: indexer.edge_index(edge)?,
                        coedge_index: indexer.oriented_edge_index(coedge)?,
                        edge,
                        coedge,
                    });
                }
            }
            2 => {
                let forward = OrientedEdge::forward(edge);
                let (left, right) = match find_left_right(solid, forward, faces) {
                    Ok(pair) => pair,
                    Err(err) => {
                        debug!(?edge, %err, "skipping edge with unresolved orientation");
                        continue;
                    }
                };
                let (source, target) = (indexer.face_index(left)?, indexer.face_index(right)?);
                let edge_index = indexer.edge_index(edge)?;
                for (src, dst, coedge) in
                    [(source, target, forward), (target, source, forward.opposite())]
                {
                    graph.add_arc(GraphArc {
                        source: src,
                        target: dst,
                        edge_index,
                        coedge_index: indexer.oriented_edge_index(coedge)?,
                        edge,
                        coedge,
                    });
                }
            }
            n => {
                return Err(Error::NonManifold {
                    edge,
                    num_faces: n,
                })
            }
        }
    }
    Ok(graph)
}

/// Builds the directed vertex-adjacency graph of a closed solid.
///
/// Every edge with a 3D curve and two distinct end vertices adds the arc
/// start → end carrying the edge forward and end → start carrying its
/// reversal; an arc is added only if its direction's coedge exists. An edge
/// with a single vertex and a topologically closed curve adds a self-loop
/// iff `self_loops`. Degenerate edges are skipped.
pub fn vertex_adjacency(solid: &Solid, self_loops: bool) -> Result<VertexAdjacency> {
    let indexer = indexed_for_graphs(solid)?;
    let mut graph = AdjacencyGraph::with_nodes(solid.vertices().collect());

    for edge in solid.edges() {
        if !solid.edge_has_curve(edge) {
            continue;
        }
        let Some((start, end)) = solid.edge_vertices(edge) else {
            continue;
        };
        let edge_index = indexer.edge_index(edge)?;

        if start == end {
            if self_loops && solid.edge_closed_curve(edge) {
                let coedge = OrientedEdge::forward(edge);
                if indexer.oriented_edge_exists(coedge) {
                    let node = indexer.vertex_index(start)?;
                    graph.add_arc(GraphArc {
                        source: node,
                        target: node,
                        edge_index,
                        coedge_index: indexer.oriented_edge_index(coedge)?,
                        edge,
                        coedge,
                    });
                }
            }
            continue;
        }

        let (source, target) = (indexer.vertex_index(start)?, indexer.vertex_index(end)?);
        for (src, dst, coedge) in [
            (source, target, OrientedEdge::forward(edge)),
            (target, source, OrientedEdge::backward(edge)),
        ] {
            // Open-boundary edges have only one usable direction.
            if !indexer.oriented_edge_exists(coedge) {
                continue;
            }
            graph.add_arc(GraphArc {
                source: src,
                target: dst,
                edge_index,
                coedge_index: indexer.oriented_edge_index(coedge)?,
                edge,
                coedge,
            });
        }
    }
    Ok(graph)
}
