// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # BRep-Lite Analysis
//!
//! Turns a B-rep solid into indexed, orientation-correct structures for
//! downstream feature extraction:
//!
//! - [`EntityIndexer`]: dense integer indices for faces, wires, edges,
//!   vertices, and used oriented edges (coedges).
//! - [`face_adjacency`] / [`vertex_adjacency`]: directed adjacency graphs
//!   with left/right face disambiguation and seam-aware self-loops.
//! - [`ArcLengthSampler`]: arc-length-equalized curve parameters.
//! - [`EdgeSamples`]: per-edge points, tangents, and both faces' normals,
//!   feeding [`EdgeSamples::edge_convexity`].
//! - [`uvgrid`] / [`ugrid`]: fixed-size sample grids over faces and edges.
//!
//! Everything operates read-only on a [`brep_lite_kernel::Solid`] passed
//! by reference; no kernel handle outlives a call. All loops are bounded,
//! and degenerate inputs surface as checked errors, never hangs or panics.

pub mod arclength;
pub mod batch;
pub mod error;
pub mod extractor;
pub mod graph;
pub mod indexer;
pub mod orientation;
pub mod uvgrid;

pub use arclength::{ArcLengthSampler, DEFAULT_ARC_LENGTH_SAMPLES};
pub use error::{Error, Result};
pub use extractor::{EdgeConvexity, EdgeSamples, Sampling};
pub use graph::{face_adjacency, vertex_adjacency, AdjacencyGraph, FaceAdjacency, GraphArc,
    VertexAdjacency};
pub use indexer::EntityIndexer;
pub use orientation::find_left_right;
pub use uvgrid::{ugrid, ugrid_forward, uvgrid, EdgeGrid, EdgeSample, FaceGrid, FaceSample};
