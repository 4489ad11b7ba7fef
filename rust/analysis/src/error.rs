// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for solid analysis.
//!
//! Topology-shape problems (open solids, non-manifold edges, duplicate
//! coedges) are validated proactively and reported as typed errors before
//! any graph is built. Geometric degeneracy (curveless edges, unresolvable
//! orientation) is a checked result the caller must inspect; it never
//! panics.

use brep_lite_kernel::{EdgeKey, EntityKey, OrientedEdge};

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during solid analysis.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An index query for an entity that was not enumerated for this solid.
    #[error("entity was not indexed for this solid: {0:?}")]
    NotIndexed(EntityKey),

    /// An index query for an oriented edge no wire uses. Guard lookups with
    /// `EntityIndexer::oriented_edge_exists`.
    #[error("oriented edge is not used by any wire of this solid: {0:?}")]
    OrientedEdgeNotIndexed(OrientedEdge),

    /// The solid has open-boundary edges; adjacency graphs require a closed
    /// solid.
    #[error("solid has edges outside every wire; adjacency graphs need a closed solid")]
    OpenSolid,

    /// An edge is incident to more than two faces.
    #[error("edge {edge:?} is incident to {num_faces} faces; a manifold allows at most 2")]
    NonManifold { edge: EdgeKey, num_faces: usize },

    /// The same (edge, direction) pair is used by more than one wire.
    #[error("oriented edge {0:?} is used by more than one wire")]
    DuplicateCoedge(OrientedEdge),

    /// Neither or both incident faces lie to the left of the edge.
    #[error("cannot resolve left and right faces of edge {0:?}")]
    UnresolvedOrientation(EdgeKey),

    /// The edge has no usable curve geometry (e.g. a pole edge), or its
    /// samples collapse to a point.
    #[error("degenerate edge geometry")]
    DegenerateGeometry,

    /// An error reported by the geometry kernel.
    #[error(transparent)]
    Kernel(#[from] brep_lite_kernel::Error),
}
