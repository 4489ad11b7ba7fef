// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for solid model operations.

use crate::keys::{EdgeKey, FaceKey, VertexKey, WireKey};

/// Result type alias for kernel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a solid model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced vertex was not found in the arena.
    #[error("vertex not found: {0:?}")]
    VertexNotFound(VertexKey),

    /// A referenced edge was not found in the arena.
    #[error("edge not found: {0:?}")]
    EdgeNotFound(EdgeKey),

    /// A referenced wire was not found in the arena.
    #[error("wire not found: {0:?}")]
    WireNotFound(WireKey),

    /// A referenced face was not found in the arena.
    #[error("face not found: {0:?}")]
    FaceNotFound(FaceKey),

    /// A wire must contain at least one oriented edge.
    #[error("wire must contain at least one oriented edge")]
    EmptyWire,

    /// A wire can bound only one face.
    #[error("wire {0:?} is already bound to a face")]
    WireAlreadyBound(WireKey),

    /// The queried edge is not used by any wire of the given face.
    #[error("edge {edge:?} does not lie on face {face:?}")]
    EdgeNotOnFace { edge: EdgeKey, face: FaceKey },
}
