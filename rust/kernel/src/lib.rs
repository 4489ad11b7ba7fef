// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # BRep-Lite Kernel
//!
//! Arena-based boundary-representation solid model with analytic geometry
//! evaluation.
//!
//! One [`Solid`] owns all entities of a single body (vertices, edges,
//! wires, faces) in slot maps with typed generational keys, walked in a
//! deterministic order. Edges carry trimmed 3D curves (or nothing, for
//! degenerate pole edges), faces carry surfaces plus the 2D parameter-space
//! pcurves of their edges, and wires record traversal direction per edge.
//!
//! The crate answers the questions downstream analyses ask of a geometry
//! kernel: topology walk and upward adjacency, point/tangent/normal
//! evaluation, orientation flags, seam and closedness tests. It performs no
//! booleans, meshing, or file I/O.

pub mod bbox;
pub mod construction;
pub mod curve;
pub mod error;
pub mod interval;
pub mod keys;
pub mod primitives;
pub mod solid;
pub mod surface;
pub mod transform;

pub use bbox::{solid_bounds, BoundingBox};
pub use curve::{BsplineCurve, Curve2, Curve3};
pub use error::{Error, Result};
pub use interval::Interval;
pub use keys::{EdgeKey, EntityKey, EntityType, FaceKey, OrientedEdge, VertexKey, WireKey};
pub use solid::{EdgeData, EdgeGeometry, FaceData, Solid, VertexData, WireData};
pub use surface::Surface;
pub use transform::scale_to_unit_box;
