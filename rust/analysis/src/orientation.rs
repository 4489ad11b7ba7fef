// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Left/right face resolution for an edge.
//!
//! Looking along the oriented edge from outside the solid, one incident
//! face lies to the left (its wire traverses the edge in the same
//! direction) and the other to the right:
//!
//! ```text
//!          edge direction
//!                ^
//!        left    |    right
//!        face    |    face
//!                |
//! ```
//!
//! On a periodic face's seam the same face is on both sides. Resolution
//! never guesses: if zero or two of the candidate faces test as left, it
//! fails with [`Error::UnresolvedOrientation`].

use brep_lite_kernel::{FaceKey, OrientedEdge, Solid};

use crate::error::{Error, Result};

/// Resolves the left and right faces of `coedge` among its 1–2 incident
/// faces.
///
/// With a single candidate face the edge is expected to be a seam and the
/// face is returned for both sides.
pub fn find_left_right(
    solid: &Solid,
    coedge: OrientedEdge,
    faces: &[FaceKey],
) -> Result<(FaceKey, FaceKey)> {
    let [face1, face2] = match *faces {
        [single] => [single, single],
        [a, b] => [a, b],
        _ => return Err(Error::UnresolvedOrientation(coedge.edge)),
    };

    if solid.is_left_of(face1, coedge)? {
        // On a seam the two candidates are the same face and it is on both
        // sides; otherwise exactly one face may test as left.
        if face1 != face2 && solid.is_left_of(face2, coedge)? {
            return Err(Error::UnresolvedOrientation(coedge.edge));
        }
        Ok((face1, face2))
    } else {
        if !solid.is_left_of(face2, coedge)? {
            return Err(Error::UnresolvedOrientation(coedge.edge));
        }
        Ok((face2, face1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_lite_kernel::primitives::{make_box, make_cylinder};

    #[test]
    fn box_edges_resolve_to_distinct_faces() {
        let solid = make_box(1.0, 1.0, 1.0).unwrap();
        for edge in solid.edges() {
            let faces = solid.faces_of_edge(edge);
            let coedge = OrientedEdge::forward(edge);
            let (left, right) = find_left_right(&solid, coedge, faces).unwrap();
            assert_ne!(left, right);
            // Reversing the edge swaps the sides.
            let (left_r, right_r) = find_left_right(&solid, coedge.opposite(), faces).unwrap();
            assert_eq!(left, right_r);
            assert_eq!(right, left_r);
        }
    }

    #[test]
    fn cylinder_seam_resolves_to_the_same_face() {
        let solid = make_cylinder(1.0, 2.0).unwrap();
        let seam = solid
            .edges()
            .find(|&e| {
                let faces = solid.faces_of_edge(e);
                faces.len() == 1 && solid.edge_is_seam(e, faces[0])
            })
            .unwrap();
        let faces = solid.faces_of_edge(seam);
        let (left, right) = find_left_right(&solid, OrientedEdge::forward(seam), faces).unwrap();
        assert_eq!(left, right);
        assert_eq!(left, faces[0]);
    }
}
