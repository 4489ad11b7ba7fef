// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch analysis across many solids.
//!
//! Parallelism is at solid granularity: each worker owns one solid's
//! analysis end to end, and no kernel object is shared mutably across
//! threads. Per-solid failures are returned in place, not short-circuited.

use rayon::prelude::*;

use brep_lite_kernel::Solid;

use crate::error::Result;
use crate::graph::{face_adjacency, vertex_adjacency, FaceAdjacency, VertexAdjacency};

/// Builds face-adjacency graphs for a batch of solids in parallel.
pub fn par_face_adjacency(solids: &[Solid], self_loops: bool) -> Vec<Result<FaceAdjacency>> {
    solids
        .par_iter()
        .map(|solid| face_adjacency(solid, self_loops))
        .collect()
}

/// Builds vertex-adjacency graphs for a batch of solids in parallel.
pub fn par_vertex_adjacency(solids: &[Solid], self_loops: bool) -> Vec<Result<VertexAdjacency>> {
    solids
        .par_iter()
        .map(|solid| vertex_adjacency(solid, self_loops))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_lite_kernel::primitives::{make_box, make_cylinder, make_fillet_strip};

    #[test]
    fn batch_reports_per_solid_results() {
        let solids = vec![
            make_box(1.0, 1.0, 1.0).unwrap(),
            make_fillet_strip(0.25, 2.0).unwrap(), // open shell
            make_cylinder(1.0, 2.0).unwrap(),
        ];
        let results = par_face_adjacency(&solids, false);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
