// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arc-length reparameterization of edge curves.
//!
//! Curves are rarely parameterized by arc length; sampling them at uniform
//! parameters bunches points where the parameterization is fast. The
//! [`ArcLengthSampler`] fixes this with a chordal approximation: sample K
//! points at uniform parameters, accumulate chord-length fractions, then
//! invert the (monotone) fraction polyline to find the N parameters whose
//! arc-length fractions are i/(N-1). Complexity O(K + N).
//!
//! Output parameters follow the curve's native direction; reversing them
//! for a reversed edge is the caller's responsibility.

use nalgebra::Point3;

use brep_lite_kernel::{EdgeKey, Interval, Solid};

use crate::error::{Error, Result};

/// Default number of internal chord samples (K). Should be much larger
/// than the requested output count.
pub const DEFAULT_ARC_LENGTH_SAMPLES: usize = 100;

/// Inverts a curve's cumulative chord length to produce near-uniform
/// arc-length parameters.
#[derive(Debug, Clone)]
pub struct ArcLengthSampler {
    params: Vec<f64>,
    /// Monotone cumulative length fractions over `[0, 1]`, aligned with
    /// `params`.
    fractions: Vec<f64>,
}

impl ArcLengthSampler {
    /// Samples `num_samples` points of an edge's curve at uniform
    /// parameters. Fails with [`Error::DegenerateGeometry`] if the edge has
    /// no curve, a zero-length domain, or zero total chord length.
    pub fn from_edge(solid: &Solid, edge: EdgeKey, num_samples: usize) -> Result<Self> {
        let domain = solid.edge_domain(edge).ok_or(Error::DegenerateGeometry)?;
        if domain.length() <= 0.0 {
            return Err(Error::DegenerateGeometry);
        }

        let mut points = Vec::with_capacity(num_samples);
        let mut params = Vec::with_capacity(num_samples);
        for i in 0..num_samples {
            let t = domain.interpolate(i as f64 / (num_samples - 1) as f64);
            points.push(solid.edge_point(edge, t).ok_or(Error::DegenerateGeometry)?);
            params.push(t);
        }
        Self::from_samples(&points, params)
    }

    /// Builds the sampler from precomputed point/parameter pairs (e.g. a
    /// surface iso-parameter line). The parameters must be increasing.
    pub fn from_samples(points: &[Point3<f64>], params: Vec<f64>) -> Result<Self> {
        if points.len() < 2 || points.len() != params.len() {
            return Err(Error::DegenerateGeometry);
        }

        let mut fractions = Vec::with_capacity(points.len());
        fractions.push(0.0);
        let mut cumulative = 0.0;
        for pair in points.windows(2) {
            cumulative += (pair[1] - pair[0]).norm();
            fractions.push(cumulative);
        }
        if cumulative <= 0.0 {
            return Err(Error::DegenerateGeometry);
        }
        for f in &mut fractions {
            *f /= cumulative;
        }

        Ok(Self { params, fractions })
    }

    /// Returns `num_samples` (≥ 2) parameters whose arc-length fractions
    /// are uniformly spaced, by a single monotone scan over the fraction
    /// polyline with linear interpolation inside each bracket. A zero-width
    /// bracket falls back to its lower parameter.
    pub fn parameters(&self, num_samples: usize) -> Vec<f64> {
        assert!(num_samples >= 2, "need at least two output samples");

        let mut output = Vec::with_capacity(num_samples);
        let mut index = 0;
        for i in 0..num_samples {
            let target = i as f64 / (num_samples - 1) as f64;

            // Advance to the bracketing pair; never backtracks.
            while self.fractions[index] < target {
                index += 1;
                if index >= self.fractions.len() - 1 {
                    break;
                }
            }

            let (low_param, low_frac) = if index == 0 {
                (self.params[0], self.fractions[0])
            } else {
                (self.params[index - 1], self.fractions[index - 1])
            };
            let high_param = self.params[index];
            let high_frac = self.fractions[index];

            let width = high_frac - low_frac;
            let param = if width <= 0.0 {
                low_param
            } else {
                let t = (target - low_frac) / width;
                Interval::new(low_param, high_param).interpolate(t)
            };
            output.push(param);
        }
        output
    }
}
