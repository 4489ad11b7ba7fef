// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface carriers for faces.
//!
//! Each face carries one `Surface` evaluated in its (u, v) parameter space.
//! The raw surface normal is `∂u × ∂v`, normalized; face-orientation
//! correction (the `reversed` flag) is applied by `Solid::face_normal`, not
//! here.

use nalgebra::{Point2, Point3, Vector3};

/// Below this squared magnitude of `∂u × ∂v` the normal is undefined.
const NORMAL_EPS: f64 = 1e-12;

/// A geometric surface carried by a face.
#[derive(Debug, Clone)]
pub enum Surface {
    /// `S(u, v) = origin + u * x_axis + v * y_axis`, with orthonormal axes.
    /// The surface normal is `x_axis × y_axis`.
    Plane {
        origin: Point3<f64>,
        x_axis: Vector3<f64>,
        y_axis: Vector3<f64>,
    },
    /// `S(u, v) = origin + radius * (cos(u) * x_axis + sin(u) * y_axis) + v * axis`,
    /// with `axis = x_axis × y_axis`. The surface normal points radially
    /// outward.
    Cylinder {
        origin: Point3<f64>,
        axis: Vector3<f64>,
        x_axis: Vector3<f64>,
        y_axis: Vector3<f64>,
        radius: f64,
    },
    /// `S(u, v) = center + radius * (cos(v) cos(u), cos(v) sin(u), sin(v))`
    /// in the global frame, `v ∈ [-π/2, π/2]`. The normal degenerates at the
    /// poles.
    Sphere { center: Point3<f64>, radius: f64 },
}

impl Surface {
    /// Evaluates the surface at the given parameters.
    pub fn point(&self, uv: Point2<f64>) -> Point3<f64> {
        let (u, v) = (uv.x, uv.y);
        match self {
            Surface::Plane {
                origin,
                x_axis,
                y_axis,
            } => origin + x_axis * u + y_axis * v,
            Surface::Cylinder {
                origin,
                axis,
                x_axis,
                y_axis,
                radius,
            } => origin + (x_axis * u.cos() + y_axis * u.sin()) * *radius + axis * v,
            Surface::Sphere { center, radius } => {
                center
                    + Vector3::new(v.cos() * u.cos(), v.cos() * u.sin(), v.sin()) * *radius
            }
        }
    }

    /// First partial derivatives `(∂u, ∂v)` at the given parameters.
    pub fn derivatives(&self, uv: Point2<f64>) -> (Vector3<f64>, Vector3<f64>) {
        let (u, v) = (uv.x, uv.y);
        match self {
            Surface::Plane { x_axis, y_axis, .. } => (*x_axis, *y_axis),
            Surface::Cylinder {
                axis,
                x_axis,
                y_axis,
                radius,
                ..
            } => (
                (-x_axis * u.sin() + y_axis * u.cos()) * *radius,
                *axis,
            ),
            Surface::Sphere { radius, .. } => (
                Vector3::new(-v.cos() * u.sin(), v.cos() * u.cos(), 0.0) * *radius,
                Vector3::new(-v.sin() * u.cos(), -v.sin() * u.sin(), v.cos()) * *radius,
            ),
        }
    }

    /// Unit surface normal `∂u × ∂v`, or `None` where it degenerates
    /// (e.g. sphere poles).
    pub fn normal(&self, uv: Point2<f64>) -> Option<Vector3<f64>> {
        let (du, dv) = self.derivatives(uv);
        let n = du.cross(&dv);
        let norm_sq = n.norm_squared();
        if norm_sq <= NORMAL_EPS {
            return None;
        }
        Some(n / norm_sq.sqrt())
    }
}
