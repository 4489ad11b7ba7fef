// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rigid translation and uniform scaling of a whole solid.
//!
//! Every geometric carrier moves together: vertex points, edge curves and
//! their domains, face surfaces, pcurves, and uv domains. Parameter
//! alignment between edges and their pcurves is preserved: line parameters
//! are arc length (they scale), angle parameters are dimensionless (they
//! don't).
//!
//! The main consumer is [`scale_to_unit_box`], which normalizes a solid
//! into `[-1, 1]³` before feature extraction.

use nalgebra::{Point2, Point3, Vector3};

use crate::bbox::solid_bounds;
use crate::curve::{Curve2, Curve3};
use crate::interval::Interval;
use crate::solid::Solid;
use crate::surface::Surface;

fn scale_point(center: Point3<f64>, factor: f64, p: Point3<f64>) -> Point3<f64> {
    center + (p - center) * factor
}

fn scale_interval(i: Interval, factor: f64) -> Interval {
    Interval::new(i.min() * factor, i.max() * factor)
}

fn scale_point2(p: Point2<f64>, factor: f64) -> Point2<f64> {
    Point2::from(p.coords * factor)
}

impl Solid {
    /// Translates the whole solid by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for (_, vertex) in self.vertices.iter_mut() {
            vertex.point += offset;
        }
        for (_, edge) in self.edges.iter_mut() {
            if let Some(geometry) = edge.geometry.as_mut() {
                match &mut geometry.curve {
                    Curve3::Line { origin, .. } => *origin += offset,
                    Curve3::Circle { center, .. } => *center += offset,
                    Curve3::Bspline(spline) => {
                        for p in spline.control_points_mut() {
                            *p += offset;
                        }
                    }
                }
            }
        }
        for (_, face) in self.faces.iter_mut() {
            match &mut face.surface {
                Surface::Plane { origin, .. } => *origin += offset,
                Surface::Cylinder { origin, .. } => *origin += offset,
                Surface::Sphere { center, .. } => *center += offset,
            }
        }
        // Pcurves and all parameter domains are relative to the carriers and
        // unaffected by translation.
    }

    /// Uniformly scales the whole solid about `center` by `factor` (> 0).
    pub fn scale_uniform(&mut self, center: Point3<f64>, factor: f64) {
        for (_, vertex) in self.vertices.iter_mut() {
            vertex.point = scale_point(center, factor, vertex.point);
        }

        for (_, edge) in self.edges.iter_mut() {
            if let Some(geometry) = edge.geometry.as_mut() {
                match &mut geometry.curve {
                    // Line parameters are arc length: the domain scales with
                    // the geometry while the unit direction stays put.
                    Curve3::Line { origin, .. } => {
                        *origin = scale_point(center, factor, *origin);
                        geometry.domain = scale_interval(geometry.domain, factor);
                    }
                    // Angle parameters are dimensionless.
                    Curve3::Circle {
                        center: c, radius, ..
                    } => {
                        *c = scale_point(center, factor, *c);
                        *radius *= factor;
                    }
                    // Knots are untouched, so the domain is preserved.
                    Curve3::Bspline(spline) => {
                        for p in spline.control_points_mut() {
                            *p = scale_point(center, factor, *p);
                        }
                    }
                }
            }
        }

        for (_, face) in self.faces.iter_mut() {
            // Per-axis uv scaling implied by the surface parameterization:
            // plane u and v are lengths, cylinder u is an angle and v a
            // length, sphere u and v are both angles.
            let (su, sv) = match &mut face.surface {
                Surface::Plane { origin, .. } => {
                    *origin = scale_point(center, factor, *origin);
                    (factor, factor)
                }
                Surface::Cylinder {
                    origin, radius, ..
                } => {
                    *origin = scale_point(center, factor, *origin);
                    *radius *= factor;
                    (1.0, factor)
                }
                Surface::Sphere {
                    center: c, radius, ..
                } => {
                    *c = scale_point(center, factor, *c);
                    *radius *= factor;
                    (1.0, 1.0)
                }
            };
            face.uv_domain = (
                scale_interval(face.uv_domain.0, su),
                scale_interval(face.uv_domain.1, sv),
            );

            for ((edge, _), pcurve) in face.pcurves.iter_mut() {
                // Parameter scale of the underlying edge curve.
                let sp = match self.edges.get(*edge).and_then(|e| e.geometry.as_ref()) {
                    Some(g) => match g.curve {
                        Curve3::Line { .. } => factor,
                        Curve3::Circle { .. } | Curve3::Bspline(_) => 1.0,
                    },
                    None => 1.0,
                };
                match pcurve {
                    Curve2::Line { origin, dir } => {
                        *origin = Point2::new(origin.x * su, origin.y * sv);
                        *dir = nalgebra::Vector2::new(dir.x * su / sp, dir.y * sv / sp);
                    }
                    // Circular pcurves only arise on planes in this kernel
                    // (cross-section circles map to straight lines in a
                    // cylinder's or sphere's parameter space), where the uv
                    // scaling is uniform.
                    Curve2::Circle { center, radius, .. } => {
                        *center = scale_point2(*center, su);
                        *radius *= su;
                    }
                }
            }
        }
    }
}

/// Recenters the solid at the origin and scales its longest bounding-box
/// extent to 2, so the result fits `[-1, 1]³`. Returns the applied scale
/// factor, or `None` for an empty or zero-extent solid.
pub fn scale_to_unit_box(solid: &mut Solid) -> Option<f64> {
    let bbox = solid_bounds(solid)?;
    let extent = bbox.max_extent();
    if extent <= 0.0 {
        return None;
    }

    solid.translate(Point3::origin() - bbox.center());
    let factor = 2.0 / extent;
    solid.scale_uniform(Point3::origin(), factor);
    Some(factor)
}
