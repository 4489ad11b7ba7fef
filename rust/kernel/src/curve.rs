// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Curve carriers for edges.
//!
//! `Curve3` is the 3D geometric carrier of an edge; `Curve2` is the same
//! edge expressed in a face's (u, v) parameter space (its pcurve). Both are
//! closed tagged unions with per-variant closed-form evaluators, and a
//! pcurve is always parameter-aligned with its 3D curve:
//! `surface.point(pcurve.point(t)) == curve.point(t)` for every `t` in the
//! edge domain.

use nalgebra::{Point2, Point3, Vector2, Vector3};

use crate::interval::Interval;

/// Coincidence tolerance used for curve-closure tests.
const CLOSURE_TOL: f64 = 1e-9;

/// A clamped, non-rational B-spline curve.
///
/// Evaluation uses the Cox–de Boor span/basis recurrences (The NURBS Book,
/// algorithms A2.1/A2.2), restricted to the polynomial case.
#[derive(Debug, Clone)]
pub struct BsplineCurve {
    degree: usize,
    knots: Vec<f64>,
    control_points: Vec<Point3<f64>>,
}

impl BsplineCurve {
    /// Creates a B-spline from an explicit knot vector.
    ///
    /// The knot vector must be non-decreasing with
    /// `knots.len() == control_points.len() + degree + 1`.
    pub fn new(degree: usize, knots: Vec<f64>, control_points: Vec<Point3<f64>>) -> Self {
        assert!(
            knots.len() == control_points.len() + degree + 1,
            "need {} knots for degree {} with {} control points, got {}",
            control_points.len() + degree + 1,
            degree,
            control_points.len(),
            knots.len()
        );
        assert!(
            knots.windows(2).all(|w| w[0] <= w[1]),
            "knot vector must be non-decreasing"
        );
        Self {
            degree,
            knots,
            control_points,
        }
    }

    /// Creates a clamped cubic B-spline with uniformly spaced interior knots
    /// over the domain `[0, 1]`. Requires at least 4 control points.
    pub fn clamped_cubic(control_points: Vec<Point3<f64>>) -> Self {
        let n = control_points.len();
        assert!(n >= 4, "cubic B-spline needs at least 4 control points");

        let num_interior = n - 4;
        let mut knots = vec![0.0; 4];
        for i in 0..num_interior {
            knots.push((i + 1) as f64 / (num_interior + 1) as f64);
        }
        knots.extend_from_slice(&[1.0; 4]);
        Self::new(3, knots, control_points)
    }

    /// Parameter domain of the curve.
    pub fn domain(&self) -> Interval {
        let n = self.control_points.len() - 1;
        Interval::new(self.knots[self.degree], self.knots[n + 1])
    }

    /// Knot span index such that `knots[span] <= u < knots[span + 1]`,
    /// clamped to the curve domain.
    fn find_span(&self, u: f64) -> usize {
        let n = self.control_points.len() - 1;
        let p = self.degree;
        if u >= self.knots[n + 1] {
            return n;
        }
        if u <= self.knots[p] {
            return p;
        }

        let mut lo = p;
        let mut hi = n + 1;
        let mut mid = (lo + hi) / 2;
        while u < self.knots[mid] || u >= self.knots[mid + 1] {
            if u < self.knots[mid] {
                hi = mid;
            } else {
                lo = mid;
            }
            mid = (lo + hi) / 2;
        }
        mid
    }

    /// All `degree + 1` non-zero basis functions at `u` for `span`.
    fn basis_funs(&self, span: usize, u: f64) -> Vec<f64> {
        let p = self.degree;
        let mut funs = vec![0.0; p + 1];
        let mut left = vec![0.0; p + 1];
        let mut right = vec![0.0; p + 1];

        funs[0] = 1.0;
        for j in 1..=p {
            left[j] = u - self.knots[span + 1 - j];
            right[j] = self.knots[span + j] - u;
            let mut saved = 0.0;
            for r in 0..j {
                let temp = funs[r] / (right[r + 1] + left[j - r]);
                funs[r] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            }
            funs[j] = saved;
        }
        funs
    }

    /// Evaluates the curve at parameter `u`.
    pub fn point(&self, u: f64) -> Point3<f64> {
        let span = self.find_span(u);
        let funs = self.basis_funs(span, u);

        let mut acc = Vector3::zeros();
        for (i, b) in funs.iter().enumerate() {
            acc += self.control_points[span - self.degree + i].coords * *b;
        }
        Point3::from(acc)
    }

    /// First derivative at parameter `u`.
    ///
    /// Uses the derivative-curve form: the hodograph of a degree-p spline is
    /// a degree-(p-1) spline with control points
    /// `p * (P[i+1] - P[i]) / (knots[i+p+1] - knots[i+1])`.
    pub fn derivative(&self, u: f64) -> Vector3<f64> {
        let p = self.degree;
        if p == 0 {
            return Vector3::zeros();
        }

        let mut deriv_points = Vec::with_capacity(self.control_points.len() - 1);
        for i in 0..self.control_points.len() - 1 {
            let span_width = self.knots[i + p + 1] - self.knots[i + 1];
            let q = if span_width > 0.0 {
                (self.control_points[i + 1].coords - self.control_points[i].coords)
                    * (p as f64 / span_width)
            } else {
                Vector3::zeros()
            };
            deriv_points.push(Point3::from(q));
        }

        let hodograph = BsplineCurve {
            degree: p - 1,
            knots: self.knots[1..self.knots.len() - 1].to_vec(),
            control_points: deriv_points,
        };
        hodograph.point(u).coords
    }

    /// Control points of the curve.
    pub fn control_points(&self) -> &[Point3<f64>] {
        &self.control_points
    }

    /// Mutable control points (used by whole-solid transforms).
    pub(crate) fn control_points_mut(&mut self) -> &mut [Point3<f64>] {
        &mut self.control_points
    }
}

/// The 3D geometric carrier of an edge.
#[derive(Debug, Clone)]
pub enum Curve3 {
    /// `c(t) = origin + t * dir`, with `dir` a unit vector.
    Line {
        origin: Point3<f64>,
        dir: Vector3<f64>,
    },
    /// `c(t) = center + radius * (cos(t) * x_axis + sin(t) * y_axis)`,
    /// with `x_axis`/`y_axis` orthonormal.
    Circle {
        center: Point3<f64>,
        x_axis: Vector3<f64>,
        y_axis: Vector3<f64>,
        radius: f64,
    },
    Bspline(BsplineCurve),
}

impl Curve3 {
    /// Evaluates the curve at parameter `t`.
    pub fn point(&self, t: f64) -> Point3<f64> {
        match self {
            Curve3::Line { origin, dir } => origin + dir * t,
            Curve3::Circle {
                center,
                x_axis,
                y_axis,
                radius,
            } => center + (x_axis * t.cos() + y_axis * t.sin()) * *radius,
            Curve3::Bspline(spline) => spline.point(t),
        }
    }

    /// First derivative at parameter `t` (not necessarily unit length).
    pub fn derivative(&self, t: f64) -> Vector3<f64> {
        match self {
            Curve3::Line { dir, .. } => *dir,
            Curve3::Circle {
                x_axis,
                y_axis,
                radius,
                ..
            } => (-x_axis * t.sin() + y_axis * t.cos()) * *radius,
            Curve3::Bspline(spline) => spline.derivative(t),
        }
    }

    /// Whether the curve closes on itself over `domain`, i.e. the start and
    /// end points coincide.
    pub fn is_closed(&self, domain: &Interval) -> bool {
        let start = self.point(domain.min());
        let end = self.point(domain.max());
        (end - start).norm() <= CLOSURE_TOL
    }
}

/// An edge's curve in a face's (u, v) parameter space.
#[derive(Debug, Clone)]
pub enum Curve2 {
    /// `c(t) = origin + t * dir`.
    Line {
        origin: Point2<f64>,
        dir: Vector2<f64>,
    },
    /// `c(t) = center + radius * (cos(t) * x_axis + sin(t) * y_axis)`.
    Circle {
        center: Point2<f64>,
        x_axis: Vector2<f64>,
        y_axis: Vector2<f64>,
        radius: f64,
    },
}

impl Curve2 {
    /// Evaluates the pcurve at parameter `t`.
    pub fn point(&self, t: f64) -> Point2<f64> {
        match self {
            Curve2::Line { origin, dir } => origin + dir * t,
            Curve2::Circle {
                center,
                x_axis,
                y_axis,
                radius,
            } => center + (x_axis * t.cos() + y_axis * t.sin()) * *radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn line_evaluation() {
        let line = Curve3::Line {
            origin: Point3::new(1.0, 0.0, 0.0),
            dir: Vector3::new(0.0, 1.0, 0.0),
        };
        assert_relative_eq!(line.point(2.0), Point3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(line.derivative(2.0), Vector3::new(0.0, 1.0, 0.0));
        assert!(!line.is_closed(&Interval::new(0.0, 1.0)));
    }

    #[test]
    fn circle_evaluation_and_closure() {
        let circle = Curve3::Circle {
            center: Point3::new(0.0, 0.0, 1.0),
            x_axis: Vector3::new(1.0, 0.0, 0.0),
            y_axis: Vector3::new(0.0, 1.0, 0.0),
            radius: 2.0,
        };
        assert_relative_eq!(circle.point(0.0), Point3::new(2.0, 0.0, 1.0));
        assert_relative_eq!(
            circle.point(PI / 2.0),
            Point3::new(0.0, 2.0, 1.0),
            epsilon = 1e-12
        );
        // Tangent is perpendicular to the radius vector.
        let t = circle.derivative(0.3);
        let r = circle.point(0.3) - Point3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(t.dot(&r), 0.0, epsilon = 1e-12);

        assert!(circle.is_closed(&Interval::new(0.0, 2.0 * PI)));
        assert!(!circle.is_closed(&Interval::new(0.0, PI)));
    }

    #[test]
    fn clamped_cubic_interpolates_endpoints() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, -1.0, 0.0),
            Point3::new(3.0, 0.5, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        ];
        let spline = BsplineCurve::clamped_cubic(pts.clone());
        let domain = spline.domain();
        assert_relative_eq!(spline.point(domain.min()), pts[0], epsilon = 1e-12);
        assert_relative_eq!(spline.point(domain.max()), pts[4], epsilon = 1e-12);
    }

    #[test]
    fn bspline_derivative_matches_finite_difference() {
        let spline = BsplineCurve::clamped_cubic(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(3.0, 2.0, 1.0),
            Point3::new(4.0, 0.0, 1.0),
            Point3::new(5.0, -1.0, 0.0),
        ]);
        let u = 0.37;
        let h = 1e-6;
        let numeric = (spline.point(u + h) - spline.point(u - h)) / (2.0 * h);
        let analytic = spline.derivative(u);
        assert_relative_eq!(analytic, numeric, epsilon = 1e-5);
    }

    #[test]
    fn pcurve_circle_evaluation() {
        let pcurve = Curve2::Circle {
            center: Point2::new(1.0, 1.0),
            x_axis: Vector2::new(0.0, 1.0),
            y_axis: Vector2::new(1.0, 0.0),
            radius: 1.0,
        };
        assert_relative_eq!(pcurve.point(0.0), Point2::new(1.0, 2.0));
        assert_relative_eq!(
            pcurve.point(PI / 2.0),
            Point2::new(2.0, 1.0),
            epsilon = 1e-12
        );
    }
}
