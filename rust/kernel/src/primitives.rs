// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Assembled reference solids.
//!
//! These constructors exist so analyses have real inputs to run against;
//! they are not a modeling API. All shells follow the standard orientation
//! conventions: outward face normals, outer wires counter-clockwise seen
//! from outside, inner (hole) wires clockwise, and every interior edge used
//! exactly once per direction.

use nalgebra::{Point2, Point3, Vector2, Vector3};
use rustc_hash::FxHashMap;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::curve::{BsplineCurve, Curve2, Curve3};
use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::keys::*;
use crate::solid::Solid;
use crate::surface::Surface;

/// Cache of straight edges between vertex pairs, so adjacent faces share
/// one edge entity.
type EdgeCache = FxHashMap<(VertexKey, VertexKey), EdgeKey>;

fn line_edge(
    solid: &mut Solid,
    cache: &mut EdgeCache,
    va: VertexKey,
    vb: VertexKey,
) -> Result<OrientedEdge> {
    let key = if va < vb { (va, vb) } else { (vb, va) };
    if let Some(&edge) = cache.get(&key) {
        let (start, _) = solid
            .edge_vertices(edge)
            .ok_or(Error::EdgeNotFound(edge))?;
        return Ok(OrientedEdge {
            edge,
            reversed: start != va,
        });
    }

    let pa = solid.vertex_point(va).ok_or(Error::VertexNotFound(va))?;
    let pb = solid.vertex_point(vb).ok_or(Error::VertexNotFound(vb))?;
    let len = (pb - pa).norm();
    let edge = solid.add_edge(
        Curve3::Line {
            origin: pa,
            dir: (pb - pa) / len,
        },
        Interval::new(0.0, len),
        va,
        vb,
    )?;
    cache.insert(key, edge);
    Ok(OrientedEdge::forward(edge))
}

/// Adds a planar face over four corners listed counter-clockwise as seen
/// from outside the solid, plus optional inner wires. Shared edges are taken
/// from the cache; pcurves for the quad's own edges are registered here,
/// inner-wire pcurves are the caller's job.
fn quad_face(
    solid: &mut Solid,
    cache: &mut EdgeCache,
    corners: [VertexKey; 4],
    inner_wires: Vec<WireKey>,
) -> Result<FaceKey> {
    let mut pts = [Point3::origin(); 4];
    for (p, v) in pts.iter_mut().zip(corners) {
        *p = solid.vertex_point(v).ok_or(Error::VertexNotFound(v))?;
    }

    let x_axis = (pts[1] - pts[0]).normalize();
    let normal = (pts[1] - pts[0]).cross(&(pts[3] - pts[0])).normalize();
    let y_axis = normal.cross(&x_axis);
    let origin = pts[0];
    let uv_of = |p: Point3<f64>| Point2::new((p - origin).dot(&x_axis), (p - origin).dot(&y_axis));

    let mut coedges = Vec::with_capacity(4);
    for i in 0..4 {
        coedges.push(line_edge(solid, cache, corners[i], corners[(i + 1) % 4])?);
    }
    let outer = solid.add_wire(coedges.clone())?;

    let mut wires = vec![outer];
    wires.extend(inner_wires);

    let corner_uvs: Vec<Point2<f64>> = pts.iter().map(|&p| uv_of(p)).collect();
    let u_domain = Interval::new(
        corner_uvs.iter().map(|uv| uv.x).fold(f64::INFINITY, f64::min),
        corner_uvs
            .iter()
            .map(|uv| uv.x)
            .fold(f64::NEG_INFINITY, f64::max),
    );
    let v_domain = Interval::new(
        corner_uvs.iter().map(|uv| uv.y).fold(f64::INFINITY, f64::min),
        corner_uvs
            .iter()
            .map(|uv| uv.y)
            .fold(f64::NEG_INFINITY, f64::max),
    );

    let face = solid.add_face(
        Surface::Plane {
            origin,
            x_axis,
            y_axis,
        },
        wires,
        false,
        (u_domain, v_domain),
    )?;

    // Pcurves follow each edge's own parameterization, regardless of the
    // traversal sense in this face's wire.
    for ce in coedges {
        let (start, end) = solid
            .edge_vertices(ce.edge)
            .ok_or(Error::EdgeNotFound(ce.edge))?;
        let pa = solid
            .vertex_point(start)
            .ok_or(Error::VertexNotFound(start))?;
        let pb = solid.vertex_point(end).ok_or(Error::VertexNotFound(end))?;
        let (ua, ub) = (uv_of(pa), uv_of(pb));
        let len = (pb - pa).norm();
        solid.add_pcurve_both(
            face,
            ce.edge,
            Curve2::Line {
                origin: ua,
                dir: (ub - ua) / len,
            },
        )?;
    }
    Ok(face)
}

/// A full-turn circle edge around the frame `(x_axis, y_axis)` with a
/// single ring vertex at angle zero.
fn ring_edge(
    solid: &mut Solid,
    center: Point3<f64>,
    x_axis: Vector3<f64>,
    y_axis: Vector3<f64>,
    radius: f64,
) -> Result<EdgeKey> {
    let vertex = solid.add_vertex(center + x_axis * radius);
    solid.add_edge(
        Curve3::Circle {
            center,
            x_axis,
            y_axis,
            radius,
        },
        Interval::new(0.0, 2.0 * PI),
        vertex,
        vertex,
    )
}

fn box_vertices(solid: &mut Solid, dx: f64, dy: f64, dz: f64) -> Vec<VertexKey> {
    let mut verts = Vec::with_capacity(8);
    for x in 0..2 {
        for y in 0..2 {
            for z in 0..2 {
                verts.push(solid.add_vertex(Point3::new(
                    x as f64 * dx,
                    y as f64 * dy,
                    z as f64 * dz,
                )));
            }
        }
    }
    verts
}

fn box_faces(v: &dyn Fn(usize, usize, usize) -> VertexKey) -> [[VertexKey; 4]; 6] {
    [
        // bottom (z = 0), outward normal -z
        [v(0, 0, 0), v(0, 1, 0), v(1, 1, 0), v(1, 0, 0)],
        // top (z = dz), outward normal +z
        [v(0, 0, 1), v(1, 0, 1), v(1, 1, 1), v(0, 1, 1)],
        // front (y = 0), outward normal -y
        [v(0, 0, 0), v(1, 0, 0), v(1, 0, 1), v(0, 0, 1)],
        // back (y = dy), outward normal +y
        [v(0, 1, 0), v(0, 1, 1), v(1, 1, 1), v(1, 1, 0)],
        // left (x = 0), outward normal -x
        [v(0, 0, 0), v(0, 0, 1), v(0, 1, 1), v(0, 1, 0)],
        // right (x = dx), outward normal +x
        [v(1, 0, 0), v(1, 1, 0), v(1, 1, 1), v(1, 0, 1)],
    ]
}

/// An axis-aligned box spanning `[0, dx] × [0, dy] × [0, dz]`.
pub fn make_box(dx: f64, dy: f64, dz: f64) -> Result<Solid> {
    let mut solid = Solid::new();
    let mut cache = EdgeCache::default();
    let verts = box_vertices(&mut solid, dx, dy, dz);
    let v = |x: usize, y: usize, z: usize| verts[x * 4 + y * 2 + z];

    for corners in box_faces(&v) {
        quad_face(&mut solid, &mut cache, corners, Vec::new())?;
    }
    Ok(solid)
}

/// A closed cylinder of the given radius and height, axis along +z, base at
/// the origin. The lateral face is periodic and carries a seam edge used
/// twice (once per direction) by its single wire.
pub fn make_cylinder(radius: f64, height: f64) -> Result<Solid> {
    let mut solid = Solid::new();
    let x = Vector3::x();
    let y = Vector3::y();
    let z = Vector3::z();

    let bottom = ring_edge(&mut solid, Point3::origin(), x, y, radius)?;
    let top = ring_edge(&mut solid, Point3::new(0.0, 0.0, height), x, y, radius)?;

    let (vb, _) = solid
        .edge_vertices(bottom)
        .ok_or(Error::EdgeNotFound(bottom))?;
    let (vt, _) = solid.edge_vertices(top).ok_or(Error::EdgeNotFound(top))?;
    let seam = solid.add_edge(
        Curve3::Line {
            origin: Point3::new(radius, 0.0, 0.0),
            dir: z,
        },
        Interval::new(0.0, height),
        vb,
        vt,
    )?;

    // Lateral face: u is the angle, v the height. The boundary runs
    // counter-clockwise in (u, v); the seam shows up at u = 2π going up and
    // at u = 0 coming back down.
    let lateral_wire = solid.add_wire(vec![
        OrientedEdge::forward(bottom),
        OrientedEdge::forward(seam),
        OrientedEdge::backward(top),
        OrientedEdge::backward(seam),
    ])?;
    let lateral = solid.add_face(
        Surface::Cylinder {
            origin: Point3::origin(),
            axis: z,
            x_axis: x,
            y_axis: y,
            radius,
        },
        vec![lateral_wire],
        false,
        (Interval::new(0.0, 2.0 * PI), Interval::new(0.0, height)),
    )?;
    solid.add_pcurve_both(
        lateral,
        bottom,
        Curve2::Line {
            origin: Point2::new(0.0, 0.0),
            dir: Vector2::new(1.0, 0.0),
        },
    )?;
    solid.add_pcurve_both(
        lateral,
        top,
        Curve2::Line {
            origin: Point2::new(0.0, height),
            dir: Vector2::new(1.0, 0.0),
        },
    )?;
    solid.add_pcurve(
        lateral,
        seam,
        false,
        Curve2::Line {
            origin: Point2::new(2.0 * PI, 0.0),
            dir: Vector2::new(0.0, 1.0),
        },
    )?;
    solid.add_pcurve(
        lateral,
        seam,
        true,
        Curve2::Line {
            origin: Point2::new(0.0, 0.0),
            dir: Vector2::new(0.0, 1.0),
        },
    )?;

    let cap_domain = (
        Interval::new(-radius, radius),
        Interval::new(-radius, radius),
    );

    // Bottom cap, outward normal -z.
    let bottom_wire = solid.add_wire(vec![OrientedEdge::backward(bottom)])?;
    let bottom_cap = solid.add_face(
        Surface::Plane {
            origin: Point3::origin(),
            x_axis: y,
            y_axis: x,
        },
        vec![bottom_wire],
        false,
        cap_domain,
    )?;
    solid.add_pcurve_both(
        bottom_cap,
        bottom,
        Curve2::Circle {
            center: Point2::new(0.0, 0.0),
            x_axis: Vector2::new(0.0, 1.0),
            y_axis: Vector2::new(1.0, 0.0),
            radius,
        },
    )?;

    // Top cap, outward normal +z.
    let top_wire = solid.add_wire(vec![OrientedEdge::forward(top)])?;
    let top_cap = solid.add_face(
        Surface::Plane {
            origin: Point3::new(0.0, 0.0, height),
            x_axis: x,
            y_axis: y,
        },
        vec![top_wire],
        false,
        cap_domain,
    )?;
    solid.add_pcurve_both(
        top_cap,
        top,
        Curve2::Circle {
            center: Point2::new(0.0, 0.0),
            x_axis: Vector2::new(1.0, 0.0),
            y_axis: Vector2::new(0.0, 1.0),
            radius,
        },
    )?;

    Ok(solid)
}

/// A full sphere of the given radius centered at the origin: one periodic
/// face bounded by a meridian seam and two degenerate (curveless) pole
/// edges.
pub fn make_sphere(radius: f64) -> Result<Solid> {
    let mut solid = Solid::new();

    let south = solid.add_vertex(Point3::new(0.0, 0.0, -radius));
    let north = solid.add_vertex(Point3::new(0.0, 0.0, radius));

    // Meridian arc from the south to the north pole, parameter-aligned with
    // the sphere's v (latitude) parameter.
    let seam = solid.add_edge(
        Curve3::Circle {
            center: Point3::origin(),
            x_axis: Vector3::x(),
            y_axis: Vector3::z(),
            radius,
        },
        Interval::new(-FRAC_PI_2, FRAC_PI_2),
        south,
        north,
    )?;
    let south_ring = solid.add_degenerate_edge(south, south)?;
    let north_ring = solid.add_degenerate_edge(north, north)?;

    let wire = solid.add_wire(vec![
        OrientedEdge::forward(south_ring),
        OrientedEdge::forward(seam),
        OrientedEdge::backward(north_ring),
        OrientedEdge::backward(seam),
    ])?;
    let face = solid.add_face(
        Surface::Sphere {
            center: Point3::origin(),
            radius,
        },
        vec![wire],
        false,
        (
            Interval::new(0.0, 2.0 * PI),
            Interval::new(-FRAC_PI_2, FRAC_PI_2),
        ),
    )?;
    solid.add_pcurve(
        face,
        seam,
        false,
        Curve2::Line {
            origin: Point2::new(2.0 * PI, 0.0),
            dir: Vector2::new(0.0, 1.0),
        },
    )?;
    solid.add_pcurve(
        face,
        seam,
        true,
        Curve2::Line {
            origin: Point2::new(0.0, 0.0),
            dir: Vector2::new(0.0, 1.0),
        },
    )?;

    Ok(solid)
}

/// A box with a blind cylindrical hole drilled into the middle of its top
/// face. The hole wall is a reversed cylindrical face (its outward normal
/// points toward the hole axis); the top face carries the entrance circle
/// as an inner wire.
pub fn make_box_with_blind_hole(
    dx: f64,
    dy: f64,
    dz: f64,
    radius: f64,
    depth: f64,
) -> Result<Solid> {
    let mut solid = Solid::new();
    let mut cache = EdgeCache::default();
    let x = Vector3::x();
    let y = Vector3::y();
    let z = Vector3::z();

    let verts = box_vertices(&mut solid, dx, dy, dz);
    let v = |vx: usize, vy: usize, vz: usize| verts[vx * 4 + vy * 2 + vz];

    let (cx, cy) = (0.5 * dx, 0.5 * dy);
    let floor_z = dz - depth;

    let entrance = ring_edge(&mut solid, Point3::new(cx, cy, dz), x, y, radius)?;
    let floor = ring_edge(&mut solid, Point3::new(cx, cy, floor_z), x, y, radius)?;
    let (ve, _) = solid
        .edge_vertices(entrance)
        .ok_or(Error::EdgeNotFound(entrance))?;
    let (vf, _) = solid
        .edge_vertices(floor)
        .ok_or(Error::EdgeNotFound(floor))?;
    let hole_seam = solid.add_edge(
        Curve3::Line {
            origin: Point3::new(cx + radius, cy, floor_z),
            dir: z,
        },
        Interval::new(0.0, depth),
        vf,
        ve,
    )?;

    // The entrance circle winds counter-clockwise seen from +z, so the top
    // face's inner wire takes it backward.
    let entrance_wire = solid.add_wire(vec![OrientedEdge::backward(entrance)])?;

    let [bottom, top, front, back, left, right] = box_faces(&v);
    quad_face(&mut solid, &mut cache, bottom, Vec::new())?;
    let top_face = quad_face(&mut solid, &mut cache, top, vec![entrance_wire])?;
    for corners in [front, back, left, right] {
        quad_face(&mut solid, &mut cache, corners, Vec::new())?;
    }

    // The top face's frame is global-axis aligned with origin at its first
    // corner (0, 0, dz), so the hole center sits at uv (cx, cy).
    solid.add_pcurve_both(
        top_face,
        entrance,
        Curve2::Circle {
            center: Point2::new(cx, cy),
            x_axis: Vector2::new(1.0, 0.0),
            y_axis: Vector2::new(0.0, 1.0),
            radius,
        },
    )?;

    // Hole wall. The face is reversed (material lies outside the cylinder),
    // so its boundary runs clockwise in (u, v).
    let wall_wire = solid.add_wire(vec![
        OrientedEdge::forward(entrance),
        OrientedEdge::backward(hole_seam),
        OrientedEdge::backward(floor),
        OrientedEdge::forward(hole_seam),
    ])?;
    let wall = solid.add_face(
        Surface::Cylinder {
            origin: Point3::new(cx, cy, floor_z),
            axis: z,
            x_axis: x,
            y_axis: y,
            radius,
        },
        vec![wall_wire],
        true,
        (Interval::new(0.0, 2.0 * PI), Interval::new(0.0, depth)),
    )?;
    solid.add_pcurve_both(
        wall,
        entrance,
        Curve2::Line {
            origin: Point2::new(0.0, depth),
            dir: Vector2::new(1.0, 0.0),
        },
    )?;
    solid.add_pcurve_both(
        wall,
        floor,
        Curve2::Line {
            origin: Point2::new(0.0, 0.0),
            dir: Vector2::new(1.0, 0.0),
        },
    )?;
    solid.add_pcurve(
        wall,
        hole_seam,
        false,
        Curve2::Line {
            origin: Point2::new(0.0, 0.0),
            dir: Vector2::new(0.0, 1.0),
        },
    )?;
    solid.add_pcurve(
        wall,
        hole_seam,
        true,
        Curve2::Line {
            origin: Point2::new(2.0 * PI, 0.0),
            dir: Vector2::new(0.0, 1.0),
        },
    )?;

    // Hole floor disk, outward normal +z (up into the cavity).
    let floor_wire = solid.add_wire(vec![OrientedEdge::forward(floor)])?;
    let floor_face = solid.add_face(
        Surface::Plane {
            origin: Point3::new(cx, cy, floor_z),
            x_axis: x,
            y_axis: y,
        },
        vec![floor_wire],
        false,
        (
            Interval::new(-radius, radius),
            Interval::new(-radius, radius),
        ),
    )?;
    solid.add_pcurve_both(
        floor_face,
        floor,
        Curve2::Circle {
            center: Point2::new(0.0, 0.0),
            x_axis: Vector2::new(1.0, 0.0),
            y_axis: Vector2::new(0.0, 1.0),
            radius,
        },
    )?;

    Ok(solid)
}

/// An open shell of a horizontal planar strip joined to a tangent
/// quarter-cylinder fillet along `y`, for tangent-continuity checks. The
/// shared edge lies at `(0, t, 1)`; every other edge is an open boundary.
pub fn make_fillet_strip(fillet_radius: f64, length: f64) -> Result<Solid> {
    let mut solid = Solid::new();
    let mut cache = EdgeCache::default();
    let x = Vector3::x();
    let y = Vector3::y();
    let z = Vector3::z();

    let va = solid.add_vertex(Point3::new(-1.0, 0.0, 1.0));
    let v00 = solid.add_vertex(Point3::new(0.0, 0.0, 1.0));
    let v01 = solid.add_vertex(Point3::new(0.0, length, 1.0));
    let vd = solid.add_vertex(Point3::new(-1.0, length, 1.0));
    let w0 = solid.add_vertex(Point3::new(fillet_radius, 0.0, 1.0 - fillet_radius));
    let w1 = solid.add_vertex(Point3::new(fillet_radius, length, 1.0 - fillet_radius));

    // Planar strip, outward normal +z; its second side is the tangency edge.
    quad_face(&mut solid, &mut cache, [va, v00, v01, vd], Vec::new())?;
    let tangent_edge = line_edge(&mut solid, &mut cache, v00, v01)?.edge;

    // Quarter-cylinder fillet rolling from +z (u = 0, tangent to the strip)
    // around to +x (u = π/2).
    let arc = |solid: &mut Solid, center: Point3<f64>, from: VertexKey, to: VertexKey| {
        solid.add_edge(
            Curve3::Circle {
                center,
                x_axis: z,
                y_axis: x,
                radius: fillet_radius,
            },
            Interval::new(0.0, FRAC_PI_2),
            from,
            to,
        )
    };
    let arc0 = arc(
        &mut solid,
        Point3::new(0.0, 0.0, 1.0 - fillet_radius),
        v00,
        w0,
    )?;
    let arc1 = arc(
        &mut solid,
        Point3::new(0.0, length, 1.0 - fillet_radius),
        v01,
        w1,
    )?;
    let far = line_edge(&mut solid, &mut cache, w0, w1)?.edge;

    let fillet_wire = solid.add_wire(vec![
        OrientedEdge::forward(arc0),
        OrientedEdge::forward(far),
        OrientedEdge::backward(arc1),
        OrientedEdge::backward(tangent_edge),
    ])?;
    let fillet = solid.add_face(
        Surface::Cylinder {
            origin: Point3::new(0.0, 0.0, 1.0 - fillet_radius),
            axis: y,
            x_axis: z,
            y_axis: x,
            radius: fillet_radius,
        },
        vec![fillet_wire],
        false,
        (Interval::new(0.0, FRAC_PI_2), Interval::new(0.0, length)),
    )?;
    solid.add_pcurve_both(
        fillet,
        arc0,
        Curve2::Line {
            origin: Point2::new(0.0, 0.0),
            dir: Vector2::new(1.0, 0.0),
        },
    )?;
    solid.add_pcurve_both(
        fillet,
        arc1,
        Curve2::Line {
            origin: Point2::new(0.0, length),
            dir: Vector2::new(1.0, 0.0),
        },
    )?;
    solid.add_pcurve_both(
        fillet,
        far,
        Curve2::Line {
            origin: Point2::new(FRAC_PI_2, 0.0),
            dir: Vector2::new(0.0, 1.0),
        },
    )?;
    solid.add_pcurve_both(
        fillet,
        tangent_edge,
        Curve2::Line {
            origin: Point2::new(0.0, 0.0),
            dir: Vector2::new(0.0, 1.0),
        },
    )?;

    Ok(solid)
}

/// A free edge carrying a clamped cubic B-spline through the given control
/// points (at least four). Returns the solid and the edge key.
pub fn make_spline_edge(control_points: Vec<Point3<f64>>) -> Result<(Solid, EdgeKey)> {
    let mut solid = Solid::new();
    let first = control_points[0];
    let last = control_points[control_points.len() - 1];
    let v0 = solid.add_vertex(first);
    let v1 = solid.add_vertex(last);

    let spline = BsplineCurve::clamped_cubic(control_points);
    let domain = spline.domain();
    let edge = solid.add_edge(Curve3::Bspline(spline), domain, v0, v1)?;
    Ok((solid, edge))
}
