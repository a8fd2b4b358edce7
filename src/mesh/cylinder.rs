//! Open or capped cylinder along +Y.

use std::f32::consts::PI;

use glam::{Mat4, Quat, Vec2, Vec3};

use super::Mesh;

/// Non-indexed cylinder with its base circle at y = 0 and top at
/// y = `height`. Texcoord v is 0 at the base and 1 at the top.
///
/// Without `smooth_sides` each segment is flat shaded with the normal of
/// its leading edge.
#[must_use]
pub fn cylinder(
    radius: f32,
    height: f32,
    segments: u32,
    fill_caps: bool,
    smooth_sides: bool,
) -> Mesh {
    let mut mesh = Mesh::new("Cylinder");
    let segments = segments.max(3);
    let delta = 2.0 * PI / segments as f32;
    let top = Vec3::new(0.0, height, 0.0);
    let n_top = Vec3::Y;
    let n_bottom = Vec3::NEG_Y;

    for i in 0..segments {
        let theta = i as f32 * delta;
        let theta1 = (i + 1) as f32 * delta;
        let u = i as f32 / segments as f32;
        let u1 = (i + 1) as f32 / segments as f32;
        let (x, z) = (radius * theta.cos(), radius * theta.sin());
        let (x1, z1) = (radius * theta1.cos(), radius * theta1.sin());

        let v1 = Vec3::new(x, 0.0, z);
        let v2 = Vec3::new(x1, 0.0, z1);
        let v3 = Vec3::new(x1, height, z1);
        let v4 = Vec3::new(x, height, z);

        let n1 = Vec3::new(x, 0.0, z).normalize_or_zero();
        let n2 = if smooth_sides {
            Vec3::new(x1, 0.0, z1).normalize_or_zero()
        } else {
            n1
        };

        let t1 = Vec2::new(u, 0.0);
        let t2 = Vec2::new(u1, 0.0);
        let t3 = Vec2::new(u1, 1.0);
        let t4 = Vec2::new(u, 1.0);
        let t_center = Vec2::new((u + u1) * 0.5, 1.0);

        let mut put = |p: Vec3, n: Vec3, t: Vec2| {
            let _ = mesh.push_vertex(p, n, t);
        };
        put(v1, n1, t1);
        put(v4, n1, t4);
        put(v3, n2, t3);

        put(v1, n1, t1);
        put(v3, n2, t3);
        put(v2, n2, t2);

        if fill_caps {
            put(v4, n_top, t1);
            put(top, n_top, t_center);
            put(v3, n_top, t2);

            put(v2, n_bottom, t2);
            put(Vec3::ZERO, n_bottom, t_center);
            put(v1, n_bottom, t1);
        }
    }
    mesh
}

/// Transform mapping the unit-height +Y cylinder onto the segment
/// `p1`→`p2`: rotate +Y onto the segment, stretch y to its length, move
/// the base to `p1`.
#[must_use]
pub fn orient_between_points(p1: Vec3, p2: Vec3) -> Mat4 {
    let delta = p2 - p1;
    let length = delta.length();
    let rotation = if length > 1e-8 {
        Quat::from_rotation_arc(Vec3::Y, delta / length)
    } else {
        Quat::IDENTITY
    };
    Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, length, 1.0),
        rotation,
        p1,
    )
}

/// Unit-height cylinder placed between two points.
#[must_use]
pub fn cylinder_between_points(
    p1: Vec3,
    p2: Vec3,
    radius: f32,
    segments: u32,
) -> Mesh {
    cylinder(radius, 1.0, segments, false, false)
        .transformed(&orient_between_points(p1, p2))
}
