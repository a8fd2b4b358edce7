//! Latitude/longitude sphere.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use super::Mesh;

/// Vertex on a sphere of `radius` at polar angle `theta` and azimuth `phi`.
fn vertex_on_sphere(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.sin() * phi.sin(),
        radius * theta.cos(),
    )
}

/// Equirectangular UV for a unit normal.
fn uv_on_sphere(n: Vec3) -> Vec2 {
    Vec2::new(
        n.z.atan2(n.x) / (2.0 * PI) + 0.5,
        0.5 + n.y.clamp(-1.0, 1.0).asin() / PI,
    )
}

fn emit(mesh: &mut Mesh, verts: [Vec3; 3]) {
    for v in verts {
        let normal = v.normalize_or_zero();
        let _ = mesh.push_vertex(v, normal, uv_on_sphere(normal));
    }
}

/// Non-indexed UV sphere with `segments` latitude rings of `segments`
/// quads each. The pole rings emit one triangle per segment instead of a
/// quad.
#[must_use]
pub fn sphere(radius: f32, segments: u32) -> Mesh {
    let mut mesh = Mesh::new("Sphere");
    let segments = segments.max(1);
    let n = segments as f32;

    for i in 0..segments {
        let theta0 = PI * i as f32 / n;
        let theta1 = PI * (i as f32 + 1.0) / n;
        for j in 0..segments {
            let phi0 = 2.0 * PI * j as f32 / n;
            let phi1 = 2.0 * PI * (j as f32 + 1.0) / n;

            let v00 = vertex_on_sphere(radius, theta0, phi0);
            let v01 = vertex_on_sphere(radius, theta0, phi1);
            let v11 = vertex_on_sphere(radius, theta1, phi1);
            let v10 = vertex_on_sphere(radius, theta1, phi0);

            if i == 0 {
                emit(&mut mesh, [v10, v11, v00]);
            } else if i + 1 == segments {
                emit(&mut mesh, [v01, v00, v11]);
            } else {
                emit(&mut mesh, [v10, v01, v00]);
                emit(&mut mesh, [v10, v11, v01]);
            }
        }
    }
    mesh
}
