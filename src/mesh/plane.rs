//! Flat quads.

use glam::{Vec2, Vec3};

use super::Mesh;

/// Quad in the XY plane centered on the origin, facing +Z.
#[must_use]
pub fn plane(width: f32, height: f32) -> Mesh {
    let (hw, hh) = (width * 0.5, height * 0.5);
    quad("Plane", [
        Vec3::new(-hw, -hh, 0.0),
        Vec3::new(hw, -hh, 0.0),
        Vec3::new(hw, hh, 0.0),
        Vec3::new(-hw, hh, 0.0),
    ])
}

/// Clip-space quad covering the whole viewport at depth 0.
///
/// The ground plane itself is reconstructed per fragment by unprojecting
/// these corners, so the geometry never needs to be larger than the
/// screen.
#[must_use]
pub fn infinite_plane() -> Mesh {
    quad("InfinitePlane", [
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-1.0, 1.0, 0.0),
    ])
}

fn quad(label: &str, corners: [Vec3; 4]) -> Mesh {
    let uvs = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
    let mut mesh = Mesh::new(label);
    for (p, uv) in corners.into_iter().zip(uvs) {
        let _ = mesh.push_vertex(p, Vec3::Z, uv);
    }
    mesh.indices = vec![0, 1, 2, 0, 2, 3];
    mesh
}
