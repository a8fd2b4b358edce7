//! Axis-aligned box.

use glam::{Vec2, Vec3};

use super::Mesh;

/// Outward face normals in vertex-block order.
const FACE_NORMALS: [Vec3; 6] = [
    Vec3::Z,     // front
    Vec3::X,     // right
    Vec3::NEG_Z, // back
    Vec3::NEG_X, // left
    Vec3::NEG_Y, // bottom
    Vec3::Y,     // top
];

/// Corner signs per face, four corners each.
const FACE_CORNERS: [[[f32; 3]; 4]; 6] = [
    [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
    [[1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0]],
    [
        [-1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [1.0, 1.0, -1.0],
        [1.0, -1.0, -1.0],
    ],
    [
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, -1.0],
    ],
    [
        [-1.0, -1.0, 1.0],
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0],
    ],
    [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]],
];

/// Box of edge lengths `sizes` centered on the origin: 24 vertices (four
/// per face) and 36 indices. `inside_normals` flips every normal for
/// boxes viewed from within.
#[must_use]
pub fn cuboid(sizes: Vec3, inside_normals: bool) -> Mesh {
    let half = sizes * 0.5;
    let flip = if inside_normals { -1.0 } else { 1.0 };
    let uvs = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
    let mut mesh = Mesh::new("Box");
    for (face, corners) in FACE_CORNERS.iter().enumerate() {
        let base = mesh.vertex_count() as u32;
        for (corner, uv) in corners.iter().zip(uvs) {
            let p = Vec3::from_array(*corner) * half;
            let _ = mesh.push_vertex(p, FACE_NORMALS[face] * flip, uv);
        }
        mesh.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_layout() {
        let mesh = cuboid(Vec3::new(2.0, 4.0, 6.0), false);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices.len(), 36);
        let bb = mesh.bounding_box().unwrap();
        assert_eq!(bb.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bb.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn normals_point_out_unless_flipped() {
        for inside in [false, true] {
            let mesh = cuboid(Vec3::ONE, inside);
            for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
                let outward = p.dot(*n) > 0.0;
                assert_eq!(outward, !inside, "vertex {p:?} normal {n:?}");
            }
        }
    }
}
