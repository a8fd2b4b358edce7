//! Arrow glyph as a line strip with adjacency.

use glam::{Vec2, Vec3};

use super::{Mesh, Topology};

/// Head half-width as a fraction of the arrow length.
pub const ARROW_HEAD_WIDTH: f32 = 0.1;
/// Fraction of the shaft at which the head triangles start.
pub const ARROW_HEAD_POSITION: f32 = 0.8;

const ARROW_TEXCOORD: f32 = 0.225;

/// Arrow from the origin to `vector`.
///
/// The strip is: leading adjacency sentinel, shaft, two head triangles in
/// perpendicular planes, trailing sentinel. Normals repeat the positions,
/// as line shaders read them as per-point attributes.
#[must_use]
pub fn arrow(vector: Vec3) -> Mesh {
    let base = if vector.x == 0.0 && vector.y == 0.0 {
        // parallel to z
        Vec3::Y
    } else {
        Vec3::new(-vector.y, vector.x, 0.0).normalize()
    };
    let width = ARROW_HEAD_WIDTH * vector.length();
    let head = vector * ARROW_HEAD_POSITION;
    let first = base * width;
    let second = first.cross(vector).normalize_or_zero() * width;

    let points = [
        Vec3::ZERO,
        Vec3::ZERO,
        vector,
        head + first,
        head - first,
        vector,
        head + second,
        head - second,
        vector,
        vector,
    ];

    let mut mesh = Mesh::new("Arrow");
    mesh.topology = Topology::LineStripAdjacency;
    for p in points {
        let _ = mesh.push_vertex(p, p, Vec2::splat(ARROW_TEXCOORD));
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_layout_and_head_size() {
        let v = Vec3::new(0.0, 0.0, 10.0);
        let mesh = arrow(v);
        assert_eq!(mesh.topology, Topology::LineStripAdjacency);
        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.triangle_count(), 0);
        assert_eq!(mesh.positions[0], mesh.positions[1]);
        assert_eq!(mesh.positions[8], mesh.positions[9]);
        // z-parallel input uses the y axis for the first head triangle
        assert!((mesh.positions[3] - Vec3::new(0.0, 1.0, 8.0)).length() < 1e-5);
        let half = (mesh.positions[6] - v * 0.8).length();
        assert!((half - 1.0).abs() < 1e-5, "head half-width {half}");
    }

    #[test]
    fn head_triangles_are_perpendicular() {
        let v = Vec3::new(3.0, -1.0, 2.0);
        let mesh = arrow(v);
        let head = v * ARROW_HEAD_POSITION;
        let a = mesh.positions[3] - head;
        let b = mesh.positions[6] - head;
        assert!(a.dot(b).abs() < 1e-4);
        assert!(a.dot(v).abs() < 1e-4 && b.dot(v).abs() < 1e-4);
    }
}
