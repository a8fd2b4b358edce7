//! Subdivided icosahedron.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use rustc_hash::FxHashMap;

use super::Mesh;

/// Faces of the base icosahedron, indexing [`base_vertices`].
const BASE_FACES: [[u32; 3]; 20] = [
    // 5 faces around point 0
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    // 5 adjacent faces
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    // 5 faces around point 3
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    // 5 adjacent faces
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn base_vertices() -> Vec<Vec3> {
    let s = ((5.0 - 5.0_f32.sqrt()) / 10.0).sqrt();
    let t = ((5.0 + 5.0_f32.sqrt()) / 10.0).sqrt();
    vec![
        Vec3::new(-s, t, 0.0),
        Vec3::new(s, t, 0.0),
        Vec3::new(-s, -t, 0.0),
        Vec3::new(s, -t, 0.0),
        Vec3::new(0.0, -s, t),
        Vec3::new(0.0, s, t),
        Vec3::new(0.0, -s, -t),
        Vec3::new(0.0, s, -t),
        Vec3::new(t, 0.0, -s),
        Vec3::new(t, 0.0, s),
        Vec3::new(-t, 0.0, -s),
        Vec3::new(-t, 0.0, s),
    ]
}

/// Unit icosphere topology: deduplicated vertices and triangle faces.
#[derive(Debug, Clone)]
pub struct Icosphere {
    /// Unit-length vertices, each shared by all faces touching it.
    pub vertices: Vec<Vec3>,
    /// Triangles indexing `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl Icosphere {
    /// Subdivide the base icosahedron `subdivisions` times. Every level
    /// splits each face into four.
    #[must_use]
    pub fn new(subdivisions: u32) -> Self {
        let mut vertices = base_vertices();
        let mut faces = BASE_FACES.to_vec();
        let mut midpoints: FxHashMap<u64, u32> = FxHashMap::default();

        for _ in 0..subdivisions {
            let mut refined = Vec::with_capacity(faces.len() * 4);
            for [v1, v2, v3] in faces {
                let a = midpoint(&mut vertices, &mut midpoints, v1, v2);
                let b = midpoint(&mut vertices, &mut midpoints, v2, v3);
                let c = midpoint(&mut vertices, &mut midpoints, v3, v1);
                refined.push([v1, a, c]);
                refined.push([v2, b, a]);
                refined.push([v3, c, b]);
                refined.push([a, b, c]);
            }
            faces = refined;
        }
        Self { vertices, faces }
    }

    /// Non-indexed mesh scaled to `radius`, three vertices per face so the
    /// UV seam can be split.
    #[must_use]
    pub fn mesh(&self, radius: f32) -> Mesh {
        let mut mesh = Mesh::new("Icosphere");
        mesh.positions.reserve(self.faces.len() * 3);
        for &face in &self.faces {
            let n = face.map(|i| self.vertices[i as usize]);
            let mut uv = n.map(vertex_to_uv);
            // A face whose UV winding flips straddles the u = 0/1 seam.
            let winding = (uv[1] - uv[0]).perp_dot(uv[2] - uv[0]);
            if winding < 0.0 {
                for t in &mut uv {
                    if t.x < 0.25 {
                        t.x += 1.0;
                    }
                }
            }
            for k in 0..3 {
                let _ = mesh.push_vertex(n[k] * radius, n[k], uv[k]);
            }
        }
        mesh
    }
}

/// Index of the normalized midpoint between two vertices, created once per
/// unordered pair.
fn midpoint(
    vertices: &mut Vec<Vec3>,
    cache: &mut FxHashMap<u64, u32>,
    p1: u32,
    p2: u32,
) -> u32 {
    let (small, great) = if p1 < p2 { (p1, p2) } else { (p2, p1) };
    let key = (u64::from(small) << 32) + u64::from(great);
    *cache.entry(key).or_insert_with(|| {
        let middle = (vertices[p1 as usize] + vertices[p2 as usize]) * 0.5;
        vertices.push(middle.normalize());
        (vertices.len() - 1) as u32
    })
}

fn vertex_to_uv(n: Vec3) -> Vec2 {
    Vec2::new(
        0.5 - 0.5 * n.x.atan2(-n.z) / PI,
        1.0 - n.y.clamp(-1.0, 1.0).acos() / PI,
    )
}
