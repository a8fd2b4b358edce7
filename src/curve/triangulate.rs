//! Triangulation of a stack of equally sized cross-sections.

use glam::{Vec2, Vec3};

use crate::error::MolmeshError;
use crate::mesh::Mesh;
use crate::options::CurveCover;

/// Indexed tube through `sections`, with optional end covers.
///
/// Each ring is emitted with its first vertex repeated at u = 1, so the
/// seam quad between the last and first vertex has its own texture column.
/// Adjacent sections are joined by two triangles per vertex pair. Side
/// normals are the normalized sum of the adjacent face normals, shared
/// across the seam. Cover vertices are duplicated with a flat normal
/// facing out of the tube.
pub fn tube_mesh(
    sections: &[Vec<Vec3>],
    cover: CurveCover,
) -> Result<Mesh, MolmeshError> {
    let mut mesh = Mesh::new("Curve");
    let Some(first) = sections.first() else {
        return Ok(mesh);
    };
    let ring = first.len();
    if let Some((index, shape)) =
        sections.iter().enumerate().find(|(_, s)| s.len() != ring)
    {
        return Err(MolmeshError::BaseShapeSizeMismatch {
            index,
            expected: ring,
            found: shape.len(),
        });
    }
    if ring == 0 {
        return Ok(mesh);
    }

    let stride = ring + 1;
    let last_section = (sections.len() - 1).max(1) as f32;
    for (i, section) in sections.iter().enumerate() {
        let v = i as f32 / last_section;
        for (j, &p) in section.iter().chain(section.first()).enumerate() {
            let uv = Vec2::new(j as f32 / ring as f32, v);
            let _ = mesh.push_vertex(p, Vec3::ZERO, uv);
        }
    }

    for i in 0..sections.len() - 1 {
        let s = (i * stride) as u32;
        let next = s + stride as u32;
        for j in 0..ring as u32 {
            let j1 = j + 1;
            mesh.indices.extend([s + j, s + j1, next + j]);
            mesh.indices.extend([s + j1, next + j1, next + j]);
        }
    }
    accumulate_normals(&mut mesh, stride, sections.len());

    if cover.covers_top() && sections.len() > 1 {
        add_cover(&mut mesh, first, true);
    }
    if cover.covers_bottom() && sections.len() > 1 {
        if let Some(last) = sections.last() {
            add_cover(&mut mesh, last, false);
        }
    }
    if sections.len() == 1 && cover != CurveCover::None {
        // a single section is a flat disc, one cover is enough
        add_cover(&mut mesh, first, false);
    }
    Ok(mesh)
}

fn accumulate_normals(mesh: &mut Mesh, stride: usize, rings: usize) {
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let n = (mesh.positions[b] - mesh.positions[a])
            .cross(mesh.positions[c] - mesh.positions[a]);
        mesh.normals[a] += n;
        mesh.normals[b] += n;
        mesh.normals[c] += n;
    }
    // seam copies share one normal
    for r in 0..rings {
        let (first, seam) = (r * stride, r * stride + stride - 1);
        let sum = mesh.normals[first] + mesh.normals[seam];
        mesh.normals[first] = sum;
        mesh.normals[seam] = sum;
    }
    for n in &mut mesh.normals {
        *n = n.normalize_or_zero();
    }
}

/// Cover triangles for a polygon of `count` vertices, as index triples.
///
/// Consecutive vertex triples (stepping by two) form triangles; the first
/// vertex of each triple is kept for the next, coarser level until fewer
/// than three remain. An even level wraps to its first vertex, an odd one
/// carries its last vertex into the next level. `reversed` emits each
/// triangle as (v0, v2, v1).
#[must_use]
pub fn cover_triangles(count: usize, reversed: bool) -> Vec<[usize; 3]> {
    let mut triangles = Vec::with_capacity(count.saturating_sub(2));
    let mut level: Vec<usize> = (0..count).collect();
    while level.len() >= 3 {
        let size = level.len();
        let mut work = level.clone();
        if size % 2 == 0 {
            work.push(level[0]);
        }
        let mut next = Vec::with_capacity(size / 2 + 1);
        for w in work.windows(3).step_by(2) {
            if reversed {
                triangles.push([w[0], w[2], w[1]]);
            } else {
                triangles.push([w[0], w[1], w[2]]);
            }
            next.push(w[0]);
        }
        if size % 2 == 1 {
            next.push(level[size - 1]);
        }
        level = next;
    }
    triangles
}

/// Close one end. The start cover is reversed so both ends face outward.
fn add_cover(mesh: &mut Mesh, polygon: &[Vec3], start: bool) {
    let triangles = cover_triangles(polygon.len(), start);
    let Some(normal) = triangles
        .iter()
        .map(|t| {
            (polygon[t[1]] - polygon[t[0]]).cross(polygon[t[2]] - polygon[t[0]])
        })
        .reduce(|a, b| a + b)
        .map(Vec3::normalize_or_zero)
    else {
        return;
    };
    let center = polygon.iter().copied().sum::<Vec3>() / polygon.len() as f32;
    let extent = polygon
        .iter()
        .map(|p| (*p - center).length())
        .fold(0.0_f32, f32::max)
        .max(f32::EPSILON);
    let (u_axis, v_axis) = plane_axes(normal);
    let base = mesh.vertex_count() as u32;
    for &p in polygon {
        let local = (p - center) / extent;
        let uv = Vec2::new(0.5 + 0.5 * local.dot(u_axis), 0.5 + 0.5 * local.dot(v_axis));
        let _ = mesh.push_vertex(p, normal, uv);
    }
    for t in triangles {
        mesh.indices.extend(t.map(|i| base + i as u32));
    }
}

fn plane_axes(normal: Vec3) -> (Vec3, Vec3) {
    let u = crate::mesh::find_perpendicular(normal);
    (u, normal.cross(u))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::shapes::circle;

    #[test]
    fn sixteen_gon_cover_matches_golden_order() {
        let expected: Vec<[usize; 3]> = vec![
            [0, 1, 2],
            [2, 3, 4],
            [4, 5, 6],
            [6, 7, 8],
            [8, 9, 10],
            [10, 11, 12],
            [12, 13, 14],
            [14, 15, 0],
            [0, 2, 4],
            [4, 6, 8],
            [8, 10, 12],
            [12, 14, 0],
            [0, 4, 8],
            [8, 12, 0],
        ];
        assert_eq!(cover_triangles(16, false), expected);
        let reversed = cover_triangles(16, true);
        assert_eq!(reversed.len(), 14);
        assert_eq!(reversed[7], [14, 0, 15]);
    }

    #[test]
    fn odd_polygons_are_fully_covered() {
        assert_eq!(cover_triangles(5, false), vec![[0, 1, 2], [2, 3, 4], [0, 2, 4]]);
        for n in 3..40 {
            assert_eq!(cover_triangles(n, false).len(), n - 2, "{n}-gon");
        }
        assert!(cover_triangles(2, false).is_empty());
    }

    #[test]
    fn mismatched_sections_fail_before_building() {
        let sections = vec![circle(1.0, 8), circle(1.0, 8), circle(1.0, 6)];
        let err = tube_mesh(&sections, CurveCover::None).unwrap_err();
        assert!(
            matches!(
                err,
                MolmeshError::BaseShapeSizeMismatch { index: 2, expected: 8, found: 6 }
            ),
            "unexpected error {err:?}"
        );
    }

    fn stacked(rings: usize, segments: usize) -> Vec<Vec<Vec3>> {
        (0..rings)
            .map(|i| {
                circle(1.0, segments)
                    .into_iter()
                    .map(|p| p + Vec3::Z * i as f32)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn tube_triangle_count_includes_seam() {
        let mesh = tube_mesh(&stacked(4, 8), CurveCover::None).unwrap();
        assert_eq!(mesh.vertex_count(), 4 * 9);
        assert_eq!(mesh.triangle_count(), 3 * 8 * 2);
    }

    #[test]
    fn seam_column_closes_texture_at_u_one() {
        let mesh = tube_mesh(&stacked(3, 8), CurveCover::None).unwrap();
        for (i, ring) in mesh.positions.chunks_exact(9).enumerate() {
            assert_eq!(ring[8], ring[0], "ring {i} seam position");
            let uvs = &mesh.texcoords[i * 9..i * 9 + 9];
            assert_eq!(uvs[0].x, 0.0);
            assert_eq!(uvs[8].x, 1.0);
            assert!(uvs.windows(2).all(|w| w[1].x > w[0].x), "ring {i} u {uvs:?}");
            assert_eq!(mesh.normals[i * 9], mesh.normals[i * 9 + 8]);
        }
        // every side triangle spans at most one u step
        for tri in mesh.indices.chunks_exact(3) {
            let u: Vec<f32> = tri.iter().map(|&k| mesh.texcoords[k as usize].x).collect();
            let spread = u.iter().copied().fold(f32::MIN, f32::max)
                - u.iter().copied().fold(f32::MAX, f32::min);
            assert!(spread <= 1.0 / 8.0 + 1e-6, "triangle {tri:?} u {u:?}");
        }
    }

    #[test]
    fn side_normals_point_outward() {
        let mesh = tube_mesh(&stacked(3, 12), CurveCover::None).unwrap();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let radial = Vec3::new(p.x, p.y, 0.0);
            assert!(radial.dot(*n) > 0.0, "inward normal at {p:?}");
        }
    }

    #[test]
    fn covers_face_away_from_tube() {
        let mesh = tube_mesh(&stacked(3, 16), CurveCover::Both).unwrap();
        assert_eq!(mesh.triangle_count(), 2 * 16 * 2 + 2 * 14);
        let side_vertices = 3 * 17;
        let top = mesh.normals[side_vertices];
        let bottom = mesh.normals[side_vertices + 16];
        assert!((top - Vec3::NEG_Z).length() < 1e-5, "top cover normal {top:?}");
        assert!((bottom - Vec3::Z).length() < 1e-5, "bottom cover normal {bottom:?}");
        // the cover winding agrees with its normal
        let tri = mesh.triangles()[2 * 16 * 2];
        let wind = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
        assert!(wind.dot(top) > 0.0);
    }

    #[test]
    fn empty_input_is_empty_mesh() {
        let mesh = tube_mesh(&[], CurveCover::Both).unwrap();
        assert!(mesh.is_empty());
    }
}
