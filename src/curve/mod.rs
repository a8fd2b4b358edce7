//! Curve extrusion: splines, moving frames and swept tube meshes.
//!
//! A sweep samples a [`Spline`], computes one [`FrenetFrame`] per sample,
//! maps a 2D base shape through every frame and stitches the resulting
//! stack of polygons into a tube with optional end covers.

mod frenet;
mod helix;
mod live;
pub mod shapes;
mod spline;
mod triangulate;

pub use frenet::{compute_frenet_frames, compute_tangents, FrenetFrame};
pub use helix::helix_frames;
pub use live::LiveCurve;
pub use spline::{CatmullRomSpline, Polyline, Spline, UniformBSpline};
pub use triangulate::{cover_triangles, tube_mesh};

use glam::Vec3;

use crate::error::MolmeshError;
use crate::mesh::Mesh;
use crate::options::CurveOptions;

/// Cross-sections to sweep along a curve.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseShapes {
    /// One shape reused at every frame.
    Uniform(Vec<Vec3>),
    /// One shape per frame, all with the same vertex count.
    PerFrame(Vec<Vec<Vec3>>),
}

impl BaseShapes {
    /// Shapes as a slice, one element for [`BaseShapes::Uniform`].
    #[must_use]
    pub fn as_slice(&self) -> &[Vec<Vec3>] {
        match self {
            Self::Uniform(shape) => std::slice::from_ref(shape),
            Self::PerFrame(shapes) => shapes,
        }
    }
}

impl From<Vec<Vec3>> for BaseShapes {
    fn from(shape: Vec<Vec3>) -> Self {
        Self::Uniform(shape)
    }
}

/// Map each base shape through its frame.
///
/// A single shape is reused for every frame; otherwise the shape count
/// must equal the frame count.
pub fn transform_shapes(
    frames: &[FrenetFrame],
    shapes: &BaseShapes,
) -> Result<Vec<Vec<Vec3>>, MolmeshError> {
    let slice = shapes.as_slice();
    if slice.len() != 1 && slice.len() != frames.len() {
        return Err(MolmeshError::ShapeCountMismatch {
            shapes: slice.len(),
            frames: frames.len(),
        });
    }
    Ok(frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let transform = frame.transform();
            let shape = if slice.len() == 1 { &slice[0] } else { &slice[i] };
            shape
                .iter()
                .map(|&p| transform.transform_point3(p))
                .collect()
        })
        .collect())
}

/// Sweep `shapes` along `points`.
///
/// Fewer than two points produce an empty mesh. Mismatched cross-section
/// sizes fail before any buffer is built.
pub fn sweep(
    points: &[Vec3],
    shapes: &BaseShapes,
    first_perpendicular: Option<Vec3>,
    options: &CurveOptions,
) -> Result<Mesh, MolmeshError> {
    if points.len() == 1 {
        log::warn!("cannot sweep a curve through a single point");
    }
    let frames =
        compute_frenet_frames(points, first_perpendicular, options.frame_epsilon);
    sweep_frames(&frames, shapes, options)
}

/// Sweep `shapes` through precomputed frames, e.g. from [`helix_frames`].
pub fn sweep_frames(
    frames: &[FrenetFrame],
    shapes: &BaseShapes,
    options: &CurveOptions,
) -> Result<Mesh, MolmeshError> {
    check_shape_sizes(shapes.as_slice())?;
    if frames.is_empty() {
        return Ok(Mesh::new("Curve"));
    }
    let sections = transform_shapes(frames, shapes)?;
    let mesh = tube_mesh(&sections, options.cover)?;
    log::debug!(
        "swept {} frames into {} triangles",
        frames.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Sample `spline` and sweep `shapes` along it.
pub fn sweep_spline(
    spline: &impl Spline,
    shapes: &BaseShapes,
    first_perpendicular: Option<Vec3>,
    options: &CurveOptions,
) -> Result<Mesh, MolmeshError> {
    sweep(&spline.spline_points(), shapes, first_perpendicular, options)
}

fn check_shape_sizes(shapes: &[Vec<Vec3>]) -> Result<(), MolmeshError> {
    let Some(first) = shapes.first() else {
        return Ok(());
    };
    match shapes.iter().enumerate().find(|(_, s)| s.len() != first.len()) {
        Some((index, shape)) => Err(MolmeshError::BaseShapeSizeMismatch {
            index,
            expected: first.len(),
            found: shape.len(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CurveCover;

    fn open_tube() -> CurveOptions {
        CurveOptions {
            cover: CurveCover::None,
            ..CurveOptions::default()
        }
    }

    fn arc(count: usize) -> Vec<Vec3> {
        (0..count)
            .map(|i| {
                let a = i as f32 * 0.2;
                Vec3::new(a.cos() * 3.0, a.sin() * 3.0, i as f32 * 0.1)
            })
            .collect()
    }

    #[test]
    fn empty_spline_sweeps_to_nothing() {
        let shapes = BaseShapes::from(shapes::circle(0.2, 8));
        let mesh = sweep(&[], &shapes, None, &CurveOptions::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 0);
        let again = sweep(&[], &shapes, None, &CurveOptions::default()).unwrap();
        assert_eq!(mesh, again);
        let single =
            sweep(&[Vec3::ONE], &shapes, None, &CurveOptions::default()).unwrap();
        assert!(single.is_empty());
    }

    #[test]
    fn per_frame_size_mismatch_fails() {
        let points = arc(3);
        let shapes = BaseShapes::PerFrame(vec![
            shapes::circle(0.2, 8),
            shapes::circle(0.2, 8),
            shapes::circle(0.2, 7),
        ]);
        let err = sweep(&points, &shapes, None, &open_tube()).unwrap_err();
        assert!(
            matches!(err, MolmeshError::BaseShapeSizeMismatch { index: 2, .. }),
            "{err}"
        );
        // size check runs before the (empty) curve is even looked at
        assert!(sweep(&[], &shapes, None, &open_tube()).is_err());
    }

    #[test]
    fn wrong_shape_count_fails() {
        let shapes = BaseShapes::PerFrame(vec![
            shapes::circle(0.2, 8),
            shapes::circle(0.2, 8),
        ]);
        let err = sweep(&arc(5), &shapes, None, &open_tube()).unwrap_err();
        assert!(
            matches!(err, MolmeshError::ShapeCountMismatch { shapes: 2, frames: 5 }),
            "{err}"
        );
    }

    #[test]
    fn sweep_keeps_radius_around_curve() {
        let points = arc(20);
        let shapes = BaseShapes::from(shapes::circle(0.25, 12));
        let mesh = sweep(&points, &shapes, None, &open_tube()).unwrap();
        // each ring repeats its first vertex as the texture seam
        assert_eq!(mesh.vertex_count(), 20 * 13);
        assert_eq!(mesh.triangle_count(), 19 * 12 * 2);
        for (i, ring) in mesh.positions.chunks_exact(13).enumerate() {
            for p in ring {
                let r = (*p - points[i]).length();
                assert!((r - 0.25).abs() < 1e-4, "ring {i} radius {r}");
            }
        }
    }

    #[test]
    fn spline_sweep_samples_the_spline() {
        let spline = CatmullRomSpline::new(arc(4), 6);
        let expected = spline.spline_points().len();
        let shapes = BaseShapes::from(shapes::triangle(0.1));
        let mesh = sweep_spline(&spline, &shapes, None, &open_tube()).unwrap();
        assert_eq!(mesh.vertex_count(), expected * 4);
    }

    #[test]
    fn repeated_tail_point_keeps_mesh_finite() {
        let mut points = arc(5);
        points.push(points[4]);
        let shapes = BaseShapes::from(shapes::circle(0.2, 8));
        let mesh = sweep(&points, &shapes, None, &open_tube()).unwrap();
        assert_eq!(mesh.vertex_count(), 5 * 9);
        let bad = mesh
            .positions
            .iter()
            .chain(&mesh.normals)
            .filter(|v| !v.is_finite())
            .count();
        assert_eq!(bad, 0, "non-finite vertices in swept mesh");
    }

    #[test]
    fn helix_frames_sweep_with_covers() {
        let points = arc(10);
        let frames = helix_frames(&points, Vec3::ZERO, Vec3::Z).unwrap();
        let shapes = BaseShapes::from(shapes::rectangle(0.4, 0.1));
        let mesh =
            sweep_frames(&frames, &shapes, &CurveOptions::default()).unwrap();
        // 9 spans of 4 quads, two 4-gon covers of 2 triangles each
        assert_eq!(mesh.triangle_count(), 9 * 4 * 2 + 2 * 2);
    }
}
