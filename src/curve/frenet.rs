//! Frenet frames along a sampled curve.

use glam::{Mat4, Quat, Vec3};

/// Local orthonormal frame at one curve sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrenetFrame {
    /// Unit direction of travel.
    pub tangent: Vec3,
    /// Unit normal; cross-section x maps here.
    pub normal: Vec3,
    /// `tangent × normal`; cross-section y maps here.
    pub binormal: Vec3,
    /// Sample position.
    pub position: Vec3,
}

impl FrenetFrame {
    /// Transform taking cross-section coordinates (x, y, z) to
    /// `position + x·normal + y·binormal + z·tangent`.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        Mat4::from_cols(
            self.normal.extend(0.0),
            self.binormal.extend(0.0),
            self.tangent.extend(0.0),
            self.position.extend(1.0),
        )
    }

    fn is_degenerate(&self) -> bool {
        !(self.tangent.is_finite()
            && self.normal.is_finite()
            && self.binormal.is_finite())
    }
}

/// Per-sample tangents: forward difference at the start, backward at the
/// end, central in between. Zero-length differences yield NaN tangents.
#[must_use]
pub fn compute_tangents(points: &[Vec3]) -> Vec<Vec3> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let d = if n < 2 {
                Vec3::ZERO
            } else if i == 0 {
                points[1] - points[0]
            } else if i == n - 1 {
                points[i] - points[i - 1]
            } else {
                points[i + 1] - points[i - 1]
            };
            d.normalize()
        })
        .collect()
}

/// Seed axis for the first normal: world up unless the tangent nearly
/// parallels it.
fn seed_axis(tangent: Vec3) -> Vec3 {
    if tangent.dot(Vec3::Y).abs() > 0.9 {
        Vec3::X
    } else {
        Vec3::Y
    }
}

/// Frenet frames for a point sequence.
///
/// The first normal is `tangent × axis`, where the axis is
/// `first_perpendicular` when given and not parallel to the tangent.
/// Each later normal is the previous one rotated about `t[i-1] × t[i]` by
/// the tangent-to-tangent angle; when that cross product is shorter than
/// `epsilon` the previous normal and binormal carry over unchanged.
///
/// Samples with a non-finite tangent or frame (repeated points) are
/// dropped, and propagation continues from the last kept frame. The first
/// kept sample seeds the sequence.
#[must_use]
pub fn compute_frenet_frames(
    points: &[Vec3],
    first_perpendicular: Option<Vec3>,
    epsilon: f32,
) -> Vec<FrenetFrame> {
    if points.len() < 2 {
        return Vec::new();
    }
    let tangents = compute_tangents(points);

    let mut frames: Vec<FrenetFrame> = Vec::with_capacity(points.len());
    for (&tangent, &position) in tangents.iter().zip(points) {
        let frame = match frames.last() {
            None => seed_frame(tangent, position, first_perpendicular),
            Some(prev) => propagate(prev, tangent, position, epsilon),
        };
        if !frame.is_degenerate() {
            frames.push(frame);
        }
    }

    if frames.len() != points.len() {
        log::debug!(
            "dropped {} degenerate frenet frames",
            points.len() - frames.len()
        );
    }
    frames
}

fn seed_frame(
    tangent: Vec3,
    position: Vec3,
    first_perpendicular: Option<Vec3>,
) -> FrenetFrame {
    let normal = first_perpendicular
        .and_then(|axis| tangent.cross(axis).try_normalize())
        .unwrap_or_else(|| tangent.cross(seed_axis(tangent)).normalize());
    FrenetFrame {
        tangent,
        normal,
        binormal: tangent.cross(normal).normalize(),
        position,
    }
}

fn propagate(
    prev: &FrenetFrame,
    tangent: Vec3,
    position: Vec3,
    epsilon: f32,
) -> FrenetFrame {
    let b = prev.tangent.cross(tangent);
    let (normal, binormal) = if b.length() > epsilon {
        let theta = prev.tangent.dot(tangent).clamp(-1.0, 1.0).acos();
        let rotated =
            (Quat::from_axis_angle(b.normalize(), theta) * prev.normal).normalize();
        (rotated, tangent.cross(rotated).normalize())
    } else {
        (prev.normal, prev.binormal)
    };
    FrenetFrame {
        tangent,
        normal,
        binormal,
        position,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::curve::spline::{CatmullRomSpline, Spline};

    fn random_control_points(seed: u64, count: usize) -> Vec<Vec3> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|i| {
                Vec3::new(
                    i as f32 * 2.0,
                    rng.random_range(-3.0..3.0),
                    rng.random_range(-3.0..3.0),
                )
            })
            .collect()
    }

    #[test]
    fn frames_are_orthonormal() {
        for seed in 0..8 {
            let spline = CatmullRomSpline::new(random_control_points(seed, 8), 10);
            let frames = compute_frenet_frames(&spline.spline_points(), None, 1e-4);
            assert!(!frames.is_empty());
            for (i, f) in frames.iter().enumerate() {
                for (name, v) in [
                    ("tangent", f.tangent),
                    ("normal", f.normal),
                    ("binormal", f.binormal),
                ] {
                    assert!(
                        (v.length() - 1.0).abs() < 1e-3,
                        "seed {seed} frame {i}: {name} length {}",
                        v.length()
                    );
                }
                assert!(f.tangent.dot(f.binormal).abs() < 1e-3);
                assert!(f.normal.dot(f.binormal).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn tangents_use_one_sided_differences_at_ends() {
        let points = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0)];
        let t = compute_tangents(&points);
        assert_eq!(t[0], Vec3::X);
        assert!((t[1] - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
        assert_eq!(t[2], Vec3::Y);
    }

    #[test]
    fn straight_run_carries_frame_unchanged() {
        let points: Vec<Vec3> = (0..5).map(|i| Vec3::Z * i as f32).collect();
        let frames = compute_frenet_frames(&points, None, 1e-4);
        assert_eq!(frames.len(), 5);
        for f in &frames[1..] {
            assert_eq!(f.normal, frames[0].normal);
            assert_eq!(f.binormal, frames[0].binormal);
        }
    }

    #[test]
    fn vertical_tangent_seeds_with_world_right() {
        let points = [Vec3::ZERO, Vec3::Y, Vec3::Y * 2.0];
        let frames = compute_frenet_frames(&points, None, 1e-4);
        // Y × X = -Z
        assert!((frames[0].normal - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn first_perpendicular_overrides_seed() {
        let points = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let frames = compute_frenet_frames(&points, Some(Vec3::Z), 1e-4);
        // X × Z = -Y
        assert!((frames[0].normal - Vec3::NEG_Y).length() < 1e-6);
    }

    fn assert_orthonormal(frames: &[FrenetFrame]) {
        for (i, f) in frames.iter().enumerate() {
            for (name, v) in [
                ("tangent", f.tangent),
                ("normal", f.normal),
                ("binormal", f.binormal),
            ] {
                assert!(v.is_finite(), "frame {i}: {name} {v:?}");
                assert!((v.length() - 1.0).abs() < 1e-3, "frame {i}: {name} {v:?}");
            }
            assert!(f.tangent.dot(f.normal).abs() < 1e-3, "frame {i}");
            assert!(f.tangent.dot(f.binormal).abs() < 1e-3, "frame {i}");
            assert!(f.normal.dot(f.binormal).abs() < 1e-3, "frame {i}");
        }
    }

    #[test]
    fn repeated_first_point_seeds_from_next_sample() {
        // coincident first points give a NaN first tangent
        let points = [Vec3::ZERO, Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let frames = compute_frenet_frames(&points, None, 1e-4);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].position, points[1]);
        assert_eq!(frames[0].tangent, Vec3::X);
        assert_orthonormal(&frames);
    }

    #[test]
    fn repeated_last_point_drops_final_frame() {
        let mut points: Vec<Vec3> = (0..5)
            .map(|i| {
                let a = i as f32 * 0.3;
                Vec3::new(a.cos(), a.sin(), 0.0) * 2.0
            })
            .collect();
        points.push(points[4]);
        let frames = compute_frenet_frames(&points, None, 1e-4);
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[4].position, points[4]);
        assert_orthonormal(&frames);
    }

    #[test]
    fn repeated_interior_point_continues_from_last_frame() {
        let points = [
            Vec3::ZERO,
            Vec3::X,
            Vec3::X,
            Vec3::X,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
        ];
        let frames = compute_frenet_frames(&points, None, 1e-4);
        // the middle copy of X has a zero central difference
        assert_eq!(frames.len(), 5);
        assert_orthonormal(&frames);
    }

    #[test]
    fn parallel_first_perpendicular_falls_back_to_seed_axis() {
        let points = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let frames = compute_frenet_frames(&points, Some(Vec3::X), 1e-4);
        assert_eq!(frames.len(), 3);
        // X × Y = Z
        assert!((frames[0].normal - Vec3::Z).length() < 1e-6);
        assert_orthonormal(&frames);
    }

    #[test]
    fn transform_maps_shape_axes() {
        let f = FrenetFrame {
            tangent: Vec3::Z,
            normal: Vec3::X,
            binormal: Vec3::Y,
            position: Vec3::new(0.0, 0.0, 5.0),
        };
        let p = f.transform().transform_point3(Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(p, Vec3::new(1.0, 2.0, 5.0));
    }
}
