//! Spline evaluators producing the point sequences a sweep consumes.
//!
//! Pure Vec3 → Vec3 transforms.

use glam::Vec3;

/// Source of an ordered, finite sequence of curve samples.
pub trait Spline {
    /// Sampled curve points, possibly empty.
    fn spline_points(&self) -> Vec<Vec3>;
    /// Points the curve was built from.
    fn control_points(&self) -> &[Vec3];
    /// Samples generated per control-point span.
    fn points_per_section(&self) -> usize;
}

/// Uniform Catmull-Rom spline through every control point.
#[derive(Debug, Clone)]
pub struct CatmullRomSpline {
    control_points: Vec<Vec3>,
    segments_per_span: usize,
}

impl CatmullRomSpline {
    /// Spline with `segments_per_span` samples per span (at least one).
    #[must_use]
    pub fn new(control_points: Vec<Vec3>, segments_per_span: usize) -> Self {
        Self {
            control_points,
            segments_per_span: segments_per_span.max(1),
        }
    }
}

impl Spline for CatmullRomSpline {
    fn spline_points(&self) -> Vec<Vec3> {
        catmull_rom(&self.control_points, self.segments_per_span)
    }

    fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    fn points_per_section(&self) -> usize {
        self.segments_per_span
    }
}

/// Uniform cubic B-spline (smooth approximation, does not pass through
/// interior control points).
#[derive(Debug, Clone)]
pub struct UniformBSpline {
    control_points: Vec<Vec3>,
    segments_per_span: usize,
}

impl UniformBSpline {
    /// B-spline with `segments_per_span` samples per span (at least one).
    #[must_use]
    pub fn new(control_points: Vec<Vec3>, segments_per_span: usize) -> Self {
        Self {
            control_points,
            segments_per_span: segments_per_span.max(1),
        }
    }
}

impl Spline for UniformBSpline {
    fn spline_points(&self) -> Vec<Vec3> {
        cubic_bspline(&self.control_points, self.segments_per_span)
    }

    fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    fn points_per_section(&self) -> usize {
        self.segments_per_span
    }
}

/// Precomputed samples used as-is.
#[derive(Debug, Clone, Default)]
pub struct Polyline(pub Vec<Vec3>);

impl Spline for Polyline {
    fn spline_points(&self) -> Vec<Vec3> {
        self.0.clone()
    }

    fn control_points(&self) -> &[Vec3] {
        &self.0
    }

    fn points_per_section(&self) -> usize {
        1
    }
}

/// Catmull-Rom interpolation (passes through all control points).
pub(crate) fn catmull_rom(points: &[Vec3], segments_per_span: usize) -> Vec<Vec3> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }
    if n < 3 {
        return linear_interpolate(points, segments_per_span);
    }

    let mut result = Vec::with_capacity((n - 1) * segments_per_span + 1);

    for i in 0..n - 1 {
        let p0 = if i == 0 {
            points[0] * 2.0 - points[1]
        } else {
            points[i - 1]
        };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = if i + 2 >= n {
            points[n - 1] * 2.0 - points[n - 2]
        } else {
            points[i + 2]
        };

        for j in 0..segments_per_span {
            let t = j as f32 / segments_per_span as f32;
            let t2 = t * t;
            let t3 = t2 * t;

            let pos = 0.5
                * ((2.0 * p1)
                    + (-p0 + p2) * t
                    + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
                    + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3);
            result.push(pos);
        }
    }

    result.push(points[n - 1]);
    result
}

/// Cubic B-spline with mirrored end padding so the curve starts and ends on
/// the first and last control point.
pub(crate) fn cubic_bspline(points: &[Vec3], segments_per_span: usize) -> Vec<Vec3> {
    fn b0(t: f32) -> f32 {
        (1.0 - t).powi(3) / 6.0
    }
    fn b1(t: f32) -> f32 {
        (3.0 * t.powi(3) - 6.0 * t.powi(2) + 4.0) / 6.0
    }
    fn b2(t: f32) -> f32 {
        (-3.0 * t.powi(3) + 3.0 * t.powi(2) + 3.0 * t + 1.0) / 6.0
    }
    fn b3(t: f32) -> f32 {
        t.powi(3) / 6.0
    }

    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }
    if n < 4 {
        return linear_interpolate(points, segments_per_span);
    }

    let mut padded = Vec::with_capacity(n + 2);
    padded.push(points[0] * 2.0 - points[1]);
    padded.extend_from_slice(points);
    padded.push(points[n - 1] * 2.0 - points[n - 2]);

    let mut result = Vec::with_capacity((n - 1) * segments_per_span + 1);
    for window in padded.windows(4) {
        let [p0, p1, p2, p3] = [window[0], window[1], window[2], window[3]];
        for j in 0..segments_per_span {
            let t = j as f32 / segments_per_span as f32;
            result.push(p0 * b0(t) + p1 * b1(t) + p2 * b2(t) + p3 * b3(t));
        }
    }

    result.push(points[n - 1]);
    result
}

/// Linear interpolation fallback for short point sequences.
pub(crate) fn linear_interpolate(
    points: &[Vec3],
    segments_per_span: usize,
) -> Vec<Vec3> {
    let mut result = Vec::new();
    for pair in points.windows(2) {
        for j in 0..segments_per_span {
            let t = j as f32 / segments_per_span as f32;
            result.push(pair[0].lerp(pair[1], t));
        }
    }
    if let Some(&last) = points.last() {
        result.push(last);
    }
    result
}
