//! Cheap hashing of point sequences for change detection.

use std::hash::{Hash, Hasher};

use glam::Vec3;
use rustc_hash::FxHasher;

/// Hash a single [`Vec3`] by converting each component to bits.
pub fn hash_vec3(v: Vec3, hasher: &mut impl Hasher) {
    v.x.to_bits().hash(hasher);
    v.y.to_bits().hash(hasher);
    v.z.to_bits().hash(hasher);
}

/// Hash every point of a sequence, length included.
///
/// Curve edits usually move interior control points, so sampling only the
/// ends would miss them.
pub fn hash_points(points: &[Vec3], hasher: &mut impl Hasher) {
    points.len().hash(hasher);
    for &p in points {
        hash_vec3(p, hasher);
    }
}

/// Digest of a point sequence and a stack of cross-sections.
pub fn hash_curve_input(points: &[Vec3], shapes: &[Vec<Vec3>]) -> u64 {
    let mut hasher = FxHasher::default();
    hash_points(points, &mut hasher);
    shapes.len().hash(&mut hasher);
    for shape in shapes {
        hash_points(shape, &mut hasher);
    }
    hasher.finish()
}
