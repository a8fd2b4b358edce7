//! Frames for curves winding around a straight axis.

use glam::Vec3;

use super::FrenetFrame;
use crate::error::MolmeshError;

/// Frames whose tangent is the helix axis and whose normal points from the
/// nearest axis point out to each sample, so cross-sections stay aligned
/// with the axis instead of twisting with the curve.
pub fn helix_frames(
    points: &[Vec3],
    axis_point: Vec3,
    axis_direction: Vec3,
) -> Result<Vec<FrenetFrame>, MolmeshError> {
    let length_squared = axis_direction.length_squared();
    if length_squared == 0.0 {
        return Err(MolmeshError::DegenerateAxis);
    }
    let tangent = axis_direction.normalize();
    Ok(points
        .iter()
        .map(|&p| {
            let t = (p - axis_point).dot(axis_direction) / length_squared;
            let plumb = axis_point + axis_direction * t;
            let normal = (p - plumb).normalize_or_zero();
            FrenetFrame {
                tangent,
                normal,
                binormal: tangent.cross(normal).normalize_or_zero(),
                position: p,
            }
        })
        .collect())
}
