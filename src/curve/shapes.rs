//! Cross-section polygons in the XY plane, counter-clockwise about +Z.

use glam::Vec3;

/// Regular polygon approximating a circle.
#[must_use]
pub fn circle(radius: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let a = std::f32::consts::TAU * i as f32 / segments as f32;
            Vec3::new(radius * a.cos(), radius * a.sin(), 0.0)
        })
        .collect()
}

/// Axis-aligned rectangle centered on the origin.
#[must_use]
pub fn rectangle(width: f32, height: f32) -> Vec<Vec3> {
    let (hw, hh) = (width * 0.5, height * 0.5);
    vec![
        Vec3::new(-hw, -hh, 0.0),
        Vec3::new(hw, -hh, 0.0),
        Vec3::new(hw, hh, 0.0),
        Vec3::new(-hw, hh, 0.0),
    ]
}

/// Equilateral triangle with circumradius `radius`, apex on +Y.
#[must_use]
pub fn triangle(radius: f32) -> Vec<Vec3> {
    (0..3)
        .map(|i| {
            let a = std::f32::consts::FRAC_PI_2
                + std::f32::consts::TAU * i as f32 / 3.0;
            Vec3::new(radius * a.cos(), radius * a.sin(), 0.0)
        })
        .collect()
}
