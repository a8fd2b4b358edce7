//! Swept curve that re-sweeps only when its input changes.

use glam::Vec3;

use super::{sweep, BaseShapes};
use crate::error::MolmeshError;
use crate::mesh::Mesh;
use crate::options::CurveOptions;
use crate::util::hash::hash_curve_input;

/// Swept curve that rebuilds its mesh only when its input points change.
#[derive(Debug, Clone)]
pub struct LiveCurve {
    shapes: BaseShapes,
    options: CurveOptions,
    first_perpendicular: Option<Vec3>,
    last_hash: Option<u64>,
    mesh: Mesh,
}

impl LiveCurve {
    /// Curve with no points yet.
    #[must_use]
    pub fn new(shapes: BaseShapes, options: CurveOptions) -> Self {
        Self {
            shapes,
            options,
            first_perpendicular: None,
            last_hash: None,
            mesh: Mesh::new("Curve"),
        }
    }

    /// Seed axis for the first frame normal.
    #[must_use]
    pub fn with_first_perpendicular(mut self, axis: Vec3) -> Self {
        self.first_perpendicular = Some(axis);
        self
    }

    /// Current mesh.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Replace the cross-sections; the next update rebuilds.
    pub fn set_shapes(&mut self, shapes: BaseShapes) {
        self.shapes = shapes;
        self.last_hash = None;
    }

    /// Re-sweep if `points` differ from the previous update. Returns
    /// whether the mesh was rebuilt. On error the previous mesh is kept.
    pub fn update(&mut self, points: &[Vec3]) -> Result<bool, MolmeshError> {
        let hash = hash_curve_input(points, self.shapes.as_slice());
        if self.last_hash == Some(hash) {
            return Ok(false);
        }
        self.mesh = sweep(
            points,
            &self.shapes,
            self.first_perpendicular,
            &self.options,
        )?;
        self.last_hash = Some(hash);
        Ok(true)
    }
}
