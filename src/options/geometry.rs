use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tessellation detail for ball-and-stick molecule meshes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
pub struct GeometryOptions {
    /// Sphere radius for heavy atoms.
    #[schemars(title = "Atom Radius", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub atom_radius: f32,
    /// Sphere radius for hydrogen atoms.
    #[schemars(title = "Hydrogen Radius", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub hydrogen_radius: f32,
    /// Bond cylinder radius.
    #[schemars(title = "Bond Radius", range(min = 0.005, max = 0.5), extend("step" = 0.005))]
    pub bond_radius: f32,
    /// Radial segments per bond cylinder.
    #[schemars(title = "Bond Segments", range(min = 3, max = 64))]
    pub bond_segments: u32,
    /// Icosphere subdivision level for atoms.
    #[schemars(title = "Atom Subdivisions", range(min = 0, max = 5))]
    pub atom_subdivisions: u32,
}

impl GeometryOptions {
    /// Sphere radius for an atom of the given element.
    #[must_use]
    pub fn radius_for(&self, element: &str) -> f32 {
        if element == "H" {
            self.hydrogen_radius
        } else {
            self.atom_radius
        }
    }
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            atom_radius: 0.15,
            hydrogen_radius: 0.05,
            bond_radius: 0.025,
            bond_segments: 10,
            atom_subdivisions: 2,
        }
    }
}
