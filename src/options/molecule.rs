use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Bond lengths and multi-bond spacing used by the layout solvers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Molecule", inline)]
#[serde(default)]
pub struct MoleculeOptions {
    /// Distance between bonded heavy atoms.
    #[schemars(title = "Bond Length", range(min = 0.1, max = 5.0), extend("step" = 0.05))]
    pub bond_length: f32,
    /// Fraction of `bond_length` used for bonds to hydrogen.
    #[schemars(title = "Hydrogen Bond Scale", range(min = 0.05, max = 1.0), extend("step" = 0.05))]
    pub hydrogen_bond_scale: f32,
    /// Half-distance between the two cylinders of a double bond.
    #[schemars(title = "Double Bond Offset", range(min = 0.0, max = 0.3), extend("step" = 0.01))]
    pub double_bond_offset: f32,
    /// Distance between the outer cylinders and the axis of a triple bond.
    #[schemars(title = "Triple Bond Offset", range(min = 0.0, max = 0.3), extend("step" = 0.01))]
    pub triple_bond_offset: f32,
    /// Rotation (radians) of a ring plane about its entry bond.
    #[schemars(skip)]
    pub ring_initial_angle: f32,
}

impl MoleculeOptions {
    /// Bond length to a child of the given element.
    #[must_use]
    pub fn bond_length_to(&self, element: &str) -> f32 {
        if element == "H" {
            self.bond_length * self.hydrogen_bond_scale
        } else {
            self.bond_length
        }
    }
}

impl Default for MoleculeOptions {
    fn default() -> Self {
        Self {
            bond_length: 1.0,
            hydrogen_bond_scale: 0.2,
            double_bond_offset: 0.05,
            triple_bond_offset: 0.08,
            ring_initial_angle: 0.0,
        }
    }
}
