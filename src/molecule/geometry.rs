//! Laid-out molecule: placed atoms, bonds and rings, plus tessellation into
//! ball-and-stick meshes.

use glam::{Mat4, Vec3};
use serde::Serialize;

use super::element::ElementTable;
use super::tree::{BondTree, NodeId};
use super::vsepr::Layout;
use crate::error::MolmeshError;
use crate::mesh::{cylinder, orient_between_points, BoundingBox, Icosphere, Mesh};
use crate::options::{GeometryOptions, MoleculeOptions};

/// One atom with its world position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedAtom {
    /// Tree node the atom was placed for.
    pub node: NodeId,
    /// Element symbol.
    pub element: String,
    /// Atom identifier, possibly empty.
    pub identifier: String,
    /// World position.
    pub position: Vec3,
    /// Display color from the element table.
    pub color: Option<[f32; 3]>,
    /// Atom this one was bonded from; `None` for the root.
    pub parent: Option<NodeId>,
}

/// A bond between two placed atoms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bond {
    /// Atom the bond starts at.
    pub from: NodeId,
    /// Atom the bond ends at.
    pub to: NodeId,
    /// Bond order.
    pub order: u8,
    /// Identifier of the `to` atom.
    pub identifier: String,
    /// Position of `from`.
    pub start: Vec3,
    /// Position of `to`.
    pub end: Vec3,
    /// Cylinder axes, one per drawn line: one for single bonds, two offset
    /// lines for double bonds, two plus the center line for triple bonds.
    pub segments: Vec<[Vec3; 2]>,
}

/// A laid-out ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingMembers {
    /// Anchor atom.
    pub anchor: NodeId,
    /// Anchor followed by the path atoms in walk order.
    pub members: Vec<NodeId>,
    /// Polygon center.
    pub center: Vec3,
    /// Unit normal of the ring plane.
    pub normal: Vec3,
}

/// Result of laying out a [`BondTree`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoleculeGeometry {
    /// Atoms in placement order, root first.
    pub atoms: Vec<PlacedAtom>,
    /// Bonds in placement order.
    pub bonds: Vec<Bond>,
    /// Rings in completion order.
    pub rings: Vec<RingMembers>,
}

impl MoleculeGeometry {
    /// Lay out `tree` with the root atom at the origin.
    #[must_use]
    pub fn build(
        tree: &BondTree,
        table: &impl ElementTable,
        options: &MoleculeOptions,
    ) -> Self {
        let geometry = Layout::new(tree, table, options).run();
        log::debug!(
            "laid out {} atoms, {} bonds, {} rings",
            geometry.atoms.len(),
            geometry.bonds.len(),
            geometry.rings.len()
        );
        geometry
    }

    /// Placed atom for a tree node.
    #[must_use]
    pub fn atom(&self, node: NodeId) -> Option<&PlacedAtom> {
        self.atoms.iter().find(|a| a.node == node)
    }

    /// First placed atom with the given identifier.
    #[must_use]
    pub fn atom_by_identifier(&self, identifier: &str) -> Option<&PlacedAtom> {
        self.atoms.iter().find(|a| a.identifier == identifier)
    }

    /// Box around all atom centers.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let points: Vec<Vec3> = self.atoms.iter().map(|a| a.position).collect();
        BoundingBox::from_points(&points)
    }

    /// One sphere per atom labeled with its identifier, then one cylinder
    /// per bond line labeled `"{identifier}Cyl"`.
    #[must_use]
    pub fn tessellate(&self, options: &GeometryOptions) -> Vec<Mesh> {
        let sphere = Icosphere::new(options.atom_subdivisions);
        let heavy = sphere.mesh(options.atom_radius);
        let light = sphere.mesh(options.hydrogen_radius);
        let stick = cylinder(options.bond_radius, 1.0, options.bond_segments, false, true);

        let mut meshes = Vec::with_capacity(self.atoms.len() + self.bonds.len());
        for atom in &self.atoms {
            let base = if atom.element == "H" { &light } else { &heavy };
            let transform = Mat4::from_translation(atom.position);
            meshes.push(base.transformed(&transform).with_label(atom.identifier.clone()));
        }
        for bond in &self.bonds {
            for &[start, end] in &bond.segments {
                let transform = orient_between_points(start, end);
                meshes.push(
                    stick
                        .transformed(&transform)
                        .with_label(format!("{}Cyl", bond.identifier)),
                );
            }
        }
        meshes
    }

    /// All tessellated meshes concatenated into one.
    #[must_use]
    pub fn merged_mesh(&self, options: &GeometryOptions) -> Mesh {
        let mut merged = Mesh::new("Molecule");
        for mesh in self.tessellate(options) {
            merged.append(&mesh);
        }
        merged
    }

    /// Pretty JSON of atoms, bonds and rings.
    pub fn to_json(&self) -> Result<String, MolmeshError> {
        serde_json::to_string_pretty(self).map_err(|e| MolmeshError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::element::PeriodicTable;
    use crate::molecule::tree::Atom;

    fn formaldehyde() -> BondTree {
        let mut tree = BondTree::new("C", "C");
        let root = tree.root();
        tree.add_hydrogens(root, 2);
        let _ = tree.add_child(root, Atom::with_id("O", 2, "O"));
        tree
    }

    fn build(tree: &BondTree) -> MoleculeGeometry {
        MoleculeGeometry::build(tree, &PeriodicTable, &MoleculeOptions::default())
    }

    #[test]
    fn tessellation_labels_atoms_and_bond_lines() {
        let geometry = build(&formaldehyde());
        let options = GeometryOptions::default();
        let meshes = geometry.tessellate(&options);
        // 4 spheres, 2 single bonds, one double bond drawn twice
        assert_eq!(meshes.len(), 4 + 2 + 2);
        assert_eq!(meshes[0].label, "C");
        assert_eq!(meshes.iter().filter(|m| m.label == "OCyl").count(), 2);

        let oxygen = geometry.atom_by_identifier("O").unwrap();
        let sphere = meshes.iter().find(|m| m.label == "O").unwrap();
        for p in &sphere.positions {
            let r = (*p - oxygen.position).length();
            assert!((r - options.atom_radius).abs() < 1e-4, "radius {r}");
        }
    }

    #[test]
    fn hydrogens_get_the_small_sphere() {
        let geometry = build(&formaldehyde());
        let options = GeometryOptions::default();
        let meshes = geometry.tessellate(&options);
        let h = geometry.atoms.iter().find(|a| a.element == "H").unwrap();
        let mesh = &meshes[geometry.atoms.iter().position(|a| a.node == h.node).unwrap()];
        let extent = mesh.bounding_box().unwrap().size().x;
        assert!(extent <= 2.0 * options.hydrogen_radius + 1e-4, "extent {extent}");
    }

    #[test]
    fn bond_cylinders_span_their_segments() {
        let geometry = build(&formaldehyde());
        let meshes = geometry.tessellate(&GeometryOptions::default());
        let bond = geometry.bonds.iter().find(|b| b.order == 1).unwrap();
        let label = format!("{}Cyl", bond.identifier);
        let mesh = meshes.iter().find(|m| m.label == label).unwrap();
        let axis = (bond.end - bond.start).normalize();
        let along: Vec<f32> = mesh
            .positions
            .iter()
            .map(|p| (*p - bond.start).dot(axis))
            .collect();
        let (lo, hi) = along
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &t| (lo.min(t), hi.max(t)));
        assert!(lo.abs() < 1e-4 && (hi - (bond.end - bond.start).length()).abs() < 1e-4);
    }

    #[test]
    fn merged_mesh_sums_the_parts() {
        let geometry = build(&formaldehyde());
        let options = GeometryOptions::default();
        let parts = geometry.tessellate(&options);
        let merged = geometry.merged_mesh(&options);
        assert_eq!(merged.label, "Molecule");
        let triangles: usize = parts.iter().map(Mesh::triangle_count).sum();
        assert_eq!(merged.triangle_count(), triangles);
    }

    #[test]
    fn empty_geometry_tessellates_to_nothing() {
        let geometry = MoleculeGeometry::default();
        assert!(geometry.tessellate(&GeometryOptions::default()).is_empty());
        assert!(geometry.merged_mesh(&GeometryOptions::default()).is_empty());
        assert!(geometry.bounding_box().is_none());
    }

    #[test]
    fn json_export_lists_atoms() {
        let geometry = build(&formaldehyde());
        let json: serde_json::Value =
            serde_json::from_str(&geometry.to_json().unwrap()).unwrap();
        assert_eq!(json["atoms"].as_array().unwrap().len(), 4);
        assert_eq!(json["bonds"][0]["order"], 1);
    }
}
