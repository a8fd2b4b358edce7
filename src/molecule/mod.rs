//! Molecules as bond trees and their 3D layout.
//!
//! A [`BondTree`] describes connectivity only: elements, bond orders,
//! identifiers and ring paths. [`MoleculeGeometry::build`] places the root
//! atom at the origin and resolves every other atom with VSEPR templates
//! for chains and regular polygons for rings. The result can be
//! tessellated into labeled ball-and-stick meshes.
//!
//! ```
//! use molmesh::molecule::{BondTree, MoleculeGeometry, PeriodicTable};
//! use molmesh::options::MoleculeOptions;
//!
//! let mut methane = BondTree::new("C", "C");
//! methane.add_hydrogens(methane.root(), 4);
//! let geometry =
//!     MoleculeGeometry::build(&methane, &PeriodicTable, &MoleculeOptions::default());
//! assert_eq!(geometry.atoms.len(), 5);
//! ```

mod amino;
mod chirality;
mod element;
mod geometry;
mod ring;
mod tree;
mod vsepr;

pub use amino::{residue, Polypeptide, RESIDUE_CODES};
pub use chirality::{Chirality, Handedness, RsChirality};
pub use element::{
    outer_electrons, outer_electrons_of, ChemicalElement, ElementTable, PeriodicTable,
};
pub use geometry::{Bond, MoleculeGeometry, PlacedAtom, RingMembers};
pub use tree::{Atom, BondTree, Node, NodeId, NodeKind, AMINO_ACID_IDS};
pub use vsepr::{root_slot_directions, slot_directions, Frame};
