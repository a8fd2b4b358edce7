//! VSEPR placement of bonded atoms.
//!
//! Every atom is visited breadth-first with its position and a local frame
//! whose z axis is the bond from its parent. Bonds and lone pairs share a
//! fixed angular template chosen by their count; bonded children take the
//! leading slots and lone pairs produce no geometry.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

use super::element::ElementTable;
use super::geometry::{Bond, MoleculeGeometry, PlacedAtom};
use super::tree::{BondTree, NodeId};
use crate::mesh::find_perpendicular;
use crate::options::MoleculeOptions;

const COS_60: f32 = 0.5;
const SIN_60: f32 = 0.866_025_4;
/// Angle between the forward axis and each slot of a tetrahedron whose
/// fourth slot points straight back.
const TETRAHEDRAL_COMPLEMENT: f32 = 1.230_959_4;

/// Right-handed orthonormal frame; `z` follows the incoming bond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Transverse reference axis.
    pub x: Vec3,
    /// `z × x`.
    pub y: Vec3,
    /// Bond direction.
    pub z: Vec3,
}

impl Frame {
    /// World axes.
    pub const IDENTITY: Self = Self {
        x: Vec3::X,
        y: Vec3::Y,
        z: Vec3::Z,
    };

    /// Frame with `z` along `direction` and `x` the part of `reference`
    /// orthogonal to it (any perpendicular when they are parallel).
    #[must_use]
    pub fn along(direction: Vec3, reference: Vec3) -> Self {
        let z = direction.normalize_or_zero();
        let projected = reference - z * reference.dot(z);
        let x = if projected.length_squared() > 1e-8 {
            projected.normalize()
        } else {
            find_perpendicular(z)
        };
        Self {
            x,
            y: z.cross(x),
            z,
        }
    }
}

/// Unit directions of `count` slots in front of an atom whose parent bond
/// arrives along `frame.z`. `None` beyond five slots.
#[must_use]
pub fn slot_directions(count: usize, frame: &Frame) -> Option<Vec<Vec3>> {
    let Frame { x, y, z } = *frame;
    let directions = match count {
        0 => Vec::new(),
        1 => vec![z],
        2 => vec![z * COS_60 + x * SIN_60, z * COS_60 - x * SIN_60],
        3 => {
            let (sin_b, cos_b) = TETRAHEDRAL_COMPLEMENT.sin_cos();
            (0..3)
                .map(|i| {
                    let (sin_a, cos_a) = (TAU * i as f32 / 3.0).sin_cos();
                    z * cos_b + (x * cos_a + y * sin_a) * sin_b
                })
                .collect()
        }
        4 => {
            let turn = Quat::from_axis_angle(z, TAU / 3.0);
            vec![z, y, turn * y, turn.inverse() * y]
        }
        5 => vec![z, y, -y, x, -x],
        _ => return None,
    };
    Some(directions)
}

/// Slots around the tree root: one reserved straight back along `-z`,
/// the rest laid out as for `count - 1` forward slots.
#[must_use]
pub fn root_slot_directions(count: usize, frame: &Frame) -> Option<Vec<Vec3>> {
    if count == 0 {
        return Some(Vec::new());
    }
    let mut directions = vec![-frame.z];
    directions.extend(slot_directions(count - 1, frame)?);
    Some(directions)
}

/// Atom waiting for its children to be placed.
#[derive(Debug, Clone, Copy)]
struct Pending {
    node: NodeId,
    position: Vec3,
    frame: Frame,
}

/// Shared state of one layout pass.
pub(crate) struct Layout<'a, T: ElementTable> {
    pub(crate) tree: &'a BondTree,
    table: &'a T,
    pub(crate) options: &'a MoleculeOptions,
    pub(crate) geometry: MoleculeGeometry,
    placed: FxHashMap<NodeId, usize>,
    aliases: FxHashMap<NodeId, NodeId>,
    queue: VecDeque<Pending>,
}

impl<'a, T: ElementTable> Layout<'a, T> {
    pub(crate) fn new(
        tree: &'a BondTree,
        table: &'a T,
        options: &'a MoleculeOptions,
    ) -> Self {
        Self {
            tree,
            table,
            options,
            geometry: MoleculeGeometry::default(),
            placed: FxHashMap::default(),
            aliases: FxHashMap::default(),
            queue: VecDeque::new(),
        }
    }

    /// Place the root at the origin with world axes, then everything below.
    pub(crate) fn run(mut self) -> MoleculeGeometry {
        let root = self.tree.root();
        let _ = self.place_atom(root, Vec3::ZERO, None);
        self.expand(root, Vec3::ZERO, Frame::IDENTITY, true);
        while let Some(next) = self.queue.pop_front() {
            self.expand(next.node, next.position, next.frame, false);
        }
        self.geometry
    }

    fn expand(&mut self, node: NodeId, position: Vec3, frame: Frame, is_root: bool) {
        if self.tree.node(node).is_ring() {
            self.layout_ring(node, position, frame, is_root);
        } else {
            self.place_children(node, position, frame, is_root);
        }
    }

    fn place_children(&mut self, node: NodeId, position: Vec3, frame: Frame, is_root: bool) {
        let tree = self.tree;
        let children = &tree.node(node).children;
        let pairs = tree.free_electron_pairs(node, self.table) as usize;
        let slots = children.len() + pairs;
        let directions = if is_root {
            root_slot_directions(slots, &frame)
        } else {
            slot_directions(slots, &frame)
        };
        let Some(directions) = directions else {
            let atom = tree.atom(node);
            log::warn!(
                "too many binding partners for {} '{}': {slots} slots \
                 ({} bonds, {pairs} lone pairs); only organic geometries are \
                 supported",
                atom.element,
                atom.identifier,
                children.len()
            );
            return;
        };
        self.attach_substituents(node, position, children, &directions, frame.x);
    }

    /// Bond each child along its direction and queue it for expansion.
    pub(crate) fn attach_substituents(
        &mut self,
        parent: NodeId,
        parent_position: Vec3,
        children: &[NodeId],
        directions: &[Vec3],
        reference: Vec3,
    ) {
        let tree = self.tree;
        for (&child, &direction) in children.iter().zip(directions) {
            let atom = tree.atom(child);
            let position =
                parent_position + direction * self.options.bond_length_to(&atom.element);
            if !self.place_atom(child, position, Some(parent)) {
                continue;
            }
            self.add_bond(parent, parent_position, child, position, atom.bond_order, reference);
            self.queue.push_back(Pending {
                node: child,
                position,
                frame: Frame::along(direction, reference),
            });
        }
    }

    /// Treat `alias` as the already known atom `canonical` from now on.
    pub(crate) fn alias(&mut self, alias: NodeId, canonical: NodeId) {
        if alias != canonical {
            let _ = self.aliases.insert(alias, canonical);
        }
    }

    pub(crate) fn canonical(&self, id: NodeId) -> NodeId {
        self.aliases.get(&id).copied().unwrap_or(id)
    }

    /// Record an atom; false when it was placed before.
    pub(crate) fn place_atom(&mut self, node: NodeId, position: Vec3, parent: Option<NodeId>) -> bool {
        let node = self.canonical(node);
        if self.placed.contains_key(&node) {
            return false;
        }
        let tree = self.tree;
        let atom = tree.atom(node);
        let color = self
            .table
            .by_symbol(&atom.element)
            .and_then(|e| e.color);
        let _ = self.placed.insert(node, self.geometry.atoms.len());
        let parent = parent.map(|p| self.canonical(p));
        self.geometry.atoms.push(PlacedAtom {
            node,
            element: atom.element.clone(),
            identifier: atom.identifier.clone(),
            position,
            color,
            parent,
        });
        true
    }

    /// Record a bond drawn as `order` parallel cylinders offset along the
    /// part of `perpendicular` orthogonal to the bond.
    pub(crate) fn add_bond(
        &mut self,
        from: NodeId,
        start: Vec3,
        to: NodeId,
        end: Vec3,
        order: u8,
        perpendicular: Vec3,
    ) {
        let segments = bond_segments(start, end, order, perpendicular, self.options);
        let (from, to) = (self.canonical(from), self.canonical(to));
        let identifier = self.tree.atom(to).identifier.clone();
        self.geometry.bonds.push(Bond {
            from,
            to,
            order,
            identifier,
            start,
            end,
            segments,
        });
    }
}

fn bond_segments(
    start: Vec3,
    end: Vec3,
    order: u8,
    perpendicular: Vec3,
    options: &MoleculeOptions,
) -> Vec<[Vec3; 2]> {
    if order < 2 {
        return vec![[start, end]];
    }
    let offset_axis = Frame::along(end - start, perpendicular).x;
    let spacing = if order == 2 {
        options.double_bond_offset
    } else {
        options.triple_bond_offset
    };
    let offset = offset_axis * spacing;
    let mut segments = vec![[start + offset, end + offset], [start - offset, end - offset]];
    if order >= 3 {
        segments.push([start, end]);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::element::PeriodicTable;
    use crate::molecule::tree::Atom;

    fn assert_pairwise_angle(directions: &[Vec3], degrees: f32) {
        for (i, a) in directions.iter().enumerate() {
            for b in &directions[i + 1..] {
                let angle = a.angle_between(*b).to_degrees();
                assert!(
                    (angle - degrees).abs() < 0.1,
                    "{a:?} / {b:?}: {angle} degrees, expected {degrees}"
                );
            }
        }
    }

    fn layout(tree: &BondTree) -> MoleculeGeometry {
        Layout::new(tree, &PeriodicTable, &MoleculeOptions::default()).run()
    }

    #[test]
    fn four_root_slots_are_tetrahedral() {
        let directions = root_slot_directions(4, &Frame::IDENTITY).unwrap();
        assert_eq!(directions.len(), 4);
        assert_pairwise_angle(&directions, 109.47);
    }

    #[test]
    fn forward_slots_keep_tetrahedral_angle_to_parent() {
        let frame = Frame::along(Vec3::new(1.0, 2.0, -0.5), Vec3::X);
        let mut directions = slot_directions(3, &frame).unwrap();
        directions.push(-frame.z);
        assert_pairwise_angle(&directions, 109.47);
    }

    #[test]
    fn templates_are_unit_and_sized() {
        let frame = Frame::along(Vec3::new(0.3, -1.0, 0.2), Vec3::Y);
        for count in 0..=5 {
            let directions = slot_directions(count, &frame).unwrap();
            assert_eq!(directions.len(), count);
            for d in &directions {
                assert!((d.length() - 1.0).abs() < 1e-5, "{count}: {d:?}");
            }
        }
        assert!(slot_directions(6, &frame).is_none());
        // trigonal planar with the parent bond
        let mut planar = slot_directions(2, &frame).unwrap();
        planar.push(-frame.z);
        assert_pairwise_angle(&planar, 120.0);
    }

    #[test]
    fn frame_is_orthonormal() {
        let f = Frame::along(Vec3::new(1.0, 1.0, 0.0), Vec3::X);
        assert!(f.x.dot(f.z).abs() < 1e-6);
        assert!((f.x.cross(f.y) - f.z).length() < 1e-5);
        let parallel = Frame::along(Vec3::X, Vec3::X);
        assert!(parallel.x.dot(Vec3::X).abs() < 1e-6);
    }

    #[test]
    fn methane_is_tetrahedral() {
        let mut tree = BondTree::new("C", "C");
        tree.add_hydrogens(tree.root(), 4);
        let geometry = layout(&tree);
        assert_eq!(geometry.atoms.len(), 5);
        assert_eq!(geometry.bonds.len(), 4);
        let directions: Vec<Vec3> = geometry.atoms[1..]
            .iter()
            .map(|a| a.position.normalize())
            .collect();
        assert_pairwise_angle(&directions, 109.47);
        for a in &geometry.atoms[1..] {
            assert!((a.position.length() - 0.2).abs() < 1e-5, "hydrogen bond length");
        }
    }

    #[test]
    fn water_is_bent_tetrahedrally() {
        let mut tree = BondTree::new("O", "O");
        tree.add_hydrogens(tree.root(), 2);
        let geometry = layout(&tree);
        let angle = geometry.atoms[1]
            .position
            .angle_between(geometry.atoms[2].position)
            .to_degrees();
        assert!((angle - 109.47).abs() < 0.1, "H-O-H {angle}");
    }

    #[test]
    fn chains_keep_bond_lengths_and_parents() {
        let mut tree = BondTree::new("C", "C1");
        let root = tree.root();
        tree.add_hydrogens(root, 3);
        let c2 = tree.add_child(root, Atom::with_id("C", 1, "C2"));
        tree.add_hydrogens(c2, 3);
        let geometry = layout(&tree);
        assert_eq!(geometry.atoms.len(), 8);
        let c2 = geometry.atom_by_identifier("C2").unwrap();
        assert!((c2.position.length() - 1.0).abs() < 1e-5);
        let hydrogens: Vec<&PlacedAtom> = geometry
            .atoms
            .iter()
            .filter(|a| a.parent == Some(c2.node))
            .collect();
        assert_eq!(hydrogens.len(), 3);
        for h in hydrogens {
            let back = (-c2.position).normalize();
            let angle = (h.position - c2.position).angle_between(back).to_degrees();
            assert!((angle - 109.47).abs() < 0.1, "H-C-C {angle}");
        }
    }

    #[test]
    fn double_bonds_draw_two_offset_cylinders() {
        let mut tree = BondTree::new("C", "C");
        let root = tree.root();
        tree.add_hydrogens(root, 2);
        let _ = tree.add_child(root, Atom::with_id("O", 2, "O"));
        let geometry = layout(&tree);
        let bond = geometry.bonds.iter().find(|b| b.order == 2).unwrap();
        assert_eq!(bond.segments.len(), 2);
        let gap = (bond.segments[0][0] - bond.segments[1][0]).length();
        assert!((gap - 0.1).abs() < 1e-5, "gap {gap}");
        let axis = bond.end - bond.start;
        let offset = bond.segments[0][0] - bond.start;
        assert!(axis.dot(offset).abs() < 1e-5);
    }

    #[test]
    fn triple_bonds_keep_a_center_cylinder() {
        let mut tree = BondTree::new("C", "C");
        let _ = tree.add_child(tree.root(), Atom::with_id("N", 3, "N"));
        tree.add_hydrogens(tree.root(), 1);
        let geometry = layout(&tree);
        let bond = geometry.bonds.iter().find(|b| b.order == 3).unwrap();
        assert_eq!(bond.segments.len(), 3);
        assert_eq!(bond.segments[2], [bond.start, bond.end]);
    }

    #[test]
    fn too_many_partners_degrade_to_nothing() {
        let mut tree = BondTree::new("S", "S");
        tree.add_hydrogens(tree.root(), 7);
        let geometry = layout(&tree);
        assert_eq!(geometry.atoms.len(), 1);
        assert!(geometry.bonds.is_empty());
    }
}
