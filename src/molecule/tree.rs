//! Bond-topology tree.
//!
//! Atoms live in an arena owned by [`BondTree`] and are addressed by
//! [`NodeId`]. A ring node keeps its cycle paths as id lists, so a path
//! atom may also appear in a neighbouring ring's path (fused rings share
//! that atom) without a second owner.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::element::{outer_electrons_of, ElementTable};

/// Index of a node inside its [`BondTree`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Arena slot.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-atom data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    /// Element symbol.
    pub element: String,
    /// Order of the bond to the parent; 0 for the root.
    pub bond_order: u8,
    /// Caller-assigned name, possibly empty.
    pub identifier: String,
}

impl Atom {
    /// Unnamed atom.
    #[must_use]
    pub fn new(element: impl Into<String>, bond_order: u8) -> Self {
        Self {
            element: element.into(),
            bond_order,
            identifier: String::new(),
        }
    }

    /// Named atom.
    #[must_use]
    pub fn with_id(
        element: impl Into<String>,
        bond_order: u8,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            element: element.into(),
            bond_order,
            identifier: identifier.into(),
        }
    }

    /// True for hydrogen.
    #[must_use]
    pub fn is_hydrogen(&self) -> bool {
        self.element == "H"
    }
}

/// Plain atom or ring anchor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Children only.
    #[default]
    Plain,
    /// Anchor of one or more closed paths. Each path starts bonded to this
    /// node and its last atom bonds back to it.
    Ring(Vec<Vec<NodeId>>),
}

/// Arena entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Atom data.
    pub atom: Atom,
    /// Ring paths, if any.
    pub kind: NodeKind,
    /// Substituents in insertion order.
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(atom: Atom) -> Self {
        Self {
            atom,
            kind: NodeKind::Plain,
            children: Vec::new(),
        }
    }

    /// Ring paths; empty for plain nodes.
    #[must_use]
    pub fn ring_paths(&self) -> &[Vec<NodeId>] {
        match &self.kind {
            NodeKind::Plain => &[],
            NodeKind::Ring(paths) => paths,
        }
    }

    /// True when this node anchors at least one ring path.
    #[must_use]
    pub fn is_ring(&self) -> bool {
        matches!(self.kind, NodeKind::Ring(_))
    }
}

/// Rooted tree of bonded atoms.
///
/// Building is done through the tree: [`BondTree::add_child`] appends a new
/// atom under an existing one, [`BondTree::new_node`] creates a detached
/// atom to be placed in a ring path by [`BondTree::add_ring`]. Ring path
/// nodes must be fresh detached nodes or path atoms of a neighbouring ring,
/// never an ancestor of the ring node.
#[derive(Debug, Clone)]
pub struct BondTree {
    nodes: Vec<Node>,
    root: NodeId,
}

/// Order of the bond from a ring path's last atom back to its anchor.
/// The per-atom orders along the path cover every other ring bond.
pub(crate) const RING_CLOSURE_ORDER: u8 = 1;

/// Identifiers rewritten when a residue joins a chain.
pub const AMINO_ACID_IDS: [&str; 7] = ["N", "Ca", "OH", "HO", "HN", "HNB", "C"];

impl BondTree {
    /// Tree with a single root atom (bond order 0).
    #[must_use]
    pub fn new(element: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::from_root(Atom::with_id(element, 0, identifier))
    }

    /// Tree rooted at `atom`.
    #[must_use]
    pub fn from_root(atom: Atom) -> Self {
        Self {
            nodes: vec![Node::new(atom)],
            root: NodeId(0),
        }
    }

    /// Root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node data. Panics on an id from another tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Atom data of `id`.
    #[must_use]
    pub fn atom(&self, id: NodeId) -> &Atom {
        &self.nodes[id.0].atom
    }

    /// Arena size, detached nodes included.
    #[must_use]
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of atoms reachable from the root.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.preorder().len()
    }

    /// Create a detached atom, to be placed with [`BondTree::add_ring`].
    pub fn new_node(&mut self, atom: Atom) -> NodeId {
        self.nodes.push(Node::new(atom));
        NodeId(self.nodes.len() - 1)
    }

    /// Append a new child atom under `parent`. Bond-order sums are not
    /// validated.
    pub fn add_child(&mut self, parent: NodeId, atom: Atom) -> NodeId {
        let id = self.new_node(atom);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append `count` singly bonded hydrogens under `parent`.
    pub fn add_hydrogens(&mut self, parent: NodeId, count: usize) {
        for _ in 0..count {
            let _ = self.add_child(parent, Atom::new("H", 1));
        }
    }

    /// Add a ring path to `anchor`, turning it into a ring node. A
    /// single-atom path is a plain substituent and lands in `children`.
    pub fn add_ring(&mut self, anchor: NodeId, path: Vec<NodeId>) {
        match path.len() {
            0 => {}
            1 => self.nodes[anchor.0].children.extend(path),
            _ => {
                let node = &mut self.nodes[anchor.0];
                if let NodeKind::Ring(paths) = &mut node.kind {
                    paths.push(path);
                } else {
                    node.kind = NodeKind::Ring(vec![path]);
                }
            }
        }
    }

    /// Append an existing detached node as a child of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    /// Copy `other` into this arena as a new child of `parent`; returns the
    /// id of the copied root.
    pub fn graft(&mut self, parent: NodeId, other: &BondTree) -> NodeId {
        let mut remap = FxHashMap::default();
        let id = self.copy_from(other, other.root, &mut remap);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn copy_from(
        &mut self,
        other: &BondTree,
        id: NodeId,
        remap: &mut FxHashMap<NodeId, NodeId>,
    ) -> NodeId {
        if let Some(&done) = remap.get(&id) {
            return done;
        }
        let source = other.node(id);
        let new = self.new_node(source.atom.clone());
        let _ = remap.insert(id, new);
        let paths: Vec<Vec<NodeId>> = source
            .ring_paths()
            .iter()
            .map(|path| {
                path.iter()
                    .map(|&p| self.copy_from(other, p, remap))
                    .collect()
            })
            .collect();
        let children: Vec<NodeId> = source
            .children
            .iter()
            .map(|&c| self.copy_from(other, c, remap))
            .collect();
        let node = &mut self.nodes[new.0];
        if source.is_ring() {
            node.kind = NodeKind::Ring(paths);
        }
        node.children = children;
        new
    }

    /// Reachable nodes in lookup order: a node, then the nodes of its ring
    /// paths, then its children. Shared ring atoms appear once.
    #[must_use]
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut seen = FxHashSet::default();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            let node = self.node(id);
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
            for path in node.ring_paths().iter().rev() {
                for &p in path.iter().rev() {
                    stack.push(p);
                }
            }
        }
        order
    }

    /// First node named `identifier` in lookup order.
    #[must_use]
    pub fn find_by_identifier(&self, identifier: &str) -> Option<NodeId> {
        self.preorder()
            .into_iter()
            .find(|&id| self.atom(id).identifier == identifier)
    }

    /// Copy of the tree without the subtree at the first non-root node
    /// named `identifier`. Inside every ring path the first match is cut
    /// independently, shortening that ring. An absent identifier yields an
    /// equal tree.
    #[must_use]
    pub fn removed_by_identifier(&self, identifier: &str) -> BondTree {
        let mut out = BondTree::from_root(self.atom(self.root).clone());
        let mut remap = FxHashMap::default();
        let _ = remap.insert(self.root, out.root);
        let mut removed = false;
        self.rebuild_into(&mut out, self.root, identifier, &mut removed, &mut remap);
        out
    }

    /// In-place form of [`BondTree::removed_by_identifier`].
    pub fn remove_by_identifier(&mut self, identifier: &str) {
        *self = self.removed_by_identifier(identifier);
    }

    fn rebuild_into(
        &self,
        out: &mut BondTree,
        id: NodeId,
        identifier: &str,
        removed: &mut bool,
        remap: &mut FxHashMap<NodeId, NodeId>,
    ) {
        let target = remap[&id];
        let node = self.node(id);
        for path in node.ring_paths() {
            let mut path_removed = false;
            let mut kept = Vec::with_capacity(path.len());
            for &p in path {
                if !path_removed && self.atom(p).identifier == identifier {
                    path_removed = true;
                    continue;
                }
                if let Some(&done) = remap.get(&p) {
                    kept.push(done);
                    continue;
                }
                let copy = out.new_node(self.atom(p).clone());
                let _ = remap.insert(p, copy);
                self.rebuild_into(out, p, identifier, removed, remap);
                kept.push(copy);
            }
            out.add_ring(target, kept);
        }
        for &child in &node.children {
            if !*removed && self.atom(child).identifier == identifier {
                *removed = true;
                continue;
            }
            if let Some(&done) = remap.get(&child) {
                out.attach(target, done);
                continue;
            }
            let copy = out.add_child(target, self.atom(child).clone());
            let _ = remap.insert(child, copy);
            self.rebuild_into(out, child, identifier, removed, remap);
        }
    }

    /// Attach a copy of `subtree` under every node named `identifier`,
    /// root included. Returns the number of attachments.
    pub fn add_at_identifier(&mut self, identifier: &str, subtree: &BondTree) -> usize {
        let targets: Vec<NodeId> = self
            .preorder()
            .into_iter()
            .filter(|&id| self.atom(id).identifier == identifier)
            .collect();
        for &target in &targets {
            let _ = self.graft(target, subtree);
        }
        targets.len()
    }

    /// Rename the first node named `old` to `new`; no-op when absent.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> bool {
        match self.find_by_identifier(old) {
            Some(id) => {
                self.nodes[id.0].atom.identifier = new.into();
                true
            }
            None => false,
        }
    }

    /// Suffix the backbone identifiers (`N`, `Ca`, `OH`, `HO`, `HN`, `HNB`,
    /// `C`) with `number`. Missing names are skipped.
    pub fn rename_amino_acid_ids(&mut self, number: usize) {
        for name in AMINO_ACID_IDS {
            let _ = self.rename(name, format!("{name}{number}"));
        }
    }

    /// Lone electron pairs left on `id` after its bonds, never negative.
    ///
    /// Counts the outer-shell electrons minus every child bond order and,
    /// for ring nodes, two ring bonds per path: the bond to the path's first
    /// atom at that atom's order plus a single closing bond.
    #[must_use]
    pub fn free_electron_pairs(&self, id: NodeId, table: &impl ElementTable) -> u32 {
        let node = self.node(id);
        let Some(outer) = outer_electrons_of(table, &node.atom.element) else {
            log::warn!(
                "unknown element {} at '{}', assuming no lone pairs",
                node.atom.element,
                node.atom.identifier
            );
            return 0;
        };
        let bonded: u32 = node
            .children
            .iter()
            .map(|&c| u32::from(self.atom(c).bond_order))
            .sum();
        let ring: u32 = node
            .ring_paths()
            .iter()
            .filter_map(|path| path.first())
            .map(|&first| u32::from(self.atom(first).bond_order) + u32::from(RING_CLOSURE_ORDER))
            .sum();
        outer.saturating_sub(bonded + ring) / 2
    }

    /// Structural equality of two subtrees, possibly in different trees:
    /// same atoms, ring paths and children in the same order.
    #[must_use]
    pub fn subtree_eq(&self, a: NodeId, other: &BondTree, b: NodeId) -> bool {
        let (na, nb) = (self.node(a), other.node(b));
        na.atom == nb.atom
            && na.children.len() == nb.children.len()
            && na.ring_paths().len() == nb.ring_paths().len()
            && na
                .ring_paths()
                .iter()
                .zip(nb.ring_paths())
                .all(|(pa, pb)| {
                    pa.len() == pb.len()
                        && pa
                            .iter()
                            .zip(pb)
                            .all(|(&x, &y)| self.subtree_eq(x, other, y))
                })
            && na
                .children
                .iter()
                .zip(&nb.children)
                .all(|(&x, &y)| self.subtree_eq(x, other, y))
    }
}

impl PartialEq for BondTree {
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(self.root, other, other.root)
    }
}
