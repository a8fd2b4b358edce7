//! Amino-acid bond trees and polypeptide chaining.
//!
//! Every residue is rooted at its carboxyl carbon `C`, which carries the
//! carbonyl oxygen, the hydroxyl `OH`/`HO` and the alpha carbon `Ca`. The
//! alpha carbon holds the amine `N` with hydrogens `HN` and `HNB`, one
//! hydrogen and the side chain. Proline closes its side chain into a ring
//! through `N`.

use super::tree::{Atom, BondTree, NodeId};
use crate::error::MolmeshError;

/// Three-letter codes with a catalog entry.
pub const RESIDUE_CODES: [&str; 8] = ["ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "PRO", "TRP"];

/// Bond tree of one free residue by three-letter code.
pub fn residue(code: &str) -> Result<BondTree, MolmeshError> {
    let tree = match code {
        "ALA" => with_side_chain(alanine),
        "ARG" => with_side_chain(arginine),
        "ASN" => with_side_chain(asparagine),
        "ASP" => with_side_chain(aspartate),
        "CYS" => with_side_chain(cysteine),
        "GLN" => with_side_chain(glutamine),
        "PRO" => proline(),
        "TRP" => with_side_chain(tryptophan),
        _ => return Err(MolmeshError::UnknownResidue(code.to_owned())),
    };
    Ok(tree)
}

/// Carboxyl head shared by every residue; returns the tree and its root.
fn carboxyl() -> (BondTree, NodeId) {
    let mut tree = BondTree::new("C", "C");
    let c = tree.root();
    let _ = tree.add_child(c, Atom::new("O", 2));
    let oh = tree.add_child(c, Atom::with_id("O", 1, "OH"));
    let _ = tree.add_child(oh, Atom::with_id("H", 1, "HO"));
    (tree, c)
}

fn with_side_chain(side_chain: fn(&mut BondTree, NodeId)) -> BondTree {
    let (mut tree, c) = carboxyl();
    let ca = tree.add_child(c, Atom::with_id("C", 1, "Ca"));
    let n = tree.add_child(ca, Atom::with_id("N", 1, "N"));
    let _ = tree.add_child(n, Atom::with_id("H", 1, "HN"));
    let _ = tree.add_child(n, Atom::with_id("H", 1, "HNB"));
    tree.add_hydrogens(ca, 1);
    side_chain(&mut tree, ca);
    tree
}

fn carbon(tree: &mut BondTree, parent: NodeId, id: &str, hydrogens: usize) -> NodeId {
    let c = tree.add_child(parent, Atom::with_id("C", 1, id));
    tree.add_hydrogens(c, hydrogens);
    c
}

fn alanine(tree: &mut BondTree, ca: NodeId) {
    let _ = carbon(tree, ca, "CB", 3);
}

fn arginine(tree: &mut BondTree, ca: NodeId) {
    let cb = carbon(tree, ca, "CB", 2);
    let cg = carbon(tree, cb, "CG", 2);
    let cd = carbon(tree, cg, "CD", 2);
    let ne = tree.add_child(cd, Atom::with_id("N", 1, "NE"));
    tree.add_hydrogens(ne, 1);
    let cz = tree.add_child(ne, Atom::with_id("C", 1, "CZ"));
    let nh1 = tree.add_child(cz, Atom::with_id("N", 2, "NH1"));
    tree.add_hydrogens(nh1, 1);
    let nh2 = tree.add_child(cz, Atom::with_id("N", 1, "NH2"));
    tree.add_hydrogens(nh2, 2);
}

fn asparagine(tree: &mut BondTree, ca: NodeId) {
    let cb = carbon(tree, ca, "CB", 2);
    let cg = carbon(tree, cb, "CG", 0);
    let nd2 = tree.add_child(cg, Atom::with_id("N", 1, "ND2"));
    tree.add_hydrogens(nd2, 2);
    let _ = tree.add_child(cg, Atom::with_id("O", 2, "OD1"));
}

fn aspartate(tree: &mut BondTree, ca: NodeId) {
    let cb = carbon(tree, ca, "CB", 2);
    let cg = carbon(tree, cb, "CG", 0);
    let _ = tree.add_child(cg, Atom::with_id("O", 2, "OD1"));
    let od2 = tree.add_child(cg, Atom::with_id("O", 1, "OD2"));
    tree.add_hydrogens(od2, 1);
}

fn cysteine(tree: &mut BondTree, ca: NodeId) {
    let cb = carbon(tree, ca, "CB", 2);
    let sg = tree.add_child(cb, Atom::with_id("S", 1, "SG"));
    tree.add_hydrogens(sg, 1);
}

fn glutamine(tree: &mut BondTree, ca: NodeId) {
    let cb = carbon(tree, ca, "CB", 2);
    let cg = carbon(tree, cb, "CG", 2);
    let cd = carbon(tree, cg, "CD", 0);
    let ne2 = tree.add_child(cd, Atom::with_id("N", 1, "NE2"));
    tree.add_hydrogens(ne2, 2);
    let _ = tree.add_child(cd, Atom::with_id("O", 2, "OE1"));
}

/// Detached ring path atom.
fn ring_atom(tree: &mut BondTree, element: &str, order: u8, id: &str, hydrogens: usize) -> NodeId {
    let node = tree.new_node(Atom::with_id(element, order, id));
    tree.add_hydrogens(node, hydrogens);
    node
}

/// Indole: the five-ring CG-CD1-NE1-CE2-CD2 with the six-ring fused at
/// CE2-CD2.
fn tryptophan(tree: &mut BondTree, ca: NodeId) {
    let cb = carbon(tree, ca, "CB", 2);
    let cg = tree.add_child(cb, Atom::with_id("C", 1, "CG"));

    let cd1 = ring_atom(tree, "C", 2, "CD1", 1);
    let ne1 = ring_atom(tree, "N", 1, "NE1", 1);
    let ce2 = ring_atom(tree, "C", 1, "CE2", 0);
    let cd2 = ring_atom(tree, "C", 2, "CD2", 0);
    let cz2 = ring_atom(tree, "C", 1, "CZ2", 1);
    let ch2 = ring_atom(tree, "C", 2, "CH2", 1);
    let cz3 = ring_atom(tree, "C", 1, "CZ3", 1);
    let ce3 = ring_atom(tree, "C", 2, "CE3", 1);

    tree.add_ring(ce2, vec![cz2, ch2, cz3, ce3, cd2]);
    tree.add_ring(cg, vec![cd1, ne1, ce2, cd2]);
}

fn proline() -> BondTree {
    let (mut tree, c) = carboxyl();
    let ca = tree.add_child(c, Atom::with_id("C", 1, "Ca"));
    let mut path = Vec::with_capacity(4);
    for id in ["CB", "CG", "CD"] {
        path.push(ring_atom(&mut tree, "C", 1, id, 2));
    }
    let n = tree.new_node(Atom::with_id("N", 1, "N"));
    let _ = tree.add_child(n, Atom::with_id("H", 1, "HN"));
    path.push(n);
    tree.add_ring(ca, path);
    tree.add_hydrogens(ca, 1);
    tree
}

/// Residues joined head to tail into one tree.
///
/// Residue `n` has its backbone ids suffixed with `n`. Joining residue `n`
/// drops `OH{n-1}` from the chain and one amine hydrogen from the residue,
/// `HNB{n}` and `HN{n}` in turn (proline always gives up `HN{n}`), then
/// hangs the residue under `C{n-1}`.
#[derive(Debug, Clone)]
pub struct Polypeptide {
    tree: BondTree,
    codes: Vec<String>,
}

impl Polypeptide {
    /// Chain of one residue.
    pub fn new(code: &str) -> Result<Self, MolmeshError> {
        let mut tree = residue(code)?;
        tree.rename_amino_acid_ids(0);
        Ok(Self {
            tree,
            codes: vec![code.to_owned()],
        })
    }

    /// Chain the given codes in order.
    pub fn from_codes<'a>(codes: impl IntoIterator<Item = &'a str>) -> Result<Self, MolmeshError> {
        let mut codes = codes.into_iter();
        let Some(first) = codes.next() else {
            return Err(MolmeshError::UnknownResidue(String::new()));
        };
        let mut chain = Self::new(first)?;
        for code in codes {
            chain.push(code)?;
        }
        Ok(chain)
    }

    /// Join one more residue to the end of the chain.
    pub fn push(&mut self, code: &str) -> Result<(), MolmeshError> {
        let n = self.codes.len();
        let mut next = residue(code)?;
        next.rename_amino_acid_ids(n);
        self.tree.remove_by_identifier(&format!("OH{}", n - 1));
        let lost = if code == "PRO" || n % 2 == 0 { "HN" } else { "HNB" };
        next.remove_by_identifier(&format!("{lost}{n}"));

        let attached = self.tree.add_at_identifier(&format!("C{}", n - 1), &next);
        if attached == 0 {
            log::warn!("no C{} in chain, residue {code} not attached", n - 1);
        }
        self.codes.push(code.to_owned());
        log::debug!("chained residue {n} ({code})");
        Ok(())
    }

    /// The joined tree, rooted at the first residue's carboxyl carbon.
    #[must_use]
    pub fn tree(&self) -> &BondTree {
        &self.tree
    }

    /// Residue codes in chain order.
    #[must_use]
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Number of residues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always false; a chain holds at least one residue.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
