//! Stereocenter classification interface.

use serde::{Deserialize, Serialize};

use super::tree::{BondTree, NodeId};
use crate::error::MolmeshError;

/// Cahn-Ingold-Prelog descriptor of a stereocenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    /// Clockwise priority order.
    Rectus,
    /// Counter-clockwise priority order.
    Sinister,
}

/// Assigns a handedness to a stereocenter of a bond tree.
pub trait Chirality {
    /// Handedness of the atom at `center`.
    fn handedness(&self, tree: &BondTree, center: NodeId) -> Result<Handedness, MolmeshError>;
}

/// R/S classification by substituent priority. Not implemented yet; every
/// query fails with [`MolmeshError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RsChirality;

impl Chirality for RsChirality {
    fn handedness(&self, tree: &BondTree, center: NodeId) -> Result<Handedness, MolmeshError> {
        let atom = tree.atom(center);
        Err(MolmeshError::Unsupported(format!(
            "R/S chirality of {} '{}'",
            atom.element, atom.identifier
        )))
    }
}
