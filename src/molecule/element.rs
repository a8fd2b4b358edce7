//! Chemical element reference data.

/// One entry of an element table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChemicalElement {
    /// Atomic number (protons).
    pub atomic_number: u8,
    /// Element symbol, e.g. `"C"`.
    pub symbol: &'static str,
    /// English name.
    pub name: &'static str,
    /// Display color (linear RGB), when the table defines one.
    pub color: Option<[f32; 3]>,
}

/// Lookup of per-element reference data.
pub trait ElementTable {
    /// Element with the given symbol (case-sensitive).
    fn by_symbol(&self, symbol: &str) -> Option<&ChemicalElement>;
    /// Element with the given atomic number.
    fn by_number(&self, atomic_number: u8) -> Option<&ChemicalElement>;
}

macro_rules! element {
    ($z:expr, $symbol:expr, $name:expr) => {
        ChemicalElement {
            atomic_number: $z,
            symbol: $symbol,
            name: $name,
            color: None,
        }
    };
    ($z:expr, $symbol:expr, $name:expr, [$r:expr, $g:expr, $b:expr]) => {
        ChemicalElement {
            atomic_number: $z,
            symbol: $symbol,
            name: $name,
            color: Some([$r, $g, $b]),
        }
    };
}

/// Elements 1 through 36 plus iodine, CPK colors for the common ones.
static ELEMENTS: &[ChemicalElement] = &[
    element!(1, "H", "Hydrogen", [1.0, 1.0, 1.0]),
    element!(2, "He", "Helium", [0.85, 1.0, 1.0]),
    element!(3, "Li", "Lithium", [0.8, 0.5, 1.0]),
    element!(4, "Be", "Beryllium"),
    element!(5, "B", "Boron", [1.0, 0.71, 0.71]),
    element!(6, "C", "Carbon", [0.2, 0.2, 0.2]),
    element!(7, "N", "Nitrogen", [0.19, 0.31, 0.97]),
    element!(8, "O", "Oxygen", [1.0, 0.05, 0.05]),
    element!(9, "F", "Fluorine", [0.56, 0.88, 0.31]),
    element!(10, "Ne", "Neon"),
    element!(11, "Na", "Sodium", [0.67, 0.36, 0.95]),
    element!(12, "Mg", "Magnesium", [0.54, 1.0, 0.0]),
    element!(13, "Al", "Aluminium"),
    element!(14, "Si", "Silicon", [0.94, 0.78, 0.63]),
    element!(15, "P", "Phosphorus", [1.0, 0.5, 0.0]),
    element!(16, "S", "Sulfur", [1.0, 1.0, 0.19]),
    element!(17, "Cl", "Chlorine", [0.12, 0.94, 0.12]),
    element!(18, "Ar", "Argon"),
    element!(19, "K", "Potassium", [0.56, 0.25, 0.83]),
    element!(20, "Ca", "Calcium", [0.24, 1.0, 0.0]),
    element!(21, "Sc", "Scandium"),
    element!(22, "Ti", "Titanium", [0.75, 0.76, 0.78]),
    element!(23, "V", "Vanadium"),
    element!(24, "Cr", "Chromium"),
    element!(25, "Mn", "Manganese"),
    element!(26, "Fe", "Iron", [0.88, 0.4, 0.2]),
    element!(27, "Co", "Cobalt"),
    element!(28, "Ni", "Nickel"),
    element!(29, "Cu", "Copper", [0.78, 0.5, 0.2]),
    element!(30, "Zn", "Zinc", [0.49, 0.5, 0.69]),
    element!(31, "Ga", "Gallium"),
    element!(32, "Ge", "Germanium"),
    element!(33, "As", "Arsenic"),
    element!(34, "Se", "Selenium"),
    element!(35, "Br", "Bromine", [0.65, 0.16, 0.16]),
    element!(36, "Kr", "Krypton"),
    element!(53, "I", "Iodine", [0.58, 0.0, 0.58]),
];

/// Built-in element table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodicTable;

impl ElementTable for PeriodicTable {
    fn by_symbol(&self, symbol: &str) -> Option<&ChemicalElement> {
        ELEMENTS.iter().find(|e| e.symbol == symbol)
    }

    fn by_number(&self, atomic_number: u8) -> Option<&ChemicalElement> {
        ELEMENTS.iter().find(|e| e.atomic_number == atomic_number)
    }
}

/// Electrons in the outermost shell and that shell's number.
///
/// Shells fill in order, shell `n` holding `2n²` electrons; whatever
/// remains after the filled inner shells sits in the outer one.
#[must_use]
pub fn outer_electrons(atomic_number: u32) -> (u32, u32) {
    let mut shell = 1;
    let mut remaining = atomic_number;
    while 2 * shell * shell < remaining {
        remaining -= 2 * shell * shell;
        shell += 1;
    }
    (remaining, shell)
}

/// Outer electrons of the element named `symbol`, or `None` when the
/// table does not know it.
pub fn outer_electrons_of(table: &impl ElementTable, symbol: &str) -> Option<u32> {
    table
        .by_symbol(symbol)
        .map(|e| outer_electrons(u32::from(e.atomic_number)).0)
}
