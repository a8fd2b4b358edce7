// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Procedural 3D geometry for molecular and scientific scenes.
//!
//! molmesh turns descriptions into plain triangle buffers: bond trees into
//! VSEPR-placed ball-and-stick molecules, sampled splines into swept tubes
//! with Frenet frames, and shape parameters into mesh primitives. Nothing
//! here renders; every generator returns a [`mesh::Mesh`] for the caller
//! to upload.
//!
//! # Key entry points
//!
//! - [`molecule::BondTree`] and [`molecule::MoleculeGeometry::build`] - atom
//!   connectivity and its 3D layout
//! - [`molecule::Polypeptide`] - amino-acid residues chained into one tree
//! - [`curve::sweep`] and [`curve::LiveCurve`] - tube meshes along curves
//! - [`mesh`] - spheres, cylinders, arrows, boxes, planes, grids and text
//! - [`options::Options`] - layout, tessellation and sampling settings with
//!   TOML presets
//!
//! Degenerate input never panics. It yields empty or partial geometry and
//! a `log::warn!`; only hard preconditions return [`error::MolmeshError`].

pub mod curve;
pub mod error;
pub mod mesh;
pub mod molecule;
pub mod options;
pub mod util;
