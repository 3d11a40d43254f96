//! The composition tree and its algebra.
//!
//! A [`Mixture`] is a named, ordered list of (ingredient, amount) pairs in
//! which an ingredient is either a nuclide or another mixture. On top of the
//! tree sit unit conversions ([`Mixture::amount`]), recursive flattening
//! ([`Mixture::expand`]), identity-based de-duplication, rescaling, the
//! per-element breakdown, the constrained tuning solver, and the diagnostic
//! report.

mod error;
mod formula;
mod mixture;
mod recipe;
mod report;
mod tune;

pub use error::Error;
pub use mixture::{
    AMU_GRAMS, AVOGADRO, ElementEntry, ElementNorm, GRAMS_PER_MOLE_AMU, Mixture,
};
pub use recipe::{Component, Ingredient, Part};
