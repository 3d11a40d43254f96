//! A material-composition algebra for nuclear materials: nuclide identities,
//! unit-safe amounts, recursively composed mixtures, and a constrained
//! root-finding solver for adjusting a composition against an objective.
//!
//! # Features
//!
//! - **Nuclide identity** — packed (Z, A, I) identifiers with the historical
//!   Am-242 conventions, display names, molar masses, fissile classification
//! - **Unit-safe amounts** — moles, mass, and volume with checked arithmetic
//!   and alias resolution
//! - **Composition trees** — mixtures of nuclides and other mixtures with
//!   shared ingredients, expansion, de-duplication, and normalization
//! - **Tuning** — bisection on a two-entry mole split under a conservation
//!   constraint, driven by any objective over the mixture
//!
//! # Quick Start
//!
//! Build light water from a formula, give it a density, and inspect it:
//!
//! ```
//! use nucmix::{Mixture, Unit};
//!
//! let water = Mixture::from_formula("H2O")?;
//!
//! // Two moles of natural hydrogen, one of natural oxygen.
//! assert_eq!(water.amount(Unit::Mole)?.value, 3.0);
//! let h1 = water.amount_of(Unit::Mole, 1001)?.value;
//! assert!((h1 - 2.0 * 0.999_885).abs() < 1e-12);
//!
//! // Expansion flattens to nuclides and conserves moles.
//! let expanded = water.expand()?;
//! let total: f64 = expanded.recipe().iter().map(|(_, q)| q.value).sum();
//! assert!((total - 3.0).abs() < 1e-9);
//!
//! // Volume conversions unlock once a density is known.
//! water.set_density(0.9982)?;
//! assert!(water.amount(Unit::Cc)?.value > 0.0);
//! # Ok::<(), nucmix::Error>(())
//! ```
//!
//! Enrich natural uranium to 4.5 at% U-235 and drop it into a fuel formula:
//!
//! ```
//! use std::collections::BTreeMap;
//! use nucmix::{Mixture, Tables, Unit};
//!
//! let uranium = Mixture::natural(92)?;
//! let recipe = uranium.recipe();
//! let (u235, u238) = (recipe[1].0.clone(), recipe[2].0.clone());
//!
//! uranium.tune(
//!     |m| Ok(m.amount_of(Unit::Mole, 92235)?.value / m.amount(Unit::Mole)?.value - 0.045),
//!     &u235,
//!     &u238,
//!     1e-9,
//! )?;
//!
//! let mut overrides = BTreeMap::new();
//! overrides.insert("U".to_string(), uranium);
//! let fuel = Mixture::from_formula_with("UO2", &Tables::builtin(), &overrides)?;
//!
//! let u235_frac = fuel.amount_of(Unit::Mole, 92235)?.value / fuel.amount(Unit::Mole)?.value;
//! assert!((u235_frac - 0.045 / 3.0).abs() < 1e-6);
//! # Ok::<(), nucmix::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`data`] — static reference tables (symbols, masses, abundances) and
//!   the TOML override layer
//! - [`Mixture`] — the composition tree and its operations
//! - [`Nuclide`], [`Quantity`] — the leaf value types

mod mix;
mod model;

pub mod data;

pub use model::nuclide::{Nuclide, NuclideError};
pub use model::quantity::{Quantity, Unit, UnitError};

pub use mix::{
    AMU_GRAMS, AVOGADRO, Component, ElementEntry, ElementNorm, Error, GRAMS_PER_MOLE_AMU,
    Ingredient, Mixture, Part,
};

pub use data::Tables;
