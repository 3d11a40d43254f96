//! Error type for the composition-tree core.
//!
//! Leaf failures from the identity and quantity modules convert in via
//! `#[from]`; everything raised by the tree itself lives here. Errors are
//! raised synchronously at the violating call and never suppressed by the
//! core; only report rendering degrades gracefully.

use thiserror::Error;

use crate::model::nuclide::NuclideError;
use crate::model::quantity::{Unit, UnitError};

/// Errors that can occur while building or evaluating a mixture.
#[derive(Debug, Error)]
pub enum Error {
    /// Nuclide identity failure (bad identifier, unknown symbol, no mass).
    #[error(transparent)]
    Nuclide(#[from] NuclideError),

    /// Unit failure (unknown alias, incompatible units).
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Failed to parse a nuclear-data override document.
    #[error("failed to parse nuclear-data overrides: {0}")]
    TableParse(#[from] toml::de::Error),

    /// A recipe needs at least one ingredient/amount pair.
    #[error("a recipe needs at least one ingredient/amount pair")]
    MalformedRecipe,

    /// A volume conversion with no density or concentration to lean on.
    #[error("cannot convert {unit} amount for '{ingredient}': no density or concentration available")]
    MissingDensity { ingredient: String, unit: Unit },

    /// The operation divides by a total amount that is exactly zero.
    #[error("total amount of '{0}' is zero")]
    ZeroAmount(String),

    /// A density or concentration below zero.
    #[error("negative {what}: {value}")]
    NegativeQuantity { what: &'static str, value: f64 },

    /// The formula string contains an unconsumable substring.
    #[error("invalid chemical formula '{formula}': {detail}")]
    InvalidFormula { formula: String, detail: String },

    /// The named ingredient is not a direct recipe entry of this mixture.
    #[error("ingredient '{0}' is not a direct recipe entry")]
    IngredientNotFound(String),

    /// The tuning search found no root inside the bracket.
    #[error("tuning failed to converge: {0}")]
    NonConvergent(String),

    /// A mixture may not contain itself, directly or transitively.
    #[error("mixture '{0}' cannot contain itself")]
    SelfInclusion(String),
}

impl Error {
    pub(crate) fn missing_density(ingredient: impl Into<String>, unit: Unit) -> Self {
        Self::MissingDensity {
            ingredient: ingredient.into(),
            unit,
        }
    }

    pub(crate) fn invalid_formula(formula: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidFormula {
            formula: formula.into(),
            detail: detail.into(),
        }
    }
}
