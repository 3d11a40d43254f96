//! Caller-facing recipe building blocks.
//!
//! Recipes accept nuclides, mixtures, raw identifiers, and formula strings
//! interchangeably. That flexibility is normalized exactly once, at the
//! construction boundary: a [`Component`] is what callers hand in, a
//! [`Part`] pairs it with an optional amount, and
//! [`Mixture::from_parts`](super::Mixture::from_parts) resolves everything
//! into the canonical [`Ingredient`] list. No type inspection survives past
//! construction.

use std::rc::Rc;

use super::Mixture;
use crate::model::nuclide::Nuclide;
use crate::model::quantity::{Quantity, UnitError};

/// An unresolved recipe ingredient, as accepted from callers.
#[derive(Debug, Clone)]
pub enum Component {
    /// A nuclide; wrapped in `Rc` at resolution so later entries can share it.
    Nuclide(Nuclide),
    /// An already-shared nuclide handle.
    Shared(Rc<Nuclide>),
    /// An existing mixture handle.
    Mixture(Mixture),
    /// A packed nuclide identifier.
    Zaid(u32),
    /// A chemical formula, expanded against the natural abundance table.
    Formula(String),
}

impl From<Nuclide> for Component {
    fn from(n: Nuclide) -> Self {
        Component::Nuclide(n)
    }
}

impl From<Rc<Nuclide>> for Component {
    fn from(n: Rc<Nuclide>) -> Self {
        Component::Shared(n)
    }
}

impl From<Mixture> for Component {
    fn from(m: Mixture) -> Self {
        Component::Mixture(m)
    }
}

impl From<&Mixture> for Component {
    fn from(m: &Mixture) -> Self {
        Component::Mixture(m.clone())
    }
}

impl From<u32> for Component {
    fn from(zaid: u32) -> Self {
        Component::Zaid(zaid)
    }
}

impl From<&str> for Component {
    fn from(formula: &str) -> Self {
        Component::Formula(formula.to_string())
    }
}

impl From<String> for Component {
    fn from(formula: String) -> Self {
        Component::Formula(formula)
    }
}

/// A component plus an optional amount; no amount means one mole.
#[derive(Debug, Clone)]
pub struct Part {
    pub(crate) component: Component,
    pub(crate) amount: Option<Quantity>,
}

impl Part {
    /// A bare component, later defaulted to one mole.
    pub fn new(component: impl Into<Component>) -> Self {
        Self {
            component: component.into(),
            amount: None,
        }
    }

    /// A component with an explicit amount.
    pub fn with(component: impl Into<Component>, amount: Quantity) -> Self {
        Self {
            component: component.into(),
            amount: Some(amount),
        }
    }

    /// A component with an amount given as a value plus unit alias.
    pub fn weighed(
        component: impl Into<Component>,
        value: f64,
        unit: &str,
    ) -> Result<Self, UnitError> {
        Ok(Self::with(component, Quantity::parse(value, unit)?))
    }
}

/// A resolved recipe ingredient: a shared nuclide or a shared subtree.
///
/// Identity, not structure, is what de-duplication and tuning compare; two
/// equal nuclides behind different handles stay distinct entries.
#[derive(Debug, Clone)]
pub enum Ingredient {
    Nuclide(Rc<Nuclide>),
    Mixture(Mixture),
}

impl Ingredient {
    /// Reference identity: the same heap object, not an equal value.
    pub fn same(&self, other: &Ingredient) -> bool {
        match (self, other) {
            (Ingredient::Nuclide(a), Ingredient::Nuclide(b)) => Rc::ptr_eq(a, b),
            (Ingredient::Mixture(a), Ingredient::Mixture(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Display label used in reports and error messages.
    pub fn label(&self) -> String {
        match self {
            Ingredient::Nuclide(n) => n.name(),
            Ingredient::Mixture(m) => m.name(),
        }
    }
}

impl From<&Ingredient> for Component {
    fn from(ing: &Ingredient) -> Self {
        match ing {
            Ingredient::Nuclide(n) => Component::Shared(Rc::clone(n)),
            Ingredient::Mixture(m) => Component::Mixture(m.clone()),
        }
    }
}
