use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul};
use std::rc::Rc;

use super::error::Error;
use super::formula;
use super::recipe::{Component, Ingredient, Part};
use crate::data::{Tables, elements};
use crate::model::nuclide::{Nuclide, NuclideError};
use crate::model::quantity::{Quantity, Unit};

/// Avogadro constant [1/mol].
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Atomic mass unit [g].
pub const AMU_GRAMS: f64 = 1.660_539_066_6e-24;

/// Grams per mole of material per amu of molar mass.
pub const GRAMS_PER_MOLE_AMU: f64 = AVOGADRO * AMU_GRAMS;

/// Normalization applied to the per-element breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementNorm {
    /// Keep raw mole amounts.
    Raw,
    /// Each element's isotope fractions sum to 1.
    PerElement,
    /// The whole breakdown sums to 1.
    #[default]
    Total,
}

/// One element's slice of the expanded composition.
#[derive(Debug, Clone)]
pub struct ElementEntry {
    pub charge: u32,
    /// Isotopes of the element with their (possibly normalized) mole amounts.
    pub isotopes: Vec<(Rc<Nuclide>, f64)>,
}

impl ElementEntry {
    pub fn total(&self) -> f64 {
        self.isotopes.iter().map(|(_, v)| v).sum()
    }
}

#[derive(Debug)]
struct State {
    recipe: Vec<(Ingredient, Quantity)>,
    name: Option<String>,
    /// Particles per cc; `None` means "derive from the recipe".
    conc: Option<f64>,
}

/// A recursively composed material: an ordered list of (ingredient, amount)
/// pairs where an ingredient is a nuclide or another mixture.
///
/// `Mixture` is a cheap handle; cloning shares the underlying node, and
/// [`Mixture::ptr_eq`] compares handle identity. Shared ingredients follow
/// the "longest holder" rule: a subtree stays alive as long as any container
/// references it.
#[derive(Debug, Clone)]
pub struct Mixture {
    inner: Rc<RefCell<State>>,
}

impl Mixture {
    fn node(recipe: Vec<(Ingredient, Quantity)>, name: Option<String>, conc: Option<f64>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(State { recipe, name, conc })),
        }
    }

    fn from_resolved(recipe: Vec<(Ingredient, Quantity)>) -> Result<Self, Error> {
        if recipe.is_empty() {
            return Err(Error::MalformedRecipe);
        }
        Ok(Self::node(recipe, None, None))
    }

    /// Builds a mixture from caller-facing parts against the built-in tables.
    ///
    /// A single mixture part with no amount is the identity short-circuit:
    /// that handle is returned verbatim and no node is created. An empty part
    /// list is a [`Error::MalformedRecipe`].
    pub fn from_parts(parts: impl IntoIterator<Item = Part>) -> Result<Self, Error> {
        Self::from_parts_with(parts, &Tables::builtin(), &BTreeMap::new())
    }

    /// [`Mixture::from_parts`] with explicit reference tables and formula
    /// element overrides.
    pub fn from_parts_with(
        parts: impl IntoIterator<Item = Part>,
        tables: &Tables,
        overrides: &BTreeMap<String, Mixture>,
    ) -> Result<Self, Error> {
        let parts: Vec<Part> = parts.into_iter().collect();

        if let [part] = parts.as_slice() {
            if let (Component::Mixture(m), None) = (&part.component, &part.amount) {
                return Ok(m.clone());
            }
        }

        let mut recipe = Vec::with_capacity(parts.len());
        for part in parts {
            let ingredient = Self::resolve(part.component, tables, overrides)?;
            let amount = part.amount.unwrap_or(Quantity::moles(1.0));
            recipe.push((ingredient, amount));
        }
        Self::from_resolved(recipe)
    }

    fn resolve(
        component: Component,
        tables: &Tables,
        overrides: &BTreeMap<String, Mixture>,
    ) -> Result<Ingredient, Error> {
        Ok(match component {
            Component::Nuclide(n) => Ingredient::Nuclide(Rc::new(n)),
            Component::Shared(n) => Ingredient::Nuclide(n),
            Component::Mixture(m) => Ingredient::Mixture(m),
            Component::Zaid(zaid) => Ingredient::Nuclide(Rc::new(Nuclide::from_zaid(zaid)?)),
            Component::Formula(f) => {
                Ingredient::Mixture(Self::from_formula_with(&f, tables, overrides)?)
            }
        })
    }

    /// Expands a chemical formula into a mixture of natural-composition
    /// element subtrees, one mole token count per element.
    pub fn from_formula(formula: &str) -> Result<Self, Error> {
        Self::from_formula_with(formula, &Tables::builtin(), &BTreeMap::new())
    }

    /// [`Mixture::from_formula`] with explicit tables; `overrides` maps
    /// element symbols to caller-supplied substitute subtrees (for example an
    /// enriched uranium mixture standing in for `U` in `"UO2"`).
    pub fn from_formula_with(
        formula: &str,
        tables: &Tables,
        overrides: &BTreeMap<String, Mixture>,
    ) -> Result<Self, Error> {
        let tokens = formula::parse(formula)?;
        let mut recipe = Vec::with_capacity(tokens.len());
        for (symbol, count) in tokens {
            let canonical = elements::canonical_symbol(&symbol);
            let sub = match overrides.get(&canonical) {
                Some(m) => m.clone(),
                None => {
                    let charge = elements::charge(&canonical)
                        .ok_or(NuclideError::UnknownElement(canonical))?;
                    Self::natural_with(charge, tables)?
                }
            };
            recipe.push((Ingredient::Mixture(sub), Quantity::moles(count as f64)));
        }
        Self::from_resolved(recipe)
    }

    /// The natural isotope mix of an element, one mole total.
    pub fn natural(charge: u32) -> Result<Self, Error> {
        Self::natural_with(charge, &Tables::builtin())
    }

    /// [`Mixture::natural`] against explicit tables; mass overrides become
    /// explicit nuclide masses so they survive independently of the tables.
    pub fn natural_with(charge: u32, tables: &Tables) -> Result<Self, Error> {
        let mix = tables
            .natural(charge)
            .ok_or(NuclideError::MissingAbundance(charge))?;
        let mut recipe = Vec::with_capacity(mix.len());
        for (zaid, fraction) in mix {
            let mut nuclide = Nuclide::from_zaid(zaid)?;
            if let Some(mass) = tables.mass_override(zaid) {
                nuclide = nuclide.with_molar_mass(mass);
            }
            recipe.push((
                Ingredient::Nuclide(Rc::new(nuclide)),
                Quantity::moles(fraction),
            ));
        }
        Self::from_resolved(recipe)
    }

    /// Handle identity: both handles point at the same tree node.
    pub fn ptr_eq(&self, other: &Mixture) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// A snapshot of the recipe: shared ingredient handles with their amounts.
    pub fn recipe(&self) -> Vec<(Ingredient, Quantity)> {
        self.inner.borrow().recipe.clone()
    }

    /// Appends an ingredient, re-running the cycle check.
    pub fn push(&self, part: Part) -> Result<(), Error> {
        let ingredient = Self::resolve(part.component, &Tables::builtin(), &BTreeMap::new())?;
        if let Ingredient::Mixture(m) = &ingredient {
            if m.ptr_eq(self) || m.contains(self) {
                return Err(Error::SelfInclusion(self.name()));
            }
        }
        let amount = part.amount.unwrap_or(Quantity::moles(1.0));
        self.inner.borrow_mut().recipe.push((ingredient, amount));
        Ok(())
    }

    /// True when `target` appears anywhere below this node (by identity).
    pub fn contains(&self, target: &Mixture) -> bool {
        self.inner.borrow().recipe.iter().any(|(ing, _)| match ing {
            Ingredient::Mixture(m) => m.ptr_eq(target) || m.contains(target),
            Ingredient::Nuclide(_) => false,
        })
    }

    /// Explicit name if set, else the derived name, else a placeholder when
    /// the derivation itself cannot be computed.
    pub fn name(&self) -> String {
        if let Some(name) = &self.inner.borrow().name {
            return name.clone();
        }
        self.derived_name()
            .unwrap_or_else(|_| "mixture".to_string())
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.borrow_mut().name = Some(name.into());
    }

    /// Clears the explicit name so the derived name shows again.
    pub fn clear_name(&self) {
        self.inner.borrow_mut().name = None;
    }

    /// The derived display name: the single expanded nuclide's name, or up to
    /// three element symbols by decreasing mole contribution joined with `-`,
    /// with a trailing `-` when elements were dropped.
    pub fn derived_name(&self) -> Result<String, Error> {
        let expanded = self.expand()?;
        let entries = expanded.recipe();

        if let [(Ingredient::Nuclide(n), _)] = entries.as_slice() {
            return Ok(n.name());
        }

        let mut per_element: BTreeMap<u32, f64> = BTreeMap::new();
        for (ing, q) in &entries {
            if let Ingredient::Nuclide(n) = ing {
                *per_element.entry(n.charge()).or_insert(0.0) += q.value;
            }
        }

        let mut ranked: Vec<(u32, f64)> = per_element.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let symbols: Vec<&str> = ranked
            .iter()
            .take(3)
            .filter_map(|(z, _)| elements::symbol(*z))
            .collect();
        let mut name = symbols.join("-");
        if ranked.len() > 3 {
            name.push('-');
        }
        Ok(name)
    }

    /// Explicit concentration if set, else the derived one.
    pub fn concentration(&self) -> Result<Option<f64>, Error> {
        if let Some(conc) = self.inner.borrow().conc {
            return Ok(Some(conc));
        }
        self.derived_concentration()
    }

    /// Stores an explicit concentration in particles per cc.
    pub fn set_concentration(&self, conc: f64) -> Result<(), Error> {
        if conc < 0.0 {
            return Err(Error::NegativeQuantity {
                what: "concentration",
                value: conc,
            });
        }
        self.inner.borrow_mut().conc = Some(conc);
        Ok(())
    }

    /// Drops the explicit concentration, reverting to derivation.
    pub fn clear_concentration(&self) {
        self.inner.borrow_mut().conc = None;
    }

    /// Concentration derived from the recipe: total particles over total
    /// volume, each ingredient contributing both independently. `Ok(None)`
    /// (not an error) when any ingredient's volume cannot be determined.
    pub fn derived_concentration(&self) -> Result<Option<f64>, Error> {
        let mut particles = 0.0;
        let mut volume = 0.0;
        for (ing, q) in self.inner.borrow().recipe.iter() {
            let moles = match part_moles(ing, *q) {
                Ok(n) => n,
                Err(Error::MissingDensity { .. }) => return Ok(None),
                Err(e) => return Err(e),
            };
            let cc = match part_cc(ing, *q) {
                Ok(v) => v,
                Err(Error::MissingDensity { .. }) => return Ok(None),
                Err(e) => return Err(e),
            };
            particles += moles * AVOGADRO;
            volume += cc;
        }
        if volume == 0.0 {
            return Ok(None);
        }
        Ok(Some(particles / volume))
    }

    /// Mass density in g/cc, when a concentration is known.
    pub fn density(&self) -> Result<Option<f64>, Error> {
        match self.concentration()? {
            None => Ok(None),
            Some(conc) => Ok(Some(conc * self.molar_mass()? * AMU_GRAMS)),
        }
    }

    /// Stores the concentration implied by a mass density in g/cc.
    pub fn set_density(&self, density: f64) -> Result<(), Error> {
        if density < 0.0 {
            return Err(Error::NegativeQuantity {
                what: "density",
                value: density,
            });
        }
        let conc = density / (self.molar_mass()? * AMU_GRAMS);
        self.inner.borrow_mut().conc = Some(conc);
        Ok(())
    }

    /// Total amount in the requested unit, summing each ingredient's
    /// converted contribution. A volume total prefers this mixture's own
    /// concentration (explicit or derived) and only falls back to
    /// per-ingredient volumes without one.
    pub fn amount(&self, unit: Unit) -> Result<Quantity, Error> {
        if unit == Unit::Cc {
            if let Some(conc) = self.concentration()? {
                let moles = self.amount(Unit::Mole)?.value;
                return Ok(Quantity::cc(moles * AVOGADRO / conc));
            }
        }
        let mut total = 0.0;
        for (ing, q) in self.inner.borrow().recipe.iter() {
            total += part_amount(ing, *q, unit)?;
        }
        Ok(Quantity::new(total, unit))
    }

    /// Amount contributed by one nuclide identifier across the expanded
    /// composition. Volume uses this mixture's own concentration.
    pub fn amount_of(&self, unit: Unit, zaid: u32) -> Result<Quantity, Error> {
        let expanded = self.expand()?;
        let mut moles = 0.0;
        let mut grams = 0.0;
        for (ing, q) in expanded.recipe() {
            if let Ingredient::Nuclide(n) = &ing {
                if n.zaid() == zaid {
                    moles += q.value;
                    if unit == Unit::Gram {
                        grams += q.value * n.molar_mass()? * GRAMS_PER_MOLE_AMU;
                    }
                }
            }
        }
        let value = match unit {
            Unit::Mole => moles,
            Unit::Gram => grams,
            Unit::Cc => match self.concentration()? {
                Some(conc) => moles * AVOGADRO / conc,
                None => return Err(Error::missing_density(self.name(), Unit::Cc)),
            },
        };
        Ok(Quantity::new(value, unit))
    }

    /// Effective molar mass in amu: the mole-weighted mean over the recipe.
    pub fn molar_mass(&self) -> Result<f64, Error> {
        let mut total = 0.0;
        let mut weighted = 0.0;
        for (ing, q) in self.inner.borrow().recipe.iter() {
            let moles = part_moles(ing, *q)?;
            weighted += moles * ingredient_molar_mass(ing)?;
            total += moles;
        }
        if total == 0.0 {
            return Err(Error::ZeroAmount(self.name()));
        }
        Ok(weighted / total)
    }

    /// Flattens to a new tree whose entries are all nuclides in moles.
    ///
    /// Child subtrees are converted to their mole contribution first and
    /// their own expansions rescaled to it, so the expanded total equals this
    /// mixture's total moles. The explicit name and concentration carry over.
    pub fn expand(&self) -> Result<Mixture, Error> {
        let mut out: Vec<(Ingredient, Quantity)> = Vec::new();
        for (ing, q) in self.inner.borrow().recipe.iter() {
            let moles = part_moles(ing, *q)?;
            match ing {
                Ingredient::Nuclide(n) => {
                    out.push((Ingredient::Nuclide(Rc::clone(n)), Quantity::moles(moles)));
                }
                Ingredient::Mixture(m) => {
                    let sub = m.expand()?;
                    let entries = sub.recipe();
                    let sub_total: f64 = entries.iter().map(|(_, q)| q.value).sum();
                    if sub_total == 0.0 {
                        if moles == 0.0 {
                            continue;
                        }
                        return Err(Error::ZeroAmount(m.name()));
                    }
                    let scale = moles / sub_total;
                    for (n, qn) in entries {
                        out.push((n, qn * scale));
                    }
                }
            }
        }
        if out.is_empty() {
            return Err(Error::ZeroAmount(self.name()));
        }
        let state = self.inner.borrow();
        Ok(Self::node(out, state.name.clone(), state.conc))
    }

    /// In-place merge of recipe entries that reference the same ingredient
    /// object. Later amounts fold into the first occurrence, converted to its
    /// unit through moles when the units differ; first-occurrence order is
    /// preserved. The recipe is untouched when a conversion fails.
    pub fn remove_duplicates(&self) -> Result<(), Error> {
        let entries = self.recipe();
        let mut kept: Vec<(Ingredient, Quantity)> = Vec::with_capacity(entries.len());
        for (ing, q) in entries {
            match kept.iter().position(|(k, _)| k.same(&ing)) {
                Some(idx) => {
                    let unit = kept[idx].1.unit;
                    let add = if q.unit == unit {
                        q.value
                    } else {
                        part_amount(&ing, q, unit)?
                    };
                    kept[idx].1.value += add;
                }
                None => kept.push((ing, q)),
            }
        }
        self.inner.borrow_mut().recipe = kept;
        Ok(())
    }

    /// In-place uniform rescale so the total in `unit` equals `target`.
    /// A zero current total has no defined rescale factor.
    pub fn normalize(&self, target: f64, unit: Unit) -> Result<(), Error> {
        let current = self.amount(unit)?;
        if current.value == 0.0 {
            return Err(Error::ZeroAmount(self.name()));
        }
        let factor = target / current.value;
        for (_, q) in self.inner.borrow_mut().recipe.iter_mut() {
            q.value *= factor;
        }
        Ok(())
    }

    /// Per-element breakdown of the expanded composition, ordered by charge
    /// number. Equal nuclides merge structurally here (expansion may clone
    /// handles), unlike [`Mixture::remove_duplicates`].
    pub fn elements(&self, mode: ElementNorm) -> Result<Vec<ElementEntry>, Error> {
        let expanded = self.expand()?;
        let mut grouped: BTreeMap<u32, Vec<(Rc<Nuclide>, f64)>> = BTreeMap::new();
        for (ing, q) in expanded.recipe() {
            if let Ingredient::Nuclide(n) = ing {
                let isotopes = grouped.entry(n.charge()).or_default();
                match isotopes.iter().position(|(existing, _)| **existing == *n) {
                    Some(pos) => isotopes[pos].1 += q.value,
                    None => isotopes.push((n, q.value)),
                }
            }
        }

        let mut entries: Vec<ElementEntry> = grouped
            .into_iter()
            .map(|(charge, isotopes)| ElementEntry { charge, isotopes })
            .collect();

        match mode {
            ElementNorm::Raw => {}
            ElementNorm::Total => {
                let grand: f64 = entries.iter().map(ElementEntry::total).sum();
                if grand != 0.0 {
                    for entry in &mut entries {
                        for (_, v) in &mut entry.isotopes {
                            *v /= grand;
                        }
                    }
                }
            }
            ElementNorm::PerElement => {
                for entry in &mut entries {
                    let total = entry.total();
                    if total != 0.0 {
                        for (_, v) in &mut entry.isotopes {
                            *v /= total;
                        }
                    }
                }
            }
        }
        Ok(entries)
    }

    pub(crate) fn entry_index(&self, ingredient: &Ingredient) -> Option<usize> {
        self.inner
            .borrow()
            .recipe
            .iter()
            .position(|(ing, _)| ing.same(ingredient))
    }

    pub(crate) fn entry_quantity(&self, index: usize) -> Quantity {
        self.inner.borrow().recipe[index].1
    }

    pub(crate) fn entry_moles(&self, index: usize) -> Result<f64, Error> {
        let (ing, q) = self.inner.borrow().recipe[index].clone();
        part_moles(&ing, q)
    }

    pub(crate) fn set_entry_quantity(&self, index: usize, quantity: Quantity) {
        self.inner.borrow_mut().recipe[index].1 = quantity;
    }
}

/// Recipe equality: pairwise identical ingredient handles with equal
/// amounts, in the same order. Names and concentrations are presentation
/// state and do not participate.
impl PartialEq for Mixture {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let a = self.inner.borrow();
        let b = other.inner.borrow();
        a.recipe.len() == b.recipe.len()
            && a.recipe
                .iter()
                .zip(b.recipe.iter())
                .all(|((ia, qa), (ib, qb))| ia.same(ib) && qa == qb)
    }
}

impl fmt::Display for Mixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Add for Nuclide {
    type Output = Mixture;

    /// Two nuclides combine into a fresh mixture at one mole each.
    fn add(self, rhs: Nuclide) -> Mixture {
        Mixture::node(
            vec![
                (Ingredient::Nuclide(Rc::new(self)), Quantity::moles(1.0)),
                (Ingredient::Nuclide(Rc::new(rhs)), Quantity::moles(1.0)),
            ],
            None,
            None,
        )
    }
}

impl Mul<f64> for &Mixture {
    type Output = Mixture;

    /// A new node sharing the ingredient handles with every amount scaled.
    fn mul(self, factor: f64) -> Mixture {
        let state = self.inner.borrow();
        let recipe = state
            .recipe
            .iter()
            .map(|(ing, q)| (ing.clone(), *q * factor))
            .collect();
        Mixture::node(recipe, state.name.clone(), state.conc)
    }
}

impl Mul<&Mixture> for f64 {
    type Output = Mixture;

    fn mul(self, rhs: &Mixture) -> Mixture {
        rhs * self
    }
}

pub(crate) fn ingredient_molar_mass(ingredient: &Ingredient) -> Result<f64, Error> {
    match ingredient {
        Ingredient::Nuclide(n) => Ok(n.molar_mass()?),
        Ingredient::Mixture(m) => m.molar_mass(),
    }
}

fn ingredient_concentration(ingredient: &Ingredient) -> Result<Option<f64>, Error> {
    match ingredient {
        Ingredient::Nuclide(_) => Ok(None),
        Ingredient::Mixture(m) => m.concentration(),
    }
}

/// One recipe entry's contribution in moles.
pub(crate) fn part_moles(ingredient: &Ingredient, amount: Quantity) -> Result<f64, Error> {
    match amount.unit {
        Unit::Mole => Ok(amount.value),
        Unit::Gram => {
            Ok(amount.value / (ingredient_molar_mass(ingredient)? * GRAMS_PER_MOLE_AMU))
        }
        Unit::Cc => match ingredient_concentration(ingredient)? {
            Some(conc) => Ok(amount.value * conc / AVOGADRO),
            None => Err(Error::missing_density(ingredient.label(), Unit::Cc)),
        },
    }
}

fn part_grams(ingredient: &Ingredient, amount: Quantity) -> Result<f64, Error> {
    match amount.unit {
        Unit::Gram => Ok(amount.value),
        _ => {
            let moles = part_moles(ingredient, amount)?;
            Ok(moles * ingredient_molar_mass(ingredient)? * GRAMS_PER_MOLE_AMU)
        }
    }
}

fn part_cc(ingredient: &Ingredient, amount: Quantity) -> Result<f64, Error> {
    match amount.unit {
        Unit::Cc => Ok(amount.value),
        _ => {
            let moles = part_moles(ingredient, amount)?;
            match ingredient_concentration(ingredient)? {
                Some(conc) => Ok(moles * AVOGADRO / conc),
                None => Err(Error::missing_density(ingredient.label(), amount.unit)),
            }
        }
    }
}

pub(crate) fn part_amount(
    ingredient: &Ingredient,
    amount: Quantity,
    unit: Unit,
) -> Result<f64, Error> {
    match unit {
        Unit::Mole => part_moles(ingredient, amount),
        Unit::Gram => part_grams(ingredient, amount),
        Unit::Cc => part_cc(ingredient, amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn hydrogen_isotopes() -> Mixture {
        Mixture::from_parts([
            Part::with(1001u32, Quantity::moles(1.0)),
            Part::with(1002u32, Quantity::moles(1.0)),
            Part::with(1003u32, Quantity::moles(1.0)),
        ])
        .unwrap()
    }

    #[test]
    fn raw_zaids_default_to_one_mole() {
        let m = Mixture::from_parts([Part::new(1001u32), Part::new(8016u32)]).unwrap();
        let total = m.amount(Unit::Mole).unwrap();
        assert_eq!(total, Quantity::moles(2.0));
    }

    #[test]
    fn empty_recipe_is_malformed() {
        assert!(matches!(
            Mixture::from_parts([]),
            Err(Error::MalformedRecipe)
        ));
    }

    #[test]
    fn single_mixture_part_short_circuits() {
        let inner = hydrogen_isotopes();
        let outer = Mixture::from_parts([Part::new(&inner)]).unwrap();
        assert!(outer.ptr_eq(&inner));

        // An explicit amount defeats the short-circuit.
        let wrapped =
            Mixture::from_parts([Part::with(&inner, Quantity::moles(2.0))]).unwrap();
        assert!(!wrapped.ptr_eq(&inner));
    }

    #[test]
    fn three_isotope_scenario() {
        let m = hydrogen_isotopes();
        assert_eq!(m.amount(Unit::Mole).unwrap(), Quantity::moles(3.0));
        assert_eq!(
            m.amount_of(Unit::Mole, 1001).unwrap(),
            Quantity::moles(1.0)
        );
    }

    #[test]
    fn nuclide_addition_builds_a_tree() {
        let m = Nuclide::new(1, 1, 0) + Nuclide::new(1, 2, 0);
        assert_eq!(m.amount(Unit::Mole).unwrap(), Quantity::moles(2.0));
        assert_eq!(
            m.amount_of(Unit::Mole, 1001).unwrap(),
            Quantity::moles(1.0)
        );
    }

    #[test]
    fn scalar_multiple_scales_totals() {
        let m = hydrogen_isotopes();
        let scaled = 2.5 * &m;
        assert!(!scaled.ptr_eq(&m));
        let expected = m.amount(Unit::Mole).unwrap().value * 2.5;
        assert!(approx_eq(
            scaled.amount(Unit::Mole).unwrap().value,
            expected,
            1e-12
        ));
        // Ingredient handles are shared, not copied.
        assert!(m.recipe()[0].0.same(&scaled.recipe()[0].0));
    }

    #[test]
    fn mass_amount_converts_through_molar_mass() {
        let m = Mixture::from_parts([Part::with(
            1001u32,
            Quantity::grams(1.007825 * GRAMS_PER_MOLE_AMU),
        )])
        .unwrap();
        assert!(approx_eq(m.amount(Unit::Mole).unwrap().value, 1.0, 1e-9));
    }

    #[test]
    fn volume_amount_needs_concentration() {
        let m = Mixture::from_parts([Part::with(1001u32, Quantity::cc(1.0))]).unwrap();
        assert!(matches!(
            m.amount(Unit::Mole),
            Err(Error::MissingDensity { .. })
        ));

        let inner = hydrogen_isotopes();
        inner.set_concentration(3.0 * AVOGADRO).unwrap();
        let outer =
            Mixture::from_parts([Part::with(&inner, Quantity::cc(2.0))]).unwrap();
        assert!(approx_eq(outer.amount(Unit::Mole).unwrap().value, 6.0, 1e-9));
    }

    #[test]
    fn volume_total_uses_own_concentration() {
        let water = Mixture::from_formula("H2O").unwrap();
        water.set_density(0.9982).unwrap();
        let grams = water.amount(Unit::Gram).unwrap().value;
        let cc = water.amount(Unit::Cc).unwrap().value;
        assert!(approx_eq(grams / cc, 0.9982, 1e-9));
    }

    #[test]
    fn effective_molar_mass_is_mole_weighted() {
        let m = Mixture::from_parts([
            Part::with(1001u32, Quantity::moles(2.0)),
            Part::with(8016u32, Quantity::moles(1.0)),
        ])
        .unwrap();
        let expected = (2.0 * 1.007825 + 15.994915) / 3.0;
        assert!(approx_eq(m.molar_mass().unwrap(), expected, 1e-9));
    }

    #[test]
    fn molar_mass_of_zero_recipe_fails() {
        let m = Mixture::from_parts([Part::with(1001u32, Quantity::moles(0.0))]).unwrap();
        assert!(matches!(m.molar_mass(), Err(Error::ZeroAmount(_))));
    }

    #[test]
    fn expansion_conserves_moles() {
        let water = Mixture::from_formula("H2O").unwrap();
        let uo2 = Mixture::from_formula("UO2").unwrap();
        let stack = Mixture::from_parts([
            Part::with(&water, Quantity::moles(0.7)),
            Part::with(&uo2, Quantity::moles(0.3)),
            Part::with(5010u32, Quantity::moles(0.01)),
        ])
        .unwrap();

        let total = stack.amount(Unit::Mole).unwrap().value;
        let expanded = stack.expand().unwrap();
        let expanded_total: f64 = expanded.recipe().iter().map(|(_, q)| q.value).sum();
        assert!(approx_eq(expanded_total, total, 1e-6 * total));

        for (ing, _) in expanded.recipe() {
            assert!(matches!(ing, Ingredient::Nuclide(_)));
        }
    }

    #[test]
    fn expansion_of_mass_tagged_child_rescales() {
        let water = Mixture::from_formula("H2O").unwrap();
        let water_molar = water.molar_mass().unwrap();
        // One "molecule-mole" of water by mass.
        let m = Mixture::from_parts([Part::with(
            &water,
            Quantity::grams(3.0 * water_molar * GRAMS_PER_MOLE_AMU),
        )])
        .unwrap();
        let expanded = m.expand().unwrap();
        let total: f64 = expanded.recipe().iter().map(|(_, q)| q.value).sum();
        assert!(approx_eq(total, 3.0, 1e-9));
        let h1 = m.amount_of(Unit::Mole, 1001).unwrap().value;
        assert!(approx_eq(h1, 2.0 * 0.999885, 1e-9));
    }

    #[test]
    fn remove_duplicates_merges_by_identity() {
        let shared = Rc::new(Nuclide::new(1, 1, 0));
        let twin = Rc::new(Nuclide::new(1, 1, 0));
        let m = Mixture::from_parts([
            Part::with(Rc::clone(&shared), Quantity::moles(1.0)),
            Part::with(8016u32, Quantity::moles(1.0)),
            Part::with(Rc::clone(&shared), Quantity::moles(2.0)),
            Part::with(twin, Quantity::moles(4.0)),
        ])
        .unwrap();

        m.remove_duplicates().unwrap();
        let recipe = m.recipe();
        // The equal-but-distinct twin stays a separate entry.
        assert_eq!(recipe.len(), 3);
        assert_eq!(recipe[0].1, Quantity::moles(3.0));
        assert_eq!(recipe[1].1, Quantity::moles(1.0));
        assert_eq!(recipe[2].1, Quantity::moles(4.0));
    }

    #[test]
    fn remove_duplicates_reconciles_units() {
        let shared = Rc::new(Nuclide::new(1, 2, 0));
        let mass = Nuclide::new(1, 2, 0).molar_mass().unwrap();
        let m = Mixture::from_parts([
            Part::with(Rc::clone(&shared), Quantity::moles(1.0)),
            Part::with(
                Rc::clone(&shared),
                Quantity::grams(2.0 * mass * GRAMS_PER_MOLE_AMU),
            ),
        ])
        .unwrap();

        m.remove_duplicates().unwrap();
        let recipe = m.recipe();
        assert_eq!(recipe.len(), 1);
        assert_eq!(recipe[0].1.unit, Unit::Mole);
        assert!(approx_eq(recipe[0].1.value, 3.0, 1e-9));
    }

    #[test]
    fn normalize_rescales_every_entry() {
        let m = hydrogen_isotopes();
        m.normalize(12.0, Unit::Mole).unwrap();
        assert!(approx_eq(m.amount(Unit::Mole).unwrap().value, 12.0, 1e-6));
        assert!(approx_eq(
            m.amount_of(Unit::Mole, 1001).unwrap().value,
            4.0,
            1e-9
        ));

        // Target zero is legal; only a zero current total fails.
        m.normalize(0.0, Unit::Mole).unwrap();
        assert_eq!(m.amount(Unit::Mole).unwrap().value, 0.0);
        assert!(matches!(
            m.normalize(1.0, Unit::Mole),
            Err(Error::ZeroAmount(_))
        ));
    }

    #[test]
    fn density_round_trip() {
        let water = Mixture::from_formula("H2O").unwrap();
        assert_eq!(water.density().unwrap(), None);

        water.set_density(1.0).unwrap();
        let rho = water.density().unwrap().unwrap();
        assert!(approx_eq(rho, 1.0, 1e-9));
        let conc = water.concentration().unwrap().unwrap();
        assert!(conc > 0.0);

        assert!(matches!(
            water.set_density(-1.0),
            Err(Error::NegativeQuantity { .. })
        ));
    }

    #[test]
    fn derived_concentration_mixes_children() {
        let a = hydrogen_isotopes();
        a.set_concentration(1.0e22).unwrap();
        let b = Mixture::from_parts([Part::with(8016u32, Quantity::moles(1.0))]).unwrap();
        b.set_concentration(3.0e22).unwrap();

        let m = Mixture::from_parts([
            Part::with(&a, Quantity::cc(1.0)),
            Part::with(&b, Quantity::cc(1.0)),
        ])
        .unwrap();
        let conc = m.derived_concentration().unwrap().unwrap();
        assert!(approx_eq(conc, 2.0e22, 1e12));

        // A nuclide entry has no volume of its own.
        let with_bare = Mixture::from_parts([
            Part::with(&a, Quantity::cc(1.0)),
            Part::with(1001u32, Quantity::moles(1.0)),
        ])
        .unwrap();
        assert_eq!(with_bare.derived_concentration().unwrap(), None);
    }

    #[test]
    fn element_breakdown_modes() {
        let water = Mixture::from_formula("H2O").unwrap();

        let raw = water.elements(ElementNorm::Raw).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].charge, 1);
        assert_eq!(raw[1].charge, 8);
        assert!(approx_eq(raw[0].total(), 2.0, 1e-9));
        assert!(approx_eq(raw[1].total(), 1.0, 1e-9));

        let per = water.elements(ElementNorm::PerElement).unwrap();
        for entry in &per {
            assert!(approx_eq(entry.total(), 1.0, 1e-9));
        }

        let total = water.elements(ElementNorm::Total).unwrap();
        let grand: f64 = total.iter().map(ElementEntry::total).sum();
        assert!(approx_eq(grand, 1.0, 1e-9));
    }

    #[test]
    fn derived_names() {
        let single = Mixture::from_parts([Part::new(94239u32)]).unwrap();
        assert_eq!(single.name(), "Pu-239");

        let water = Mixture::from_formula("H2O").unwrap();
        assert_eq!(water.name(), "H-O");

        let steel = Mixture::from_parts([
            Part::with("Fe", Quantity::moles(0.7)),
            Part::with("Cr", Quantity::moles(0.18)),
            Part::with("Ni", Quantity::moles(0.09)),
            Part::with("Mo", Quantity::moles(0.03)),
        ])
        .unwrap();
        assert_eq!(steel.name(), "Fe-Cr-Ni-");

        steel.set_name("SS316");
        assert_eq!(steel.name(), "SS316");
        steel.clear_name();
        assert_eq!(steel.name(), "Fe-Cr-Ni-");
    }

    #[test]
    fn push_rejects_self_inclusion() {
        let inner = hydrogen_isotopes();
        let outer = Mixture::from_parts([Part::with(&inner, Quantity::moles(1.0))]).unwrap();

        assert!(matches!(
            outer.push(Part::new(&outer)),
            Err(Error::SelfInclusion(_))
        ));
        // Transitive: inner may not absorb its container.
        assert!(matches!(
            inner.push(Part::new(&outer)),
            Err(Error::SelfInclusion(_))
        ));
        // A sibling is fine.
        outer.push(Part::with(8016u32, Quantity::moles(1.0))).unwrap();
        assert_eq!(outer.recipe().len(), 2);
    }

    #[test]
    fn recipe_round_trip_preserves_identity() {
        let m = hydrogen_isotopes();
        let rebuilt = Mixture::from_parts(
            m.recipe()
                .iter()
                .map(|(ing, q)| Part::with(ing, *q))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        assert_eq!(m, rebuilt);
        assert!(!m.ptr_eq(&rebuilt));
    }

    #[test]
    fn formula_overrides_substitute_subtrees() {
        let enriched = Mixture::from_parts([
            Part::with(92235u32, Quantity::moles(0.05)),
            Part::with(92238u32, Quantity::moles(0.95)),
        ])
        .unwrap();
        let mut overrides = BTreeMap::new();
        overrides.insert("U".to_string(), enriched.clone());

        let fuel =
            Mixture::from_formula_with("UO2", &Tables::builtin(), &overrides).unwrap();
        let u235 = fuel.amount_of(Unit::Mole, 92235).unwrap().value;
        assert!(approx_eq(u235, 0.05, 1e-9));
        assert!(fuel.recipe()[0].0.same(&Ingredient::Mixture(enriched)));
    }

    #[test]
    fn natural_respects_table_overrides() {
        let tables = Tables::from_toml(
            r#"
            [[elements]]
            charge = 3
            isotopes = [
                { zaid = 3006, fraction = 0.9 },
                { zaid = 3007, fraction = 0.1 },
            ]
        "#,
        )
        .unwrap();
        let li = Mixture::natural_with(3, &tables).unwrap();
        assert!(approx_eq(
            li.amount_of(Unit::Mole, 3006).unwrap().value,
            0.9,
            1e-9
        ));
    }
}
