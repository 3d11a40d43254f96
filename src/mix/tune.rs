//! Constrained tuning of a two-entry mole split.
//!
//! `tune` holds the combined molar amount of two direct recipe entries fixed
//! and bisects their split fraction until a caller-supplied objective crosses
//! zero. The objective sees the mixture itself, so any derived quantity
//! (fractions, densities, effective mass) can drive the search.

use super::Mixture;
use super::error::Error;
use super::recipe::Ingredient;
use crate::model::quantity::Quantity;

const MAX_ITERATIONS: u32 = 200;

impl Mixture {
    /// Bisects the mole split between two direct recipe entries until
    /// `objective(self)` is within `tolerance` of zero.
    ///
    /// With `S` the combined moles of `a` and `b` at call time, the search
    /// sets `a` to `f·S` and `b` to `(1-f)·S` for `f ∈ [0, 1]`, sampling both
    /// endpoints and the midpoint of the shrinking bracket, and returns the
    /// accepted fraction. Both entries are distinct direct entries by
    /// identity, else [`Error::IngredientNotFound`].
    ///
    /// Contract: on success the two entries keep the accepted amounts,
    /// permanently coerced to moles. On any failure (no sign change, iteration
    /// cap, objective error) the entries are restored to their pre-call
    /// quantities and the error is propagated.
    pub fn tune<F>(
        &self,
        mut objective: F,
        a: &Ingredient,
        b: &Ingredient,
        tolerance: f64,
    ) -> Result<f64, Error>
    where
        F: FnMut(&Mixture) -> Result<f64, Error>,
    {
        let idx_a = self
            .entry_index(a)
            .ok_or_else(|| Error::IngredientNotFound(a.label()))?;
        let idx_b = self
            .entry_index(b)
            .ok_or_else(|| Error::IngredientNotFound(b.label()))?;
        if idx_a == idx_b {
            return Err(Error::IngredientNotFound(b.label()));
        }

        let saved_a = self.entry_quantity(idx_a);
        let saved_b = self.entry_quantity(idx_b);
        let combined = self.entry_moles(idx_a)? + self.entry_moles(idx_b)?;

        let mut eval = |fraction: f64| -> Result<f64, Error> {
            self.set_entry_quantity(idx_a, Quantity::moles(fraction * combined));
            self.set_entry_quantity(idx_b, Quantity::moles((1.0 - fraction) * combined));
            objective(self)
        };

        let result = bisect(&mut eval, tolerance);
        if result.is_err() {
            self.set_entry_quantity(idx_a, saved_a);
            self.set_entry_quantity(idx_b, saved_b);
        }
        result
    }
}

fn bisect<E>(eval: &mut E, tolerance: f64) -> Result<f64, Error>
where
    E: FnMut(f64) -> Result<f64, Error>,
{
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;

    let mut at_lo = eval(lo)?;
    if at_lo.abs() < tolerance {
        return Ok(lo);
    }
    let at_hi = eval(hi)?;
    if at_hi.abs() < tolerance {
        return Ok(hi);
    }

    if at_lo.signum() == at_hi.signum() {
        return Err(Error::NonConvergent(format!(
            "objective has the same sign at both endpoints ({:+.3e} and {:+.3e})",
            at_lo, at_hi
        )));
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        let at_mid = eval(mid)?;
        if at_mid.abs() < tolerance {
            return Ok(mid);
        }
        if at_mid.signum() == at_lo.signum() {
            lo = mid;
            at_lo = at_mid;
        } else {
            hi = mid;
        }
    }

    Err(Error::NonConvergent(format!(
        "no sample within tolerance after {} bisections",
        MAX_ITERATIONS
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mix::Part;
    use crate::model::quantity::Unit;
    use std::rc::Rc;

    use crate::model::nuclide::Nuclide;

    fn two_hydrogen_moles() -> Mixture {
        Mixture::from_parts([
            Part::with(1001u32, Quantity::moles(1.0)),
            Part::with(1002u32, Quantity::moles(1.0)),
        ])
        .unwrap()
    }

    fn entries(m: &Mixture) -> (Ingredient, Ingredient) {
        let recipe = m.recipe();
        (recipe[0].0.clone(), recipe[1].0.clone())
    }

    #[test]
    fn converges_to_interior_target() {
        let m = two_hydrogen_moles();
        let (a, b) = entries(&m);

        let target = 0.25;
        let f = m
            .tune(
                |mix| Ok(mix.amount_of(Unit::Mole, 1001)?.value - target),
                &a,
                &b,
                1e-5,
            )
            .unwrap();

        assert!((f - 0.125).abs() < 1e-4);
        let reached = m.amount_of(Unit::Mole, 1001).unwrap().value;
        assert!((reached - target).abs() < 1e-5);
        // The combined amount is conserved.
        let total = m.amount(Unit::Mole).unwrap().value;
        assert!((total - 2.0).abs() < 1e-9);
    }

    #[test]
    fn accepts_matching_endpoint() {
        let m = two_hydrogen_moles();
        let (a, b) = entries(&m);

        let f = m
            .tune(
                |mix| Ok(mix.amount_of(Unit::Mole, 1001)?.value),
                &a,
                &b,
                1e-9,
            )
            .unwrap();
        assert_eq!(f, 0.0);
        assert_eq!(m.amount_of(Unit::Mole, 1001).unwrap().value, 0.0);
    }

    #[test]
    fn out_of_range_target_restores_and_fails() {
        let m = two_hydrogen_moles();
        let (a, b) = entries(&m);

        let err = m
            .tune(
                |mix| Ok(mix.amount_of(Unit::Mole, 1001)?.value - 2.5),
                &a,
                &b,
                1e-5,
            )
            .unwrap_err();
        assert!(matches!(err, Error::NonConvergent(_)));

        // The pre-call amounts are back.
        let recipe = m.recipe();
        assert_eq!(recipe[0].1, Quantity::moles(1.0));
        assert_eq!(recipe[1].1, Quantity::moles(1.0));
    }

    #[test]
    fn objective_error_restores_and_propagates() {
        let m = two_hydrogen_moles();
        let (a, b) = entries(&m);

        let err = m
            .tune(
                |_| {
                    Err(Error::NegativeQuantity {
                        what: "probe",
                        value: -1.0,
                    })
                },
                &a,
                &b,
                1e-5,
            )
            .unwrap_err();
        assert!(matches!(err, Error::NegativeQuantity { .. }));
        assert_eq!(m.recipe()[0].1, Quantity::moles(1.0));
        assert_eq!(m.recipe()[1].1, Quantity::moles(1.0));
    }

    #[test]
    fn unknown_ingredient_is_rejected() {
        let m = two_hydrogen_moles();
        let (a, _) = entries(&m);
        let stranger = Ingredient::Nuclide(Rc::new(Nuclide::new(8, 16, 0)));

        assert!(matches!(
            m.tune(|_| Ok(0.0), &a, &stranger, 1e-5),
            Err(Error::IngredientNotFound(_))
        ));
        assert!(matches!(
            m.tune(|_| Ok(0.0), &a, &a, 1e-5),
            Err(Error::IngredientNotFound(_))
        ));
    }

    #[test]
    fn success_coerces_units_to_moles() {
        let h1_mass = Nuclide::new(1, 1, 0).molar_mass().unwrap();
        let m = Mixture::from_parts([
            Part::with(
                1001u32,
                Quantity::grams(h1_mass * crate::mix::GRAMS_PER_MOLE_AMU),
            ),
            Part::with(1002u32, Quantity::moles(1.0)),
        ])
        .unwrap();
        let (a, b) = entries(&m);

        m.tune(
            |mix| Ok(mix.amount_of(Unit::Mole, 1001)?.value - 0.5),
            &a,
            &b,
            1e-6,
        )
        .unwrap();

        let recipe = m.recipe();
        assert_eq!(recipe[0].1.unit, Unit::Mole);
        assert_eq!(recipe[1].1.unit, Unit::Mole);
        assert!((recipe[0].1.value - 0.5).abs() < 1e-6);
        assert!((recipe[1].1.value - 1.5).abs() < 1e-6);
    }
}
