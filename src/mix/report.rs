//! Human-readable mixture reports.
//!
//! Reports are diagnostic text for inspection, not machine parsing, so
//! unresolvable values degrade to placeholders instead of failing the whole
//! rendering. Everything else in the crate propagates its errors; this is
//! the one deliberate exception.

use std::fmt::Write;

use super::Mixture;
use super::error::Error;
use super::mixture::GRAMS_PER_MOLE_AMU;
use super::recipe::Ingredient;
use crate::model::quantity::Unit;

const LABEL_WIDTH: usize = 24;

impl Mixture {
    /// Renders the recipe, the totals in every resolvable unit, and the
    /// expanded nuclide-level atomic/weight fraction table.
    pub fn report(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "material {}", self.name());

        let _ = writeln!(out, "  recipe");
        for (ing, q) in self.recipe() {
            let _ = writeln!(
                out,
                "    {:<width$} {:.6} {}",
                ing.label(),
                q.value,
                q.unit,
                width = LABEL_WIDTH
            );
        }

        let _ = writeln!(out, "  totals");
        for (label, unit) in [
            ("moles", Unit::Mole),
            ("mass", Unit::Gram),
            ("volume", Unit::Cc),
        ] {
            let rendered = match self.amount(unit) {
                Ok(q) => format!("{:.6} {}", q.value, q.unit),
                Err(e) => placeholder(&e),
            };
            let _ = writeln!(out, "    {:<width$} {}", label, rendered, width = LABEL_WIDTH);
        }
        let density = match self.density() {
            Ok(Some(rho)) => format!("{:.6} g/cc", rho),
            Ok(None) => "n/a (density not set)".to_string(),
            Err(e) => placeholder(&e),
        };
        let _ = writeln!(out, "    {:<width$} {}", "density", density, width = LABEL_WIDTH);

        let _ = writeln!(
            out,
            "  nuclides                   atom frac    weight frac"
        );
        match self.fraction_table() {
            Ok(rows) => {
                for (name, atom, weight) in rows {
                    let _ = writeln!(
                        out,
                        "    {:<width$} {:>9.6}    {:>9.6}",
                        name,
                        atom,
                        weight,
                        width = LABEL_WIDTH
                    );
                }
            }
            Err(e) => {
                let _ = writeln!(out, "    {}", placeholder(&e));
            }
        }

        out
    }

    fn fraction_table(&self) -> Result<Vec<(String, f64, f64)>, Error> {
        let expanded = self.expand()?;
        let entries = expanded.recipe();

        let mut rows = Vec::new();
        let mut total_moles = 0.0;
        let mut total_grams = 0.0;
        for (ing, q) in &entries {
            if let Ingredient::Nuclide(n) = ing {
                let grams = q.value * n.molar_mass()? * GRAMS_PER_MOLE_AMU;
                total_moles += q.value;
                total_grams += grams;
                rows.push((n.name(), q.value, grams));
            }
        }
        if total_moles == 0.0 || total_grams == 0.0 {
            return Err(Error::ZeroAmount(self.name()));
        }

        Ok(rows
            .into_iter()
            .map(|(name, moles, grams)| (name, moles / total_moles, grams / total_grams))
            .collect())
    }
}

fn placeholder(error: &Error) -> String {
    match error {
        Error::MissingDensity { .. } => "n/a (density not set)".to_string(),
        Error::ZeroAmount(_) => "n/a (zero amount)".to_string(),
        other => format!("n/a (cannot compute: {})", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mix::Part;
    use crate::model::quantity::Quantity;

    #[test]
    fn report_lists_recipe_totals_and_fractions() {
        let water = Mixture::from_formula("H2O").unwrap();
        water.set_name("light water");
        water.set_density(0.9982).unwrap();

        let report = water.report();
        assert!(report.contains("material light water"));
        assert!(report.contains("recipe"));
        assert!(report.contains("H -001"));
        assert!(report.contains("O -016"));
        assert!(report.contains("moles"));
        assert!(report.contains("3.000000 mol"));
        assert!(report.contains("g/cc"));
        assert!(report.contains("atom frac"));
    }

    #[test]
    fn report_degrades_without_density() {
        let m = Mixture::from_parts([Part::with(92235u32, Quantity::moles(1.0))]).unwrap();
        let report = m.report();
        assert!(report.contains("n/a (density not set)"));
        assert!(report.contains("U -235"));
        // Mass is still resolvable for a pure nuclide.
        assert!(report.contains("mass"));
        assert!(!report.contains("panicked"));
    }

    #[test]
    fn report_degrades_on_zero_amounts() {
        let m = Mixture::from_parts([Part::with(1001u32, Quantity::moles(0.0))]).unwrap();
        let report = m.report();
        assert!(report.contains("n/a (zero amount)"));
    }
}
