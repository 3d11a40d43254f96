//! Static nuclear reference data and the override layer.
//!
//! The built-in tables (element symbols, nuclide masses, natural abundances)
//! are compiled in. A [`Tables`] value layers caller-supplied TOML overrides
//! on top, so a material definition can pin evaluated masses or a custom
//! enrichment vector without touching the built-ins:
//!
//! ```toml
//! [[nuclides]]
//! zaid = 92235
//! molar-mass = 235.0439301
//!
//! [[elements]]
//! charge = 3
//! isotopes = [{ zaid = 3006, fraction = 0.95 }, { zaid = 3007, fraction = 0.05 }]
//! ```

pub mod abundance;
pub mod elements;
pub mod masses;

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideDoc {
    #[serde(default)]
    nuclides: Vec<NuclideOverride>,
    #[serde(default)]
    elements: Vec<ElementOverride>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct NuclideOverride {
    zaid: u32,
    #[serde(rename = "molar-mass")]
    molar_mass: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementOverride {
    charge: u32,
    isotopes: Vec<IsotopeFraction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct IsotopeFraction {
    zaid: u32,
    fraction: f64,
}

/// Reference-data view: built-in tables with optional overrides on top.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    mass_overrides: HashMap<u32, f64>,
    abundance_overrides: HashMap<u32, Vec<(u32, f64)>>,
}

impl Tables {
    /// The built-in tables with no overrides.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Parses a TOML override document and layers it over the built-ins.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        let doc: OverrideDoc = toml::from_str(text)?;

        let mass_overrides = doc
            .nuclides
            .into_iter()
            .map(|n| (n.zaid, n.molar_mass))
            .collect();

        let abundance_overrides = doc
            .elements
            .into_iter()
            .map(|e| {
                let mix = e.isotopes.into_iter().map(|i| (i.zaid, i.fraction)).collect();
                (e.charge, mix)
            })
            .collect();

        Ok(Self {
            mass_overrides,
            abundance_overrides,
        })
    }

    /// Molar mass in amu, override first, then the built-in table.
    pub fn molar_mass(&self, zaid: u32) -> Option<f64> {
        self.mass_overrides
            .get(&zaid)
            .copied()
            .or_else(|| masses::molar_mass(zaid))
    }

    /// An explicit mass override for a nuclide, if one was supplied.
    pub fn mass_override(&self, zaid: u32) -> Option<f64> {
        self.mass_overrides.get(&zaid).copied()
    }

    /// Natural isotope mix of an element, override first.
    pub fn natural(&self, charge: u32) -> Option<Vec<(u32, f64)>> {
        if let Some(mix) = self.abundance_overrides.get(&charge) {
            return Some(mix.clone());
        }
        abundance::natural(charge).map(|mix| mix.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_passes_through() {
        let tables = Tables::builtin();
        assert_eq!(tables.molar_mass(1001), masses::molar_mass(1001));
        assert_eq!(tables.natural(92).unwrap().len(), 3);
        assert_eq!(tables.mass_override(1001), None);
    }

    #[test]
    fn mass_override_shadows_builtin() {
        let tables = Tables::from_toml(
            "[[nuclides]]\nzaid = 92235\nmolar-mass = 235.5\n",
        )
        .unwrap();
        assert_eq!(tables.molar_mass(92235), Some(235.5));
        assert_eq!(tables.mass_override(92235), Some(235.5));
        assert_eq!(tables.molar_mass(92238), masses::molar_mass(92238));
    }

    #[test]
    fn abundance_override_shadows_builtin() {
        let toml = r#"
            [[elements]]
            charge = 3
            isotopes = [
                { zaid = 3006, fraction = 0.95 },
                { zaid = 3007, fraction = 0.05 },
            ]
        "#;
        let tables = Tables::from_toml(toml).unwrap();
        let mix = tables.natural(3).unwrap();
        assert_eq!(mix, vec![(3006, 0.95), (3007, 0.05)]);
        assert_eq!(tables.natural(8).unwrap().len(), 3);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Tables::from_toml("[[nuclides]]\nzaid = 1\nmass = 1.0\n").is_err());
        assert!(Tables::from_toml("not [ valid toml").is_err());
    }
}
