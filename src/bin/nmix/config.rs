use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};

use nucmix::{Mixture, Tables, Unit};

use crate::cli::{AmountUnit, MaterialOptions};

impl From<AmountUnit> for Unit {
    fn from(unit: AmountUnit) -> Self {
        match unit {
            AmountUnit::Mol => Unit::Mole,
            AmountUnit::G => Unit::Gram,
            AmountUnit::Cc => Unit::Cc,
        }
    }
}

/// Loads nuclear-data overrides, or the built-ins when no file was given.
pub fn load_tables(path: Option<&Path>) -> Result<Tables> {
    let Some(path) = path else {
        return Ok(Tables::builtin());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tables file '{}'", path.display()))?;
    let tables = Tables::from_toml(&text)
        .with_context(|| format!("failed to parse tables file '{}'", path.display()))?;
    Ok(tables)
}

/// Builds the material described by the shared CLI options.
pub fn build_material(opts: &MaterialOptions, tables: &Tables) -> Result<Mixture> {
    let material = Mixture::from_formula_with(&opts.formula, tables, &BTreeMap::new())
        .with_context(|| format!("failed to build material from '{}'", opts.formula))?;

    if let Some(name) = &opts.name {
        material.set_name(name);
    }
    if let Some(density) = opts.density {
        material
            .set_density(density)
            .context("failed to apply density")?;
    }
    if let Some(target) = opts.normalize {
        material
            .normalize(target, opts.unit.into())
            .context("failed to normalize material")?;
    }

    Ok(material)
}
