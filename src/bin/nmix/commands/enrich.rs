use std::collections::BTreeMap;

use anyhow::{Context as _, Result, bail};

use nucmix::data::elements;
use nucmix::{Ingredient, Mixture, Unit};

use crate::cli::EnrichArgs;
use crate::config::load_tables;
use crate::display::{Context as DisplayContext, print_material_summary};

pub fn run_enrich(args: EnrichArgs, ctx: DisplayContext) -> Result<()> {
    if !(0.0..=1.0).contains(&args.target) {
        bail!(
            "Target atom fraction {} is outside [0, 1].\n\nThe target is a fraction of the element's atoms, not a percentage.",
            args.target
        );
    }

    let tables = load_tables(args.tables.as_deref())?;

    let symbol = elements::canonical_symbol(&args.element);
    let Some(charge) = elements::charge(&symbol) else {
        bail!("Unknown element symbol '{}'.", args.element);
    };

    let element = Mixture::natural_with(charge, &tables)
        .with_context(|| format!("failed to build natural {}", symbol))?;

    let adjust = find_nuclide(&element, args.adjust).with_context(|| {
        format!("nuclide {} is not part of natural {}", args.adjust, symbol)
    })?;
    let against = find_nuclide(&element, args.against).with_context(|| {
        format!("nuclide {} is not part of natural {}", args.against, symbol)
    })?;

    let target = args.target;
    let zaid = args.adjust;
    element
        .tune(
            |m| Ok(m.amount_of(Unit::Mole, zaid)?.value / m.amount(Unit::Mole)?.value - target),
            &adjust,
            &against,
            args.tolerance,
        )
        .context("enrichment search failed")?;

    let material = match &args.formula {
        Some(formula) => {
            let mut overrides = BTreeMap::new();
            overrides.insert(symbol.clone(), element.clone());
            Mixture::from_formula_with(formula, &tables, &overrides)
                .with_context(|| format!("failed to build material from '{}'", formula))?
        }
        None => element,
    };

    if let Some(density) = args.density {
        material
            .set_density(density)
            .context("failed to apply density")?;
    }

    if ctx.interactive {
        print_material_summary(&material);
    }

    print!("{}", material.report());
    Ok(())
}

fn find_nuclide(element: &Mixture, zaid: u32) -> Result<Ingredient> {
    for (ingredient, _) in element.recipe() {
        if let Ingredient::Nuclide(n) = &ingredient {
            if n.zaid() == zaid {
                return Ok(ingredient);
            }
        }
    }
    bail!("no direct entry with identifier {}", zaid)
}
