use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = collect_hints(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn collect_hints(err: &Error) -> Option<Vec<String>> {
    let mut hints = Vec::new();

    if let Some(mix_err) = err.downcast_ref::<nucmix::Error>() {
        collect_mix_hints(mix_err, &mut hints);
    } else {
        collect_fallback_hints(err, &mut hints);
    }

    if hints.is_empty() { None } else { Some(hints) }
}

fn collect_mix_hints(err: &nucmix::Error, hints: &mut Vec<String>) {
    use nucmix::Error as E;

    match err {
        E::Nuclide(nucmix::NuclideError::UnknownElement(sym)) => {
            hints.push(format!("'{}' is not in the element symbol table", sym));
            hints.push("Symbols cover Z = 0 (neutron) through Z = 112 (Cn)".to_string());
        }
        E::Nuclide(nucmix::NuclideError::MissingMassData(_)) => {
            hints.push("The built-in mass table covers common reactor nuclides".to_string());
            hints.push("Supply a molar mass via a --tables override file".to_string());
        }
        E::Nuclide(nucmix::NuclideError::MissingAbundance(z)) => {
            hints.push(format!("Element Z={} has no natural isotope mix", z));
            hints.push("Compose the element isotope-by-isotope instead".to_string());
        }
        E::Nuclide(_) => {
            hints.push("Nuclide names look like U-235, Am-242m, or B-nat".to_string());
        }
        E::Unit(_) => {
            hints.push("Known unit aliases: mol/m/mole/moles, g/gram/grams, cc/cm3".to_string());
            hints.push("Aliases are case-sensitive".to_string());
        }
        E::TableParse(_) => {
            hints.push("Override files use [[nuclides]] and [[elements]] arrays".to_string());
            hints.push("Check for missing quotes, brackets, or misspelled keys".to_string());
        }
        E::InvalidFormula { .. } => {
            hints.push("Formulas concatenate Symbol[Count] tokens, e.g. UO2, Li17Pb83".to_string());
            hints.push("Counts are positive integers; no parentheses or spaces".to_string());
        }
        E::MissingDensity { .. } => {
            hints.push("Volume conversions need a density or concentration".to_string());
            hints.push("Set one with --density, or on the mixture before converting".to_string());
        }
        E::NonConvergent(_) => {
            hints.push("The target may be outside the reachable range of the split".to_string());
            hints.push("The combined amount of the two tuned entries is held fixed".to_string());
        }
        E::ZeroAmount(_) => {
            hints.push("A zero total cannot be rescaled or averaged over".to_string());
        }
        E::SelfInclusion(_) => {
            hints.push("A mixture cannot appear among its own descendants".to_string());
        }
        _ => {}
    }
}

fn collect_fallback_hints(err: &Error, hints: &mut Vec<String>) {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    let text = text.to_lowercase();

    if text.contains("no such file") || text.contains("not found") {
        hints.push("Check that the file path is correct".to_string());
        hints.push("Verify the file exists and is readable".to_string());
    } else if text.contains("permission denied") {
        hints.push("Check file permissions with `ls -la`".to_string());
    }
}
