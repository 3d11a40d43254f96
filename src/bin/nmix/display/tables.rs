use std::io::{self, Write};

use nucmix::data::elements;
use nucmix::{ElementNorm, Mixture, Unit};

use crate::util::text::truncate;

const INDENT: &str = "      ";
const NAME_WIDTH: usize = 12;
const VALUE_WIDTH: usize = 10;
const BAR_WIDTH: usize = 20;

/// Prints the key figures and the element distribution of a material to
/// stderr, for interactive runs.
pub fn print_material_summary(material: &Mixture) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = vec![("Name", material.name())];
    match material.amount(Unit::Mole) {
        Ok(q) => rows.push(("Total", format!("{:.6} {}", q.value, q.unit))),
        Err(_) => rows.push(("Total", "n/a".to_string())),
    }
    match material.amount(Unit::Gram) {
        Ok(q) => rows.push(("Mass", format!("{:.6} {}", q.value, q.unit))),
        Err(_) => rows.push(("Mass", "n/a".to_string())),
    }
    match material.density() {
        Ok(Some(rho)) => rows.push(("Density", format!("{:.4} g/cc", rho))),
        _ => rows.push(("Density", "not set".to_string())),
    }
    print_kv_table(&mut out, "Material Summary", &rows);

    if let Ok(entries) = material.elements(ElementNorm::Total) {
        let mut data: Vec<(String, f64)> = entries
            .iter()
            .map(|e| {
                let symbol = elements::symbol(e.charge).unwrap_or("??");
                (symbol.to_string(), e.total())
            })
            .collect();
        data.sort_by(|a, b| b.1.total_cmp(&a.1));
        print_distribution_table(&mut out, "Element Distribution", &data);
    }
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, title);
    for (key, value) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} {:<} ",
            INDENT,
            key,
            value,
            name_w = NAME_WIDTH
        );
    }
    let _ = writeln!(out, "{}└─────────────────────────────┘", INDENT);
}

fn print_distribution_table(out: &mut impl Write, title: &str, data: &[(String, f64)]) {
    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, title);
    for (name, fraction) in data.iter().take(15) {
        let pct = fraction * 100.0;
        let bar = make_bar(pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} {:>value_w$.3}%  {:<bar_w$} ",
            INDENT,
            truncate(name, NAME_WIDTH),
            pct,
            bar,
            name_w = NAME_WIDTH,
            value_w = VALUE_WIDTH,
            bar_w = BAR_WIDTH
        );
    }
    if data.len() > 15 {
        let _ = writeln!(out, "{}│ … {} more", INDENT, data.len() - 15);
    }
    let _ = writeln!(out, "{}└─────────────────────────────┘", INDENT);
}

fn make_bar(pct: f64) -> String {
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(BAR_WIDTH - filled));
    bar
}
