//! Element symbol table.
//!
//! Charge numbers 0 through 112, where Z = 0 is the bare neutron. Lookup in
//! both directions plus symbol canonicalization for user input.

/// Element symbols indexed by charge number (Z = 0 is the neutron).
static SYMBOLS: [&str; 113] = [
    "n", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg",
    "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn",
    "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb",
    "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm",
    "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta",
    "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At",
    "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt",
    "Ds", "Rg", "Cn",
];

/// Number of entries in the symbol table.
pub const ELEMENT_COUNT: u32 = SYMBOLS.len() as u32;

/// Returns the symbol for a charge number, or `None` past the table end.
pub fn symbol(charge: u32) -> Option<&'static str> {
    SYMBOLS.get(charge as usize).copied()
}

/// Returns the charge number for a symbol, after canonicalization.
pub fn charge(symbol: &str) -> Option<u32> {
    let canonical = canonical_symbol(symbol);
    SYMBOLS.iter().position(|s| *s == canonical).map(|z| z as u32)
}

/// Normalizes a symbol to the conventional capitalization ("fe" -> "Fe").
///
/// The neutron symbol "n" is the one lowercase single-letter entry; a bare
/// "n"/"N" resolves to nitrogen only via the exact table match, so the
/// neutron must be written as charge 0 identifiers rather than by symbol.
pub fn canonical_symbol(symbol: &str) -> String {
    let trimmed = symbol.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(2);
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(|c| c.to_lowercase()));
            out
        }
        None => String::new(),
    }
}
