use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::data::{abundance, elements, masses};

/// Identifiers of the fissile nuclides this library recognizes.
const FISSILE: [u32; 3] = [92235, 94239, 94241];

/// Failures raised by nuclide identity handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NuclideError {
    /// The packed identifier decodes to a negative mass number.
    #[error("invalid nuclide identifier {0}: decoded mass number is negative")]
    InvalidIdentifier(u32),

    /// The element symbol is not in the symbol table.
    #[error("unknown element symbol: '{0}'")]
    UnknownElement(String),

    /// The name did not match `Xx-AAA`, `Xx-AAAmI`, or `Xx-nat`.
    #[error("invalid nuclide name: '{0}'")]
    InvalidName(String),

    /// Neither an explicit mass nor a table entry is available.
    #[error("no molar mass data for nuclide {0}")]
    MissingMassData(String),

    /// The element has no tabulated natural isotope mix.
    #[error("no natural abundance data for element Z={0}")]
    MissingAbundance(u32),
}

/// A nuclear species: charge number, mass number, isomeric state.
///
/// The packed identifier and display name are derived from the stored triple,
/// so they can never disagree with it. A mass number of zero marks the
/// natural composite of an element (`"Xx-nat"`). An explicit molar mass, once
/// set, shadows the mass table and participates in equality.
#[derive(Debug, Clone, PartialEq)]
pub struct Nuclide {
    charge: u32,
    mass_number: u32,
    isomer: u32,
    molar_mass: Option<f64>,
}

impl Nuclide {
    pub fn new(charge: u32, mass_number: u32, isomer: u32) -> Self {
        Self {
            charge,
            mass_number,
            isomer,
            molar_mass: None,
        }
    }

    /// Decodes a packed identifier.
    ///
    /// The packing is `Z*1000 + A` for ground states and
    /// `Z*1000 + (A+300) + 100*I` for isomers, with the two historical
    /// Am-242 exceptions (95242 is the first isomer, 95642 the ground
    /// state). Remainders in `300..400` decode to a negative mass number and
    /// are rejected. For larger remainders the smallest isomeric index whose
    /// mass number lands below 300 is chosen.
    pub fn from_zaid(zaid: u32) -> Result<Self, NuclideError> {
        match zaid {
            95242 => return Ok(Self::new(95, 242, 1)),
            95642 => return Ok(Self::new(95, 242, 0)),
            _ => {}
        }

        let charge = zaid / 1000;
        let rem = zaid % 1000;
        if rem < 300 {
            return Ok(Self::new(charge, rem, 0));
        }

        if rem < 400 {
            return Err(NuclideError::InvalidIdentifier(zaid));
        }
        let mut isomer = 1;
        let mut mass_number = rem - 400;
        while mass_number >= 300 {
            isomer += 1;
            mass_number -= 100;
        }
        Ok(Self::new(charge, mass_number, isomer))
    }

    /// Parses a display name: `"U-235"`, `"Am-242m"`, `"Hf-178m2"`, `"B-nat"`.
    ///
    /// The isomer index defaults to 1 when the `m` suffix carries no digits.
    pub fn from_name(name: &str) -> Result<Self, NuclideError> {
        let Some((symbol, rest)) = name.split_once('-') else {
            return Err(NuclideError::InvalidName(name.to_string()));
        };

        let charge = elements::charge(symbol)
            .ok_or_else(|| NuclideError::UnknownElement(symbol.trim().to_string()))?;

        let rest = rest.trim();
        if rest == "nat" {
            return Ok(Self::new(charge, 0, 0));
        }

        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(NuclideError::InvalidName(name.to_string()));
        }
        let mass_number: u32 = digits
            .parse()
            .map_err(|_| NuclideError::InvalidName(name.to_string()))?;

        let suffix = &rest[digits.len()..];
        let isomer = match suffix.strip_prefix('m') {
            None if suffix.is_empty() => 0,
            None => return Err(NuclideError::InvalidName(name.to_string())),
            Some("") => 1,
            Some(idx) => idx
                .parse()
                .map_err(|_| NuclideError::InvalidName(name.to_string()))?,
        };

        Ok(Self::new(charge, mass_number, isomer))
    }

    /// Sets an explicit molar mass in amu, shadowing the mass table.
    pub fn with_molar_mass(mut self, amu: f64) -> Self {
        self.molar_mass = Some(amu);
        self
    }

    #[inline]
    pub fn charge(&self) -> u32 {
        self.charge
    }

    #[inline]
    pub fn mass_number(&self) -> u32 {
        self.mass_number
    }

    #[inline]
    pub fn isomer(&self) -> u32 {
        self.isomer
    }

    /// True for the natural-composite marker (mass number zero).
    #[inline]
    pub fn is_natural(&self) -> bool {
        self.mass_number == 0
    }

    /// The packed identifier, with the Am-242 exceptions applied.
    pub fn zaid(&self) -> u32 {
        match (self.charge, self.mass_number, self.isomer) {
            (95, 242, 0) => 95642,
            (95, 242, 1) => 95242,
            (z, a, 0) => z * 1000 + a,
            (z, a, i) => z * 1000 + a + 300 + 100 * i,
        }
    }

    /// Display name: two-character symbol (space-padded), zero-padded mass
    /// number, `m`/`mI` isomer suffix, `nat` for the natural composite.
    pub fn name(&self) -> String {
        let symbol = elements::symbol(self.charge).unwrap_or("??");
        let mut out = format!("{:<2}-", symbol);
        if self.is_natural() {
            out.push_str("nat");
        } else {
            out.push_str(&format!("{:03}", self.mass_number));
            match self.isomer {
                0 => {}
                1 => out.push('m'),
                i => out.push_str(&format!("m{}", i)),
            }
        }
        out
    }

    /// Molar mass in amu.
    ///
    /// An explicit mass wins; otherwise the mass table is consulted by
    /// identifier, and a natural composite averages the element's isotope
    /// mix. Missing data reports [`NuclideError::MissingMassData`].
    pub fn molar_mass(&self) -> Result<f64, NuclideError> {
        if let Some(mass) = self.molar_mass {
            return Ok(mass);
        }

        if self.is_natural() {
            let mix = abundance::natural(self.charge)
                .ok_or(NuclideError::MissingAbundance(self.charge))?;
            let mut mean = 0.0;
            for (zaid, fraction) in mix {
                let mass = masses::molar_mass(*zaid).ok_or_else(|| {
                    NuclideError::MissingMassData(self.name().trim().to_string())
                })?;
                mean += fraction * mass;
            }
            return Ok(mean);
        }

        masses::molar_mass(self.zaid())
            .ok_or_else(|| NuclideError::MissingMassData(self.name().trim().to_string()))
    }

    /// True iff the identifier is one of U-235, Pu-239, Pu-241.
    pub fn is_fissile(&self) -> bool {
        FISSILE.contains(&self.zaid())
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Nuclide {
    type Err = NuclideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
