use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

use thiserror::Error;

/// Unit arithmetic failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// The alias did not resolve against the unit table.
    #[error("unknown unit alias: '{0}'")]
    Unknown(String),

    /// Addition, subtraction, or a ratio across different units.
    #[error("incompatible units: {lhs} and {rhs}")]
    Incompatible { lhs: Unit, rhs: Unit },
}

/// The three amount dimensions the composition algebra works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    Mole,
    Gram,
    Cc,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Mole => "mol",
            Unit::Gram => "g",
            Unit::Cc => "cc",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    /// Alias resolution is case-sensitive against a fixed table.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mol" | "m" | "mole" | "moles" => Ok(Unit::Mole),
            "g" | "gram" | "grams" => Ok(Unit::Gram),
            "cc" | "cm3" | "cm^3" => Ok(Unit::Cc),
            _ => Err(UnitError::Unknown(s.to_string())),
        }
    }
}

/// A unit-tagged scalar amount.
///
/// Addition and subtraction are only defined within a unit; scalar
/// multiplication and division preserve the unit; the ratio of two same-unit
/// quantities is a plain `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Constructs from a value and a unit alias ("mol", "g", "cc", ...).
    pub fn parse(value: f64, unit: &str) -> Result<Self, UnitError> {
        Ok(Self::new(value, unit.parse()?))
    }

    pub fn moles(value: f64) -> Self {
        Self::new(value, Unit::Mole)
    }

    pub fn grams(value: f64) -> Self {
        Self::new(value, Unit::Gram)
    }

    pub fn cc(value: f64) -> Self {
        Self::new(value, Unit::Cc)
    }

    pub fn try_add(self, rhs: Quantity) -> Result<Quantity, UnitError> {
        self.check_unit(rhs)?;
        Ok(Quantity::new(self.value + rhs.value, self.unit))
    }

    pub fn try_sub(self, rhs: Quantity) -> Result<Quantity, UnitError> {
        self.check_unit(rhs)?;
        Ok(Quantity::new(self.value - rhs.value, self.unit))
    }

    /// Dimensionless ratio of two same-unit quantities.
    pub fn ratio(self, rhs: Quantity) -> Result<f64, UnitError> {
        self.check_unit(rhs)?;
        Ok(self.value / rhs.value)
    }

    fn check_unit(self, rhs: Quantity) -> Result<(), UnitError> {
        if self.unit == rhs.unit {
            Ok(())
        } else {
            Err(UnitError::Incompatible {
                lhs: self.unit,
                rhs: rhs.unit,
            })
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::new(self.value * rhs, self.unit)
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        rhs * self
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        Quantity::new(self.value / rhs, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_resolution() {
        assert_eq!("mol".parse::<Unit>().unwrap(), Unit::Mole);
        assert_eq!("m".parse::<Unit>().unwrap(), Unit::Mole);
        assert_eq!("moles".parse::<Unit>().unwrap(), Unit::Mole);
        assert_eq!("g".parse::<Unit>().unwrap(), Unit::Gram);
        assert_eq!("gram".parse::<Unit>().unwrap(), Unit::Gram);
        assert_eq!("cc".parse::<Unit>().unwrap(), Unit::Cc);
        assert_eq!("cm3".parse::<Unit>().unwrap(), Unit::Cc);
    }

    #[test]
    fn alias_resolution_is_case_sensitive() {
        let err = "MOL".parse::<Unit>().unwrap_err();
        assert_eq!(err, UnitError::Unknown("MOL".to_string()));
        assert!("Gram".parse::<Unit>().is_err());
    }

    #[test]
    fn same_unit_arithmetic() {
        let a = Quantity::moles(2.0);
        let b = Quantity::moles(0.5);
        assert_eq!(a.try_add(b).unwrap(), Quantity::moles(2.5));
        assert_eq!(a.try_sub(b).unwrap(), Quantity::moles(1.5));
        assert_eq!(a.ratio(b).unwrap(), 4.0);
    }

    #[test]
    fn cross_unit_arithmetic_fails() {
        let a = Quantity::moles(2.0);
        let b = Quantity::grams(2.0);
        assert!(matches!(
            a.try_add(b),
            Err(UnitError::Incompatible {
                lhs: Unit::Mole,
                rhs: Unit::Gram
            })
        ));
        assert!(a.try_sub(b).is_err());
        assert!(a.ratio(b).is_err());
    }

    #[test]
    fn scalar_ops_preserve_unit() {
        let a = Quantity::grams(3.0);
        assert_eq!(a * 2.0, Quantity::grams(6.0));
        assert_eq!(2.0 * a, Quantity::grams(6.0));
        assert_eq!(a / 3.0, Quantity::grams(1.0));
    }

    #[test]
    fn equality_needs_value_and_unit() {
        assert_eq!(Quantity::moles(1.0), Quantity::moles(1.0));
        assert_ne!(Quantity::moles(1.0), Quantity::grams(1.0));
        assert_ne!(Quantity::moles(1.0), Quantity::moles(1.1));
    }

    #[test]
    fn parse_with_alias() {
        let q = Quantity::parse(4.2, "cm3").unwrap();
        assert_eq!(q, Quantity::cc(4.2));
        assert!(matches!(
            Quantity::parse(1.0, "liters"),
            Err(UnitError::Unknown(_))
        ));
    }
}
