//! Defines lengths and the units they are expressed in.
use crate::parsers::{self, StyleParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per typographic point.
const MM_PER_PT: f64 = 25.4 / 72.0;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Mm,
    Cm,
    Dm,
    M,
    In,
    Pt,
}

impl Unit {
    /// How many millimetres one of this unit is.
    pub fn millimetres(self) -> f64 {
        match self {
            Unit::Mm => 1.0,
            Unit::Cm => 10.0,
            Unit::Dm => 100.0,
            Unit::M => 1000.0,
            Unit::In => 25.4,
            Unit::Pt => MM_PER_PT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::Dm => "dm",
            Unit::M => "m",
            Unit::In => "in",
            Unit::Pt => "pt",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::run_parser(parsers::parse_unit, s)
    }
}

/// A number paired with a unit, e.g. `1cm` or `12pt`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub number: f64,
    pub unit: Unit,
}

impl Length {
    pub fn new(number: f64, unit: Unit) -> Self {
        Self { number, unit }
    }

    /// Re-expresses this length in `unit`, going through millimetres.
    pub fn convert(&self, unit: Unit) -> Length {
        if unit == self.unit {
            return *self;
        }
        Length::new(self.to_mm() / unit.millimetres(), unit)
    }

    pub fn to_mm(&self) -> f64 {
        self.number * self.unit.millimetres()
    }

    pub fn to_pt(&self) -> f64 {
        self.to_mm() / MM_PER_PT
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.unit)
    }
}

impl FromStr for Length {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::run_parser(parsers::parse_length, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_convert_through_millimetres() {
        let inch = Length::new(1.0, Unit::In);
        assert!(close(inch.to_mm(), 25.4));
        assert!(close(inch.to_pt(), 72.0));
        assert!(close(inch.convert(Unit::Cm).number, 2.54));
        assert_eq!(inch.convert(Unit::Cm).unit, Unit::Cm);
        assert!(close(Length::new(1.0, Unit::M).convert(Unit::Dm).number, 10.0));
        assert_eq!(inch.convert(Unit::In), inch);
    }

    #[test]
    fn test_display() {
        assert_eq!(Length::new(1.0, Unit::Cm).to_string(), "1cm");
        assert_eq!(Length::new(12.0, Unit::Pt).to_string(), "12pt");
        assert_eq!(Length::new(2.5, Unit::Mm).to_string(), "2.5mm");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("1cm".parse::<Length>().unwrap(), Length::new(1.0, Unit::Cm));
        assert_eq!(" -0.5in ".parse::<Length>().unwrap(), Length::new(-0.5, Unit::In));
        assert!("1".parse::<Length>().is_err());
        assert!("cm".parse::<Length>().is_err());
        assert!("1px".parse::<Length>().is_err());
        assert_eq!("dm".parse::<Unit>().unwrap(), Unit::Dm);
    }
}
