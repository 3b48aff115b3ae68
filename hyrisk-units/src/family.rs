//! Unit families and their member units
//!
//! Every physical quantity the application accepts belongs to exactly one
//! `UnitFamily`. Each family has its own closed enum of units, and `Unit`
//! wraps them so that a unit always knows its family. The first unit listed
//! for a family is its canonical unit: all conversions go through it and the
//! physics layer only ever sees values expressed in it.

use std::fmt;
use serde::{Serialize, Deserialize};
use tracing::warn;
use crate::UnitsError;

/// A closed set of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitFamily {
    Distance,
    Temperature,
    Pressure,
    Density,
    Volume,
    Mass,
    Energy,
    SpecificEnergy,
    JulianTime,
    ElapsingTime,
    Angle,
    Area,
    Unitless,
}

impl UnitFamily {
    /// All families, in declaration order
    pub const ALL: [UnitFamily; 13] = [
        UnitFamily::Distance,
        UnitFamily::Temperature,
        UnitFamily::Pressure,
        UnitFamily::Density,
        UnitFamily::Volume,
        UnitFamily::Mass,
        UnitFamily::Energy,
        UnitFamily::SpecificEnergy,
        UnitFamily::JulianTime,
        UnitFamily::ElapsingTime,
        UnitFamily::Angle,
        UnitFamily::Area,
        UnitFamily::Unitless,
    ];

    /// Position of the family in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitFamily::Distance => "Distance",
            UnitFamily::Temperature => "Temperature",
            UnitFamily::Pressure => "Pressure",
            UnitFamily::Density => "Density",
            UnitFamily::Volume => "Volume",
            UnitFamily::Mass => "Mass",
            UnitFamily::Energy => "Energy",
            UnitFamily::SpecificEnergy => "SpecificEnergy",
            UnitFamily::JulianTime => "JulianTime",
            UnitFamily::ElapsingTime => "ElapsingTime",
            UnitFamily::Angle => "Angle",
            UnitFamily::Area => "Area",
            UnitFamily::Unitless => "Unitless",
        }
    }

    /// Resolve a family from its name, ignoring case and surrounding whitespace
    pub fn from_name(input: &str) -> Result<UnitFamily, UnitsError> {
        let wanted = input.trim();
        UnitFamily::ALL
            .iter()
            .copied()
            .find(|family| family.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnitsError::UnknownFamilyName(input.to_string()))
    }
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Declares a per-family unit enum. The first variant is the canonical unit.
macro_rules! unit_enum {
    (
        $(#[$meta:meta])*
        $name:ident in $family:ident {
            $( $variant:ident => $display:literal, $symbol:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every unit of the family, canonical unit first
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Name shown in unit dropdowns
            pub fn display_name(self) -> &'static str {
                match self {
                    $( $name::$variant => $display ),+
                }
            }

            /// Short symbol, empty for dimensionless units
            pub fn symbol(self) -> &'static str {
                match self {
                    $( $name::$variant => $symbol ),+
                }
            }
        }

        impl From<$name> for Unit {
            fn from(unit: $name) -> Unit {
                Unit::$family(unit)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.display_name())
            }
        }
    };
}

unit_enum! {
    Distance in Distance {
        Meter => "Meter", "m";
        Kilometer => "Kilometer", "km";
        Centimeter => "Centimeter", "cm";
        Millimeter => "Millimeter", "mm";
        Inch => "Inch", "in";
        Foot => "Foot", "ft";
        Yard => "Yard", "yd";
        Mile => "Mile", "mi";
    }
}

unit_enum! {
    Temperature in Temperature {
        Kelvin => "Kelvin", "K";
        Celsius => "Celsius", "°C";
        Fahrenheit => "Fahrenheit", "°F";
        Rankine => "Rankine", "°R";
    }
}

unit_enum! {
    /// Absolute pressures, plus gauge pressures measured against one atmosphere
    Pressure in Pressure {
        Pascal => "Pascal", "Pa";
        Kilopascal => "Kilopascal", "kPa";
        Megapascal => "Megapascal", "MPa";
        Psi => "Psi", "psi";
        Atmosphere => "Atmosphere", "atm";
        Bar => "Bar", "bar";
        Millibar => "Millibar", "mbar";
        PsiGauge => "Psig", "psig";
        BarGauge => "Barg", "barg";
    }
}

unit_enum! {
    Density in Density {
        KilogramPerCubicMeter => "Kilogram per cubic meter", "kg/m3";
        GramPerCubicCentimeter => "Gram per cubic centimeter", "g/cm3";
        GramPerLiter => "Gram per liter", "g/L";
        PoundPerCubicFoot => "Pound per cubic foot", "lb/ft3";
    }
}

unit_enum! {
    Volume in Volume {
        CubicMeter => "Cubic meter", "m3";
        Liter => "Liter", "L";
        CubicCentimeter => "Cubic centimeter", "cm3";
        CubicFoot => "Cubic foot", "ft3";
        CubicInch => "Cubic inch", "in3";
        Gallon => "Gallon", "gal";
    }
}

unit_enum! {
    Mass in Mass {
        Kilogram => "Kilogram", "kg";
        Gram => "Gram", "g";
        Pound => "Pound", "lb";
        Ounce => "Ounce", "oz";
        Tonne => "Tonne", "t";
    }
}

unit_enum! {
    Energy in Energy {
        Joule => "Joule", "J";
        Kilojoule => "Kilojoule", "kJ";
        Megajoule => "Megajoule", "MJ";
        KilowattHour => "Kilowatt hour", "kWh";
        Btu => "Btu", "BTU";
        Calorie => "Calorie", "cal";
    }
}

unit_enum! {
    SpecificEnergy in SpecificEnergy {
        JoulePerKilogram => "Joule per kilogram", "J/kg";
        KilojoulePerKilogram => "Kilojoule per kilogram", "kJ/kg";
        MegajoulePerKilogram => "Megajoule per kilogram", "MJ/kg";
        BtuPerPound => "Btu per pound", "BTU/lb";
    }
}

unit_enum! {
    /// Calendar durations such as exposure periods; a year is a Julian year
    JulianTime in JulianTime {
        Second => "Second", "s";
        Minute => "Minute", "min";
        Hour => "Hour", "h";
        Day => "Day", "d";
        Year => "Year", "yr";
    }
}

unit_enum! {
    /// Short elapsed times such as release durations
    ElapsingTime in ElapsingTime {
        Second => "Second", "s";
        Millisecond => "Millisecond", "ms";
        Minute => "Minute", "min";
        Hour => "Hour", "h";
    }
}

unit_enum! {
    Angle in Angle {
        Radian => "Radian", "rad";
        Degree => "Degree", "deg";
    }
}

unit_enum! {
    Area in Area {
        SquareMeter => "Square meter", "m2";
        SquareCentimeter => "Square centimeter", "cm2";
        SquareMillimeter => "Square millimeter", "mm2";
        SquareInch => "Square inch", "in2";
        SquareFoot => "Square foot", "ft2";
    }
}

unit_enum! {
    /// Counts, fractions and seeds
    Unitless in Unitless {
        Unitless => "Unitless", "";
    }
}

/// Any unit, tagged with its family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    Distance(Distance),
    Temperature(Temperature),
    Pressure(Pressure),
    Density(Density),
    Volume(Volume),
    Mass(Mass),
    Energy(Energy),
    SpecificEnergy(SpecificEnergy),
    JulianTime(JulianTime),
    ElapsingTime(ElapsingTime),
    Angle(Angle),
    Area(Area),
    Unitless(Unitless),
}

/// Applies the same expression to whichever family enum a `Unit` wraps.
macro_rules! each_unit {
    ($unit:expr, $u:ident => $body:expr) => {
        match $unit {
            Unit::Distance($u) => $body,
            Unit::Temperature($u) => $body,
            Unit::Pressure($u) => $body,
            Unit::Density($u) => $body,
            Unit::Volume($u) => $body,
            Unit::Mass($u) => $body,
            Unit::Energy($u) => $body,
            Unit::SpecificEnergy($u) => $body,
            Unit::JulianTime($u) => $body,
            Unit::ElapsingTime($u) => $body,
            Unit::Angle($u) => $body,
            Unit::Area($u) => $body,
            Unit::Unitless($u) => $body,
        }
    };
}

impl Unit {
    pub fn family(self) -> UnitFamily {
        match self {
            Unit::Distance(_) => UnitFamily::Distance,
            Unit::Temperature(_) => UnitFamily::Temperature,
            Unit::Pressure(_) => UnitFamily::Pressure,
            Unit::Density(_) => UnitFamily::Density,
            Unit::Volume(_) => UnitFamily::Volume,
            Unit::Mass(_) => UnitFamily::Mass,
            Unit::Energy(_) => UnitFamily::Energy,
            Unit::SpecificEnergy(_) => UnitFamily::SpecificEnergy,
            Unit::JulianTime(_) => UnitFamily::JulianTime,
            Unit::ElapsingTime(_) => UnitFamily::ElapsingTime,
            Unit::Angle(_) => UnitFamily::Angle,
            Unit::Area(_) => UnitFamily::Area,
            Unit::Unitless(_) => UnitFamily::Unitless,
        }
    }

    /// Name shown in unit dropdowns; the key used by the name parser
    pub fn display_name(self) -> &'static str {
        each_unit!(self, u => u.display_name())
    }

    pub fn symbol(self) -> &'static str {
        each_unit!(self, u => u.symbol())
    }

    /// Check if this is the canonical unit of its family
    pub fn is_canonical(self) -> bool {
        canonical_unit(self.family()) == self
    }

    /// Fail with `FamilyMismatch` unless this unit belongs to `expected`.
    /// Every mismatch is logged before it is returned.
    pub(crate) fn ensure_family(self, expected: UnitFamily) -> Result<Self, UnitsError> {
        if self.family() != expected {
            warn!(expected = %expected, found = %self.family(), unit = %self, "unit from another family");
            return Err(UnitsError::FamilyMismatch { expected, found: self.family() });
        }
        Ok(self)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn collect<U: Copy + Into<Unit>>(all: &[U]) -> Vec<Unit> {
    all.iter().map(|&u| u.into()).collect()
}

/// Every unit of a family, canonical unit first
pub fn units_of(family: UnitFamily) -> Vec<Unit> {
    match family {
        UnitFamily::Distance => collect(Distance::ALL),
        UnitFamily::Temperature => collect(Temperature::ALL),
        UnitFamily::Pressure => collect(Pressure::ALL),
        UnitFamily::Density => collect(Density::ALL),
        UnitFamily::Volume => collect(Volume::ALL),
        UnitFamily::Mass => collect(Mass::ALL),
        UnitFamily::Energy => collect(Energy::ALL),
        UnitFamily::SpecificEnergy => collect(SpecificEnergy::ALL),
        UnitFamily::JulianTime => collect(JulianTime::ALL),
        UnitFamily::ElapsingTime => collect(ElapsingTime::ALL),
        UnitFamily::Angle => collect(Angle::ALL),
        UnitFamily::Area => collect(Area::ALL),
        UnitFamily::Unitless => collect(Unitless::ALL),
    }
}

/// The unit every other unit of the family converts through
pub fn canonical_unit(family: UnitFamily) -> Unit {
    match family {
        UnitFamily::Distance => Distance::Meter.into(),
        UnitFamily::Temperature => Temperature::Kelvin.into(),
        UnitFamily::Pressure => Pressure::Pascal.into(),
        UnitFamily::Density => Density::KilogramPerCubicMeter.into(),
        UnitFamily::Volume => Volume::CubicMeter.into(),
        UnitFamily::Mass => Mass::Kilogram.into(),
        UnitFamily::Energy => Energy::Joule.into(),
        UnitFamily::SpecificEnergy => SpecificEnergy::JoulePerKilogram.into(),
        UnitFamily::JulianTime => JulianTime::Second.into(),
        UnitFamily::ElapsingTime => ElapsingTime::Second.into(),
        UnitFamily::Angle => Angle::Radian.into(),
        UnitFamily::Area => Area::SquareMeter.into(),
        UnitFamily::Unitless => Unitless::Unitless.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ensure_family() {
        let psi = Unit::from(Pressure::Psi);
        assert_eq!(psi.ensure_family(UnitFamily::Pressure).unwrap(), psi);
        assert_eq!(
            psi.ensure_family(UnitFamily::Temperature).unwrap_err(),
            UnitsError::FamilyMismatch { expected: UnitFamily::Temperature, found: UnitFamily::Pressure }
        );
    }

    #[test]
    fn test_all_matches_index() {
        for (i, family) in UnitFamily::ALL.iter().enumerate() {
            assert_eq!(family.index(), i);
        }
    }

    #[test]
    fn test_canonical_unit_is_listed_first() {
        for family in UnitFamily::ALL {
            let units = units_of(family);
            assert!(!units.is_empty());
            assert_eq!(units[0], canonical_unit(family));
            assert!(units[0].is_canonical());
        }
    }

    #[test]
    fn test_units_belong_to_their_family() {
        for family in UnitFamily::ALL {
            for unit in units_of(family) {
                assert_eq!(unit.family(), family, "{} listed under {}", unit, family);
            }
        }
    }

    #[test]
    fn test_display_names_unique_within_family() {
        for family in UnitFamily::ALL {
            let mut seen = HashSet::new();
            for unit in units_of(family) {
                assert!(seen.insert(unit.display_name().to_uppercase()), "duplicate {}", unit);
            }
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(UnitFamily::from_name("Pressure").unwrap(), UnitFamily::Pressure);
        assert_eq!(UnitFamily::from_name("  specificenergy ").unwrap(), UnitFamily::SpecificEnergy);
        assert!(matches!(
            UnitFamily::from_name("Luminosity"),
            Err(UnitsError::UnknownFamilyName(name)) if name == "Luminosity"
        ));
    }

    #[test]
    fn test_same_variant_name_in_two_families() {
        let julian: Unit = JulianTime::Second.into();
        let elapsed: Unit = ElapsingTime::Second.into();
        assert_ne!(julian, elapsed);
        assert_eq!(julian.display_name(), elapsed.display_name());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Unit::from(Pressure::PsiGauge)), "Psig");
        assert_eq!(Unit::from(Temperature::Celsius).symbol(), "°C");
        assert_eq!(format!("{}", UnitFamily::ElapsingTime), "ElapsingTime");
    }
}
