//! Hyrisk Units - Unit conversion engine for input fields
//!
//! Every numeric input of the risk-assessment forms is a `Quantity`: one or
//! more values stored in the canonical unit of a closed unit family, with
//! optional bounds. Values can be read and written in any unit of the family.
//! Only canonical values are handed to the physics layer.
//!
//! Families (canonical unit first):
//! - Distance (m, km, cm, mm, in, ft, yd, mi)
//! - Temperature (K, °C, °F, °R)
//! - Pressure (Pa, kPa, MPa, psi, atm, bar, mbar, psig, barg)
//! - Density (kg/m3, g/cm3, g/L, lb/ft3)
//! - Volume (m3, L, cm3, ft3, in3, gal)
//! - Mass (kg, g, lb, oz, t)
//! - Energy (J, kJ, MJ, kWh, BTU, cal)
//! - SpecificEnergy (J/kg, kJ/kg, MJ/kg, BTU/lb)
//! - JulianTime (s, min, h, d, yr)
//! - ElapsingTime (s, ms, min, h)
//! - Angle (rad, deg)
//! - Area (m2, cm2, mm2, in2, ft2)
//! - Unitless
//!
//! ```ignore
//! let engine = hyrisk_units::engine()?;
//! let unit = engine.parse_unit(UnitFamily::Pressure, "psi")?;
//! let q = engine.quantity(unit, &[14.7])?;
//! let pascals = q.canonical_values();
//! ```

mod error;
mod family;
mod provider;
mod units;
mod table;
mod parse;
mod quantity;
mod config;
mod engine;
mod saved;

pub use error::UnitsError;
pub use family::{
    canonical_unit, units_of, Angle, Area, Density, Distance, ElapsingTime, Energy, JulianTime,
    Mass, Pressure, SpecificEnergy, Temperature, Unit, UnitFamily, Unitless, Volume,
};
pub use provider::{ConversionProvider, ScalarFn, UnitRule};
pub use units::{definitions, builtin_aliases, UnitDefinition, ATMOSPHERE_PA, PSI_PA, BAR_PA, KELVIN_OFFSET};
pub use table::ConverterTable;
pub use parse::{normalize, NameLookup};
pub use quantity::Quantity;
pub use config::{AliasEntry, EngineConfig};
pub use engine::{engine, UnitEngine};
pub use saved::SavedField;

/// Resolve a unit name with the default engine
pub fn parse_unit(family: UnitFamily, name: &str) -> Result<Unit, UnitsError> {
    engine()?.parse_unit(family, name)
}

/// Resolve a family name such as "Pressure"
pub fn parse_family(name: &str) -> Result<UnitFamily, UnitsError> {
    UnitFamily::from_name(name)
}
