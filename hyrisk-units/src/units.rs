//! Unit definitions - conversion rules and alias spellings per family
//!
//! Factors convert a value in the unit to the family's canonical unit
//! (value_canonical = value * factor). Affine units supply both directions.

use crate::family::*;
use crate::provider::UnitRule;

/// Standard atmosphere in pascals
pub const ATMOSPHERE_PA: f64 = 101_325.0;
/// Pounds-force per square inch in pascals
pub const PSI_PA: f64 = 6_894.757_293_168;
pub const BAR_PA: f64 = 100_000.0;
/// Offset between the Celsius and Kelvin zeros
pub const KELVIN_OFFSET: f64 = 273.15;

/// One unit and the rule that converts it to its canonical unit
#[derive(Debug, Clone, Copy)]
pub struct UnitDefinition {
    pub unit: Unit,
    pub rule: UnitRule,
}

impl UnitDefinition {
    pub fn linear(unit: impl Into<Unit>, factor: f64) -> Self {
        UnitDefinition { unit: unit.into(), rule: UnitRule::Linear(factor) }
    }

    pub fn affine(
        unit: impl Into<Unit>,
        to_canonical: fn(f64) -> f64,
        from_canonical: fn(f64) -> f64,
    ) -> Self {
        UnitDefinition { unit: unit.into(), rule: UnitRule::affine(to_canonical, from_canonical) }
    }
}

/// Built-in definitions for a family
pub fn definitions(family: UnitFamily) -> Vec<UnitDefinition> {
    match family {
        UnitFamily::Distance => distance_units(),
        UnitFamily::Temperature => temperature_units(),
        UnitFamily::Pressure => pressure_units(),
        UnitFamily::Density => density_units(),
        UnitFamily::Volume => volume_units(),
        UnitFamily::Mass => mass_units(),
        UnitFamily::Energy => energy_units(),
        UnitFamily::SpecificEnergy => specific_energy_units(),
        UnitFamily::JulianTime => julian_time_units(),
        UnitFamily::ElapsingTime => elapsing_time_units(),
        UnitFamily::Angle => angle_units(),
        UnitFamily::Area => area_units(),
        UnitFamily::Unitless => vec![UnitDefinition::linear(Unitless::Unitless, 1.0)],
    }
}

fn distance_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(Distance::Meter, 1.0),
        UnitDefinition::linear(Distance::Kilometer, 1000.0),
        UnitDefinition::linear(Distance::Centimeter, 0.01),
        UnitDefinition::linear(Distance::Millimeter, 0.001),
        UnitDefinition::linear(Distance::Inch, 0.0254),
        UnitDefinition::linear(Distance::Foot, 0.3048),
        UnitDefinition::linear(Distance::Yard, 0.9144),
        UnitDefinition::linear(Distance::Mile, 1609.344),
    ]
}

fn celsius_to_kelvin(c: f64) -> f64 {
    c + KELVIN_OFFSET
}

fn kelvin_to_celsius(k: f64) -> f64 {
    k - KELVIN_OFFSET
}

fn fahrenheit_to_kelvin(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0 + KELVIN_OFFSET
}

fn kelvin_to_fahrenheit(k: f64) -> f64 {
    (k - KELVIN_OFFSET) * 9.0 / 5.0 + 32.0
}

fn temperature_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(Temperature::Kelvin, 1.0),
        UnitDefinition::affine(Temperature::Celsius, celsius_to_kelvin, kelvin_to_celsius),
        UnitDefinition::affine(Temperature::Fahrenheit, fahrenheit_to_kelvin, kelvin_to_fahrenheit),
        // Rankine shares the absolute zero, so a factor is enough
        UnitDefinition::linear(Temperature::Rankine, 5.0 / 9.0),
    ]
}

fn psig_to_pascal(p: f64) -> f64 {
    p * PSI_PA + ATMOSPHERE_PA
}

fn pascal_to_psig(p: f64) -> f64 {
    (p - ATMOSPHERE_PA) / PSI_PA
}

fn barg_to_pascal(p: f64) -> f64 {
    p * BAR_PA + ATMOSPHERE_PA
}

fn pascal_to_barg(p: f64) -> f64 {
    (p - ATMOSPHERE_PA) / BAR_PA
}

fn pressure_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(Pressure::Pascal, 1.0),
        UnitDefinition::linear(Pressure::Kilopascal, 1000.0),
        UnitDefinition::linear(Pressure::Megapascal, 1.0e6),
        UnitDefinition::linear(Pressure::Psi, PSI_PA),
        UnitDefinition::linear(Pressure::Atmosphere, ATMOSPHERE_PA),
        UnitDefinition::linear(Pressure::Bar, BAR_PA),
        UnitDefinition::linear(Pressure::Millibar, 100.0),
        UnitDefinition::affine(Pressure::PsiGauge, psig_to_pascal, pascal_to_psig),
        UnitDefinition::affine(Pressure::BarGauge, barg_to_pascal, pascal_to_barg),
    ]
}

fn density_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(Density::KilogramPerCubicMeter, 1.0),
        UnitDefinition::linear(Density::GramPerCubicCentimeter, 1000.0),
        UnitDefinition::linear(Density::GramPerLiter, 1.0),
        UnitDefinition::linear(Density::PoundPerCubicFoot, 16.018_463_373_960_14),
    ]
}

fn volume_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(Volume::CubicMeter, 1.0),
        UnitDefinition::linear(Volume::Liter, 0.001),
        UnitDefinition::linear(Volume::CubicCentimeter, 1.0e-6),
        UnitDefinition::linear(Volume::CubicFoot, 0.028_316_846_592),
        UnitDefinition::linear(Volume::CubicInch, 1.638_706_4e-5),
        UnitDefinition::linear(Volume::Gallon, 0.003_785_411_784),
    ]
}

fn mass_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(Mass::Kilogram, 1.0),
        UnitDefinition::linear(Mass::Gram, 0.001),
        UnitDefinition::linear(Mass::Pound, 0.453_592_37),
        UnitDefinition::linear(Mass::Ounce, 0.028_349_523_125),
        UnitDefinition::linear(Mass::Tonne, 1000.0),
    ]
}

fn energy_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(Energy::Joule, 1.0),
        UnitDefinition::linear(Energy::Kilojoule, 1000.0),
        UnitDefinition::linear(Energy::Megajoule, 1.0e6),
        UnitDefinition::linear(Energy::KilowattHour, 3.6e6),
        UnitDefinition::linear(Energy::Btu, 1055.055_852_62),
        UnitDefinition::linear(Energy::Calorie, 4.184),
    ]
}

fn specific_energy_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(SpecificEnergy::JoulePerKilogram, 1.0),
        UnitDefinition::linear(SpecificEnergy::KilojoulePerKilogram, 1000.0),
        UnitDefinition::linear(SpecificEnergy::MegajoulePerKilogram, 1.0e6),
        UnitDefinition::linear(SpecificEnergy::BtuPerPound, 2326.0),
    ]
}

fn julian_time_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(JulianTime::Second, 1.0),
        UnitDefinition::linear(JulianTime::Minute, 60.0),
        UnitDefinition::linear(JulianTime::Hour, 3600.0),
        UnitDefinition::linear(JulianTime::Day, 86_400.0),
        UnitDefinition::linear(JulianTime::Year, 365.25 * 86_400.0),
    ]
}

fn elapsing_time_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(ElapsingTime::Second, 1.0),
        UnitDefinition::linear(ElapsingTime::Millisecond, 0.001),
        UnitDefinition::linear(ElapsingTime::Minute, 60.0),
        UnitDefinition::linear(ElapsingTime::Hour, 3600.0),
    ]
}

fn angle_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(Angle::Radian, 1.0),
        UnitDefinition::linear(Angle::Degree, std::f64::consts::PI / 180.0),
    ]
}

fn area_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::linear(Area::SquareMeter, 1.0),
        UnitDefinition::linear(Area::SquareCentimeter, 1.0e-4),
        UnitDefinition::linear(Area::SquareMillimeter, 1.0e-6),
        UnitDefinition::linear(Area::SquareInch, 6.4516e-4),
        UnitDefinition::linear(Area::SquareFoot, 0.092_903_04),
    ]
}

/// Alternate spellings accepted by the name parser, on top of display names
/// and symbols. Matching ignores case.
pub fn builtin_aliases() -> Vec<(&'static str, Unit)> {
    vec![
        // Distance
        ("meters", Distance::Meter.into()),
        ("metres", Distance::Meter.into()),
        ("feet", Distance::Foot.into()),
        ("inches", Distance::Inch.into()),
        ("miles", Distance::Mile.into()),
        // Temperature
        ("K", Temperature::Kelvin.into()),
        ("C", Temperature::Celsius.into()),
        ("degC", Temperature::Celsius.into()),
        ("Celcius", Temperature::Celsius.into()),
        ("F", Temperature::Fahrenheit.into()),
        ("degF", Temperature::Fahrenheit.into()),
        ("R", Temperature::Rankine.into()),
        ("degR", Temperature::Rankine.into()),
        // Pressure
        ("Pascals", Pressure::Pascal.into()),
        ("atmospheres", Pressure::Atmosphere.into()),
        ("psia", Pressure::Psi.into()),
        ("bara", Pressure::Bar.into()),
        // Density
        ("kg/m^3", Density::KilogramPerCubicMeter.into()),
        ("kg/m³", Density::KilogramPerCubicMeter.into()),
        // Volume
        ("m^3", Volume::CubicMeter.into()),
        ("m³", Volume::CubicMeter.into()),
        ("liters", Volume::Liter.into()),
        ("litre", Volume::Liter.into()),
        ("ft^3", Volume::CubicFoot.into()),
        // Mass
        ("pounds", Mass::Pound.into()),
        ("lbs", Mass::Pound.into()),
        ("lbm", Mass::Pound.into()),
        ("grams", Mass::Gram.into()),
        // Energy
        ("Joules", Energy::Joule.into()),
        // Time
        ("sec", JulianTime::Second.into()),
        ("years", JulianTime::Year.into()),
        ("sec", ElapsingTime::Second.into()),
        ("msec", ElapsingTime::Millisecond.into()),
        // Angle
        ("degrees", Angle::Degree.into()),
        ("°", Angle::Degree.into()),
        ("radians", Angle::Radian.into()),
        // Area
        ("m^2", Area::SquareMeter.into()),
        ("m²", Area::SquareMeter.into()),
    ]
}

/// Built-in aliases belonging to one family
pub fn aliases_for(family: UnitFamily) -> Vec<(&'static str, Unit)> {
    builtin_aliases()
        .into_iter()
        .filter(|(_, unit)| unit.family() == family)
        .collect()
}
