//! Errors raised by the unit engine

use thiserror::Error;
use hyrisk_core::{codes, FieldError};
use crate::{Unit, UnitFamily};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitsError {
    #[error("bad conversion factor {factor}{}", unit_suffix(.unit))]
    BadConversionFactor { unit: Option<Unit>, factor: f64 },

    #[error("affine provider{} is missing its {missing} conversion", unit_suffix(.unit))]
    IncompleteAffineProvider { unit: Option<Unit>, missing: &'static str },

    #[error("unknown {family} unit name: '{input}'")]
    UnknownUnitName { family: UnitFamily, input: String },

    #[error("unknown unit family: '{0}'")]
    UnknownFamilyName(String),

    #[error("unit {unit} is not registered in the {family} table")]
    UnknownUnit { family: UnitFamily, unit: Unit },

    #[error("expected a {expected} unit, got a {found} unit")]
    FamilyMismatch { expected: UnitFamily, found: UnitFamily },

    #[error("expected {expected} value(s), got {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("a quantity needs at least one value")]
    EmptyValues,

    #[error("invalid bounds [{min}, {max}]")]
    InvalidBounds { min: f64, max: f64 },

    #[error("no conversion defined for {family} unit {unit}")]
    MissingProvider { family: UnitFamily, unit: Unit },

    #[error("conversion for {family} unit {unit} defined more than once")]
    DuplicateProvider { family: UnitFamily, unit: Unit },

    #[error("canonical {family} unit {unit} must convert with factor 1")]
    NonIdentityCanonical { family: UnitFamily, unit: Unit },

    #[error("{family} name '{name}' refers to both {existing} and {conflicting}")]
    AmbiguousUnitName { family: UnitFamily, name: String, existing: Unit, conflicting: Unit },

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("persisted field error: {0}")]
    Persistence(String),
}

fn unit_suffix(unit: &Option<Unit>) -> String {
    match unit {
        Some(unit) => format!(" for {}", unit),
        None => String::new(),
    }
}

impl UnitsError {
    /// Attach the unit a provider error was raised for
    pub(crate) fn for_unit(self, unit: Unit) -> Self {
        match self {
            UnitsError::BadConversionFactor { factor, .. } => {
                UnitsError::BadConversionFactor { unit: Some(unit), factor }
            }
            UnitsError::IncompleteAffineProvider { missing, .. } => {
                UnitsError::IncompleteAffineProvider { unit: Some(unit), missing }
            }
            other => other,
        }
    }

    /// Errors that stop the engine from being built at all
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            UnitsError::BadConversionFactor { .. }
                | UnitsError::IncompleteAffineProvider { .. }
                | UnitsError::MissingProvider { .. }
                | UnitsError::DuplicateProvider { .. }
                | UnitsError::NonIdentityCanonical { .. }
                | UnitsError::AmbiguousUnitName { .. }
                | UnitsError::InvalidConfig(_)
        )
    }
}

impl From<UnitsError> for FieldError {
    fn from(err: UnitsError) -> Self {
        match err {
            UnitsError::UnknownUnitName { family, input } => {
                FieldError::unknown_unit_name(family.name(), &input)
            }
            UnitsError::UnknownFamilyName(name) => FieldError::unknown_family_name(&name),
            UnitsError::FamilyMismatch { expected, found } => {
                FieldError::family_mismatch(expected.name(), found.name())
            }
            UnitsError::LengthMismatch { expected, found } => {
                FieldError::length_mismatch(expected, found)
            }
            UnitsError::EmptyValues => FieldError::empty_values(),
            UnitsError::InvalidBounds { .. } => FieldError::invalid_bounds(err.to_string()),
            UnitsError::Persistence(details) => FieldError::persistence(details),
            UnitsError::UnknownUnit { family, unit } => {
                FieldError::unknown_unit(unit.display_name(), family.name())
            }
            UnitsError::BadConversionFactor { .. } => {
                FieldError::invalid_table(codes::BAD_CONVERSION_FACTOR, err.to_string())
            }
            UnitsError::IncompleteAffineProvider { .. } => {
                FieldError::invalid_table(codes::INCOMPLETE_AFFINE_PROVIDER, err.to_string())
            }
            UnitsError::MissingProvider { .. }
            | UnitsError::DuplicateProvider { .. }
            | UnitsError::NonIdentityCanonical { .. }
            | UnitsError::AmbiguousUnitName { .. } => {
                FieldError::invalid_table(codes::INVALID_TABLE, err.to_string())
            }
            UnitsError::InvalidConfig(details) => FieldError::invalid_config(details),
        }
    }
}
