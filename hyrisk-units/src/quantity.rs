//! Quantity type - one or more values stored in canonical units, with optional bounds

use std::fmt;
use std::sync::Arc;
use tracing::trace;
use crate::table::ConverterTable;
use crate::{Unit, UnitFamily, UnitsError};

/// A convertible value.
///
/// Values are stored in the canonical unit of the family and re-derived in
/// any unit on request. Scalars are one-element arrays. NaN and infinities are
/// treated as "unset"/"unbounded" markers: they are never converted or clamped.
#[derive(Debug, Clone)]
pub struct Quantity {
    table: Arc<ConverterTable>,
    canonical: Vec<f64>,
    min: f64,
    max: f64,
    resizable: bool,
}

/// Clamp a converted value into `[min, max]` unless the raw input was NaN or
/// infinite. Finite input that overflows during conversion is still clamped.
fn clamp(raw: f64, converted: f64, min: f64, max: f64) -> f64 {
    if raw.is_finite() {
        converted.clamp(min, max)
    } else {
        converted
    }
}

/// NaN marks an unset value, so two NaNs compare equal here
fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn check_bounds(min: f64, max: f64) -> Result<(), UnitsError> {
    if min.is_nan() || max.is_nan() || min > max {
        return Err(UnitsError::InvalidBounds { min, max });
    }
    Ok(())
}

impl Quantity {
    /// Create an unbounded quantity from raw values in `unit`
    pub fn new(
        table: Arc<ConverterTable>,
        unit: impl Into<Unit>,
        raw_values: &[f64],
    ) -> Result<Self, UnitsError> {
        Self::bounded(table, unit, raw_values, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Create a quantity whose canonical values are clamped to `[min, max]`.
    /// Bounds are expressed in the canonical unit.
    pub fn bounded(
        table: Arc<ConverterTable>,
        unit: impl Into<Unit>,
        raw_values: &[f64],
        min: f64,
        max: f64,
    ) -> Result<Self, UnitsError> {
        check_bounds(min, max)?;
        let mut quantity = Quantity { table, canonical: Vec::new(), min, max, resizable: false };
        quantity.canonical = quantity.convert_in(unit.into(), raw_values)?;
        Ok(quantity)
    }

    /// Rebuild a quantity from values already in the canonical unit
    pub fn from_canonical(
        table: Arc<ConverterTable>,
        canonical_values: &[f64],
        min: f64,
        max: f64,
    ) -> Result<Self, UnitsError> {
        let unit = table.canonical_unit();
        Self::bounded(table, unit, canonical_values, min, max)
    }

    /// Allow `set_value` to change the number of stored values
    pub fn into_resizable(mut self) -> Self {
        self.resizable = true;
        self
    }

    pub fn family(&self) -> UnitFamily {
        self.table.family()
    }

    pub fn canonical_unit(&self) -> Unit {
        self.table.canonical_unit()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    /// Always false: construction rejects empty value lists
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Values in the canonical unit, as handed to the physics layer
    pub fn canonical_values(&self) -> &[f64] {
        &self.canonical
    }

    /// Values expressed in `unit`
    pub fn get_value(&self, unit: impl Into<Unit>) -> Result<Vec<f64>, UnitsError> {
        let unit = unit.into();
        unit.ensure_family(self.family())?;
        let provider = self.table.provider_for(unit)?;
        Ok(self.canonical.iter().map(|&v| provider.from_canonical(v)).collect())
    }

    /// First value expressed in `unit`
    pub fn get_scalar(&self, unit: impl Into<Unit>) -> Result<f64, UnitsError> {
        let values = self.get_value(unit)?;
        values.first().copied().ok_or(UnitsError::EmptyValues)
    }

    /// Replace the stored values with `values` given in `unit`.
    ///
    /// The length must match the current length unless the quantity is
    /// resizable. On error the quantity is left unchanged.
    pub fn set_value(&mut self, unit: impl Into<Unit>, values: &[f64]) -> Result<(), UnitsError> {
        let unit = unit.into();
        if !self.resizable && values.len() != self.canonical.len() {
            return Err(UnitsError::LengthMismatch { expected: self.canonical.len(), found: values.len() });
        }
        let canonical = self.convert_in(unit, values)?;
        trace!(family = %self.family(), unit = %unit, count = canonical.len(), "set quantity");
        self.canonical = canonical;
        Ok(())
    }

    pub fn set_scalar(&mut self, unit: impl Into<Unit>, value: f64) -> Result<(), UnitsError> {
        self.set_value(unit, &[value])
    }

    /// Truncate every stored value toward zero.
    ///
    /// Counts and random seeds are stored as doubles like every other
    /// quantity; this turns them back into whole numbers. NaN and infinities
    /// are left as they are.
    pub fn truncate_to_integers(&mut self) {
        for v in self.canonical.iter_mut() {
            if v.is_finite() {
                *v = v.trunc();
            }
        }
    }

    /// Convert raw values to canonical form and clamp them, without touching `self`
    fn convert_in(&self, unit: Unit, raw_values: &[f64]) -> Result<Vec<f64>, UnitsError> {
        unit.ensure_family(self.family())?;
        if raw_values.is_empty() {
            return Err(UnitsError::EmptyValues);
        }
        let provider = self.table.provider_for(unit)?;
        Ok(raw_values
            .iter()
            .map(|&raw| clamp(raw, provider.to_canonical(raw), self.min, self.max))
            .collect())
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.family() == other.family()
            && self.canonical.len() == other.canonical.len()
            && self.canonical.iter().zip(&other.canonical).all(|(&a, &b)| same_value(a, b))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.canonical_unit().symbol();
        let values = match self.canonical.as_slice() {
            [single] => format!("{}", single),
            many => format!(
                "[{}]",
                many.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
            ),
        };
        if symbol.is_empty() {
            write!(f, "{}", values)
        } else {
            write!(f, "{} {}", values, symbol)
        }
    }
}
