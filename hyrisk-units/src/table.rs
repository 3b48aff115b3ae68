//! Per-family converter tables

use std::collections::HashMap;
use tracing::{debug, error};
use crate::family::{canonical_unit, units_of};
use crate::provider::ConversionProvider;
use crate::units::{definitions, UnitDefinition};
use crate::{Unit, UnitFamily, UnitsError};

/// The conversion providers of one family, validated as a batch and read-only afterwards
#[derive(Debug)]
pub struct ConverterTable {
    family: UnitFamily,
    canonical: Unit,
    providers: HashMap<Unit, ConversionProvider>,
}

impl ConverterTable {
    /// Build the table for a family from the built-in definitions
    pub fn build(family: UnitFamily) -> Result<Self, UnitsError> {
        Self::from_definitions(family, definitions(family))
    }

    /// Build a table from explicit definitions.
    ///
    /// Every definition is validated before anything is returned. If any of
    /// them is invalid, each problem is logged and the first one is returned;
    /// no partial table is ever produced.
    pub fn from_definitions(
        family: UnitFamily,
        definitions: impl IntoIterator<Item = UnitDefinition>,
    ) -> Result<Self, UnitsError> {
        let canonical = canonical_unit(family);
        let mut providers = HashMap::new();
        let mut problems = Vec::new();

        for def in definitions {
            if def.unit.family() != family {
                problems.push(UnitsError::FamilyMismatch { expected: family, found: def.unit.family() });
                continue;
            }
            if providers.contains_key(&def.unit) {
                problems.push(UnitsError::DuplicateProvider { family, unit: def.unit });
                continue;
            }
            match ConversionProvider::from_rule(def.unit, def.rule) {
                Ok(provider) => {
                    providers.insert(def.unit, provider);
                }
                Err(e) => problems.push(e),
            }
        }

        for unit in units_of(family) {
            if providers.contains_key(&unit) {
                continue;
            }
            // Units whose rule failed are already reported
            let already_reported = problems.iter().any(|p| match p {
                UnitsError::BadConversionFactor { unit: Some(u), .. }
                | UnitsError::IncompleteAffineProvider { unit: Some(u), .. } => *u == unit,
                _ => false,
            });
            if !already_reported {
                problems.push(UnitsError::MissingProvider { family, unit });
            }
        }

        if let Some(provider) = providers.get(&canonical) {
            if !provider.is_identity() {
                problems.push(UnitsError::NonIdentityCanonical { family, unit: canonical });
            }
        }

        if let Some(first) = problems.first() {
            for problem in &problems {
                error!(family = %family, "invalid unit definition: {}", problem);
            }
            return Err(first.clone());
        }

        debug!(family = %family, units = providers.len(), "built converter table");

        Ok(ConverterTable { family, canonical, providers })
    }

    pub fn family(&self) -> UnitFamily {
        self.family
    }

    pub fn canonical_unit(&self) -> Unit {
        self.canonical
    }

    /// Units covered by the table, canonical unit first
    pub fn units(&self) -> Vec<Unit> {
        units_of(self.family)
    }

    /// Look up the provider of a unit
    pub fn provider_for(&self, unit: impl Into<Unit>) -> Result<ConversionProvider, UnitsError> {
        let unit = unit.into();
        self.providers
            .get(&unit)
            .copied()
            .ok_or(UnitsError::UnknownUnit { family: self.family, unit })
    }

    /// Convert a raw value in `unit` to the canonical unit
    pub fn to_canonical(&self, unit: impl Into<Unit>, raw: f64) -> Result<f64, UnitsError> {
        Ok(self.provider_for(unit)?.to_canonical(raw))
    }

    /// Convert a canonical value to `unit`
    pub fn from_canonical(&self, unit: impl Into<Unit>, canonical: f64) -> Result<f64, UnitsError> {
        Ok(self.provider_for(unit)?.from_canonical(canonical))
    }

    /// Convert a value between two units of this family
    pub fn convert(
        &self,
        value: f64,
        from: impl Into<Unit>,
        to: impl Into<Unit>,
    ) -> Result<f64, UnitsError> {
        let canonical = self.to_canonical(from, value)?;
        self.from_canonical(to, canonical)
    }
}
