//! The unit engine: every converter table and name lookup, built once

use std::sync::{Arc, LazyLock};
use tracing::{debug, info};
use crate::config::EngineConfig;
use crate::parse::NameLookup;
use crate::quantity::Quantity;
use crate::table::ConverterTable;
use crate::{Unit, UnitFamily, UnitsError};

/// Process-wide engine built from the default configuration
static ENGINE: LazyLock<Result<UnitEngine, UnitsError>> = LazyLock::new(UnitEngine::build);

/// The shared default engine. A construction failure is returned to every caller.
pub fn engine() -> Result<&'static UnitEngine, UnitsError> {
    ENGINE.as_ref().map_err(Clone::clone)
}

/// Converter tables and name lookups for every family.
///
/// Construction is eager and all-or-nothing. After that the engine is
/// read-only and can be shared freely between threads.
#[derive(Debug)]
pub struct UnitEngine {
    tables: Vec<Arc<ConverterTable>>,
    lookups: Vec<NameLookup>,
}

impl UnitEngine {
    /// Build with the default configuration
    pub fn build() -> Result<Self, UnitsError> {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Result<Self, UnitsError> {
        let mut tables = Vec::with_capacity(UnitFamily::ALL.len());
        let mut lookups = Vec::with_capacity(UnitFamily::ALL.len());

        for family in UnitFamily::ALL {
            tables.push(Arc::new(ConverterTable::build(family)?));
            let lookup = if config.builtin_aliases {
                NameLookup::with_builtin_aliases(family)?
            } else {
                NameLookup::new(family)?
            };
            lookups.push(lookup);
        }

        for entry in &config.aliases {
            let lookup = &mut lookups[entry.family.index()];
            let unit = lookup.parse(&entry.unit)?;
            lookup.insert(&entry.alias, unit)?;
            debug!(family = %entry.family, alias = %entry.alias, unit = %unit, "added unit alias");
        }

        info!(
            families = tables.len(),
            names = lookups.iter().map(NameLookup::len).sum::<usize>(),
            "unit engine ready"
        );

        Ok(UnitEngine { tables, lookups })
    }

    /// The converter table of a family
    pub fn table(&self, family: UnitFamily) -> Arc<ConverterTable> {
        Arc::clone(&self.tables[family.index()])
    }

    pub fn lookup(&self, family: UnitFamily) -> &NameLookup {
        &self.lookups[family.index()]
    }

    /// Resolve a display string to a unit of `family`
    pub fn parse_unit(&self, family: UnitFamily, name: &str) -> Result<Unit, UnitsError> {
        self.lookup(family).parse(name)
    }

    /// Unbounded quantity in the unit's family
    pub fn quantity(&self, unit: impl Into<Unit>, raw_values: &[f64]) -> Result<Quantity, UnitsError> {
        let unit = unit.into();
        Quantity::new(self.table(unit.family()), unit, raw_values)
    }

    /// Bounded quantity in the unit's family; bounds are in the canonical unit
    pub fn bounded_quantity(
        &self,
        unit: impl Into<Unit>,
        raw_values: &[f64],
        min: f64,
        max: f64,
    ) -> Result<Quantity, UnitsError> {
        let unit = unit.into();
        Quantity::bounded(self.table(unit.family()), unit, raw_values, min, max)
    }

    /// Convert a single value between two units of the same family
    pub fn convert(&self, value: f64, from: impl Into<Unit>, to: impl Into<Unit>) -> Result<f64, UnitsError> {
        let from = from.into();
        let to = to.into().ensure_family(from.family())?;
        self.tables[from.family().index()].convert(value, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::{Distance, Pressure, Temperature};

    #[test]
    fn test_default_engine_builds() {
        let engine = engine().unwrap();
        for family in UnitFamily::ALL {
            assert_eq!(engine.table(family).family(), family);
            assert_eq!(engine.lookup(family).family(), family);
        }
    }

    #[test]
    fn test_tables_are_shared() {
        let engine = engine().unwrap();
        let a = engine.table(UnitFamily::Pressure);
        let b = engine.table(UnitFamily::Pressure);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_dropdown_to_quantity() {
        let engine = engine().unwrap();
        let unit = engine.parse_unit(UnitFamily::Pressure, "psi").unwrap();
        let q = engine.quantity(unit, &[14.69595]).unwrap();
        assert!((q.canonical_values()[0] - 101_325.0).abs() < 0.05);

        let atm = engine.parse_unit(UnitFamily::Pressure, "Atmosphere").unwrap();
        assert!((q.get_scalar(atm).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_convert() {
        let engine = engine().unwrap();
        let f = engine.convert(300.0, Temperature::Kelvin, Temperature::Fahrenheit).unwrap();
        assert!((f - 80.33).abs() < 0.01);

        assert_eq!(
            engine.convert(1.0, Distance::Meter, Pressure::Pascal).unwrap_err(),
            UnitsError::FamilyMismatch { expected: UnitFamily::Distance, found: UnitFamily::Pressure }
        );
    }

    #[test]
    fn test_config_without_builtin_aliases() {
        let engine = UnitEngine::with_config(&EngineConfig::new().with_builtin_aliases(false)).unwrap();
        assert!(engine.parse_unit(UnitFamily::Temperature, "Celcius").is_err());
        // Display names and symbols are still accepted
        assert_eq!(
            engine.parse_unit(UnitFamily::Temperature, "°C").unwrap(),
            Unit::from(Temperature::Celsius)
        );
    }

    #[test]
    fn test_config_extra_alias() {
        let config = EngineConfig::new().with_alias(UnitFamily::Temperature, "Centigrade", "Celsius");
        let engine = UnitEngine::with_config(&config).unwrap();
        assert_eq!(
            engine.parse_unit(UnitFamily::Temperature, "centigrade").unwrap(),
            Unit::from(Temperature::Celsius)
        );
    }

    #[test]
    fn test_config_alias_errors_fail_construction() {
        let unknown_target = EngineConfig::new().with_alias(UnitFamily::Distance, "league", "Leagues");
        assert!(matches!(
            UnitEngine::with_config(&unknown_target),
            Err(UnitsError::UnknownUnitName { .. })
        ));

        let conflicting = EngineConfig::new().with_alias(UnitFamily::Distance, "ft", "Meter");
        assert!(matches!(
            UnitEngine::with_config(&conflicting),
            Err(UnitsError::AmbiguousUnitName { .. })
        ));
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = engine().unwrap();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let q = engine.quantity(Distance::Foot, &[i as f64]).unwrap();
                    q.get_scalar(Distance::Inch).unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let inches = handle.join().unwrap();
            assert!((inches - 12.0 * i as f64).abs() < 1e-9);
        }
    }
}
