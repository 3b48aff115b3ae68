//! Unit name parsing - resolve dropdown strings like "Psi" or " celsius " to typed units
//!
//! Display names and aliases are matched ignoring case. Symbols are matched
//! exactly, because SI prefixes differ only by case: "mPa" is not "MPa".

use std::collections::HashMap;
use tracing::{debug, trace};
use crate::family::units_of;
use crate::units::aliases_for;
use crate::{Unit, UnitFamily, UnitsError};

/// Normalize a unit name for lookup: trim surrounding whitespace and uppercase
pub fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Name → unit dictionary for one family
#[derive(Debug, Clone)]
pub struct NameLookup {
    family: UnitFamily,
    /// Normalized display names and aliases
    names: HashMap<String, Unit>,
    /// Symbols, trimmed but otherwise exact
    symbols: HashMap<&'static str, Unit>,
}

impl NameLookup {
    /// Lookup keyed by display names and symbols only
    pub fn new(family: UnitFamily) -> Result<Self, UnitsError> {
        let mut lookup = NameLookup { family, names: HashMap::new(), symbols: HashMap::new() };
        for unit in units_of(family) {
            lookup.insert(unit.display_name(), unit)?;
        }
        for unit in units_of(family) {
            if !unit.symbol().is_empty() {
                lookup.insert_symbol(unit.symbol(), unit)?;
            }
        }
        Ok(lookup)
    }

    /// Lookup with the built-in alias table installed
    pub fn with_builtin_aliases(family: UnitFamily) -> Result<Self, UnitsError> {
        let mut lookup = Self::new(family)?;
        for (alias, unit) in aliases_for(family) {
            lookup.insert(alias, unit)?;
        }
        Ok(lookup)
    }

    /// Register an additional case-insensitive spelling. Fails if the name,
    /// or a symbol spelled exactly like it, already refers to a different unit.
    pub fn insert(&mut self, name: &str, unit: Unit) -> Result<(), UnitsError> {
        let unit = unit.ensure_family(self.family)?;
        let key = normalize(name);
        let taken = [self.symbols.get(name.trim()), self.names.get(&key)];
        if let Some(&existing) = taken.into_iter().flatten().find(|&&existing| existing != unit) {
            return Err(self.ambiguous(name, existing, unit));
        }
        self.names.entry(key).or_insert(unit);
        Ok(())
    }

    fn insert_symbol(&mut self, symbol: &'static str, unit: Unit) -> Result<(), UnitsError> {
        match self.symbols.insert(symbol, unit) {
            Some(existing) if existing != unit => Err(self.ambiguous(symbol, existing, unit)),
            _ => Ok(()),
        }
    }

    fn ambiguous(&self, name: &str, existing: Unit, conflicting: Unit) -> UnitsError {
        UnitsError::AmbiguousUnitName {
            family: self.family,
            name: name.to_string(),
            existing,
            conflicting,
        }
    }

    pub fn family(&self) -> UnitFamily {
        self.family
    }

    /// Resolve a display string to a unit of this family
    pub fn parse(&self, input: &str) -> Result<Unit, UnitsError> {
        let found = self
            .symbols
            .get(input.trim())
            .or_else(|| self.names.get(&normalize(input)));
        match found {
            Some(&unit) => {
                trace!(family = %self.family, input, unit = %unit, "resolved unit name");
                Ok(unit)
            }
            None => {
                debug!(family = %self.family, input, "unknown unit name");
                Err(UnitsError::UnknownUnitName { family: self.family, input: input.to_string() })
            }
        }
    }

    /// Number of accepted spellings
    pub fn len(&self) -> usize {
        self.names.len() + self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.symbols.is_empty()
    }
}
