//! Engine configuration

use serde::{Serialize, Deserialize};
use crate::{UnitFamily, UnitsError};

/// An extra spelling for a unit, e.g. a legacy name found in old workspaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub family: UnitFamily,
    /// The new spelling
    pub alias: String,
    /// Any name the unit already answers to
    pub unit: String,
}

/// How the unit engine is put together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Install the built-in alias table (symbols are always accepted)
    pub builtin_aliases: bool,
    /// Caller-supplied aliases, applied after the built-in ones
    pub aliases: Vec<AliasEntry>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            builtin_aliases: true,
            aliases: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_aliases(mut self, enabled: bool) -> Self {
        self.builtin_aliases = enabled;
        self
    }

    pub fn with_alias(mut self, family: UnitFamily, alias: &str, unit: &str) -> Self {
        self.aliases.push(AliasEntry {
            family,
            alias: alias.to_string(),
            unit: unit.to_string(),
        });
        self
    }

    /// Read a configuration from JSON; missing fields take their defaults
    pub fn from_json(text: &str) -> Result<Self, UnitsError> {
        serde_json::from_str(text).map_err(|e| UnitsError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = EngineConfig::default();
        assert!(config.builtin_aliases);
        assert!(config.aliases.is_empty());
        assert_eq!(config, EngineConfig::new());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_builtin_aliases(false)
            .with_alias(UnitFamily::Pressure, "psia", "Psi");

        assert!(!config.builtin_aliases);
        assert_eq!(config.aliases.len(), 1);
        assert_eq!(config.aliases[0].family, UnitFamily::Pressure);
        assert_eq!(config.aliases[0].unit, "Psi");
    }

    #[test]
    fn test_from_json() {
        let config = EngineConfig::from_json(
            r#"{"aliases": [{"family": "Temperature", "alias": "Centigrade", "unit": "Celsius"}]}"#,
        )
        .unwrap();
        assert!(config.builtin_aliases);
        assert_eq!(config.aliases[0].alias, "Centigrade");

        let empty = EngineConfig::from_json("{}").unwrap();
        assert_eq!(empty, EngineConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_family() {
        let err = EngineConfig::from_json(
            r#"{"aliases": [{"family": "Luminosity", "alias": "cd", "unit": "Candela"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, UnitsError::InvalidConfig(_)));
        assert!(err.is_fatal());
    }
}
