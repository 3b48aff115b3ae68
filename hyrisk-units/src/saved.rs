//! Persisted field state
//!
//! A saved workspace keeps, per input field, the display name of the unit
//! the user last selected and the values in canonical form. Restoring goes
//! back through the name parser, so a workspace that mentions a unit which no
//! longer exists fails with `UnknownUnitName`.

use serde::{Serialize, Deserialize};
use crate::engine::UnitEngine;
use crate::quantity::Quantity;
use crate::{Unit, UnitFamily, UnitsError};

/// One field as written to a workspace file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedField {
    /// Family name, e.g. "Pressure"
    pub family: String,
    /// Display name of the last selected unit
    pub unit: String,
    /// Values in the family's canonical unit
    #[serde(with = "non_finite::seq")]
    pub values: Vec<f64>,
    #[serde(with = "non_finite::scalar")]
    pub min: f64,
    #[serde(with = "non_finite::scalar")]
    pub max: f64,
    #[serde(default)]
    pub resizable: bool,
}

impl Quantity {
    /// Capture this quantity together with the unit currently shown for it
    pub fn to_saved(&self, display_unit: impl Into<Unit>) -> Result<SavedField, UnitsError> {
        let display_unit = display_unit.into().ensure_family(self.family())?;
        Ok(SavedField {
            family: self.family().name().to_string(),
            unit: display_unit.display_name().to_string(),
            values: self.canonical_values().to_vec(),
            min: self.min(),
            max: self.max(),
            resizable: self.is_resizable(),
        })
    }
}

impl SavedField {
    /// Rebuild the quantity and resolve its display unit
    pub fn restore(&self, engine: &UnitEngine) -> Result<(Quantity, Unit), UnitsError> {
        let family = UnitFamily::from_name(&self.family)?;
        let unit = engine.parse_unit(family, &self.unit)?;
        let quantity = Quantity::from_canonical(engine.table(family), &self.values, self.min, self.max)?;
        let quantity = if self.resizable { quantity.into_resizable() } else { quantity };
        Ok((quantity, unit))
    }

    pub fn to_json(&self) -> Result<String, UnitsError> {
        serde_json::to_string(self).map_err(|e| UnitsError::Persistence(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self, UnitsError> {
        serde_json::from_str(text).map_err(|e| UnitsError::Persistence(e.to_string()))
    }
}

/// JSON has no NaN or infinity; write them as "NaN", "inf" and "-inf"
mod non_finite {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    fn encode(value: f64) -> Repr {
        if value.is_nan() {
            Repr::Text("NaN".to_string())
        } else if value == f64::INFINITY {
            Repr::Text("inf".to_string())
        } else if value == f64::NEG_INFINITY {
            Repr::Text("-inf".to_string())
        } else {
            Repr::Number(value)
        }
    }

    fn decode<E: serde::de::Error>(repr: Repr) -> Result<f64, E> {
        match repr {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(E::custom(format!("invalid number: {}", other))),
            },
        }
    }

    pub mod scalar {
        use super::*;

        pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
            encode(*value).serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
            decode(Repr::deserialize(deserializer)?)
        }
    }

    pub mod seq {
        use super::*;

        pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(values.iter().map(|&v| encode(v)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
            Vec::<Repr>::deserialize(deserializer)?
                .into_iter()
                .map(decode::<D::Error>)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::engine;
    use crate::family::{Pressure, Temperature, Unitless};

    #[test]
    fn test_save_and_restore() {
        let engine = engine().unwrap();
        let q = engine.bounded_quantity(Pressure::Psi, &[10.0, 20.0], 0.0, 1.0e8).unwrap().into_resizable();

        let saved = q.to_saved(Pressure::Psi).unwrap();
        assert_eq!(saved.family, "Pressure");
        assert_eq!(saved.unit, "Psi");
        assert!(saved.resizable);

        let (restored, unit) = saved.restore(engine).unwrap();
        assert_eq!(unit, Unit::from(Pressure::Psi));
        assert_eq!(restored, q);
        assert_eq!(restored.max(), 1.0e8);
        assert!(restored.is_resizable());
    }

    #[test]
    fn test_json_keeps_non_finite_values() {
        let engine = engine().unwrap();
        let q = engine.quantity(Unitless::Unitless, &[f64::NAN, 4.0]).unwrap();
        let json = q.to_saved(Unitless::Unitless).unwrap().to_json().unwrap();

        assert!(json.contains(r#""values":["NaN",4.0]"#));
        assert!(json.contains(r#""min":"-inf""#));
        assert!(json.contains(r#""max":"inf""#));

        let back = SavedField::from_json(&json).unwrap();
        assert!(back.values[0].is_nan());
        assert_eq!(back.values[1], 4.0);
        assert_eq!(back.min, f64::NEG_INFINITY);
        assert_eq!(back.max, f64::INFINITY);

        let (restored, _) = back.restore(engine).unwrap();
        assert_eq!(restored, q);
    }

    #[test]
    fn test_restore_legacy_spelling() {
        let json = r#"{"family":"Temperature","unit":"Celcius","values":[300.0],"min":0,"max":"inf"}"#;
        let saved = SavedField::from_json(json).unwrap();
        let (q, unit) = saved.restore(engine().unwrap()).unwrap();
        assert_eq!(unit, Unit::from(Temperature::Celsius));
        assert!(!q.is_resizable());
        assert!((q.get_scalar(unit).unwrap() - 26.85).abs() < 0.01);
    }

    #[test]
    fn test_restore_removed_unit() {
        let json = r#"{"family":"Pressure","unit":"Torr","values":[1.0],"min":"-inf","max":"inf"}"#;
        let err = SavedField::from_json(json).unwrap().restore(engine().unwrap()).unwrap_err();
        assert_eq!(
            err,
            UnitsError::UnknownUnitName { family: UnitFamily::Pressure, input: "Torr".to_string() }
        );
    }

    #[test]
    fn test_restore_unknown_family() {
        let json = r#"{"family":"Luminosity","unit":"Candela","values":[1.0],"min":"-inf","max":"inf"}"#;
        let err = SavedField::from_json(json).unwrap().restore(engine().unwrap()).unwrap_err();
        assert_eq!(err, UnitsError::UnknownFamilyName("Luminosity".to_string()));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SavedField::from_json(r#"{"family":"Mass","unit":"Gram","values":["lots"],"min":0,"max":1}"#),
            Err(UnitsError::Persistence(_))
        ));
    }

    #[test]
    fn test_save_with_wrong_display_unit() {
        let q = engine().unwrap().quantity(Temperature::Kelvin, &[300.0]).unwrap();
        assert!(matches!(q.to_saved(Pressure::Bar), Err(UnitsError::FamilyMismatch { .. })));
    }
}
