//! Hyrisk Core - Shared types
//!
//! This crate provides the types shared by the hyrisk crates:
//! - `FieldError`: Structured, serializable errors shown next to input fields
//! - `Severity`: How far an error propagates

mod error;

pub use error::{FieldError, ErrorContext, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{FieldError, Severity};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_error_severity() {
        let err = FieldError::new(codes::EMPTY_VALUES, "nothing");
        assert_eq!(err.severity, Severity::Error);
        assert!(err.suggestion.is_none());
        assert!(err.context.is_none());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_unknown_unit_name() {
        let err = FieldError::unknown_unit_name("Temperature", "Kelvn");
        assert_eq!(err.code, codes::UNKNOWN_UNIT_NAME);
        assert!(err.message.contains("temperature"));
        assert!(err.message.contains("Kelvn"));
        assert_eq!(err.context.unwrap().unit.as_deref(), Some("Kelvn"));
    }

    #[test]
    fn test_builders_share_context() {
        let err = FieldError::length_mismatch(3, 1)
            .in_field("Overpressure thresholds")
            .with_unit("Psi")
            .with_note("while loading workspace");

        let ctx = err.context.unwrap();
        assert_eq!(ctx.field.as_deref(), Some("Overpressure thresholds"));
        assert_eq!(ctx.unit.as_deref(), Some("Psi"));
        assert_eq!(ctx.notes, vec!["while loading workspace".to_string()]);
    }

    #[test]
    fn test_invalid_table_is_fatal() {
        let err = FieldError::invalid_table(codes::BAD_CONVERSION_FACTOR, "Foot has factor 0");
        assert!(err.is_fatal());
        assert_eq!(err.code, codes::BAD_CONVERSION_FACTOR);
    }

    #[test]
    fn test_display() {
        let err = FieldError::empty_values();
        assert_eq!(
            err.to_string(),
            "[EMPTY_VALUES] No value entered (suggestion: Enter at least one number)"
        );
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let err = FieldError::family_mismatch("Pressure", "Temperature");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "FAMILY_MISMATCH");
        assert_eq!(json["severity"], "error");
        assert!(json.get("suggestion").is_none());
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let err = FieldError::unknown_family_name("Luminosity").in_field("Light level");
        let text = serde_json::to_string(&err).unwrap();
        let back: FieldError = serde_json::from_str(&text).unwrap();
        assert_eq!(back, err);
    }
}
