//! Structured errors for input fields
//!
//! Errors coming out of the unit engine are turned into `FieldError` values
//! before they reach a form. A `FieldError` carries a machine-readable code,
//! a message fit for display next to the offending field, and an optional
//! suggestion.

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_UNIT_NAME: &str = "UNKNOWN_UNIT_NAME";
    pub const UNKNOWN_FAMILY_NAME: &str = "UNKNOWN_FAMILY_NAME";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const FAMILY_MISMATCH: &str = "FAMILY_MISMATCH";
    pub const LENGTH_MISMATCH: &str = "LENGTH_MISMATCH";
    pub const EMPTY_VALUES: &str = "EMPTY_VALUES";
    pub const INVALID_BOUNDS: &str = "INVALID_BOUNDS";
    pub const BAD_CONVERSION_FACTOR: &str = "BAD_CONVERSION_FACTOR";
    pub const INCOMPLETE_AFFINE_PROVIDER: &str = "INCOMPLETE_AFFINE_PROVIDER";
    pub const INVALID_TABLE: &str = "INVALID_TABLE";
    pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
    pub const PERSISTENCE: &str = "PERSISTENCE";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The field was rejected; other fields are unaffected
    Error,
    /// The unit engine cannot be initialized
    Fatal,
}

/// Context about where an error occurred
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Input field that produced the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Unit name involved, as typed or selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Propagation notes
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error surfaced next to an input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    /// Severity level
    pub severity: Severity,
}

impl FieldError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: add context
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Builder: set field context
    pub fn in_field(mut self, field: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.field = Some(field.into());
        self
    }

    /// Builder: set unit context
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.unit = Some(unit.into());
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    // ========== Common Error Constructors ==========

    pub fn unknown_unit_name(family: &str, input: &str) -> Self {
        Self::new(
            codes::UNKNOWN_UNIT_NAME,
            format!("Unknown {} unit: '{}'", family.to_lowercase(), input),
        )
        .with_suggestion(format!("Select a {} unit from the list", family.to_lowercase()))
        .with_unit(input)
    }

    pub fn unknown_family_name(input: &str) -> Self {
        Self::new(codes::UNKNOWN_FAMILY_NAME, format!("Unknown unit family: '{}'", input))
            .with_suggestion("The saved workspace may come from a newer version")
    }

    pub fn family_mismatch(expected: &str, found: &str) -> Self {
        Self::new(
            codes::FAMILY_MISMATCH,
            format!("Expected a {} unit, got a {} unit", expected.to_lowercase(), found.to_lowercase()),
        )
    }

    /// A unit that exists but has no conversion in the table it was used with
    pub fn unknown_unit(unit: &str, family: &str) -> Self {
        Self::new(
            codes::UNKNOWN_UNIT,
            format!("No {} conversion for unit '{}'", family.to_lowercase(), unit),
        )
        .with_unit(unit)
    }

    pub fn length_mismatch(expected: usize, found: usize) -> Self {
        Self::new(
            codes::LENGTH_MISMATCH,
            format!("Expected {} value(s), got {}", expected, found),
        )
        .with_suggestion(format!("Enter exactly {} value(s)", expected))
    }

    pub fn empty_values() -> Self {
        Self::new(codes::EMPTY_VALUES, "No value entered")
            .with_suggestion("Enter at least one number")
    }

    pub fn invalid_bounds(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_BOUNDS, format!("Invalid bounds: {}", details.into()))
    }

    pub fn persistence(details: impl Into<String>) -> Self {
        Self::new(codes::PERSISTENCE, format!("Could not restore field: {}", details.into()))
    }

    /// Errors raised while the unit tables are built. The application cannot
    /// continue past these.
    pub fn invalid_table(code: &str, details: impl Into<String>) -> Self {
        Self::new(code, format!("Unit table error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }

    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_CONFIG, format!("Invalid unit configuration: {}", details.into()))
            .with_suggestion("Check the alias entries of the engine configuration")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}
