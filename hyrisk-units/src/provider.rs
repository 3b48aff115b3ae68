//! Conversion providers: how one unit relates to its family's canonical unit

use crate::{Unit, UnitsError};

/// A one-way scalar conversion
pub type ScalarFn = fn(f64) -> f64;

/// Declarative, unvalidated conversion rule for a unit.
///
/// Rules are what the unit definitions are written in. They become
/// `ConversionProvider`s only after validation.
#[derive(Debug, Clone, Copy)]
pub enum UnitRule {
    /// canonical = raw * factor
    Linear(f64),
    /// Arbitrary two-way mapping, for scales whose zero differs from the canonical zero
    Affine {
        to_canonical: Option<ScalarFn>,
        from_canonical: Option<ScalarFn>,
    },
}

impl UnitRule {
    /// Affine rule with both directions supplied
    pub fn affine(to_canonical: ScalarFn, from_canonical: ScalarFn) -> Self {
        UnitRule::Affine {
            to_canonical: Some(to_canonical),
            from_canonical: Some(from_canonical),
        }
    }
}

/// A validated conversion between one unit and its canonical unit.
///
/// Variants cannot be built outside this crate; use [`ConversionProvider::linear`],
/// [`ConversionProvider::affine`] or [`ConversionProvider::from_rule`].
#[derive(Debug, Clone, Copy)]
pub enum ConversionProvider {
    #[non_exhaustive]
    Linear { factor: f64 },
    #[non_exhaustive]
    Affine {
        to_canonical: ScalarFn,
        from_canonical: ScalarFn,
    },
}

impl ConversionProvider {
    /// Provider of the canonical unit
    pub const IDENTITY: ConversionProvider = ConversionProvider::Linear { factor: 1.0 };

    /// Linear provider; the factor must be finite and strictly positive
    pub fn linear(factor: f64) -> Result<Self, UnitsError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(UnitsError::BadConversionFactor { unit: None, factor });
        }
        Ok(ConversionProvider::Linear { factor })
    }

    /// Affine provider; both directions are required
    pub fn affine(
        to_canonical: Option<ScalarFn>,
        from_canonical: Option<ScalarFn>,
    ) -> Result<Self, UnitsError> {
        match (to_canonical, from_canonical) {
            (Some(to_canonical), Some(from_canonical)) => Ok(ConversionProvider::Affine {
                to_canonical,
                from_canonical,
            }),
            (None, _) => Err(UnitsError::IncompleteAffineProvider {
                unit: None,
                missing: "to_canonical",
            }),
            (_, None) => Err(UnitsError::IncompleteAffineProvider {
                unit: None,
                missing: "from_canonical",
            }),
        }
    }

    /// Validate a rule on behalf of `unit`
    pub fn from_rule(unit: Unit, rule: UnitRule) -> Result<Self, UnitsError> {
        let provider = match rule {
            UnitRule::Linear(factor) => Self::linear(factor),
            UnitRule::Affine { to_canonical, from_canonical } => {
                Self::affine(to_canonical, from_canonical)
            }
        };
        provider.map_err(|e| e.for_unit(unit))
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, ConversionProvider::Linear { factor, .. } if *factor == 1.0)
    }

    pub fn is_affine(&self) -> bool {
        matches!(self, ConversionProvider::Affine { .. })
    }

    /// Convert a raw value to the canonical unit. NaN and infinities are returned unchanged.
    pub fn to_canonical(&self, raw: f64) -> f64 {
        if !raw.is_finite() {
            return raw;
        }
        match self {
            ConversionProvider::Linear { factor, .. } => raw * factor,
            ConversionProvider::Affine { to_canonical, .. } => to_canonical(raw),
        }
    }

    /// Convert a canonical value to this unit. NaN and infinities are returned unchanged.
    pub fn from_canonical(&self, canonical: f64) -> f64 {
        if !canonical.is_finite() {
            return canonical;
        }
        match self {
            ConversionProvider::Linear { factor, .. } => canonical / factor,
            ConversionProvider::Affine { from_canonical, .. } => from_canonical(canonical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::{Distance, Temperature};

    fn c_to_k(c: f64) -> f64 {
        c + 273.15
    }

    fn k_to_c(k: f64) -> f64 {
        k - 273.15
    }

    #[test]
    fn test_linear_rejects_bad_factors() {
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = ConversionProvider::linear(factor);
            assert!(
                matches!(result, Err(UnitsError::BadConversionFactor { unit: None, .. })),
                "factor {} accepted",
                factor
            );
        }
    }

    #[test]
    fn test_linear_conversion() {
        let foot = ConversionProvider::linear(0.3048).unwrap();
        assert!((foot.to_canonical(10.0) - 3.048).abs() < 1e-12);
        assert!((foot.from_canonical(3.048) - 10.0).abs() < 1e-12);
        assert!(!foot.is_identity());
        assert!(!foot.is_affine());
    }

    #[test]
    fn test_identity() {
        let id = ConversionProvider::IDENTITY;
        assert!(id.is_identity());
        assert_eq!(id.to_canonical(42.5), 42.5);
        assert_eq!(id.from_canonical(-7.25), -7.25);
    }

    #[test]
    fn test_affine_requires_both_directions() {
        assert!(matches!(
            ConversionProvider::affine(None, Some(k_to_c)),
            Err(UnitsError::IncompleteAffineProvider { missing: "to_canonical", .. })
        ));
        assert!(matches!(
            ConversionProvider::affine(Some(c_to_k), None),
            Err(UnitsError::IncompleteAffineProvider { missing: "from_canonical", .. })
        ));

        let celsius = ConversionProvider::affine(Some(c_to_k), Some(k_to_c)).unwrap();
        assert!(celsius.is_affine());
        assert!((celsius.to_canonical(0.0) - 273.15).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_passthrough() {
        let celsius = ConversionProvider::affine(Some(c_to_k), Some(k_to_c)).unwrap();
        let foot = ConversionProvider::linear(0.3048).unwrap();

        for provider in [celsius, foot] {
            assert!(provider.to_canonical(f64::NAN).is_nan());
            assert!(provider.from_canonical(f64::NAN).is_nan());
            assert_eq!(provider.to_canonical(f64::INFINITY), f64::INFINITY);
            assert_eq!(provider.from_canonical(f64::NEG_INFINITY), f64::NEG_INFINITY);
        }
    }

    #[test]
    fn test_from_rule_attaches_unit() {
        let err = ConversionProvider::from_rule(Distance::Foot.into(), UnitRule::Linear(0.0)).unwrap_err();
        assert_eq!(
            err,
            UnitsError::BadConversionFactor { unit: Some(Distance::Foot.into()), factor: 0.0 }
        );

        let err = ConversionProvider::from_rule(
            Temperature::Celsius.into(),
            UnitRule::Affine { to_canonical: Some(c_to_k), from_canonical: None },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            UnitsError::IncompleteAffineProvider { unit: Some(Unit::Temperature(Temperature::Celsius)), .. }
        ));
    }
}
