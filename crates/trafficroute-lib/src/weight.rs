use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Traversal cost of an edge.
///
/// Always finite and non-negative; the shortest-path engine relies on this and
/// never checks it again during a search.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);

    /// Validate a raw cost.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value >= 0.0 {
            // Normalise -0.0 so equal weights compare and print the same.
            Ok(Self(value + 0.0))
        } else {
            Err(Error::InvalidWeight { weight: value })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Weight {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Weight::new(value)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_positive() {
        assert_eq!(Weight::new(0.0).unwrap(), Weight::ZERO);
        assert_eq!(Weight::new(2.5).unwrap().get(), 2.5);
        assert_eq!(Weight::new(-0.0).unwrap().get().to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        for value in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Weight::new(value).expect_err("must be rejected");
            assert!(matches!(err, Error::InvalidWeight { .. }));
        }
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Weight::new(1.5).unwrap()).unwrap();
        assert_eq!(json, "1.5");
    }
}
