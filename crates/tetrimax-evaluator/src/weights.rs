use serde::{Deserialize, Serialize};

/// Coefficients of the linear evaluation function.
///
/// Negative weights penalize a feature, positive ones reward it. The CLI loads
/// alternative sets from JSON, e.g.
///
/// ```json
/// { "height": -0.51, "lines": 0.76, "holes": -0.36, "bumpiness": -0.18 }
/// ```
///
/// Missing fields fall back to their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorWeights {
    pub height: f64,
    pub lines: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl Default for EvaluatorWeights {
    fn default() -> Self {
        Self {
            height: -0.51,
            lines: 0.76,
            holes: -0.36,
            bumpiness: -0.18,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum WeightsError {
    #[display("weight '{name}' must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

impl EvaluatorWeights {
    /// Rejects weight sets that would make scores incomparable.
    pub fn validate(&self) -> Result<(), WeightsError> {
        let named = [
            ("height", self.height),
            ("lines", self.lines),
            ("holes", self.holes),
            ("bumpiness", self.bumpiness),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(WeightsError::NonFinite { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = EvaluatorWeights::default();
        assert!(weights.height < 0.0 && weights.holes < 0.0 && weights.bumpiness < 0.0);
        assert!(weights.lines > 0.0);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let weights: EvaluatorWeights = serde_json::from_str(r#"{ "holes": -1.5 }"#).unwrap();
        assert!((weights.holes + 1.5).abs() < f64::EPSILON);
        assert!((weights.height - EvaluatorWeights::default().height).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_str::<EvaluatorWeights>(r#"{ "wells": 1.0 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let weights = EvaluatorWeights {
            bumpiness: f64::NAN,
            ..EvaluatorWeights::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(WeightsError::NonFinite {
                name: "bumpiness",
                ..
            })
        ));
    }
}
