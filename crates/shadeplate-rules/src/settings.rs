//! Engine tuning knobs
//!
//! Both values default to the behavior the rule format was designed around;
//! changing them changes which colors a stored rule reproduces.

use serde::{Deserialize, Serialize};
use shadeplate_color::gamut::CHROMA_ENVELOPE;

use crate::error::{RuleError, RuleResult};

/// Base chroma at or below which a captured rule stores absolute chroma
pub const ACHROMATIC_THRESHOLD: f64 = 0.01;

/// Settings shared by rule capture, rule application and anchor shifts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineSettings {
    /// Base chroma treated as achromatic when capturing rules
    pub achromatic_threshold: f64,
    /// Scale of the `L * (1 - L) * envelope` chroma pre-clamp
    pub chroma_envelope: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            achromatic_threshold: ACHROMATIC_THRESHOLD,
            chroma_envelope: CHROMA_ENVELOPE,
        }
    }
}

impl EngineSettings {
    /// Range-check every field
    pub fn validate(&self) -> RuleResult<()> {
        let t = self.achromatic_threshold;
        if !t.is_finite() || !(0.0..=0.5).contains(&t) {
            return Err(RuleError::InvalidSetting {
                name: "achromaticThreshold",
                reason: format!("value {} is outside range [0, 0.5]", t),
            });
        }

        let e = self.chroma_envelope;
        if !e.is_finite() || e <= 0.0 {
            return Err(RuleError::InvalidSetting {
                name: "chromaEnvelope",
                reason: format!("value {} must be a positive number", e),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let settings = EngineSettings::default();
        assert_eq!(settings.achromatic_threshold, 0.01);
        assert_eq!(settings.chroma_envelope, 0.4);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let bad = EngineSettings {
            achromatic_threshold: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(RuleError::InvalidSetting { name: "achromaticThreshold", .. })
        ));

        let bad = EngineSettings {
            chroma_envelope: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(RuleError::InvalidSetting { name: "chromaEnvelope", .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: EngineSettings = serde_json::from_str(r#"{"chromaEnvelope": 0.5}"#).unwrap();
        assert_eq!(settings.chroma_envelope, 0.5);
        assert_eq!(settings.achromatic_threshold, ACHROMATIC_THRESHOLD);
    }
}
