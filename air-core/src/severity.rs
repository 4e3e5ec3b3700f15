//! Faixas de severidade

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Faixa de severidade de um parâmetro.
///
/// Ordem total: `Safe < Moderate < Hazard`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityBand {
    #[default]
    Safe,
    Moderate,
    Hazard,
}

impl SeverityBand {
    /// Todas as faixas em ordem crescente
    pub const ALL: [SeverityBand; 3] = [SeverityBand::Safe, SeverityBand::Moderate, SeverityBand::Hazard];

    /// Nome canônico (`SAFE`, `MODERATE`, `HAZARD`)
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityBand::Safe => "SAFE",
            SeverityBand::Moderate => "MODERATE",
            SeverityBand::Hazard => "HAZARD",
        }
    }

    pub fn is_safe(&self) -> bool {
        *self == SeverityBand::Safe
    }

    pub fn is_hazard(&self) -> bool {
        *self == SeverityBand::Hazard
    }

    /// Esta faixa é pelo menos tão severa quanto `min`?
    pub fn at_least(&self, min: SeverityBand) -> bool {
        *self >= min
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityBand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SAFE" => Ok(SeverityBand::Safe),
            "MODERATE" | "MOD" => Ok(SeverityBand::Moderate),
            "HAZARD" | "HAZARDOUS" | "HAZ" => Ok(SeverityBand::Hazard),
            _ => Err(CoreError::UnknownBand(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(SeverityBand::Safe < SeverityBand::Moderate);
        assert!(SeverityBand::Moderate < SeverityBand::Hazard);
        assert_eq!(SeverityBand::ALL.iter().max(), Some(&SeverityBand::Hazard));
    }

    #[test]
    fn test_at_least() {
        assert!(SeverityBand::Hazard.at_least(SeverityBand::Moderate));
        assert!(SeverityBand::Moderate.at_least(SeverityBand::Moderate));
        assert!(!SeverityBand::Safe.at_least(SeverityBand::Moderate));
        assert!(SeverityBand::Safe.at_least(SeverityBand::Safe));
    }

    #[test]
    fn test_display_and_parse() {
        for band in SeverityBand::ALL {
            assert_eq!(band.to_string().parse::<SeverityBand>().unwrap(), band);
        }
        assert_eq!("hazardous".parse::<SeverityBand>().unwrap(), SeverityBand::Hazard);
        assert!("critical".parse::<SeverityBand>().is_err());
    }

    #[test]
    fn test_default_is_safe() {
        assert_eq!(SeverityBand::default(), SeverityBand::Safe);
    }

    #[test]
    fn test_serde_uppercase() {
        let json = serde_json::to_string(&SeverityBand::Moderate).unwrap();
        assert_eq!(json, "\"MODERATE\"");
    }
}
