//! Recording quality preset value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidQualityError;

/// All available quality presets
pub const ALL_PRESETS: &[QualityPreset] = &[QualityPreset::High, QualityPreset::Low];

/// Capture quality presets.
///
/// Both presets record mono 16-bit PCM; they differ only in sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QualityPreset {
    #[default]
    High,
    Low,
}

impl QualityPreset {
    /// Get the target sample rate in Hz
    pub const fn sample_rate(&self) -> u32 {
        match self {
            Self::High => 44_100,
            Self::Low => 16_000,
        }
    }

    /// Bits per sample for the encoded WAV
    pub const fn bits_per_sample(&self) -> u16 {
        16
    }

    /// Get the string identifier for this preset
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl FromStr for QualityPreset {
    type Err = InvalidQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            _ => Err(InvalidQualityError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_presets() {
        assert_eq!("high".parse::<QualityPreset>().unwrap(), QualityPreset::High);
        assert_eq!("low".parse::<QualityPreset>().unwrap(), QualityPreset::Low);
    }

    #[test]
    fn parses_any_case() {
        assert_eq!("HIGH".parse::<QualityPreset>().unwrap(), QualityPreset::High);
        assert_eq!("Low".parse::<QualityPreset>().unwrap(), QualityPreset::Low);
    }

    #[test]
    fn parses_padded_input() {
        assert_eq!("  low  ".parse::<QualityPreset>().unwrap(), QualityPreset::Low);
    }

    #[test]
    fn rejects_unknown_preset() {
        assert!("medium".parse::<QualityPreset>().is_err());
        assert!("".parse::<QualityPreset>().is_err());
    }

    #[test]
    fn default_is_high() {
        assert_eq!(QualityPreset::default(), QualityPreset::High);
    }

    #[test]
    fn sample_rates() {
        assert_eq!(QualityPreset::High.sample_rate(), 44_100);
        assert_eq!(QualityPreset::Low.sample_rate(), 16_000);
        assert_eq!(QualityPreset::High.bits_per_sample(), 16);
    }

    #[test]
    fn display() {
        assert_eq!(QualityPreset::High.to_string(), "high");
        assert_eq!(QualityPreset::Low.to_string(), "low");
    }
}
