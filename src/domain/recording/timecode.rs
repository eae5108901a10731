//! Timecode value object for recording and playback positions

use std::fmt;
use std::str::FromStr;

use crate::domain::error::TimecodeParseError;

/// A position or duration in a recording, stored as milliseconds.
///
/// Renders as `minutes:seconds` with seconds zero-padded to two digits.
/// Minutes are not padded or capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode {
    milliseconds: u64,
}

impl Timecode {
    /// Create a timecode from milliseconds
    pub const fn from_millis(milliseconds: u64) -> Self {
        Self { milliseconds }
    }

    /// Create a timecode from whole seconds
    pub const fn from_secs(seconds: u64) -> Self {
        Self {
            milliseconds: seconds * 1000,
        }
    }

    /// The zero timecode
    pub const fn zero() -> Self {
        Self { milliseconds: 0 }
    }

    /// Get the value in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Get the value in whole seconds (truncated)
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    /// Clamp this timecode to an upper bound
    pub fn clamp_to(self, max: Timecode) -> Timecode {
        if self > max {
            max
        } else {
            self
        }
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_seconds = self.milliseconds / 1000;
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        write!(f, "{}:{:02}", minutes, seconds)
    }
}

impl FromStr for Timecode {
    type Err = TimecodeParseError;

    /// Parse either `minutes:seconds` (e.g., "1:05") or a raw millisecond
    /// count (e.g., "65000").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimecodeParseError {
                input: s.to_string(),
            });
        }

        match s.split_once(':') {
            Some((minutes_str, seconds_str)) => {
                let err = || TimecodeParseError {
                    input: s.to_string(),
                };

                if seconds_str.is_empty() || seconds_str.len() > 2 {
                    return Err(err());
                }
                let minutes: u64 = minutes_str.parse().map_err(|_| err())?;
                let seconds: u64 = seconds_str.parse().map_err(|_| err())?;
                if seconds >= 60 {
                    return Err(err());
                }

                Ok(Self::from_secs(minutes * 60 + seconds))
            }
            None => {
                let milliseconds: u64 = s.parse().map_err(|_| TimecodeParseError {
                    input: s.to_string(),
                })?;
                Ok(Self::from_millis(milliseconds))
            }
        }
    }
}
