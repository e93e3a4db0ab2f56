//! Tenor value type for index periods.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
    Years,
}

/// A period length such as `6M` or `2W`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenor {
    pub length: u32,
    pub unit: TimeUnit,
}

impl Tenor {
    pub fn new(length: u32, unit: TimeUnit) -> Self {
        Tenor { length, unit }
    }

    /// Fold whole-year month counts into years and whole-week day counts
    /// into weeks, so `12M` and `1Y` compare equal after normalization.
    pub fn normalized(self) -> Self {
        match self.unit {
            TimeUnit::Months if self.length > 0 && self.length % 12 == 0 => Tenor {
                length: self.length / 12,
                unit: TimeUnit::Years,
            },
            TimeUnit::Days if self.length > 0 && self.length % 7 == 0 => Tenor {
                length: self.length / 7,
                unit: TimeUnit::Weeks,
            },
            _ => self,
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.unit {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        };
        write!(f, "{}{}", self.length, letter)
    }
}

impl FromStr for Tenor {
    type Err = ParseError;

    /// Parse `<length><unit>` where the unit letter is one of `D`, `W`, `M`,
    /// `Y` in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(ParseError {
                message: format!("expected a tenor like '6M', got '{s}'"),
                position: 0,
            });
        }
        let length: u32 = digits.parse().map_err(|_| ParseError {
            message: format!("tenor length '{digits}' is out of range"),
            position: 0,
        })?;
        let mut rest = s[digits.len()..].chars();
        let unit = match rest.next().map(|c| c.to_ascii_uppercase()) {
            Some('D') => TimeUnit::Days,
            Some('W') => TimeUnit::Weeks,
            Some('M') => TimeUnit::Months,
            Some('Y') => TimeUnit::Years,
            Some(other) => {
                return Err(ParseError {
                    message: format!("unknown time unit '{other}'"),
                    position: digits.len(),
                });
            }
            None => {
                return Err(ParseError {
                    message: "missing time unit after tenor length".to_string(),
                    position: digits.len(),
                });
            }
        };
        if rest.next().is_some() {
            return Err(ParseError {
                message: format!("trailing characters after time unit in '{s}'"),
                position: digits.len() + 1,
            });
        }
        Ok(Tenor { length, unit })
    }
}
