//! Market tenors such as `6M`, `1Y` or `10Y`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days
    Days,
    /// Weeks of seven days
    Weeks,
    /// Calendar months
    Months,
    /// Calendar years
    Years,
}

impl TenorUnit {
    fn suffix(self) -> char {
        match self {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        }
    }
}

/// A period measured from a start date, e.g. the `5Y` point of a CDS curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenor {
    count: u32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor.
    #[must_use]
    pub fn new(count: u32, unit: TenorUnit) -> Self {
        Self { count, unit }
    }

    /// Tenor of `n` years.
    #[must_use]
    pub fn years(n: u32) -> Self {
        Self::new(n, TenorUnit::Years)
    }

    /// Tenor of `n` months.
    #[must_use]
    pub fn months(n: u32) -> Self {
        Self::new(n, TenorUnit::Months)
    }

    /// Parses strings like `3M`, `5y` or `2W`.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let text = s.trim();
        let Some(last) = text.chars().last() else {
            return Err(CoreError::invalid_tenor(s, "empty tenor"));
        };
        let unit = match last.to_ascii_uppercase() {
            'D' => TenorUnit::Days,
            'W' => TenorUnit::Weeks,
            'M' => TenorUnit::Months,
            'Y' => TenorUnit::Years,
            other => return Err(CoreError::invalid_tenor(s, format!("unknown unit '{other}'"))),
        };
        let count = text[..text.len() - last.len_utf8()]
            .parse::<u32>()
            .map_err(|e| CoreError::invalid_tenor(s, e.to_string()))?;
        if count == 0 {
            return Err(CoreError::invalid_tenor(s, "tenor must be positive"));
        }
        Ok(Self { count, unit })
    }

    /// Number of units.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Tenor unit.
    #[must_use]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Moves `date` forward by this tenor (unadjusted).
    pub fn advance(&self, date: Date) -> CoreResult<Date> {
        let count = i32::try_from(self.count)
            .map_err(|_| CoreError::invalid_tenor(self.to_string(), "count overflows"))?;
        match self.unit {
            TenorUnit::Days => Ok(date.add_days(i64::from(count))),
            TenorUnit::Weeks => Ok(date.add_days(7 * i64::from(count))),
            TenorUnit::Months => date.add_months(count),
            TenorUnit::Years => date.add_years(count),
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Tenor::parse("5Y").unwrap(), Tenor::years(5));
        assert_eq!(Tenor::parse("6m").unwrap(), Tenor::months(6));
        assert_eq!(Tenor::parse(" 2W ").unwrap(), Tenor::new(2, TenorUnit::Weeks));
        assert_eq!(Tenor::parse("30D").unwrap().unit(), TenorUnit::Days);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Tenor::parse("").is_err());
        assert!(Tenor::parse("5Q").is_err());
        assert!(Tenor::parse("Y").is_err());
        assert!(Tenor::parse("0Y").is_err());
        assert!(Tenor::parse("-1Y").is_err());
    }

    #[test]
    fn test_advance() {
        let start = Date::from_ymd(2025, 3, 20).unwrap();
        assert_eq!(Tenor::years(5).advance(start).unwrap(), Date::from_ymd(2030, 3, 20).unwrap());
        assert_eq!(Tenor::months(6).advance(start).unwrap(), Date::from_ymd(2025, 9, 20).unwrap());
        assert_eq!(
            Tenor::new(1, TenorUnit::Weeks).advance(start).unwrap(),
            Date::from_ymd(2025, 3, 27).unwrap()
        );
    }

    #[test]
    fn test_display_roundtrip() {
        let tenor = Tenor::parse("10y").unwrap();
        assert_eq!(tenor.to_string(), "10Y");
        assert_eq!(Tenor::parse(&tenor.to_string()).unwrap(), tenor);
    }
}
