// src/transform/date.rs

use chrono::NaiveDate;
use thiserror::Error;

/// Year that month index 0 (January) falls in.
pub const BASE_YEAR: i32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("month index '{0}' is not an integer")]
    NotAnInteger(String),
    #[error("month index {0} is negative")]
    Negative(i64),
    #[error("month index {0} is outside the supported calendar range")]
    OutOfRange(i64),
}

/// Zero-based count of months since January of the base year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthIndex(u32);

impl MonthIndex {
    pub fn new(index: i64) -> Result<Self, DateError> {
        if index < 0 {
            return Err(DateError::Negative(index));
        }
        u32::try_from(index)
            .map(MonthIndex)
            .map_err(|_| DateError::OutOfRange(index))
    }

    /// Parse a raw CSV field; surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, DateError> {
        let index: i64 = raw
            .trim()
            .parse()
            .map_err(|_| DateError::NotAnInteger(raw.to_string()))?;
        Self::new(index)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Calendar label of this month, `YYYY-MM`.
    pub fn label(self, base_year: i32) -> Result<String, DateError> {
        month_label(i64::from(self.0), base_year)
    }
}

/// Convert a month index into a `YYYY-MM` string anchored at `base_year`.
///
/// Index 0 is January of `base_year`, index 12 is January of the year after.
pub fn month_label(index: i64, base_year: i32) -> Result<String, DateError> {
    if index < 0 {
        return Err(DateError::Negative(index));
    }
    let year = i32::try_from(index / 12)
        .ok()
        .and_then(|years| base_year.checked_add(years))
        .ok_or(DateError::OutOfRange(index))?;
    let month = (index % 12) as u32 + 1;

    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%Y-%m").to_string())
        .ok_or(DateError::OutOfRange(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_zero_is_january_of_base_year() {
        assert_eq!(month_label(0, BASE_YEAR).unwrap(), "2000-01");
        assert_eq!(month_label(11, BASE_YEAR).unwrap(), "2000-12");
        assert_eq!(month_label(12, BASE_YEAR).unwrap(), "2001-01");
        assert_eq!(month_label(205, BASE_YEAR).unwrap(), "2017-02");
    }

    #[test]
    fn base_year_is_configurable() {
        assert_eq!(month_label(0, 1995).unwrap(), "1995-01");
        assert_eq!(month_label(25, 2010).unwrap(), "2012-02");
    }

    #[test]
    fn negative_and_huge_indices_are_rejected() {
        assert_eq!(month_label(-1, BASE_YEAR), Err(DateError::Negative(-1)));
        assert_eq!(
            month_label(i64::MAX, BASE_YEAR),
            Err(DateError::OutOfRange(i64::MAX))
        );
    }

    #[test]
    fn parse_trims_and_validates() {
        assert_eq!(MonthIndex::parse(" 14 ").unwrap().get(), 14);
        assert_eq!(MonthIndex::parse("-3"), Err(DateError::Negative(-3)));
        assert_eq!(
            MonthIndex::parse("Jan"),
            Err(DateError::NotAnInteger("Jan".into()))
        );
        assert!(MonthIndex::parse("1.5").is_err());
    }
}
