//! # Value Types
//!
//! Non-money value types used throughout pricing.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Value Types                                     │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Percentage    │   │    DateSpan     │   │     Measure     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  fraction       │   │  months         │   │  Count(dec)     │       │
//! │  │  "18%" = 0.18   │   │  days           │   │  Span(DateSpan) │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Measure is what quantities and units are made of:                     │
//! │    extended = effective × ratio(quantity, unit)                        │
//! │    Count/Count and Span/Span divide; mixing the two is an error.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ParseError};
use crate::money::Money;

/// Days per month when a span mixes months and days.
pub const DAYS_PER_MONTH: u32 = 30;

// =============================================================================
// Percentage
// =============================================================================

/// A rate stored as a fraction: `18%` is kept as `0.18`.
///
/// ## Parsing
/// Only literals with a `%` suffix parse. This is what lets an add-on price
/// literal be tried as a percentage first and fall back to money:
/// `"5%"` is a percentage, `"5"` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Percentage(Decimal);

impl Percentage {
    /// Creates a percentage from a fraction (`0.18` for 18%).
    #[inline]
    pub const fn from_fraction(fraction: Decimal) -> Self {
        Percentage(fraction)
    }

    /// Creates a percentage from a percent figure (`18` for 18%).
    pub fn from_percent(percent: Decimal) -> Self {
        Percentage(percent / Decimal::ONE_HUNDRED)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(Decimal::ZERO)
    }

    /// Checks if the rate is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Converts to money by applying the rate to `reference`.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::{Money, Percentage};
    /// use rust_decimal_macros::dec;
    ///
    /// let gift_wrap: Percentage = "5%".parse().unwrap();
    /// let parent = Money::new(dec!(200), "INR");
    /// assert_eq!(gift_wrap.of(&parent).unwrap(), Money::new(dec!(10), "INR"));
    /// ```
    pub fn of(&self, reference: &Money) -> CoreResult<Money> {
        reference.try_scale(self.0)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.checked_mul(Decimal::ONE_HUNDRED) {
            Some(percent) => write!(f, "{}%", percent.normalize()),
            None => write!(f, "{}", self.0.normalize()),
        }
    }
}

impl FromStr for Percentage {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidPercentage {
            value: s.to_string(),
        };
        let figure = s.trim().strip_suffix('%').ok_or_else(invalid)?;
        let percent = Decimal::from_str(figure.trim()).map_err(|_| invalid())?;
        Ok(Percentage::from_percent(percent))
    }
}

impl TryFrom<String> for Percentage {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Percentage> for String {
    fn from(rate: Percentage) -> Self {
        rate.to_string()
    }
}

// =============================================================================
// Date Span
// =============================================================================

/// A calendar duration in whole months and days.
///
/// Weeks fold into days and years into months, so `"1 year"` and
/// `"12 months"` are the same span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateSpan {
    months: u32,
    days: u32,
}

impl DateSpan {
    /// Creates a span from months and days.
    pub const fn new(months: u32, days: u32) -> Self {
        DateSpan { months, days }
    }

    pub const fn months(months: u32) -> Self {
        DateSpan { months, days: 0 }
    }

    pub const fn days(days: u32) -> Self {
        DateSpan { months: 0, days }
    }

    /// The span between two dates, in whole months plus leftover days.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use pricing_core::DateSpan;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 4, 20).unwrap();
    /// assert_eq!(DateSpan::between(start, end).unwrap(), DateSpan::new(3, 5));
    /// ```
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidDateSpan {
            value: format!("{start}..{end}"),
        };
        if end < start {
            return Err(invalid());
        }

        let mut months = (end.year() - start.year()) * 12 + end.month() as i32
            - start.month() as i32;
        if end.day() < start.day() {
            months -= 1;
        }
        let months = months.max(0) as u32;
        let anchor = start
            .checked_add_months(Months::new(months))
            .ok_or_else(invalid)?;
        let days = (end - anchor).num_days().max(0) as u32;

        Ok(DateSpan { months, days })
    }

    /// Approximate length in days (a month counts as [`DAYS_PER_MONTH`]).
    pub fn total_days(&self) -> CoreResult<u32> {
        self.months
            .checked_mul(DAYS_PER_MONTH)
            .and_then(|days| days.checked_add(self.days))
            .ok_or(CoreError::Overflow {
                operation: "total_days",
            })
    }

    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0
    }

    /// Divides this span by another.
    ///
    /// Pure-month spans divide by months and pure-day spans by days, so
    /// `1 year / 1 month` is exactly 12. Mixed spans fall back to days.
    pub fn ratio(&self, divisor: &DateSpan) -> CoreResult<Decimal> {
        let (numerator, denominator) = if self.days == 0 && divisor.days == 0 {
            (self.months, divisor.months)
        } else if self.months == 0 && divisor.months == 0 {
            (self.days, divisor.days)
        } else {
            (self.total_days()?, divisor.total_days()?)
        };
        if denominator == 0 {
            return Err(CoreError::ZeroUnit);
        }
        Ok(Decimal::from(numerator) / Decimal::from(denominator))
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.months, self.days) {
            (0, days) => write!(f, "{days} days"),
            (months, 0) => write!(f, "{months} months"),
            (months, days) => write!(f, "{months} months {days} days"),
        }
    }
}

/// Parses `"<n> <unit>"` pairs: `"1 year"`, `"3 months 10 days"`, `"2 weeks"`.
impl FromStr for DateSpan {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidDateSpan {
            value: s.to_string(),
        };

        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.is_empty() || tokens.len() % 2 != 0 {
            return Err(invalid());
        }

        let mut span = DateSpan::default();
        for pair in tokens.chunks(2) {
            let count: u32 = pair[0].parse().map_err(|_| invalid())?;
            let (field, factor) = match pair[1].to_ascii_lowercase().as_str() {
                "d" | "day" | "days" => (&mut span.days, 1),
                "w" | "week" | "weeks" => (&mut span.days, 7),
                "mo" | "month" | "months" => (&mut span.months, 1),
                "y" | "year" | "years" => (&mut span.months, 12),
                _ => return Err(invalid()),
            };
            let added = count.checked_mul(factor).ok_or_else(invalid)?;
            *field = field.checked_add(added).ok_or_else(invalid)?;
        }
        Ok(span)
    }
}

// =============================================================================
// Measure
// =============================================================================

/// A quantity or unit: either a plain count or a calendar span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Measure {
    Count(Decimal),
    Span(DateSpan),
}

impl Measure {
    /// The default unit.
    pub const fn one() -> Self {
        Measure::Count(Decimal::ONE)
    }

    /// `quantity / unit`, the factor that turns an effective price into an
    /// extended one.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::{DateSpan, Measure};
    /// use rust_decimal_macros::dec;
    ///
    /// let qty = Measure::Span(DateSpan::months(12));
    /// let unit = Measure::Span(DateSpan::months(1));
    /// assert_eq!(qty.ratio(&unit).unwrap(), dec!(12));
    ///
    /// // A plain count cannot be divided by a span
    /// assert!(Measure::from(3).ratio(&unit).is_err());
    /// ```
    pub fn ratio(&self, unit: &Measure) -> CoreResult<Decimal> {
        match (self, unit) {
            (Measure::Count(qty), Measure::Count(unit)) => {
                if unit.is_zero() {
                    return Err(CoreError::ZeroUnit);
                }
                qty.checked_div(*unit).ok_or(CoreError::ZeroUnit)
            }
            (Measure::Span(qty), Measure::Span(unit)) => qty.ratio(unit),
            (qty, unit) => Err(CoreError::UnitMismatch {
                quantity: qty.to_string(),
                unit: unit.to_string(),
            }),
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Measure::Count(n) if n.is_sign_negative() && !n.is_zero())
    }
}

impl Default for Measure {
    fn default() -> Self {
        Measure::one()
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Count(n) => write!(f, "{n}"),
            Measure::Span(span) => write!(f, "{span}"),
        }
    }
}

impl From<Decimal> for Measure {
    fn from(n: Decimal) -> Self {
        Measure::Count(n)
    }
}

impl From<i32> for Measure {
    fn from(n: i32) -> Self {
        Measure::Count(Decimal::from(n))
    }
}

impl From<i64> for Measure {
    fn from(n: i64) -> Self {
        Measure::Count(Decimal::from(n))
    }
}

impl From<u32> for Measure {
    fn from(n: u32) -> Self {
        Measure::Count(Decimal::from(n))
    }
}

impl From<DateSpan> for Measure {
    fn from(span: DateSpan) -> Self {
        Measure::Span(span)
    }
}

// =============================================================================
// Unit Type / Unit Literal
// =============================================================================

/// How a configured unit or quantity literal is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitType {
    /// Plain numeric divisor.
    #[default]
    #[serde(rename = "int", alias = "number")]
    Int,
    /// Calendar span ("1 month"), for time-based quantities.
    #[serde(rename = "DateSpan", alias = "datespan", alias = "date_span")]
    DateSpan,
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitType::Int => f.write_str("int"),
            UnitType::DateSpan => f.write_str("DateSpan"),
        }
    }
}

/// A unit or quantity as it appears in configuration: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitLiteral {
    Number(Decimal),
    Text(String),
}

impl UnitType {
    /// Interprets a literal according to this unit type.
    ///
    /// `int` accepts numbers and numeric strings; `DateSpan` accepts span
    /// strings such as `"1 month"`.
    pub fn measure(&self, literal: &UnitLiteral) -> Result<Measure, ParseError> {
        let invalid = |value: String| ParseError::InvalidUnit {
            value,
            unit_type: self.to_string(),
        };
        match (self, literal) {
            (UnitType::Int, UnitLiteral::Number(n)) => Ok(Measure::Count(*n)),
            (UnitType::Int, UnitLiteral::Text(text)) => Decimal::from_str(text.trim())
                .map(Measure::Count)
                .map_err(|_| invalid(text.clone())),
            (UnitType::DateSpan, UnitLiteral::Text(text)) => text
                .parse::<DateSpan>()
                .map(Measure::Span)
                .map_err(|_| invalid(text.clone())),
            (UnitType::DateSpan, UnitLiteral::Number(n)) => Err(invalid(n.to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percentage_parse() {
        let rate: Percentage = "18%".parse().unwrap();
        assert_eq!(rate.fraction(), dec!(0.18));
        assert_eq!(rate.to_string(), "18%");

        let rate: Percentage = " 2.5 % ".parse().unwrap();
        assert_eq!(rate.fraction(), dec!(0.025));
    }

    #[test]
    fn test_percentage_requires_suffix() {
        assert!("18".parse::<Percentage>().is_err());
        assert!("100 INR".parse::<Percentage>().is_err());
        assert!("abc%".parse::<Percentage>().is_err());
    }

    #[test]
    fn test_percentage_zero() {
        assert!("0%".parse::<Percentage>().unwrap().is_zero());
        assert!(!Percentage::from_percent(dec!(0.01)).is_zero());
    }

    #[test]
    fn test_date_span_parse() {
        assert_eq!("1 year".parse::<DateSpan>().unwrap(), DateSpan::months(12));
        assert_eq!("2 weeks".parse::<DateSpan>().unwrap(), DateSpan::days(14));
        assert_eq!(
            "3 months 10 days".parse::<DateSpan>().unwrap(),
            DateSpan::new(3, 10)
        );
        assert!("month".parse::<DateSpan>().is_err());
        assert!("3 fortnights".parse::<DateSpan>().is_err());
        assert!("".parse::<DateSpan>().is_err());
    }

    #[test]
    fn test_date_span_parse_overflow() {
        assert!(matches!(
            "400000000 years".parse::<DateSpan>(),
            Err(ParseError::InvalidDateSpan { .. })
        ));
        assert!(matches!(
            "4000000000 days 4000000000 days".parse::<DateSpan>(),
            Err(ParseError::InvalidDateSpan { .. })
        ));
        // the largest count that still fits
        assert_eq!(
            "357913941 years".parse::<DateSpan>().unwrap(),
            DateSpan::months(4_294_967_292)
        );
    }

    #[test]
    fn test_total_days_overflow() {
        assert_eq!(DateSpan::new(2, 5).total_days().unwrap(), 65);

        let span = DateSpan::new(u32::MAX, 1);
        assert!(matches!(span.total_days(), Err(CoreError::Overflow { .. })));
        assert!(matches!(
            span.ratio(&DateSpan::days(1)),
            Err(CoreError::Overflow { .. })
        ));
    }

    #[test]
    fn test_date_span_between() {
        let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(
            DateSpan::between(d(2024, 1, 31), d(2024, 2, 28)).unwrap(),
            DateSpan::days(28)
        );
        assert_eq!(
            DateSpan::between(d(2023, 6, 1), d(2024, 6, 1)).unwrap(),
            DateSpan::months(12)
        );
        assert!(DateSpan::between(d(2024, 6, 1), d(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_span_ratio() {
        let year = DateSpan::months(12);
        let month = DateSpan::months(1);
        assert_eq!(year.ratio(&month).unwrap(), dec!(12));

        let fortnight = DateSpan::days(14);
        assert_eq!(fortnight.ratio(&DateSpan::days(7)).unwrap(), dec!(2));

        // mixed spans compare in days
        let span = DateSpan::new(1, 15);
        assert_eq!(span.ratio(&DateSpan::days(15)).unwrap(), dec!(3));

        assert!(matches!(
            month.ratio(&DateSpan::default()),
            Err(CoreError::ZeroUnit)
        ));
    }

    #[test]
    fn test_measure_ratio() {
        assert_eq!(Measure::from(2).ratio(&Measure::one()).unwrap(), dec!(2));
        assert_eq!(Measure::from(3).ratio(&Measure::from(2)).unwrap(), dec!(1.5));
        assert!(matches!(
            Measure::from(3).ratio(&Measure::from(0)),
            Err(CoreError::ZeroUnit)
        ));
        assert!(matches!(
            Measure::Span(DateSpan::months(1)).ratio(&Measure::one()),
            Err(CoreError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn test_unit_type_measure() {
        let month = UnitLiteral::Text("1 month".to_string());
        assert_eq!(
            UnitType::DateSpan.measure(&month).unwrap(),
            Measure::Span(DateSpan::months(1))
        );
        assert!(UnitType::Int.measure(&month).is_err());
        assert_eq!(
            UnitType::Int.measure(&UnitLiteral::Number(dec!(12))).unwrap(),
            Measure::from(12)
        );
        assert!(UnitType::DateSpan
            .measure(&UnitLiteral::Number(dec!(1)))
            .is_err());
    }

    #[test]
    fn test_unit_type_serde_names() {
        let parsed: UnitType = serde_json::from_str("\"DateSpan\"").unwrap();
        assert_eq!(parsed, UnitType::DateSpan);
        let parsed: UnitType = serde_json::from_str("\"int\"").unwrap();
        assert_eq!(parsed, UnitType::Int);
    }
}
