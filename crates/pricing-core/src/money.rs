//! # Money Module
//!
//! Provides the currency-tagged `Money` type used by every price in the crate.
//!
//! ## Why Currency-Tagged Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TWO WAYS TO GET A TOTAL WRONG                                          │
//! │                                                                         │
//! │  1. Floating point:                                                     │
//! │       0.1 + 0.2 = 0.30000000000000004                                   │
//! │     → amounts are rust_decimal::Decimal, never f64                      │
//! │                                                                         │
//! │  2. Silent currency mixing:                                             │
//! │       100 INR + 10 USD = 110 ???                                        │
//! │     → every amount carries its currency; combining two different        │
//! │       currencies returns CoreError::CurrencyMismatch                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let price = Money::new(dec!(100), "INR");
//! let discount: Money = "10 INR".parse().unwrap();
//!
//! let effective = price.try_sub(&discount).unwrap();
//! assert_eq!(effective.amount(), dec!(90));
//!
//! // Mixing currencies is an error, not a silent conversion
//! assert!(price.try_add(&Money::new(dec!(1), "USD")).is_err());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ParseError};

// =============================================================================
// Currency
// =============================================================================

/// An upper-cased currency code ("INR", "USD", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export)]
pub struct Currency(String);

impl Currency {
    /// Creates a currency code, rejecting anything that is not 3 ASCII letters.
    pub fn new(code: &str) -> Result<Self, ParseError> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ParseError::InvalidCurrency {
                value: code.to_string(),
            });
        }
        Ok(Currency(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Currency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::new(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

/// Convenience for literals in code and tests.
///
/// Unlike [`Currency::new`] this does not validate the length; it only
/// upper-cases. Configuration input always goes through `new`.
impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Currency(code.trim().to_ascii_uppercase())
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A decimal amount in a single currency.
///
/// ## Design Decisions
/// - **Decimal amount**: exact base-10 arithmetic, never rounded
/// - **Signed**: discounts and refunds may produce negative intermediates
/// - **Fallible arithmetic**: `try_add` / `try_sub` / `try_scale` instead of
///   operators. Two currencies cannot be combined, and overflow comes back
///   as `CoreError::Overflow`
///
/// ## Where Money Flows
/// ```text
/// base_price ──► − discounts ──► effective_price ──► × qty/unit ──► extended_price
///                                      │                                  │
///                                      ▼                                  ▼
///                        percentage add-on prices              × tax rate ──► taxes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money {
    #[ts(as = "String")]
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a Money value from a decimal amount and a currency.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Money::new(dec!(10.99), "usd");
    /// assert_eq!(price.currency().code(), "USD");
    /// ```
    pub fn new(amount: Decimal, currency: impl Into<Currency>) -> Self {
        Money {
            amount,
            currency: currency.into(),
        }
    }

    /// Returns zero in the given currency.
    pub fn zero(currency: impl Into<Currency>) -> Self {
        Money::new(Decimal::ZERO, currency)
    }

    /// Returns the decimal amount.
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    #[inline]
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Fails with `CurrencyMismatch` unless `other` shares this currency.
    pub fn ensure_same_currency(&self, other: &Money) -> CoreResult<()> {
        if self.currency != other.currency {
            return Err(CoreError::CurrencyMismatch {
                left: self.currency.to_string(),
                right: other.currency.to_string(),
            });
        }
        Ok(())
    }

    /// Adds two amounts of the same currency.
    pub fn try_add(&self, other: &Money) -> CoreResult<Money> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(CoreError::Overflow { operation: "add" })?;
        Ok(Money::new(amount, self.currency.clone()))
    }

    /// Subtracts `other` from this amount; both must share a currency.
    pub fn try_sub(&self, other: &Money) -> CoreResult<Money> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(CoreError::Overflow {
                operation: "subtract",
            })?;
        Ok(Money::new(amount, self.currency.clone()))
    }

    /// Multiplies the amount by a scalar, keeping the currency.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let unit_price = Money::new(dec!(90), "INR");
    /// assert_eq!(unit_price.try_scale(dec!(2)).unwrap().amount(), dec!(180));
    /// ```
    pub fn try_scale(&self, factor: Decimal) -> CoreResult<Money> {
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or(CoreError::Overflow {
                operation: "multiply",
            })?;
        Ok(Money::new(amount, self.currency.clone()))
    }

    /// Sums amounts into `currency`, starting from zero.
    ///
    /// An empty iterator yields zero in `currency`, so empty collections
    /// still produce a typed total.
    pub fn try_sum<'a, I>(currency: &Currency, amounts: I) -> CoreResult<Money>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(currency.clone()), |acc, m| acc.try_add(m))
    }

    /// Parses `"100"`, `"100 USD"` or `"USD 100"`.
    ///
    /// A bare number takes `default_currency`. Thousands separators (`,`)
    /// are ignored.
    pub fn parse_or(raw: &str, default_currency: &Currency) -> Result<Money, ParseError> {
        parse_money(raw, Some(default_currency))
    }
}

fn parse_money(raw: &str, default_currency: Option<&Currency>) -> Result<Money, ParseError> {
    let invalid = |reason: &str| ParseError::InvalidMoney {
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let parse_amount = |token: &str| Decimal::from_str(&token.replace(',', ""));

    let tokens: Vec<&str> = raw.split_whitespace().collect();
    match tokens.as_slice() {
        [amount] => {
            let amount = parse_amount(amount).map_err(|e| invalid(&e.to_string()))?;
            let currency = default_currency.ok_or_else(|| invalid("missing currency code"))?;
            Ok(Money::new(amount, currency.clone()))
        }
        [first, second] => {
            let (amount, code) = match parse_amount(first) {
                Ok(amount) => (amount, second),
                Err(_) => (
                    parse_amount(second).map_err(|e| invalid(&e.to_string()))?,
                    first,
                ),
            };
            let currency = Currency::new(code).map_err(|_| invalid("invalid currency code"))?;
            Ok(Money::new(amount, currency))
        }
        [] => Err(invalid("empty value")),
        _ => Err(invalid("expected an amount and a currency code")),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount followed by the currency code, e.g. `212.40 INR`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Parses a currency-tagged amount. Bare numbers are rejected; use
/// [`Money::parse_or`] when a default currency is known.
impl FromStr for Money {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_money(s, None)
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
    fn test_parse_forms() {
        let inr = Currency::from("INR");
        assert_eq!(
            Money::parse_or("100", &inr).unwrap(),
            Money::new(dec!(100), "INR")
        );
        assert_eq!(
            "100.50 usd".parse::<Money>().unwrap(),
            Money::new(dec!(100.50), "USD")
        );
        assert_eq!(
            "EUR 1,250".parse::<Money>().unwrap(),
            Money::new(dec!(1250), "EUR")
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("100".parse::<Money>().is_err());
        assert!("lots".parse::<Money>().is_err());
        assert!("10 20 30".parse::<Money>().is_err());
        assert!(Money::parse_or("ten", &Currency::from("INR")).is_err());
        assert!("100 DOLLARS".parse::<Money>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec!(212.40), "INR").to_string(), "212.40 INR");
        assert_eq!(Money::new(dec!(-5.5), "USD").to_string(), "-5.5 USD");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10.00), "INR");
        let b = Money::new(dec!(5.00), "INR");

        assert_eq!(a.try_add(&b).unwrap().amount(), dec!(15));
        assert_eq!(a.try_sub(&b).unwrap().amount(), dec!(5));
        assert_eq!(a.try_scale(dec!(3)).unwrap().amount(), dec!(30));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = Money::new(Decimal::MAX, "INR");
        let one = Money::new(dec!(1), "INR");

        assert!(matches!(huge.try_add(&one), Err(CoreError::Overflow { .. })));
        assert!(matches!(
            Money::new(Decimal::MIN, "INR").try_sub(&one),
            Err(CoreError::Overflow { .. })
        ));
        assert!(matches!(huge.try_scale(dec!(2)), Err(CoreError::Overflow { .. })));
    }

    #[test]
    fn test_currency_mismatch() {
        let inr = Money::new(dec!(10), "INR");
        let usd = Money::new(dec!(10), "USD");

        let err = inr.try_add(&usd).unwrap_err();
        assert!(matches!(err, CoreError::CurrencyMismatch { .. }));
        assert!(inr.try_sub(&usd).is_err());
        assert_ne!(inr, usd);
    }

    #[test]
    fn test_sum_of_nothing_is_typed_zero() {
        let total = Money::try_sum(&Currency::from("INR"), []).unwrap();
        assert!(total.is_zero());
        assert_eq!(total.currency().code(), "INR");
    }

    #[test]
    fn test_currency_validation() {
        assert!(Currency::new("inr").is_ok());
        assert!(Currency::new("RUPEES").is_err());
        assert!(Currency::new("U$D").is_err());
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::new(dec!(-1), "INR").is_negative());
        assert!(!Money::zero("INR").is_negative());
        assert!(Money::zero("INR").is_zero());
    }
}
