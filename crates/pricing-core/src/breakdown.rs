//! # Breakdown
//!
//! An ordered list of `(identifier, amount)` lines: the shape in which taxes
//! and discounts are reported.

use crate::error::CoreResult;
use crate::money::{Currency, Money};

/// Ordered `(identifier, amount)` lines.
///
/// Lines come out in the order they went in. [`Breakdown::accumulate`] merges
/// into an existing line with the same identifier, so a bucketed breakdown
/// lists each identifier once, at the position it was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdown {
    lines: Vec<(String, Money)>,
}

impl Breakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line without merging.
    pub fn push(&mut self, identifier: impl Into<String>, amount: Money) {
        self.lines.push((identifier.into(), amount));
    }

    /// Adds `amount` to the line for `identifier`, creating it if needed.
    pub fn accumulate(&mut self, identifier: &str, amount: &Money) -> CoreResult<()> {
        match self.lines.iter_mut().find(|(id, _)| id == identifier) {
            Some((_, total)) => *total = total.try_add(amount)?,
            None => self.lines.push((identifier.to_string(), amount.clone())),
        }
        Ok(())
    }

    /// Folds every line of `other` into this breakdown.
    pub fn merge(&mut self, other: &Breakdown) -> CoreResult<()> {
        for (identifier, amount) in other.iter() {
            self.accumulate(identifier, amount)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Money)> {
        self.lines.iter().map(|(id, amount)| (id.as_str(), amount))
    }

    /// First line with this identifier.
    pub fn get(&self, identifier: &str) -> Option<&Money> {
        self.lines
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, amount)| amount)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|(id, _)| id.as_str())
    }

    /// Sum of all lines; zero in `currency` when empty.
    pub fn total(&self, currency: &Currency) -> CoreResult<Money> {
        Money::try_sum(currency, self.lines.iter().map(|(_, amount)| amount))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<(String, Money)> {
        self.lines
    }
}

impl IntoIterator for Breakdown {
    type Item = (String, Money);
    type IntoIter = std::vec::IntoIter<(String, Money)>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}
