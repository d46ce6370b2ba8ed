//! Exact monetary amounts.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

const CENTS_PER_UNIT: u64 = 100;

/// Non-negative amount in the smallest currency unit (cents).
///
/// Parsed from decimal text with at most two fractional digits and displayed
/// with exactly two, e.g. `"49.99"`, `"350.00"`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn from_units(units: u64) -> Self {
        Self(units * CENTS_PER_UNIT)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_mul(self, qty: u32) -> Option<Money> {
        self.0.checked_mul(u64::from(qty)).map(Money)
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    pub fn saturating_mul(self, qty: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(qty)))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / CENTS_PER_UNIT, self.0 % CENTS_PER_UNIT)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(DomainError::validation("price must not be negative"));
        }

        let (units, frac) = match s.split_once('.') {
            Some((u, f)) => (u, f),
            None => (s, ""),
        };
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if units.is_empty() || !digits_only(units) || !digits_only(frac) || frac.len() > 2 {
            return Err(DomainError::validation(format!("invalid price: {s:?}")));
        }

        let units: u64 = units
            .parse()
            .map_err(|_| DomainError::validation(format!("invalid price: {s:?}")))?;
        let frac_cents = match frac.len() {
            0 => 0,
            1 => u64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => u64::from(frac.as_bytes()[0] - b'0') * 10 + u64::from(frac.as_bytes()[1] - b'0'),
        };

        units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(frac_cents))
            .map(Money)
            .ok_or_else(|| DomainError::validation(format!("price out of range: {s:?}")))
    }
}
