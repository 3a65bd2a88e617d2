/// Listing prices in minor units
use crate::error::{MarketError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of fractional digits in one major unit (ETH → wei)
pub const DECIMALS: usize = 18;

const UNIT: u128 = 10u128.pow(DECIMALS as u32);

/// Price in minor units (wei)
///
/// Serialized as a decimal string so values above 2^53 survive JSON.
/// `Display` renders the major-unit amount the way wallets do (`1.5`, `2.0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u128);

impl Price {
    /// Zero price
    pub const ZERO: Self = Self(0);

    /// Create a price from minor units
    pub const fn from_minor(minor_units: u128) -> Self {
        Self(minor_units)
    }

    /// Amount in minor units
    pub const fn minor_units(self) -> u128 {
        self.0
    }

    /// Check if the price is zero
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal amount of major units (`"1.5"` → 1.5 × 10¹⁸ minor units)
    ///
    /// # Errors
    /// `MarketError::InvalidInput` for empty, signed or non-numeric input, more
    /// than 18 fractional digits, or amounts that overflow.
    pub fn parse_major(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(MarketError::invalid_input("price is empty"));
        }
        if input.starts_with('-') {
            return Err(MarketError::invalid_input(format!(
                "price must be positive: {input}"
            )));
        }

        let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));
        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction)
        {
            return Err(MarketError::invalid_input(format!(
                "price is not a number: {input}"
            )));
        }
        if fraction.len() > DECIMALS {
            return Err(MarketError::invalid_input(format!(
                "price has more than {} decimal places: {input}",
                DECIMALS
            )));
        }

        let overflow = || MarketError::invalid_input(format!("price is too large: {input}"));

        let whole_units: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let fraction_units: u128 = if fraction.is_empty() {
            0
        } else {
            format!("{:0<width$}", fraction, width = DECIMALS)
                .parse()
                .map_err(|_| overflow())?
        };

        whole_units
            .checked_mul(UNIT)
            .and_then(|units| units.checked_add(fraction_units))
            .map(Self)
            .ok_or_else(overflow)
    }

    /// Parse a resale price entered by the user
    ///
    /// Same as [`Price::parse_major`] but also rejects zero, since a listing
    /// must cost something.
    pub fn parse_listing(input: &str) -> Result<Self> {
        let price = Self::parse_major(input)?;
        if price.is_zero() {
            return Err(MarketError::invalid_input(
                "price must be greater than zero",
            ));
        }
        Ok(price)
    }

    /// Parse a decimal string of minor units (`"1500000000000000000"`)
    pub fn parse_minor(input: &str) -> Result<Self> {
        input
            .trim()
            .parse::<u128>()
            .map(Self)
            .map_err(|_| MarketError::invalid_input(format!("invalid minor-unit amount: {input}")))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNIT;
        let fraction = self.0 % UNIT;
        if fraction == 0 {
            return write!(f, "{whole}.0");
        }
        let digits = format!("{:0>width$}", fraction, width = DECIMALS);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self::parse_minor(&text).map_err(serde::de::Error::custom),
            Raw::Number(n) => Ok(Self(u128::from(n))),
        }
    }
}
