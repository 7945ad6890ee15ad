use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

const SCALE: u64 = 1_000;
const FRACTION_DIGITS: usize = 3;

/// Non-negative amount represented as **integer thousandths**.
///
/// Sums stay exact (`0.1 + 0.2` is `0.3`), which matters because merged
/// quantities are written back as text.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// let amount: Amount = "1,5".parse().unwrap();
/// assert_eq!(amount.thousandths(), 1500);
/// assert_eq!(amount.to_string(), "1.5");
/// let total = amount.checked_add(Amount::from_thousandths(500)).unwrap();
/// assert_eq!(total.to_string(), "2");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    #[must_use]
    pub const fn from_thousandths(thousandths: u64) -> Self {
        Self(thousandths)
    }

    #[must_use]
    pub const fn thousandths(self) -> u64 {
        self.0
    }

    /// Convert a caller supplied number.
    ///
    /// Returns `None` for negative, NaN or infinite values, and for values too
    /// large to represent.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let scaled = (value * SCALE as f64).round();
        if scaled >= u64::MAX as f64 {
            return None;
        }
        Some(Self(scaled as u64))
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:0width$}", width = FRACTION_DIGITS);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    /// Parses a decimal string into thousandths.
    ///
    /// Accepts `.` or `,` as decimal separator. Extra fractional digits are
    /// rounded half-up. Signs, blanks and anything that is not a plain
    /// decimal number are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidQuantity(format!("invalid amount '{s}'"));
        let overflow = || EngineError::InvalidQuantity(format!("amount too large '{s}'"));

        let trimmed = s.trim();
        let (whole_str, frac_str) = match trimmed.split_once(['.', ',']) {
            Some((whole, frac)) => (whole, frac),
            None => (trimmed, ""),
        };

        if whole_str.is_empty() || !whole_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: u64 = whole_str.parse().map_err(|_| overflow())?;

        let mut frac: u64 = 0;
        for (idx, digit) in frac_str.bytes().take(FRACTION_DIGITS).enumerate() {
            let weight = 10u64.pow((FRACTION_DIGITS - 1 - idx) as u32);
            frac += u64::from(digit - b'0') * weight;
        }
        if frac_str
            .as_bytes()
            .get(FRACTION_DIGITS)
            .is_some_and(|digit| *digit >= b'5')
        {
            frac += 1;
        }

        whole
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac))
            .map(Amount)
            .ok_or_else(overflow)
    }
}

/// A measured quantity: an amount followed by the unit as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quantity {
    pub amount: Amount,
    pub unit: String,
}

impl Quantity {
    pub fn new(amount: Amount, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into().trim().to_string(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.amount)
        } else {
            write!(f, "{} {}", self.amount, self.unit)
        }
    }
}

/// Outcome of reading a quantity string.
///
/// Text that does not start with a plain non-negative number is
/// [`Unmeasured`](ParsedQuantity::Unmeasured): the entry still exists, it just
/// never takes part in numeric merges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedQuantity {
    Measured(Quantity),
    Unmeasured,
}

impl ParsedQuantity {
    /// Split `"500 g"` into `500` and `"g"`. The unit is the trimmed
    /// remainder and may be empty.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let number_len = leading_number_len(trimmed);
        if number_len == 0 {
            return Self::Unmeasured;
        }

        let (number, rest) = trimmed.split_at(number_len);
        if rest.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == ',') {
            return Self::Unmeasured;
        }

        match number.parse::<Amount>() {
            Ok(amount) => Self::Measured(Quantity::new(amount, rest)),
            Err(err) => {
                tracing::trace!("unmeasured quantity '{input}': {err}");
                Self::Unmeasured
            }
        }
    }

    pub fn as_measured(&self) -> Option<&Quantity> {
        match self {
            Self::Measured(quantity) => Some(quantity),
            Self::Unmeasured => None,
        }
    }
}

impl From<Option<&str>> for ParsedQuantity {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Unmeasured, Self::parse)
    }
}

/// Byte length of the leading `digits[sep digits]` run.
fn leading_number_len(input: &str) -> usize {
    let bytes = input.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx == 0 {
        return 0;
    }
    if idx < bytes.len() && matches!(bytes[idx], b'.' | b',') {
        idx += 1;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
    }
    idx
}
