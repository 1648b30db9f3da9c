//! Product prices and their display formatting.
//!
//! Prices come back from the data store as loosely typed values: a number,
//! a numeric string, or nothing at all. Anything that is not a finite
//! number is kept as NaN and rendered as [`PRICE_PLACEHOLDER`].

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Rendered in place of a price that is missing or not a finite number.
pub const PRICE_PLACEHOLDER: &str = "—";

/// Maximum number of fraction digits shown by [`format_price`].
pub const MAX_FRACTION_DIGITS: usize = 2;

/// A product price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    /// Create a price from a raw value.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// A price that is not known.
    pub fn missing() -> Self {
        Self(f64::NAN)
    }

    /// Coerce text to a price. Empty or unparsable text is missing.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::missing();
        }
        text.parse::<f64>().map(Self).unwrap_or_else(|_| Self::missing())
    }

    /// The raw value (may be NaN).
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether this price can be displayed as a number.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite()
    }

    /// Format for display (e.g., "1,299.5").
    pub fn display(&self) -> String {
        format_price(self.0)
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_valid() {
            serializer.serialize_f64(self.0)
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

/// Accepts whatever the store hands back and never rejects the record.
struct PriceVisitor;

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string, or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Ok(Price(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Ok(Price(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Ok(Price(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        Ok(Price::parse(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Price, E> {
        Ok(Price::missing())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Price, E> {
        Ok(Price::missing())
    }

    fn visit_none<E: de::Error>(self) -> Result<Price, E> {
        Ok(Price::missing())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Price, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Price, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Price::missing())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Price, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Price::missing())
    }
}

/// Format a price with comma-grouped thousands.
///
/// Non-finite values yield [`PRICE_PLACEHOLDER`]. At most
/// [`MAX_FRACTION_DIGITS`] fraction digits are kept and trailing zeros are
/// dropped, so `1000.0` renders as `"1,000"` and `1234.5` as `"1,234.5"`.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return PRICE_PLACEHOLDER.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Coerce text to a number, then format it like [`format_price`].
pub fn format_price_text(text: &str) -> String {
    Price::parse(text).display()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
