//! Text conversion for leaf values.
//!
//! A [`Scalar`] is any value that can be written as a single piece of text (an attribute value or
//! a node's text content) and read back. Formatting is locale independent.
//!
//! Floating point values are written in fixed notation, never with an exponent, using the
//! shortest digit sequence that parses back to the exact same value. Whole numbers keep a
//! fractional part (`1.0` rather than `1`) so the text still reads as a real number.
//!
//! This is not a fixed-precision format: the number of fractional digits varies per value
//! (`0.1` but `0.30000000000000004`, and `0.1f32` stays `0.1`). Documents written by tools that
//! pad to a fixed number of digits (`1.500000`) are read fine, but are not reproduced byte for
//! byte when written back.
//!
//! ```rust
//! use intros_tree::Scalar;
//!
//! assert_eq!(1.0f64.to_text(), "1.0");
//! assert_eq!(0.1f64.to_text(), "0.1");
//! assert_eq!((0.1f64 + 0.2).to_text(), "0.30000000000000004");
//! assert_eq!(f64::from_text("1.500000"), Some(1.5));
//! assert_eq!(1.5f64.to_text(), "1.5");
//! assert_eq!(1e21f64.to_text(), "1000000000000000000000.0");
//! assert_eq!(f64::from_text(" 2.5 "), Some(2.5));
//! assert_eq!(bool::from_text("1"), Some(true));
//! assert_eq!(i32::from_text("abc"), None);
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::BigInt;

/// A value with a two-way text form.
///
/// Implement this for custom leaf types (enumerations, units, identifiers) and opt them into
/// field binding with [`scalar_member!`](crate::scalar_member).
pub trait Scalar: Sized {
    /// Renders the value as text.
    fn to_text(&self) -> String;

    /// Parses text back into a value, returning `None` if the text is malformed.
    fn from_text(text: &str) -> Option<Self>;
}

macro_rules! impl_scalar_parse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn from_text(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }
            }
        )*
    };
}

impl_scalar_parse!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_scalar_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                fn to_text(&self) -> String {
                    // Display never switches to exponent notation and prints the shortest
                    // digits that round-trip.
                    let mut text = self.to_string();
                    if self.is_finite() && !text.contains('.') {
                        text.push_str(".0");
                    }
                    text
                }

                fn from_text(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }
            }
        )*
    };
}

impl_scalar_float!(f32, f64);

impl Scalar for bool {
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Option<Self> {
        match text.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl Scalar for char {
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl Scalar for String {
    fn to_text(&self) -> String {
        self.clone()
    }

    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl Scalar for DateTime<Utc> {
    fn to_text(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    fn from_text(text: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl Scalar for BigInt {
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_float_fixed_notation() {
        assert_eq!(2.0f64.to_text(), "2.0");
        assert_eq!((-3.25f64).to_text(), "-3.25");
        assert_eq!(1e-7f64.to_text(), "0.0000001");
        assert_eq!(0.5f32.to_text(), "0.5");
        assert!(!f64::MAX.to_text().contains('e'));
    }

    #[test]
    fn test_float_specials() {
        assert_eq!(f64::INFINITY.to_text(), "inf");
        assert_eq!(f64::NEG_INFINITY.to_text(), "-inf");
        assert_eq!(f64::from_text("inf"), Some(f64::INFINITY));
        assert!(f64::from_text(&f64::NAN.to_text()).unwrap().is_nan());
    }

    #[test]
    fn test_float_exact_roundtrip() {
        for value in [0.1f64, 121.17487722345179, 31.270958542979315, -0.000123, 1e300] {
            assert_eq!(f64::from_text(&value.to_text()), Some(value));
        }
    }

    #[test]
    fn test_float_digits_are_not_padded() {
        assert_eq!(f64::from_text("1.500000"), Some(1.5));
        assert_eq!(1.5f64.to_text(), "1.5");
        assert_eq!(0.1f32.to_text(), "0.1");
        assert_eq!((0.1f64 + 0.2).to_text(), "0.30000000000000004");
    }

    #[test]
    fn test_integers_trim() {
        assert_eq!(u8::from_text(" 42\n"), Some(42));
        assert_eq!(u8::from_text("256"), None);
        assert_eq!(i64::from_text("-9"), Some(-9));
    }

    #[test]
    fn test_bool_forms() {
        assert_eq!(bool::from_text("false"), Some(false));
        assert_eq!(bool::from_text("0"), Some(false));
        assert_eq!(bool::from_text("yes"), None);
    }

    #[test]
    fn test_char() {
        assert_eq!(char::from_text("x"), Some('x'));
        assert_eq!(char::from_text("xy"), None);
        assert_eq!(char::from_text(""), None);
    }

    #[test]
    fn test_string_is_verbatim() {
        assert_eq!(String::from_text("  padded "), Some("  padded ".to_string()));
    }

    #[test]
    fn test_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(dt.to_text(), "2024-01-15T10:30:00Z");
        assert_eq!(DateTime::<Utc>::from_text("2024-01-15T12:30:00+02:00"), Some(dt));
    }

    #[test]
    fn test_bigint() {
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(BigInt::from_text(&big.to_text()), Some(big));
    }
}
