//! Two-bucket plural selection.
//!
//! Counts greater than one take the `other` form; everything else, including
//! zero, negatives and values with no numeric reading, takes `one`.

use crate::format::FormatArg;

/// Plural bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralCategory {
    One,
    Other,
}

/// Bucket for `count`, read with integer-prefix semantics.
pub fn category(count: &FormatArg) -> PluralCategory {
    match count.as_integer() {
        Some(n) if n > 1 => PluralCategory::Other,
        _ => PluralCategory::One,
    }
}

/// Leading decimal integer of `s`, ignoring leading whitespace and any trailing text.
///
/// `"3 cats"` reads as 3, `"2.9"` as 2, `"cats"` as nothing. Values beyond
/// `i64` saturate.
pub fn parse_integer_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = digits.bytes().take_while(u8::is_ascii_digit).count();
        &digits[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(FormatArg::Int(1), PluralCategory::One ; "one")]
    #[test_case(FormatArg::Int(2), PluralCategory::Other ; "two")]
    #[test_case(FormatArg::Int(0), PluralCategory::One ; "zero")]
    #[test_case(FormatArg::Int(-1), PluralCategory::One ; "negative")]
    #[test_case(FormatArg::Float(1.9), PluralCategory::One ; "fraction truncates down")]
    #[test_case(FormatArg::Float(2.1), PluralCategory::Other ; "fraction above two")]
    #[test_case(FormatArg::Float(f64::NAN), PluralCategory::One ; "nan")]
    #[test_case(FormatArg::from("3"), PluralCategory::Other ; "numeric string")]
    #[test_case(FormatArg::from("5 cats"), PluralCategory::Other ; "leading number")]
    #[test_case(FormatArg::from("many"), PluralCategory::One ; "no number")]
    #[test_case(FormatArg::from(""), PluralCategory::One ; "empty string")]
    fn test_category(count: FormatArg, expected: PluralCategory) {
        assert_eq!(category(&count), expected);
    }

    #[test_case("42", Some(42) ; "plain")]
    #[test_case("  7", Some(7) ; "leading whitespace")]
    #[test_case("-3", Some(-3) ; "negative")]
    #[test_case("+8", Some(8) ; "explicit plus")]
    #[test_case("2.9", Some(2) ; "decimal")]
    #[test_case("12abc", Some(12) ; "trailing text")]
    #[test_case("abc", None ; "letters")]
    #[test_case("-", None ; "sign only")]
    #[test_case("", None ; "empty")]
    #[test_case("99999999999999999999999", Some(i64::MAX) ; "saturates")]
    fn test_parse_integer_prefix(input: &str, expected: Option<i64>) {
        assert_eq!(parse_integer_prefix(input), expected);
    }

    proptest! {
        #[test]
        fn test_other_iff_greater_than_one(n in any::<i64>()) {
            let expected = if n > 1 { PluralCategory::Other } else { PluralCategory::One };
            prop_assert_eq!(category(&FormatArg::Int(n)), expected);
            prop_assert_eq!(category(&FormatArg::Str(n.to_string())), expected);
        }
    }
}
