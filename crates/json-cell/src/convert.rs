//! Textual numeric conversion and cross-storage number comparison.

use crate::value::{Value, ValueView};

/// Literal used when serializing a positive infinity.
pub const INFINITY_TEXT: &str = "∞";
/// Literal used when serializing a negative infinity.
pub const NEG_INFINITY_TEXT: &str = "-∞";

/// Integer prefix read in the C `strtol` manner: optional whitespace and
/// sign, then as many digits as are there. Malformed text yields zero,
/// overflow saturates.
pub(crate) fn text_to_i64(text: &str) -> i64 {
    let (neg, digits) = split_int_prefix(text);
    let mut acc: i64 = 0;
    for d in digits {
        let d = d as i64;
        acc = if neg {
            match acc.checked_mul(10).and_then(|a| a.checked_sub(d)) {
                Some(a) => a,
                None => return i64::MIN,
            }
        } else {
            match acc.checked_mul(10).and_then(|a| a.checked_add(d)) {
                Some(a) => a,
                None => return i64::MAX,
            }
        };
    }
    acc
}

pub(crate) fn text_to_u64(text: &str) -> u64 {
    let (neg, digits) = split_int_prefix(text);
    if neg {
        return 0;
    }
    let mut acc: u64 = 0;
    for d in digits {
        acc = match acc.checked_mul(10).and_then(|a| a.checked_add(d as u64)) {
            Some(a) => a,
            None => return u64::MAX,
        };
    }
    acc
}

fn split_int_prefix(text: &str) -> (bool, impl Iterator<Item = u8> + '_) {
    let bytes = text.trim_start().as_bytes();
    let (neg, rest) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    let digits = rest
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .map(|b| b - b'0');
    (neg, digits)
}

/// Full-text floating read. The infinity glyphs are understood in addition
/// to whatever the standard float grammar accepts (which covers the
/// `Infinity` literal); anything else yields NaN, never an error.
pub(crate) fn text_to_f64(text: &str) -> f64 {
    if text.is_empty() {
        return f64::NAN;
    }
    match text {
        INFINITY_TEXT => f64::INFINITY,
        NEG_INFINITY_TEXT => f64::NEG_INFINITY,
        _ => text.parse::<f64>().unwrap_or(f64::NAN),
    }
}

enum Num {
    Int(i128),
    Float(f64),
}

fn classify(v: &Value) -> Num {
    match v.view() {
        ValueView::I32(n) => Num::Int(n as i128),
        ValueView::U32(n) => Num::Int(n as i128),
        ValueView::I64(n) => Num::Int(n as i128),
        ValueView::U64(n) => Num::Int(n as i128),
        ValueView::F64(n) => Num::Float(n),
        ValueView::NumberText(t) | ValueView::Str(t) => t
            .parse::<i128>()
            .map(Num::Int)
            .unwrap_or_else(|_| Num::Float(text_to_f64(t))),
        _ => Num::Float(f64::NAN),
    }
}

/// Numeric equality across storage widths and machine/textual storage.
/// NaN compares unequal to everything, itself included.
pub(crate) fn numbers_eq(a: &Value, b: &Value) -> bool {
    match (classify(a), classify(b)) {
        (Num::Int(x), Num::Int(y)) => x == y,
        (Num::Int(x), Num::Float(y)) | (Num::Float(y), Num::Int(x)) => x as f64 == y,
        (Num::Float(x), Num::Float(y)) => x == y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_prefix_reads() {
        assert_eq!(text_to_i64("42"), 42);
        assert_eq!(text_to_i64("-42"), -42);
        assert_eq!(text_to_i64("  12.5"), 12);
        assert_eq!(text_to_i64("junk"), 0);
        assert_eq!(text_to_i64("99999999999999999999999"), i64::MAX);
        assert_eq!(text_to_u64("-1"), 0);
        assert_eq!(text_to_u64("18446744073709551615"), u64::MAX);
    }

    #[test]
    fn float_reads() {
        assert_eq!(text_to_f64("1.5"), 1.5);
        assert_eq!(text_to_f64("1.2342312e10"), 1.2342312e10);
        assert!(text_to_f64("").is_nan());
        assert!(text_to_f64("12x").is_nan());
        assert_eq!(text_to_f64("∞"), f64::INFINITY);
        assert_eq!(text_to_f64("-∞"), f64::NEG_INFINITY);
        assert_eq!(text_to_f64("Infinity"), f64::INFINITY);
        assert_eq!(text_to_f64("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn big_textual_integers_compare_exactly() {
        let a = Value::number("1154785421889866236483123");
        let b = Value::number("1154785421889866236483123");
        let c = Value::number("1154785421889866236483124");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
