//! printf-style substitution for translated phrases.
//!
//! Placeholders follow the grammar
//! `%[N$][+][0|'c][-][width][.precision]conversion` with conversions
//! `b c d i e f o s u x X`; `%%` renders a single `%`. Arguments are coerced
//! to the conversion: numeric conversions read strings by their leading
//! number and render `NaN` when there is none. A placeholder whose argument
//! is missing stays in the output unchanged, as does any `%` that does not
//! start a valid placeholder.

use crate::plural::parse_integer_prefix;
use std::fmt;

/// A value substituted into a phrase.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Int(i64),
    Float(f64),
    Str(String),
}

impl FormatArg {
    /// Integer reading: floats truncate, strings use their leading integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Float(_) => None,
            Self::Str(s) => parse_integer_prefix(s),
        }
    }

    /// Floating point reading: strings use their leading decimal number.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) if f.is_nan() => None,
            Self::Float(f) => Some(*f),
            Self::Str(s) => parse_float_prefix(s),
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(x) => f.write_str(&render_number(*x)),
            Self::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FormatArg {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for FormatArg {
    fn from(value: u64) -> Self {
        i64::try_from(value).map(Self::Int).unwrap_or(Self::Float(value as f64))
    }
}

impl From<usize> for FormatArg {
    fn from(value: usize) -> Self {
        i64::try_from(value).map(Self::Int).unwrap_or(Self::Float(value as f64))
    }
}

impl From<f32> for FormatArg {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

/// Substitute `args` into `template`.
pub fn vsprintf(template: &str, args: &[FormatArg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut cursor = 0;

    while let Some(idx) = rest.find('%') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];

        if let Some(stripped) = after.strip_prefix('%') {
            out.push('%');
            rest = stripped;
            continue;
        }

        match parse_spec(after) {
            Some((spec, len)) => {
                let arg = match spec.position {
                    Some(n) => args.get(n - 1),
                    None => {
                        cursor += 1;
                        args.get(cursor - 1)
                    }
                };
                match arg {
                    Some(arg) => out.push_str(&render(&spec, arg)),
                    None => out.push_str(&rest[idx..idx + 1 + len]),
                }
                rest = &after[len..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[derive(Debug, Clone, PartialEq)]
struct Spec {
    position: Option<usize>,
    plus: bool,
    pad: char,
    left: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: u8,
}

const CONVERSIONS: &[u8] = b"bcdeifosuxX";

/// Parse a placeholder body (the text after `%`). Returns the spec and its byte length.
fn parse_spec(input: &str) -> Option<(Spec, usize)> {
    let bytes = input.as_bytes();
    let digits_end = |from: usize| from + bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut spec = Spec {
        position: None,
        plus: false,
        pad: ' ',
        left: false,
        width: None,
        precision: None,
        conversion: b's',
    };
    let mut i = 0;

    let end = digits_end(0);
    if end > 0 && bytes.get(end) == Some(&b'$') {
        let n: usize = input[..end].parse().ok()?;
        if n == 0 {
            return None;
        }
        spec.position = Some(n);
        i = end + 1;
    }

    if bytes.get(i) == Some(&b'+') {
        spec.plus = true;
        i += 1;
    }

    match bytes.get(i) {
        Some(b'0') => {
            spec.pad = '0';
            i += 1;
        }
        Some(b'\'') => {
            let c = input[i + 1..].chars().next()?;
            spec.pad = c;
            i += 1 + c.len_utf8();
        }
        _ => {}
    }

    if bytes.get(i) == Some(&b'-') {
        spec.left = true;
        i += 1;
    }

    let end = digits_end(i);
    if end > i {
        spec.width = input[i..end].parse().ok();
        i = end;
    }

    if bytes.get(i) == Some(&b'.') {
        let end = digits_end(i + 1);
        if end == i + 1 {
            return None;
        }
        spec.precision = input[i + 1..end].parse().ok();
        i = end;
    }

    let conversion = *bytes.get(i)?;
    if !CONVERSIONS.contains(&conversion) {
        return None;
    }
    spec.conversion = conversion;

    Some((spec, i + 1))
}

fn render(spec: &Spec, arg: &FormatArg) -> String {
    let mut value = match spec.conversion {
        b'b' => radix(arg, 2),
        b'o' => radix(arg, 8),
        b'x' => radix(arg, 16),
        b'X' => radix(arg, 16).to_uppercase(),
        b'c' => character(arg),
        b'd' | b'i' => arg
            .as_integer()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "NaN".to_string()),
        b'u' => render_float(arg.as_float().map(f64::abs)),
        b'e' => match arg.as_float() {
            Some(x) if x.is_finite() => exponential(x, spec.precision),
            other => render_float(other),
        },
        b'f' => match (arg.as_float(), spec.precision) {
            (Some(x), Some(p)) if x.is_finite() => format!("{:.*}", p, x),
            (other, _) => render_float(other),
        },
        _ => {
            let s = arg.to_string();
            match spec.precision {
                Some(p) => s.chars().take(p).collect(),
                None => s,
            }
        }
    };

    if spec.plus
        && matches!(spec.conversion, b'd' | b'i' | b'e' | b'f' | b'u')
        && value != "NaN"
        && !value.starts_with('-')
    {
        value.insert(0, '+');
    }

    match spec.width {
        Some(width) => {
            let len = value.chars().count();
            if len >= width {
                return value;
            }
            let pad: String = std::iter::repeat(spec.pad).take(width - len).collect();
            if spec.left {
                value + &pad
            } else {
                pad + &value
            }
        }
        None => value,
    }
}

fn radix(arg: &FormatArg, base: u32) -> String {
    let Some(n) = arg.as_integer() else {
        return "NaN".to_string();
    };
    let magnitude = n.unsigned_abs();
    let digits = match base {
        2 => format!("{:b}", magnitude),
        8 => format!("{:o}", magnitude),
        _ => format!("{:x}", magnitude),
    };
    if n < 0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

fn character(arg: &FormatArg) -> String {
    match arg {
        FormatArg::Str(s) => s.chars().next().map(String::from).unwrap_or_default(),
        _ => arg
            .as_integer()
            .and_then(|n| u32::try_from(n).ok())
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string(),
    }
}

fn exponential(x: f64, precision: Option<usize>) -> String {
    let s = match precision {
        Some(p) => format!("{:.*e}", p, x),
        None => format!("{:e}", x),
    };
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => s,
    }
}

fn render_float(value: Option<f64>) -> String {
    value.map(render_number).unwrap_or_else(|| "NaN".to_string())
}

/// Shortest decimal rendering; integral values print without a fraction.
fn render_number(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x == f64::INFINITY {
        "Infinity".to_string()
    } else if x == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{}", x)
    }
}

/// Leading decimal number of `s`: optional sign, digits, fraction, exponent.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    if s[i..].starts_with("Infinity") {
        let sign = if bytes.first() == Some(&b'-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let int_digits = bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = bytes[i + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_digits = bytes[j..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    s[..i].parse().ok()
}
