//! Numeric coercion of extracted text.
//!
//! Neither function can fail: text that does not parse comes back unchanged.

use std::borrow::Cow;
use std::fmt;

/// Significant figures used for deviation thresholds and summary statistics
pub const STATISTICS_SIG_FIGS: usize = 5;

/// A report value after numeric coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => f.write_str(&float_repr(*x)),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Convert text to a number: a decimal point selects floating-point,
/// otherwise an integer parse is attempted.
pub fn to_number(text: &str) -> Value {
    let trimmed = text.trim();
    let parsed = if text.contains('.') {
        trimmed.parse::<f64>().ok().map(Value::Float)
    } else {
        trimmed.parse::<i64>().ok().map(Value::Int)
    };
    parsed.unwrap_or_else(|| Value::Text(text.to_string()))
}

/// Round numeric text to `sig_figs` significant figures in `%g` style
/// (trailing zeros dropped, exponent form for very large or small values).
///
/// Exactly zero becomes `"0"`.
pub fn round_significant(text: &str, sig_figs: usize) -> Cow<'_, str> {
    let Ok(num) = text.trim().parse::<f64>() else {
        return Cow::Borrowed(text);
    };
    if num == 0.0 {
        return Cow::Borrowed("0");
    }
    Cow::Owned(format_general(num, sig_figs))
}

fn format_general(num: f64, sig_figs: usize) -> String {
    if !num.is_finite() {
        return non_finite(num).to_string();
    }

    let precision = sig_figs.max(1);
    let scientific = format!("{:.*e}", precision - 1, num);
    let (mantissa, exponent) = split_exponent(&scientific);

    if exponent < -4 || exponent >= precision as i32 {
        format!("{}{}", trim_fraction(mantissa), exponent_suffix(exponent))
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{num:.decimals$}")).to_string()
    }
}

/// Shortest round-trip text for a float, with a trailing `.0` on whole
/// numbers and exponent form outside `1e-4..1e16`.
pub fn float_repr(num: f64) -> String {
    if !num.is_finite() {
        return non_finite(num).to_string();
    }
    let magnitude = num.abs();
    if num != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{num:e}");
        let (mantissa, exponent) = split_exponent(&scientific);
        return format!("{mantissa}{}", exponent_suffix(exponent));
    }
    if num.fract() == 0.0 {
        format!("{num:.1}")
    } else {
        format!("{num}")
    }
}

fn non_finite(num: f64) -> &'static str {
    if num.is_nan() {
        "nan"
    } else if num > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

fn split_exponent(scientific: &str) -> (&str, i32) {
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (scientific, 0),
    }
}

fn exponent_suffix(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("e{sign}{:02}", exponent.abs())
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
