//! SCPI argument formatting and reply classification.
//!
//! Everything in here is pure: the formatters turn caller input into a
//! command fragment or fail with an [`ArgumentError`], and [`classify`]
//! types a raw reply. No transport is involved, which is what guarantees
//! that invalid commands never reach the wire.

use crate::args::{QUERY, Vocab};
use crate::error::ArgumentError;

/// A typed instrument reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The whole trimmed reply parsed as a decimal number.
    Number(f64),
    /// Anything else: identity strings, keyword replies, write
    /// acknowledgements.
    Text(String),
}

impl Response {
    /// Numeric value, if this reply classified as one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl core::fmt::Display for Response {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Render a numeric argument as a SCPI fragment.
///
/// `"?"` (or an empty string, standing in for "no argument") passes through
/// unchanged: the caller is reading the setting back, not writing it.
/// Otherwise the value must parse as a number, is scaled by `unit_scale`
/// (caller units to device units, 1.0 when they agree), and must fall
/// inside the inclusive `[min, max]` bound.
///
/// The returned fragment starts with a single space. That space is SCPI
/// argument-separator syntax; a command without it is malformed.
pub fn format_numeric(
    value: &str,
    unit_scale: f64,
    min: f64,
    max: f64,
    label: &'static str,
) -> Result<String, ArgumentError> {
    let value = value.trim();
    if value.is_empty() || value == QUERY {
        return Ok(QUERY.to_string());
    }
    let parsed: f64 = value.parse().map_err(|_| ArgumentError::Validation {
        label,
        value: value.to_string(),
    })?;
    let scaled = parsed * unit_scale;
    if !(min..=max).contains(&scaled) {
        return Err(ArgumentError::OutOfRange {
            label,
            value: scaled,
            min,
            max,
        });
    }
    Ok(format!(" {scaled}"))
}

/// Render an enumerated argument as its canonical SCPI fragment.
///
/// Matching is ASCII case-insensitive; an empty token is the query marker.
/// A token outside the vocabulary fails with
/// [`ArgumentError::InvalidArgument`] carrying the full accepted set.
pub(crate) fn format_enum<V: Vocab>(token: &str) -> Result<&'static str, ArgumentError> {
    let token = token.trim();
    let token = if token.is_empty() { QUERY } else { token };
    match V::from_str(token) {
        Ok(variant) => Ok(variant.fragment()),
        Err(_) => Err(ArgumentError::InvalidArgument {
            label: V::LABEL,
            token: token.to_string(),
            accepted: V::ACCEPTED,
        }),
    }
}

/// Classify a raw reply: a decimal literal becomes [`Response::Number`],
/// everything else is returned as text with terminators trimmed.
///
/// The decision is purely syntactic; it never depends on which command was
/// sent. The grammar is `[+-]? digits [. digits]? ([eE] [+-]? digits)?`.
/// The GS200 reports levels and measurements in signed scientific notation
/// (`+1.00000E-03`), so signs and exponents are deliberately part of the
/// grammar.
pub fn classify(raw: &str) -> Response {
    let text = raw.trim_end_matches(['\r', '\n']).trim();
    if is_decimal_literal(text) {
        if let Ok(number) = text.parse::<f64>() {
            return Response::Number(number);
        }
    }
    Response::Text(text.to_string())
}

fn is_decimal_literal(s: &str) -> bool {
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match s.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (s, None),
    };
    let mut saw_digit = false;
    let mut saw_dot = false;
    for c in mantissa.chars() {
        match c {
            '0'..='9' => saw_digit = true,
            '.' if !saw_dot => saw_dot = true,
            _ => return false,
        }
    }
    if !saw_digit {
        return false;
    }
    match exponent {
        None => true,
        Some(e) => {
            let e = e.strip_prefix(['+', '-']).unwrap_or(e);
            !e.is_empty() && e.chars().all(|c| c.is_ascii_digit())
        }
    }
}
