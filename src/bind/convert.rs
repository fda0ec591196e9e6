//! String to typed value conversion.
//!
//! One conversion per [`ValueKind`], selected by a single dispatch. Sequences
//! are split on the field's delimiter and each element converted recursively.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::{ConvertError, EnumKind, Value, ValueKind};

const TRUE_TOKENS: [&str; 3] = ["true", "yes", "1"];
const FALSE_TOKENS: [&str; 3] = ["false", "no", "0"];

/// The descriptor settings that influence conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertRules {
    /// Rejects blank strings unless a default is being converted.
    pub required: bool,
    pub delimiter: Option<char>,
}

impl ConvertRules {
    /// Rules applied to each element of a sequence.
    pub const ELEMENT: ConvertRules = ConvertRules {
        required: false,
        delimiter: None,
    };
}

/// Converts `raw` to `kind`.
///
/// `is_default` marks the conversion of a descriptor default rather than a
/// configured value; only the blank-string check of required strings looks at it.
pub fn convert(
    raw: &str,
    kind: &ValueKind,
    rules: ConvertRules,
    is_default: bool,
) -> Result<Value, ConvertError> {
    match kind {
        ValueKind::String => {
            if rules.required && is_blank(raw) && !is_default {
                return Err(ConvertError::Blank);
            }
            Ok(Value::String(raw.to_string()))
        }
        ValueKind::Int16 => parse_number(raw, "Int16").map(Value::Int16),
        ValueKind::Int32 => parse_number(raw, "Int32").map(Value::Int32),
        ValueKind::Int64 => parse_number(raw, "Int64").map(Value::Int64),
        ValueKind::UInt16 => parse_unsigned(raw, "UInt16").map(Value::UInt16),
        ValueKind::UInt32 => parse_unsigned(raw, "UInt32").map(Value::UInt32),
        ValueKind::UInt64 => parse_unsigned(raw, "UInt64").map(Value::UInt64),
        ValueKind::Decimal => parse_decimal(raw).map(Value::Decimal),
        ValueKind::Double => parse_float(raw, "Double", f64::is_finite).map(Value::Double),
        ValueKind::Single => parse_float(raw, "Single", f32::is_finite).map(Value::Single),
        ValueKind::Boolean => parse_bool(raw).map(Value::Boolean),
        ValueKind::Enum(kind) => parse_enum(raw, kind).map(Value::Enum),
        ValueKind::List(element) => {
            convert_elements(raw, element, rules.delimiter).map(Value::List)
        }
        ValueKind::Array(element) => {
            convert_elements(raw, element, rules.delimiter).map(Value::Array)
        }
        ValueKind::RawList => {
            let tokens = split(raw, rules.delimiter)?
                .filter(|part| !is_blank(part))
                .map(str::to_string)
                .collect();
            Ok(Value::RawList(tokens))
        }
        ValueKind::Passthrough(_) => Ok(Value::Passthrough(raw.to_string())),
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn parse_number<N: FromStr>(raw: &str, kind: &'static str) -> Result<N, ConvertError> {
    raw.trim()
        .parse()
        .map_err(|_| ConvertError::NotNumeric { kind })
}

/// Parses a float, rejecting overflow and the `inf`/`nan` shorthands. Only the
/// spelled out `Infinity` and `NaN` produce non-finite values.
fn parse_float<F: FromStr + Copy>(
    raw: &str,
    kind: &'static str,
    is_finite: fn(F) -> bool,
) -> Result<F, ConvertError> {
    let raw = raw.trim();
    let value = parse_number(raw, kind)?;
    if is_finite(value) || is_named_non_finite(raw) {
        Ok(value)
    } else {
        Err(ConvertError::NotNumeric { kind })
    }
}

fn is_named_non_finite(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("Infinity") || raw.eq_ignore_ascii_case("NaN")
}

fn parse_unsigned<N: FromStr>(raw: &str, kind: &'static str) -> Result<N, ConvertError> {
    raw.trim()
        .parse()
        .map_err(|_| ConvertError::NotNonNegative { kind })
}

/// Plain decimal notation only: no exponent, no `_` digit separators.
fn parse_decimal(raw: &str) -> Result<Decimal, ConvertError> {
    let raw = raw.trim();
    if raw.contains('_') {
        return Err(ConvertError::NotNumeric { kind: "Decimal" });
    }
    Decimal::from_str(raw).map_err(|_| ConvertError::NotNumeric { kind: "Decimal" })
}

fn parse_bool(raw: &str) -> Result<bool, ConvertError> {
    let matches = |tokens: &[&str]| tokens.iter().any(|t| t.eq_ignore_ascii_case(raw));

    if matches(&TRUE_TOKENS) {
        Ok(true)
    } else if matches(&FALSE_TOKENS) {
        Ok(false)
    } else {
        Err(ConvertError::NotBoolean)
    }
}

fn parse_enum(raw: &str, kind: &EnumKind) -> Result<usize, ConvertError> {
    kind.members
        .iter()
        .position(|member| member.eq_ignore_ascii_case(raw))
        .ok_or_else(|| ConvertError::UndefinedMember {
            value: raw.to_string(),
            enum_name: kind.name,
            members: kind.members,
        })
}

/// Splits a sequence value. A blank value has no elements and is rejected.
fn split(raw: &str, delimiter: Option<char>) -> Result<impl Iterator<Item = &str>, ConvertError> {
    if is_blank(raw) {
        return Err(ConvertError::Blank);
    }
    // Without a delimiter the splitter never matches and yields `raw` whole.
    Ok(raw.split(delimiter.unwrap_or('\0')))
}

fn convert_elements(
    raw: &str,
    element: &ValueKind,
    delimiter: Option<char>,
) -> Result<Vec<Value>, ConvertError> {
    split(raw, delimiter)?
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| convert(part, element, ConvertRules::ELEMENT, false))
        .collect()
}
