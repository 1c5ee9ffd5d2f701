//! Conversion table: one conversion per type tag
//!
//! Copyright (c) 2025 Typemapper Team
//! Licensed under the Apache-2.0 license

use super::map_json;
use super::options::MapOptions;
use bigdecimal::BigDecimal;
use crate::coerce;
use crate::schema::{Conversion, Schema, TypeTag};
use crate::value::Mapped;
use serde_json::Value;
use std::str::FromStr;

/// Apply a resolved conversion to a raw value
pub(crate) fn apply(conversion: Conversion<'_>, value: &Value, options: &MapOptions) -> Mapped {
    match conversion {
        Conversion::Tag(tag) => convert(value, tag, options),
        Conversion::Custom(converter) => converter.apply(value),
    }
}

/// Convert a raw value according to a type tag
pub fn convert(value: &Value, tag: &TypeTag, options: &MapOptions) -> Mapped {
    match tag {
        TypeTag::String => convert_string(value),
        TypeTag::Int { radix } => convert_int(value, *radix),
        TypeTag::Float => convert_float(value),
        TypeTag::Boolean => convert_boolean(value),
        TypeTag::Date => convert_date(value),
        TypeTag::BigNumber => convert_big_number(value),
        TypeTag::Complex(embedded) => map_json(value, embedded, options),
        TypeTag::ComplexArray(embedded) => convert_complex_array(value, embedded, options),
        TypeTag::Custom(converter) => converter.apply(value),
    }
}

fn convert_string(value: &Value) -> Mapped {
    match value {
        Value::Null => Mapped::Null,
        other => Mapped::String(coerce::to_string(other)),
    }
}

fn convert_int(value: &Value, radix: Option<u32>) -> Mapped {
    match value {
        Value::Null => Mapped::Null,
        other => Mapped::from_f64(coerce::parse_int(&coerce::to_string(other), radix)),
    }
}

/// Zero and NaN parse results fall back to the raw value
fn convert_float(value: &Value) -> Mapped {
    if value.is_null() {
        return Mapped::Null;
    }
    let parsed = coerce::parse_float(&coerce::to_string(value));
    if parsed == 0.0 || parsed.is_nan() {
        Mapped::from(value)
    } else {
        Mapped::from_f64(parsed)
    }
}

fn convert_boolean(value: &Value) -> Mapped {
    match value {
        Value::String(s) if s == "false" || s == "0" => Mapped::Bool(false),
        other => Mapped::Bool(coerce::is_truthy(other)),
    }
}

fn convert_date(value: &Value) -> Mapped {
    coerce::to_date(value)
        .map(Mapped::Date)
        .unwrap_or(Mapped::InvalidDate)
}

fn convert_big_number(value: &Value) -> Mapped {
    let text = match value {
        Value::Null => return Mapped::Null,
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Mapped::nan(),
    };
    BigDecimal::from_str(&text)
        .map(Mapped::Decimal)
        .unwrap_or_else(|_| Mapped::nan())
}

/// Non-array input is returned unchanged
fn convert_complex_array(value: &Value, embedded: &Schema, options: &MapOptions) -> Mapped {
    match value {
        Value::Array(items) => Mapped::Array(
            items
                .iter()
                .map(|item| map_json(item, embedded, options))
                .collect(),
        ),
        other => Mapped::from(other),
    }
}
