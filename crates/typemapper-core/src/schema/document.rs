//! Declarative schema documents
//!
//! Schemas can be written as JSON. A string entry names a bare tag, an object
//! entry is a field rule:
//!
//! ```json
//! {
//!   "id": "Int",
//!   "price": { "toName": "amount", "type": "BigNumber" },
//!   "flags": { "type": "Int", "radix": 16 },
//!   "created": { "converter": "unixTimestampString" },
//!   "owner": { "type": "Complex", "schema": { "name": "String" } },
//!   "tags": { "type": "ComplexArray", "schema": "String" },
//!   "status": { "defaultValue": "active" },
//!   "secret": { "exclude": true }
//! }
//! ```
//!
//! Unknown type or converter names are not rejected. They leave the rule
//! without a conversion, so the field is copied unchanged at mapping time.
//!
//! Copyright (c) 2025 Typemapper Team
//! Licensed under the Apache-2.0 license

use super::builder::FieldRuleBuilder;
use super::types::{FieldRule, Schema, SchemaEntry, TypeTag};
use crate::converters::ConverterRegistry;
use crate::Result;
use serde_json::{Map, Value};
use std::sync::Arc;

impl Schema {
    /// Build a schema from its JSON description
    pub fn from_json(document: &Value, registry: &ConverterRegistry) -> Schema {
        match document {
            Value::Object(fields) => Schema::Object(
                fields
                    .iter()
                    .map(|(key, entry)| (key.clone(), entry_from_json(key, entry, registry)))
                    .collect(),
            ),
            other => Schema::Entry(entry_from_json("$", other, registry)),
        }
    }

    /// Parse JSON text and build a schema from it
    pub fn from_json_str(text: &str, registry: &ConverterRegistry) -> Result<Schema> {
        let document: Value = serde_json::from_str(text)?;
        Ok(Schema::from_json(&document, registry))
    }
}

fn entry_from_json(key: &str, entry: &Value, registry: &ConverterRegistry) -> SchemaEntry {
    match entry {
        Value::String(name) => match tag_from_name(name, None, None, registry) {
            Some(tag) => SchemaEntry::Tag(tag),
            None => {
                tracing::debug!(
                    field = key,
                    type_name = %name,
                    "unknown type name in schema document"
                );
                SchemaEntry::Rule(FieldRule::default())
            }
        },
        Value::Object(attributes) => SchemaEntry::Rule(rule_from_json(key, attributes, registry)),
        other => {
            tracing::debug!(
                field = key,
                entry = %other,
                "unsupported schema entry, treating as empty rule"
            );
            SchemaEntry::Rule(FieldRule::default())
        }
    }
}

fn rule_from_json(
    key: &str,
    attributes: &Map<String, Value>,
    registry: &ConverterRegistry,
) -> FieldRule {
    let mut builder = FieldRuleBuilder::new();

    if let Some(name) = attributes.get("toName").and_then(Value::as_str) {
        builder = builder.to_name(name);
    }

    if let Some(type_name) = attributes.get("type").and_then(Value::as_str) {
        let radix = attributes.get("radix");
        match tag_from_name(type_name, radix, attributes.get("schema"), registry) {
            Some(tag) => builder = builder.type_tag(tag),
            None => {
                tracing::debug!(field = key, type_name, "unknown type name in schema document");
            }
        }
    }

    if let Some(name) = attributes.get("converter").and_then(Value::as_str) {
        match registry.get(name) {
            Some(converter) => builder = builder.converter(converter.clone()),
            None => {
                tracing::debug!(
                    field = key,
                    converter = name,
                    "unknown converter in schema document"
                );
            }
        }
    }

    if let Some(default) = attributes.get("defaultValue") {
        builder = builder.default_value(default.clone());
    }
    if attributes.get("exclude").and_then(Value::as_bool).unwrap_or(false) {
        builder = builder.exclude();
    }
    if attributes.get("forceInclude").and_then(Value::as_bool).unwrap_or(false) {
        builder = builder.force_include();
    }

    builder.build()
}

fn tag_from_name(
    name: &str,
    radix: Option<&Value>,
    embedded: Option<&Value>,
    registry: &ConverterRegistry,
) -> Option<TypeTag> {
    let embedded_schema = || {
        Arc::new(
            embedded
                .map(|document| Schema::from_json(document, registry))
                .unwrap_or_default(),
        )
    };

    let tag = match name {
        TypeTag::STRING => TypeTag::String,
        TypeTag::INT => TypeTag::Int {
            radix: radix
                .and_then(Value::as_u64)
                .and_then(|r| u32::try_from(r).ok()),
        },
        TypeTag::FLOAT => TypeTag::Float,
        TypeTag::BOOLEAN => TypeTag::Boolean,
        TypeTag::DATE => TypeTag::Date,
        TypeTag::BIG_NUMBER => TypeTag::BigNumber,
        TypeTag::COMPLEX => TypeTag::Complex(embedded_schema()),
        TypeTag::COMPLEX_ARRAY => TypeTag::ComplexArray(embedded_schema()),
        other => TypeTag::Custom(registry.get(other)?.clone()),
    };
    Some(tag)
}
