//! Schema-driven mapping of JSON values
//!
//! [`map_json`] walks a source value alongside a [`Schema`] and builds a new
//! value: described fields are renamed and converted, undescribed fields are
//! dropped or copied, and missing fields can be synthesized from defaults.
//! Mapping never fails. A field without a conversion is copied unchanged and
//! reported to the [`Diagnostics`] sink, and unparsable input turns into
//! sentinel values such as NaN or an invalid date.
//!
//! # Module Organization
//!
//! - [`table`] - Conversion for each type tag
//! - [`options`] - Mapping options and function-default handling
//! - [`diagnostics`] - Warning sinks
//!
//! # Examples
//!
//! ```
//! use typemapper_core::{map_json, MapOptions, SchemaBuilder, TypeTag};
//! use serde_json::json;
//!
//! let schema = SchemaBuilder::new()
//!     .field("a", TypeTag::complex(SchemaBuilder::new().field("b", TypeTag::int()).build()))
//!     .field("l", TypeTag::complex_array(TypeTag::int()))
//!     .build();
//!
//! let mapped = map_json(
//!     &json!({"a": {"b": "1234"}, "l": ["1", "2", "3"]}),
//!     &schema,
//!     &MapOptions::default(),
//! );
//! assert_eq!(mapped.to_json(), json!({"a": {"b": 1234}, "l": [1, 2, 3]}));
//! ```
//!
//! Copyright (c) 2025 Typemapper Team
//! Licensed under the Apache-2.0 license

pub mod diagnostics;
pub mod options;
pub mod table;


pub use diagnostics::{
    CollectingDiagnostics, Diagnostics, LogDiagnostics, MissingConverter, NoopDiagnostics,
};
pub use options::{DefaultFnMode, MapOptions};
pub use table::convert;

use crate::schema::{DefaultValue, Schema, SchemaEntry, TypeTag};
use crate::value::{BoundDefault, DefaultFn, Mapped, MappedObject};
use serde_json::Value;
use std::sync::Arc;

/// Map `source` to a new value shaped by `schema`
pub fn map_json(source: &Value, schema: &Schema, options: &MapOptions) -> Mapped {
    match source {
        Value::Null => Mapped::Null,
        Value::Array(items) => match schema.bare_tag() {
            Some(TypeTag::ComplexArray(embedded)) => Mapped::Array(
                items
                    .iter()
                    .map(|item| map_json(item, embedded, options))
                    .collect(),
            ),
            // Arrays under any other schema are walked by index
            _ => map_fields(
                items.iter().enumerate().map(|(index, item)| (index.to_string(), item)),
                schema,
                options,
            ),
        },
        Value::Object(fields) => map_fields(fields.iter(), schema, options),
        primitive => map_primitive(primitive, schema, options),
    }
}

fn map_fields<'a, K, I>(fields: I, schema: &Schema, options: &MapOptions) -> Mapped
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, &'a Value)>,
{
    let mut result = MappedObject::new();

    for (key, value) in fields {
        let key = key.as_ref();
        let Some(entry) = schema.field(key) else {
            if options.include_undescribed {
                result.insert(key.to_string(), Mapped::from(value));
            }
            continue;
        };
        if entry.is_excluded() {
            continue;
        }

        let output_key = entry.output_name(key);
        let mapped = match entry.resolve() {
            Some(conversion) => table::apply(conversion, value, options),
            None => {
                options.diagnostics().missing_converter(output_key, entry);
                Mapped::from(value)
            }
        };
        result.insert(output_key.to_string(), mapped);
    }

    fill_missing(&mut result, schema, options);
    Mapped::Object(result)
}

/// Synthesize described fields that are still absent, in schema order.
///
/// Function defaults run last, against the completed object, so they see
/// every field synthesized after them. Their own fields are left out of the
/// object they receive.
fn fill_missing(result: &mut MappedObject, schema: &Schema, options: &MapOptions) {
    let mut producers: Vec<(String, &DefaultFn)> = Vec::new();

    for (key, entry) in schema.fields() {
        if !(options.fill_missing || entry.is_force_included()) || entry.is_excluded() {
            continue;
        }
        let name = entry.output_name(key);
        if result.contains_key(name) {
            continue;
        }
        let value = match entry.default_value() {
            Some(DefaultValue::Producer(producer)) => {
                producers.push((name.to_string(), producer));
                // holds the field's position until the producer runs
                Mapped::Null
            }
            Some(DefaultValue::Value(value)) => Mapped::from(value),
            None => Mapped::Null,
        };
        result.insert(name.to_string(), value);
    }

    if producers.is_empty() {
        return;
    }
    let receiver: MappedObject = result
        .iter()
        .filter(|(key, _)| !producers.iter().any(|(name, _)| name == *key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let receiver = Arc::new(receiver);

    for (name, producer) in producers {
        let value = match options.default_fn_mode {
            DefaultFnMode::Bind => {
                Mapped::Deferred(BoundDefault::new(Arc::clone(producer), Arc::clone(&receiver)))
            }
            DefaultFnMode::Invoke => producer(&*receiver),
        };
        result.insert(name, value);
    }
}

/// The schema itself acts as the entry for a primitive value
fn map_primitive(source: &Value, schema: &Schema, options: &MapOptions) -> Mapped {
    match schema.entry().and_then(SchemaEntry::resolve) {
        Some(conversion) => table::apply(conversion, source, options),
        None => Mapped::from(source),
    }
}

/// Holds options for repeated mapping calls
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    options: MapOptions,
}

impl Mapper {
    pub fn new(options: MapOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Map `source` with `schema` using the held options
    pub fn map(&self, source: &Value, schema: &Schema) -> Mapped {
        map_json(source, schema, &self.options)
    }

    /// Map and lower the result to plain JSON
    pub fn map_to_json(&self, source: &Value, schema: &Schema) -> Value {
        self.map(source, schema).to_json()
    }
}
