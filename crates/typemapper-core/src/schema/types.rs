//! Core schema types
//!
//! A [`Schema`] is either an ordered set of field entries or a single entry
//! applied to a non-object value. Entries are bare [`TypeTag`]s or full
//! [`FieldRule`]s carrying rename, default and inclusion settings.
//!
//! Copyright (c) 2025 Typemapper Team
//! Licensed under the Apache-2.0 license

use crate::value::{DefaultFn, Mapped, MappedObject};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Signature of a custom conversion function
pub type ConvertFn = dyn Fn(&Value) -> Mapped + Send + Sync;

/// Ordered field entries of an object schema
pub type ObjectSchema = IndexMap<String, SchemaEntry>;

/// A named custom conversion function
#[derive(Clone)]
pub struct Converter {
    name: String,
    func: Arc<ConvertFn>,
}

impl Converter {
    /// Wrap a conversion function under a name
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Mapped + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the conversion on a raw value
    pub fn apply(&self, value: &Value) -> Mapped {
        (self.func)(value)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Converter").field(&self.name).finish()
    }
}

impl PartialEq for Converter {
    fn eq(&self, other: &Self) -> bool {
        // Compare only by name for function pointers
        self.name == other.name
    }
}

/// Identifies which conversion applies to a value
#[derive(Debug, Clone, PartialEq)]
pub enum TypeTag {
    String,
    /// Integer parse; `None` radix means base 10
    Int { radix: Option<u32> },
    Float,
    Boolean,
    Date,
    /// Arbitrary precision decimal
    BigNumber,
    /// Nested object mapped with an embedded schema
    Complex(Arc<Schema>),
    /// Sequence whose elements are mapped with an embedded schema
    ComplexArray(Arc<Schema>),
    /// Escape hatch for a caller-supplied conversion
    Custom(Converter),
}

impl TypeTag {
    pub const STRING: &'static str = "String";
    pub const INT: &'static str = "Int";
    pub const FLOAT: &'static str = "Float";
    pub const BOOLEAN: &'static str = "Boolean";
    pub const DATE: &'static str = "Date";
    pub const BIG_NUMBER: &'static str = "BigNumber";
    pub const COMPLEX: &'static str = "Complex";
    pub const COMPLEX_ARRAY: &'static str = "ComplexArray";

    /// Base 10 integer tag
    pub fn int() -> Self {
        TypeTag::Int { radix: None }
    }

    /// Integer tag with an explicit radix
    pub fn int_radix(radix: u32) -> Self {
        TypeTag::Int { radix: Some(radix) }
    }

    pub fn complex(schema: impl Into<Schema>) -> Self {
        TypeTag::Complex(Arc::new(schema.into()))
    }

    pub fn complex_array(schema: impl Into<Schema>) -> Self {
        TypeTag::ComplexArray(Arc::new(schema.into()))
    }

    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Mapped + Send + Sync + 'static,
    {
        TypeTag::Custom(Converter::new(name, func))
    }

    /// Canonical dispatch name, independent of radix or embedded schema
    pub fn name(&self) -> &str {
        match self {
            TypeTag::String => Self::STRING,
            TypeTag::Int { .. } => Self::INT,
            TypeTag::Float => Self::FLOAT,
            TypeTag::Boolean => Self::BOOLEAN,
            TypeTag::Date => Self::DATE,
            TypeTag::BigNumber => Self::BIG_NUMBER,
            TypeTag::Complex(_) => Self::COMPLEX,
            TypeTag::ComplexArray(_) => Self::COMPLEX_ARRAY,
            TypeTag::Custom(converter) => converter.name(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value synthesized for a declared field missing from the source
#[derive(Clone)]
pub enum DefaultValue {
    Value(Value),
    /// Produces a value from the result object it is bound to
    Producer(DefaultFn),
}

impl DefaultValue {
    pub fn producer<F>(func: F) -> Self
    where
        F: Fn(&MappedObject) -> Mapped + Send + Sync + 'static,
    {
        DefaultValue::Producer(Arc::new(func))
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultValue::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

impl PartialEq for DefaultValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DefaultValue::Value(a), DefaultValue::Value(b)) => a == b,
            (DefaultValue::Producer(a), DefaultValue::Producer(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Value(value)
    }
}

/// Per-field mapping options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRule {
    /// New name in the result object
    pub to_name: Option<String>,
    /// Conversion to apply; takes precedence over `converter`
    pub type_tag: Option<TypeTag>,
    /// Custom conversion used when no type is set
    pub converter: Option<Converter>,
    /// Value used when the field is missing and gets synthesized
    pub default_value: Option<DefaultValue>,
    /// Never emit this field
    pub exclude: bool,
    /// Synthesize this field when missing even if filling is off
    pub force_include: bool,
}

/// The conversion an entry resolves to
#[derive(Debug, Clone, Copy)]
pub enum Conversion<'a> {
    Tag(&'a TypeTag),
    Custom(&'a Converter),
}

/// One field of an object schema: a bare tag or a full rule
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaEntry {
    Tag(TypeTag),
    Rule(FieldRule),
}

impl SchemaEntry {
    /// Dispatch name of a bare tag; rules have none
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            SchemaEntry::Tag(tag) => Some(tag.name()),
            SchemaEntry::Rule(_) => None,
        }
    }

    pub fn as_rule(&self) -> Option<&FieldRule> {
        match self {
            SchemaEntry::Rule(rule) => Some(rule),
            SchemaEntry::Tag(_) => None,
        }
    }

    /// Name under which `key` is written to the result
    pub fn output_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.as_rule()
            .and_then(|rule| rule.to_name.as_deref())
            .unwrap_or(key)
    }

    pub fn is_excluded(&self) -> bool {
        self.as_rule().is_some_and(|rule| rule.exclude)
    }

    pub fn is_force_included(&self) -> bool {
        self.as_rule().is_some_and(|rule| rule.force_include)
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.as_rule().and_then(|rule| rule.default_value.as_ref())
    }

    /// Resolve the conversion: a bare tag, else the rule's type, else its
    /// custom converter. `None` means the value is copied unchanged.
    pub fn resolve(&self) -> Option<Conversion<'_>> {
        match self {
            SchemaEntry::Tag(tag) => Some(Conversion::Tag(tag)),
            SchemaEntry::Rule(rule) => rule
                .type_tag
                .as_ref()
                .map(Conversion::Tag)
                .or_else(|| rule.converter.as_ref().map(Conversion::Custom)),
        }
    }
}

impl From<TypeTag> for SchemaEntry {
    fn from(tag: TypeTag) -> Self {
        SchemaEntry::Tag(tag)
    }
}

impl From<FieldRule> for SchemaEntry {
    fn from(rule: FieldRule) -> Self {
        SchemaEntry::Rule(rule)
    }
}

/// Dispatch name of an optional entry; `None` signals "no mapper"
pub fn name_of(entry: Option<&SchemaEntry>) -> Option<&str> {
    entry.and_then(SchemaEntry::tag_name)
}

/// Mapping description of a target shape
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Field name to entry, in declaration order
    Object(ObjectSchema),
    /// A single entry applied directly to the value
    Entry(SchemaEntry),
}

impl Schema {
    /// An object schema with no fields
    pub fn empty() -> Self {
        Schema::Object(ObjectSchema::new())
    }

    /// Entry describing `key`; entry schemas describe no fields
    pub fn field(&self, key: &str) -> Option<&SchemaEntry> {
        match self {
            Schema::Object(fields) => fields.get(key),
            Schema::Entry(_) => None,
        }
    }

    /// Described fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &SchemaEntry)> {
        let fields = match self {
            Schema::Object(fields) => Some(fields),
            Schema::Entry(_) => None,
        };
        fields
            .into_iter()
            .flat_map(|fields| fields.iter())
            .map(|(key, entry)| (key.as_str(), entry))
    }

    /// The entry of an entry schema
    pub fn entry(&self) -> Option<&SchemaEntry> {
        match self {
            Schema::Entry(entry) => Some(entry),
            Schema::Object(_) => None,
        }
    }

    /// Bare tag of an entry schema
    pub fn bare_tag(&self) -> Option<&TypeTag> {
        match self.entry() {
            Some(SchemaEntry::Tag(tag)) => Some(tag),
            _ => None,
        }
    }

    /// Dispatch name of the schema itself; object schemas have none
    pub fn tag_name(&self) -> Option<&str> {
        name_of(self.entry())
    }
}

impl Default for Schema {
    fn default() -> Self {
        Schema::empty()
    }
}

impl From<TypeTag> for Schema {
    fn from(tag: TypeTag) -> Self {
        Schema::Entry(SchemaEntry::Tag(tag))
    }
}

impl From<FieldRule> for Schema {
    fn from(rule: FieldRule) -> Self {
        Schema::Entry(SchemaEntry::Rule(rule))
    }
}

impl From<SchemaEntry> for Schema {
    fn from(entry: SchemaEntry) -> Self {
        Schema::Entry(entry)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(fields: ObjectSchema) -> Self {
        Schema::Object(fields)
    }
}

impl<K, E> FromIterator<(K, E)> for Schema
where
    K: Into<String>,
    E: Into<SchemaEntry>,
{
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        Schema::Object(
            iter.into_iter()
                .map(|(key, entry)| (key.into(), entry.into()))
                .collect(),
        )
    }
}
