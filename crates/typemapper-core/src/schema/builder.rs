//! Builders for field rules and object schemas
//!
//! Copyright (c) 2025 Typemapper Team
//! Licensed under the Apache-2.0 license

use super::types::{Converter, DefaultValue, FieldRule, ObjectSchema, Schema, SchemaEntry, TypeTag};
use crate::value::{Mapped, MappedObject};
use serde_json::Value;

/// Builder for creating field rules
#[derive(Debug, Clone, Default)]
pub struct FieldRuleBuilder {
    rule: FieldRule,
}

impl FieldRuleBuilder {
    /// Create a new rule builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the field in the result
    pub fn to_name(mut self, name: impl Into<String>) -> Self {
        self.rule.to_name = Some(name.into());
        self
    }

    /// Set the type tag
    pub fn type_tag(mut self, tag: TypeTag) -> Self {
        self.rule.type_tag = Some(tag);
        self
    }

    /// Set a custom converter
    pub fn converter(mut self, converter: Converter) -> Self {
        self.rule.converter = Some(converter);
        self
    }

    /// Set a custom converter from a closure
    pub fn convert_with<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Mapped + Send + Sync + 'static,
    {
        self.converter(Converter::new(name, func))
    }

    /// Use a fixed default value
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.rule.default_value = Some(DefaultValue::Value(value.into()));
        self
    }

    /// Use a default producer bound to the result object
    pub fn default_with<F>(mut self, func: F) -> Self
    where
        F: Fn(&MappedObject) -> Mapped + Send + Sync + 'static,
    {
        self.rule.default_value = Some(DefaultValue::producer(func));
        self
    }

    /// Drop the field from the result
    pub fn exclude(mut self) -> Self {
        self.rule.exclude = true;
        self
    }

    /// Synthesize the field when missing even if filling is off
    pub fn force_include(mut self) -> Self {
        self.rule.force_include = true;
        self
    }

    /// Build the field rule
    pub fn build(self) -> FieldRule {
        self.rule
    }
}

impl From<FieldRuleBuilder> for SchemaEntry {
    fn from(builder: FieldRuleBuilder) -> Self {
        SchemaEntry::Rule(builder.build())
    }
}

/// Builder for object schemas, keeping fields in insertion order
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    fields: ObjectSchema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe a field; a later call for the same key replaces the entry
    pub fn field(mut self, key: impl Into<String>, entry: impl Into<SchemaEntry>) -> Self {
        self.fields.insert(key.into(), entry.into());
        self
    }

    pub fn build(self) -> Schema {
        Schema::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_builder() {
        let rule = FieldRuleBuilder::new()
            .to_name("voldemort")
            .type_tag(TypeTag::Float)
            .default_value("none")
            .force_include()
            .build();

        assert_eq!(rule.to_name.as_deref(), Some("voldemort"));
        assert_eq!(rule.type_tag, Some(TypeTag::Float));
        assert_eq!(rule.default_value, Some(DefaultValue::Value(json!("none"))));
        assert!(rule.force_include);
        assert!(!rule.exclude);
    }

    #[test]
    fn test_schema_builder_keeps_order() {
        let schema = SchemaBuilder::new()
            .field("z", TypeTag::String)
            .field("a", FieldRuleBuilder::new().exclude())
            .field("m", TypeTag::int())
            .build();

        let keys: Vec<&str> = schema.fields().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert!(schema.field("a").unwrap().is_excluded());
    }
}
