//! Schema model describing how source values map to target values
//!
//! A schema lists, per source field, the name to write in the result, the
//! conversion to apply and what to synthesize when the field is missing.
//!
//! # Module Organization
//!
//! - [`types`] - Schema, entries, field rules and type tags
//! - [`builder`] - Fluent builders for rules and object schemas
//! - [`document`] - Building schemas from JSON descriptions
//!
//! # Examples
//!
//! ```
//! use typemapper_core::schema::{FieldRuleBuilder, SchemaBuilder, TypeTag};
//!
//! let schema = SchemaBuilder::new()
//!     .field("a", TypeTag::String)
//!     .field("b", TypeTag::int())
//!     .field("e", FieldRuleBuilder::new().to_name("voldemort").type_tag(TypeTag::Float))
//!     .field("h", FieldRuleBuilder::new().exclude())
//!     .build();
//!
//! assert_eq!(schema.field("b").and_then(|entry| entry.tag_name()), Some("Int"));
//! ```
//!
//! Copyright (c) 2025 Typemapper Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod document;
pub mod types;


pub use builder::{FieldRuleBuilder, SchemaBuilder};
pub use types::{
    name_of, Conversion, ConvertFn, Converter, DefaultValue, FieldRule, ObjectSchema, Schema,
    SchemaEntry, TypeTag,
};
