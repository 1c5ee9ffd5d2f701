//! Typemapper Core - declarative schema-driven JSON mapping
//!
//! This crate maps a source JSON value to a new value described by a schema:
//! fields are renamed, converted to other types, given defaults when missing,
//! or filtered out.
//!
//! # Main Components
//!
//! - **Schema**: field rules, type tags and JSON schema documents
//! - **Mapper**: the recursive mapping function and its conversion table
//! - **Values**: the mapped output model and its lowering back to JSON
//! - **Error Handling**: error types using `thiserror` for the surrounding surface
//!
//! # Example
//!
//! ```
//! use typemapper_core::{map_json, FieldRuleBuilder, MapOptions, SchemaBuilder, TypeTag};
//! use serde_json::json;
//!
//! let schema = SchemaBuilder::new()
//!     .field("a", TypeTag::String)
//!     .field("b", TypeTag::int())
//!     .field("e", FieldRuleBuilder::new().to_name("voldemort").type_tag(TypeTag::Float))
//!     .field("g", FieldRuleBuilder::new().default_value("D"))
//!     .field("h", FieldRuleBuilder::new().exclude())
//!     .build();
//!
//! let mapped = map_json(
//!     &json!({"a": 65, "b": "65.5", "e": "1.25", "h": "secret", "xyz": 1}),
//!     &schema,
//!     &MapOptions::filling(),
//! );
//! assert_eq!(
//!     mapped.to_json(),
//!     json!({"a": "65", "b": 65, "voldemort": 1.25, "g": "D"})
//! );
//! ```

pub mod coerce;
pub mod converters;
pub mod error;
pub mod mapper;
pub mod schema;
pub mod value;

// Re-export main types for convenience
pub use converters::{unix_timestamp_string_date, ConverterRegistry};
pub use error::{Error, Result};
pub use mapper::{
    convert, map_json, CollectingDiagnostics, DefaultFnMode, Diagnostics, LogDiagnostics,
    MapOptions, Mapper, NoopDiagnostics,
};
pub use schema::{
    name_of, Converter, DefaultValue, FieldRule, FieldRuleBuilder, Schema, SchemaBuilder,
    SchemaEntry, TypeTag,
};
pub use value::{BoundDefault, Mapped, MappedObject};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }
}
