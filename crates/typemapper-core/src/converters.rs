//! Built-in custom converters and the registry used by schema documents
//!
//! Copyright (c) 2025 Typemapper Team
//! Licensed under the Apache-2.0 license

use crate::coerce;
use crate::schema::Converter;
use crate::value::Mapped;
use serde_json::Value;
use std::collections::HashMap;

/// Registry name of [`unix_timestamp_string_date`]
pub const UNIX_TIMESTAMP_STRING: &str = "unixTimestampString";

/// Reads a base 10 count of seconds since the epoch, e.g. `"1526266200"`,
/// into a date. Unparsable input gives an invalid date.
pub fn unix_timestamp_string_date() -> Converter {
    Converter::new(UNIX_TIMESTAMP_STRING, |value: &Value| {
        let seconds = coerce::parse_int(&coerce::to_string(value), Some(10));
        coerce::date_from_millis(seconds * 1000.0)
            .map(Mapped::Date)
            .unwrap_or(Mapped::InvalidDate)
    })
}

/// Named converters that schema documents can refer to
#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<String, Converter>,
}

impl ConverterRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in converters
    pub fn with_builtins() -> Self {
        Self::new().with(unix_timestamp_string_date())
    }

    /// Add a converter under its own name
    pub fn with(mut self, converter: Converter) -> Self {
        self.register(converter);
        self
    }

    /// Add a converter under its own name, replacing any previous one
    pub fn register(&mut self, converter: Converter) {
        self.converters.insert(converter.name().to_string(), converter);
    }

    pub fn get(&self, name: &str) -> Option<&Converter> {
        self.converters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.converters.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_unix_timestamp_string_date() {
        let converter = unix_timestamp_string_date();
        assert_eq!(
            converter.apply(&json!("1526266200")),
            Mapped::Date(Utc.timestamp_opt(1_526_266_200, 0).unwrap())
        );
        assert_eq!(
            converter.apply(&json!(1526266200)),
            Mapped::Date(Utc.timestamp_opt(1_526_266_200, 0).unwrap())
        );
        assert_eq!(converter.apply(&json!("soon")), Mapped::InvalidDate);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ConverterRegistry::with_builtins()
            .with(Converter::new("upper", |value: &Value| {
                Mapped::from(coerce::to_string(value).to_uppercase())
            }));

        assert!(registry.contains(UNIX_TIMESTAMP_STRING));
        assert_eq!(registry.get("upper").unwrap().apply(&json!("abc")), Mapped::from("ABC"));
        assert!(registry.get("missing").is_none());
        assert!(ConverterRegistry::new().get(UNIX_TIMESTAMP_STRING).is_none());
    }
}
