//! Output value model for mapping results
//!
//! Converters produce more than plain JSON: dates, arbitrary precision
//! decimals, the not-a-number sentinel and bound default producers. [`Mapped`]
//! carries all of them and lowers back to `serde_json::Value` when a plain
//! JSON document is needed.
//!
//! Copyright (c) 2025 Typemapper Team
//! Licensed under the Apache-2.0 license

use bigdecimal::BigDecimal;
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::sync::Arc;

/// Ordered field map of a mapped object
pub type MappedObject = IndexMap<String, Mapped>;

/// A function producing a default value from the object it is bound to
pub type DefaultFn = Arc<dyn Fn(&MappedObject) -> Mapped + Send + Sync>;

/// Largest integer magnitude an f64 holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A default producer bound to the result object it was synthesized into
#[derive(Clone)]
pub struct BoundDefault {
    producer: DefaultFn,
    receiver: Arc<MappedObject>,
}

impl BoundDefault {
    pub(crate) fn new(producer: DefaultFn, receiver: Arc<MappedObject>) -> Self {
        Self { producer, receiver }
    }

    /// Evaluate the producer against its receiver
    pub fn call(&self) -> Mapped {
        (self.producer)(&*self.receiver)
    }

    /// The completed result object, without the function defaults bound to it
    pub fn receiver(&self) -> &MappedObject {
        &self.receiver
    }
}

impl fmt::Debug for BoundDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundDefault")
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}

impl PartialEq for BoundDefault {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.producer, &other.producer) && self.receiver == other.receiver
    }
}

/// A value produced by the mapper
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped {
    Null,
    Bool(bool),
    /// A finite number
    Number(Number),
    /// NaN or an infinity
    NonFinite(f64),
    String(String),
    Array(Vec<Mapped>),
    Object(MappedObject),
    Date(DateTime<Utc>),
    /// A date whose input could not be parsed
    InvalidDate,
    Decimal(BigDecimal),
    /// A function default bound to its result object
    Deferred(BoundDefault),
}

impl Mapped {
    /// The not-a-number sentinel
    pub fn nan() -> Self {
        Mapped::NonFinite(f64::NAN)
    }

    /// Build a number, keeping integral values in integer form
    pub fn from_f64(n: f64) -> Self {
        if !n.is_finite() {
            return Mapped::NonFinite(n);
        }
        if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
            return Mapped::Number(Number::from(n as i64));
        }
        Number::from_f64(n)
            .map(Mapped::Number)
            .unwrap_or(Mapped::NonFinite(n))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Mapped::Null)
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Mapped::NonFinite(n) if n.is_nan())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Mapped::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Mapped::Number(n) => n.as_f64(),
            Mapped::NonFinite(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Mapped::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&MappedObject> {
        match self {
            Mapped::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Mapped]> {
        match self {
            Mapped::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a field of an object value
    pub fn get(&self, key: &str) -> Option<&Mapped> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Lower to plain JSON.
    ///
    /// Dates become ISO strings with millisecond precision, decimals become
    /// strings, invalid dates and non-finite numbers become `null`. Bound
    /// defaults are dropped from objects and become `null` inside arrays.
    pub fn to_json(&self) -> Value {
        match self {
            Mapped::Null | Mapped::InvalidDate | Mapped::NonFinite(_) | Mapped::Deferred(_) => {
                Value::Null
            }
            Mapped::Bool(b) => Value::Bool(*b),
            Mapped::Number(n) => Value::Number(n.clone()),
            Mapped::String(s) => Value::String(s.clone()),
            Mapped::Array(items) => Value::Array(items.iter().map(Mapped::to_json).collect()),
            Mapped::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, value) in map {
                    if !matches!(value, Mapped::Deferred(_)) {
                        out.insert(key.clone(), value.to_json());
                    }
                }
                Value::Object(out)
            }
            Mapped::Date(d) => Value::String(format_date(d)),
            Mapped::Decimal(d) => Value::String(d.to_plain_string()),
        }
    }
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<&Value> for Mapped {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Mapped::Null,
            Value::Bool(b) => Mapped::Bool(*b),
            Value::Number(n) => Mapped::Number(n.clone()),
            Value::String(s) => Mapped::String(s.clone()),
            Value::Array(items) => Mapped::Array(items.iter().map(Mapped::from).collect()),
            Value::Object(map) => Mapped::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Mapped::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Mapped {
    fn from(value: Value) -> Self {
        Mapped::from(&value)
    }
}

impl From<DateTime<Utc>> for Mapped {
    fn from(date: DateTime<Utc>) -> Self {
        Mapped::Date(date)
    }
}

impl From<BigDecimal> for Mapped {
    fn from(decimal: BigDecimal) -> Self {
        Mapped::Decimal(decimal)
    }
}

impl From<&str> for Mapped {
    fn from(s: &str) -> Self {
        Mapped::String(s.to_string())
    }
}

impl From<String> for Mapped {
    fn from(s: String) -> Self {
        Mapped::String(s)
    }
}

impl From<bool> for Mapped {
    fn from(b: bool) -> Self {
        Mapped::Bool(b)
    }
}

impl Serialize for Mapped {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Mapped::Null | Mapped::InvalidDate | Mapped::NonFinite(_) | Mapped::Deferred(_) => {
                serializer.serialize_unit()
            }
            Mapped::Bool(b) => serializer.serialize_bool(*b),
            Mapped::Number(n) => n.serialize(serializer),
            Mapped::String(s) => serializer.serialize_str(s),
            Mapped::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Mapped::Object(fields) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in fields {
                    if !matches!(value, Mapped::Deferred(_)) {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.end()
            }
            Mapped::Date(d) => serializer.serialize_str(&format_date(d)),
            Mapped::Decimal(d) => serializer.serialize_str(&d.to_plain_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_from_f64_keeps_integers_integral() {
        assert_eq!(Mapped::from_f64(65.0), Mapped::Number(Number::from(65)));
        assert_eq!(Mapped::from_f64(-3.0).to_json(), json!(-3));
        assert_eq!(Mapped::from_f64(1.5).to_json(), json!(1.5));
        assert!(Mapped::from_f64(f64::NAN).is_nan());
        assert_eq!(Mapped::from_f64(f64::INFINITY), Mapped::NonFinite(f64::INFINITY));
    }

    #[test]
    fn test_round_trip_from_json() {
        let source = json!({"b": 1, "a": [true, null, "x"], "c": {"d": 2.5}});
        let mapped = Mapped::from(&source);
        assert_eq!(mapped.to_json(), source);

        let keys: Vec<&String> = mapped.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_lowering_of_non_json_values() {
        let date = Utc.with_ymd_and_hms(2018, 5, 14, 2, 25, 20).unwrap();
        assert_eq!(Mapped::Date(date).to_json(), json!("2018-05-14T02:25:20.000Z"));
        assert_eq!(Mapped::InvalidDate.to_json(), Value::Null);
        assert_eq!(Mapped::nan().to_json(), Value::Null);

        let decimal: BigDecimal = "12.3400".parse().unwrap();
        assert_eq!(Mapped::Decimal(decimal).to_json(), json!("12.3400"));
    }

    #[test]
    fn test_deferred_fields_are_omitted() {
        let producer: DefaultFn = Arc::new(|_: &MappedObject| Mapped::Null);
        let deferred = Mapped::Deferred(BoundDefault::new(producer, Arc::new(MappedObject::new())));

        let mut fields = MappedObject::new();
        fields.insert("kept".to_string(), Mapped::from("v"));
        fields.insert("lazy".to_string(), deferred.clone());
        let object = Mapped::Object(fields);

        assert_eq!(object.to_json(), json!({"kept": "v"}));
        assert_eq!(serde_json::to_value(&object).unwrap(), json!({"kept": "v"}));
        assert_eq!(Mapped::Array(vec![deferred]).to_json(), json!([null]));
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let date = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let mut fields = MappedObject::new();
        fields.insert("when".to_string(), Mapped::Date(date));
        fields.insert("bad".to_string(), Mapped::nan());
        fields.insert("list".to_string(), Mapped::Array(vec![Mapped::Bool(true), Mapped::Null]));
        let object = Mapped::Object(fields);

        assert_eq!(serde_json::to_value(&object).unwrap(), object.to_json());
    }

    #[test]
    fn test_bound_default_call_sees_receiver() {
        let producer: DefaultFn = Arc::new(|receiver: &MappedObject| {
            Mapped::from(format!("{} fields", receiver.len()))
        });
        let mut receiver = MappedObject::new();
        receiver.insert("a".to_string(), Mapped::Null);

        let bound = BoundDefault::new(producer, Arc::new(receiver));
        assert_eq!(bound.call(), Mapped::from("1 fields"));
        assert!(bound.receiver().contains_key("a"));
    }
}
