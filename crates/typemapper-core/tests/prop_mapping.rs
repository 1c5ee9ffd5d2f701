//! Property-based tests for the mapper
//!
//! These tests check that mapping never panics, that null is absorbing, that
//! excluded fields never appear and that correctly typed output maps to itself.

use proptest::prelude::*;
use serde_json::{json, Value};
use typemapper_core::{
    map_json, FieldRuleBuilder, MapOptions, Mapped, Schema, SchemaBuilder, TypeTag,
};

/// Strategy for generating simple JSON values with controlled depth
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1.0e9..1.0e9f64).prop_map(|f| json!(f)),
        "[a-zA-Z0-9 .:+-]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        16, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map("[a-h]", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for type tags, nesting at most one level
fn type_tag_strategy() -> impl Strategy<Value = TypeTag> {
    let leaf = prop_oneof![
        Just(TypeTag::String),
        Just(TypeTag::int()),
        (2u32..=36).prop_map(TypeTag::int_radix),
        Just(TypeTag::Float),
        Just(TypeTag::Boolean),
        Just(TypeTag::Date),
        Just(TypeTag::BigNumber),
    ];
    leaf.prop_recursive(2, 8, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|tag| TypeTag::complex_array(tag)),
            proptest::collection::vec(("[a-h]", inner), 0..4).prop_map(|fields| {
                TypeTag::complex(fields.into_iter().collect::<Schema>())
            }),
        ]
    })
}

fn schema_strategy() -> impl Strategy<Value = Schema> {
    proptest::collection::vec(("[a-h]", type_tag_strategy(), any::<bool>()), 0..6).prop_map(
        |fields| {
            fields
                .into_iter()
                .fold(SchemaBuilder::new(), |builder, (key, tag, exclude)| {
                    if exclude {
                        builder.field(key, FieldRuleBuilder::new().type_tag(tag).exclude())
                    } else {
                        builder.field(key, tag)
                    }
                })
                .build()
        },
    )
}

fn options_strategy() -> impl Strategy<Value = MapOptions> {
    (any::<bool>(), any::<bool>()).prop_map(|(include, fill)| {
        MapOptions::default()
            .with_include_undescribed(include)
            .with_fill_missing(fill)
    })
}

proptest! {
    #[test]
    fn prop_null_is_absorbing(schema in schema_strategy(), options in options_strategy()) {
        prop_assert_eq!(map_json(&Value::Null, &schema, &options), Mapped::Null);
    }

    #[test]
    fn prop_mapping_never_panics(
        source in json_value_strategy(),
        schema in schema_strategy(),
        options in options_strategy(),
    ) {
        let mapped = map_json(&source, &schema, &options);
        let _ = mapped.to_json();
    }

    #[test]
    fn prop_excluded_fields_never_appear(
        source in json_value_strategy(),
        schema in schema_strategy(),
        options in options_strategy(),
    ) {
        let mapped = map_json(&source, &schema, &options);
        if let Some(fields) = mapped.as_object() {
            for (key, entry) in schema.fields() {
                if entry.is_excluded() {
                    prop_assert!(!fields.contains_key(key));
                }
            }
        }
    }

    #[test]
    fn prop_undescribed_fields_dropped_by_default(
        source in json_value_strategy(),
        schema in schema_strategy(),
    ) {
        let mapped = map_json(&source, &schema, &MapOptions::default());
        if let Some(fields) = mapped.as_object() {
            for key in fields.keys() {
                prop_assert!(schema.field(key).is_some());
            }
        }
    }

    #[test]
    fn prop_string_and_int_output_is_stable(
        a in "[a-z0-9]{0,10}",
        b in any::<i32>(),
    ) {
        let schema = SchemaBuilder::new()
            .field("a", TypeTag::String)
            .field("b", TypeTag::int())
            .build();
        let options = MapOptions::default();

        let once = map_json(&json!({"a": a, "b": b.to_string()}), &schema, &options).to_json();
        let twice = map_json(&once, &schema, &options).to_json();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once, json!({"a": a, "b": b}));
    }
}
