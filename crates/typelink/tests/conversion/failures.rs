use serde_json::json;

use typelink::{ConstructError, DecodeError, ResolveError, TypeConverter, TypeDescriptor};

use crate::common::Universe;

#[test]
fn unknown_simple_type_leaves_cache_untouched() {
    let u = Universe::new();
    let mut converter = TypeConverter::new(&u.types);

    let err = converter
        .decode(&TypeDescriptor::simple("M", "Decimal"))
        .unwrap_err();
    assert!(err.is_type_not_found(), "{err}");
    assert_eq!(err.to_string(), "type `Decimal` not found in module `M`");
    assert!(!converter.cache().contains("1:M:Decimal"));
}

#[test]
fn unknown_module_is_a_load_error() {
    let u = Universe::new();
    let mut converter = TypeConverter::new(&u.types);

    let err = converter
        .decode(&TypeDescriptor::generic_definition("Gone", "List`1", 1))
        .unwrap_err();
    assert!(err.is_module_load(), "{err}");
    assert!(matches!(
        err,
        DecodeError::Resolve(ResolveError::ModuleLoad(ref load)) if load.module() == "Gone"
    ));
    assert!(converter.cache().is_empty());
}

#[test]
fn argument_count_differing_from_arity_is_rejected() {
    let u = Universe::new();
    let mut converter = TypeConverter::new(&u.types);

    let document = json!({
        "hash": null,
        "type": 2,
        "assemblyName": "M",
        "typeName": "Map`2",
        "genericDef": { "hash": "3:M:Map`2:2", "type": 3, "assemblyName": "M", "typeName": "Map`2", "genericArity": 2 },
        "genericArgs": [
            { "hash": "1:M:String", "type": 1, "assemblyName": "M", "typeName": "String" },
            { "hash": "1:M:Int32", "type": 1, "assemblyName": "M", "typeName": "Int32" },
            { "hash": "1:M:Int32", "type": 1, "assemblyName": "M", "typeName": "Int32" }
        ]
    });

    let err = converter.from_value(&document).unwrap_err();
    assert!(err.is_generic_construction(), "{err}");
    assert!(matches!(
        err,
        DecodeError::GenericConstruction {
            source: ConstructError::ArityMismatch { expected: 2, found: 3 },
            ..
        }
    ));
}

#[test]
fn open_definition_as_argument_is_rejected() {
    let u = Universe::new();
    let node = TypeDescriptor::generic_instantiation(
        "M",
        "List`1",
        TypeDescriptor::generic_definition("M", "List`1", 1),
        vec![TypeDescriptor::generic_definition("M", "List`1", 1)],
    );

    let err = TypeConverter::new(&u.types).decode(&node).unwrap_err();
    assert!(err.is_generic_construction(), "{err}");
}

#[test]
fn sibling_failure_keeps_earlier_entries() {
    let u = Universe::new();
    let mut converter = TypeConverter::new(&u.types);
    let node = TypeDescriptor::generic_instantiation(
        "M",
        "Map`2",
        TypeDescriptor::generic_definition("M", "Map`2", 2),
        vec![
            TypeDescriptor::simple("M", "Int32"),
            TypeDescriptor::simple("M", "Decimal"),
        ],
    );

    assert!(converter.decode(&node).unwrap_err().is_type_not_found());
    assert!(converter.cache().contains("3:M:Map`2:2"));
    assert!(converter.cache().contains("1:M:Int32"));
    assert_eq!(converter.cache().len(), 2);
}

#[test]
fn unrecognized_discriminant_is_malformed() {
    let u = Universe::new();
    let err = TypeConverter::new(&u.types)
        .from_value(&json!({ "hash": "1:M:String", "type": 0, "assemblyName": "M", "typeName": "String" }))
        .unwrap_err();
    assert!(err.is_malformed(), "{err}");
}

#[test]
fn missing_required_field_is_malformed() {
    let u = Universe::new();
    let err = TypeConverter::new(&u.types)
        .from_json(r#"{"hash":null,"type":2,"assemblyName":"M","typeName":"List`1"}"#)
        .unwrap_err();
    assert!(err.is_malformed(), "{err}");
    assert!(err.to_string().contains("genericDef"), "{err}");
}

#[test]
fn hash_disagreeing_with_names_cannot_poison_the_cache() {
    let u = Universe::new();
    let mut converter = TypeConverter::new(&u.types);

    let err = converter
        .from_json(r#"{"hash":"1:M:Int32","type":1,"assemblyName":"M","typeName":"String"}"#)
        .unwrap_err();
    assert!(err.is_malformed(), "{err}");
    assert!(converter.cache().is_empty());

    let int32 = converter
        .from_json(r#"{"hash":"1:M:Int32","type":1,"assemblyName":"M","typeName":"Int32"}"#)
        .unwrap();
    assert_eq!(int32, u.int32);
}

#[test]
fn definition_hash_disagreeing_with_arity_is_malformed() {
    let u = Universe::new();
    let err = TypeConverter::new(&u.types)
        .from_value(&json!({
            "hash": "3:M:Map`2:3", "type": 3, "assemblyName": "M", "typeName": "Map`2", "genericArity": 2
        }))
        .unwrap_err();
    assert!(err.is_malformed(), "{err}");
}
