use pretty_assertions::assert_eq;
use serde_json::json;

use typelink::{TypeConverter, TypeDescriptor};

use crate::common::Universe;

const MAP_DOCUMENT: &str = concat!(
    r#"{"hash":null,"type":2,"assemblyName":"M","typeName":"Map`2","#,
    r#""genericDef":{"hash":"3:M:Map`2:2","type":3,"assemblyName":"M","typeName":"Map`2","genericArity":2},"#,
    r#""genericArgs":["#,
    r#"{"hash":"1:M:String","type":1,"assemblyName":"M","typeName":"String"},"#,
    r#"{"hash":"1:M:Int32","type":1,"assemblyName":"M","typeName":"Int32"}"#,
    r#"]}"#,
);

#[test]
fn map_of_string_to_int_emits_exact_document() {
    let u = Universe::new();
    let ty = u.close(u.map, &[u.string, u.int32]);

    assert_eq!(TypeConverter::new(&u.types).to_json(&ty), MAP_DOCUMENT);
}

#[test]
fn map_of_string_to_int_emits_exact_tree() {
    let u = Universe::new();
    let ty = u.close(u.map, &[u.string, u.int32]);

    let expected = json!({
        "hash": null,
        "type": 2,
        "assemblyName": "M",
        "typeName": "Map`2",
        "genericDef": {
            "hash": "3:M:Map`2:2",
            "type": 3,
            "assemblyName": "M",
            "typeName": "Map`2",
            "genericArity": 2
        },
        "genericArgs": [
            { "hash": "1:M:String", "type": 1, "assemblyName": "M", "typeName": "String" },
            { "hash": "1:M:Int32", "type": 1, "assemblyName": "M", "typeName": "Int32" }
        ]
    });
    assert_eq!(TypeConverter::new(&u.types).to_value(&ty), expected);
}

#[test]
fn map_document_decodes_to_same_closed_type() {
    let u = Universe::new();
    let ty = u.close(u.map, &[u.string, u.int32]);

    let mut converter = TypeConverter::new(&u.types);
    assert_eq!(converter.from_json(MAP_DOCUMENT).unwrap(), ty);

    let node = TypeDescriptor::from_json_str(MAP_DOCUMENT).unwrap();
    assert_eq!(node.depth(), 1);
    assert_eq!(converter.decode(&node).unwrap(), ty);
}

#[test]
fn document_embeds_in_a_larger_payload() {
    let u = Universe::new();
    let ty = u.close(u.map, &[u.string, u.int32]);

    let descriptor = TypeConverter::new(&u.types).encode(&ty);
    let payload = json!({ "kind": "polymorphic", "valueType": descriptor });
    let text = payload.to_string();

    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let restored: TypeDescriptor = serde_json::from_value(parsed["valueType"].clone()).unwrap();
    assert_eq!(TypeConverter::new(&u.types).decode(&restored).unwrap(), ty);
}
