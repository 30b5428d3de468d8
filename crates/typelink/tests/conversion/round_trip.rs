use pretty_assertions::assert_eq;
use proptest::prelude::*;

use typelink::{TypeConverter, TypeRef};

use crate::common::Universe;

/// Encode on one converter, decode on a fresh one (empty cache, own registry).
fn across_converters(u: &Universe, ty: TypeRef) -> TypeRef {
    let json = TypeConverter::new(&u.types).to_json(&ty);
    TypeConverter::new(&u.types).from_json(&json).unwrap()
}

/// Encode and decode on the same converter.
fn in_place(u: &Universe, ty: TypeRef) -> TypeRef {
    let mut converter = TypeConverter::new(&u.types);
    let node = converter.encode(&ty);
    converter.decode(&node).unwrap()
}

#[test]
fn plain_type() {
    let u = Universe::new();
    assert_eq!(across_converters(&u, u.int32), u.int32);
    assert_eq!(in_place(&u, u.int32), u.int32);
}

#[test]
fn one_argument_instantiation() {
    let u = Universe::new();
    let list_of_string = u.close(u.list, &[u.string]);
    assert_eq!(across_converters(&u, list_of_string), list_of_string);
    assert_eq!(in_place(&u, list_of_string), list_of_string);
}

#[test]
fn nested_instantiation() {
    let u = Universe::new();
    let inner = u.close(u.list, &[u.int32]);
    let outer = u.close(u.map, &[u.string, inner]);
    assert_eq!(across_converters(&u, outer), outer);
    assert_eq!(in_place(&u, outer), outer);
}

#[test]
fn deeply_nested_instantiation() {
    let u = Universe::new();
    let mut ty = u.int32;
    for _ in 0..32 {
        ty = u.close(u.list, &[ty]);
    }
    assert_eq!(across_converters(&u, ty), ty);
}

#[test]
fn open_generic_definition() {
    let u = Universe::new();
    assert_eq!(across_converters(&u, u.map), u.map);
    assert_eq!(in_place(&u, u.list), u.list);
}

#[test]
fn arguments_from_another_module() {
    let u = Universe::new();
    let ty = u.close(u.result, &[u.lib_string, u.string]);
    assert_eq!(across_converters(&u, ty), ty);

    let value = TypeConverter::new(&u.types).to_value(&ty);
    assert_eq!(value["assemblyName"], "Lib");
    assert_eq!(value["genericArgs"][0]["hash"], "1:Lib:String");
    assert_eq!(value["genericArgs"][1]["hash"], "1:M:String");
}

#[test]
fn repeated_argument_resolves_once_per_converter() {
    let u = Universe::new();
    let ty = u.close(u.map, &[u.string, u.string]);
    let json = TypeConverter::new(&u.types).to_json(&ty);

    let mut converter = TypeConverter::new(&u.types);
    assert_eq!(converter.from_json(&json).unwrap(), ty);
    assert_eq!(converter.cache().len(), 2);
}

// === Property tests ===

#[derive(Clone, Debug)]
enum Shape {
    String,
    Int32,
    LibString,
    List(Box<Shape>),
    Map(Box<Shape>, Box<Shape>),
    Result(Box<Shape>, Box<Shape>),
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        Just(Shape::String),
        Just(Shape::Int32),
        Just(Shape::LibString),
    ];
    leaf.prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|item| Shape::List(Box::new(item))),
            (inner.clone(), inner.clone())
                .prop_map(|(key, value)| Shape::Map(Box::new(key), Box::new(value))),
            (inner.clone(), inner)
                .prop_map(|(ok, err)| Shape::Result(Box::new(ok), Box::new(err))),
        ]
    })
}

fn build(u: &Universe, shape: &Shape) -> TypeRef {
    match shape {
        Shape::String => u.string,
        Shape::Int32 => u.int32,
        Shape::LibString => u.lib_string,
        Shape::List(item) => {
            let item = build(u, item);
            u.close(u.list, &[item])
        }
        Shape::Map(key, value) => {
            let args = [build(u, key), build(u, value)];
            u.close(u.map, &args)
        }
        Shape::Result(ok, err) => {
            let args = [build(u, ok), build(u, err)];
            u.close(u.result, &args)
        }
    }
}

proptest! {
    #[test]
    fn arbitrary_nesting_round_trips(shape in shape()) {
        let u = Universe::new();
        let ty = build(&u, &shape);
        prop_assert_eq!(across_converters(&u, ty), ty);
        prop_assert_eq!(in_place(&u, ty), ty);
    }
}
