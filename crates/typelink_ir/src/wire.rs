//! JSON field layout of descriptor nodes.
//!
//! `RawNode` mirrors the wire object field-for-field, in canonical emission
//! order. Every variant-specific field is optional here; which ones are
//! required is decided by the discriminant in `TryFrom<RawNode>`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{CanonicalHash, DescriptorKind, MalformedDocument, TypeDescriptor};

const HASH: &str = "hash";
const TYPE: &str = "type";
const ASSEMBLY_NAME: &str = "assemblyName";
const TYPE_NAME: &str = "typeName";
const GENERIC_DEF: &str = "genericDef";
const GENERIC_ARGS: &str = "genericArgs";
const GENERIC_ARITY: &str = "genericArity";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawNode {
    hash: Option<String>,
    #[serde(rename = "type")]
    kind: u64,
    assembly_name: Option<String>,
    type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generic_def: Option<Box<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generic_args: Option<Vec<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generic_arity: Option<usize>,
}

impl From<TypeDescriptor> for RawNode {
    fn from(node: TypeDescriptor) -> Self {
        let kind = u64::from(node.kind().tag());
        match node {
            TypeDescriptor::Simple {
                module_name,
                qualified_name,
                hash,
            } => RawNode {
                hash: Some(hash.into_string()),
                kind,
                assembly_name: Some(module_name),
                type_name: Some(qualified_name),
                generic_def: None,
                generic_args: None,
                generic_arity: None,
            },
            TypeDescriptor::GenericInstantiation {
                module_name,
                qualified_name,
                definition,
                arguments,
            } => RawNode {
                hash: None,
                kind,
                assembly_name: Some(module_name),
                type_name: Some(qualified_name),
                generic_def: Some(Box::new(RawNode::from(*definition))),
                generic_args: Some(arguments.into_iter().map(RawNode::from).collect()),
                generic_arity: None,
            },
            TypeDescriptor::GenericDefinition {
                module_name,
                qualified_name,
                arity,
                hash,
            } => RawNode {
                hash: Some(hash.into_string()),
                kind,
                assembly_name: Some(module_name),
                type_name: Some(qualified_name),
                generic_def: None,
                generic_args: None,
                generic_arity: Some(arity),
            },
        }
    }
}

impl TryFrom<RawNode> for TypeDescriptor {
    type Error = MalformedDocument;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let kind = u8::try_from(raw.kind)
            .ok()
            .and_then(DescriptorKind::from_tag)
            .ok_or_else(|| {
                MalformedDocument::new(format!("unrecognized discriminant `type: {}`", raw.kind))
            })?;

        let module_name = required(raw.assembly_name, kind, ASSEMBLY_NAME)?;
        let qualified_name = required(raw.type_name, kind, TYPE_NAME)?;

        match kind {
            DescriptorKind::Simple => {
                let expected = CanonicalHash::simple(&module_name, &qualified_name);
                Ok(TypeDescriptor::Simple {
                    hash: verify_hash(raw.hash, kind, expected)?,
                    module_name,
                    qualified_name,
                })
            }
            DescriptorKind::GenericInstantiation => {
                if let Some(hash) = raw.hash {
                    return Err(MalformedDocument::new(format!(
                        "generic instantiation `{qualified_name}` carries hash `{hash}`; expected null"
                    )));
                }
                let definition = required(raw.generic_def, kind, GENERIC_DEF)?;
                let arguments = required(raw.generic_args, kind, GENERIC_ARGS)?;
                Ok(TypeDescriptor::GenericInstantiation {
                    module_name,
                    qualified_name,
                    definition: Box::new(TypeDescriptor::try_from(*definition)?),
                    arguments: arguments
                        .into_iter()
                        .map(TypeDescriptor::try_from)
                        .collect::<Result<_, _>>()?,
                })
            }
            DescriptorKind::GenericDefinition => {
                let arity = required(raw.generic_arity, kind, GENERIC_ARITY)?;
                let expected =
                    CanonicalHash::generic_definition(&module_name, &qualified_name, arity);
                Ok(TypeDescriptor::GenericDefinition {
                    hash: verify_hash(raw.hash, kind, expected)?,
                    arity,
                    module_name,
                    qualified_name,
                })
            }
        }
    }
}

fn required<T>(
    field: Option<T>,
    kind: DescriptorKind,
    name: &'static str,
) -> Result<T, MalformedDocument> {
    field.ok_or_else(|| {
        MalformedDocument::new(format!(
            "missing `{name}` for node of `type: {}`",
            kind.tag()
        ))
    })
}

/// The received hash must be exactly the one the node's fields imply.
fn verify_hash(
    hash: Option<String>,
    kind: DescriptorKind,
    expected: CanonicalHash,
) -> Result<CanonicalHash, MalformedDocument> {
    let received = required(hash, kind, HASH)?;
    if received == expected.as_str() {
        Ok(expected)
    } else {
        Err(MalformedDocument::new(format!(
            "hash `{received}` does not match node of `type: {}`; expected `{expected}`",
            kind.tag()
        )))
    }
}

/// Build the JSON tree of a descriptor in canonical field order.
pub(crate) fn to_value(node: &TypeDescriptor) -> Value {
    let mut object = Map::new();
    object.insert(
        HASH.to_owned(),
        node.hash()
            .map_or(Value::Null, |hash| Value::from(hash.as_str())),
    );
    object.insert(TYPE.to_owned(), Value::from(node.kind().tag()));
    object.insert(ASSEMBLY_NAME.to_owned(), Value::from(node.module_name()));
    object.insert(TYPE_NAME.to_owned(), Value::from(node.qualified_name()));

    match node {
        TypeDescriptor::GenericInstantiation {
            definition,
            arguments,
            ..
        } => {
            object.insert(GENERIC_DEF.to_owned(), to_value(definition));
            object.insert(
                GENERIC_ARGS.to_owned(),
                Value::Array(arguments.iter().map(to_value).collect()),
            );
        }
        TypeDescriptor::GenericDefinition { arity, .. } => {
            object.insert(GENERIC_ARITY.to_owned(), Value::from(*arity));
        }
        TypeDescriptor::Simple { .. } => {}
    }

    Value::Object(object)
}
