//! Portable type identities.
//!
//! `typelink` turns a live type handle into a JSON tree naming it, and turns
//! such a tree back into a handle, possibly in another process. Only the
//! identity travels, never values of the type.
//!
//! # Pipeline
//!
//! ```text
//! encode: handle ──Encoder──▶ TypeDescriptor ──▶ JSON
//! decode: JSON ──▶ TypeDescriptor ──Decoder──▶ handle
//!                         │
//!                 IdentityCache (per converter)
//! ```
//!
//! Simple types and open generic definitions carry a canonical hash. Every
//! handle the encoder emits or the decoder resolves under a hash is kept in
//! the converter's [`IdentityCache`], so repeated references resolve without
//! touching the type system again. Closed generics are never cached as a
//! whole; they are rebuilt from their (cached) parts.
//!
//! # Example
//!
//! ```
//! use typelink::{TypeConverter, TypeSystem, TypeUniverse};
//!
//! let mut universe = TypeUniverse::new();
//! let m = universe.add_module("M");
//! let string = universe.add_type(m, "String");
//! let list = universe.add_generic_definition(m, "List`1", 1);
//! let list_of_string = universe.construct_generic(&list, &[string]).unwrap();
//!
//! let json = TypeConverter::new(&universe).to_json(&list_of_string);
//! let decoded = TypeConverter::new(&universe).from_json(&json).unwrap();
//! assert_eq!(decoded, list_of_string);
//! ```

mod cache;
mod config;
mod converter;
mod decode;
mod encode;
mod error;


pub use cache::IdentityCache;
pub use config::ConverterConfig;
pub use converter::{SharedTypeConverter, TypeConverter};
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::DecodeError;

pub use typelink_ir::{CanonicalHash, DescriptorKind, MalformedDocument, TypeDescriptor};
pub use typelink_reflect::{
    AmbiguityPolicy, ConstructError, ModuleLoadError, ModuleRef, ModuleRegistry, ResolveError,
    TypeRef, TypeResolver, TypeShape, TypeSystem, TypeUniverse,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=typelink=debug` or `RUST_LOG=typelink=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
