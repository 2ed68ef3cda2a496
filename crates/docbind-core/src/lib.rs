//! Metadata core for docbind: class declarations, field registration and
//! resolution, accessor dispatch, model introspection, and the
//! ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod accessor;
pub mod class;
pub mod document;
pub mod error;
pub mod field;
pub mod hierarchy;
pub mod introspect;
pub mod meta;
pub mod naming;
pub mod obs;
pub mod registry;
pub mod resolve;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Maximum length of a class-property or storage-key name.
///
/// This limit keeps names usable as document keys in the backing store
/// and bounds the conflict-scan work per registration.
pub const MAX_PROPERTY_NAME_LEN: usize = 64;

/// Maximum length of a collection name.
pub const MAX_COLLECTION_NAME_LEN: usize = 64;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        class::{ClassId, ClassKind},
        document::Document,
        field::{FieldDescriptor, FieldType, ResolvedField},
        meta::ObjectKind,
        types::Timestamp,
        value::Value,
    };
}
