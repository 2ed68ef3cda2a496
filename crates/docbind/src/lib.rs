//! ## Crate layout
//! - `core`: metadata store, field registry, resolver, accessors, and
//!   introspection.
//! - `decl`: declaration builders driven by the `model!` and
//!   `data_mapper!` macros.
//!
//! The `prelude` module mirrors the surface used by model-declaring
//! code.

pub use docbind_core as core;

pub mod decl;

mod macros;

/// re-exports
///
/// macros can use these, stops the user having to specify all the
/// dependencies in the Cargo.toml file manually
pub mod __reexports {
    pub use ctor;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::error::{Error, ErrorClass};

use core::{
    accessor::{self, AccessorTable, Instance},
    class::{ClassId, ClassKind},
    introspect,
    meta::{meta_read, meta_write, RegistrySnapshot},
};
use std::sync::Arc;

/// Validated model information for `M`, checked against the
/// process-wide store on every call.
pub fn model_information<M: ClassKind>() -> Result<introspect::ModelInformation, Error> {
    let mut store = meta_write();
    let info = introspect::collect_model_information(&mut store, ClassId::of::<M>())?;

    Ok(info)
}

/// Accessor table for `M`, installed into the process-wide store on the
/// first call and returned as stored afterwards.
#[must_use]
pub fn install_accessors_of<M: ClassKind>() -> Arc<AccessorTable> {
    accessor::install_accessors(&mut meta_write(), ClassId::of::<M>())
}

/// Fresh accessor-backed instance of `M` over an empty document.
#[must_use]
pub fn instance_of<M: ClassKind>() -> Instance {
    Instance::new(&mut meta_write(), ClassId::of::<M>())
}

/// Whether `M` is declared as a collection-backed model.
#[must_use]
pub fn is_model<M: ClassKind>() -> bool {
    introspect::is_model(&meta_read(), ClassId::of::<M>())
}

/// Whether `M` is declared as a collection-less data mapper.
#[must_use]
pub fn is_data_mapper<M: ClassKind>() -> bool {
    introspect::is_data_mapper(&meta_read(), ClassId::of::<M>())
}

/// Serializable view of everything declared so far.
#[must_use]
pub fn registry_snapshot() -> RegistrySnapshot {
    meta_read().snapshot()
}

///
/// Prelude
/// declaration and runtime vocabulary for model code
///

pub mod prelude {
    pub use crate::{
        core::{
            accessor::Instance,
            class::{ClassId, ClassKind},
            document::Document,
            field::{FieldDescriptor, FieldType, ResolvedField},
            introspect::ModelInformation,
            meta::ObjectKind,
            types::Timestamp,
            value::Value,
        },
        data_mapper,
        decl::{FieldDecl, MapperDecl, ModelDecl},
        install_accessors_of, instance_of, is_data_mapper, is_model, model, model_information,
    };
}
