use crate::{
    class::ClassId,
    error::ErrorClass,
    field::FieldDescriptor,
    hierarchy,
    meta::{MetaKind, MetaValue, MetadataStore, ObjectKind},
    naming::{self, NameError},
    obs::sink::{self, MetaEvent},
};
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
#[remain::sorted]
pub enum RegistryError {
    #[error("class '{class}' is already declared as a {kind}")]
    ClassAlreadyDeclared { class: ClassId, kind: ObjectKind },

    #[error("class '{class}' cannot extend '{parent}'; the lineage would cycle")]
    HierarchyCycle { class: ClassId, parent: ClassId },

    #[error("class '{class}' uses the invalid name '{name}': {source}")]
    InvalidName {
        class: ClassId,
        name: &'static str,
        source: NameError,
    },

    #[error(
        "class '{class}' already has primary key '{}'; '{}' cannot also be primary",
        .previous.class_property,
        .conflicting.class_property
    )]
    PrimaryKeyAlreadyDefined {
        class: ClassId,
        previous: FieldDescriptor,
        conflicting: FieldDescriptor,
    },

    #[error(
        "class '{class}' already has a field named '{}'",
        .previous.class_property
    )]
    PropertyAlreadyDefined {
        class: ClassId,
        previous: FieldDescriptor,
        conflicting: FieldDescriptor,
    },
}

impl RegistryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::ClassAlreadyDeclared { .. }
            | Self::PrimaryKeyAlreadyDefined { .. }
            | Self::PropertyAlreadyDefined { .. } => ErrorClass::Conflict,
            Self::HierarchyCycle { .. } => ErrorClass::InvariantViolation,
            Self::InvalidName { .. } => ErrorClass::Unsupported,
        }
    }
}

/// Append one raw descriptor to a class's own field list.
///
/// The list is scanned before the append; a second primary key is
/// rejected ahead of a duplicate name, so a field that violates both
/// rules reports the primary-key conflict. A rejected descriptor leaves
/// the stored list untouched.
pub fn add_own_field(
    store: &mut MetadataStore,
    class: ClassId,
    descriptor: FieldDescriptor,
) -> Result<(), RegistryError> {
    naming::validate_property_name(descriptor.class_property).map_err(|source| {
        RegistryError::InvalidName {
            class,
            name: descriptor.class_property,
            source,
        }
    })?;
    if let Some(db_property) = descriptor.db_property {
        naming::validate_property_name(db_property).map_err(|source| RegistryError::InvalidName {
            class,
            name: db_property,
            source,
        })?;
    }

    let mut fields = store.own_fields(class).map(<[_]>::to_vec).unwrap_or_default();

    for existing in &fields {
        if existing.is_identifier && descriptor.is_identifier {
            return Err(RegistryError::PrimaryKeyAlreadyDefined {
                class,
                previous: existing.clone(),
                conflicting: descriptor,
            });
        }
        if existing.class_property == descriptor.class_property {
            return Err(RegistryError::PropertyAlreadyDefined {
                class,
                previous: existing.clone(),
                conflicting: descriptor,
            });
        }
    }

    fields.push(descriptor);
    store.set(MetaKind::OwnFields, MetaValue::OwnFields(fields), class, None);
    sink::record(MetaEvent::FieldRegistered { class });

    Ok(())
}

/// Declare a class as a collection-backed model.
pub fn declare_model(
    store: &mut MetadataStore,
    class: ClassId,
    collection: &'static str,
    parent: Option<ClassId>,
) -> Result<(), RegistryError> {
    naming::validate_collection_name(collection).map_err(|source| RegistryError::InvalidName {
        class,
        name: collection,
        source,
    })?;

    declare(store, class, ObjectKind::Model, Some(collection), parent)
}

/// Declare a class as a collection-less data mapper.
pub fn declare_data_mapper(
    store: &mut MetadataStore,
    class: ClassId,
    parent: Option<ClassId>,
) -> Result<(), RegistryError> {
    declare(store, class, ObjectKind::DataMapper, None, parent)
}

fn declare(
    store: &mut MetadataStore,
    class: ClassId,
    kind: ObjectKind,
    collection: Option<&'static str>,
    parent: Option<ClassId>,
) -> Result<(), RegistryError> {
    if let Some(existing) = store.object_kind(class) {
        return Err(RegistryError::ClassAlreadyDeclared {
            class,
            kind: existing,
        });
    }
    if let Some(parent) = parent {
        // A parent whose lineage already reaches this class would close
        // a loop; this also rejects a class extending itself.
        if hierarchy::lineage_contains(store, parent, class) {
            return Err(RegistryError::HierarchyCycle { class, parent });
        }
    }

    // All checks precede all writes so a rejected declaration never
    // leaves a half-declared class behind.
    store.set(MetaKind::ObjectKind, MetaValue::ObjectKind(kind), class, None);
    if let Some(collection) = collection {
        store.set(MetaKind::Collection, MetaValue::Collection(collection), class, None);
    }
    if let Some(parent) = parent {
        store.set(MetaKind::Parent, MetaValue::Parent(parent), class, None);
    }
    sink::record(MetaEvent::ClassDeclared { class, kind });

    Ok(())
}

///
/// TESTS
///
