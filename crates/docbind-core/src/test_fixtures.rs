//! Shared fixtures for module tests. Each builder returns a private
//! store so tests stay independent of the process-wide one.

use crate::{
    class::ClassId,
    field::{FieldDescriptor, FieldType},
    meta::MetadataStore,
    registry,
    value::Value,
};

pub(crate) const USER: ClassId = ClassId::new("fixtures::User");

/// A `user`-collection model with a ulid primary key and a nullable
/// name that defaults to "anon".
pub(crate) fn user_store() -> MetadataStore {
    let mut store = MetadataStore::new();
    registry::declare_model(&mut store, USER, "user", None).expect("user model declares");

    registry::add_own_field(
        &mut store,
        USER,
        FieldDescriptor::identifier("id", FieldType::Ulid),
    )
    .expect("id registers");

    let mut name = FieldDescriptor::new("name", FieldType::Text);
    name.nullable = Some(true);
    name.default_value = Some(Value::text("anon"));
    registry::add_own_field(&mut store, USER, name).expect("name registers");

    store
}
