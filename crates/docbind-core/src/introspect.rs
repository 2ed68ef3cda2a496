use crate::{
    class::ClassId,
    error::ErrorClass,
    field::ResolvedField,
    meta::{MetadataStore, ObjectKind},
    obs::sink::{self, MetaEvent},
    resolve,
};
use serde::Serialize;
use thiserror::Error as ThisError;

///
/// IntrospectError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
#[remain::sorted]
pub enum IntrospectError {
    #[error("model '{class}' declares no fields")]
    EmptyFieldsList { class: ClassId },

    #[error("class '{class}' is not declared as a model")]
    ModelNotFound { class: ClassId },

    #[error(
        "model '{class}' resolves two primary keys: '{}' and '{}'",
        .previous.class_property,
        .conflicting.class_property
    )]
    PrimaryKeyAlreadyDefined {
        class: ClassId,
        previous: ResolvedField,
        conflicting: ResolvedField,
    },

    #[error("model '{class}' has no primary key")]
    PrimaryKeyNotDefined { class: ClassId },
}

impl IntrospectError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyFieldsList { .. } | Self::PrimaryKeyNotDefined { .. } => {
                ErrorClass::InvariantViolation
            }
            Self::ModelNotFound { .. } => ErrorClass::NotFound,
            Self::PrimaryKeyAlreadyDefined { .. } => ErrorClass::Conflict,
        }
    }
}

///
/// ModelInformation
///
/// Validated description of one model: its collection, its primary
/// field, and every resolved field across the hierarchy.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelInformation {
    pub collection: &'static str,
    pub primary_field: ResolvedField,
    pub fields: Vec<ResolvedField>,
}

/// Validate a model and assemble its information.
///
/// Checks run in a fixed order: the class must be a declared model,
/// must resolve at least one field, and must resolve exactly one
/// primary key. Nothing is cached; a call always re-validates, so
/// metadata changed since the last call is seen.
pub fn collect_model_information(
    store: &mut MetadataStore,
    class: ClassId,
) -> Result<ModelInformation, IntrospectError> {
    if !is_model(store, class) {
        return Err(IntrospectError::ModelNotFound { class });
    }
    let collection = store
        .collection(class)
        .ok_or(IntrospectError::ModelNotFound { class })?;

    let fields = resolve::resolved_fields(store, class);
    if fields.is_empty() {
        return Err(IntrospectError::EmptyFieldsList { class });
    }

    let mut primary: Option<&ResolvedField> = None;
    for field in &fields {
        if !field.is_primary {
            continue;
        }
        match primary {
            None => primary = Some(field),
            Some(previous) => {
                return Err(IntrospectError::PrimaryKeyAlreadyDefined {
                    class,
                    previous: previous.clone(),
                    conflicting: field.clone(),
                });
            }
        }
    }
    let Some(primary_field) = primary.cloned() else {
        return Err(IntrospectError::PrimaryKeyNotDefined { class });
    };

    sink::record(MetaEvent::ModelIntrospected { class });

    Ok(ModelInformation {
        collection,
        primary_field,
        fields,
    })
}

/// Whether a class is declared as a collection-backed model.
#[must_use]
pub fn is_model(store: &MetadataStore, class: ClassId) -> bool {
    store.object_kind(class) == Some(ObjectKind::Model)
}

/// Whether a class is declared as a collection-less data mapper.
#[must_use]
pub fn is_data_mapper(store: &MetadataStore, class: ClassId) -> bool {
    store.object_kind(class) == Some(ObjectKind::DataMapper)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::{FieldDescriptor, FieldType},
        obs::{with_sink, MetaSink},
        registry,
    };
    use std::{cell::Cell, rc::Rc};

    const ACCOUNT: ClassId = ClassId::new("introspect::tests::Account");
    const AUDITED: ClassId = ClassId::new("introspect::tests::Audited");
    const MAPPER: ClassId = ClassId::new("introspect::tests::Mapper");

    fn account_store() -> MetadataStore {
        let mut store = MetadataStore::new();
        registry::declare_model(&mut store, ACCOUNT, "accounts", None).expect("account declares");
        registry::add_own_field(
            &mut store,
            ACCOUNT,
            FieldDescriptor::identifier("id", FieldType::Ulid),
        )
        .expect("id registers");
        registry::add_own_field(
            &mut store,
            ACCOUNT,
            FieldDescriptor::new("name", FieldType::Text),
        )
        .expect("name registers");

        store
    }

    #[test]
    fn undeclared_class_is_not_a_model() {
        let mut store = MetadataStore::new();

        let err = collect_model_information(&mut store, ACCOUNT)
            .expect_err("nothing is declared");
        assert_eq!(err, IntrospectError::ModelNotFound { class: ACCOUNT });
        assert_eq!(err.class(), ErrorClass::NotFound);
    }

    #[test]
    fn data_mappers_are_not_models() {
        let mut store = MetadataStore::new();
        registry::declare_data_mapper(&mut store, MAPPER, None).expect("mapper declares");

        let err = collect_model_information(&mut store, MAPPER)
            .expect_err("mappers carry no collection");
        assert_eq!(err, IntrospectError::ModelNotFound { class: MAPPER });
    }

    #[test]
    fn model_without_fields_fails_the_fields_check() {
        let mut store = MetadataStore::new();
        registry::declare_model(&mut store, ACCOUNT, "accounts", None).expect("account declares");

        let err = collect_model_information(&mut store, ACCOUNT)
            .expect_err("no fields are registered");
        assert_eq!(err, IntrospectError::EmptyFieldsList { class: ACCOUNT });
        assert_eq!(err.class(), ErrorClass::InvariantViolation);
    }

    #[test]
    fn model_without_a_primary_key_is_rejected() {
        let mut store = MetadataStore::new();
        registry::declare_model(&mut store, ACCOUNT, "accounts", None).expect("account declares");
        registry::add_own_field(
            &mut store,
            ACCOUNT,
            FieldDescriptor::new("name", FieldType::Text),
        )
        .expect("name registers");

        let err = collect_model_information(&mut store, ACCOUNT)
            .expect_err("no primary key anywhere in the lineage");
        assert_eq!(err, IntrospectError::PrimaryKeyNotDefined { class: ACCOUNT });
    }

    #[test]
    fn two_primaries_across_the_hierarchy_are_reported_with_both_fields() {
        let mut store = account_store();
        registry::declare_model(&mut store, AUDITED, "audited", Some(ACCOUNT))
            .expect("audited declares");
        registry::add_own_field(
            &mut store,
            AUDITED,
            FieldDescriptor::identifier("auditId", FieldType::Ulid),
        )
        .expect("auditId registers in its own class");

        let err = collect_model_information(&mut store, AUDITED)
            .expect_err("the lineage resolves two primaries");
        assert_eq!(err.class(), ErrorClass::Conflict);

        match err {
            IntrospectError::PrimaryKeyAlreadyDefined {
                class,
                previous,
                conflicting,
            } => {
                assert_eq!(class, AUDITED);
                assert_eq!(previous.class_property, "auditId", "derived fields come first");
                assert_eq!(conflicting.class_property, "id");
            }
            other => panic!("expected PrimaryKeyAlreadyDefined, got {other:?}"),
        }
    }

    #[test]
    fn valid_model_reports_collection_primary_and_all_fields() {
        let mut store = account_store();

        let info = collect_model_information(&mut store, ACCOUNT).expect("model is valid");
        assert_eq!(info.collection, "accounts");
        assert_eq!(info.primary_field.class_property, "id");
        assert!(info.primary_field.is_primary);

        let names: Vec<&'static str> = info
            .fields
            .iter()
            .map(|field| field.class_property)
            .collect();
        assert_eq!(names, vec!["id", "name"]);
    }

    #[test]
    fn inherited_fields_are_included_for_subclasses() {
        let mut store = account_store();
        registry::declare_model(&mut store, AUDITED, "audited", Some(ACCOUNT))
            .expect("audited declares");
        registry::add_own_field(
            &mut store,
            AUDITED,
            FieldDescriptor::new("auditedAt", FieldType::Timestamp),
        )
        .expect("auditedAt registers");

        let info = collect_model_information(&mut store, AUDITED).expect("subclass is valid");
        assert_eq!(info.collection, "audited");
        assert_eq!(info.primary_field.class_property, "id", "the primary comes from the base");

        let names: Vec<&'static str> = info
            .fields
            .iter()
            .map(|field| field.class_property)
            .collect();
        assert_eq!(names, vec!["auditedAt", "id", "name"]);
    }

    #[test]
    fn user_model_information_matches_its_declaration() {
        let mut store = crate::test_fixtures::user_store();

        let info = collect_model_information(&mut store, crate::test_fixtures::USER)
            .expect("the user model is valid");
        assert_eq!(info.collection, "user");
        assert_eq!(info.primary_field.class_property, "id");
        assert_eq!(info.fields.len(), 2);
        assert!(info.fields[1].nullable);
    }

    #[test]
    fn every_call_revalidates() {
        struct IntrospectCounter {
            introspections: Cell<usize>,
        }

        impl MetaSink for IntrospectCounter {
            fn record(&self, event: MetaEvent) {
                if matches!(event, MetaEvent::ModelIntrospected { .. }) {
                    self.introspections.set(self.introspections.get() + 1);
                }
            }
        }

        let mut store = account_store();
        let counter = Rc::new(IntrospectCounter {
            introspections: Cell::new(0),
        });

        with_sink(Rc::clone(&counter) as Rc<dyn MetaSink>, || {
            let first = collect_model_information(&mut store, ACCOUNT).expect("first call");
            let second = collect_model_information(&mut store, ACCOUNT).expect("second call");
            assert_eq!(first, second);
        });

        assert_eq!(counter.introspections.get(), 2, "no memoized result is served");
    }

    #[test]
    fn kind_predicates_track_the_declaration() {
        let mut store = MetadataStore::new();
        registry::declare_model(&mut store, ACCOUNT, "accounts", None).expect("account declares");
        registry::declare_data_mapper(&mut store, MAPPER, None).expect("mapper declares");

        assert!(is_model(&store, ACCOUNT));
        assert!(!is_data_mapper(&store, ACCOUNT));
        assert!(is_data_mapper(&store, MAPPER));
        assert!(!is_model(&store, MAPPER));
        assert!(!is_model(&store, AUDITED), "undeclared classes answer false");
    }
}
