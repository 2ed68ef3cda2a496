//! Field resolution. Raw descriptors keep every omission visible;
//! resolution is where defaults are applied and the result cached, so
//! each class pays the normalization cost once.

use crate::{
    class::ClassId,
    field::ResolvedField,
    hierarchy,
    meta::{MetaKind, MetaValue, MetadataStore},
    obs::sink::{self, MetaEvent},
};
use std::sync::Arc;

/// Resolved view of a class's own fields, computed on first use and
/// cached in the store. Classes with no registered fields resolve to an
/// empty list, which is cached like any other.
pub fn resolved_own_fields(store: &mut MetadataStore, class: ClassId) -> Arc<[ResolvedField]> {
    if let Some(cached) = store.resolved_fields_cache(class) {
        return cached;
    }

    let resolved: Arc<[ResolvedField]> = store
        .own_fields(class)
        .unwrap_or(&[])
        .iter()
        .map(ResolvedField::from_raw)
        .collect();

    store.set(
        MetaKind::ResolvedFields,
        MetaValue::ResolvedFields(Arc::clone(&resolved)),
        class,
        None,
    );
    sink::record(MetaEvent::FieldsResolved {
        class,
        fields: resolved.len(),
    });

    resolved
}

/// Resolved fields for a class and its ancestors, most-derived first.
/// Each class's own block keeps its registration order; shadowed names
/// are not filtered here.
pub fn resolved_fields(store: &mut MetadataStore, class: ClassId) -> Vec<ResolvedField> {
    let lineage: Vec<ClassId> = hierarchy::ancestry(store, class).collect();

    let mut fields = Vec::new();
    for ancestor in lineage {
        fields.extend_from_slice(&resolved_own_fields(store, ancestor));
    }

    fields
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

    const BASE: ClassId = ClassId::new("resolve::tests::Base");
    const MIDDLE: ClassId = ClassId::new("resolve::tests::Middle");
    const LEAF: ClassId = ClassId::new("resolve::tests::Leaf");

    fn chain_store() -> MetadataStore {
        let mut store = MetadataStore::new();
        registry::declare_model(&mut store, BASE, "bases", None).expect("base declares");
        registry::declare_model(&mut store, MIDDLE, "middles", Some(BASE)).expect("middle declares");
        registry::declare_model(&mut store, LEAF, "leaves", Some(MIDDLE)).expect("leaf declares");

        registry::add_own_field(&mut store, BASE, FieldDescriptor::identifier("id", FieldType::Ulid))
            .expect("base id registers");
        registry::add_own_field(&mut store, MIDDLE, FieldDescriptor::new("label", FieldType::Text))
            .expect("middle label registers");
        registry::add_own_field(&mut store, LEAF, FieldDescriptor::new("weight", FieldType::Uint))
            .expect("leaf weight registers");

        store
    }

    #[derive(Default)]
    struct ResolveCounter {
        resolves: Cell<usize>,
    }

    impl MetaSink for ResolveCounter {
        fn record(&self, event: MetaEvent) {
            if matches!(event, MetaEvent::FieldsResolved { .. }) {
                self.resolves.set(self.resolves.get() + 1);
            }
        }
    }

    #[test]
    fn own_fields_resolve_once_per_class() {
        let mut store = chain_store();
        let counter = Rc::new(ResolveCounter::default());

        with_sink(Rc::clone(&counter) as Rc<dyn MetaSink>, || {
            let first = resolved_own_fields(&mut store, BASE);
            let second = resolved_own_fields(&mut store, BASE);
            assert!(Arc::ptr_eq(&first, &second), "repeat calls must return the cached list");
        });

        assert_eq!(counter.resolves.get(), 1);
    }

    #[test]
    fn resolution_fills_in_the_defaults() {
        let mut store = MetadataStore::new();
        registry::add_own_field(&mut store, BASE, FieldDescriptor::new("name", FieldType::Text))
            .expect("name registers");

        let resolved = resolved_own_fields(&mut store, BASE);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].db_property, "name");
        assert!(resolved[0].nullable);
        assert!(!resolved[0].is_primary);
    }

    #[test]
    fn aggregate_runs_most_derived_first_keeping_each_block_in_order() {
        let mut store = chain_store();
        registry::add_own_field(&mut store, LEAF, FieldDescriptor::new("color", FieldType::Text))
            .expect("leaf color registers");

        let names: Vec<&'static str> = resolved_fields(&mut store, LEAF)
            .iter()
            .map(|field| field.class_property)
            .collect();

        assert_eq!(names, vec!["weight", "color", "label", "id"]);
    }

    #[test]
    fn unregistered_class_resolves_to_an_empty_list() {
        let mut store = MetadataStore::new();

        assert!(resolved_own_fields(&mut store, LEAF).is_empty());
        assert!(resolved_fields(&mut store, LEAF).is_empty());
    }

    #[test]
    fn aggregate_reuses_per_class_caches() {
        let mut store = chain_store();
        let counter = Rc::new(ResolveCounter::default());

        with_sink(Rc::clone(&counter) as Rc<dyn MetaSink>, || {
            resolved_fields(&mut store, LEAF);
            resolved_fields(&mut store, LEAF);
            resolved_fields(&mut store, MIDDLE);
        });

        assert_eq!(
            counter.resolves.get(),
            3,
            "three classes resolve once each across all walks"
        );
    }
}
