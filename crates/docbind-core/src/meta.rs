use crate::{
    accessor::AccessorTable,
    class::ClassId,
    field::{FieldDescriptor, ResolvedField},
    value::Value,
};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

///
/// MetaKind
///
/// Namespace tag for per-class entries. The store attaches no meaning to
/// a kind; each component owns the conventions under its own.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum MetaKind {
    Accessors,
    Collection,
    ObjectKind,
    OwnFields,
    Parent,
    ResolvedFields,
}

///
/// ObjectKind
///
/// How a class was declared: bound to a collection, or a plain
/// field-bearing mapper.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ObjectKind {
    DataMapper,
    Model,
}

impl ObjectKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DataMapper => "data-mapper",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// MetaValue
///
/// One stored metadata payload. Which variant lives under which
/// `MetaKind` is a component convention, not a store rule; `Value` is
/// the open slot for collaborators attaching their own metadata.
///

#[derive(Clone, Debug)]
pub enum MetaValue {
    Accessors(Arc<AccessorTable>),
    Collection(&'static str),
    ObjectKind(ObjectKind),
    OwnFields(Vec<FieldDescriptor>),
    Parent(ClassId),
    ResolvedFields(Arc<[ResolvedField]>),
    Value(Value),
}

///
/// MetaKey
///
/// Exact-class key: kind plus an optional property scope. Class-scoped
/// and property-scoped entries of the same kind never collide.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct MetaKey {
    class: ClassId,
    kind: MetaKind,
    property: Option<&'static str>,
}

///
/// MetadataStore
///
/// Pure keyed storage for per-class metadata, with existence checks and
/// no validation. Entries are scoped to the exact class in the key;
/// nothing here follows parent links.
///

#[derive(Clone, Debug, Default)]
pub struct MetadataStore {
    entries: BTreeMap<MetaKey, MetaValue>,
}

impl MetadataStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the entry stored under a key, if any.
    #[must_use]
    pub fn get(
        &self,
        kind: MetaKind,
        class: ClassId,
        property: Option<&'static str>,
    ) -> Option<&MetaValue> {
        self.entries.get(&MetaKey {
            class,
            kind,
            property,
        })
    }

    /// Presence check; never defaults.
    #[must_use]
    pub fn has(&self, kind: MetaKind, class: ClassId, property: Option<&'static str>) -> bool {
        self.entries.contains_key(&MetaKey {
            class,
            kind,
            property,
        })
    }

    /// Store a value under a key, replacing any previous entry.
    pub fn set(
        &mut self,
        kind: MetaKind,
        value: MetaValue,
        class: ClassId,
        property: Option<&'static str>,
    ) {
        self.entries.insert(
            MetaKey {
                class,
                kind,
                property,
            },
            value,
        );
    }

    /// Classes with at least one stored entry, in path order.
    #[must_use]
    pub fn classes(&self) -> Vec<ClassId> {
        let mut classes: Vec<ClassId> = self.entries.keys().map(|key| key.class).collect();
        classes.dedup();
        classes
    }

    /// Serializable view of every class with stored metadata.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        let classes = self
            .classes()
            .into_iter()
            .map(|class| ClassSnapshot {
                class,
                kind: self.object_kind(class),
                collection: self.collection(class),
                parent: self.parent(class),
                own_fields: self.own_fields(class).unwrap_or(&[]).to_vec(),
            })
            .collect();

        RegistrySnapshot { classes }
    }
}

// Typed per-class conveniences used by the components. A mismatched
// variant under a component kind means a foreign writer broke the
// convention; it reads as absent.
impl MetadataStore {
    pub(crate) fn own_fields(&self, class: ClassId) -> Option<&[FieldDescriptor]> {
        match self.get(MetaKind::OwnFields, class, None) {
            Some(MetaValue::OwnFields(fields)) => Some(fields.as_slice()),
            _ => None,
        }
    }

    pub(crate) fn parent(&self, class: ClassId) -> Option<ClassId> {
        match self.get(MetaKind::Parent, class, None) {
            Some(MetaValue::Parent(parent)) => Some(*parent),
            _ => None,
        }
    }

    pub(crate) fn collection(&self, class: ClassId) -> Option<&'static str> {
        match self.get(MetaKind::Collection, class, None) {
            Some(MetaValue::Collection(collection)) => Some(collection),
            _ => None,
        }
    }

    pub(crate) fn object_kind(&self, class: ClassId) -> Option<ObjectKind> {
        match self.get(MetaKind::ObjectKind, class, None) {
            Some(MetaValue::ObjectKind(kind)) => Some(*kind),
            _ => None,
        }
    }

    pub(crate) fn resolved_fields_cache(&self, class: ClassId) -> Option<Arc<[ResolvedField]>> {
        match self.get(MetaKind::ResolvedFields, class, None) {
            Some(MetaValue::ResolvedFields(fields)) => Some(Arc::clone(fields)),
            _ => None,
        }
    }

    pub(crate) fn accessor_table(&self, class: ClassId) -> Option<Arc<AccessorTable>> {
        match self.get(MetaKind::Accessors, class, None) {
            Some(MetaValue::Accessors(table)) => Some(Arc::clone(table)),
            _ => None,
        }
    }
}

///
/// RegistrySnapshot
///
/// Point-in-time serializable view of the store, for diagnostics and
/// test assertions.
///

#[derive(Clone, Debug, Serialize)]
pub struct RegistrySnapshot {
    pub classes: Vec<ClassSnapshot>,
}

///
/// ClassSnapshot
///

#[derive(Clone, Debug, Serialize)]
pub struct ClassSnapshot {
    pub class: ClassId,
    pub kind: Option<ObjectKind>,
    pub collection: Option<&'static str>,
    pub parent: Option<ClassId>,
    pub own_fields: Vec<FieldDescriptor>,
}

///
/// META
/// the process-wide store
///

static META: LazyLock<RwLock<MetadataStore>> = LazyLock::new(|| RwLock::new(MetadataStore::new()));

/// Acquire a write guard to the process-wide store.
pub fn meta_write() -> RwLockWriteGuard<'static, MetadataStore> {
    META.write()
        .expect("metadata RwLock poisoned while acquiring write lock")
}

/// Acquire a read guard to the process-wide store.
pub fn meta_read() -> RwLockReadGuard<'static, MetadataStore> {
    META.read()
        .expect("metadata RwLock poisoned while acquiring read lock")
}

///
/// TESTS
///
