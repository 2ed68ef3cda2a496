use crate::{
    class::ClassId,
    document::Document,
    error::ErrorClass,
    field::ResolvedField,
    meta::{MetaKind, MetaValue, MetadataStore},
    obs::sink::{self, MetaEvent},
    resolve,
    value::Value,
};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error as ThisError;

///
/// AccessorError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum AccessorError {
    #[error("class '{class}' has no accessor for property '{property}'")]
    UnknownProperty { class: ClassId, property: String },
}

impl AccessorError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownProperty { .. } => ErrorClass::NotFound,
        }
    }
}

///
/// AccessorSlot
///
/// Dispatch entry for one property: where reads and writes land in the
/// document, and what a missing value falls back to.
///

#[derive(Clone, Debug)]
pub struct AccessorSlot {
    pub property: &'static str,
    pub storage_key: &'static str,
    pub default_value: Option<Value>,
}

///
/// AccessorTable
///
/// Per-class dispatch table built from the resolved field list. One
/// generic read path and one generic write path serve every property
/// through these slots.
///

#[derive(Debug)]
pub struct AccessorTable {
    class: ClassId,
    slots: Vec<AccessorSlot>,
    by_property: HashMap<&'static str, usize>,
}

impl AccessorTable {
    fn build(class: ClassId, fields: &[ResolvedField]) -> Self {
        let mut slots = Vec::with_capacity(fields.len());
        let mut by_property = HashMap::with_capacity(fields.len());

        for field in fields {
            // Fields arrive most-derived first; a name already claimed
            // keeps its slot and the shadowed ancestor field gets none.
            if by_property.contains_key(field.class_property) {
                continue;
            }

            by_property.insert(field.class_property, slots.len());
            slots.push(AccessorSlot {
                property: field.class_property,
                storage_key: field.db_property,
                default_value: field.default_value.clone(),
            });
        }

        Self {
            class,
            slots,
            by_property,
        }
    }

    #[must_use]
    pub const fn class(&self) -> ClassId {
        self.class
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slot(&self, property: &str) -> Option<&AccessorSlot> {
        self.by_property
            .get(property)
            .and_then(|index| self.slots.get(*index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccessorSlot> {
        self.slots.iter()
    }
}

impl<'a> IntoIterator for &'a AccessorTable {
    type Item = &'a AccessorSlot;
    type IntoIter = std::slice::Iter<'a, AccessorSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

/// Build and store a class's accessor table, or return the one already
/// installed. Installation happens at most once per class; repeat calls
/// leave the stored table untouched.
pub fn install_accessors(store: &mut MetadataStore, class: ClassId) -> Arc<AccessorTable> {
    if let Some(table) = store.accessor_table(class) {
        return table;
    }

    let fields = resolve::resolved_fields(store, class);
    let table = Arc::new(AccessorTable::build(class, &fields));

    store.set(
        MetaKind::Accessors,
        MetaValue::Accessors(Arc::clone(&table)),
        class,
        None,
    );
    sink::record(MetaEvent::AccessorsInstalled {
        class,
        accessors: table.len(),
    });

    table
}

///
/// Instance
///
/// A document bound to a class's accessor table. Property reads fall
/// back to the field default, then to null; writes land under the
/// field's storage key.
///

#[derive(Clone, Debug)]
pub struct Instance {
    table: Arc<AccessorTable>,
    doc: Document,
}

impl Instance {
    /// Fresh instance with an empty document, installing accessors for
    /// the class if they are not installed yet.
    #[must_use]
    pub fn new(store: &mut MetadataStore, class: ClassId) -> Self {
        Self {
            table: install_accessors(store, class),
            doc: Document::new(),
        }
    }

    /// Bind an existing document to a class's accessors.
    #[must_use]
    pub fn from_document(store: &mut MetadataStore, class: ClassId, doc: Document) -> Self {
        Self {
            table: install_accessors(store, class),
            doc,
        }
    }

    #[must_use]
    pub fn class(&self) -> ClassId {
        self.table.class()
    }

    /// Read a property through its accessor slot.
    pub fn get(&self, property: &str) -> Result<Value, AccessorError> {
        let slot = self.slot(property)?;

        Ok(self
            .doc
            .get(slot.storage_key)
            .cloned()
            .or_else(|| slot.default_value.clone())
            .unwrap_or_default())
    }

    /// Write a property through its accessor slot.
    pub fn set(&mut self, property: &str, value: Value) -> Result<(), AccessorError> {
        let slot = self.slot(property)?;
        let storage_key = slot.storage_key;
        self.doc.insert(storage_key, value);

        Ok(())
    }

    /// Current value of every accessible property, in field order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, Value)> {
        self.table.iter().map(|slot| {
            let value = self
                .doc
                .get(slot.storage_key)
                .cloned()
                .or_else(|| slot.default_value.clone())
                .unwrap_or_default();

            (slot.property, value)
        })
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.doc
    }

    /// Unbind, keeping the backing document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.doc
    }

    fn slot(&self, property: &str) -> Result<&AccessorSlot, AccessorError> {
        self.table
            .slot(property)
            .ok_or_else(|| AccessorError::UnknownProperty {
                class: self.table.class(),
                property: property.to_string(),
            })
    }
}

///
/// TESTS
///
