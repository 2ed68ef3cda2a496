//! Declaration builders. The `model!` and `data_mapper!` macros expand
//! to these; they can also be driven by hand when a declaration has to
//! be assembled at runtime.

use convert_case::{Case, Casing};
use docbind_core::{
    class::{ClassId, ClassKind},
    error::Error,
    field::{FieldDescriptor, FieldType},
    meta::meta_write,
    registry,
    value::Value,
};

///
/// FieldDecl
///
/// Builder for one field descriptor. Only the property name and type
/// are required; everything else stays unset and picks up its default
/// at resolution time.
///

#[derive(Clone, Debug)]
pub struct FieldDecl {
    descriptor: FieldDescriptor,
}

impl FieldDecl {
    #[must_use]
    pub const fn new(property: &'static str, ty: FieldType) -> Self {
        Self {
            descriptor: FieldDescriptor::new(property, ty),
        }
    }

    /// Store this field under a different document key.
    #[must_use]
    pub const fn name(mut self, db_property: &'static str) -> Self {
        self.descriptor.db_property = Some(db_property);
        self
    }

    #[must_use]
    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.descriptor.nullable = Some(nullable);
        self
    }

    /// Value served for reads when the document has no entry.
    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.descriptor.default_value = Some(value);
        self
    }

    /// Mark this field as the class primary key.
    #[must_use]
    pub const fn id(mut self) -> Self {
        self.descriptor.is_identifier = true;
        self
    }

    #[must_use]
    pub fn into_descriptor(self) -> FieldDescriptor {
        self.descriptor
    }
}

///
/// ModelDecl
///
/// Builder for a collection-backed model declaration. `register`
/// declares the class and its fields in one store transaction; the
/// first rejected piece aborts the rest.
///

#[derive(Clone, Debug)]
pub struct ModelDecl {
    class: ClassId,
    collection: Option<&'static str>,
    parent: Option<ClassId>,
    fields: Vec<FieldDecl>,
}

impl ModelDecl {
    #[must_use]
    pub const fn of<M: ClassKind>() -> Self {
        Self {
            class: ClassId::of::<M>(),
            collection: None,
            parent: M::PARENT,
            fields: Vec::new(),
        }
    }

    /// Override the collection name derived from the class identifier.
    #[must_use]
    pub const fn collection(mut self, collection: &'static str) -> Self {
        self.collection = Some(collection);
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn register(self) -> Result<(), Error> {
        let collection = match self.collection {
            Some(collection) => collection,
            None => default_collection(self.class),
        };

        let mut store = meta_write();
        registry::declare_model(&mut store, self.class, collection, self.parent)?;
        for field in self.fields {
            registry::add_own_field(&mut store, self.class, field.into_descriptor())?;
        }

        Ok(())
    }
}

///
/// MapperDecl
///
/// Builder for a collection-less data-mapper declaration.
///

#[derive(Clone, Debug)]
pub struct MapperDecl {
    class: ClassId,
    parent: Option<ClassId>,
    fields: Vec<FieldDecl>,
}

impl MapperDecl {
    #[must_use]
    pub const fn of<M: ClassKind>() -> Self {
        Self {
            class: ClassId::of::<M>(),
            parent: M::PARENT,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn register(self) -> Result<(), Error> {
        let mut store = meta_write();
        registry::declare_data_mapper(&mut store, self.class, self.parent)?;
        for field in self.fields {
            registry::add_own_field(&mut store, self.class, field.into_descriptor())?;
        }

        Ok(())
    }
}

// Declarations are process-lifetime; a computed collection name is
// leaked to match.
fn default_collection(class: ClassId) -> &'static str {
    Box::leak(class.ident().to_case(Case::Snake).into_boxed_str())
}

///
/// TESTS
///
