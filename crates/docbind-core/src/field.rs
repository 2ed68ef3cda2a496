use crate::value::Value;
use serde::Serialize;
use std::fmt;

///
/// FieldType
///
/// Explicit value-type tag for a declared field. Declarations always name
/// their type; nothing is inferred from the call site.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum FieldType {
    Blob,
    Bool,
    Float64,
    Int,
    Text,
    Timestamp,
    Uint,
    Ulid,
}

impl FieldType {
    /// Lowercase label used in messages and snapshots.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Bool => "bool",
            Self::Float64 => "float64",
            Self::Int => "int",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uint => "uint",
            Self::Ulid => "ulid",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// FieldDescriptor
///
/// Raw per-field record captured at declaration time, exactly as the
/// declaration site supplied it. Defaults are applied at resolution, not
/// here: `db_property` and `nullable` stay unset until then.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub class_property: &'static str,
    pub db_property: Option<&'static str>,
    pub ty: FieldType,
    pub nullable: Option<bool>,
    pub default_value: Option<Value>,
    pub is_identifier: bool,
}

impl FieldDescriptor {
    /// Bare descriptor for one class property.
    #[must_use]
    pub const fn new(class_property: &'static str, ty: FieldType) -> Self {
        Self {
            class_property,
            db_property: None,
            ty,
            nullable: None,
            default_value: None,
            is_identifier: false,
        }
    }

    /// Descriptor marked as the class primary key.
    #[must_use]
    pub const fn identifier(class_property: &'static str, ty: FieldType) -> Self {
        let mut descriptor = Self::new(class_property, ty);
        descriptor.is_identifier = true;
        descriptor
    }
}

///
/// ResolvedField
///
/// Final form of a field descriptor: storage name filled in, nullability
/// concrete, identifier normalized to `is_primary`. Computed once per
/// class by the resolver and never mutated afterwards.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedField {
    pub class_property: &'static str,
    pub db_property: &'static str,
    pub ty: FieldType,
    pub nullable: bool,
    pub default_value: Option<Value>,
    pub is_primary: bool,
}

impl ResolvedField {
    /// Apply declaration defaults to a raw descriptor.
    #[must_use]
    pub fn from_raw(raw: &FieldDescriptor) -> Self {
        Self {
            class_property: raw.class_property,
            db_property: raw.db_property.unwrap_or(raw.class_property),
            ty: raw.ty,
            nullable: raw.nullable.unwrap_or(true),
            default_value: raw.default_value.clone(),
            is_primary: raw.is_identifier,
        }
    }
}

///
/// TESTS
///
