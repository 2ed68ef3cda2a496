use crate::types::Timestamp;
use serde::Serialize;
use std::fmt;
use ulid::Ulid;

///
/// Value
///
/// Runtime document value used for field defaults and instance state.
/// Scalar variants stay aligned with `FieldType`; `Null` and `List` carry
/// no type tag of their own.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub enum Value {
    /// Raw bytes.
    Blob(Vec<u8>),

    /// Boolean.
    Bool(bool),

    /// 64-bit float.
    Float64(f64),

    /// Signed 64-bit integer.
    Int(i64),

    /// Ordered list of values.
    List(Vec<Self>),

    /// Absent / null.
    #[default]
    Null,

    /// UTF-8 text.
    Text(String),

    /// Seconds since epoch.
    Timestamp(Timestamp),

    /// Unsigned 64-bit integer.
    Uint(u64),

    /// ULID identifier.
    Ulid(Ulid),
}

impl Value {
    /// Convenience constructor for text values.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Short label for the variant, used in messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Blob(_) => "blob",
            Self::Bool(_) => "bool",
            Self::Float64(_) => "float64",
            Self::Int(_) => "int",
            Self::List(_) => "list",
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
            Self::Uint(_) => "uint",
            Self::Ulid(_) => "ulid",
        }
    }

    /// True when the value is `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob(bytes) => write!(f, "blob({} bytes)", bytes.len()),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::List(items) => write!(f, "list({} items)", items.len()),
            Self::Null => f.write_str("null"),
            Self::Text(v) => f.write_str(v),
            Self::Timestamp(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Ulid(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v)
    }
}

impl From<Ulid> for Value {
    fn from(v: Ulid) -> Self {
        Self::Ulid(v)
    }
}

///
/// TESTS
///
