use crate::{MAX_COLLECTION_NAME_LEN, MAX_PROPERTY_NAME_LEN};
use thiserror::Error as ThisError;

///
/// NameError
///
/// One identifier-level naming violation. The registry wraps it with the
/// offending class and name.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("name contains forbidden character '{ch}'")]
    ForbiddenChar { ch: char },

    #[error("name uses reserved prefix '{prefix}'")]
    ReservedPrefix { prefix: &'static str },

    #[error("name is {len} chars (limit {max})")]
    TooLong { len: usize, max: usize },
}

/// Validate a class-property or storage-key identifier. Storage documents
/// reject dotted paths and `$`-prefixed operator names.
pub fn validate_property_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.len() > MAX_PROPERTY_NAME_LEN {
        return Err(NameError::TooLong {
            len: name.len(),
            max: MAX_PROPERTY_NAME_LEN,
        });
    }
    if name.starts_with('$') {
        return Err(NameError::ReservedPrefix { prefix: "$" });
    }
    if name.contains('.') {
        return Err(NameError::ForbiddenChar { ch: '.' });
    }

    Ok(())
}

/// Validate a collection identifier. The `system.` namespace is reserved
/// for the backing store's own collections.
pub fn validate_collection_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.len() > MAX_COLLECTION_NAME_LEN {
        return Err(NameError::TooLong {
            len: name.len(),
            max: MAX_COLLECTION_NAME_LEN,
        });
    }
    if name.starts_with("system.") {
        return Err(NameError::ReservedPrefix { prefix: "system." });
    }
    if name.contains('$') {
        return Err(NameError::ForbiddenChar { ch: '$' });
    }

    Ok(())
}

///
/// TESTS
///
