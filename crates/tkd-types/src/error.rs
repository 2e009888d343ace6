use thiserror::Error;

/// Errors produced when building typed values from raw JSON.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("snapshot must be a JSON object of objects, found {found} at top level")]
    SnapshotNotAnObject { found: &'static str },

    #[error("class {class:?} must map to a JSON object, found {found}")]
    ClassNotAnObject { class: String, found: &'static str },
}

/// Convenience alias for type construction results.
pub type TypeResult<T> = Result<T, TypeError>;
