//! Error types for fixture generation

use thiserror::Error;

/// Errors that can occur while resolving directives or generating values
#[derive(Debug, Error)]
pub enum MockError {
    /// Type not registered with the metadata source
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Override callback name does not resolve on the owning type
    #[error("Callback not found: {type_name}.{callback}")]
    CallbackNotFound { type_name: String, callback: String },

    /// Provider name is not registered in the formatter catalog
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// Negative element count in a count directive
    #[error("Invalid count for {field}: {count}")]
    InvalidCount { field: String, count: i64 },

    /// Inverted or negative count-range bounds
    #[error("Invalid count range for {field}: [{min}, {max}]")]
    InvalidCountRange { field: String, min: i64, max: i64 },

    /// Per-call element budget exhausted
    #[error("Element budget exceeded: {requested} more elements would pass the limit of {limit}")]
    ElementBudgetExceeded { requested: usize, limit: usize },

    /// Reflector was handed a non-object instance
    #[error("Instance of {0} is not an object")]
    NotAnObject(String),

    /// Annotation record could not be read or parsed
    #[error("Annotation load error: {0}")]
    AnnotationLoad(String),
}

impl From<std::io::Error> for MockError {
    fn from(err: std::io::Error) -> Self {
        MockError::AnnotationLoad(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for MockError {
    fn from(err: serde_json::Error) -> Self {
        MockError::AnnotationLoad(err.to_string())
    }
}

impl From<serde_yaml::Error> for MockError {
    fn from(err: serde_yaml::Error) -> Self {
        MockError::AnnotationLoad(err.to_string())
    }
}

/// Result type alias for mocking operations
pub type MockResult<T> = Result<T, MockError>;
