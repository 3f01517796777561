//! Model-level error type.

/// Errors raised when constructing model values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModelError {
    /// A message body was empty (or whitespace-only) after trimming.
    #[error("message text is empty after trimming")]
    EmptyText,
}
