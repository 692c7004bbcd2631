//! Convenience constructors used across the crate.

use super::{MergeError, ReconcileError, StoreError};

impl MergeError {
    /// Build a [`MergeError::TypeMismatch`] for the given field path.
    ///
    /// # Examples
    ///
    /// ```
    /// use patchmerge::MergeError;
    ///
    /// let err = MergeError::type_mismatch("$.interval", "u64", "String");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "type mismatch at '$.interval': expected u64, found String"
    /// );
    /// ```
    #[must_use]
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected,
            found,
        }
    }
}

impl StoreError {
    /// Construct a [`StoreError::NotFound`].
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Construct a [`StoreError::Transport`].
    ///
    /// # Examples
    ///
    /// ```
    /// use patchmerge::StoreError;
    ///
    /// let err = StoreError::transport("/Common/web", "connection reset");
    /// assert!(matches!(err, StoreError::Transport { .. }));
    /// ```
    #[must_use]
    pub fn transport(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            id: id.into(),
            message: message.into(),
        }
    }
}

impl ReconcileError {
    /// Wrap a store error raised while fetching the existing resource.
    #[must_use]
    pub fn fetch_failed(id: impl Into<String>, source: StoreError) -> Self {
        Self::FetchFailed {
            id: id.into(),
            source,
        }
    }

    /// Wrap a store error raised while applying the patch.
    #[must_use]
    pub fn apply_failed(id: impl Into<String>, source: StoreError) -> Self {
        Self::ApplyFailed {
            id: id.into(),
            source,
        }
    }

    /// Returns the underlying store error for fetch and apply failures.
    #[must_use]
    pub const fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::FetchFailed { source, .. } | Self::ApplyFailed { source, .. } => Some(source),
            Self::Merge(_) | Self::Render(_) => None,
        }
    }
}
