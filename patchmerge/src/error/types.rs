//! Error enums for every layer of the crate.

use thiserror::Error;

/// Failures raised by the deep-merge engine.
///
/// Only type disagreements are errors; missing keys and unnameable set
/// elements degrade silently (the latter are counted in
/// [`crate::MergeStats`]).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MergeError {
    /// Source and destination do not share a concrete type.
    #[error("type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Field path at which the mismatch was detected (`$` for the root).
        path: String,
        /// Type name of the destination.
        expected: &'static str,
        /// Type name of the source.
        found: &'static str,
    },
}

/// Errors reported by a [`crate::ResourceStore`] implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// The store holds no resource under the identifier.
    #[error("resource '{id}' not found")]
    NotFound {
        /// Identifier that was requested.
        id: String,
    },

    /// The store could not be reached or rejected the request.
    #[error("transport failure for '{id}': {message}")]
    Transport {
        /// Identifier the request targeted.
        id: String,
        /// Human-readable description supplied by the transport.
        message: String,
    },
}

/// Failures surfaced by [`crate::reconcile`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReconcileError {
    /// The existing resource could not be fetched; nothing was attempted.
    #[error("failed to fetch '{id}' before patching: {source}")]
    FetchFailed {
        /// Identifier of the resource being reconciled.
        id: String,
        /// Store error, unchanged.
        #[source]
        source: StoreError,
    },

    /// The store rejected the patch.
    #[error("failed to apply patch to '{id}': {source}")]
    ApplyFailed {
        /// Identifier of the resource being reconciled.
        id: String,
        /// Store error, unchanged.
        #[source]
        source: StoreError,
    },

    /// The merge engine rejected the inputs.
    #[error("failed to merge patch: {0}")]
    Merge(#[from] MergeError),

    /// Rendering the dry-run report failed.
    #[error("failed to render patch report: {0}")]
    Render(#[from] serde_json::Error),
}

/// Failures while normalising decoded resources.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Both the inline and the expanded-reference list were populated.
    #[error("'{field}' and '{field}Reference' can not both be set for: {owner}")]
    DualRepresentation {
        /// Name of the resource being decoded.
        owner: String,
        /// Inline field name.
        field: &'static str,
    },
}

/// Failures while loading [`crate::ReconcileSettings`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// Figment could not gather or extract the layered settings.
    #[error("failed to load reconcile settings: {0}")]
    Load(#[from] Box<figment::Error>),
}
