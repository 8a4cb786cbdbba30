//! Error types for resource creation and the resource cache.

use thiserror::Error;

/// Errors reported by a resource allocator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// Failed to create a resource.
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),
    /// A requested feature is not supported.
    #[error("feature not supported: {0}")]
    FeatureNotSupported(String),
    /// Out of GPU memory.
    #[error("out of GPU memory")]
    OutOfMemory,
    /// An invalid parameter was provided.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Errors raised while registering fields or allocating resources.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Two declarations of the same resource disagree on a mandatory attribute.
    #[error("conflicting {attribute} for field '{name}': existing {existing}, requested {requested}")]
    DescriptorConflict {
        name: String,
        attribute: &'static str,
        existing: String,
        requested: String,
    },
    /// Aliasing would unify two slots that both already hold a resource.
    #[error("cannot alias '{name}' with '{other}': both already hold a resource")]
    AllocatedResourceConflict { name: String, other: String },
    /// Fields sharing a resource have different external resources registered.
    #[error("fields '{name}' and '{other}' share a resource but name different external resources")]
    ConflictingExternalResources { name: String, other: String },
    /// No format was declared and the defaults provide none.
    #[error("field '{name}' has no format and no default format applies")]
    UnresolvedFormat { name: String },
    /// The allocator failed to create the resource for a slot.
    #[error("failed to allocate resource for field '{name}': {source}")]
    AllocationFailed {
        name: String,
        #[source]
        source: GraphicsError,
    },
}

/// Result alias used by the resource cache.
pub type CacheResult<T> = Result<T, CacheError>;
