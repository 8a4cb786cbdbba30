//! GPU resources.
//!
//! This module contains the resource types produced by a
//! [`ResourceAllocator`](crate::backend::ResourceAllocator):
//! - [`Texture`] - GPU texture/image
//! - [`Buffer`] - GPU memory buffer
//! - [`Resource`] - tagged handle over either kind
//!
//! Resources are reference-counted with [`Arc`]. The resource cache is only one
//! of the holders; the GPU object is released when the last holder drops it.

mod buffer;
mod texture;

use std::sync::Arc;

pub use buffer::Buffer;
pub use texture::Texture;

/// Shared handle to a texture or a buffer.
///
/// Cloning a `Resource` clones the inner `Arc`, so clones refer to the same
/// GPU object. Use [`Resource::ptr_eq`] to compare identity.
#[derive(Debug, Clone)]
pub enum Resource {
    /// A texture resource.
    Texture(Arc<Texture>),
    /// A buffer resource.
    Buffer(Arc<Buffer>),
}

impl Resource {
    /// Returns the texture if this is a texture resource.
    pub fn as_texture(&self) -> Option<&Arc<Texture>> {
        match self {
            Self::Texture(texture) => Some(texture),
            Self::Buffer(_) => None,
        }
    }

    /// Returns the buffer if this is a buffer resource.
    pub fn as_buffer(&self) -> Option<&Arc<Buffer>> {
        match self {
            Self::Texture(_) => None,
            Self::Buffer(buffer) => Some(buffer),
        }
    }

    /// Returns true if this is a texture resource.
    pub fn is_texture(&self) -> bool {
        matches!(self, Self::Texture(_))
    }

    /// Returns true if this is a buffer resource.
    pub fn is_buffer(&self) -> bool {
        matches!(self, Self::Buffer(_))
    }

    /// Get the resource label, if set.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Texture(texture) => texture.label(),
            Self::Buffer(buffer) => buffer.label(),
        }
    }

    /// Returns true if both handles refer to the same GPU object.
    pub fn ptr_eq(&self, other: &Resource) -> bool {
        match (self, other) {
            (Self::Texture(a), Self::Texture(b)) => Arc::ptr_eq(a, b),
            (Self::Buffer(a), Self::Buffer(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Number of strong references currently held to the GPU object.
    pub fn strong_count(&self) -> usize {
        match self {
            Self::Texture(texture) => Arc::strong_count(texture),
            Self::Buffer(buffer) => Arc::strong_count(buffer),
        }
    }
}

impl From<Arc<Texture>> for Resource {
    fn from(texture: Arc<Texture>) -> Self {
        Self::Texture(texture)
    }
}

impl From<Arc<Buffer>> for Resource {
    fn from(buffer: Arc<Buffer>) -> Self {
        Self::Buffer(buffer)
    }
}
