//! Resource creation backends.
//!
//! The resource cache never talks to a GPU API directly. Concrete textures and
//! buffers are created through the [`ResourceAllocator`] trait, which a GPU
//! backend implements.
//!
//! # Available Backends
//!
//! - `dummy` (default): No-op allocator for testing and development. It
//!   validates descriptors the way a real device would and tracks live resources.

#[cfg(feature = "dummy")]
pub mod dummy;

use std::sync::Arc;

use crate::error::GraphicsError;
use crate::resources::{Buffer, Texture};
use crate::types::{BufferDescriptor, TextureDescriptor};

#[cfg(feature = "dummy")]
pub use dummy::DummyBackend;

/// Limits enforced when creating resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceCapabilities {
    /// Maximum texture dimension.
    pub max_texture_dimension: u32,
    /// Maximum buffer size.
    pub max_buffer_size: u64,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            max_texture_dimension: 16384,
            max_buffer_size: 1 << 30, // 1 GB
        }
    }
}

impl DeviceCapabilities {
    /// Set the maximum texture dimension.
    pub fn with_max_texture_dimension(mut self, max: u32) -> Self {
        self.max_texture_dimension = max;
        self
    }

    /// Set the maximum buffer size.
    pub fn with_max_buffer_size(mut self, max: u64) -> Self {
        self.max_buffer_size = max;
        self
    }
}

/// Creates concrete GPU resources from finalized descriptors.
///
/// Creation is synchronous and must not call back into the resource cache.
pub trait ResourceAllocator: Send + Sync + 'static {
    /// Get the allocator name.
    fn name(&self) -> &'static str;

    /// Create a texture resource.
    fn create_texture(
        &self,
        descriptor: &TextureDescriptor,
    ) -> Result<Arc<Texture>, GraphicsError>;

    /// Create a buffer resource.
    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<Arc<Buffer>, GraphicsError>;
}
