//! Dummy resource allocator for testing and development.
//!
//! This backend doesn't perform actual GPU operations but validates
//! descriptors against [`DeviceCapabilities`] and keeps weak references to
//! everything it created, so callers can observe when resources are released.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use crate::error::GraphicsError;
use crate::resources::{Buffer, Texture};
use crate::types::{
    BufferDescriptor, TextureDescriptor, TextureDimension, TextureUsage, BUFFER_SIZE_ALIGNMENT,
};

use super::{DeviceCapabilities, ResourceAllocator};

/// Dummy resource allocator.
#[derive(Debug)]
pub struct DummyBackend {
    capabilities: DeviceCapabilities,
    // Track allocated resources (weak references for leak checks)
    textures: RwLock<Vec<Weak<Texture>>>,
    buffers: RwLock<Vec<Weak<Buffer>>>,
    created: AtomicUsize,
}

impl DummyBackend {
    /// Create a new dummy backend with default capabilities.
    pub fn new() -> Self {
        Self::with_capabilities(DeviceCapabilities::default())
    }

    /// Create a new dummy backend with the given limits.
    pub fn with_capabilities(capabilities: DeviceCapabilities) -> Self {
        Self {
            capabilities,
            textures: RwLock::new(Vec::new()),
            buffers: RwLock::new(Vec::new()),
            created: AtomicUsize::new(0),
        }
    }

    /// Get the device capabilities.
    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    /// Total number of resources successfully created so far.
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    /// Number of textures created by this backend that are still alive.
    pub fn live_texture_count(&self) -> usize {
        self.textures
            .read()
            .map(|textures| textures.iter().filter(|t| t.strong_count() > 0).count())
            .unwrap_or(0)
    }

    /// Number of texture entries currently tracked, live or not yet pruned.
    pub fn tracked_texture_count(&self) -> usize {
        self.textures.read().map(|textures| textures.len()).unwrap_or(0)
    }

    /// Number of buffers created by this backend that are still alive.
    pub fn live_buffer_count(&self) -> usize {
        self.buffers
            .read()
            .map(|buffers| buffers.iter().filter(|b| b.strong_count() > 0).count())
            .unwrap_or(0)
    }

    fn validate_texture(&self, descriptor: &TextureDescriptor) -> Result<(), GraphicsError> {
        let max_dim = self.capabilities.max_texture_dimension;
        let size = descriptor.size;
        if size.width > max_dim || size.height > max_dim || size.depth > max_dim {
            return Err(GraphicsError::InvalidParameter(format!(
                "texture dimension exceeds maximum {max_dim}"
            )));
        }

        if size.is_empty() {
            return Err(GraphicsError::InvalidParameter(
                "texture dimensions cannot be zero".to_string(),
            ));
        }

        if descriptor.array_layer_count == 0
            || descriptor.mip_level_count == 0
            || descriptor.sample_count == 0
        {
            return Err(GraphicsError::InvalidParameter(
                "texture layer, mip and sample counts cannot be zero".to_string(),
            ));
        }

        if descriptor.dimension == TextureDimension::Cube {
            if size.width != size.height {
                return Err(GraphicsError::InvalidParameter(format!(
                    "cube texture faces must be square, got {}x{}",
                    size.width, size.height
                )));
            }
            if descriptor.array_layer_count % 6 != 0 {
                return Err(GraphicsError::InvalidParameter(format!(
                    "cube texture layer count {} is not a multiple of 6",
                    descriptor.array_layer_count
                )));
            }
        }

        if descriptor.format.is_depth_stencil()
            && descriptor.usage.contains(TextureUsage::STORAGE_BINDING)
        {
            return Err(GraphicsError::FeatureNotSupported(format!(
                "storage binding on depth format {:?}",
                descriptor.format
            )));
        }

        Ok(())
    }
}

impl ResourceAllocator for DummyBackend {
    fn name(&self) -> &'static str {
        "Dummy"
    }

    fn create_texture(
        &self,
        descriptor: &TextureDescriptor,
    ) -> Result<Arc<Texture>, GraphicsError> {
        self.validate_texture(descriptor)?;

        let texture = Arc::new(Texture::new(descriptor.clone()));

        // Track it, dropping entries for textures that were already released
        if let Ok(mut textures) = self.textures.write() {
            textures.retain(|w| w.strong_count() > 0);
            textures.push(Arc::downgrade(&texture));
        }
        self.created.fetch_add(1, Ordering::Relaxed);

        log::trace!(
            "DummyBackend: creating texture {:?} ({}x{}x{}, {:?})",
            descriptor.label,
            descriptor.size.width,
            descriptor.size.height,
            descriptor.size.depth,
            descriptor.format
        );

        Ok(texture)
    }

    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<Arc<Buffer>, GraphicsError> {
        if descriptor.size > self.capabilities.max_buffer_size {
            return Err(GraphicsError::InvalidParameter(format!(
                "buffer size {} exceeds maximum {}",
                descriptor.size, self.capabilities.max_buffer_size
            )));
        }

        if descriptor.size == 0 {
            return Err(GraphicsError::InvalidParameter(
                "buffer size cannot be zero".to_string(),
            ));
        }

        if !descriptor.is_aligned() {
            return Err(GraphicsError::InvalidParameter(format!(
                "buffer size {} is not a multiple of {BUFFER_SIZE_ALIGNMENT}",
                descriptor.size
            )));
        }

        let buffer = Arc::new(Buffer::new(descriptor.clone()));

        if let Ok(mut buffers) = self.buffers.write() {
            buffers.retain(|w| w.strong_count() > 0);
            buffers.push(Arc::downgrade(&buffer));
        }
        self.created.fetch_add(1, Ordering::Relaxed);

        log::trace!(
            "DummyBackend: creating buffer {:?} (size: {})",
            descriptor.label,
            descriptor.size
        );

        Ok(buffer)
    }
}

impl Default for DummyBackend {
    fn default() -> Self {
        Self::new()
    }
}
