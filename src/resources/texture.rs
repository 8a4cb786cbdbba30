//! GPU texture resource.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{Extent3d, TextureDescriptor, TextureDimension, TextureFormat, TextureUsage};

/// A GPU texture resource.
///
/// Textures are created by a [`ResourceAllocator`](crate::backend::ResourceAllocator)
/// and handed out as `Arc<Texture>`. The underlying object lives until the last
/// holder drops its reference.
///
/// # Example
///
/// ```ignore
/// let texture = allocator.create_texture(&TextureDescriptor::new_2d(
///     1920, 1080,
///     TextureFormat::Rgba8Unorm,
///     TextureUsage::RENDER_ATTACHMENT,
/// ))?;
/// println!("Texture size: {}x{}", texture.width(), texture.height());
/// ```
pub struct Texture {
    id: u64,
    descriptor: TextureDescriptor,
}

impl Texture {
    /// Wrap a descriptor into a new texture object with a unique id.
    pub fn new(descriptor: TextureDescriptor) -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            descriptor,
        }
    }

    /// Process-unique id of this texture.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the texture descriptor.
    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    /// Get the texture dimensionality.
    pub fn dimension(&self) -> TextureDimension {
        self.descriptor.dimension
    }

    /// Get the texture size.
    pub fn size(&self) -> Extent3d {
        self.descriptor.size
    }

    /// Get the texture width.
    pub fn width(&self) -> u32 {
        self.descriptor.size.width
    }

    /// Get the texture height.
    pub fn height(&self) -> u32 {
        self.descriptor.size.height
    }

    /// Get the texture depth.
    pub fn depth(&self) -> u32 {
        self.descriptor.size.depth
    }

    /// Get the texture format.
    pub fn format(&self) -> TextureFormat {
        self.descriptor.format
    }

    /// Get the usage flags.
    pub fn usage(&self) -> TextureUsage {
        self.descriptor.usage
    }

    /// Get the array layer count.
    pub fn array_layer_count(&self) -> u32 {
        self.descriptor.array_layer_count
    }

    /// Get the mip level count.
    pub fn mip_level_count(&self) -> u32 {
        self.descriptor.mip_level_count
    }

    /// Get the sample count.
    pub fn sample_count(&self) -> u32 {
        self.descriptor.sample_count
    }

    /// Get the texture label, if set.
    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.id)
            .field("size", &self.descriptor.size)
            .field("format", &self.descriptor.format)
            .field("usage", &self.descriptor.usage)
            .field("label", &self.descriptor.label)
            .finish()
    }
}

// Ensure Texture is Send + Sync
static_assertions::assert_impl_all!(Texture: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_debug() {
        let desc = TextureDescriptor::new_2d(
            1920,
            1080,
            TextureFormat::Rgba8Unorm,
            TextureUsage::RENDER_ATTACHMENT,
        );
        let texture = Texture::new(desc);
        let debug = format!("{:?}", texture);
        assert!(debug.contains("Texture"));
        assert!(debug.contains("1920"));
    }

    #[test]
    fn test_texture_ids_are_unique() {
        let desc = TextureDescriptor::new_2d(
            800,
            600,
            TextureFormat::Rgba8Unorm,
            TextureUsage::TEXTURE_BINDING,
        );
        let a = Texture::new(desc.clone());
        let b = Texture::new(desc);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.width(), 800);
        assert_eq!(a.height(), 600);
        assert_eq!(a.depth(), 1);
    }
}
