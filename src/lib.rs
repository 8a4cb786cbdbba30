//! # RedLilium Resource Cache
//!
//! Resource management for render graph compilation.
//!
//! ## Overview
//!
//! Render passes declare named fields with reflection metadata instead of
//! owning GPU resources. This crate provides:
//! - [`RenderPassReflection`] / [`Field`] - What a pass needs
//! - [`ResourceCache`] - Field registration, aliasing, descriptor merging and
//!   allocation for one graph configuration
//! - [`ResourceAllocator`] - Trait for the backend that creates resources
//! - [`DummyBackend`] - Allocator without a GPU, for testing
//!
//! ## Example
//!
//! ```ignore
//! use redlilium_resource_cache::{DefaultProperties, DummyBackend, Field, ResourceCache};
//!
//! let mut cache = ResourceCache::new(Arc::new(DummyBackend::new()));
//! cache.register_field("Blur.input", &Field::texture_2d("input"), None)?;
//! cache.allocate_resources(&DefaultProperties::new(1920, 1080)
//!     .with_color_format(TextureFormat::Rgba8Unorm))?;
//! let input = cache.get_resource("Blur.input");
//! ```

pub mod backend;
pub mod error;
pub mod graph;
pub mod resources;
pub mod types;

// Re-export main types for convenience
#[cfg(feature = "dummy")]
pub use backend::DummyBackend;
pub use backend::{DeviceCapabilities, ResourceAllocator};
pub use error::{CacheError, CacheResult, GraphicsError};
pub use graph::{
    field_key, split_field_key, AllocationStats, DefaultProperties, Field, FieldConflict,
    FieldKind, FieldVisibility, RenderPassReflection, ResourceBindFlags, ResourceCache,
};
pub use resources::{Buffer, Resource, Texture};
pub use types::{
    BufferDescriptor, BufferUsage, Extent3d, TextureDescriptor, TextureDimension, TextureFormat,
    TextureUsage, BUFFER_SIZE_ALIGNMENT,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
