//! Common types and descriptors for graphics resources.
//!
//! This module contains format enums, usage flags, and descriptor structs
//! consumed by the resource allocator.

mod buffer;
mod common;
mod texture;

pub use buffer::{BufferDescriptor, BufferUsage, BUFFER_SIZE_ALIGNMENT};
pub use common::Extent3d;
pub use texture::{TextureDescriptor, TextureDimension, TextureFormat, TextureUsage};
