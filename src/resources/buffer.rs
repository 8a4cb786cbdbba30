//! GPU buffer resource.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{BufferDescriptor, BufferUsage};

/// A GPU buffer resource.
///
/// Buffers are created by a [`ResourceAllocator`](crate::backend::ResourceAllocator)
/// and handed out as `Arc<Buffer>`.
pub struct Buffer {
    id: u64,
    descriptor: BufferDescriptor,
}

impl Buffer {
    /// Wrap a descriptor into a new buffer object with a unique id.
    pub fn new(descriptor: BufferDescriptor) -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            descriptor,
        }
    }

    /// Process-unique id of this buffer.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the buffer descriptor.
    pub fn descriptor(&self) -> &BufferDescriptor {
        &self.descriptor
    }

    /// Get the buffer size in bytes.
    pub fn size(&self) -> u64 {
        self.descriptor.size
    }

    /// Get the usage flags.
    pub fn usage(&self) -> BufferUsage {
        self.descriptor.usage
    }

    /// Get the buffer label, if set.
    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("id", &self.id)
            .field("size", &self.descriptor.size)
            .field("usage", &self.descriptor.usage)
            .field("label", &self.descriptor.label)
            .finish()
    }
}

static_assertions::assert_impl_all!(Buffer: Send, Sync);
