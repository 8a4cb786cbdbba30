//! Buffer usage and descriptors.
//!
//! Buffer fields carry their size in bytes; the cache turns a resolved buffer
//! field into a [`BufferDescriptor`] whose usage is derived from the bind flags
//! of every pass that declared it.

use bitflags::bitflags;

/// Buffer sizes must be a multiple of this many bytes.
pub const BUFFER_SIZE_ALIGNMENT: u64 = 4;

bitflags! {
    /// Ways a pass may bind a buffer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        /// Vertex input.
        const VERTEX = 1 << 0;
        /// Index input.
        const INDEX = 1 << 1;
        /// Constant (uniform) data.
        const UNIFORM = 1 << 2;
        /// Read or read-write storage access from shaders.
        const STORAGE = 1 << 3;
        /// Indirect draw or dispatch arguments.
        const INDIRECT = 1 << 4;
        /// Source of a copy.
        const COPY_SRC = 1 << 5;
        /// Destination of a copy.
        const COPY_DST = 1 << 6;
    }
}

impl Default for BufferUsage {
    fn default() -> Self {
        Self::empty()
    }
}

/// Descriptor for creating a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BufferDescriptor {
    /// Debug label, the field name for cache-allocated buffers.
    pub label: Option<String>,
    /// Size in bytes.
    pub size: u64,
    /// Usage flags.
    pub usage: BufferUsage,
}

impl BufferDescriptor {
    /// Create an unlabeled buffer descriptor.
    pub fn new(size: u64, usage: BufferUsage) -> Self {
        Self {
            label: None,
            size,
            usage,
        }
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns true if the size is a multiple of [`BUFFER_SIZE_ALIGNMENT`].
    pub fn is_aligned(&self) -> bool {
        self.size % BUFFER_SIZE_ALIGNMENT == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment() {
        assert!(BufferDescriptor::new(1024, BufferUsage::STORAGE).is_aligned());
        assert!(BufferDescriptor::new(0, BufferUsage::STORAGE).is_aligned());
        assert!(!BufferDescriptor::new(6, BufferUsage::UNIFORM).is_aligned());
    }
}
