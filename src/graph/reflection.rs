//! Pass reflection: the fields a render pass declares.
//!
//! A pass does not own GPU resources. It describes each input, output and
//! internal resource as a [`Field`], and the
//! [`ResourceCache`](super::ResourceCache) turns the collected fields into
//! concrete resources. Attributes left at zero (or a `None` format) are
//! unspecified and get filled from other declarations of the same resource or
//! from the cache's default properties.

use std::fmt::Debug;

use bitflags::bitflags;
use thiserror::Error;

use crate::resources::Resource;
use crate::types::{BufferUsage, TextureDimension, TextureFormat, TextureUsage};

/// Kind of resource a field describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldKind {
    /// One-dimensional texture.
    Texture1D,
    /// Two-dimensional texture.
    #[default]
    Texture2D,
    /// Three-dimensional texture.
    Texture3D,
    /// Cube map texture.
    TextureCube,
    /// Raw buffer. The field width is the size in bytes.
    Buffer,
}

impl FieldKind {
    /// Returns true for every texture kind.
    pub fn is_texture(&self) -> bool {
        !matches!(self, Self::Buffer)
    }

    /// Texture dimensionality for texture kinds.
    pub fn texture_dimension(&self) -> Option<TextureDimension> {
        match self {
            Self::Texture1D => Some(TextureDimension::D1),
            Self::Texture2D => Some(TextureDimension::D2),
            Self::Texture3D => Some(TextureDimension::D3),
            Self::TextureCube => Some(TextureDimension::Cube),
            Self::Buffer => None,
        }
    }

    fn from_dimension(dimension: TextureDimension) -> Self {
        match dimension {
            TextureDimension::D1 => Self::Texture1D,
            TextureDimension::D2 => Self::Texture2D,
            TextureDimension::D3 => Self::Texture3D,
            TextureDimension::Cube => Self::TextureCube,
        }
    }
}

bitflags! {
    /// How passes bind a field's resource.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResourceBindFlags: u32 {
        /// Sampled texture or read-only buffer.
        const SHADER_RESOURCE = 1 << 0;
        /// Storage texture or read-write buffer.
        const UNORDERED_ACCESS = 1 << 1;
        /// Color render attachment.
        const RENDER_TARGET = 1 << 2;
        /// Depth/stencil attachment.
        const DEPTH_STENCIL = 1 << 3;
        /// Uniform buffer.
        const CONSTANT = 1 << 4;
        /// Vertex buffer.
        const VERTEX = 1 << 5;
        /// Index buffer.
        const INDEX = 1 << 6;
        /// Indirect argument buffer.
        const INDIRECT = 1 << 7;
        /// Copy source.
        const COPY_SRC = 1 << 8;
        /// Copy destination.
        const COPY_DST = 1 << 9;
    }
}

impl Default for ResourceBindFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl ResourceBindFlags {
    /// Flags that carry meaning for textures.
    pub fn texture_flags() -> Self {
        Self::SHADER_RESOURCE
            | Self::UNORDERED_ACCESS
            | Self::RENDER_TARGET
            | Self::DEPTH_STENCIL
            | Self::COPY_SRC
            | Self::COPY_DST
    }

    /// Flags that carry meaning for buffers.
    pub fn buffer_flags() -> Self {
        Self::all() - Self::RENDER_TARGET - Self::DEPTH_STENCIL
    }

    /// Convert to texture usage flags.
    pub fn to_texture_usage(self) -> TextureUsage {
        let mut usage = TextureUsage::empty();
        if self.contains(Self::SHADER_RESOURCE) {
            usage |= TextureUsage::TEXTURE_BINDING;
        }
        if self.contains(Self::UNORDERED_ACCESS) {
            usage |= TextureUsage::STORAGE_BINDING;
        }
        if self.intersects(Self::RENDER_TARGET | Self::DEPTH_STENCIL) {
            usage |= TextureUsage::RENDER_ATTACHMENT;
        }
        if self.contains(Self::COPY_SRC) {
            usage |= TextureUsage::COPY_SRC;
        }
        if self.contains(Self::COPY_DST) {
            usage |= TextureUsage::COPY_DST;
        }
        usage
    }

    /// Convert to buffer usage flags.
    pub fn to_buffer_usage(self) -> BufferUsage {
        let mut usage = BufferUsage::empty();
        if self.intersects(Self::SHADER_RESOURCE | Self::UNORDERED_ACCESS) {
            usage |= BufferUsage::STORAGE;
        }
        if self.contains(Self::CONSTANT) {
            usage |= BufferUsage::UNIFORM;
        }
        if self.contains(Self::VERTEX) {
            usage |= BufferUsage::VERTEX;
        }
        if self.contains(Self::INDEX) {
            usage |= BufferUsage::INDEX;
        }
        if self.contains(Self::INDIRECT) {
            usage |= BufferUsage::INDIRECT;
        }
        if self.contains(Self::COPY_SRC) {
            usage |= BufferUsage::COPY_SRC;
        }
        if self.contains(Self::COPY_DST) {
            usage |= BufferUsage::COPY_DST;
        }
        usage
    }

    fn from_texture_usage(usage: TextureUsage, format: TextureFormat) -> Self {
        let mut flags = Self::empty();
        if usage.contains(TextureUsage::TEXTURE_BINDING) {
            flags |= Self::SHADER_RESOURCE;
        }
        if usage.contains(TextureUsage::STORAGE_BINDING) {
            flags |= Self::UNORDERED_ACCESS;
        }
        if usage.contains(TextureUsage::RENDER_ATTACHMENT) {
            flags |= if format.is_depth_stencil() {
                Self::DEPTH_STENCIL
            } else {
                Self::RENDER_TARGET
            };
        }
        if usage.contains(TextureUsage::COPY_SRC) {
            flags |= Self::COPY_SRC;
        }
        if usage.contains(TextureUsage::COPY_DST) {
            flags |= Self::COPY_DST;
        }
        flags
    }

    fn from_buffer_usage(usage: BufferUsage) -> Self {
        let mut flags = Self::empty();
        if usage.contains(BufferUsage::STORAGE) {
            flags |= Self::SHADER_RESOURCE | Self::UNORDERED_ACCESS;
        }
        if usage.contains(BufferUsage::UNIFORM) {
            flags |= Self::CONSTANT;
        }
        if usage.contains(BufferUsage::VERTEX) {
            flags |= Self::VERTEX;
        }
        if usage.contains(BufferUsage::INDEX) {
            flags |= Self::INDEX;
        }
        if usage.contains(BufferUsage::INDIRECT) {
            flags |= Self::INDIRECT;
        }
        if usage.contains(BufferUsage::COPY_SRC) {
            flags |= Self::COPY_SRC;
        }
        if usage.contains(BufferUsage::COPY_DST) {
            flags |= Self::COPY_DST;
        }
        flags
    }
}

bitflags! {
    /// Direction of a field relative to its pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldVisibility: u8 {
        /// The pass reads the resource.
        const INPUT = 1 << 0;
        /// The pass writes the resource.
        const OUTPUT = 1 << 1;
        /// Scratch resource private to the pass.
        const INTERNAL = 1 << 2;
    }
}

impl Default for FieldVisibility {
    fn default() -> Self {
        Self::empty()
    }
}

/// Reflection data describing one resource a pass reads or writes.
///
/// # Example
///
/// ```ignore
/// let field = Field::texture_2d("color")
///     .with_format(TextureFormat::Rgba16Float)
///     .with_bind_flags(ResourceBindFlags::RENDER_TARGET);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Field {
    name: String,
    description: String,
    kind: FieldKind,
    width: u32,
    height: u32,
    depth: u32,
    array_size: u32,
    mip_levels: u32,
    sample_count: u32,
    format: Option<TextureFormat>,
    bind_flags: ResourceBindFlags,
    visibility: FieldVisibility,
}

impl Field {
    /// Create a field of the given kind with every attribute unspecified.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    /// Create a 1D texture field.
    pub fn texture_1d(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Texture1D)
    }

    /// Create a 2D texture field.
    pub fn texture_2d(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Texture2D)
    }

    /// Create a 3D texture field.
    pub fn texture_3d(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Texture3D)
    }

    /// Create a cube map field.
    pub fn texture_cube(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::TextureCube)
    }

    /// Create a buffer field of `size` bytes (0 leaves the size unspecified).
    pub fn buffer(name: impl Into<String>, size: u32) -> Self {
        Self {
            width: size,
            ..Self::new(name, FieldKind::Buffer)
        }
    }

    /// Set a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set width and height. Zero leaves an axis unspecified.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the depth of a 3D texture.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the array size (number of cubes for cube maps).
    pub fn with_array_size(mut self, array_size: u32) -> Self {
        self.array_size = array_size;
        self
    }

    /// Set the mip level count.
    pub fn with_mip_levels(mut self, mip_levels: u32) -> Self {
        self.mip_levels = mip_levels;
        self
    }

    /// Set the sample count.
    pub fn with_sample_count(mut self, sample_count: u32) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Set the format.
    pub fn with_format(mut self, format: TextureFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the bind flags.
    pub fn with_bind_flags(mut self, bind_flags: ResourceBindFlags) -> Self {
        self.bind_flags = bind_flags;
        self
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: FieldVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn array_size(&self) -> u32 {
        self.array_size
    }

    pub fn mip_levels(&self) -> u32 {
        self.mip_levels
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn format(&self) -> Option<TextureFormat> {
        self.format
    }

    pub fn bind_flags(&self) -> ResourceBindFlags {
        self.bind_flags
    }

    pub fn visibility(&self) -> FieldVisibility {
        self.visibility
    }

    /// Buffer size in bytes, for buffer fields.
    pub fn buffer_size(&self) -> Option<u32> {
        (self.kind == FieldKind::Buffer).then_some(self.width)
    }

    /// Describe an existing resource as a fully specified field.
    pub fn from_resource(name: impl Into<String>, resource: &Resource) -> Self {
        match resource {
            Resource::Texture(texture) => {
                let kind = FieldKind::from_dimension(texture.dimension());
                let array_size = if kind == FieldKind::TextureCube {
                    texture.array_layer_count() / 6
                } else {
                    texture.array_layer_count()
                };
                Self {
                    name: name.into(),
                    description: String::new(),
                    kind,
                    width: texture.width(),
                    height: texture.height(),
                    depth: texture.depth(),
                    array_size,
                    mip_levels: texture.mip_level_count(),
                    sample_count: texture.sample_count(),
                    format: Some(texture.format()),
                    bind_flags: ResourceBindFlags::from_texture_usage(
                        texture.usage(),
                        texture.format(),
                    ),
                    visibility: FieldVisibility::empty(),
                }
            }
            Resource::Buffer(buffer) => Self {
                width: u32::try_from(buffer.size()).unwrap_or(u32::MAX),
                bind_flags: ResourceBindFlags::from_buffer_usage(buffer.usage()),
                ..Self::new(name, FieldKind::Buffer)
            },
        }
    }

    /// Merge another declaration of the same resource into this one.
    ///
    /// Unspecified attributes take the other side's value. Two specified but
    /// different values are a conflict. Bind flags and visibility accumulate.
    /// On conflict `self` is left untouched.
    pub fn merge(&mut self, other: &Field) -> Result<(), FieldConflict> {
        if self.kind != other.kind {
            return Err(FieldConflict::new("resource kind", self.kind, other.kind));
        }

        let merged = Field {
            name: self.name.clone(),
            description: if self.description.is_empty() {
                other.description.clone()
            } else {
                self.description.clone()
            },
            kind: self.kind,
            width: merge_attribute(self.width_attribute(), self.width, other.width)?,
            height: merge_attribute("height", self.height, other.height)?,
            depth: merge_attribute("depth", self.depth, other.depth)?,
            array_size: merge_attribute("array size", self.array_size, other.array_size)?,
            mip_levels: merge_attribute("mip levels", self.mip_levels, other.mip_levels)?,
            sample_count: merge_attribute("sample count", self.sample_count, other.sample_count)?,
            format: merge_format(self.format, other.format)?,
            bind_flags: self.bind_flags | other.bind_flags,
            visibility: self.visibility | other.visibility,
        };

        *self = merged;
        Ok(())
    }

    /// Check that `resource_field` fulfills every requirement of this field.
    ///
    /// Specified attributes must match exactly and every bind flag relevant
    /// to the resource kind must be present.
    pub fn check_satisfied_by(&self, resource_field: &Field) -> Result<(), FieldConflict> {
        if self.kind != resource_field.kind {
            return Err(FieldConflict::new(
                "resource kind",
                resource_field.kind,
                self.kind,
            ));
        }

        let checks = [
            (self.width_attribute(), self.width, resource_field.width),
            ("height", self.height, resource_field.height),
            ("depth", self.depth, resource_field.depth),
            ("array size", self.array_size, resource_field.array_size),
            ("mip levels", self.mip_levels, resource_field.mip_levels),
            ("sample count", self.sample_count, resource_field.sample_count),
        ];
        for (attribute, required, actual) in checks {
            if required != 0 && required != actual {
                return Err(FieldConflict::new(attribute, actual, required));
            }
        }

        if let Some(format) = self.format {
            if resource_field.format != Some(format) {
                return Err(FieldConflict::new(
                    "format",
                    DebugOption(resource_field.format),
                    format,
                ));
            }
        }

        let relevant = if self.kind.is_texture() {
            ResourceBindFlags::texture_flags()
        } else {
            ResourceBindFlags::buffer_flags()
        };
        let required = self.bind_flags & relevant;
        if !resource_field.bind_flags.contains(required) {
            return Err(FieldConflict::new(
                "bind flags",
                resource_field.bind_flags,
                required,
            ));
        }

        Ok(())
    }

    fn width_attribute(&self) -> &'static str {
        if self.kind == FieldKind::Buffer {
            "buffer size"
        } else {
            "width"
        }
    }
}

/// Two declarations of one resource disagree on an attribute.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("conflicting {attribute}: existing {existing}, requested {requested}")]
pub struct FieldConflict {
    /// Name of the conflicting attribute.
    pub attribute: &'static str,
    /// Value already recorded.
    pub existing: String,
    /// Value that was requested.
    pub requested: String,
}

impl FieldConflict {
    fn new(attribute: &'static str, existing: impl Debug, requested: impl Debug) -> Self {
        Self {
            attribute,
            existing: format!("{existing:?}"),
            requested: format!("{requested:?}"),
        }
    }
}

/// Prints `None` as "unspecified" and `Some(x)` as `x`.
struct DebugOption<T>(Option<T>);

impl<T: Debug> Debug for DebugOption<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("unspecified"),
        }
    }
}

fn merge_attribute(
    attribute: &'static str,
    existing: u32,
    requested: u32,
) -> Result<u32, FieldConflict> {
    match (existing, requested) {
        (0, value) | (value, 0) => Ok(value),
        (a, b) if a == b => Ok(a),
        (a, b) => Err(FieldConflict::new(attribute, a, b)),
    }
}

fn merge_format(
    existing: Option<TextureFormat>,
    requested: Option<TextureFormat>,
) -> Result<Option<TextureFormat>, FieldConflict> {
    match (existing, requested) {
        (None, value) | (value, None) => Ok(value),
        (Some(a), Some(b)) if a == b => Ok(Some(a)),
        (Some(a), Some(b)) => Err(FieldConflict::new("format", a, b)),
    }
}

/// All fields declared by one render pass.
#[derive(Debug, Clone, Default)]
pub struct RenderPassReflection {
    fields: Vec<Field>,
}

impl RenderPassReflection {
    /// Create an empty reflection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field the pass reads.
    ///
    /// Fields without bind flags default to shader-resource binding.
    pub fn add_input(&mut self, field: Field) -> Result<&mut Self, FieldConflict> {
        self.add(field, FieldVisibility::INPUT, ResourceBindFlags::SHADER_RESOURCE)
    }

    /// Declare a field the pass writes.
    ///
    /// Texture fields without bind flags default to render-target binding,
    /// buffers to unordered access.
    pub fn add_output(&mut self, field: Field) -> Result<&mut Self, FieldConflict> {
        let default_flags = if field.kind.is_texture() {
            ResourceBindFlags::RENDER_TARGET
        } else {
            ResourceBindFlags::UNORDERED_ACCESS
        };
        self.add(field, FieldVisibility::OUTPUT, default_flags)
    }

    /// Declare a field the pass both reads and writes.
    ///
    /// Every `add_*` method merges a repeated name into the earlier
    /// declaration and fails if the two disagree.
    pub fn add_input_output(&mut self, field: Field) -> Result<&mut Self, FieldConflict> {
        self.add(
            field,
            FieldVisibility::INPUT | FieldVisibility::OUTPUT,
            ResourceBindFlags::UNORDERED_ACCESS | ResourceBindFlags::SHADER_RESOURCE,
        )
    }

    /// Declare a scratch resource private to the pass.
    pub fn add_internal(&mut self, field: Field) -> Result<&mut Self, FieldConflict> {
        let default_flags = if field.kind.is_texture() {
            ResourceBindFlags::RENDER_TARGET | ResourceBindFlags::SHADER_RESOURCE
        } else {
            ResourceBindFlags::UNORDERED_ACCESS
        };
        self.add(field, FieldVisibility::INTERNAL, default_flags)
    }

    /// Get all declared fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field was declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn add(
        &mut self,
        mut field: Field,
        visibility: FieldVisibility,
        default_flags: ResourceBindFlags,
    ) -> Result<&mut Self, FieldConflict> {
        if field.bind_flags.is_empty() {
            field.bind_flags = default_flags;
        }
        field.visibility |= visibility;

        // Declaring the same name twice merges into the existing entry.
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == field.name) {
            existing.merge(&field)?;
        } else {
            self.fields.push(field);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_fills_unspecified() {
        let mut a = Field::texture_2d("color").with_format(TextureFormat::Rgba16Float);
        let b = Field::texture_2d("color")
            .with_size(640, 480)
            .with_bind_flags(ResourceBindFlags::SHADER_RESOURCE);

        a.merge(&b).unwrap();
        assert_eq!(a.format(), Some(TextureFormat::Rgba16Float));
        assert_eq!((a.width(), a.height()), (640, 480));
        assert_eq!(a.bind_flags(), ResourceBindFlags::SHADER_RESOURCE);
    }

    #[test]
    fn test_merge_conflict_leaves_field_unchanged() {
        let mut a = Field::texture_2d("color")
            .with_size(640, 0)
            .with_format(TextureFormat::Rgba8Unorm);
        let before = a.clone();
        let b = Field::texture_2d("color")
            .with_size(0, 480)
            .with_format(TextureFormat::R32Float);

        let conflict = a.merge(&b).unwrap_err();
        assert_eq!(conflict.attribute, "format");
        assert_eq!(conflict.existing, "Rgba8Unorm");
        assert_eq!(conflict.requested, "R32Float");
        assert_eq!(a, before);
    }

    #[test]
    fn test_merge_kind_mismatch() {
        let mut a = Field::texture_2d("volume");
        let b = Field::texture_3d("volume");
        assert_eq!(a.merge(&b).unwrap_err().attribute, "resource kind");
    }

    #[test]
    fn test_buffer_size_conflict_is_named() {
        let mut a = Field::buffer("counters", 256);
        let b = Field::buffer("counters", 512);
        assert_eq!(a.merge(&b).unwrap_err().attribute, "buffer size");
    }

    #[test]
    fn test_bind_flag_usage_conversion() {
        let flags = ResourceBindFlags::SHADER_RESOURCE | ResourceBindFlags::DEPTH_STENCIL;
        assert_eq!(
            flags.to_texture_usage(),
            TextureUsage::TEXTURE_BINDING | TextureUsage::RENDER_ATTACHMENT
        );

        let flags = ResourceBindFlags::UNORDERED_ACCESS | ResourceBindFlags::INDIRECT;
        assert_eq!(
            flags.to_buffer_usage(),
            BufferUsage::STORAGE | BufferUsage::INDIRECT
        );
    }

    #[test]
    fn test_satisfied_by_ignores_unspecified() {
        let requirement = Field::texture_2d("color").with_format(TextureFormat::Rgba8Unorm);
        let actual = Field::texture_2d("color")
            .with_size(1920, 1080)
            .with_format(TextureFormat::Rgba8Unorm)
            .with_bind_flags(ResourceBindFlags::RENDER_TARGET);
        assert!(requirement.check_satisfied_by(&actual).is_ok());

        let requirement = requirement.with_bind_flags(ResourceBindFlags::UNORDERED_ACCESS);
        assert_eq!(
            requirement.check_satisfied_by(&actual).unwrap_err().attribute,
            "bind flags"
        );
    }

    #[test]
    fn test_reflection_defaults_and_duplicates() {
        let mut reflection = RenderPassReflection::new();
        reflection
            .add_input(Field::texture_2d("src"))
            .unwrap()
            .add_output(Field::texture_2d("dst").with_format(TextureFormat::Rgba16Float))
            .unwrap()
            .add_output(Field::buffer("histogram", 1024))
            .unwrap()
            .add_input(Field::texture_2d("dst"))
            .unwrap();

        assert_eq!(reflection.len(), 3);

        let src = reflection.field("src").unwrap();
        assert_eq!(src.bind_flags(), ResourceBindFlags::SHADER_RESOURCE);
        assert_eq!(src.visibility(), FieldVisibility::INPUT);

        let dst = reflection.field("dst").unwrap();
        assert_eq!(
            dst.visibility(),
            FieldVisibility::INPUT | FieldVisibility::OUTPUT
        );
        assert_eq!(
            dst.bind_flags(),
            ResourceBindFlags::RENDER_TARGET | ResourceBindFlags::SHADER_RESOURCE
        );

        let histogram = reflection.field("histogram").unwrap();
        assert_eq!(histogram.bind_flags(), ResourceBindFlags::UNORDERED_ACCESS);
        assert_eq!(histogram.buffer_size(), Some(1024));
    }

    #[test]
    fn test_reflection_duplicate_merges_attributes() {
        let mut reflection = RenderPassReflection::new();
        reflection
            .add_input(Field::texture_2d("hdr"))
            .unwrap()
            .add_output(
                Field::texture_2d("hdr")
                    .with_format(TextureFormat::Rgba16Float)
                    .with_size(64, 64),
            )
            .unwrap();

        let hdr = reflection.field("hdr").unwrap();
        assert_eq!(reflection.len(), 1);
        assert_eq!(hdr.format(), Some(TextureFormat::Rgba16Float));
        assert_eq!((hdr.width(), hdr.height()), (64, 64));
    }

    #[test]
    fn test_reflection_duplicate_conflicts() {
        let mut reflection = RenderPassReflection::new();
        reflection.add_input(Field::texture_2d("x")).unwrap();

        let conflict = reflection.add_output(Field::buffer("x", 64)).unwrap_err();
        assert_eq!(conflict.attribute, "resource kind");
        assert_eq!(reflection.field("x").map(Field::kind), Some(FieldKind::Texture2D));

        reflection
            .add_input(Field::texture_2d("y").with_format(TextureFormat::Rgba8Unorm))
            .unwrap();
        let conflict = reflection
            .add_output(Field::texture_2d("y").with_format(TextureFormat::R32Float))
            .unwrap_err();
        assert_eq!(
            conflict.to_string(),
            "conflicting format: existing Rgba8Unorm, requested R32Float"
        );
        assert_eq!(
            reflection.field("y").map(Field::visibility),
            Some(FieldVisibility::INPUT)
        );
    }
}
