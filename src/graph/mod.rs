//! Render graph resource infrastructure.
//!
//! Passes describe the resources they need through [`RenderPassReflection`]
//! instead of creating them. The [`ResourceCache`] collects those
//! declarations, resolves aliasing between fields that must share a resource,
//! and allocates one resource per distinct slot.
//!
//! Fields are addressed by keys of the form `PassName.FieldName`, built with
//! [`field_key`].
//!
//! # Example
//!
//! ```ignore
//! let mut blur = RenderPassReflection::new();
//! blur.add_input(Field::texture_2d("input"))?
//!     .add_output(Field::texture_2d("output"))?;
//!
//! let mut cache = ResourceCache::new(Arc::new(DummyBackend::new()));
//! cache.register_pass("Blur", &blur)?;
//! cache.register_field("Tonemap.src", &Field::texture_2d("src"), Some("Blur.output"))?;
//! cache.allocate_resources(&DefaultProperties::new(1920, 1080)
//!     .with_color_format(TextureFormat::Rgba16Float))?;
//! ```

mod reflection;
mod resource_cache;

pub use reflection::{
    Field, FieldConflict, FieldKind, FieldVisibility, RenderPassReflection, ResourceBindFlags,
};
pub use resource_cache::{AllocationStats, DefaultProperties, ResourceCache};

/// Build the cache key of a pass field: `PassName.FieldName`.
pub fn field_key(pass_name: &str, field_name: &str) -> String {
    format!("{pass_name}.{field_name}")
}

/// Split a field key into pass name and field name.
///
/// The pass name ends at the first `.`, so field names may contain dots.
pub fn split_field_key(key: &str) -> Option<(&str, &str)> {
    key.split_once('.')
}
