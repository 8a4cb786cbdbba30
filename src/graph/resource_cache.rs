//! Resource cache for render graph fields.
//!
//! Passes register the fields they declare; the cache groups aliased fields
//! into slots, merges their descriptors, and allocates one resource per slot.
//! Resources supplied from outside the graph are tracked separately and are
//! never created or destroyed by the cache.

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::ResourceAllocator;
use crate::error::{CacheError, CacheResult, GraphicsError};
use crate::resources::Resource;
use crate::types::{BufferDescriptor, TextureDescriptor, TextureFormat};

use super::field_key;
use super::reflection::{Field, FieldConflict, FieldKind, RenderPassReflection, ResourceBindFlags};

/// Fallback values for attributes that no pass specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DefaultProperties {
    /// Fallback width, usually the viewport width.
    pub width: u32,
    /// Fallback height, usually the viewport height.
    pub height: u32,
    /// Fallback format for color resources.
    pub color_format: Option<TextureFormat>,
    /// Fallback format for depth-stencil resources.
    pub depth_format: Option<TextureFormat>,
}

impl DefaultProperties {
    /// Create default properties with the given extent and no fallback formats.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color_format: None,
            depth_format: None,
        }
    }

    /// Set the fallback color format.
    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = Some(format);
        self
    }

    /// Set the fallback depth format.
    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }
}

/// Outcome of one [`ResourceCache::allocate_resources`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AllocationStats {
    /// Slots that received a newly created resource.
    pub allocated: usize,
    /// Slots bound to an external resource registered under one of their names.
    pub adopted_external: usize,
    /// Slots that already held a resource.
    pub skipped: usize,
}

struct Allocation {
    resource: Resource,
    /// Fully specified descriptor of `resource`.
    resolved: Field,
    external: bool,
}

struct ResourceData {
    field: Field,
    /// Every field name mapped to this slot, in registration order. Never empty.
    names: Vec<String>,
    allocation: Option<Allocation>,
}

impl ResourceData {
    fn new(field: &Field, names: Vec<String>) -> Self {
        Self {
            field: field.clone(),
            names,
            allocation: None,
        }
    }

    fn primary_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }
}

/// Registry and allocator for the resources of one render graph configuration.
///
/// # Lifecycle
///
/// 1. Passes call [`register_field`](Self::register_field) (or
///    [`register_pass`](Self::register_pass)) and the driver registers external
///    resources.
/// 2. [`allocate_resources`](Self::allocate_resources) creates one resource per
///    slot. It can be called again after more fields were registered; slots
///    that already hold a resource are left alone.
/// 3. Passes look up resources with [`get_resource`](Self::get_resource).
/// 4. [`reset`](Self::reset) empties the cache for the next compilation.
///
/// # Example
///
/// ```ignore
/// let mut cache = ResourceCache::new(Arc::new(DummyBackend::new()));
/// cache.register_field("GBuffer.albedo", &Field::texture_2d("albedo"), None)?;
/// cache.register_field("Lighting.albedo", &Field::texture_2d("albedo"), Some("GBuffer.albedo"))?;
/// cache.allocate_resources(&DefaultProperties::new(1920, 1080)
///     .with_color_format(TextureFormat::Rgba8Unorm))?;
/// let albedo = cache.get_resource("Lighting.albedo");
/// ```
pub struct ResourceCache {
    allocator: Arc<dyn ResourceAllocator>,
    field_map: HashMap<String, usize>,
    resource_data: Vec<ResourceData>,
    // References to resources not owned by the cache
    external_resources: HashMap<String, Resource>,
}

impl ResourceCache {
    /// Create an empty cache that allocates through `allocator`.
    pub fn new(allocator: Arc<dyn ResourceAllocator>) -> Self {
        Self {
            allocator,
            field_map: HashMap::new(),
            resource_data: Vec::new(),
            external_resources: HashMap::new(),
        }
    }

    /// Get the allocator used for new resources.
    pub fn allocator(&self) -> &Arc<dyn ResourceAllocator> {
        &self.allocator
    }

    /// Record a resource owned outside the cache.
    ///
    /// Replaces any previous entry and returns it. A slot that adopted an
    /// external resource is unbound and picks up the new entry on the next
    /// [`allocate_resources`](Self::allocate_resources).
    pub fn register_external_resource(
        &mut self,
        name: impl Into<String>,
        resource: Resource,
    ) -> Option<Resource> {
        let name = name.into();
        self.release_external_binding(&name);
        let previous = self.external_resources.insert(name.clone(), resource);
        if previous.is_some() {
            log::debug!("ResourceCache: replaced external resource '{}'", name);
        } else {
            log::trace!("ResourceCache: registered external resource '{}'", name);
        }
        previous
    }

    /// Drop the cache's references to an external resource.
    ///
    /// A slot bound to it is unbound as well. Returns `None` if nothing was
    /// registered under `name`.
    pub fn remove_external_resource(&mut self, name: &str) -> Option<Resource> {
        let removed = self.external_resources.remove(name)?;
        self.release_external_binding(name);
        Some(removed)
    }

    /// Look up an external resource.
    pub fn get_external_resource(&self, name: &str) -> Option<&Resource> {
        self.external_resources.get(name)
    }

    /// Register a field that requires a resource.
    ///
    /// `name` has the form `PassName.FieldName`. When `alias` is given, `name`
    /// and `alias` share one resource and their descriptors are merged, in
    /// whichever order the two are registered.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::DescriptorConflict`] if the declaration disagrees
    /// with what is already known about the resource, and
    /// [`CacheError::AllocatedResourceConflict`] if aliasing would join two
    /// slots that both hold a resource. The cache is unchanged on error.
    pub fn register_field(
        &mut self,
        name: &str,
        field: &Field,
        alias: Option<&str>,
    ) -> CacheResult<()> {
        let alias = alias.filter(|alias| !alias.is_empty() && *alias != name);
        let name_slot = self.field_map.get(name).copied();
        let alias_slot = alias.and_then(|alias| self.field_map.get(alias).copied());

        log::trace!(
            "ResourceCache: register field '{}' (alias: {:?})",
            name,
            alias
        );

        match (name_slot, alias, alias_slot) {
            (None, None, _) => {
                self.push_slot(field, vec![name.to_string()]);
            }
            (None, Some(alias), None) => {
                self.push_slot(field, vec![name.to_string(), alias.to_string()]);
            }
            (Some(slot), None, _) => {
                self.merge_into(slot, name, field)?;
            }
            (None, Some(_), Some(slot)) => {
                self.merge_into(slot, name, field)?;
                self.map_name(name, slot);
            }
            (Some(slot), Some(alias), None) => {
                self.merge_into(slot, name, field)?;
                self.map_name(alias, slot);
            }
            (Some(slot), Some(_), Some(alias_slot)) if slot == alias_slot => {
                self.merge_into(slot, name, field)?;
            }
            (Some(slot), Some(alias), Some(alias_slot)) => {
                self.unify(slot, alias_slot, name, alias, field)?;
            }
        }

        Ok(())
    }

    /// Register every field of a pass under `PassName.FieldName`.
    ///
    /// Stops at the first conflicting field.
    pub fn register_pass(
        &mut self,
        pass_name: &str,
        reflection: &RenderPassReflection,
    ) -> CacheResult<()> {
        for field in reflection.fields() {
            self.register_field(&field_key(pass_name, field.name()), field, None)?;
        }
        Ok(())
    }

    /// Get the resource bound to a field.
    ///
    /// Returns `None` for unknown names and before allocation.
    pub fn get_resource(&self, name: &str) -> Option<&Resource> {
        let slot = *self.field_map.get(name)?;
        self.resource_data[slot]
            .allocation
            .as_ref()
            .map(|allocation| &allocation.resource)
    }

    /// Allocate a resource for every slot that has none yet.
    ///
    /// Unspecified attributes are taken from `defaults`. A slot with an
    /// external resource registered under one of its names is bound to that
    /// resource instead of allocating a new one.
    ///
    /// # Errors
    ///
    /// Stops at the first slot that cannot be resolved or allocated. Slots
    /// handled before the failure keep their resources.
    pub fn allocate_resources(
        &mut self,
        defaults: &DefaultProperties,
    ) -> CacheResult<AllocationStats> {
        let mut stats = AllocationStats::default();

        for index in 0..self.resource_data.len() {
            if self.resource_data[index].allocation.is_some() {
                stats.skipped += 1;
                continue;
            }

            let allocation = self.allocate_slot(&self.resource_data[index], defaults)?;
            if allocation.external {
                stats.adopted_external += 1;
            } else {
                stats.allocated += 1;
            }
            self.resource_data[index].allocation = Some(allocation);
        }

        log::debug!(
            "ResourceCache: allocated {} resources ({} external, {} already bound) using {}",
            stats.allocated,
            stats.adopted_external,
            stats.skipped,
            self.allocator.name()
        );

        Ok(stats)
    }

    /// Drop all slots, field names and external resources.
    ///
    /// Resources handed out earlier stay alive while other holders keep them.
    pub fn reset(&mut self) {
        log::debug!(
            "ResourceCache: reset ({} slots, {} fields, {} external)",
            self.resource_data.len(),
            self.field_map.len(),
            self.external_resources.len()
        );
        self.field_map.clear();
        self.resource_data.clear();
        self.external_resources.clear();
    }

    /// Number of distinct resource slots.
    pub fn slot_count(&self) -> usize {
        self.resource_data.len()
    }

    /// Number of registered field names.
    pub fn field_count(&self) -> usize {
        self.field_map.len()
    }

    /// Number of external resources.
    pub fn external_count(&self) -> usize {
        self.external_resources.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.field_map.is_empty() && self.external_resources.is_empty()
    }

    /// Returns true if `name` was registered as a field.
    pub fn contains_field(&self, name: &str) -> bool {
        self.field_map.contains_key(name)
    }

    /// All field names sharing a resource with `name`, including `name`.
    pub fn aliases(&self, name: &str) -> Option<&[String]> {
        let slot = *self.field_map.get(name)?;
        Some(&self.resource_data[slot].names)
    }

    /// Returns true if both names are registered and share a resource.
    pub fn are_aliased(&self, a: &str, b: &str) -> bool {
        match (self.field_map.get(a), self.field_map.get(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// The merged declaration of the resource behind `name`.
    pub fn merged_field(&self, name: &str) -> Option<&Field> {
        let slot = *self.field_map.get(name)?;
        Some(&self.resource_data[slot].field)
    }

    /// The fully specified descriptor the resource behind `name` was created
    /// from, once allocated.
    pub fn resolved_field(&self, name: &str) -> Option<&Field> {
        let slot = *self.field_map.get(name)?;
        self.resource_data[slot]
            .allocation
            .as_ref()
            .map(|allocation| &allocation.resolved)
    }

    /// Unbind the slot of `name` if it holds an adopted external resource.
    fn release_external_binding(&mut self, name: &str) {
        let Some(&slot) = self.field_map.get(name) else {
            return;
        };
        let data = &mut self.resource_data[slot];
        let Some(external) = data.allocation.as_ref().map(|allocation| allocation.external) else {
            return;
        };
        if external {
            log::debug!("ResourceCache: released external binding of '{}'", name);
            data.allocation = None;
        } else {
            log::debug!(
                "ResourceCache: '{}' holds an allocated resource, external ignored",
                name
            );
        }
    }

    fn push_slot(&mut self, field: &Field, names: Vec<String>) {
        let slot = self.resource_data.len();
        for name in &names {
            self.field_map.insert(name.clone(), slot);
        }
        self.resource_data.push(ResourceData::new(field, names));
    }

    fn map_name(&mut self, name: &str, slot: usize) {
        self.field_map.insert(name.to_string(), slot);
        self.resource_data[slot].names.push(name.to_string());
    }

    /// Merge `field` into `slot`, validating against its resource if allocated.
    fn merge_into(&mut self, slot: usize, name: &str, field: &Field) -> CacheResult<()> {
        let data = &self.resource_data[slot];
        let mut merged = data.field.clone();
        merged
            .merge(field)
            .map_err(|conflict| conflict_error(name, conflict))?;
        if let Some(allocation) = &data.allocation {
            merged
                .check_satisfied_by(&allocation.resolved)
                .map_err(|conflict| conflict_error(name, conflict))?;
        }
        self.resource_data[slot].field = merged;
        Ok(())
    }

    /// Join the slot of `name` into the slot of `alias`.
    fn unify(
        &mut self,
        slot: usize,
        alias_slot: usize,
        name: &str,
        alias: &str,
        field: &Field,
    ) -> CacheResult<()> {
        let absorbed = &self.resource_data[slot];
        let target = &self.resource_data[alias_slot];

        let allocation = match (&absorbed.allocation, &target.allocation) {
            (Some(_), Some(_)) => {
                return Err(CacheError::AllocatedResourceConflict {
                    name: name.to_string(),
                    other: alias.to_string(),
                });
            }
            (Some(allocation), None) | (None, Some(allocation)) => Some(allocation),
            (None, None) => None,
        };

        let mut merged = target.field.clone();
        merged
            .merge(&absorbed.field)
            .and_then(|()| merged.merge(field))
            .map_err(|conflict| conflict_error(name, conflict))?;
        if let Some(allocation) = allocation {
            merged
                .check_satisfied_by(&allocation.resolved)
                .map_err(|conflict| conflict_error(name, conflict))?;
        }

        log::debug!(
            "ResourceCache: aliasing '{}' with '{}' joins {:?} into {:?}",
            name,
            alias,
            absorbed.names,
            target.names
        );

        let absorbed = self.resource_data.remove(slot);
        let target_index = if alias_slot > slot {
            alias_slot - 1
        } else {
            alias_slot
        };
        for index in self.field_map.values_mut() {
            if *index == slot {
                *index = target_index;
            } else if *index > slot {
                *index -= 1;
            }
        }

        let target = &mut self.resource_data[target_index];
        target.field = merged;
        target.names.extend(absorbed.names);
        if target.allocation.is_none() {
            target.allocation = absorbed.allocation;
        }
        Ok(())
    }

    fn allocate_slot(
        &self,
        data: &ResourceData,
        defaults: &DefaultProperties,
    ) -> CacheResult<Allocation> {
        let mut externals = data.names.iter().filter_map(|name| {
            self.external_resources
                .get(name)
                .map(|resource| (name, resource))
        });
        if let Some((name, resource)) = externals.next() {
            let conflicting = externals.find(|(_, candidate)| !candidate.ptr_eq(resource));
            if let Some((other, _)) = conflicting {
                return Err(CacheError::ConflictingExternalResources {
                    name: name.clone(),
                    other: other.clone(),
                });
            }
            let resolved = Field::from_resource(data.field.name(), resource);
            data.field
                .check_satisfied_by(&resolved)
                .map_err(|conflict| conflict_error(name, conflict))?;
            log::debug!("ResourceCache: field '{}' bound to external resource", name);
            return Ok(Allocation {
                resource: resource.clone(),
                resolved,
                external: true,
            });
        }

        let name = data.primary_name();
        let resolved = resolve_field(&data.field, defaults).ok_or_else(|| {
            CacheError::UnresolvedFormat {
                name: name.to_string(),
            }
        })?;
        let resource = create_resource(self.allocator.as_ref(), &resolved, name).map_err(
            |source| {
                log::warn!("ResourceCache: allocation for '{}' failed: {}", name, source);
                CacheError::AllocationFailed {
                    name: name.to_string(),
                    source,
                }
            },
        )?;

        Ok(Allocation {
            resource,
            resolved,
            external: false,
        })
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("allocator", &self.allocator.name())
            .field("slots", &self.resource_data.len())
            .field("fields", &self.field_map.len())
            .field("external", &self.external_resources.len())
            .finish()
    }
}

fn conflict_error(name: &str, conflict: FieldConflict) -> CacheError {
    CacheError::DescriptorConflict {
        name: name.to_string(),
        attribute: conflict.attribute,
        existing: conflict.existing,
        requested: conflict.requested,
    }
}

/// Fill every unspecified attribute of a texture field from `defaults`.
///
/// Returns `None` if no format can be determined. Buffer fields are returned
/// unchanged.
fn resolve_field(field: &Field, defaults: &DefaultProperties) -> Option<Field> {
    let kind = field.kind();
    if !kind.is_texture() {
        return Some(field.clone());
    }

    let or = |value: u32, fallback: u32| if value == 0 { fallback } else { value };

    let (width, height) = match kind {
        FieldKind::Texture1D => (or(field.width(), defaults.width), or(field.height(), 1)),
        FieldKind::TextureCube => {
            // Cube faces are square.
            let edge = [field.width(), field.height()]
                .into_iter()
                .find(|&v| v != 0)
                .unwrap_or_else(|| defaults.width.min(defaults.height));
            (or(field.width(), edge), or(field.height(), edge))
        }
        _ => (
            or(field.width(), defaults.width),
            or(field.height(), defaults.height),
        ),
    };

    let format = field.format().or(
        if field.bind_flags().contains(ResourceBindFlags::DEPTH_STENCIL) {
            defaults.depth_format
        } else {
            defaults.color_format
        },
    )?;

    Some(
        field
            .clone()
            .with_size(width, height)
            .with_depth(or(field.depth(), 1))
            .with_array_size(or(field.array_size(), 1))
            .with_mip_levels(or(field.mip_levels(), 1))
            .with_sample_count(or(field.sample_count(), 1))
            .with_format(format),
    )
}

fn create_resource(
    allocator: &dyn ResourceAllocator,
    resolved: &Field,
    label: &str,
) -> Result<Resource, GraphicsError> {
    let Some(dimension) = resolved.kind().texture_dimension() else {
        let descriptor = BufferDescriptor::new(
            u64::from(resolved.width()),
            resolved.bind_flags().to_buffer_usage(),
        )
        .with_label(label);
        return allocator.create_buffer(&descriptor).map(Resource::from);
    };

    let layers = if resolved.kind() == FieldKind::TextureCube {
        resolved.array_size().saturating_mul(6)
    } else {
        resolved.array_size()
    };
    let descriptor = TextureDescriptor::new_2d(
        resolved.width(),
        resolved.height(),
        resolved.format().unwrap_or_default(),
        resolved.bind_flags().to_texture_usage(),
    )
    .with_label(label)
    .with_dimension(dimension)
    .with_depth(resolved.depth())
    .with_array_layers(layers)
    .with_mip_levels(resolved.mip_levels())
    .with_sample_count(resolved.sample_count());

    allocator.create_texture(&descriptor).map(Resource::from)
}
