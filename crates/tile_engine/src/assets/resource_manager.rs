//! Resource Manager - name-keyed storage for externally owned resources
//!
//! **SEPARATION OF CONCERNS**:
//! - ResourceManager: owns resource memory, resolves names and handles
//! - Components: hold handles only, never free what they reference
//! - Rendering backend: owns GPU-side data behind `TextureId`s
//!
//! Resources are stored in a slot map, so a handle to a removed resource
//! resolves to "absent" instead of pointing at whatever reused the slot.

use std::collections::HashMap;

use super::{Resource, ResourceError, ResourceHandle, ResourcePayload, TypedResourceHandle};
use crate::foundation::collections::{HandleMap, ResourceKey};

struct ResourceEntry {
    name: String,
    resource: Resource,
}

/// Resource Manager - central storage keyed by resource name
pub struct ResourceManager {
    /// Resource storage
    entries: HandleMap<ResourceKey, ResourceEntry>,

    /// Name to key lookup
    names: HashMap<String, ResourceKey>,
}

impl ResourceManager {
    /// Create an empty resource manager
    pub fn new() -> Self {
        Self {
            entries: HandleMap::with_key(),
            names: HashMap::new(),
        }
    }

    /// Register a resource under `name`
    ///
    /// # Returns
    /// * `Ok(ResourceHandle)` - Handle carrying the resource's runtime kind
    /// * `Err(ResourceError::DuplicateName)` - The name is already taken
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        resource: impl Into<Resource>,
    ) -> Result<ResourceHandle, ResourceError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            log::warn!("Rejecting duplicate resource name '{}'", name);
            return Err(ResourceError::DuplicateName(name));
        }

        let resource = resource.into();
        let kind = resource.kind();
        let key = self.entries.insert(ResourceEntry {
            name: name.clone(),
            resource,
        });
        log::debug!("Registered {} resource '{}'", kind, name);
        self.names.insert(name, key);

        Ok(ResourceHandle::new(key, kind))
    }

    /// Look up a resource by name; `None` if the name is unknown
    pub fn get_resource(&self, name: &str) -> Option<ResourceHandle> {
        let key = *self.names.get(name)?;
        let entry = self.entries.get(key)?;
        Some(ResourceHandle::new(key, entry.resource.kind()))
    }

    /// Look up a resource by name, reporting unknown names as an error
    pub fn require(&self, name: &str) -> Result<ResourceHandle, ResourceError> {
        self.get_resource(name)
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))
    }

    /// Whether the resource behind `handle` still exists
    pub fn contains(&self, handle: ResourceHandle) -> bool {
        self.entries.contains_key(handle.key())
    }

    /// Resolve a typed handle to its payload
    pub fn get<T: ResourcePayload>(&self, handle: TypedResourceHandle<T>) -> Option<&T> {
        self.entries
            .get(handle.key())
            .and_then(|entry| T::from_resource(&entry.resource))
    }

    /// Resolve a typed handle, reporting a removed resource as [`ResourceError::Stale`]
    pub fn try_get<T: ResourcePayload>(&self, handle: TypedResourceHandle<T>) -> Result<&T, ResourceError> {
        self.get(handle).ok_or(ResourceError::Stale(T::KIND))
    }

    /// Name a resource was registered under
    pub fn name_of(&self, key: ResourceKey) -> Option<&str> {
        self.entries.get(key).map(|entry| entry.name.as_str())
    }

    /// Remove a resource by name and return it
    ///
    /// Handles to it held elsewhere become stale.
    pub fn remove(&mut self, name: &str) -> Option<Resource> {
        let key = self.names.remove(name)?;
        let entry = self.entries.remove(key)?;
        log::debug!("Removed {} resource '{}'", entry.resource.kind(), name);
        Some(entry.resource)
    }

    /// Number of registered resources
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no resources are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the registered names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.name.as_str())
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}
