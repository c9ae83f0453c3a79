//! Resource management system
//!
//! Resources are externally owned, name-addressed data objects. They live in
//! the [`ResourceManager`]; everything else refers to them through handles.
//!
//! A [`Resource`] is a tagged variant over every payload type. Untyped
//! [`ResourceHandle`]s carry the runtime [`ResourceKind`] and are narrowed to a
//! [`TypedResourceHandle<T>`] with the fallible [`ResourceHandle::downcast`].

pub mod resource_manager;
pub mod texture;
pub mod tile_index_map;

pub use resource_manager::ResourceManager;
pub use texture::{Texture, TextureId};
pub use tile_index_map::{TileIndexMap, TileIndexMapError, EMPTY_TILE};

use std::fmt;

use thiserror::Error;

use crate::foundation::collections::{ResourceKey, TypedHandle};

/// Typed handle to a resource payload
pub type TypedResourceHandle<T> = TypedHandle<T>;

/// Runtime discriminant of a [`Resource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Texture / image resource
    Texture,
    /// Tile index grid
    TileIndexMap,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Texture => f.write_str("Texture"),
            Self::TileIndexMap => f.write_str("TileIndexMap"),
        }
    }
}

/// A resource stored by the resource manager
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// Texture in the rendering backend
    Texture(Texture),
    /// Dense grid of tile indices
    TileIndexMap(TileIndexMap),
}

impl Resource {
    /// Runtime kind of this resource
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Texture(_) => ResourceKind::Texture,
            Self::TileIndexMap(_) => ResourceKind::TileIndexMap,
        }
    }
}

impl From<Texture> for Resource {
    fn from(texture: Texture) -> Self {
        Self::Texture(texture)
    }
}

impl From<TileIndexMap> for Resource {
    fn from(map: TileIndexMap) -> Self {
        Self::TileIndexMap(map)
    }
}

/// Payload type stored inside a [`Resource`] variant
pub trait ResourcePayload: Sized + 'static {
    /// Variant this payload is stored under
    const KIND: ResourceKind;

    /// Borrow the payload if `resource` is of this kind
    fn from_resource(resource: &Resource) -> Option<&Self>;
}

impl ResourcePayload for Texture {
    const KIND: ResourceKind = ResourceKind::Texture;

    fn from_resource(resource: &Resource) -> Option<&Self> {
        match resource {
            Resource::Texture(texture) => Some(texture),
            Resource::TileIndexMap(_) => None,
        }
    }
}

impl ResourcePayload for TileIndexMap {
    const KIND: ResourceKind = ResourceKind::TileIndexMap;

    fn from_resource(resource: &Resource) -> Option<&Self> {
        match resource {
            Resource::TileIndexMap(map) => Some(map),
            Resource::Texture(_) => None,
        }
    }
}

/// Untyped handle to a resource: its key plus the runtime kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    key: ResourceKey,
    kind: ResourceKind,
}

impl ResourceHandle {
    pub(crate) const fn new(key: ResourceKey, kind: ResourceKind) -> Self {
        Self { key, kind }
    }

    /// Arena key of the resource
    pub const fn key(&self) -> ResourceKey {
        self.key
    }

    /// Runtime kind of the resource
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Checked conversion to a typed handle
    pub fn downcast<T: ResourcePayload>(self) -> Result<TypedResourceHandle<T>, ResourceError> {
        if self.kind == T::KIND {
            Ok(TypedHandle::new(self.key))
        } else {
            Err(ResourceError::TypeMismatch {
                expected: T::KIND,
                found: Some(self.kind),
            })
        }
    }
}

/// Resource errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// A resource of another kind (or no resource) was supplied
    #[error("Resource type mismatch: expected {expected}, found {}", describe_found(.found))]
    TypeMismatch {
        /// Kind the binding accepts
        expected: ResourceKind,
        /// Kind that was supplied, `None` for an absent resource
        found: Option<ResourceKind>,
    },

    /// No resource is registered under this name
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A resource with this name already exists
    #[error("Resource name already in use: {0}")]
    DuplicateName(String),

    /// The handle refers to a resource that has been removed
    #[error("Stale {0} handle: resource no longer exists")]
    Stale(ResourceKind),
}

fn describe_found(found: &Option<ResourceKind>) -> String {
    found.map_or_else(|| "no resource".to_string(), |kind| kind.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_checks_kind() {
        let mut manager = ResourceManager::new();
        let handle = manager
            .insert("grass", Texture::new("grass", TextureId(1), 32, 32))
            .unwrap();

        assert!(handle.downcast::<Texture>().is_ok());
        assert_eq!(
            handle.downcast::<TileIndexMap>(),
            Err(ResourceError::TypeMismatch {
                expected: ResourceKind::TileIndexMap,
                found: Some(ResourceKind::Texture),
            })
        );
    }

    #[test]
    fn test_payload_narrowing() {
        let resource = Resource::from(Texture::new("stone", TextureId(9), 8, 8));

        assert_eq!(resource.kind(), ResourceKind::Texture);
        assert!(Texture::from_resource(&resource).is_some());
        assert!(TileIndexMap::from_resource(&resource).is_none());
    }

    #[test]
    fn test_mismatch_message_names_both_kinds() {
        let err = ResourceError::TypeMismatch {
            expected: ResourceKind::Texture,
            found: None,
        };
        assert_eq!(err.to_string(), "Resource type mismatch: expected Texture, found no resource");
    }
}
