//! Specialized collection types

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub use slotmap::{Key, SlotMap};

slotmap::new_key_type! {
    /// Arena key of a game object owned by a [`World`](crate::ecs::World)
    pub struct GameObjectKey;

    /// Arena key of a component owned by a [`World`](crate::ecs::World)
    pub struct ComponentKey;

    /// Arena key of a resource owned by a [`ResourceManager`](crate::assets::ResourceManager)
    pub struct ResourceKey;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<K, T> = SlotMap<K, T>;

/// Typed handle for type-safe resource references
///
/// The payload type only exists at compile time; the key is what the
/// resource manager stores.
pub struct TypedHandle<T> {
    key: ResourceKey,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> TypedHandle<T> {
    /// Create a new typed handle from a key
    pub fn new(key: ResourceKey) -> Self {
        Self {
            key,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying key
    pub fn key(&self) -> ResourceKey {
        self.key
    }
}

// Manual impls: derives would put bounds on `T`.
impl<T> Clone for TypedHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedHandle<T> {}

impl<T> PartialEq for TypedHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for TypedHandle<T> {}

impl<T> Hash for TypedHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for TypedHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedHandle").field(&self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Payload;

    #[test]
    fn test_typed_handle_is_copy_without_payload_bounds() {
        let mut map: HandleMap<ResourceKey, u32> = HandleMap::with_key();
        let key = map.insert(3);

        let handle = TypedHandle::<Payload>::new(key);
        let copy = handle;
        assert_eq!(handle, copy);
        assert_eq!(copy.key(), key);
    }

    #[test]
    fn test_stale_key_is_absent() {
        let mut map: HandleMap<ComponentKey, &str> = HandleMap::with_key();
        let key = map.insert("first");
        map.remove(key);
        let _replacement = map.insert("second");

        assert!(map.get(key).is_none());
    }
}
