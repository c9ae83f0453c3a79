//! Component storage
//!
//! Components live in a slot map owned by the [`World`](super::World).
//! Everything else refers to them by [`ComponentKey`]; a key whose component
//! was removed resolves to `None`.

use super::component::{Component, ComponentId};
use super::lifecycle::LifecycleFlags;
use crate::foundation::collections::{ComponentKey, GameObjectKey, HandleMap};

/// Bookkeeping the container keeps next to each component
pub(crate) struct ComponentSlot {
    pub(crate) id: ComponentId,
    pub(crate) owner: GameObjectKey,
    pub(crate) flags: LifecycleFlags,
    /// Whether the component should be enabled when its state starts
    pub(crate) start_enabled: bool,
    /// `None` while the component is checked out for a hook
    pub(crate) component: Option<Box<dyn Component>>,
}

impl ComponentSlot {
    pub(crate) fn new(id: ComponentId, owner: GameObjectKey, component: Box<dyn Component>) -> Self {
        Self {
            id,
            owner,
            flags: LifecycleFlags::empty(),
            start_enabled: true,
            component: Some(component),
        }
    }
}

/// Arena of components with typed read access
#[derive(Default)]
pub struct ComponentTable {
    slots: HandleMap<ComponentKey, ComponentSlot>,
}

impl ComponentTable {
    pub(crate) fn new() -> Self {
        Self {
            slots: HandleMap::with_key(),
        }
    }

    pub(crate) fn insert(&mut self, slot: ComponentSlot) -> ComponentKey {
        self.slots.insert(slot)
    }

    pub(crate) fn remove(&mut self, key: ComponentKey) -> Option<ComponentSlot> {
        self.slots.remove(key)
    }

    pub(crate) fn slot(&self, key: ComponentKey) -> Option<&ComponentSlot> {
        self.slots.get(key)
    }

    pub(crate) fn slot_mut(&mut self, key: ComponentKey) -> Option<&mut ComponentSlot> {
        self.slots.get_mut(key)
    }

    /// Component behind `key` as a trait object
    pub fn get_dyn(&self, key: ComponentKey) -> Option<&dyn Component> {
        self.slots.get(key)?.component.as_deref()
    }

    /// Component behind `key`, if it exists and has type `T`
    pub fn get<T: Component>(&self, key: ComponentKey) -> Option<&T> {
        self.get_dyn(key)?.as_any().downcast_ref::<T>()
    }

    /// Component behind `key`, if it has type `T` and belongs to `owner`
    pub fn get_owned<T: Component>(&self, key: ComponentKey, owner: GameObjectKey) -> Option<&T> {
        if self.owner(key)? != owner {
            return None;
        }
        self.get::<T>(key)
    }

    /// Mutable component behind `key`, if it exists and has type `T`
    pub fn get_mut<T: Component>(&mut self, key: ComponentKey) -> Option<&mut T> {
        self.slots
            .get_mut(key)?
            .component
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Recorded lifecycle state
    pub fn flags(&self, key: ComponentKey) -> Option<LifecycleFlags> {
        self.slots.get(key).map(|slot| slot.flags)
    }

    /// Container-assigned id
    pub fn id(&self, key: ComponentKey) -> Option<ComponentId> {
        self.slots.get(key).map(|slot| slot.id)
    }

    /// Owning game object
    pub fn owner(&self, key: ComponentKey) -> Option<GameObjectKey> {
        self.slots.get(key).map(|slot| slot.owner)
    }

    /// Whether `key` refers to a live component
    pub fn contains(&self, key: ComponentKey) -> bool {
        self.slots.contains_key(key)
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
