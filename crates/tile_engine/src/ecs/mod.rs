//! Entity-Component System
//!
//! Game objects own ordered lists of components; the [`World`] owns both in
//! arenas and drives every component through its lifecycle.

pub mod component;
pub mod components;
pub mod game_object;
pub mod lifecycle;
pub mod storage;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentError, ComponentId, DebugDump};
pub use components::ResourceBound;
pub use game_object::GameObject;
pub use lifecycle::{HookContext, Lifecycle, LifecycleError, LifecycleFlags, LifecycleHook};
pub use storage::ComponentTable;
pub use world::World;

pub use crate::foundation::collections::{ComponentKey, GameObjectKey};
