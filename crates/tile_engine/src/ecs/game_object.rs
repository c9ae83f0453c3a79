//! Game objects
//!
//! A game object is a named transform with an ordered list of attached
//! components and an optional parent. Its own `active` flag combines with its
//! ancestors' flags into the "active in hierarchy" state components observe.

use crate::foundation::collections::{ComponentKey, GameObjectKey};
use crate::foundation::math::Transform2D;

/// A node in the scene owning a set of components
#[derive(Debug, Clone)]
pub struct GameObject {
    name: String,
    transform: Transform2D,
    active: bool,
    parent: Option<GameObjectKey>,
    pub(crate) children: Vec<GameObjectKey>,
    pub(crate) components: Vec<ComponentKey>,
}

impl GameObject {
    pub(crate) fn new(name: impl Into<String>, transform: Transform2D, parent: Option<GameObjectKey>) -> Self {
        Self {
            name: name.into(),
            transform,
            active: true,
            parent,
            children: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transform provider read by renderers
    pub const fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Mutable transform
    pub fn transform_mut(&mut self) -> &mut Transform2D {
        &mut self.transform
    }

    /// The object's own active flag (ignores ancestors)
    pub const fn is_active_self(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active_self(&mut self, active: bool) {
        self.active = active;
    }

    /// Parent object
    pub const fn parent(&self) -> Option<GameObjectKey> {
        self.parent
    }

    /// Child objects in creation order
    pub fn children(&self) -> &[GameObjectKey] {
        &self.children
    }

    /// Attached components in attachment order
    pub fn components(&self) -> &[ComponentKey] {
        &self.components
    }
}
