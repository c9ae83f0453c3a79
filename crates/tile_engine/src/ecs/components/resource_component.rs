//! Typed resource binding shared by resource-bound components
//!
//! A [`ResourceBinding<T>`] holds at most one handle, and that handle always
//! refers to a resource whose runtime kind is `T::KIND`. Candidates of another
//! kind, absent candidates and handles to removed resources are rejected and
//! leave the current binding unchanged.

use std::fmt;

use crate::assets::{ResourceError, ResourceHandle, ResourceManager, ResourcePayload, TypedResourceHandle};
use crate::ecs::ComponentError;

/// Checked, typed reference to an externally owned resource
pub struct ResourceBinding<T> {
    handle: Option<TypedResourceHandle<T>>,
}

impl<T: ResourcePayload> ResourceBinding<T> {
    /// Create an unbound binding
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Bound handle, if any
    pub fn handle(&self) -> Option<TypedResourceHandle<T>> {
        self.handle
    }

    /// Whether a resource is bound
    pub const fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    /// Replace the binding with `candidate`
    ///
    /// # Errors
    /// * [`ResourceError::TypeMismatch`] - `candidate` is absent or of another kind
    /// * [`ResourceError::Stale`] - `candidate` refers to a removed resource
    pub fn bind(
        &mut self,
        resources: &ResourceManager,
        candidate: Option<ResourceHandle>,
    ) -> Result<TypedResourceHandle<T>, ResourceError> {
        let candidate = candidate.ok_or(ResourceError::TypeMismatch {
            expected: T::KIND,
            found: None,
        })?;
        let typed = candidate.downcast::<T>()?;
        if !resources.contains(candidate) {
            return Err(ResourceError::Stale(T::KIND));
        }

        self.handle = Some(typed);
        Ok(typed)
    }

    /// Bound payload, if bound and still alive
    pub fn resolve<'r>(&self, resources: &'r ResourceManager) -> Option<&'r T> {
        self.handle.and_then(|handle| resources.get(handle))
    }

    /// Bound payload, or an error naming `component` if unbound or stale
    pub fn require<'r>(
        &self,
        resources: &'r ResourceManager,
        component: &'static str,
    ) -> Result<&'r T, ComponentError> {
        let handle = self.handle.ok_or(ComponentError::UnboundResource {
            component,
            kind: T::KIND,
        })?;
        Ok(resources.try_get(handle)?)
    }

    /// Drop the binding and return the previous handle
    pub fn clear(&mut self) -> Option<TypedResourceHandle<T>> {
        self.handle.take()
    }
}

impl<T: ResourcePayload> Default for ResourceBinding<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ResourceBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceBinding").field("handle", &self.handle).finish()
    }
}

/// Capability of components that reference one resource of type `T`
pub trait ResourceBound<T: ResourcePayload> {
    /// The component's binding
    fn resource_binding(&self) -> &ResourceBinding<T>;

    /// The component's binding, mutably
    fn resource_binding_mut(&mut self) -> &mut ResourceBinding<T>;

    /// Called after a successful bind so cached values can be refreshed
    fn on_resource_bound(&mut self, _resources: &ResourceManager, _handle: TypedResourceHandle<T>) {}

    /// Bound handle, if any
    fn get_resource(&self) -> Option<TypedResourceHandle<T>> {
        self.resource_binding().handle()
    }

    /// Bind (or rebind) the resource
    ///
    /// On failure the previous binding is kept and the error returned.
    fn set_resource(
        &mut self,
        resources: &ResourceManager,
        candidate: Option<ResourceHandle>,
    ) -> Result<TypedResourceHandle<T>, ResourceError> {
        match self.resource_binding_mut().bind(resources, candidate) {
            Ok(handle) => {
                self.on_resource_bound(resources, handle);
                Ok(handle)
            }
            Err(err) => {
                log::warn!("Rejected {} binding: {}", T::KIND, err);
                Err(err)
            }
        }
    }
}
