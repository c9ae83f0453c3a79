//! ECS World implementation
//!
//! The world is the owning container for game objects and their components.
//! It assigns component ids, drives every lifecycle hook in the required
//! order and runs the render pass over live renderable components.
//!
//! Hooks run one at a time: the component is checked out of its slot, the
//! hook receives read access to everything else, and the component is put
//! back before the next hook fires.

use super::component::{Component, ComponentError, ComponentId};
use super::components::ResourceBound;
use super::game_object::GameObject;
use super::lifecycle::{self, HookContext, LifecycleFlags, LifecycleHook};
use super::storage::{ComponentSlot, ComponentTable};
use crate::assets::{ResourceHandle, ResourceManager, ResourcePayload, TypedResourceHandle};
use crate::foundation::collections::{ComponentKey, GameObjectKey, HandleMap};
use crate::foundation::diagnostics::{DiagnosticOrigin, DiagnosticSink, NullSink};
use crate::foundation::math::Transform2D;
use crate::render::{Camera2D, RenderBackend, RenderContext, RenderStats};

/// ECS World containing all game objects and components
pub struct World {
    objects: HandleMap<GameObjectKey, GameObject>,
    /// Spawn order; slot map iteration order is not stable across removals
    object_order: Vec<GameObjectKey>,
    components: ComponentTable,
    resources: ResourceManager,
    diagnostics: Box<dyn DiagnosticSink>,
    next_component_id: u64,
    state_active: bool,
    paused: bool,
    /// Components attached while the state was active and not yet started
    pending: Vec<ComponentKey>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::with_resources(ResourceManager::new())
    }

    /// Create a world around an existing resource manager
    pub fn with_resources(resources: ResourceManager) -> Self {
        Self {
            objects: HandleMap::with_key(),
            object_order: Vec::new(),
            components: ComponentTable::new(),
            resources,
            diagnostics: Box::new(NullSink),
            next_component_id: 0,
            state_active: false,
            paused: false,
            pending: Vec::new(),
        }
    }

    /// Replace the diagnostic sink receiving lifecycle transitions and dumps
    pub fn set_diagnostics(&mut self, sink: Box<dyn DiagnosticSink>) {
        self.diagnostics = sink;
    }

    /// Resource manager
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    /// Mutable resource manager
    ///
    /// Callers must not remove resources a live component renders from.
    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    /// Component table
    pub fn components(&self) -> &ComponentTable {
        &self.components
    }

    /// Whether a game state is active
    pub const fn is_state_active(&self) -> bool {
        self.state_active
    }

    /// Whether the world is paused
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    // ------------------------------------------------------------------
    // Game objects
    // ------------------------------------------------------------------

    /// Create a root game object
    pub fn spawn_object(&mut self, name: impl Into<String>, transform: Transform2D) -> GameObjectKey {
        let key = self.objects.insert(GameObject::new(name, transform, None));
        self.object_order.push(key);
        key
    }

    /// Create a game object under `parent`
    pub fn spawn_child(
        &mut self,
        parent: GameObjectKey,
        name: impl Into<String>,
        transform: Transform2D,
    ) -> Result<GameObjectKey, ComponentError> {
        if !self.objects.contains_key(parent) {
            return Err(ComponentError::ObjectNotFound(parent));
        }
        let key = self.objects.insert(GameObject::new(name, transform, Some(parent)));
        if let Some(parent_object) = self.objects.get_mut(parent) {
            parent_object.children.push(key);
        }
        self.object_order.push(key);
        Ok(key)
    }

    /// Game object by key
    pub fn object(&self, key: GameObjectKey) -> Option<&GameObject> {
        self.objects.get(key)
    }

    /// Mutable transform of a game object
    pub fn transform_mut(&mut self, key: GameObjectKey) -> Option<&mut Transform2D> {
        self.objects.get_mut(key).map(GameObject::transform_mut)
    }

    /// First object with the given name, in spawn order
    pub fn find_object(&self, name: &str) -> Option<GameObjectKey> {
        self.object_order
            .iter()
            .copied()
            .find(|&key| self.objects.get(key).is_some_and(|object| object.name() == name))
    }

    /// Game objects in spawn order
    pub fn objects(&self) -> impl Iterator<Item = (GameObjectKey, &GameObject)> {
        self.object_order
            .iter()
            .filter_map(|&key| self.objects.get(key).map(|object| (key, object)))
    }

    /// Whether the object and all its ancestors are active
    pub fn is_active_in_hierarchy(&self, key: GameObjectKey) -> bool {
        let mut current = Some(key);
        while let Some(object_key) = current {
            match self.objects.get(object_key) {
                Some(object) if object.is_active_self() => current = object.parent(),
                _ => return false,
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Attach a component to `object` and run `on_instantiated`
    ///
    /// If a game state is active the component is queued; [`World::start_pending`]
    /// initialises it. If `on_instantiated` fails the component is detached
    /// again and the error returned.
    pub fn add_component(
        &mut self,
        object: GameObjectKey,
        component: Box<dyn Component>,
    ) -> Result<ComponentKey, ComponentError> {
        let target = self
            .objects
            .get_mut(object)
            .ok_or(ComponentError::ObjectNotFound(object))?;

        let id = ComponentId(self.next_component_id);
        self.next_component_id += 1;
        let kind = component.type_name();
        let key = self.components.insert(ComponentSlot::new(id, object, component));
        target.components.push(key);

        if let Err(err) = self.run_hook(key, LifecycleHook::Instantiated) {
            self.components.remove(key);
            if let Some(target) = self.objects.get_mut(object) {
                target.components.retain(|&attached| attached != key);
            }
            return Err(err);
        }

        if self.state_active {
            self.pending.push(key);
        }
        log::debug!("Attached {} {} to object {:?}", kind, id, object);
        Ok(key)
    }

    /// Component by key, if it has type `T`
    pub fn component<T: Component>(&self, key: ComponentKey) -> Option<&T> {
        self.components.get::<T>(key)
    }

    /// Mutable component by key, if it has type `T`
    pub fn component_mut<T: Component>(&mut self, key: ComponentKey) -> Option<&mut T> {
        self.components.get_mut::<T>(key)
    }

    /// Recorded lifecycle state of a component
    pub fn lifecycle_flags(&self, key: ComponentKey) -> Option<LifecycleFlags> {
        self.components.flags(key)
    }

    /// Container-assigned id of a component
    pub fn component_id(&self, key: ComponentKey) -> Option<ComponentId> {
        self.components.id(key)
    }

    /// Run `f` with mutable access to a component and shared access to the resources
    pub fn with_component_mut<T, R>(
        &mut self,
        key: ComponentKey,
        f: impl FnOnce(&mut T, &ResourceManager) -> R,
    ) -> Result<R, ComponentError>
    where
        T: Component,
    {
        let component = self
            .components
            .get_mut::<T>(key)
            .ok_or(ComponentError::NotFound(key))?;
        Ok(f(component, &self.resources))
    }

    /// Bind (or rebind) the resource of a resource-bound component
    pub fn bind_resource<C, T>(
        &mut self,
        key: ComponentKey,
        candidate: Option<ResourceHandle>,
    ) -> Result<TypedResourceHandle<T>, ComponentError>
    where
        C: Component + ResourceBound<T>,
        T: ResourcePayload,
    {
        let component = self
            .components
            .get_mut::<C>(key)
            .ok_or(ComponentError::NotFound(key))?;
        Ok(component.set_resource(&self.resources, candidate)?)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Begin the game state: initialise every component, then enable and
    /// activate them
    pub fn begin_state(&mut self) -> Result<(), ComponentError> {
        if self.state_active {
            return Err(ComponentError::InvalidState("game state already active"));
        }
        self.state_active = true;
        self.pending.clear();

        let keys = self.ordered_components();
        log::info!("Beginning game state with {} components", keys.len());
        self.start_components(&keys)
    }

    /// Start components attached while the state was active
    pub fn start_pending(&mut self) -> Result<(), ComponentError> {
        if !self.state_active {
            return Err(ComponentError::InvalidState("no active game state"));
        }
        let keys = std::mem::take(&mut self.pending);
        self.start_components(&keys)
    }

    /// End the game state: deactivate, disable and finalise every component
    pub fn end_state(&mut self) -> Result<(), ComponentError> {
        if !self.state_active {
            return Err(ComponentError::InvalidState("no active game state"));
        }

        let keys = self.ordered_components();
        for &key in &keys {
            self.stop_component(key)?;
        }
        for &key in &keys {
            if self.flags_of(key).is_state_initialized() {
                self.run_hook(key, LifecycleHook::FinalizeState)?;
            }
        }

        self.state_active = false;
        self.pending.clear();
        log::info!("Ended game state");
        Ok(())
    }

    /// Enable or disable a component
    ///
    /// Outside the game state this only records whether the component starts enabled.
    pub fn set_component_enabled(&mut self, key: ComponentKey, enabled: bool) -> Result<(), ComponentError> {
        let slot = self.components.slot_mut(key).ok_or(ComponentError::NotFound(key))?;
        slot.start_enabled = enabled;
        let flags = slot.flags;

        if !flags.is_state_initialized() {
            return Ok(());
        }
        match (enabled, flags.is_enabled()) {
            (true, false) => self.run_hook(key, LifecycleHook::Enable),
            (false, true) => self.run_hook(key, LifecycleHook::Disable),
            _ => Ok(()),
        }
    }

    /// Set a game object's own active flag and propagate the hierarchy change
    pub fn set_object_active(&mut self, object: GameObjectKey, active: bool) -> Result<(), ComponentError> {
        let target = self
            .objects
            .get_mut(object)
            .ok_or(ComponentError::ObjectNotFound(object))?;
        if target.is_active_self() == active {
            return Ok(());
        }
        target.set_active_self(active);

        for node in self.subtree(object) {
            let node_active = self.is_active_in_hierarchy(node);
            for key in self.attached_components(node) {
                let flags = self.flags_of(key);
                if !flags.is_state_initialized() {
                    continue;
                }
                if node_active && !flags.is_active_in_hierarchy() {
                    self.run_hook(key, LifecycleHook::ActivateInHierarchy)?;
                } else if !node_active && flags.is_active_in_hierarchy() {
                    self.run_hook(key, LifecycleHook::DeactivateInHierarchy)?;
                }
            }
        }
        Ok(())
    }

    /// Pause or unpause every initialised component
    pub fn set_paused(&mut self, paused: bool) -> Result<(), ComponentError> {
        if self.paused == paused {
            return Ok(());
        }
        self.paused = paused;

        let hook = if paused {
            LifecycleHook::Paused
        } else {
            LifecycleHook::Unpaused
        };
        for key in self.ordered_components() {
            let flags = self.flags_of(key);
            if flags.is_state_initialized() && flags.is_paused() != paused {
                self.run_hook(key, hook)?;
            }
        }
        Ok(())
    }

    /// Detach and delete a component, finalising it first if its state is running
    pub fn remove_component(&mut self, key: ComponentKey) -> Result<(), ComponentError> {
        let flags = self.components.flags(key).ok_or(ComponentError::NotFound(key))?;
        if flags.is_state_initialized() {
            self.stop_component(key)?;
            self.run_hook(key, LifecycleHook::FinalizeState)?;
        }
        self.run_hook(key, LifecycleHook::Delete)?;

        if let Some(slot) = self.components.remove(key) {
            if let Some(object) = self.objects.get_mut(slot.owner) {
                object.components.retain(|&attached| attached != key);
            }
        }
        self.pending.retain(|&pending| pending != key);
        Ok(())
    }

    /// Destroy a game object, its children and all their components
    pub fn destroy_object(&mut self, object: GameObjectKey) -> Result<(), ComponentError> {
        if !self.objects.contains_key(object) {
            return Err(ComponentError::ObjectNotFound(object));
        }

        // Pre-order reversed: children go before their parents.
        for node in self.subtree(object).into_iter().rev() {
            for key in self.attached_components(node).into_iter().rev() {
                self.remove_component(key)?;
            }
            if let Some(removed) = self.objects.remove(node) {
                if let Some(parent) = removed.parent().and_then(|parent| self.objects.get_mut(parent)) {
                    parent.children.retain(|&child| child != node);
                }
            }
            self.object_order.retain(|&key| key != node);
        }
        Ok(())
    }

    /// End the state if needed and destroy every object
    pub fn shutdown(&mut self) -> Result<(), ComponentError> {
        if self.state_active {
            self.end_state()?;
        }
        let roots: Vec<_> = self
            .objects()
            .filter(|(_, object)| object.parent().is_none())
            .map(|(key, _)| key)
            .collect();
        for root in roots {
            self.destroy_object(root)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    /// Dump one component's data to `sink`
    pub fn debug_dump(&self, key: ComponentKey, sink: &mut dyn DiagnosticSink) -> Result<(), ComponentError> {
        let slot = self.components.slot(key).ok_or(ComponentError::NotFound(key))?;
        dump_slot(slot, &self.resources, sink);
        Ok(())
    }

    /// Dump every component to the world's diagnostic sink
    pub fn debug_dump_all(&mut self) {
        for key in self.ordered_components() {
            if let Some(slot) = self.components.slot(key) {
                dump_slot(slot, &self.resources, self.diagnostics.as_mut());
            }
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Render every live renderable component
    ///
    /// Paused components still render. The pass stops at the first error.
    pub fn render(&self, backend: &mut dyn RenderBackend, camera: &Camera2D) -> Result<RenderStats, ComponentError> {
        let mut stats = RenderStats::default();

        for (object_key, object) in self.objects() {
            for &key in object.components() {
                let Some(slot) = self.components.slot(key) else {
                    continue;
                };
                if !slot.flags.is_live() {
                    continue;
                }
                let Some(renderable) = slot.component.as_deref().and_then(|c| c.as_renderable()) else {
                    continue;
                };

                let ctx = RenderContext {
                    id: slot.id,
                    owner: object_key,
                    components: &self.components,
                    resources: &self.resources,
                    transform: object.transform(),
                    camera,
                };
                stats += renderable.render(&ctx, backend)?;
            }
        }

        Ok(stats)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn run_hook(&mut self, key: ComponentKey, hook: LifecycleHook) -> Result<(), ComponentError> {
        let slot = self.components.slot_mut(key).ok_or(ComponentError::NotFound(key))?;
        slot.flags.check(hook)?;
        let (id, owner) = (slot.id, slot.owner);
        let mut component = slot.component.take().ok_or(ComponentError::NotFound(key))?;
        let kind = component.type_name();

        let result = {
            let mut ctx = HookContext::new(id, owner, &self.components, &self.resources, self.diagnostics.as_mut());
            lifecycle::dispatch(component.as_mut(), hook, &mut ctx)
        };

        let slot = self.components.slot_mut(key).ok_or(ComponentError::NotFound(key))?;
        slot.component = Some(component);
        match result {
            Ok(()) => {
                slot.flags.apply(hook);
                log::debug!("{} {}: {}", kind, id, hook);
                self.diagnostics.record(DiagnosticOrigin::new(kind, id.0), format_args!("{hook}"));
                Ok(())
            }
            Err(err) => {
                log::warn!("{} {}: {} failed: {}", kind, id, hook, err);
                Err(err)
            }
        }
    }

    fn start_components(&mut self, keys: &[ComponentKey]) -> Result<(), ComponentError> {
        // Every component is initialised before any is enabled, so
        // initialisation can read peers that are instantiated but not yet started.
        for &key in keys {
            let flags = self.flags_of(key);
            if flags.is_instantiated() && !flags.is_state_initialized() && !flags.is_deleted() {
                self.run_hook(key, LifecycleHook::InitializeState)?;
            }
        }

        for &key in keys {
            let Some(slot) = self.components.slot(key) else {
                continue;
            };
            if !slot.flags.is_state_initialized() {
                continue;
            }
            let (start_enabled, owner) = (slot.start_enabled, slot.owner);

            if start_enabled && !self.flags_of(key).is_enabled() {
                self.run_hook(key, LifecycleHook::Enable)?;
            }
            if self.is_active_in_hierarchy(owner) && !self.flags_of(key).is_active_in_hierarchy() {
                self.run_hook(key, LifecycleHook::ActivateInHierarchy)?;
            }
            if self.paused && !self.flags_of(key).is_paused() {
                self.run_hook(key, LifecycleHook::Paused)?;
            }
        }
        Ok(())
    }

    /// Deactivate and disable without touching the requested enable state
    fn stop_component(&mut self, key: ComponentKey) -> Result<(), ComponentError> {
        if self.flags_of(key).is_active_in_hierarchy() {
            self.run_hook(key, LifecycleHook::DeactivateInHierarchy)?;
        }
        if self.flags_of(key).is_enabled() {
            self.run_hook(key, LifecycleHook::Disable)?;
        }
        Ok(())
    }

    fn flags_of(&self, key: ComponentKey) -> LifecycleFlags {
        self.components.flags(key).unwrap_or_default()
    }

    fn attached_components(&self, object: GameObjectKey) -> Vec<ComponentKey> {
        self.objects
            .get(object)
            .map(|object| object.components().to_vec())
            .unwrap_or_default()
    }

    fn ordered_components(&self) -> Vec<ComponentKey> {
        self.objects()
            .flat_map(|(_, object)| object.components().iter().copied())
            .collect()
    }

    /// `root` and its descendants in pre-order
    fn subtree(&self, root: GameObjectKey) -> Vec<GameObjectKey> {
        let mut nodes = Vec::new();
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            if let Some(object) = self.objects.get(key) {
                nodes.push(key);
                stack.extend(object.children().iter().rev().copied());
            }
        }
        nodes
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn dump_slot(slot: &ComponentSlot, resources: &ResourceManager, sink: &mut dyn DiagnosticSink) {
    let Some(component) = slot.component.as_deref() else {
        return;
    };
    let origin = DiagnosticOrigin::new(component.type_name(), slot.id.0);
    sink.record(origin, format_args!("owner={:?} flags={:?}", slot.owner, slot.flags));
    component.debug_log_component_data(resources, origin, sink);
}
