//! Component lifecycle state machine
//!
//! The container tracks each component's state as [`LifecycleFlags`] and
//! checks every hook against them before dispatching:
//!
//! ```text
//! Instantiated -> StateInitialized -> { Enabled <-> Disabled }
//!                                     x { ActiveInHierarchy <-> Inactive }
//!                                     x { Paused <-> Unpaused }
//!              -> StateFinalized -> (StateInitialized again | Deleted)
//! ```
//!
//! Components implement [`Lifecycle`] to react to the transitions; every hook
//! defaults to a no-op.

use std::fmt;

use bitflags::bitflags;
use thiserror::Error;

use super::component::{Component, ComponentError, ComponentId};
use super::storage::ComponentTable;
use crate::assets::ResourceManager;
use crate::foundation::collections::{ComponentKey, GameObjectKey};
use crate::foundation::diagnostics::{DiagnosticOrigin, DiagnosticSink};

bitflags! {
    /// Lifecycle state of a component as recorded by its container
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LifecycleFlags: u16 {
        /// `on_instantiated` completed
        const INSTANTIATED = 1;
        /// Inside the game-state window (`on_initialize_state` ran, finalize has not)
        const STATE_INITIALIZED = 1 << 1;
        /// `on_enable` fired and no `on_disable` since
        const ENABLED = 1 << 2;
        /// Owning object chain is active
        const ACTIVE_IN_HIERARCHY = 1 << 3;
        /// Inside a pause
        const PAUSED = 1 << 4;
        /// `on_finalize_state` ran at least once
        const STATE_FINALIZED = 1 << 5;
        /// `on_delete` ran
        const DELETED = 1 << 6;
    }
}

/// Named lifecycle hooks, in the order a full lifecycle visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleHook {
    /// `on_instantiated`
    Instantiated,
    /// `on_initialize_state`
    InitializeState,
    /// `on_enable`
    Enable,
    /// `on_disable`
    Disable,
    /// `on_activate_in_hierarchy`
    ActivateInHierarchy,
    /// `on_deactivate_in_hierarchy`
    DeactivateInHierarchy,
    /// `on_paused`
    Paused,
    /// `on_unpaused`
    Unpaused,
    /// `on_finalize_state`
    FinalizeState,
    /// `on_delete`
    Delete,
}

impl LifecycleHook {
    /// Method name of the hook
    pub const fn name(self) -> &'static str {
        match self {
            Self::Instantiated => "on_instantiated",
            Self::InitializeState => "on_initialize_state",
            Self::Enable => "on_enable",
            Self::Disable => "on_disable",
            Self::ActivateInHierarchy => "on_activate_in_hierarchy",
            Self::DeactivateInHierarchy => "on_deactivate_in_hierarchy",
            Self::Paused => "on_paused",
            Self::Unpaused => "on_unpaused",
            Self::FinalizeState => "on_finalize_state",
            Self::Delete => "on_delete",
        }
    }
}

impl fmt::Display for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle ordering violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The hook is not allowed in the component's current state
    #[error("{hook} not allowed in lifecycle state {flags:?}")]
    InvalidTransition {
        /// Hook that was requested
        hook: LifecycleHook,
        /// State at the time of the request
        flags: LifecycleFlags,
    },
}

impl LifecycleFlags {
    /// Check whether `hook` may fire in this state
    pub fn check(self, hook: LifecycleHook) -> Result<(), LifecycleError> {
        let allowed = match hook {
            LifecycleHook::Instantiated => !self.contains(Self::INSTANTIATED),
            LifecycleHook::InitializeState => {
                self.contains(Self::INSTANTIATED)
                    && !self.intersects(Self::DELETED | Self::STATE_INITIALIZED)
            }
            LifecycleHook::Enable
            | LifecycleHook::Disable
            | LifecycleHook::ActivateInHierarchy
            | LifecycleHook::DeactivateInHierarchy
            | LifecycleHook::Paused
            | LifecycleHook::Unpaused
            | LifecycleHook::FinalizeState => self.contains(Self::STATE_INITIALIZED),
            LifecycleHook::Delete => {
                self.contains(Self::INSTANTIATED)
                    && !self.intersects(Self::DELETED | Self::STATE_INITIALIZED)
            }
        };

        if allowed {
            Ok(())
        } else {
            Err(LifecycleError::InvalidTransition { hook, flags: self })
        }
    }

    /// Record that `hook` completed
    pub fn apply(&mut self, hook: LifecycleHook) {
        match hook {
            LifecycleHook::Instantiated => self.insert(Self::INSTANTIATED),
            LifecycleHook::InitializeState => {
                self.insert(Self::STATE_INITIALIZED);
                self.remove(Self::STATE_FINALIZED);
            }
            LifecycleHook::Enable => self.insert(Self::ENABLED),
            LifecycleHook::Disable => self.remove(Self::ENABLED),
            LifecycleHook::ActivateInHierarchy => self.insert(Self::ACTIVE_IN_HIERARCHY),
            LifecycleHook::DeactivateInHierarchy => self.remove(Self::ACTIVE_IN_HIERARCHY),
            LifecycleHook::Paused => self.insert(Self::PAUSED),
            LifecycleHook::Unpaused => self.remove(Self::PAUSED),
            LifecycleHook::FinalizeState => {
                self.remove(Self::STATE_INITIALIZED | Self::ENABLED | Self::ACTIVE_IN_HIERARCHY | Self::PAUSED);
                self.insert(Self::STATE_FINALIZED);
            }
            LifecycleHook::Delete => self.insert(Self::DELETED),
        }
    }

    /// `on_instantiated` completed
    pub const fn is_instantiated(self) -> bool {
        self.contains(Self::INSTANTIATED)
    }

    /// Inside the game-state window
    pub const fn is_state_initialized(self) -> bool {
        self.contains(Self::STATE_INITIALIZED)
    }

    /// Locally enabled
    pub const fn is_enabled(self) -> bool {
        self.contains(Self::ENABLED)
    }

    /// Owning object chain is active
    pub const fn is_active_in_hierarchy(self) -> bool {
        self.contains(Self::ACTIVE_IN_HIERARCHY)
    }

    /// Paused
    pub const fn is_paused(self) -> bool {
        self.contains(Self::PAUSED)
    }

    /// Deleted
    pub const fn is_deleted(self) -> bool {
        self.contains(Self::DELETED)
    }

    /// Initialised, enabled and active in hierarchy: the component takes part in the frame
    pub const fn is_live(self) -> bool {
        self.contains(Self::STATE_INITIALIZED.union(Self::ENABLED).union(Self::ACTIVE_IN_HIERARCHY))
    }
}

/// What a lifecycle hook can see while it runs
///
/// The component being called is checked out of the table for the duration of
/// the hook, so looking up its own key returns `None`.
pub struct HookContext<'a> {
    id: ComponentId,
    owner: GameObjectKey,
    components: &'a ComponentTable,
    resources: &'a ResourceManager,
    diagnostics: &'a mut dyn DiagnosticSink,
}

impl<'a> HookContext<'a> {
    pub(crate) fn new(
        id: ComponentId,
        owner: GameObjectKey,
        components: &'a ComponentTable,
        resources: &'a ResourceManager,
        diagnostics: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            id,
            owner,
            components,
            resources,
            diagnostics,
        }
    }

    /// Id of the component the hook runs on
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// Game object owning the component
    pub const fn owner(&self) -> GameObjectKey {
        self.owner
    }

    /// Resource manager
    pub const fn resources(&self) -> &'a ResourceManager {
        self.resources
    }

    /// Sibling component lookup; components of other objects are not visible
    pub fn component<T: Component>(&self, key: ComponentKey) -> Option<&'a T> {
        self.components.get_owned::<T>(key, self.owner)
    }

    /// Sibling component lookup, reporting absence as [`ComponentError::MissingComponent`]
    pub fn require_component<T: Component>(&self, key: ComponentKey) -> Result<&'a T, ComponentError> {
        self.component::<T>(key).ok_or(ComponentError::MissingComponent {
            expected: short_type_name::<T>(),
        })
    }

    /// Record a diagnostic line attributed to this component
    pub fn record(&mut self, kind: &'static str, message: fmt::Arguments<'_>) {
        self.diagnostics.record(DiagnosticOrigin::new(kind, self.id.0), message);
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Lifecycle hooks invoked by the owning container
///
/// Hooks are synchronous and are not retried. An error aborts the container
/// operation that triggered the hook and leaves the component's recorded
/// state where it was.
pub trait Lifecycle {
    /// Fired exactly once, right after the component is attached
    fn on_instantiated(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Start of the game-state window; peers on the same object are instantiated
    fn on_initialize_state(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// End of the game-state window; drop cached cross-component references
    fn on_finalize_state(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Component became enabled
    fn on_enable(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Component became disabled
    fn on_disable(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Owning object chain became active
    fn on_activate_in_hierarchy(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Owning object chain became inactive
    fn on_deactivate_in_hierarchy(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Pause began; cached state must survive
    fn on_paused(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Pause ended
    fn on_unpaused(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Last hook before the component is dropped; referenced resources stay alive
    fn on_delete(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }
}

/// Route `hook` to the matching trait method
pub(crate) fn dispatch(
    component: &mut dyn Component,
    hook: LifecycleHook,
    ctx: &mut HookContext<'_>,
) -> Result<(), ComponentError> {
    match hook {
        LifecycleHook::Instantiated => component.on_instantiated(ctx),
        LifecycleHook::InitializeState => component.on_initialize_state(ctx),
        LifecycleHook::Enable => component.on_enable(ctx),
        LifecycleHook::Disable => component.on_disable(ctx),
        LifecycleHook::ActivateInHierarchy => component.on_activate_in_hierarchy(ctx),
        LifecycleHook::DeactivateInHierarchy => component.on_deactivate_in_hierarchy(ctx),
        LifecycleHook::Paused => component.on_paused(ctx),
        LifecycleHook::Unpaused => component.on_unpaused(ctx),
        LifecycleHook::FinalizeState => component.on_finalize_state(ctx),
        LifecycleHook::Delete => component.on_delete(ctx),
    }
}
