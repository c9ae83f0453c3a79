//! Component trait and errors
//!
//! Components are polymorphic over a small set of capabilities instead of a
//! class hierarchy:
//!
//! - [`Lifecycle`]: hooks driven by the container (required)
//! - [`DebugDump`]: side-effect-free state dump (required)
//! - [`Renderable`]: per-frame drawing (optional, exposed via [`Component::as_renderable`])
//! - [`ResourceBound<T>`](super::components::ResourceBound): typed resource binding (optional)

use std::any::Any;
use std::fmt;

use thiserror::Error;

use super::lifecycle::{Lifecycle, LifecycleError};
use crate::assets::{ResourceError, ResourceKind, ResourceManager, TileIndexMapError};
use crate::foundation::collections::{ComponentKey, GameObjectKey};
use crate::foundation::diagnostics::{DiagnosticOrigin, DiagnosticSink};
use crate::render::{RenderError, Renderable};

/// Monotonically increasing component identity, assigned by the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side-effect-free diagnostic dump, callable in any lifecycle state
pub trait DebugDump {
    /// Write the component's data to `sink`
    fn debug_log_component_data(
        &self,
        resources: &ResourceManager,
        origin: DiagnosticOrigin,
        sink: &mut dyn DiagnosticSink,
    );
}

/// A unit of behaviour attached to a game object
pub trait Component: Lifecycle + DebugDump + 'static {
    /// Short type name used in logs and diagnostics
    fn type_name(&self) -> &'static str;

    /// Upcast for typed lookups
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed lookups
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Rendering capability, if the component draws anything
    fn as_renderable(&self) -> Option<&dyn Renderable> {
        None
    }
}

/// Component errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// Resource binding or lookup failed
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Tile map addressing failed
    #[error(transparent)]
    TileIndexMap(#[from] TileIndexMapError),

    /// The rendering backend rejected a draw
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A hook was requested out of order
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// A resource-dependent value was used before the resource was bound and cached
    #[error("{component} used its {kind} resource before it was bound and cached")]
    UnboundResource {
        /// Component that needed the resource
        component: &'static str,
        /// Kind of resource it needed
        kind: ResourceKind,
    },

    /// A peer component referenced by key does not exist or has another type
    #[error("Missing peer component: expected {expected}")]
    MissingComponent {
        /// Type name of the expected component
        expected: &'static str,
    },

    /// No component with this key
    #[error("Component not found: {0:?}")]
    NotFound(ComponentKey),

    /// No game object with this key
    #[error("Game object not found: {0:?}")]
    ObjectNotFound(GameObjectKey),

    /// Tile set geometry has a zero dimension
    #[error("Invalid tile set geometry: {0}")]
    InvalidGeometry(String),

    /// A tile index beyond the atlas was requested
    #[error("Tile index {tile_index} outside atlas of {tile_count} tiles")]
    TileOutOfAtlas {
        /// Requested tile index
        tile_index: u32,
        /// Number of tiles in the atlas
        tile_count: u32,
    },

    /// The container was asked to do something its game state does not allow
    #[error("Invalid game state: {0}")]
    InvalidState(&'static str),
}
