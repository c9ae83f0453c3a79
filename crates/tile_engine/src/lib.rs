//! # Tile Engine
//!
//! The component-lifecycle and tile-rendering core of a 2D game engine.
//!
//! ## Features
//!
//! - **Component Lifecycle**: Arena-owned components driven through an explicit,
//!   container-checked lifecycle state machine
//! - **Resource Binding**: Typed resource handles with checked downcasts
//! - **Tile Maps**: Dense tile index grids bound to a tile atlas
//! - **Culled Rendering**: Per-frame viewport culling over the tile grid
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tile_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut world = World::new();
//!
//!     let texture = world.resources_mut().insert(
//!         "terrain",
//!         Resource::Texture(Texture::new("terrain", TextureId(1), 64, 64)),
//!     )?;
//!     let map = world.resources_mut().insert(
//!         "level_1",
//!         Resource::TileIndexMap(TileIndexMap::new("level_1", 4, 3, vec![0; 12])?),
//!     )?;
//!
//!     let object = world.spawn_object("level", Transform2D::identity());
//!     let geometry = TileSetGeometry::new(4, 4, 16)?;
//!
//!     let mut tile_set = TileSetComponent::new(geometry);
//!     tile_set.set_resource(world.resources(), Some(texture))?;
//!     let mut tile_map = TileIndexMapComponent::new();
//!     tile_map.set_resource(world.resources(), Some(map))?;
//!
//!     let tile_set = world.add_component(object, Box::new(tile_set))?;
//!     let tile_map = world.add_component(object, Box::new(tile_map))?;
//!     world.add_component(object, Box::new(TileMapRendererComponent::new(tile_map, tile_set)))?;
//!
//!     world.begin_state()?;
//!     let mut backend = RecordingBackend::new();
//!     let stats = world.render(&mut backend, &Camera2D::new(320, 240))?;
//!     println!("drew {} tiles", stats.drawn);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod ecs;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Vec2, Rect, Transform2D},
            diagnostics::{DiagnosticSink, LogSink, MemorySink, NullSink},
        },
        assets::{
            Resource, ResourceError, ResourceHandle, ResourceKind, ResourceManager,
            Texture, TextureId, TileIndexMap, TileIndexMapError, TypedResourceHandle,
        },
        render::{Camera2D, RecordingBackend, RenderBackend, RenderError, RenderStats},
        ecs::{
            World, GameObjectKey, ComponentKey, ComponentId, Component, ComponentError,
            Lifecycle, LifecycleFlags, LifecycleHook, DebugDump, ResourceBound,
            components::{
                TileIndexMapComponent, TileMapRendererComponent, TileSetComponent,
                TileSetGeometry,
            },
        },
        core::config::{ApplicationConfig, EngineConfig, ViewportConfig, TileMapConfig},
        config::Config,
    };
}
