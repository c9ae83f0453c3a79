//! Built-in components
//!
//! - [`TileIndexMapComponent`]: binds a [`TileIndexMap`](crate::assets::TileIndexMap) resource
//! - [`TileSetComponent`]: binds an atlas texture and draws single tiles
//! - [`TileMapRendererComponent`]: culls and draws the whole grid every frame

pub mod resource_component;
pub mod tile_index_map;
pub mod tile_map_renderer;
pub mod tile_set;

pub use resource_component::{ResourceBinding, ResourceBound};
pub use tile_index_map::TileIndexMapComponent;
pub use tile_map_renderer::{RendererCache, TileMapRendererComponent};
pub use tile_set::{TileSetComponent, TileSetGeometry};
