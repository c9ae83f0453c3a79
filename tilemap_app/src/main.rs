//! Tile map demo application
//!
//! Builds a small level, runs one game state and pans a camera across it,
//! rendering into a recording backend. Pass a `.toml` or `.ron` configuration
//! path as the first argument to override the defaults.

use thiserror::Error;

use tile_engine::assets::{ResourceError, TileIndexMapError, EMPTY_TILE};
use tile_engine::config::ConfigError;
use tile_engine::foundation::logging;
use tile_engine::prelude::*;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    TileIndexMap(#[from] TileIndexMapError),

    #[error(transparent)]
    Component(#[from] ComponentError),
}

const MAP_COLUMNS: u32 = 40;
const MAP_LINES: u32 = 30;
const ATLAS_COLUMNS: u32 = 4;
const ATLAS_LINES: u32 = 4;
const FRAMES: u32 = 4;

/// Checkerboard of atlas tiles with a border of empty cells
fn level_indexes() -> Vec<u32> {
    let mut tiles = Vec::with_capacity((MAP_COLUMNS * MAP_LINES) as usize);
    for row in 0..MAP_LINES {
        for column in 0..MAP_COLUMNS {
            let border = row == 0 || column == 0 || row == MAP_LINES - 1 || column == MAP_COLUMNS - 1;
            tiles.push(if border {
                EMPTY_TILE
            } else {
                1 + (column + row) % (ATLAS_COLUMNS * ATLAS_LINES - 1)
            });
        }
    }
    tiles
}

fn build_world(config: &ApplicationConfig) -> Result<World, DemoError> {
    let tile_size = config.tile_map.default_tile_size;
    let mut world = World::new();
    if config.engine.debug_mode {
        world.set_diagnostics(Box::new(LogSink::default()));
    }

    let texture = world.resources_mut().insert(
        "terrain",
        Texture::new("terrain", TextureId(1), ATLAS_COLUMNS * tile_size, ATLAS_LINES * tile_size),
    )?;
    let map = world.resources_mut().insert(
        "level_1",
        TileIndexMap::new("level_1", MAP_COLUMNS, MAP_LINES, level_indexes())?,
    )?;

    let level = world.spawn_object("level", Transform2D::identity());

    let mut tile_set = TileSetComponent::new(TileSetGeometry::new(ATLAS_COLUMNS, ATLAS_LINES, tile_size)?);
    tile_set.set_resource(world.resources(), Some(texture))?;
    let mut tile_map = TileIndexMapComponent::new();
    tile_map.set_resource(world.resources(), Some(map))?;

    let tile_set = world.add_component(level, Box::new(tile_set))?;
    let tile_map = world.add_component(level, Box::new(tile_map))?;
    world.add_component(level, Box::new(TileMapRendererComponent::new(tile_map, tile_set)))?;

    Ok(world)
}

fn main() -> Result<(), DemoError> {
    let config_path = std::env::args().nth(1);
    let config = match &config_path {
        Some(path) => ApplicationConfig::load_or_default(path)?,
        None => ApplicationConfig::default(),
    };
    config.validate()?;
    logging::init_with_filter(&config.engine.log_level);

    log::info!(
        "Starting tile map demo ({}x{} viewport, {}px tiles)",
        config.viewport.screen_width,
        config.viewport.screen_height,
        config.tile_map.default_tile_size
    );

    let mut world = build_world(&config)?;
    world.begin_state()?;
    if config.engine.debug_mode {
        world.debug_dump_all();
    }

    let mut camera = Camera2D::from_config(&config.viewport);
    let mut backend = RecordingBackend::new();
    #[allow(clippy::cast_precision_loss)]
    let step = Vec2::new(config.tile_map.default_tile_size as f32 * 3.0, 0.0);

    for frame in 0..FRAMES {
        let stats = world.render(&mut backend, &camera)?;
        log::info!(
            "Frame {}: drew {} tiles, culled {}, skipped {} empty cells ({} draw calls recorded)",
            frame,
            stats.drawn,
            stats.culled,
            stats.empty,
            backend.take_calls().len()
        );
        camera.translate(step);
    }

    world.shutdown()?;
    log::info!("Tile map demo finished");
    Ok(())
}
