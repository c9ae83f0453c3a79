//! Scenario tests for the world, the lifecycle and the tile map components

mod lifecycle_integration;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::assets::{Resource, ResourceHandle, Texture, TextureId, TileIndexMap};
use crate::ecs::components::{TileIndexMapComponent, TileMapRendererComponent, TileSetComponent, TileSetGeometry};
use crate::ecs::{ComponentKey, GameObjectKey, ResourceBound, World};
use crate::foundation::diagnostics::{DiagnosticOrigin, DiagnosticSink};
use crate::foundation::math::Transform2D;

/// World holding one object with a tile set, a tile index map and a renderer
pub(super) struct TileMapFixture {
    pub world: World,
    pub object: GameObjectKey,
    pub tile_set: ComponentKey,
    pub tile_map: ComponentKey,
    pub renderer: ComponentKey,
    pub map: ResourceHandle,
}

/// 4x4 atlas of 16px tiles on texture 1, with the given map bound
pub(super) fn tile_map_fixture(column_count: u32, line_count: u32, tile_indexes: Vec<u32>) -> TileMapFixture {
    tile_map_fixture_at(column_count, line_count, tile_indexes, Transform2D::identity())
}

pub(super) fn tile_map_fixture_at(
    column_count: u32,
    line_count: u32,
    tile_indexes: Vec<u32>,
    transform: Transform2D,
) -> TileMapFixture {
    let mut world = World::new();
    let texture = world
        .resources_mut()
        .insert("atlas", Resource::Texture(Texture::new("atlas", TextureId(1), 64, 64)))
        .unwrap();
    let map = world
        .resources_mut()
        .insert(
            "level",
            TileIndexMap::new("level", column_count, line_count, tile_indexes).unwrap(),
        )
        .unwrap();

    let object = world.spawn_object("level", transform);

    let mut tile_set = TileSetComponent::new(TileSetGeometry::new(4, 4, 16).unwrap());
    tile_set.set_resource(world.resources(), Some(texture)).unwrap();
    let mut tile_map = TileIndexMapComponent::new();
    tile_map.set_resource(world.resources(), Some(map)).unwrap();

    let tile_set = world.add_component(object, Box::new(tile_set)).unwrap();
    let tile_map = world.add_component(object, Box::new(tile_map)).unwrap();
    let renderer = world
        .add_component(object, Box::new(TileMapRendererComponent::new(tile_map, tile_set)))
        .unwrap();

    TileMapFixture {
        world,
        object,
        tile_set,
        tile_map,
        renderer,
        map,
    }
}

/// Diagnostic sink whose records stay readable after the world takes ownership
#[derive(Clone, Default)]
pub(super) struct SharedSink(pub Rc<RefCell<Vec<String>>>);

impl DiagnosticSink for SharedSink {
    fn record(&mut self, origin: DiagnosticOrigin, message: fmt::Arguments<'_>) {
        self.0.borrow_mut().push(format!("{origin}: {message}"));
    }
}
