//! Tile map renderer
//!
//! Draws the tile index map of a [`TileIndexMapComponent`] through the atlas
//! of a [`TileSetComponent`], both referenced by key. Grid dimensions and the
//! tile size are captured when the game state initialises and dropped when it
//! finalises; the renderer never owns grid or texture data.
//!
//! Every frame the grid is walked row by row. Empty cells are skipped, cells
//! whose screen rectangle does not touch the camera viewport are culled, and
//! the rest are drawn at their camera-relative position.

use std::any::Any;

use super::resource_component::ResourceBound;
use super::tile_index_map::TileIndexMapComponent;
use super::tile_set::TileSetComponent;
use crate::assets::{ResourceKind, ResourceManager, TileIndexMap, TileIndexMapError, TypedResourceHandle, EMPTY_TILE};
use crate::ecs::{Component, ComponentError, ComponentKey, DebugDump, HookContext, Lifecycle};
use crate::foundation::diagnostics::{DiagnosticOrigin, DiagnosticSink};
use crate::foundation::math::{Rect, Transform2D, Vec2};
use crate::render::{RenderBackend, RenderContext, RenderStats, Renderable};

const NAME: &str = "TileMapRendererComponent";

/// Values captured from the peers at state initialisation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererCache {
    /// Map width in tiles
    pub column_count: u32,
    /// Map height in tiles
    pub line_count: u32,
    /// `column_count * line_count`
    pub tile_count: usize,
    /// Unscaled tile size in pixels
    pub tile_size: u32,
    /// Map being rendered
    pub tile_index_map: TypedResourceHandle<TileIndexMap>,
}

/// Renders a tile index map with viewport culling
#[derive(Debug)]
pub struct TileMapRendererComponent {
    tile_index_map: ComponentKey,
    tile_set: ComponentKey,
    cache: Option<RendererCache>,
}

impl TileMapRendererComponent {
    /// Create a renderer for the given peers
    pub const fn new(tile_index_map: ComponentKey, tile_set: ComponentKey) -> Self {
        Self {
            tile_index_map,
            tile_set,
            cache: None,
        }
    }

    /// Captured values, present inside the game state
    pub const fn cache(&self) -> Option<&RendererCache> {
        self.cache.as_ref()
    }

    /// Screen rectangle of the tile at `(column, row)`
    #[allow(clippy::cast_precision_loss)]
    pub fn tile_screen_rect(origin: Vec2, scaled_tile_size: f32, column: u32, row: u32) -> Rect {
        Rect::square(
            origin.x + column as f32 * scaled_tile_size,
            origin.y + row as f32 * scaled_tile_size,
            scaled_tile_size,
        )
    }

    /// Grid cell under a screen-space point, if any
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn tile_at(&self, transform: &Transform2D, point: Vec2) -> Option<(u32, u32)> {
        let cache = self.cache.as_ref()?;
        let scaled = scaled_tile_size(cache.tile_size, transform);
        if scaled <= 0.0 {
            return None;
        }

        let local = (point - transform.screen_position()) / scaled;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let (column, row) = (local.x.floor() as u32, local.y.floor() as u32);
        (column < cache.column_count && row < cache.line_count).then_some((column, row))
    }

    fn unbound() -> ComponentError {
        ComponentError::UnboundResource {
            component: NAME,
            kind: ResourceKind::TileIndexMap,
        }
    }
}

/// `round(tile_size * scale.x)`
#[allow(clippy::cast_precision_loss)]
fn scaled_tile_size(tile_size: u32, transform: &Transform2D) -> f32 {
    (tile_size as f32 * transform.local_scale().x).round()
}

impl Lifecycle for TileMapRendererComponent {
    fn on_initialize_state(&mut self, ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        let map_component = ctx.require_component::<TileIndexMapComponent>(self.tile_index_map)?;
        let tile_set = ctx.require_component::<TileSetComponent>(self.tile_set)?;

        let handle = map_component.get_resource().ok_or_else(Self::unbound)?;
        let map = ctx.resources().try_get(handle)?;

        let cache = RendererCache {
            column_count: map.column_count(),
            line_count: map.line_count(),
            tile_count: map.tile_indexes_count(),
            tile_size: tile_set.tile_size(),
            tile_index_map: handle,
        };
        ctx.record(
            NAME,
            format_args!(
                "cached {}x{} grid of {}px tiles",
                cache.column_count, cache.line_count, cache.tile_size
            ),
        );
        self.cache = Some(cache);
        Ok(())
    }

    fn on_finalize_state(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.cache = None;
        Ok(())
    }
}

impl Renderable for TileMapRendererComponent {
    fn render(&self, ctx: &RenderContext<'_>, backend: &mut dyn RenderBackend) -> Result<RenderStats, ComponentError> {
        let cache = self.cache.as_ref().ok_or_else(Self::unbound)?;
        let tile_set = ctx
            .components
            .get_owned::<TileSetComponent>(self.tile_set, ctx.owner)
            .ok_or(ComponentError::MissingComponent {
                expected: "TileSetComponent",
            })?;
        let tiles = ctx.resources.try_get(cache.tile_index_map)?.tile_indexes();
        if tiles.len() != cache.tile_count {
            return Err(TileIndexMapError::SizeMismatch {
                expected: cache.tile_count,
                actual: tiles.len(),
            }
            .into());
        }

        let viewport = ctx.camera.viewport();
        let origin = ctx.transform.screen_position();
        let scaled = scaled_tile_size(cache.tile_size, ctx.transform);
        if scaled <= 0.0 {
            return Err(ComponentError::InvalidGeometry(format!(
                "{}px tiles scaled by {} have no area",
                cache.tile_size,
                ctx.transform.local_scale().x
            )));
        }

        let mut stats = RenderStats::default();
        let mut offset = 0;
        for row in 0..cache.line_count {
            for column in 0..cache.column_count {
                let tile_index = tiles[offset];
                offset += 1;

                if tile_index == EMPTY_TILE {
                    stats.empty += 1;
                    continue;
                }

                let rect = Self::tile_screen_rect(origin, scaled, column, row);
                if !rect.overlaps_inclusive(&viewport) {
                    stats.culled += 1;
                    continue;
                }

                let dest = ctx.camera.to_view(rect.origin());
                tile_set.render_tile(backend, tile_index, dest.x, dest.y, scaled)?;
                stats.drawn += 1;
            }
        }

        Ok(stats)
    }
}

impl DebugDump for TileMapRendererComponent {
    fn debug_log_component_data(
        &self,
        _resources: &ResourceManager,
        origin: DiagnosticOrigin,
        sink: &mut dyn DiagnosticSink,
    ) {
        match &self.cache {
            Some(cache) => sink.record(
                origin,
                format_args!(
                    "renderer {}x{} ({} tiles) at {}px",
                    cache.column_count, cache.line_count, cache.tile_count, cache.tile_size
                ),
            ),
            None => sink.record(origin, format_args!("renderer not initialised")),
        }
    }
}

impl Component for TileMapRendererComponent {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_renderable(&self) -> Option<&dyn Renderable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn renderer_with_cache(column_count: u32, line_count: u32, tile_size: u32) -> TileMapRendererComponent {
        let mut renderer = TileMapRendererComponent::new(ComponentKey::default(), ComponentKey::default());
        renderer.cache = Some(RendererCache {
            column_count,
            line_count,
            tile_count: (column_count * line_count) as usize,
            tile_size,
            tile_index_map: TypedResourceHandle::new(crate::foundation::collections::ResourceKey::default()),
        });
        renderer
    }

    #[test]
    fn test_tile_screen_rect() {
        let rect = TileMapRendererComponent::tile_screen_rect(Vec2::new(10.0, 20.0), 16.0, 2, 1);
        assert_eq!(rect, Rect::square(42.0, 36.0, 16.0));
    }

    #[test]
    fn test_scaled_tile_size_rounds() {
        let transform = Transform2D::identity().with_uniform_scale(1.3);
        assert_relative_eq!(scaled_tile_size(16, &transform), 21.0);
        assert_relative_eq!(scaled_tile_size(16, &Transform2D::identity()), 16.0);
    }

    #[test]
    fn test_tile_at_inverts_placement() {
        let renderer = renderer_with_cache(4, 3, 16);
        let transform = Transform2D::from_position(Vec2::new(8.0, 8.0));

        assert_eq!(renderer.tile_at(&transform, Vec2::new(8.0, 8.0)), Some((0, 0)));
        assert_eq!(renderer.tile_at(&transform, Vec2::new(30.0, 40.0)), Some((1, 2)));
        assert_eq!(renderer.tile_at(&transform, Vec2::new(72.0, 8.0)), None);
        assert_eq!(renderer.tile_at(&transform, Vec2::new(7.0, 8.0)), None);
    }

    #[test]
    fn test_tile_at_without_cache() {
        let renderer = TileMapRendererComponent::new(ComponentKey::default(), ComponentKey::default());
        assert_eq!(renderer.tile_at(&Transform2D::identity(), Vec2::zeros()), None);
    }
}
