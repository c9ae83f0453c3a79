//! Tile atlas component
//!
//! A tile set is a texture divided into `column_count` x `line_count` square
//! tiles of `tile_size` pixels. Tile `i` sits at column `i % column_count`,
//! row `i / column_count`.

use std::any::Any;

use super::resource_component::{ResourceBinding, ResourceBound};
use crate::assets::{ResourceKind, ResourceManager, Texture, TextureId, TypedResourceHandle};
use crate::ecs::{Component, ComponentError, DebugDump, HookContext, Lifecycle};
use crate::foundation::diagnostics::{DiagnosticOrigin, DiagnosticSink};
use crate::foundation::math::Rect;
use crate::render::RenderBackend;

const NAME: &str = "TileSetComponent";

/// Atlas layout: grid dimensions and tile size, all non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSetGeometry {
    column_count: u32,
    line_count: u32,
    tile_size: u32,
}

impl TileSetGeometry {
    /// Create a geometry
    ///
    /// # Errors
    /// [`ComponentError::InvalidGeometry`] if any dimension is zero.
    pub fn new(column_count: u32, line_count: u32, tile_size: u32) -> Result<Self, ComponentError> {
        if column_count == 0 || line_count == 0 || tile_size == 0 {
            return Err(ComponentError::InvalidGeometry(format!(
                "{column_count}x{line_count} tiles of {tile_size}px"
            )));
        }
        Ok(Self {
            column_count,
            line_count,
            tile_size,
        })
    }

    /// Geometry covering as many whole tiles as fit in `texture`
    pub fn from_texture(texture: &Texture, tile_size: u32) -> Result<Self, ComponentError> {
        if tile_size == 0 {
            return Err(ComponentError::InvalidGeometry("tile size 0".to_string()));
        }
        Self::new(texture.width() / tile_size, texture.height() / tile_size, tile_size)
    }

    /// Atlas width in tiles
    pub const fn column_count(&self) -> u32 {
        self.column_count
    }

    /// Atlas height in tiles
    pub const fn line_count(&self) -> u32 {
        self.line_count
    }

    /// Tile size in pixels
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of tiles in the atlas
    pub const fn tile_count(&self) -> u32 {
        self.column_count.saturating_mul(self.line_count)
    }

    /// Atlas size in pixels `(width, height)`
    pub const fn pixel_size(&self) -> (u32, u32) {
        (
            self.column_count.saturating_mul(self.tile_size),
            self.line_count.saturating_mul(self.tile_size),
        )
    }

    /// Source rectangle of `tile_index` in atlas pixels
    #[allow(clippy::cast_precision_loss)]
    pub fn source_rect(&self, tile_index: u32) -> Result<Rect, ComponentError> {
        if tile_index >= self.tile_count() {
            return Err(ComponentError::TileOutOfAtlas {
                tile_index,
                tile_count: self.tile_count(),
            });
        }
        let column = tile_index % self.column_count;
        let row = tile_index / self.column_count;
        let size = self.tile_size as f32;
        Ok(Rect::square(column as f32 * size, row as f32 * size, size))
    }
}

/// Binds an atlas texture and draws individual tiles from it
#[derive(Debug)]
pub struct TileSetComponent {
    geometry: TileSetGeometry,
    texture: ResourceBinding<Texture>,
    /// Backend texture captured at state initialisation
    cached_texture: Option<TextureId>,
}

impl TileSetComponent {
    /// Create an unbound tile set with the given layout
    pub fn new(geometry: TileSetGeometry) -> Self {
        Self {
            geometry,
            texture: ResourceBinding::new(),
            cached_texture: None,
        }
    }

    /// Atlas layout
    pub const fn geometry(&self) -> TileSetGeometry {
        self.geometry
    }

    /// Tile size in pixels
    pub const fn tile_size(&self) -> u32 {
        self.geometry.tile_size
    }

    /// Backend texture used for drawing, once the state is initialised
    pub const fn cached_texture(&self) -> Option<TextureId> {
        self.cached_texture
    }

    /// Draw one tile
    ///
    /// Submits exactly one draw call copying the atlas cell of `tile_index`
    /// to the `dest_size` square at `(dest_x, dest_y)`.
    pub fn render_tile(
        &self,
        backend: &mut dyn RenderBackend,
        tile_index: u32,
        dest_x: f32,
        dest_y: f32,
        dest_size: f32,
    ) -> Result<(), ComponentError> {
        let texture = self.cached_texture.ok_or(ComponentError::UnboundResource {
            component: NAME,
            kind: ResourceKind::Texture,
        })?;
        let source = self.geometry.source_rect(tile_index)?;
        backend.draw(texture, source, Rect::square(dest_x, dest_y, dest_size))?;
        Ok(())
    }
}

impl ResourceBound<Texture> for TileSetComponent {
    fn resource_binding(&self) -> &ResourceBinding<Texture> {
        &self.texture
    }

    fn resource_binding_mut(&mut self) -> &mut ResourceBinding<Texture> {
        &mut self.texture
    }

    fn on_resource_bound(&mut self, resources: &ResourceManager, handle: TypedResourceHandle<Texture>) {
        // Outside the game state the cache is filled by initialisation.
        if self.cached_texture.is_none() {
            return;
        }
        if let Some(texture) = resources.get(handle) {
            log::debug!("Tile set switched to texture '{}'", texture.name());
            self.cached_texture = Some(texture.id());
        }
    }
}

impl Lifecycle for TileSetComponent {
    fn on_initialize_state(&mut self, ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        let texture = self.texture.require(ctx.resources(), NAME)?;

        let (width, height) = self.geometry.pixel_size();
        if texture.width() < width || texture.height() < height {
            log::warn!(
                "Texture '{}' is {}x{} but the tile set needs {}x{}",
                texture.name(),
                texture.width(),
                texture.height(),
                width,
                height
            );
        }

        self.cached_texture = Some(texture.id());
        ctx.record(NAME, format_args!("cached texture '{}'", texture.name()));
        Ok(())
    }

    fn on_finalize_state(&mut self, _ctx: &mut HookContext<'_>) -> Result<(), ComponentError> {
        self.cached_texture = None;
        Ok(())
    }
}

impl DebugDump for TileSetComponent {
    fn debug_log_component_data(
        &self,
        resources: &ResourceManager,
        origin: DiagnosticOrigin,
        sink: &mut dyn DiagnosticSink,
    ) {
        if !sink.is_enabled() {
            return;
        }
        let texture = self
            .texture
            .resolve(resources)
            .map_or("unbound", Texture::name);
        sink.record(
            origin,
            format_args!(
                "tile set {}x{} tiles of {}px, texture {}",
                self.geometry.column_count, self.geometry.line_count, self.geometry.tile_size, texture
            ),
        );
    }
}

impl Component for TileSetComponent {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
