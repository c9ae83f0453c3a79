//! Component owning a reference to a tile index map resource

use std::any::Any;

use super::resource_component::{ResourceBinding, ResourceBound};
use crate::assets::{ResourceManager, TileIndexMap};
use crate::ecs::{Component, ComponentError, DebugDump, Lifecycle};
use crate::foundation::diagnostics::{DiagnosticOrigin, DiagnosticSink};

/// Resource-bound component exposing a [`TileIndexMap`] to renderers
#[derive(Debug, Default)]
pub struct TileIndexMapComponent {
    map: ResourceBinding<TileIndexMap>,
}

impl TileIndexMapComponent {
    /// Create an unbound component
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound map, if any
    pub fn map<'r>(&self, resources: &'r ResourceManager) -> Option<&'r TileIndexMap> {
        self.map.resolve(resources)
    }

    /// Tile index at `(column, row)` of the bound map
    pub fn tile_index(&self, resources: &ResourceManager, column: u32, row: u32) -> Result<u32, ComponentError> {
        let map = self.map.require(resources, "TileIndexMapComponent")?;
        Ok(map.tile_index(column, row)?)
    }
}

impl ResourceBound<TileIndexMap> for TileIndexMapComponent {
    fn resource_binding(&self) -> &ResourceBinding<TileIndexMap> {
        &self.map
    }

    fn resource_binding_mut(&mut self) -> &mut ResourceBinding<TileIndexMap> {
        &mut self.map
    }
}

impl Lifecycle for TileIndexMapComponent {}

impl DebugDump for TileIndexMapComponent {
    fn debug_log_component_data(
        &self,
        resources: &ResourceManager,
        origin: DiagnosticOrigin,
        sink: &mut dyn DiagnosticSink,
    ) {
        if !sink.is_enabled() {
            return;
        }
        match self.map(resources) {
            Some(map) => sink.record(
                origin,
                format_args!(
                    "tile index map '{}' {}x{} ({} non-empty)",
                    map.name(),
                    map.column_count(),
                    map.line_count(),
                    map.non_empty_count()
                ),
            ),
            None => sink.record(origin, format_args!("tile index map unbound")),
        }
    }
}

impl Component for TileIndexMapComponent {
    fn type_name(&self) -> &'static str {
        "TileIndexMapComponent"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
