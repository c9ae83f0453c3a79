//! Per-frame rendering capability

use super::{Camera2D, RenderBackend, RenderStats};
use crate::assets::ResourceManager;
use crate::ecs::{ComponentError, ComponentId, ComponentTable};
use crate::foundation::collections::GameObjectKey;
use crate::foundation::math::Transform2D;

/// Read-only view of the world handed to a renderable for one frame
pub struct RenderContext<'a> {
    /// Id of the component being rendered
    pub id: ComponentId,
    /// Game object owning the component
    pub owner: GameObjectKey,
    /// Sibling components
    pub components: &'a ComponentTable,
    /// Resource manager
    pub resources: &'a ResourceManager,
    /// Transform of the owning object
    pub transform: &'a Transform2D,
    /// Camera of the current pass
    pub camera: &'a Camera2D,
}

/// Components that draw every frame
pub trait Renderable {
    /// Submit this frame's draw calls to `backend`
    fn render(&self, ctx: &RenderContext<'_>, backend: &mut dyn RenderBackend) -> Result<RenderStats, ComponentError>;
}
