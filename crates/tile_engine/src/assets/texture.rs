//! Texture resources
//!
//! The pixels themselves live in the rendering backend; the engine only keeps
//! the backend handle and the texture's size.

/// Backend handle for an uploaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A texture known to the rendering backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    name: String,
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture {
    /// Create a texture descriptor
    pub fn new(name: impl Into<String>, id: TextureId, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            id,
            width,
            height,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backend handle
    pub const fn id(&self) -> TextureId {
        self.id
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }
}
