//! # Core Engine Module
//!
//! Shared abstractions used throughout the engine.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for engine behaviour, viewport and tile maps
//! - **Foundation**: Low-level utilities (math, collections, logging, diagnostics)
//! - **Assets**: Resource management
//! - **ECS**: Game objects, components and their lifecycle

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;
pub use crate::assets;
pub use crate::ecs;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    EngineConfig,
    ViewportConfig,
    TileMapConfig,
};
pub use crate::config::{Config, ConfigError};
