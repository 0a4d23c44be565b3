//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: здоровье и попадания (Health, Hurtbox, Destructible)
//! - player: tag для детекции (Player)
//! - visual: facing и визуальный root (Facing, VisualRoot, SpriteVisual)

pub mod actor;
pub mod player;
pub mod visual;

// Re-exports для удобного импорта
pub use actor::*;
pub use player::*;
pub use visual::*;
