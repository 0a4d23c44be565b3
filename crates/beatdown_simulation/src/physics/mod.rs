//! Physics module (headless kinematics)
//!
//! Broad-phase и коллизии — на стороне хоста. Здесь только:
//! - PhysicsBody: velocity, которую пишет контроллер
//! - integrate_velocity: position += velocity * dt в FixedUpdate

pub mod body;

// Re-export основных типов
pub use body::{integrate_velocity, PhysicsBody};
