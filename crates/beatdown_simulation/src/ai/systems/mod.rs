//! AI systems (enemy FSM)

pub mod attack;
pub mod detection;
pub mod movement;
pub mod visual;

// Re-export all systems
pub use attack::*;
pub use detection::*;
pub use movement::*;
pub use visual::*;
