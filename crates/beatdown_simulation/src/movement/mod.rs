//! Movement domain — чистая модель движения игрока
//!
//! Содержит:
//! - MovementModel (input + история позиций → velocity, Z-ограничения)

pub mod model;

pub use model::*;
