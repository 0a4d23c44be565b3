//! Debug gizmo данные врага (без влияния на поведение)
//!
//! Хост рисует сферы: vision radius (жёлтая) и attack range (красная).

use bevy::prelude::*;

use crate::ai::EnemyConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoColor {
    Yellow,
    Red,
}

impl GizmoColor {
    /// Linear RGB для хоста
    pub fn rgb(self) -> [f32; 3] {
        match self {
            GizmoColor::Yellow => [1.0, 1.0, 0.0],
            GizmoColor::Red => [1.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugSphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: GizmoColor,
}

/// Две сферы врага: [vision, attack]
///
/// Attack radius: attack_range, а при attack_range <= 0 — min_player_distance
/// (без минимума 0.1, который применяет сама атака).
pub fn enemy_debug_spheres(position: Vec3, config: &EnemyConfig) -> [DebugSphere; 2] {
    let attack_radius = if config.attack_range > 0.0 {
        config.attack_range
    } else {
        config.min_player_distance
    };

    [
        DebugSphere {
            center: position,
            radius: config.vision_radius,
            color: GizmoColor::Yellow,
        },
        DebugSphere {
            center: position,
            radius: attack_radius,
            color: GizmoColor::Red,
        },
    ]
}
