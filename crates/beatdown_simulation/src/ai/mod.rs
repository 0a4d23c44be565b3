//! AI decision-making module
//!
//! FSM врага: Patrol → Chase → Attack → (Chase | Patrol), плюс Idle.

use bevy::prelude::*;

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use systems::*;

use crate::animation::AnimationSignal;
use crate::{DeterministicRng, FrameSet};

/// AI Plugin
///
/// Регистрирует AI системы в Update (per-frame), порядок выполнения:
/// 1. bind_visual_roots — одноразовая привязка спрайта
/// 2. finish_enemy_attacks — закрытие окон атаки по deadline
/// 3. enemy_detection_tick — детекция игрока, переходы, запуск атаки
/// 4. enemy_movement — движение по state
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationSignal>()
            .init_resource::<DeterministicRng>();

        app.add_systems(
            Update,
            (
                systems::bind_visual_roots,
                systems::finish_enemy_attacks,
                systems::enemy_detection_tick,
                systems::enemy_movement,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(FrameSet::Ai),
        );
    }
}
