//! Combat system module
//!
//! ECS ответственность:
//! - Hitbox triggers: AttackHitbox (toggle во время окна атаки) vs Hurtbox
//! - Combat rules: каждое попадание = 1 урона, смерть = despawn
//! - Events: HitboxEntered, DamageDealt, EntityDied
//!
//! Кто включает hitbox: AI (enemy attack) и player (attack press).

use bevy::prelude::*;

use crate::FrameSet;

pub mod damage;
pub mod hitbox;

// Re-export основных типов
pub use damage::{apply_hitbox_damage, DamageDealt, EntityDied, HIT_DAMAGE};
pub use hitbox::{
    detect_hitbox_overlaps, set_hitbox_active, AttackHitbox, AttackHitboxLink, HitboxEntered,
};

/// Combat Plugin
///
/// Регистрирует combat системы в Update (после AI и player, в FrameSet::Combat).
///
/// Порядок выполнения:
/// 1. detect_hitbox_overlaps — активные hitbox vs hurtbox → HitboxEntered
/// 2. apply_hitbox_damage — HitboxEntered → Health, DamageDealt, EntityDied
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<HitboxEntered>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<crate::animation::AnimationSignal>();

        app.add_systems(
            Update,
            (detect_hitbox_overlaps, apply_hitbox_damage)
                .chain()
                .in_set(FrameSet::Combat),
        );
    }
}
