//! Attack window: закрытие окна атаки врага по deadline.

use bevy::prelude::*;

use crate::ai::EnemyBrain;
use crate::animation::{emit_signal, AnimSignal, AnimationSignal, Animator};
use crate::combat::{set_hitbox_active, AttackHitbox, AttackHitboxLink};

/// Система: завершение атак врагов
///
/// Когда `now >= attack_ends_at`: hitbox off, сигнал "isWalk",
/// возврат в Chase (target есть) или Patrol.
/// Работает до detection tick, чтобы детекция видела актуальный state.
pub fn finish_enemy_attacks(
    time: Res<Time>,
    mut enemies: Query<(Entity, &mut EnemyBrain, Option<&AttackHitboxLink>, Option<&Animator>)>,
    mut hitboxes: Query<&mut AttackHitbox>,
    mut signals: EventWriter<AnimationSignal>,
) {
    let now = time.elapsed_secs();

    for (entity, mut brain, hitbox_link, animator) in enemies.iter_mut() {
        if !brain.finish_attack_if_due(now) {
            continue;
        }

        set_hitbox_active(&mut hitboxes, hitbox_link, false);
        emit_signal(&mut signals, animator, entity, AnimSignal::Walk);
        crate::log(&format!("AI: {:?} attack finished → {:?}", entity, brain.state()));
    }
}
