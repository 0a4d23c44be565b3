//! Damage система
//!
//! Обрабатывает HitboxEntered события: каждое попадание = ровно 1 урона.
//! Смерть: сигнал "isDeath" (если есть Animator), EntityDied, despawn
//! жертвы вместе с её hitbox.

use bevy::prelude::*;

use crate::animation::{emit_signal, AnimSignal, AnimationSignal, Animator};
use crate::combat::hitbox::{AttackHitboxLink, HitboxEntered};
use crate::components::Health;

/// Урон за одно попадание
pub const HIT_DAMAGE: u32 = 1;

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Система: apply damage от HitboxEntered событий
///
/// 1. Цель без Health или уже мертвая → пропуск (смерть ровно одна)
/// 2. Health -1, сигнал "isDamage"
/// 3. Смертельный удар → "isDeath", EntityDied, despawn (цель + её hitbox)
pub fn apply_hitbox_damage(
    mut commands: Commands,
    mut entered_events: EventReader<HitboxEntered>,
    mut targets: Query<(&mut Health, Option<&Animator>, Option<&AttackHitboxLink>)>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
    mut signals: EventWriter<AnimationSignal>,
) {
    for hit in entered_events.read() {
        let Ok((mut health, animator, hitbox_link)) = targets.get_mut(hit.target) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        let died = health.take_damage(HIT_DAMAGE);
        emit_signal(&mut signals, animator, hit.target, AnimSignal::Damage);

        damage_dealt_events.write(DamageDealt {
            attacker: hit.owner,
            target: hit.target,
            damage: HIT_DAMAGE,
            target_died: died,
        });

        if !died {
            continue;
        }

        emit_signal(&mut signals, animator, hit.target, AnimSignal::Death);
        entity_died_events.write(EntityDied {
            entity: hit.target,
            killer: Some(hit.owner),
        });

        if let Some(link) = hitbox_link {
            if let Ok(mut hitbox_commands) = commands.get_entity(link.0) {
                hitbox_commands.despawn();
            }
        }
        if let Ok(mut target_commands) = commands.get_entity(hit.target) {
            target_commands.despawn();
        }

        crate::log(&format!("💀 {:?} killed by {:?}", hit.target, hit.owner));
    }
}
