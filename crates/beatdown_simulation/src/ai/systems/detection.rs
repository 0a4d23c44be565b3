//! Detection tick: sphere query по игрокам → переходы FSM → запуск атаки.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{EnemyBrain, EnemyConfig};
use crate::animation::{emit_signal, AnimSignal, AnimationSignal, Animator};
use crate::combat::{set_hitbox_active, AttackHitbox, AttackHitboxLink};
use crate::components::Player;
use crate::DeterministicRng;

/// Sphere overlap: первый кандидат в радиусе (включительно).
///
/// Порядок кандидатов = порядок итерации query (implementation-defined),
/// поэтому при нескольких игроках в радиусе берём первого, не ближайшего.
pub fn first_within(
    origin: Vec3,
    radius: f32,
    candidates: impl IntoIterator<Item = (Entity, Vec3)>,
) -> Option<(Entity, Vec3)> {
    candidates
        .into_iter()
        .find(|(_, position)| origin.distance(*position) <= radius)
}

/// Desync задержка в [min, max); при min == max — ровно min
pub fn desync_delay(rng: &mut impl Rng, config: &EnemyConfig) -> f32 {
    if config.initial_delay_max > config.initial_delay_min {
        rng.gen_range(config.initial_delay_min..config.initial_delay_max)
    } else {
        config.initial_delay_min
    }
}

/// Система: detection tick врагов
///
/// 1. Новым врагам планирует первую детекцию (desync через DeterministicRng)
/// 2. Ищет игрока в vision_radius → Chase / Patrol
/// 3. В Chase + радиус атаки + cooldown → Attack (hitbox on, сигнал "isAttack")
pub fn enemy_detection_tick(
    time: Res<Time>,
    mut rng: ResMut<DeterministicRng>,
    mut enemies: Query<(
        Entity,
        &Transform,
        &EnemyConfig,
        &mut EnemyBrain,
        Option<&AttackHitboxLink>,
        Option<&Animator>,
    )>,
    players: Query<(Entity, &Transform), With<Player>>,
    mut hitboxes: Query<&mut AttackHitbox>,
    mut signals: EventWriter<AnimationSignal>,
) {
    let now = time.elapsed_secs();

    for (entity, transform, config, mut brain, hitbox_link, animator) in enemies.iter_mut() {
        if brain.next_detection_at.is_none() {
            let delay = desync_delay(&mut rng.rng, config);
            brain.schedule_first_detection(now, delay);
            crate::log(&format!("AI: {:?} first detection in {:.2}s", entity, delay));
        }

        if !brain.detection_due(now, config) {
            continue;
        }

        let origin = transform.translation;
        let sighted = first_within(
            origin,
            config.vision_radius,
            players.iter().map(|(player, t)| (player, t.translation)),
        );

        let previous = brain.state();
        brain.observe(sighted.map(|(player, _)| player));
        if brain.state() != previous {
            crate::log(&format!("AI: {:?} {:?} → {:?}", entity, previous, brain.state()));
        }

        let Some((_, target_position)) = sighted else {
            continue;
        };

        if brain.try_start_attack(now, origin.distance(target_position), config) {
            emit_signal(&mut signals, animator, entity, AnimSignal::Attack);
            set_hitbox_active(&mut hitboxes, hitbox_link, true);
            crate::log(&format!("⚔️ AI: {:?} attack until {:.2}", entity, now + config.attack_duration));
        }
    }
}
