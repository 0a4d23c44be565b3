//! AI movement systems (per-frame, независимо от detection tick).

use bevy::prelude::*;

use crate::ai::{ChaseStep, EnemyBrain, EnemyConfig, EnemyState, TURN_THRESHOLD};
use crate::animation::{emit_signal, AnimSignal, AnimationSignal, Animator};
use crate::components::{Facing, Player, SpriteVisual, VisualRoot};

/// Transform'ы visual root'ов (disjoint с агентами и игроками)
type VisualTransforms<'w, 's> = Query<
    'w,
    's,
    &'static mut Transform,
    (With<SpriteVisual>, Without<EnemyBrain>, Without<Player>),
>;

/// Система: движение врагов по текущему state
///
/// - Patrol: вдоль `direction` с move_speed, сигнал "isWalk"
/// - Chase: держим min_player_distance с deadzone (см. `EnemyBrain::chase_step`)
/// - Attack / Idle: стоим
pub fn enemy_movement(
    time: Res<Time>,
    mut enemies: Query<
        (
            Entity,
            &mut Transform,
            &EnemyConfig,
            &mut EnemyBrain,
            &mut Facing,
            Option<&VisualRoot>,
            Option<&Animator>,
        ),
        Without<Player>,
    >,
    targets: Query<&Transform, (With<Player>, Without<EnemyBrain>)>,
    mut visuals: VisualTransforms,
    mut signals: EventWriter<AnimationSignal>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, config, mut brain, mut facing, visual_root, animator) in enemies.iter_mut() {
        match brain.state() {
            EnemyState::Patrol => {
                let direction = brain.direction;
                turn(&mut facing, visual_root, &mut visuals, direction.x);
                step(&mut transform, direction, config.move_speed, delta);
                emit_signal(&mut signals, animator, entity, AnimSignal::Walk);
            }

            EnemyState::Chase => {
                // Despawned target = нет цели, просто стоим до следующей детекции
                let Some(target_transform) = brain.target.and_then(|target| targets.get(target).ok()) else {
                    continue;
                };

                let to_target = target_transform.translation - transform.translation;
                match brain.chase_step(to_target, delta, config) {
                    ChaseStep::Approach(direction) | ChaseStep::Retreat(direction) => {
                        turn(&mut facing, visual_root, &mut visuals, direction.x);
                        step(&mut transform, direction, config.move_speed, delta);
                        emit_signal(&mut signals, animator, entity, AnimSignal::Walk);
                    }
                    ChaseStep::Settled => {
                        // TODO: отдельный idle trigger, когда появится в animation graph
                        emit_signal(&mut signals, animator, entity, AnimSignal::Walk);
                    }
                    ChaseStep::Waiting => {}
                }
            }

            EnemyState::Attack | EnemyState::Idle => {}
        }
    }
}

/// Сдвиг на `speed * delta` вдоль нормализованного направления
fn step(transform: &mut Transform, direction: Vec3, speed: f32, delta: f32) {
    transform.translation += direction.normalize_or_zero() * speed * delta;
}

/// Facing по знаку X с порогом; visual root поворачивается, если привязан
fn turn(facing: &mut Facing, visual_root: Option<&VisualRoot>, visuals: &mut VisualTransforms, dir_x: f32) {
    let Some(new_facing) = Facing::from_direction(dir_x, TURN_THRESHOLD) else {
        return;
    };
    *facing = new_facing;

    let Some(root) = visual_root else {
        return;
    };
    if let Ok(mut visual) = visuals.get_mut(root.0) {
        visual.rotation = new_facing.rotation();
    }
}
