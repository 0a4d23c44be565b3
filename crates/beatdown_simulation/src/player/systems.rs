//! Player systems: fixed-step движение + per-frame facing/анимация/атака

use bevy::prelude::*;

use crate::animation::{emit_signal, AnimSignal, AnimationSignal, Animator};
use crate::combat::{set_hitbox_active, AttackHitbox, AttackHitboxLink};
use crate::components::Facing;
use crate::physics::PhysicsBody;
use crate::player::{AttackPress, ControllerDisabled, PlayerController, PlayerInput};

/// Система: контроллер без PhysicsBody отключается (error log один раз)
pub fn verify_player_bodies(
    mut commands: Commands,
    missing: Query<Entity, (With<PlayerController>, Without<PhysicsBody>, Without<ControllerDisabled>)>,
) {
    for entity in missing.iter() {
        crate::log_error(&format!(
            "Player {:?} has no PhysicsBody, controller disabled",
            entity
        ));
        commands.entity(entity).insert(ControllerDisabled);
    }
}

/// Система: fixed шаг контроллера (до integrate_velocity)
pub fn player_fixed_step(
    time: Res<Time<Fixed>>,
    mut players: Query<
        (&PlayerInput, &mut PlayerController, &mut PhysicsBody, &mut Transform),
        Without<ControllerDisabled>,
    >,
) {
    let dt = time.delta_secs();

    for (input, mut controller, mut body, mut transform) in players.iter_mut() {
        body.velocity = controller.fixed_step(input.axes, &mut transform.translation, dt);
    }
}

/// Система: per-frame facing, "isWalk" и нажатие атаки
///
/// Facing: порог 0 (отрицательный X → влево, положительный → вправо, 0 → без изменений).
/// Поворачивается сам Transform игрока.
pub fn player_frame_update(
    time: Res<Time>,
    mut players: Query<
        (
            Entity,
            &PlayerInput,
            &mut PlayerController,
            &mut Facing,
            &mut Transform,
            Option<&AttackHitboxLink>,
            Option<&Animator>,
        ),
        Without<ControllerDisabled>,
    >,
    mut hitboxes: Query<&mut AttackHitbox>,
    mut signals: EventWriter<AnimationSignal>,
) {
    let now = time.elapsed_secs();

    for (entity, input, mut controller, mut facing, mut transform, hitbox_link, animator) in
        players.iter_mut()
    {
        if let Some(new_facing) = Facing::from_direction(input.axes.x, 0.0) {
            *facing = new_facing;
            transform.rotation = new_facing.rotation();
        }

        let walking = input.axes != Vec2::ZERO;
        emit_signal(&mut signals, animator, entity, AnimSignal::IsWalk(walking));

        let has_hitbox = hitbox_link.is_some_and(|link| hitboxes.contains(link.0));
        match controller.press_attack(input.attack_held, now, has_hitbox) {
            AttackPress::Started => {
                set_hitbox_active(&mut hitboxes, hitbox_link, true);
                emit_signal(&mut signals, animator, entity, AnimSignal::Attack);
                crate::log(&format!("⚔️ Player {:?} attack until {:.2}", entity, now + controller.attack_duration));
            }
            AttackPress::InWindow => {
                emit_signal(&mut signals, animator, entity, AnimSignal::Attack);
            }
            AttackPress::Ignored => {}
        }
    }
}

/// Система: закрытие окна атаки игрока (hitbox off)
pub fn finish_player_attacks(
    time: Res<Time>,
    mut players: Query<(&mut PlayerController, Option<&AttackHitboxLink>)>,
    mut hitboxes: Query<&mut AttackHitbox>,
) {
    let now = time.elapsed_secs();

    for (mut controller, hitbox_link) in players.iter_mut() {
        if controller.finish_attack_if_due(now) {
            set_hitbox_active(&mut hitboxes, hitbox_link, false);
        }
    }
}
