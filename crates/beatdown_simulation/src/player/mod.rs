//! Player controller module
//!
//! - FixedUpdate: controller step (velocity → PhysicsBody) → integrate_velocity
//! - Update: facing, "isWalk", атака по rising edge кнопки

use bevy::prelude::*;

pub mod controller;
pub mod systems;

pub use controller::{AttackPress, ControllerDisabled, PlayerConfig, PlayerController, PlayerInput};
pub use systems::*;

use crate::animation::AnimationSignal;
use crate::physics::integrate_velocity;
use crate::FrameSet;

/// Player Plugin
///
/// Порядок выполнения (Update, FrameSet::Player):
/// 1. verify_player_bodies — без PhysicsBody контроллер отключается
/// 2. finish_player_attacks — закрытие окна атаки
/// 3. player_frame_update — facing, анимация, новое нажатие атаки
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationSignal>();

        app.add_systems(
            FixedUpdate,
            (player_fixed_step, integrate_velocity).chain(),
        );

        app.add_systems(
            Update,
            (verify_player_bodies, finish_player_attacks, player_frame_update)
                .chain()
                .in_set(FrameSet::Player),
        );
    }
}
