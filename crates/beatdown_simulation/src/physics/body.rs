//! Kinematic тело агента
//!
//! Контроллер пишет velocity в FixedUpdate, затем `integrate_velocity`
//! сдвигает Transform (headless замена rigidbody шага хоста).

use bevy::prelude::*;

/// Физическое тело (обязательно для PlayerController)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    /// Текущая скорость (units/sec), пересчитывается каждый fixed шаг
    pub velocity: Vec3,
}

/// Система интеграции velocity → Transform
///
/// Работает в FixedUpdate после контроллеров.
pub fn integrate_velocity(
    mut query: Query<(&PhysicsBody, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (body, mut transform) in query.iter_mut() {
        transform.translation += body.velocity * delta;
    }
}
