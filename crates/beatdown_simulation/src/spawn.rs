//! Spawn helpers: враг, игрок, ящик
//!
//! Конфиг валидируется до спавна; невалидный конфиг → ConfigError, entity
//! не создаётся.

use bevy::prelude::*;

use crate::ai::{EnemyBrain, EnemyConfig};
use crate::animation::Animator;
use crate::combat::{AttackHitbox, AttackHitboxLink};
use crate::components::{Destructible, Facing, Health, Hurtbox, Player, SpriteVisual, VisualRoot};
use crate::error::ConfigError;
use crate::physics::PhysicsBody;
use crate::player::{PlayerConfig, PlayerController, PlayerInput};

/// Радиус hitbox атаки
pub const HITBOX_RADIUS: f32 = 0.3;

/// Offset hitbox перед агентом (для Facing::Right)
pub const HITBOX_OFFSET: Vec3 = Vec3::new(0.4, 0.0, 0.0);

/// Заспавнить врага: brain + config + health + hurtbox, спрайт (visual root) и hitbox
pub fn spawn_enemy(
    commands: &mut Commands,
    position: Vec3,
    config: EnemyConfig,
) -> Result<Entity, ConfigError> {
    config.validate()?;

    let enemy = commands
        .spawn((
            Transform::from_translation(position),
            EnemyBrain::new(config.initial_direction),
            Health::new(config.health),
            Hurtbox::default(),
            Facing::default(),
            Animator,
            config,
        ))
        .id();

    // Спрайт — child, despawn'ится вместе с врагом
    let sprite = commands
        .spawn((Transform::default(), SpriteVisual { owner: enemy }, ChildOf(enemy)))
        .id();
    let hitbox = spawn_hitbox(commands, enemy);

    commands
        .entity(enemy)
        .insert((VisualRoot(sprite), AttackHitboxLink(hitbox)));

    crate::log(&format!("Spawned enemy {:?} at {:?}", enemy, position));
    Ok(enemy)
}

/// Заспавнить игрока (PhysicsBody обязателен для контроллера)
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec3,
    config: PlayerConfig,
) -> Result<Entity, ConfigError> {
    config.validate()?;

    let player = commands
        .spawn((
            Player,
            Transform::from_translation(position),
            PlayerController::new(&config, position),
            PlayerInput::default(),
            PhysicsBody::default(),
            Facing::default(),
            Animator,
        ))
        .id();

    let hitbox = spawn_hitbox(commands, player);
    commands.entity(player).insert(AttackHitboxLink(hitbox));

    crate::log(&format!("Spawned player {:?} at {:?}", player, position));
    Ok(player)
}

/// Заспавнить разрушаемый ящик
pub fn spawn_crate(commands: &mut Commands, position: Vec3, health: u32) -> Result<Entity, ConfigError> {
    if health == 0 {
        return Err(ConfigError::ZeroHealth);
    }

    let entity = commands
        .spawn((
            Destructible,
            Health::new(health),
            Transform::from_translation(position),
        ))
        .id();

    Ok(entity)
}

fn spawn_hitbox(commands: &mut Commands, owner: Entity) -> Entity {
    commands
        .spawn(AttackHitbox::new(owner, HITBOX_RADIUS, HITBOX_OFFSET))
        .id()
}
