//! Animation signals (ECS → хост)
//!
//! Хост (animation graph) читает `AnimationSignal` события и выставляет
//! triggers/bools. Сигнал пишется только агентам с `Animator` — без него эффект
//! просто пропускается.

use bevy::prelude::*;

/// Маркер: у агента есть animation graph на стороне хоста
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Animator;

/// Именованные triggers и параметры animation graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimSignal {
    /// Trigger "isWalk"
    Walk,
    /// Trigger "isAttack"
    Attack,
    /// Trigger "isDamage"
    Damage,
    /// Trigger "isDeath"
    Death,
    /// Bool параметр "isWalk" (player)
    IsWalk(bool),
}

impl AnimSignal {
    /// Имя параметра в animation graph
    pub fn parameter(&self) -> &'static str {
        match self {
            AnimSignal::Walk | AnimSignal::IsWalk(_) => "isWalk",
            AnimSignal::Attack => "isAttack",
            AnimSignal::Damage => "isDamage",
            AnimSignal::Death => "isDeath",
        }
    }
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationSignal {
    pub entity: Entity,
    pub signal: AnimSignal,
}

/// Helper: отправить сигнал, если у агента есть Animator
pub fn emit_signal(
    writer: &mut EventWriter<AnimationSignal>,
    animator: Option<&Animator>,
    entity: Entity,
    signal: AnimSignal,
) {
    if animator.is_some() {
        writer.write(AnimationSignal { entity, signal });
    }
}
