//! Базовые компоненты агентов: Health, Hurtbox, Destructible

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Здоровье агента (враг, ящик)
///
/// Инвариант: 0 ≤ current ≤ max. Урон насыщается на нуле,
/// поэтому повторные попадания по "мёртвому" не уводят в минус.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Применить урон. Возвращает true если этот удар убил агента.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.current = self.current.saturating_sub(amount);
        was_alive && !self.is_alive()
    }
}

/// Hurtbox — сфера, по которой попадают активные AttackHitbox ("Attack" trigger)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    pub radius: f32,
}

impl Default for Hurtbox {
    fn default() -> Self {
        Self { radius: 0.25 }
    }
}

/// Разрушаемый объект (ящик)
///
/// Просто счётчик попаданий: без FSM, без анимаций.
/// Required Components добавляют Health + Hurtbox.
#[derive(Component, Debug, Clone, Copy, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[require(Health, Hurtbox)]
pub struct Destructible;
