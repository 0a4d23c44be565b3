//! Player components: config, input intent, controller state

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{non_negative, ordered, ConfigError};
use crate::movement::MovementModel;

/// Статический конфиг игрока
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    pub min_position: f32,
    pub max_position: f32,
    /// Длительность окна атаки (hitbox активен)
    pub attack_duration: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            min_position: -1.0,
            max_position: 0.5,
            attack_duration: 1.0,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("speed", self.speed)?;
        ordered("position", self.min_position, self.max_position)?;
        non_negative("attack_duration", self.attack_duration)?;
        Ok(())
    }

    pub fn movement_model(&self) -> MovementModel {
        MovementModel::new(self.speed, self.min_position, self.max_position)
    }
}

/// Input intent от хоста (пишется каждый кадр)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    /// x — горизонталь, y — глубина (Z)
    pub axes: Vec2,
    /// Кнопка атаки зажата
    pub attack_held: bool,
}

/// Результат нажатия кнопки атаки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPress {
    /// Нет rising edge или нет hitbox
    Ignored,
    /// Новое окно атаки (hitbox on)
    Started,
    /// Нажатие внутри открытого окна: только trigger анимации
    InWindow,
}

/// Маркер: контроллер отключен (нет PhysicsBody)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ControllerDisabled;

/// Состояние контроллера игрока
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(PlayerInput, Transform, crate::components::Facing)]
pub struct PlayerController {
    pub model: MovementModel,
    pub attack_duration: f32,
    /// Позиция на прошлом fixed шаге
    pub last_position: Vec3,
    pub can_move_y: bool,
    /// Кнопка атаки в прошлом кадре (для rising edge)
    pub attack_was_held: bool,
    /// Deadline окна атаки
    pub attack_ends_at: Option<f32>,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(&PlayerConfig::default(), Vec3::ZERO)
    }
}

impl PlayerController {
    pub fn new(config: &PlayerConfig, position: Vec3) -> Self {
        Self {
            model: config.movement_model(),
            attack_duration: config.attack_duration,
            last_position: position,
            can_move_y: false,
            attack_was_held: false,
            attack_ends_at: None,
        }
    }

    /// Один fixed шаг: velocity для PhysicsBody.
    ///
    /// Без движения по Z позиция клампится по Z сразу (idle коррекция),
    /// затем `last_position` = текущая позиция.
    pub fn fixed_step(&mut self, input: Vec2, translation: &mut Vec3, dt: f32) -> Vec3 {
        let current = *translation;
        self.can_move_y = MovementModel::can_move_y(current, self.last_position);

        let velocity = self
            .model
            .velocity(input, current, self.last_position, self.can_move_y, dt);

        if !self.can_move_y {
            *translation = self.model.clamp_idle(current);
        }
        self.last_position = *translation;

        velocity
    }

    /// Обработать кнопку атаки.
    ///
    /// Срабатывает только на rising edge и только при наличии hitbox.
    /// Нажатие внутри открытого окна не трогает hitbox и deadline:
    /// уже задетые цели повторно не бьются, окно закрывается по первому нажатию.
    pub fn press_attack(&mut self, held: bool, now: f32, has_hitbox: bool) -> AttackPress {
        let rising = held && !self.attack_was_held;
        self.attack_was_held = held;

        if !rising || !has_hitbox {
            return AttackPress::Ignored;
        }
        if self.attack_ends_at.is_some() {
            return AttackPress::InWindow;
        }

        self.attack_ends_at = Some(now + self.attack_duration);
        AttackPress::Started
    }

    /// Закрыть окно атаки, если deadline прошёл
    pub fn finish_attack_if_due(&mut self, now: f32) -> bool {
        match self.attack_ends_at {
            Some(ends_at) if now >= ends_at => {
                self.attack_ends_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 0.02;

    #[test]
    fn test_default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.speed, 5.0);
        assert_eq!(config.min_position, -1.0);
        assert_eq!(config.max_position, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = PlayerConfig {
            min_position: 1.0,
            max_position: -1.0,
            ..default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedBounds {
                field: "position",
                min: 1.0,
                max: -1.0,
            })
        );
    }

    #[test]
    fn test_idle_step_clamps_depth() {
        let start = Vec3::new(2.0, 0.0, 3.0);
        let mut controller = PlayerController::new(&PlayerConfig::default(), start);
        let mut translation = start;

        let velocity = controller.fixed_step(Vec2::ZERO, &mut translation, DT);

        assert!(!controller.can_move_y);
        assert_eq!(translation, Vec3::new(2.0, 0.0, 0.5));
        assert_eq!(controller.last_position, translation);
        // Velocity посчитан от позиции до коррекции
        assert_relative_eq!(velocity.z, (0.5 - 3.0) / DT, epsilon = 1e-3);
    }

    #[test]
    fn test_horizontal_velocity() {
        let mut controller = PlayerController::default();
        let mut translation = Vec3::ZERO;

        let velocity = controller.fixed_step(Vec2::new(-1.0, 0.0), &mut translation, DT);
        assert_eq!(velocity.x, -5.0);
        assert_eq!(velocity.y, 0.0);
        assert_eq!(velocity.z, 0.0);
    }

    #[test]
    fn test_depth_change_enables_y() {
        let mut controller = PlayerController::default();
        let mut translation = Vec3::ZERO;
        controller.fixed_step(Vec2::ZERO, &mut translation, DT);

        // Интегратор сдвинул Z между шагами
        translation.z = -0.25;
        controller.fixed_step(Vec2::ZERO, &mut translation, DT);
        assert!(controller.can_move_y);
        assert_eq!(translation.z, -0.25);
    }

    #[test]
    fn test_attack_rising_edge() {
        let mut controller = PlayerController::default();

        assert_eq!(controller.press_attack(true, 0.0, true), AttackPress::Started);
        assert_eq!(controller.attack_ends_at, Some(1.0));

        // Удержание — не новое нажатие
        assert_eq!(controller.press_attack(true, 0.25, true), AttackPress::Ignored);
        assert_eq!(controller.press_attack(false, 0.375, true), AttackPress::Ignored);

        // Нажатие внутри окна deadline не сдвигает
        assert_eq!(controller.press_attack(true, 0.5, true), AttackPress::InWindow);
        assert_eq!(controller.attack_ends_at, Some(1.0));

        // После закрытия окна — новая атака
        assert!(controller.finish_attack_if_due(1.0));
        controller.press_attack(false, 1.125, true);
        assert_eq!(controller.press_attack(true, 1.25, true), AttackPress::Started);
        assert_eq!(controller.attack_ends_at, Some(2.25));
    }

    #[test]
    fn test_attack_without_hitbox_ignored() {
        let mut controller = PlayerController::default();
        assert_eq!(controller.press_attack(true, 0.0, false), AttackPress::Ignored);
        assert_eq!(controller.attack_ends_at, None);
    }

    #[test]
    fn test_finish_attack() {
        let mut controller = PlayerController::default();
        controller.press_attack(true, 0.0, true);

        assert!(!controller.finish_attack_if_due(0.99));
        assert!(controller.finish_attack_if_due(1.0));
        assert!(!controller.finish_attack_if_due(1.5));
    }

    #[test]
    fn test_config_from_ron() {
        let config = PlayerConfig {
            speed: 3.5,
            ..default()
        };
        let text = ron::to_string(&config).unwrap();
        assert_eq!(ron::from_str::<PlayerConfig>(&text).unwrap(), config);

        // Пропущенные поля берутся из Default
        let partial: PlayerConfig = ron::from_str("(attack_duration: 0.25)").unwrap();
        assert_eq!(
            partial,
            PlayerConfig {
                attack_duration: 0.25,
                ..default()
            }
        );
    }
}
