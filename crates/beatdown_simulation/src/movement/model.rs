//! MovementModel — чистая функция input + история позиций → velocity
//!
//! 2.5D модель: X — горизонталь, Z — глубина "в экран" с ограничениями
//! [min_position, max_position], Y — высота.
//!
//! Y не управляется input напрямую: Y двигается только вслед за изменением Z
//! с прошлого fixed шага (реакция движка на коллизию/движение по Z).
//! Ratio `dz * range / range` сохранён буквально: при range != 0 он
//! сводится к 1:1 (с точностью до округления), при range == 0 — ratio 0.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Epsilon для сравнения позиций между fixed шагами
pub const POSITION_EPSILON: f32 = f32::EPSILON;

/// Параметры движения (stateless, принадлежит PlayerController)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct MovementModel {
    /// Скорость (units/sec)
    pub speed: f32,
    /// Нижняя граница по Z (и по Y)
    pub min_position: f32,
    /// Верхняя граница по Z (и по Y)
    pub max_position: f32,
}

impl Default for MovementModel {
    fn default() -> Self {
        Self {
            speed: 5.0,
            min_position: -1.0,
            max_position: 0.5,
        }
    }
}

impl MovementModel {
    pub fn new(speed: f32, min_position: f32, max_position: f32) -> Self {
        Self {
            speed,
            min_position,
            max_position,
        }
    }

    /// Изменилась ли Z с прошлого шага (разрешает движение по Y)
    pub fn can_move_y(current: Vec3, last: Vec3) -> bool {
        (current.z - last.z).abs() > POSITION_EPSILON
    }

    /// Velocity для одного fixed шага длиной `dt`
    ///
    /// - X: `input.x * speed`, без ограничений
    /// - Z: `input.y * speed`, но итоговая Z остаётся в [min, max]
    /// - Y: к `target_y` за один шаг
    ///
    /// `dt <= 0` → Y/Z компоненты нулевые (нечего интегрировать).
    pub fn velocity(&self, input: Vec2, current: Vec3, last: Vec3, can_move_y: bool, dt: f32) -> Vec3 {
        let x_velocity = input.x * self.speed;
        if dt <= 0.0 {
            return Vec3::new(x_velocity, 0.0, 0.0);
        }

        let z_velocity = input.y * self.speed;
        let clamped_z = self.clamp(current.z + z_velocity * dt);
        let clamped_y = self.target_y(current, last, can_move_y);

        Vec3::new(
            x_velocity,
            (clamped_y - current.y) / dt,
            (clamped_z - current.z) / dt,
        )
    }

    /// Целевая Y после шага
    pub fn target_y(&self, current: Vec3, last: Vec3, can_move_y: bool) -> f32 {
        if !can_move_y {
            return current.y;
        }

        let delta_z = current.z - last.z;
        let range = self.max_position - self.min_position;
        let ratio = if range.abs() > POSITION_EPSILON {
            delta_z * range / range
        } else {
            0.0
        };

        self.clamp(current.y + ratio)
    }

    /// Idle коррекция: Z в границы, X/Y без изменений
    pub fn clamp_idle(&self, current: Vec3) -> Vec3 {
        Vec3::new(current.x, current.y, self.clamp(current.z))
    }

    fn clamp(&self, value: f32) -> f32 {
        // f32::clamp паникует при min > max — конфиг это запрещает, но не рискуем
        value.max(self.min_position).min(self.max_position)
    }
}
