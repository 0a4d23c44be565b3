//! Visual компоненты: facing, visual root, sprite

use bevy::prelude::*;
use std::f32::consts::PI;

/// Куда смотрит агент (бинарно: влево/вправо по оси X)
///
/// Логическое направление хранится на самом агенте; поворот visual root
/// только отображает его.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing по знаку горизонтального направления.
    ///
    /// Строгое неравенство: `|dir_x| <= threshold` → None (без изменений, против jitter).
    pub fn from_direction(dir_x: f32, threshold: f32) -> Option<Self> {
        if dir_x < -threshold {
            Some(Facing::Left)
        } else if dir_x > threshold {
            Some(Facing::Right)
        } else {
            None
        }
    }

    /// Знак по оси X (+1 вправо, -1 влево)
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Yaw вокруг вертикальной оси (радианы)
    pub fn yaw(self) -> f32 {
        match self {
            Facing::Right => 0.0,
            Facing::Left => PI,
        }
    }

    pub fn rotation(self) -> Quat {
        Quat::from_rotation_y(self.yaw())
    }
}

/// Ссылка на visual root (спрайт), который поворачиваем при смене facing
///
/// Поворачиваем visual, а не корень агента, чтобы не трогать его коллайдеры.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct VisualRoot(pub Entity);

/// 2D спрайт агента (отдельная entity, владелец — `owner`)
///
/// Если VisualRoot не задан при спавне, он биндится к первому спрайту владельца.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SpriteVisual {
    pub owner: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.1, None)]
    #[case(-0.1, None)]
    #[case(0.0, None)]
    #[case(0.11, Some(Facing::Right))]
    #[case(-0.11, Some(Facing::Left))]
    #[case(1.0, Some(Facing::Right))]
    fn test_facing_threshold(#[case] dir_x: f32, #[case] expected: Option<Facing>) {
        assert_eq!(Facing::from_direction(dir_x, 0.1), expected);
    }

    #[test]
    fn test_zero_threshold_ignores_only_zero() {
        assert_eq!(Facing::from_direction(0.0, 0.0), None);
        assert_eq!(Facing::from_direction(-0.01, 0.0), Some(Facing::Left));
    }

    #[test]
    fn test_facing_yaw() {
        assert_eq!(Facing::Right.yaw(), 0.0);
        assert_eq!(Facing::Left.yaw(), PI);
        assert_eq!(Facing::Left.sign(), -1.0);
    }
}
