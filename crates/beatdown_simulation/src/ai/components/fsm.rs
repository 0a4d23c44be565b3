//! FSM AI components (state, brain с таймерами, config).
//!
//! Корутины хоста заменены deadline-таймстампами:
//! - `next_detection_at` — desync задержка перед первой детекцией + интервал
//! - `attack_ends_at` — окно атаки (hitbox активен)
//! - `idle_until` — пауза Idle перед возвратом в Patrol
//!
//! Все методы принимают `now` явно, поэтому FSM тестируется без App.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::Facing;
use crate::error::{non_negative, ordered, ConfigError};

/// Deadzone вокруг min_player_distance (против jitter)
pub const DISTANCE_MARGIN: f32 = 0.05;

/// Пауза Idle перед возвратом в Patrol (секунды)
pub const IDLE_HOLD: f32 = 0.5;

/// Минимальный fallback радиус атаки, когда attack_range не задан
pub const MIN_FALLBACK_ATTACK_RANGE: f32 = 0.1;

/// "Никогда не атаковал" — cooldown уже истёк на старте
pub const NEVER_ATTACKED: f32 = -999.0;

/// Порог поворота visual root врага
pub const TURN_THRESHOLD: f32 = 0.1;

/// Состояния FSM врага. Ровно одно активно; терминального нет
/// (смерть — внешнее событие, entity просто despawn'ится).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum EnemyState {
    /// Движение по `direction`, ищем игрока
    #[default]
    Patrol,
    /// Держим дистанцию до target, атакуем в радиусе
    Chase,
    /// Окно атаки (hitbox активен до `attack_ends_at`)
    Attack,
    /// Короткая пауза, затем Patrol.
    /// Переходы детекции сюда не ведут — только `EnemyBrain::enter_idle`.
    Idle,
}

/// Статические параметры врага (задаются до активации)
#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct EnemyConfig {
    /// Стартовое здоровье
    pub health: u32,
    /// Направление патруля (нормализуется при спавне)
    pub initial_direction: Vec3,
    pub move_speed: f32,
    /// Desync: первая детекция через случайную задержку [min, max)
    pub initial_delay_min: f32,
    pub initial_delay_max: f32,
    /// Интервал между детекциями (0 = каждый кадр)
    pub detection_interval: f32,
    pub vision_radius: f32,
    /// Дистанция, которую враг держит до игрока
    pub min_player_distance: f32,
    /// Сколько секунд вне deadzone, прежде чем двигаться
    pub min_distance_adjust_delay: f32,
    pub attack_duration: f32,
    pub attack_cooldown: f32,
    /// <= 0 → fallback на max(min_player_distance, 0.1)
    pub attack_range: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            health: 3,
            initial_direction: Vec3::X,
            move_speed: 1.0,
            initial_delay_min: 0.0,
            initial_delay_max: 3.0,
            detection_interval: 0.0,
            vision_radius: 2.0,
            min_player_distance: 0.5,
            min_distance_adjust_delay: 0.2,
            attack_duration: 0.5,
            attack_cooldown: 1.0,
            attack_range: 0.5,
        }
    }
}

impl EnemyConfig {
    /// Радиус, в котором Chase запускает атаку
    pub fn effective_attack_range(&self) -> f32 {
        if self.attack_range > 0.0 {
            self.attack_range
        } else {
            self.min_player_distance.max(MIN_FALLBACK_ATTACK_RANGE)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.health == 0 {
            return Err(ConfigError::ZeroHealth);
        }
        non_negative("move_speed", self.move_speed)?;
        non_negative("initial_delay_min", self.initial_delay_min)?;
        non_negative("initial_delay_max", self.initial_delay_max)?;
        ordered("initial_delay", self.initial_delay_min, self.initial_delay_max)?;
        non_negative("detection_interval", self.detection_interval)?;
        non_negative("vision_radius", self.vision_radius)?;
        non_negative("min_player_distance", self.min_player_distance)?;
        non_negative("min_distance_adjust_delay", self.min_distance_adjust_delay)?;
        non_negative("attack_duration", self.attack_duration)?;
        non_negative("attack_cooldown", self.attack_cooldown)?;
        Ok(())
    }
}

/// Решение per-frame движения в Chase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChaseStep {
    /// Далеко, таймер истёк — идём к target (нормализованное направление)
    Approach(Vec3),
    /// Слишком близко, таймер истёк — отступаем
    Retreat(Vec3),
    /// Вне deadzone, но таймер ещё копится
    Waiting,
    /// В deadzone: таймер сброшен, стоим
    Settled,
}

/// Runtime состояние FSM врага
///
/// Required Components: Transform (позиция) + Facing (логический поворот).
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform, Facing)]
pub struct EnemyBrain {
    state: EnemyState,
    /// Текущий target (stable id игрока). Despawned target = "нет цели".
    pub target: Option<Entity>,
    pub last_attack_time: f32,
    /// Накопленное время вне deadzone (сбрасывается при смене state)
    pub distance_adjust_timer: f32,
    /// Направление патруля
    pub direction: Vec3,
    /// Deadline следующей детекции (None — ещё не запланирована)
    pub next_detection_at: Option<f32>,
    /// Deadline конца окна атаки
    pub attack_ends_at: Option<f32>,
    /// Deadline выхода из Idle
    pub idle_until: Option<f32>,
}

impl Default for EnemyBrain {
    fn default() -> Self {
        Self::new(Vec3::X)
    }
}

impl EnemyBrain {
    pub fn new(direction: Vec3) -> Self {
        Self {
            state: EnemyState::Patrol,
            target: None,
            last_attack_time: NEVER_ATTACKED,
            distance_adjust_timer: 0.0,
            direction: direction.normalize_or_zero(),
            next_detection_at: None,
            attack_ends_at: None,
            idle_until: None,
        }
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    /// Сменить state; таймер подстройки дистанции сбрасывается при любой смене
    pub fn set_state(&mut self, state: EnemyState) {
        if self.state != state {
            self.state = state;
            self.distance_adjust_timer = 0.0;
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_ends_at.is_some()
    }

    /// Cooldown истёк: `now >= last_attack_time + attack_cooldown`
    pub fn can_attack(&self, now: f32, config: &EnemyConfig) -> bool {
        now >= self.last_attack_time + config.attack_cooldown
    }

    /// Запланировать первую детекцию (desync задержка уже выбрана)
    pub fn schedule_first_detection(&mut self, now: f32, delay: f32) {
        self.next_detection_at = Some(now + delay.max(0.0));
    }

    /// Пора ли выполнять детекцию в этом кадре.
    ///
    /// Idle держит цикл детекции `IDLE_HOLD` секунд, затем возвращает в Patrol
    /// (сама детекция — со следующего кадра).
    pub fn detection_due(&mut self, now: f32, config: &EnemyConfig) -> bool {
        let Some(at) = self.next_detection_at else {
            return false;
        };
        if now < at {
            return false;
        }

        if self.state == EnemyState::Idle {
            match self.idle_until {
                Some(until) if now < until => return false,
                _ => {
                    self.idle_until = None;
                    self.set_state(EnemyState::Patrol);
                    return false;
                }
            }
        }

        self.next_detection_at = Some(now + config.detection_interval);
        true
    }

    /// Результат детекции: нашли игрока → Chase, нет → Patrol.
    ///
    /// Во время окна атаки обновляется только target, state держит Attack.
    pub fn observe(&mut self, sighted: Option<Entity>) {
        self.target = sighted;
        if self.is_attacking() {
            return;
        }

        let state = if sighted.is_some() {
            EnemyState::Chase
        } else {
            EnemyState::Patrol
        };
        self.set_state(state);
    }

    /// Запустить атаку, если в Chase, target в радиусе и cooldown истёк.
    /// Возвращает true, если атака началась (хост включает hitbox).
    pub fn try_start_attack(&mut self, now: f32, distance: f32, config: &EnemyConfig) -> bool {
        if self.state != EnemyState::Chase || self.target.is_none() {
            return false;
        }
        if distance > config.effective_attack_range() || !self.can_attack(now, config) {
            return false;
        }

        self.set_state(EnemyState::Attack);
        self.last_attack_time = now;
        self.attack_ends_at = Some(now + config.attack_duration);
        true
    }

    /// Завершить окно атаки, если deadline прошёл.
    /// Возвращает true в кадре завершения (хост выключает hitbox).
    pub fn finish_attack_if_due(&mut self, now: f32) -> bool {
        match self.attack_ends_at {
            Some(ends_at) if now >= ends_at => {
                self.attack_ends_at = None;
                let resume = if self.target.is_some() {
                    EnemyState::Chase
                } else {
                    EnemyState::Patrol
                };
                self.set_state(resume);
                true
            }
            _ => false,
        }
    }

    /// Войти в Idle (пауза IDLE_HOLD, затем Patrol)
    ///
    /// Правила детекции в Idle не переводят; это точка входа для хоста/скриптов.
    pub fn enter_idle(&mut self, now: f32) {
        if self.is_attacking() {
            return;
        }
        self.set_state(EnemyState::Idle);
        self.idle_until = Some(now + IDLE_HOLD);
    }

    /// Per-frame решение в Chase по вектору до target
    pub fn chase_step(&mut self, to_target: Vec3, delta: f32, config: &EnemyConfig) -> ChaseStep {
        let distance = to_target.length();
        let direction = to_target.normalize_or_zero();

        if distance > config.min_player_distance + DISTANCE_MARGIN {
            self.distance_adjust_timer += delta;
            if self.distance_adjust_timer >= config.min_distance_adjust_delay {
                ChaseStep::Approach(direction)
            } else {
                ChaseStep::Waiting
            }
        } else if distance < config.min_player_distance - DISTANCE_MARGIN {
            self.distance_adjust_timer += delta;
            if self.distance_adjust_timer >= config.min_distance_adjust_delay {
                ChaseStep::Retreat(-direction)
            } else {
                ChaseStep::Waiting
            }
        } else {
            self.distance_adjust_timer = 0.0;
            ChaseStep::Settled
        }
    }
}
