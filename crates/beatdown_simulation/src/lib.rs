//! Beatdown Simulation Core
//!
//! Headless ECS-симуляция 2.5D beat'em-up на Bevy 0.16:
//! - Enemy FSM (Patrol / Chase / Attack / Idle) с desync детекцией
//! - Player controller (fixed-step движение, атака по кнопке)
//! - Hitbox triggers, урон, разрушаемые ящики
//!
//! Хост (движок/рендер) пишет `PlayerInput`, читает `AnimationSignal`,
//! `SceneLoadRequested`, `EntityDied` и Transform'ы.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod combat;
pub mod components;
pub mod debug;
pub mod error;
pub mod logger;
pub mod menu;
pub mod movement;
pub mod physics;
pub mod player;
pub mod spawn;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, EnemyBrain, EnemyConfig, EnemyState};
pub use animation::{AnimSignal, AnimationSignal, Animator};
pub use combat::{AttackHitbox, AttackHitboxLink, CombatPlugin, DamageDealt, EntityDied, HitboxEntered};
pub use components::*;
pub use error::ConfigError;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use menu::{ActiveScene, MenuAction, MenuPlugin, SceneLoadRequested};
pub use physics::PhysicsBody;
pub use player::{AttackPress, ControllerDisabled, PlayerConfig, PlayerController, PlayerInput, PlayerPlugin};
pub use spawn::{spawn_crate, spawn_enemy, spawn_player};

/// Seed по умолчанию
pub const DEFAULT_SEED: u64 = 42;

/// Порядок per-frame фаз (Update)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Детекция, переходы FSM, движение врагов
    Ai,
    /// Facing, анимация, атака игрока
    Player,
    /// Hitbox overlaps → урон → смерть
    Combat,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для player controller
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию, если хост не задал свой)
            .init_resource::<DeterministicRng>()
            .configure_sets(Update, (FrameSet::Ai, FrameSet::Player, FrameSet::Combat).chain())
            // Подсистемы
            .add_plugins((AIPlugin, PlayerPlugin, CombatPlugin, MenuPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (реальное время)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Headless App с фиксированным шагом кадра (тесты, replay)
///
/// Первый `update()` имеет delta 0, далее каждый кадр = `frame`.
pub fn create_stepped_app(seed: u64, frame: Duration) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(frame));
    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
