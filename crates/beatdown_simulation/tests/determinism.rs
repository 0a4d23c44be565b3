//! Тесты детерминизма
//!
//! Проверяем что симуляция с одинаковым seed даёт идентичные результаты
//! (desync задержки врагов берутся из DeterministicRng).

use std::time::Duration;

use bevy::prelude::*;
use beatdown_simulation::*;

const FRAME: Duration = Duration::from_millis(20);

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 300;

    // Первый прогон
    let snapshot1 = run_simulation(SEED, TICK_COUNT);

    // Второй прогон с тем же seed
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    // Снепшоты должны быть идентичны
    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 300;

    // Запускаем 3 раза — все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seeds_desync_differently() {
    let first = first_detection_times(1);
    let second = first_detection_times(2);

    assert_eq!(first.len(), ENEMY_POSITIONS.len());
    assert_ne!(first, second);
}

const ENEMY_POSITIONS: [Vec3; 4] = [
    Vec3::new(-3.0, 0.0, 0.0),
    Vec3::new(3.0, 0.0, -0.5),
    Vec3::new(-1.5, 0.0, 0.25),
    Vec3::new(6.0, 0.0, 0.0),
];

fn spawn_scene(app: &mut App) {
    let world = app.world_mut();
    spawn_player(&mut world.commands(), Vec3::ZERO, PlayerConfig::default()).unwrap();
    for (i, position) in ENEMY_POSITIONS.iter().enumerate() {
        let direction = if i % 2 == 0 { Vec3::X } else { Vec3::NEG_X };
        let config = EnemyConfig {
            initial_direction: direction,
            ..default()
        };
        spawn_enemy(&mut world.commands(), *position, config).unwrap();
    }
    spawn_crate(&mut world.commands(), Vec3::new(0.6, 0.0, 0.0), 3).unwrap();
    world.flush();
}

/// Запускает симуляцию и возвращает snapshot мира
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_stepped_app(seed, FRAME);
    spawn_scene(&mut app);

    for _ in 0..tick_count {
        app.update();
    }

    let mut snapshot = world_snapshot::<EnemyBrain>(app.world_mut());
    snapshot.extend(world_snapshot::<Transform>(app.world_mut()));
    snapshot
}

/// Deadline первой детекции каждого врага (после первого кадра)
fn first_detection_times(seed: u64) -> Vec<Option<f32>> {
    let mut app = create_stepped_app(seed, FRAME);
    spawn_scene(&mut app);
    app.update();

    let mut brains = app.world_mut().query::<(Entity, &EnemyBrain)>();
    let mut deadlines: Vec<_> = brains
        .iter(app.world())
        .map(|(entity, brain)| (entity.index(), brain.next_detection_at))
        .collect();
    deadlines.sort_by_key(|(index, _)| *index);
    deadlines.into_iter().map(|(_, at)| at).collect()
}
