//! Headless демо симуляции
//!
//! Игрок стоит, два врага патрулируют к нему, ящик рядом.
//! Печатает состояние FSM врагов и debug сферы.

use std::time::Duration;

use bevy::prelude::*;
use beatdown_simulation::debug::enemy_debug_spheres;
use beatdown_simulation::{
    create_stepped_app, log_error, spawn_crate, spawn_enemy, spawn_player, AnimSignal, AnimationSignal,
    ConfigError, EnemyBrain, EnemyConfig, EntityDied, PlayerConfig,
};

fn setup(world: &mut World) -> Result<(), ConfigError> {
    spawn_all(&mut world.commands())?;
    world.flush();
    Ok(())
}

fn spawn_all(commands: &mut Commands) -> Result<(), ConfigError> {
    spawn_player(commands, Vec3::ZERO, PlayerConfig::default())?;
    spawn_enemy(
        commands,
        Vec3::new(-3.0, 0.0, 0.0),
        EnemyConfig {
            initial_direction: Vec3::X,
            ..default()
        },
    )?;
    spawn_enemy(
        commands,
        Vec3::new(3.0, 0.0, -0.5),
        EnemyConfig {
            initial_direction: Vec3::NEG_X,
            ..default()
        },
    )?;
    spawn_crate(commands, Vec3::new(0.6, 0.0, 0.0), 3)?;
    Ok(())
}

fn main() {
    let seed = 42;
    println!("Starting beatdown headless simulation (seed: {})", seed);

    let mut app = create_stepped_app(seed, Duration::from_millis(20));
    if let Err(err) = setup(app.world_mut()) {
        log_error(&format!("Invalid spawn config: {}", err));
        return;
    }

    let mut enemies = app.world_mut().query::<(Entity, &Transform, &EnemyConfig)>();
    for (entity, transform, config) in enemies.iter(app.world()) {
        for sphere in enemy_debug_spheres(transform.translation, config) {
            println!(
                "{:?} gizmo {:?} rgb={:?} r={:.2}",
                entity,
                sphere.color,
                sphere.color.rgb(),
                sphere.radius
            );
        }
    }

    // 500 кадров по 20ms = 10 секунд симуляции
    for tick in 0..500 {
        app.update();

        let world = app.world_mut();
        let died: Vec<_> = world
            .resource_mut::<Events<EntityDied>>()
            .drain()
            .collect();
        for event in died {
            println!("Tick {}: {:?} died", tick, event.entity);
        }

        // isWalk летит каждый кадр, печатаем только урон и смерть
        let signals: Vec<_> = world
            .resource_mut::<Events<AnimationSignal>>()
            .drain()
            .filter(|s| matches!(s.signal, AnimSignal::Damage | AnimSignal::Death))
            .collect();
        for event in signals {
            println!("Tick {}: {:?} trigger {}", tick, event.entity, event.signal.parameter());
        }

        if tick % 100 == 0 {
            let mut brains = world.query::<(Entity, &Transform, &EnemyBrain)>();
            for (entity, transform, brain) in brains.iter(world) {
                println!(
                    "Tick {}: {:?} {:?} at {:.2?}",
                    tick,
                    entity,
                    brain.state(),
                    transform.translation
                );
            }
        }
    }

    println!("Simulation complete!");
}
