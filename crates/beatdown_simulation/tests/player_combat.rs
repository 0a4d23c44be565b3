//! Player integration tests
//!
//! Проверяем:
//! - Движение и clamp по Z (FixedUpdate 60Hz)
//! - Facing по горизонтальному input
//! - Атака игрока: 3 нажатия → ящик (health 3) уничтожен ровно один раз
//! - Нажатие внутри открытого окна атаки повторно не бьёт
//! - Без PhysicsBody контроллер отключается
//! - Menu → SceneLoadRequested

use std::time::Duration;

use bevy::prelude::*;
use beatdown_simulation::*;

const FRAME: Duration = Duration::from_millis(20);

/// Счётчик смертей (через EntityDied)
#[derive(Resource, Default)]
struct DeathCount(usize);

fn count_deaths(mut events: EventReader<EntityDied>, mut count: ResMut<DeathCount>) {
    count.0 += events.read().count();
}

fn create_test_app() -> App {
    let mut app = create_stepped_app(DEFAULT_SEED, FRAME);
    app.init_resource::<DeathCount>()
        .add_systems(Update, count_deaths.after(FrameSet::Combat));
    app
}

fn spawn_test_player(app: &mut App, position: Vec3) -> Entity {
    let world = app.world_mut();
    let player = spawn_player(&mut world.commands(), position, PlayerConfig::default()).unwrap();
    world.flush();
    player
}

fn set_input(app: &mut App, player: Entity, axes: Vec2, attack_held: bool) {
    let mut input = app.world_mut().get_mut::<PlayerInput>(player).unwrap();
    input.axes = axes;
    input.attack_held = attack_held;
}

/// attack_duration = 1s = 50 кадров; ждём чуть дольше
const ATTACK_WINDOW_FRAMES: usize = 55;

/// Нажатие (один кадр), затем отпускание до закрытия окна атаки
fn press_and_wait(app: &mut App, player: Entity) {
    set_input(app, player, Vec2::ZERO, true);
    app.update();
    set_input(app, player, Vec2::ZERO, false);
    for _ in 0..ATTACK_WINDOW_FRAMES {
        app.update();
    }
}

fn spawn_test_crate(app: &mut App, position: Vec3, hits: u32) -> Entity {
    let world = app.world_mut();
    let entity = spawn_crate(&mut world.commands(), position, hits).unwrap();
    world.flush();
    entity
}

fn position(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<Transform>(entity).unwrap().translation
}

#[test]
fn test_player_moves_horizontally_and_turns() {
    let mut app = create_test_app();
    let player = spawn_test_player(&mut app, Vec3::ZERO);

    set_input(&mut app, player, Vec2::new(1.0, 0.0), false);
    for _ in 0..30 {
        app.update();
    }
    let x = position(&app, player).x;
    assert!(x > 1.0, "x = {}", x);
    assert_eq!(*app.world().get::<Facing>(player).unwrap(), Facing::Right);

    set_input(&mut app, player, Vec2::new(-1.0, 0.0), false);
    for _ in 0..30 {
        app.update();
    }
    assert!(position(&app, player).x < x);
    assert_eq!(*app.world().get::<Facing>(player).unwrap(), Facing::Left);

    let rotation = app.world().get::<Transform>(player).unwrap().rotation;
    assert!(rotation.abs_diff_eq(Facing::Left.rotation(), 1e-5));

    // Нулевой input — facing не меняется
    set_input(&mut app, player, Vec2::ZERO, false);
    app.update();
    assert_eq!(*app.world().get::<Facing>(player).unwrap(), Facing::Left);
}

#[test]
fn test_player_depth_stays_in_bounds() {
    let mut app = create_test_app();
    let player = spawn_test_player(&mut app, Vec3::ZERO);

    set_input(&mut app, player, Vec2::new(0.0, 1.0), false);
    for _ in 0..60 {
        app.update();
    }

    let at = position(&app, player);
    assert!(at.z > 0.4, "z = {}", at.z);
    assert!(at.z <= 0.5 + 1e-4, "z = {}", at.z);
    assert!(at.y <= 0.5 + 1e-4, "y = {}", at.y);

    set_input(&mut app, player, Vec2::new(0.0, -1.0), false);
    for _ in 0..60 {
        app.update();
    }

    let at = position(&app, player);
    assert!(at.z >= -1.0 - 1e-4, "z = {}", at.z);
    assert!(at.z < -0.9, "z = {}", at.z);
}

#[test]
fn test_walk_signal_follows_input() {
    let mut app = create_test_app();
    let player = spawn_test_player(&mut app, Vec3::ZERO);

    set_input(&mut app, player, Vec2::new(0.0, 0.5), false);
    app.update();

    let events = app.world().resource::<Events<AnimationSignal>>();
    let mut cursor = events.get_cursor();
    let walking: Vec<_> = cursor
        .read(events)
        .filter(|s| s.entity == player)
        .map(|s| s.signal)
        .collect();
    assert!(walking.contains(&AnimSignal::IsWalk(true)));
}

#[test]
fn test_three_presses_destroy_crate_once() {
    let mut app = create_test_app();
    let player = spawn_test_player(&mut app, Vec3::ZERO);
    let crate_entity = spawn_test_crate(&mut app, Vec3::new(0.6, 0.0, 0.0), 3);

    for press in 1..=2u32 {
        press_and_wait(&mut app, player);

        let health = app.world().get::<Health>(crate_entity).unwrap();
        assert_eq!(health.current, 3 - press);
    }

    // Без нового нажатия урона нет
    app.update();
    assert_eq!(app.world().get::<Health>(crate_entity).unwrap().current, 1);

    set_input(&mut app, player, Vec2::ZERO, true);
    app.update();
    assert!(app.world().get_entity(crate_entity).is_err());

    // Ещё нажатия — смерть не повторяется
    set_input(&mut app, player, Vec2::ZERO, false);
    app.update();
    for _ in 0..3 {
        press_and_wait(&mut app, player);
    }
    assert_eq!(app.world().resource::<DeathCount>().0, 1);
}

#[test]
fn test_press_inside_window_does_not_hit_again() {
    let mut app = create_test_app();
    let player = spawn_test_player(&mut app, Vec3::ZERO);
    let crate_entity = spawn_test_crate(&mut app, Vec3::new(0.6, 0.0, 0.0), 3);
    let link = app.world().get::<AttackHitboxLink>(player).unwrap().0;

    set_input(&mut app, player, Vec2::ZERO, true);
    app.update();
    set_input(&mut app, player, Vec2::ZERO, false);
    app.update();
    assert_eq!(app.world().get::<Health>(crate_entity).unwrap().current, 2);

    // Второе нажатие через 40ms, окно ещё открыто
    set_input(&mut app, player, Vec2::ZERO, true);
    app.update();
    set_input(&mut app, player, Vec2::ZERO, false);
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(app.world().get::<Health>(crate_entity).unwrap().current, 2);

    // Окно закрывается по deadline первого нажатия (t = 1.0)
    for _ in 0..45 {
        app.update();
    }
    assert!(!app.world().get::<AttackHitbox>(link).unwrap().active);

    press_and_wait(&mut app, player);
    assert_eq!(app.world().get::<Health>(crate_entity).unwrap().current, 1);
}

#[test]
fn test_held_button_hits_once() {
    let mut app = create_test_app();
    let player = spawn_test_player(&mut app, Vec3::ZERO);
    let crate_entity = spawn_test_crate(&mut app, Vec3::new(0.6, 0.0, 0.0), 3);

    set_input(&mut app, player, Vec2::ZERO, true);
    for _ in 0..20 {
        app.update();
    }

    assert_eq!(app.world().get::<Health>(crate_entity).unwrap().current, 2);
}

#[test]
fn test_player_hitbox_closes_after_duration() {
    let mut app = create_test_app();
    let player = spawn_test_player(&mut app, Vec3::ZERO);
    let link = app.world().get::<AttackHitboxLink>(player).unwrap().0;

    set_input(&mut app, player, Vec2::ZERO, true);
    app.update();
    assert!(app.world().get::<AttackHitbox>(link).unwrap().active);

    set_input(&mut app, player, Vec2::ZERO, false);
    for _ in 0..ATTACK_WINDOW_FRAMES {
        app.update();
    }
    assert!(!app.world().get::<AttackHitbox>(link).unwrap().active);
}

#[test]
fn test_player_without_body_is_disabled() {
    let mut app = create_test_app();
    let player = app
        .world_mut()
        .spawn((Player, PlayerController::default()))
        .id();

    app.update();
    assert!(app.world().get::<ControllerDisabled>(player).is_some());

    // Input игнорируется
    set_input(&mut app, player, Vec2::new(-1.0, 0.0), false);
    app.update();
    assert_eq!(*app.world().get::<Facing>(player).unwrap(), Facing::Right);
    assert_eq!(position(&app, player), Vec3::ZERO);
}

#[test]
fn test_menu_requests_scene_load() {
    let mut app = create_test_app();

    app.world_mut().send_event(MenuAction::Play);
    app.update();
    assert_eq!(app.world().resource::<ActiveScene>().build_index, 1);

    app.world_mut().send_event(MenuAction::Reset);
    app.world_mut().send_event(MenuAction::Reset);
    app.update();
    assert_eq!(app.world().resource::<ActiveScene>().build_index, 0);

    let events = app.world().resource::<Events<SceneLoadRequested>>();
    let mut cursor = events.get_cursor();
    let requested: Vec<_> = cursor.read(events).map(|r| r.build_index).collect();
    assert_eq!(requested.last(), Some(&0));
}
