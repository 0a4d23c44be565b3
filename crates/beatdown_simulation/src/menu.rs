//! Menu: переключение сцен по build index
//!
//! ECS только считает индекс и просит хост загрузить сцену
//! (SceneLoadRequested). Сама загрузка — на стороне хоста.

use bevy::prelude::*;

/// Текущая сцена (build index хоста)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveScene {
    pub build_index: usize,
}

/// Кнопки меню
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Следующая сцена
    Play,
    /// Предыдущая сцена (не ниже 0)
    Reset,
}

/// Запрос хосту: загрузить сцену
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLoadRequested {
    pub build_index: usize,
}

impl ActiveScene {
    /// Применить действие меню, вернуть новый индекс
    pub fn apply(&mut self, action: MenuAction) -> usize {
        self.build_index = match action {
            MenuAction::Play => self.build_index.saturating_add(1),
            MenuAction::Reset => self.build_index.saturating_sub(1),
        };
        self.build_index
    }
}

/// Система: MenuAction → ActiveScene + SceneLoadRequested
pub fn handle_menu_actions(
    mut actions: EventReader<MenuAction>,
    mut scene: ResMut<ActiveScene>,
    mut requests: EventWriter<SceneLoadRequested>,
) {
    for action in actions.read() {
        let build_index = scene.apply(*action);
        crate::log_info(&format!("Menu: {:?} → scene {}", action, build_index));
        requests.write(SceneLoadRequested { build_index });
    }
}

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveScene>()
            .add_event::<MenuAction>()
            .add_event::<SceneLoadRequested>()
            .add_systems(Update, handle_menu_actions);
    }
}
