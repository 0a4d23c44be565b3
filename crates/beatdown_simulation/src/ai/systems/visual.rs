//! Visual root binding.

use bevy::prelude::*;

use crate::ai::EnemyBrain;
use crate::components::{SpriteVisual, VisualRoot};

/// Система: привязать VisualRoot врагам, у которых он не задан при спавне
///
/// Берём первый SpriteVisual этого владельца. После привязки враг выпадает
/// из query, поиск больше не повторяется.
pub fn bind_visual_roots(
    mut commands: Commands,
    unbound: Query<Entity, (With<EnemyBrain>, Without<VisualRoot>)>,
    sprites: Query<(Entity, &SpriteVisual)>,
) {
    for agent in unbound.iter() {
        let Some((sprite, _)) = sprites.iter().find(|(_, visual)| visual.owner == agent) else {
            continue;
        };

        commands.entity(agent).insert(VisualRoot(sprite));
        crate::log(&format!("AI: {:?} bound visual root {:?}", agent, sprite));
    }
}
