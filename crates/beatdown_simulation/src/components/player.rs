//! Player tag component
//!
//! Отмечает entity, которую враги ищут при детекции (tag "Player").

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// # Архитектурная заметка
/// - Детекция врагов фильтрует кандидатов через `With<Player>`
/// - Movement системы врагов используют `Without<Player>` для disjoint Transform доступа
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
