//! Hitbox система для combat
//!
//! Архитектура:
//! - AttackHitbox — отдельная entity (tag "Attack"), владелец держит AttackHitboxLink
//! - Активен только во время окна атаки (toggle, не spawn/despawn)
//! - Позиция = позиция владельца + offset (X зеркалится по Facing)
//! - Trigger-enter семантика: один HitboxEntered на цель за одну активацию

use bevy::prelude::*;

use crate::components::{Facing, Hurtbox};

/// Hitbox атаки
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AttackHitbox {
    /// Кто атакует (по себе не попадаем)
    pub owner: Entity,
    /// Радиус сферы hitbox
    pub radius: f32,
    /// Offset от владельца для Facing::Right
    pub offset: Vec3,
    pub active: bool,
    /// Цели, уже задетые в текущей активации
    pub touched: Vec<Entity>,
}

impl AttackHitbox {
    pub fn new(owner: Entity, radius: f32, offset: Vec3) -> Self {
        Self {
            owner,
            radius,
            offset,
            active: false,
            touched: Vec::new(),
        }
    }

    /// Включить; новая активация снова может задеть те же цели
    pub fn activate(&mut self) {
        self.active = true;
        self.touched.clear();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Центр hitbox в мире
    pub fn world_center(&self, owner_position: Vec3, facing: Facing) -> Vec3 {
        owner_position + Vec3::new(self.offset.x * facing.sign(), self.offset.y, self.offset.z)
    }

    /// Trigger enter: true только при первом касании цели за активацию
    pub fn enter(&mut self, target: Entity) -> bool {
        if self.touched.contains(&target) {
            return false;
        }
        self.touched.push(target);
        true
    }
}

/// Ссылка владельца на свой hitbox (опционально: без неё атака идёт без hitbox)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct AttackHitboxLink(pub Entity);

/// Событие: активный hitbox вошёл в hurtbox цели
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HitboxEntered {
    pub hitbox: Entity,
    pub owner: Entity,
    pub target: Entity,
}

/// Helper: включить/выключить hitbox по ссылке владельца
///
/// Нет ссылки или hitbox уже despawned → эффект пропускается.
pub fn set_hitbox_active(
    hitboxes: &mut Query<&mut AttackHitbox>,
    link: Option<&AttackHitboxLink>,
    active: bool,
) {
    let Some(link) = link else {
        return;
    };
    let Ok(mut hitbox) = hitboxes.get_mut(link.0) else {
        return;
    };

    if active {
        hitbox.activate();
    } else {
        hitbox.deactivate();
    }
}

/// Система: detect hitbox overlaps
///
/// Для каждого активного hitbox проверяет сферы hurtbox'ов (кроме владельца)
/// и пишет HitboxEntered при первом касании.
pub fn detect_hitbox_overlaps(
    mut hitboxes: Query<(Entity, &mut AttackHitbox)>,
    owners: Query<(&Transform, Option<&Facing>)>,
    hurtboxes: Query<(Entity, &Transform, &Hurtbox)>,
    mut entered: EventWriter<HitboxEntered>,
) {
    for (hitbox_entity, mut hitbox) in hitboxes.iter_mut() {
        if !hitbox.active {
            continue;
        }

        let Ok((owner_transform, owner_facing)) = owners.get(hitbox.owner) else {
            continue;
        };
        let facing = owner_facing.copied().unwrap_or_default();
        let center = hitbox.world_center(owner_transform.translation, facing);

        for (target, target_transform, hurtbox) in hurtboxes.iter() {
            // Не бьем самого себя
            if target == hitbox.owner {
                continue;
            }

            let distance = center.distance(target_transform.translation);
            if distance <= hitbox.radius + hurtbox.radius && hitbox.enter(target) {
                entered.write(HitboxEntered {
                    hitbox: hitbox_entity,
                    owner: hitbox.owner,
                    target,
                });
            }
        }
    }
}
