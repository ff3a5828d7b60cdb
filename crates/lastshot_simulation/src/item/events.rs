//! События item lifecycle
//!
//! Overlap/equip/drop intents приходят от host/input, attach/detach/
//! throw события уходят host-у для физики и skeletal attachment.

use bevy::prelude::*;

/// Overlap персонажа с pickup sphere предмета (host-delivered)
#[derive(Event, Debug, Clone, Copy)]
pub struct PickupOverlap {
    pub player: Entity,
    pub item: Entity,

    /// true = begin, false = end
    pub began: bool,
}

/// Намерение экипировать текущий pickup-кандидат
#[derive(Event, Debug, Clone, Copy)]
pub struct EquipRequest {
    pub player: Entity,
}

/// Намерение выбросить экипированное оружие
#[derive(Event, Debug, Clone, Copy)]
pub struct DropRequest {
    pub player: Entity,
}

/// Предмет прикреплён к socket персонажа (host выполняет attachment)
#[derive(Event, Debug, Clone)]
pub struct ItemAttached {
    pub item: Entity,
    pub player: Entity,

    /// Имя socket на player mesh
    pub socket: String,
}

/// Предмет откреплён от персонажа
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemDetached {
    pub item: Entity,
    pub player: Entity,
}

/// Бросок: host применяет impulse к mesh предмета
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemThrown {
    pub item: Entity,

    /// Направление × сила броска
    pub impulse: Vec3,
}
