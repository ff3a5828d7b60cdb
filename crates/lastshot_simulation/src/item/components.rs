//! Item lifecycle компоненты
//!
//! # Архитектура
//!
//! Capability composition вместо наследования: `Item` несёт placement
//! state и rarity, `Weapon` добавляется на ту же entity как отдельная
//! capability. `CollisionProfile` — plain data зеркало engine collision
//! toggles: симуляция решает ЧТО включено, host применяет это к своим
//! physics bodies.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::weapon_handling::ArmedState;

/// Длительность полёта после броска, сек
pub const THROW_TIME: f32 = 4.0;

/// Placement state предмета (ровно одно значение активно)
///
/// `Equipping` — transient host-анимируемый пролёт к руке, collision
/// profile не меняется.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize,
)]
pub enum ItemState {
    /// Лежит в мире, ждёт pickup
    #[default]
    InWorld,
    /// Летит к руке (host animation)
    Equipping,
    /// В инвентаре
    Stored,
    /// В руках
    Equipped,
    /// Брошен, летит по физике
    Falling,
}

/// Rarity предмета → количество звёзд в pickup prompt
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize,
)]
pub enum ItemRarity {
    Damaged,
    #[default]
    Common,
    Rare,
    Legendary,
    Mythic,
}

impl ItemRarity {
    /// Звёзды для UI (1..=5)
    pub fn stars(self) -> u8 {
        match self {
            ItemRarity::Damaged => 1,
            ItemRarity::Common => 2,
            ItemRarity::Rare => 3,
            ItemRarity::Legendary => 4,
            ItemRarity::Mythic => 5,
        }
    }
}

/// Предмет в мире
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(CollisionProfile, Transform)]
pub struct Item {
    /// Отображаемое имя (pickup prompt)
    pub name: String,

    pub rarity: ItemRarity,

    pub state: ItemState,

    /// Pickup prompt виден (host читает)
    pub prompt_visible: bool,

    /// Длительность полёта после броска, сек
    pub throw_time: f32,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            name: "Default".into(),
            rarity: ItemRarity::Common,
            state: ItemState::InWorld,
            prompt_visible: false,
            throw_time: THROW_TIME,
        }
    }
}

impl Item {
    pub fn new(name: impl Into<String>, rarity: ItemRarity) -> Self {
        Self {
            name: name.into(),
            rarity,
            ..Default::default()
        }
    }
}

/// Weapon capability (composable поверх `Item`)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    pub kind: WeaponKind,
}

/// Категория оружия
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize,
)]
pub enum WeaponKind {
    Pistol,
    #[default]
    Rifle,
    Shotgun,
}

impl WeaponKind {
    /// Armed state персонажа с этим оружием в руках
    pub fn armed_state(self) -> ArmedState {
        match self {
            WeaponKind::Pistol => ArmedState::Pistol,
            WeaponKind::Rifle => ArmedState::Rifle,
            WeaponKind::Shotgun => ArmedState::Shotgun,
        }
    }
}

/// Countdown полёта брошенного предмета
///
/// Живёт только пока предмет в `Falling`; despawn предмета уносит
/// таймер с собой, отдельной отмены не нужно.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct FallingItem {
    /// Осталось до приземления, сек
    pub remaining: f32,
}

/// Plain data зеркало engine collision/physics toggles
///
/// Три volume предмета: mesh (рендер + физика), proximity sphere
/// (overlap с игроком), interaction box (visibility traces для
/// prompt-а). Host применяет профиль после каждой смены state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct CollisionProfile {
    /// Mesh симулирует физику
    pub mesh_physics: bool,

    /// Гравитация на mesh
    pub mesh_gravity: bool,

    /// Mesh блокирует только static world geometry
    pub mesh_blocks_world: bool,

    /// Proximity sphere генерирует overlap события
    pub sphere_overlap: bool,

    /// Interaction box блокирует visibility traces
    pub box_blocks_visibility: bool,
}

impl Default for CollisionProfile {
    // Предметы спавнятся в InWorld
    fn default() -> Self {
        Self::in_world()
    }
}

impl CollisionProfile {
    /// Лежит в мире: только overlap sphere + visibility box
    pub fn in_world() -> Self {
        Self {
            mesh_physics: false,
            mesh_gravity: false,
            mesh_blocks_world: false,
            sphere_overlap: true,
            box_blocks_visibility: true,
        }
    }

    /// В руках / в инвентаре: всё выключено
    pub fn equipped() -> Self {
        Self {
            mesh_physics: false,
            mesh_gravity: false,
            mesh_blocks_world: false,
            sphere_overlap: false,
            box_blocks_visibility: false,
        }
    }

    /// Летит после броска: физика на mesh, volumes выключены
    pub fn falling() -> Self {
        Self {
            mesh_physics: true,
            mesh_gravity: true,
            mesh_blocks_world: true,
            sphere_overlap: false,
            box_blocks_visibility: false,
        }
    }

    /// Профиль для state; `None` → профиль не меняется (Equipping)
    pub fn for_state(state: ItemState) -> Option<Self> {
        match state {
            ItemState::InWorld => Some(Self::in_world()),
            ItemState::Equipped | ItemState::Stored => Some(Self::equipped()),
            ItemState::Falling => Some(Self::falling()),
            ItemState::Equipping => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_stars_span_one_to_five() {
        assert_eq!(ItemRarity::Damaged.stars(), 1);
        assert_eq!(ItemRarity::Common.stars(), 2);
        assert_eq!(ItemRarity::Rare.stars(), 3);
        assert_eq!(ItemRarity::Legendary.stars(), 4);
        assert_eq!(ItemRarity::Mythic.stars(), 5);
    }

    #[test]
    fn test_item_spawns_in_world() {
        let item = Item::new("SMG", ItemRarity::Rare);
        assert_eq!(item.state, ItemState::InWorld);
        assert!(!item.prompt_visible);
        assert_eq!(item.throw_time, THROW_TIME);
    }

    #[test]
    fn test_collision_profile_per_state() {
        let in_world = CollisionProfile::for_state(ItemState::InWorld);
        assert_eq!(in_world, Some(CollisionProfile::in_world()));
        assert!(in_world.is_some_and(|p| p.sphere_overlap && !p.mesh_physics));

        // Equipped и Stored делят один профиль
        assert_eq!(
            CollisionProfile::for_state(ItemState::Equipped),
            CollisionProfile::for_state(ItemState::Stored),
        );

        let falling = CollisionProfile::for_state(ItemState::Falling);
        assert!(falling.is_some_and(|p| p.mesh_physics && p.mesh_gravity && !p.sphere_overlap));

        // Transient state профиль не трогает
        assert_eq!(CollisionProfile::for_state(ItemState::Equipping), None);
    }

    #[test]
    fn test_weapon_kind_maps_to_armed_state() {
        assert_eq!(WeaponKind::Pistol.armed_state(), ArmedState::Pistol);
        assert_eq!(WeaponKind::Rifle.armed_state(), ArmedState::Rifle);
        assert_eq!(WeaponKind::Shotgun.armed_state(), ArmedState::Shotgun);
    }

}
