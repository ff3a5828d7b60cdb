//! Attachment sockets: именованные attachment points на skeletal mesh
//!
//! Симуляция хранит только имена и host-обновляемые transforms — сами
//! skeletal meshes и attachment живут на стороне engine.

use bevy::prelude::*;

/// Weapon-slot socket на mesh персонажа
///
/// Host резолвит имя в реальный socket при обработке `ItemAttached`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WeaponSocket {
    /// Имя socket на player mesh (например "Hand_R_Weapon_Socket")
    pub name: String,
}

impl Default for WeaponSocket {
    fn default() -> Self {
        Self {
            name: "Hand_R_Weapon_Socket".into(),
        }
    }
}

/// Barrel socket экипированного оружия
///
/// Host пишет сюда world-space позицию дула каждый кадр; симуляция
/// использует её как старт weapon trace и точку muzzle flash.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct MuzzleSocket {
    /// Имя socket на weapon mesh
    pub name: String,

    /// World-space позиция дула (host-обновляемая)
    pub location: Vec3,
}

impl Default for MuzzleSocket {
    fn default() -> Self {
        Self {
            name: "SMG_Barrel".into(),
            location: Vec3::ZERO,
        }
    }
}
