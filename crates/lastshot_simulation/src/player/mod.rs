//! Player — equip слот, pickup кандидат, default weapon spawn

use bevy::prelude::*;

pub mod player;

pub use player::{spawn_player, DefaultWeapon, EquipCandidate, EquippedWeapon};

/// Player plugin: стартовая выдача default weapon (если настроена)
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, player::spawn_default_weapon);
    }
}
