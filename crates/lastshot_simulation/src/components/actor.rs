//! Player marker и kinematic sample персонажа

use bevy::prelude::*;

use crate::components::attachment::{MuzzleSocket, WeaponSocket};
use crate::input::{MoveInput, ViewInput};
use crate::player::{EquipCandidate, EquippedWeapon};
use crate::weapon_handling::{CrosshairSpread, WeaponEffects, WeaponHandling};

/// Скорость ходьбы (walk toggle), units/sec
pub const WALK_SPEED: f32 = 300.0;

/// Скорость бега (run toggle), units/sec
pub const RUN_SPEED: f32 = 900.0;

/// Marker component для player-controlled entity
///
/// Автоматически добавляет весь player state через Required Components:
/// кинематику, weapon handling, input аккумуляторы, sockets, equip слот.
///
/// # Single-player
/// В single-player режиме обычно только один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    CharacterKinematics,
    WeaponHandling,
    WeaponEffects,
    CrosshairSpread,
    EquippedWeapon,
    EquipCandidate,
    WeaponSocket,
    MuzzleSocket,
    MoveInput,
    ViewInput,
    Transform
)]
pub struct Player;

/// Kinematic sample персонажа (host-authoritative)
///
/// Host engine владеет физикой движения; симуляция читает отсюда
/// скорость/airborne для crosshair spread и пишет max_speed при
/// walk/run toggle.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CharacterKinematics {
    /// Текущая velocity (world space)
    pub velocity: Vec3,

    /// Максимальная скорость движения (walk 300 / run 900)
    pub max_speed: f32,

    /// true пока персонаж в воздухе (падение/прыжок)
    pub is_in_air: bool,

    /// Crouch toggle state
    pub is_crouching: bool,
}

impl Default for CharacterKinematics {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            max_speed: 600.0,
            is_in_air: false,
            is_crouching: false,
        }
    }
}

impl CharacterKinematics {
    /// Горизонтальная скорость (вертикальная составляющая отброшена)
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_speed_drops_vertical() {
        let kinematics = CharacterKinematics {
            velocity: Vec3::new(3.0, 100.0, 4.0),
            ..Default::default()
        };
        assert!((kinematics.horizontal_speed() - 5.0).abs() < 1.0e-6);
    }

    #[test]
    fn test_default_grounded() {
        let kinematics = CharacterKinematics::default();
        assert!(!kinematics.is_in_air);
        assert_eq!(kinematics.horizontal_speed(), 0.0);
    }
}
