//! Equip слот персонажа и стартовое оружие

use bevy::prelude::*;

use crate::components::{Player, WeaponSocket};
use crate::item::{CollisionProfile, Item, ItemRarity, ItemState, Weapon, WeaponKind};
use crate::item::events::ItemAttached;
use crate::logger::log;
use crate::weapon_handling::{WeaponEffects, WeaponHandling};

/// Weak back-reference персонажа на экипированное оружие (0 или 1)
///
/// Drop чистит ссылку, не уничтожая предмет.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct EquippedWeapon {
    pub entity: Option<Entity>,
}

/// Pickup-кандидат персонажа + overlap счётчик
///
/// Счётчик растёт/падает на overlap begin/end от proximity sphere
/// предметов; `> 0` включает per-tick world-item trace.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct EquipCandidate {
    /// Предмет под прицелом (из world-item trace)
    pub entity: Option<Entity>,

    /// Сколько pickup sphere сейчас пересекают персонажа
    pub overlapped_count: u32,
}

impl EquipCandidate {
    /// Включён ли per-tick world-item trace
    pub fn trace_enabled(&self) -> bool {
        self.overlapped_count > 0
    }
}

/// Spawn персонажа; весь player state приходит через Required Components
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((Player, Transform::from_translation(position)))
        .id()
}

/// Конфигурация стартового оружия
#[derive(Resource, Debug, Clone)]
pub struct DefaultWeapon {
    pub name: String,
    pub rarity: ItemRarity,
    pub kind: WeaponKind,
    pub effects: WeaponEffects,
}

impl Default for DefaultWeapon {
    fn default() -> Self {
        Self {
            name: "SMG".into(),
            rarity: ItemRarity::Common,
            kind: WeaponKind::Rifle,
            effects: WeaponEffects::smg(),
        }
    }
}

/// Startup: выдать каждому персонажу стартовое оружие
///
/// Ресурс `DefaultWeapon` отсутствует → персонажи начинают с пустыми
/// руками. Минует обычные equip preconditions: слот заведомо пуст.
pub fn spawn_default_weapon(
    mut commands: Commands,
    config: Option<Res<DefaultWeapon>>,
    mut players: Query<
        (
            Entity,
            &WeaponSocket,
            &mut EquippedWeapon,
            &mut WeaponHandling,
            &mut WeaponEffects,
        ),
        With<Player>,
    >,
    mut attached: EventWriter<ItemAttached>,
) {
    let Some(config) = config else {
        return;
    };

    for (player, socket, mut equipped, mut handling, mut effects) in players.iter_mut() {
        if equipped.entity.is_some() {
            continue;
        }

        let weapon_entity = commands
            .spawn((
                Item {
                    name: config.name.clone(),
                    rarity: config.rarity,
                    state: ItemState::Equipped,
                    ..Default::default()
                },
                Weapon { kind: config.kind },
                CollisionProfile::equipped(),
            ))
            .id();

        equipped.entity = Some(weapon_entity);
        handling.set_armed_state(config.kind.armed_state());
        *effects = config.effects.clone();

        attached.write(ItemAttached {
            item: weapon_entity,
            player,
            socket: socket.name.clone(),
        });

        log(&format!(
            "✅ Entity {player:?} получил стартовое оружие {} ({:?})",
            config.name, config.kind
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equip_candidate_trace_gate() {
        let mut candidate = EquipCandidate::default();
        assert!(!candidate.trace_enabled());

        candidate.overlapped_count += 1;
        assert!(candidate.trace_enabled());

        candidate.overlapped_count = candidate.overlapped_count.saturating_sub(1);
        assert!(!candidate.trace_enabled());
    }

    #[test]
    fn test_default_weapon_preset() {
        let config = DefaultWeapon::default();
        assert_eq!(config.kind, WeaponKind::Rifle);
        assert!(config.effects.fire_sound.is_some());
    }
}
