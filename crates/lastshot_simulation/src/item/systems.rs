//! Item lifecycle системы (FixedUpdate, chained)

use bevy::prelude::*;
use rand::Rng;

use crate::components::WeaponSocket;
use crate::item::components::{CollisionProfile, FallingItem, Item, ItemState, Weapon};
use crate::item::events::{
    DropRequest, EquipRequest, ItemAttached, ItemDetached, ItemThrown, PickupOverlap,
};
use crate::logger::{log, log_warning};
use crate::player::{EquipCandidate, EquippedWeapon};
use crate::weapon_handling::trace::trace_under_crosshair;
use crate::weapon_handling::{ArmedState, CameraView, SceneRaycaster, WeaponHandling};
use crate::DeterministicRng;

/// Наклон impulse direction от right-vector, градусы
const THROW_TILT_DEG: f32 = -20.0;

/// Диапазон случайного azimuth jitter, градусы
const THROW_YAW_MIN_DEG: f32 = -20.0;
const THROW_YAW_MAX_DEG: f32 = 30.0;

/// Множитель силы броска
const THROW_IMPULSE_SCALE: f32 = 1.8;

/// Учёт overlap begin/end от pickup sphere предметов
///
/// N begin + N end возвращают счётчик (и trace gate) в ноль для
/// любого N.
pub fn process_overlap_events(
    mut overlaps: EventReader<PickupOverlap>,
    mut players: Query<&mut EquipCandidate>,
) {
    for overlap in overlaps.read() {
        let Ok(mut candidate) = players.get_mut(overlap.player) else {
            continue;
        };
        if overlap.began {
            candidate.overlapped_count += 1;
        } else {
            candidate.overlapped_count = candidate.overlapped_count.saturating_sub(1);
        }
        if !candidate.trace_enabled() {
            candidate.entity = None;
        }
    }
}

/// World-item trace: pickup prompt для предмета под прицелом
///
/// Работает только пока overlap счётчик > 0; нет камеры → trace
/// пропускается и prompt-ы гаснут.
pub fn update_pickup_prompts(
    camera: Res<CameraView>,
    raycaster: Res<SceneRaycaster>,
    mut players: Query<(Entity, &mut EquipCandidate, &EquippedWeapon)>,
    mut items: Query<(Entity, &mut Item)>,
) {
    let mut targeted: Vec<Entity> = Vec::new();

    for (player, mut candidate, equipped) in players.iter_mut() {
        candidate.entity = None;
        if !candidate.trace_enabled() {
            continue;
        }
        let Some(view) = camera.0 else {
            continue;
        };

        // Оружие в руках не должно заслонять prompt trace (как и в
        // weapon trace)
        let mut ignore = vec![player];
        if let Some(weapon) = equipped.entity {
            ignore.push(weapon);
        }

        let (_, hit) = trace_under_crosshair(raycaster.0.as_ref(), view, &ignore);
        let Some(hit_entity) = hit.and_then(|hit| hit.entity) else {
            continue;
        };
        let Ok((item_entity, item)) = items.get(hit_entity) else {
            continue;
        };
        if item.state == ItemState::InWorld {
            candidate.entity = Some(item_entity);
            targeted.push(item_entity);
        }
    }

    for (entity, mut item) in items.iter_mut() {
        let visible = targeted.contains(&entity);
        if item.prompt_visible != visible {
            item.prompt_visible = visible;
        }
    }
}

/// Обработка equip request-ов
///
/// Precondition: socket ∧ кандидат ∧ пустой слот. Любой провал —
/// тихий no-op со сбросом armed state в Unarmed; кандидат не трогается.
pub fn process_equip_requests(
    mut requests: EventReader<EquipRequest>,
    mut players: Query<(
        Option<&WeaponSocket>,
        &EquipCandidate,
        &mut EquippedWeapon,
        &mut WeaponHandling,
    )>,
    mut items: Query<(&mut Item, &Weapon, &mut CollisionProfile)>,
    mut attached: EventWriter<ItemAttached>,
) {
    for request in requests.read() {
        let Ok((socket, candidate, mut equipped, mut handling)) = players.get_mut(request.player)
        else {
            log_warning(&format!(
                "⚠️ EquipRequest для entity {:?} без player rig",
                request.player
            ));
            continue;
        };

        let Some(socket) = socket else {
            handling.set_armed_state(ArmedState::Unarmed);
            continue;
        };
        if equipped.entity.is_some() {
            handling.set_armed_state(ArmedState::Unarmed);
            continue;
        }
        let Some(item_entity) = candidate.entity else {
            handling.set_armed_state(ArmedState::Unarmed);
            continue;
        };
        let Ok((mut item, weapon, mut profile)) = items.get_mut(item_entity) else {
            handling.set_armed_state(ArmedState::Unarmed);
            continue;
        };

        item.state = ItemState::Equipped;
        item.prompt_visible = false;
        if let Some(new_profile) = CollisionProfile::for_state(item.state) {
            *profile = new_profile;
        }

        equipped.entity = Some(item_entity);
        handling.set_armed_state(weapon.kind.armed_state());

        attached.write(ItemAttached {
            item: item_entity,
            player: request.player,
            socket: socket.name.clone(),
        });

        log(&format!(
            "✅ Entity {:?} экипировал {} ({:?})",
            request.player, item.name, weapon.kind
        ));
    }
}

/// Обработка drop request-ов: бросок экипированного оружия
///
/// Yaw предмета выравнивается (pitch/roll в ноль), impulse — right
/// vector с наклоном −20° вокруг forward и случайным azimuth jitter.
pub fn process_drop_requests(
    mut commands: Commands,
    mut requests: EventReader<DropRequest>,
    mut rng: ResMut<DeterministicRng>,
    mut players: Query<(&mut EquippedWeapon, &mut WeaponHandling)>,
    mut items: Query<(&mut Item, &mut CollisionProfile, &mut Transform)>,
    mut detached: EventWriter<ItemDetached>,
    mut thrown: EventWriter<ItemThrown>,
) {
    for request in requests.read() {
        let Ok((mut equipped, mut handling)) = players.get_mut(request.player) else {
            continue;
        };
        let Some(item_entity) = equipped.entity else {
            continue;
        };
        let Ok((mut item, mut profile, mut transform)) = items.get_mut(item_entity) else {
            // Предмет уже despawn-ут, чистим только ссылку
            equipped.entity = None;
            handling.set_armed_state(ArmedState::Unarmed);
            continue;
        };

        equipped.entity = None;
        handling.set_armed_state(ArmedState::Unarmed);

        // Yaw сохраняем, pitch/roll обнуляем
        let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
        transform.rotation = Quat::from_rotation_y(yaw);

        let forward = transform.rotation * Vec3::NEG_Z;
        let right = transform.rotation * Vec3::X;

        let tilted = Quat::from_axis_angle(forward, THROW_TILT_DEG.to_radians()) * right;
        let jitter_deg = rng
            .rng
            .gen_range(THROW_YAW_MIN_DEG..THROW_YAW_MAX_DEG);
        let impulse = Quat::from_rotation_y(jitter_deg.to_radians()) * tilted * THROW_IMPULSE_SCALE;

        item.state = ItemState::Falling;
        if let Some(new_profile) = CollisionProfile::for_state(item.state) {
            *profile = new_profile;
        }
        commands.entity(item_entity).insert(FallingItem {
            remaining: item.throw_time,
        });

        detached.write(ItemDetached {
            item: item_entity,
            player: request.player,
        });
        thrown.write(ItemThrown {
            item: item_entity,
            impulse,
        });

        log(&format!(
            "🗑️ Entity {:?} выбросил {}, impulse {:?}",
            request.player, item.name, impulse
        ));
    }
}

/// Тик полёта брошенных предметов
///
/// По истечении `throw_time` предмет приземляется в `InWorld`.
pub fn tick_throw_timers(
    mut commands: Commands,
    time: Res<Time>,
    mut falling: Query<(Entity, &mut Item, &mut CollisionProfile, &mut FallingItem)>,
) {
    let delta = time.delta_secs();
    for (entity, mut item, mut profile, mut timer) in falling.iter_mut() {
        timer.remaining -= delta;
        if timer.remaining > 0.0 {
            continue;
        }

        item.state = ItemState::InWorld;
        if let Some(new_profile) = CollisionProfile::for_state(item.state) {
            *profile = new_profile;
        }
        commands.entity(entity).remove::<FallingItem>();

        log(&format!("📦 {} приземлился, снова доступен", item.name));
    }
}
