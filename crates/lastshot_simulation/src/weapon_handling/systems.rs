//! Weapon handling системы (FixedUpdate, chained)

use bevy::prelude::*;

use crate::components::{CharacterKinematics, MuzzleSocket};
use crate::logger::{log, log_warning};
use crate::player::EquippedWeapon;
use crate::weapon_handling::components::{CrosshairSpread, WeaponHandling};
use crate::weapon_handling::events::{
    EffectKind, EndFireIntent, FireWeaponIntent, ImpactPoint, SetAimingIntent, SpawnEffect,
    WeaponEffects, WeaponFired,
};
use crate::weapon_handling::trace::{weapon_trace, CameraView, SceneRaycaster};

/// Тик countdown таймеров (fire gate + spray flag)
///
/// Идёт первым в chain: gate успевает восстановиться до обработки
/// intent-ов текущего тика.
pub fn tick_weapon_timers(time: Res<Time>, mut handlers: Query<&mut WeaponHandling>) {
    let delta = time.delta_secs();
    for mut handling in handlers.iter_mut() {
        handling.tick_timers(delta);
    }
}

/// Обработка aim start/end intent-ов
pub fn process_aim_intents(
    mut intents: EventReader<SetAimingIntent>,
    mut handlers: Query<&mut WeaponHandling>,
) {
    for intent in intents.read() {
        let Ok(mut handling) = handlers.get_mut(intent.entity) else {
            log_warning(&format!(
                "⚠️ SetAimingIntent для entity {:?} без WeaponHandling",
                intent.entity
            ));
            continue;
        };
        handling.set_aiming(intent.aiming);
    }
}

/// Trigger released: gate взводится немедленно, не дожидаясь cooldown
pub fn process_end_fire(
    mut intents: EventReader<EndFireIntent>,
    mut handlers: Query<&mut WeaponHandling>,
) {
    for intent in intents.read() {
        let Ok(mut handling) = handlers.get_mut(intent.entity) else {
            continue;
        };
        handling.release_trigger();
    }
}

/// Обработка fire intent-ов: gating → trace → effect события
///
/// Intent молча пропускается если gate закрыт или оружия нет в руках.
/// Сам персонаж и его оружие исключаются из трассировки.
pub fn process_fire_intents(
    mut intents: EventReader<FireWeaponIntent>,
    mut shooters: Query<(
        &mut WeaponHandling,
        &WeaponEffects,
        &MuzzleSocket,
        &EquippedWeapon,
    )>,
    camera: Res<CameraView>,
    raycaster: Res<SceneRaycaster>,
    mut fired: EventWriter<WeaponFired>,
    mut effects: EventWriter<SpawnEffect>,
) {
    for intent in intents.read() {
        let Ok((mut handling, weapon_effects, muzzle, equipped)) =
            shooters.get_mut(intent.entity)
        else {
            log_warning(&format!(
                "⚠️ FireWeaponIntent для entity {:?} без weapon rig",
                intent.entity
            ));
            continue;
        };

        if !handling.can_fire() {
            continue;
        }

        let mut ignore = vec![intent.entity];
        if let Some(weapon) = equipped.entity {
            ignore.push(weapon);
        }

        let (beam_end, hit) = weapon_trace(
            raycaster.0.as_ref(),
            camera.0,
            muzzle.location,
            handling.last_trace_end,
            &ignore,
        );

        handling.last_trace_end = beam_end;
        handling.begin_fire_cooldown();
        handling.mark_spraying();

        fired.write(WeaponFired {
            shooter: intent.entity,
            muzzle: muzzle.location,
            beam_end,
            impact: hit.map(|hit| ImpactPoint {
                location: hit.location,
                normal: hit.normal,
            }),
        });

        // Каждый configured asset → отдельное событие; None пропускается
        if let Some(asset) = &weapon_effects.fire_sound {
            effects.write(SpawnEffect {
                asset: asset.clone(),
                kind: EffectKind::Sound,
                location: muzzle.location,
                normal: None,
                beam_target: None,
            });
        }
        if let Some(asset) = &weapon_effects.muzzle_flash {
            effects.write(SpawnEffect {
                asset: asset.clone(),
                kind: EffectKind::MuzzleFlash,
                location: muzzle.location,
                normal: None,
                beam_target: None,
            });
        }
        if let Some(asset) = &weapon_effects.beam_particle {
            effects.write(SpawnEffect {
                asset: asset.clone(),
                kind: EffectKind::Beam,
                location: muzzle.location,
                normal: None,
                beam_target: Some(beam_end),
            });
        }
        if let Some(hit) = hit {
            if let Some(asset) = &weapon_effects.impact_particle {
                effects.write(SpawnEffect {
                    asset: asset.clone(),
                    kind: EffectKind::Impact,
                    location: hit.location,
                    normal: Some(hit.normal),
                    beam_target: None,
                });
            }
        }

        log(&format!(
            "🔫 Entity {:?} выстрелил, beam_end {:?}, hit: {}",
            intent.entity,
            beam_end,
            hit.is_some()
        ));
    }
}

/// FOV интерполяция к zoomed/default в зависимости от aiming
pub fn update_zoom_fov(time: Res<Time>, mut handlers: Query<&mut WeaponHandling>) {
    let delta = time.delta_secs();
    for mut handling in handlers.iter_mut() {
        handling.tick_zoom(delta);
    }
}

/// Пересчёт crosshair spread из кинематики персонажа
///
/// Идёт последним: видит aim/spray флаги уже после intent-ов тика.
pub fn update_crosshair_spread(
    time: Res<Time>,
    mut handlers: Query<(&mut WeaponHandling, &CharacterKinematics, &mut CrosshairSpread)>,
) {
    let delta = time.delta_secs();
    for (mut handling, kinematics, mut spread) in handlers.iter_mut() {
        spread.multiplier = handling.dynamic_crosshair(
            delta,
            kinematics.horizontal_speed(),
            kinematics.max_speed,
            kinematics.is_in_air,
        );
    }
}
