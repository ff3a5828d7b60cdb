//! События weapon handling
//!
//! Intent события (host/input → симуляция) и effect события
//! (симуляция → host). Host подписывается на `WeaponFired` /
//! `SpawnEffect` и проигрывает VFX/SFX — симуляция знает только
//! asset path строки.

use bevy::prelude::*;

// ============================================================================
// INTENT СОБЫТИЯ (вход)
// ============================================================================

/// Намерение выстрелить (trigger pressed / удержан)
#[derive(Event, Debug, Clone, Copy)]
pub struct FireWeaponIntent {
    pub entity: Entity,
}

/// Trigger released — fire gate взводится немедленно
#[derive(Event, Debug, Clone, Copy)]
pub struct EndFireIntent {
    pub entity: Entity,
}

/// Начало/конец прицеливания (aim down sights)
#[derive(Event, Debug, Clone, Copy)]
pub struct SetAimingIntent {
    pub entity: Entity,
    pub aiming: bool,
}

// ============================================================================
// EFFECT СОБЫТИЯ (выход)
// ============================================================================

/// Точка попадания для impact эффектов
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactPoint {
    pub location: Vec3,
    pub normal: Vec3,
}

/// Выстрел произошёл (gate прошёл, trace выполнен)
#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponFired {
    pub shooter: Entity,

    /// Позиция дула на момент выстрела
    pub muzzle: Vec3,

    /// Конечная точка луча (hit location или aim point)
    pub beam_end: Vec3,

    /// Blocking hit (None при выстреле в пустоту)
    pub impact: Option<ImpactPoint>,
}

/// Тип эффекта для host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Sound,
    MuzzleFlash,
    Beam,
    Impact,
}

/// Запрос на spawn одного эффекта
///
/// По одному событию на каждый configured asset выстрела.
#[derive(Event, Debug, Clone)]
pub struct SpawnEffect {
    /// Asset path в терминах host
    pub asset: String,

    pub kind: EffectKind,

    /// Точка spawn-а (дуло для flash/sound/beam, hit для impact)
    pub location: Vec3,

    /// Нормаль поверхности (только impact)
    pub normal: Option<Vec3>,

    /// Конечная точка beam particle (только beam)
    pub beam_target: Option<Vec3>,
}

// ============================================================================
// КОМПОНЕНТЫ
// ============================================================================

/// Настроенные asset paths эффектов выстрела
///
/// Любое поле `None` → соответствующий эффект молча пропускается.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct WeaponEffects {
    pub fire_sound: Option<String>,
    pub muzzle_flash: Option<String>,
    pub beam_particle: Option<String>,
    pub impact_particle: Option<String>,
}

impl WeaponEffects {
    /// Полный набор для SMG
    pub fn smg() -> Self {
        Self {
            fire_sound: Some("sfx/smg_fire".into()),
            muzzle_flash: Some("vfx/smg_muzzle_flash".into()),
            beam_particle: Some("vfx/smoke_beam".into()),
            impact_particle: Some("vfx/impact_spark".into()),
        }
    }
}
