//! Weapon handling — стрельба, прицеливание, crosshair spread
//!
//! # Архитектура
//!
//! ECS ответственность:
//! - Fire gate: should_fire / fire_rate cooldown / armed state
//! - Crosshair spread model (четыре сглаженных sub-term-а)
//! - FOV rig: zoom interpolation при aiming
//! - Weapon trace: двухэтапный raycast через `LineTrace` seam
//!
//! Host ответственность:
//! - Сам raycast по сцене (`SceneRaycaster` resource)
//! - Camera transform (`CameraView` resource, обновляется каждый кадр)
//! - VFX/SFX по `WeaponFired` / `SpawnEffect` событиям

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod math;
pub mod systems;
pub mod trace;

pub use components::{ArmedState, CrosshairSpread, WeaponHandling};
pub use events::{
    EffectKind, EndFireIntent, FireWeaponIntent, SetAimingIntent, SpawnEffect, WeaponEffects,
    WeaponFired,
};
pub use trace::{CameraView, LineTrace, NoHitTracer, SceneRaycaster, TraceHit, ViewPoint};

/// Weapon handling plugin
///
/// Порядок систем (FixedUpdate, chained):
/// 1. tick_weapon_timers — восстановление should_fire, сброс spray flag
/// 2. process_aim_intents — aim start/end
/// 3. process_end_fire — trigger release повторно взводит gate
/// 4. process_fire_intents — gating + trace + effect события
/// 5. update_zoom_fov — FOV interpolation
/// 6. update_crosshair_spread — пересчёт spread из кинематики
pub struct WeaponHandlingPlugin;

impl Plugin for WeaponHandlingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireWeaponIntent>()
            .add_event::<EndFireIntent>()
            .add_event::<SetAimingIntent>()
            .add_event::<WeaponFired>()
            .add_event::<SpawnEffect>();

        app.add_systems(
            FixedUpdate,
            (
                systems::tick_weapon_timers,
                systems::process_aim_intents,
                systems::process_end_fire,
                systems::process_fire_intents,
                systems::update_zoom_fov,
                systems::update_crosshair_spread,
            )
                .chain()
                .in_set(crate::SimulationSet::Weapons),
        );
    }
}
