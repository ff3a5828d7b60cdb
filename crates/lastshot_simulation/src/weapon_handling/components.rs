//! Weapon handling state component
//!
//! # Архитектура
//!
//! **WeaponHandling** — весь per-character weapon state в одном компоненте:
//! - Fire gate: `should_fire` + `fire_rate` countdown (автоматическая стрельба)
//! - Spray flag: `is_firing` + отдельный короткий countdown (только crosshair bloom)
//! - Armed state: enum вместо четырёх взаимно-управляемых булей —
//!   mutual exclusion по построению
//! - FOV rig: current_fov интерполируется к zoomed/default по aiming
//! - Crosshair sub-multipliers: четыре независимо сглаженных слагаемых
//!
//! Все константы модели (targets, interp rates, baseline 0.5) — tuned
//! gameplay feel, воспроизводятся точно.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::weapon_handling::math::{finterp_to, map_range_clamped};

/// Категория оружия в руках (gate для стрельбы)
///
/// `Unarmed` ⇔ нет attached оружия; ровно одно значение активно.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize,
)]
pub enum ArmedState {
    #[default]
    Unarmed,
    Pistol,
    Rifle,
    Shotgun,
}

impl ArmedState {
    /// Есть ли оружие в руках
    pub fn is_armed(self) -> bool {
        !matches!(self, ArmedState::Unarmed)
    }
}

/// Per-character weapon handling state
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WeaponHandling {
    // === FOV rig ===
    /// Default camera FOV (hip fire)
    pub default_fov: f32,

    /// Текущий FOV (интерполируется каждый тик)
    pub current_fov: f32,

    /// Zoomed FOV (aim down sights)
    pub zoomed_fov: f32,

    /// Interp rate для zoom in/out
    pub zoom_interp_speed: f32,

    /// Aim down sights flag
    pub is_aiming: bool,

    // === Crosshair sub-multipliers ===
    /// Слагаемое от горизонтальной скорости (без сглаживания)
    pub accelerating_multiplier: f32,

    /// Слагаемое airborne (→ 3.0 в воздухе)
    pub in_air_multiplier: f32,

    /// Слагаемое aiming (→ −0.5 при прицеливании)
    pub aiming_multiplier: f32,

    /// Слагаемое стрельбы (→ 0.3 пока spray flag активен)
    pub firing_multiplier: f32,

    // === Spray flag (только crosshair bloom) ===
    /// true короткое окно после каждого выстрела
    pub is_firing: bool,

    /// Задержка сброса spray flag, сек
    pub spray_reset_delay: f32,

    /// Countdown до сброса spray flag
    pub spray_timer: f32,

    // === Fire gate ===
    /// Gate: может ли оружие выстрелить прямо сейчас
    pub should_fire: bool,

    /// Интервал между выстрелами (auto fire), сек
    pub fire_rate: f32,

    /// Countdown до восстановления should_fire
    pub fire_cooldown: f32,

    // === Armed state ===
    /// Категория оружия в руках
    pub armed: ArmedState,

    /// Предыдущая точка aim trace (fallback когда камера недоступна)
    pub last_trace_end: Vec3,
}

impl Default for WeaponHandling {
    fn default() -> Self {
        Self {
            default_fov: 90.0,
            current_fov: 90.0,
            zoomed_fov: 45.0,
            zoom_interp_speed: 20.0,
            is_aiming: false,

            accelerating_multiplier: 0.0,
            in_air_multiplier: 0.0,
            aiming_multiplier: 0.0,
            firing_multiplier: 0.0,

            is_firing: false,
            spray_reset_delay: 0.05,
            spray_timer: 0.0,

            should_fire: true,
            fire_rate: 0.05,
            fire_cooldown: 0.0,

            armed: ArmedState::Unarmed,
            last_trace_end: Vec3::ZERO,
        }
    }
}

impl WeaponHandling {
    /// Может ли произойти выстрел (gate открыт И есть оружие)
    pub fn can_fire(&self) -> bool {
        self.should_fire && self.armed.is_armed()
    }

    /// Закрыть fire gate и взвести countdown на fire_rate
    pub fn begin_fire_cooldown(&mut self) {
        self.should_fire = false;
        self.fire_cooldown = self.fire_rate;
    }

    /// Поднять spray flag (crosshair bloom) с авто-сбросом
    pub fn mark_spraying(&mut self) {
        self.is_firing = true;
        self.spray_timer = self.spray_reset_delay;
    }

    /// Trigger released — gate взводится немедленно
    pub fn release_trigger(&mut self) {
        self.should_fire = true;
    }

    pub fn set_aiming(&mut self, aiming: bool) {
        self.is_aiming = aiming;
    }

    pub fn set_armed_state(&mut self, armed: ArmedState) {
        self.armed = armed;
    }

    /// Тик обоих countdown таймеров
    ///
    /// fire_cooldown истёк → should_fire снова true;
    /// spray_timer истёк → is_firing сброшен.
    /// Остаток меньше f32::EPSILON считаем нулём: дробные тики
    /// (0.02 + 0.03) оставляют ~1e-9 от накопленного округления.
    pub fn tick_timers(&mut self, delta_time: f32) {
        if self.fire_cooldown > 0.0 {
            self.fire_cooldown -= delta_time;
            if self.fire_cooldown <= f32::EPSILON {
                self.fire_cooldown = 0.0;
                self.should_fire = true;
            }
        }
        if self.is_firing {
            self.spray_timer -= delta_time;
            if self.spray_timer <= f32::EPSILON {
                self.spray_timer = 0.0;
                self.is_firing = false;
            }
        }
    }

    /// Тик FOV rig: интерполяция к zoomed при aiming, иначе к default
    pub fn tick_zoom(&mut self, delta_time: f32) {
        let target = if self.is_aiming {
            self.zoomed_fov
        } else {
            self.default_fov
        };
        self.current_fov = finterp_to(self.current_fov, target, delta_time, self.zoom_interp_speed);
    }

    /// Пересчёт crosshair spread из условий кадра
    ///
    /// Возвращает total spread = 0.5 + speed + airborne + aiming + firing.
    /// Targets/rates — фиксированные tuning константы.
    pub fn dynamic_crosshair(
        &mut self,
        delta_time: f32,
        player_speed: f32,
        max_speed: f32,
        is_in_air: bool,
    ) -> f32 {
        self.accelerating_multiplier =
            map_range_clamped(player_speed, 0.0, max_speed, 0.0, 1.0);

        self.in_air_multiplier = if is_in_air {
            finterp_to(self.in_air_multiplier, 3.0, delta_time, 20.0)
        } else {
            finterp_to(self.in_air_multiplier, 0.0, delta_time, 5.0)
        };

        self.aiming_multiplier = if self.is_aiming {
            finterp_to(self.aiming_multiplier, -0.5, delta_time, 12.0)
        } else {
            finterp_to(self.aiming_multiplier, 0.0, delta_time, 15.0)
        };

        self.firing_multiplier = if self.is_firing {
            finterp_to(self.firing_multiplier, 0.3, delta_time, 35.0)
        } else {
            finterp_to(self.firing_multiplier, 0.0, delta_time, 60.0)
        };

        0.5 + self.accelerating_multiplier
            + self.in_air_multiplier
            + self.aiming_multiplier
            + self.firing_multiplier
    }
}

/// Итоговый crosshair spread (читается host HUD-ом)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CrosshairSpread {
    pub multiplier: f32,
}

impl Default for CrosshairSpread {
    fn default() -> Self {
        // Baseline при нулевых sub-terms
        Self { multiplier: 0.5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armed_state_exclusive() {
        let mut handling = WeaponHandling::default();
        assert_eq!(handling.armed, ArmedState::Unarmed);
        assert!(!handling.armed.is_armed());

        handling.set_armed_state(ArmedState::Rifle);
        assert_eq!(handling.armed, ArmedState::Rifle);
        assert!(handling.armed.is_armed());

        handling.set_armed_state(ArmedState::Unarmed);
        assert!(!handling.armed.is_armed());
    }

    #[test]
    fn test_fire_gate_requires_weapon() {
        let mut handling = WeaponHandling::default();
        assert!(handling.should_fire);
        assert!(!handling.can_fire()); // unarmed

        handling.set_armed_state(ArmedState::Pistol);
        assert!(handling.can_fire());
    }

    #[test]
    fn test_fire_cooldown_restores_gate() {
        let mut handling = WeaponHandling {
            armed: ArmedState::Pistol,
            ..Default::default()
        };

        handling.begin_fire_cooldown();
        assert!(!handling.can_fire());

        handling.tick_timers(0.02);
        assert!(!handling.should_fire);

        handling.tick_timers(0.03); // ровно fire_rate суммарно, f32 остаток гасится
        assert!(handling.should_fire);
        assert!(handling.can_fire());
    }

    #[test]
    fn test_trigger_release_rearms_immediately() {
        let mut handling = WeaponHandling::default();
        handling.begin_fire_cooldown();
        assert!(!handling.should_fire);

        handling.release_trigger();
        assert!(handling.should_fire);
    }

    #[test]
    fn test_spray_flag_independent_of_gate() {
        let mut handling = WeaponHandling::default();
        handling.mark_spraying();
        assert!(handling.is_firing);

        // Gate не тронут
        assert!(handling.should_fire);

        // Дробные тики: f32 остаток не должен держать flag
        handling.tick_timers(0.02);
        assert!(handling.is_firing);
        handling.tick_timers(0.03);
        assert!(!handling.is_firing);
    }

    #[test]
    fn test_crosshair_baseline() {
        let mut handling = WeaponHandling::default();
        let spread = handling.dynamic_crosshair(0.016, 0.0, 600.0, false);
        assert_eq!(spread, 0.5);
    }

    #[test]
    fn test_crosshair_speed_term_linear() {
        let mut handling = WeaponHandling::default();
        let spread = handling.dynamic_crosshair(0.016, 300.0, 600.0, false);
        assert!((spread - 1.0).abs() < 1.0e-6); // 0.5 + 0.5

        let spread = handling.dynamic_crosshair(0.016, 1200.0, 600.0, false);
        assert!((spread - 1.5).abs() < 1.0e-6); // clamped к 1.0
    }

    #[test]
    fn test_crosshair_airborne_converges_to_three() {
        let mut handling = WeaponHandling::default();
        for _ in 0..600 {
            handling.dynamic_crosshair(0.016, 0.0, 600.0, true);
        }
        assert!((handling.in_air_multiplier - 3.0).abs() < 1.0e-3);

        for _ in 0..600 {
            handling.dynamic_crosshair(0.016, 0.0, 600.0, false);
        }
        assert!(handling.in_air_multiplier.abs() < 1.0e-3);
    }

    #[test]
    fn test_crosshair_aiming_tightens() {
        let mut handling = WeaponHandling::default();
        handling.set_aiming(true);
        for _ in 0..600 {
            handling.dynamic_crosshair(0.016, 0.0, 600.0, false);
        }
        assert!((handling.aiming_multiplier - (-0.5)).abs() < 1.0e-3);
        let spread = handling.dynamic_crosshair(0.016, 0.0, 600.0, false);
        assert!(spread < 0.5);
    }

    #[test]
    fn test_crosshair_deterministic_history() {
        let run = || {
            let mut handling = WeaponHandling::default();
            let mut spreads = Vec::new();
            for tick in 0..120 {
                let speed = (tick as f32) * 5.0;
                let in_air = tick % 30 > 15;
                spreads.push(handling.dynamic_crosshair(0.016, speed, 600.0, in_air));
            }
            spreads
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_zoom_interpolates_between_fovs() {
        let mut handling = WeaponHandling::default();
        handling.set_aiming(true);
        for _ in 0..600 {
            handling.tick_zoom(0.016);
        }
        assert!((handling.current_fov - 45.0).abs() < 0.1);

        handling.set_aiming(false);
        for _ in 0..600 {
            handling.tick_zoom(0.016);
        }
        assert!((handling.current_fov - 90.0).abs() < 0.1);
    }
}
