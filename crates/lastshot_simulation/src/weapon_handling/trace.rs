//! Weapon trace — двухэтапный raycast через host seam
//!
//! # Архитектура
//!
//! Сам raycast по сцене выполняет host engine: симуляция зовёт
//! `LineTrace` trait из `SceneRaycaster` resource. Headless запуск
//! использует `NoHitTracer` (всегда мимо) — логика деградирует в
//! "aim point без окклюзии", ничего не падает.
//!
//! Два этапа:
//! 1. Crosshair trace: из камеры вперёд на 50 000 units → aim point
//! 2. Barrel trace: от дула к точке 1.25× вектора до aim point —
//!    ловит препятствия между стволом и целью

use bevy::prelude::*;

/// Дальность crosshair trace, units
pub const CROSSHAIR_TRACE_RANGE: f32 = 50_000.0;

/// Множитель перелёта barrel trace за aim point
pub const BARREL_TRACE_SCALE: f32 = 1.25;

/// Blocking hit результата трассировки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    /// Entity в которую попали (если host её знает)
    pub entity: Option<Entity>,

    /// Точка попадания (world space)
    pub location: Vec3,

    /// Нормаль поверхности в точке попадания
    pub normal: Vec3,
}

/// Host-provided line trace (visibility channel)
///
/// `ignore` — entities исключённые из окклюзии (сам персонаж,
/// оружие в руках).
pub trait LineTrace: Send + Sync {
    fn trace(&self, start: Vec3, end: Vec3, ignore: &[Entity]) -> Option<TraceHit>;
}

/// Raycast seam (host подменяет на свой)
#[derive(Resource)]
pub struct SceneRaycaster(pub Box<dyn LineTrace>);

impl Default for SceneRaycaster {
    fn default() -> Self {
        Self(Box::new(NoHitTracer))
    }
}

/// Headless fallback: никогда не попадает
pub struct NoHitTracer;

impl LineTrace for NoHitTracer {
    fn trace(&self, _start: Vec3, _end: Vec3, _ignore: &[Entity]) -> Option<TraceHit> {
        None
    }
}

/// Camera sample (host-обновляемый каждый кадр)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPoint {
    /// Позиция камеры (world space)
    pub origin: Vec3,

    /// Направление взгляда (unit vector)
    pub forward: Vec3,
}

/// Текущий camera view; `None` → камера недоступна, aim trace
/// пропускается и используется предыдущий end point
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CameraView(pub Option<ViewPoint>);

/// Этап 1: trace из центра экрана (crosshair) в мир
///
/// Возвращает aim point: точку blocking hit, либо конец луча если
/// ничего не задето.
pub fn trace_under_crosshair(
    tracer: &dyn LineTrace,
    view: ViewPoint,
    ignore: &[Entity],
) -> (Vec3, Option<TraceHit>) {
    let start = view.origin;
    let end = start + view.forward * CROSSHAIR_TRACE_RANGE;

    match tracer.trace(start, end, ignore) {
        Some(hit) => (hit.location, Some(hit)),
        None => (end, None),
    }
}

/// Двухэтапный weapon trace
///
/// `fallback_end` используется как aim point когда камера недоступна.
/// Возвращает финальный end point луча и blocking hit barrel trace
/// (если есть) для impact эффектов.
pub fn weapon_trace(
    tracer: &dyn LineTrace,
    view: Option<ViewPoint>,
    muzzle: Vec3,
    fallback_end: Vec3,
    ignore: &[Entity],
) -> (Vec3, Option<TraceHit>) {
    // Этап 1: aim point из камеры (или fallback)
    let aim_point = match view {
        Some(view) => trace_under_crosshair(tracer, view, ignore).0,
        None => fallback_end,
    };

    // Этап 2: от дула с перелётом за aim point
    let to_aim = aim_point - muzzle;
    let barrel_end = muzzle + to_aim * BARREL_TRACE_SCALE;

    match tracer.trace(muzzle, barrel_end, ignore) {
        Some(hit) => (hit.location, Some(hit)),
        None => (aim_point, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub tracer: блокирующая плоскость x = wall_x
    struct WallTracer {
        wall_x: f32,
        wall_entity: Option<Entity>,
    }

    impl LineTrace for WallTracer {
        fn trace(&self, start: Vec3, end: Vec3, ignore: &[Entity]) -> Option<TraceHit> {
            if self
                .wall_entity
                .is_some_and(|entity| ignore.contains(&entity))
            {
                return None;
            }
            let dir = end - start;
            if dir.x.abs() < f32::EPSILON {
                return None;
            }
            let t = (self.wall_x - start.x) / dir.x;
            if !(0.0..=1.0).contains(&t) {
                return None;
            }
            // Точное пересечение с плоскостью: x берём из wall_x,
            // start + dir * t даёт f32 шум (100.00001 вместо 100.0)
            Some(TraceHit {
                entity: self.wall_entity,
                location: Vec3::new(self.wall_x, start.y + dir.y * t, start.z + dir.z * t),
                normal: Vec3::new(-dir.x.signum(), 0.0, 0.0),
            })
        }
    }

    const VIEW: ViewPoint = ViewPoint {
        origin: Vec3::ZERO,
        forward: Vec3::X,
    };

    #[test]
    fn test_crosshair_trace_hit_shortens_end() {
        let tracer = WallTracer {
            wall_x: 100.0,
            wall_entity: None,
        };
        let (end, hit) = trace_under_crosshair(&tracer, VIEW, &[]);
        assert_eq!(end, Vec3::new(100.0, 0.0, 0.0));
        assert!(hit.is_some());
    }

    #[test]
    fn test_crosshair_trace_miss_returns_full_range() {
        let (end, hit) = trace_under_crosshair(&NoHitTracer, VIEW, &[]);
        assert_eq!(end, Vec3::new(CROSSHAIR_TRACE_RANGE, 0.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_crosshair_trace_respects_ignore_list() {
        let own_weapon = Entity::from_raw(7);
        let tracer = WallTracer {
            wall_x: 100.0,
            wall_entity: Some(own_weapon),
        };
        let (end, hit) = trace_under_crosshair(&tracer, VIEW, &[own_weapon]);
        assert_eq!(end, Vec3::new(CROSSHAIR_TRACE_RANGE, 0.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_weapon_trace_obstruction_wins() {
        // Стена на x=50 между дулом (x=0) и aim point далеко впереди
        let tracer = WallTracer {
            wall_x: 50.0,
            wall_entity: None,
        };
        let muzzle = Vec3::ZERO;
        let (end, hit) = weapon_trace(&tracer, Some(VIEW), muzzle, Vec3::ZERO, &[]);
        assert_eq!(end, Vec3::new(50.0, 0.0, 0.0));
        assert!(hit.is_some());
    }

    #[test]
    fn test_weapon_trace_no_camera_uses_fallback() {
        let fallback = Vec3::new(10.0, 2.0, 3.0);
        let (end, hit) = weapon_trace(&NoHitTracer, None, Vec3::ZERO, fallback, &[]);
        assert_eq!(end, fallback);
        assert!(hit.is_none());
    }

    #[test]
    fn test_weapon_trace_barrel_overshoot() {
        // Стена на x=110: crosshair trace (из origin) упирается в неё,
        // barrel trace от дула x=100 с перелётом 1.25× тоже достаёт
        let tracer = WallTracer {
            wall_x: 110.0,
            wall_entity: None,
        };
        let muzzle = Vec3::new(100.0, 0.0, 0.0);
        let (end, hit) = weapon_trace(&tracer, Some(VIEW), muzzle, Vec3::ZERO, &[]);
        assert_eq!(end, Vec3::new(110.0, 0.0, 0.0));
        assert!(hit.is_some());
    }
}
