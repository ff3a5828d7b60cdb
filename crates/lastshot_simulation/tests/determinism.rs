//! Тесты детерминизма player mechanics
//!
//! Одинаковый seed + одинаковый сценарий входа → идентичные снепшоты
//! weapon/item состояния после N тиков

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use lastshot_simulation::*;
use lastshot_simulation::components::Player;

const TICK: Duration = Duration::from_nanos(16_666_667);

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 600;

    let snapshot1 = run_scenario(SEED, TICK_COUNT);
    let snapshot2 = run_scenario(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 600;

    let snapshots: Vec<_> = (0..5).map(|_| run_scenario(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

/// Скриптованный сценарий: очереди, прицеливание, drop, подбор движения
fn run_scenario(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(DefaultWeapon::default())
        .insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    let player = app.world_mut().spawn(Player).id();

    for tick in 0..tick_count {
        if tick % 30 == 0 {
            app.world_mut().send_event(PlayerInput {
                entity: player,
                action: InputAction::FireStart,
            });
        }
        if tick % 100 == 10 {
            app.world_mut().send_event(PlayerInput {
                entity: player,
                action: InputAction::AimStart,
            });
        }
        if tick % 100 == 60 {
            app.world_mut().send_event(PlayerInput {
                entity: player,
                action: InputAction::AimEnd,
            });
        }
        if tick == 300 {
            // Drop: сюда входит RNG jitter броска
            app.world_mut().send_event(PlayerInput {
                entity: player,
                action: InputAction::EquipToggle,
            });
        }
        if tick % 45 == 0 {
            let mut kinematics = app
                .world_mut()
                .get_mut::<CharacterKinematics>(player)
                .unwrap();
            kinematics.velocity = Vec3::new((tick % 7) as f32 * 50.0, 0.0, 0.0);
            kinematics.is_in_air = tick % 90 == 0;
        }

        app.update();
    }

    // Снепшот: weapon state + crosshair + item placement
    let mut snapshot = world_snapshot::<WeaponHandling>(app.world_mut());
    snapshot.extend(world_snapshot::<CrosshairSpread>(app.world_mut()));
    snapshot.extend(world_snapshot::<Item>(app.world_mut()));
    snapshot.extend(world_snapshot::<CollisionProfile>(app.world_mut()));

    snapshot
}
