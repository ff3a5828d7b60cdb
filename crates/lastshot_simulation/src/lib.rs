//! LASTSHOT Simulation Core
//!
//! ECS-симуляция FPS player mechanics на Bevy 0.16 (strategic layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (weapon state, item lifecycle, crosshair model)
//! - Host engine = tactical layer (physics, raycasts, rendering, input devices)
//!
//! Host кормит симуляцию intent/overlap/camera данными и потребляет
//! effect/impulse/attach события. Всё состояние мутируется на
//! FixedUpdate 60 Hz, порядок систем детерминирован.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod input;
pub mod item;
pub mod logger;
pub mod player;
pub mod weapon_handling;

// Re-export базовых компонентов для удобства
pub use components::*;
pub use input::{
    InputAction, InputDispatchPlugin, JumpIntent, LookConfig, MoveInput, PlayerInput, ViewInput,
};
pub use item::{
    CollisionProfile, DropRequest, EquipRequest, Item, ItemAttached, ItemDetached,
    ItemLifecyclePlugin, ItemRarity, ItemState, ItemThrown, PickupOverlap, Weapon, WeaponKind,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_logger, LogPrinter};
pub use player::{spawn_player, DefaultWeapon, EquipCandidate, EquippedWeapon, PlayerPlugin};
pub use weapon_handling::{
    ArmedState, CameraView, CrosshairSpread, EndFireIntent, FireWeaponIntent, LineTrace,
    SceneRaycaster, SetAimingIntent, SpawnEffect, TraceHit, ViewPoint, WeaponEffects,
    WeaponFired, WeaponHandling, WeaponHandlingPlugin,
};

/// Порядок подсистем внутри FixedUpdate
///
/// Input → Items → Weapons: intents текущего тика успевают дойти до
/// equip/fire обработки в том же тике.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Items,
    Weapons,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Host seams: headless defaults, host подменяет своими
            .init_resource::<CameraView>()
            .init_resource::<SceneRaycaster>();

        // Детерминистичный RNG; уже посеянный (create_headless_app) не трогаем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Input,
                SimulationSet::Items,
                SimulationSet::Weapons,
            )
                .chain(),
        );

        app.add_plugins((
            input::InputDispatchPlugin,
            item::ItemLifecyclePlugin,
            weapon_handling::WeaponHandlingPlugin,
            player::PlayerPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{component:?}").as_bytes());
    }

    snapshot
}
