//! Item lifecycle — pickup, equip, drop, бросок
//!
//! # Архитектура
//!
//! ECS ответственность:
//! - Placement state machine предмета (InWorld → Equipped → Falling → …)
//! - Overlap счётчик + world-item trace для pickup prompt-а
//! - Equip/drop preconditions и throw impulse математика
//! - `CollisionProfile` как данные (host применяет к physics bodies)
//!
//! Host ответственность:
//! - Сами overlap события (proximity sphere), физика полёта
//! - Skeletal attachment по `ItemAttached`, impulse по `ItemThrown`

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

pub use components::{
    CollisionProfile, FallingItem, Item, ItemRarity, ItemState, Weapon, WeaponKind, THROW_TIME,
};
pub use events::{
    DropRequest, EquipRequest, ItemAttached, ItemDetached, ItemThrown, PickupOverlap,
};

/// Item lifecycle plugin
///
/// Порядок систем (FixedUpdate, chained):
/// 1. process_overlap_events — overlap счётчик
/// 2. update_pickup_prompts — world-item trace, кандидат + prompt
/// 3. process_equip_requests — preconditions + attach
/// 4. process_drop_requests — бросок + impulse
/// 5. tick_throw_timers — приземление после throw_time
pub struct ItemLifecyclePlugin;

impl Plugin for ItemLifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PickupOverlap>()
            .add_event::<EquipRequest>()
            .add_event::<DropRequest>()
            .add_event::<ItemAttached>()
            .add_event::<ItemDetached>()
            .add_event::<ItemThrown>();

        app.add_systems(
            FixedUpdate,
            (
                systems::process_overlap_events,
                systems::update_pickup_prompts,
                systems::process_equip_requests,
                systems::process_drop_requests,
                systems::tick_throw_timers,
            )
                .chain()
                .in_set(crate::SimulationSet::Items),
        );
    }
}
