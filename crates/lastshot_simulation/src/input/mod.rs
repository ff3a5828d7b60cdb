//! Input dispatch — host input события → intents симуляции
//!
//! Stateless forwarding: каждое дискретное input событие отображается
//! 1:1 на intent или мутацию компонента. Никаких retry и propagation —
//! неподходящие события молча пропускаются.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{CharacterKinematics, RUN_SPEED, WALK_SPEED};
use crate::item::{DropRequest, EquipRequest};
use crate::weapon_handling::{EndFireIntent, FireWeaponIntent, SetAimingIntent, WeaponHandling};

/// Дискретное input действие (в терминах host input map)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Планарный move axis (x = strafe, y = вперёд)
    Move(Vec2),

    /// Look axis (x = yaw, y = pitch), до применения sensitivity
    Look(Vec2),

    Jump,
    FireStart,
    FireEnd,
    AimStart,
    AimEnd,

    /// Drop если в руках оружие, иначе equip кандидата
    EquipToggle,

    WalkToggle,
    RunToggle,
    CrouchToggle,
}

/// Input событие от host (per-entity)
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerInput {
    pub entity: Entity,
    pub action: InputAction,
}

/// Намерение прыгнуть (host выполняет сам прыжок)
#[derive(Event, Debug, Clone, Copy)]
pub struct JumpIntent {
    pub entity: Entity,
}

/// Look sensitivity конфигурация (designer defaults)
#[derive(Resource, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LookConfig {
    /// Множитель от бедра
    pub hipfire_sensitivity: f32,

    /// Множитель при прицеливании
    pub ads_sensitivity: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            hipfire_sensitivity: 1.0,
            ads_sensitivity: 0.5,
        }
    }
}

impl LookConfig {
    pub fn sensitivity_for(&self, aiming: bool) -> f32 {
        if aiming {
            self.ads_sensitivity
        } else {
            self.hipfire_sensitivity
        }
    }
}

/// Накопленный планарный move intent (host читает через `take`)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MoveInput {
    pub planar: Vec2,
}

impl MoveInput {
    pub fn take(&mut self) -> Vec2 {
        std::mem::take(&mut self.planar)
    }
}

/// Накопленные yaw/pitch дельты (host применяет к camera rig)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ViewInput {
    pub yaw: f32,
    pub pitch: f32,
}

impl ViewInput {
    pub fn take(&mut self) -> (f32, f32) {
        let deltas = (self.yaw, self.pitch);
        self.yaw = 0.0;
        self.pitch = 0.0;
        deltas
    }
}

/// Единственная система диспатча
pub fn dispatch_input(
    mut inputs: EventReader<PlayerInput>,
    look_config: Res<LookConfig>,
    mut players: Query<(
        &WeaponHandling,
        &mut CharacterKinematics,
        &mut MoveInput,
        &mut ViewInput,
    )>,
    mut fire: EventWriter<FireWeaponIntent>,
    mut end_fire: EventWriter<EndFireIntent>,
    mut aim: EventWriter<SetAimingIntent>,
    mut equip: EventWriter<EquipRequest>,
    mut drop: EventWriter<DropRequest>,
    mut jump: EventWriter<JumpIntent>,
) {
    for input in inputs.read() {
        let Ok((handling, mut kinematics, mut move_input, mut view_input)) =
            players.get_mut(input.entity)
        else {
            continue;
        };

        match input.action {
            InputAction::Move(axis) => {
                move_input.planar += axis;
            }
            InputAction::Look(axis) => {
                let sensitivity = look_config.sensitivity_for(handling.is_aiming);
                view_input.yaw += axis.x * sensitivity;
                view_input.pitch += axis.y * sensitivity;
            }
            InputAction::Jump => {
                jump.write(JumpIntent {
                    entity: input.entity,
                });
            }
            InputAction::FireStart => {
                fire.write(FireWeaponIntent {
                    entity: input.entity,
                });
            }
            InputAction::FireEnd => {
                end_fire.write(EndFireIntent {
                    entity: input.entity,
                });
            }
            InputAction::AimStart => {
                aim.write(SetAimingIntent {
                    entity: input.entity,
                    aiming: true,
                });
            }
            InputAction::AimEnd => {
                aim.write(SetAimingIntent {
                    entity: input.entity,
                    aiming: false,
                });
            }
            InputAction::EquipToggle => {
                if handling.armed.is_armed() {
                    drop.write(DropRequest {
                        player: input.entity,
                    });
                } else {
                    equip.write(EquipRequest {
                        player: input.entity,
                    });
                }
            }
            InputAction::WalkToggle => {
                kinematics.max_speed = WALK_SPEED;
            }
            InputAction::RunToggle => {
                kinematics.max_speed = RUN_SPEED;
            }
            InputAction::CrouchToggle => {
                kinematics.is_crouching = !kinematics.is_crouching;
            }
        }
    }
}

/// Input dispatch plugin (идёт первым в FixedUpdate)
pub struct InputDispatchPlugin;

impl Plugin for InputDispatchPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInput>().add_event::<JumpIntent>();
        app.init_resource::<LookConfig>();

        app.add_systems(
            FixedUpdate,
            dispatch_input.in_set(crate::SimulationSet::Input),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_sensitivity_selection() {
        let config = LookConfig::default();
        assert_eq!(config.sensitivity_for(false), 1.0);
        assert_eq!(config.sensitivity_for(true), 0.5);
    }

    #[test]
    fn test_view_input_take_drains() {
        let mut view = ViewInput {
            yaw: 1.5,
            pitch: -0.5,
        };
        assert_eq!(view.take(), (1.5, -0.5));
        assert_eq!(view.take(), (0.0, 0.0));
    }

    #[test]
    fn test_move_input_take_drains() {
        let mut movement = MoveInput {
            planar: Vec2::new(1.0, -1.0),
        };
        assert_eq!(movement.take(), Vec2::new(1.0, -1.0));
        assert_eq!(movement.take(), Vec2::ZERO);
    }
}
