//! Базовые компоненты: player marker, кинематика, attachment sockets

pub mod actor;
pub mod attachment;

pub use actor::{CharacterKinematics, Player, RUN_SPEED, WALK_SPEED};
pub use attachment::{MuzzleSocket, WeaponSocket};
