//! Headless симуляция LASTSHOT
//!
//! Запускает Bevy App без рендера: персонаж со стартовым оружием
//! периодически стреляет, crosshair spread печатается в консоль

use lastshot_simulation::{
    create_headless_app, components::Player, CrosshairSpread, DefaultWeapon, InputAction,
    PlayerInput, SimulationPlugin,
};

fn main() {
    let seed = 42;
    println!("Starting LASTSHOT headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(DefaultWeapon::default());

    let player = app.world_mut().spawn(Player).id();

    // 600 тиков: каждые 2 секунды короткая очередь
    for tick in 0..600 {
        if tick % 120 == 0 {
            app.world_mut().send_event(PlayerInput {
                entity: player,
                action: InputAction::FireStart,
            });
        }

        app.update();

        if tick % 100 == 0 {
            let spread = app
                .world()
                .get::<CrosshairSpread>(player)
                .map(|spread| spread.multiplier);
            println!("Tick {}: crosshair spread {:?}", tick, spread);
        }
    }

    println!("Simulation complete!");
}
