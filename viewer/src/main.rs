// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]

#[cfg(feature = "dev_native")]
mod debug_tools;

mod camera;
mod frame;
mod input;
mod spheres;

use std::io;

use bevy::{prelude::*, window::ExitCondition};
use sim::{MainLoop, Simulation, WINDOW_HEIGHT, WINDOW_WIDTH, WorldConfig};

fn main() -> AppExit {
    // The answers are needed before the window opens, so the console prompts run first.
    let config = match sim::read_config(&mut io::stdin().lock(), &mut io::stdout()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("could not read the configuration: {err}");
            return AppExit::error();
        }
    };
    let config = match sim::seed_from_env() {
        Some(seed) => config.with_seed(seed),
        None => config,
    };

    App::new().add_plugins(AppPlugin { config }).run()
}

pub struct AppPlugin {
    config: WorldConfig,
}

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Window {
                title: "Sphere Collisions".to_string(),
                resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
                resizable: false,
                ..default()
            }
            .into(),
            // Closing goes through the main loop so the world is released first.
            close_when_requested: false,
            exit_condition: ExitCondition::DontExit,
            ..default()
        }));
        app.insert_resource(ClearColor(Color::BLACK));

        // After DefaultPlugins so the log plugin already captures the spawn messages.
        let main_loop = MainLoop::new(Simulation::init(self.config.clone()));
        app.insert_resource(frame::Demo::new(main_loop));

        app.add_plugins((
            input::plugin,
            camera::plugin,
            spheres::plugin,
            frame::plugin,
        ));

        #[cfg(feature = "dev_native")]
        app.add_plugins(debug_tools::plugin);
    }
}
