use config::Config;
use game::Game;
use map::{Map, DEFAULT_LEVEL};
use std::path::PathBuf;

mod collision;
mod config;
mod framebuffer;
mod game;
#[cfg(not(feature = "sdl"))]
mod headless;
mod map;
mod minimap;
mod player;
mod ray;
mod scene;
#[cfg(feature = "sdl")]
mod sdl;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("RAYCAST_LOG");
    let mut config = Config::default();
    if let Ok(mode) = std::env::var("RAYCAST_MARCH") {
        config.ray_march = mode.parse()?;
    }
    log::info!("casting rays with {:?}", config.ray_march);

    // optional map path as the only argument
    let map = match std::env::args_os().nth(1) {
        Some(path) => Map::load(&PathBuf::from(path), config.tile_size)?,
        None => {
            log::info!("loading built-in level");
            Map::parse(DEFAULT_LEVEL, config.tile_size)?
        }
    };
    let size = map.world_size();
    log::info!(
        "map is {}x{} tiles ({}x{} units)",
        map.width,
        map.height,
        size.x,
        size.y
    );

    // initialize game
    log::info!("initializing game state");
    let game = Game::new(&config, map);

    #[cfg(feature = "sdl")]
    let result = sdl::run(&config, game);
    #[cfg(not(feature = "sdl"))]
    let result = headless::run(&config, game);

    if let Err(err) = &result {
        log::error!("{err:#}");
    }
    result
}
