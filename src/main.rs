//! Skyraid headless driver.
//!
//! Runs the game simulation without a window: a simple autopilot sways the
//! ship left and right, holds fire and presses fire on the title screen. The
//! frames are handed to a [`HeadlessRenderer`] and sounds go to the audio
//! thread, which only logs them.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 7200 --seed 42
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use skyraid::game::Game;
use skyraid::resources::audio::{setup_audio, shutdown_audio};
use skyraid::resources::gameconfig::GameConfig;
use skyraid::resources::gamestate::Screen;
use skyraid::resources::input::InputIntents;
use skyraid::resources::spritestore::SpriteStore;
use skyraid::systems::render::HeadlessRenderer;

/// Skyraid arcade shooter, headless run
#[derive(Parser)]
#[command(version, about = "Runs the Skyraid simulation headless with an autopilot.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON file with sprite descriptor overrides.
    #[arg(long, value_name = "PATH")]
    sprites: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Milliseconds per frame.
    #[arg(long, default_value_t = 16.667)]
    frame_ms: f32,

    /// Spawn RNG seed, overrides the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    save_config: bool,
}

/// Sway across the playfield and keep shooting.
fn autopilot(game: &Game, frame: u32) -> InputIntents {
    let on_title = game.state.get() == Screen::Title;
    let x = game.player_position().x;
    let going_right = (frame / 120) % 2 == 0;
    InputIntents {
        left: !going_right && x > 0.0,
        right: going_right && x < game.screen.w as f32,
        // tap fire on the title screen, hold it otherwise
        fire: if on_title { frame % 30 == 0 } else { true },
        ..Default::default()
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    // Early-exit: write the config file and quit
    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", config.config_path.display());
        return;
    }

    let mut sprites = SpriteStore::builtin();
    if let Some(path) = &cli.sprites {
        if let Err(e) = sprites.load_json(path) {
            warn!("{}; using built-in sprites", e);
        }
    }

    info!(
        "Skyraid: {}x{} playfield, {} frames of {:.3}ms, seed {}",
        config.render_width, config.render_height, cli.frames, cli.frame_ms, config.seed
    );

    let frames_per_second = (1000.0 / cli.frame_ms.max(0.001)).round().max(1.0) as u32;
    let mut game = Game::new(config, &sprites);
    let mut renderer = HeadlessRenderer::new();
    let mut audio = setup_audio();
    let mut kills = 0;

    for frame in 0..cli.frames {
        let input = autopilot(&game, frame);
        let summary = game.update(cli.frame_ms, &input, &mut audio);
        kills += summary.bullets.kills;
        game.render(&mut renderer);

        if (frame + 1) % frames_per_second == 0 {
            info!(
                "t={}s screen={:?} score={} lives={} enemies={} draw calls={}",
                (frame + 1) / frames_per_second,
                game.state.get(),
                game.score(),
                game.player.lives,
                game.enemy_count(),
                renderer.last_frame.len()
            );
        }
    }

    shutdown_audio(audio);
    info!(
        "Finished: score {} best {} kills {} ({} instances in {} draw calls)",
        game.score(),
        game.state.hiscore,
        kills,
        renderer.total_instances,
        renderer.total_draw_calls
    );
}
