//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 640
//! height = 360
//!
//! [simulation]
//! tick_ms = 8.333
//! animation_cadence = 20
//! max_entities = 256
//! seed = 24301
//!
//! [collision]
//! bullet_shrink = 0.7
//! player_shrink = 0.8
//! kill_buffer = 16
//!
//! [spawn]
//! small = 0.01
//! medium = 0.004
//! large = 0.0015
//! enemy_fire = 0.002
//!
//! [player]
//! lives = 3
//! speed = 2.0
//! fire_cooldown = 12
//! invulnerable_ticks = 120
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::boxcollider::{BULLET_SHRINK, PLAYER_SHRINK};
use crate::components::entitypool::MAX_ENTITIES;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 640;
const DEFAULT_RENDER_HEIGHT: u32 = 360;
const DEFAULT_TICK_MS: f32 = 1000.0 / 120.0;
const DEFAULT_ANIMATION_CADENCE: u32 = 20;
const DEFAULT_SEED: u64 = 0x5eed;
const DEFAULT_KILL_BUFFER: f32 = 16.0;
const DEFAULT_SPAWN_SMALL: f32 = 0.01;
const DEFAULT_SPAWN_MEDIUM: f32 = 0.004;
const DEFAULT_SPAWN_LARGE: f32 = 0.0015;
const DEFAULT_ENEMY_FIRE: f32 = 0.002;
const DEFAULT_LIVES: u32 = 3;
const DEFAULT_PLAYER_SPEED: f32 = 2.0;
const DEFAULT_FIRE_COOLDOWN: u32 = 12;
const DEFAULT_INVULNERABLE_TICKS: u32 = 120;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Playfield width in pixels.
    pub render_width: u32,
    /// Playfield height in pixels.
    pub render_height: u32,
    /// Milliseconds per simulation tick.
    pub tick_ms: f32,
    /// Simulation ticks between two animation steps.
    pub animation_cadence: u32,
    /// Capacity of every entity pool, at most [`MAX_ENTITIES`].
    pub max_entities: usize,
    /// Seed for the spawn RNG.
    pub seed: u64,
    pub bullet_shrink: f32,
    pub player_shrink: f32,
    /// Off-screen margin before an entity is culled.
    pub kill_buffer: f32,
    /// Per-tick spawn probability of each enemy size.
    pub spawn_small: f32,
    pub spawn_medium: f32,
    pub spawn_large: f32,
    /// Per-enemy, per-tick probability of firing.
    pub enemy_fire: f32,
    pub lives: u32,
    /// Player speed in pixels per tick.
    pub player_speed: f32,
    /// Ticks between two player shots.
    pub fire_cooldown: u32,
    /// Ticks of invulnerability after the player is hit.
    pub invulnerable_ticks: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            tick_ms: DEFAULT_TICK_MS,
            animation_cadence: DEFAULT_ANIMATION_CADENCE,
            max_entities: MAX_ENTITIES,
            seed: DEFAULT_SEED,
            bullet_shrink: BULLET_SHRINK,
            player_shrink: PLAYER_SHRINK,
            kill_buffer: DEFAULT_KILL_BUFFER,
            spawn_small: DEFAULT_SPAWN_SMALL,
            spawn_medium: DEFAULT_SPAWN_MEDIUM,
            spawn_large: DEFAULT_SPAWN_LARGE,
            enemy_fire: DEFAULT_ENEMY_FIRE,
            lives: DEFAULT_LIVES,
            player_speed: DEFAULT_PLAYER_SPEED,
            fire_cooldown: DEFAULT_FIRE_COOLDOWN,
            invulnerable_ticks: DEFAULT_INVULNERABLE_TICKS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} playfield, tick={:.3}ms, cadence={}, max_entities={}, seed={}",
            self.render_width,
            self.render_height,
            self.tick_ms,
            self.animation_cadence,
            self.max_entities,
            self.seed
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };

        // [render] section
        if let Some(width) = uint("render", "width") {
            self.render_width = width as u32;
        }
        if let Some(height) = uint("render", "height") {
            self.render_height = height as u32;
        }

        // [simulation] section
        if let Some(tick_ms) = float("simulation", "tick_ms").filter(|v| *v > 0.0) {
            self.tick_ms = tick_ms;
        }
        if let Some(cadence) = uint("simulation", "animation_cadence").filter(|v| *v > 0) {
            self.animation_cadence = cadence as u32;
        }
        if let Some(max) = uint("simulation", "max_entities") {
            self.max_entities = (max as usize).min(MAX_ENTITIES);
        }
        if let Some(seed) = uint("simulation", "seed") {
            self.seed = seed;
        }

        // [collision] section
        if let Some(shrink) = float("collision", "bullet_shrink") {
            self.bullet_shrink = shrink.clamp(0.0, 1.0);
        }
        if let Some(shrink) = float("collision", "player_shrink") {
            self.player_shrink = shrink.clamp(0.0, 1.0);
        }
        if let Some(buffer) = float("collision", "kill_buffer") {
            self.kill_buffer = buffer.max(0.0);
        }

        // [spawn] section
        if let Some(p) = float("spawn", "small") {
            self.spawn_small = p.clamp(0.0, 1.0);
        }
        if let Some(p) = float("spawn", "medium") {
            self.spawn_medium = p.clamp(0.0, 1.0);
        }
        if let Some(p) = float("spawn", "large") {
            self.spawn_large = p.clamp(0.0, 1.0);
        }
        if let Some(p) = float("spawn", "enemy_fire") {
            self.enemy_fire = p.clamp(0.0, 1.0);
        }

        // [player] section
        if let Some(lives) = uint("player", "lives") {
            self.lives = lives as u32;
        }
        if let Some(speed) = float("player", "speed") {
            self.player_speed = speed;
        }
        if let Some(cooldown) = uint("player", "fire_cooldown") {
            self.fire_cooldown = cooldown as u32;
        }
        if let Some(ticks) = uint("player", "invulnerable_ticks") {
            self.invulnerable_ticks = ticks as u32;
        }
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();

        // [render] section
        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));

        // [simulation] section
        config.set("simulation", "tick_ms", Some(self.tick_ms.to_string()));
        config.set(
            "simulation",
            "animation_cadence",
            Some(self.animation_cadence.to_string()),
        );
        config.set(
            "simulation",
            "max_entities",
            Some(self.max_entities.to_string()),
        );
        config.set("simulation", "seed", Some(self.seed.to_string()));

        // [collision] section
        config.set(
            "collision",
            "bullet_shrink",
            Some(self.bullet_shrink.to_string()),
        );
        config.set(
            "collision",
            "player_shrink",
            Some(self.player_shrink.to_string()),
        );
        config.set("collision", "kill_buffer", Some(self.kill_buffer.to_string()));

        // [spawn] section
        config.set("spawn", "small", Some(self.spawn_small.to_string()));
        config.set("spawn", "medium", Some(self.spawn_medium.to_string()));
        config.set("spawn", "large", Some(self.spawn_large.to_string()));
        config.set("spawn", "enemy_fire", Some(self.enemy_fire.to_string()));

        // [player] section
        config.set("player", "lives", Some(self.lives.to_string()));
        config.set("player", "speed", Some(self.player_speed.to_string()));
        config.set(
            "player",
            "fire_cooldown",
            Some(self.fire_cooldown.to_string()),
        );
        config.set(
            "player",
            "invulnerable_ticks",
            Some(self.invulnerable_ticks.to_string()),
        );
        config
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Render configuration as INI text.
    pub fn to_ini_string(&self) -> String {
        self.to_ini().writes()
    }

    /// Get the playfield size.
    pub fn playfield_size(&self) -> (u32, u32) {
        (self.render_width, self.render_height)
    }
}
