//! Game orchestrator.
//!
//! [`Game`] owns every entity pool, the player, the screen sequences, the
//! spawn RNG and the configuration. The platform layer calls
//! [`Game::update`] once per frame with the elapsed milliseconds and the
//! decoded input, then [`Game::render`] with its backend.
//!
//! Frame outline:
//!
//! 1. derive input edges, react to fire on the title screen
//! 2. advance the active screen sequence and refresh the caption text
//! 3. convert elapsed time into fixed ticks; per tick spawn, fire, move,
//!    resolve collisions and step animations on their cadence
//! 4. apply any screen change requested during the frame

use std::sync::Arc;

use fastrand::Rng;
use glam::Vec2;
use log::{debug, info};
use smallvec::SmallVec;

use crate::components::drawbatch::Drawable;
use crate::components::entitypool::{EntityPool, SpawnOptions};
use crate::components::player::Player;
use crate::components::sprite::SpriteDescriptor;
use crate::events::audio::Sound;
use crate::events::collision::BulletReport;
use crate::resources::audio::AudioSink;
use crate::resources::fontstore::{FONT_CHARSET, FontStore};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, Screen};
use crate::resources::input::InputIntents;
use crate::resources::screensize::ScreenSize;
use crate::resources::spritestore::{
    ENEMY_BULLET, ENEMY_LARGE, ENEMY_MEDIUM, ENEMY_SMALL, EXPLOSION, FONT, PLAYER, PLAYER_BULLET,
    SpriteStore,
};
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::collision::{
    EnemyTarget, bullets_vs_enemies, hazards_vs_player, spawn_explosion,
};
use crate::systems::movement::movement;
use crate::systems::render::{Renderer, render_pass};
use crate::systems::screens::Screens;
use crate::systems::spawner::{SpawnRule, enemy_fire, spawn_enemy};
use crate::systems::time::update_world_time;

pub const SMALL_POINTS: u32 = 10;
pub const MEDIUM_POINTS: u32 = 50;
pub const LARGE_POINTS: u32 = 150;

pub const SMALL_HEALTH: i32 = 1;
pub const MEDIUM_HEALTH: i32 = 3;
pub const LARGE_HEALTH: i32 = 6;

/// Player bullet speed in pixels per tick.
pub const PLAYER_BULLET_SPEED: f32 = 4.0;

/// What happened during one [`Game::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSummary {
    /// Simulation ticks run.
    pub ticks: u32,
    pub bullets: BulletReport,
    /// The player lost a life.
    pub player_hit: bool,
}

/// The whole game state, threaded through every frame.
pub struct Game {
    pub config: GameConfig,
    pub screen: ScreenSize,
    pub time: WorldTime,
    pub state: GameState,
    pub screens: Screens,
    rng: Rng,
    font: FontStore,
    player_sprite: Arc<SpriteDescriptor>,
    pub player: Player,
    pub player_bullets: EntityPool,
    pub enemy_bullets: EntityPool,
    pub small: EntityPool,
    pub medium: EntityPool,
    pub large: EntityPool,
    pub explosions: EntityPool,
    pub text: EntityPool,
    small_rule: SpawnRule,
    medium_rule: SpawnRule,
    large_rule: SpawnRule,
    previous_input: InputIntents,
    started: bool,
}

impl Game {
    /// Build a game on the title screen from `config` and the descriptors in
    /// `sprites`. Missing descriptors fall back to placeholders.
    pub fn new(config: GameConfig, sprites: &SpriteStore) -> Self {
        let (w, h) = config.playfield_size();
        let screen = ScreenSize::new(w as i32, h as i32);
        let pool = |key: &str| {
            EntityPool::new(sprites.get_or_placeholder(key))
                .with_capacity(config.max_entities)
                .with_kill_buffer(config.kill_buffer)
        };
        let player_sprite = sprites.get_or_placeholder(PLAYER);
        let player = Player::new(
            player_sprite.clone(),
            &screen,
            config.lives,
            config.player_speed,
        );

        let mut game = Self {
            screen,
            time: WorldTime::default().with_tick_ms(config.tick_ms),
            state: GameState::new(),
            screens: Screens::new(),
            rng: Rng::with_seed(config.seed),
            font: FontStore::from_charset(FONT_CHARSET),
            player_sprite,
            player,
            player_bullets: pool(PLAYER_BULLET),
            enemy_bullets: pool(ENEMY_BULLET),
            small: pool(ENEMY_SMALL),
            medium: pool(ENEMY_MEDIUM),
            large: pool(ENEMY_LARGE),
            explosions: pool(EXPLOSION),
            text: pool(FONT),
            small_rule: SpawnRule::new(config.spawn_small, SMALL_HEALTH, 0.8, 1.4),
            medium_rule: SpawnRule::new(config.spawn_medium, MEDIUM_HEALTH, 0.5, 0.9),
            large_rule: SpawnRule::new(config.spawn_large, LARGE_HEALTH, 0.3, 0.5),
            previous_input: InputIntents::default(),
            started: false,
            config,
        };
        game.screens.enter(Screen::Title);
        game
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Advance the game by `dt_ms` milliseconds of real time.
    pub fn update(
        &mut self,
        dt_ms: f32,
        intents: &InputIntents,
        audio: &mut impl AudioSink,
    ) -> FrameSummary {
        if !self.started {
            self.started = true;
            self.enter(Screen::Title, audio);
        }

        let input = intents.with_edges_from(&self.previous_input);
        self.previous_input = input;

        let current = self.state.get();
        if current == Screen::Title && input.fire_pressed {
            self.state.request(Screen::Ready);
        }

        let wanted = self.screens.advance(current, dt_ms, self.state.score);
        self.screens.show(&mut self.text, wanted, &self.screen, &self.font);
        if self.screens.is_finished(current) {
            match current {
                Screen::Ready => self.state.request(Screen::Playing),
                Screen::GameOver => self.state.request(Screen::Title),
                Screen::Title | Screen::Playing => {}
            }
        }

        if matches!(current, Screen::Ready | Screen::Playing) && self.player.is_alive() {
            self.player.steer(&input);
        } else {
            self.player.steer(&InputIntents::default());
        }

        let mut summary = FrameSummary::default();
        let ticks = update_world_time(&mut self.time, dt_ms);
        if ticks > 0 {
            self.clear_hit_flashes();
        }
        let first_tick = self.time.tick_count - u64::from(ticks);
        for k in 1..=u64::from(ticks) {
            self.tick(first_tick + k, &input, audio, &mut summary);
        }
        summary.ticks = ticks;

        if let Some(screen) = self.state.apply_pending() {
            self.enter(screen, audio);
        }
        summary
    }

    /// One fixed simulation tick.
    fn tick(
        &mut self,
        tick: u64,
        input: &InputIntents,
        audio: &mut impl AudioSink,
        summary: &mut FrameSummary,
    ) {
        let playing = self.state.get() == Screen::Playing;

        if playing {
            spawn_enemy(&mut self.rng, &mut self.small, &self.small_rule, &self.screen);
            spawn_enemy(&mut self.rng, &mut self.medium, &self.medium_rule, &self.screen);
            spawn_enemy(&mut self.rng, &mut self.large, &self.large_rule, &self.screen);
            let p = self.config.enemy_fire;
            for enemies in [&self.small, &self.medium, &self.large] {
                enemy_fire(&mut self.rng, enemies, &mut self.enemy_bullets, p);
            }

            if input.fire && self.player.try_fire(self.config.fire_cooldown) {
                let shot = self.player_bullets.sprite().panel_size;
                let muzzle = self.player.muzzle(shot);
                self.player_bullets.spawn(
                    SpawnOptions::at(muzzle.x, muzzle.y).with_velocity(0.0, -PLAYER_BULLET_SPEED),
                );
                audio.play(Sound::Shot, false);
            }
        }

        movement(
            &mut [
                &mut self.player_bullets,
                &mut self.enemy_bullets,
                &mut self.small,
                &mut self.medium,
                &mut self.large,
                &mut self.explosions,
            ],
            &mut self.player,
            &self.screen,
        );

        let report = bullets_vs_enemies(
            &mut self.player_bullets,
            &mut [
                EnemyTarget::new(&mut self.small, SMALL_POINTS),
                EnemyTarget::new(&mut self.medium, MEDIUM_POINTS),
                EnemyTarget::new(&mut self.large, LARGE_POINTS),
            ],
            &mut self.explosions,
            self.config.bullet_shrink,
        );
        if report.kills > 0 {
            audio.play(Sound::Explosion, false);
        } else if report.hits > 0 {
            audio.play(Sound::EnemyHit, false);
        }
        self.state.add_score(report.points);
        summary.bullets.merge(report);

        if playing && self.player.is_alive() {
            self.resolve_player_hits(audio, summary);
        }

        animation(
            &mut [
                &mut self.player_bullets,
                &mut self.enemy_bullets,
                &mut self.small,
                &mut self.medium,
                &mut self.large,
                &mut self.explosions,
            ],
            tick,
            self.config.animation_cadence,
        );
    }

    /// Flashes set by any tick of a frame stay visible until the next frame
    /// that simulates.
    fn clear_hit_flashes(&mut self) {
        for pool in [&mut self.small, &mut self.medium, &mut self.large] {
            pool.batch.clear_white_outs();
        }
        self.player.batch.clear_white_outs();
    }

    /// Every hazard pool is checked; hits fold into one damage decision.
    fn resolve_player_hits(&mut self, audio: &mut impl AudioSink, summary: &mut FrameSummary) {
        let player_box = self.player.collision_box();
        let shrink = self.config.player_shrink;
        let mut hit = false;
        for hazards in [
            &mut self.enemy_bullets,
            &mut self.small,
            &mut self.medium,
            &mut self.large,
        ] {
            hit |= hazards_vs_player(hazards, player_box, shrink, Some(&mut self.explosions));
        }
        if !hit || !self.player.damage(self.config.invulnerable_ticks) {
            return;
        }
        summary.player_hit = true;
        audio.play(Sound::PlayerHit, false);
        debug!("Player hit, {} lives left", self.player.lives);

        if !self.player.is_alive() {
            let size = self.player_sprite.panel_size;
            let center = self.player.position() + size * 0.5;
            spawn_explosion(&mut self.explosions, center, size.x * 2.0);
            self.state.request(Screen::GameOver);
        }
    }

    /// Set up a freshly entered screen.
    fn enter(&mut self, screen: Screen, audio: &mut impl AudioSink) {
        match screen {
            Screen::Title => {
                self.reset_run();
                audio.play(Sound::TitleMusic, true);
            }
            Screen::Ready => {
                audio.stop_all();
                self.reset_run();
                info!("Run started");
            }
            Screen::Playing => {}
            Screen::GameOver => {
                audio.play(Sound::GameOver, false);
                info!(
                    "Game over: score {} (best {})",
                    self.state.score, self.state.hiscore
                );
            }
        }
        self.screens.enter(screen);
    }

    /// Clear every gameplay pool and give the player a new ship. The text
    /// pool belongs to [`Screens`].
    fn reset_run(&mut self) {
        for pool in [
            &mut self.player_bullets,
            &mut self.enemy_bullets,
            &mut self.small,
            &mut self.medium,
            &mut self.large,
            &mut self.explosions,
        ] {
            pool.clear();
        }
        self.player = Player::new(
            self.player_sprite.clone(),
            &self.screen,
            self.config.lives,
            self.config.player_speed,
        );
        self.state.reset_score();
    }

    /// Hand every visible batch to `renderer`, back to front. Returns the
    /// number of draw calls.
    pub fn render(&self, renderer: &mut impl Renderer) -> usize {
        let mut drawables: SmallVec<[&dyn Drawable; 8]> = SmallVec::new();
        drawables.push(&self.large);
        drawables.push(&self.medium);
        drawables.push(&self.small);
        drawables.push(&self.enemy_bullets);
        drawables.push(&self.player_bullets);
        if matches!(self.state.get(), Screen::Ready | Screen::Playing) {
            drawables.push(&self.player);
        }
        drawables.push(&self.explosions);
        drawables.push(&self.text);
        render_pass(renderer, &drawables)
    }

    /// Live enemies across all sizes.
    pub fn enemy_count(&self) -> usize {
        self.small.len() + self.medium.len() + self.large.len()
    }

    /// Player position, for drivers that steer automatically.
    pub fn player_position(&self) -> Vec2 {
        self.player.position()
    }
}
