//! Fantasy Shooter - a top-down arcade shooter core
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (waves, movement, collisions, effects)
//! - `renderer`: Presentation port the simulation draws through
//! - `platform`: Input port and edge detection
//! - `palette`: 16-color palette resolved from a hex string
//! - `ui`: HUD drawn on top of each frame
//! - `settings`: Startup configuration (errors in `error`)
//! - `driver`: Fixed-step loop driver

pub mod driver;
pub mod error;
pub mod palette;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use driver::Driver;
pub use error::{ConfigError, PaletteError};
pub use palette::Palette;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default screen dimensions (fantasy console resolution)
    pub const SCREEN_WIDTH: f32 = 240.0;
    pub const SCREEN_HEIGHT: f32 = 136.0;

    /// Palette index used to clear the screen each frame
    pub const BACKGROUND_COLOR: u8 = 0;
    /// Palette index for HUD text
    pub const TEXT_COLOR: u8 = 10;

    /// Ship defaults
    pub const SHIP_SPAWN: Vec2 = Vec2::new(100.0, 120.0);
    pub const SHIP_SIZE: Vec2 = Vec2::new(8.0, 8.0);
    pub const SHIP_START_HEALTH: u32 = 3;
    pub const SHIP_START_CHARGES: u32 = 1;
    /// Per-tick movement while a direction is held
    pub const SHIP_STEP_X: f32 = 2.0;
    pub const SHIP_STEP_Y: f32 = 1.0;
    pub const SHIP_SPRITE: u16 = 0;

    /// Bullets
    pub const BULLET_SIZE: Vec2 = Vec2::new(8.0, 8.0);
    pub const BULLET_VELOCITY: Vec2 = Vec2::new(0.0, -3.0);
    pub const BULLET_SPAWN_OFFSET_Y: f32 = 2.0;
    pub const BULLET_SPRITE: u16 = 2;

    /// Enemies spawn above the viewport, spaced along x
    pub const ENEMY_SPAWN_Y: f32 = -10.0;
    pub const ENEMY_SPACING: f32 = 20.0;
    /// Largest enemy count a single configured wave may spawn
    pub const MAX_WAVE_COUNT: u32 = 64;
    /// Score per destroyed enemy
    pub const KILL_SCORE: u64 = 10;

    /// Pickups: one in `PICKUP_DROP_ODDS` bullet kills drops one
    pub const PICKUP_DROP_ODDS: u32 = 10;
    pub const PICKUP_SIZE: Vec2 = Vec2::new(8.0, 8.0);
    pub const PICKUP_FALL_SPEED: f32 = 1.0;

    /// Explosion rings
    pub const EXPLOSION_MAX_RADIUS: f32 = 30.0;
    pub const EXPLOSION_RING_SPACING: f32 = 4.0;
    pub const EXPLOSION_THICKNESS: f32 = 1.0;
    pub const HIT_RINGS: u32 = 1;
    pub const KILL_RINGS: u32 = 3;

    /// Bomb ring
    pub const BOMB_START_RADIUS: f32 = 4.0;
    pub const BOMB_GROWTH: f32 = 2.0;
    pub const BOMB_MAX_RADIUS: f32 = 200.0;
    pub const BOMB_THICKNESS: f32 = 1.0;

    /// Laser beam
    pub const LASER_DURATION_TICKS: u32 = 100;
    pub const LASER_WIDTH: f32 = 2.0;

    /// Shield ring
    pub const SHIELD_DURATION_TICKS: u32 = 100;
    pub const SHIELD_RADIUS: f32 = 8.0;
    pub const SHIELD_THICKNESS: f32 = 2.0;

    /// Background starfield
    pub const STAR_COUNT: usize = 10;
    pub const STAR_SPEED: f32 = 2.0;
    pub const STAR_STREAK_LENGTH: f32 = 4.0;
    /// Stars pick a color from `0..STAR_COLORS` every frame
    pub const STAR_COLORS: u8 = 10;

    /// Walk-cycle animation: one step every `ANIM_CADENCE / speed` ticks
    pub const ANIM_CADENCE: f32 = 30.0;
    pub const ANIM_FRAME_COUNT: u8 = 2;
    pub const ANIM_SPEED: f32 = 4.0;

    /// Number of life slots on the HUD
    pub const LIFE_SLOTS: u32 = 3;
    pub const LIFE_FULL_SPRITE: u16 = 3;
    pub const LIFE_EMPTY_SPRITE: u16 = 4;
}
