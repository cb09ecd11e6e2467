//! Game state and core simulation types
//!
//! Every entity is a plain record with all of its fields present from
//! construction. The `GameState` aggregate owns all of them.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, Rect};
use super::waves::WaveTable;
use crate::consts::*;

/// RNG stream for gameplay decisions (pickup drops, star placement)
const GAMEPLAY_STREAM: u64 = 0;
/// RNG stream for per-frame cosmetic colors
const COSMETIC_STREAM: u64 = 1;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ship health reached zero; the simulation no longer advances
    GameOver,
}

/// Walk-cycle animation attached to every animated entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Ticks this animation has been advanced
    pub counter: u32,
    /// Current step within the cycle (0..frame_count)
    pub step: u8,
    pub first_frame: u16,
    pub frame_count: u8,
    pub speed: f32,
}

impl Animation {
    pub fn new(first_frame: u16, frame_count: u8, speed: f32) -> Self {
        Self {
            counter: 0,
            step: 0,
            first_frame,
            frame_count: frame_count.max(1),
            speed,
        }
    }

    /// Two-frame walk cycle at the standard speed
    pub fn walk(first_frame: u16) -> Self {
        Self::new(first_frame, ANIM_FRAME_COUNT, ANIM_SPEED)
    }

    /// Advance one tick and return the sprite to draw
    ///
    /// Steps once every `ANIM_CADENCE / speed` ticks. A fractional period only
    /// lands on its multiples, so speed 4 (period 7.5) steps every 15 ticks.
    pub fn advance(&mut self) -> u16 {
        self.counter += 1;
        let period = ANIM_CADENCE / self.speed;
        if period > 0.0 && (self.counter as f32 % period) == 0.0 {
            self.step += 1;
            if self.step >= self.frame_count {
                self.step = 0;
            }
        }
        self.frame()
    }

    /// Sprite for the current step
    pub fn frame(&self) -> u16 {
        self.first_frame + self.step as u16
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub rect: Rect,
    pub health: u32,
    /// Laser charges
    pub laser: u32,
    /// Shield charges
    pub shield: u32,
    /// Bomb charges
    pub bomb: u32,
    pub score: u64,
    pub anim: Animation,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            rect: Rect::from_pos_size(SHIP_SPAWN, SHIP_SIZE),
            health: SHIP_START_HEALTH,
            laser: SHIP_START_CHARGES,
            shield: SHIP_START_CHARGES,
            bomb: SHIP_START_CHARGES,
            score: 0,
            anim: Animation::walk(SHIP_SPRITE),
        }
    }
}

impl Ship {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.rect.pos
    }

    /// Move back to the spawn point (after losing a life)
    pub fn reset_position(&mut self) {
        self.rect.pos = SHIP_SPAWN;
    }
}

/// A player bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
    pub sprite: u16,
}

/// How an enemy moves each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyMotion {
    /// Straight line by its velocity
    Linear,
    /// Unit circle drift layered on its velocity
    Orbit { angle: f32, angular_velocity: f32 },
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
    pub motion: EnemyMotion,
    pub health: u32,
    pub anim: Animation,
}

impl Enemy {
    /// Integrate position for one tick
    pub fn step(&mut self) {
        match &mut self.motion {
            EnemyMotion::Linear => {
                self.rect.pos += self.vel;
            }
            EnemyMotion::Orbit {
                angle,
                angular_velocity,
            } => {
                self.rect.pos += Vec2::new(angle.cos(), angle.sin()) + self.vel;
                *angle += *angular_velocity;
            }
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Laser,
    Shield,
    Bomb,
    Health,
}

impl PickupKind {
    pub const ALL: [PickupKind; 4] = [
        PickupKind::Laser,
        PickupKind::Shield,
        PickupKind::Bomb,
        PickupKind::Health,
    ];

    /// Sprite used both for the falling pickup and its HUD icon
    pub fn sprite(&self) -> u16 {
        match self {
            PickupKind::Laser => 32,
            PickupKind::Shield => 33,
            PickupKind::Bomb => 34,
            PickupKind::Health => 35,
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub rect: Rect,
    pub kind: PickupKind,
}

/// An expanding explosion outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionRing {
    pub center: Vec2,
    pub radius: f32,
    pub thickness: f32,
    pub color: u8,
}

/// A background star streak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
}

/// Expanding bomb ring; destroys every enemy it touches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BombEffect {
    pub circle: Circle,
    pub thickness: f32,
    pub color: u8,
}

/// Vertical laser beam from the ship to the top of the screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaserEffect {
    pub rect: Rect,
    pub remaining_ticks: u32,
}

impl LaserEffect {
    /// Beam rectangle for the ship's current position
    pub fn beam_for(ship: &Ship) -> Rect {
        let pos = ship.pos();
        Rect::new(pos.x - 1.0, 0.0, LASER_WIDTH, (pos.y - 3.0).max(0.0))
    }
}

/// Ring drawn around the ship (visual only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldEffect {
    pub radius: f32,
    pub thickness: f32,
    pub remaining_ticks: u32,
}

/// Active power-up effects, at most one of each
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub bomb: Option<BombEffect>,
    pub laser: Option<LaserEffect>,
    pub shield: Option<ShieldEffect>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG
    pub rng: Pcg32,
    /// Cosmetic RNG (colors only, never affects gameplay)
    pub fx_rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Screen dimensions in pixels
    pub screen: Vec2,
    /// Attack wave timetable
    pub waves: WaveTable,
    pub ship: Ship,
    /// Live bullets (in firing order)
    pub bullets: Vec<Bullet>,
    /// Live enemies (in spawn order)
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub explosions: Vec<ExplosionRing>,
    pub stars: Vec<Star>,
    pub effects: ActiveEffects,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with the standard wave table on the default screen
    pub fn new(seed: u64) -> Self {
        Self::with_config(
            seed,
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            WaveTable::standard(),
        )
    }

    pub fn with_config(seed: u64, screen: Vec2, waves: WaveTable) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::new(seed, GAMEPLAY_STREAM),
            fx_rng: Pcg32::new(seed, COSMETIC_STREAM),
            time_ticks: 0,
            phase: GamePhase::Playing,
            screen,
            waves,
            ship: Ship::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            pickups: Vec::new(),
            explosions: Vec::new(),
            stars: Vec::with_capacity(STAR_COUNT),
            effects: ActiveEffects::default(),
            next_id: 1,
        };

        state.spawn_stars();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.reserve_ids(1)
    }

    /// Allocate `count` consecutive IDs, returning the first
    pub fn reserve_ids(&mut self, count: u32) -> u32 {
        let first = self.next_id;
        self.next_id = self.next_id.saturating_add(count);
        first
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.screen.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.screen.y
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Scatter the background stars at whole-pixel positions
    fn spawn_stars(&mut self) {
        let max_x = self.width().max(1.0) as u32;
        let max_y = self.height().max(1.0) as u32;
        for _ in 0..STAR_COUNT {
            let x = self.rng.random_range(1..=max_x) as f32;
            let y = self.rng.random_range(1..=max_y) as f32;
            self.stars.push(Star {
                pos: Vec2::new(x, y),
                speed: STAR_SPEED,
            });
        }
    }

    /// Random palette index for flashing effects (never the background)
    pub fn random_color(&mut self) -> u8 {
        self.fx_rng.random_range(1..16)
    }

    /// Random dim color for star streaks
    pub fn random_star_color(&mut self) -> u8 {
        self.fx_rng.random_range(0..STAR_COLORS)
    }

    /// Fire a bullet from the ship's current position
    pub fn fire(&mut self) {
        let id = self.next_entity_id();
        let pos = self.ship.pos() - Vec2::new(0.0, BULLET_SPAWN_OFFSET_Y);
        self.bullets.push(Bullet {
            id,
            rect: Rect::from_pos_size(pos, BULLET_SIZE),
            vel: BULLET_VELOCITY,
            sprite: BULLET_SPRITE,
        });
    }

    /// Spend a bomb charge; replaces any bomb already expanding
    pub fn trigger_bomb(&mut self) -> bool {
        if !spend_charge(&mut self.ship.bomb) {
            return false;
        }
        let color = self.random_color();
        self.effects.bomb = Some(BombEffect {
            circle: Circle::new(self.ship.pos(), BOMB_START_RADIUS),
            thickness: BOMB_THICKNESS,
            color,
        });
        log::debug!("Bomb triggered at {:?}, {} left", self.ship.pos(), self.ship.bomb);
        true
    }

    /// Spend a laser charge; restarts the beam if one is already firing
    pub fn trigger_laser(&mut self) -> bool {
        if !spend_charge(&mut self.ship.laser) {
            return false;
        }
        self.effects.laser = Some(LaserEffect {
            rect: LaserEffect::beam_for(&self.ship),
            remaining_ticks: LASER_DURATION_TICKS,
        });
        log::debug!("Laser triggered, {} left", self.ship.laser);
        true
    }

    /// Spend a shield charge; restarts the shield if one is already up
    pub fn trigger_shield(&mut self) -> bool {
        if !spend_charge(&mut self.ship.shield) {
            return false;
        }
        self.effects.shield = Some(ShieldEffect {
            radius: SHIELD_RADIUS,
            thickness: SHIELD_THICKNESS,
            remaining_ticks: SHIELD_DURATION_TICKS,
        });
        log::debug!("Shield triggered, {} left", self.ship.shield);
        true
    }

    /// Queue `rings` concentric explosion rings at `center`
    pub fn spawn_explosion(&mut self, center: Vec2, rings: u32) {
        for n in 0..rings {
            let color = self.random_color();
            self.explosions.push(ExplosionRing {
                center,
                radius: n as f32 * EXPLOSION_RING_SPACING,
                thickness: EXPLOSION_THICKNESS,
                color,
            });
        }
    }

    /// Score an enemy kill
    pub fn award_kill(&mut self) {
        self.ship.score += KILL_SCORE;
    }

    /// Roll the drop chance for a bullet kill at `at`
    pub fn roll_pickup_drop(&mut self, at: Vec2) -> Option<PickupKind> {
        if self.rng.random_range(0..PICKUP_DROP_ODDS) != 0 {
            return None;
        }
        let kind = PickupKind::ALL[self.rng.random_range(0..PickupKind::ALL.len())];
        let id = self.next_entity_id();
        self.pickups.push(Pickup {
            id,
            rect: Rect::from_pos_size(at, PICKUP_SIZE),
            kind,
        });
        log::debug!("Dropped {:?} pickup at {:?}", kind, at);
        Some(kind)
    }

    /// Credit a collected pickup to the ship
    pub fn collect_pickup(&mut self, kind: PickupKind) {
        let counter = match kind {
            PickupKind::Laser => &mut self.ship.laser,
            PickupKind::Shield => &mut self.ship.shield,
            PickupKind::Bomb => &mut self.ship.bomb,
            PickupKind::Health => &mut self.ship.health,
        };
        *counter = counter.saturating_add(1);
        log::debug!("Collected {:?} pickup", kind);
    }

    /// The ship collided with an enemy
    pub fn player_hit(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.ship.health = self.ship.health.saturating_sub(1);
        if self.ship.health > 0 {
            self.ship.reset_position();
        } else {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over at tick {} with score {}",
                self.time_ticks,
                self.ship.score
            );
        }
    }
}

/// Decrement a charge counter if it is nonzero
fn spend_charge(counter: &mut u32) -> bool {
    if *counter == 0 {
        return false;
    }
    *counter -= 1;
    true
}
