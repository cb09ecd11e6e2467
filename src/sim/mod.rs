//! Fixed-step simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per frame, no variable timestep
//! - Seeded RNG only (separate gameplay and cosmetic streams)
//! - Stable iteration order (spawn order)
//! - Draws only through the `Presentation` port

pub mod collision;
pub mod state;
pub mod tick;
pub mod waves;

pub use collision::{Circle, Rect, circle_intersects_rect, rect_intersects_rect};
pub use state::{
    ActiveEffects, Animation, BombEffect, Bullet, Enemy, EnemyMotion, ExplosionRing, GamePhase,
    GameState, LaserEffect, Pickup, PickupKind, ShieldEffect, Ship, Star,
};
pub use tick::tick;
pub use waves::{EnemyTemplate, NO_ANGULAR_MOTION, WaveEntry, WaveTable};
