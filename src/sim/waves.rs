//! Attack wave timetable
//!
//! A wave fires on exactly the tick it names, once. There is no catch-up: a
//! skipped tick means the wave never spawns.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::collision::Rect;
use super::state::{Animation, Enemy, EnemyMotion};
use crate::consts::{ENEMY_SPACING, ENEMY_SPAWN_Y, MAX_WAVE_COUNT};

/// Angular velocity meaning "no angular motion"
pub const NO_ANGULAR_MOTION: f32 = -1.0;

/// Blueprint every enemy in a wave is cloned from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub sprite: u16,
    pub health: u32,
    /// Base x; clone `i` spawns at `x + i * ENEMY_SPACING`
    pub x: f32,
    pub w: f32,
    pub h: f32,
    pub dx: f32,
    pub dy: f32,
    /// Radians per tick, or `NO_ANGULAR_MOTION` for a straight path
    pub angular_velocity: f32,
}

impl EnemyTemplate {
    pub fn motion(&self) -> EnemyMotion {
        if self.angular_velocity == NO_ANGULAR_MOTION {
            EnemyMotion::Linear
        } else {
            EnemyMotion::Orbit {
                angle: 0.0,
                angular_velocity: self.angular_velocity,
            }
        }
    }

    /// Build the `index`-th (1-based) clone of this template
    pub fn spawn(&self, id: u32, index: u32) -> Enemy {
        let x = self.x + index as f32 * ENEMY_SPACING;
        Enemy {
            id,
            rect: Rect::new(x, ENEMY_SPAWN_Y, self.w, self.h),
            vel: Vec2::new(self.dx, self.dy),
            motion: self.motion(),
            health: self.health,
            anim: Animation::walk(self.sprite),
        }
    }
}

/// One scheduled spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveEntry {
    pub trigger_tick: u64,
    pub count: u32,
    pub template: EnemyTemplate,
}

impl WaveEntry {
    /// Why this wave cannot be spawned, if anything
    pub fn problem(&self) -> Option<&'static str> {
        let t = &self.template;
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if self.count > MAX_WAVE_COUNT {
            Some("too many enemies")
        } else if t.health == 0 {
            Some("enemy health must be at least 1")
        } else if !positive(t.w) || !positive(t.h) {
            Some("enemy size must be positive")
        } else if ![t.x, t.dx, t.dy, t.angular_velocity].iter().all(|v| v.is_finite()) {
            Some("non-finite motion")
        } else {
            None
        }
    }

    /// Enemies this wave spawns, given the first free entity id
    pub fn spawn_all(&self, first_id: u32) -> Vec<Enemy> {
        (1..=self.count)
            .map(|i| self.template.spawn(first_id.saturating_add(i - 1), i))
            .collect()
    }
}

/// Ordered wave table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveTable {
    entries: Vec<WaveEntry>,
}

impl WaveTable {
    pub fn new(entries: Vec<WaveEntry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The shipped attack pattern
    pub fn standard() -> Self {
        let drone = |x: f32, dx: f32, dy: f32, angular_velocity: f32| EnemyTemplate {
            sprite: 16,
            health: 1,
            x,
            w: 8.0,
            h: 8.0,
            dx,
            dy,
            angular_velocity,
        };

        Self::new(vec![
            WaveEntry {
                trigger_tick: 100,
                count: 10,
                template: drone(80.0, 0.0, 0.2, PI / 50.0),
            },
            WaveEntry {
                trigger_tick: 100,
                count: 1,
                template: EnemyTemplate {
                    sprite: 18,
                    health: 10,
                    x: 80.0,
                    w: 8.0,
                    h: 8.0,
                    dx: 0.0,
                    dy: 0.05,
                    angular_velocity: PI / 30.0,
                },
            },
            WaveEntry {
                trigger_tick: 400,
                count: 4,
                template: drone(40.0, 0.0, 0.5, NO_ANGULAR_MOTION),
            },
            WaveEntry {
                trigger_tick: 800,
                count: 2,
                template: drone(80.0, 0.0, 0.5, NO_ANGULAR_MOTION),
            },
            WaveEntry {
                trigger_tick: 1200,
                count: 3,
                template: drone(20.0, 0.5, 0.5, NO_ANGULAR_MOTION),
            },
            WaveEntry {
                trigger_tick: 1400,
                count: 4,
                template: drone(180.0, -0.5, 0.5, NO_ANGULAR_MOTION),
            },
        ])
    }

    /// Waves that fire on exactly `tick`
    pub fn due(&self, tick: u64) -> impl Iterator<Item = &WaveEntry> {
        self.entries.iter().filter(move |w| w.trigger_tick == tick)
    }

    pub fn entries(&self) -> &[WaveEntry] {
        &self.entries
    }

    /// Tick of the final scheduled wave
    pub fn last_trigger(&self) -> Option<u64> {
        self.entries.iter().map(|w| w.trigger_tick).max()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First unusable entry, as `(index, reason)`
    pub fn first_problem(&self) -> Option<(usize, &'static str)> {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(index, wave)| wave.problem().map(|reason| (index, reason)))
    }
}
