//! Heads-up display
//!
//! Drawn last each tick so it sits on top of the playfield.

use glam::Vec2;

use crate::consts::*;
use crate::renderer::Presentation;
use crate::sim::{GameState, PickupKind};

/// Charge rows in the bottom-left corner: kind and offset from the bottom edge
const CHARGE_ROWS: [(PickupKind, f32); 3] = [
    (PickupKind::Laser, 30.0),
    (PickupKind::Shield, 20.0),
    (PickupKind::Bomb, 10.0),
];

/// Draw lives, special charges and score
pub fn draw_hud<P: Presentation + ?Sized>(state: &GameState, out: &mut P) {
    let ship = &state.ship;

    for slot in 1..=LIFE_SLOTS {
        let sprite = if ship.health >= slot {
            LIFE_FULL_SPRITE
        } else {
            LIFE_EMPTY_SPRITE
        };
        out.spr(sprite, Vec2::new(200.0 + slot as f32 * 10.0, 10.0));
    }

    let bottom = state.height();
    for (kind, offset) in CHARGE_ROWS {
        let count = match kind {
            PickupKind::Laser => ship.laser,
            PickupKind::Shield => ship.shield,
            PickupKind::Bomb => ship.bomb,
            PickupKind::Health => ship.health,
        };
        out.spr(kind.sprite(), Vec2::new(10.0, bottom - offset));
        out.print(
            &format!("x{count}"),
            Vec2::new(16.0, bottom - offset - 3.0),
            TEXT_COLOR,
        );
    }

    out.print(
        &format!("Score: {}", ship.score),
        Vec2::new(5.0, 5.0),
        TEXT_COLOR,
    );
}
