//! Fixed timestep simulation tick
//!
//! One call advances the world exactly one frame. Passes run in a fixed
//! order and each entity collection is walked in spawn order, so a seed plus
//! an input sequence always replays the same game.

use glam::Vec2;

use super::collision::{circle_intersects_rect, rect_intersects_rect};
use super::state::{GameState, LaserEffect};
use super::waves::WaveEntry;
use crate::consts::*;
use crate::platform::{Button, InputPort};
use crate::renderer::Presentation;
use crate::ui;

/// Advance the game by one tick, drawing the frame into `out`
///
/// Does nothing once the game is over.
pub fn tick<I, P>(state: &mut GameState, input: &I, out: &mut P)
where
    I: InputPort + ?Sized,
    P: Presentation + ?Sized,
{
    if state.is_game_over() {
        return;
    }

    state.time_ticks += 1;
    out.cls(BACKGROUND_COLOR);

    handle_input(state, input);
    spawn_due_waves(state);

    update_stars(state, out);
    update_ship(state, out);
    update_bullets(state, out);
    update_enemies(state, out);
    update_explosions(state, out);
    update_pickups(state, out);
    update_bomb(state, out);
    update_laser(state, out);
    update_shield(state, out);

    ui::draw_hud(state, out);
}

fn handle_input<I: InputPort + ?Sized>(state: &mut GameState, input: &I) {
    let pos = &mut state.ship.rect.pos;
    if input.is_held(Button::Up) {
        pos.y -= SHIP_STEP_Y;
    }
    if input.is_held(Button::Down) {
        pos.y += SHIP_STEP_Y;
    }
    if input.is_held(Button::Left) {
        pos.x -= SHIP_STEP_X;
    }
    if input.is_held(Button::Right) {
        pos.x += SHIP_STEP_X;
    }

    if input.is_just_pressed(Button::Bomb) {
        state.trigger_bomb();
    }
    if input.is_just_pressed(Button::Laser) {
        state.trigger_laser();
    }
    if input.is_just_pressed(Button::Shield) {
        state.trigger_shield();
    }
    if input.is_just_pressed(Button::Fire) {
        state.fire();
    }
}

fn spawn_due_waves(state: &mut GameState) {
    let due: Vec<WaveEntry> = state.waves.due(state.time_ticks).cloned().collect();
    for wave in &due {
        let first_id = state.reserve_ids(wave.count);
        state.enemies.extend(wave.spawn_all(first_id));
        log::info!(
            "Wave of {} (sprite {}) spawned at tick {}",
            wave.count,
            wave.template.sprite,
            state.time_ticks
        );
    }
}

fn update_stars<P: Presentation + ?Sized>(state: &mut GameState, out: &mut P) {
    let height = state.height();
    for i in 0..state.stars.len() {
        let color = state.random_star_color();
        let star = &mut state.stars[i];
        star.pos.y += star.speed;
        out.line(
            star.pos,
            star.pos + Vec2::new(0.0, STAR_STREAK_LENGTH),
            1.0,
            color,
        );
        if star.pos.y > height {
            star.pos.y = 0.0;
        }
    }
}

fn update_ship<P: Presentation + ?Sized>(state: &mut GameState, out: &mut P) {
    let frame = state.ship.anim.advance();
    out.spr(frame, state.ship.pos());
}

/// Move bullets and resolve bullet-enemy hits
///
/// A bullet is spent on the first enemy it overlaps.
fn update_bullets<P: Presentation + ?Sized>(state: &mut GameState, out: &mut P) {
    let mut bullets = std::mem::take(&mut state.bullets);
    bullets.retain_mut(|bullet| {
        if bullet.rect.pos.y < 0.0 {
            return false;
        }
        bullet.rect.pos += bullet.vel;
        out.spr(bullet.sprite, bullet.rect.pos);

        let Some(index) = state
            .enemies
            .iter()
            .position(|e| rect_intersects_rect(&bullet.rect, &e.rect))
        else {
            return true;
        };

        let enemy = &mut state.enemies[index];
        enemy.health = enemy.health.saturating_sub(1);
        let at = enemy.rect.pos;
        let destroyed = enemy.health == 0;

        state.spawn_explosion(at, HIT_RINGS);
        if destroyed {
            state.award_kill();
            state.roll_pickup_drop(at);
            state.spawn_explosion(at, KILL_RINGS);
            state.enemies.remove(index);
        }
        false
    });
    state.bullets = bullets;
}

/// Move enemies and resolve bomb, laser and ship collisions, in that order
fn update_enemies<P: Presentation + ?Sized>(state: &mut GameState, out: &mut P) {
    let height = state.height();
    let mut enemies = std::mem::take(&mut state.enemies);
    enemies.retain_mut(|enemy| {
        // Off the bottom: gone, unscored
        if enemy.rect.pos.y > height {
            return false;
        }
        enemy.step();
        let frame = enemy.anim.advance();
        out.spr(frame, enemy.rect.pos);

        let bombed = state
            .effects
            .bomb
            .is_some_and(|b| circle_intersects_rect(&b.circle, &enemy.rect));
        let lasered = !bombed
            && state
                .effects
                .laser
                .is_some_and(|l| rect_intersects_rect(&enemy.rect, &l.rect));
        let rammed =
            !bombed && !lasered && rect_intersects_rect(&enemy.rect, &state.ship.rect);

        if !(bombed || lasered || rammed) {
            return true;
        }

        state.award_kill();
        if rammed {
            state.player_hit();
        }
        state.spawn_explosion(enemy.rect.pos, KILL_RINGS);
        false
    });
    state.enemies = enemies;
}

fn update_explosions<P: Presentation + ?Sized>(state: &mut GameState, out: &mut P) {
    let mut rings = std::mem::take(&mut state.explosions);
    rings.retain_mut(|ring| {
        ring.color = state.random_color();
        out.circb(ring.center, ring.radius, ring.thickness, ring.color);
        ring.radius += 1.0;
        ring.radius < EXPLOSION_MAX_RADIUS
    });
    state.explosions = rings;
}

fn update_pickups<P: Presentation + ?Sized>(state: &mut GameState, out: &mut P) {
    let height = state.height();
    let mut pickups = std::mem::take(&mut state.pickups);
    pickups.retain_mut(|pickup| {
        pickup.rect.pos.y += PICKUP_FALL_SPEED;
        out.spr(pickup.kind.sprite(), pickup.rect.pos);

        if pickup.rect.pos.y > height {
            return false;
        }
        if rect_intersects_rect(&pickup.rect, &state.ship.rect) {
            state.collect_pickup(pickup.kind);
            return false;
        }
        true
    });
    state.pickups = pickups;
}

fn update_bomb<P: Presentation + ?Sized>(state: &mut GameState, out: &mut P) {
    let Some(mut bomb) = state.effects.bomb else {
        return;
    };
    bomb.color = state.random_color();
    out.circb(
        bomb.circle.center,
        bomb.circle.radius,
        bomb.thickness,
        bomb.color,
    );
    bomb.circle.radius += BOMB_GROWTH;

    if bomb.circle.radius < BOMB_MAX_RADIUS {
        state.effects.bomb = Some(bomb);
    } else {
        state.effects.bomb = None;
        log::debug!("Bomb expired at tick {}", state.time_ticks);
    }
}

fn update_laser<P: Presentation + ?Sized>(state: &mut GameState, out: &mut P) {
    let Some(mut laser) = state.effects.laser else {
        return;
    };
    laser.remaining_ticks = laser.remaining_ticks.saturating_sub(1);
    laser.rect = LaserEffect::beam_for(&state.ship);

    if laser.remaining_ticks > 0 {
        let color = state.random_color();
        out.rect(laser.rect, color);
        state.effects.laser = Some(laser);
    } else {
        state.effects.laser = None;
        log::debug!("Laser expired at tick {}", state.time_ticks);
    }
}

/// The shield ring is drawn around the ship; it does not block collisions
fn update_shield<P: Presentation + ?Sized>(state: &mut GameState, out: &mut P) {
    let Some(mut shield) = state.effects.shield else {
        return;
    };
    shield.remaining_ticks = shield.remaining_ticks.saturating_sub(1);

    if shield.remaining_ticks > 0 {
        let color = state.random_color();
        out.circb(state.ship.pos(), shield.radius, shield.thickness, color);
        state.effects.shield = Some(shield);
    } else {
        state.effects.shield = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use crate::platform::InputSnapshot;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::sim::collision::Rect;
    use crate::sim::state::{Animation, Enemy, EnemyMotion, GamePhase, Pickup, PickupKind};
    use crate::sim::waves::WaveTable;

    fn quiet_state(seed: u64) -> GameState {
        GameState::with_config(
            seed,
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            WaveTable::empty(),
        )
    }

    fn screen() -> DrawList {
        DrawList::new(Palette::default())
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::new()
    }

    fn place_enemy(state: &mut GameState, x: f32, y: f32, health: u32) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            rect: Rect::new(x, y, 8.0, 8.0),
            vel: Vec2::ZERO,
            motion: EnemyMotion::Linear,
            health,
            anim: Animation::walk(16),
        });
        id
    }

    fn place_pickup(state: &mut GameState, x: f32, y: f32, kind: PickupKind) {
        let id = state.next_entity_id();
        state.pickups.push(Pickup {
            id,
            rect: Rect::from_pos_size(Vec2::new(x, y), PICKUP_SIZE),
            kind,
        });
    }

    #[test]
    fn test_idle_tick_only_scrolls_stars() {
        let mut state = quiet_state(42);
        let mut out = screen();
        let stars_before = state.stars.clone();

        tick(&mut state, &idle(), &mut out);

        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.ship.pos(), SHIP_SPAWN);
        assert_eq!(state.ship.score, 0);
        assert_eq!(state.ship.health, SHIP_START_HEALTH);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.pickups.is_empty());
        assert!(state.explosions.is_empty());
        for (before, after) in stars_before.iter().zip(&state.stars) {
            let moved = before.pos.y + STAR_SPEED;
            let expected = if moved > SCREEN_HEIGHT { 0.0 } else { moved };
            assert_eq!(after.pos, Vec2::new(before.pos.x, expected));
        }
        assert_eq!(out.frames(), 1);
        assert_eq!(out.background(), BACKGROUND_COLOR);
    }

    #[test]
    fn test_star_wraps_to_top() {
        let mut state = quiet_state(1);
        state.stars[0].pos = Vec2::new(10.0, 135.0);
        tick(&mut state, &idle(), &mut screen());
        assert_eq!(state.stars[0].pos, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_held_buttons_move_ship() {
        let mut state = quiet_state(1);
        let input = idle().hold(Button::Up).hold(Button::Right);
        tick(&mut state, &input, &mut screen());
        assert_eq!(state.ship.pos(), Vec2::new(102.0, 119.0));

        let input = idle().hold(Button::Down).hold(Button::Left);
        tick(&mut state, &input, &mut screen());
        tick(&mut state, &input, &mut screen());
        assert_eq!(state.ship.pos(), Vec2::new(98.0, 121.0));
    }

    #[test]
    fn test_bullet_flight_and_pruning() {
        let mut state = quiet_state(1);
        let mut out = screen();

        tick(&mut state, &idle().press(Button::Fire), &mut out);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].rect.pos, Vec2::new(100.0, 115.0));
        assert_eq!(out.sprite_count(BULLET_SPRITE), 1);

        // Holding fire does not auto-repeat
        let held = idle().hold(Button::Fire);
        for _ in 1..40 {
            tick(&mut state, &held, &mut out);
        }
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].rect.pos.y, -2.0);

        // Seen above the screen on this pass: removed without moving
        tick(&mut state, &idle(), &mut out);
        assert!(state.bullets.is_empty());
        assert_eq!(out.sprite_count(BULLET_SPRITE), 0);
    }

    #[test]
    fn test_bullet_kills_weak_enemy() {
        let mut state = quiet_state(1);
        place_enemy(&mut state, 100.0, 110.0, 1);

        tick(&mut state, &idle().press(Button::Fire), &mut screen());

        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.ship.score, KILL_SCORE);
        // One hit ring plus a three-ring kill burst
        assert_eq!(state.explosions.len(), 4);
        assert!(state.explosions.iter().all(|r| r.center == Vec2::new(100.0, 110.0)));
    }

    #[test]
    fn test_bullet_damages_tough_enemy() {
        let mut state = quiet_state(1);
        place_enemy(&mut state, 100.0, 110.0, 2);

        tick(&mut state, &idle().press(Button::Fire), &mut screen());

        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.ship.score, 0);
        assert_eq!(state.explosions.len(), 1);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_bullet_spent_on_first_enemy() {
        let mut state = quiet_state(1);
        let first = place_enemy(&mut state, 100.0, 110.0, 1);
        let second = place_enemy(&mut state, 101.0, 110.0, 1);

        tick(&mut state, &idle().press(Button::Fire), &mut screen());

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, second);
        assert_ne!(first, second);
        assert_eq!(state.ship.score, KILL_SCORE);
    }

    #[test]
    fn test_waves_fire_on_exact_tick() {
        let mut state = GameState::new(5);
        let mut out = screen();
        for _ in 0..99 {
            tick(&mut state, &idle(), &mut out);
        }
        assert!(state.enemies.is_empty());

        tick(&mut state, &idle(), &mut out);
        assert_eq!(state.enemies.len(), 11);
        let ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(ids.len(), unique.len());

        tick(&mut state, &idle(), &mut out);
        assert_eq!(state.enemies.len(), 11);
    }

    #[test]
    fn test_skipped_wave_never_spawns() {
        let mut state = GameState::new(5);
        state.time_ticks = 100;
        for _ in 0..200 {
            tick(&mut state, &idle(), &mut screen());
        }
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_specials_need_charges() {
        let mut state = quiet_state(1);
        state.ship.bomb = 0;
        state.ship.laser = 0;
        state.ship.shield = 0;
        let input = idle()
            .press(Button::Bomb)
            .press(Button::Laser)
            .press(Button::Shield);

        tick(&mut state, &input, &mut screen());

        assert_eq!((state.ship.bomb, state.ship.laser, state.ship.shield), (0, 0, 0));
        assert!(state.effects.bomb.is_none());
        assert!(state.effects.laser.is_none());
        assert!(state.effects.shield.is_none());
    }

    #[test]
    fn test_bomb_lifetime() {
        let mut state = quiet_state(1);
        let mut out = screen();

        tick(&mut state, &idle().press(Button::Bomb), &mut out);
        assert_eq!(state.ship.bomb, 0);
        let drawn = out.commands().iter().any(|c| {
            matches!(c, DrawCommand::CircleOutline { center, radius, .. }
                if *center == SHIP_SPAWN && *radius == BOMB_START_RADIUS)
        });
        assert!(drawn);

        // 98 growth steps take the radius from 4 to 200
        for _ in 1..97 {
            tick(&mut state, &idle(), &mut out);
        }
        let bomb = state.effects.bomb.expect("bomb still expanding");
        assert_eq!(bomb.circle.radius, 198.0);

        tick(&mut state, &idle(), &mut out);
        assert!(state.effects.bomb.is_none());
    }

    #[test]
    fn test_bomb_destroys_enemy() {
        let mut state = quiet_state(1);
        place_enemy(&mut state, 100.0, 100.0, 5);
        state.ship.bomb = 1;
        state.trigger_bomb();
        if let Some(bomb) = state.effects.bomb.as_mut() {
            bomb.circle.radius = 30.0;
        }

        tick(&mut state, &idle(), &mut screen());

        assert!(state.enemies.is_empty());
        assert_eq!(state.ship.score, KILL_SCORE);
        assert_eq!(state.ship.health, SHIP_START_HEALTH);
        assert_eq!(state.explosions.len(), KILL_RINGS as usize);
    }

    #[test]
    fn test_enemy_is_removed_by_its_first_collider_only() {
        let mut state = quiet_state(1);
        // Overlaps the bomb ring, the laser beam and the ship all at once
        place_enemy(&mut state, 98.0, 114.0, 1);
        let input = idle().press(Button::Bomb).press(Button::Laser);

        tick(&mut state, &input, &mut screen());

        assert!(state.enemies.is_empty());
        assert_eq!(state.ship.score, KILL_SCORE);
        assert_eq!(state.ship.health, SHIP_START_HEALTH);
        assert_eq!(state.ship.pos(), SHIP_SPAWN);
        assert_eq!(state.explosions.len(), KILL_RINGS as usize);
    }

    #[test]
    fn test_laser_destroys_enemy_in_beam() {
        let mut state = quiet_state(1);
        place_enemy(&mut state, 96.0, 50.0, 3);
        place_enemy(&mut state, 150.0, 50.0, 1);

        tick(&mut state, &idle().press(Button::Laser), &mut screen());

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].rect.pos.x, 150.0);
        assert_eq!(state.ship.score, KILL_SCORE);
        assert_eq!(state.effects.laser.map(|l| l.remaining_ticks), Some(99));
    }

    #[test]
    fn test_laser_follows_ship_and_expires() {
        let mut state = quiet_state(1);
        let mut out = screen();
        let input = idle().press(Button::Laser).hold(Button::Left);

        tick(&mut state, &input, &mut out);
        let laser = state.effects.laser.expect("laser active");
        assert_eq!(laser.rect, Rect::new(97.0, 0.0, LASER_WIDTH, 117.0));

        for _ in 1..99 {
            tick(&mut state, &idle(), &mut out);
        }
        assert_eq!(state.effects.laser.map(|l| l.remaining_ticks), Some(1));

        tick(&mut state, &idle(), &mut out);
        assert!(state.effects.laser.is_none());
    }

    #[test]
    fn test_shield_does_not_block_collisions() {
        let mut state = quiet_state(1);
        let mut out = screen();
        state.ship.rect.pos = Vec2::new(50.0, 50.0);
        place_enemy(&mut state, 50.0, 50.0, 1);

        tick(&mut state, &idle().press(Button::Shield), &mut out);

        assert!(state.effects.shield.is_some());
        assert_eq!(state.ship.health, SHIP_START_HEALTH - 1);
        assert_eq!(state.ship.pos(), SHIP_SPAWN);

        for _ in 1..SHIELD_DURATION_TICKS {
            tick(&mut state, &idle(), &mut out);
        }
        assert!(state.effects.shield.is_none());
    }

    #[test]
    fn test_enemy_rams_ship() {
        let mut state = quiet_state(1);
        state.ship.rect.pos = Vec2::new(50.0, 50.0);
        place_enemy(&mut state, 52.0, 52.0, 4);

        tick(&mut state, &idle(), &mut screen());

        assert!(state.enemies.is_empty());
        assert_eq!(state.ship.score, KILL_SCORE);
        assert_eq!(state.ship.health, 2);
        assert_eq!(state.ship.pos(), SHIP_SPAWN);
        assert_eq!(state.explosions.len(), KILL_RINGS as usize);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = quiet_state(1);
        let mut out = screen();
        state.ship.health = 1;
        state.ship.rect.pos = Vec2::new(50.0, 50.0);
        place_enemy(&mut state, 50.0, 50.0, 1);

        tick(&mut state, &idle(), &mut out);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.ship.health, 0);

        let frames = out.frames();
        let stars = state.stars.clone();
        tick(&mut state, &idle().press(Button::Fire), &mut out);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(out.frames(), frames);
        assert_eq!(state.stars, stars);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_enemy_leaving_screen_is_unscored() {
        let mut state = quiet_state(1);
        place_enemy(&mut state, 10.0, SCREEN_HEIGHT + 1.0, 1);

        tick(&mut state, &idle(), &mut screen());

        assert!(state.enemies.is_empty());
        assert_eq!(state.ship.score, 0);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_pickup_collected_on_contact() {
        let mut state = quiet_state(1);
        place_pickup(&mut state, 100.0, 113.0, PickupKind::Laser);
        place_pickup(&mut state, 10.0, 20.0, PickupKind::Health);

        tick(&mut state, &idle(), &mut screen());

        assert_eq!(state.ship.laser, 2);
        assert_eq!(state.ship.health, SHIP_START_HEALTH);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].rect.pos, Vec2::new(10.0, 21.0));
    }

    #[test]
    fn test_pickup_falls_off_screen() {
        let mut state = quiet_state(1);
        place_pickup(&mut state, 10.0, SCREEN_HEIGHT, PickupKind::Bomb);
        tick(&mut state, &idle(), &mut screen());
        assert!(state.pickups.is_empty());
        assert_eq!(state.ship.bomb, SHIP_START_CHARGES);
    }

    #[test]
    fn test_explosion_rings_expire_at_cap() {
        let mut state = quiet_state(1);
        state.spawn_explosion(Vec2::new(20.0, 20.0), KILL_RINGS);

        tick(&mut state, &idle(), &mut screen());
        let radii: Vec<f32> = state.explosions.iter().map(|r| r.radius).collect();
        assert_eq!(radii, vec![1.0, 5.0, 9.0]);

        for _ in 0..21 {
            tick(&mut state, &idle(), &mut screen());
        }
        assert_eq!(state.explosions.len(), 2);

        for _ in 0..8 {
            tick(&mut state, &idle(), &mut screen());
        }
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_determinism() {
        let script = [
            idle().press(Button::Fire),
            idle().hold(Button::Left),
            idle().press(Button::Bomb),
            idle().hold(Button::Right).press(Button::Fire),
            idle(),
        ];

        let run = |seed: u64| {
            let mut state = GameState::new(seed);
            let mut out = screen();
            for i in 0..600 {
                tick(&mut state, &script[i % script.len()], &mut out);
            }
            (state, out)
        };

        let (a, out_a) = run(99999);
        let (b, out_b) = run(99999);
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.ship.score, b.ship.score);
        assert_eq!(a.ship.pos(), b.ship.pos());
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.pickups.len(), b.pickups.len());
        assert_eq!(a.stars, b.stars);
        assert_eq!(out_a.commands(), out_b.commands());
    }
}
