//! Per-frame simulation step
//!
//! One call to [`tick`] advances the game by exactly one display frame.
//! The step order is load-bearing: input, integration, horizontal bounds,
//! landing resolution, block hits, pickups, enemies, projectiles, fall
//! death, camera. Terminal states short-circuit everything except the
//! restart check.

use glam::Vec2;

use super::camera::camera_x;
use super::rect::{lands_on, Rect};
use super::state::{
    BlockKind, Fireball, GameState, PowerUp, PowerUpKind, SessionPhase, Viewport,
};
use crate::consts::*;

/// Input sampled once per frame
///
/// `left`/`right`/`jump` carry held key state. `shoot` and `restart` are
/// one-shot flags: the caller sets them on key press and clears them after
/// the tick has consumed them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub shoot: bool,
    pub restart: bool,
}

impl TickInput {
    /// Held horizontal direction: +1 right, -1 left, 0 for neither or both
    fn move_dir(&self) -> f32 {
        match (self.left, self.right) {
            (false, true) => 1.0,
            (true, false) => -1.0,
            _ => 0.0,
        }
    }

    /// Direction a fireball inherits: follows held keys, defaults right
    fn fire_dir(&self) -> f32 {
        if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            1.0
        }
    }
}

/// Advance the simulation by one frame
pub fn tick(state: &mut GameState, input: &TickInput, view: Viewport) {
    if state.is_terminal() {
        if input.restart {
            *state = GameState::new(state.level_view_h);
        }
        return;
    }

    state.frame += 1;

    let GameState {
        phase,
        score,
        level_length,
        camera_x: cam,
        player,
        tiles,
        pipes,
        blocks,
        coins,
        powerups,
        enemies,
        fireballs,
        ..
    } = state;
    let level_length = *level_length;

    // 1. Input resolution
    player.vel.x = input.move_dir() * MOVE_SPEED;
    if input.jump && player.on_ground {
        player.vel.y = JUMP_VELOCITY;
        player.on_ground = false;
    }
    if input.shoot && player.has_fire && player.on_ground {
        let center = player.pos + player.size / 2.0;
        fireballs.push(Fireball {
            rect: Rect::new(center.x, center.y, FIREBALL_SIZE, FIREBALL_SIZE),
            dx: FIREBALL_SPEED * input.fire_dir(),
        });
    }

    // 2. Integration: unbounded gravity, single Euler step
    player.vel.y += GRAVITY;
    player.pos += player.vel;

    // 3. Horizontal bounds; crossing the right edge wins
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
    }
    if player.pos.x + player.size.x > level_length {
        player.pos.x = level_length - player.size.x;
        *phase = SessionPhase::Won;
    }

    // 4. Landing resolution. Grounded is recomputed from scratch each frame;
    //    only the feet-onto-top case is resolved.
    player.on_ground = false;
    let solids = tiles
        .iter()
        .copied()
        .chain(pipes.iter().copied())
        .chain(blocks.iter().map(|b| b.rect));
    for solid in solids {
        if lands_on(&player.rect(), player.vel.y, &solid) {
            player.pos.y = solid.y - player.size.y;
            player.vel.y = 0.0;
            player.on_ground = true;
        }
    }

    // 5. Block hit from below: consume and spawn the reward. Coin-kind
    //    blocks are consumed but yield nothing.
    if player.vel.y < 0.0 {
        for block in blocks.iter_mut() {
            if block.consumed || !player.rect().overlaps(&block.rect) {
                continue;
            }
            block.consumed = true;
            let kind = match block.kind {
                BlockKind::Coin => continue,
                BlockKind::Mushroom => PowerUpKind::Mushroom,
                BlockKind::Fire => PowerUpKind::Fire,
            };
            powerups.push(PowerUp {
                rect: Rect::new(
                    block.rect.x,
                    block.rect.y - POWERUP_SIZE,
                    POWERUP_SIZE,
                    POWERUP_SIZE,
                ),
                kind,
                active: true,
            });
        }
    }

    // 6. Coin pickup: unconditional on overlap
    for coin in coins.iter_mut() {
        if !coin.collected && player.rect().overlaps(&coin.rect) {
            coin.collected = true;
            *score += 1;
        }
    }

    // 7. Power-up pickup: single-use, effect applies exactly once
    for powerup in powerups.iter_mut() {
        if !powerup.active || !player.rect().overlaps(&powerup.rect) {
            continue;
        }
        powerup.active = false;
        match powerup.kind {
            PowerUpKind::Mushroom => {
                player.is_big = true;
                player.size *= GROW_FACTOR;
            }
            PowerUpKind::Fire => player.has_fire = true,
        }
    }

    // 8. Enemy patrol and contact. The ledge probe looks one pixel past the
    //    leading edge and five below the feet, against tiles only.
    for enemy in enemies.iter_mut() {
        if !enemy.alive {
            continue;
        }
        let front_x = if enemy.dir > 0.0 {
            enemy.rect.right() + PROBE_AHEAD
        } else {
            enemy.rect.x - PROBE_AHEAD
        };
        let probe = Vec2::new(front_x, enemy.rect.bottom() + PROBE_BELOW);
        if tiles.iter().any(|t| t.contains_point(probe)) {
            enemy.rect.x += enemy.speed * enemy.dir;
        } else {
            enemy.dir = -enemy.dir;
        }

        if player.rect().overlaps(&enemy.rect) && *phase == SessionPhase::Playing {
            *phase = SessionPhase::Lost;
        }
    }

    // 9. Projectiles: advance, then resolve at most one collision source per
    //    fireball per frame, first match in iteration order. Out-of-bounds
    //    fireballs are dropped so they cannot accumulate.
    fireballs.retain_mut(|fireball| {
        fireball.rect.x += fireball.dx;
        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.alive && fireball.rect.overlaps(&e.rect))
        {
            enemy.alive = false;
            return false;
        }
        if tiles.iter().any(|t| fireball.rect.overlaps(t)) {
            return false;
        }
        fireball.rect.right() > 0.0 && fireball.rect.x < level_length
    });

    // 10. Fall death
    if player.pos.y > view.h + FALL_MARGIN && *phase == SessionPhase::Playing {
        *phase = SessionPhase::Lost;
    }

    // 11. Camera follows the player within level bounds
    *cam = camera_x(player.pos.x, level_length, view.w);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Enemy;

    const VIEW: Viewport = Viewport { w: 800.0, h: 600.0 };

    fn new_state() -> GameState {
        GameState::new(VIEW.h)
    }

    fn run(state: &mut GameState, input: &TickInput, frames: u32) {
        for _ in 0..frames {
            tick(state, input, VIEW);
        }
    }

    /// Stand the player on the first ground tile with no velocity
    fn grounded_state() -> GameState {
        let mut state = new_state();
        state.player.pos = Vec2::new(100.0, VIEW.h - GROUND_HEIGHT - PLAYER_SIZE);
        run(&mut state, &TickInput::default(), 1);
        assert!(state.player.on_ground);
        state
    }

    #[test]
    fn gravity_settles_player_onto_first_tile() {
        let mut state = new_state();
        let input = TickInput::default();

        let mut landed_frame = None;
        for frame in 0..120 {
            tick(&mut state, &input, VIEW);
            if state.player.on_ground {
                landed_frame = Some(frame);
                break;
            }
        }

        assert!(landed_frame.is_some(), "player never landed");
        // Feet snapped to the tile top, vertical velocity zeroed
        assert_eq!(state.player.rect().bottom(), VIEW.h - GROUND_HEIGHT);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.phase, SessionPhase::Playing);
    }

    #[test]
    fn grounded_player_stays_put_without_input() {
        let mut state = grounded_state();
        let y = state.player.pos.y;
        run(&mut state, &TickInput::default(), 60);
        assert_eq!(state.player.pos.y, y);
        assert!(state.player.on_ground);
    }

    #[test]
    fn jump_only_fires_when_grounded() {
        let mut state = grounded_state();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input, VIEW);
        assert!(!state.player.on_ground);
        assert!(state.player.vel.y < 0.0);

        // Holding jump mid-air adds no second impulse
        let vel_after_jump = state.player.vel.y;
        tick(&mut state, &input, VIEW);
        assert_eq!(state.player.vel.y, vel_after_jump + GRAVITY);
    }

    #[test]
    fn both_direction_keys_cancel() {
        let mut state = grounded_state();
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        let x = state.player.pos.x;
        tick(&mut state, &input, VIEW);
        assert_eq!(state.player.pos.x, x);
    }

    #[test]
    fn win_at_right_edge() {
        let mut state = grounded_state();
        state.player.pos.x = state.level_length - PLAYER_SIZE - 10.0;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        run(&mut state, &input, 5);

        assert_eq!(state.phase, SessionPhase::Won);
        assert_eq!(state.player.pos.x, state.level_length - state.player.size.x);
    }

    #[test]
    fn loss_on_falling_out_of_view() {
        let mut state = new_state();
        // Over the gap between the first two ground tiles
        state.player.pos = Vec2::new(320.0, 0.0);
        run(&mut state, &TickInput::default(), 120);

        assert_eq!(state.phase, SessionPhase::Lost);
        assert!(state.player.pos.y > VIEW.h + FALL_MARGIN);
    }

    #[test]
    fn won_takes_precedence_over_enemy_contact() {
        let mut state = grounded_state();
        let ground_y = VIEW.h - 80.0;
        state.enemies.push(Enemy::new(2425.0, ground_y, 1.0));
        state.player.pos = Vec2::new(2458.0, ground_y);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, VIEW);

        // Both the win line and the enemy are crossed this frame; the win
        // transition happens first and is never overwritten.
        assert_eq!(state.phase, SessionPhase::Won);
    }

    #[test]
    fn coin_pickup_is_monotonic_and_scores_once() {
        let mut state = new_state();
        let coin_rect = state.coins[0].rect;
        state.player.pos = Vec2::new(coin_rect.x, coin_rect.y);

        tick(&mut state, &TickInput::default(), VIEW);
        assert!(state.coins[0].collected);
        assert_eq!(state.score, 1);

        // Still overlapping on later frames: no double count, no revert
        run(&mut state, &TickInput::default(), 5);
        assert!(state.coins[0].collected);
        assert_eq!(state.score, 1);
    }

    /// Position the player just below a block, moving upward into it
    fn hit_block_from_below(state: &mut GameState, block_index: usize) {
        let block = state.blocks[block_index].rect;
        state.player.pos = Vec2::new(block.x, block.bottom() + 5.0);
        state.player.vel = Vec2::new(0.0, -10.0);
        tick(state, &TickInput::default(), VIEW);
    }

    #[test]
    fn block_hit_spawns_powerup_once() {
        let mut state = new_state();
        hit_block_from_below(&mut state, 1);
        assert!(state.blocks[1].consumed);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].kind, PowerUpKind::Mushroom);
        // Spawned one power-up height above the block
        let block = state.blocks[1].rect;
        assert_eq!(state.powerups[0].rect.y, block.y - POWERUP_SIZE);

        // A consumed block yields nothing on a second hit
        hit_block_from_below(&mut state, 1);
        assert_eq!(state.powerups.len(), 1);
    }

    #[test]
    fn coin_block_consumes_without_reward() {
        let mut state = new_state();
        hit_block_from_below(&mut state, 0);
        assert!(state.blocks[0].consumed);
        assert!(state.powerups.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn mushroom_grows_player_exactly_once() {
        let mut state = new_state();
        state.player.pos = Vec2::new(500.0, 100.0);
        state.powerups.push(PowerUp {
            rect: Rect::new(500.0, 100.0, POWERUP_SIZE, POWERUP_SIZE),
            kind: PowerUpKind::Mushroom,
            active: true,
        });

        tick(&mut state, &TickInput::default(), VIEW);
        assert!(state.player.is_big);
        assert_eq!(state.player.size, Vec2::splat(PLAYER_SIZE * GROW_FACTOR));
        assert!(!state.powerups[0].active);

        // Lingering on the inactive pickup never re-applies the effect
        run(&mut state, &TickInput::default(), 3);
        assert_eq!(state.player.size, Vec2::splat(PLAYER_SIZE * GROW_FACTOR));
    }

    #[test]
    fn fire_powerup_grants_ability() {
        let mut state = new_state();
        state.player.pos = Vec2::new(500.0, 100.0);
        state.powerups.push(PowerUp {
            rect: Rect::new(500.0, 100.0, POWERUP_SIZE, POWERUP_SIZE),
            kind: PowerUpKind::Fire,
            active: true,
        });
        tick(&mut state, &TickInput::default(), VIEW);
        assert!(state.player.has_fire);
        assert_eq!(state.player.size, Vec2::splat(PLAYER_SIZE));
    }

    #[test]
    fn shoot_is_gated_on_fire_and_ground() {
        let shoot = TickInput {
            shoot: true,
            ..Default::default()
        };

        // No fire ability: nothing spawns
        let mut state = grounded_state();
        tick(&mut state, &shoot, VIEW);
        assert!(state.fireballs.is_empty());

        // Fire ability but airborne: nothing spawns
        let mut state = grounded_state();
        state.player.has_fire = true;
        state.player.on_ground = false;
        state.player.pos.y -= 50.0;
        tick(&mut state, &shoot, VIEW);
        assert!(state.fireballs.is_empty());

        // Fire ability and grounded: one fireball, moving right by default
        let mut state = grounded_state();
        state.player.has_fire = true;
        tick(&mut state, &shoot, VIEW);
        assert_eq!(state.fireballs.len(), 1);
        assert_eq!(state.fireballs[0].dx, FIREBALL_SPEED);
    }

    #[test]
    fn shoot_follows_held_direction() {
        let mut state = grounded_state();
        state.player.has_fire = true;
        let input = TickInput {
            shoot: true,
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input, VIEW);
        assert_eq!(state.fireballs[0].dx, -FIREBALL_SPEED);
    }

    #[test]
    fn enemy_reverses_at_ledge_without_advancing() {
        let mut state = new_state();
        // First enemy patrols the 400..700 tile facing right; its probe is
        // already over the gap.
        assert_eq!(state.enemies[0].rect.x, 700.0);
        tick(&mut state, &TickInput::default(), VIEW);
        assert_eq!(state.enemies[0].dir, -1.0);
        assert_eq!(state.enemies[0].rect.x, 700.0);

        // Next frame there is footing behind it, so it walks left
        tick(&mut state, &TickInput::default(), VIEW);
        assert_eq!(state.enemies[0].rect.x, 700.0 - ENEMY_SPEED);
    }

    #[test]
    fn enemy_contact_loses() {
        let mut state = new_state();
        let enemy_rect = state.enemies[0].rect;
        state.player.pos = Vec2::new(enemy_rect.x, enemy_rect.y);
        tick(&mut state, &TickInput::default(), VIEW);
        assert_eq!(state.phase, SessionPhase::Lost);
    }

    #[test]
    fn fireball_kills_first_of_two_overlapping_enemies() {
        let mut state = new_state();
        state.enemies.clear();
        let ground_y = VIEW.h - 80.0;
        state.enemies.push(Enemy::new(700.0, ground_y, 1.0));
        state.enemies.push(Enemy::new(700.0, ground_y, 1.0));
        state.fireballs.push(Fireball {
            rect: Rect::new(690.0, ground_y + 10.0, FIREBALL_SIZE, FIREBALL_SIZE),
            dx: FIREBALL_SPEED,
        });

        tick(&mut state, &TickInput::default(), VIEW);
        assert!(!state.enemies[0].alive);
        assert!(state.enemies[1].alive);
        assert!(state.fireballs.is_empty());
    }

    #[test]
    fn fireball_stops_on_tile() {
        let mut state = new_state();
        state.fireballs.push(Fireball {
            rect: Rect::new(280.0, VIEW.h - 30.0, FIREBALL_SIZE, FIREBALL_SIZE),
            dx: FIREBALL_SPEED,
        });
        tick(&mut state, &TickInput::default(), VIEW);
        assert!(state.fireballs.is_empty());
        assert!(state.enemies.iter().all(|e| e.alive));
    }

    #[test]
    fn fireball_dropped_past_level_bounds() {
        let mut state = new_state();
        state.fireballs.push(Fireball {
            rect: Rect::new(state.level_length - 2.0, 100.0, FIREBALL_SIZE, FIREBALL_SIZE),
            dx: FIREBALL_SPEED,
        });
        state.fireballs.push(Fireball {
            rect: Rect::new(-30.0, 100.0, FIREBALL_SIZE, FIREBALL_SIZE),
            dx: -FIREBALL_SPEED,
        });
        tick(&mut state, &TickInput::default(), VIEW);
        assert!(state.fireballs.is_empty());
    }

    #[test]
    fn terminal_state_freezes_simulation() {
        let mut state = new_state();
        state.player.pos = Vec2::new(320.0, 0.0);
        run(&mut state, &TickInput::default(), 120);
        assert_eq!(state.phase, SessionPhase::Lost);

        let frame = state.frame;
        let pos = state.player.pos;
        let input = TickInput {
            right: true,
            jump: true,
            ..Default::default()
        };
        run(&mut state, &input, 10);
        assert_eq!(state.frame, frame);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.phase, SessionPhase::Lost);
    }

    #[test]
    fn restart_rebuilds_fresh_session() {
        let mut state = new_state();
        // Collect a coin, then lose by falling
        let coin_rect = state.coins[0].rect;
        state.player.pos = Vec2::new(coin_rect.x, coin_rect.y);
        tick(&mut state, &TickInput::default(), VIEW);
        assert_eq!(state.score, 1);
        state.player.pos = Vec2::new(320.0, 0.0);
        run(&mut state, &TickInput::default(), 120);
        assert_eq!(state.phase, SessionPhase::Lost);

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, VIEW);

        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 0);
        assert!(state.coins.iter().all(|c| !c.collected));
        assert_eq!(state.player.pos, Vec2::new(PLAYER_SPAWN_X, 0.0));
    }

    #[test]
    fn restart_is_ignored_while_playing() {
        let mut state = new_state();
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, VIEW);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn camera_follows_player_within_bounds() {
        let mut state = grounded_state();
        state.player.pos.x = 1200.0;
        tick(&mut state, &TickInput::default(), VIEW);
        assert_eq!(state.camera_x, state.player.pos.x - VIEW.w / 2.0);

        state.player.pos.x = 50.0;
        tick(&mut state, &TickInput::default(), VIEW);
        assert_eq!(state.camera_x, 0.0);
    }

    #[test]
    fn identical_input_scripts_produce_identical_states() {
        let script = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                left: true,
                ..Default::default()
            },
        ];

        let mut a = new_state();
        let mut b = new_state();
        for _ in 0..50 {
            for input in &script {
                tick(&mut a, input, VIEW);
                tick(&mut b, input, VIEW);
            }
        }

        let snap_a = serde_json::to_string(&a).unwrap();
        let snap_b = serde_json::to_string(&b).unwrap();
        assert_eq!(snap_a, snap_b);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_input() -> impl Strategy<Value = TickInput> {
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(left, right, jump, shoot)| TickInput {
                    left,
                    right,
                    jump,
                    shoot,
                    restart: false,
                },
            )
        }

        proptest! {
            #[test]
            fn player_x_stays_within_level(
                inputs in proptest::collection::vec(arb_input(), 1..300)
            ) {
                let mut state = new_state();
                for input in &inputs {
                    tick(&mut state, input, VIEW);
                    prop_assert!(state.player.pos.x >= 0.0);
                    prop_assert!(
                        state.player.pos.x <= state.level_length - state.player.size.x
                    );
                }
            }

            #[test]
            fn score_matches_collected_coins_and_flags_never_revert(
                inputs in proptest::collection::vec(arb_input(), 1..300)
            ) {
                let mut state = new_state();
                let mut seen = vec![false; state.coins.len()];
                for input in &inputs {
                    tick(&mut state, input, VIEW);
                    for (coin, was_collected) in state.coins.iter().zip(&mut seen) {
                        prop_assert!(coin.collected || !*was_collected);
                        *was_collected = coin.collected;
                    }
                    let collected = state.coins.iter().filter(|c| c.collected).count();
                    prop_assert_eq!(state.score as usize, collected);
                }
            }
        }
    }
}
