//! The game-update loop as pure functions.
//!
//! Every public function takes an immutable reference to the current
//! `World` (and, where needed, an RNG handle) and returns a brand-new
//! `World`. Side effects are limited to the injected RNG, so tests can
//! drive everything deterministically with a seeded generator.

use rand::Rng;

use crate::entities::{
    Command, Enemy, EnemyKind, GameStatus, HealthBar, Missile, MissileState, Player, Position,
    SoundCue, Star, StarColor, World,
};
use crate::persist::SaveState;

// ── Playfield geometry ────────────────────────────────────────────────────────

/// Right edge of the playfield; missiles reset once past it.
pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 600.0;

/// Entities travel vertically within `0..=LANE_MAX_Y`.
pub const LANE_MAX_Y: f64 = 550.0;

/// The player is held in a narrow band at the left edge, giving the
/// side-scroller its cockpit feel. Widening this changes the game.
pub const PLAYER_MAX_X: f64 = 200.0;

/// Enemies wrap back to the right once this far off the left edge.
const ENEMY_WRAP_X: f64 = -30.0;

/// Ready missiles park here so they sit outside every collision radius.
const PARKED_Y: f64 = 1000.0;

// ── Tuning ────────────────────────────────────────────────────────────────────

const PLAYER_SPEED: f64 = 6.0;
const PLAYER_MAX_HEALTH: i32 = 20;

const MISSILE_SPEED: f64 = 10.0;
const MISSILE_DAMAGE: i32 = 4;
/// Launch offset from the player sprite's origin to its nose.
const MUZZLE_DX: f64 = 25.0;
const MUZZLE_DY: f64 = 16.0;

const COLLISION_RADIUS: f64 = 20.0;
const KNOCKBACK: f64 = 20.0;
const HIT_SCORE: u32 = 10;

/// Every this-many kills, the next respawn comes back as a boss.
const BOSS_INTERVAL: u32 = 10;
const BOSS_HEALTH: i32 = 50;

// ── Constructors ──────────────────────────────────────────────────────────────

/// A fresh hostile entering from the right edge.
pub fn spawn_enemy(rng: &mut impl Rng) -> Enemy {
    Enemy {
        pos: Position {
            x: FIELD_WIDTH,
            y: rng.gen_range(0..=550) as f64,
        },
        dx: rng.gen_range(10..=50) as f64 / -10.0,
        dy: 0.0,
        health_bar: HealthBar::new(rng.gen_range(5..=15)),
        kind: EnemyKind::Fighter,
    }
}

pub fn spawn_star(rng: &mut impl Rng) -> Star {
    Star {
        pos: Position {
            x: rng.gen_range(0..=1000) as f64,
            y: rng.gen_range(0..=550) as f64,
        },
        dx: rng.gen_range(10..=50) as f64 / -30.0,
        color: match rng.gen_range(0..3) {
            0 => StarColor::Yellow,
            1 => StarColor::Red,
            _ => StarColor::White,
        },
    }
}

/// An unfired missile, parked off screen.
pub fn parked_missile() -> Missile {
    Missile {
        pos: Position { x: 0.0, y: PARKED_Y },
        dx: 0.0,
        state: MissileState::Ready,
    }
}

/// Fresh spawn point off the right edge, used for every respawn.
fn offscreen_respawn(rng: &mut impl Rng) -> Position {
    Position {
        x: rng.gen_range(800..=900) as f64,
        y: rng.gen_range(0..=550) as f64,
    }
}

/// Build the session's world, restoring score and kills from the save.
pub fn init_world(save: &SaveState, rng: &mut impl Rng) -> World {
    World {
        player: Player {
            pos: Position { x: 0.0, y: 0.0 },
            dx: 0.0,
            dy: 0.0,
            score: save.score,
            kills: save.kills,
            health_bar: HealthBar::new(PLAYER_MAX_HEALTH),
        },
        missiles: std::array::from_fn(|_| parked_missile()),
        enemies: std::array::from_fn(|_| spawn_enemy(rng)),
        stars: std::array::from_fn(|_| spawn_star(rng)),
        status: GameStatus::Playing,
        sounds: Vec::new(),
    }
}

// ── Input-driven state transitions (pure) ─────────────────────────────────────

/// Apply one input command. Directional commands set the matching velocity
/// component; the velocity then persists tick to tick until a boundary
/// clamp or another command changes it.
pub fn apply_command(world: &World, cmd: Command) -> World {
    let mut w = world.clone();
    match cmd {
        Command::Up => w.player.dy = -PLAYER_SPEED,
        Command::Down => w.player.dy = PLAYER_SPEED,
        Command::Left => w.player.dx = -PLAYER_SPEED,
        Command::Right => w.player.dx = PLAYER_SPEED,
        Command::Fire => fire_missile(&mut w),
    }
    w
}

/// Launch the first ready missile from the player's muzzle. With the whole
/// pool in flight this is a no-op.
fn fire_missile(w: &mut World) {
    if let Some(missile) = w
        .missiles
        .iter_mut()
        .find(|m| m.state == MissileState::Ready)
    {
        missile.pos.x = w.player.pos.x + MUZZLE_DX;
        missile.pos.y = w.player.pos.y + MUZZLE_DY;
        missile.dx = MISSILE_SPEED;
        missile.state = MissileState::Firing;
        w.sounds.push(SoundCue::MissileLaunch);
    }
}

// ── Per-tick update (pure modulo the injected RNG) ────────────────────────────

/// Advance the simulation by one tick: move every entity, then resolve
/// collisions. One tick is atomic; callers see only the finished state.
pub fn tick(world: &World, rng: &mut impl Rng) -> World {
    let mut w = world.clone();

    // ── 1. Movement ──────────────────────────────────────────────────────────
    move_player(&mut w.player);
    for missile in &mut w.missiles {
        move_missile(missile);
    }
    for star in &mut w.stars {
        move_star(star, rng);
    }
    for enemy in &mut w.enemies {
        move_enemy(enemy, rng);
    }

    // ── 2. Collision resolution ──────────────────────────────────────────────
    resolve_collisions(&mut w, rng);

    w
}

fn move_player(p: &mut Player) {
    p.pos.y += p.dy;
    p.pos.x += p.dx;
    if p.pos.y < 0.0 {
        p.pos.y = 0.0;
        p.dy = 0.0;
    } else if p.pos.y > LANE_MAX_Y {
        p.pos.y = LANE_MAX_Y;
        p.dy = 0.0;
    }
    if p.pos.x < 0.0 {
        p.pos.x = 0.0;
        p.dx = 0.0;
    } else if p.pos.x > PLAYER_MAX_X {
        p.pos.x = PLAYER_MAX_X;
        p.dx = 0.0;
    }
}

fn move_missile(m: &mut Missile) {
    if m.state == MissileState::Firing {
        m.pos.x += m.dx;
    }
    if m.pos.x > FIELD_WIDTH {
        m.state = MissileState::Ready;
        m.pos.y = PARKED_Y;
    }
}

fn move_star(s: &mut Star, rng: &mut impl Rng) {
    s.pos.x += s.dx;
    if s.pos.x < 0.0 {
        s.pos = offscreen_respawn(rng);
    }
}

fn move_enemy(e: &mut Enemy, rng: &mut impl Rng) {
    e.pos.x += e.dx;
    e.pos.y += e.dy;
    if e.pos.x < ENEMY_WRAP_X {
        // Horizontal wrap keeps health and kind; only a kill resets them.
        e.pos = offscreen_respawn(rng);
    }
    if e.pos.y < 0.0 {
        e.pos.y = 0.0;
        e.dy = -e.dy;
    } else if e.pos.y > LANE_MAX_Y {
        e.pos.y = LANE_MAX_Y;
        e.dy = -e.dy;
    }
}

// ── Collision & damage resolution ─────────────────────────────────────────────

/// Resolve all pairwise proximity checks for this tick, in pool order: for
/// each enemy, every missile first, then the player.
fn resolve_collisions(w: &mut World, rng: &mut impl Rng) {
    for enemy in &mut w.enemies {
        for missile in &mut w.missiles {
            // Ready missiles sit at the parked sentinel, outside any radius.
            if enemy.pos.distance(&missile.pos) < COLLISION_RADIUS {
                w.sounds.push(SoundCue::Explosion);
                enemy.health_bar.take_damage(MISSILE_DAMAGE);
                if enemy.health_bar.health <= 0 {
                    enemy.pos = offscreen_respawn(rng);
                    w.player.kills += 1;
                    respawn_stats(enemy, w.player.kills, rng);
                } else {
                    enemy.pos.x += KNOCKBACK;
                }
                // Any hit consumes the missile and scores, kill or not.
                reset_missile(missile);
                w.player.score += HIT_SCORE;
            }
        }
        if enemy.pos.distance(&w.player.pos) < COLLISION_RADIUS {
            w.sounds.push(SoundCue::Explosion);
            w.player.health_bar.take_damage(rng.gen_range(5..=10));
            enemy.health_bar.take_damage(rng.gen_range(5..=10));
            // Ramming only relocates the enemy; its health and kind survive.
            enemy.pos = offscreen_respawn(rng);
            if w.player.health_bar.health <= 0 {
                w.status = GameStatus::GameOver;
            }
        }
    }
}

/// Roll the stats for a freshly killed slot. Every `BOSS_INTERVAL`th kill
/// comes back as a vertically drifting boss.
fn respawn_stats(enemy: &mut Enemy, kills: u32, rng: &mut impl Rng) {
    if kills % BOSS_INTERVAL == 0 {
        enemy.kind = EnemyKind::Boss;
        enemy.health_bar = HealthBar::new(BOSS_HEALTH);
        enemy.dy = rng.gen_range(-5..=5) as f64;
    } else {
        enemy.kind = EnemyKind::Fighter;
        enemy.health_bar = HealthBar::new(rng.gen_range(5..=15));
        enemy.dy = 0.0;
    }
}

fn reset_missile(m: &mut Missile) {
    m.dx = 0.0;
    m.pos.x = 0.0;
    m.pos.y = PARKED_Y;
    m.state = MissileState::Ready;
}
