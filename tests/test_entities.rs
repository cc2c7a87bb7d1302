use sidescroller::compute::init_world;
use sidescroller::entities::*;
use sidescroller::persist::SaveState;

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── HealthBar ─────────────────────────────────────────────────────────────────

#[test]
fn health_bar_starts_full() {
    let hb = HealthBar::new(20);
    assert_eq!(hb.health, 20);
    assert_eq!(hb.max_health, 20);
}

#[test]
fn take_damage_subtracts() {
    let mut hb = HealthBar::new(15);
    hb.take_damage(4);
    assert_eq!(hb.health, 11);
}

#[test]
fn take_damage_floors_at_zero() {
    let mut hb = HealthBar::new(5);
    hb.take_damage(9);
    assert_eq!(hb.health, 0);
    // Further damage has no effect once empty
    hb.take_damage(3);
    assert_eq!(hb.health, 0);
}

#[test]
fn take_damage_clamp_property() {
    // health' == max(0, health - d) for a spread of damage values
    for d in [0, 1, 7, 20, 100] {
        let mut hb = HealthBar::new(20);
        hb.take_damage(d);
        assert_eq!(hb.health, (20 - d).max(0));
    }
}

#[test]
fn ratio_tracks_remaining_fraction() {
    let mut hb = HealthBar::new(20);
    assert_eq!(hb.ratio(), 1.0);
    hb.take_damage(5);
    assert_eq!(hb.ratio(), 0.75);
    hb.take_damage(100);
    assert_eq!(hb.ratio(), 0.0);
}

// ── Position & distance ───────────────────────────────────────────────────────

#[test]
fn distance_is_symmetric() {
    let a = Position { x: 12.0, y: 340.0 };
    let b = Position { x: 700.0, y: 25.0 };
    assert_eq!(a.distance(&b), b.distance(&a));
}

#[test]
fn distance_to_self_is_zero() {
    let p = Position { x: 123.0, y: 456.0 };
    assert_eq!(p.distance(&p), 0.0);
}

#[test]
fn distance_matches_euclidean() {
    let a = Position { x: 0.0, y: 0.0 };
    let b = Position { x: 3.0, y: 4.0 };
    assert_eq!(a.distance(&b), 5.0);
}

#[test]
fn collision_radius_scenario() {
    // Player, enemy, and missile stacked on one point all register as
    // colliding; moving the enemy across the field does not.
    let player = Position { x: 100.0, y: 100.0 };
    let missile = Position { x: 100.0, y: 100.0 };
    let mut enemy = Position { x: 100.0, y: 100.0 };

    assert!(player.distance(&enemy) < 20.0);
    assert!(missile.distance(&enemy) < 20.0);

    enemy = Position { x: 300.0, y: 300.0 };
    assert!(player.distance(&enemy) >= 20.0);
}

// ── World ─────────────────────────────────────────────────────────────────────

#[test]
fn world_clone_is_independent() {
    let mut rng = StdRng::seed_from_u64(42);
    let original = init_world(&SaveState::default(), &mut rng);
    let mut cloned = original.clone();

    cloned.player.pos.x = 99.0;
    cloned.player.score = 999;
    cloned.enemies[0].health_bar.take_damage(3);
    cloned.sounds.push(SoundCue::Explosion);

    assert_eq!(original.player.pos.x, 0.0);
    assert_eq!(original.player.score, 0);
    assert_eq!(
        original.enemies[0].health_bar.health,
        original.enemies[0].health_bar.max_health
    );
    assert!(original.sounds.is_empty());
}

#[test]
fn drain_sounds_empties_the_queue() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut world = init_world(&SaveState::default(), &mut rng);
    world.sounds.push(SoundCue::MissileLaunch);
    world.sounds.push(SoundCue::Explosion);

    let cues = world.drain_sounds();
    assert_eq!(cues, vec![SoundCue::MissileLaunch, SoundCue::Explosion]);
    assert!(world.sounds.is_empty());
}
