use std::time::Duration;

use house_defence_core::{Cue, EnemyKind, Event, GameConfig, WaveConfig, WaveTable};
use house_defence_system_waves::{Config, WaveDirector, WaveStart};
use house_defence_world::{Task, World};

fn world_with_waves(waves: Vec<WaveConfig>) -> World {
    World::new(GameConfig {
        waves: WaveTable::new(waves),
        ..GameConfig::default()
    })
}

#[test]
fn first_wave_of_second_set_is_scaled() {
    let mut world = world_with_waves(vec![WaveConfig::new(&[(EnemyKind::Zombie, 3)])]);
    world.progression.complete_set();
    let mut director = WaveDirector::new(Config::new(1));
    let mut events = Vec::new();

    let outcome = director.start_wave(&mut world, &mut events);

    assert_eq!(outcome, WaveStart::Spawned { enemies: 3 });
    assert_eq!(world.enemies.len(), 3);
    for enemy in &world.enemies {
        assert_eq!(enemy.health(), 150.0);
        assert_eq!(enemy.kind(), EnemyKind::Zombie);
    }
    assert!(world.progression.wave_in_progress());
    assert!(events.contains(&Event::CuePlayed {
        cue: Cue::WaveStart
    }));
    assert!(events.contains(&Event::WaveStarted {
        wave: 0,
        wave_set: 1,
        enemies: 3,
    }));
}

#[test]
fn empty_roster_counts_as_cleared() {
    let mut world = world_with_waves(vec![WaveConfig::default()]);
    let mut director = WaveDirector::new(Config::new(1));
    let mut events = Vec::new();

    assert!(director.is_wave_cleared(&world));
    assert_eq!(
        director.start_wave(&mut world, &mut events),
        WaveStart::Spawned { enemies: 0 }
    );
    assert!(director.is_wave_cleared(&world));
}

#[test]
fn wave_clears_only_when_every_enemy_is_dead() {
    let mut world = world_with_waves(vec![WaveConfig::new(&[(EnemyKind::Snake, 2)])]);
    let mut director = WaveDirector::new(Config::new(3));
    let mut events = Vec::new();
    let _ = director.start_wave(&mut world, &mut events);

    assert!(!director.is_wave_cleared(&world));
    let _ = world.enemies[0].take_damage(50.0);
    assert!(!director.is_wave_cleared(&world));
    let _ = world.enemies[1].take_damage(50.0);
    assert!(director.is_wave_cleared(&world));
}

#[test]
fn update_moves_only_living_enemies() {
    let mut world = world_with_waves(vec![WaveConfig::new(&[(EnemyKind::Zombie, 2)])]);
    let mut director = WaveDirector::new(Config::new(9));
    let mut events = Vec::new();
    let _ = director.start_wave(&mut world, &mut events);
    let _ = world.enemies[1].take_damage(1000.0);
    let before: Vec<f32> = world.enemies.iter().map(|e| e.position().x).collect();

    director.update(&mut world);

    assert_eq!(world.enemies[0].position().x, before[0] - 0.5);
    assert_eq!(world.enemies[1].position().x, before[1]);
}

#[test]
fn identical_seeds_replay_identical_spawns() {
    let spawn = |seed: u64| {
        let mut world = World::new(GameConfig::default());
        let mut director = WaveDirector::new(Config::new(seed));
        let mut events = Vec::new();
        let mut positions = Vec::new();
        for _ in 0..3 {
            let _ = director.start_wave(&mut world, &mut events);
            positions.extend(world.enemies.iter().map(|enemy| enemy.position().x));
            world.progression.complete_wave();
        }
        positions
    };

    assert_eq!(spawn(0xdead_beef), spawn(0xdead_beef));
    assert_ne!(spawn(0xdead_beef), spawn(0x1234_5678));
}

#[test]
fn finishing_the_set_spawns_the_boss_and_arms_its_timer() {
    let mut world = world_with_waves(vec![WaveConfig::new(&[(EnemyKind::Zombie, 1)])]);
    world.progression.complete_wave();
    let mut director = WaveDirector::new(Config::new(5));
    let mut events = Vec::new();

    let outcome = director.start_wave(&mut world, &mut events);

    assert_eq!(outcome, WaveStart::BossSpawned);
    let boss = world.boss.as_ref().expect("boss spawned");
    assert_eq!(boss.health(), 1000.0);
    assert_eq!(boss.position().x, 1600.0);
    assert!(world.progression.wave_in_progress());
    assert_eq!(
        world.schedule.due_at(Task::BossShot),
        Some(Duration::from_millis(2000))
    );
    assert!(events.contains(&Event::BossSpawned { health: 1000.0 }));
}

#[test]
fn disabled_boss_fight_reports_set_completion() {
    let mut world = World::new(GameConfig {
        waves: WaveTable::new(vec![WaveConfig::new(&[(EnemyKind::Zombie, 1)])]),
        boss_fight: false,
        ..GameConfig::default()
    });
    world.progression.complete_wave();
    let mut director = WaveDirector::new(Config::new(5));
    let mut events = Vec::new();

    assert_eq!(
        director.start_wave(&mut world, &mut events),
        WaveStart::SetComplete
    );
    assert!(world.boss.is_none());
    assert!(events.is_empty());
}
