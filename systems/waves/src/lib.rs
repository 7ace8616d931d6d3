#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave director that spawns rosters, moves them and spawns the boss.

use house_defence_core::{Cue, Event, Footprint, Position};
use house_defence_world::{query, Boss, Enemy, Task, World};
use rand::Rng;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use tracing::debug;

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration seeding the spawn jitter with `rng_seed`.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Outcome of [`WaveDirector::start_wave`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveStart {
    /// The wave at the current index spawned.
    Spawned {
        /// Number of enemies in the roster.
        enemies: u32,
    },
    /// Every regular wave was cleared and the boss entered the field.
    BossSpawned,
    /// Every regular wave was cleared and the boss fight is disabled.
    SetComplete,
}

/// Owns the lifecycle of the enemy roster.
#[derive(Debug)]
pub struct WaveDirector {
    rng: ChaCha8Rng,
}

impl WaveDirector {
    /// Creates a new wave director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Spawns the wave at the current index, or the boss once the set is done.
    ///
    /// Enemies appear beyond the right edge of the field with their base
    /// statistics scaled for the current set.
    pub fn start_wave(&mut self, world: &mut World, out: &mut Vec<Event>) -> WaveStart {
        let index = world.progression.current_wave();
        let Some(wave) = world.config.waves.get(index).cloned() else {
            if world.config.boss_fight {
                self.spawn_boss(world, out);
                return WaveStart::BossSpawned;
            }
            return WaveStart::SetComplete;
        };

        let wave_set = world.progression.wave_set();
        let field = world.config.field;
        let size = Footprint::square(field.enemy_size);
        world.enemies.clear();
        for (kind, count) in wave.entries() {
            let stats = kind.base_stats().scaled(&world.config.scaling, wave_set);
            for _ in 0..count {
                let jitter = if field.spawn_jitter > 0.0 {
                    self.rng.gen_range(0.0..field.spawn_jitter)
                } else {
                    0.0
                };
                let position = Position::new(field.width + jitter, field.actor_y());
                let id = world.allocate_enemy_id();
                world
                    .enemies
                    .push(Enemy::spawn(id, kind, position, size, stats));
            }
        }

        let enemies = wave.total();
        world.progression.begin_wave();
        world.play(Cue::WaveStart, out);
        out.push(Event::WaveStarted {
            wave: index,
            wave_set,
            enemies,
        });
        debug!(wave = index, wave_set, enemies, "wave started");
        WaveStart::Spawned { enemies }
    }

    /// Moves every living enemy one step toward the player.
    pub fn update(&self, world: &mut World) {
        let player_x = world.player.position().x;
        for enemy in world.enemies.iter_mut().filter(|enemy| enemy.is_alive()) {
            enemy.update(player_x);
        }
    }

    /// Reports whether every enemy in the roster is dead. An empty roster
    /// counts as cleared.
    #[must_use]
    pub fn is_wave_cleared(&self, world: &World) -> bool {
        query::alive_enemies(world) == 0
    }

    /// Spawns the boss for the current set and arms its shooting timer.
    pub fn spawn_boss(&mut self, world: &mut World, out: &mut Vec<Event>) {
        let wave_set = world.progression.wave_set();
        let boss = Boss::spawn(
            &world.config.boss,
            &world.config.scaling,
            wave_set,
            &world.config.field,
        );
        let health = boss.health();
        world.enemies.clear();
        world.boss = Some(boss);
        world.progression.begin_wave();

        let interval = world.config.timing.boss_shot_interval();
        let first_shot = world.now().saturating_add(interval);
        world.schedule.every(Task::BossShot, first_shot, interval);

        world.play(Cue::WaveStart, out);
        out.push(Event::BossSpawned { health });
        debug!(wave_set, health, "boss spawned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use house_defence_core::GameConfig;

    #[test]
    fn spawn_positions_stay_within_the_jitter_band() {
        let mut world = World::new(GameConfig::default());
        let mut director = WaveDirector::new(Config::new(7));
        let mut events = Vec::new();
        for _ in 0..5 {
            let _ = director.start_wave(&mut world, &mut events);
            for enemy in &world.enemies {
                let x = enemy.position().x;
                assert!((1600.0..1800.0).contains(&x), "unexpected spawn x {x}");
                assert_eq!(enemy.position().y, 872.0);
            }
            world.progression.complete_wave();
        }
    }
}
