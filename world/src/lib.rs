#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for House Defence.
//!
//! [`World`] is the single mutable state handed by `&mut` to the systems every
//! tick. Entities guard their own invariants; the aggregate exposes its parts
//! directly so that a system can borrow several of them at once.

mod boss;
mod cues;
mod enemy;
mod player;
mod progression;
mod schedule;

use std::time::Duration;

pub use boss::{Boss, Projectile};
pub use cues::CueGate;
pub use enemy::Enemy;
pub use player::Player;
pub use progression::Progression;
pub use schedule::{Schedule, Task};

use house_defence_core::{ActionError, Cue, EnemyId, Event, GameConfig, WELCOME_BANNER};
use tracing::debug;

/// Represents the authoritative House Defence game state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    clock: Duration,
    next_enemy_id: u32,
    /// Configuration the session was created with.
    pub config: GameConfig,
    /// The defender.
    pub player: Player,
    /// Roster of the current wave, dead enemies included until it clears.
    pub enemies: Vec<Enemy>,
    /// Boss of the current set, when one is fighting.
    pub boss: Option<Boss>,
    /// Economy, counters and screen.
    pub progression: Progression,
    /// Pending timers.
    pub schedule: Schedule,
    /// Cooldown bookkeeping for audio cues.
    pub cues: CueGate,
}

impl World {
    /// Creates a fresh session on the start screen.
    ///
    /// The configuration is expected to be validated by the caller.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            clock: Duration::ZERO,
            next_enemy_id: 0,
            player: Player::new(&config.field),
            enemies: Vec::new(),
            boss: None,
            progression: Progression::new(&config.economy, config.waves.len()),
            schedule: Schedule::default(),
            cues: CueGate::default(),
            config,
        }
    }

    /// Current game clock.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock
    }

    /// Advances the game clock by `dt`.
    pub fn advance_clock(&mut self, dt: Duration, out: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out.push(Event::TimeAdvanced { dt });
    }

    /// Hands out the next unused enemy identifier.
    pub fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        id
    }

    /// Publishes `cue` if its cooldown has elapsed.
    pub fn play(&mut self, cue: Cue, out: &mut Vec<Event>) {
        self.cues.emit(cue, self.clock, out);
    }

    /// Publishes a refused action together with the denial cue.
    pub fn reject(&mut self, reason: ActionError, out: &mut Vec<Event>) {
        debug!(%reason, "action rejected");
        out.push(Event::ActionRejected { reason });
        self.play(Cue::NoMoney, out);
    }

    /// Clears the battlefield after the last heart was lost.
    ///
    /// Enemies, the boss and every pending timer are dropped, hearts are
    /// restored and the player is sent back into the house.
    pub fn reset_after_game_over(&mut self, out: &mut Vec<Event>) {
        self.enemies.clear();
        self.boss = None;
        self.schedule.clear();
        self.progression.reset_after_game_over(out);
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use house_defence_core::{EnemySnapshot, WorldSnapshot};

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Captures the enemies of the roster ordered by identifier.
    #[must_use]
    pub fn enemy_snapshots(world: &World) -> Vec<EnemySnapshot> {
        let mut snapshots: Vec<EnemySnapshot> =
            world.enemies.iter().map(|enemy| enemy.snapshot()).collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        snapshots
    }

    /// Number of enemies in the roster that are still alive.
    #[must_use]
    pub fn alive_enemies(world: &World) -> usize {
        world.enemies.iter().filter(|enemy| enemy.is_alive()).count()
    }

    /// Captures the complete read-only view handed to collaborators.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        WorldSnapshot {
            now: world.now(),
            player: world.player.snapshot(),
            enemies: enemy_snapshots(world),
            boss: world
                .boss
                .as_ref()
                .filter(|boss| boss.is_alive())
                .map(|boss| boss.snapshot()),
            progression: world.progression.snapshot(),
            shop: world.progression.shop_entries(&world.config.weapons),
        }
    }
}
