#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the House Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative game state, and the systems that mutate it. Adapters submit
//! [`Intent`] values captured from the player, the game loop feeds them to the
//! systems once per tick, and every observable consequence is published as an
//! [`Event`] for rendering and audio collaborators to drain. Collaborators only
//! ever see read-only snapshots such as [`WorldSnapshot`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod catalog;
mod config;

pub use catalog::{
    BossTuning, EnemyKind, EnemyStats, Scaling, WaveConfig, WaveTable, WeaponCatalog, WeaponId,
    WeaponRange, WeaponSpec, STANDARD_RANGE,
};
pub use config::{ConfigError, Economy, FieldConfig, GameConfig, Timing};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to 8-Bit House Defense.";

/// Menu screen the player currently interacts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Title screen awaiting the first interaction.
    Start,
    /// Inside the house, choosing what to do next.
    House,
    /// Browsing the weapon shop.
    Shop,
    /// Outside, defending the house against waves.
    Defend,
}

/// Horizontal direction the player faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Facing toward the house.
    Left,
    /// Facing toward incoming enemies.
    #[default]
    Right,
}

impl Facing {
    /// Reports whether `x` lies strictly in front of an observer at `origin_x`.
    #[must_use]
    pub fn is_in_front(self, origin_x: f32, x: f32) -> bool {
        match self {
            Self::Right => x > origin_x,
            Self::Left => x < origin_x,
        }
    }
}

/// Location on the play field expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downward.
    pub y: f32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of an axis-aligned footprint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Footprint {
    /// Creates a new footprint.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Square footprint with the provided edge length.
    #[must_use]
    pub const fn square(edge: f32) -> Self {
        Self::new(edge, edge)
    }
}

/// Reports whether two boxes overlap.
///
/// Positions are compared directly and the threshold on each axis is half the
/// sum of both extents, which treats each position as the box centre.
#[must_use]
pub fn boxes_overlap(a: Position, a_size: Footprint, b: Position, b_size: Footprint) -> bool {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    dx < (a_size.width + b_size.width) / 2.0 && dy < (a_size.height + b_size.height) / 2.0
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Item that can be bought in the shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopItem {
    /// A weapon from the catalog.
    Weapon(WeaponId),
    /// One charge of mirror power.
    Mirror,
}

/// Menu entries the player may pick directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuChoice {
    /// Opens the shop from the house.
    Shop,
    /// Listens to the radio in the house.
    Radio,
    /// Heads outside to defend the house.
    Defend,
    /// Searches beneath the oak tree next to the house.
    OakTree,
    /// Adopts the pet.
    Pet,
    /// Buys the item straight away while in the shop.
    Buy(ShopItem),
}

/// Discrete input delivered by the input collaborator.
///
/// The core does not care whether intents originate from a keyboard, touch
/// regions, or a gamepad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Steps the player toward the house.
    MoveLeft,
    /// Steps the player toward the right field edge.
    MoveRight,
    /// Attacks with the selected weapon.
    Fire,
    /// Picks a menu entry.
    Select(MenuChoice),
    /// Moves the shop cursor up.
    CursorUp,
    /// Moves the shop cursor down.
    CursorDown,
    /// Buys the item under the shop cursor.
    Confirm,
    /// Leaves the shop or the defence when allowed.
    Cancel,
}

/// Background music tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTrack {
    /// Calm tune played inside the house.
    House,
    /// Battle tune played while defending.
    Defend,
}

/// Named audio cues handed to the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// A wave begins.
    WaveStart,
    /// An enemy died.
    EnemyDeath,
    /// Something was bought.
    Purchase,
    /// An action was denied.
    NoMoney,
    /// A set was completed.
    Victory,
    /// The player ran out of hearts.
    GameOver,
    /// The player lost a heart.
    PlayerHit,
    /// The radio song.
    RadioSong,
    /// A weapon fired.
    Shoot(WeaponId),
}

impl Cue {
    /// Minimum time between two emissions of the same cue.
    #[must_use]
    pub const fn cooldown(self) -> Duration {
        match self {
            Self::Shoot(WeaponId::Minigun) => Duration::from_millis(100),
            Self::Shoot(WeaponId::Bat) => Duration::from_millis(200),
            Self::Shoot(WeaponId::LaserGun) => Duration::from_millis(150),
            Self::Shoot(WeaponId::Rpg) => Duration::from_millis(500),
            Self::Shoot(WeaponId::Pistol) => Duration::from_millis(250),
            Self::Shoot(WeaponId::Sniper3000) => Duration::from_millis(400),
            Self::EnemyDeath => Duration::from_millis(100),
            _ => Duration::ZERO,
        }
    }

    /// Name of the cue as understood by audio backends.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::WaveStart => "waveStart".to_owned(),
            Self::EnemyDeath => "enemyDeath".to_owned(),
            Self::Purchase => "purchase".to_owned(),
            Self::NoMoney => "noMoney".to_owned(),
            Self::Victory => "victory".to_owned(),
            Self::GameOver => "gameOver".to_owned(),
            Self::PlayerHit => "playerHit".to_owned(),
            Self::RadioSong => "radioSong".to_owned(),
            Self::Shoot(weapon) => format!("shoot.{}", weapon.key()),
        }
    }
}

/// Reasons an action is denied without mutating any state.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    /// The player cannot afford the item.
    #[error("Not enough coins! ({coins} of {price})")]
    InsufficientFunds {
        /// Price of the requested item.
        price: u32,
        /// Coins held by the player.
        coins: u32,
    },
    /// Defending requires a weapon.
    #[error("You need to buy a weapon first!")]
    NoWeapon,
    /// The player cannot leave while enemies are still attacking.
    #[error("Finish the wave before heading back inside!")]
    WaveInProgress,
    /// The weapon is hidden until discovered.
    #[error("{} has not been discovered yet.", .weapon.key())]
    WeaponLocked {
        /// Locked weapon.
        weapon: WeaponId,
    },
    /// Only one mirror charge can be held at a time.
    #[error("You already carry a mirror.")]
    MirrorAlreadyHeld,
    /// The pet has already been adopted.
    #[error("Your pet is already by your side.")]
    PetAlreadyAdopted,
}

/// Events published after every tick for collaborators to react to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the game clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces a screen transition.
    ScreenChanged {
        /// Screen that was active before the transition.
        from: Screen,
        /// Screen that became active.
        to: Screen,
    },
    /// Requests a background music switch.
    MusicChanged {
        /// Track that should play from now on.
        track: MusicTrack,
    },
    /// Requests playback of an audio cue that passed its cooldown.
    CuePlayed {
        /// Cue to play.
        cue: Cue,
    },
    /// Reports that an action was denied.
    ActionRejected {
        /// Reason surfaced to the player.
        reason: ActionError,
    },
    /// Confirms that a weapon was bought and equipped.
    WeaponPurchased {
        /// Weapon now held by the player.
        weapon: WeaponId,
        /// Coins left after the purchase.
        coins: u32,
    },
    /// Confirms that a mirror charge was bought.
    MirrorPurchased,
    /// Confirms that the pet joined the player.
    PetAdopted,
    /// The radio revealed where the scroll is hidden.
    RadioHint {
        /// Message broadcast by the radio.
        message: String,
    },
    /// The secret scroll was found and a weapon unlocked.
    ScrollFound {
        /// Weapon unlocked by the scroll.
        unlocked: WeaponId,
    },
    /// Confirms that a wave spawned.
    WaveStarted {
        /// Zero-based index of the wave within the set.
        wave: usize,
        /// Zero-based set index driving the scaling.
        wave_set: u32,
        /// Number of enemies spawned.
        enemies: u32,
    },
    /// Every enemy of the wave is dead.
    WaveCleared {
        /// Zero-based index of the cleared wave.
        wave: usize,
    },
    /// An attack damaged an enemy.
    EnemyHit {
        /// Enemy that took damage.
        enemy: EnemyId,
        /// Damage applied.
        damage: f32,
    },
    /// An enemy died.
    EnemyKilled {
        /// Enemy that died.
        enemy: EnemyId,
        /// Kind of the enemy.
        kind: EnemyKind,
        /// Coins credited for the kill.
        bounty: u32,
    },
    /// The player lost hearts.
    PlayerHit {
        /// Hearts lost in this tick from this source.
        hearts_lost: u32,
        /// Hearts left afterwards.
        hearts: u32,
    },
    /// The boss entered the field.
    BossSpawned {
        /// Starting health of the boss.
        health: f32,
    },
    /// The boss took damage.
    BossHit {
        /// Damage applied.
        damage: f32,
        /// Health left afterwards.
        health: f32,
    },
    /// A boss projectile bounced off the mirror.
    ProjectileReflected,
    /// The boss was defeated.
    BossDefeated {
        /// Coins credited for the victory.
        bounty: u32,
    },
    /// A set was completed.
    Victory {
        /// Set index the next cycle will use.
        next_wave_set: u32,
    },
    /// The player ran out of hearts and the run was reset.
    GameOver,
}

/// Read-only snapshot of the player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Position of the player.
    pub position: Position,
    /// Footprint of the player.
    pub size: Footprint,
    /// Direction the player faces.
    pub facing: Facing,
}

/// Read-only snapshot of a single enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Position of the enemy.
    pub position: Position,
    /// Health left.
    pub health: f32,
    /// Health the enemy spawned with.
    pub max_health: f32,
    /// Whether the enemy is still alive.
    pub alive: bool,
}

/// Read-only snapshot of a boss projectile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    /// Position of the projectile.
    pub position: Position,
    /// Edge length of the projectile.
    pub size: f32,
}

/// Read-only snapshot of the boss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BossSnapshot {
    /// Position of the boss.
    pub position: Position,
    /// Footprint of the boss.
    pub size: Footprint,
    /// Health left.
    pub health: f32,
    /// Health the boss spawned with.
    pub max_health: f32,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectileSnapshot>,
}

/// Read-only snapshot of the progression counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    /// Active screen.
    pub screen: Screen,
    /// Coins held.
    pub coins: u32,
    /// Hearts left.
    pub hearts: u32,
    /// Zero-based wave index within the set.
    pub current_wave: usize,
    /// Number of waves in a set.
    pub total_waves: usize,
    /// Zero-based set index.
    pub wave_set: u32,
    /// Weapon held by the player, if any.
    pub selected_weapon: Option<WeaponId>,
    /// Whether a wave or boss fight is underway.
    pub wave_in_progress: bool,
    /// Whether the pet accompanies the player.
    pub pet_active: bool,
    /// Whether a mirror charge is held.
    pub mirror_power: bool,
    /// Whether the secret scroll was found.
    pub scroll_found: bool,
    /// Index of the highlighted shop entry.
    pub shop_cursor: usize,
}

/// Complete read-only view handed to the render collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Game clock.
    pub now: Duration,
    /// Player state.
    pub player: PlayerSnapshot,
    /// Enemies in the roster, dead ones included.
    pub enemies: Vec<EnemySnapshot>,
    /// Boss state, if one is on the field.
    pub boss: Option<BossSnapshot>,
    /// Progression counters.
    pub progression: ProgressionSnapshot,
    /// Shop entries in cursor order, secret weapons omitted until unlocked.
    pub shop: Vec<ShopItem>,
}
