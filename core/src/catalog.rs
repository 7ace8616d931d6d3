//! Strongly typed catalogs describing weapons, enemies and waves.

use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Reach of every weapon that does not cover the whole field.
pub const STANDARD_RANGE: f32 = 400.0;

/// Identifier of a weapon offered by the shop.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum WeaponId {
    /// Rapid-fire gun with modest damage per round.
    Minigun,
    /// Melee bat.
    Bat,
    /// Cheap laser that reaches across the whole field.
    LaserGun,
    /// Rocket launcher with a long reload.
    Rpg,
    /// Entry-level sidearm.
    Pistol,
    /// Secret rifle unlocked by the scroll beneath the oak tree.
    Sniper3000,
}

impl WeaponId {
    /// Every weapon in shop order.
    pub const ALL: [WeaponId; 6] = [
        Self::Minigun,
        Self::Bat,
        Self::LaserGun,
        Self::Rpg,
        Self::Pistol,
        Self::Sniper3000,
    ];

    /// Stable key used by cue names and configuration files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Minigun => "minigun",
            Self::Bat => "bat",
            Self::LaserGun => "laserGun",
            Self::Rpg => "rpg",
            Self::Pistol => "pistol",
            Self::Sniper3000 => "sniper3000",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Minigun => 0,
            Self::Bat => 1,
            Self::LaserGun => 2,
            Self::Rpg => 3,
            Self::Pistol => 4,
            Self::Sniper3000 => 5,
        }
    }
}

/// How far a weapon reaches from the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponRange {
    /// Fixed reach of [`STANDARD_RANGE`] world units.
    #[default]
    Standard,
    /// Covers the entire width of the play field.
    FullField,
}

impl WeaponRange {
    /// Resolves the reach in world units for a field of the given width.
    #[must_use]
    pub fn reach(self, field_width: f32) -> f32 {
        match self {
            Self::Standard => STANDARD_RANGE,
            Self::FullField => field_width,
        }
    }
}

/// Shop entry describing a single weapon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    /// Display name shown by the shop.
    pub name: String,
    /// Price in coins.
    pub price: u32,
    /// Damage applied per successful attack.
    pub damage: f32,
    /// Maximum number of attacks per second.
    pub fire_rate: f32,
    /// Reach of the weapon.
    #[serde(default)]
    pub range: WeaponRange,
    /// Secret weapons are hidden until unlocked by a discovery event.
    #[serde(default)]
    pub secret: bool,
}

impl WeaponSpec {
    fn new(name: &str, price: u32, damage: f32, fire_rate: f32) -> Self {
        Self {
            name: name.to_owned(),
            price,
            damage,
            fire_rate,
            range: WeaponRange::Standard,
            secret: false,
        }
    }

    fn with_range(mut self, range: WeaponRange) -> Self {
        self.range = range;
        self
    }

    fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Minimum time that must elapse between two successful attacks.
    ///
    /// Equals `1000 / fire_rate` milliseconds. A non-positive fire rate never
    /// reloads.
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        if self.fire_rate <= 0.0 {
            return Duration::MAX;
        }
        let nanos = (1e9 / f64::from(self.fire_rate)).round();
        if nanos >= u64::MAX as f64 {
            return Duration::MAX;
        }
        Duration::from_nanos(nanos as u64)
    }
}

/// Validated catalog that holds exactly one entry per [`WeaponId`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<WeaponId, WeaponSpec>",
    into = "BTreeMap<WeaponId, WeaponSpec>"
)]
pub struct WeaponCatalog {
    specs: Vec<WeaponSpec>,
}

impl WeaponCatalog {
    /// Retrieves the entry for the provided weapon.
    #[must_use]
    pub fn get(&self, weapon: WeaponId) -> &WeaponSpec {
        &self.specs[weapon.index()]
    }

    /// Iterates over the catalog in shop order.
    pub fn iter(&self) -> impl Iterator<Item = (WeaponId, &WeaponSpec)> {
        WeaponId::ALL.into_iter().zip(self.specs.iter())
    }
}

impl Default for WeaponCatalog {
    fn default() -> Self {
        Self {
            specs: vec![
                WeaponSpec::new("Minigun", 100, 20.0, 10.0),
                WeaponSpec::new("Bat", 50, 8.0, 2.0),
                WeaponSpec::new("Laser Gun", 10, 1.0, 8.0).with_range(WeaponRange::FullField),
                WeaponSpec::new("RPG", 1000, 42.0, 0.5),
                WeaponSpec::new("Pistol", 100, 2.0, 3.0),
                WeaponSpec::new("Sniper3000", 0, 100.0, 1.0)
                    .with_range(WeaponRange::FullField)
                    .secret(),
            ],
        }
    }
}

impl TryFrom<BTreeMap<WeaponId, WeaponSpec>> for WeaponCatalog {
    type Error = ConfigError;

    fn try_from(mut entries: BTreeMap<WeaponId, WeaponSpec>) -> Result<Self, Self::Error> {
        let mut specs = Vec::with_capacity(WeaponId::ALL.len());
        for weapon in WeaponId::ALL {
            let spec = entries
                .remove(&weapon)
                .ok_or(ConfigError::MissingWeapon { weapon })?;
            if !(spec.fire_rate.is_finite() && spec.fire_rate > 0.0) {
                return Err(ConfigError::InvalidFireRate {
                    weapon,
                    fire_rate: spec.fire_rate,
                });
            }
            if !(spec.damage.is_finite() && spec.damage >= 0.0) {
                return Err(ConfigError::InvalidDamage {
                    weapon,
                    damage: spec.damage,
                });
            }
            specs.push(spec);
        }
        Ok(Self { specs })
    }
}

impl From<WeaponCatalog> for BTreeMap<WeaponId, WeaponSpec> {
    fn from(catalog: WeaponCatalog) -> Self {
        WeaponId::ALL.into_iter().zip(catalog.specs).collect()
    }
}

/// Kinds of hostile actors that attack the house.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Slow and sturdy.
    Zombie,
    /// Balanced attacker.
    Skeleton,
    /// Fast but fragile.
    Snake,
    /// Slowest and toughest regular enemy.
    Monster,
    /// Quick and durable.
    Vampire,
}

impl EnemyKind {
    /// Base statistics before any wave-set scaling.
    #[must_use]
    pub const fn base_stats(self) -> EnemyStats {
        match self {
            Self::Zombie => EnemyStats::new(100.0, 0.5, 10.0),
            Self::Skeleton => EnemyStats::new(70.0, 1.0, 15.0),
            Self::Snake => EnemyStats::new(50.0, 1.5, 5.0),
            Self::Monster => EnemyStats::new(150.0, 0.3, 20.0),
            Self::Vampire => EnemyStats::new(120.0, 1.0, 15.0),
        }
    }

    /// Coins credited to the player when an enemy of this kind dies.
    #[must_use]
    pub const fn bounty(self) -> u32 {
        match self {
            Self::Zombie => 10,
            Self::Skeleton => 15,
            Self::Snake => 5,
            Self::Monster => 25,
            Self::Vampire => 20,
        }
    }
}

/// Health, speed and damage of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Starting health.
    pub health: f32,
    /// Distance travelled per tick.
    pub speed: f32,
    /// Damage rating used by presentation and scaling.
    pub damage: f32,
}

impl EnemyStats {
    /// Creates a new set of statistics.
    #[must_use]
    pub const fn new(health: f32, speed: f32, damage: f32) -> Self {
        Self {
            health,
            speed,
            damage,
        }
    }

    /// Applies `base * factor^wave_set` to each statistic.
    #[must_use]
    pub fn scaled(self, scaling: &Scaling, wave_set: u32) -> Self {
        Self {
            health: self.health * scaling.health_multiplier(wave_set),
            speed: self.speed * scaling.speed_multiplier(wave_set),
            damage: self.damage * scaling.damage_multiplier(wave_set),
        }
    }
}

/// Multipliers compounded once per completed set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scaling {
    /// Health growth factor.
    pub health: f32,
    /// Damage growth factor.
    pub damage: f32,
    /// Speed growth factor.
    pub speed: f32,
}

impl Scaling {
    /// Health multiplier for the provided set.
    #[must_use]
    pub fn health_multiplier(&self, wave_set: u32) -> f32 {
        compound(self.health, wave_set)
    }

    /// Damage multiplier for the provided set.
    #[must_use]
    pub fn damage_multiplier(&self, wave_set: u32) -> f32 {
        compound(self.damage, wave_set)
    }

    /// Speed multiplier for the provided set.
    #[must_use]
    pub fn speed_multiplier(&self, wave_set: u32) -> f32 {
        compound(self.speed, wave_set)
    }
}

impl Default for Scaling {
    fn default() -> Self {
        Self {
            health: 1.5,
            damage: 1.2,
            speed: 1.1,
        }
    }
}

fn compound(factor: f32, wave_set: u32) -> f32 {
    factor.powi(i32::try_from(wave_set).unwrap_or(i32::MAX))
}

/// Enemy counts spawned together as one wave.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveConfig {
    counts: BTreeMap<EnemyKind, u32>,
}

impl WaveConfig {
    /// Creates a wave from kind/count pairs. Repeated kinds accumulate.
    #[must_use]
    pub fn new(entries: &[(EnemyKind, u32)]) -> Self {
        let mut counts = BTreeMap::new();
        for &(kind, count) in entries {
            *counts.entry(kind).or_insert(0) += count;
        }
        Self { counts }
    }

    /// Kind/count pairs in spawn order.
    pub fn entries(&self) -> impl Iterator<Item = (EnemyKind, u32)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Total number of enemies spawned by the wave.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

/// Ordered list of waves that compose one set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveTable {
    waves: Vec<WaveConfig>,
}

impl WaveTable {
    /// Creates a table from the provided waves.
    #[must_use]
    pub fn new(waves: Vec<WaveConfig>) -> Self {
        Self { waves }
    }

    /// Number of regular waves in a set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    /// Reports whether the table contains no waves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Retrieves the wave at the provided index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&WaveConfig> {
        self.waves.get(index)
    }
}

impl Default for WaveTable {
    fn default() -> Self {
        use EnemyKind::{Monster, Skeleton, Snake, Vampire, Zombie};

        Self::new(vec![
            WaveConfig::new(&[(Zombie, 3)]),
            WaveConfig::new(&[(Zombie, 5)]),
            WaveConfig::new(&[(Zombie, 4), (Skeleton, 2)]),
            WaveConfig::new(&[(Skeleton, 4), (Snake, 2)]),
            WaveConfig::new(&[(Zombie, 3), (Snake, 5)]),
            WaveConfig::new(&[(Skeleton, 4), (Monster, 2)]),
            WaveConfig::new(&[(Snake, 4), (Vampire, 3)]),
            WaveConfig::new(&[(Monster, 3), (Vampire, 3)]),
            WaveConfig::new(&[
                (Zombie, 5),
                (Skeleton, 3),
                (Snake, 3),
                (Monster, 2),
                (Vampire, 2),
            ]),
        ])
    }
}

/// Tuning for the boss that closes every set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    /// Health before set scaling.
    pub health: f32,
    /// Distance travelled per tick.
    pub speed: f32,
    /// Damage dealt back to the boss by a reflected projectile.
    pub damage: f32,
    /// Width of the boss footprint.
    pub width: f32,
    /// Height of the boss footprint.
    pub height: f32,
    /// Distance travelled by a projectile per tick.
    pub projectile_speed: f32,
    /// Edge length of a projectile's square footprint.
    pub projectile_size: f32,
    /// Horizontal distance to the player at which the boss stops advancing.
    pub standoff: f32,
    /// Coins credited when the boss is defeated.
    pub bounty: u32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            health: 1000.0,
            speed: 0.4,
            damage: 100.0,
            width: 192.0,
            height: 192.0,
            projectile_speed: 6.0,
            projectile_size: 16.0,
            standoff: 300.0,
            bounty: 500,
        }
    }
}
