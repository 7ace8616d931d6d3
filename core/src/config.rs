//! Game configuration and its load-time validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BossTuning, Scaling, WaveTable, WeaponCatalog, WeaponId};

/// Errors reported while validating a [`GameConfig`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The weapon catalog lacks an entry for a known weapon.
    #[error("weapon catalog is missing an entry for `{}`", .weapon.key())]
    MissingWeapon {
        /// Weapon without an entry.
        weapon: WeaponId,
    },
    /// A weapon declared a fire rate that is not a positive number.
    #[error("weapon `{}` has invalid fire rate {fire_rate}", .weapon.key())]
    InvalidFireRate {
        /// Offending weapon.
        weapon: WeaponId,
        /// Rejected fire rate.
        fire_rate: f32,
    },
    /// A weapon declared negative or non-finite damage.
    #[error("weapon `{}` has invalid damage {damage}", .weapon.key())]
    InvalidDamage {
        /// Offending weapon.
        weapon: WeaponId,
        /// Rejected damage.
        damage: f32,
    },
    /// The wave table contains no waves.
    #[error("wave table must contain at least one wave")]
    EmptyWaveTable,
    /// A setting that must be strictly positive was not.
    #[error("`{setting}` must be positive (received {value})")]
    NotPositive {
        /// Dotted path of the setting.
        setting: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The house wall leaves no room for the player on the field.
    #[error("house width {house_width} leaves no room on a field {field_width} wide")]
    HouseTooWide {
        /// Configured house width.
        house_width: f32,
        /// Configured field width.
        field_width: f32,
    },
}

/// Geometry of the play field and the player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Width of the field in world units.
    pub width: f32,
    /// Height of the field in world units.
    pub height: f32,
    /// Height of the ground strip below the actors.
    pub ground_height: f32,
    /// Width of the house; the player cannot walk into it.
    pub house_width: f32,
    /// Horizontal start position of the player.
    pub player_start_x: f32,
    /// Distance the player moves per movement intent.
    pub player_speed: f32,
    /// Edge length of the player sprite before scaling.
    pub sprite_size: f32,
    /// Scale applied to the player sprite.
    pub sprite_scale: f32,
    /// Edge length of a regular enemy.
    pub enemy_size: f32,
    /// Horizontal jitter applied to spawn positions beyond the right edge.
    pub spawn_jitter: f32,
}

impl FieldConfig {
    /// Edge length of the player footprint.
    #[must_use]
    pub fn player_size(&self) -> f32 {
        self.sprite_size * self.sprite_scale
    }

    /// Vertical position shared by the player and walking enemies.
    #[must_use]
    pub fn actor_y(&self) -> f32 {
        self.height - self.ground_height - self.player_size()
    }

    /// Rightmost position the player may occupy.
    #[must_use]
    pub fn player_max_x(&self) -> f32 {
        self.width - self.player_size()
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 1200.0,
            ground_height: 200.0,
            house_width: 300.0,
            player_start_x: 200.0,
            player_speed: 10.0,
            sprite_size: 32.0,
            sprite_scale: 4.0,
            enemy_size: 32.0,
            spawn_jitter: 200.0,
        }
    }
}

/// Coin and heart economy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Economy {
    /// Coins available at the start of a session.
    pub starting_coins: u32,
    /// Hearts restored at the start and after every game over.
    pub max_hearts: u32,
    /// Price of adopting the pet.
    pub pet_price: u32,
    /// Price of one mirror power charge.
    pub mirror_price: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            starting_coins: 1000,
            max_hearts: 15,
            pet_price: 250,
            mirror_price: 150,
        }
    }
}

/// Delays of the scheduled tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Pause between clearing a wave and spawning the next one.
    pub wave_restart_delay_ms: u64,
    /// Period between two boss projectiles.
    pub boss_shot_interval_ms: u64,
}

impl Timing {
    /// Pause between clearing a wave and spawning the next one.
    #[must_use]
    pub const fn wave_restart_delay(&self) -> Duration {
        Duration::from_millis(self.wave_restart_delay_ms)
    }

    /// Period between two boss projectiles.
    #[must_use]
    pub const fn boss_shot_interval(&self) -> Duration {
        Duration::from_millis(self.boss_shot_interval_ms)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            wave_restart_delay_ms: 2000,
            boss_shot_interval_ms: 2000,
        }
    }
}

/// Complete configuration consumed by the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Field and player geometry.
    pub field: FieldConfig,
    /// Weapons offered by the shop.
    pub weapons: WeaponCatalog,
    /// Waves composing one set.
    pub waves: WaveTable,
    /// Per-set growth of enemy statistics.
    pub scaling: Scaling,
    /// Boss tuning.
    pub boss: BossTuning,
    /// Coins, hearts and prices.
    pub economy: Economy,
    /// Scheduled task delays.
    pub timing: Timing,
    /// When disabled, finishing the last wave is an immediate victory.
    pub boss_fight: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            weapons: WeaponCatalog::default(),
            waves: WaveTable::default(),
            scaling: Scaling::default(),
            boss: BossTuning::default(),
            economy: Economy::default(),
            timing: Timing::default(),
            boss_fight: true,
        }
    }
}

impl GameConfig {
    /// Checks the cross-field invariants the catalogs cannot express alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waves.is_empty() {
            return Err(ConfigError::EmptyWaveTable);
        }

        let field = &self.field;
        positive("field.width", field.width)?;
        positive("field.height", field.height)?;
        positive("field.sprite_size", field.sprite_size)?;
        positive("field.sprite_scale", field.sprite_scale)?;
        positive("field.enemy_size", field.enemy_size)?;
        if field.house_width >= field.player_max_x() {
            return Err(ConfigError::HouseTooWide {
                house_width: field.house_width,
                field_width: field.width,
            });
        }

        positive("scaling.health", self.scaling.health)?;
        positive("scaling.damage", self.scaling.damage)?;
        positive("scaling.speed", self.scaling.speed)?;

        positive("boss.health", self.boss.health)?;
        positive("boss.projectile_speed", self.boss.projectile_speed)?;
        positive("boss.projectile_size", self.boss.projectile_size)?;

        if self.economy.max_hearts == 0 {
            return Err(ConfigError::NotPositive {
                setting: "economy.max_hearts",
                value: 0.0,
            });
        }
        if self.timing.boss_shot_interval_ms == 0 {
            return Err(ConfigError::NotPositive {
                setting: "timing.boss_shot_interval_ms",
                value: 0.0,
            });
        }

        Ok(())
    }
}

fn positive(setting: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive {
            setting,
            value: f64::from(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn actors_stand_on_the_ground() {
        let field = FieldConfig::default();
        assert_eq!(field.player_size(), 128.0);
        assert_eq!(field.actor_y(), 872.0);
    }

    #[test]
    fn empty_wave_table_is_rejected() {
        let config = GameConfig {
            waves: WaveTable::new(Vec::new()),
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyWaveTable));
    }

    #[test]
    fn negative_scaling_is_rejected() {
        let mut config = GameConfig::default();
        config.scaling.speed = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                setting: "scaling.speed",
                ..
            })
        ));
    }

    #[test]
    fn house_must_leave_room_for_the_player() {
        let mut config = GameConfig::default();
        config.field.house_width = 1500.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::HouseTooWide { .. })
        ));
    }
}
