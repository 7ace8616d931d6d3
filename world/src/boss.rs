use std::time::Duration;

use house_defence_core::{
    BossSnapshot, BossTuning, FieldConfig, Footprint, Position, ProjectileSnapshot, Scaling,
};

/// Projectile fired by the boss along the ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    /// Current position.
    pub position: Position,
    /// Signed distance travelled per tick.
    pub speed: f32,
    /// Edge length of the square footprint.
    pub size: f32,
}

impl Projectile {
    /// Moves the projectile by its speed.
    pub fn advance(&mut self) {
        self.position.x += self.speed;
    }

    /// Footprint used for collision checks.
    #[must_use]
    pub const fn footprint(&self) -> Footprint {
        Footprint::square(self.size)
    }

    /// Whether the projectile left the horizontal extent of the field.
    #[must_use]
    pub fn is_outside(&self, field_width: f32) -> bool {
        self.position.x < 0.0 || self.position.x > field_width
    }
}

/// Boss closing every set of waves.
#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    position: Position,
    size: Footprint,
    health: f32,
    max_health: f32,
    speed: f32,
    damage: f32,
    standoff: f32,
    projectile_speed: f32,
    projectile_size: f32,
    alive: bool,
    last_shot: Option<Duration>,
    projectiles: Vec<Projectile>,
}

impl Boss {
    /// Spawns the boss just beyond the right edge, scaled for the set.
    #[must_use]
    pub fn spawn(tuning: &BossTuning, scaling: &Scaling, wave_set: u32, field: &FieldConfig) -> Self {
        let health = tuning.health * scaling.health_multiplier(wave_set);
        Self {
            position: Position::new(
                field.width,
                field.height - field.ground_height - tuning.height,
            ),
            size: Footprint::new(tuning.width, tuning.height),
            health,
            max_health: health,
            speed: tuning.speed * scaling.speed_multiplier(wave_set),
            damage: tuning.damage * scaling.damage_multiplier(wave_set),
            standoff: tuning.standoff,
            projectile_speed: tuning.projectile_speed,
            projectile_size: tuning.projectile_size,
            alive: true,
            last_shot: None,
            projectiles: Vec::new(),
        }
    }

    /// Approaches the player until the stand-off distance is reached.
    pub fn update(&mut self, player_x: f32) {
        if !self.alive {
            return;
        }
        let offset = player_x - self.position.x;
        if offset.abs() <= self.standoff {
            return;
        }
        self.position.x += self.speed * offset.signum();
    }

    /// Fires a projectile along the ground toward `target`.
    pub fn shoot(&mut self, now: Duration, target: Position) {
        if !self.alive {
            return;
        }
        let direction = if target.x < self.position.x { -1.0 } else { 1.0 };
        self.projectiles.push(Projectile {
            position: Position::new(self.position.x, target.y),
            speed: self.projectile_speed * direction,
            size: self.projectile_size,
        });
        self.last_shot = Some(now);
    }

    /// Applies damage and returns `true` when this call defeated the boss.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.alive = false;
            self.projectiles.clear();
            return true;
        }
        false
    }

    /// Projectiles in flight.
    #[must_use]
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Mutable access to the projectiles in flight.
    pub fn projectiles_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.projectiles
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Health left.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Health the boss spawned with.
    #[must_use]
    pub const fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Damage reflected onto the boss by the mirror.
    #[must_use]
    pub const fn damage(&self) -> f32 {
        self.damage
    }

    /// Whether the boss is still fighting.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Time of the most recent shot.
    #[must_use]
    pub const fn last_shot(&self) -> Option<Duration> {
        self.last_shot
    }

    /// Captures a read-only snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BossSnapshot {
        BossSnapshot {
            position: self.position,
            size: self.size,
            health: self.health,
            max_health: self.max_health,
            projectiles: self
                .projectiles
                .iter()
                .map(|projectile| ProjectileSnapshot {
                    position: projectile.position,
                    size: projectile.size,
                })
                .collect(),
        }
    }
}
