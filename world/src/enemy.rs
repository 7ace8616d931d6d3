use house_defence_core::{EnemyId, EnemyKind, EnemySnapshot, EnemyStats, Footprint, Position};

/// Hostile actor walking toward the player.
///
/// `alive` mirrors `health > 0` at all times. Dead enemies stay in the roster
/// but neither move nor take further damage.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    position: Position,
    size: Footprint,
    health: f32,
    max_health: f32,
    speed: f32,
    damage: f32,
    alive: bool,
}

impl Enemy {
    /// Creates a living enemy using already scaled statistics.
    #[must_use]
    pub fn spawn(
        id: EnemyId,
        kind: EnemyKind,
        position: Position,
        size: Footprint,
        stats: EnemyStats,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            size,
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            damage: stats.damage,
            alive: stats.health > 0.0,
        }
    }

    /// Moves one step of `speed` toward `player_x`. Dead enemies stay put.
    pub fn update(&mut self, player_x: f32) {
        if !self.alive {
            return;
        }
        let direction = if self.position.x < player_x { 1.0 } else { -1.0 };
        self.position.x += self.speed * direction;
    }

    /// Applies damage and returns `true` when this call killed the enemy.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Identifier of the enemy.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Kind of the enemy.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Footprint used for contact checks.
    #[must_use]
    pub const fn size(&self) -> Footprint {
        self.size
    }

    /// Health left.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Distance travelled per tick.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Damage rating after scaling.
    #[must_use]
    pub const fn damage(&self) -> f32 {
        self.damage
    }

    /// Whether the enemy is still alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Captures a read-only snapshot.
    #[must_use]
    pub fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            health: self.health,
            max_health: self.max_health,
            alive: self.alive,
        }
    }
}
