use std::time::Duration;

use house_defence_core::{Facing, FieldConfig, Footprint, PlayerSnapshot, Position};

/// Defender standing in front of the house.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    position: Position,
    size: Footprint,
    facing: Facing,
    speed: f32,
    min_x: f32,
    max_x: f32,
    last_attack: Option<Duration>,
}

impl Player {
    /// Places the player at the configured start position.
    #[must_use]
    pub fn new(field: &FieldConfig) -> Self {
        Self {
            position: Position::new(field.player_start_x, field.actor_y()),
            size: Footprint::square(field.player_size()),
            facing: Facing::Right,
            speed: field.player_speed,
            min_x: field.house_width,
            max_x: field.player_max_x(),
            last_attack: None,
        }
    }

    /// Turns left and steps toward the house unless already at its wall.
    pub fn move_left(&mut self) {
        self.facing = Facing::Left;
        if self.position.x > self.min_x {
            self.position.x = (self.position.x - self.speed).max(self.min_x);
        }
    }

    /// Turns right and steps toward the field edge unless already there.
    pub fn move_right(&mut self) {
        self.facing = Facing::Right;
        if self.position.x < self.max_x {
            self.position.x = (self.position.x + self.speed).min(self.max_x);
        }
    }

    /// Whether enough time has passed since the last attack.
    #[must_use]
    pub fn ready_to_fire(&self, now: Duration, min_interval: Duration) -> bool {
        match self.last_attack {
            Some(last) => now.saturating_sub(last) >= min_interval,
            None => true,
        }
    }

    /// Records an attack made at `now`.
    pub fn record_attack(&mut self, now: Duration) {
        self.last_attack = Some(now);
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

    /// Direction the player faces.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Captures a read-only snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            size: self.size,
            facing: self.facing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_wall_stops_leftward_steps() {
        let field = FieldConfig {
            player_start_x: 305.0,
            ..FieldConfig::default()
        };
        let mut player = Player::new(&field);
        player.move_left();
        assert_eq!(player.position().x, 300.0);
        assert_eq!(player.facing(), Facing::Left);
        player.move_left();
        assert_eq!(player.position().x, 300.0);
    }

    #[test]
    fn right_edge_stops_rightward_steps() {
        let field = FieldConfig {
            player_start_x: 1470.0,
            ..FieldConfig::default()
        };
        let mut player = Player::new(&field);
        player.move_right();
        player.move_right();
        assert_eq!(player.position().x, 1472.0);
        assert_eq!(player.facing(), Facing::Right);
    }

    #[test]
    fn attack_gate_waits_for_the_interval() {
        let mut player = Player::new(&FieldConfig::default());
        let interval = Duration::from_millis(333);
        assert!(player.ready_to_fire(Duration::ZERO, interval));
        player.record_attack(Duration::ZERO);
        assert!(!player.ready_to_fire(Duration::from_millis(200), interval));
        assert!(player.ready_to_fire(Duration::from_millis(333), interval));
    }
}
