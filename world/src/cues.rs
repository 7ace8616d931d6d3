use std::{collections::HashMap, time::Duration};

use house_defence_core::{Cue, Event};

/// Enforces per-cue cooldowns before cues reach the audio collaborator.
#[derive(Clone, Debug, Default)]
pub struct CueGate {
    last_played: HashMap<Cue, Duration>,
}

impl CueGate {
    /// Reports whether `cue` may play at `now` and records it when it may.
    pub fn admit(&mut self, cue: Cue, now: Duration) -> bool {
        let cooldown = cue.cooldown();
        if cooldown.is_zero() {
            return true;
        }
        if let Some(last) = self.last_played.get(&cue) {
            if now.saturating_sub(*last) < cooldown {
                return false;
            }
        }
        let _ = self.last_played.insert(cue, now);
        true
    }

    /// Publishes `cue` when its cooldown has elapsed.
    pub fn emit(&mut self, cue: Cue, now: Duration, out: &mut Vec<Event>) {
        if self.admit(cue, now) {
            out.push(Event::CuePlayed { cue });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use house_defence_core::WeaponId;

    #[test]
    fn cooldown_suppresses_rapid_repeats() {
        let mut gate = CueGate::default();
        let cue = Cue::Shoot(WeaponId::Minigun);
        assert!(gate.admit(cue, Duration::ZERO));
        assert!(!gate.admit(cue, Duration::from_millis(99)));
        assert!(gate.admit(cue, Duration::from_millis(100)));
    }

    #[test]
    fn cooldowns_are_tracked_per_cue() {
        let mut gate = CueGate::default();
        assert!(gate.admit(Cue::Shoot(WeaponId::Bat), Duration::ZERO));
        assert!(gate.admit(Cue::EnemyDeath, Duration::ZERO));
        assert!(!gate.admit(Cue::EnemyDeath, Duration::from_millis(50)));
    }

    #[test]
    fn cues_without_cooldown_always_play() {
        let mut gate = CueGate::default();
        let mut out = Vec::new();
        gate.emit(Cue::PlayerHit, Duration::ZERO, &mut out);
        gate.emit(Cue::PlayerHit, Duration::ZERO, &mut out);
        assert_eq!(out.len(), 2);
    }
}
