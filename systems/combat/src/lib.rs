#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Combat resolution between the player, the enemy roster and the boss.
//!
//! The resolver mutates the [`World`] directly and reports consequences that
//! require a transition of the whole session through [`CombatOutcome`]. The
//! game loop owns those transitions.

use house_defence_core::{boxes_overlap, Cue, Event, Facing, Position};
use house_defence_world::{Boss, Enemy, World};
use tracing::debug;

/// Consequence of a combat step that the caller must act upon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Nothing beyond the published events.
    Continue,
    /// The boss ran out of health.
    BossDefeated,
    /// The player ran out of hearts.
    PlayerDefeated,
}

/// Target picked by [`select_target`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// The boss.
    Boss,
    /// Index of an enemy within the roster.
    Enemy(usize),
}

/// Picks what an attack from `origin` hits.
///
/// A living boss within `reach` always takes precedence and is hit regardless
/// of facing. Otherwise the nearest living enemy strictly closer than `reach`
/// and in front of the player is picked; ties go to the earliest roster entry.
#[must_use]
pub fn select_target(
    origin: Position,
    facing: Facing,
    reach: f32,
    boss: Option<&Boss>,
    enemies: &[Enemy],
) -> Option<Target> {
    if let Some(boss) = boss.filter(|boss| boss.is_alive()) {
        if (boss.position().x - origin.x).abs() < reach {
            return Some(Target::Boss);
        }
    }

    let mut best: Option<(usize, f32)> = None;
    for (index, enemy) in enemies.iter().enumerate() {
        if !enemy.is_alive() {
            continue;
        }
        let x = enemy.position().x;
        let distance = (x - origin.x).abs();
        if distance >= reach || !facing.is_in_front(origin.x, x) {
            continue;
        }
        match best {
            Some((_, closest)) if closest <= distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| Target::Enemy(index))
}

/// Resolves attacks, contact damage and boss projectiles.
#[derive(Debug, Default)]
pub struct CombatResolver;

impl CombatResolver {
    /// Creates a new combat resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolves one attack with the selected weapon.
    ///
    /// Attempts inside the weapon's minimum interval are silent no-ops. An
    /// attack that finds no target still counts as a shot.
    pub fn resolve_attack(&self, world: &mut World, out: &mut Vec<Event>) -> CombatOutcome {
        let Some(weapon) = world.progression.selected_weapon() else {
            return CombatOutcome::Continue;
        };
        let spec = world.config.weapons.get(weapon);
        let damage = spec.damage;
        let interval = spec.min_interval();
        let reach = spec.range.reach(world.config.field.width);

        let now = world.now();
        if !world.player.ready_to_fire(now, interval) {
            return CombatOutcome::Continue;
        }
        world.player.record_attack(now);
        world.play(Cue::Shoot(weapon), out);

        let target = select_target(
            world.player.position(),
            world.player.facing(),
            reach,
            world.boss.as_ref(),
            &world.enemies,
        );
        let pet = world.progression.pet_active();
        match target {
            None => CombatOutcome::Continue,
            Some(Target::Boss) => {
                let Some(boss) = world.boss.as_mut() else {
                    return CombatOutcome::Continue;
                };
                let damage = if pet { boss.max_health() / 5.0 } else { damage };
                let defeated = boss.take_damage(damage);
                out.push(Event::BossHit {
                    damage,
                    health: boss.health().max(0.0),
                });
                if defeated {
                    credit_boss_bounty(world, out);
                    return CombatOutcome::BossDefeated;
                }
                CombatOutcome::Continue
            }
            Some(Target::Enemy(index)) => {
                let Some(enemy) = world.enemies.get_mut(index) else {
                    return CombatOutcome::Continue;
                };
                let damage = if pet { enemy.health() } else { damage };
                let killed = enemy.take_damage(damage);
                let (id, kind) = (enemy.id(), enemy.kind());
                out.push(Event::EnemyHit { enemy: id, damage });
                if killed {
                    let bounty = kind.bounty();
                    world.progression.credit(bounty);
                    world.play(Cue::EnemyDeath, out);
                    out.push(Event::EnemyKilled {
                        enemy: id,
                        kind,
                        bounty,
                    });
                }
                CombatOutcome::Continue
            }
        }
    }

    /// Costs one heart for every living enemy touching the player.
    pub fn check_contact_damage(&self, world: &mut World, out: &mut Vec<Event>) -> CombatOutcome {
        let player = world.player.position();
        let player_size = world.player.size();
        let touching = world
            .enemies
            .iter()
            .filter(|enemy| enemy.is_alive())
            .filter(|enemy| boxes_overlap(player, player_size, enemy.position(), enemy.size()))
            .count();

        let mut hearts_lost = 0;
        for _ in 0..touching {
            let _ = world.progression.lose_heart();
            hearts_lost += 1;
        }
        report_player_hits(world, hearts_lost, out)
    }

    /// Advances boss projectiles and resolves those reaching the player.
    ///
    /// A held mirror reflects a projectile onto the boss instead of costing a
    /// heart. Projectiles that hit or leave the field are removed.
    pub fn check_boss_projectiles(
        &self,
        world: &mut World,
        out: &mut Vec<Event>,
    ) -> CombatOutcome {
        let player = world.player.position();
        let player_size = world.player.size();
        let field_width = world.config.field.width;
        let Some(boss) = world.boss.as_mut().filter(|boss| boss.is_alive()) else {
            return CombatOutcome::Continue;
        };

        let progression = &mut world.progression;
        let mut reflected = 0_u32;
        let mut hearts_lost = 0_u32;
        boss.projectiles_mut().retain_mut(|projectile| {
            projectile.advance();
            if boxes_overlap(player, player_size, projectile.position, projectile.footprint()) {
                if progression.consume_mirror() {
                    reflected += 1;
                } else {
                    let _ = progression.lose_heart();
                    hearts_lost += 1;
                }
                return false;
            }
            !projectile.is_outside(field_width)
        });

        let mut boss_defeated = false;
        for _ in 0..reflected {
            let damage = boss.damage();
            boss_defeated |= boss.take_damage(damage);
            out.push(Event::ProjectileReflected);
            out.push(Event::BossHit {
                damage,
                health: boss.health().max(0.0),
            });
        }

        let outcome = report_player_hits(world, hearts_lost, out);
        if boss_defeated {
            credit_boss_bounty(world, out);
        }
        match outcome {
            CombatOutcome::PlayerDefeated => CombatOutcome::PlayerDefeated,
            _ if boss_defeated => CombatOutcome::BossDefeated,
            other => other,
        }
    }
}

fn credit_boss_bounty(world: &mut World, out: &mut Vec<Event>) {
    let bounty = world.config.boss.bounty;
    world.progression.credit(bounty);
    out.push(Event::BossDefeated { bounty });
    debug!(bounty, "boss defeated");
}

fn report_player_hits(world: &mut World, hearts_lost: u32, out: &mut Vec<Event>) -> CombatOutcome {
    if hearts_lost == 0 {
        return CombatOutcome::Continue;
    }
    let hearts = world.progression.hearts();
    out.push(Event::PlayerHit {
        hearts_lost,
        hearts,
    });
    world.play(Cue::PlayerHit, out);
    if hearts > 0 {
        return CombatOutcome::Continue;
    }
    world.play(Cue::GameOver, out);
    out.push(Event::GameOver);
    debug!("player defeated");
    CombatOutcome::PlayerDefeated
}
