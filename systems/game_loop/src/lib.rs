#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-tick driver of a House Defence session.
//!
//! Every [`GameLoop::step`] advances the clock, fires due timers, dispatches
//! the intents collected since the previous tick and then runs the defence
//! systems in a fixed order. All consequences are appended to the caller's
//! event buffer.

use std::time::Duration;

use house_defence_core::{Cue, Event, Intent, MenuChoice, Screen, ShopItem};
use house_defence_system_combat::{CombatOutcome, CombatResolver};
use house_defence_system_waves::{Config as WaveConfig, WaveDirector, WaveStart};
use house_defence_world::{Task, World};
use tracing::{debug, info};

/// Message broadcast by the radio.
pub const RADIO_HINT: &str =
    "Secret Message: 'The ancient scroll lies beneath the old oak tree...'";

/// Configuration parameters required to construct the game loop.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration whose spawn jitter is seeded with `rng_seed`.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Orchestrates the systems against a [`World`].
#[derive(Debug)]
pub struct GameLoop {
    waves: WaveDirector,
    combat: CombatResolver,
    due: Vec<Task>,
}

impl GameLoop {
    /// Creates a new game loop using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            waves: WaveDirector::new(WaveConfig::new(config.rng_seed)),
            combat: CombatResolver::new(),
            due: Vec::new(),
        }
    }

    /// Runs one tick of `dt` with the intents collected since the last one.
    pub fn step(
        &mut self,
        world: &mut World,
        intents: &[Intent],
        dt: Duration,
        out: &mut Vec<Event>,
    ) {
        world.advance_clock(dt, out);
        self.run_due_tasks(world, out);

        for intent in intents {
            self.dispatch(world, *intent, out);
        }

        if world.progression.screen() != Screen::Defend {
            return;
        }

        self.waves.update(world);
        if self.combat.check_contact_damage(world, out) == CombatOutcome::PlayerDefeated {
            game_over(world, out);
            return;
        }

        let player_x = world.player.position().x;
        if let Some(boss) = world.boss.as_mut() {
            boss.update(player_x);
        }
        match self.combat.check_boss_projectiles(world, out) {
            CombatOutcome::PlayerDefeated => {
                game_over(world, out);
                return;
            }
            CombatOutcome::BossDefeated => victory(world, out),
            CombatOutcome::Continue => {}
        }

        if world.progression.wave_in_progress()
            && world.boss.is_none()
            && self.waves.is_wave_cleared(world)
        {
            wave_cleared(world, out);
        }
    }

    fn run_due_tasks(&mut self, world: &mut World, out: &mut Vec<Event>) {
        let mut due = std::mem::take(&mut self.due);
        world.schedule.drain_due(world.now(), &mut due);
        for task in due.drain(..) {
            match task {
                Task::StartWave => {
                    if world.progression.screen() == Screen::Defend
                        && !world.progression.wave_in_progress()
                    {
                        self.start_wave(world, out);
                    }
                }
                Task::BossShot => {
                    let now = world.now();
                    let target = world.player.position();
                    if let Some(boss) = world.boss.as_mut() {
                        boss.shoot(now, target);
                    }
                }
            }
        }
        self.due = due;
    }

    fn dispatch(&mut self, world: &mut World, intent: Intent, out: &mut Vec<Event>) {
        match world.progression.screen() {
            Screen::Start => world.progression.change_screen(Screen::House, out),
            Screen::House => self.dispatch_house(world, intent, out),
            Screen::Shop => dispatch_shop(world, intent, out),
            Screen::Defend => self.dispatch_defend(world, intent, out),
        }
    }

    fn dispatch_house(&mut self, world: &mut World, intent: Intent, out: &mut Vec<Event>) {
        let Intent::Select(choice) = intent else {
            return;
        };
        match choice {
            MenuChoice::Shop => world.progression.open_shop(out),
            MenuChoice::Radio => {
                world.progression.hear_radio();
                world.play(Cue::RadioSong, out);
                out.push(Event::RadioHint {
                    message: RADIO_HINT.to_owned(),
                });
            }
            MenuChoice::OakTree => {
                if world.progression.find_scroll() {
                    let unlocked: Vec<_> = world
                        .config
                        .weapons
                        .iter()
                        .filter(|(_, spec)| spec.secret)
                        .map(|(weapon, _)| weapon)
                        .collect();
                    for weapon in unlocked {
                        debug!(weapon = weapon.key(), "scroll found");
                        out.push(Event::ScrollFound { unlocked: weapon });
                    }
                }
            }
            MenuChoice::Pet => {
                let price = world.config.economy.pet_price;
                match world.progression.adopt_pet(price) {
                    Ok(()) => {
                        world.play(Cue::Purchase, out);
                        out.push(Event::PetAdopted);
                    }
                    Err(reason) => world.reject(reason, out),
                }
            }
            MenuChoice::Defend => match world.progression.enter_defence(out) {
                Ok(()) => {
                    if !world.progression.wave_in_progress() {
                        self.start_wave(world, out);
                    }
                }
                Err(reason) => world.reject(reason, out),
            },
            MenuChoice::Buy(_) => {}
        }
    }

    fn dispatch_defend(&mut self, world: &mut World, intent: Intent, out: &mut Vec<Event>) {
        match intent {
            Intent::MoveLeft => world.player.move_left(),
            Intent::MoveRight => world.player.move_right(),
            Intent::Fire => {
                if self.combat.resolve_attack(world, out) == CombatOutcome::BossDefeated {
                    victory(world, out);
                }
            }
            Intent::Cancel => match world.progression.leave_defence(out) {
                Ok(()) => {
                    let _ = world.schedule.cancel(Task::StartWave);
                }
                Err(reason) => world.reject(reason, out),
            },
            Intent::Select(_) | Intent::CursorUp | Intent::CursorDown | Intent::Confirm => {}
        }
    }

    fn start_wave(&mut self, world: &mut World, out: &mut Vec<Event>) {
        if self.waves.start_wave(world, out) == WaveStart::SetComplete {
            victory(world, out);
        }
    }
}

fn dispatch_shop(world: &mut World, intent: Intent, out: &mut Vec<Event>) {
    match intent {
        Intent::CursorUp => world.progression.cursor_up(),
        Intent::CursorDown => {
            let len = world.progression.shop_entries(&world.config.weapons).len();
            world.progression.cursor_down(len);
        }
        Intent::Confirm => {
            if let Some(item) = world.progression.cursor_item(&world.config.weapons) {
                buy(world, item, out);
            }
        }
        Intent::Select(MenuChoice::Buy(item)) => buy(world, item, out),
        Intent::Cancel => world.progression.change_screen(Screen::House, out),
        Intent::MoveLeft | Intent::MoveRight | Intent::Fire | Intent::Select(_) => {}
    }
}

fn buy(world: &mut World, item: ShopItem, out: &mut Vec<Event>) {
    match item {
        ShopItem::Weapon(weapon) => {
            let spec = world.config.weapons.get(weapon);
            match world.progression.purchase_weapon(weapon, spec) {
                Ok(coins) => {
                    world.play(Cue::Purchase, out);
                    out.push(Event::WeaponPurchased { weapon, coins });
                    world.progression.change_screen(Screen::House, out);
                }
                Err(reason) => world.reject(reason, out),
            }
        }
        ShopItem::Mirror => {
            let price = world.config.economy.mirror_price;
            match world.progression.purchase_mirror(price) {
                Ok(()) => {
                    world.play(Cue::Purchase, out);
                    out.push(Event::MirrorPurchased);
                }
                Err(reason) => world.reject(reason, out),
            }
        }
    }
}

fn wave_cleared(world: &mut World, out: &mut Vec<Event>) {
    let wave = world.progression.current_wave();
    world.progression.complete_wave();
    world.enemies.clear();
    let due = world
        .now()
        .saturating_add(world.config.timing.wave_restart_delay());
    world.schedule.once(Task::StartWave, due);
    out.push(Event::WaveCleared { wave });
    debug!(wave, "wave cleared");
}

fn victory(world: &mut World, out: &mut Vec<Event>) {
    let _ = world.schedule.cancel(Task::BossShot);
    let _ = world.schedule.cancel(Task::StartWave);
    world.boss = None;
    world.enemies.clear();
    world.progression.complete_set();
    let next_wave_set = world.progression.wave_set();
    world.play(Cue::Victory, out);
    out.push(Event::Victory { next_wave_set });
    world.progression.change_screen(Screen::House, out);
    info!(next_wave_set, "set completed");
}

fn game_over(world: &mut World, out: &mut Vec<Event>) {
    world.reset_after_game_over(out);
    info!(wave_set = world.progression.wave_set(), "game over");
}
