use std::time::Duration;

use house_defence_core::{
    ActionError, Cue, EnemyId, EnemyKind, Event, Facing, Footprint, GameConfig, Intent,
    MenuChoice, MusicTrack, Position, Screen, ShopItem, WaveConfig, WaveTable, WeaponId,
};
use house_defence_system_game_loop::{Config, GameLoop, RADIO_HINT};
use house_defence_world::{query, Enemy, Task, World};

const TICK: Duration = Duration::from_millis(16);

struct Session {
    world: World,
    game: GameLoop,
}

impl Session {
    fn new(config: GameConfig) -> Self {
        Self {
            world: World::new(config),
            game: GameLoop::new(Config::new(0x5eed)),
        }
    }

    fn single_wave(boss_fight: bool) -> Self {
        Self::new(GameConfig {
            waves: WaveTable::new(vec![WaveConfig::new(&[(EnemyKind::Zombie, 1)])]),
            boss_fight,
            ..GameConfig::default()
        })
    }

    fn tick(&mut self, intents: &[Intent]) -> Vec<Event> {
        self.advance(intents, TICK)
    }

    fn advance(&mut self, intents: &[Intent], dt: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        self.game.step(&mut self.world, intents, dt, &mut events);
        events
    }

    fn select(&mut self, choice: MenuChoice) -> Vec<Event> {
        self.tick(&[Intent::Select(choice)])
    }

    fn arm(&mut self, weapon: WeaponId) {
        let _ = self.tick(&[Intent::Confirm]);
        let _ = self.select(MenuChoice::Shop);
        let events = self.select(MenuChoice::Buy(ShopItem::Weapon(weapon)));
        assert!(
            events
                .iter()
                .any(|event| matches!(event, Event::WeaponPurchased { .. })),
            "purchase failed: {events:?}"
        );
    }

    fn kill_roster(&mut self) {
        for enemy in &mut self.world.enemies {
            let _ = enemy.take_damage(f32::MAX);
        }
    }

    fn screen(&self) -> Screen {
        self.world.progression.screen()
    }
}

#[test]
fn first_interaction_enters_the_house() {
    let mut session = Session::new(GameConfig::default());

    let events = session.tick(&[Intent::Fire, Intent::Select(MenuChoice::Shop)]);

    assert_eq!(session.screen(), Screen::Shop);
    assert!(events.contains(&Event::ScreenChanged {
        from: Screen::Start,
        to: Screen::House,
    }));
    assert!(events.contains(&Event::MusicChanged {
        track: MusicTrack::House,
    }));
    assert!(!events.contains(&Event::CuePlayed {
        cue: Cue::Shoot(WeaponId::Pistol)
    }));
}

#[test]
fn defending_without_a_weapon_is_rejected() {
    let mut session = Session::new(GameConfig::default());
    let _ = session.tick(&[Intent::Confirm]);

    let events = session.select(MenuChoice::Defend);

    assert_eq!(session.screen(), Screen::House);
    assert!(events.contains(&Event::ActionRejected {
        reason: ActionError::NoWeapon,
    }));
    assert!(events.contains(&Event::CuePlayed { cue: Cue::NoMoney }));
    assert!(session.world.enemies.is_empty());
}

#[test]
fn buying_a_weapon_returns_to_the_house() {
    let mut session = Session::new(GameConfig::default());
    let _ = session.tick(&[Intent::Confirm]);
    let _ = session.select(MenuChoice::Shop);

    let events = session.select(MenuChoice::Buy(ShopItem::Weapon(WeaponId::Pistol)));

    assert!(events.contains(&Event::WeaponPurchased {
        weapon: WeaponId::Pistol,
        coins: 900,
    }));
    assert!(events.contains(&Event::CuePlayed { cue: Cue::Purchase }));
    assert_eq!(session.screen(), Screen::House);
}

#[test]
fn unaffordable_weapon_keeps_the_shop_open() {
    let mut session = Session::new(GameConfig::default());
    session.arm(WeaponId::Minigun);
    let _ = session.select(MenuChoice::Shop);

    let events = session.select(MenuChoice::Buy(ShopItem::Weapon(WeaponId::Rpg)));

    assert_eq!(session.screen(), Screen::Shop);
    assert_eq!(session.world.progression.coins(), 900);
    assert_eq!(
        session.world.progression.selected_weapon(),
        Some(WeaponId::Minigun)
    );
    assert!(events.contains(&Event::ActionRejected {
        reason: ActionError::InsufficientFunds {
            price: 1000,
            coins: 900,
        },
    }));
}

#[test]
fn shop_cursor_buys_the_highlighted_entry() {
    let mut session = Session::new(GameConfig::default());
    let _ = session.tick(&[Intent::Confirm]);
    let _ = session.select(MenuChoice::Shop);

    let events = session.tick(&[Intent::CursorDown, Intent::CursorDown, Intent::Confirm]);

    assert!(events.contains(&Event::WeaponPurchased {
        weapon: WeaponId::LaserGun,
        coins: 990,
    }));
    assert_eq!(session.screen(), Screen::House);
}

#[test]
fn mirror_is_bought_once_without_leaving_the_shop() {
    let mut session = Session::new(GameConfig::default());
    let _ = session.tick(&[Intent::Confirm]);
    let _ = session.select(MenuChoice::Shop);

    let first = session.select(MenuChoice::Buy(ShopItem::Mirror));
    let second = session.select(MenuChoice::Buy(ShopItem::Mirror));

    assert!(first.contains(&Event::MirrorPurchased));
    assert!(second.contains(&Event::ActionRejected {
        reason: ActionError::MirrorAlreadyHeld,
    }));
    assert_eq!(session.screen(), Screen::Shop);
    assert_eq!(session.world.progression.coins(), 850);

    let _ = session.tick(&[Intent::Cancel]);
    assert_eq!(session.screen(), Screen::House);
}

#[test]
fn radio_hints_at_the_scroll_which_unlocks_the_sniper() {
    let mut session = Session::new(GameConfig::default());
    let _ = session.tick(&[Intent::Confirm]);

    let radio = session.select(MenuChoice::Radio);
    assert!(radio.contains(&Event::RadioHint {
        message: RADIO_HINT.to_owned(),
    }));
    assert!(radio.contains(&Event::CuePlayed {
        cue: Cue::RadioSong
    }));

    let _ = session.select(MenuChoice::Shop);
    let locked = session.select(MenuChoice::Buy(ShopItem::Weapon(WeaponId::Sniper3000)));
    assert!(locked.contains(&Event::ActionRejected {
        reason: ActionError::WeaponLocked {
            weapon: WeaponId::Sniper3000,
        },
    }));
    let _ = session.tick(&[Intent::Cancel]);

    let found = session.select(MenuChoice::OakTree);
    assert!(found.contains(&Event::ScrollFound {
        unlocked: WeaponId::Sniper3000,
    }));
    let again = session.select(MenuChoice::OakTree);
    assert!(!again
        .iter()
        .any(|event| matches!(event, Event::ScrollFound { .. })));

    let _ = session.select(MenuChoice::Shop);
    let bought = session.select(MenuChoice::Buy(ShopItem::Weapon(WeaponId::Sniper3000)));
    assert!(bought.contains(&Event::WeaponPurchased {
        weapon: WeaponId::Sniper3000,
        coins: 1000,
    }));
}

#[test]
fn entering_the_defence_starts_the_first_wave() {
    let mut session = Session::new(GameConfig::default());
    session.arm(WeaponId::Pistol);

    let events = session.select(MenuChoice::Defend);

    assert_eq!(session.screen(), Screen::Defend);
    assert!(events.contains(&Event::MusicChanged {
        track: MusicTrack::Defend,
    }));
    assert!(events.contains(&Event::WaveStarted {
        wave: 0,
        wave_set: 0,
        enemies: 3,
    }));
    assert_eq!(query::alive_enemies(&session.world), 3);
}

#[test]
fn leaving_mid_wave_is_refused() {
    let mut session = Session::new(GameConfig::default());
    session.arm(WeaponId::Pistol);
    let _ = session.select(MenuChoice::Defend);

    let events = session.tick(&[Intent::Cancel]);

    assert_eq!(session.screen(), Screen::Defend);
    assert!(events.contains(&Event::ActionRejected {
        reason: ActionError::WaveInProgress,
    }));
}

#[test]
fn cleared_wave_schedules_the_next_one() {
    let mut session = Session::new(GameConfig::default());
    session.arm(WeaponId::Pistol);
    let _ = session.select(MenuChoice::Defend);
    session.kill_roster();

    let cleared = session.tick(&[]);
    assert!(cleared.contains(&Event::WaveCleared { wave: 0 }));
    assert_eq!(session.world.progression.current_wave(), 1);
    assert!(session.world.enemies.is_empty());
    assert!(!session.world.progression.wave_in_progress());
    let due = session
        .world
        .schedule
        .due_at(Task::StartWave)
        .expect("next wave scheduled");
    assert_eq!(due, session.world.now() + Duration::from_millis(2000));

    let early = session.advance(&[], Duration::from_millis(1984));
    assert!(!early
        .iter()
        .any(|event| matches!(event, Event::WaveStarted { .. })));

    let started = session.tick(&[]);
    assert!(started.contains(&Event::WaveStarted {
        wave: 1,
        wave_set: 0,
        enemies: 5,
    }));
}

#[test]
fn leaving_between_waves_cancels_the_pending_wave() {
    let mut session = Session::new(GameConfig::default());
    session.arm(WeaponId::Pistol);
    let _ = session.select(MenuChoice::Defend);
    session.kill_roster();
    let _ = session.tick(&[]);

    let _ = session.tick(&[Intent::Cancel]);
    assert_eq!(session.screen(), Screen::House);
    assert!(!session.world.schedule.is_scheduled(Task::StartWave));

    let idle = session.advance(&[], Duration::from_secs(5));
    assert!(!idle
        .iter()
        .any(|event| matches!(event, Event::WaveStarted { .. })));

    let back = session.select(MenuChoice::Defend);
    assert!(back.contains(&Event::WaveStarted {
        wave: 1,
        wave_set: 0,
        enemies: 5,
    }));
}

#[test]
fn empty_wave_clears_in_the_tick_it_starts() {
    let mut session = Session::new(GameConfig {
        waves: WaveTable::new(vec![WaveConfig::default(), WaveConfig::default()]),
        ..GameConfig::default()
    });
    session.arm(WeaponId::Bat);

    let events = session.select(MenuChoice::Defend);

    assert!(events.contains(&Event::WaveCleared { wave: 0 }));
    assert_eq!(session.world.progression.current_wave(), 1);
}

#[test]
fn last_heart_resets_the_run_within_the_tick() {
    let mut session = Session::new(GameConfig::default());
    session.arm(WeaponId::Pistol);
    let _ = session.select(MenuChoice::Defend);
    session.kill_roster();
    let _ = session.tick(&[]);
    let _ = session.advance(&[], Duration::from_millis(2000));
    assert_eq!(session.world.progression.current_wave(), 1);
    for _ in 0..14 {
        let _ = session.world.progression.lose_heart();
    }
    let id = session.world.allocate_enemy_id();
    session.world.enemies.push(Enemy::spawn(
        id,
        EnemyKind::Zombie,
        Position::new(205.0, 872.0),
        Footprint::square(32.0),
        EnemyKind::Zombie.base_stats(),
    ));

    let events = session.tick(&[]);

    assert!(events.contains(&Event::GameOver));
    assert!(events.contains(&Event::ScreenChanged {
        from: Screen::Defend,
        to: Screen::House,
    }));
    let progression = &session.world.progression;
    assert_eq!(progression.hearts(), 15);
    assert_eq!(progression.current_wave(), 0);
    assert_eq!(progression.wave_set(), 0);
    assert!(!progression.wave_in_progress());
    assert!(session.world.enemies.is_empty());
    assert!(!session.world.schedule.is_scheduled(Task::StartWave));
}

#[test]
fn boss_fight_ends_in_victory() {
    let mut session = Session::single_wave(true);
    let _ = session.tick(&[Intent::Confirm]);
    let _ = session.select(MenuChoice::Pet);
    let _ = session.select(MenuChoice::Shop);
    let _ = session.select(MenuChoice::Buy(ShopItem::Weapon(WeaponId::LaserGun)));
    let _ = session.select(MenuChoice::Defend);
    session.kill_roster();
    let _ = session.tick(&[]);

    let spawned = session.advance(&[], Duration::from_millis(2000));
    assert!(spawned.contains(&Event::BossSpawned { health: 1000.0 }));
    assert!(session.world.schedule.is_scheduled(Task::BossShot));

    let leave = session.tick(&[Intent::Cancel]);
    assert!(leave.contains(&Event::ActionRejected {
        reason: ActionError::WaveInProgress,
    }));

    let mut events = Vec::new();
    for _ in 0..5 {
        events.extend(session.advance(&[Intent::Fire], Duration::from_millis(200)));
    }

    assert!(events.contains(&Event::BossDefeated { bounty: 500 }));
    assert!(events.contains(&Event::Victory { next_wave_set: 1 }));
    assert!(events.contains(&Event::CuePlayed { cue: Cue::Victory }));
    assert_eq!(session.screen(), Screen::House);
    assert!(session.world.boss.is_none());
    assert!(!session.world.schedule.is_scheduled(Task::BossShot));
    let progression = &session.world.progression;
    assert_eq!(progression.wave_set(), 1);
    assert_eq!(progression.current_wave(), 0);
    assert_eq!(progression.coins(), 1000 - 250 - 10 + 500);
}

#[test]
fn boss_fires_on_its_timer() {
    let mut session = Session::single_wave(true);
    session.arm(WeaponId::Pistol);
    let _ = session.select(MenuChoice::Defend);
    session.kill_roster();
    let _ = session.tick(&[]);
    let _ = session.advance(&[], Duration::from_millis(2000));
    assert!(session
        .world
        .boss
        .as_ref()
        .expect("boss spawned")
        .projectiles()
        .is_empty());

    let _ = session.advance(&[], Duration::from_millis(2000));

    let boss = session.world.boss.as_ref().expect("boss still fighting");
    assert_eq!(boss.projectiles().len(), 1);
    assert!(boss.projectiles()[0].speed < 0.0);
}

#[test]
fn disabled_boss_fight_wins_after_the_last_wave() {
    let mut session = Session::single_wave(false);
    session.arm(WeaponId::Pistol);
    let _ = session.select(MenuChoice::Defend);
    session.kill_roster();
    let _ = session.tick(&[]);

    let events = session.advance(&[], Duration::from_millis(2000));

    assert!(events.contains(&Event::Victory { next_wave_set: 1 }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::BossSpawned { .. })));
    assert_eq!(session.screen(), Screen::House);

    let next = session.select(MenuChoice::Defend);
    let health: Vec<f32> = session.world.enemies.iter().map(Enemy::health).collect();
    assert!(next.contains(&Event::WaveStarted {
        wave: 0,
        wave_set: 1,
        enemies: 1,
    }));
    assert_eq!(health, vec![150.0]);
}

#[test]
fn movement_turns_and_steps_the_player() {
    let mut session = Session::new(GameConfig::default());
    session.arm(WeaponId::Pistol);
    let _ = session.select(MenuChoice::Defend);

    let _ = session.tick(&[Intent::MoveLeft]);
    assert_eq!(
        session.world.player.position().x,
        200.0,
        "the house wall blocks leftward steps"
    );

    let _ = session.tick(&[Intent::MoveRight; 12]);
    assert_eq!(session.world.player.position().x, 320.0);

    let _ = session.tick(&[Intent::MoveLeft]);
    let snapshot = query::snapshot(&session.world);
    assert_eq!(snapshot.player.position.x, 310.0);
    assert_eq!(snapshot.player.facing, Facing::Left);
}

#[test]
fn identical_seeds_and_intents_replay_identically() {
    fn run(seed: u64) -> (Vec<u8>, Vec<u8>) {
        let mut world = World::new(GameConfig::default());
        let mut game = GameLoop::new(Config::new(seed));
        let script = [
            Intent::Confirm,
            Intent::Select(MenuChoice::Shop),
            Intent::Select(MenuChoice::Buy(ShopItem::Weapon(WeaponId::Minigun))),
            Intent::Select(MenuChoice::Defend),
        ];
        let mut events = Vec::new();
        for intent in script {
            game.step(&mut world, &[intent], TICK, &mut events);
        }
        for _ in 0..400 {
            game.step(&mut world, &[Intent::Fire], TICK, &mut events);
        }
        (
            bincode::serialize(&events).expect("events serialize"),
            bincode::serialize(&query::snapshot(&world)).expect("snapshot serializes"),
        )
    }

    assert_eq!(run(42), run(42));
    assert_ne!(run(42).1, run(43).1);
}

#[test]
fn enemy_ids_stay_unique_across_waves() {
    let mut session = Session::new(GameConfig::default());
    session.arm(WeaponId::Pistol);
    let _ = session.select(MenuChoice::Defend);
    let first: Vec<EnemyId> = session.world.enemies.iter().map(Enemy::id).collect();
    session.kill_roster();
    let _ = session.tick(&[]);
    let _ = session.advance(&[], Duration::from_millis(2000));

    for enemy in &session.world.enemies {
        assert!(!first.contains(&enemy.id()));
    }
}
