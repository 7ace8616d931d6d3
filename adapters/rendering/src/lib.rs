#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for House Defence adapters.
//!
//! Backends never touch the simulation. They receive a [`Scene`] assembled
//! from read-only world snapshots and hand player input back through
//! [`FrameInput`]. Audio collaborators consume cues through [`AudioBackend`].

use anyhow::Result as AnyResult;
use glam::Vec2;
use house_defence_core::{
    Cue, EnemyId, EnemyKind, Event, Facing, GameConfig, Intent, MusicTrack, Screen, ShopItem,
    WeaponId, WorldSnapshot,
};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Base color of an enemy kind at full health.
#[must_use]
pub const fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Zombie => Color::from_rgb_u8(96, 160, 64),
        EnemyKind::Skeleton => Color::from_rgb_u8(200, 200, 190),
        EnemyKind::Snake => Color::from_rgb_u8(40, 140, 40),
        EnemyKind::Monster => Color::from_rgb_u8(120, 40, 140),
        EnemyKind::Vampire => Color::from_rgb_u8(150, 20, 30),
    }
}

/// Input gathered by an adapter before the scene is updated.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Intents in the order they were captured.
    pub intents: Vec<Intent>,
}

impl FrameInput {
    /// Creates an input frame carrying the provided intents.
    #[must_use]
    pub fn new(intents: Vec<Intent>) -> Self {
        Self { intents }
    }
}

/// Static geometry of the defence field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPresentation {
    /// Width and height of the field in world units.
    pub size: Vec2,
    /// Height of the ground strip at the bottom of the field.
    pub ground_height: f32,
    /// Width of the house occupying the left edge.
    pub house_width: f32,
}

/// Player sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Top-left corner in world units.
    pub origin: Vec2,
    /// Width and height in world units.
    pub size: Vec2,
    /// Direction the sprite faces.
    pub facing: Facing,
}

/// Living enemy sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Top-left corner in world units.
    pub origin: Vec2,
    /// Width and height in world units.
    pub size: Vec2,
    /// Health left as a fraction of the spawn health.
    pub health_fraction: f32,
    /// Fill color, paler as the enemy gets hurt.
    pub color: Color,
}

/// Boss sprite together with its projectiles.
#[derive(Clone, Debug, PartialEq)]
pub struct BossPresentation {
    /// Top-left corner in world units.
    pub origin: Vec2,
    /// Width and height in world units.
    pub size: Vec2,
    /// Health left as a fraction of the spawn health.
    pub health_fraction: f32,
    /// Top-left corners of the projectiles in flight.
    pub projectiles: Vec<Vec2>,
    /// Edge length shared by every projectile.
    pub projectile_size: f32,
}

/// Heads-up display counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Coins held.
    pub coins: u32,
    /// Hearts left.
    pub hearts: u32,
    /// One-based wave number within the set.
    pub wave: usize,
    /// Number of waves in a set.
    pub total_waves: usize,
    /// Zero-based set index.
    pub wave_set: u32,
    /// Weapon held by the player.
    pub weapon: Option<WeaponId>,
    /// Whether the pet accompanies the player.
    pub pet: bool,
    /// Whether a mirror charge is held.
    pub mirror: bool,
    /// Whether a wave or boss fight is underway.
    pub wave_in_progress: bool,
}

/// One row of the shop listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopLine {
    /// Item sold by this row.
    pub item: ShopItem,
    /// Display label.
    pub label: String,
    /// Price in coins.
    pub price: u32,
    /// Whether the shop cursor rests on this row.
    pub selected: bool,
}

/// Scene description assembled from a world snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Screen the player interacts with.
    pub screen: Screen,
    /// Field geometry.
    pub field: FieldPresentation,
    /// Player sprite.
    pub player: PlayerPresentation,
    /// Living enemies ordered by identifier.
    pub enemies: Vec<EnemyPresentation>,
    /// Boss, while one is alive.
    pub boss: Option<BossPresentation>,
    /// Counters shown on every screen.
    pub hud: Hud,
    /// Shop listing in cursor order.
    pub shop: Vec<ShopLine>,
    /// Latest message worth showing to the player.
    pub notice: Option<String>,
}

impl Scene {
    /// Builds a scene from a snapshot and the configuration it was taken under.
    #[must_use]
    pub fn from_snapshot(snapshot: &WorldSnapshot, config: &GameConfig) -> Self {
        let field = &config.field;
        let enemy_size = Vec2::splat(field.enemy_size);
        let progression = &snapshot.progression;

        let enemies = snapshot
            .enemies
            .iter()
            .filter(|enemy| enemy.alive)
            .map(|enemy| {
                let health_fraction = fraction(enemy.health, enemy.max_health);
                EnemyPresentation {
                    id: enemy.id,
                    kind: enemy.kind,
                    origin: Vec2::new(enemy.position.x, enemy.position.y),
                    size: enemy_size,
                    health_fraction,
                    color: enemy_color(enemy.kind).lighten(1.0 - health_fraction),
                }
            })
            .collect();

        let boss = snapshot.boss.as_ref().map(|boss| BossPresentation {
            origin: Vec2::new(boss.position.x, boss.position.y),
            size: Vec2::new(boss.size.width, boss.size.height),
            health_fraction: fraction(boss.health, boss.max_health),
            projectiles: boss
                .projectiles
                .iter()
                .map(|projectile| Vec2::new(projectile.position.x, projectile.position.y))
                .collect(),
            projectile_size: config.boss.projectile_size,
        });

        let shop = snapshot
            .shop
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let (label, price) = match item {
                    ShopItem::Weapon(weapon) => {
                        let spec = config.weapons.get(*weapon);
                        (spec.name.clone(), spec.price)
                    }
                    ShopItem::Mirror => ("Mirror Power".to_owned(), config.economy.mirror_price),
                };
                ShopLine {
                    item: *item,
                    label,
                    price,
                    selected: index == progression.shop_cursor,
                }
            })
            .collect();

        Self {
            screen: progression.screen,
            field: FieldPresentation {
                size: Vec2::new(field.width, field.height),
                ground_height: field.ground_height,
                house_width: field.house_width,
            },
            player: PlayerPresentation {
                origin: Vec2::new(snapshot.player.position.x, snapshot.player.position.y),
                size: Vec2::new(snapshot.player.size.width, snapshot.player.size.height),
                facing: snapshot.player.facing,
            },
            enemies,
            boss,
            hud: Hud {
                coins: progression.coins,
                hearts: progression.hearts,
                wave: progression.current_wave + 1,
                total_waves: progression.total_waves,
                wave_set: progression.wave_set,
                weapon: progression.selected_weapon,
                pet: progression.pet_active,
                mirror: progression.mirror_power,
                wave_in_progress: progression.wave_in_progress,
            },
            shop,
            notice: None,
        }
    }

    /// Refreshes the scene after a tick, keeping the last notice unless the
    /// tick's events replaced it.
    pub fn update(&mut self, snapshot: &WorldSnapshot, config: &GameConfig, events: &[Event]) {
        let notice = self.notice.take();
        *self = Self::from_snapshot(snapshot, config);
        self.notice = notice;
        self.apply_events(events);
    }

    /// Picks up player-facing messages from a tick's events.
    ///
    /// A screen change drops the previous notice before this tick's messages
    /// are applied.
    pub fn apply_events(&mut self, events: &[Event]) {
        if events
            .iter()
            .any(|event| matches!(event, Event::ScreenChanged { .. }))
        {
            self.notice = None;
        }
        for event in events {
            let notice = match event {
                Event::ActionRejected { reason } => reason.to_string(),
                Event::RadioHint { message } => message.clone(),
                Event::ScrollFound { unlocked } => {
                    format!("You found the ancient scroll! {} unlocked.", unlocked.key())
                }
                Event::Victory { .. } => "VICTORY!".to_owned(),
                Event::GameOver => "GAME OVER".to_owned(),
                _ => continue,
            };
            self.notice = Some(notice);
        }
    }
}

fn fraction(health: f32, max_health: f32) -> f32 {
    if max_health <= 0.0 {
        return 0.0;
    }
    (health / max_health).clamp(0.0, 1.0)
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window or printed banner.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting House Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta
    /// and the input captured by the adapter, and refreshes the scene before
    /// it is presented.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Fire-and-forget sink for audio cues and music switches.
///
/// Implementations must not block the caller and swallow their own failures.
pub trait AudioBackend {
    /// Plays a one-shot cue.
    fn play_cue(&self, cue: Cue);

    /// Switches the background music.
    fn change_music(&self, track: MusicTrack);
}

/// Forwards the audio effects of a tick to `backend`, preserving order.
pub fn forward_audio<A>(backend: &A, events: &[Event])
where
    A: AudioBackend + ?Sized,
{
    for event in events {
        match event {
            Event::CuePlayed { cue } => backend.play_cue(*cue),
            Event::MusicChanged { track } => backend.change_music(*track),
            _ => {}
        }
    }
}

/// Errors that can occur when configuring rendering backends.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The text field must be wide enough to tell actors apart.
    FieldTooNarrow {
        /// Provided column count that failed validation.
        columns: usize,
    },
    /// Frames must be presented at a positive interval.
    ZeroRenderInterval,
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldTooNarrow { columns } => {
                write!(f, "field needs at least 10 columns (received {columns})")
            }
            Self::ZeroRenderInterval => write!(f, "render interval must be positive"),
        }
    }
}

impl Error for RenderingError {}
