#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless rendering backend that prints scenes as plain text.

use std::{fmt, io::Write, time::Duration};

use anyhow::{Context, Result};
use glam::Vec2;
use house_defence_core::{EnemyKind, Facing, Screen, WELCOME_BANNER};
use house_defence_rendering::{FrameInput, Presentation, RenderingBackend, RenderingError, Scene};
use tracing::debug;

/// Narrowest field the backend accepts.
pub const MIN_COLUMNS: usize = 10;

/// Menu printed inside the house.
const HOUSE_MENU: &str = "[1] shop  [2] radio  [3] oak tree  [4] pet  [5] defend";

type InputSource = Box<dyn FnMut(u64, &Scene) -> FrameInput>;

/// Rendering backend that writes one text frame every few simulated ticks.
pub struct TextBackend {
    columns: usize,
    frames: u64,
    tick: Duration,
    render_every: u64,
    input: InputSource,
    output: Box<dyn Write>,
}

impl fmt::Debug for TextBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBackend")
            .field("columns", &self.columns)
            .field("frames", &self.frames)
            .field("tick", &self.tick)
            .field("render_every", &self.render_every)
            .finish_non_exhaustive()
    }
}

impl TextBackend {
    /// Creates a backend drawing the field `columns` characters wide.
    ///
    /// Defaults to a single 16 ms frame with no input, printed to stdout.
    pub fn new(columns: usize) -> Result<Self, RenderingError> {
        if columns < MIN_COLUMNS {
            return Err(RenderingError::FieldTooNarrow { columns });
        }
        Ok(Self {
            columns,
            frames: 1,
            tick: Duration::from_millis(16),
            render_every: 1,
            input: Box::new(|_, _| FrameInput::default()),
            output: Box::new(std::io::stdout()),
        })
    }

    /// Configures how many frames are simulated before the backend exits.
    #[must_use]
    pub fn with_frames(mut self, frames: u64) -> Self {
        self.frames = frames;
        self
    }

    /// Configures the simulated duration of a frame.
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Configures how often a frame is printed. The final frame always is.
    pub fn with_render_every(mut self, render_every: u64) -> Result<Self, RenderingError> {
        if render_every == 0 {
            return Err(RenderingError::ZeroRenderInterval);
        }
        self.render_every = render_every;
        Ok(self)
    }

    /// Configures the source of per-frame input.
    ///
    /// The source sees the frame index and the scene as last presented.
    #[must_use]
    pub fn with_input<I>(mut self, input: I) -> Self
    where
        I: FnMut(u64, &Scene) -> FrameInput + 'static,
    {
        self.input = Box::new(input);
        self
    }

    /// Redirects frames to `output`.
    #[must_use]
    pub fn with_output<W>(mut self, output: W) -> Self
    where
        W: Write + 'static,
    {
        self.output = Box::new(output);
        self
    }
}

impl RenderingBackend for TextBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            columns,
            frames,
            tick,
            render_every,
            mut input,
            mut output,
        } = self;

        let Presentation {
            window_title,
            scene,
            ..
        } = presentation;
        let mut scene = scene;

        writeln!(output, "== {window_title} ==").context("failed to write title")?;
        for frame in 0..frames {
            let frame_input = input(frame, &scene);
            update_scene(tick, frame_input, &mut scene);

            let last = frame + 1 == frames;
            if (frame + 1) % render_every == 0 || last {
                write!(output, "-- frame {} --\n{}", frame + 1, render_frame(&scene, columns))
                    .context("failed to write frame")?;
            }
        }
        output.flush().context("failed to flush frames")?;
        debug!(frames, "text backend finished");
        Ok(())
    }
}

/// Renders a scene as newline-terminated text `columns` characters wide.
#[must_use]
pub fn render_frame(scene: &Scene, columns: usize) -> String {
    let mut lines = Vec::new();
    match scene.screen {
        Screen::Start => {
            lines.push(WELCOME_BANNER.to_owned());
            lines.push("Press any key to start.".to_owned());
        }
        Screen::House => lines.push(HOUSE_MENU.to_owned()),
        Screen::Shop => {
            for line in &scene.shop {
                let marker = if line.selected { '>' } else { ' ' };
                lines.push(format!("{marker} {:<16}{:>6}", line.label, line.price));
            }
        }
        Screen::Defend => {
            lines.push(field_strip(scene, columns));
            lines.push("=".repeat(columns));
            if let Some(boss) = &scene.boss {
                lines.push(format!("boss {}", health_bar(boss.health_fraction, 20)));
            }
        }
    }

    if scene.screen != Screen::Start {
        lines.push(hud_line(scene));
    }
    if let Some(notice) = &scene.notice {
        lines.push(format!("! {notice}"));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn field_strip(scene: &Scene, columns: usize) -> String {
    let width = scene.field.size.x;
    let mut cells = vec!['.'; columns];

    let house_columns = column_of(scene.field.house_width, width, columns);
    for cell in cells.iter_mut().take(house_columns) {
        *cell = '#';
    }

    let mut plot = |origin: Vec2, size: Vec2, glyph: char| {
        let centre = origin + size * 0.5;
        if centre.x < 0.0 || centre.x >= width {
            return;
        }
        cells[column_of(centre.x, width, columns)] = glyph;
    };

    for enemy in &scene.enemies {
        plot(enemy.origin, enemy.size, enemy_glyph(enemy.kind));
    }
    if let Some(boss) = &scene.boss {
        plot(boss.origin, boss.size, 'B');
        for projectile in &boss.projectiles {
            plot(*projectile, Vec2::splat(boss.projectile_size), '*');
        }
    }
    let player_glyph = match scene.player.facing {
        Facing::Left => '<',
        Facing::Right => '>',
    };
    plot(scene.player.origin, scene.player.size, player_glyph);

    cells.into_iter().collect()
}

fn column_of(x: f32, width: f32, columns: usize) -> usize {
    if width <= 0.0 {
        return 0;
    }
    let column = (x / width * columns as f32).floor();
    if column <= 0.0 {
        0
    } else {
        (column as usize).min(columns - 1)
    }
}

const fn enemy_glyph(kind: EnemyKind) -> char {
    match kind {
        EnemyKind::Zombie => 'z',
        EnemyKind::Skeleton => 's',
        EnemyKind::Snake => 'n',
        EnemyKind::Monster => 'm',
        EnemyKind::Vampire => 'v',
    }
}

fn health_bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn hud_line(scene: &Scene) -> String {
    let hud = &scene.hud;
    let weapon = hud.weapon.map_or("none", |weapon| weapon.key());
    let mut line = format!(
        "coins {} | hearts {} | wave {}/{} | set {} | weapon {}",
        hud.coins, hud.hearts, hud.wave, hud.total_waves, hud.wave_set, weapon
    );
    if hud.pet {
        line.push_str(" | pet");
    }
    if hud.mirror {
        line.push_str(" | mirror");
    }
    line
}
