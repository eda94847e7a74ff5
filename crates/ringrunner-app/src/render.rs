//! Rendering layer: all terminal output lives here.
//!
//! Each frame the snapshot is projected through the camera into a character
//! canvas (nearest glyph wins per cell), which is then written to the
//! terminal in one pass. No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::{DMat4, DVec3, DVec4};

use ringrunner_core::constants::{CAMERA_FOV_DEG, EXPLOSION_LIGHT_COLOR, LOOP_RADIUS};
use ringrunner_core::enums::{GamePhase, RunState};
use ringrunner_core::state::{CameraView, FrameSnapshot};
use ringrunner_core::types::Position;

// ── Palette ──────────────────────────────────────────────────────────────────

const C_SHIP: Color = Color::White;
const C_ASTEROID: Color = Color::Grey;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_NARRATIVE: Color = Color::Cyan;
const C_GAME_OVER: Color = Color::Red;

const NEAR: f64 = 0.1;
const FAR: f64 = 1000.0;

/// Points sampled around each loop.
const LOOP_SEGMENTS: usize = 32;
/// Asteroid model radius at unit scale.
const ASTEROID_RADIUS: f64 = 0.3;
const SHIP_HALF_SPAN: f64 = 0.6;
/// Largest disc drawn, in rows.
const MAX_DISC_ROWS: i32 = 8;

/// `0xRRGGBB` to a terminal colour.
pub fn rgb(hex: u32) -> Color {
    Color::Rgb {
        r: ((hex >> 16) & 0xff) as u8,
        g: ((hex >> 8) & 0xff) as u8,
        b: (hex & 0xff) as u8,
    }
}

// ── Projection ───────────────────────────────────────────────────────────────

/// A projected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub col: u16,
    pub row: u16,
    /// Distance in front of the camera.
    pub depth: f64,
}

/// World-to-cell projection for one frame.
pub struct Projector {
    view_proj: DMat4,
    width: u16,
    height: u16,
    tan_half_fov: f64,
}

impl Projector {
    pub fn new(camera: &CameraView, width: u16, height: u16) -> Self {
        let eye = camera.position.to_dvec3();
        let target = camera
            .look_at
            .map(Position::to_dvec3)
            .unwrap_or(eye + DVec3::NEG_Z);
        let view = DMat4::from_rotation_z(-camera.roll) * DMat4::look_at_rh(eye, target, DVec3::Y);

        // Terminal cells are roughly twice as tall as they are wide.
        let aspect = f64::from(width.max(1)) / (f64::from(height.max(1)) * 2.0);
        let fov = CAMERA_FOV_DEG.to_radians();
        let proj = DMat4::perspective_rh(fov, aspect, NEAR, FAR);

        Self {
            view_proj: proj * view,
            width,
            height,
            tan_half_fov: (fov / 2.0).tan(),
        }
    }

    /// Project a world point. `None` when behind the camera or off screen.
    pub fn project(&self, p: Position) -> Option<ScreenPoint> {
        let clip = self.view_proj * DVec4::new(p.x, p.y, p.z, 1.0);
        if clip.w <= NEAR {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            return None;
        }
        let col = ((ndc.x + 1.0) / 2.0 * f64::from(self.width)) as u16;
        let row = ((1.0 - ndc.y) / 2.0 * f64::from(self.height)) as u16;
        Some(ScreenPoint {
            col: col.min(self.width.saturating_sub(1)),
            row: row.min(self.height.saturating_sub(1)),
            depth: clip.w,
        })
    }

    /// Rows covered by a world-space radius at `depth`.
    pub fn radius_rows(&self, radius: f64, depth: f64) -> i32 {
        let rows = radius / (depth * self.tan_half_fov) * f64::from(self.height) / 2.0;
        (rows.round() as i32).clamp(0, MAX_DISC_ROWS)
    }
}

// ── Canvas ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Glyph {
    ch: char,
    color: Color,
    depth: f64,
}

const BLANK: Glyph = Glyph {
    ch: ' ',
    color: Color::Reset,
    depth: f64::INFINITY,
};

/// Character buffer with a per-cell depth test.
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; usize::from(width) * usize::from(height)],
        }
    }

    /// Plot a glyph if it is nearer than what the cell already holds.
    pub fn plot(&mut self, col: i32, row: i32, ch: char, color: Color, depth: f64) {
        if col < 0 || row < 0 || col >= i32::from(self.width) || row >= i32::from(self.height) {
            return;
        }
        let idx = row as usize * usize::from(self.width) + col as usize;
        if depth < self.cells[idx].depth {
            self.cells[idx] = Glyph { ch, color, depth };
        }
    }

    /// Overlay text; always on top. Clipped at the right edge.
    pub fn text(&mut self, col: u16, row: u16, s: &str, color: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.plot(i32::from(col) + i as i32, i32::from(row), ch, color, f64::NEG_INFINITY);
        }
    }

    /// Text centred on a row.
    pub fn text_centered(&mut self, row: u16, s: &str, color: Color) {
        let len = s.chars().count() as u16;
        self.text((self.width / 2).saturating_sub(len / 2), row, s, color);
    }

    /// Filled disc, cells doubled horizontally to look round.
    fn disc(&mut self, center: ScreenPoint, rows: i32, ch: char, color: Color) {
        let (cx, cy) = (i32::from(center.col), i32::from(center.row));
        for dy in -rows..=rows {
            for dx in -2 * rows..=2 * rows {
                let fx = f64::from(dx) / 2.0;
                if fx * fx + f64::from(dy * dy) <= f64::from(rows * rows) {
                    self.plot(cx + dx, cy + dy, ch, color, center.depth);
                }
            }
        }
    }

    pub fn row_string(&self, row: u16) -> String {
        let start = usize::from(row) * usize::from(self.width);
        self.cells[start..start + usize::from(self.width)]
            .iter()
            .map(|g| g.ch)
            .collect()
    }

    /// Write the whole canvas to the terminal.
    pub fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        for row in 0..self.height {
            out.queue(cursor::MoveTo(0, row))?;
            let mut current = Color::Reset;
            out.queue(style::SetForegroundColor(current))?;
            let start = usize::from(row) * usize::from(self.width);
            for glyph in &self.cells[start..start + usize::from(self.width)] {
                if glyph.color != current {
                    current = glyph.color;
                    out.queue(style::SetForegroundColor(current))?;
                }
                out.queue(Print(glyph.ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        out.flush()
    }
}

// ── Composition ──────────────────────────────────────────────────────────────

/// Build the canvas for one snapshot.
pub fn compose(snapshot: &FrameSnapshot, width: u16, height: u16) -> Canvas {
    let mut canvas = Canvas::new(width, height);
    let projector = Projector::new(&snapshot.camera, width, height);

    draw_loops(&mut canvas, &projector, snapshot);
    draw_asteroids(&mut canvas, &projector, snapshot);
    draw_ship(&mut canvas, &projector, snapshot);
    draw_explosion(&mut canvas, &projector, snapshot);

    draw_hud(&mut canvas, snapshot);
    draw_narrative(&mut canvas, snapshot);
    if snapshot.ui.game_over_visible {
        draw_game_over(&mut canvas);
    }
    canvas
}

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snapshot: &FrameSnapshot) -> std::io::Result<()> {
    // Re-queried each frame so resizes take effect immediately.
    let (width, height) = terminal::size()?;
    compose(snapshot, width, height).flush(out)
}

fn draw_loops(canvas: &mut Canvas, projector: &Projector, snapshot: &FrameSnapshot) {
    for ring in &snapshot.loops {
        let color = rgb(ring.color);
        for i in 0..LOOP_SEGMENTS {
            let a = i as f64 / LOOP_SEGMENTS as f64 * std::f64::consts::TAU;
            let p = Position::new(
                ring.position.x + LOOP_RADIUS * a.cos(),
                ring.position.y + LOOP_RADIUS * a.sin(),
                ring.position.z,
            );
            if let Some(sp) = projector.project(p) {
                canvas.plot(i32::from(sp.col), i32::from(sp.row), 'o', color, sp.depth);
            }
        }
    }
}

fn draw_asteroids(canvas: &mut Canvas, projector: &Projector, snapshot: &FrameSnapshot) {
    for asteroid in &snapshot.asteroids {
        if let Some(sp) = projector.project(asteroid.position) {
            let rows = projector.radius_rows(asteroid.scale.max_axis() * ASTEROID_RADIUS, sp.depth);
            canvas.disc(sp, rows, '#', C_ASTEROID);
        }
    }
}

fn draw_ship(canvas: &mut Canvas, projector: &Projector, snapshot: &FrameSnapshot) {
    let Some(ship) = &snapshot.ship else {
        return;
    };
    let roll = ship.rotation.roll();
    let (dx, dy) = (SHIP_HALF_SPAN * roll.cos(), SHIP_HALF_SPAN * roll.sin());
    let p = ship.position;

    let parts = [
        (Position::new(p.x - dx, p.y - dy, p.z), '<'),
        (Position::new(p.x + dx, p.y + dy, p.z), '>'),
        (p, 'A'),
    ];
    for (pos, ch) in parts {
        if let Some(sp) = projector.project(pos) {
            canvas.plot(i32::from(sp.col), i32::from(sp.row), ch, C_SHIP, sp.depth);
        }
    }
}

fn draw_explosion(canvas: &mut Canvas, projector: &Projector, snapshot: &FrameSnapshot) {
    let explosion = &snapshot.explosion;
    if !explosion.attached {
        return;
    }
    if let Some(sp) = projector.project(explosion.position) {
        let rows = projector.radius_rows(explosion.scale * 0.5, sp.depth).max(1);
        let color = if explosion.light_intensity > 0.0 {
            rgb(EXPLOSION_LIGHT_COLOR)
        } else {
            Color::DarkYellow
        };
        // Slightly in front so the fireball covers the wreck.
        canvas.disc(
            ScreenPoint {
                depth: sp.depth - 0.01,
                ..sp
            },
            rows,
            '*',
            color,
        );
    }
}

fn draw_hud(canvas: &mut Canvas, snapshot: &FrameSnapshot) {
    let score = &snapshot.score;
    let left = if score.scoring_enabled {
        format!("Score {:>4}   Loops {:>4}", score.score, score.loops_passed)
    } else {
        format!("Loops {:>4}", score.loops_passed)
    };
    canvas.text(1, 0, &left, C_HUD);

    let status = match (snapshot.run_state, snapshot.phase) {
        (RunState::Idle, _) => "press ENTER to launch",
        (RunState::Stopped, _) => "PAUSED",
        (RunState::Running, GamePhase::Flying) => "",
        (RunState::Running, GamePhase::Exploding) => "HULL BREACH",
        (RunState::Running, GamePhase::Over) => "SIGNAL LOST",
    };
    canvas.text_centered(0, status, C_HUD);

    let hint = "arrows/WASD steer  p pause  r retry  q quit";
    let col = canvas.width.saturating_sub(hint.len() as u16 + 1);
    canvas.text(col, canvas.height.saturating_sub(1), hint, C_HINT);
}

fn draw_narrative(canvas: &mut Canvas, snapshot: &FrameSnapshot) {
    if snapshot.narrative.text.is_empty() {
        return;
    }
    let row = canvas.height.saturating_sub(3);
    canvas.text_centered(row, &snapshot.narrative.text, C_NARRATIVE);
}

fn draw_game_over(canvas: &mut Canvas) {
    let mid = canvas.height / 2;
    canvas.text_centered(mid.saturating_sub(1), "G A M E   O V E R", C_GAME_OVER);
    canvas.text_centered(mid + 1, "press R to retry", C_HUD);
}
