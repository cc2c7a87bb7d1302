//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only scales world
//! coordinates onto the terminal grid and translates state into terminal
//! commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use sidescroller::compute::{FIELD_HEIGHT, FIELD_WIDTH};
use sidescroller::entities::{
    Enemy, EnemyKind, GameStatus, HealthBar, Missile, MissileState, Player, Star, StarColor,
    World,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_MISSILE: Color = Color::Cyan;
const C_FIGHTER: Color = Color::Red;
const C_BOSS: Color = Color::Magenta;
const C_HEALTH: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Width of a full health bar, in cells.
const HEALTH_BAR_CELLS: f32 = 5.0;

// ── Coordinate scaling ────────────────────────────────────────────────────────

/// Maps playfield coordinates onto the terminal. Row 0 is the HUD and the
/// last row is the controls hint; sprites land on the rows between.
struct Grid {
    cols: u16,
    rows: u16,
}

impl Grid {
    /// Cell for a world position, or `None` when it lies off the playfield
    /// (parked missiles at their off-screen sentinel, enemies mid-wrap).
    fn cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if self.cols < 4 || self.rows < 4 {
            return None;
        }
        if !(0.0..=FIELD_WIDTH).contains(&x) || !(0.0..=FIELD_HEIGHT).contains(&y) {
            return None;
        }
        let col = (x / FIELD_WIDTH * (self.cols - 1) as f64) as u16;
        let row = 1 + (y / FIELD_HEIGHT * (self.rows - 3) as f64) as u16;
        Some((col.min(self.cols - 1), row.min(self.rows - 2)))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let grid = Grid { cols, rows };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for star in &world.stars {
        draw_star(out, &grid, star)?;
    }
    for missile in &world.missiles {
        draw_missile(out, &grid, missile)?;
    }
    for enemy in &world.enemies {
        draw_enemy(out, &grid, enemy)?;
    }
    draw_player(out, &grid, &world.player)?;
    draw_hud(out, &grid, world)?;
    draw_controls_hint(out, &grid)?;

    if world.status == GameStatus::GameOver {
        draw_game_over(out, &grid, world)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_star<W: Write>(out: &mut W, grid: &Grid, star: &Star) -> std::io::Result<()> {
    if let Some((col, row)) = grid.cell(star.pos.x, star.pos.y) {
        let color = match star.color {
            StarColor::Yellow => Color::Yellow,
            StarColor::Red => Color::DarkRed,
            StarColor::White => Color::Grey,
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print("·"))?;
    }
    Ok(())
}

fn draw_missile<W: Write>(out: &mut W, grid: &Grid, missile: &Missile) -> std::io::Result<()> {
    if missile.state != MissileState::Firing {
        return Ok(());
    }
    if let Some((col, row)) = grid.cell(missile.pos.x, missile.pos.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_MISSILE))?;
        out.queue(Print("»"))?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, grid: &Grid, player: &Player) -> std::io::Result<()> {
    if let Some((col, row)) = grid.cell(player.pos.x, player.pos.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        out.queue(Print("▶"))?;
        draw_health_bar(out, &player.health_bar, col, row)?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, grid: &Grid, enemy: &Enemy) -> std::io::Result<()> {
    if let Some((col, row)) = grid.cell(enemy.pos.x, enemy.pos.y) {
        out.queue(cursor::MoveTo(col, row))?;
        match enemy.kind {
            EnemyKind::Fighter => {
                out.queue(style::SetForegroundColor(C_FIGHTER))?;
                out.queue(Print("◄"))?;
            }
            EnemyKind::Boss => {
                out.queue(style::SetForegroundColor(C_BOSS))?;
                out.queue(Print("◆"))?;
            }
        }
        draw_health_bar(out, &enemy.health_bar, col, row)?;
    }
    Ok(())
}

/// Proportional health line in the row above the sprite. Skipped when the
/// sprite sits directly under the HUD row.
fn draw_health_bar<W: Write>(
    out: &mut W,
    bar: &HealthBar,
    col: u16,
    row: u16,
) -> std::io::Result<()> {
    if row <= 1 {
        return Ok(());
    }
    let filled = (bar.ratio() * HEALTH_BAR_CELLS).ceil() as usize;
    if filled == 0 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col, row - 1))?;
    out.queue(style::SetForegroundColor(C_HEALTH))?;
    out.queue(Print("─".repeat(filled)))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, grid: &Grid, world: &World) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Score:{:>6}  Kills:{:>4}",
        world.player.score, world.player.kills
    )))?;

    // Player health, right-aligned
    let bar = &world.player.health_bar;
    let hp_str = format!("HP {:>2}/{:<2}", bar.health, bar.max_health);
    let rx = grid.cols.saturating_sub(hp_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HEALTH))?;
    out.queue(Print(&hp_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, grid.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ ← → / W S A D : Steer   SPACE : Fire   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, grid: &Grid, world: &World) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let score_line = format!(
        "Score: {:>6}   Kills: {:>4}",
        world.player.score, world.player.kills
    );
    let hint = "Press any key to exit";

    let cx = grid.cols / 2;
    let total_rows = lines.len() as u16 + 2;
    let start_row = (grid.rows / 2).saturating_sub(total_rows / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&score_line))?;

    let hint_row = score_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
