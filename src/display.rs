//! Rendering layer: all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use alien_invasion::entities::{GameState, Rect};
use alien_invasion::settings::Settings;
use alien_invasion::sprite::Sprite;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_STATUS: Color = Color::Yellow;
const C_SHIP: Color = Color::White;
const C_ALIEN: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_BUTTON: Color = Color::Black;
const C_BUTTON_BG: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

pub struct Sprites {
    pub ship: Sprite,
    pub alien: Sprite,
}

/// Where the field sits inside the terminal.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    /// Terminal cell of field coordinate (0, 0).
    pub origin: (u16, u16),
    width: u16,
    height: u16,
}

impl Layout {
    /// Centres the field horizontally below the HUD row.  `None` when the
    /// terminal cannot hold the field, its border, the HUD and the hint row.
    pub fn fit(term_width: u16, term_height: u16, settings: &Settings) -> Option<Layout> {
        let width = u16::try_from(settings.screen_width).ok()?;
        let height = u16::try_from(settings.screen_height).ok()?;
        let framed_width = width.checked_add(2)?;
        if term_width < framed_width || term_height < height.checked_add(4)? {
            return None;
        }
        Some(Layout {
            origin: ((term_width - framed_width) / 2 + 1, 2),
            width,
            height,
        })
    }

    /// Terminal cell for a field cell, if it lies inside the field.
    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((self.origin.0 + x as u16, self.origin.1 + y as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    sprites: &Sprites,
    layout: Option<&Layout>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let Some(layout) = layout else {
        return draw_too_small(out, &state.settings);
    };

    draw_border(out, layout)?;
    draw_hud(out, state, layout)?;

    for alien in &state.aliens {
        draw_sprite(out, layout, &sprites.alien, &alien.rect, C_ALIEN)?;
    }
    out.queue(style::SetForegroundColor(C_BULLET))?;
    for bullet in &state.bullets {
        fill_rect(out, layout, &bullet.rect, '|')?;
    }
    draw_sprite(out, layout, &sprites.ship, &state.ship.rect, C_SHIP)?;
    draw_controls_hint(out, layout)?;

    if !state.stats.game_active {
        draw_button(out, state, layout)?;
    }

    out.queue(style::ResetColor)?;
    park_cursor(out, state, layout)?;
    out.flush()?;
    Ok(())
}

// ── Frame ─────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let (ox, oy) = layout.origin;
    let w = layout.width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(ox - 1, oy - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(ox - 1, oy + layout.height))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in oy..oy + layout.height {
        out.queue(cursor::MoveTo(ox - 1, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(ox + layout.width, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState, layout: &Layout) -> std::io::Result<()> {
    let (ox, _) = layout.origin;

    let hearts: String = "♥".repeat(state.stats.ships_left as usize);
    out.queue(cursor::MoveTo(ox, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Ships: {}", hearts)))?;

    let status = if state.stats.game_active {
        "[ ACTIVE ]"
    } else {
        "[ WAITING ]"
    };
    let sx = (ox + layout.width).saturating_sub(status.len() as u16);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STATUS))?;
    out.queue(Print(status))?;

    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(layout.origin.0, layout.origin.1 + layout.height + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Fire   G : New game   Q : Quit"))?;
    Ok(())
}

fn draw_too_small<W: Write>(out: &mut W, settings: &Settings) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STATUS))?;
    out.queue(Print(format!(
        "Terminal too small: need at least {}x{}",
        settings.screen_width.saturating_add(2),
        settings.screen_height.saturating_add(4)
    )))?;
    out.queue(style::ResetColor)?;
    out.flush()
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Blank cells in the art are transparent; anything outside the field is
/// clipped.
fn draw_sprite<W: Write>(
    out: &mut W,
    layout: &Layout,
    sprite: &Sprite,
    rect: &Rect,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for (dy, row) in sprite.rows.iter().enumerate() {
        for (dx, ch) in row.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            if let Some((col, line)) = layout.cell(rect.x + dx as i32, rect.y + dy as i32) {
                out.queue(cursor::MoveTo(col, line))?;
                out.queue(Print(ch))?;
            }
        }
    }
    Ok(())
}

fn fill_rect<W: Write>(out: &mut W, layout: &Layout, rect: &Rect, ch: char) -> std::io::Result<()> {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some((col, line)) = layout.cell(x, y) {
                out.queue(cursor::MoveTo(col, line))?;
                out.queue(Print(ch))?;
            }
        }
    }
    Ok(())
}

// ── Play button ───────────────────────────────────────────────────────────────

fn draw_button<W: Write>(out: &mut W, state: &GameState, layout: &Layout) -> std::io::Result<()> {
    let button = &state.play_button;
    out.queue(style::SetBackgroundColor(C_BUTTON_BG))?;
    out.queue(style::SetForegroundColor(C_BUTTON))?;
    fill_rect(out, layout, &button.rect, ' ')?;

    let label_len = button.label.chars().count() as i32;
    let lx = button.rect.center_x() - label_len / 2;
    let ly = button.rect.top() + button.rect.height / 2;
    if let Some((col, line)) = layout.cell(lx, ly) {
        out.queue(cursor::MoveTo(col, line))?;
        out.queue(Print(&button.label))?;
    }
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

/// The terminal cursor stands in for the mouse pointer: shown on the play
/// button while waiting, hidden during play.
fn park_cursor<W: Write>(out: &mut W, state: &GameState, layout: &Layout) -> std::io::Result<()> {
    let rect = &state.play_button.rect;
    let target = layout
        .cell(rect.center_x(), rect.top() + rect.height / 2)
        .unwrap_or(layout.origin);
    out.queue(cursor::MoveTo(target.0, target.1))?;
    if state.cursor_visible {
        out.queue(cursor::Show)?;
    } else {
        out.queue(cursor::Hide)?;
    }
    Ok(())
}
