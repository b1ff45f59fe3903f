//! Menu, leaderboard, prompt and loading screens.
//!
//! Centered text screens around the board. All of them clear the
//! framebuffer first and draw into the middle of the viewport.

use crate::board_view::{draw_border, Viewport};
use crate::core::{Leaderboard, TIMESTAMP_FORMAT};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

const TITLE: &str = "P A I R S";

fn text_style() -> CellStyle {
    CellStyle::default()
}

fn title_style() -> CellStyle {
    CellStyle {
        fg: Rgb::new(255, 200, 0),
        bold: true,
        ..CellStyle::default()
    }
}

fn hint_style() -> CellStyle {
    CellStyle {
        dim: true,
        ..CellStyle::default()
    }
}

fn error_style() -> CellStyle {
    CellStyle {
        fg: Rgb::new(240, 80, 80),
        bold: true,
        ..CellStyle::default()
    }
}

fn begin(fb: &mut FrameBuffer, viewport: Viewport, rows: u16) -> u16 {
    fb.resize(viewport.width, viewport.height);
    fb.clear(Cell::default());
    let top = viewport.height.saturating_sub(rows) / 2;
    fb.put_str_centered(0, top, viewport.width, TITLE, title_style());
    top.saturating_add(2)
}

/// Main menu. `selected` is highlighted with a marker.
pub fn render_menu(fb: &mut FrameBuffer, viewport: Viewport, items: &[&str], selected: usize) {
    let mut y = begin(fb, viewport, items.len() as u16 + 4);
    for (i, item) in items.iter().enumerate() {
        let (line, style) = if i == selected {
            (
                format!("> {item} <"),
                CellStyle {
                    fg: Rgb::new(255, 255, 255),
                    bold: true,
                    ..CellStyle::default()
                },
            )
        } else {
            (format!("  {item}  "), text_style())
        };
        fb.put_str_centered(0, y, viewport.width, &line, style);
        y = y.saturating_add(1);
    }
    fb.put_str_centered(
        0,
        y.saturating_add(1),
        viewport.width,
        "arrows move  enter select  q quit",
        hint_style(),
    );
}

/// Best scores per difficulty, one line per entry.
pub fn render_stats(fb: &mut FrameBuffer, viewport: Viewport, leaderboard: &Leaderboard) {
    let rows = 3 * (leaderboard.capacity() as u16 + 2) + 2;
    let mut y = begin(fb, viewport, rows);

    for (difficulty, entries) in leaderboard.iter() {
        fb.put_str_centered(0, y, viewport.width, difficulty.label(), title_style());
        y = y.saturating_add(1);
        if entries.is_empty() {
            fb.put_str_centered(0, y, viewport.width, "no scores yet", hint_style());
            y = y.saturating_add(1);
        }
        for (rank, entry) in entries.iter().enumerate() {
            let line = format!(
                "{}. {} - {} moves ({})",
                rank + 1,
                entry.player_name,
                entry.moves,
                entry.timestamp.format(TIMESTAMP_FORMAT)
            );
            fb.put_str_centered(0, y, viewport.width, &line, text_style());
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);
    }

    fb.put_str_centered(0, y, viewport.width, "esc back", hint_style());
}

/// A titled text field with an optional validation message under it.
pub fn render_prompt(fb: &mut FrameBuffer, viewport: Viewport, title: &str, text: &str, error: Option<&str>) {
    let y = begin(fb, viewport, 7);
    fb.put_str_centered(0, y, viewport.width, title, text_style());

    let field_w = 28u16.min(viewport.width);
    let field_x = viewport.width.saturating_sub(field_w) / 2;
    let field_y = y.saturating_add(1);
    draw_border(fb, field_x, field_y, field_w, 3, text_style());
    let shown: String = {
        let max = field_w.saturating_sub(4) as usize;
        let skip = text.chars().count().saturating_sub(max);
        text.chars().skip(skip).collect()
    };
    let input_style = CellStyle {
        fg: Rgb::new(255, 255, 255),
        bold: true,
        ..CellStyle::default()
    };
    fb.put_str(field_x + 2, field_y + 1, &shown, input_style);
    fb.put_char(
        field_x + 2 + shown.chars().count() as u16,
        field_y + 1,
        '_',
        hint_style(),
    );

    if let Some(error) = error {
        fb.put_str_centered(0, field_y.saturating_add(3), viewport.width, error, error_style());
    }
    fb.put_str_centered(
        0,
        field_y.saturating_add(5),
        viewport.width,
        "enter accept  esc cancel",
        hint_style(),
    );
}

/// Progress bar while tile faces load.
pub fn render_loading(fb: &mut FrameBuffer, viewport: Viewport, loaded: usize, total: usize) {
    let y = begin(fb, viewport, 5);
    fb.put_str_centered(0, y, viewport.width, "Loading tiles...", text_style());

    let bar_w = 30u16.min(viewport.width.saturating_sub(2));
    let filled = if total == 0 {
        bar_w
    } else {
        (loaded.min(total) as u64 * bar_w as u64 / total as u64) as u16
    };
    let bar_x = viewport.width.saturating_sub(bar_w) / 2;
    let bar_style = CellStyle {
        fg: Rgb::new(0, 200, 120),
        ..CellStyle::default()
    };
    fb.fill_rect(bar_x, y + 1, bar_w, 1, '░', hint_style());
    fb.fill_rect(bar_x, y + 1, filled, 1, '█', bar_style);
    fb.put_str_centered(0, y + 2, viewport.width, &format!("{loaded}/{total}"), text_style());
}
