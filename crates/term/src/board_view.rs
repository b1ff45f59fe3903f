//! BoardView: maps a [`BoardScreen`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each tile is 3 columns by 1 row with a one-cell gap on every side, so a
//! board of side `n` needs a `4n + 3` by `2n + 3` frame including the border.

use crate::board_screen::BoardScreen;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Position, TileVisual};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const TILE_W: u16 = 3;
const STRIDE_X: u16 = 4;
const STRIDE_Y: u16 = 2;

/// Where a board of a given side sits inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub side: usize,
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

impl BoardLayout {
    pub fn new(side: usize, viewport: Viewport, anchor_y: AnchorY) -> Self {
        let n = side as u16;
        let frame_w = n * STRIDE_X + 3;
        let frame_h = n * STRIDE_Y + 3;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Self {
            side,
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Top-left terminal cell of a tile.
    pub fn tile_origin(&self, pos: Position) -> (u16, u16) {
        (
            self.start_x + 2 + pos.col as u16 * STRIDE_X,
            self.start_y + 2 + pos.row as u16 * STRIDE_Y,
        )
    }

    /// The tile under a terminal cell. Gaps and the border hit nothing.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Position> {
        let dx = x.checked_sub(self.start_x + 2)?;
        let dy = y.checked_sub(self.start_y + 2)?;
        if dx % STRIDE_X >= TILE_W || dy % STRIDE_Y != 0 {
            return None;
        }
        let col = (dx / STRIDE_X) as usize;
        let row = (dy / STRIDE_Y) as usize;
        (row < self.side && col < self.side).then(|| Position::new(row, col))
    }
}

/// A lightweight terminal renderer for the board screen.
pub struct BoardView {
    anchor_y: AnchorY,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl BoardView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, side: usize, viewport: Viewport) -> BoardLayout {
        BoardLayout::new(side, viewport, self.anchor_y)
    }

    /// Render the board into an existing framebuffer.
    pub fn render_into(
        &self,
        screen: &BoardScreen,
        cursor: Option<Position>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());
        if !screen.is_active() {
            return;
        }

        let layout = self.layout(screen.side(), viewport);
        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            bg,
        );
        draw_border(fb, layout.start_x, layout.start_y, layout.frame_w, layout.frame_h, border);

        for row in 0..screen.side() {
            for col in 0..screen.side() {
                let pos = Position::new(row, col);
                self.draw_tile(fb, &layout, screen, pos);
            }
        }

        if let Some(pos) = cursor.filter(|p| p.row < screen.side() && p.col < screen.side()) {
            let (x, y) = layout.tile_origin(pos);
            let style = CellStyle {
                fg: Rgb::new(255, 255, 255),
                bold: true,
                ..bg
            };
            fb.put_char(x - 1, y, '[', style);
            fb.put_char(x + TILE_W, y, ']', style);
        }

        self.draw_side_panel(fb, screen, viewport, &layout);

        if let Some(dialog) = screen.completion() {
            draw_dialog(
                fb,
                viewport,
                &["YOU WIN!", "", &dialog.message(), "", "enter: back to menu"],
            );
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, screen: &BoardScreen, cursor: Option<Position>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, cursor, viewport, &mut fb);
        fb
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, layout: &BoardLayout, screen: &BoardScreen, pos: Position) {
        let (x, y) = layout.tile_origin(pos);
        let visual = screen.tile(pos);
        match (visual, screen.face(visual)) {
            (TileVisual::Revealed(_), Some(face)) => {
                let [r, g, b] = face.color;
                let style = CellStyle {
                    fg: Rgb::new(10, 10, 10),
                    bg: Rgb::new(r, g, b),
                    bold: true,
                    dim: false,
                };
                fb.fill_rect(x, y, TILE_W, 1, ' ', style);
                fb.put_char(x + 1, y, face.glyph, style);
            }
            (TileVisual::Matched(_), Some(face)) => {
                let [r, g, b] = face.color;
                let style = CellStyle {
                    fg: Rgb::new(r, g, b),
                    bg: Rgb::new(45, 45, 55),
                    bold: false,
                    dim: false,
                };
                fb.fill_rect(x, y, TILE_W, 1, ' ', style);
                fb.put_char(x + 1, y, face.glyph, style);
            }
            _ => {
                let style = CellStyle {
                    fg: Rgb::new(120, 120, 150),
                    bg: Rgb::new(60, 60, 80),
                    bold: false,
                    dim: false,
                };
                fb.fill_rect(x, y, TILE_W, 1, '▒', style);
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, screen: &BoardScreen, viewport: Viewport, layout: &BoardLayout) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            bold: false,
            ..label
        };
        let hint = CellStyle { dim: true, ..value };

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "PLAYER", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, screen.player_name(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, screen.difficulty().label(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, screen.moves(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PAIRS", label);
        y = y.saturating_add(1);
        let pairs = format!("{}/{}", screen.matched_pairs(), screen.side() * screen.side() / 2);
        fb.put_str(panel_x, y, &pairs, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}s", screen.seconds()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "enter flip", hint);
        fb.put_str(panel_x, y.saturating_add(1), "esc   menu", hint);
    }
}

pub(crate) fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// A bordered box of centered lines in the middle of the viewport.
pub(crate) fn draw_dialog(fb: &mut FrameBuffer, viewport: Viewport, lines: &[&str]) {
    let text_w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let w = text_w.saturating_add(4).min(viewport.width);
    let h = (lines.len() as u16).saturating_add(2).min(viewport.height);
    let x = viewport.width.saturating_sub(w) / 2;
    let y = viewport.height.saturating_sub(h) / 2;

    let style = CellStyle {
        fg: Rgb::new(255, 255, 255),
        bg: Rgb::new(20, 20, 60),
        bold: true,
        dim: false,
    };
    fb.fill_rect(x, y, w, h, ' ', style);
    draw_border(fb, x, y, w, h, style);
    for (i, line) in lines.iter().enumerate() {
        fb.put_str_centered(x + 1, y + 1 + i as u16, w.saturating_sub(2), line, style);
    }
}
