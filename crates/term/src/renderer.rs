//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw; every other frame only rewrites the runs of cells that
//! changed. Mouse capture is enabled while the renderer is entered so tile
//! clicks reach the event loop.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(event::EnableMouseCapture)?;
        self.buf.queue(terminal::SetTitle("pairs"))?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(event::DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers should keep one `FrameBuffer` and pass it in every frame.
    /// The renderer will diff against the previous frame and then swap buffers
    /// so the caller can reuse the old one without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        // Take previous out to avoid borrow conflicts (no cloning).
        let (mut prev, needs_full) = match self.last.take() {
            Some(prev) => {
                let resized = prev.width() != fb.width() || prev.height() != fb.height();
                (prev, resized)
            }
            None => (FrameBuffer::new(fb.width(), fb.height()), true),
        };

        if needs_full {
            self.buf.clear();
            encode_full_into(fb, &mut self.buf)?;
            self.flush_buf()?;
            prev.resize(fb.width(), fb.height());
        } else {
            self.buf.clear();
            encode_diff_into(&prev, fb, &mut self.buf)?;
            self.flush_buf()?;
        }

        // Swap current into prev so next frame can diff without cloning.
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut enc = StyleEncoder::new(out);
    let w = fb.width() as usize;
    if w > 0 {
        for (y, row) in fb.cells().chunks(w).enumerate() {
            if y > 0 {
                enc.out.queue(Print("\r\n"))?;
            }
            for cell in row {
                enc.cell(*cell)?;
            }
        }
    }
    enc.finish()
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut enc = StyleEncoder::new(out);
    let w = next.width() as usize;

    for_each_changed_run(prev, next, |x, y, len| {
        enc.out.queue(cursor::MoveTo(x, y))?;
        let start = y as usize * w + x as usize;
        for cell in &next.cells()[start..start + len as usize] {
            enc.cell(*cell)?;
        }
        Ok(())
    })?;

    enc.finish()
}

/// Emits only the style changes between consecutive cells.
///
/// An attribute change needs an SGR reset, which also clears colors, so both
/// colors are re-sent after it.
struct StyleEncoder<'a> {
    out: &'a mut Vec<u8>,
    current: Option<CellStyle>,
}

impl<'a> StyleEncoder<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, current: None }
    }

    fn cell(&mut self, cell: Cell) -> Result<()> {
        self.style(cell.style)?;
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn style(&mut self, style: CellStyle) -> Result<()> {
        let (fg, bg) = match self.current {
            Some(cur) if cur == style => return Ok(()),
            Some(cur) if (cur.bold, cur.dim) == (style.bold, style.dim) => {
                (cur.fg != style.fg, cur.bg != style.bg)
            }
            _ => {
                self.out.queue(SetAttribute(Attribute::Reset))?;
                if style.bold {
                    self.out.queue(SetAttribute(Attribute::Bold))?;
                }
                if style.dim {
                    self.out.queue(SetAttribute(Attribute::Dim))?;
                }
                (true, true)
            }
        };
        if fg {
            self.out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if bg {
            self.out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }
        self.current = Some(style);
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for every horizontal run of cells that differ.
///
/// A size change marks every row dirty.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let w = next.width() as usize;
    if w == 0 {
        return Ok(());
    }
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let rows = prev.cells().chunks(w).zip(next.cells().chunks(w));
    for (y, (old, new)) in rows.enumerate() {
        let mut x = 0;
        while x < w {
            if old[x] == new[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && old[x] != new[x] {
                x += 1;
            }
            f(start as u16, y as u16, (x - start) as u16)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(a: &FrameBuffer, b: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        let mut runs = Vec::new();
        for_each_changed_run(a, b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        runs
    }

    fn count(haystack: &[u8], needle: &str) -> usize {
        String::from_utf8_lossy(haystack).matches(needle).count()
    }

    #[test]
    fn adjacent_changes_coalesce_into_one_run() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);
        for x in 1..=3 {
            b.set(x, 0, Cell { ch: 'X', style });
        }
        assert_eq!(runs(&a, &b), vec![(1, 0, 3)]);
    }

    #[test]
    fn runs_split_on_unchanged_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        b.set(0, 0, Cell { ch: 'A', style });
        b.set(2, 0, Cell { ch: 'B', style });
        b.set(5, 1, Cell { ch: 'C', style });
        assert_eq!(runs(&a, &b), vec![(0, 0, 1), (2, 0, 1), (5, 1, 1)]);
    }

    #[test]
    fn resize_marks_every_row() {
        let a = FrameBuffer::new(3, 1);
        let b = FrameBuffer::new(4, 2);
        assert_eq!(runs(&a, &b), vec![(0, 0, 4), (0, 1, 4)]);
    }

    #[test]
    fn identical_frames_encode_no_cells() {
        let fb = FrameBuffer::new(4, 4);
        let mut diff = Vec::new();
        encode_diff_into(&fb, &fb.clone(), &mut diff).unwrap();
        assert_eq!(count(&diff, " "), 0);
    }

    #[test]
    fn same_style_cells_send_colors_once() {
        let mut fb = FrameBuffer::new(8, 1);
        fb.put_str(0, 0, "abcdefgh", CellStyle::default());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        assert_eq!(count(&out, "\x1b[38;2;"), 1);
        assert_eq!(count(&out, "\x1b[48;2;"), 1);
    }

    #[test]
    fn color_only_change_skips_attribute_reset() {
        let base = CellStyle::default();
        let red = CellStyle {
            fg: Rgb::new(255, 0, 0),
            ..base
        };
        let mut fb = FrameBuffer::new(2, 1);
        fb.put_char(0, 0, 'a', base);
        fb.put_char(1, 0, 'b', red);
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        assert_eq!(count(&out, "\x1b[38;2;"), 2);
        assert_eq!(count(&out, "\x1b[48;2;"), 1);
    }
}
