//! Cell buffer the draw pass paints into, and the world→cell viewport.
//!
//! Drawing never touches the terminal directly: a whole frame is composed
//! here and then presented in one pass, which keeps flicker down and lets
//! tests inspect what would have been shown.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::entities::Rect;
use crate::sprites::Sprite;

/// Draw-primitive sink.
pub trait DrawSink {
    /// Size in cells as `(cols, rows)`.
    fn size(&self) -> (u16, u16);
    fn clear(&mut self, bg: Color);
    /// Paint a sprite with its top-left at `(col, row)`; transparent cells
    /// and anything off-screen are skipped.
    fn blit(&mut self, sprite: &Sprite, col: i32, row: i32);
    fn fill_rect(&mut self, col: i32, row: i32, width: usize, height: usize, bg: Color);
    fn outline_rect(&mut self, col: i32, row: i32, width: usize, height: usize, fg: Color);
    fn text(&mut self, col: i32, row: i32, text: &str, fg: Color);

    /// Text centred on `col`.
    fn text_centred(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        let half = text.chars().count() as i32 / 2;
        self.text(col - half, row, text, fg);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Color::Reset,
    };
}

pub struct Frame {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; cols as usize * rows as usize],
        }
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize])
    }

    /// The characters of one row, for inspection.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.cell(col, row))
            .map(|c| c.ch)
            .collect()
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(idx)
    }

    /// Queue the whole frame, switching colours only when they change.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut fg = None;
        let mut bg = None;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if fg != Some(cell.fg) {
                    out.queue(style::SetForegroundColor(cell.fg))?;
                    fg = Some(cell.fg);
                }
                if bg != Some(cell.bg) {
                    out.queue(style::SetBackgroundColor(cell.bg))?;
                    bg = Some(cell.bg);
                }
                out.queue(Print(cell.ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()
    }
}

impl DrawSink for Frame {
    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn clear(&mut self, bg: Color) {
        for cell in &mut self.cells {
            *cell = Cell { bg, ..Cell::BLANK };
        }
    }

    fn blit(&mut self, sprite: &Sprite, col: i32, row: i32) {
        for dy in 0..sprite.height {
            for dx in 0..sprite.width {
                let Some(glyph) = sprite.get(dx, dy) else {
                    continue;
                };
                if let Some(cell) = self.cell_mut(col + dx as i32, row + dy as i32) {
                    cell.ch = glyph.ch;
                    cell.fg = glyph.fg;
                }
            }
        }
    }

    fn fill_rect(&mut self, col: i32, row: i32, width: usize, height: usize, bg: Color) {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                if let Some(cell) = self.cell_mut(col + dx, row + dy) {
                    *cell = Cell { bg, ..Cell::BLANK };
                }
            }
        }
    }

    fn outline_rect(&mut self, col: i32, row: i32, width: usize, height: usize, fg: Color) {
        if width < 2 || height < 2 {
            return;
        }
        let (w, h) = (width as i32 - 1, height as i32 - 1);
        for dx in 0..=w {
            for (y, ch) in [(row, '─'), (row + h, '─')] {
                if let Some(cell) = self.cell_mut(col + dx, y) {
                    cell.ch = ch;
                    cell.fg = fg;
                }
            }
        }
        for dy in 0..=h {
            for x in [col, col + w] {
                if let Some(cell) = self.cell_mut(x, row + dy) {
                    cell.ch = '│';
                    cell.fg = fg;
                }
            }
        }
        for (x, y, ch) in [
            (col, row, '┌'),
            (col + w, row, '┐'),
            (col, row + h, '└'),
            (col + w, row + h, '┘'),
        ] {
            if let Some(cell) = self.cell_mut(x, y) {
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }

    fn text(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col + i as i32, row) {
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }
}

/// Maps the fixed world onto however many cells the terminal has.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub world_width: f32,
    pub world_height: f32,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(world_width: f32, world_height: f32, cols: u16, rows: u16) -> Self {
        Self {
            world_width,
            world_height,
            cols,
            rows,
        }
    }

    fn scale(&self) -> (f32, f32) {
        (
            self.cols as f32 / self.world_width,
            self.rows as f32 / self.world_height,
        )
    }

    pub fn col(&self, x: f32) -> i32 {
        (x * self.scale().0).floor() as i32
    }

    pub fn row(&self, y: f32) -> i32 {
        (y * self.scale().1).floor() as i32
    }

    /// `(col, row, width, height)` covering `rect`, never thinner than one cell.
    pub fn cells(&self, rect: &Rect) -> (i32, i32, usize, usize) {
        let (sx, sy) = self.scale();
        let w = ((rect.w * sx).round() as usize).max(1);
        let h = ((rect.h * sy).round() as usize).max(1);
        (self.col(rect.x), self.row(rect.y), w, h)
    }

    /// World coordinate at the centre of a cell, for pointer input.
    pub fn to_world(&self, col: u16, row: u16) -> (f32, f32) {
        let (sx, sy) = self.scale();
        ((col as f32 + 0.5) / sx, (row as f32 + 0.5) / sy)
    }
}
