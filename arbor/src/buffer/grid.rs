use unicode_width::UnicodeWidthChar;

use super::Cell;
use crate::display::DrawSurface;

/// A width × height cell grid with a cursor and current text attributes,
/// implementing [`DrawSurface`]. The terminal driver renders frames into a
/// `Buffer` and flushes the [`diff`](Buffer::diff) against the previous
/// frame; tests read rows back out of it directly.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    cursor: (u16, u16),
    bold: bool,
    invert: bool,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
            cursor: (0, 0),
            bold: false,
            invert: false,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Reset every cell and the cursor/attribute state.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
        self.cursor = (0, 0);
        self.bold = false;
        self.invert = false;
    }

    /// Cells that differ from `other`, as `(x, y, cell)`.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    /// The characters of row `y` as a string, continuation cells skipped.
    /// Mostly useful in tests.
    pub fn row_text(&self, y: u16) -> String {
        let mut text = String::new();
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y) {
                if !cell.wide_continuation {
                    text.push(cell.ch);
                }
            }
        }
        text
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    fn put(&mut self, ch: char) {
        let width = ch.width().unwrap_or(0) as u16;
        if width == 0 {
            return;
        }
        let (x, y) = self.cursor;
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.cells[index] = Cell {
                ch,
                bold: self.bold,
                invert: self.invert,
                wide_continuation: false,
            };
            if width == 2 && x + 1 < self.width {
                let index = self.index(x + 1, y);
                self.cells[index] = Cell {
                    ch: ' ',
                    bold: self.bold,
                    invert: self.invert,
                    wide_continuation: true,
                };
            }
        }
        self.cursor.0 = x.saturating_add(width);
    }
}

impl DrawSurface for Buffer {
    fn set_bold(&mut self, on: bool) {
        self.bold = on;
    }

    fn set_invert(&mut self, on: bool) {
        self.invert = on;
    }

    fn draw(&mut self, text: &str) {
        for ch in text.chars() {
            self.put(ch);
        }
    }

    fn draw_at(&mut self, x: u16, y: u16, text: &str) {
        self.cursor = (x, y);
        self.draw(text);
    }
}
