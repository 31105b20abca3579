use std::io::{self, Write};

use crossterm::{
    cursor, execute,
    style::{Attribute, SetAttribute},
    terminal,
};
use unicode_width::UnicodeWidthChar;

use arbor::Buffer;

/// Raw-mode terminal with double-buffered output: frames are rendered into
/// a [`Buffer`] and only the cells that changed since the previous frame
/// are written to the screen.
pub struct Terminal {
    stdout: io::Stdout,
    current: Buffer,
    previous: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            current: Buffer::new(width, height),
            previous: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    /// Start a new frame: track terminal resizes and hand out a cleared
    /// buffer to draw into.
    pub fn frame(&mut self) -> io::Result<&mut Buffer> {
        let (width, height) = terminal::size()?;
        if width != self.current.width() || height != self.current.height() {
            self.current = Buffer::new(width, height);
            self.previous = Buffer::new(width, height);
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }
        self.current.clear();
        Ok(&mut self.current)
    }

    /// Write the changed cells of the current frame to the screen and make
    /// it the reference for the next diff.
    pub fn flush_frame(&mut self) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_width: u16 = 1;
        let mut bold = false;
        let mut invert = false;

        execute!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current.diff(&self.previous) {
            // The wide character before it already covers this cell.
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x + last_width {
                execute!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if cell.bold != bold {
                let attribute = if cell.bold {
                    Attribute::Bold
                } else {
                    Attribute::NormalIntensity
                };
                execute!(self.stdout, SetAttribute(attribute))?;
                bold = cell.bold;
            }
            if cell.invert != invert {
                let attribute = if cell.invert {
                    Attribute::Reverse
                } else {
                    Attribute::NoReverse
                };
                execute!(self.stdout, SetAttribute(attribute))?;
                invert = cell.invert;
            }

            write!(self.stdout, "{}", cell.ch)?;

            last_x = x;
            last_y = y;
            last_width = cell.ch.width().unwrap_or(1).max(1) as u16;
        }

        execute!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;

        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
