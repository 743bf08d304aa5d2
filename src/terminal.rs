//! Terminal output of rendered frames

use crate::grid::Grid;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, BufWriter, Stdout, Write, stdout};

/// Paints grids onto a character stream, one full frame per call.
///
/// The screen is cleared once before the first frame; every frame then starts
/// by moving the cursor to the top-left corner and overwriting in place.
pub struct TerminalDisplay<W: Write = Stdout> {
    buffer: BufWriter<W>,
    indent: String,
    cleared: bool,
}

impl TerminalDisplay<Stdout> {
    pub fn stdout() -> Self {
        Self::new(stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self {
            buffer: BufWriter::new(writer),
            indent: String::new(),
            cleared: false,
        }
    }

    /// Prefix every row with `indent`
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn render(&mut self, grid: &Grid) -> io::Result<()> {
        if !self.cleared {
            queue!(self.buffer, Clear(ClearType::All))?;
            self.cleared = true;
        }
        queue!(self.buffer, MoveTo(0, 0))?;

        self.buffer.write_all(grid.to_ascii_indented(&self.indent).as_bytes())?;
        self.buffer.flush()
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> io::Result<W> {
        self.buffer.into_inner().map_err(|e| e.into_error())
    }
}
