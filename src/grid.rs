//! Depth-buffered character grid for one frame

/// The surviving sample of one screen cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenCell {
    /// One over view-space z; larger is nearer
    pub depth: f64,
    pub glyph: char,
}

/// Dense `width * height` grid of optional cells, row-major.
///
/// An empty cell behaves as depth 0, so only samples in front of the viewer
/// (positive depth) can ever be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<ScreenCell>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Depth-test a candidate sample against the cell at (x, y).
    ///
    /// Returns true when the candidate was stored. Off-screen coordinates are
    /// discarded. Equal depth keeps the existing sample.
    pub fn plot(&mut self, x: i64, y: i64, depth: f64, glyph: char) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };

        let current = self.cells[idx].map_or(0.0, |cell| cell.depth);
        if depth > current {
            self.cells[idx] = Some(ScreenCell { depth, glyph });
            true
        } else {
            false
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&ScreenCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x].as_ref()
    }

    /// Glyph to display at (x, y), blank when nothing survived
    pub fn glyph_at(&self, x: usize, y: usize) -> char {
        self.get(x, y).map_or(crate::BLANK, |cell| cell.glyph)
    }

    /// Occupied cells as ((x, y), cell), in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = ((usize, usize), &ScreenCell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.as_ref().map(|c| ((idx % width, idx / width), c)))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// One line per row, each exactly `width` characters
    pub fn to_ascii(&self) -> String {
        self.to_ascii_indented("")
    }

    pub fn to_ascii_indented(&self, indent: &str) -> String {
        let mut result = String::with_capacity((self.width + indent.len() + 1) * self.height);

        for y in 0..self.height {
            result.push_str(indent);
            for x in 0..self.width {
                result.push(self.glyph_at(x, y));
            }
            result.push('\n');
        }

        result
    }
}
