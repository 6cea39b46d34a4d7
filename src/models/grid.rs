//! Fixed-size pixel grids.

use crate::color::Color;

/// Canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 60;
/// Canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 26;

/// The pixel coordinate space shared by every layer of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether a signed coordinate lies inside the canvas.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < self.width as i64 && y >= 0 && y < self.height as i64
    }

    /// Number of cells on the canvas.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

/// A rectangular, fully populated array of colors.
///
/// Cells are stored row-major. A fresh grid holds [`Color::EMPTY`] in every
/// cell; there is no sparse representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    canvas: Canvas,
    cells: Vec<Color>,
}

impl PixelGrid {
    /// Create an all-empty grid covering `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas, cells: vec![Color::EMPTY; canvas.area()] }
    }

    /// Build a grid from rows, forcing it to the canvas dimensions.
    ///
    /// Short rows are padded with the empty sentinel, long rows and extra
    /// rows are truncated, missing rows are filled with empties. The flag is
    /// `true` when any such normalization happened.
    pub fn from_rows(rows: Vec<Vec<Color>>, canvas: Canvas) -> (Self, bool) {
        let width = canvas.width as usize;
        let height = canvas.height as usize;
        let mut normalized = rows.len() != height;
        let mut cells = Vec::with_capacity(canvas.area());

        for mut row in rows.into_iter().take(height) {
            if row.len() != width {
                normalized = true;
                row.resize(width, Color::EMPTY);
            }
            cells.extend(row);
        }
        cells.resize(canvas.area(), Color::EMPTY);

        (Self { canvas, cells }, normalized)
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.canvas.width && y < self.canvas.height {
            Some(y as usize * self.canvas.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Color at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set the color at `(x, y)`. Returns `false` outside the grid.
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = color;
                true
            }
            None => false,
        }
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks(self.canvas.width.max(1) as usize)
    }

    /// Copy out as nested rows (the persisted shape).
    pub fn to_rows(&self) -> Vec<Vec<Color>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Iterate `(x, y, color)` for every non-empty cell.
    pub fn painted(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let width = self.canvas.width.max(1) as usize;
        self.cells.iter().enumerate().filter(|(_, c)| !c.is_empty()).map(move |(i, c)| {
            ((i % width) as u32, (i / width) as u32, *c)
        })
    }

    /// Whether every cell is the empty sentinel.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Color::is_empty)
    }

    /// Reset every cell to the empty sentinel.
    pub fn clear(&mut self) {
        self.cells.fill(Color::EMPTY);
    }

    /// Flood fill the 4-connected region around `(x, y)` that shares the seed
    /// color, replacing it with `color`.
    ///
    /// Returns the number of cells changed (0 when the seed is outside the
    /// grid or already has `color`).
    pub fn flood_fill(&mut self, x: u32, y: u32, color: Color) -> usize {
        let Some(seed) = self.get(x, y) else {
            return 0;
        };
        if seed == color {
            return 0;
        }

        let mut changed = 0;
        let mut stack = vec![(x, y)];
        while let Some((cx, cy)) = stack.pop() {
            match self.get(cx, cy) {
                Some(c) if c == seed => {}
                _ => continue,
            }
            self.set(cx, cy, color);
            changed += 1;

            if cx > 0 {
                stack.push((cx - 1, cy));
            }
            if cy > 0 {
                stack.push((cx, cy - 1));
            }
            stack.push((cx + 1, cy));
            stack.push((cx, cy + 1));
        }
        changed
    }

    /// Row-major RGBA bytes, 4 per pixel, alpha always 255.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.cells.len() * 4);
        for c in &self.cells {
            bytes.extend_from_slice(&c.to_rgba().0);
        }
        bytes
    }
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::new(Canvas::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_new_grid_is_fully_populated_and_blank() {
        let grid = PixelGrid::default();
        assert_eq!(grid.width(), 60);
        assert_eq!(grid.height(), 26);
        assert_eq!(grid.rows().count(), 26);
        assert!(grid.rows().all(|row| row.len() == 60));
        assert!(grid.is_blank());
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = PixelGrid::new(Canvas::new(3, 2));
        assert!(grid.set(2, 1, RED));
        assert_eq!(grid.get(2, 1), Some(RED));
        assert!(!grid.set(3, 0, RED));
        assert!(!grid.set(0, 2, RED));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_from_rows_normalizes() {
        let canvas = Canvas::new(3, 2);
        let (grid, normalized) = PixelGrid::from_rows(vec![vec![RED; 3], vec![RED; 3]], canvas);
        assert!(!normalized);
        assert_eq!(grid.painted().count(), 6);

        let (grid, normalized) = PixelGrid::from_rows(vec![vec![RED; 5]], canvas);
        assert!(normalized);
        assert_eq!(grid.get(2, 0), Some(RED));
        assert_eq!(grid.get(0, 1), Some(Color::EMPTY));
        assert_eq!(grid.rows().count(), 2);
    }

    #[test]
    fn test_rows_roundtrip() {
        let mut grid = PixelGrid::new(Canvas::new(4, 3));
        grid.set(1, 2, RED);
        let (back, normalized) = PixelGrid::from_rows(grid.to_rows(), grid.canvas());
        assert!(!normalized);
        assert_eq!(back, grid);
    }

    #[test]
    fn test_painted_coordinates() {
        let mut grid = PixelGrid::new(Canvas::new(4, 3));
        grid.set(3, 1, RED);
        let painted: Vec<_> = grid.painted().collect();
        assert_eq!(painted, vec![(3, 1, RED)]);
    }

    #[test]
    fn test_flood_fill_region() {
        let mut grid = PixelGrid::new(Canvas::new(5, 5));
        // Vertical wall at x = 2 splits the grid
        for y in 0..5 {
            grid.set(2, y, RED);
        }
        let blue = Color::rgb(0, 0, 255);
        let changed = grid.flood_fill(0, 0, blue);
        assert_eq!(changed, 10);
        assert_eq!(grid.get(1, 4), Some(blue));
        assert_eq!(grid.get(3, 0), Some(Color::EMPTY));
        assert_eq!(grid.get(2, 2), Some(RED));
    }

    #[test]
    fn test_flood_fill_noop_cases() {
        let mut grid = PixelGrid::new(Canvas::new(2, 2));
        assert_eq!(grid.flood_fill(5, 5, RED), 0);
        assert_eq!(grid.flood_fill(0, 0, Color::EMPTY), 0);
    }

    #[test]
    fn test_to_rgba_bytes_layout() {
        let mut grid = PixelGrid::new(Canvas::new(2, 1));
        grid.set(1, 0, Color::rgb(1, 2, 3));
        assert_eq!(grid.to_rgba_bytes(), vec![0, 0, 0, 255, 1, 2, 3, 255]);
    }

    #[test]
    fn test_clear_keeps_canvas() {
        let mut grid = PixelGrid::new(Canvas::new(3, 2));
        grid.set(2, 1, RED);
        grid.clear();
        assert!(grid.is_blank());
        assert_eq!(grid.canvas(), Canvas::new(3, 2));
    }
}
