//! # Maze Grid
//!
//! Tile-resolution WALL/PATH array used only while a map is being built.
//! It covers the area between the two spawn strips and is discarded once
//! the walls have been emitted in world space.
//!
//! Coordinates here are `GridPos`, never pixels. Positions are signed so a
//! carve or jump target can be computed first and rejected by the bounds
//! check afterwards.

use std::collections::VecDeque;
use std::fmt;

/// State of one maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Solid; becomes a wall tile on emission.
    Wall,
    /// Open floor.
    Path,
}

/// The four orthogonal directions as `(dcol, drow)`.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Position of a cell in the maze grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    /// Column.
    pub col: i32,
    /// Row.
    pub row: i32,
}

impl GridPos {
    /// Creates a new grid position.
    #[inline]
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// This position moved by `(dcol, drow)`.
    #[inline]
    #[must_use]
    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.row + drow)
    }

    /// The four orthogonal neighbours (may be out of bounds).
    #[inline]
    #[must_use]
    pub fn neighbors(self) -> [Self; 4] {
        DIRECTIONS.map(|(dc, dr)| self.offset(dc, dr))
    }

    /// The cell one step past `self`, continuing the direction `from -> self`.
    #[inline]
    #[must_use]
    pub const fn jump_from(self, from: Self) -> Self {
        Self::new(2 * self.col - from.col, 2 * self.row - from.row)
    }
}

/// Axis-aligned block of grid cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridRect {
    /// Leftmost column.
    pub col: i32,
    /// Topmost row.
    pub row: i32,
    /// Width in cells.
    pub width: i32,
    /// Height in cells.
    pub height: i32,
}

impl GridRect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(col: i32, row: i32, width: i32, height: i32) -> Self {
        Self { col, row, width, height }
    }

    /// Square block of side `size` centred on `center`.
    ///
    /// Even sizes lean towards the top-left.
    #[must_use]
    pub const fn centered(center: GridPos, size: i32) -> Self {
        Self::new(center.col - size / 2, center.row - size / 2, size, size)
    }

    /// The rectangle grown by `margin` cells on every side.
    #[must_use]
    pub const fn expand(self, margin: i32) -> Self {
        Self::new(
            self.col - margin,
            self.row - margin,
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }

    /// Whether `pos` lies inside.
    #[must_use]
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.col >= self.col
            && pos.col < self.col + self.width
            && pos.row >= self.row
            && pos.row < self.row + self.height
    }

    /// Overlap of two rectangles, or `None` if they are disjoint.
    #[must_use]
    pub fn intersection(self, other: Self) -> Option<Self> {
        let col = self.col.max(other.col);
        let row = self.row.max(other.row);
        let right = (self.col + self.width).min(other.col + other.width);
        let bottom = (self.row + self.height).min(other.row + other.height);
        (right > col && bottom > row).then(|| Self::new(col, row, right - col, bottom - row))
    }

    /// Every cell of the rectangle, row-major.
    pub fn cells(self) -> impl Iterator<Item = GridPos> {
        (self.row..self.row + self.height)
            .flat_map(move |row| (self.col..self.col + self.width).map(move |col| GridPos::new(col, row)))
    }
}

/// Row-major WALL/PATH grid.
#[derive(Clone, PartialEq, Eq)]
pub struct MazeGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl MazeGrid {
    /// Creates a grid with every cell set to `Cell::Wall`.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Wall; width * height],
        }
    }

    /// Width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, pos: GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * self.width + pos.col as usize)
        } else {
            None
        }
    }

    /// Whether `pos` is inside the grid.
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.col >= 0 && pos.row >= 0 && (pos.col as usize) < self.width && (pos.row as usize) < self.height
    }

    /// Whether `pos` is inside the grid and not on its outermost ring.
    #[inline]
    #[must_use]
    pub fn is_interior(&self, pos: GridPos) -> bool {
        pos.col >= 1
            && pos.row >= 1
            && (pos.col as usize) + 1 < self.width
            && (pos.row as usize) + 1 < self.height
    }

    /// Cell at `pos`, or `None` when out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, pos: GridPos) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// In bounds and open.
    #[inline]
    #[must_use]
    pub fn is_path(&self, pos: GridPos) -> bool {
        self.get(pos) == Some(Cell::Path)
    }

    /// In bounds and solid.
    #[inline]
    #[must_use]
    pub fn is_wall(&self, pos: GridPos) -> bool {
        self.get(pos) == Some(Cell::Wall)
    }

    /// Opens `pos`. Out-of-bounds positions are ignored.
    ///
    /// Returns true if the cell changed from wall to path.
    #[inline]
    pub fn carve(&mut self, pos: GridPos) -> bool {
        match self.index(pos) {
            Some(i) if self.cells[i] == Cell::Wall => {
                self.cells[i] = Cell::Path;
                true
            }
            _ => false,
        }
    }

    /// Opens every in-bounds cell of `rect`, returning how many changed.
    pub fn carve_rect(&mut self, rect: GridRect) -> usize {
        rect.cells().filter(|&pos| self.carve(pos)).count()
    }

    /// Whether `pos` is open or orthogonally adjacent to an open cell.
    #[must_use]
    pub fn touches_path(&self, pos: GridPos) -> bool {
        self.is_path(pos) || pos.neighbors().into_iter().any(|n| self.is_path(n))
    }

    /// Whether any in-bounds cell of `rect` touches an open cell.
    #[must_use]
    pub fn rect_touches_path(&self, rect: GridRect) -> bool {
        rect.cells().any(|pos| self.in_bounds(pos) && self.touches_path(pos))
    }

    /// Number of open cells.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Path).count()
    }

    /// Every cell with its position, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &cell)| {
            let pos = GridPos::new((i % self.width) as i32, (i / self.width) as i32);
            (pos, cell)
        })
    }

    /// Number of open cells reachable from `start` by orthogonal steps.
    ///
    /// Returns 0 if `start` is not open.
    #[must_use]
    pub fn reachable_from(&self, start: GridPos) -> usize {
        let Some(start_index) = self.index(start) else {
            return 0;
        };
        if self.cells[start_index] != Cell::Path {
            return 0;
        }

        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        seen[start_index] = true;
        queue.push_back(start);
        let mut count = 0;

        while let Some(pos) = queue.pop_front() {
            count += 1;
            for next in pos.neighbors() {
                if let Some(i) = self.index(next) {
                    if !seen[i] && self.cells[i] == Cell::Path {
                        seen[i] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        count
    }

    /// Whether every open cell is reachable from `start`.
    #[must_use]
    pub fn is_connected_from(&self, start: GridPos) -> bool {
        self.reachable_from(start) == self.path_count()
    }
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MazeGrid {}x{}", self.width, self.height)?;
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row
                .iter()
                .map(|c| if *c == Cell::Wall { '#' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
