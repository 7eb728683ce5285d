use crate::error::{Error, Result};
use crate::geometry::Size;

/// Upper bound on `columns × rows`.
pub const MAX_CELLS: usize = 1 << 16;

/// Immutable snapshot of the palette layout.
///
/// A spec is rebuilt whenever the column or row count, the border width, or
/// the drawing bounds change. Bounds that are too small for the border are
/// accepted here and reported by [`crate::cell_size`] instead, since a view
/// may legitimately be laid out at zero size before its first real frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    count_x: usize,
    count_y: usize,
    border_width: f32,
    bounds: Size,
}

impl GridSpec {
    pub fn new(
        count_x: usize,
        count_y: usize,
        border_width: f32,
        bounds: Size,
    ) -> Result<Self> {
        if count_x == 0 {
            return Err(Error::ZeroColumns);
        }
        if count_y == 0 {
            return Err(Error::ZeroRows);
        }
        check_cell_count(count_x, count_y)?;
        if !border_width.is_finite() || border_width < 0.0 {
            return Err(Error::InvalidBorderWidth(border_width));
        }

        Ok(Self {
            count_x,
            count_y,
            border_width,
            bounds,
        })
    }

    /// Number of columns.
    pub fn count_x(&self) -> usize {
        self.count_x
    }

    /// Number of rows.
    pub fn count_y(&self) -> usize {
        self.count_y
    }

    pub fn border_width(&self) -> f32 {
        self.border_width
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn cell_count(&self) -> usize {
        // Bounded by MAX_CELLS at construction.
        self.count_x.saturating_mul(self.count_y)
    }

    /// Copy of this spec laid out in different bounds.
    pub fn with_bounds(mut self, bounds: Size) -> Self {
        self.bounds = bounds;
        self
    }
}

pub(crate) fn check_cell_count(columns: usize, rows: usize) -> Result<()> {
    match columns.checked_mul(rows) {
        Some(cells) if cells <= MAX_CELLS => Ok(()),
        _ => Err(Error::TooManyCells { columns, rows }),
    }
}

/// Column/row address of a palette cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellIndex {
    pub x: usize,
    pub y: usize,
}

impl CellIndex {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Size of a single (non-degenerate) cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}
