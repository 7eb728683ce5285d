//! Palette color model: cell geometry, cell colors and hit testing.
//!
//! Every function here is a pure function of a [`GridSpec`] and an optional
//! point or cell. Callers own redraw and event ordering.

use crate::color::PaletteColor;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect, Size};
use crate::grid::{CellIndex, CellSize, GridSpec};

/// Stroke width used to outline each cell.
pub const CELL_STROKE_WIDTH: f32 = 0.25;

/// Size of one cell, or [`Error::DegenerateCell`] when the bounds leave no
/// positive area inside the border.
pub fn cell_size(spec: &GridSpec) -> Result<CellSize> {
    let border = spec.border_width();
    let bounds = spec.bounds();
    let width = (bounds.width - 2.0 * border) / spec.count_x() as f32;
    let height = (bounds.height - 2.0 * border) / spec.count_y() as f32;

    // `!(x > 0.0)` also rejects NaN.
    let positive = width > 0.0 && height > 0.0;
    if !positive || width.is_infinite() || height.is_infinite() {
        return Err(Error::DegenerateCell { width, height });
    }

    Ok(CellSize { width, height })
}

/// Color of a cell.
///
/// Row 0 is a white-level ramp from black to white, its last column is
/// forced to pure white. Every other row is a hue sweep along x with
/// saturation decreasing by `1 / count_y` per row.
pub fn color_at(spec: &GridSpec, cell: CellIndex) -> PaletteColor {
    let count_x = spec.count_x();
    let hue = cell.x as f32 / count_x as f32;

    if cell.y == 0 {
        let level = if cell.x == count_x - 1 { 1.0 } else { hue };
        return PaletteColor::white(level);
    }

    let saturation = 1.0 - (cell.y - 1) as f32 / spec.count_y() as f32;
    PaletteColor::hsb(hue, saturation, 1.0)
}

/// Result of mapping a point onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellHit {
    Inside(CellIndex),
    /// The point is in the border or beyond the grid. Carries the raw
    /// indices so the caller can decide between clamping and ignoring.
    Outside { x: i64, y: i64 },
}

impl CellHit {
    pub fn inside(self) -> Option<CellIndex> {
        match self {
            Self::Inside(index) => Some(index),
            Self::Outside { .. } => None,
        }
    }

    pub fn is_inside(&self) -> bool {
        matches!(self, Self::Inside(_))
    }

    /// Nearest valid cell for this hit.
    pub fn clamped(self, spec: &GridSpec) -> CellIndex {
        match self {
            Self::Inside(index) => index,
            Self::Outside { x, y } => CellIndex {
                x: clamp_index(x, spec.count_x()),
                y: clamp_index(y, spec.count_y()),
            },
        }
    }
}

fn clamp_index(raw: i64, count: usize) -> usize {
    let last = i64::try_from(count.saturating_sub(1)).unwrap_or(i64::MAX);
    raw.clamp(0, last) as usize
}

/// Map a point in local coordinates to the cell that contains it.
///
/// The fractional grid coordinate is floored, which matches truncation for
/// every point at or past the border and sends points inside the border to
/// negative indices. Raw [`CellHit::Outside`] indices left of or above the
/// grid are therefore one lower than a truncated division would give, e.g.
/// `-2` rather than `-1` for a point between one and two cells before it.
pub fn cell_at(spec: &GridSpec, point: Point) -> Result<CellHit> {
    let size = cell_size(spec)?;
    let border = spec.border_width();

    let fx = (point.x - border) / size.width;
    let fy = (point.y - border) / size.height;
    if fx.is_nan() || fy.is_nan() {
        return Ok(CellHit::Outside { x: -1, y: -1 });
    }

    // Float to int casts saturate, so far away points stay representable.
    let x = fx.floor() as i64;
    let y = fy.floor() as i64;

    let inside = (0..spec.count_x() as i64).contains(&x)
        && (0..spec.count_y() as i64).contains(&y);
    if inside {
        Ok(CellHit::Inside(CellIndex::new(x as usize, y as usize)))
    } else {
        Ok(CellHit::Outside { x, y })
    }
}

/// Color under a point, `None` when the point misses the grid.
pub fn color_at_point(
    spec: &GridSpec,
    point: Point,
) -> Result<Option<PaletteColor>> {
    let hit = cell_at(spec, point)?;
    Ok(hit.inside().map(|cell| color_at(spec, cell)))
}

/// Rectangle occupied by a cell.
pub fn cell_rect(spec: &GridSpec, cell: CellIndex) -> Result<Rect> {
    let size = cell_size(spec)?;
    Ok(rect_for(spec, size, cell))
}

fn rect_for(spec: &GridSpec, size: CellSize, cell: CellIndex) -> Rect {
    let border = spec.border_width();
    Rect::new(
        Point::new(
            cell.x as f32 * size.width + border,
            cell.y as f32 * size.height + border,
        ),
        Size::new(size.width, size.height),
    )
}

/// One paint instruction produced by [`render_grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub index: CellIndex,
    pub rect: Rect,
    pub fill: PaletteColor,
    /// Grid-line gray when grid lines are shown, otherwise the fill color so
    /// that neighbouring cells join seamlessly.
    pub stroke: PaletteColor,
}

/// Paint instructions for every cell, row by row.
///
/// The returned iterator is lazy and cheap to clone; cloning it (or calling
/// this function again with the same spec) replays the identical sequence.
pub fn render_grid(
    spec: &GridSpec,
    show_grid_lines: bool,
) -> Result<GridCells> {
    let size = cell_size(spec)?;
    Ok(GridCells {
        spec: *spec,
        size,
        show_grid_lines,
        next: 0,
    })
}

#[derive(Debug, Clone)]
pub struct GridCells {
    spec: GridSpec,
    size: CellSize,
    show_grid_lines: bool,
    next: usize,
}

impl Iterator for GridCells {
    type Item = GridCell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.spec.cell_count() {
            return None;
        }

        let count_x = self.spec.count_x();
        let index = CellIndex::new(self.next % count_x, self.next / count_x);
        self.next += 1;

        let fill = color_at(&self.spec, index);
        let stroke = if self.show_grid_lines {
            PaletteColor::grid_line()
        } else {
            fill
        };

        Some(GridCell {
            index,
            rect: rect_for(&self.spec, self.size, index),
            fill,
            stroke,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.spec.cell_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridCells {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MAX_CELLS;

    const EPS: f32 = 1e-5;

    fn default_spec() -> GridSpec {
        // 10 + 10 * 30 + 10 by 10 + 18 * 20 + 10
        GridSpec::new(10, 18, 10.0, Size::new(320.0, 380.0)).unwrap()
    }

    fn white_level(color: PaletteColor) -> f32 {
        match color {
            PaletteColor::White { level } => level,
            other => panic!("expected white level, got {other:?}"),
        }
    }

    fn hsb(color: PaletteColor) -> (f32, f32, f32) {
        match color {
            PaletteColor::Hsb {
                hue,
                saturation,
                brightness,
            } => (hue, saturation, brightness),
            other => panic!("expected hsb, got {other:?}"),
        }
    }

    #[test]
    fn cell_size_divides_inner_area() {
        let size = cell_size(&default_spec()).unwrap();
        assert!((size.width - 30.0).abs() < EPS);
        assert!((size.height - 20.0).abs() < EPS);
    }

    #[test]
    fn cell_size_is_degenerate_when_border_eats_bounds() {
        let spec = GridSpec::new(10, 18, 10.0, Size::new(20.0, 300.0)).unwrap();
        assert!(matches!(
            cell_size(&spec),
            Err(Error::DegenerateCell { .. })
        ));

        let spec = GridSpec::new(10, 18, 10.0, Size::new(300.0, 5.0)).unwrap();
        assert!(matches!(
            cell_size(&spec),
            Err(Error::DegenerateCell { .. })
        ));

        let spec = GridSpec::new(10, 18, 0.0, Size::ZERO).unwrap();
        assert!(cell_size(&spec).is_err());
    }

    #[test]
    fn degenerate_geometry_blocks_hit_tests_and_rendering() {
        let spec = GridSpec::new(2, 2, 10.0, Size::new(10.0, 10.0)).unwrap();
        assert!(cell_at(&spec, Point::new(5.0, 5.0)).is_err());
        assert!(color_at_point(&spec, Point::new(5.0, 5.0)).is_err());
        assert!(render_grid(&spec, false).is_err());
    }

    #[test]
    fn top_row_is_white_level_ramp() {
        let spec = default_spec();
        assert_eq!(white_level(color_at(&spec, CellIndex::new(0, 0))), 0.0);
        assert_eq!(white_level(color_at(&spec, CellIndex::new(9, 0))), 1.0);
        assert!(
            (white_level(color_at(&spec, CellIndex::new(5, 0))) - 0.5).abs()
                < EPS
        );
        assert!(
            (white_level(color_at(&spec, CellIndex::new(8, 0))) - 0.8).abs()
                < EPS
        );
    }

    #[test]
    fn single_column_top_row_is_white() {
        let spec = GridSpec::new(1, 3, 0.0, Size::new(10.0, 30.0)).unwrap();
        assert_eq!(white_level(color_at(&spec, CellIndex::new(0, 0))), 1.0);
    }

    #[test]
    fn second_row_starts_with_pure_red() {
        let (hue, saturation, brightness) =
            hsb(color_at(&default_spec(), CellIndex::new(0, 1)));
        assert_eq!(hue, 0.0);
        assert_eq!(saturation, 1.0);
        assert_eq!(brightness, 1.0);
        assert_eq!(
            color_at(&default_spec(), CellIndex::new(0, 1)).to_hex(),
            "#ff0000"
        );
    }

    #[test]
    fn saturation_falls_per_row() {
        let spec = default_spec();
        let (_, saturation, _) = hsb(color_at(&spec, CellIndex::new(0, 17)));
        assert!((saturation - (1.0 - 16.0 / 18.0)).abs() < EPS);
        assert!((saturation - 0.111).abs() < 1e-3);

        let (hue, _, _) = hsb(color_at(&spec, CellIndex::new(9, 17)));
        assert!((hue - 0.9).abs() < EPS);
    }

    #[test]
    fn last_column_is_not_forced_below_top_row() {
        let (hue, _, _) = hsb(color_at(&default_spec(), CellIndex::new(9, 1)));
        assert!((hue - 0.9).abs() < EPS);
    }

    #[test]
    fn border_edge_maps_to_first_cell() {
        let spec = default_spec();
        assert_eq!(
            cell_at(&spec, Point::new(10.0, 10.0)).unwrap(),
            CellHit::Inside(CellIndex::new(0, 0))
        );
    }

    #[test]
    fn border_zone_is_outside() {
        let spec = default_spec();
        let hit = cell_at(&spec, Point::new(9.0, 9.0)).unwrap();
        assert_eq!(hit, CellHit::Outside { x: -1, y: -1 });
        let color = color_at_point(&spec, Point::new(9.0, 9.0)).unwrap();
        assert!(color.is_none());

        let hit = cell_at(&spec, Point::new(9.0, 50.0)).unwrap();
        assert_eq!(hit, CellHit::Outside { x: -1, y: 2 });

        // Floored, so a cell and a half before the grid is -2.
        let hit = cell_at(&spec, Point::new(-35.0, 50.0)).unwrap();
        assert_eq!(hit, CellHit::Outside { x: -2, y: 2 });
    }

    #[test]
    fn clamping_on_widest_grid() {
        let width = MAX_CELLS as f32;
        let spec = GridSpec::new(MAX_CELLS, 1, 0.0, Size::new(width, 10.0))
            .unwrap();
        let hit = cell_at(&spec, Point::new(width * 4.0, 5.0)).unwrap();
        assert_eq!(hit.clamped(&spec), CellIndex::new(MAX_CELLS - 1, 0));
    }

    #[test]
    fn clamp_index_never_inverts_its_range() {
        assert_eq!(clamp_index(-3, 0), 0);
        assert_eq!(clamp_index(5, 1), 0);
        assert_eq!(clamp_index(i64::MAX, usize::MAX), i64::MAX as usize);
        assert_eq!(clamp_index(-1, usize::MAX), 0);
    }

    #[test]
    fn far_edge_reports_raw_index() {
        let spec = default_spec();
        // Right border starts at 310.
        let hit = cell_at(&spec, Point::new(312.0, 15.0)).unwrap();
        assert_eq!(hit, CellHit::Outside { x: 10, y: 0 });
        assert_eq!(hit.clamped(&spec), CellIndex::new(9, 0));

        let hit = cell_at(&spec, Point::new(-500.0, 1_000.0)).unwrap();
        assert_eq!(hit.clamped(&spec), CellIndex::new(0, 17));
        assert!(!hit.is_inside());
    }

    #[test]
    fn nan_point_is_outside() {
        let hit = cell_at(&default_spec(), Point::new(f32::NAN, 20.0)).unwrap();
        assert!(!hit.is_inside());
    }

    #[test]
    fn render_grid_is_row_major_and_complete() {
        let spec = GridSpec::new(3, 2, 1.0, Size::new(32.0, 22.0)).unwrap();
        let cells: Vec<_> = render_grid(&spec, false).unwrap().collect();
        let order: Vec<_> =
            cells.iter().map(|cell| (cell.index.x, cell.index.y)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(cells[4].rect.origin, Point::new(11.0, 11.0));
        assert_eq!(cells[4].rect.size, Size::new(10.0, 10.0));
    }

    #[test]
    fn render_grid_reports_exact_length() {
        let cells = render_grid(&default_spec(), true).unwrap();
        assert_eq!(cells.len(), 180);
    }

    #[test]
    fn stroke_follows_grid_line_flag() {
        let spec = default_spec();
        for cell in render_grid(&spec, false).unwrap() {
            assert_eq!(cell.stroke, cell.fill);
        }
        for cell in render_grid(&spec, true).unwrap() {
            assert_eq!(cell.stroke, PaletteColor::grid_line());
        }
    }

    #[test]
    fn render_grid_is_idempotent() {
        let spec = default_spec();
        let first: Vec<_> = render_grid(&spec, true).unwrap().collect();
        let second: Vec<_> = render_grid(&spec, true).unwrap().collect();
        assert_eq!(first, second);

        let cells = render_grid(&spec, false).unwrap();
        let replay = cells.clone();
        assert_eq!(cells.collect::<Vec<_>>(), replay.collect::<Vec<_>>());
    }

    #[test]
    fn interior_points_round_trip_to_painted_color() {
        for (count_x, count_y, border, width, height) in [
            (10, 18, 10.0, 320.0, 380.0),
            (7, 5, 3.5, 211.0, 97.0),
            (1, 1, 0.0, 40.0, 40.0),
            (16, 16, 2.0, 100.0, 100.0),
        ] {
            let spec = GridSpec::new(
                count_x,
                count_y,
                border,
                Size::new(width, height),
            )
            .unwrap();

            for cell in render_grid(&spec, false).unwrap() {
                let probes = [
                    cell.rect.center(),
                    Point::new(
                        cell.rect.origin.x + cell.rect.size.width * 0.1,
                        cell.rect.origin.y + cell.rect.size.height * 0.9,
                    ),
                ];
                for probe in probes {
                    let hit = cell_at(&spec, probe).unwrap();
                    assert_eq!(hit, CellHit::Inside(cell.index));
                    assert_eq!(
                        color_at_point(&spec, probe).unwrap(),
                        Some(cell.fill)
                    );
                }
            }
        }
    }

    #[test]
    fn cell_rect_matches_render_output() {
        let spec = default_spec();
        let index = CellIndex::new(4, 7);
        let rendered = render_grid(&spec, false)
            .unwrap()
            .find(|cell| cell.index == index)
            .unwrap();
        assert_eq!(cell_rect(&spec, index).unwrap(), rendered.rect);
    }
}
