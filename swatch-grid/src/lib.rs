//! UI-agnostic model of a hue/saturation palette picker.
//!
//! The palette is a grid of `columns × rows` cells inset by a border. The top
//! row is a black-to-white ramp; every other row sweeps the hue along x with
//! saturation fading row by row.
//!
//! This crate is split into two layers:
//! - pure functions over a [`GridSpec`] ([`cell_size`], [`color_at`],
//!   [`cell_at`], [`color_at_point`], [`render_grid`]);
//! - [`PalettePicker`], which ties settings, gestures, the preview bubble and
//!   a single [`ColorListener`] together for a toolkit widget to drive.
//!
//! # Quick Example
//!
//! ```
//! use std::time::Instant;
//!
//! use swatch_grid::{
//!     Gesture, GesturePhase, PaletteColor, PalettePicker, PaletteSettings,
//!     Point, Size,
//! };
//!
//! let mut picker = PalettePicker::new(PaletteSettings::default())?;
//! picker.resize(Size::new(320.0, 380.0));
//! picker.set_listener(|color: PaletteColor| println!("{}", color.to_hex()));
//!
//! let tap = Gesture::new(GesturePhase::Began, Point::new(25.0, 40.0));
//! let color = picker.handle_gesture(tap, Instant::now());
//! assert_eq!(color.map(PaletteColor::to_hex).as_deref(), Some("#ff0000"));
//! # Ok::<(), swatch_grid::Error>(())
//! ```

mod color;
mod error;
mod geometry;
mod grid;
mod model;
mod picker;
mod preview;
mod settings;

pub use color::{GRID_LINE_WHITE, PaletteColor, Rgb};
pub use error::{Error, Result};
pub use geometry::{Point, Rect, Size};
pub use grid::{CellIndex, CellSize, GridSpec, MAX_CELLS};
pub use model::{
    CELL_STROKE_WIDTH, CellHit, GridCell, GridCells, cell_at, cell_rect,
    cell_size, color_at, color_at_point, render_grid,
};
pub use picker::{
    ColorListener, Gesture, GesturePhase, OutsidePolicy, PalettePicker,
};
pub use preview::{
    FADE_DURATION, OUTLINE_WHITE, OUTLINE_WIDTH, Preview, rest_padding,
    touch_origin,
};
pub use settings::{
    DEFAULT_BORDER_WIDTH, DEFAULT_COLUMNS, DEFAULT_PREVIEW_DIAMETER,
    DEFAULT_ROWS, PaletteSettings,
};
