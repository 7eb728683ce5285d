use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Size;
use crate::grid::{GridSpec, check_cell_count};

pub const DEFAULT_BORDER_WIDTH: f32 = 10.0;
pub const DEFAULT_PREVIEW_DIAMETER: f32 = 35.0;
pub const DEFAULT_COLUMNS: usize = 10;
pub const DEFAULT_ROWS: usize = 18;

/// User facing configuration of a palette picker.
///
/// Changing a field does not relayout anything by itself; hand the settings
/// to [`crate::PalettePicker::apply`] (or build a new [`GridSpec`] with
/// [`PaletteSettings::grid_spec`]) once you are done editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    /// Width of the colored edge around the palette.
    pub border_width: f32,
    /// Diameter of the circular selection preview.
    pub preview_diameter: f32,
    /// Number of color cells along x.
    pub columns: usize,
    /// Number of color cells along y.
    pub rows: usize,
    pub show_grid_lines: bool,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            border_width: DEFAULT_BORDER_WIDTH,
            preview_diameter: DEFAULT_PREVIEW_DIAMETER,
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            show_grid_lines: false,
        }
    }
}

impl PaletteSettings {
    pub fn with_border_width(mut self, border_width: f32) -> Self {
        self.border_width = border_width;
        self
    }

    pub fn with_preview_diameter(mut self, diameter: f32) -> Self {
        self.preview_diameter = diameter;
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_grid_lines(mut self, show: bool) -> Self {
        self.show_grid_lines = show;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(Error::ZeroColumns);
        }
        if self.rows == 0 {
            return Err(Error::ZeroRows);
        }
        check_cell_count(self.columns, self.rows)?;
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(Error::InvalidBorderWidth(self.border_width));
        }
        if !self.preview_diameter.is_finite() || self.preview_diameter <= 0.0 {
            return Err(Error::InvalidPreviewDiameter(self.preview_diameter));
        }
        Ok(())
    }

    /// Grid layout for these settings inside `bounds`.
    pub fn grid_spec(&self, bounds: Size) -> Result<GridSpec> {
        GridSpec::new(self.columns, self.rows, self.border_width, bounds)
    }

    /// Parse and validate settings from JSON. Missing fields keep defaults.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(data)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`, `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let data = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(None);
            },
            Err(err) => return Err(err.into()),
        };

        Self::from_json_str(&data).map(Some)
    }

    /// Persist settings as pretty JSON, replacing `path` atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let payload = serde_json::to_string_pretty(self)?;
        write_atomic(path, payload.as_bytes())?;
        log::debug!("palette settings saved to {}", path.display());

        Ok(())
    }
}

fn write_atomic(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
