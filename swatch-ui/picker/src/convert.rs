use iced::Color;
use swatch_grid::PaletteColor;

/// Convert a palette color into an opaque `iced` color.
pub fn to_iced_color(color: PaletteColor) -> Color {
    let [r, g, b] = color.to_rgb_f32();
    Color::from_rgba(r, g, b, color.alpha())
}

pub(crate) fn to_model_point(point: iced::Point) -> swatch_grid::Point {
    swatch_grid::Point::new(point.x, point.y)
}

pub(crate) fn to_model_size(size: iced::Size) -> swatch_grid::Size {
    swatch_grid::Size::new(size.width, size.height)
}

pub(crate) fn to_iced_point(point: swatch_grid::Point) -> iced::Point {
    iced::Point::new(point.x, point.y)
}

pub(crate) fn to_iced_size(size: swatch_grid::Size) -> iced::Size {
    iced::Size::new(size.width, size.height)
}
