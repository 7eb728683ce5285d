//! Floating circular preview shown above the touch point.

use std::time::{Duration, Instant};

use crate::color::PaletteColor;
use crate::geometry::{Point, Rect, Size};

/// How long the preview takes to fade out after a gesture ends.
pub const FADE_DURATION: Duration = Duration::from_millis(500);
/// Outline width of the preview circle.
pub const OUTLINE_WIDTH: f32 = 0.5;
/// White level of the preview outline.
pub const OUTLINE_WHITE: f32 = 0.5;

// Vertical offset of the bubble's top edge above the touch, in diameters.
const LIFT: f32 = 1.2;
const REST_PADDING: f32 = 10.0;
const REST_PADDING_SMALL: f32 = 13.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Visibility {
    Hidden,
    Shown,
    Fading { since: Instant },
}

/// Position, color and visibility of the preview bubble.
#[derive(Debug, Clone)]
pub struct Preview {
    diameter: f32,
    origin: Point,
    color: Option<PaletteColor>,
    visibility: Visibility,
}

impl Preview {
    pub fn new(diameter: f32) -> Self {
        Self {
            diameter,
            origin: rest_origin(diameter),
            color: None,
            visibility: Visibility::Hidden,
        }
    }

    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    /// Change the diameter. The bubble returns to its resting position.
    pub fn set_diameter(&mut self, diameter: f32) {
        self.diameter = diameter;
        self.origin = rest_origin(diameter);
    }

    pub fn corner_radius(&self) -> f32 {
        self.diameter / 2.0
    }

    /// Top-left corner of the bubble.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin, Size::new(self.diameter, self.diameter))
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn color(&self) -> Option<PaletteColor> {
        self.color
    }

    pub fn set_color(&mut self, color: PaletteColor) {
        self.color = Some(color);
    }

    /// Place the bubble centered horizontally on `touch` and lifted above it.
    pub fn follow(&mut self, touch: Point) {
        self.origin = touch_origin(touch, self.diameter);
    }

    pub fn show(&mut self) {
        self.visibility = Visibility::Shown;
    }

    /// Start fading out. A hidden bubble stays hidden.
    pub fn start_fade(&mut self, now: Instant) {
        if self.visibility == Visibility::Shown {
            self.visibility = Visibility::Fading { since: now };
        }
    }

    /// Finish a fade once its duration has elapsed.
    ///
    /// Returns `true` while the bubble is still animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Visibility::Fading { since } = self.visibility {
            if now.saturating_duration_since(since) >= FADE_DURATION {
                self.visibility = Visibility::Hidden;
                return false;
            }
            return true;
        }
        false
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.visibility, Visibility::Fading { .. })
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.visibility, Visibility::Hidden)
    }

    /// Opacity at `now`, linear over [`FADE_DURATION`] while fading.
    pub fn alpha(&self, now: Instant) -> f32 {
        match self.visibility {
            Visibility::Hidden => 0.0,
            Visibility::Shown => 1.0,
            Visibility::Fading { since } => {
                let elapsed = now.saturating_duration_since(since);
                let progress =
                    elapsed.as_secs_f32() / FADE_DURATION.as_secs_f32();
                (1.0 - progress).clamp(0.0, 1.0)
            },
        }
    }
}

/// Top-left corner of the bubble for a touch at `touch`.
pub fn touch_origin(touch: Point, diameter: f32) -> Point {
    Point::new(touch.x - diameter / 2.0, touch.y - LIFT * diameter)
}

/// Resting inset of the bubble before the first touch.
pub fn rest_padding(diameter: f32) -> f32 {
    if diameter == 10.0 {
        REST_PADDING_SMALL
    } else {
        REST_PADDING
    }
}

fn rest_origin(diameter: f32) -> Point {
    let pad = rest_padding(diameter);
    Point::new(pad, pad)
}
