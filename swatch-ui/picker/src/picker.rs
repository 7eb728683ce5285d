use std::time::Instant;

use iced::widget::canvas::Cache;
use iced::{Point, Size, Subscription};
use swatch_grid::{
    ColorListener, GesturePhase, OutsidePolicy, PaletteColor, PalettePicker,
    PaletteSettings,
};

use crate::convert::{to_model_point, to_model_size};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The canvas was laid out at a new size.
    Resize { id: u64, size: Size },
    /// Tap or pan step in canvas-local coordinates.
    Gesture {
        id: u64,
        phase: GesturePhase,
        position: Point,
        size: Size,
    },
    /// Animation frame while the preview fades out.
    Frame { id: u64 },
}

impl Event {
    pub fn picker_id(&self) -> &u64 {
        use Event::*;

        match self {
            Resize { id, .. } => id,
            Gesture { id, .. } => id,
            Frame { id } => id,
        }
    }
}

/// Palette picker state owned by the application.
///
/// Render it with [`crate::PickerView::show`] and feed every produced
/// [`Event`] back through [`Picker::handle`].
pub struct Picker {
    pub id: u64,
    pub(crate) palette: PalettePicker,
    pub(crate) cache: Cache,
}

impl Picker {
    pub fn new(id: u64, settings: PaletteSettings) -> swatch_grid::Result<Self> {
        let palette = PalettePicker::new(settings)?;

        Ok(Self {
            id,
            palette,
            cache: Cache::default(),
        })
    }

    pub fn palette(&self) -> &PalettePicker {
        &self.palette
    }

    /// Pending settings, see [`Picker::apply`].
    pub fn settings_mut(&mut self) -> &mut PaletteSettings {
        self.palette.settings_mut()
    }

    /// Apply pending settings and redraw the grid.
    pub fn apply(&mut self) -> swatch_grid::Result<()> {
        self.palette.apply()?;
        self.cache.clear();
        Ok(())
    }

    /// Register the selection listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl ColorListener + 'static) {
        self.palette.set_listener(listener);
    }

    pub fn clear_listener(&mut self) -> bool {
        self.palette.clear_listener()
    }

    pub fn set_outside_policy(&mut self, policy: OutsidePolicy) {
        self.palette.set_outside_policy(policy);
    }

    pub fn selected(&self) -> Option<PaletteColor> {
        self.palette.selected()
    }

    /// Animation frames, active only while the preview is fading.
    pub fn subscription(&self) -> Subscription<Event> {
        if !self.palette.is_animating() {
            return Subscription::none();
        }

        iced::window::frames()
            .with(self.id)
            .map(|(id, _instant)| Event::Frame { id })
    }

    /// Process a widget event. Returns the color selected by a gesture.
    pub fn handle(&mut self, event: Event) -> Option<PaletteColor> {
        use Event::*;

        if *event.picker_id() != self.id {
            log::debug!(
                "picker {} ignored event for picker {}",
                self.id,
                event.picker_id()
            );
            return None;
        }

        match event {
            Resize { size, .. } => {
                self.resize(size);
                None
            },
            Gesture {
                phase,
                position,
                size,
                ..
            } => {
                self.resize(size);
                let gesture =
                    swatch_grid::Gesture::new(phase, to_model_point(position));
                self.palette.handle_gesture(gesture, Instant::now())
            },
            Frame { .. } => {
                self.palette.tick(Instant::now());
                None
            },
        }
    }

    fn resize(&mut self, size: Size) {
        let size = to_model_size(size);
        if self.palette.spec().bounds() != size {
            self.palette.resize(size);
            self.cache.clear();
        }
    }
}
