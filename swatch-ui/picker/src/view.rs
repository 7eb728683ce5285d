use std::time::Instant;

use iced::mouse::{self, Cursor};
use iced::touch;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke};
use iced::{Color, Element, Length, Point, Rectangle, Size, Theme};
use swatch_grid::{
    CELL_STROKE_WIDTH, GesturePhase, OUTLINE_WHITE, OUTLINE_WIDTH,
    PaletteColor, render_grid,
};

use crate::convert::{
    to_iced_color, to_iced_point, to_iced_size, to_model_point,
    to_model_size,
};
use crate::picker::{Event, Picker};

pub struct PickerView<'a> {
    picker: &'a Picker,
}

impl<'a> PickerView<'a> {
    pub fn show(picker: &'a Picker) -> Element<'a, Event> {
        Canvas::new(Self { picker })
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn gesture(
        &self,
        phase: GesturePhase,
        position: Point,
        bounds: Rectangle,
    ) -> Option<canvas::Action<Event>> {
        let event = Event::Gesture {
            id: self.picker.id,
            phase,
            position,
            size: bounds.size(),
        };

        Some(canvas::Action::publish(event).and_capture())
    }

    fn draw_preview(&self, frame: &mut Frame) {
        let preview = self.picker.palette.preview();
        let alpha = preview.alpha(Instant::now());
        if alpha <= 0.0 {
            return;
        }

        let circle = Path::circle(
            to_iced_point(preview.center()),
            preview.corner_radius(),
        );
        if let Some(color) = preview.color() {
            frame.fill(&circle, Color {
                a: alpha,
                ..to_iced_color(color)
            });
        }

        let outline = Color {
            a: alpha,
            ..to_iced_color(PaletteColor::white(OUTLINE_WHITE))
        };
        frame.stroke(
            &circle,
            Stroke::default()
                .with_width(OUTLINE_WIDTH)
                .with_color(outline),
        );
    }
}

/// Pointer tracking between canvas events.
#[derive(Debug, Default)]
pub struct PickerViewState {
    size: Option<Size>,
    pressed: bool,
    finger: Option<touch::Finger>,
    last_position: Option<Point>,
}

impl canvas::Program<Event> for PickerView<'_> {
    type State = PickerViewState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let palette = &self.picker.palette;
        let size = bounds.size();

        // The border around the cells shows the current selection.
        let mut background = Frame::new(renderer, size);
        let fill = palette
            .selected()
            .map(to_iced_color)
            .unwrap_or(theme.palette().background);
        background.fill_rectangle(Point::ORIGIN, size, fill);

        let settings = palette.settings();
        let cells = settings
            .grid_spec(to_model_size(size))
            .and_then(|spec| render_grid(&spec, settings.show_grid_lines));
        let grid = match cells {
            Ok(cells) => self.picker.cache.draw(renderer, size, |frame| {
                for cell in cells {
                    let path = Path::rectangle(
                        to_iced_point(cell.rect.origin),
                        to_iced_size(cell.rect.size),
                    );
                    frame.fill(&path, to_iced_color(cell.fill));
                    frame.stroke(
                        &path,
                        Stroke::default()
                            .with_width(CELL_STROKE_WIDTH)
                            .with_color(to_iced_color(cell.stroke)),
                    );
                }
            }),
            Err(err) => {
                log::trace!("palette grid skipped: {err}");
                return vec![background.into_geometry()];
            },
        };

        let mut overlay = Frame::new(renderer, size);
        self.draw_preview(&mut overlay);

        vec![background.into_geometry(), grid, overlay.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Option<canvas::Action<Event>> {
        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(
                mouse::Button::Left,
            )) => {
                let position = cursor.position_in(bounds)?;
                state.pressed = true;
                state.last_position = Some(position);
                self.gesture(GesturePhase::Began, position, bounds)
            },
            iced::Event::Mouse(mouse::Event::CursorMoved { .. })
                if state.pressed =>
            {
                let position = cursor.position_from(bounds.position())?;
                state.last_position = Some(position);
                self.gesture(GesturePhase::Moved, position, bounds)
            },
            iced::Event::Mouse(mouse::Event::ButtonReleased(
                mouse::Button::Left,
            )) if state.pressed => {
                state.pressed = false;
                let position = cursor
                    .position_from(bounds.position())
                    .or(state.last_position.take())?;
                self.gesture(GesturePhase::Ended, position, bounds)
            },
            iced::Event::Touch(touch::Event::FingerPressed { id, position })
                if state.finger.is_none() && bounds.contains(*position) =>
            {
                state.finger = Some(*id);
                let position = local(*position, bounds);
                self.gesture(GesturePhase::Began, position, bounds)
            },
            iced::Event::Touch(touch::Event::FingerMoved { id, position })
                if state.finger == Some(*id) =>
            {
                let position = local(*position, bounds);
                self.gesture(GesturePhase::Moved, position, bounds)
            },
            iced::Event::Touch(
                touch::Event::FingerLifted { id, position }
                | touch::Event::FingerLost { id, position },
            ) if state.finger == Some(*id) => {
                state.finger = None;
                let position = local(*position, bounds);
                self.gesture(GesturePhase::Ended, position, bounds)
            },
            _ => {
                let size = bounds.size();
                if state.size == Some(size) {
                    return None;
                }
                state.size = Some(size);
                Some(canvas::Action::publish(Event::Resize {
                    id: self.picker.id,
                    size,
                }))
            },
        }
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.pressed {
            return mouse::Interaction::Crosshair;
        }

        match cursor.position_in(bounds) {
            Some(position)
                if self
                    .picker
                    .palette
                    .pick(to_model_point(position))
                    .is_some() =>
            {
                mouse::Interaction::Pointer
            },
            _ => mouse::Interaction::default(),
        }
    }
}

fn local(position: Point, bounds: Rectangle) -> Point {
    Point::new(position.x - bounds.x, position.y - bounds.y)
}
