use std::time::Instant;

use crate::color::PaletteColor;
use crate::error::Result;
use crate::geometry::{Point, Size};
use crate::grid::GridSpec;
use crate::model::{
    CellHit, GridCells, cell_at, cell_size, color_at, render_grid,
};
use crate::preview::Preview;
use crate::settings::PaletteSettings;

/// Receiver of color selection changes.
///
/// Implemented for every `FnMut(PaletteColor)` closure.
pub trait ColorListener {
    fn color_selection_changed(&mut self, color: PaletteColor);
}

impl<F> ColorListener for F
where
    F: FnMut(PaletteColor),
{
    fn color_selection_changed(&mut self, color: PaletteColor) {
        self(color)
    }
}

/// What to do with a gesture point that misses every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutsidePolicy {
    /// Keep the previous selection.
    #[default]
    Ignore,
    /// Select the nearest cell.
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// Finger down or button press.
    Began,
    /// Pan movement while pressed.
    Moved,
    /// Finger lifted, button released, or touch lost.
    Ended,
}

/// A single step of a tap or pan in the palette's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub phase: GesturePhase,
    pub point: Point,
}

impl Gesture {
    pub fn new(phase: GesturePhase, point: Point) -> Self {
        Self { phase, point }
    }
}

/// Palette controller: owns the layout, the preview bubble and the single
/// selection listener.
///
/// Settings edits made through [`PalettePicker::settings_mut`] stay pending
/// until [`PalettePicker::apply`] is called; [`PalettePicker::resize`]
/// relayouts immediately.
pub struct PalettePicker {
    active: PaletteSettings,
    pending: PaletteSettings,
    spec: GridSpec,
    preview: Preview,
    selected: Option<PaletteColor>,
    outside_policy: OutsidePolicy,
    listener: Option<Box<dyn ColorListener>>,
}

impl PalettePicker {
    pub fn new(settings: PaletteSettings) -> Result<Self> {
        settings.validate()?;
        let spec = settings.grid_spec(Size::ZERO)?;

        Ok(Self {
            preview: Preview::new(settings.preview_diameter),
            pending: settings.clone(),
            active: settings,
            spec,
            selected: None,
            outside_policy: OutsidePolicy::default(),
            listener: None,
        })
    }

    /// Settings currently in effect.
    pub fn settings(&self) -> &PaletteSettings {
        &self.active
    }

    /// Editable copy of the settings, applied by [`PalettePicker::apply`].
    pub fn settings_mut(&mut self) -> &mut PaletteSettings {
        &mut self.pending
    }

    pub fn has_pending_changes(&self) -> bool {
        self.pending != self.active
    }

    /// Validate pending settings and rebuild the grid layout from them.
    ///
    /// On error the previous layout stays in effect and the pending edits are
    /// kept so the caller can correct them.
    pub fn apply(&mut self) -> Result<()> {
        self.pending.validate()?;
        let spec = self.pending.grid_spec(self.spec.bounds())?;

        if self.pending.preview_diameter != self.active.preview_diameter {
            self.preview.set_diameter(self.pending.preview_diameter);
        }

        self.active = self.pending.clone();
        self.spec = spec;
        log::debug!(
            "palette settings applied: {}x{} cells, border {}, grid lines {}",
            self.active.columns,
            self.active.rows,
            self.active.border_width,
            self.active.show_grid_lines
        );
        self.report_degenerate();

        Ok(())
    }

    /// Relayout for new drawing bounds.
    pub fn resize(&mut self, bounds: Size) {
        if self.spec.bounds() == bounds {
            return;
        }

        self.spec = self.spec.with_bounds(bounds);
        log::debug!("palette resized to {}x{}", bounds.width, bounds.height);
        self.report_degenerate();
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Paint instructions for the current layout.
    pub fn render(&self) -> Result<GridCells> {
        render_grid(&self.spec, self.active.show_grid_lines)
    }

    /// Register the selection listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl ColorListener + 'static) {
        if self.listener.is_some() {
            log::debug!("palette listener replaced");
        }
        self.listener = Some(Box::new(listener));
    }

    /// Remove the listener. Returns whether one was registered.
    pub fn clear_listener(&mut self) -> bool {
        self.listener.take().is_some()
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    pub fn outside_policy(&self) -> OutsidePolicy {
        self.outside_policy
    }

    pub fn set_outside_policy(&mut self, policy: OutsidePolicy) {
        self.outside_policy = policy;
    }

    /// Last selected color. The palette border is painted with it.
    pub fn selected(&self) -> Option<PaletteColor> {
        self.selected
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Feed one gesture step.
    ///
    /// The preview follows the point in every phase. When the point resolves
    /// to a color (see [`OutsidePolicy`]) it becomes the selection and the
    /// listener is notified. Returns the color selected by this step.
    pub fn handle_gesture(
        &mut self,
        gesture: Gesture,
        now: Instant,
    ) -> Option<PaletteColor> {
        if gesture.phase == GesturePhase::Began {
            self.preview.show();
        }
        self.preview.follow(gesture.point);

        let picked = self.pick(gesture.point);
        log::trace!(
            "palette gesture {:?} at ({}, {}) -> {:?}",
            gesture.phase,
            gesture.point.x,
            gesture.point.y,
            picked
        );

        if let Some(color) = picked {
            self.selected = Some(color);
            self.preview.set_color(color);
            if let Some(listener) = self.listener.as_mut() {
                listener.color_selection_changed(color);
            }
        }

        if gesture.phase == GesturePhase::Ended {
            self.preview.start_fade(now);
        }

        picked
    }

    /// Advance the preview fade. Returns `true` while it is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.preview.tick(now)
    }

    pub fn is_animating(&self) -> bool {
        self.preview.is_fading()
    }

    /// Resolve a point to a color without touching any state.
    pub fn pick(&self, point: Point) -> Option<PaletteColor> {
        let hit = match cell_at(&self.spec, point) {
            Ok(hit) => hit,
            Err(_) => return None,
        };

        match (hit, self.outside_policy) {
            (CellHit::Inside(cell), _) => Some(color_at(&self.spec, cell)),
            (CellHit::Outside { .. }, OutsidePolicy::Ignore) => None,
            (CellHit::Outside { .. }, OutsidePolicy::Clamp) => {
                Some(color_at(&self.spec, hit.clamped(&self.spec)))
            },
        }
    }

    fn report_degenerate(&self) {
        if let Err(err) = cell_size(&self.spec) {
            let bounds = self.spec.bounds();
            // Zero bounds are expected before the first layout pass.
            if bounds.width > 0.0 && bounds.height > 0.0 {
                log::warn!("palette cannot be drawn: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::error::Error;
    use crate::grid::CellIndex;

    fn picker() -> PalettePicker {
        let mut picker = PalettePicker::new(PaletteSettings::default()).unwrap();
        picker.resize(Size::new(320.0, 380.0));
        picker
    }

    fn recorder() -> (Rc<RefCell<Vec<PaletteColor>>>, impl FnMut(PaletteColor))
    {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |color| sink.borrow_mut().push(color))
    }

    fn tap(picker: &mut PalettePicker, point: Point) -> Option<PaletteColor> {
        let now = Instant::now();
        picker.handle_gesture(Gesture::new(GesturePhase::Began, point), now);
        picker.handle_gesture(Gesture::new(GesturePhase::Ended, point), now)
    }

    #[test]
    fn rejects_invalid_settings() {
        let settings = PaletteSettings::default().with_columns(0);
        assert!(matches!(
            PalettePicker::new(settings),
            Err(Error::ZeroColumns)
        ));

        let settings = PaletteSettings::default().with_columns(usize::MAX);
        assert!(matches!(
            PalettePicker::new(settings),
            Err(Error::TooManyCells { .. })
        ));
    }

    #[test]
    fn oversized_pending_settings_keep_layout() {
        let mut picker = picker();
        picker.set_outside_policy(OutsidePolicy::Clamp);
        picker.settings_mut().columns = usize::MAX;
        assert!(matches!(picker.apply(), Err(Error::TooManyCells { .. })));

        assert_eq!(picker.render().unwrap().len(), 10 * 18);
        let color = tap(&mut picker, Point::new(2.0, 2.0));
        assert_eq!(color, Some(PaletteColor::white(0.0)));
    }

    #[test]
    fn unsized_picker_picks_nothing() {
        let mut picker = PalettePicker::new(PaletteSettings::default()).unwrap();
        assert!(picker.render().is_err());
        assert_eq!(tap(&mut picker, Point::new(50.0, 50.0)), None);
        assert_eq!(picker.selected(), None);
    }

    #[test]
    fn tap_selects_and_notifies() {
        let mut picker = picker();
        let (seen, listener) = recorder();
        picker.set_listener(listener);

        // Cell (0, 1): pure red.
        let color = tap(&mut picker, Point::new(25.0, 40.0));
        assert_eq!(color, Some(PaletteColor::hsb(0.0, 1.0, 1.0)));
        assert_eq!(picker.selected(), color);
        assert_eq!(picker.preview().color(), color);
        // Began and Ended both report.
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn last_listener_wins() {
        let mut picker = picker();
        let (first, first_listener) = recorder();
        let (second, second_listener) = recorder();
        picker.set_listener(first_listener);
        picker.set_listener(second_listener);

        tap(&mut picker, Point::new(25.0, 40.0));
        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow().len(), 2);

        assert!(picker.clear_listener());
        assert!(!picker.has_listener());
        tap(&mut picker, Point::new(25.0, 40.0));
        assert_eq!(second.borrow().len(), 2);
    }

    #[test]
    fn border_touch_is_ignored_by_default() {
        let mut picker = picker();
        tap(&mut picker, Point::new(25.0, 40.0));
        let before = picker.selected();

        assert_eq!(tap(&mut picker, Point::new(5.0, 5.0)), None);
        assert_eq!(picker.selected(), before);
        // The bubble still follows the finger.
        assert_eq!(picker.preview().center().x, 5.0);
    }

    #[test]
    fn clamp_policy_selects_nearest_cell() {
        let mut picker = picker();
        picker.set_outside_policy(OutsidePolicy::Clamp);

        let color = tap(&mut picker, Point::new(318.0, 2.0));
        let expected = color_at(picker.spec(), CellIndex::new(9, 0));
        assert_eq!(color, Some(expected));
        assert_eq!(expected, PaletteColor::white(1.0));
    }

    #[test]
    fn settings_edits_wait_for_apply() {
        let mut picker = picker();
        picker.settings_mut().columns = 5;
        assert!(picker.has_pending_changes());
        assert_eq!(picker.spec().count_x(), 10);

        picker.apply().unwrap();
        assert!(!picker.has_pending_changes());
        assert_eq!(picker.spec().count_x(), 5);
        assert_eq!(picker.spec().bounds(), Size::new(320.0, 380.0));
        assert_eq!(picker.render().unwrap().len(), 5 * 18);
    }

    #[test]
    fn failed_apply_keeps_previous_layout() {
        let mut picker = picker();
        picker.settings_mut().rows = 0;
        assert!(matches!(picker.apply(), Err(Error::ZeroRows)));
        assert_eq!(picker.spec().count_y(), 18);
        assert_eq!(picker.settings().rows, 18);
        assert!(picker.has_pending_changes());
    }

    #[test]
    fn grid_lines_follow_applied_settings() {
        let mut picker = picker();
        picker.settings_mut().show_grid_lines = true;
        let cell = picker.render().unwrap().next().unwrap();
        assert_eq!(cell.stroke, cell.fill);

        picker.apply().unwrap();
        let cell = picker.render().unwrap().next().unwrap();
        assert_eq!(cell.stroke, PaletteColor::grid_line());
    }

    #[test]
    fn preview_diameter_change_resets_bubble() {
        let mut picker = picker();
        tap(&mut picker, Point::new(100.0, 100.0));
        picker.settings_mut().preview_diameter = 10.0;
        picker.apply().unwrap();
        assert_eq!(picker.preview().diameter(), 10.0);
        assert_eq!(picker.preview().origin(), Point::new(13.0, 13.0));
    }

    #[test]
    fn pan_shows_preview_then_fades() {
        let mut picker = picker();
        let start = Instant::now();

        picker.handle_gesture(
            Gesture::new(GesturePhase::Began, Point::new(40.0, 40.0)),
            start,
        );
        assert!(picker.preview().is_visible());
        assert!(!picker.is_animating());

        picker.handle_gesture(
            Gesture::new(GesturePhase::Moved, Point::new(80.0, 120.0)),
            start,
        );
        assert_eq!(picker.preview().alpha(start), 1.0);

        picker.handle_gesture(
            Gesture::new(GesturePhase::Ended, Point::new(80.0, 120.0)),
            start,
        );
        assert!(picker.is_animating());
        assert!(picker.tick(start + Duration::from_millis(100)));
        assert!(!picker.tick(start + Duration::from_millis(600)));
        assert!(!picker.preview().is_visible());
    }

    #[test]
    fn resize_relayouts_without_apply() {
        let mut picker = picker();
        picker.resize(Size::new(620.0, 740.0));
        let size = cell_size(picker.spec()).unwrap();
        assert_eq!(size.width, 60.0);
        assert_eq!(size.height, 40.0);
    }
}
