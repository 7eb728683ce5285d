//! Palette color picker widget for [`iced`].
//!
//! The widget renders the grid described by [`swatch_grid`] on a canvas,
//! paints its border with the selected color and shows a fading preview
//! bubble above the touch point.
//!
//! The flow mirrors other stateful `iced` widgets:
//! 1. keep a [`Picker`] in your application state;
//! 2. render it with [`PickerView::show`] and map the produced [`Event`]s
//!    into your message type;
//! 3. pass every event back to [`Picker::handle`] and merge
//!    [`Picker::subscription`] into your subscriptions so the preview can
//!    fade out.
//!
//! See `examples/palette_picker.rs` for a complete runnable example.
//!
//! # Quick Example
//!
//! ```no_run
//! use iced::{Element, Subscription};
//! use swatch_ui_picker::{Event, PaletteSettings, Picker, PickerView};
//!
//! #[derive(Debug, Clone)]
//! enum Message {
//!     Palette(Event),
//! }
//!
//! struct App {
//!     picker: Picker,
//! }
//!
//! impl App {
//!     fn update(&mut self, message: Message) {
//!         let Message::Palette(event) = message;
//!         if let Some(color) = self.picker.handle(event) {
//!             println!("selected {}", color.to_hex());
//!         }
//!     }
//!
//!     fn view(&self) -> Element<'_, Message> {
//!         PickerView::show(&self.picker).map(Message::Palette)
//!     }
//!
//!     fn subscription(&self) -> Subscription<Message> {
//!         self.picker.subscription().map(Message::Palette)
//!     }
//! }
//!
//! let picker = Picker::new(0, PaletteSettings::default())?;
//! let _app = App { picker };
//! # Ok::<(), swatch_grid::Error>(())
//! ```

mod convert;
mod picker;
mod view;

pub use convert::to_iced_color;
pub use picker::{Event, Picker};
pub use swatch_grid::{
    ColorListener, GesturePhase, OutsidePolicy, PaletteColor, PaletteSettings,
};
pub use view::{PickerView, PickerViewState};
