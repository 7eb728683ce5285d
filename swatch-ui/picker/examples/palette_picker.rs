use std::path::PathBuf;

use env_logger::Env;
use iced::widget::{button, column, container, row, text};
use iced::{Element, Length, Size, Subscription, Task};
use swatch_ui_picker::{
    Event, PaletteColor, PaletteSettings, Picker, PickerView, to_iced_color,
};

fn main() -> iced::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    iced::application(App::new, App::update, App::view)
        .window_size(Size {
            width: 360.0,
            height: 520.0,
        })
        .title(App::title)
        .subscription(App::subscription)
        .run()
}

#[derive(Debug, Clone)]
enum Message {
    Palette(Event),
    Columns(i32),
    Rows(i32),
    ToggleGridLines,
    Save,
}

struct App {
    picker: Picker,
    settings_path: Option<PathBuf>,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
        let settings = settings_path
            .as_deref()
            .and_then(|path| match PaletteSettings::load(path) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!(
                        "failed to load palette settings from {}: {err}",
                        path.display()
                    );
                    None
                },
            })
            .unwrap_or_default();

        let mut picker =
            Picker::new(0, settings).expect("failed to create palette picker");
        picker.set_listener(|color: PaletteColor| {
            log::info!("color selected: {}", color.to_hex());
        });

        (
            App {
                picker,
                settings_path,
            },
            Task::none(),
        )
    }

    fn title(&self) -> String {
        String::from("Palette picker")
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Palette(event) => {
                self.picker.handle(event);
            },
            Message::Columns(delta) => {
                let settings = self.picker.settings_mut();
                settings.columns = step(settings.columns, delta);
                self.apply();
            },
            Message::Rows(delta) => {
                let settings = self.picker.settings_mut();
                settings.rows = step(settings.rows, delta);
                self.apply();
            },
            Message::ToggleGridLines => {
                let settings = self.picker.settings_mut();
                settings.show_grid_lines = !settings.show_grid_lines;
                self.apply();
            },
            Message::Save => {
                if let Some(path) = &self.settings_path {
                    match self.picker.palette().settings().save(path) {
                        Ok(()) => log::info!("saved {}", path.display()),
                        Err(err) => log::warn!("save failed: {err}"),
                    }
                }
            },
        }

        Task::none()
    }

    fn apply(&mut self) {
        if let Err(err) = self.picker.apply() {
            log::warn!("palette settings rejected: {err}");
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let settings = self.picker.palette().settings();

        let controls = row![
            button("cols -").on_press(Message::Columns(-1)),
            text(settings.columns.to_string()),
            button("cols +").on_press(Message::Columns(1)),
            button("rows -").on_press(Message::Rows(-1)),
            text(settings.rows.to_string()),
            button("rows +").on_press(Message::Rows(1)),
        ]
        .spacing(6);

        let grid_label = if settings.show_grid_lines {
            "hide grid"
        } else {
            "show grid"
        };
        let mut actions = row![
            button(grid_label).on_press(Message::ToggleGridLines),
        ]
        .spacing(6);
        if self.settings_path.is_some() {
            actions = actions.push(button("save").on_press(Message::Save));
        }

        let selected = self.picker.selected();
        let label = text(
            selected
                .map(PaletteColor::to_hex)
                .unwrap_or_else(|| String::from("no color selected")),
        )
        .color(selected.map(to_iced_color).unwrap_or(iced::Color::WHITE));

        let picker = container(
            PickerView::show(&self.picker).map(Message::Palette),
        )
        .width(Length::Fill)
        .height(Length::Fill);

        column![controls, actions, label, picker]
            .spacing(8)
            .padding(8)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        self.picker.subscription().map(Message::Palette)
    }
}

fn step(value: usize, delta: i32) -> usize {
    if delta < 0 {
        value.saturating_sub(1).max(1)
    } else {
        value + 1
    }
}
