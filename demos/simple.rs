use iced::widget::{checkbox, column, text};
use iced::{Element, Size, Task};
use serde_json::json;

use gridline::{table, text_cell, Action, DynamicRows, Record, RecordSource};

fn main() -> iced::Result {
    iced::application("gridline • dynamic table", App::update, App::view)
        .window_size(Size::new(640.0, 420.0))
        .centered()
        .run_with(App::new)
}

#[derive(Debug, Clone)]
enum Message {
    Table(Action),
    ShowGridlines(bool),
}

struct App {
    trend: DynamicRows,
    show_gridlines: bool,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let records = [
            json!({ "Channel": "VAN RMS", "Minimum": 7124.2, "Average": 7201.5, "Maximum": 7312.0 }),
            json!({ "Channel": "VBN RMS", "Minimum": 7098.9, "Average": 7185.3, "Maximum": 7297.4 }),
            json!({ "Channel": "VCN RMS", "Minimum": 7110.7, "Average": 7193.8, "Maximum": 7301.1 }),
            json!({ "Channel": "IA RMS", "Minimum": 112.4, "Average": 141.9, "Maximum": 203.6 }),
        ]
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        })
        .collect::<Vec<Record>>();

        (
            Self {
                trend: DynamicRows::new(records),
                show_gridlines: true,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Table(action) => self.trend.perform(action),
            Message::ShowGridlines(show) => self.show_gridlines = show,
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        column![
            text("Trend summary (columns derived from the data)"),
            checkbox("Show gridlines", self.show_gridlines).on_toggle(Message::ShowGridlines),
            table(&self.trend, |column, _row, record| text_cell(column, record))
                .on_action(Message::Table)
                .show_gridlines(self.show_gridlines),
        ]
        .padding(20)
        .spacing(20)
        .into()
    }
}
