use std::sync::{Arc, Mutex};

use futures::future::{self, BoxFuture};
use futures::FutureExt;
use iced::widget::{button, column, row, text, text_input};
use iced::{Element, Size, Task};

use gridline::model::Setting;
use gridline::settings::{Event, LoadState, SettingStore, SettingsEditor, StoreResult};
use gridline::{table, text_cell, Action, Column, Instruction, RecordSource, Rows};

fn main() -> iced::Result {
    iced::application("gridline • settings editor", App::update, App::view)
        .window_size(Size::new(720.0, 480.0))
        .centered()
        .run_with(App::new)
}

#[derive(Debug, Clone)]
enum Message {
    Editor(Event<Setting>),
    Table(Action),
    TableInstruction(Instruction),
}

struct App {
    editor: SettingsEditor<Setting>,
    rows: Rows<Setting>,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let store = Arc::new(MemoryStore::with_defaults());
        let mut editor = SettingsEditor::new(store);

        // load everything up front
        let task = editor.update(Event::Search).map(Message::Editor);

        (
            Self {
                editor,
                rows: Rows::new(setting_columns()),
            },
            task,
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Editor(event) => {
                let task = self.editor.update(event).map(Message::Editor);
                self.rows.set_records(self.editor.records().to_vec());
                task
            }
            Message::Table(action) => {
                self.rows.perform(action);
                Task::none()
            }
            Message::TableInstruction(Instruction::Activate(row)) => {
                // double-clicking a row restores the default value
                match self.rows.records().get(row) {
                    Some(setting) => {
                        let mut reset = setting.clone();
                        reset.value = reset.default_value.clone();
                        self.editor
                            .update(Event::Save(reset))
                            .map(Message::Editor)
                    }
                    None => Task::none(),
                }
            }
            Message::TableInstruction(_) => Task::none(),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let status = match self.editor.state() {
            LoadState::Idle => text(format!("{} settings", self.editor.records().len())),
            LoadState::Loading => text("Loading..."),
            LoadState::Error => text("Search failed; try again"),
        };

        column![
            row![
                text_input("Search settings...", self.editor.query())
                    .on_input(|value| Message::Editor(Event::QueryChanged(value)))
                    .on_submit(Message::Editor(Event::Search)),
                button("Search").on_press(Message::Editor(Event::Search)),
                button("Add").on_press(Message::Editor(Event::Add)),
            ]
            .spacing(8),
            table(&self.rows, |column, _row, setting| {
                text_cell(column, setting)
            })
            .on_action(Message::Table)
            .on_instruction(Message::TableInstruction),
            status.size(13),
        ]
        .padding(20)
        .spacing(12)
        .into()
    }
}

fn setting_columns() -> Vec<Column<Setting>> {
    vec![
        Column::new("name", "Name")
            .with_field(|setting: &Setting| setting.name.clone().into())
            .with_width(200.0),
        Column::new("value", "Value")
            .with_field(|setting: &Setting| setting.value.clone().into())
            .with_width(160.0),
        Column::new("default", "Default")
            .with_field(|setting: &Setting| setting.default_value.clone().into())
            .with_width(160.0),
    ]
}

/// An in-memory stand-in for the suite's settings service.
struct MemoryStore {
    records: Mutex<Vec<Setting>>,
}

impl MemoryStore {
    fn with_defaults() -> Self {
        Self {
            records: Mutex::new(vec![
                Setting::new("Email.Enabled", "true"),
                Setting::new("Email.Server", "smtp.example.com"),
                Setting::new("Trend.RetentionDays", "365"),
                Setting::new("Event.SagThreshold", "0.9"),
            ]),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Setting>> {
        self.records.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl SettingStore<Setting> for MemoryStore {
    fn new_setting(&self) -> Setting {
        Setting::new("New.Setting", "")
    }

    fn search(&self, query: String) -> BoxFuture<'static, StoreResult<Vec<Setting>>> {
        let records: Vec<Setting> = self
            .lock()
            .iter()
            .filter(|setting| setting.name.contains(&query))
            .cloned()
            .collect();

        future::ready(Ok(records)).boxed()
    }

    fn add(&self, record: Setting) -> BoxFuture<'static, StoreResult<()>> {
        self.lock().push(record);
        future::ready(Ok(())).boxed()
    }

    fn update(&self, record: Setting) -> BoxFuture<'static, StoreResult<()>> {
        let mut records = self.lock();
        let result = match records.iter_mut().find(|setting| setting.id == record.id) {
            Some(setting) => {
                *setting = record;
                Ok(())
            }
            None => Err(gridline::settings::StoreError::NotFound),
        };

        future::ready(result).boxed()
    }

    fn delete(&self, record: Setting) -> BoxFuture<'static, StoreResult<()>> {
        self.lock().retain(|setting| setting.id != record.id);
        future::ready(Ok(())).boxed()
    }
}
