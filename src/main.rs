use chrono::{TimeZone, Utc};
use iced::widget::{button, column, row, text, text_input};
use iced::{Element, Size, Task};

use gridline::model::{EventClass, Meter, PqEvent};
use gridline::{
    create_guid, symbols, table, text_cell, Action, CellValue, Column, Instruction,
    RecordSource, SearchRows, SelectRows,
};

fn main() -> iced::Result {
    simplelog::SimpleLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
    )
    .ok();

    iced::application("gridline • power quality browser", App::update, App::view)
        .window_size(Size::new(960.0, 640.0))
        .centered()
        .run_with(App::new)
}

#[derive(Debug, Clone)]
enum Message {
    Meters(Action),
    MeterInstruction(Instruction),
    Events(Action),
    QueryChanged(String),
    SelectAll,
}

struct App {
    meters: SelectRows<Meter>,
    events: SearchRows<PqEvent>,
    selected: usize,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let meters = SelectRows::new(meter_columns(), |meter: &Meter| meter.id.clone())
            .with_records(sample_meters());
        let events = SearchRows::new(event_columns(), |event: &PqEvent, text| {
            event.meter_id.contains(text) || event.class.to_string().contains(text)
        })
        .with_records(sample_events());

        (
            Self {
                meters,
                events,
                selected: 0,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Meters(action) => {
                self.meters.perform(action);
                self.selected = self.meters.selected_records().len();
            }
            Message::MeterInstruction(instruction) => match instruction {
                Instruction::CellClicked(click) => {
                    log::info!("clicked {} on row {}: {}", click.key, click.row, click.value);
                }
                Instruction::Activate(row) => {
                    if let Some(meter) = self.meters.record(row) {
                        log::info!("open meter {}", meter.name);
                    }
                }
            },
            Message::Events(action) => self.events.perform(action),
            Message::QueryChanged(query) => self.events.set_query(query),
            Message::SelectAll => {
                self.meters.perform(Action::ToggleAll);
                self.selected = self.meters.selected_records().len();
            }
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        column![
            text("Meters").size(18),
            table(&self.meters, |column, _row, meter: &Meter| {
                match column.key() {
                    "connected" => text(if meter.connected {
                        symbols::CONNECTED
                    } else {
                        symbols::DISCONNECTED
                    })
                    .size(13)
                    .into(),
                    _ => text_cell(column, meter),
                }
            })
            .on_action(Message::Meters)
            .on_instruction(Message::MeterInstruction),
            row![
                button("Select all").on_press(Message::SelectAll),
                text(format!("{} selected", self.selected)).size(13),
            ]
            .spacing(10),
            text("Events").size(18),
            text_input("Filter events...", self.events.query()).on_input(Message::QueryChanged),
            table(&self.events, |column, _row, event: &PqEvent| {
                match column.key() {
                    "class" => text(format!("{} {}", event.class.glyph(), event.class))
                        .size(13)
                        .into(),
                    _ => text_cell(column, event),
                }
            })
            .on_action(Message::Events),
        ]
        .padding(20)
        .spacing(12)
        .into()
    }
}

fn meter_columns() -> Vec<Column<Meter>> {
    vec![
        Column::new("connected", "")
            .with_field(|meter: &Meter| meter.connected.into())
            .with_width(30.0),
        Column::new("asset_key", "Key")
            .with_field(|meter: &Meter| meter.asset_key.clone().into())
            .with_width(80.0),
        Column::new("name", "Name")
            .with_field(|meter: &Meter| meter.name.clone().into())
            .with_width(180.0),
        Column::new("make", "Make").with_field(|meter: &Meter| meter.make.clone().into()),
        Column::new("voltage", "Voltage (kV)")
            .with_field(|meter: &Meter| meter.voltage_kv.into()),
    ]
}

fn event_columns() -> Vec<Column<PqEvent>> {
    vec![
        Column::new("class", "Class")
            .with_field(|event: &PqEvent| event.class.to_string().into()),
        Column::new("meter", "Meter")
            .with_field(|event: &PqEvent| event.meter_id.clone().into()),
        Column::new("start", "Start")
            .with_field(|event: &PqEvent| event.start_time.to_rfc3339().into())
            .with_width(200.0),
        Column::new("magnitude", "Magnitude (pu)")
            .with_field(|event: &PqEvent| event.magnitude.into()),
        Column::new("duration", "Duration (ms)")
            .with_field(|event: &PqEvent| CellValue::Number(event.duration_ms)),
    ]
}

fn sample_meters() -> Vec<Meter> {
    [
        ("SUB-A", "Substation Alpha", "GPA", 12.5, true),
        ("SUB-B", "Substation Bravo", "GPA", 69.0, true),
        ("SUB-C", "Substation Charlie", "SEL", 12.5, false),
        ("SUB-D", "Substation Delta", "SEL", 138.0, true),
    ]
    .into_iter()
    .map(|(key, name, make, voltage, connected)| Meter {
        id: create_guid(),
        asset_key: key.to_owned(),
        name: name.to_owned(),
        location: None,
        make: make.to_owned(),
        model: "PQ-1000".to_owned(),
        voltage_kv: voltage,
        connected,
    })
    .collect()
}

fn sample_events() -> Vec<PqEvent> {
    [
        ("SUB-A", EventClass::Sag, 0.62, 116.0),
        ("SUB-A", EventClass::Transient, 1.34, 2.1),
        ("SUB-B", EventClass::Swell, 1.18, 83.0),
        ("SUB-C", EventClass::Interruption, 0.02, 4200.0),
        ("SUB-D", EventClass::Harmonic, 0.97, 660.0),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (meter, class, magnitude, duration_ms))| PqEvent {
        id: create_guid(),
        meter_id: meter.to_owned(),
        class,
        start_time: Utc
            .with_ymd_and_hms(2025, 6, 1, 8, index as u32, 0)
            .single()
            .unwrap_or_else(Utc::now),
        magnitude,
        duration_ms,
    })
    .collect()
}
