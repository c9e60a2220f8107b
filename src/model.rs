//! Declarative data shapes of the power-quality data exchange suite.
//!
//! These mirror the suite's relational schema and travel as JSON over HTTP
//! with PascalCase member names. They carry no behavior beyond trivial
//! constructors and display helpers; the backing services own all
//! semantics.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datatable::symbols;
use crate::datatable::create_guid;

/// A revenue or power-quality meter installed at a substation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Meter {
    pub id: String,
    pub asset_key: String,
    pub name: String,
    pub location: Option<String>,
    pub make: String,
    pub model: String,
    pub voltage_kv: f64,
    pub connected: bool,
}

/// A monitored grid asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Asset {
    pub id: String,
    pub asset_key: String,
    pub name: String,
    pub asset_type: AssetType,
    pub voltage_kv: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    Line,
    Bus,
    Breaker,
    Transformer,
    CapacitorBank,
}

/// The classification of a recorded disturbance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventClass {
    Sag,
    Swell,
    Interruption,
    Transient,
    Harmonic,
    Other,
}

impl EventClass {
    /// The glyph shown next to events of this class.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sag => symbols::SAG,
            Self::Swell => symbols::SWELL,
            Self::Interruption => symbols::INTERRUPTION,
            Self::Transient => symbols::TRANSIENT,
            Self::Harmonic => symbols::HARMONIC,
            Self::Other => symbols::OTHER_EVENT,
        }
    }
}

impl std::fmt::Display for EventClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Sag => "Sag",
            Self::Swell => "Swell",
            Self::Interruption => "Interruption",
            Self::Transient => "Transient",
            Self::Harmonic => "Harmonic",
            Self::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// A recorded power-quality event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PqEvent {
    pub id: String,
    pub meter_id: String,
    pub class: EventClass,
    pub start_time: DateTime<Utc>,
    /// Residual magnitude in per-unit of nominal.
    pub magnitude: f64,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementKind {
    Voltage,
    Current,
    Power,
    Frequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    A,
    B,
    C,
    Neutral,
}

/// One measured quantity of a meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Channel {
    pub id: String,
    pub meter_id: String,
    pub name: String,
    pub kind: MeasurementKind,
    pub phase: Phase,
    /// Harmonic group of the measurement; 1 is the fundamental.
    pub harmonic: i32,
}

/// An aggregated trend sample of a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrendPoint {
    pub channel_id: String,
    pub time: DateTime<Utc>,
    pub minimum: f64,
    pub average: f64,
    pub maximum: f64,
}

/// An organizational entity meters are grouped under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

/// A named configuration value of the suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Setting {
    pub id: String,
    pub name: String,
    pub value: String,
    pub default_value: String,
}

impl Setting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();

        Self {
            id: create_guid(),
            name: name.into(),
            default_value: value.clone(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_pascal_case() {
        let meter = Meter {
            id: create_guid(),
            asset_key: "SUB-A".into(),
            name: "Substation A".into(),
            location: None,
            make: "GPA".into(),
            model: "PQ-1000".into(),
            voltage_kv: 12.5,
            connected: true,
        };

        let value = serde_json::to_value(&meter).expect("meter serializes");
        let object = value.as_object().expect("meter is an object");

        assert!(object.contains_key("AssetKey"));
        assert!(object.contains_key("VoltageKv"));
        assert!(!object.contains_key("asset_key"));
    }

    #[test]
    fn new_settings_get_a_guid_and_a_default() {
        let setting = Setting::new("Email.Enabled", "true");

        assert_eq!(setting.id.len(), 36);
        assert_eq!(setting.value, setting.default_value);
    }

    #[test]
    fn event_classes_display_and_mark() {
        assert_eq!(EventClass::Sag.to_string(), "Sag");
        assert_eq!(EventClass::Transient.glyph(), symbols::TRANSIENT);
    }
}
