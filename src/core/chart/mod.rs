//! Chart descriptors embedded in answer text.
//!
//! Answers may carry a machine-readable chart after the `Chart Data:`
//! sentinel. Handling happens in two stages that stay separate so the
//! recoverable failure point is explicit:
//! - [`extract`] finds the sentinel and bounds the block, splitting it from
//!   the prose;
//! - [`parse`] validates the block against the descriptor schema and yields
//!   a typed [`ChartRequest`].
//!
//! Rendering lives in [`crate::ui::charts`].

pub mod extract;
pub mod parse;

pub use extract::{extract, ChartBlock, Extraction, CHART_SENTINEL};
pub use parse::{parse, ParseError};

use serde_json::{Map, Value};

/// The declared chart kind of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    /// Any other declared `type`; kept so the renderer can skip it.
    Unrecognized(String),
}

impl ChartKind {
    pub fn from_declared(name: &str) -> Self {
        match name {
            "line" => ChartKind::Line,
            "bar" => ChartKind::Bar,
            "pie" => ChartKind::Pie,
            other => ChartKind::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Unrecognized(name) => name,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ChartKind::Unrecognized(_))
    }
}

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub name: String,
    pub value: f64,
    /// Fields beyond `name` and `value`, preserved as received.
    pub extra: Map<String, Value>,
}

impl DataPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            extra: Map::new(),
        }
    }
}

/// A validated chart request decorating a bot message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub series: Vec<DataPoint>,
}

impl ChartRequest {
    pub fn new(kind: ChartKind, series: Vec<DataPoint>) -> Self {
        Self { kind, series }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Serialize back into the wire descriptor, sentinel included.
    pub fn to_descriptor_block(&self) -> String {
        let data: Vec<Value> = self
            .series
            .iter()
            .map(|point| {
                let mut record = point.extra.clone();
                record.insert("name".to_string(), Value::String(point.name.clone()));
                record.insert("value".to_string(), number_value(point.value));
                Value::Object(record)
            })
            .collect();

        let mut descriptor = Map::new();
        descriptor.insert("type".to_string(), Value::String(self.kind.as_str().into()));
        descriptor.insert("data".to_string(), Value::Array(data));

        format!("{CHART_SENTINEL}{}", Value::Object(descriptor))
    }

    /// One-line description used by the transcript log and placeholders.
    pub fn summary(&self) -> String {
        let noun = if self.series.len() == 1 {
            "point"
        } else {
            "points"
        };
        format!("{} ({} {noun})", self.kind.as_str(), self.series.len())
    }
}

fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
