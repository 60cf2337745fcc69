use std::error::Error as StdError;
use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ChartBlock, ChartKind, ChartRequest, DataPoint};

/// Why a descriptor block could not become a [`ChartRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The block is not valid JSON, misses `type`/`data`, or carries a
    /// record with a missing or mistyped field.
    MalformedDescriptor { reason: String },
}

impl ParseError {
    fn malformed(reason: impl Into<String>) -> Self {
        ParseError::MalformedDescriptor {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedDescriptor { reason } => {
                write!(f, "Malformed chart descriptor: {reason}")
            }
        }
    }
}

impl StdError for ParseError {}

#[derive(Deserialize)]
struct WireDescriptor {
    #[serde(rename = "type")]
    kind: String,
    data: Vec<WirePoint>,
}

#[derive(Deserialize)]
struct WirePoint {
    name: String,
    value: WireValue,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireValue {
    Number(f64),
    Text(String),
}

impl WireValue {
    fn coerce(self) -> Option<f64> {
        let value = match self {
            WireValue::Number(value) => value,
            WireValue::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Validate a captured block and turn it into a typed chart request.
///
/// Numeric strings such as `"12.5"` are accepted for `value`. Unknown chart
/// types are not errors; they come back as [`ChartKind::Unrecognized`].
pub fn parse(block: &ChartBlock) -> Result<ChartRequest, ParseError> {
    let wire: WireDescriptor = serde_json::from_str(block.raw_text.trim())
        .map_err(|err| ParseError::malformed(err.to_string()))?;

    let series = wire
        .data
        .into_iter()
        .enumerate()
        .map(|(index, point)| {
            let WirePoint { name, value, extra } = point;
            let value = value.coerce().ok_or_else(|| {
                ParseError::malformed(format!("data[{index}] ({name}) has a non-numeric value"))
            })?;
            Ok(DataPoint { name, value, extra })
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    Ok(ChartRequest {
        kind: ChartKind::from_declared(&wire.kind),
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(raw_text: &str) -> ChartBlock {
        ChartBlock {
            raw_text: raw_text.to_string(),
        }
    }

    fn assert_malformed(raw_text: &str) {
        match parse(&block(raw_text)) {
            Err(ParseError::MalformedDescriptor { .. }) => {}
            other => panic!("expected malformed descriptor for {raw_text:?}, got {other:?}"),
        }
    }

    #[test]
    fn parses_bar_descriptor() {
        let request = parse(&block(
            r#"{"type":"bar","data":[{"name":"Q1","value":10},{"name":"Q2","value":20}]}"#,
        ))
        .expect("valid descriptor");

        assert_eq!(request.kind, ChartKind::Bar);
        assert_eq!(
            request.series,
            vec![DataPoint::new("Q1", 10.0), DataPoint::new("Q2", 20.0)]
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let request = parse(&block("  \n{\"type\":\"line\",\"data\":[]}\n ")).expect("valid");
        assert_eq!(request.kind, ChartKind::Line);
        assert!(request.series.is_empty());
    }

    #[test]
    fn unknown_type_is_kept_as_unrecognized() {
        let request = parse(&block(r#"{"type":"scatter","data":[]}"#)).expect("valid");
        assert_eq!(request.kind, ChartKind::Unrecognized("scatter".to_string()));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let request = parse(&block(
            r#"{"type":"pie","data":[{"name":"a","value":"12.5"},{"name":"b","value":" 3 "}]}"#,
        ))
        .expect("valid");
        let values: Vec<f64> = request.series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![12.5, 3.0]);
    }

    #[test]
    fn extra_fields_are_preserved() {
        let request = parse(&block(
            r#"{"type":"line","data":[{"name":"a","value":1,"color":"red"}],"title":"ignored"}"#,
        ))
        .expect("valid");
        let point = &request.series[0];
        assert_eq!(point.extra.get("color"), Some(&Value::String("red".into())));
        assert!(!point.extra.contains_key("name"));
        assert!(!point.extra.contains_key("value"));
    }

    #[test]
    fn rejects_structurally_invalid_descriptors() {
        assert_malformed("not json");
        assert_malformed(r#"{"type":"bar"}"#);
        assert_malformed(r#"{"data":[]}"#);
        assert_malformed(r#"{"type":7,"data":[]}"#);
        assert_malformed(r#"{"type":"bar","data":{}}"#);
        assert_malformed(r#"[{"type":"bar","data":[]}]"#);
        assert_malformed(r#"{"type":"bar","data":[]} trailing words"#);
        assert_malformed(r#"{"type":"bar","data":[{"value":1}]}"#);
        assert_malformed(r#"{"type":"bar","data":[{"name":1,"value":1}]}"#);
        assert_malformed(r#"{"type":"bar","data":[{"name":"a"}]}"#);
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_malformed(r#"{"type":"bar","data":[{"name":"a","value":"ten"}]}"#);
        assert_malformed(r#"{"type":"bar","data":[{"name":"a","value":"NaN"}]}"#);
        assert_malformed(r#"{"type":"bar","data":[{"name":"a","value":null}]}"#);
        assert_malformed(r#"{"type":"bar","data":[{"name":"a","value":true}]}"#);
        assert_malformed(r#"{"type":"bar","data":[{"name":"a","value":""}]}"#);
    }

    #[test]
    fn error_message_names_the_offending_record() {
        let err = parse(&block(
            r#"{"type":"bar","data":[{"name":"ok","value":1},{"name":"bad","value":"x"}]}"#,
        ))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed chart descriptor: data[1] (bad) has a non-numeric value"
        );
    }
}
