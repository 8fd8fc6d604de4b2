//! Typed signal payloads with an open `props` extension map.
//!
//! On the wire these are flat JSON objects: recognised keys populate the
//! named fields, everything else accumulates into `props`. Marshalling
//! emits the `props` contents first and the named fields after, so named
//! fields win on key collision.

use serde::de::Error as _;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Map;
use serde_json::Value;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Signal payload decoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// What kind of entity an event payload describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Thing,
    Stream,
    Connection,
    Device,
    Timeseries,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Thing => "thing",
            EventType::Stream => "stream",
            EventType::Connection => "connection",
            EventType::Device => "device",
            EventType::Timeseries => "timeseries",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventPayload {
    pub r#type: EventType,
    pub name: String,
    pub description: String,
    pub content: String,
    pub props: Map<String, Value>,
}

impl EventPayload {
    pub fn new(r#type: EventType) -> Self {
        EventPayload {
            r#type,
            name: String::new(),
            description: String::new(),
            content: String::new(),
            props: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

impl Serialize for EventPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut kvp = self.props.clone();
        kvp.insert("type".to_string(), Value::String(self.r#type.to_string()));
        kvp.insert("name".to_string(), Value::String(self.name.clone()));
        if !self.description.is_empty() {
            kvp.insert(
                "description".to_string(),
                Value::String(self.description.clone()),
            );
        }
        if !self.content.is_empty() {
            kvp.insert("content".to_string(), Value::String(self.content.clone()));
        }
        kvp.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EventPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kvp = Map::deserialize(deserializer)?;

        let mut r#type = None;
        let mut name = String::new();
        let mut description = String::new();
        let mut content = String::new();
        let mut props = Map::new();

        for (key, value) in kvp {
            match key.as_str() {
                "type" => {
                    r#type = Some(
                        serde_json::from_value(value).map_err(D::Error::custom)?,
                    )
                }
                "name" => name = string_field("name", value)?,
                "description" => description = string_field("description", value)?,
                "content" => content = string_field("content", value)?,
                _ => {
                    props.insert(key, value);
                }
            }
        }

        Ok(EventPayload {
            r#type: r#type.ok_or_else(|| D::Error::missing_field("type"))?,
            name,
            description,
            content,
            props,
        })
    }
}

/// How severe an alarm is, from `critical` down to `indeterminate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmSeverity {
    Critical,
    Major,
    Minor,
    Warning,
    Indeterminate,
}

impl AlarmSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmSeverity::Critical => "critical",
            AlarmSeverity::Major => "major",
            AlarmSeverity::Minor => "minor",
            AlarmSeverity::Warning => "warning",
            AlarmSeverity::Indeterminate => "indeterminate",
        }
    }
}

impl Display for AlarmSeverity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlarmPayload {
    pub severity: AlarmSeverity,
    pub name: String,
    pub description: String,
    pub content: String,
    pub props: Map<String, Value>,
}

impl AlarmPayload {
    pub fn new(severity: AlarmSeverity) -> Self {
        AlarmPayload {
            severity,
            name: String::new(),
            description: String::new(),
            content: String::new(),
            props: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

impl Serialize for AlarmPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut kvp = self.props.clone();
        kvp.insert(
            "severity".to_string(),
            Value::String(self.severity.to_string()),
        );
        kvp.insert("name".to_string(), Value::String(self.name.clone()));
        if !self.description.is_empty() {
            kvp.insert(
                "description".to_string(),
                Value::String(self.description.clone()),
            );
        }
        if !self.content.is_empty() {
            kvp.insert("content".to_string(), Value::String(self.content.clone()));
        }
        kvp.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AlarmPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kvp = Map::deserialize(deserializer)?;

        let mut severity = None;
        let mut name = String::new();
        let mut description = String::new();
        let mut content = String::new();
        let mut props = Map::new();

        for (key, value) in kvp {
            match key.as_str() {
                "severity" => {
                    severity = Some(
                        serde_json::from_value(value).map_err(D::Error::custom)?,
                    )
                }
                "name" => name = string_field("name", value)?,
                "description" => description = string_field("description", value)?,
                "content" => content = string_field("content", value)?,
                _ => {
                    props.insert(key, value);
                }
            }
        }

        Ok(AlarmPayload {
            severity: severity.ok_or_else(|| D::Error::missing_field("severity"))?,
            name,
            description,
            content,
            props,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorPayload {
    pub status: i64,
    pub error: String,
    pub description: String,
    pub props: Map<String, Value>,
}

impl ErrorPayload {
    pub fn new() -> Self {
        ErrorPayload::default()
    }

    pub fn with_status(mut self, status: i64) -> Self {
        self.status = status;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

impl Serialize for ErrorPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut kvp = self.props.clone();
        kvp.insert("status".to_string(), Value::from(self.status));
        kvp.insert("error".to_string(), Value::String(self.error.clone()));
        if !self.description.is_empty() {
            kvp.insert(
                "description".to_string(),
                Value::String(self.description.clone()),
            );
        }
        kvp.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ErrorPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kvp = Map::deserialize(deserializer)?;

        let mut payload = ErrorPayload::default();

        for (key, value) in kvp {
            match key.as_str() {
                "status" => {
                    payload.status = value
                        .as_i64()
                        .ok_or_else(|| D::Error::custom("\"status\" must be an integer"))?
                }
                "error" => payload.error = string_field("error", value)?,
                "description" => payload.description = string_field("description", value)?,
                _ => {
                    payload.props.insert(key, value);
                }
            }
        }

        Ok(payload)
    }
}

fn string_field<E: serde::de::Error>(field: &'static str, value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(E::custom(format!("{field:?} must be a string"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_payload_round_trips_byte_for_byte() {
        let payload = ErrorPayload::new()
            .with_status(404)
            .with_error("NotFound")
            .with_prop("resource", "t1");

        let bytes = serde_json::to_string(&payload).unwrap();
        let back: ErrorPayload = serde_json::from_str(&bytes).unwrap();
        assert_eq!(back, payload);
        assert_eq!(serde_json::to_string(&back).unwrap(), bytes);
    }

    #[test]
    fn props_are_emitted_before_named_fields() {
        let payload = ErrorPayload::new()
            .with_status(500)
            .with_error("Boom")
            .with_prop("zz-first", 1);

        let bytes = serde_json::to_string(&payload).unwrap();
        assert_eq!(bytes, r#"{"zz-first":1,"status":500,"error":"Boom"}"#);
    }

    #[test]
    fn named_fields_win_on_collision() {
        let payload = EventPayload::new(EventType::Thing)
            .with_name("real-name")
            .with_prop("name", "prop-name");

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["name"], json!("real-name"));
    }

    #[test]
    fn event_payload_splits_known_and_unknown_keys() {
        let payload: EventPayload = serde_json::from_value(json!({
            "type": "timeseries",
            "name": "window",
            "content": "42",
            "sample-rate": 10,
            "unit": "ms",
        }))
        .unwrap();

        assert_eq!(payload.r#type, EventType::Timeseries);
        assert_eq!(payload.name, "window");
        assert_eq!(payload.content, "42");
        assert_eq!(payload.description, "");
        assert_eq!(payload.props["sample-rate"], json!(10));
        assert_eq!(payload.props["unit"], json!("ms"));
    }

    #[test]
    fn event_payload_requires_a_type() {
        let result: Result<EventPayload, _> =
            serde_json::from_value(json!({"name": "no-type"}));
        assert!(result.is_err());
    }

    #[test]
    fn event_payload_rejects_unknown_types() {
        let result: Result<EventPayload, _> =
            serde_json::from_value(json!({"type": "volcano"}));
        assert!(result.is_err());
    }

    #[test]
    fn alarm_payload_round_trip_keeps_fields_and_props() {
        let payload = AlarmPayload::new(AlarmSeverity::Critical)
            .with_name("overheat")
            .with_description("core temperature above threshold")
            .with_content("98.7")
            .with_prop("sensor", "s-4");

        let bytes = serde_json::to_string(&payload).unwrap();
        let back: AlarmPayload = serde_json::from_str(&bytes).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn alarm_severity_covers_the_full_scale() {
        for (severity, literal) in [
            (AlarmSeverity::Critical, "critical"),
            (AlarmSeverity::Major, "major"),
            (AlarmSeverity::Minor, "minor"),
            (AlarmSeverity::Warning, "warning"),
            (AlarmSeverity::Indeterminate, "indeterminate"),
        ] {
            assert_eq!(severity.to_string(), literal);
            let parsed: AlarmSeverity = serde_json::from_value(json!(literal)).unwrap();
            assert_eq!(parsed, severity);
        }
    }

    #[test]
    fn empty_description_and_content_are_not_emitted() {
        let payload = AlarmPayload::new(AlarmSeverity::Minor).with_name("ping");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, json!({"severity": "minor", "name": "ping"}));
    }
}
