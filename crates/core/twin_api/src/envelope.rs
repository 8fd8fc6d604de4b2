//! The wire envelope: topic + path + headers + payload.
//!
//! The core dialect carries a typed `time` field serialised with the fixed
//! `yyyy-MM-dd HH:mm:ss.SSSSSS` literal; an absent time serialises as the
//! zero-format string for wire compatibility with existing consumers. The
//! older dialect ([`LegacyEnvelope`]) carries a free-form string timestamp
//! plus `fields`/`extra` slots and converts losslessly to and from the core
//! shape whenever its timestamp is well-formed.

use crate::headers::Headers;
use crate::path::Path;
use crate::topic::Topic;
use clock::InvalidTimestamp;
use clock::Timestamp;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub topic: Topic,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    pub path: Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
    #[serde(default, with = "clock::serde::datetime_opt")]
    pub time: Option<Timestamp>,
}

impl Envelope {
    pub fn new(topic: Topic, path: Path) -> Self {
        Envelope {
            topic,
            headers: None,
            path,
            value: None,
            status: None,
            revision: None,
            time: None,
        }
    }

    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topic = topic;
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_revision(mut self, revision: i64) -> Self {
        self.revision = Some(revision);
        self
    }

    pub fn with_time(mut self, time: Timestamp) -> Self {
        self.time = Some(time);
        self
    }
}

/// The older wire shape: a free-form string `timestamp` and the `fields` /
/// `extra` projection slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyEnvelope {
    pub topic: Topic,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    pub path: Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl LegacyEnvelope {
    /// Lift into the core dialect. Fails when the legacy string timestamp is
    /// not the fixed wire literal. The `fields`/`extra` slots are dropped:
    /// they have no counterpart in the core shape.
    pub fn into_envelope(self) -> Result<Envelope, InvalidTimestamp> {
        let time = match self.timestamp.as_deref() {
            None | Some("") => None,
            Some(literal) => Some(clock::parse_timestamp(literal)?),
        };

        Ok(Envelope {
            topic: self.topic,
            headers: self.headers,
            path: self.path,
            value: self.value,
            status: self.status,
            revision: self.revision,
            time,
        })
    }
}

impl From<Envelope> for LegacyEnvelope {
    fn from(envelope: Envelope) -> Self {
        LegacyEnvelope {
            topic: envelope.topic,
            headers: envelope.headers,
            path: envelope.path,
            value: envelope.value,
            fields: None,
            extra: None,
            status: envelope.status,
            revision: envelope.revision,
            timestamp: envelope.time.map(|time| clock::format_timestamp(&time)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::with_correlation_id;
    use crate::topic::EntityType;
    use crate::topic::TopicAction;
    use crate::topic::TopicCriterion;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;
    use time::macros::datetime;

    fn event_topic() -> Topic {
        Topic::new("acme", "west", EntityType::Things, TopicCriterion::Events)
            .with_action(TopicAction::Created)
    }

    #[test]
    fn serialises_every_field() {
        let envelope = Envelope::new(event_topic(), Path::thing_feature("t1", "f1"))
            .with_headers(Headers::build([with_correlation_id("c1")]).unwrap())
            .with_value(json!({"x": 1}))
            .with_status(201)
            .with_revision(7)
            .with_time(datetime!(2023-04-05 06:07:08.5 UTC));

        assert_json_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "topic": "@topic/acme/west/things/events/created",
                "headers": {"correlation-id": "c1"},
                "path": "@things/t1/features/f1",
                "value": {"x": 1},
                "status": 201,
                "revision": 7,
                "time": "2023-04-05 06:07:08.5",
            })
        );
    }

    #[test]
    fn json_round_trip_preserves_all_fields() {
        let envelope = Envelope::new(event_topic(), Path::thing("t1"))
            .with_value(json!([1, 2, 3]))
            .with_revision(42)
            .with_time(datetime!(2024-01-02 03:04:05.000123 UTC));

        let bytes = serde_json::to_string(&envelope).unwrap();
        let back: Envelope = serde_json::from_str(&bytes).unwrap();
        assert_eq!(back, envelope);
    }

    #[test]
    fn absent_time_serialises_as_the_zero_literal() {
        let envelope = Envelope::new(event_topic(), Path::root());
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            json!({
                "topic": "@topic/acme/west/things/events/created",
                "path": "@",
                "time": "0001-01-01 00:00:00",
            })
        );

        let back: Envelope = serde_json::from_value(json).unwrap();
        assert_eq!(back.time, None);
    }

    #[test]
    fn time_field_may_be_missing_on_decode() {
        let back: Envelope = serde_json::from_value(json!({
            "topic": "@topic/acme/west/things/events/created",
            "path": "@things/t1",
        }))
        .unwrap();
        assert_eq!(back.time, None);
        assert_eq!(back.headers, None);
        assert_eq!(back.value, None);
    }

    #[test]
    fn rejects_an_envelope_with_an_invalid_path() {
        let result: Result<Envelope, _> = serde_json::from_value(json!({
            "topic": "@topic/acme/west/things/events/created",
            "path": "@gizmos/g1",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn legacy_round_trip_through_the_core_dialect() {
        let legacy: LegacyEnvelope = serde_json::from_value(json!({
            "topic": "@topic/acme/west/devices/events/statuschanged",
            "path": "@devices/d1/status",
            "value": "healthy",
            "fields": "status",
            "timestamp": "2023-04-05 06:07:08.25",
        }))
        .unwrap();

        let envelope = legacy.into_envelope().unwrap();
        assert_eq!(envelope.time, Some(datetime!(2023-04-05 06:07:08.25 UTC)));
        assert_eq!(envelope.value, Some(json!("healthy")));

        let back = LegacyEnvelope::from(envelope);
        assert_eq!(back.timestamp.as_deref(), Some("2023-04-05 06:07:08.25"));
        assert_eq!(back.fields, None);
    }

    #[test]
    fn legacy_conversion_rejects_malformed_timestamps() {
        let legacy: LegacyEnvelope = serde_json::from_value(json!({
            "topic": "@topic/acme/west/devices/events/statuschanged",
            "path": "@devices/d1/status",
            "timestamp": "yesterday",
        }))
        .unwrap();

        assert!(legacy.into_envelope().is_err());
    }
}
