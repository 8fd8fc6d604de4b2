//! Alarms: severity-graded conditions raised against things, devices,
//! connections or streams. The topic is always thing-scoped; the path
//! selects the concerned entity.

use super::expect_criterion;
use super::AlarmPayload;
use super::HeaderOpt;
use super::Signal;
use super::SignalError;
use super::SignalType;
use crate::envelope::Envelope;
use crate::headers::Headers;
use crate::path::Path;
use crate::signals::PayloadError;
use crate::topic::EntityType;
use crate::topic::Topic;
use crate::topic::TopicCriterion;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub topic: Topic,
    pub path: Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<AlarmPayload>,
}

impl Alarm {
    pub fn new(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Alarm {
            topic: Topic::new(tenant, channel, EntityType::Things, TopicCriterion::Alarms),
            path: Path::root(),
            payload: None,
        }
    }

    pub fn create(mut self, alarm: AlarmPayload) -> Self {
        self.payload = Some(alarm);
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.topic = self.topic.with_channel(channel);
        self
    }

    pub fn thing(mut self, thing: impl Into<String>) -> Self {
        self.path = Path::thing(thing);
        self
    }

    pub fn features(mut self, thing: impl Into<String>) -> Self {
        self.path = Path::thing_features(thing);
        self
    }

    pub fn feature(mut self, thing: impl Into<String>, feature: impl Into<String>) -> Self {
        self.path = Path::thing_feature(thing, feature);
        self
    }

    pub fn feature_property(
        mut self,
        thing: impl Into<String>,
        feature: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        self.path = Path::thing_feature_property(thing, feature, property);
        self
    }

    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.path = Path::device(device);
        self
    }

    pub fn connection(mut self, connection: impl Into<String>) -> Self {
        self.path = Path::connection(connection);
        self
    }

    pub fn stream(mut self, stream: impl Into<String>) -> Self {
        self.path = Path::stream(stream);
        self
    }

    pub fn envelope(self, header_opts: impl IntoIterator<Item = HeaderOpt>) -> Envelope {
        let opts: Vec<HeaderOpt> = header_opts.into_iter().collect();
        let mut envelope = Envelope::new(self.topic, self.path);
        envelope.value = self
            .payload
            .map(|payload| serde_json::to_value(payload).expect("payloads serialise to json"));
        if !opts.is_empty() {
            envelope.headers = Headers::build(opts);
        }
        envelope
    }
}

impl Signal for Alarm {
    fn signal_type(&self) -> SignalType {
        SignalType::Alarm
    }

    fn topic(&self) -> &Topic {
        &self.topic
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl TryFrom<&Envelope> for Alarm {
    type Error = SignalError;

    fn try_from(envelope: &Envelope) -> Result<Self, Self::Error> {
        expect_criterion(&envelope.topic, TopicCriterion::Alarms)?;

        let payload = match &envelope.value {
            None => None,
            Some(value) => Some(
                serde_json::from_value(value.clone()).map_err(PayloadError::Json)?,
            ),
        };

        Ok(Alarm {
            topic: envelope.topic.clone(),
            path: envelope.path.clone(),
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::with_correlation_id;
    use crate::signals::AlarmSeverity;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn raises_an_alarm_on_a_feature_property() {
        let envelope = Alarm::new("acme", "west")
            .create(
                AlarmPayload::new(AlarmSeverity::Critical)
                    .with_name("overheat")
                    .with_content("98.7"),
            )
            .feature_property("t1", "f1", "temperature")
            .envelope([with_correlation_id("c1")]);

        assert_eq!(envelope.topic.to_string(), "@topic/acme/west/things/alarms");
        assert_eq!(
            envelope.path.to_string(),
            "@things/t1/features/f1/properties/temperature"
        );
        assert_eq!(
            envelope.value,
            Some(json!({"severity": "critical", "name": "overheat", "content": "98.7"}))
        );
        assert_eq!(envelope.headers.unwrap().correlation_id(), "c1");
    }

    #[test]
    fn alarms_may_target_devices_connections_and_streams() {
        assert_eq!(
            Alarm::new("a", "c").device("d1").path.to_string(),
            "@devices/d1"
        );
        assert_eq!(
            Alarm::new("a", "c").connection("c1").path.to_string(),
            "@connections/c1"
        );
        assert_eq!(
            Alarm::new("a", "c").stream("s1").path.to_string(),
            "@streams/s1"
        );
    }

    #[test]
    fn adapter_round_trips_the_typed_payload() {
        let payload = AlarmPayload::new(AlarmSeverity::Warning)
            .with_name("low-battery")
            .with_prop("level", 12);

        let envelope = Alarm::new("acme", "west")
            .create(payload.clone())
            .thing("t1")
            .envelope([]);

        let alarm = Alarm::try_from(&envelope).unwrap();
        assert_eq!(alarm.payload, Some(payload));
    }

    #[test]
    fn refuses_an_envelope_of_another_criterion() {
        let envelope = Envelope::new(
            Topic::new("acme", "west", EntityType::Things, TopicCriterion::Events),
            Path::root(),
        );

        assert_matches!(
            Alarm::try_from(&envelope),
            Err(SignalError::WrongCriterion {
                expected: TopicCriterion::Alarms,
                actual: TopicCriterion::Events,
            })
        );
    }
}
