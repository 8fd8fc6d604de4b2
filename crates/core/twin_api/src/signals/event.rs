//! Events: facts about something that happened to an entity, carrying a
//! typed [`EventPayload`].

use super::expect_criterion;
use super::EventPayload;
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
use crate::topic::TopicAction;
use crate::topic::TopicCriterion;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub topic: Topic,
    pub path: Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<EventPayload>,
}

impl Event {
    pub fn new(tenant: impl Into<String>, channel: impl Into<String>, entity: EntityType) -> Self {
        Event {
            topic: Topic::new(tenant, channel, entity, TopicCriterion::Events),
            path: Path::root(),
            payload: None,
        }
    }

    pub fn for_thing(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Event::new(tenant, channel, EntityType::Things)
    }

    pub fn for_device(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Event::new(tenant, channel, EntityType::Devices)
    }

    pub fn for_connection(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Event::new(tenant, channel, EntityType::Connections)
    }

    pub fn for_stream(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Event::new(tenant, channel, EntityType::Streams)
    }

    pub fn created(mut self, payload: EventPayload) -> Self {
        self.topic = self.topic.with_action(TopicAction::Created);
        self.payload = Some(payload);
        self
    }

    pub fn modified(mut self, payload: EventPayload) -> Self {
        self.topic = self.topic.with_action(TopicAction::Modified);
        self.payload = Some(payload);
        self
    }

    pub fn deleted(mut self, payload: EventPayload) -> Self {
        self.topic = self.topic.with_action(TopicAction::Deleted);
        self.payload = Some(payload);
        self
    }

    pub fn cleared(mut self, payload: EventPayload) -> Self {
        self.topic = self.topic.with_action(TopicAction::Cleared);
        self.payload = Some(payload);
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

    pub fn thing_attributes(mut self, thing: impl Into<String>) -> Self {
        self.path = Path::thing_attributes(thing);
        self
    }

    pub fn thing_attribute(
        mut self,
        thing: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        self.path = Path::thing_attribute(thing, attribute);
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

    pub fn feature_properties(
        mut self,
        thing: impl Into<String>,
        feature: impl Into<String>,
    ) -> Self {
        self.path = Path::thing_feature_properties(thing, feature);
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

    pub fn feature_property_timeseries(
        mut self,
        thing: impl Into<String>,
        feature: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        self.path = Path::thing_feature_property_timeseries(thing, feature, property);
        self
    }

    pub fn feature_desired_properties(
        mut self,
        thing: impl Into<String>,
        feature: impl Into<String>,
    ) -> Self {
        self.path = Path::thing_feature_desired(thing, feature);
        self
    }

    pub fn feature_desired_property(
        mut self,
        thing: impl Into<String>,
        feature: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        self.path = Path::thing_feature_desired_property(thing, feature, property);
        self
    }

    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.path = Path::device(device);
        self
    }

    pub fn device_attributes(mut self, device: impl Into<String>) -> Self {
        self.path = Path::device_attributes(device);
        self
    }

    pub fn device_attribute(
        mut self,
        device: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        self.path = Path::device_attribute(device, attribute);
        self
    }

    pub fn device_status(mut self, device: impl Into<String>) -> Self {
        self.path = Path::device_status(device);
        self
    }

    pub fn device_strategys(mut self, device: impl Into<String>) -> Self {
        self.path = Path::device_strategys(device);
        self
    }

    pub fn device_strategy(
        mut self,
        device: impl Into<String>,
        strategy: impl Into<String>,
    ) -> Self {
        self.path = Path::device_strategy(device, strategy);
        self
    }

    pub fn device_indicators(
        mut self,
        device: impl Into<String>,
        strategy: impl Into<String>,
    ) -> Self {
        self.path = Path::device_strategy_indicators(device, strategy);
        self
    }

    pub fn device_indicator(
        mut self,
        device: impl Into<String>,
        strategy: impl Into<String>,
        indicator: impl Into<String>,
    ) -> Self {
        self.path = Path::device_strategy_indicator(device, strategy, indicator);
        self
    }

    pub fn device_indicator_timeseries(
        mut self,
        device: impl Into<String>,
        strategy: impl Into<String>,
        indicator: impl Into<String>,
    ) -> Self {
        self.path = Path::device_strategy_indicator_timeseries(device, strategy, indicator);
        self
    }

    pub fn device_profiles(mut self, device: impl Into<String>) -> Self {
        self.path = Path::device_profiles(device);
        self
    }

    pub fn device_profile(
        mut self,
        device: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        self.path = Path::device_profile(device, profile);
        self
    }

    pub fn connection(mut self, connection: impl Into<String>) -> Self {
        self.path = Path::connection(connection);
        self
    }

    pub fn connection_status(mut self, connection: impl Into<String>) -> Self {
        self.path = Path::connection_status(connection);
        self
    }

    pub fn stream(mut self, stream: impl Into<String>) -> Self {
        self.path = Path::stream(stream);
        self
    }

    pub fn stream_status(mut self, stream: impl Into<String>) -> Self {
        self.path = Path::stream_status(stream);
        self
    }

    pub fn stream_videos(mut self, stream: impl Into<String>) -> Self {
        self.path = Path::stream_videos(stream);
        self
    }

    pub fn stream_audios(mut self, stream: impl Into<String>) -> Self {
        self.path = Path::stream_audios(stream);
        self
    }

    pub fn stream_subscribers(mut self, stream: impl Into<String>) -> Self {
        self.path = Path::stream_subscribers(stream);
        self
    }

    /// Materialise the wire envelope; the typed payload is carried as its
    /// flat JSON object form.
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

impl Signal for Event {
    fn signal_type(&self) -> SignalType {
        SignalType::Event
    }

    fn topic(&self) -> &Topic {
        &self.topic
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl TryFrom<&Envelope> for Event {
    type Error = SignalError;

    fn try_from(envelope: &Envelope) -> Result<Self, Self::Error> {
        expect_criterion(&envelope.topic, TopicCriterion::Events)?;

        let payload = match &envelope.value {
            None => None,
            Some(value) => Some(
                serde_json::from_value(value.clone()).map_err(PayloadError::Json)?,
            ),
        };

        Ok(Event {
            topic: envelope.topic.clone(),
            path: envelope.path.clone(),
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::EventType;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn created_stamps_action_and_payload() {
        let envelope = Event::for_thing("acme", "west")
            .created(
                EventPayload::new(EventType::Thing)
                    .with_name("t1")
                    .with_prop("origin", "registry"),
            )
            .thing("t1")
            .envelope([]);

        assert_eq!(
            envelope.topic.to_string(),
            "@topic/acme/west/things/events/created"
        );
        assert_eq!(
            envelope.value,
            Some(json!({"origin": "registry", "type": "thing", "name": "t1"}))
        );
    }

    #[test]
    fn each_action_setter_stamps_its_verb() {
        let payload = || EventPayload::new(EventType::Device);

        for (event, action) in [
            (Event::for_device("a", "c").created(payload()), "created"),
            (Event::for_device("a", "c").modified(payload()), "modified"),
            (Event::for_device("a", "c").deleted(payload()), "deleted"),
            (Event::for_device("a", "c").cleared(payload()), "cleared"),
        ] {
            assert_eq!(
                event.topic.to_string(),
                format!("@topic/a/c/devices/events/{action}")
            );
        }
    }

    #[test]
    fn adapter_round_trips_the_typed_payload() {
        let payload = EventPayload::new(EventType::Timeseries)
            .with_name("window")
            .with_content("42")
            .with_prop("unit", "ms");

        let envelope = Event::for_thing("acme", "west")
            .modified(payload.clone())
            .feature_property("t1", "f1", "p1")
            .envelope([]);

        let event = Event::try_from(&envelope).unwrap();
        assert_eq!(event.payload, Some(payload));
        assert_eq!(event.path.to_string(), "@things/t1/features/f1/properties/p1");
    }

    #[test]
    fn refuses_an_envelope_of_another_criterion() {
        let envelope = Envelope::new(
            Topic::new("acme", "west", EntityType::Things, TopicCriterion::Alarms),
            Path::root(),
        );

        assert_matches!(
            Event::try_from(&envelope),
            Err(SignalError::WrongCriterion {
                expected: TopicCriterion::Events,
                actual: TopicCriterion::Alarms,
            })
        );
    }

    #[test]
    fn adapter_surfaces_payload_decode_failures() {
        let envelope = Envelope::new(
            Topic::new("acme", "west", EntityType::Things, TopicCriterion::Events),
            Path::thing("t1"),
        )
        .with_value(json!({"type": "volcano"}));

        assert_matches!(Event::try_from(&envelope), Err(SignalError::Payload(_)));
    }
}
