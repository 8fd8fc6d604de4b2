//! Commands: instructions sent towards an entity, carrying a free-form
//! payload.

use super::expect_criterion;
use super::HeaderOpt;
use super::Signal;
use super::SignalError;
use super::SignalType;
use crate::envelope::Envelope;
use crate::headers::Headers;
use crate::path::Path;
use crate::topic::EntityType;
use crate::topic::Topic;
use crate::topic::TopicAction;
use crate::topic::TopicCriterion;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub topic: Topic,
    pub path: Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Command {
    pub fn new(tenant: impl Into<String>, channel: impl Into<String>, entity: EntityType) -> Self {
        Command {
            topic: Topic::new(tenant, channel, entity, TopicCriterion::Commands),
            path: Path::root(),
            payload: None,
        }
    }

    pub fn for_thing(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Command::new(tenant, channel, EntityType::Things)
    }

    pub fn for_device(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Command::new(tenant, channel, EntityType::Devices)
    }

    pub fn for_connection(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Command::new(tenant, channel, EntityType::Connections)
    }

    pub fn for_stream(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Command::new(tenant, channel, EntityType::Streams)
    }

    /// Stamp the `createmodify` action and attach the payload to create or
    /// overwrite the addressed location.
    pub fn create_or_modify(mut self, payload: impl Into<Value>) -> Self {
        self.topic = self.topic.with_action(TopicAction::CreateOrModify);
        self.payload = Some(payload.into());
        self
    }

    pub fn delete(mut self) -> Self {
        self.topic = self.topic.with_action(TopicAction::Delete);
        self
    }

    pub fn clear(mut self) -> Self {
        self.topic = self.topic.with_action(TopicAction::Clear);
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

    /// Materialise the wire envelope. Headers are attached only when opts
    /// are given; a failing opt yields an envelope without headers.
    pub fn envelope(self, header_opts: impl IntoIterator<Item = HeaderOpt>) -> Envelope {
        let opts: Vec<HeaderOpt> = header_opts.into_iter().collect();
        let mut envelope = Envelope::new(self.topic, self.path);
        envelope.value = self.payload;
        if !opts.is_empty() {
            envelope.headers = Headers::build(opts);
        }
        envelope
    }
}

impl Signal for Command {
    fn signal_type(&self) -> SignalType {
        SignalType::Command
    }

    fn topic(&self) -> &Topic {
        &self.topic
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl TryFrom<&Envelope> for Command {
    type Error = SignalError;

    fn try_from(envelope: &Envelope) -> Result<Self, Self::Error> {
        expect_criterion(&envelope.topic, TopicCriterion::Commands)?;
        Ok(Command {
            topic: envelope.topic.clone(),
            path: envelope.path.clone(),
            payload: envelope.value.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::with_correlation_id;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn builds_a_create_or_modify_envelope() {
        let envelope = Command::for_thing("acme", "west")
            .create_or_modify(json!({"x": 1}))
            .feature("t1", "f1")
            .envelope([with_correlation_id("c1")]);

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json["topic"],
            json!("@topic/acme/west/things/commands/createmodify")
        );
        assert_eq!(json["path"], json!("@things/t1/features/f1"));
        assert_eq!(json["headers"]["correlation-id"], json!("c1"));
        assert_eq!(json["value"]["x"], json!(1));
    }

    #[test]
    fn delete_and_clear_stamp_their_verbs() {
        let delete = Command::for_device("acme", "west")
            .delete()
            .device("d1")
            .envelope([]);
        assert_eq!(
            delete.topic.to_string(),
            "@topic/acme/west/devices/commands/delete"
        );
        assert_eq!(delete.headers, None);

        let clear = Command::for_stream("acme", "west")
            .clear()
            .stream_subscribers("s1")
            .envelope([]);
        assert_eq!(
            clear.topic.to_string(),
            "@topic/acme/west/streams/commands/clear"
        );
        assert_eq!(clear.path.to_string(), "@streams/s1/subscribers");
    }

    #[test]
    fn path_setters_cover_the_device_tree() {
        let command = Command::for_device("acme", "west").device_indicator("d1", "s1", "i1");
        assert_eq!(
            command.path.to_string(),
            "@devices/d1/strategys/s1/indicators/i1"
        );

        let command =
            Command::for_device("acme", "west").device_indicator_timeseries("d1", "s1", "i1");
        assert_eq!(
            command.path.to_string(),
            "@devices/d1/strategys/s1/indicators/i1/timeseries"
        );

        let command = Command::for_device("acme", "west").device_profile("d1", "firmware");
        assert_eq!(command.path.to_string(), "@devices/d1/profiles/firmware");
    }

    #[test]
    fn adapts_a_command_envelope() {
        let envelope = Command::for_thing("acme", "west")
            .create_or_modify(json!({"x": 1}))
            .thing("t1")
            .envelope([]);

        let command = Command::try_from(&envelope).unwrap();
        assert_eq!(command.topic, envelope.topic);
        assert_eq!(command.path, envelope.path);
        assert_eq!(command.payload, Some(json!({"x": 1})));
    }

    #[test]
    fn refuses_an_envelope_of_another_criterion() {
        let envelope = Envelope::new(
            Topic::new("acme", "west", EntityType::Things, TopicCriterion::Events),
            Path::root(),
        );

        assert_matches!(
            Command::try_from(&envelope),
            Err(SignalError::WrongCriterion {
                expected: TopicCriterion::Commands,
                actual: TopicCriterion::Events,
            })
        );
    }
}
