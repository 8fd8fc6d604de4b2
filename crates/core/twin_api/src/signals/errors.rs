//! Error signals: typed failure reports addressed like any other signal.

use super::expect_criterion;
use super::ErrorPayload;
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
pub struct Errors {
    pub topic: Topic,
    pub path: Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ErrorPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

impl Errors {
    fn new(tenant: impl Into<String>, channel: impl Into<String>, entity: EntityType) -> Self {
        Errors {
            topic: Topic::new(tenant, channel, entity, TopicCriterion::Errors),
            path: Path::root(),
            payload: None,
            status: None,
        }
    }

    pub fn for_thing(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Errors::new(tenant, channel, EntityType::Things)
    }

    pub fn for_device(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Errors::new(tenant, channel, EntityType::Devices)
    }

    pub fn for_connection(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Errors::new(tenant, channel, EntityType::Connections)
    }

    pub fn for_stream(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Errors::new(tenant, channel, EntityType::Streams)
    }

    pub fn created(mut self, payload: ErrorPayload) -> Self {
        self.topic = self.topic.with_action(TopicAction::Created);
        self.payload = Some(payload);
        self
    }

    /// Replace the payload without stamping an action verb.
    pub fn modified(mut self, payload: ErrorPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn deleted(mut self) -> Self {
        self.topic = self.topic.with_action(TopicAction::Deleted);
        self
    }

    pub fn cleared(mut self) -> Self {
        self.topic = self.topic.with_action(TopicAction::Cleared);
        self
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = Some(status);
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

impl Signal for Errors {
    fn signal_type(&self) -> SignalType {
        SignalType::Errors
    }

    fn topic(&self) -> &Topic {
        &self.topic
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl TryFrom<&Envelope> for Errors {
    type Error = SignalError;

    fn try_from(envelope: &Envelope) -> Result<Self, Self::Error> {
        expect_criterion(&envelope.topic, TopicCriterion::Errors)?;

        let payload = match &envelope.value {
            None => None,
            Some(value) => Some(
                serde_json::from_value(value.clone()).map_err(PayloadError::Json)?,
            ),
        };

        Ok(Errors {
            topic: envelope.topic.clone(),
            path: envelope.path.clone(),
            payload,
            status: envelope.status,
        })
    }
}
