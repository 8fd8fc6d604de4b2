//! Messages: free-form exchanges with a thing or one of its features. The
//! subject travels twice — as the topic action and as the path's message
//! subject — and the direction distinguishes device-bound from
//! backend-bound traffic.

use super::expect_criterion;
use super::HeaderOpt;
use super::Signal;
use super::SignalError;
use super::SignalType;
use crate::envelope::Envelope;
use crate::headers::Headers;
use crate::path::Direction;
use crate::path::Path;
use crate::topic::EntityType;
use crate::topic::Topic;
use crate::topic::TopicAction;
use crate::topic::TopicCriterion;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub topic: Topic,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub path: Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Message {
    pub fn new(tenant: impl Into<String>, channel: impl Into<String>) -> Self {
        Message {
            topic: Topic::new(tenant, channel, EntityType::Things, TopicCriterion::Messages),
            subject: String::new(),
            direction: None,
            path: Path::root(),
            payload: None,
        }
    }

    /// A device-bound message: the subject becomes the topic action verbatim.
    pub fn incoming(mut self, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        self.topic = self.topic.with_action(TopicAction::from(subject.as_str()));
        self.subject = subject;
        self.direction = Some(Direction::Incoming);
        self
    }

    /// A backend-bound message: the subject becomes the topic action verbatim.
    pub fn outgoing(mut self, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        self.topic = self.topic.with_action(TopicAction::from(subject.as_str()));
        self.subject = subject;
        self.direction = Some(Direction::Outgoing);
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn thing(mut self, thing: impl Into<String>) -> Self {
        self.path = Path::thing(thing);
        self
    }

    pub fn feature(mut self, thing: impl Into<String>, feature: impl Into<String>) -> Self {
        self.path = Path::thing_feature(thing, feature);
        self
    }

    /// Materialise the wire envelope, rewriting the path into its messages
    /// shape with the direction and subject stamped in.
    pub fn envelope(self, header_opts: impl IntoIterator<Item = HeaderOpt>) -> Envelope {
        let path = match (self.path, self.direction) {
            (Path::Thing { thing }, Some(direction)) => Path::ThingMessages {
                thing,
                direction,
                subject: self.subject,
            },
            (Path::ThingFeatures { thing, feature }, Some(direction)) => {
                Path::ThingFeatureMessages {
                    thing,
                    feature,
                    direction,
                    subject: self.subject,
                }
            }
            (path, _) => path,
        };

        let opts: Vec<HeaderOpt> = header_opts.into_iter().collect();
        let mut envelope = Envelope::new(self.topic, path);
        envelope.value = self.payload;
        if !opts.is_empty() {
            envelope.headers = Headers::build(opts);
        }
        envelope
    }
}

impl Signal for Message {
    fn signal_type(&self) -> SignalType {
        SignalType::Message
    }

    fn topic(&self) -> &Topic {
        &self.topic
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl TryFrom<&Envelope> for Message {
    type Error = SignalError;

    fn try_from(envelope: &Envelope) -> Result<Self, Self::Error> {
        expect_criterion(&envelope.topic, TopicCriterion::Messages)?;

        let (direction, subject) = match &envelope.path {
            Path::ThingMessages {
                direction, subject, ..
            } => (*direction, subject.clone()),
            Path::ThingFeatureMessages {
                direction, subject, ..
            } => (*direction, subject.clone()),
            other => return Err(SignalError::NotAMessagePath(other.kind())),
        };

        Ok(Message {
            topic: envelope.topic.clone(),
            subject,
            direction: Some(direction),
            path: envelope.path.clone(),
            payload: envelope.value.clone(),
        })
    }
}
