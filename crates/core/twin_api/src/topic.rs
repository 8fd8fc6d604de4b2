//! The topic grammar: `@topic/<tenant>/<channel>/<entity>/<criterion>[/<action>]`.
//!
//! A topic names the semantic class of a signal — which tenant and channel it
//! belongs to, which entity kind it concerns, whether it is a command, event,
//! message, error or alarm, and optionally a fine-grained action verb.
//!
//! ```
//! use twin_api::topic::{EntityType, Topic, TopicAction, TopicCriterion};
//!
//! let topic: Topic = "@topic/acme/west/things/commands/createmodify".parse().unwrap();
//! assert_eq!(topic.entity, EntityType::Things);
//! assert_eq!(topic.criterion, TopicCriterion::Commands);
//! assert_eq!(topic.action, Some(TopicAction::CreateOrModify));
//! assert!(topic.is_command());
//! ```

use crate::path::glob_match;
use crate::placeholders::has_placeholders;
use regex::Regex;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;
use std::sync::LazyLock;

static TOPIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^@topic/([^/]+)/([^/]+)/(things|streams|connections|devices)/([^/]+)(/([^/]{1}.*))?$")
        .expect("the topic grammar is a valid regex")
});

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum TopicError {
    #[error("Invalid topic: {0:?}")]
    Invalid(String),
}

/// The kind of rooted entity a topic concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Things,
    Streams,
    Connections,
    Devices,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Things => "things",
            EntityType::Streams => "streams",
            EntityType::Connections => "connections",
            EntityType::Devices => "devices",
        }
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "things" => Ok(EntityType::Things),
            "streams" => Ok(EntityType::Streams),
            "connections" => Ok(EntityType::Connections),
            "devices" => Ok(EntityType::Devices),
            invalid => Err(TopicError::Invalid(invalid.to_string())),
        }
    }
}

/// The coarse signal classification carried in the fourth topic segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicCriterion {
    Commands,
    Events,
    Messages,
    Errors,
    Alarms,
}

impl TopicCriterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicCriterion::Commands => "commands",
            TopicCriterion::Events => "events",
            TopicCriterion::Messages => "messages",
            TopicCriterion::Errors => "errors",
            TopicCriterion::Alarms => "alarms",
        }
    }
}

impl Display for TopicCriterion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopicCriterion {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commands" => Ok(TopicCriterion::Commands),
            "events" => Ok(TopicCriterion::Events),
            "messages" => Ok(TopicCriterion::Messages),
            "errors" => Ok(TopicCriterion::Errors),
            "alarms" => Ok(TopicCriterion::Alarms),
            invalid => Err(TopicError::Invalid(invalid.to_string())),
        }
    }
}

/// The fine action verb qualifying a signal.
///
/// The verb set is closed for commands, events and errors; message subjects
/// travel verbatim as [`TopicAction::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TopicAction {
    CreateOrModify,
    Created,
    Modified,
    Delete,
    Deleted,
    Merge,
    Merged,
    Trigger,
    Triggered,
    Clear,
    Cleared,
    Subscribe,
    Subscribed,
    Unsubscribe,
    Unsubscribed,
    StatusChange,
    StatusChanged,
    Failed,
    Custom(String),
}

impl FromStr for TopicAction {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl<'a> From<&'a str> for TopicAction {
    fn from(s: &'a str) -> TopicAction {
        match s {
            "createmodify" => TopicAction::CreateOrModify,
            "created" => TopicAction::Created,
            "modified" => TopicAction::Modified,
            "delete" => TopicAction::Delete,
            "deleted" => TopicAction::Deleted,
            "merge" => TopicAction::Merge,
            "merged" => TopicAction::Merged,
            "trigger" => TopicAction::Trigger,
            "triggered" => TopicAction::Triggered,
            "clear" => TopicAction::Clear,
            "cleared" => TopicAction::Cleared,
            "subscribe" => TopicAction::Subscribe,
            "subscribed" => TopicAction::Subscribed,
            "unsubscribe" => TopicAction::Unsubscribe,
            "unsubscribed" => TopicAction::Unsubscribed,
            "statuschange" => TopicAction::StatusChange,
            "statuschanged" => TopicAction::StatusChanged,
            "failed" => TopicAction::Failed,
            action => TopicAction::Custom(action.to_string()),
        }
    }
}

impl Display for TopicAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TopicAction::CreateOrModify => write!(f, "createmodify"),
            TopicAction::Created => write!(f, "created"),
            TopicAction::Modified => write!(f, "modified"),
            TopicAction::Delete => write!(f, "delete"),
            TopicAction::Deleted => write!(f, "deleted"),
            TopicAction::Merge => write!(f, "merge"),
            TopicAction::Merged => write!(f, "merged"),
            TopicAction::Trigger => write!(f, "trigger"),
            TopicAction::Triggered => write!(f, "triggered"),
            TopicAction::Clear => write!(f, "clear"),
            TopicAction::Cleared => write!(f, "cleared"),
            TopicAction::Subscribe => write!(f, "subscribe"),
            TopicAction::Subscribed => write!(f, "subscribed"),
            TopicAction::Unsubscribe => write!(f, "unsubscribe"),
            TopicAction::Unsubscribed => write!(f, "unsubscribed"),
            TopicAction::StatusChange => write!(f, "statuschange"),
            TopicAction::StatusChanged => write!(f, "statuschanged"),
            TopicAction::Failed => write!(f, "failed"),
            TopicAction::Custom(action) => write!(f, "{action}"),
        }
    }
}

/// A parsed topic. `(tenant, channel, entity, criterion[, action])` is the
/// routing key; paths are carried independently of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic {
    pub tenant: String,
    pub channel: String,
    pub entity: EntityType,
    pub criterion: TopicCriterion,
    pub action: Option<TopicAction>,
}

impl Topic {
    pub fn new(
        tenant: impl Into<String>,
        channel: impl Into<String>,
        entity: EntityType,
        criterion: TopicCriterion,
    ) -> Self {
        Topic {
            tenant: tenant.into(),
            channel: channel.into(),
            entity,
            criterion,
            action: None,
        }
    }

    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = tenant.into();
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    pub fn with_entity(mut self, entity: EntityType) -> Self {
        self.entity = entity;
        self
    }

    pub fn with_criterion(mut self, criterion: TopicCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn with_action(mut self, action: TopicAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn is_command(&self) -> bool {
        self.criterion == TopicCriterion::Commands
    }

    pub fn is_event(&self) -> bool {
        self.criterion == TopicCriterion::Events
    }

    pub fn is_message(&self) -> bool {
        self.criterion == TopicCriterion::Messages
    }

    pub fn is_error(&self) -> bool {
        self.criterion == TopicCriterion::Errors
    }

    pub fn is_alarm(&self) -> bool {
        self.criterion == TopicCriterion::Alarms
    }

    pub fn has_wildcard(&self) -> bool {
        self.to_string().contains('*')
    }

    /// Match the printed form against a `*`-wildcard pattern, anchored at
    /// both ends.
    pub fn matches(&self, pattern: &str) -> bool {
        glob_match(pattern, &self.to_string())
    }

    pub fn has_placeholders(&self) -> bool {
        has_placeholders(&self.to_string())
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.action {
            None => write!(
                f,
                "@topic/{}/{}/{}/{}",
                self.tenant, self.channel, self.entity, self.criterion
            ),
            Some(action) => write!(
                f,
                "@topic/{}/{}/{}/{}/{}",
                self.tenant, self.channel, self.entity, self.criterion, action
            ),
        }
    }
}

impl FromStr for Topic {
    type Err = TopicError;

    fn from_str(topic: &str) -> Result<Self, Self::Err> {
        let invalid = || TopicError::Invalid(topic.to_string());
        let captures = TOPIC_REGEX.captures(topic).ok_or_else(invalid)?;

        let group = |i| captures.get(i).map_or("", |m| m.as_str());

        Ok(Topic {
            tenant: group(1).to_string(),
            channel: group(2).to_string(),
            entity: group(3).parse().map_err(|_| invalid())?,
            criterion: group(4).parse().map_err(|_| invalid())?,
            action: match group(6) {
                "" => None,
                action => Some(action.into()),
            },
        })
    }
}

impl Serialize for Topic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Topic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let topic = String::deserialize(deserializer)?;
        topic.parse().map_err(serde::de::Error::custom)
    }
}

/// A list of topics, serialised as a JSON array of canonical strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicList(pub Vec<Topic>);

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn parses_a_topic_with_action() {
        let topic: Topic = "@topic/acme/west/things/commands/createmodify"
            .parse()
            .unwrap();

        assert_eq!(
            topic,
            Topic {
                tenant: "acme".to_string(),
                channel: "west".to_string(),
                entity: EntityType::Things,
                criterion: TopicCriterion::Commands,
                action: Some(TopicAction::CreateOrModify),
            }
        );
    }

    #[test]
    fn parses_a_topic_without_action() {
        let topic: Topic = "@topic/acme/west/things/alarms".parse().unwrap();

        assert_eq!(topic.entity, EntityType::Things);
        assert_eq!(topic.criterion, TopicCriterion::Alarms);
        assert_eq!(topic.action, None);
    }

    #[test_case("@topic/acme/west/things/alarms")]
    #[test_case("@topic/acme/west/devices/events/statuschanged")]
    #[test_case("@topic/acme/west/streams/commands/subscribe")]
    #[test_case("@topic/acme/west/connections/errors/created")]
    #[test_case("@topic/acme/west/things/messages/reboot")]
    fn print_parse_round_trip(input: &str) {
        let topic: Topic = input.parse().unwrap();
        assert_eq!(topic.to_string(), input);
    }

    #[test_case(""; "empty")]
    #[test_case("@topic/acme/west/gadgets/commands"; "unknown entity")]
    #[test_case("@topic/acme/west/things"; "missing criterion")]
    #[test_case("@topic/acme/things/commands"; "missing channel")]
    #[test_case("topic/acme/west/things/commands"; "missing at sign")]
    fn rejects_invalid_topics(input: &str) {
        assert_eq!(
            input.parse::<Topic>(),
            Err(TopicError::Invalid(input.to_string()))
        );
    }

    #[test]
    fn custom_actions_travel_verbatim() {
        let topic: Topic = "@topic/acme/west/things/messages/fire-torpedo"
            .parse()
            .unwrap();
        assert_eq!(
            topic.action,
            Some(TopicAction::Custom("fire-torpedo".to_string()))
        );
        assert_eq!(topic.to_string(), "@topic/acme/west/things/messages/fire-torpedo");
    }

    #[test]
    fn criterion_predicates() {
        let command = Topic::new("t", "c", EntityType::Things, TopicCriterion::Commands);
        assert!(command.is_command());
        assert!(!command.is_event());
        assert!(!command.is_message());
        assert!(!command.is_error());
        assert!(!command.is_alarm());
    }

    #[test]
    fn wildcard_and_glob_matching() {
        let topic = Topic::new("acme", "west", EntityType::Things, TopicCriterion::Events)
            .with_action(TopicAction::Created);
        assert!(!topic.has_wildcard());
        assert!(topic.matches("@topic/acme/*/things/events/*"));
        assert!(topic.matches("*"));
        assert!(!topic.matches("@topic/acme/*/devices/events/*"));

        let wild = Topic::new("acme", "*", EntityType::Things, TopicCriterion::Events);
        assert!(wild.has_wildcard());
    }

    #[test]
    fn placeholder_detection() {
        let templated = Topic::new("{{tenant}}", "west", EntityType::Things, TopicCriterion::Events);
        assert!(templated.has_placeholders());

        let plain = Topic::new("acme", "west", EntityType::Things, TopicCriterion::Events);
        assert!(!plain.has_placeholders());
    }

    #[test]
    fn serialises_as_canonical_string() {
        let topic = Topic::new("acme", "west", EntityType::Devices, TopicCriterion::Errors)
            .with_action(TopicAction::Cleared);
        let json = serde_json::to_string(&topic).unwrap();
        assert_eq!(json, "\"@topic/acme/west/devices/errors/cleared\"");

        let back: Topic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, topic);
    }
}
