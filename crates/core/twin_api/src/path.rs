//! The path algebra: a closed, hierarchical grammar addressing what a signal
//! concerns *inside* an entity.
//!
//! Rooted paths begin `@things/...`, `@devices/...`, `@connections/...` or
//! `@streams/...`; unrooted sub-views (`@features/...`, `@properties/...`,
//! `@strategys/...`, ...) address the same locations relative to an implied
//! parent and compose onto rooted paths with [`Path::join`]. The special
//! literal `@` is the tenant root.
//!
//! Every path value prints to a canonical string and every legal string
//! parses back to exactly one [`Path`] variant:
//!
//! ```
//! use twin_api::path::{Path, PathType};
//!
//! let path: Path = "@things/t1/features/f1/properties/humidity/timeseries"
//!     .parse()
//!     .unwrap();
//! assert_eq!(path.kind(), PathType::ThingFeatureProperties);
//! assert_eq!(
//!     path.as_thing_feature_properties(),
//!     Some(("t1", "f1", "humidity", true))
//! );
//! assert_eq!(
//!     path.to_string(),
//!     "@things/t1/features/f1/properties/humidity/timeseries"
//! );
//! ```
//!
//! Identifiers may be empty to denote a collection; printing then collapses
//! to the nearest non-empty ancestor form (`Path::thing("")` prints
//! `@things`).

use crate::placeholders::has_placeholders;
use crate::topic::EntityType;
use regex::Regex;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;
use std::sync::LazyLock;

static THINGS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "^@(things)/([^/]+)(/(features)/([^/]+)/(messages)/(incoming|outgoing)/([^/]+)\
         |/(features)(/([^/]+)(/(properties)(/([^/]{1}.*)/(timeseries))?)?)?\
         |/(features)(/([^/]+)(/(properties|desired|attributes)(/([^/]{1}.*))?)?)?\
         |/(attributes)(/([^/]{1}.*))?\
         |/(messages)/(incoming|outgoing)/([^/]+))?$",
    )
    .expect("the things grammar is a valid regex")
});

static DEVICES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "^@(devices)/([^/]+)(/(status)\
         |/(strategys)(/([^/]+)(/(indicators|attributes)(/([^/]+)(/(timeseries))?)?)?)?\
         |/(attributes)(/([^/]{1}.*))?\
         |/(profiles)(/(name|product|manufacturer|version|firmware|protocol|transport|tags))?)?$",
    )
    .expect("the devices grammar is a valid regex")
});

static CONNECTIONS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^@(connections)/([^/]+)(/(status))?$")
        .expect("the connections grammar is a valid regex")
});

static STREAMS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^@(streams)/([^/]+)(/(status|videos|audios|subscribers))?$")
        .expect("the streams grammar is a valid regex")
});

static FEATURES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^@(features)(/([^/]+)(/(properties|desired|attributes)(/([^/]{1}.*))?)?)?$")
        .expect("the features grammar is a valid regex")
});

static PROPERTIES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^@(properties)(/([^/]{1}.*))?$").expect("the properties grammar is a valid regex")
});

static DESIRED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^@(desired)(/([^/]{1}.*))?$").expect("the desired grammar is a valid regex")
});

static ATTRIBUTES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^@(attributes)(/([^/]{1}.*))?$").expect("the attributes grammar is a valid regex")
});

static STRATEGYS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^@(strategys)(/([^/]+)(/(indicators|attributes)(/([^/]+))?)?)?$")
        .expect("the strategys grammar is a valid regex")
});

static INDICATORS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^@(indicators)(/([^/]+)?)?$").expect("the indicators grammar is a valid regex")
});

static PROFILES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^@(profiles)(/([^/]+)?)?$").expect("the profiles grammar is a valid regex")
});

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum PathError {
    #[error("Invalid path: {0:?}")]
    Invalid(String),

    /// The prefix matched an entity grammar but no parse branch was selected.
    /// This signals drift between the grammar and the parser, not bad input.
    #[error("No parse branch selected for a {0} path")]
    ParseBranch(&'static str),
}

/// The direction of a thing or feature message exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Incoming => "incoming",
            Direction::Outgoing => "outgoing",
        }
    }

    fn parse(s: &str) -> Option<Direction> {
        match s {
            "incoming" => Some(Direction::Incoming),
            "outgoing" => Some(Direction::Outgoing),
            _ => None,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::parse(s).ok_or_else(|| PathError::Invalid(s.to_string()))
    }
}

/// The typed discriminator of a [`Path`]: downstream code dispatches on this
/// tag without reparsing the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathType {
    Root,
    Thing,
    ThingAttributes,
    ThingMessages,
    ThingFeatures,
    ThingFeatureMessages,
    ThingFeatureProperties,
    ThingFeatureDesired,
    ThingFeatureAttributes,
    Device,
    DeviceStatus,
    DeviceAttributes,
    DeviceStrategys,
    DeviceStrategyIndicators,
    DeviceStrategyAttributes,
    DeviceProfiles,
    Connection,
    ConnectionStatus,
    Stream,
    StreamStatus,
    StreamVideos,
    StreamAudios,
    StreamSubscribers,
    Features,
    FeatureProperties,
    FeatureDesired,
    FeatureAttributes,
    Properties,
    Desired,
    Attributes,
    Strategys,
    StrategyIndicators,
    StrategyAttributes,
    Indicators,
    Profiles,
    Status,
    Videos,
    Audios,
    Subscribers,
}

impl PathType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathType::Root => "root_path",
            PathType::Thing => "thing_path",
            PathType::ThingAttributes => "thing_attributes_path",
            PathType::ThingMessages => "thing_message_path",
            PathType::ThingFeatures => "thing_features_path",
            PathType::ThingFeatureMessages => "thing_feature_message_path",
            PathType::ThingFeatureProperties => "thing_feature_properties_path",
            PathType::ThingFeatureDesired => "thing_feature_desired_path",
            PathType::ThingFeatureAttributes => "thing_feature_attributes_path",
            PathType::Device => "device_path",
            PathType::DeviceStatus => "device_status_path",
            PathType::DeviceAttributes => "device_attributes_path",
            PathType::DeviceStrategys => "device_strategys_path",
            PathType::DeviceStrategyIndicators => "device_strategys_indicators_path",
            PathType::DeviceStrategyAttributes => "device_strategys_attributes_path",
            PathType::DeviceProfiles => "device_profiles_path",
            PathType::Connection => "connection_path",
            PathType::ConnectionStatus => "connection_status_path",
            PathType::Stream => "stream_path",
            PathType::StreamStatus => "stream_status_path",
            PathType::StreamVideos => "stream_videos_path",
            PathType::StreamAudios => "stream_audios_path",
            PathType::StreamSubscribers => "stream_subscribers_path",
            PathType::Features => "feature_path",
            PathType::FeatureProperties => "feature_properties_path",
            PathType::FeatureDesired => "feature_desired_path",
            PathType::FeatureAttributes => "feature_attributes_path",
            PathType::Properties => "properties_path",
            PathType::Desired => "desired_path",
            PathType::Attributes => "attributes_path",
            PathType::Strategys => "strategys_path",
            PathType::StrategyIndicators => "strategys_indicators_path",
            PathType::StrategyAttributes => "strategys_attributes_path",
            PathType::Indicators => "indicators_path",
            PathType::Profiles => "profiles_path",
            PathType::Status => "status_path",
            PathType::Videos => "videos_path",
            PathType::Audios => "audios_path",
            PathType::Subscribers => "subscribers_path",
        }
    }

    /// The closed join matrix: which unrooted child kinds may be composed
    /// onto which parent kinds. All pairs outside the matrix are illegal.
    pub fn is_valid_join(parent: PathType, child: PathType) -> bool {
        use PathType::*;
        matches!(
            (parent, child),
            (Root, Thing | Device | Stream | Connection)
                | (
                    Thing,
                    Features
                        | FeatureProperties
                        | FeatureDesired
                        | FeatureAttributes
                        | Attributes
                )
                | (ThingFeatures, Properties | Desired | Attributes)
                | (
                    Device,
                    Strategys
                        | StrategyIndicators
                        | StrategyAttributes
                        | Attributes
                        | Profiles
                        | Status
                )
                | (DeviceStrategys, Indicators | Attributes)
                | (Connection, Status)
                | (Stream, Status | Videos | Audios | Subscribers)
                | (Features, Attributes | Properties | Desired)
                | (Strategys, Indicators | Attributes)
        )
    }
}

impl Display for PathType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A twin path: a tagged sum over every addressable location.
///
/// Identifiers are plain strings; an empty identifier denotes the collection
/// at that level. Leaf attribute/property identifiers may contain `/`
/// (nested pointers); entity names never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Path {
    Root,
    Thing {
        thing: String,
    },
    ThingAttributes {
        thing: String,
        attribute: String,
    },
    ThingMessages {
        thing: String,
        direction: Direction,
        subject: String,
    },
    ThingFeatures {
        thing: String,
        feature: String,
    },
    ThingFeatureMessages {
        thing: String,
        feature: String,
        direction: Direction,
        subject: String,
    },
    ThingFeatureProperties {
        thing: String,
        feature: String,
        property: String,
        timeseries: bool,
    },
    ThingFeatureDesired {
        thing: String,
        feature: String,
        property: String,
    },
    ThingFeatureAttributes {
        thing: String,
        feature: String,
        attribute: String,
    },
    Device {
        device: String,
    },
    DeviceStatus {
        device: String,
    },
    DeviceAttributes {
        device: String,
        attribute: String,
    },
    DeviceStrategys {
        device: String,
        strategy: String,
    },
    DeviceStrategyIndicators {
        device: String,
        strategy: String,
        indicator: String,
        timeseries: bool,
    },
    DeviceStrategyAttributes {
        device: String,
        strategy: String,
        attribute: String,
    },
    DeviceProfiles {
        device: String,
        profile: String,
    },
    Connection {
        connection: String,
    },
    ConnectionStatus {
        connection: String,
    },
    Stream {
        stream: String,
    },
    StreamStatus {
        stream: String,
    },
    StreamVideos {
        stream: String,
    },
    StreamAudios {
        stream: String,
    },
    StreamSubscribers {
        stream: String,
    },
    Features {
        feature: String,
    },
    FeatureProperties {
        feature: String,
        property: String,
    },
    FeatureDesired {
        feature: String,
        property: String,
    },
    FeatureAttributes {
        feature: String,
        attribute: String,
    },
    Properties {
        property: String,
    },
    Desired {
        property: String,
    },
    Attributes {
        attribute: String,
    },
    Strategys {
        strategy: String,
    },
    StrategyIndicators {
        strategy: String,
        indicator: String,
    },
    StrategyAttributes {
        strategy: String,
        attribute: String,
    },
    Indicators {
        indicator: String,
    },
    Profiles {
        profile: String,
    },
    Status,
    Videos,
    Audios,
    Subscribers,
}

impl Path {
    pub fn root() -> Path {
        Path::Root
    }

    pub fn things() -> Path {
        Path::Thing {
            thing: String::new(),
        }
    }

    pub fn thing(thing: impl Into<String>) -> Path {
        Path::Thing {
            thing: thing.into(),
        }
    }

    pub fn thing_attributes(thing: impl Into<String>) -> Path {
        Path::ThingAttributes {
            thing: thing.into(),
            attribute: String::new(),
        }
    }

    pub fn thing_attribute(thing: impl Into<String>, attribute: impl Into<String>) -> Path {
        Path::ThingAttributes {
            thing: thing.into(),
            attribute: attribute.into(),
        }
    }

    pub fn thing_messages(
        thing: impl Into<String>,
        direction: Direction,
        subject: impl Into<String>,
    ) -> Path {
        Path::ThingMessages {
            thing: thing.into(),
            direction,
            subject: subject.into(),
        }
    }

    pub fn thing_features(thing: impl Into<String>) -> Path {
        Path::ThingFeatures {
            thing: thing.into(),
            feature: String::new(),
        }
    }

    pub fn thing_feature(thing: impl Into<String>, feature: impl Into<String>) -> Path {
        Path::ThingFeatures {
            thing: thing.into(),
            feature: feature.into(),
        }
    }

    pub fn thing_feature_messages(
        thing: impl Into<String>,
        feature: impl Into<String>,
        direction: Direction,
        subject: impl Into<String>,
    ) -> Path {
        Path::ThingFeatureMessages {
            thing: thing.into(),
            feature: feature.into(),
            direction,
            subject: subject.into(),
        }
    }

    pub fn thing_feature_properties(
        thing: impl Into<String>,
        feature: impl Into<String>,
    ) -> Path {
        Path::ThingFeatureProperties {
            thing: thing.into(),
            feature: feature.into(),
            property: String::new(),
            timeseries: false,
        }
    }

    pub fn thing_feature_property(
        thing: impl Into<String>,
        feature: impl Into<String>,
        property: impl Into<String>,
    ) -> Path {
        Path::ThingFeatureProperties {
            thing: thing.into(),
            feature: feature.into(),
            property: property.into(),
            timeseries: false,
        }
    }

    pub fn thing_feature_property_timeseries(
        thing: impl Into<String>,
        feature: impl Into<String>,
        property: impl Into<String>,
    ) -> Path {
        Path::ThingFeatureProperties {
            thing: thing.into(),
            feature: feature.into(),
            property: property.into(),
            timeseries: true,
        }
    }

    pub fn thing_feature_desired(thing: impl Into<String>, feature: impl Into<String>) -> Path {
        Path::ThingFeatureDesired {
            thing: thing.into(),
            feature: feature.into(),
            property: String::new(),
        }
    }

    pub fn thing_feature_desired_property(
        thing: impl Into<String>,
        feature: impl Into<String>,
        property: impl Into<String>,
    ) -> Path {
        Path::ThingFeatureDesired {
            thing: thing.into(),
            feature: feature.into(),
            property: property.into(),
        }
    }

    pub fn thing_feature_attributes(
        thing: impl Into<String>,
        feature: impl Into<String>,
    ) -> Path {
        Path::ThingFeatureAttributes {
            thing: thing.into(),
            feature: feature.into(),
            attribute: String::new(),
        }
    }

    pub fn thing_feature_attribute(
        thing: impl Into<String>,
        feature: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Path {
        Path::ThingFeatureAttributes {
            thing: thing.into(),
            feature: feature.into(),
            attribute: attribute.into(),
        }
    }

    pub fn devices() -> Path {
        Path::Device {
            device: String::new(),
        }
    }

    pub fn device(device: impl Into<String>) -> Path {
        Path::Device {
            device: device.into(),
        }
    }

    pub fn device_status(device: impl Into<String>) -> Path {
        Path::DeviceStatus {
            device: device.into(),
        }
    }

    pub fn device_attributes(device: impl Into<String>) -> Path {
        Path::DeviceAttributes {
            device: device.into(),
            attribute: String::new(),
        }
    }

    pub fn device_attribute(device: impl Into<String>, attribute: impl Into<String>) -> Path {
        Path::DeviceAttributes {
            device: device.into(),
            attribute: attribute.into(),
        }
    }

    pub fn device_strategys(device: impl Into<String>) -> Path {
        Path::DeviceStrategys {
            device: device.into(),
            strategy: String::new(),
        }
    }

    pub fn device_strategy(device: impl Into<String>, strategy: impl Into<String>) -> Path {
        Path::DeviceStrategys {
            device: device.into(),
            strategy: strategy.into(),
        }
    }

    pub fn device_strategy_indicators(
        device: impl Into<String>,
        strategy: impl Into<String>,
    ) -> Path {
        Path::DeviceStrategyIndicators {
            device: device.into(),
            strategy: strategy.into(),
            indicator: String::new(),
            timeseries: false,
        }
    }

    pub fn device_strategy_indicator(
        device: impl Into<String>,
        strategy: impl Into<String>,
        indicator: impl Into<String>,
    ) -> Path {
        Path::DeviceStrategyIndicators {
            device: device.into(),
            strategy: strategy.into(),
            indicator: indicator.into(),
            timeseries: false,
        }
    }

    pub fn device_strategy_indicator_timeseries(
        device: impl Into<String>,
        strategy: impl Into<String>,
        indicator: impl Into<String>,
    ) -> Path {
        Path::DeviceStrategyIndicators {
            device: device.into(),
            strategy: strategy.into(),
            indicator: indicator.into(),
            timeseries: true,
        }
    }

    pub fn device_strategy_attributes(
        device: impl Into<String>,
        strategy: impl Into<String>,
    ) -> Path {
        Path::DeviceStrategyAttributes {
            device: device.into(),
            strategy: strategy.into(),
            attribute: String::new(),
        }
    }

    pub fn device_strategy_attribute(
        device: impl Into<String>,
        strategy: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Path {
        Path::DeviceStrategyAttributes {
            device: device.into(),
            strategy: strategy.into(),
            attribute: attribute.into(),
        }
    }

    pub fn device_profiles(device: impl Into<String>) -> Path {
        Path::DeviceProfiles {
            device: device.into(),
            profile: String::new(),
        }
    }

    pub fn device_profile(device: impl Into<String>, profile: impl Into<String>) -> Path {
        Path::DeviceProfiles {
            device: device.into(),
            profile: profile.into(),
        }
    }

    pub fn connections() -> Path {
        Path::Connection {
            connection: String::new(),
        }
    }

    pub fn connection(connection: impl Into<String>) -> Path {
        Path::Connection {
            connection: connection.into(),
        }
    }

    pub fn connection_status(connection: impl Into<String>) -> Path {
        Path::ConnectionStatus {
            connection: connection.into(),
        }
    }

    pub fn streams() -> Path {
        Path::Stream {
            stream: String::new(),
        }
    }

    pub fn stream(stream: impl Into<String>) -> Path {
        Path::Stream {
            stream: stream.into(),
        }
    }

    pub fn stream_status(stream: impl Into<String>) -> Path {
        Path::StreamStatus {
            stream: stream.into(),
        }
    }

    pub fn stream_videos(stream: impl Into<String>) -> Path {
        Path::StreamVideos {
            stream: stream.into(),
        }
    }

    pub fn stream_audios(stream: impl Into<String>) -> Path {
        Path::StreamAudios {
            stream: stream.into(),
        }
    }

    pub fn stream_subscribers(stream: impl Into<String>) -> Path {
        Path::StreamSubscribers {
            stream: stream.into(),
        }
    }

    pub fn features() -> Path {
        Path::Features {
            feature: String::new(),
        }
    }

    pub fn feature(feature: impl Into<String>) -> Path {
        Path::Features {
            feature: feature.into(),
        }
    }

    pub fn feature_properties(feature: impl Into<String>) -> Path {
        Path::FeatureProperties {
            feature: feature.into(),
            property: String::new(),
        }
    }

    pub fn feature_property(feature: impl Into<String>, property: impl Into<String>) -> Path {
        Path::FeatureProperties {
            feature: feature.into(),
            property: property.into(),
        }
    }

    pub fn feature_desired(feature: impl Into<String>) -> Path {
        Path::FeatureDesired {
            feature: feature.into(),
            property: String::new(),
        }
    }

    pub fn feature_desired_property(
        feature: impl Into<String>,
        property: impl Into<String>,
    ) -> Path {
        Path::FeatureDesired {
            feature: feature.into(),
            property: property.into(),
        }
    }

    pub fn feature_attributes(feature: impl Into<String>) -> Path {
        Path::FeatureAttributes {
            feature: feature.into(),
            attribute: String::new(),
        }
    }

    pub fn feature_attribute(feature: impl Into<String>, attribute: impl Into<String>) -> Path {
        Path::FeatureAttributes {
            feature: feature.into(),
            attribute: attribute.into(),
        }
    }

    pub fn properties() -> Path {
        Path::Properties {
            property: String::new(),
        }
    }

    pub fn property(property: impl Into<String>) -> Path {
        Path::Properties {
            property: property.into(),
        }
    }

    pub fn desired() -> Path {
        Path::Desired {
            property: String::new(),
        }
    }

    pub fn desired_property(property: impl Into<String>) -> Path {
        Path::Desired {
            property: property.into(),
        }
    }

    pub fn attributes() -> Path {
        Path::Attributes {
            attribute: String::new(),
        }
    }

    pub fn attribute(attribute: impl Into<String>) -> Path {
        Path::Attributes {
            attribute: attribute.into(),
        }
    }

    pub fn strategys() -> Path {
        Path::Strategys {
            strategy: String::new(),
        }
    }

    pub fn strategy(strategy: impl Into<String>) -> Path {
        Path::Strategys {
            strategy: strategy.into(),
        }
    }

    pub fn strategy_indicators(strategy: impl Into<String>) -> Path {
        Path::StrategyIndicators {
            strategy: strategy.into(),
            indicator: String::new(),
        }
    }

    pub fn strategy_indicator(strategy: impl Into<String>, indicator: impl Into<String>) -> Path {
        Path::StrategyIndicators {
            strategy: strategy.into(),
            indicator: indicator.into(),
        }
    }

    pub fn strategy_attributes(strategy: impl Into<String>) -> Path {
        Path::StrategyAttributes {
            strategy: strategy.into(),
            attribute: String::new(),
        }
    }

    pub fn strategy_attribute(strategy: impl Into<String>, attribute: impl Into<String>) -> Path {
        Path::StrategyAttributes {
            strategy: strategy.into(),
            attribute: attribute.into(),
        }
    }

    pub fn indicators() -> Path {
        Path::Indicators {
            indicator: String::new(),
        }
    }

    pub fn indicator(indicator: impl Into<String>) -> Path {
        Path::Indicators {
            indicator: indicator.into(),
        }
    }

    pub fn profiles() -> Path {
        Path::Profiles {
            profile: String::new(),
        }
    }

    pub fn profile(profile: impl Into<String>) -> Path {
        Path::Profiles {
            profile: profile.into(),
        }
    }

    pub fn status() -> Path {
        Path::Status
    }

    pub fn videos() -> Path {
        Path::Videos
    }

    pub fn audios() -> Path {
        Path::Audios
    }

    pub fn subscribers() -> Path {
        Path::Subscribers
    }

    /// The typed discriminator of this path.
    pub fn kind(&self) -> PathType {
        match self {
            Path::Root => PathType::Root,
            Path::Thing { .. } => PathType::Thing,
            Path::ThingAttributes { .. } => PathType::ThingAttributes,
            Path::ThingMessages { .. } => PathType::ThingMessages,
            Path::ThingFeatures { .. } => PathType::ThingFeatures,
            Path::ThingFeatureMessages { .. } => PathType::ThingFeatureMessages,
            Path::ThingFeatureProperties { .. } => PathType::ThingFeatureProperties,
            Path::ThingFeatureDesired { .. } => PathType::ThingFeatureDesired,
            Path::ThingFeatureAttributes { .. } => PathType::ThingFeatureAttributes,
            Path::Device { .. } => PathType::Device,
            Path::DeviceStatus { .. } => PathType::DeviceStatus,
            Path::DeviceAttributes { .. } => PathType::DeviceAttributes,
            Path::DeviceStrategys { .. } => PathType::DeviceStrategys,
            Path::DeviceStrategyIndicators { .. } => PathType::DeviceStrategyIndicators,
            Path::DeviceStrategyAttributes { .. } => PathType::DeviceStrategyAttributes,
            Path::DeviceProfiles { .. } => PathType::DeviceProfiles,
            Path::Connection { .. } => PathType::Connection,
            Path::ConnectionStatus { .. } => PathType::ConnectionStatus,
            Path::Stream { .. } => PathType::Stream,
            Path::StreamStatus { .. } => PathType::StreamStatus,
            Path::StreamVideos { .. } => PathType::StreamVideos,
            Path::StreamAudios { .. } => PathType::StreamAudios,
            Path::StreamSubscribers { .. } => PathType::StreamSubscribers,
            Path::Features { .. } => PathType::Features,
            Path::FeatureProperties { .. } => PathType::FeatureProperties,
            Path::FeatureDesired { .. } => PathType::FeatureDesired,
            Path::FeatureAttributes { .. } => PathType::FeatureAttributes,
            Path::Properties { .. } => PathType::Properties,
            Path::Desired { .. } => PathType::Desired,
            Path::Attributes { .. } => PathType::Attributes,
            Path::Strategys { .. } => PathType::Strategys,
            Path::StrategyIndicators { .. } => PathType::StrategyIndicators,
            Path::StrategyAttributes { .. } => PathType::StrategyAttributes,
            Path::Indicators { .. } => PathType::Indicators,
            Path::Profiles { .. } => PathType::Profiles,
            Path::Status => PathType::Status,
            Path::Videos => PathType::Videos,
            Path::Audios => PathType::Audios,
            Path::Subscribers => PathType::Subscribers,
        }
    }

    /// The rooted entity kind this path addresses, or `None` for the root
    /// and the unrooted sub-views.
    pub fn entity_type(&self) -> Option<EntityType> {
        match self {
            Path::Thing { .. }
            | Path::ThingAttributes { .. }
            | Path::ThingMessages { .. }
            | Path::ThingFeatures { .. }
            | Path::ThingFeatureMessages { .. }
            | Path::ThingFeatureProperties { .. }
            | Path::ThingFeatureDesired { .. }
            | Path::ThingFeatureAttributes { .. } => Some(EntityType::Things),
            Path::Device { .. }
            | Path::DeviceStatus { .. }
            | Path::DeviceAttributes { .. }
            | Path::DeviceStrategys { .. }
            | Path::DeviceStrategyIndicators { .. }
            | Path::DeviceStrategyAttributes { .. }
            | Path::DeviceProfiles { .. } => Some(EntityType::Devices),
            Path::Connection { .. } | Path::ConnectionStatus { .. } => {
                Some(EntityType::Connections)
            }
            Path::Stream { .. }
            | Path::StreamStatus { .. }
            | Path::StreamVideos { .. }
            | Path::StreamAudios { .. }
            | Path::StreamSubscribers { .. } => Some(EntityType::Streams),
            _ => None,
        }
    }

    /// The leaf identifier, or the collection word when the leaf is empty.
    pub fn name(&self) -> &str {
        fn or<'a>(id: &'a str, collection: &'static str) -> &'a str {
            if id.is_empty() {
                collection
            } else {
                id
            }
        }

        match self {
            Path::Root => "@",
            Path::Thing { thing } => or(thing, "things"),
            Path::ThingAttributes { attribute, .. } => or(attribute, "attributes"),
            Path::ThingMessages { .. } => "messages",
            Path::ThingFeatures { feature, .. } => or(feature, "features"),
            Path::ThingFeatureMessages { .. } => "messages",
            Path::ThingFeatureProperties { property, .. } => or(property, "properties"),
            Path::ThingFeatureDesired { property, .. } => or(property, "desired"),
            Path::ThingFeatureAttributes { attribute, .. } => or(attribute, "attributes"),
            Path::Device { device } => or(device, "devices"),
            Path::DeviceStatus { .. } => "status",
            Path::DeviceAttributes { attribute, .. } => or(attribute, "attributes"),
            Path::DeviceStrategys { strategy, .. } => or(strategy, "strategys"),
            Path::DeviceStrategyIndicators { indicator, .. } => or(indicator, "indicators"),
            Path::DeviceStrategyAttributes { attribute, .. } => or(attribute, "attributes"),
            Path::DeviceProfiles { profile, .. } => or(profile, "profiles"),
            Path::Connection { connection } => or(connection, "connections"),
            Path::ConnectionStatus { .. } => "status",
            Path::Stream { stream } => or(stream, "streams"),
            Path::StreamStatus { .. } => "status",
            Path::StreamVideos { .. } => "videos",
            Path::StreamAudios { .. } => "audios",
            Path::StreamSubscribers { .. } => "subscribers",
            Path::Features { feature } => or(feature, "features"),
            Path::FeatureProperties { property, .. } => or(property, "properties"),
            Path::FeatureDesired { property, .. } => or(property, "desired"),
            Path::FeatureAttributes { attribute, .. } => or(attribute, "attributes"),
            Path::Properties { property } => or(property, "properties"),
            Path::Desired { property } => or(property, "desired"),
            Path::Attributes { attribute } => or(attribute, "attributes"),
            Path::Strategys { strategy } => or(strategy, "strategys"),
            Path::StrategyIndicators { indicator, .. } => or(indicator, "indicators"),
            Path::StrategyAttributes { attribute, .. } => or(attribute, "attributes"),
            Path::Indicators { indicator } => or(indicator, "indicators"),
            Path::Profiles { profile } => or(profile, "profiles"),
            Path::Status => "status",
            Path::Videos => "videos",
            Path::Audios => "audios",
            Path::Subscribers => "subscribers",
        }
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

    /// True when the join matrix allows composing `target` onto `self`.
    pub fn is_parent_of(&self, target: &Path) -> bool {
        PathType::is_valid_join(self.kind(), target.kind())
    }

    /// Compose an unrooted path onto this one: the printed forms are joined
    /// (stripping the leading `@` of `other`) and the result reparsed, so a
    /// composition outside the grammar fails with [`PathError::Invalid`].
    pub fn join(&self, other: &Path) -> Result<Path, PathError> {
        let child = other.to_string();
        let child = child.strip_prefix('@').unwrap_or(&child);

        let joined = match self {
            Path::Root => format!("@{child}"),
            parent => format!("{parent}/{child}"),
        };

        joined.parse()
    }

    pub fn as_thing(&self) -> Option<&str> {
        match self {
            Path::Thing { thing } => Some(thing),
            _ => None,
        }
    }

    pub fn as_thing_attributes(&self) -> Option<(&str, &str)> {
        match self {
            Path::ThingAttributes { thing, attribute } => Some((thing, attribute)),
            _ => None,
        }
    }

    pub fn as_thing_messages(&self) -> Option<(&str, Direction, &str)> {
        match self {
            Path::ThingMessages {
                thing,
                direction,
                subject,
            } => Some((thing, *direction, subject)),
            _ => None,
        }
    }

    pub fn as_thing_features(&self) -> Option<(&str, &str)> {
        match self {
            Path::ThingFeatures { thing, feature } => Some((thing, feature)),
            _ => None,
        }
    }

    pub fn as_thing_feature_messages(&self) -> Option<(&str, &str, Direction, &str)> {
        match self {
            Path::ThingFeatureMessages {
                thing,
                feature,
                direction,
                subject,
            } => Some((thing, feature, *direction, subject)),
            _ => None,
        }
    }

    pub fn as_thing_feature_properties(&self) -> Option<(&str, &str, &str, bool)> {
        match self {
            Path::ThingFeatureProperties {
                thing,
                feature,
                property,
                timeseries,
            } => Some((thing, feature, property, *timeseries)),
            _ => None,
        }
    }

    pub fn as_thing_feature_desired(&self) -> Option<(&str, &str, &str)> {
        match self {
            Path::ThingFeatureDesired {
                thing,
                feature,
                property,
            } => Some((thing, feature, property)),
            _ => None,
        }
    }

    pub fn as_thing_feature_attributes(&self) -> Option<(&str, &str, &str)> {
        match self {
            Path::ThingFeatureAttributes {
                thing,
                feature,
                attribute,
            } => Some((thing, feature, attribute)),
            _ => None,
        }
    }

    pub fn as_device(&self) -> Option<&str> {
        match self {
            Path::Device { device } => Some(device),
            _ => None,
        }
    }

    pub fn as_device_status(&self) -> Option<&str> {
        match self {
            Path::DeviceStatus { device } => Some(device),
            _ => None,
        }
    }

    pub fn as_device_attributes(&self) -> Option<(&str, &str)> {
        match self {
            Path::DeviceAttributes { device, attribute } => Some((device, attribute)),
            _ => None,
        }
    }

    pub fn as_device_strategys(&self) -> Option<(&str, &str)> {
        match self {
            Path::DeviceStrategys { device, strategy } => Some((device, strategy)),
            _ => None,
        }
    }

    pub fn as_device_strategy_indicators(&self) -> Option<(&str, &str, &str, bool)> {
        match self {
            Path::DeviceStrategyIndicators {
                device,
                strategy,
                indicator,
                timeseries,
            } => Some((device, strategy, indicator, *timeseries)),
            _ => None,
        }
    }

    pub fn as_device_strategy_attributes(&self) -> Option<(&str, &str, &str)> {
        match self {
            Path::DeviceStrategyAttributes {
                device,
                strategy,
                attribute,
            } => Some((device, strategy, attribute)),
            _ => None,
        }
    }

    pub fn as_device_profiles(&self) -> Option<(&str, &str)> {
        match self {
            Path::DeviceProfiles { device, profile } => Some((device, profile)),
            _ => None,
        }
    }

    pub fn as_connection(&self) -> Option<&str> {
        match self {
            Path::Connection { connection } => Some(connection),
            _ => None,
        }
    }

    pub fn as_connection_status(&self) -> Option<&str> {
        match self {
            Path::ConnectionStatus { connection } => Some(connection),
            _ => None,
        }
    }

    pub fn as_stream(&self) -> Option<&str> {
        match self {
            Path::Stream { stream } => Some(stream),
            _ => None,
        }
    }

    pub fn as_stream_status(&self) -> Option<&str> {
        match self {
            Path::StreamStatus { stream } => Some(stream),
            _ => None,
        }
    }

    pub fn as_stream_videos(&self) -> Option<&str> {
        match self {
            Path::StreamVideos { stream } => Some(stream),
            _ => None,
        }
    }

    pub fn as_stream_audios(&self) -> Option<&str> {
        match self {
            Path::StreamAudios { stream } => Some(stream),
            _ => None,
        }
    }

    pub fn as_stream_subscribers(&self) -> Option<&str> {
        match self {
            Path::StreamSubscribers { stream } => Some(stream),
            _ => None,
        }
    }

    pub fn as_features(&self) -> Option<&str> {
        match self {
            Path::Features { feature } => Some(feature),
            _ => None,
        }
    }

    pub fn as_feature_properties(&self) -> Option<(&str, &str)> {
        match self {
            Path::FeatureProperties { feature, property } => Some((feature, property)),
            _ => None,
        }
    }

    pub fn as_feature_desired(&self) -> Option<(&str, &str)> {
        match self {
            Path::FeatureDesired { feature, property } => Some((feature, property)),
            _ => None,
        }
    }

    pub fn as_feature_attributes(&self) -> Option<(&str, &str)> {
        match self {
            Path::FeatureAttributes { feature, attribute } => Some((feature, attribute)),
            _ => None,
        }
    }

    pub fn as_properties(&self) -> Option<&str> {
        match self {
            Path::Properties { property } => Some(property),
            _ => None,
        }
    }

    pub fn as_desired(&self) -> Option<&str> {
        match self {
            Path::Desired { property } => Some(property),
            _ => None,
        }
    }

    pub fn as_attributes(&self) -> Option<&str> {
        match self {
            Path::Attributes { attribute } => Some(attribute),
            _ => None,
        }
    }

    pub fn as_strategys(&self) -> Option<&str> {
        match self {
            Path::Strategys { strategy } => Some(strategy),
            _ => None,
        }
    }

    pub fn as_strategy_indicators(&self) -> Option<(&str, &str)> {
        match self {
            Path::StrategyIndicators {
                strategy,
                indicator,
            } => Some((strategy, indicator)),
            _ => None,
        }
    }

    pub fn as_strategy_attributes(&self) -> Option<(&str, &str)> {
        match self {
            Path::StrategyAttributes {
                strategy,
                attribute,
            } => Some((strategy, attribute)),
            _ => None,
        }
    }

    pub fn as_indicators(&self) -> Option<&str> {
        match self {
            Path::Indicators { indicator } => Some(indicator),
            _ => None,
        }
    }

    pub fn as_profiles(&self) -> Option<&str> {
        match self {
            Path::Profiles { profile } => Some(profile),
            _ => None,
        }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Empty identifiers collapse to the nearest non-empty ancestor form.
        match self {
            Path::Root => f.write_str("@"),

            Path::Thing { thing } => match thing.as_str() {
                "" => f.write_str("@things"),
                thing => write!(f, "@things/{thing}"),
            },
            Path::ThingAttributes { thing, attribute } => match (thing.as_str(), attribute.as_str()) {
                ("", _) => f.write_str("@things"),
                (thing, "") => write!(f, "@things/{thing}/attributes"),
                (thing, attribute) => write!(f, "@things/{thing}/attributes/{attribute}"),
            },
            Path::ThingMessages {
                thing,
                direction,
                subject,
            } => {
                if thing.is_empty() || subject.is_empty() {
                    f.write_str("@things")
                } else {
                    write!(f, "@things/{thing}/messages/{direction}/{subject}")
                }
            }
            Path::ThingFeatures { thing, feature } => match (thing.as_str(), feature.as_str()) {
                ("", _) => f.write_str("@things"),
                (thing, "") => write!(f, "@things/{thing}/features"),
                (thing, feature) => write!(f, "@things/{thing}/features/{feature}"),
            },
            Path::ThingFeatureMessages {
                thing,
                feature,
                direction,
                subject,
            } => {
                if thing.is_empty() || feature.is_empty() || subject.is_empty() {
                    f.write_str("@things")
                } else {
                    write!(
                        f,
                        "@things/{thing}/features/{feature}/messages/{direction}/{subject}"
                    )
                }
            }
            Path::ThingFeatureProperties {
                thing,
                feature,
                property,
                timeseries,
            } => match (thing.as_str(), feature.as_str(), property.as_str()) {
                ("", _, _) => f.write_str("@things"),
                (thing, "", _) => write!(f, "@things/{thing}/features"),
                (thing, feature, "") => write!(f, "@things/{thing}/features/{feature}/properties"),
                (thing, feature, property) => {
                    if *timeseries {
                        write!(
                            f,
                            "@things/{thing}/features/{feature}/properties/{property}/timeseries"
                        )
                    } else {
                        write!(f, "@things/{thing}/features/{feature}/properties/{property}")
                    }
                }
            },
            Path::ThingFeatureDesired {
                thing,
                feature,
                property,
            } => match (thing.as_str(), feature.as_str(), property.as_str()) {
                ("", _, _) => f.write_str("@things"),
                (thing, "", _) => write!(f, "@things/{thing}/features"),
                (thing, feature, "") => write!(f, "@things/{thing}/features/{feature}/desired"),
                (thing, feature, property) => {
                    write!(f, "@things/{thing}/features/{feature}/desired/{property}")
                }
            },
            Path::ThingFeatureAttributes {
                thing,
                feature,
                attribute,
            } => match (thing.as_str(), feature.as_str(), attribute.as_str()) {
                ("", _, _) => f.write_str("@things"),
                (thing, "", _) => write!(f, "@things/{thing}/features"),
                (thing, feature, "") => write!(f, "@things/{thing}/features/{feature}/attributes"),
                (thing, feature, attribute) => {
                    write!(f, "@things/{thing}/features/{feature}/attributes/{attribute}")
                }
            },

            Path::Device { device } => match device.as_str() {
                "" => f.write_str("@devices"),
                device => write!(f, "@devices/{device}"),
            },
            Path::DeviceStatus { device } => match device.as_str() {
                "" => f.write_str("@devices"),
                device => write!(f, "@devices/{device}/status"),
            },
            Path::DeviceAttributes { device, attribute } => {
                match (device.as_str(), attribute.as_str()) {
                    ("", _) => f.write_str("@devices"),
                    (device, "") => write!(f, "@devices/{device}/attributes"),
                    (device, attribute) => write!(f, "@devices/{device}/attributes/{attribute}"),
                }
            }
            Path::DeviceStrategys { device, strategy } => {
                match (device.as_str(), strategy.as_str()) {
                    ("", _) => f.write_str("@devices"),
                    (device, "") => write!(f, "@devices/{device}/strategys"),
                    (device, strategy) => write!(f, "@devices/{device}/strategys/{strategy}"),
                }
            }
            Path::DeviceStrategyIndicators {
                device,
                strategy,
                indicator,
                timeseries,
            } => match (device.as_str(), strategy.as_str(), indicator.as_str()) {
                ("", _, _) => f.write_str("@devices"),
                (device, "", _) => write!(f, "@devices/{device}/strategys"),
                (device, strategy, "") => write!(f, "@devices/{device}/strategys/{strategy}"),
                (device, strategy, indicator) => {
                    if *timeseries {
                        write!(
                            f,
                            "@devices/{device}/strategys/{strategy}/indicators/{indicator}/timeseries"
                        )
                    } else {
                        write!(
                            f,
                            "@devices/{device}/strategys/{strategy}/indicators/{indicator}"
                        )
                    }
                }
            },
            Path::DeviceStrategyAttributes {
                device,
                strategy,
                attribute,
            } => match (device.as_str(), strategy.as_str(), attribute.as_str()) {
                ("", _, _) => f.write_str("@devices"),
                (device, "", _) => write!(f, "@devices/{device}/strategys"),
                (device, strategy, "") => {
                    write!(f, "@devices/{device}/strategys/{strategy}/attributes")
                }
                (device, strategy, attribute) => write!(
                    f,
                    "@devices/{device}/strategys/{strategy}/attributes/{attribute}"
                ),
            },
            Path::DeviceProfiles { device, profile } => {
                match (device.as_str(), profile.as_str()) {
                    ("", _) => f.write_str("@devices"),
                    (device, "") => write!(f, "@devices/{device}/profiles"),
                    (device, profile) => write!(f, "@devices/{device}/profiles/{profile}"),
                }
            }

            Path::Connection { connection } => match connection.as_str() {
                "" => f.write_str("@connections"),
                connection => write!(f, "@connections/{connection}"),
            },
            Path::ConnectionStatus { connection } => match connection.as_str() {
                "" => f.write_str("@connections"),
                connection => write!(f, "@connections/{connection}/status"),
            },

            Path::Stream { stream } => match stream.as_str() {
                "" => f.write_str("@streams"),
                stream => write!(f, "@streams/{stream}"),
            },
            Path::StreamStatus { stream } => match stream.as_str() {
                "" => f.write_str("@streams"),
                stream => write!(f, "@streams/{stream}/status"),
            },
            Path::StreamVideos { stream } => match stream.as_str() {
                "" => f.write_str("@streams"),
                stream => write!(f, "@streams/{stream}/videos"),
            },
            Path::StreamAudios { stream } => match stream.as_str() {
                "" => f.write_str("@streams"),
                stream => write!(f, "@streams/{stream}/audios"),
            },
            Path::StreamSubscribers { stream } => match stream.as_str() {
                "" => f.write_str("@streams"),
                stream => write!(f, "@streams/{stream}/subscribers"),
            },

            Path::Features { feature } => match feature.as_str() {
                "" => f.write_str("@features"),
                feature => write!(f, "@features/{feature}"),
            },
            Path::FeatureProperties { feature, property } => {
                match (feature.as_str(), property.as_str()) {
                    ("", _) => f.write_str("@features"),
                    (feature, "") => write!(f, "@features/{feature}/properties"),
                    (feature, property) => write!(f, "@features/{feature}/properties/{property}"),
                }
            }
            Path::FeatureDesired { feature, property } => {
                match (feature.as_str(), property.as_str()) {
                    ("", _) => f.write_str("@features"),
                    (feature, "") => write!(f, "@features/{feature}/desired"),
                    (feature, property) => write!(f, "@features/{feature}/desired/{property}"),
                }
            }
            Path::FeatureAttributes { feature, attribute } => {
                match (feature.as_str(), attribute.as_str()) {
                    ("", _) => f.write_str("@features"),
                    (feature, "") => write!(f, "@features/{feature}/attributes"),
                    (feature, attribute) => write!(f, "@features/{feature}/attributes/{attribute}"),
                }
            }

            Path::Properties { property } => match property.as_str() {
                "" => f.write_str("@properties"),
                property => write!(f, "@properties/{property}"),
            },
            Path::Desired { property } => match property.as_str() {
                "" => f.write_str("@desired"),
                property => write!(f, "@desired/{property}"),
            },
            Path::Attributes { attribute } => match attribute.as_str() {
                "" => f.write_str("@attributes"),
                attribute => write!(f, "@attributes/{attribute}"),
            },

            Path::Strategys { strategy } => match strategy.as_str() {
                "" => f.write_str("@strategys"),
                strategy => write!(f, "@strategys/{strategy}"),
            },
            Path::StrategyIndicators {
                strategy,
                indicator,
            } => match (strategy.as_str(), indicator.as_str()) {
                ("", _) => f.write_str("@strategys"),
                (strategy, "") => write!(f, "@strategys/{strategy}/indicators"),
                (strategy, indicator) => write!(f, "@strategys/{strategy}/indicators/{indicator}"),
            },
            Path::StrategyAttributes {
                strategy,
                attribute,
            } => match (strategy.as_str(), attribute.as_str()) {
                ("", _) => f.write_str("@strategys"),
                (strategy, "") => write!(f, "@strategys/{strategy}/attributes"),
                (strategy, attribute) => write!(f, "@strategys/{strategy}/attributes/{attribute}"),
            },

            Path::Indicators { indicator } => match indicator.as_str() {
                "" => f.write_str("@indicators"),
                indicator => write!(f, "@indicators/{indicator}"),
            },
            Path::Profiles { profile } => match profile.as_str() {
                "" => f.write_str("@profiles"),
                profile => write!(f, "@profiles/{profile}"),
            },

            Path::Status => f.write_str("@status"),
            Path::Videos => f.write_str("@videos"),
            Path::Audios => f.write_str("@audios"),
            Path::Subscribers => f.write_str("@subscribers"),
        }
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        match path {
            "@" => return Ok(Path::Root),
            "@status" => return Ok(Path::Status),
            "@videos" => return Ok(Path::Videos),
            "@audios" => return Ok(Path::Audios),
            "@subscribers" => return Ok(Path::Subscribers),
            _ => {}
        }

        if path.starts_with("@things") {
            parse_things(path)
        } else if path.starts_with("@devices") {
            parse_devices(path)
        } else if path.starts_with("@connections") {
            parse_connections(path)
        } else if path.starts_with("@streams") {
            parse_streams(path)
        } else if path.starts_with("@features") {
            parse_features(path)
        } else if path.starts_with("@properties") {
            parse_properties(path)
        } else if path.starts_with("@desired") {
            parse_desired(path)
        } else if path.starts_with("@attributes") {
            parse_attributes(path)
        } else if path.starts_with("@strategys") {
            parse_strategys(path)
        } else if path.starts_with("@indicators") {
            parse_indicators(path)
        } else if path.starts_with("@profiles") {
            parse_profiles(path)
        } else {
            Err(PathError::Invalid(path.to_string()))
        }
    }
}

fn branch_drift(entity: &'static str) -> PathError {
    log::warn!("path grammar drift: no parse branch selected for a {entity} path");
    PathError::ParseBranch(entity)
}

fn parse_things(path: &str) -> Result<Path, PathError> {
    let captures = THINGS_REGEX
        .captures(path)
        .ok_or_else(|| PathError::Invalid(path.to_string()))?;
    let group = |i| captures.get(i).map_or("", |m: regex::Match| m.as_str());
    let thing = group(2).to_string();

    if group(24) == "attributes" {
        return Ok(Path::ThingAttributes {
            thing,
            attribute: group(26).to_string(),
        });
    }
    if group(4) == "features" {
        let direction =
            Direction::parse(group(7)).ok_or_else(|| branch_drift("things"))?;
        return Ok(Path::ThingFeatureMessages {
            thing,
            feature: group(5).to_string(),
            direction,
            subject: group(8).to_string(),
        });
    }
    if group(9) == "features" {
        if group(13) == "properties" {
            return Ok(Path::ThingFeatureProperties {
                thing,
                feature: group(11).to_string(),
                property: group(15).to_string(),
                timeseries: group(16) == "timeseries",
            });
        }
        return Ok(Path::ThingFeatures {
            thing,
            feature: group(11).to_string(),
        });
    }
    if group(17) == "features" {
        let feature = group(19).to_string();
        return match group(21) {
            "properties" => Ok(Path::ThingFeatureProperties {
                thing,
                feature,
                property: group(23).to_string(),
                timeseries: false,
            }),
            "desired" => Ok(Path::ThingFeatureDesired {
                thing,
                feature,
                property: group(23).to_string(),
            }),
            "attributes" => Ok(Path::ThingFeatureAttributes {
                thing,
                feature,
                attribute: group(23).to_string(),
            }),
            _ => Ok(Path::ThingFeatures { thing, feature }),
        };
    }
    if group(27) == "messages" {
        let direction =
            Direction::parse(group(28)).ok_or_else(|| branch_drift("things"))?;
        return Ok(Path::ThingMessages {
            thing,
            direction,
            subject: group(29).to_string(),
        });
    }

    Ok(Path::Thing { thing })
}

fn parse_devices(path: &str) -> Result<Path, PathError> {
    let captures = DEVICES_REGEX
        .captures(path)
        .ok_or_else(|| PathError::Invalid(path.to_string()))?;
    let group = |i| captures.get(i).map_or("", |m: regex::Match| m.as_str());
    let device = group(2).to_string();

    if group(4) == "status" {
        return Ok(Path::DeviceStatus { device });
    }
    if group(14) == "attributes" {
        return Ok(Path::DeviceAttributes {
            device,
            attribute: group(16).to_string(),
        });
    }
    if group(5) == "strategys" {
        let strategy = group(7).to_string();
        return match group(9) {
            "indicators" => Ok(Path::DeviceStrategyIndicators {
                device,
                strategy,
                indicator: group(11).to_string(),
                timeseries: group(13) == "timeseries",
            }),
            "attributes" => Ok(Path::DeviceStrategyAttributes {
                device,
                strategy,
                attribute: group(11).to_string(),
            }),
            _ => Ok(Path::DeviceStrategys { device, strategy }),
        };
    }
    if group(17) == "profiles" {
        return Ok(Path::DeviceProfiles {
            device,
            profile: group(19).to_string(),
        });
    }

    Ok(Path::Device { device })
}

fn parse_connections(path: &str) -> Result<Path, PathError> {
    let captures = CONNECTIONS_REGEX
        .captures(path)
        .ok_or_else(|| PathError::Invalid(path.to_string()))?;
    let group = |i| captures.get(i).map_or("", |m: regex::Match| m.as_str());
    let connection = group(2).to_string();

    if group(4) == "status" {
        return Ok(Path::ConnectionStatus { connection });
    }
    Ok(Path::Connection { connection })
}

fn parse_streams(path: &str) -> Result<Path, PathError> {
    let captures = STREAMS_REGEX
        .captures(path)
        .ok_or_else(|| PathError::Invalid(path.to_string()))?;
    let group = |i| captures.get(i).map_or("", |m: regex::Match| m.as_str());
    let stream = group(2).to_string();

    match group(4) {
        "status" => Ok(Path::StreamStatus { stream }),
        "videos" => Ok(Path::StreamVideos { stream }),
        "audios" => Ok(Path::StreamAudios { stream }),
        "subscribers" => Ok(Path::StreamSubscribers { stream }),
        _ => Ok(Path::Stream { stream }),
    }
}

fn parse_features(path: &str) -> Result<Path, PathError> {
    let captures = FEATURES_REGEX
        .captures(path)
        .ok_or_else(|| PathError::Invalid(path.to_string()))?;
    let group = |i| captures.get(i).map_or("", |m: regex::Match| m.as_str());
    let feature = group(3).to_string();

    match group(5) {
        "properties" => Ok(Path::FeatureProperties {
            feature,
            property: group(7).to_string(),
        }),
        "desired" => Ok(Path::FeatureDesired {
            feature,
            property: group(7).to_string(),
        }),
        "attributes" => Ok(Path::FeatureAttributes {
            feature,
            attribute: group(7).to_string(),
        }),
        _ => Ok(Path::Features { feature }),
    }
}

fn parse_properties(path: &str) -> Result<Path, PathError> {
    let captures = PROPERTIES_REGEX
        .captures(path)
        .ok_or_else(|| PathError::Invalid(path.to_string()))?;
    let group = |i| captures.get(i).map_or("", |m: regex::Match| m.as_str());

    Ok(Path::Properties {
        property: group(3).to_string(),
    })
}

fn parse_desired(path: &str) -> Result<Path, PathError> {
    let captures = DESIRED_REGEX
        .captures(path)
        .ok_or_else(|| PathError::Invalid(path.to_string()))?;
    let group = |i| captures.get(i).map_or("", |m: regex::Match| m.as_str());

    Ok(Path::Desired {
        property: group(3).to_string(),
    })
}

fn parse_attributes(path: &str) -> Result<Path, PathError> {
    let captures = ATTRIBUTES_REGEX
        .captures(path)
        .ok_or_else(|| PathError::Invalid(path.to_string()))?;
    let group = |i| captures.get(i).map_or("", |m: regex::Match| m.as_str());

    Ok(Path::Attributes {
        attribute: group(3).to_string(),
    })
}

fn parse_strategys(path: &str) -> Result<Path, PathError> {
    let captures = STRATEGYS_REGEX
        .captures(path)
        .ok_or_else(|| PathError::Invalid(path.to_string()))?;
    let group = |i| captures.get(i).map_or("", |m: regex::Match| m.as_str());
    let strategy = group(3).to_string();

    match group(5) {
        "indicators" => Ok(Path::StrategyIndicators {
            strategy,
            indicator: group(7).to_string(),
        }),
        "attributes" => Ok(Path::StrategyAttributes {
            strategy,
            attribute: group(7).to_string(),
        }),
        _ => Ok(Path::Strategys { strategy }),
    }
}

fn parse_indicators(path: &str) -> Result<Path, PathError> {
    let captures = INDICATORS_REGEX
        .captures(path)
        .ok_or_else(|| PathError::Invalid(path.to_string()))?;
    let group = |i| captures.get(i).map_or("", |m: regex::Match| m.as_str());

    Ok(Path::Indicators {
        indicator: group(3).to_string(),
    })
}

fn parse_profiles(path: &str) -> Result<Path, PathError> {
    let captures = PROFILES_REGEX
        .captures(path)
        .ok_or_else(|| PathError::Invalid(path.to_string()))?;
    let group = |i| captures.get(i).map_or("", |m: regex::Match| m.as_str());

    Ok(Path::Profiles {
        profile: group(3).to_string(),
    })
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let path = String::deserialize(deserializer)?;
        path.parse().map_err(serde::de::Error::custom)
    }
}

/// A list of paths, serialised as a JSON array of canonical strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathList(pub Vec<Path>);

/// Match `value` against a `*`-wildcard pattern: non-`*` runs are taken
/// literally, each `*` matches any run, and the pattern covers the whole
/// value.
pub(crate) fn glob_match(pattern: &str, value: &str) -> bool {
    let mut expression = String::from("^");
    for (i, literal) in pattern.split('*').enumerate() {
        if i > 0 {
            expression.push_str(".*");
        }
        expression.push_str(&regex::escape(literal));
    }
    expression.push('$');

    Regex::new(&expression)
        .expect("escaped wildcard patterns are valid regexes")
        .is_match(value)
}
