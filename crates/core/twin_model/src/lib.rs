//! Domain payload shapes for the twin control plane.
//!
//! These are the JSON bodies carried opaquely inside envelopes: twins
//! ([`Thing`], [`Feature`]), the device plane ([`Device`], [`Product`],
//! [`Strategy`]), connectivity ([`Connection`]), media ([`Stream`],
//! [`Subscriber`]) and time series ([`SeriesPoint`]). Their semantics (what
//! "healthy" means, when a stream goes idle) belong to the backend; this
//! crate only pins the wire schemas.

#![forbid(unsafe_code)]

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

pub mod connection;
pub mod device;
pub mod feature;
pub mod product;
pub mod series;
pub mod strategy;
pub mod stream;
pub mod subscriber;
pub mod thing;

pub use connection::Connection;
pub use connection::ConnectivityStatus;
pub use device::Device;
pub use device::HealthStatus;
pub use feature::Feature;
pub use feature::FeatureList;
pub use product::DeviceType;
pub use product::Product;
pub use series::Series;
pub use series::SeriesPoint;
pub use strategy::Strategy;
pub use strategy::StrategyList;
pub use stream::Stream;
pub use stream::StreamStatus;
pub use subscriber::Subscriber;
pub use subscriber::Subscribers;

/// Measured values keyed by metric name; values are arbitrary JSON.
pub type Metrics = serde_json::Map<String, Value>;

/// Descriptive string-valued labels.
pub type Dimensions = HashMap<String, String>;

/// Free-form media metadata.
pub type Metadata = serde_json::Map<String, Value>;

/// All the models are serialised using json.
pub trait Jsonify {
    fn from_json(json_str: &str) -> Result<Self, serde_json::Error>
    where
        Self: DeserializeOwned,
    {
        serde_json::from_str(json_str)
    }

    fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error>
    where
        Self: DeserializeOwned,
    {
        serde_json::from_slice(bytes)
    }

    fn to_value(&self) -> Value
    where
        Self: Serialize,
    {
        serde_json::to_value(self).unwrap() // all twin models can be serialized to json
    }

    fn to_json(&self) -> String
    where
        Self: Serialize,
    {
        serde_json::to_string(self).unwrap() // all twin models can be serialized to json
    }
}

pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}
