//! A named sub-component of a thing: measured metrics plus descriptive
//! dimensions.

use crate::Dimensions;
use crate::Jsonify;
use crate::Metrics;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

pub type FeatureList = HashMap<String, Feature>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default, skip_serializing_if = "Metrics::is_empty")]
    pub metrics: Metrics,
    #[serde(default, skip_serializing_if = "Dimensions::is_empty")]
    pub dimensions: Dimensions,
}

impl Jsonify for Feature {}

impl Feature {
    pub fn new(name: impl Into<String>) -> Self {
        Feature {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_metric(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metrics.insert(id.into(), value.into());
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_dimension(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.insert(id.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use maplit::hashmap;
    use serde_json::json;

    #[test]
    fn metrics_and_dimensions_serialise_under_their_own_keys() {
        let feature = Feature::new("temp")
            .with_metric("value", 21.5)
            .with_metric("window", json!([1, 2, 3]))
            .with_dimensions(hashmap! {"unit".to_string() => "celsius".to_string()});

        assert_json_eq!(
            feature.to_value(),
            json!({
                "name": "temp",
                "metrics": {"value": 21.5, "window": [1, 2, 3]},
                "dimensions": {"unit": "celsius"},
            })
        );
    }

    #[test]
    fn json_round_trip() {
        let feature = Feature::new("temp").with_metric("value", 21.5);
        let back = Feature::from_json(&feature.to_json()).unwrap();
        assert_eq!(back, feature);
    }
}
