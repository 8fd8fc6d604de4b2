//! The twin of a physical or logical entity: named attributes plus a set of
//! features.

use crate::Dimensions;
use crate::Feature;
use crate::FeatureList;
use crate::Jsonify;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    pub name: String,
    #[serde(default, skip_serializing_if = "Dimensions::is_empty")]
    pub attributes: Dimensions,
    #[serde(default, skip_serializing_if = "FeatureList::is_empty")]
    pub features: FeatureList,
    #[serde(default, skip_serializing_if = "crate::is_zero")]
    pub revision: i64,
}

impl Jsonify for Thing {}

impl Thing {
    pub fn new(name: impl Into<String>) -> Self {
        Thing {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_revision(mut self, revision: i64) -> Self {
        self.revision = revision;
        self
    }

    pub fn with_attributes(mut self, attributes: Dimensions) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_attribute(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(id.into(), value.into());
        self
    }

    pub fn with_features(mut self, features: FeatureList) -> Self {
        self.features = features;
        self
    }

    pub fn with_feature(mut self, id: impl Into<String>, feature: Feature) -> Self {
        self.features.insert(id.into(), feature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn empty_collections_are_not_emitted() {
        let thing = Thing::new("t1");
        assert_json_eq!(thing.to_value(), json!({"name": "t1"}));
    }

    #[test]
    fn builds_a_full_twin() {
        let thing = Thing::new("t1")
            .with_revision(3)
            .with_attribute("site", "plant-7")
            .with_feature("temp", Feature::new("temp").with_metric("value", 21.5));

        assert_json_eq!(
            thing.to_value(),
            json!({
                "name": "t1",
                "attributes": {"site": "plant-7"},
                "features": {"temp": {"name": "temp", "metrics": {"value": 21.5}}},
                "revision": 3,
            })
        );
    }

    #[test]
    fn json_round_trip() {
        let thing = Thing::new("t1")
            .with_attribute("site", "plant-7")
            .with_feature("temp", Feature::new("temp"));

        let back = Thing::from_json(&thing.to_json()).unwrap();
        assert_eq!(back, thing);
    }
}
