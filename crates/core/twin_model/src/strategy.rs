//! A device's policy-configured measurement plan and the indicators it
//! emits.

use crate::Dimensions;
use crate::Jsonify;
use crate::Metrics;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

pub type StrategyList = HashMap<String, Strategy>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    #[serde(default, skip_serializing_if = "Dimensions::is_empty")]
    pub attributes: Dimensions,
    #[serde(default, skip_serializing_if = "Metrics::is_empty")]
    pub indicators: Metrics,
}

impl Jsonify for Strategy {}

impl Strategy {
    pub fn new(name: impl Into<String>) -> Self {
        Strategy {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
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

    pub fn with_indicators(mut self, indicators: Metrics) -> Self {
        self.indicators = indicators;
        self
    }

    pub fn with_indicator(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.indicators.insert(id.into(), value.into());
        self
    }
}
