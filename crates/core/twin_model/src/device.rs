//! The device plane twin: identity, product metadata, measurement
//! strategies and health.

use crate::Dimensions;
use crate::Jsonify;
use crate::Product;
use crate::Strategy;
use crate::StrategyList;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    #[default]
    Unactivated,
    Unhealthy,
    Healthy,
    Offline,
}

impl Display for HealthStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            HealthStatus::Unactivated => "unactivated",
            HealthStatus::Unhealthy => "unhealthy",
            HealthStatus::Healthy => "healthy",
            HealthStatus::Offline => "offline",
        };
        f.write_str(status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub serial_number: String,
    // `profile` is the wire key for the product metadata block
    #[serde(rename = "profile", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(default, skip_serializing_if = "StrategyList::is_empty")]
    pub strategys: StrategyList,
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Dimensions::is_empty")]
    pub attributes: Dimensions,
}

impl Jsonify for Device {}

impl Device {
    pub fn new(name: impl Into<String>) -> Self {
        Device {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = serial_number.into();
        self
    }

    pub fn with_status(mut self, status: HealthStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.product = Some(product);
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

    pub fn with_strategys(mut self, strategys: StrategyList) -> Self {
        self.strategys = strategys;
        self
    }

    pub fn with_strategy(mut self, id: impl Into<String>, strategy: Strategy) -> Self {
        self.strategys.insert(id.into(), strategy);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeviceType;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn a_fresh_device_is_unactivated() {
        let device = Device::new("d1").with_serial_number("SN-001");
        assert_json_eq!(
            device.to_value(),
            json!({"name": "d1", "serial_number": "SN-001", "status": "unactivated"})
        );
    }

    #[test]
    fn product_metadata_is_carried_under_the_profile_key() {
        let device = Device::new("d1")
            .with_status(HealthStatus::Healthy)
            .with_product(
                Product::new("edge-gw")
                    .with_manufacturer("flywave")
                    .with_type(DeviceType::Gateway),
            );

        let value = device.to_value();
        assert_eq!(value["profile"]["manufacturer"], json!("flywave"));
        assert_eq!(value["profile"]["type"], json!("gateway"));
        assert_eq!(value["status"], json!("healthy"));
    }

    #[test]
    fn json_round_trip_with_strategies() {
        let device = Device::new("d1")
            .with_serial_number("SN-001")
            .with_status(HealthStatus::Unhealthy)
            .with_attribute("rack", "b-12")
            .with_strategy("sampling", Strategy::new("sampling").with_indicator("rate", 10));

        let back = Device::from_json(&device.to_json()).unwrap();
        assert_eq!(back, device);
    }

    #[test_case(HealthStatus::Unactivated, "unactivated")]
    #[test_case(HealthStatus::Unhealthy, "unhealthy")]
    #[test_case(HealthStatus::Healthy, "healthy")]
    #[test_case(HealthStatus::Offline, "offline")]
    fn health_statuses_use_their_wire_literals(status: HealthStatus, literal: &str) {
        assert_eq!(serde_json::to_value(status).unwrap(), json!(literal));
        let back: HealthStatus = serde_json::from_value(json!(literal)).unwrap();
        assert_eq!(back, status);
    }
}
