//! Product metadata: what a device is, who makes it and how it speaks.

use crate::Jsonify;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Gateway,
    Sensor,
    Plc,
    Dcs,
    Dcm,
    Dtu,
    Rtu,
    Camera,
    Machine,
    Edge,
    #[default]
    Unknown,
}

impl Display for DeviceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let device_type = match self {
            DeviceType::Gateway => "gateway",
            DeviceType::Sensor => "sensor",
            DeviceType::Plc => "plc",
            DeviceType::Dcs => "dcs",
            DeviceType::Dcm => "dcm",
            DeviceType::Dtu => "dtu",
            DeviceType::Rtu => "rtu",
            DeviceType::Camera => "camera",
            DeviceType::Machine => "machine",
            DeviceType::Edge => "edge",
            DeviceType::Unknown => "unknown",
        };
        f.write_str(device_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub product: String,
    pub manufacturer: String,
    pub r#type: DeviceType,
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub firmware: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transport: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Jsonify for Product {}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Product {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    pub fn with_type(mut self, device_type: DeviceType) -> Self {
        self.r#type = device_type;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_firmware(mut self, firmware: impl Into<String>) -> Self {
        self.firmware = firmware.into();
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn with_transport(mut self, transport: impl Into<String>) -> Self {
        self.transport = transport.into();
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags.extend(tags);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn serialises_the_full_product_sheet() {
        let product = Product::new("edge-gw")
            .with_product("EG-200")
            .with_manufacturer("flywave")
            .with_type(DeviceType::Gateway)
            .with_version("2.4")
            .with_firmware("fw-2.4.1")
            .with_protocol("modbus")
            .with_transport("tcp")
            .with_tag("outdoor");

        assert_json_eq!(
            product.to_value(),
            json!({
                "name": "edge-gw",
                "product": "EG-200",
                "manufacturer": "flywave",
                "type": "gateway",
                "version": "2.4",
                "firmware": "fw-2.4.1",
                "protocol": "modbus",
                "transport": "tcp",
                "tags": ["outdoor"],
            })
        );
    }

    #[test]
    fn optional_fields_are_elided_when_empty() {
        let value = Product::new("edge-gw").to_value();
        assert_eq!(value.get("firmware"), None);
        assert_eq!(value.get("protocol"), None);
        assert_eq!(value.get("transport"), None);
        assert_eq!(value["type"], json!("unknown"));
        assert_eq!(value["tags"], json!([]));
    }

    #[test]
    fn json_round_trip() {
        let product = Product::new("edge-gw")
            .with_type(DeviceType::Camera)
            .with_tags(["ptz".to_string(), "outdoor".to_string()]);

        let back = Product::from_json(&product.to_json()).unwrap();
        assert_eq!(back, product);
    }
}
