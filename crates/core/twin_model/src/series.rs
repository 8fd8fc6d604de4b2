//! Time-series points as they travel on timeseries paths.

use crate::Jsonify;
use crate::Metrics;
use clock::Timestamp;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(default, with = "clock::serde::datetime_opt")]
    pub time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Metrics::is_empty")]
    pub metrics: Metrics,
}

impl Jsonify for SeriesPoint {}

impl SeriesPoint {
    pub fn new(time: Timestamp) -> Self {
        SeriesPoint {
            time: Some(time),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_attribute(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(id.into(), value.into());
        self
    }

    pub fn with_metric(
        mut self,
        id: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metrics.insert(id.into(), value.into());
        self
    }
}

/// A run of points over one path, ordered by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(pub Vec<SeriesPoint>);

impl Jsonify for Series {}

impl Series {
    pub fn push(&mut self, point: SeriesPoint) {
        self.0.push(point);
    }

    pub fn sort_by_time(&mut self) {
        self.0.sort_by_key(|point| point.time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn serialises_with_the_wire_time_literal() {
        let point = SeriesPoint::new(datetime!(2023-04-05 06:07:08.25 UTC))
            .with_path("@things/t1/features/f1/properties/humidity/timeseries")
            .with_attribute("unit", "percent")
            .with_metric("humidity", 54.2);

        assert_json_eq!(
            point.to_value(),
            json!({
                "time": "2023-04-05 06:07:08.25",
                "path": "@things/t1/features/f1/properties/humidity/timeseries",
                "attributes": {"unit": "percent"},
                "metrics": {"humidity": 54.2},
            })
        );
    }

    #[test]
    fn json_round_trip() {
        let point = SeriesPoint::new(datetime!(2023-04-05 06:07:08 UTC)).with_metric("rate", 10);
        let back = SeriesPoint::from_json(&point.to_json()).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn series_sort_orders_points_by_time() {
        let mut series = Series::default();
        series.push(SeriesPoint::new(datetime!(2023-04-05 06:07:10 UTC)));
        series.push(SeriesPoint::new(datetime!(2023-04-05 06:07:08 UTC)));
        series.push(SeriesPoint::new(datetime!(2023-04-05 06:07:09 UTC)));

        series.sort_by_time();

        let seconds: Vec<u8> = series.0.iter().map(|p| p.time.unwrap().second()).collect();
        assert_eq!(seconds, [8, 9, 10]);
    }
}
