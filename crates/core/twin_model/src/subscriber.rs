//! A stream subscriber: protocol, state and session times.

use crate::Jsonify;
use crate::StreamStatus;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

pub type Subscribers = HashMap<String, Subscriber>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub protocol: String,
    pub status: StreamStatus,
    pub subscribe_at: i64,
    pub close_at: i64,
}

impl Jsonify for Subscriber {}

impl Subscriber {
    pub fn new(protocol: impl Into<String>) -> Self {
        Subscriber {
            protocol: protocol.into(),
            ..Default::default()
        }
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn with_status(mut self, status: StreamStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_subscribe_at(mut self, subscribe_at: i64) -> Self {
        self.subscribe_at = subscribe_at;
        self
    }

    pub fn with_close_at(mut self, close_at: i64) -> Self {
        self.close_at = close_at;
        self
    }
}
