//! A transport connection's twin: its lifecycle state and tags.

use crate::Jsonify;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityStatus {
    Open,
    Closed,
    Failed,
    #[default]
    Unknown,
}

impl Display for ConnectivityStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            ConnectivityStatus::Open => "open",
            ConnectivityStatus::Closed => "closed",
            ConnectivityStatus::Failed => "failed",
            ConnectivityStatus::Unknown => "unknown",
        };
        f.write_str(status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub name: String,
    pub status: ConnectivityStatus,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Jsonify for Connection {}

impl Connection {
    pub fn new(name: impl Into<String>) -> Self {
        Connection {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_status(mut self, status: ConnectivityStatus) -> Self {
        self.status = status;
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
