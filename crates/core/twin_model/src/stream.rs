//! A media stream's twin: state, track metadata and subscriber set.

use crate::Jsonify;
use crate::Metadata;
use crate::Subscriber;
use crate::Subscribers;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Open,
    Closed,
    Idle,
    Failed,
    #[default]
    Unknown,
}

impl Display for StreamStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            StreamStatus::Open => "open",
            StreamStatus::Closed => "closed",
            StreamStatus::Idle => "idle",
            StreamStatus::Failed => "failed",
            StreamStatus::Unknown => "unknown",
        };
        f.write_str(status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub name: String,
    pub status: StreamStatus,
    #[serde(default)]
    pub videos: Metadata,
    #[serde(default)]
    pub audios: Metadata,
    #[serde(default)]
    pub subscribers: Subscribers,
}

impl Jsonify for Stream {}

impl Stream {
    pub fn new(name: impl Into<String>) -> Self {
        Stream {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_status(mut self, status: StreamStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_video_metadata(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.videos.insert(id.into(), value.into());
        self
    }

    pub fn with_video_metadatas(mut self, videos: Metadata) -> Self {
        self.videos = videos;
        self
    }

    pub fn with_audio_metadata(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.audios.insert(id.into(), value.into());
        self
    }

    pub fn with_audio_metadatas(mut self, audios: Metadata) -> Self {
        self.audios = audios;
        self
    }

    pub fn with_subscribers(mut self, subscribers: Subscribers) -> Self {
        self.subscribers = subscribers;
        self
    }

    pub fn with_subscriber(mut self, id: impl Into<String>, subscriber: Subscriber) -> Self {
        self.subscribers.insert(id.into(), subscriber);
        self
    }
}
