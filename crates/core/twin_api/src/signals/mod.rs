//! The signal algebra: five typed builders over the envelope.
//!
//! Each signal fixes its topic criterion at construction, exposes fluent
//! path setters delegating to the [`Path`](crate::path::Path) constructors,
//! and materialises an [`Envelope`](crate::envelope::Envelope) with
//! `envelope(header_opts)`. The inverse direction is `TryFrom<&Envelope>`,
//! which verifies the criterion and decodes typed payloads.

use crate::path::PathType;
use crate::topic::Topic;
use crate::topic::TopicCriterion;
use std::fmt::Display;
use std::fmt::Formatter;

pub mod alarm;
pub mod command;
pub mod errors;
pub mod event;
pub mod message;
pub mod payload;

pub use alarm::Alarm;
pub use command::Command;
pub use errors::Errors;
pub use event::Event;
pub use message::Message;
pub use payload::AlarmPayload;
pub use payload::AlarmSeverity;
pub use payload::ErrorPayload;
pub use payload::EventPayload;
pub use payload::EventType;
pub use payload::PayloadError;

// Header opts are applied at envelope materialisation; re-exported here so
// signal call sites read as one vocabulary.
pub use crate::headers::with_channel;
pub use crate::headers::with_content_type;
pub use crate::headers::with_correlation_id;
pub use crate::headers::with_dry_run;
pub use crate::headers::with_etag;
pub use crate::headers::with_generic;
pub use crate::headers::with_if_match;
pub use crate::headers::with_if_none_match;
pub use crate::headers::with_origin;
pub use crate::headers::with_originator;
pub use crate::headers::with_reply_target;
pub use crate::headers::with_reply_to;
pub use crate::headers::with_response_required;
pub use crate::headers::with_schema_version;
pub use crate::headers::with_timeout;
pub use crate::headers::HeaderOpt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalType {
    Command,
    Event,
    Alarm,
    Message,
    Errors,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Command => "command",
            SignalType::Event => "event",
            SignalType::Alarm => "alarm",
            SignalType::Message => "message",
            SignalType::Errors => "errors",
        }
    }
}

impl Display for SignalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The surface every signal variant shares.
pub trait Signal {
    fn signal_type(&self) -> SignalType;

    fn topic(&self) -> &Topic;

    fn path(&self) -> &crate::path::Path;
}

#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("Envelope criterion is {actual}, expected {expected}")]
    WrongCriterion {
        expected: TopicCriterion,
        actual: TopicCriterion,
    },

    #[error("Envelope path addresses {0}, not a thing or feature message")]
    NotAMessagePath(PathType),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

pub(crate) fn expect_criterion(
    topic: &Topic,
    expected: TopicCriterion,
) -> Result<(), SignalError> {
    if topic.criterion == expected {
        Ok(())
    } else {
        Err(SignalError::WrongCriterion {
            expected,
            actual: topic.criterion,
        })
    }
}
