//! Wire-level addressing and signalling for a digital-twin fleet control plane.
//!
//! Envelopes carry a [`Topic`] (who a signal concerns: tenant, channel, entity
//! kind, criterion, action) and a [`Path`] (what inside that entity: a feature
//! property, a strategy indicator, a stream's subscriber set, ...). The
//! [`signals`] module layers five typed builders on top — commands, events,
//! alarms, messages and errors — each producing an [`Envelope`] with the
//! correct topic criterion and path shape.
//!
//! The crate is pure and synchronous: parsing, printing and marshalling are
//! thread-safe by immutability, and the only blocking surface is the
//! transport-agnostic [`Client`] seam.

#![forbid(unsafe_code)]

pub mod client;
pub mod envelope;
pub mod headers;
pub mod path;
pub mod placeholders;
pub mod signals;
pub mod topic;

#[cfg(feature = "rusqlite")]
mod sqlite;

pub use client::Client;
pub use client::Handler;
pub use client::TransportError;
pub use envelope::Envelope;
pub use envelope::LegacyEnvelope;
pub use headers::HeaderOpt;
pub use headers::Headers;
pub use path::Direction;
pub use path::Path;
pub use path::PathError;
pub use path::PathList;
pub use path::PathType;
pub use topic::EntityType;
pub use topic::Topic;
pub use topic::TopicAction;
pub use topic::TopicCriterion;
pub use topic::TopicError;
pub use topic::TopicList;
