//! Envelope headers: an open, insertion-preserving map of JSON values with a
//! set of reserved, case-sensitive keys.
//!
//! Typed accessors return the typed zero value when a key is absent or holds
//! a value of the wrong dynamic type; unknown keys round-trip verbatim.
//! Headers are materialised through [`HeaderOpt`] builder functions:
//!
//! ```
//! use twin_api::headers::{with_correlation_id, with_response_required, Headers};
//!
//! let headers = Headers::build([
//!     with_correlation_id("c1"),
//!     with_response_required(true),
//! ])
//! .unwrap();
//! assert_eq!(headers.correlation_id(), "c1");
//! assert!(headers.is_response_required());
//! assert_eq!(headers.origin(), "");
//! ```

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

pub const CORRELATION_ID: &str = "correlation-id";
pub const RESPONSE_REQUIRED: &str = "response-required";
pub const CHANNEL: &str = "channel";
pub const DRY_RUN: &str = "dry-run";
pub const ORIGIN: &str = "origin";
pub const ORIGINATOR: &str = "originator";
pub const ETAG: &str = "ETag";
pub const IF_MATCH: &str = "If-Match";
pub const IF_NONE_MATCH: &str = "If-None-Match";
pub const REPLY_TARGET: &str = "reply-target";
pub const REPLY_TO: &str = "reply-to";
pub const TIMEOUT: &str = "timeout";
pub const SCHEMA_VERSION: &str = "version";
pub const CONTENT_TYPE: &str = "content-type";
pub const STATUS: &str = "status";
pub const MESSAGE_SUBJECT: &str = "flywave-message-subject";
pub const MESSAGE_ID: &str = "flywave-message-id";
pub const MESSAGE_DIRECTION: &str = "flywave-message-direction";
pub const MESSAGE_THING_ID: &str = "flywave-message-thing-id";
pub const MESSAGE_FEATURE_ID: &str = "flywave-message-feature-id";

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("Header value for {key:?} cannot be represented as JSON: {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// An open string-keyed header map. Keys keep their insertion order across
/// round trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    values: Map<String, Value>,
}

impl Headers {
    pub fn new() -> Self {
        Headers::default()
    }

    /// Materialise headers from builder opts. A failing opt yields `None`,
    /// never a partial map.
    pub fn build(opts: impl IntoIterator<Item = HeaderOpt>) -> Option<Headers> {
        Headers::new().apply_all(opts)
    }

    /// Copy `orig`, then apply the opts on top.
    pub fn build_from(orig: &Headers, opts: impl IntoIterator<Item = HeaderOpt>) -> Option<Headers> {
        orig.clone().apply_all(opts)
    }

    fn apply_all(mut self, opts: impl IntoIterator<Item = HeaderOpt>) -> Option<Headers> {
        for opt in opts {
            opt.apply(&mut self).ok()?;
        }
        Some(self)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> + '_ {
        self.values.iter()
    }

    fn str_value(&self, key: &str) -> &str {
        self.values.get(key).and_then(Value::as_str).unwrap_or("")
    }

    fn bool_value(&self, key: &str) -> bool {
        self.values
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn i64_value(&self, key: &str) -> i64 {
        self.values.get(key).and_then(Value::as_i64).unwrap_or(0)
    }

    pub fn correlation_id(&self) -> &str {
        self.str_value(CORRELATION_ID)
    }

    pub fn is_response_required(&self) -> bool {
        self.bool_value(RESPONSE_REQUIRED)
    }

    pub fn channel(&self) -> &str {
        self.str_value(CHANNEL)
    }

    pub fn is_dry_run(&self) -> bool {
        self.bool_value(DRY_RUN)
    }

    pub fn origin(&self) -> &str {
        self.str_value(ORIGIN)
    }

    pub fn originator(&self) -> &str {
        self.str_value(ORIGINATOR)
    }

    pub fn etag(&self) -> &str {
        self.str_value(ETAG)
    }

    pub fn if_match(&self) -> &str {
        self.str_value(IF_MATCH)
    }

    pub fn if_none_match(&self) -> &str {
        self.str_value(IF_NONE_MATCH)
    }

    pub fn reply_target(&self) -> i64 {
        self.i64_value(REPLY_TARGET)
    }

    pub fn reply_to(&self) -> &str {
        self.str_value(REPLY_TO)
    }

    pub fn timeout(&self) -> &str {
        self.str_value(TIMEOUT)
    }

    pub fn version(&self) -> i64 {
        self.i64_value(SCHEMA_VERSION)
    }

    pub fn content_type(&self) -> &str {
        self.str_value(CONTENT_TYPE)
    }

    pub fn message_subject(&self) -> &str {
        self.str_value(MESSAGE_SUBJECT)
    }

    pub fn message_id(&self) -> &str {
        self.str_value(MESSAGE_ID)
    }

    pub fn message_direction(&self) -> &str {
        self.str_value(MESSAGE_DIRECTION)
    }

    pub fn message_thing_id(&self) -> &str {
        self.str_value(MESSAGE_THING_ID)
    }

    pub fn message_feature_id(&self) -> &str {
        self.str_value(MESSAGE_FEATURE_ID)
    }

    /// The raw value for any key, reserved or not.
    pub fn generic(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

/// A deferred mutation of a [`Headers`] value.
pub struct HeaderOpt(Box<dyn FnOnce(&mut Headers) -> Result<(), HeaderError>>);

impl HeaderOpt {
    pub fn new(opt: impl FnOnce(&mut Headers) -> Result<(), HeaderError> + 'static) -> Self {
        HeaderOpt(Box::new(opt))
    }

    pub fn apply(self, headers: &mut Headers) -> Result<(), HeaderError> {
        (self.0)(headers)
    }
}

fn set_value(key: &'static str, value: impl Into<Value> + 'static) -> HeaderOpt {
    HeaderOpt::new(move |headers| {
        headers.set(key, value);
        Ok(())
    })
}

pub fn with_correlation_id(correlation_id: impl Into<String> + 'static) -> HeaderOpt {
    set_value(CORRELATION_ID, correlation_id.into())
}

pub fn with_response_required(response_required: bool) -> HeaderOpt {
    set_value(RESPONSE_REQUIRED, response_required)
}

pub fn with_channel(channel: impl Into<String> + 'static) -> HeaderOpt {
    set_value(CHANNEL, channel.into())
}

pub fn with_dry_run(dry_run: bool) -> HeaderOpt {
    set_value(DRY_RUN, dry_run)
}

pub fn with_origin(origin: impl Into<String> + 'static) -> HeaderOpt {
    set_value(ORIGIN, origin.into())
}

pub fn with_originator(originator: impl Into<String> + 'static) -> HeaderOpt {
    set_value(ORIGINATOR, originator.into())
}

pub fn with_etag(etag: impl Into<String> + 'static) -> HeaderOpt {
    set_value(ETAG, etag.into())
}

pub fn with_if_match(if_match: impl Into<String> + 'static) -> HeaderOpt {
    set_value(IF_MATCH, if_match.into())
}

pub fn with_if_none_match(if_none_match: impl Into<String> + 'static) -> HeaderOpt {
    set_value(IF_NONE_MATCH, if_none_match.into())
}

pub fn with_reply_target(reply_target: i64) -> HeaderOpt {
    set_value(REPLY_TARGET, reply_target)
}

pub fn with_reply_to(reply_to: impl Into<String> + 'static) -> HeaderOpt {
    set_value(REPLY_TO, reply_to.into())
}

pub fn with_timeout(timeout: impl Into<String> + 'static) -> HeaderOpt {
    set_value(TIMEOUT, timeout.into())
}

pub fn with_schema_version(version: i64) -> HeaderOpt {
    set_value(SCHEMA_VERSION, version)
}

pub fn with_content_type(content_type: impl Into<String> + 'static) -> HeaderOpt {
    set_value(CONTENT_TYPE, content_type.into())
}

/// Set any header, reserved or unknown. Fails (yielding absent headers at
/// build time) when the value cannot be represented as JSON.
pub fn with_generic(key: impl Into<String> + 'static, value: impl Serialize + 'static) -> HeaderOpt {
    HeaderOpt::new(move |headers| {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|source| HeaderError::InvalidValue {
            key: key.clone(),
            source,
        })?;
        headers.set(key, value);
        Ok(())
    })
}
