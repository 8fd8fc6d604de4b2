//! `{{...}}` template placeholder recognition.
//!
//! The core only detects placeholders; substitution is a backend concern,
//! reached through the [`ValueFinder`] seam. The token constants below are
//! the names recognised in templates.

use regex::Regex;
use std::sync::LazyLock;

pub const THING_ID: &str = "thing:id";
pub const THING_NAME: &str = "thing:name";
pub const FEATURE_ID: &str = "feature:id";
pub const FEATURE_NAME: &str = "feature:name";
pub const DEVICE_ID: &str = "device:id";
pub const DEVICE_SERIAL_NUMBER: &str = "device:serial-number";
pub const SOURCE_ADDRESS: &str = "source:address";
pub const HEADER_REPLY_TO: &str = "header:reply-to";
pub const HEADER_CORRELATION_ID: &str = "header:correlation-id";
pub const HEADER_CONTENT_TYPE: &str = "header:content-type";
pub const HEADER_MESSAGE_ID: &str = "header:message-id";
pub const HEADER_DEVICE_ID: &str = "header:device-id";
pub const HEADER_QOS: &str = "header:qos";
pub const TOPIC_CHANNEL: &str = "topic:channel";
pub const TOPIC_CRITERION: &str = "topic:criterion";
pub const TOPIC_ACTION: &str = "topic:action";
pub const TIME_NOW: &str = "time:now";
pub const TIME_NOW_EPOCH_MILLIS: &str = "time:now_epoch_millis";

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(.*?)\}\}").expect("the placeholder pattern is a valid regex")
});

/// True when the input contains at least one `{{...}}` placeholder.
pub fn has_placeholders(input: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(input)
}

/// The token for an arbitrary header, e.g. `header:my-key`.
pub fn header_token(name: &str) -> String {
    format!("header:{name}")
}

/// Resolves placeholder tokens to their values during template substitution.
pub trait ValueFinder {
    fn get_value(&self, name: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("{{thing:id}}", true)]
    #[test_case("@things/{{thing:id}}/features", true)]
    #[test_case("{{}}", true; "empty token")]
    #[test_case("a {{x}} b {{y}} c", true; "several tokens")]
    #[test_case("no placeholders here", false)]
    #[test_case("{single} braces", false)]
    #[test_case("{{unclosed", false)]
    fn detects_placeholders(input: &str, expected: bool) {
        assert_eq!(has_placeholders(input), expected);
    }

    #[test]
    fn header_tokens_carry_the_header_name() {
        assert_eq!(header_token("qos"), HEADER_QOS);
        assert_eq!(header_token("my-key"), "header:my-key");
    }
}
