#![cfg_attr(test, deny(warnings))]

use mockall::automock;
use time::OffsetDateTime;

pub mod serde;

pub use self::serde::format_timestamp;
pub use self::serde::parse_timestamp;
pub use self::serde::InvalidTimestamp;
pub use self::serde::ZERO_TIMESTAMP_LITERAL;

pub type Timestamp = OffsetDateTime;

#[automock]
pub trait Clock: Sync + Send + 'static {
    fn now(&self) -> Timestamp;
}

#[derive(Clone)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> Timestamp {
        OffsetDateTime::now_utc()
    }
}
