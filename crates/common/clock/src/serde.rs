//! The wire codec for timestamps: `yyyy-MM-dd HH:mm:ss.SSSSSS`.
//!
//! The fraction is at most microseconds, trailing zeros are trimmed and the
//! dot is omitted when the fraction is zero, so `2023-04-05 06:07:08.5`,
//! `2023-04-05 06:07:08.000150` and `2023-04-05 06:07:08` are all canonical.

use crate::Timestamp;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::PrimitiveDateTime;

/// How the zero (absent) timestamp appears on the wire.
pub const ZERO_TIMESTAMP_LITERAL: &str = "0001-01-01 00:00:00";

static DATE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Invalid timestamp literal: {literal:?}")]
pub struct InvalidTimestamp {
    pub literal: String,
}

pub fn format_timestamp(timestamp: &Timestamp) -> String {
    let base = timestamp
        .format(&DATE_TIME_FORMAT)
        .expect("the seconds-precision format has no fallible components");

    let micros = timestamp.microsecond();
    if micros == 0 {
        return base;
    }

    let fraction = format!("{micros:06}");
    format!("{base}.{}", fraction.trim_end_matches('0'))
}

pub fn parse_timestamp(literal: &str) -> Result<Timestamp, InvalidTimestamp> {
    let invalid = || InvalidTimestamp {
        literal: literal.to_string(),
    };

    let (base, fraction) = match literal.split_once('.') {
        Some((base, fraction)) => (base, Some(fraction)),
        None => (literal, None),
    };

    let datetime = PrimitiveDateTime::parse(base, &DATE_TIME_FORMAT).map_err(|_| invalid())?;

    let datetime = match fraction {
        None => datetime,
        Some(digits) => {
            if digits.is_empty()
                || digits.len() > 6
                || !digits.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(invalid());
            }
            let micros: u32 = format!("{digits:0<6}").parse().map_err(|_| invalid())?;
            datetime.replace_microsecond(micros).map_err(|_| invalid())?
        }
    };

    Ok(datetime.assume_utc())
}

/// Use with serde's `#[serde(with = "clock::serde::datetime_opt")]` on an
/// `Option<Timestamp>` field.
///
/// `None` serialises as [`ZERO_TIMESTAMP_LITERAL`] and the zero literal
/// deserialises back to `None`.
pub mod datetime_opt {
    use super::*;
    use ::serde::de::Error as _;
    use ::serde::Deserialize;
    use ::serde::Deserializer;
    use ::serde::Serializer;

    pub fn serialize<S: Serializer>(
        timestamp: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match timestamp {
            Some(timestamp) => serializer.serialize_str(&format_timestamp(timestamp)),
            None => serializer.serialize_str(ZERO_TIMESTAMP_LITERAL),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        let literal = String::deserialize(deserializer)?;
        if literal == ZERO_TIMESTAMP_LITERAL {
            return Ok(None);
        }
        parse_timestamp(&literal).map(Some).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use time::macros::datetime;

    #[test_case(datetime!(2023-04-05 06:07:08 UTC), "2023-04-05 06:07:08"; "no fraction")]
    #[test_case(datetime!(2023-04-05 06:07:08.5 UTC), "2023-04-05 06:07:08.5"; "trimmed fraction")]
    #[test_case(datetime!(2023-04-05 06:07:08.000150 UTC), "2023-04-05 06:07:08.00015"; "leading zeros kept")]
    #[test_case(datetime!(2023-12-31 23:59:59.999999 UTC), "2023-12-31 23:59:59.999999"; "full microseconds")]
    fn formats_the_wire_literal(timestamp: Timestamp, expected: &str) {
        assert_eq!(format_timestamp(&timestamp), expected);
    }

    #[test_case("2023-04-05 06:07:08"; "no fraction")]
    #[test_case("2023-04-05 06:07:08.5"; "short fraction")]
    #[test_case("2023-04-05 06:07:08.00015"; "trimmed fraction")]
    #[test_case("2023-12-31 23:59:59.999999"; "full microseconds")]
    fn round_trips_canonical_literals(literal: &str) {
        let parsed = parse_timestamp(literal).unwrap();
        assert_eq!(format_timestamp(&parsed), literal);
    }

    #[test_case("2023-04-05T06:07:08"; "wrong separator")]
    #[test_case("2023-04-05 06:07:08."; "empty fraction")]
    #[test_case("2023-04-05 06:07:08.1234567"; "fraction too long")]
    #[test_case("2023-04-05 06:07:08.12a"; "fraction not numeric")]
    #[test_case("not a date"; "garbage")]
    fn rejects_invalid_literals(literal: &str) {
        assert!(parse_timestamp(literal).is_err());
    }

    #[test]
    fn zero_literal_is_seconds_precision() {
        // the zero literal must itself parse, so readers can treat it as data
        let parsed = parse_timestamp(ZERO_TIMESTAMP_LITERAL).unwrap();
        assert_eq!(format_timestamp(&parsed), ZERO_TIMESTAMP_LITERAL);
    }
}
