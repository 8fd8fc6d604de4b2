//! SQLite column bindings for the addressing types.
//!
//! Paths and topics are stored as their JSON string form (quoted canonical
//! string, arrays thereof for the list wrappers); reading accepts TEXT or
//! BLOB columns, for datastores that surface either.

use crate::path::Path;
use crate::path::PathList;
use crate::topic::Topic;
use crate::topic::TopicList;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSql;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;

macro_rules! impl_sqlite_json {
    ($ty:ty) => {
        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                let json = serde_json::to_string(self).map_err(|err| {
                    rusqlite::Error::ToSqlConversionFailure(Box::new(err))
                })?;
                Ok(json.into())
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let bytes = match value {
                    ValueRef::Text(bytes) | ValueRef::Blob(bytes) => bytes,
                    _ => return Err(FromSqlError::InvalidType),
                };
                serde_json::from_slice(bytes).map_err(|err| FromSqlError::Other(Box::new(err)))
            }
        }
    };
}

impl_sqlite_json!(Path);
impl_sqlite_json!(PathList);
impl_sqlite_json!(Topic);
impl_sqlite_json!(TopicList);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip_through_a_text_column() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE routes (path TEXT NOT NULL)", [])
            .unwrap();

        let path = Path::thing_feature_property("t1", "f1", "p1");
        conn.execute("INSERT INTO routes (path) VALUES (?1)", [&path])
            .unwrap();

        let stored: String = conn
            .query_row("SELECT path FROM routes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(stored, "\"@things/t1/features/f1/properties/p1\"");

        let back: Path = conn
            .query_row("SELECT path FROM routes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn topic_lists_round_trip_through_a_blob_column() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE subscriptions (topics BLOB NOT NULL)", [])
            .unwrap();

        let topics = TopicList(vec![
            "@topic/acme/west/things/events/created".parse().unwrap(),
            "@topic/acme/west/devices/alarms".parse().unwrap(),
        ]);
        conn.execute("INSERT INTO subscriptions (topics) VALUES (?1)", [&topics])
            .unwrap();

        let back: TopicList = conn
            .query_row("SELECT topics FROM subscriptions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(back, topics);
    }

    #[test]
    fn malformed_column_values_fail_to_decode() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE routes (path TEXT NOT NULL)", [])
            .unwrap();
        conn.execute("INSERT INTO routes (path) VALUES ('\"@gizmos/g1\"')", [])
            .unwrap();

        let result: Result<Path, _> =
            conn.query_row("SELECT path FROM routes", [], |row| row.get(0));
        assert!(result.is_err());
    }
}
