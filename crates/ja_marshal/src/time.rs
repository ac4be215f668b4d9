//! Wire representations of timestamps.
//!
//! JSON has no timestamp type, so two independent encodings are provided:
//!
//! - [`Iso8601`]: a quoted RFC 3339 string at second precision with the UTC
//!   offset, e.g. `"2017-04-06T13:00:00-07:00"` or `"2016-12-08T15:18:54Z"`.
//! - [`UnixMilli`]: a bare integer of milliseconds since the Unix epoch,
//!   e.g. `1257894000000`.
//!
//! Both implement [`TimeCodec`] for raw JSON text and serde's
//! `Serialize`/`Deserialize`, so they can be used directly, as `Option<_>`,
//! and inside `Vec`/`BTreeMap`/`HashMap` fields.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use core::ops::Deref;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::{MarshalError, Result};

const NULL: &str = "null";

// -----------------------------------------------------------------------------
// TimeCodec

/// Symmetric conversion between a timestamp wrapper and its raw JSON text.
///
/// Decoding the literal `null` is a no-op, the target keeps its prior value.
pub trait TimeCodec {
    /// Encodes `self` as JSON text.
    fn encode(&self) -> String;

    /// Decodes raw JSON text into `self`.
    fn decode(&mut self, raw: &str) -> Result<()>;
}

impl<T: TimeCodec + Default> TimeCodec for Option<T> {
    fn encode(&self) -> String {
        match self {
            Some(value) => value.encode(),
            None => NULL.to_string(),
        }
    }

    fn decode(&mut self, raw: &str) -> Result<()> {
        if raw == NULL {
            return Ok(());
        }

        let mut value = T::default();
        value.decode(raw)?;
        *self = Some(value);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Iso8601

/// A timestamp encoded as an RFC 3339 string.
///
/// Encoding drops fractional seconds, decoding accepts them.
///
/// # Examples
///
/// ```
/// use ja_marshal::time::{Iso8601, TimeCodec};
///
/// let mut t = Iso8601::default();
/// t.decode(r#""2017-04-06T13:00:00-07:00""#).unwrap();
/// assert_eq!(t.encode(), r#""2017-04-06T13:00:00-07:00""#);
///
/// t.decode("null").unwrap();
/// assert_eq!(t.to_string(), "2017-04-06T13:00:00-07:00");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iso8601(pub DateTime<FixedOffset>);

impl Iso8601 {
    fn parse(text: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(text).ok().map(Iso8601)
    }
}

impl Deref for Iso8601 {
    type Target = DateTime<FixedOffset>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<DateTime<FixedOffset>> for Iso8601 {
    #[inline]
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self(value)
    }
}

impl From<DateTime<Utc>> for Iso8601 {
    #[inline]
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.fixed_offset())
    }
}

impl fmt::Display for Iso8601 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

impl TimeCodec for Iso8601 {
    fn encode(&self) -> String {
        format!("\"{self}\"")
    }

    fn decode(&mut self, raw: &str) -> Result<()> {
        if raw == NULL {
            return Ok(());
        }

        let bad = || MarshalError::BadTimestamp(raw.to_string());
        let text: String = serde_json::from_str(raw).map_err(|_| bad())?;
        *self = Self::parse(&text).ok_or_else(bad)?;
        Ok(())
    }
}

impl Serialize for Iso8601 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Iso8601 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(Iso8601Visitor)
    }
}

struct Iso8601Visitor;

impl<'de> Visitor<'de> for Iso8601Visitor {
    type Value = Iso8601;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an RFC 3339 timestamp string")
    }

    // A null element keeps the zero value, like a freshly declared one.
    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Iso8601::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Iso8601::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_str(self)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Iso8601::parse(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

// -----------------------------------------------------------------------------
// UnixMilli

/// A timestamp encoded as milliseconds since the Unix epoch.
///
/// Sub-millisecond components are truncated on encoding, decoded values are
/// always UTC.
///
/// # Examples
///
/// ```
/// use ja_marshal::time::{TimeCodec, UnixMilli};
///
/// let mut t = UnixMilli::default();
/// t.decode("1257894000999").unwrap();
/// assert_eq!(t.timestamp_subsec_millis(), 999);
/// assert_eq!(t.encode(), "1257894000999");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnixMilli(pub DateTime<Utc>);

impl UnixMilli {
    #[inline]
    fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(UnixMilli)
    }

    /// Milliseconds since the Unix epoch.
    #[inline]
    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl Deref for UnixMilli {
    type Target = DateTime<Utc>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<DateTime<Utc>> for UnixMilli {
    #[inline]
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl TimeCodec for UnixMilli {
    fn encode(&self) -> String {
        self.millis().to_string()
    }

    fn decode(&mut self, raw: &str) -> Result<()> {
        if raw == NULL {
            return Ok(());
        }

        *self = raw
            .parse::<i64>()
            .ok()
            .and_then(Self::from_millis)
            .ok_or_else(|| MarshalError::BadTimestamp(raw.to_string()))?;
        Ok(())
    }
}

impl Serialize for UnixMilli {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.millis())
    }
}

impl<'de> Deserialize<'de> for UnixMilli {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(UnixMilliVisitor)
    }
}

struct UnixMilliVisitor;

impl<'de> Visitor<'de> for UnixMilliVisitor {
    type Value = UnixMilli;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer of milliseconds since the Unix epoch")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(UnixMilli::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(UnixMilli::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_i64(self)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        UnixMilli::from_millis(v).ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .ok()
            .and_then(UnixMilli::from_millis)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use chrono::{DateTime, FixedOffset, NaiveDate, SubsecRound, TimeZone, Utc};
    use serde_json::Value;

    use super::{Iso8601, TimeCodec, UnixMilli};
    use crate::MarshalError;

    fn control() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2009, 11, 10, 23, 0, 0).unwrap()
    }

    fn pacific(y: i32, mo: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, 0, 0)
            .unwrap()
    }

    fn same_json(a: &str, b: &str) -> bool {
        let a: Value = serde_json::from_str(a).unwrap();
        let b: Value = serde_json::from_str(b).unwrap();
        a == b
    }

    #[test]
    fn iso8601_table() {
        let cases = [
            (r#""2017-04-06T13:00:00-07:00""#, pacific(2017, 4, 6, 13)),
            (r#""2007-05-06T13:00:00-07:00""#, pacific(2007, 5, 6, 13)),
            (
                r#""2016-12-08T15:18:54Z""#,
                Utc.with_ymd_and_hms(2016, 12, 8, 15, 18, 54)
                    .unwrap()
                    .fixed_offset(),
            ),
        ];

        for (text, expected) in cases {
            let mut decoded = Iso8601::default();
            decoded.decode(text).unwrap();
            assert_eq!(decoded.0, expected, "{text}");

            assert_eq!(Iso8601(expected).encode(), text);
        }
    }

    #[test]
    fn iso8601_fractional_seconds() {
        let mut decoded = Iso8601::default();
        decoded.decode(r#""2016-12-08T15:18:54.250Z""#).unwrap();
        assert_eq!(decoded.timestamp_subsec_millis(), 250);
        assert_eq!(decoded.encode(), r#""2016-12-08T15:18:54Z""#);
    }

    #[test]
    fn iso8601_round_trip_second_precision() {
        let t = NaiveDate::from_ymd_opt(2021, 3, 14)
            .unwrap()
            .and_hms_nano_opt(1, 59, 26, 535_897_932)
            .unwrap()
            .and_utc()
            .fixed_offset();

        let mut back = Iso8601::default();
        back.decode(&Iso8601(t).encode()).unwrap();
        assert_eq!(back.0, t.trunc_subsecs(0));
        assert_eq!(back.offset(), t.offset());
    }

    #[test]
    fn unix_milli_table() {
        let with_millis = NaiveDate::from_ymd_opt(2009, 11, 10)
            .unwrap()
            .and_hms_milli_opt(23, 0, 0, 999)
            .unwrap()
            .and_utc();

        let cases = [("1257894000000", control()), ("1257894000999", with_millis)];

        for (text, expected) in cases {
            let mut decoded = UnixMilli::default();
            decoded.decode(text).unwrap();
            assert_eq!(decoded.0, expected, "{text}");

            assert_eq!(UnixMilli(expected).encode(), text);
        }
    }

    #[test]
    fn unix_milli_truncates() {
        let t = NaiveDate::from_ymd_opt(2009, 11, 10)
            .unwrap()
            .and_hms_nano_opt(23, 0, 0, 123_456_789)
            .unwrap()
            .and_utc();

        let mut back = UnixMilli::default();
        back.decode(&UnixMilli(t).encode()).unwrap();
        assert_eq!(back.0, t.trunc_subsecs(3));
        assert_eq!(back.millis(), 1_257_894_000_123);
    }

    #[test]
    fn unix_milli_before_epoch() {
        let mut back = UnixMilli::default();
        back.decode("-1500").unwrap();
        assert_eq!(back.0.timestamp(), -2);
        assert_eq!(back.timestamp_subsec_millis(), 500);
        assert_eq!(back.encode(), "-1500");
    }

    #[test]
    fn null_decode_is_noop() {
        let mut iso = Iso8601(pacific(2017, 4, 6, 13));
        iso.decode("null").unwrap();
        assert_eq!(iso.0, pacific(2017, 4, 6, 13));

        let mut milli = UnixMilli(control());
        milli.decode("null").unwrap();
        assert_eq!(milli.0, control());

        let mut some = Some(UnixMilli(control()));
        some.decode("null").unwrap();
        assert_eq!(some, Some(UnixMilli(control())));

        let mut none: Option<Iso8601> = None;
        none.decode("null").unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn optional_codec() {
        let mut value: Option<UnixMilli> = None;
        assert_eq!(value.encode(), "null");

        value.decode("1257894000000").unwrap();
        assert_eq!(value, Some(UnixMilli(control())));
        assert_eq!(value.encode(), "1257894000000");

        let mut iso: Option<Iso8601> = Some(Iso8601::default());
        assert!(iso.decode("1257894000000").is_err());
        assert_eq!(iso, Some(Iso8601::default()));
    }

    #[test]
    fn bad_literals() {
        let mut milli = UnixMilli::default();
        assert!(matches!(
            milli.decode("\"1257894000000\""),
            Err(MarshalError::BadTimestamp(_))
        ));
        assert!(matches!(milli.decode("12.5"), Err(MarshalError::BadTimestamp(_))));

        let mut iso = Iso8601::default();
        assert!(matches!(
            iso.decode("\"yesterday\""),
            Err(MarshalError::BadTimestamp(_))
        ));
        assert!(matches!(
            iso.decode("2016-12-08T15:18:54Z"),
            Err(MarshalError::BadTimestamp(_))
        ));
        assert_eq!(iso, Iso8601::default());
    }

    #[test]
    fn unix_milli_containers() {
        let object = r#"{"foo": 1257894000000, "bar": 1257894000000}"#;
        let array = "[1257894000000,1257894000000]";

        let map: BTreeMap<String, UnixMilli> = serde_json::from_str(object).unwrap();
        assert_eq!(map["foo"].0, control());
        assert!(same_json(&serde_json::to_string(&map).unwrap(), object));

        let map: HashMap<String, Option<UnixMilli>> = serde_json::from_str(object).unwrap();
        assert_eq!(map["foo"], Some(UnixMilli(control())));
        assert!(same_json(&serde_json::to_string(&map).unwrap(), object));

        let list: Vec<Option<UnixMilli>> = serde_json::from_str(array).unwrap();
        assert_eq!(list[0], Some(UnixMilli(control())));
        assert!(same_json(&serde_json::to_string(&list).unwrap(), array));

        let list: Vec<UnixMilli> = serde_json::from_str(array).unwrap();
        assert_eq!(list[1].0, control());
        assert!(same_json(&serde_json::to_string(&list).unwrap(), array));

        let single: UnixMilli = serde_json::from_str("1257894000000").unwrap();
        assert_eq!(single.0, control());
        assert_eq!(serde_json::to_string(&single).unwrap(), "1257894000000");

        let single: Option<UnixMilli> = serde_json::from_str("1257894000000").unwrap();
        assert_eq!(single, Some(UnixMilli(control())));
        assert_eq!(serde_json::to_string(&single).unwrap(), "1257894000000");
    }

    #[test]
    fn container_null_elements() {
        let list: Vec<Option<UnixMilli>> = serde_json::from_str("[null, 1257894000000]").unwrap();
        assert_eq!(list, vec![None, Some(UnixMilli(control()))]);

        let list: Vec<UnixMilli> = serde_json::from_str("[null, 1257894000000]").unwrap();
        assert_eq!(list, vec![UnixMilli::default(), UnixMilli(control())]);

        let map: BTreeMap<String, Option<Iso8601>> =
            serde_json::from_str(r#"{"a": null, "b": "2016-12-08T15:18:54Z"}"#).unwrap();
        assert_eq!(map["a"], None);
        assert_eq!(map["b"].unwrap().to_string(), "2016-12-08T15:18:54Z");

        let map: BTreeMap<String, Iso8601> = serde_json::from_str(r#"{"a": null}"#).unwrap();
        assert_eq!(map["a"], Iso8601::default());
    }

    #[test]
    fn iso8601_containers() {
        let array = r#"["2017-04-06T13:00:00-07:00","2016-12-08T15:18:54Z"]"#;
        let list: Vec<Iso8601> = serde_json::from_str(array).unwrap();
        assert_eq!(list[0].0, pacific(2017, 4, 6, 13));
        assert_eq!(serde_json::to_string(&list).unwrap(), array);
    }
}
