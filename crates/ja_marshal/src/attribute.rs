use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::hash::BuildHasher;
use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use ja_tag::FieldSpec;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::Result;
use crate::time::{Iso8601, UnixMilli};

// -----------------------------------------------------------------------------
// Attribute

/// How an attribute value takes part in timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// A bare timestamp, omitted whenever it is zero.
    Instant { zero: bool },
    /// An optional timestamp: `None` when unset, otherwise whether the
    /// contained instant is zero.
    Nullable(Option<bool>),
}

/// A value stored in `attributes` or `meta`.
///
/// Implemented for primitives, strings, `Option`, `Vec`, maps,
/// [`serde_json::Value`], chrono timestamps and the [`time`](crate::time)
/// wrappers. Other `Serialize + Default + PartialEq` types can be registered
/// with [`impl_attribute!`](crate::impl_attribute).
///
/// The zero value of a type is its `Default`. For chrono timestamps this is
/// the Unix epoch.
pub trait Attribute {
    /// Encodes the value as JSON.
    fn encode(&self) -> Result<Value>;

    /// Whether the value equals the zero value of its type.
    fn is_zero(&self) -> bool;

    /// Timestamp capability of this value, `None` for ordinary values.
    #[inline]
    fn timestamp(&self) -> Option<Timestamp> {
        None
    }

    /// Whether values of this type are bare timestamps.
    ///
    /// Lets `Option<T>` report [`Timestamp::Nullable`] even when unset.
    #[inline]
    fn is_timestamp() -> bool
    where
        Self: Sized,
    {
        false
    }
}

/// Implements [`Attribute`] for types that are `Serialize + Default + PartialEq`.
///
/// ```
/// use ja_marshal::{Attribute, impl_attribute};
///
/// #[derive(serde::Serialize, Default, PartialEq)]
/// enum Color {
///     #[default]
///     Red,
///     Blue,
/// }
///
/// impl_attribute!(Color);
///
/// assert!(Color::Red.is_zero());
/// assert_eq!(Color::Blue.encode().unwrap(), "Blue");
/// ```
#[macro_export]
macro_rules! impl_attribute {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Attribute for $ty {
                #[inline]
                fn encode(&self) -> $crate::Result<$crate::__macro_exports::Value> {
                    ::core::result::Result::Ok($crate::__macro_exports::to_value(self)?)
                }

                #[inline]
                fn is_zero(&self) -> bool {
                    *self == <$ty as ::core::default::Default>::default()
                }
            }
        )*
    };
}

impl_attribute!(
    bool, char, String, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);

impl_attribute!(Iso8601, UnixMilli);

impl Attribute for str {
    #[inline]
    fn encode(&self) -> Result<Value> {
        Ok(Value::String(self.to_string()))
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Attribute for &str {
    #[inline]
    fn encode(&self) -> Result<Value> {
        (**self).encode()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

// Sized `T` only, so that `is_timestamp` reaches through the pointer.
impl<T: Attribute> Attribute for &T {
    #[inline]
    fn encode(&self) -> Result<Value> {
        (**self).encode()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    #[inline]
    fn timestamp(&self) -> Option<Timestamp> {
        (**self).timestamp()
    }

    #[inline]
    fn is_timestamp() -> bool {
        T::is_timestamp()
    }
}

impl<T: Attribute> Attribute for Box<T> {
    #[inline]
    fn encode(&self) -> Result<Value> {
        (**self).encode()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    #[inline]
    fn timestamp(&self) -> Option<Timestamp> {
        (**self).timestamp()
    }

    #[inline]
    fn is_timestamp() -> bool {
        T::is_timestamp()
    }
}

impl<T: Attribute> Attribute for Option<T> {
    fn encode(&self) -> Result<Value> {
        match self {
            Some(value) => value.encode(),
            None => Ok(Value::Null),
        }
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn timestamp(&self) -> Option<Timestamp> {
        T::is_timestamp().then(|| Timestamp::Nullable(self.as_ref().map(T::is_zero)))
    }
}

impl<T: Serialize> Attribute for Vec<T> {
    #[inline]
    fn encode(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K: Serialize, V: Serialize> Attribute for BTreeMap<K, V> {
    #[inline]
    fn encode(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K: Serialize, V: Serialize, S: BuildHasher> Attribute for HashMap<K, V, S> {
    #[inline]
    fn encode(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Attribute for Value {
    #[inline]
    fn encode(&self) -> Result<Value> {
        Ok(self.clone())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_null()
    }
}

impl Attribute for Map<String, Value> {
    #[inline]
    fn encode(&self) -> Result<Value> {
        Ok(Value::Object(self.clone()))
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Timestamps

#[inline]
fn is_epoch<Tz: TimeZone>(value: &DateTime<Tz>) -> bool {
    value.timestamp() == 0 && value.timestamp_subsec_nanos() == 0
}

macro_rules! impl_timestamp_attribute {
    ($($tz:ty),*) => {
        $(
            impl Attribute for DateTime<$tz> {
                fn encode(&self) -> Result<Value> {
                    Ok(Value::String(Iso8601::from(*self).to_string()))
                }

                #[inline]
                fn is_zero(&self) -> bool {
                    is_epoch(self)
                }

                #[inline]
                fn timestamp(&self) -> Option<Timestamp> {
                    Some(Timestamp::Instant { zero: is_epoch(self) })
                }

                #[inline]
                fn is_timestamp() -> bool {
                    true
                }
            }
        )*
    };
}

impl_timestamp_attribute!(Utc, FixedOffset);

// -----------------------------------------------------------------------------
// Encoding

/// Applies the `omitempty` and timestamp rules, `None` means "omit".
pub(crate) fn encode_attribute(
    spec: &FieldSpec<'_>,
    value: &dyn Attribute,
) -> Result<Option<Value>> {
    let omit = match value.timestamp() {
        Some(Timestamp::Instant { zero }) => zero,
        Some(Timestamp::Nullable(None)) => {
            return Ok((!spec.omit_empty).then_some(Value::Null));
        }
        Some(Timestamp::Nullable(Some(zero))) => zero && spec.omit_empty,
        None => spec.omit_empty && value.is_zero(),
    };

    if omit { Ok(None) } else { value.encode().map(Some) }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use ja_tag::FieldSpec;
    use serde_json::{Value, json};

    use super::{Attribute, Timestamp, encode_attribute};
    use crate::time::UnixMilli;

    fn encode(value: &dyn Attribute, omit_empty: bool) -> Option<Value> {
        encode_attribute(&FieldSpec::attribute("x", omit_empty), value).unwrap()
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 12, 8, 15, 18, 54).unwrap()
    }

    #[test]
    fn plain_values() {
        assert_eq!(encode(&0_i32, false), Some(json!(0)));
        assert_eq!(encode(&0_i32, true), None);
        assert_eq!(encode(&7_u64, true), Some(json!(7)));
        assert_eq!(encode(&String::new(), false), Some(json!("")));
        assert_eq!(encode(&String::new(), true), None);
        assert_eq!(encode(&"hi", true), Some(json!("hi")));
        assert_eq!(encode(&false, true), None);
        assert_eq!(encode(&1.5_f64, true), Some(json!(1.5)));
    }

    #[test]
    fn containers() {
        let empty: Vec<u8> = Vec::new();
        assert_eq!(encode(&empty, false), Some(json!([])));
        assert_eq!(encode(&empty, true), None);
        assert_eq!(encode(&vec!["a", "b"], true), Some(json!(["a", "b"])));

        let mut map = BTreeMap::new();
        assert_eq!(encode(&map, true), None);
        map.insert("k", 1);
        assert_eq!(encode(&map, true), Some(json!({ "k": 1 })));

        assert_eq!(encode(&None::<i32>, false), Some(Value::Null));
        assert_eq!(encode(&None::<i32>, true), None);
        // `Some` of a zero value is still set.
        assert_eq!(encode(&Some(0), true), Some(json!(0)));

        assert_eq!(encode(&Value::Null, true), None);
        assert_eq!(encode(&json!({ "a": 1 }), true), Some(json!({ "a": 1 })));
    }

    #[test]
    fn bare_timestamps() {
        assert_eq!(encode(&noon(), false), Some(json!("2016-12-08T15:18:54Z")));

        let pacific = FixedOffset::west_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2017, 4, 6, 13, 0, 0)
            .unwrap();
        assert_eq!(
            encode(&pacific, true),
            Some(json!("2017-04-06T13:00:00-07:00"))
        );

        // Zero timestamps are dropped whatever the options say.
        assert_eq!(encode(&DateTime::<Utc>::default(), false), None);
        assert_eq!(encode(&DateTime::<FixedOffset>::default(), true), None);
    }

    #[test]
    fn nullable_timestamps() {
        let unset: Option<DateTime<Utc>> = None;
        assert_eq!(unset.timestamp(), Some(Timestamp::Nullable(None)));
        assert_eq!(encode(&unset, false), Some(Value::Null));
        assert_eq!(encode(&unset, true), None);

        let zero = Some(DateTime::<Utc>::default());
        assert_eq!(zero.timestamp(), Some(Timestamp::Nullable(Some(true))));
        assert_eq!(encode(&zero, false), Some(json!("1970-01-01T00:00:00Z")));
        assert_eq!(encode(&zero, true), None);

        let set = Some(noon());
        assert_eq!(encode(&set, true), Some(json!("2016-12-08T15:18:54Z")));
    }

    #[test]
    fn nullable_timestamps_behind_pointers() {
        let unset: Option<Box<DateTime<Utc>>> = None;
        assert_eq!(unset.timestamp(), Some(Timestamp::Nullable(None)));
        assert_eq!(encode(&unset, false), Some(Value::Null));
        assert_eq!(encode(&unset, true), None);

        let boxed = Some(Box::new(DateTime::<Utc>::default()));
        assert_eq!(boxed.timestamp(), Some(Timestamp::Nullable(Some(true))));
        assert_eq!(encode(&boxed, true), None);
        assert_eq!(encode(&boxed, false), Some(json!("1970-01-01T00:00:00Z")));

        let epoch = DateTime::<Utc>::default();
        let borrowed = Some(&epoch);
        assert_eq!(borrowed.timestamp(), Some(Timestamp::Nullable(Some(true))));
        assert_eq!(encode(&borrowed, true), None);
        assert_eq!(encode(&None::<&DateTime<Utc>>, true), None);

        let set = noon();
        assert_eq!(encode(&Some(&set), true), Some(json!("2016-12-08T15:18:54Z")));
        assert_eq!(encode(&Box::new(set), true), Some(json!("2016-12-08T15:18:54Z")));
        assert_eq!(encode(&Box::new(epoch), false), None);
    }

    #[test]
    fn codec_wrappers_are_plain_values() {
        let zero = UnixMilli::default();
        assert_eq!(zero.timestamp(), None);
        assert_eq!(encode(&zero, false), Some(json!(0)));
        assert_eq!(encode(&zero, true), None);

        let set = UnixMilli(noon());
        assert_eq!(encode(&set, true), Some(json!(1_481_210_334_000_i64)));
    }
}
