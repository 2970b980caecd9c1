// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Converts parameter values to the representation used in the query.
//!
//! Most parameters are sent as-is. Booleans are always sent as the strings
//! `true` or `false`, and date parameters are normalized to UTC, then sent
//! either as a calendar date or as an RFC 3339 timestamp. Nested objects are
//! returned unchanged; the request builder flattens them later.

use crate::error::CoercionError;
use crate::parameter::Type;
use serde_json::Value;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

type Result<T> = std::result::Result<T, CoercionError>;

/// Converts `value` as required by a parameter of type `type`.
///
/// # Example
/// ```
/// # use mws_request::coerce::coerce;
/// # use mws_request::parameter::Type;
/// # use serde_json::json;
/// let v = coerce(&Type::Timestamp, json!("2020-01-02T03:04:05+02:00"))?;
/// assert_eq!(v, json!("2020-01-02T01:04:05Z"));
/// let v = coerce(&Type::Date, json!("2020-01-02T03:04:05Z"))?;
/// assert_eq!(v, json!("2020-01-02"));
/// let v = coerce(&Type::Boolean, json!(1))?;
/// assert_eq!(v, json!("true"));
/// let v = coerce(&Type::Integer, json!("not checked"))?;
/// assert_eq!(v, json!("not checked"));
/// # Ok::<(), mws_request::error::CoercionError>(())
/// ```
pub fn coerce(r#type: &Type, value: Value) -> Result<Value> {
    match r#type {
        Type::Boolean => Ok(Value::String(truthy(&value).to_string())),
        Type::Date => {
            let date = parse(&value)?.date();
            let formatted = date
                .format(format_description!("[year]-[month]-[day]"))
                .map_err(CoercionError::Format)?;
            Ok(Value::String(formatted))
        }
        Type::Timestamp => {
            let formatted = parse(&value)?
                .format(&Rfc3339)
                .map_err(CoercionError::Format)?;
            Ok(Value::String(formatted))
        }
        Type::Object => Ok(value),
        Type::Plain | Type::String | Type::Integer | Type::Body | Type::Enumerated(_) => {
            Ok(value)
        }
    }
}

/// Returns true if `value` is truthy in the sense used by the query APIs.
///
/// `null`, `false`, zero, and the empty string are falsy. Everything else,
/// including empty arrays and empty objects, is truthy.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parses a date-like value, and returns it in UTC.
///
/// Accepts RFC 3339 and RFC 2822 strings, plus calendar dates and date-times
/// without an offset, both read as UTC.
fn parse(value: &Value) -> Result<OffsetDateTime> {
    let Value::String(s) = value else {
        return Err(CoercionError::NotADate(value.clone()));
    };
    parse_str(s)
        .and_then(|odt| odt.checked_to_offset(UtcOffset::UTC))
        .ok_or_else(|| CoercionError::Unparseable(s.clone()))
}

fn parse_str(s: &str) -> Option<OffsetDateTime> {
    if let Ok(odt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(odt);
    }
    if let Ok(odt) = OffsetDateTime::parse(s, &Rfc2822) {
        return Some(odt);
    }
    if let Ok(pdt) = PrimitiveDateTime::parse(
        s,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
    ) {
        return Some(pdt.assume_utc());
    }
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|d| PrimitiveDateTime::new(d, Time::MIDNIGHT).assume_utc())
}
