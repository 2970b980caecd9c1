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

/// Represent failures converting a value for a date or timestamp parameter.
///
/// # Example
/// ```
/// # use mws_request::coerce::coerce;
/// # use mws_request::error::CoercionError;
/// # use mws_request::parameter::Type;
/// let err = coerce(&Type::Date, serde_json::json!(42));
/// assert!(matches!(err, Err(CoercionError::NotADate(_))));
///
/// let err = coerce(&Type::Timestamp, serde_json::json!("yesterday"));
/// assert!(matches!(err, Err(CoercionError::Unparseable(_))));
/// ```
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CoercionError {
    /// The value is not a string, and therefore cannot hold a date.
    #[error("must be a date, got {0}")]
    NotADate(serde_json::Value),

    /// The value is a string, but not in any of the supported date formats.
    #[error("must be a date, cannot parse {0:?}")]
    Unparseable(String),

    /// The date was parsed but cannot be formatted as RFC 3339.
    #[error("must be a date, cannot format it as RFC 3339: {0}")]
    Format(#[source] time::error::Format),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display() {
        let e = CoercionError::NotADate(json!(true));
        assert!(e.to_string().contains("must be a date"), "{e}");
        assert!(e.to_string().contains("true"), "{e}");

        let e = CoercionError::Unparseable("not-a-date".to_string());
        assert!(e.to_string().contains("must be a date"), "{e}");
        assert!(e.to_string().contains("not-a-date"), "{e}");
    }
}
