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

use super::{CoercionError, UnknownParameterError, ValidationError};
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The error returned by all the request building operations.
///
/// Building a request can fail in a few ways: a value cannot be converted to
/// the type declared in the schema, the application sets a parameter the
/// schema does not know about, or some required parameters are missing when
/// the query is finalized. All these failures are deterministic; retrying the
/// same operation with the same inputs fails in the same way.
///
/// Most applications will just return the error or log it. This type offers a
/// series of predicates to determine the error kind, and accessors for the
/// most common details. Applications can query the error
/// [source][std::error::Error::source] for deeper information.
///
/// # Example
/// ```
/// use mws_request::error::Error;
/// match example_function() {
///     Err(e) if e.is_validation() => {
///         println!("please set {:?}", e.missing().unwrap_or_default());
///     },
///     Err(e) => { println!("some other error {e}"); },
///     Ok(_) => { println!("success, how boring"); },
/// }
///
/// fn example_function() -> Result<String, Error> {
///     // ... details omitted ...
///     # use mws_request::error::ValidationError;
///     # Err(Error::validation(ValidationError::new(vec!["ShipmentId".into()])))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

impl Error {
    /// Creates an error representing a failed value conversion.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use mws_request::error::{CoercionError, Error};
    /// let error = Error::coercion("LastUpdatedAfter", CoercionError::Unparseable("soon".into()));
    /// assert!(error.is_coercion());
    /// assert_eq!(error.parameter(), Some("LastUpdatedAfter"));
    /// assert!(error.source().is_some());
    /// ```
    pub fn coercion<T: Into<String>>(parameter: T, source: CoercionError) -> Self {
        Self {
            kind: ErrorKind::Coercion(parameter.into()),
            source: source.into(),
        }
    }

    /// A parameter value could not be converted to the type in the schema.
    ///
    /// This is always a client-side generated error, raised while assigning
    /// the value. Date and timestamp parameters are the only ones with a
    /// conversion that can fail.
    ///
    /// # Troubleshooting
    ///
    /// Date and timestamp parameters accept RFC 3339 strings (e.g.
    /// `2020-01-02T03:04:05Z`), RFC 2822 strings
    /// (`Thu, 02 Jan 2020 03:04:05 +0000`), calendar dates (`2020-01-02`), or
    /// date-times without an offset (`2020-01-02T03:04:05`), which are read as
    /// UTC. Applications holding a [time::OffsetDateTime] or [time::Date] can
    /// use [set_datetime][crate::request::Request::set_datetime] or
    /// [set_date][crate::request::Request::set_date] instead.
    pub fn is_coercion(&self) -> bool {
        matches!(self.kind, ErrorKind::Coercion(_))
    }

    /// Creates an error representing missing required parameters.
    ///
    /// # Example
    /// ```
    /// use mws_request::error::{Error, ValidationError};
    /// let error = Error::validation(ValidationError::new(vec!["ShipmentId".into()]));
    /// assert!(error.is_validation());
    /// assert_eq!(error.missing(), Some(&["ShipmentId".to_string()][..]));
    /// ```
    pub fn validation(source: ValidationError) -> Self {
        Self {
            kind: ErrorKind::Validation,
            source: source.into(),
        }
    }

    /// Some required parameters were not set.
    ///
    /// # Troubleshooting
    ///
    /// Use [missing()][Error::missing] to get the wire keys of the missing
    /// parameters. For lists of objects the key refers to the first element,
    /// e.g. `Items.member.1.SellerSKU`, as only the first element is checked.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation)
    }

    /// Creates an error representing a parameter missing from the schema.
    ///
    /// # Example
    /// ```
    /// use mws_request::error::Error;
    /// let error = Error::unknown_parameter("Colour");
    /// assert!(error.is_unknown_parameter());
    /// assert_eq!(error.parameter(), Some("Colour"));
    /// ```
    pub fn unknown_parameter<T: Into<String>>(parameter: T) -> Self {
        let parameter = parameter.into();
        Self {
            kind: ErrorKind::UnknownParameter(parameter.clone()),
            source: UnknownParameterError(parameter).into(),
        }
    }

    /// The application set a parameter that is not declared in the schema.
    ///
    /// # Troubleshooting
    ///
    /// Parameters can be set using the key they are declared under, or their
    /// canonical wire name. Nested wire keys, such as `Address.City`, cannot
    /// be set directly unless the schema declares them as top-level names.
    pub fn is_unknown_parameter(&self) -> bool {
        matches!(self.kind, ErrorKind::UnknownParameter(_))
    }

    /// The parameter key associated with this error, if any.
    pub fn parameter(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Coercion(p) | ErrorKind::UnknownParameter(p) => Some(p.as_str()),
            ErrorKind::Validation => None,
        }
    }

    /// The wire keys of the missing required parameters, if this is a
    /// validation error.
    pub fn missing(&self) -> Option<&[String]> {
        self.source
            .downcast_ref::<ValidationError>()
            .map(ValidationError::missing)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ErrorKind::Coercion(p) => {
                write!(f, "cannot convert the value for parameter `{p}`: {}", self.source)
            }
            ErrorKind::Validation => write!(f, "cannot build the request: {}", self.source),
            ErrorKind::UnknownParameter(_) => write!(f, "{}", self.source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref() as &dyn std::error::Error)
    }
}

/// The type of error held by an [Error] instance.
#[derive(Debug)]
enum ErrorKind {
    Coercion(String),
    Validation,
    UnknownParameter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion() {
        let source = CoercionError::Unparseable("soon".to_string());
        let error = Error::coercion("LastUpdatedAfter", source);
        assert!(error.is_coercion(), "{error:?}");
        assert!(!error.is_validation(), "{error:?}");
        assert!(!error.is_unknown_parameter(), "{error:?}");
        assert_eq!(error.parameter(), Some("LastUpdatedAfter"));
        assert!(error.missing().is_none(), "{error:?}");
        let got = error
            .source()
            .and_then(|e| e.downcast_ref::<CoercionError>());
        assert!(
            matches!(got, Some(CoercionError::Unparseable(s)) if s == "soon"),
            "{error:?}"
        );
        assert!(error.to_string().contains("LastUpdatedAfter"), "{error}");
        assert!(error.to_string().contains("must be a date"), "{error}");
    }

    #[test]
    fn validation() {
        let source = ValidationError::new(vec!["A".to_string(), "B.member.1.C".to_string()]);
        let error = Error::validation(source.clone());
        assert!(error.is_validation(), "{error:?}");
        assert!(!error.is_coercion(), "{error:?}");
        assert!(error.parameter().is_none(), "{error:?}");
        assert_eq!(error.missing(), Some(source.missing()));
        let got = error
            .source()
            .and_then(|e| e.downcast_ref::<ValidationError>());
        assert_eq!(got, Some(&source));
        assert!(error.to_string().contains(&source.to_string()), "{error}");
    }

    #[test]
    fn unknown_parameter() {
        let error = Error::unknown_parameter("Colour");
        assert!(error.is_unknown_parameter(), "{error:?}");
        assert!(!error.is_validation(), "{error:?}");
        assert_eq!(error.parameter(), Some("Colour"));
        let got = error
            .source()
            .and_then(|e| e.downcast_ref::<UnknownParameterError>());
        assert_eq!(got, Some(&UnknownParameterError("Colour".to_string())));
        assert!(error.to_string().contains("Colour"), "{error}");
    }
}
