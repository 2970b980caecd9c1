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

//! Builds flat query maps and reads the matching responses.
//!
//! Query parameters in these APIs are always flat key/value pairs:
//! - Simple scalars are sent under the parameter's canonical name.
//! - Lists are sent as `name.1`, `name.2`, ... in the order they were given.
//! - Objects use the `name.field` format. Lists of objects combine both, as
//!   in `Items.member.1.SellerSKU`.
//! - Parameters set to `null` are not included in the query.

use crate::Result;
use crate::coerce::{coerce, truthy};
use crate::error::{CoercionError, Error, ValidationError};
use crate::options::{Endpoint, RequestOptions};
use crate::parameter::{Parameter, ParameterSchema, Schema};
use serde_json::Value;
use std::collections::BTreeMap;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

/// The flat map of wire keys to values, ready for the transport.
///
/// Keys are sorted in byte order, which is the canonical order used to sign
/// requests.
pub type QueryMap = BTreeMap<String, Value>;

/// The action used when none is given.
pub const DEFAULT_ACTION: &str = "GetServiceStatus";

/// Applications cannot set this parameter; the value is always ignored.
const IGNORED_PARAMETER: &str = "Limit";

/// The next token value the service uses to signal there are no more pages.
const NO_MORE_PAGES: &str = "none";

/// A request under construction.
///
/// Created from the action name, the parameter schema, and the request
/// options. Applications assign parameter values with [set][Request::set] or
/// [set_all][Request::set_all], and then call [query][Request::query] to
/// validate the request and obtain the flat query map.
///
/// The same object reads the responses: [result][Request::result] extracts the
/// payload, and [next_page][Request::next_page] returns what is needed to
/// fetch the next page, if any.
///
/// # Example
/// ```
/// # use mws_request::parameter::ParameterSchema;
/// # use mws_request::options::RequestOptions;
/// # use mws_request::request::Request;
/// # use serde_json::json;
/// let schema: ParameterSchema = serde_json::from_value(json!({
///     "ShipmentStatuses": { "name": "ShipmentStatusList.member", "list": true },
///     "LastUpdatedAfter": { "type": "timestamp" },
/// }))?;
/// let mut request = Request::new(
///     "ListInboundShipments",
///     &schema,
///     RequestOptions::default().set_name("Fulfillment"),
/// );
/// request
///     .set("ShipmentStatuses", json!(["WORKING", "SHIPPED"]))?
///     .set("LastUpdatedAfter", "2020-01-02T03:04:05Z")?;
/// let query = request.query()?;
/// assert_eq!(query.get("ShipmentStatusList.member.1"), Some(&json!("WORKING")));
/// assert_eq!(query.get("ShipmentStatusList.member.2"), Some(&json!("SHIPPED")));
/// assert_eq!(query.get("LastUpdatedAfter"), Some(&json!("2020-01-02T03:04:05Z")));
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Request {
    action: String,
    options: RequestOptions,
    schema: Schema,
    values: QueryMap,
}

/// What is needed to fetch the next page of results.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct NextPage {
    /// The next-page action, e.g. `Fulfillment.ListInboundShipmentsByNextToken`.
    pub action: String,
    /// The token returned by the service.
    pub token: String,
}

impl Request {
    /// Creates a new request.
    ///
    /// The schema is normalized once, here. An empty `action` is replaced by
    /// [DEFAULT_ACTION].
    pub fn new<A: Into<String>>(action: A, params: &ParameterSchema, options: RequestOptions) -> Self {
        let action = match action.into() {
            a if a.is_empty() => DEFAULT_ACTION.to_string(),
            a => a,
        };
        let options = options.resolve(&action);
        Self {
            action,
            options,
            schema: Schema::new(params),
            values: QueryMap::new(),
        }
    }

    /// The action name, e.g. `ListInboundShipments`.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The request options, with the defaults derived from the action applied.
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// The transport attributes.
    pub fn endpoint(&self) -> Endpoint {
        self.options.endpoint()
    }

    /// The normalized parameter schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The values assigned so far, without validation.
    pub fn values(&self) -> &QueryMap {
        &self.values
    }

    /// Sets the value of a parameter.
    ///
    /// `key` is either the key used to declare the parameter in the schema or
    /// its canonical name. `null` values are ignored, as is any value for the
    /// `Limit` key. Values for list parameters may be arrays or single values;
    /// each element is sent with its 1-based position appended to the name.
    /// Object values are flattened into `name.field` keys. Arrays given to
    /// parameters that are not lists are flattened into `name.0`, `name.1`, etc.
    ///
    /// Setting the same key twice overwrites the previous value.
    ///
    /// # Example
    /// ```
    /// # use mws_request::parameter::{ParameterSchema, ParameterSpec, Type};
    /// # use mws_request::options::RequestOptions;
    /// # use mws_request::request::Request;
    /// # use serde_json::json;
    /// let schema = ParameterSchema::from_iter([(
    ///     "Address".to_string(),
    ///     ParameterSpec::default().set_name("DestinationAddress").set_type(Type::Object),
    /// )]);
    /// let mut request = Request::new("CreateFulfillmentOrder", &schema, RequestOptions::default());
    /// request.set("Address", json!({"City": "Seattle", "CountryCode": "US"}))?;
    /// assert_eq!(request.values().get("DestinationAddress.City"), Some(&json!("Seattle")));
    /// assert_eq!(request.values().get("DestinationAddress"), None);
    /// # Ok::<(), mws_request::error::Error>(())
    /// ```
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) -> Result<&mut Self> {
        if key == IGNORED_PARAMETER {
            tracing::debug!(action = %self.action, "ignoring value for `{IGNORED_PARAMETER}`");
            return Ok(self);
        }
        let value = value.into();
        if value.is_null() {
            tracing::trace!(action = %self.action, key, "skipping null value");
            return Ok(self);
        }
        let parameter = self
            .schema
            .get(key)
            .ok_or_else(|| Error::unknown_parameter(key))?;

        let elements = match value {
            Value::Array(elements) if parameter.is_list() => elements,
            value => vec![value],
        };
        // Convert all the elements before assigning any, so a failure leaves
        // the request unchanged.
        let converted = elements
            .into_iter()
            .enumerate()
            // Null elements are never sent, not even for boolean lists. Their
            // slot is kept, so later elements retain their position.
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| {
                let v = coerce(parameter.r#type(), v).map_err(|e| Error::coercion(key, e))?;
                Ok((parameter.wire_key("", i + 1), v))
            })
            .collect::<Result<Vec<_>>>()?;
        for (name, value) in converted {
            assign(&mut self.values, name, value);
        }
        Ok(self)
    }

    /// Sets the value of a date or timestamp parameter from a typed value.
    ///
    /// The value is converted as described by the parameter type, exactly as if
    /// it had been given to [set][Request::set] as an RFC 3339 string.
    ///
    /// # Example
    /// ```
    /// # use mws_request::parameter::{ParameterSchema, ParameterSpec, Type};
    /// # use mws_request::options::RequestOptions;
    /// # use mws_request::request::Request;
    /// # use serde_json::json;
    /// use time::macros::datetime;
    /// let schema = ParameterSchema::from_iter([
    ///     ("After".to_string(), ParameterSpec::default().set_type(Type::Timestamp)),
    ///     ("Day".to_string(), ParameterSpec::default().set_type(Type::Date)),
    /// ]);
    /// let mut request = Request::new("ListThings", &schema, RequestOptions::default());
    /// request
    ///     .set_datetime("After", datetime!(2020-01-02 03:04:05 +01:00))?
    ///     .set_datetime("Day", datetime!(2020-01-02 23:30:00 -05:00))?;
    /// assert_eq!(request.values().get("After"), Some(&json!("2020-01-02T02:04:05Z")));
    /// assert_eq!(request.values().get("Day"), Some(&json!("2020-01-03")));
    /// # Ok::<(), mws_request::error::Error>(())
    /// ```
    pub fn set_datetime(&mut self, key: &str, value: OffsetDateTime) -> Result<&mut Self> {
        let formatted = value
            .format(&Rfc3339)
            .map_err(|e| Error::coercion(key, CoercionError::Format(e)))?;
        self.set(key, formatted)
    }

    /// Sets the value of a date or timestamp parameter from a calendar date.
    ///
    /// The date is interpreted as midnight UTC.
    ///
    /// # Example
    /// ```
    /// # use mws_request::parameter::{ParameterSchema, ParameterSpec, Type};
    /// # use mws_request::options::RequestOptions;
    /// # use mws_request::request::Request;
    /// # use serde_json::json;
    /// use time::macros::date;
    /// let schema = ParameterSchema::from_iter([
    ///     ("Day".to_string(), ParameterSpec::default().set_type(Type::Date)),
    /// ]);
    /// let mut request = Request::new("ListThings", &schema, RequestOptions::default());
    /// request.set_date("Day", date!(2020-01-02))?;
    /// assert_eq!(request.values().get("Day"), Some(&json!("2020-01-02")));
    /// # Ok::<(), mws_request::error::Error>(())
    /// ```
    pub fn set_date(&mut self, key: &str, value: Date) -> Result<&mut Self> {
        self.set_datetime(key, value.midnight().assume_utc())
    }

    /// Sets the value of many parameters.
    ///
    /// Equivalent to calling [set][Request::set] for each pair, in iteration
    /// order.
    ///
    /// # Example
    /// ```
    /// # use mws_request::parameter::ParameterSchema;
    /// # use mws_request::options::RequestOptions;
    /// # use mws_request::request::Request;
    /// # use serde_json::json;
    /// let schema: ParameterSchema = serde_json::from_value(json!({
    ///     "ShipmentId": { "required": true },
    ///     "ShipmentName": { "name": "InboundShipmentHeader.ShipmentName" },
    /// }))?;
    /// let mut request = Request::new("UpdateInboundShipment", &schema, RequestOptions::default());
    /// request.set_all([("ShipmentId", "FBA1"), ("ShipmentName", "First")])?;
    /// assert_eq!(request.values().len(), 2);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn set_all<I, K, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (key, value) in values {
            self.set(key.as_ref(), value)?;
        }
        Ok(self)
    }

    /// Validates the request and returns the query map.
    ///
    /// Fails if any required parameter is missing. The error lists all the
    /// missing parameters. For required lists of objects, the required fields
    /// of the first element are checked.
    ///
    /// This function does not modify the request, calling it multiple times
    /// returns the same result.
    pub fn query(&self) -> Result<QueryMap> {
        let mut missing = Vec::new();
        find_missing(&self.values, self.schema.parameters(), "", &mut missing);
        if !missing.is_empty() {
            tracing::debug!(action = %self.action, ?missing, "missing required parameters");
            return Err(Error::validation(ValidationError::new(missing)));
        }
        Ok(self.values.clone())
    }

    /// Extracts the result payload from a response document.
    ///
    /// The payload is found at the configured `base_path`, followed by `data`
    /// if it is set. If the options set `is_array`, the payload is always
    /// returned as an array: single values are wrapped, a missing value becomes
    /// an empty array, and falsy elements are dropped. Otherwise, the value is
    /// returned as-is, or `null` if it is missing.
    ///
    /// # Example
    /// ```
    /// # use mws_request::options::RequestOptions;
    /// # use mws_request::parameter::ParameterSchema;
    /// # use mws_request::request::Request;
    /// # use serde_json::json;
    /// let request = Request::new(
    ///     "ListInboundShipments",
    ///     &ParameterSchema::default(),
    ///     RequestOptions::default().set_data("ShipmentData.member").set_is_array(true),
    /// );
    /// let response = json!({
    ///     "ListInboundShipmentsResponse": {
    ///         "ListInboundShipmentsResult": {
    ///             "ShipmentData": { "member": { "ShipmentId": "FBA1" } }
    ///         }
    ///     }
    /// });
    /// assert_eq!(request.result(&response), json!([{ "ShipmentId": "FBA1" }]));
    /// ```
    pub fn result(&self, document: &Value) -> Value {
        let path = crate::path::join(
            self.options.base_path.as_deref().unwrap_or_default(),
            self.options.data.as_deref().unwrap_or_default(),
        );
        let found = crate::path::get(document, &path);
        if !self.options.is_array() {
            return found.cloned().unwrap_or(Value::Null);
        }
        let elements = match found {
            Some(Value::Array(elements)) => elements.clone(),
            Some(value) => vec![value.clone()],
            None => Vec::new(),
        };
        Value::Array(elements.into_iter().filter(truthy).collect())
    }

    /// Extracts the next page token from a response document.
    ///
    /// Returns `None` if the token is missing, or if the service returned
    /// the `none` token.
    pub fn next_token(&self, document: &Value) -> Option<String> {
        let path = crate::path::join(
            self.options.base_path.as_deref().unwrap_or_default(),
            "NextToken",
        );
        match crate::path::get(document, &path)? {
            Value::String(s) if s == NO_MORE_PAGES => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Null => None,
            other => {
                tracing::warn!(action = %self.action, token = ?other, "unexpected next page token");
                None
            }
        }
    }

    /// Returns the action and token to fetch the next page, if there is one.
    ///
    /// # Example
    /// ```
    /// # use mws_request::options::RequestOptions;
    /// # use mws_request::parameter::ParameterSchema;
    /// # use mws_request::request::Request;
    /// # use serde_json::json;
    /// let request = Request::new(
    ///     "ListInventorySupply",
    ///     &ParameterSchema::default(),
    ///     RequestOptions::default().set_name("Fulfillment").set_next_name("FulfillmentInventory"),
    /// );
    /// let response = json!({
    ///     "ListInventorySupplyResponse": {
    ///         "ListInventorySupplyResult": { "NextToken": "abc123" }
    ///     }
    /// });
    /// let next = request.next_page(&response).unwrap();
    /// assert_eq!(next.action, "FulfillmentInventory.ListInventorySupplyByNextToken");
    /// assert_eq!(next.token, "abc123");
    /// ```
    pub fn next_page(&self, document: &Value) -> Option<NextPage> {
        let action = self.options.next.clone()?;
        let token = self.next_token(document)?;
        Some(NextPage { action, token })
    }
}

/// Stores `value` under `name`.
///
/// Objects are flattened into `name.field` keys, and arrays into `name.0`,
/// `name.1`, etc. Only one level is flattened.
fn assign(values: &mut QueryMap, name: String, value: Value) {
    match value {
        Value::Object(object) => {
            for (field, v) in object.into_iter().filter(|(_, v)| !v.is_null()) {
                values.insert(format!("{name}.{field}"), v);
            }
        }
        Value::Array(elements) => {
            for (i, v) in elements.into_iter().enumerate().filter(|(_, v)| !v.is_null()) {
                values.insert(format!("{name}.{i}"), v);
            }
        }
        value => {
            values.insert(name, value);
        }
    }
}

/// Appends the wire keys of any missing required parameters to `missing`.
///
/// `prefix` must be empty or end with a `.`.
fn find_missing<'a, I>(values: &QueryMap, parameters: I, prefix: &str, missing: &mut Vec<String>)
where
    I: Iterator<Item = &'a Parameter>,
{
    for parameter in parameters {
        let key = parameter.wire_key(prefix, 1);
        if parameter.is_list() && parameter.is_object() {
            find_missing(values, parameter.params(), &format!("{key}."), missing);
        } else if parameter.is_required() && !values.contains_key(&key) {
            missing.push(key);
        }
    }
}
