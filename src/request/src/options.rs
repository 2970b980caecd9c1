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

//! Per-endpoint request configuration.
//!
//! Each API section (e.g. "Inbound Shipments") shares a set of defaults: the
//! destination path, the API version, and the name used to build the
//! next-page action. Individual requests may override those, and may describe
//! where the result payload lives in the response.

/// The default API version, used when the options do not set one.
pub const DEFAULT_VERSION: &str = "2009-01-01";

/// The default destination path, used when the options do not set one.
pub const DEFAULT_PATH: &str = "/";

const BY_NEXT_TOKEN: &str = "ByNextToken";

/// Configuration for a single request.
///
/// All the fields are optional. Deserializes from the camelCase names used in
/// request catalogs (`basePath`, `isArray`, `nextName`, ...).
///
/// # Example
/// ```
/// # use mws_request::options::RequestOptions;
/// let defaults = RequestOptions::default()
///     .set_name("Fulfillment")
///     .set_path("/FulfillmentInboundShipment/2010-10-01")
///     .set_version("2010-10-01");
/// let options = RequestOptions::default()
///     .set_data("ShipmentData.member")
///     .set_is_array(true)
///     .with_defaults(&defaults);
/// assert_eq!(options.endpoint().version, "2010-10-01");
/// assert_eq!(options.data.as_deref(), Some("ShipmentData.member"));
/// ```
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RequestOptions {
    /// The API section name, e.g. `Fulfillment`.
    pub name: Option<String>,
    /// A descriptive group name, e.g. `Inbound Shipments`.
    pub group: Option<String>,
    /// The section name used in the next-page action. Defaults to `name`.
    pub next_name: Option<String>,
    /// The location of the result in the response document.
    ///
    /// Defaults to `{action}Response.{action}Result`. An empty string refers
    /// to the document root.
    pub base_path: Option<String>,
    /// The location of the payload, relative to `base_path`.
    pub data: Option<String>,
    /// If true, the payload is always returned as a list.
    pub is_array: Option<bool>,
    /// The action used to fetch the next page, e.g.
    /// `Fulfillment.ListInboundShipmentsByNextToken`.
    pub next: Option<String>,
    /// The destination path. Passed through to the transport.
    pub path: Option<String>,
    /// The API version. Passed through to the transport.
    pub version: Option<String>,
    /// Selects the legacy request format. Passed through to the transport.
    pub legacy: Option<bool>,
    /// Marks requests that upload a body. Passed through to the transport.
    pub upload: Option<bool>,
}

impl RequestOptions {
    /// Sets the value of [name][RequestOptions::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = Some(v.into());
        self
    }

    /// Sets the value of [group][RequestOptions::group].
    pub fn set_group<T: Into<String>>(mut self, v: T) -> Self {
        self.group = Some(v.into());
        self
    }

    /// Sets the value of [next_name][RequestOptions::next_name].
    pub fn set_next_name<T: Into<String>>(mut self, v: T) -> Self {
        self.next_name = Some(v.into());
        self
    }

    /// Sets the value of [base_path][RequestOptions::base_path].
    pub fn set_base_path<T: Into<String>>(mut self, v: T) -> Self {
        self.base_path = Some(v.into());
        self
    }

    /// Sets the value of [data][RequestOptions::data].
    pub fn set_data<T: Into<String>>(mut self, v: T) -> Self {
        self.data = Some(v.into());
        self
    }

    /// Sets the value of [is_array][RequestOptions::is_array].
    pub fn set_is_array(mut self, v: bool) -> Self {
        self.is_array = Some(v);
        self
    }

    /// Sets the value of [next][RequestOptions::next].
    pub fn set_next<T: Into<String>>(mut self, v: T) -> Self {
        self.next = Some(v.into());
        self
    }

    /// Sets the value of [path][RequestOptions::path].
    pub fn set_path<T: Into<String>>(mut self, v: T) -> Self {
        self.path = Some(v.into());
        self
    }

    /// Sets the value of [version][RequestOptions::version].
    pub fn set_version<T: Into<String>>(mut self, v: T) -> Self {
        self.version = Some(v.into());
        self
    }

    /// Sets the value of [legacy][RequestOptions::legacy].
    pub fn set_legacy(mut self, v: bool) -> Self {
        self.legacy = Some(v);
        self
    }

    /// Sets the value of [upload][RequestOptions::upload].
    pub fn set_upload(mut self, v: bool) -> Self {
        self.upload = Some(v);
        self
    }

    /// Fills any field not set in `self` from `defaults`.
    pub fn with_defaults(self, defaults: &RequestOptions) -> Self {
        Self {
            name: self.name.or_else(|| defaults.name.clone()),
            group: self.group.or_else(|| defaults.group.clone()),
            next_name: self.next_name.or_else(|| defaults.next_name.clone()),
            base_path: self.base_path.or_else(|| defaults.base_path.clone()),
            data: self.data.or_else(|| defaults.data.clone()),
            is_array: self.is_array.or(defaults.is_array),
            next: self.next.or_else(|| defaults.next.clone()),
            path: self.path.or_else(|| defaults.path.clone()),
            version: self.version.or_else(|| defaults.version.clone()),
            legacy: self.legacy.or(defaults.legacy),
            upload: self.upload.or(defaults.upload),
        }
    }

    /// Returns true if the payload is always returned as a list.
    pub fn is_array(&self) -> bool {
        self.is_array.unwrap_or(false)
    }

    /// The transport attributes, with defaults applied.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint {
            path: self.path.clone().unwrap_or_else(|| DEFAULT_PATH.to_string()),
            version: self
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            legacy: self.legacy.unwrap_or(false),
            upload: self.upload,
        }
    }

    /// Fills in the fields derived from the action name.
    ///
    /// `base_path` defaults to `{action}Response.{action}Result`, and `next`
    /// to `{next_name or name}.{action}ByNextToken`. Actions that already end
    /// in `ByNextToken` are their own next-page action. Without a `next_name`
    /// or `name` there is no next-page action.
    pub(crate) fn resolve(mut self, action: &str) -> Self {
        if self.base_path.is_none() {
            self.base_path = Some(format!("{action}Response.{action}Result"));
        }
        if self.next.is_none() {
            let next_action = if action.ends_with(BY_NEXT_TOKEN) {
                action.to_string()
            } else {
                format!("{action}{BY_NEXT_TOKEN}")
            };
            self.next = self
                .next_name
                .as_ref()
                .or(self.name.as_ref())
                .map(|section| format!("{section}.{next_action}"));
        }
        self
    }
}

/// The attributes the transport uses to route a request.
///
/// The request builder does not interpret these values.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[non_exhaustive]
pub struct Endpoint {
    /// The destination path, e.g. `/FulfillmentInboundShipment/2010-10-01`.
    pub path: String,
    /// The API version, e.g. `2010-10-01`.
    pub version: String,
    /// Selects the legacy request format.
    pub legacy: bool,
    /// Marks requests that upload a body.
    pub upload: Option<bool>,
}

impl Default for Endpoint {
    fn default() -> Self {
        RequestOptions::default().endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn deserialize() -> anyhow::Result<()> {
        let got = serde_json::from_value::<RequestOptions>(json!({
            "name": "Fulfillment",
            "group": "Inbound Shipments",
            "nextName": "FulfillmentInboundShipment",
            "basePath": "ListResponse.ListResult",
            "data": "ShipmentData.member",
            "isArray": true,
            "path": "/FulfillmentInboundShipment/2010-10-01",
            "version": "2010-10-01",
            "legacy": false,
            "upload": true,
        }))?;
        let want = RequestOptions::default()
            .set_name("Fulfillment")
            .set_group("Inbound Shipments")
            .set_next_name("FulfillmentInboundShipment")
            .set_base_path("ListResponse.ListResult")
            .set_data("ShipmentData.member")
            .set_is_array(true)
            .set_path("/FulfillmentInboundShipment/2010-10-01")
            .set_version("2010-10-01")
            .set_legacy(false)
            .set_upload(true);
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn deserialize_empty() -> anyhow::Result<()> {
        let got = serde_json::from_value::<RequestOptions>(json!({}))?;
        assert_eq!(got, RequestOptions::default());
        assert!(!got.is_array());
        Ok(())
    }

    #[test]
    fn endpoint_defaults() {
        let got = RequestOptions::default().endpoint();
        assert_eq!(got.path, "/");
        assert_eq!(got.version, "2009-01-01");
        assert!(!got.legacy);
        assert!(got.upload.is_none());
        assert_eq!(Endpoint::default(), got);
    }

    #[test]
    fn endpoint_overrides() {
        let got = RequestOptions::default()
            .set_path("/Orders/2013-09-01")
            .set_version("2013-09-01")
            .set_legacy(true)
            .set_upload(false)
            .endpoint();
        assert_eq!(got.path, "/Orders/2013-09-01");
        assert_eq!(got.version, "2013-09-01");
        assert!(got.legacy);
        assert_eq!(got.upload, Some(false));
    }

    #[test]
    fn with_defaults() {
        let defaults = RequestOptions::default()
            .set_name("Fulfillment")
            .set_version("2010-10-01")
            .set_is_array(true)
            .set_data("Default.member");
        let got = RequestOptions::default()
            .set_data("Override.member")
            .set_is_array(false)
            .with_defaults(&defaults);
        assert_eq!(got.name.as_deref(), Some("Fulfillment"));
        assert_eq!(got.version.as_deref(), Some("2010-10-01"));
        assert_eq!(got.data.as_deref(), Some("Override.member"));
        assert!(!got.is_array());
    }

    #[test_case("ListInboundShipments", "Fulfillment.ListInboundShipmentsByNextToken")]
    #[test_case(
        "ListInboundShipmentsByNextToken",
        "Fulfillment.ListInboundShipmentsByNextToken"
    )]
    fn resolve_next(action: &str, want: &str) {
        let got = RequestOptions::default()
            .set_name("Fulfillment")
            .resolve(action);
        assert_eq!(got.next.as_deref(), Some(want));
    }

    #[test]
    fn resolve_next_prefers_next_name() {
        let got = RequestOptions::default()
            .set_name("Fulfillment")
            .set_next_name("FulfillmentInventory")
            .resolve("ListInventorySupply");
        assert_eq!(
            got.next.as_deref(),
            Some("FulfillmentInventory.ListInventorySupplyByNextToken")
        );
    }

    #[test]
    fn resolve_next_without_section() {
        let got = RequestOptions::default().resolve("ListOrders");
        assert!(got.next.is_none(), "{got:?}");
    }

    #[test]
    fn resolve_keeps_explicit_values() {
        let got = RequestOptions::default()
            .set_name("Fulfillment")
            .set_base_path("")
            .set_next("Custom.Next")
            .resolve("ListOrders");
        assert_eq!(got.base_path.as_deref(), Some(""));
        assert_eq!(got.next.as_deref(), Some("Custom.Next"));
    }

    #[test]
    fn resolve_base_path() {
        let got = RequestOptions::default().resolve("ListOrders");
        assert_eq!(
            got.base_path.as_deref(),
            Some("ListOrdersResponse.ListOrdersResult")
        );
    }
}
