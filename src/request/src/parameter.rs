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

//! Describes the parameters accepted by a request.
//!
//! Schema authors write [ParameterSpec] values, keyed by the name applications
//! use to set them. The declaration key and the name sent over the wire often
//! differ: `ShipFromCity` may be sent as `ShipFromAddress.City`. Before use,
//! the schema is normalized into a [Schema], where every [Parameter] has a
//! resolved canonical name.

use indexmap::IndexMap;
use std::collections::HashMap;

/// The raw parameter declarations for a request, in declaration order.
///
/// The keys are the names applications use to set each parameter.
pub type ParameterSchema = IndexMap<String, ParameterSpec>;

/// The semantics of a parameter value, used to select how it is converted.
///
/// # Example
/// ```
/// # use mws_request::parameter::Type;
/// assert_eq!("timestamp".parse::<Type>().unwrap(), Type::Timestamp);
/// assert_eq!(
///     "fba.ShippingSpeedCategory".parse::<Type>().unwrap(),
///     Type::Enumerated("fba.ShippingSpeedCategory".to_string())
/// );
/// assert_eq!(Type::Boolean.to_string(), "boolean");
/// ```
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde_with::DeserializeFromStr,
    serde_with::SerializeDisplay,
)]
#[non_exhaustive]
pub enum Type {
    /// No conversion.
    #[default]
    Plain,
    /// A string. No conversion.
    String,
    /// Sent as `"true"` or `"false"`.
    Boolean,
    /// An integer. Documents the expected values, but no conversion.
    Integer,
    /// Sent as a calendar date, `YYYY-MM-DD`.
    Date,
    /// Sent as an RFC 3339 timestamp in UTC.
    Timestamp,
    /// A nested object, flattened into `name.child` keys.
    Object,
    /// A request body, such as an uploaded feed. No conversion.
    Body,
    /// A value from a named vocabulary, e.g. `fba.ShippingSpeedCategory`.
    ///
    /// The vocabulary is validated elsewhere. No conversion.
    Enumerated(String),
}

impl Type {
    fn as_str(&self) -> &str {
        match self {
            Self::Plain => "plain",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Date => "date",
            Self::Timestamp => "timestamp",
            Self::Object => "object",
            Self::Body => "body",
            Self::Enumerated(name) => name.as_str(),
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Type {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = match s.to_ascii_lowercase().as_str() {
            "" | "plain" => Self::Plain,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "date" => Self::Date,
            "timestamp" => Self::Timestamp,
            "object" => Self::Object,
            "body" => Self::Body,
            _ => Self::Enumerated(s.to_string()),
        };
        Ok(t)
    }
}

/// The declaration of a single parameter, as written by schema authors.
///
/// All the fields are optional. The most common declaration is simply
/// `{}` (an optional, plain parameter whose wire name is the declaration key)
/// or `{"required": true}`.
///
/// # Example
/// ```
/// # use mws_request::parameter::{ParameterSpec, Type};
/// let spec: ParameterSpec = serde_json::from_value(serde_json::json!({
///     "name": "InboundShipmentItems.member",
///     "required": true,
///     "list": true,
///     "type": "object",
///     "params": {
///         "SellerSKU": { "required": true },
///         "QuantityShipped": { "required": true, "type": "integer" }
///     }
/// }))?;
/// assert!(spec.list);
/// assert_eq!(spec.r#type, Type::Object);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ParameterSpec {
    /// The wire name. Defaults to the declaration key.
    pub name: Option<String>,
    /// If true, the request fails validation unless the parameter is set.
    pub required: bool,
    /// If true, values are sent as `name.1`, `name.2`, etc.
    pub list: bool,
    /// How values are converted before they are sent.
    pub r#type: Type,
    /// The fields of a [Type::Object] parameter.
    pub params: Option<ParameterSchema>,
}

impl ParameterSpec {
    /// Sets the value of [name][ParameterSpec::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = Some(v.into());
        self
    }

    /// Sets the value of [required][ParameterSpec::required].
    pub fn set_required(mut self, v: bool) -> Self {
        self.required = v;
        self
    }

    /// Sets the value of [list][ParameterSpec::list].
    pub fn set_list(mut self, v: bool) -> Self {
        self.list = v;
        self
    }

    /// Sets the value of [r#type][ParameterSpec::r#type].
    pub fn set_type<T: Into<Type>>(mut self, v: T) -> Self {
        self.r#type = v.into();
        self
    }

    /// Sets the value of [params][ParameterSpec::params].
    pub fn set_params<T, K>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, ParameterSpec)>,
        K: Into<String>,
    {
        self.params = Some(v.into_iter().map(|(k, p)| (k.into(), p)).collect());
        self
    }
}

/// Fills in the name of every parameter declared without one.
///
/// The declaration key becomes the name. Nested parameters are resolved too,
/// depth-first. The input is not modified, and resolving a schema twice
/// returns the same schema.
///
/// # Example
/// ```
/// # use mws_request::parameter::{resolve_names, ParameterSchema, ParameterSpec};
/// let schema = ParameterSchema::from_iter([
///     ("ShipmentId".to_string(), ParameterSpec::default()),
///     ("ShipFromCity".to_string(), ParameterSpec::default().set_name("ShipFromAddress.City")),
/// ]);
/// let resolved = resolve_names(&schema);
/// assert_eq!(resolved["ShipmentId"].name.as_deref(), Some("ShipmentId"));
/// assert_eq!(resolved["ShipFromCity"].name.as_deref(), Some("ShipFromAddress.City"));
/// assert_eq!(resolve_names(&resolved), resolved);
/// ```
pub fn resolve_names(schema: &ParameterSchema) -> ParameterSchema {
    schema
        .iter()
        .map(|(key, spec)| {
            let resolved = ParameterSpec {
                name: Some(resolved_name(key, spec)),
                required: spec.required,
                list: spec.list,
                r#type: spec.r#type.clone(),
                params: spec.params.as_ref().map(resolve_names),
            };
            (key.clone(), resolved)
        })
        .collect()
}

fn resolved_name(key: &str, spec: &ParameterSpec) -> String {
    match spec.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => key.to_string(),
    }
}

/// A normalized parameter descriptor.
///
/// Unlike [ParameterSpec], the name is always resolved, and nested parameters
/// are indexed by their canonical names.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    name: String,
    required: bool,
    list: bool,
    r#type: Type,
    params: IndexMap<String, Parameter>,
}

impl Parameter {
    fn from_resolved(key: &str, spec: &ParameterSpec) -> Self {
        let params = spec
            .params
            .iter()
            .flatten()
            .map(|(k, p)| Self::from_resolved(k, p))
            .map(|p| (p.name.clone(), p))
            .collect();
        Self {
            name: resolved_name(key, spec),
            required: spec.required,
            list: spec.list,
            r#type: spec.r#type.clone(),
            params,
        }
    }

    /// The canonical (wire) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the parameter must be set.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns true if the parameter holds a list of values.
    pub fn is_list(&self) -> bool {
        self.list
    }

    /// Returns true if the parameter holds nested objects.
    pub fn is_object(&self) -> bool {
        self.r#type == Type::Object
    }

    /// How values are converted before they are sent.
    pub fn r#type(&self) -> &Type {
        &self.r#type
    }

    /// The nested parameters, in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &Parameter> {
        self.params.values()
    }

    /// Computes the wire key for this parameter.
    ///
    /// `prefix` must be empty or end with a `.`. For lists, `element` is the
    /// 1-based position of the value in the list; it is ignored for other
    /// parameters. Assigning values and validating required parameters both
    /// use this function, so the keys they produce always agree.
    ///
    /// # Example
    /// ```
    /// # use mws_request::parameter::{ParameterSchema, ParameterSpec, Schema};
    /// let schema = Schema::new(&ParameterSchema::from_iter([
    ///     ("Ids".to_string(), ParameterSpec::default().set_name("IdList.member").set_list(true)),
    ///     ("Name".to_string(), ParameterSpec::default()),
    /// ]));
    /// let ids = schema.get("Ids").unwrap();
    /// assert_eq!(ids.wire_key("", 2), "IdList.member.2");
    /// let name = schema.get("Name").unwrap();
    /// assert_eq!(name.wire_key("Items.member.1.", 2), "Items.member.1.Name");
    /// ```
    pub fn wire_key(&self, prefix: &str, element: usize) -> String {
        if self.list {
            format!("{prefix}{}.{element}", self.name)
        } else {
            format!("{prefix}{}", self.name)
        }
    }
}

/// A normalized request schema.
///
/// Built once from a [ParameterSchema], and immutable afterwards. It holds the
/// top-level parameters indexed by canonical name, and the map from the
/// declaration keys to those canonical names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    parameters: IndexMap<String, Parameter>,
    aliases: HashMap<String, String>,
}

impl Schema {
    /// Normalizes `schema`.
    ///
    /// If two declarations resolve to the same canonical name, the last one
    /// wins.
    pub fn new(schema: &ParameterSchema) -> Self {
        let resolved = resolve_names(schema);
        let mut parameters = IndexMap::with_capacity(resolved.len());
        let mut aliases = HashMap::with_capacity(resolved.len());
        for (key, spec) in &resolved {
            let parameter = Parameter::from_resolved(key, spec);
            aliases.insert(key.clone(), parameter.name.clone());
            parameters.insert(parameter.name.clone(), parameter);
        }
        Self {
            parameters,
            aliases,
        }
    }

    /// Maps an application-facing key to its canonical name.
    ///
    /// Keys that are not declaration keys are returned unchanged.
    pub fn canonical<'a>(&'a self, key: &'a str) -> &'a str {
        self.aliases.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Finds the parameter for an application-facing key or canonical name.
    pub fn get(&self, key: &str) -> Option<&Parameter> {
        self.parameters.get(self.canonical(key))
    }

    /// The top-level parameters, in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }

    /// The map from declaration keys to canonical names.
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }
}
