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

//! Schema-driven request construction for MWS-style query APIs.
//!
//! These APIs do not accept structured documents. Every request is a flat set
//! of key/value pairs, where nested objects and lists are encoded in the keys
//! themselves: `Address.City`, `ShipmentIdList.member.1`,
//! `Items.member.2.SellerSKU`, and so on.
//!
//! This crate turns a declarative [ParameterSchema][parameter::ParameterSchema]
//! and a series of user supplied values into such a flat query map. It also
//! extracts the result payload and the next page token from (already parsed)
//! responses. It does not send requests, sign them, or parse wire formats.
//!
//! # Example
//! ```
//! # use mws_request::parameter::{ParameterSchema, ParameterSpec, Type};
//! # use mws_request::options::RequestOptions;
//! # use mws_request::request::Request;
//! let schema = ParameterSchema::from_iter([
//!     ("SellerSKU".to_string(), ParameterSpec::default().set_required(true)),
//!     (
//!         "Qty".to_string(),
//!         ParameterSpec::default()
//!             .set_name("Quantity")
//!             .set_type(Type::Integer),
//!     ),
//! ]);
//! let mut request = Request::new("ListThings", &schema, RequestOptions::default());
//! request.set("SellerSKU", "ABC")?.set("Qty", 5)?;
//! let query = request.query()?;
//! assert_eq!(query.get("SellerSKU"), Some(&serde_json::json!("ABC")));
//! assert_eq!(query.get("Quantity"), Some(&serde_json::json!(5)));
//! # Ok::<(), mws_request::error::Error>(())
//! ```

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The error types returned while building requests.
pub mod error;

/// Parameter descriptors, type tags, and schema normalization.
pub mod parameter;

/// Converts user supplied values to their transport representation.
pub mod coerce;

/// Per-endpoint configuration.
pub mod options;

/// Navigation of parsed response documents.
pub mod path;

/// The request builder and response accessors.
pub mod request;
