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

/// One or more required parameters were not set.
///
/// The builder checks all the required parameters before reporting an error,
/// so a single error lists every missing wire key. The keys are reported in
/// schema declaration order, with nested keys (e.g. `Items.member.1.SellerSKU`)
/// following their parent.
///
/// # Example
/// ```
/// # use mws_request::error::ValidationError;
/// let e = ValidationError::new(vec!["ShipmentId".to_string()]);
/// assert_eq!(e.to_string(), "missing required parameter: ShipmentId");
/// ```
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub struct ValidationError {
    missing: Vec<String>,
}

impl ValidationError {
    /// Creates a new error from the list of missing wire keys.
    pub fn new(missing: Vec<String>) -> Self {
        Self { missing }
    }

    /// The wire keys of all the missing parameters.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = if self.missing.len() > 1 { "s" } else { "" };
        write!(
            f,
            "missing required parameter{plural}: {}",
            self.missing.join(", ")
        )
    }
}

/// The application set a parameter that is not part of the request schema.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("the request has no parameter named `{0}`")]
pub struct UnknownParameterError(pub String);
