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

mod core_error;
pub use core_error::*;

/// Errors converting a value to its transport representation.
mod coercion;
pub use coercion::CoercionError;

/// Errors detected while assigning or validating request parameters.
///
/// These errors occur when a required parameter is missing, or when the
/// application sets a parameter the schema does not declare. The builder fails
/// these requests locally because the service would reject them anyway.
mod validation;
pub use validation::{UnknownParameterError, ValidationError};
