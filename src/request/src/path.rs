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

use serde_json::Value;

/// Finds the value at `path` inside `document`.
///
/// The path is a sequence of `.`-separated segments. Segments are looked up
/// by key in objects, and by zero-based index in arrays. Array indices may
/// also be written as `[n]`. An empty path refers to `document` itself.
///
/// # Example
/// ```
/// # use mws_request::path::get;
/// # use serde_json::json;
/// let doc = json!({"A": {"B": [{"C": 1}, {"C": 2}]}});
/// assert_eq!(get(&doc, "A.B.1.C"), Some(&json!(2)));
/// assert_eq!(get(&doc, "A.B[0].C"), Some(&json!(1)));
/// assert_eq!(get(&doc, ""), Some(&doc));
/// assert_eq!(get(&doc, "A.X"), None);
/// ```
pub fn get<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split(['.', '[', ']'])
        .filter(|s| !s.is_empty())
        .try_fold(document, |value, segment| match value {
            Value::Object(object) => object.get(segment),
            Value::Array(array) => segment.parse::<usize>().ok().and_then(|i| array.get(i)),
            _ => None,
        })
}

/// Joins two paths, skipping empty components.
pub(crate) fn join(base: &str, suffix: &str) -> String {
    match (base.is_empty(), suffix.is_empty()) {
        (true, _) => suffix.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}.{suffix}"),
    }
}
