// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Flatten parameter trees into the indexed query parameters AWS expects.
//!
//! AWS services disagree on how a list is spelled on the wire, so there is
//! one function per dialect:
//!
//! | function                   | list element key        |
//! |----------------------------|-------------------------|
//! | [`indexed_param`]          | `InstanceId.1`          |
//! | [`serialize_keys`]         | `Tags.member.1`         |
//! | [`indexed_request_param`]  | `Attribute.0`           |
//! | [`indexed_filters`]        | `Filter.1.Value.1`      |
//!
//! Indexes always follow the order of the input, never the order of keys.

use std::collections::btree_map;
use std::collections::BTreeMap;

use querysign_core::{Mapping, Value};

use crate::escape::escape;

/// FlatParams is the flattened wire form of a request's parameters.
///
/// Keys iterate in byte-wise lexicographic order, which is the order both
/// signature versions require. A key may hold an absent value: it stays in
/// the map but is left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatParams(BTreeMap<String, Option<String>>);

impl FlatParams {
    /// Create empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Some(value.into()));
    }

    /// Set `key` to a possibly absent value.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        self.0.insert(key.into(), value.map(Into::into));
    }

    /// Get the value of `key`, `None` if missing or absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    /// Check whether `key` exists, even with an absent value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove `key`.
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.0.remove(key)
    }

    /// Merge all entries of `other`, its values win.
    pub fn merge(&mut self, other: FlatParams) {
        self.0.extend(other.0);
    }

    /// Number of keys, including absent ones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in byte-wise key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Build the canonical form body: `key=escape(value)` joined by `&`,
    /// sorted by key, absent values skipped.
    ///
    /// Keys are written as is. Wire keys only ever contain unreserved
    /// characters.
    pub fn canonical_body(&self) -> String {
        let mut body = String::with_capacity(self.0.len() * 32);
        for (key, value) in &self.0 {
            let Some(value) = value else {
                continue;
            };
            if !body.is_empty() {
                body.push('&');
            }
            body.push_str(key);
            body.push('=');
            body.push_str(&escape(value));
        }
        body
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = FlatParams::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FlatParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for FlatParams {
    fn from(v: [(K, V); N]) -> Self {
        FlatParams::from_iter(v)
    }
}

impl IntoIterator for FlatParams {
    type Item = (String, Option<String>);
    type IntoIter = btree_map::IntoIter<String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Flatten a list under a numbered key template, counting from 1.
///
/// The first `%d` in `template` is replaced by the index; a template without
/// `%d` gets `.%d` appended. Mapping elements produce one entry per key
/// under `template(i).key`; other elements produce `template(i)`.
///
/// ```
/// use querysign_aws::indexed_param;
///
/// let params = indexed_param("InstanceId", vec!["i-1", "i-2"]);
/// assert_eq!(params.get("InstanceId.1"), Some("i-1"));
/// assert_eq!(params.get("InstanceId.2"), Some("i-2"));
/// ```
pub fn indexed_param(template: &str, values: impl Into<Value>) -> FlatParams {
    let template = if template.contains("%d") {
        template.to_string()
    } else {
        format!("{template}.%d")
    };

    let mut params = FlatParams::new();
    for (idx, value) in values.into().into_sequence().into_iter().enumerate() {
        let key = template.replacen("%d", &(idx + 1).to_string(), 1);
        match value {
            Value::Mapping(m) => {
                for (sub_key, sub_value) in m {
                    serialize_into(&mut params, format!("{key}.{sub_key}"), sub_value);
                }
            }
            v => serialize_into(&mut params, key, v),
        }
    }
    params
}

/// Flatten `value` under `key` using the `member.N` list convention of
/// query and REST-XML services.
///
/// Mappings append `.key`, sequences append `.member.N` counting from 1 and
/// scalars end the recursion.
///
/// ```
/// use querysign_aws::serialize_keys;
/// use querysign_core::Value;
///
/// let tags = Value::from(vec![Value::from([("Key", "env"), ("Value", "prod")])]);
/// let params = serialize_keys("Tag", tags);
/// assert_eq!(params.get("Tag.member.1.Key"), Some("env"));
/// assert_eq!(params.get("Tag.member.1.Value"), Some("prod"));
/// ```
pub fn serialize_keys(key: &str, value: impl Into<Value>) -> FlatParams {
    let mut params = FlatParams::new();
    serialize_into(&mut params, key.to_string(), value.into());
    params
}

fn serialize_into(params: &mut FlatParams, key: String, value: Value) {
    match value {
        Value::Mapping(m) => {
            for (k, v) in m {
                serialize_into(params, format!("{key}.{k}"), v);
            }
        }
        Value::Sequence(items) => {
            for (idx, v) in items.into_iter().enumerate() {
                serialize_into(params, format!("{key}.member.{}", idx + 1), v);
            }
        }
        Value::Scalar(s) => params.insert(key, s),
    }
}

/// Flatten a list under `name.N`, counting from 0.
///
/// ```
/// use querysign_aws::indexed_request_param;
///
/// let params = indexed_request_param("Attribute", vec!["a", "b"]);
/// assert_eq!(params.get("Attribute.0"), Some("a"));
/// assert_eq!(params.get("Attribute.1"), Some("b"));
/// ```
pub fn indexed_request_param(name: &str, values: impl Into<Value>) -> FlatParams {
    let mut params = FlatParams::new();
    for (idx, value) in values.into().into_sequence().into_iter().enumerate() {
        serialize_into(&mut params, format!("{name}.{idx}"), value);
    }
    params
}

/// Flatten EC2 style filters.
///
/// The filter at position `i` (from 1) produces `Filter.i.Name` and one
/// `Filter.i.Value.j` (from 1) per value. A single value counts as a list
/// of one.
///
/// ```
/// use querysign_aws::indexed_filters;
/// use querysign_core::{Mapping, Value};
///
/// let filters = Mapping::from([("instance-state-name", Value::from(vec!["running"]))]);
/// let params = indexed_filters(&filters);
/// assert_eq!(params.get("Filter.1.Name"), Some("instance-state-name"));
/// assert_eq!(params.get("Filter.1.Value.1"), Some("running"));
/// ```
pub fn indexed_filters(filters: &Mapping) -> FlatParams {
    let mut params = FlatParams::new();
    for (key_idx, (name, values)) in filters.iter().enumerate() {
        let key_idx = key_idx + 1;
        params.insert(format!("Filter.{key_idx}.Name"), name);
        for (value_idx, value) in values.clone().into_sequence().into_iter().enumerate() {
            serialize_into(
                &mut params,
                format!("Filter.{key_idx}.Value.{}", value_idx + 1),
                value,
            );
        }
    }
    params
}
