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

//! Key renaming between idiomatic snake_case keys and AWS CamelCase wire keys.
//!
//! Renaming walks a [`Value`] tree and rewrites every mapping key. A
//! [`MappingTable`] overrides the default rule for the keys it names:
//!
//! ```
//! use querysign_core::key_map::{map_to_wire_case, MappingTable};
//! use querysign_core::Value;
//!
//! let table = MappingTable::new().nested(
//!     "tags",
//!     "Tag",
//!     MappingTable::new().rename("key", "Key"),
//! );
//! let v = Value::from([(
//!     "tags",
//!     Value::from(vec![Value::from([("key", "env"), ("propagate_at_launch", "true")])]),
//! )]);
//!
//! let wire = map_to_wire_case(v, Some(&table));
//! assert_eq!(
//!     wire,
//!     Value::from([(
//!         "Tag",
//!         Value::from(vec![Value::from([("Key", "env"), ("PropagateAtLaunch", "true")])]),
//!     )])
//! );
//! ```

use crate::value::{Mapping, Value};

/// Override for a single source key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMapping {
    /// Rename the key, leave its value to the default rule.
    Rename(String),
    /// Rename the key and rename the keys below it with the nested table.
    Nested(String, MappingTable),
}

impl KeyMapping {
    /// The destination key.
    pub fn destination(&self) -> &str {
        match self {
            KeyMapping::Rename(dest) => dest,
            KeyMapping::Nested(dest, _) => dest,
        }
    }
}

/// MappingTable maps source keys to their wire keys.
///
/// Every source key has exactly one destination; inserting a source twice
/// replaces the earlier entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<(String, KeyMapping)>,
}

impl MappingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain rename.
    pub fn rename(self, source: impl Into<String>, dest: impl Into<String>) -> Self {
        self.with(source, KeyMapping::Rename(dest.into()))
    }

    /// Add a rename whose value is renamed with `table`.
    pub fn nested(
        self,
        source: impl Into<String>,
        dest: impl Into<String>,
        table: MappingTable,
    ) -> Self {
        self.with(source, KeyMapping::Nested(dest.into(), table))
    }

    /// Add an entry.
    pub fn with(mut self, source: impl Into<String>, mapping: KeyMapping) -> Self {
        let source = source.into();
        match self.entries.iter_mut().find(|(k, _)| *k == source) {
            Some((_, m)) => *m = mapping,
            None => self.entries.push((source, mapping)),
        }
        self
    }

    /// Lookup the override of `source`.
    pub fn get(&self, source: &str) -> Option<&KeyMapping> {
        self.entries
            .iter()
            .find(|(k, _)| k == source)
            .map(|(_, m)| m)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyMapping)> {
        self.entries.iter().map(|(k, m)| (k.as_str(), m))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Swap sources and destinations, recursively.
    ///
    /// For a table that is a bijection, inverting twice gives back an
    /// equal table.
    pub fn invert(&self) -> MappingTable {
        self.entries
            .iter()
            .fold(MappingTable::new(), |acc, (source, mapping)| match mapping {
                KeyMapping::Rename(dest) => acc.rename(dest.clone(), source.clone()),
                KeyMapping::Nested(dest, table) => {
                    acc.nested(dest.clone(), source.clone(), table.invert())
                }
            })
    }
}

/// Swap sources and destinations of `table`, recursively.
pub fn invert_mapping_table(table: &MappingTable) -> MappingTable {
    table.invert()
}

/// Rewrite every mapping key in `value`.
///
/// Keys named by `table` use its override. Other keys go through `rename`,
/// or stay as they are when `rename` is `None`. Values below an overridden
/// key only see the nested table, never the parent one.
pub fn map_keys(
    value: Value,
    table: Option<&MappingTable>,
    rename: Option<&dyn Fn(&str) -> String>,
) -> Value {
    match value {
        Value::Mapping(m) => {
            let mut out = Mapping::with_capacity(m.len());
            for (key, val) in m {
                let (new_key, new_val) = match table.and_then(|t| t.get(&key)) {
                    Some(KeyMapping::Nested(dest, sub)) => {
                        (dest.clone(), map_keys(val, Some(sub), rename))
                    }
                    Some(KeyMapping::Rename(dest)) => (dest.clone(), map_keys(val, None, rename)),
                    None => {
                        let new_key = match rename {
                            Some(f) => f(&key),
                            None => key,
                        };
                        (new_key, map_keys(val, None, rename))
                    }
                };
                out.insert(new_key, new_val);
            }
            Value::Mapping(out)
        }
        Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(|v| map_keys(v, table, rename))
                .collect(),
        ),
        v => v,
    }
}

/// Rename keys into AWS wire form: `auto_scaling` becomes `AutoScaling`.
pub fn map_to_wire_case(value: Value, table: Option<&MappingTable>) -> Value {
    let rename: &dyn Fn(&str) -> String = &to_wire_case;
    map_keys(value, table, Some(rename))
}

/// Rename keys from AWS wire form: `GroupId` becomes `group_id`.
pub fn map_from_wire_case(value: Value, table: Option<&MappingTable>) -> Value {
    let rename: &dyn Fn(&str) -> String = &from_wire_case;
    map_keys(value, table, Some(rename))
}

/// Convert a single key into wire case.
///
/// Keys with underscores are split into words, each word capitalized and
/// joined. A key without underscores is split before every uppercase ASCII
/// letter instead, so already camel cased keys like `groupId` become
/// `GroupId`. The empty key stays empty.
pub fn to_wire_case(key: &str) -> String {
    let mut words: Vec<&str> = key.split('_').collect();
    // Trailing separators don't make words.
    while words.len() > 1 && words.last() == Some(&"") {
        words.pop();
    }

    if words.len() > 1 {
        words.into_iter().map(capitalize).collect()
    } else {
        split_uppercase(words[0]).into_iter().map(capitalize).collect()
    }
}

/// Convert a single wire key into snake case.
///
/// The key is split before every uppercase ASCII letter, joined with `_`
/// and lowercased. The empty key stays empty.
pub fn from_wire_case(key: &str) -> String {
    split_uppercase(key).join("_").to_lowercase()
}

/// Split before every uppercase ASCII letter except at the very start.
fn split_uppercase(s: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, c) in s.char_indices() {
        if idx > start && c.is_ascii_uppercase() {
            pieces.push(&s[start..idx]);
            start = idx;
        }
    }
    if start < s.len() {
        pieces.push(&s[start..]);
    }
    pieces
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}
