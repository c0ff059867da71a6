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

use http::header::CONTENT_TYPE;
use http::HeaderMap;

/// Check whether a response carries a JSON body.
///
/// Matches any `Content-Type` with `application/` followed by `json`, case
/// insensitive. This covers `application/json` as well as vendor types like
/// `application/x-amz-json-1.1`.
pub fn is_json_response(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let value = value.to_ascii_lowercase();
    match value.find("application/") {
        Some(idx) => value[idx + "application/".len()..].contains("json"),
        None => false,
    }
}
