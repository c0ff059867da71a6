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

use percent_encoding::utf8_percent_encode;

use crate::constants::AWS_QUERY_ENCODE_SET;

/// Percent-encode `s` for signature base strings and form bodies.
///
/// Every byte outside `A-Z a-z 0-9 _ . - ~` becomes `%XX` with uppercase
/// hex digits. Multi-byte characters are encoded byte by byte.
///
/// ```
/// assert_eq!(querysign_aws::escape("a b+c"), "a%20%2Bc");
/// ```
pub fn escape(s: &str) -> String {
    utf8_percent_encode(s, &AWS_QUERY_ENCODE_SET).to_string()
}
