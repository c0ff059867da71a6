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

//! AWS Signature Version 2 for query APIs.
//!
//! - [Signature Version 2 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-2.html)

use log::debug;
use querysign_core::hash::base64_hmac_sha256;
use querysign_core::time::{format_timestamp, now, DateTime};

use crate::constants::*;
use crate::escape::escape;
use crate::{Credential, FlatParams};

/// Endpoint details that go into the v2 string to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignV2Options {
    /// API version, sent as `Version`.
    pub version: String,
    /// Endpoint host, e.g. `ec2.us-east-1.amazonaws.com`.
    pub host: String,
    /// Endpoint port.
    pub port: u16,
    /// Request path, usually `/`.
    pub path: String,
}

impl SignV2Options {
    /// Create options for `host` on port 443 and path `/`.
    pub fn new(host: &str, version: &str) -> Self {
        Self {
            version: version.to_string(),
            host: host.to_string(),
            port: 443,
            path: "/".to_string(),
        }
    }
}

/// Sign `params` with signature v2 at the current time.
///
/// Returns the signed form body, ready to be POSTed to the endpoint.
pub fn signed_params(params: FlatParams, opts: &SignV2Options, cred: &Credential) -> String {
    signed_params_at(params, opts, cred, now())
}

/// Sign `params` with signature v2 at `now`.
///
/// The body is the byte-sorted, escaped parameter list. It is signed as
///
/// ```text
/// POST
/// {host}:{port}
/// {path}
/// {body}
/// ```
///
/// and `Signature` is appended as the last parameter.
pub fn signed_params_at(
    mut params: FlatParams,
    opts: &SignV2Options,
    cred: &Credential,
    now: DateTime,
) -> String {
    params.insert(AWS_ACCESS_KEY_ID_PARAM, &cred.access_key_id);
    params.insert(SIGNATURE_METHOD_PARAM, HMAC_SHA256);
    params.insert(SIGNATURE_VERSION_PARAM, "2");
    params.insert(TIMESTAMP_PARAM, format_timestamp(now));
    params.insert(VERSION_PARAM, &opts.version);
    if let Some(token) = &cred.session_token {
        params.insert(SECURITY_TOKEN_PARAM, token);
    }

    let mut body = params.canonical_body();
    let string_to_sign = format!(
        "POST\n{}:{}\n{}\n{}",
        opts.host, opts.port, opts.path, body
    );
    debug!("calculated string to sign: {string_to_sign}");

    let signature = base64_hmac_sha256(
        cred.secret_access_key.as_bytes(),
        string_to_sign.as_bytes(),
    );

    if !body.is_empty() {
        body.push('&');
    }
    body.push_str(SIGNATURE_PARAM);
    body.push('=');
    body.push_str(&escape(&signature));
    body
}
