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

//! AWS Signature Version 4 for query and REST-XML APIs.
//!
//! [`signed_params_v4`] prepares the body and headers of a request and asks
//! a [`SignV4`] implementation for the `Authorization` value. [`V4Signer`]
//! is the AWS4-HMAC-SHA256 implementation.
//!
//! - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)

use std::fmt::Debug;
use std::fmt::Write;

use http::header;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use querysign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use querysign_core::time::{format_date, format_iso8601, now, DateTime};
use querysign_core::{Error, Result};

use crate::constants::*;
use crate::{Credential, FlatParams};

/// The request fields a v4 signature covers.
#[derive(Debug, Clone, Copy)]
pub struct V4Request<'a> {
    /// HTTP method.
    pub method: &'a Method,
    /// Headers, already carrying `host` and `x-amz-date`.
    pub headers: &'a HeaderMap,
    /// Request body.
    pub body: &'a str,
    /// Query parameters, unescaped.
    pub query: &'a FlatParams,
    /// Request path, may be percent encoded.
    pub path: &'a str,
}

/// SignV4 computes the `Authorization` header value for a request.
///
/// Implementations own the canonical request, the credential scope and the
/// signing key derivation. Tests can swap in a fixed value.
pub trait SignV4: Debug + Send + Sync {
    /// Sign `req` at `now`.
    fn sign(&self, req: &V4Request<'_>, now: DateTime) -> Result<String>;
}

/// Request details for [`signed_params_v4`].
#[derive(Debug, Clone)]
pub struct SignV4Options {
    /// Endpoint host, sent as the `host` header.
    pub host: String,
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// API version, sent as `Version`.
    pub version: String,
    /// Session token, sent as `x-amz-security-token`.
    pub session_token: Option<String>,
    /// Body to sign as is. When unset the body is built from the params.
    pub body: Option<String>,
    /// Query parameters.
    pub query: FlatParams,
}

impl SignV4Options {
    /// Create options for a `POST /` request to `host`.
    pub fn new(host: &str, version: &str) -> Self {
        Self {
            host: host.to_string(),
            method: Method::POST,
            path: "/".to_string(),
            version: version.to_string(),
            session_token: None,
            body: None,
            query: FlatParams::new(),
        }
    }
}

/// Sign a request with signature v4 at the current time.
///
/// Returns the body to send and the headers including `Authorization`.
pub fn signed_params_v4(
    params: FlatParams,
    headers: HeaderMap,
    opts: &SignV4Options,
    signer: &dyn SignV4,
) -> Result<(String, HeaderMap)> {
    signed_params_v4_at(params, headers, opts, signer, now())
}

/// Sign a request with signature v4 at `now`.
pub fn signed_params_v4_at(
    mut params: FlatParams,
    mut headers: HeaderMap,
    opts: &SignV4Options,
    signer: &dyn SignV4,
    now: DateTime,
) -> Result<(String, HeaderMap)> {
    params.insert(VERSION_PARAM, &opts.version);

    headers.insert(header::HOST, HeaderValue::from_str(&opts.host)?);
    headers.insert(X_AMZ_DATE, HeaderValue::try_from(format_iso8601(now))?);
    if let Some(token) = &opts.session_token {
        let mut value = HeaderValue::from_str(token)?;
        // Set token value sensitive to valid leaking.
        value.set_sensitive(true);
        headers.insert(X_AMZ_SECURITY_TOKEN, value);
    }

    let body = match &opts.body {
        Some(body) => body.clone(),
        None => params.canonical_body(),
    };

    let authorization = signer.sign(
        &V4Request {
            method: &opts.method,
            headers: &headers,
            body: &body,
            query: &opts.query,
            path: &opts.path,
        },
        now,
    )?;
    let mut authorization = HeaderValue::from_str(&authorization)?;
    authorization.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, authorization);

    Ok((body, headers))
}

/// V4Signer implements AWS4-HMAC-SHA256.
///
/// Every header present on the request is signed.
#[derive(Debug, Clone)]
pub struct V4Signer {
    service: String,
    region: String,
    credential: Credential,
}

impl V4Signer {
    /// Create a new signer for `service` in `region`.
    pub fn new(service: &str, region: &str, credential: Credential) -> Self {
        Self {
            service: service.to_string(),
            region: region.to_string(),
            credential,
        }
    }
}

impl SignV4 for V4Signer {
    fn sign(&self, req: &V4Request<'_>, now: DateTime) -> Result<String> {
        let creq = canonical_request_string(req)?;
        debug!("calculated canonical request: {creq}");
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/aws4_request",
            format_date(now),
            self.region,
            self.service
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "AWS4-HMAC-SHA256")?;
            writeln!(f, "{}", format_iso8601(now))?;
            writeln!(f, "{}", &scope)?;
            write!(f, "{}", &encoded_req)?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &self.credential.secret_access_key,
            now,
            &self.region,
            &self.service,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        Ok(format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            self.credential.access_key_id,
            scope,
            signed_header_names(req.headers).join(";"),
            signature
        ))
    }
}

fn canonical_request_string(req: &V4Request<'_>) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", req.method)?;
    // Insert encoded path
    let path = percent_decode_str(req.path)
        .decode_utf8()
        .map_err(|e| Error::request_invalid("path is not valid utf-8").with_source(e))?;
    if path.is_empty() {
        writeln!(f, "/")?;
    } else {
        writeln!(f, "{}", utf8_percent_encode(&path, &AWS_URI_ENCODE_SET))?;
    }
    // Insert query
    writeln!(f, "{}", canonical_query_string(req.query))?;
    // Insert signed headers
    let signed_headers = signed_header_names(req.headers);
    for name in signed_headers.iter() {
        writeln!(f, "{}:{}", name, canonical_header_value(req.headers, name)?)?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;
    // Insert payload hash
    match req.headers.get(X_AMZ_CONTENT_SHA_256) {
        Some(v) => write!(f, "{}", v.to_str()?)?,
        None => write!(f, "{}", hex_sha256(req.body.as_bytes()))?,
    }

    Ok(f)
}

fn canonical_query_string(query: &FlatParams) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .filter_map(|(k, v)| {
            v.map(|v| {
                (
                    utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                    utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
                )
            })
        })
        .collect();
    // Sort by encoded param name
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Header names are already lowercase in `HeaderMap`.
fn signed_header_names(headers: &HeaderMap) -> Vec<&str> {
    let mut names: Vec<&str> = headers.keys().map(|k| k.as_str()).collect();
    names.sort_unstable();
    names
}

/// Trim every value of `name` and join them with `,`.
fn canonical_header_value(headers: &HeaderMap, name: &str) -> Result<String> {
    let values = headers
        .get_all(name)
        .iter()
        .map(|v| Ok(v.to_str()?.trim().to_string()))
        .collect::<Result<Vec<_>>>()?;
    Ok(values.join(","))
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
