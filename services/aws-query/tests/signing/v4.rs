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

use super::{test_credential, test_time};
use anyhow::Result;
use http::{header, HeaderMap, HeaderValue, Method};
use pretty_assertions::assert_eq;
use querysign_aws::{
    indexed_filters, signed_params_v4_at, FlatParams, SignV4, SignV4Options, V4Request, V4Signer,
};
use querysign_core::time::DateTime;
use querysign_core::{Mapping, Value};
use std::sync::Mutex;

/// Records what it was asked to sign.
#[derive(Debug, Default)]
struct RecordingSigner {
    seen: Mutex<Vec<(String, String, String, String)>>,
}

impl SignV4 for RecordingSigner {
    fn sign(&self, req: &V4Request<'_>, now: DateTime) -> querysign_core::Result<String> {
        self.seen.lock().expect("lock poisoned").push((
            req.method.to_string(),
            req.path.to_string(),
            req.body.to_string(),
            now.to_rfc3339(),
        ));
        Ok("recorded".to_string())
    }
}

#[test]
fn test_v4_passes_request_to_signer() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut params = FlatParams::from([("Action", "DescribeVolumes")]);
    params.merge(indexed_filters(&Mapping::from([(
        "status",
        Value::from("available"),
    )])));
    let opts = SignV4Options::new("ec2.us-east-1.amazonaws.com", "2016-11-15");
    let signer = RecordingSigner::default();

    let (body, headers) =
        signed_params_v4_at(params, HeaderMap::new(), &opts, &signer, test_time())?;

    assert_eq!(
        body,
        "Action=DescribeVolumes&Filter.1.Name=status&Filter.1.Value.1=available&Version=2016-11-15"
    );
    assert_eq!(headers[header::AUTHORIZATION], "recorded");
    assert_eq!(headers["x-amz-date"], "20161115T083000Z");
    assert_eq!(headers[header::HOST], "ec2.us-east-1.amazonaws.com");

    let seen = signer.seen.lock().expect("lock poisoned");
    assert_eq!(
        seen.as_slice(),
        &[(
            "POST".to_string(),
            "/".to_string(),
            body.clone(),
            "2016-11-15T08:30:00+00:00".to_string()
        )]
    );
    Ok(())
}

#[test]
fn test_v4_signer_signs_query_request() -> Result<()> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded; charset=utf-8"),
    );
    let opts = SignV4Options::new("ec2.us-east-1.amazonaws.com", "2016-11-15");
    let signer = V4Signer::new("ec2", "us-east-1", test_credential());

    let (_, headers) = signed_params_v4_at(
        FlatParams::from([("Action", "DescribeRegions")]),
        headers,
        &opts,
        &signer,
        test_time(),
    )?;

    let auth = headers[header::AUTHORIZATION].to_str()?;
    assert!(auth.starts_with(
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20161115/us-east-1/ec2/aws4_request, \
         SignedHeaders=content-type;host;x-amz-date, Signature="
    ));
    let signature = auth.rsplit_once("Signature=").map(|(_, v)| v).unwrap_or_default();
    assert_eq!(signature.len(), 64);
    assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    Ok(())
}

#[test]
fn test_v4_signature_covers_body() -> Result<()> {
    let opts = SignV4Options {
        method: Method::POST,
        ..SignV4Options::new("ec2.us-east-1.amazonaws.com", "2016-11-15")
    };
    let signer = V4Signer::new("ec2", "us-east-1", test_credential());

    let sign = |action: &str| -> Result<String> {
        let (_, headers) = signed_params_v4_at(
            FlatParams::from([("Action", action)]),
            HeaderMap::new(),
            &opts,
            &signer,
            test_time(),
        )?;
        Ok(headers[header::AUTHORIZATION].to_str()?.to_string())
    };

    assert_ne!(sign("DescribeRegions")?, sign("DescribeVolumes")?);
    assert_eq!(sign("DescribeRegions")?, sign("DescribeRegions")?);
    Ok(())
}
