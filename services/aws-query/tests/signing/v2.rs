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
use pretty_assertions::assert_eq;
use querysign_aws::{
    escape, indexed_param, signed_params_at, Config, FlatParams, SignV2Options, Signer,
    StaticCredentialProvider,
};
use querysign_core::hash::base64_hmac_sha256;
use querysign_core::Context;

#[test]
fn test_v2_body_is_sorted_with_signature_last() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut params = FlatParams::from([("Action", "TerminateInstances")]);
    params.merge(indexed_param("InstanceId", vec!["i-b", "i-a"]));
    let opts = SignV2Options::new("ec2.us-east-1.amazonaws.com", "2016-11-15");

    let body = signed_params_at(params, &opts, &test_credential(), test_time());

    let unsigned = "AWSAccessKeyId=AKIDEXAMPLE\
                    &Action=TerminateInstances\
                    &InstanceId.1=i-b\
                    &InstanceId.2=i-a\
                    &SignatureMethod=HmacSHA256\
                    &SignatureVersion=2\
                    &Timestamp=2016-11-15T08%3A30%3A00Z\
                    &Version=2016-11-15";
    assert_eq!(
        body,
        format!("{unsigned}&Signature=ePCfFyFtnlLlLO7UfaUP8RE8qE%2BDWFDpdcswVqL6FoM%3D")
    );

    let keys: Vec<&str> = body
        .split('&')
        .map(|pair| pair.split('=').next().unwrap_or_default())
        .collect();
    assert_eq!(keys.last(), Some(&"Signature"));
    let params = keys[..keys.len() - 1].to_vec();
    let mut sorted = params.clone();
    sorted.sort();
    assert_eq!(sorted, params);
}

#[test]
fn test_v2_options_from_config() -> Result<()> {
    let cfg = Config {
        host: Some("compute.example.com".to_string()),
        port: Some(8773),
        path: Some("/services/Cloud".to_string()),
        version: Some("2016-11-15".to_string()),
        region: Some("private-1".to_string()),
        ..Default::default()
    };
    cfg.validate()?;

    let body = signed_params_at(
        FlatParams::from([("Action", "DescribeRegions")]),
        &cfg.v2_options()?,
        &test_credential(),
        test_time(),
    );

    let (unsigned, signature) = body
        .rsplit_once("&Signature=")
        .expect("signature must exist");
    let expected = base64_hmac_sha256(
        b"wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
        format!("POST\ncompute.example.com:8773\n/services/Cloud\n{unsigned}").as_bytes(),
    );
    assert_eq!(signature, escape(&expected));
    Ok(())
}

#[tokio::test]
async fn test_signer_signs_v2() -> Result<()> {
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new("AKIDEXAMPLE", "secret").with_session_token("token"),
    );
    let opts = SignV2Options::new("sts.amazonaws.com", "2011-06-15");

    let body = signer
        .sign_v2(FlatParams::from([("Action", "GetCallerIdentity")]), &opts)
        .await?;

    assert!(body.starts_with("AWSAccessKeyId=AKIDEXAMPLE&Action=GetCallerIdentity&SecurityToken=token&"));
    assert!(body.contains("&Signature="));
    Ok(())
}
