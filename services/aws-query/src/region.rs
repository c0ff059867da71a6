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

use log::debug;
use once_cell::sync::Lazy;
use querysign_core::{Error, Result};

use crate::constants::AWS_DOMAIN_SUFFIX;

static REGIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "ap-northeast-1",
        "ap-northeast-2",
        "ap-southeast-1",
        "ap-southeast-2",
        "eu-central-1",
        "ca-central-1",
        "eu-west-1",
        "eu-west-2",
        "us-east-1",
        "us-east-2",
        "us-west-1",
        "us-west-2",
        "sa-east-1",
        "cn-north-1",
        "us-gov-west-1",
        "ap-south-1",
    ]
});

/// Regions accepted for requests sent to AWS itself.
pub fn regions() -> &'static [&'static str] {
    &REGIONS
}

/// Check `region` against the known regions.
///
/// The check only applies when `host` is unset or an AWS endpoint
/// (ends with `.amazonaws.com`). Requests to any other host pass, so
/// compatible services with their own region names keep working.
pub fn validate_region(region: &str, host: Option<&str>) -> Result<()> {
    if let Some(host) = host {
        if !host.ends_with(AWS_DOMAIN_SUFFIX) {
            debug!("skip region check for non aws host: {host}");
            return Ok(());
        }
    }

    if !REGIONS.iter().any(|r| *r == region) {
        return Err(Error::invalid_region(format!("Unknown region: {region:?}")));
    }

    Ok(())
}
