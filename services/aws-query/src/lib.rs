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

//! AWS query API signing for querysign.
//!
//! This crate turns a parameter tree into the signed form body AWS query
//! services (EC2, IAM, STS, ELB, RDS...) expect.
//!
//! ## Overview
//!
//! 1. Rename keys with [`querysign_core::key_map`].
//! 2. Flatten the tree with one of [`indexed_param`], [`serialize_keys`],
//!    [`indexed_request_param`] or [`indexed_filters`].
//! 3. Sign with [`signed_params`] (signature v2) or [`signed_params_v4`].
//!
//! ## Example
//!
//! ```
//! use querysign_aws::{serialize_keys, signed_params, Credential, FlatParams, SignV2Options};
//! use querysign_core::{Mapping, Value};
//!
//! let mut params = FlatParams::from([("Action", "CreateTags")]);
//! params.merge(serialize_keys(
//!     "Tag",
//!     Value::from(vec![Mapping::from([("Key", "env"), ("Value", "prod")])]),
//! ));
//!
//! let opts = SignV2Options::new("ec2.us-east-1.amazonaws.com", "2016-11-15");
//! let body = signed_params(params, &opts, &Credential::new("ak", "sk"));
//!
//! assert!(body.contains("&Tag.member.1.Key=env&"));
//! assert!(body.contains("&Signature="));
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod escape;
pub use escape::escape;

mod flatten;
pub use flatten::{
    indexed_filters, indexed_param, indexed_request_param, serialize_keys, FlatParams,
};

mod provide_credential;
pub use provide_credential::*;

mod region;
pub use region::{regions, validate_region};

mod response;
pub use response::is_json_response;

mod security_group;
pub use security_group::{parse_security_group_options, SecurityGroupRef};

mod sign_v2;
pub use sign_v2::{signed_params, signed_params_at, SignV2Options};

mod sign_v4;
pub use sign_v4::{signed_params_v4, signed_params_v4_at, SignV4, SignV4Options, V4Request, V4Signer};

mod signer;
pub use signer::Signer;
