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

use std::sync::{Arc, Mutex};

use http::HeaderMap;
use log::debug;
use querysign_core::{Context, Error, ProvideCredential, Result, SigningCredential};

use crate::{
    signed_params, signed_params_v4, Credential, FlatParams, SignV2Options, SignV4Options,
    V4Signer,
};

/// Signer loads credentials and signs query requests with them.
///
/// The last credential is cached and reloaded once it is no longer valid.
#[derive(Clone, Debug)]
pub struct Signer {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = Credential>>,
    credential: Arc<Mutex<Option<Credential>>>,
}

impl Signer {
    /// Create a new signer.
    pub fn new(ctx: Context, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Get a valid credential, loading it from the provider if needed.
    pub async fn credential(&self) -> Result<Credential> {
        let cached = self.credential.lock().expect("lock poisoned").clone();
        if let Some(cred) = cached.filter(|c| c.is_valid()) {
            return Ok(cred);
        }

        debug!("credential is missing or expired, loading from provider");
        let loaded = self
            .provider
            .provide_credential(&self.ctx)
            .await?
            .filter(|c| c.is_valid())
            .ok_or_else(|| Error::credential_invalid("no valid credential found"))?;
        *self.credential.lock().expect("lock poisoned") = Some(loaded.clone());
        Ok(loaded)
    }

    /// Sign `params` with signature v2 and return the request body.
    pub async fn sign_v2(&self, params: FlatParams, opts: &SignV2Options) -> Result<String> {
        let cred = self.credential().await?;
        Ok(signed_params(params, opts, &cred))
    }

    /// Sign a request with signature v4 for `service` in `region`.
    ///
    /// The credential's session token is used unless `opts` carries one.
    pub async fn sign_v4(
        &self,
        service: &str,
        region: &str,
        params: FlatParams,
        headers: HeaderMap,
        opts: &SignV4Options,
    ) -> Result<(String, HeaderMap)> {
        let cred = self.credential().await?;

        let mut opts = opts.clone();
        if opts.session_token.is_none() {
            opts.session_token = cred.session_token.clone();
        }
        let signer = V4Signer::new(service, region, cred);
        signed_params_v4(params, headers, &opts, &signer)
    }
}
