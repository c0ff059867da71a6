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

use crate::{Config, Credential};
use async_trait::async_trait;
use querysign_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider hands out the keys set on a [`Config`].
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new `ConfigCredentialProvider` instance.
    pub fn new(cfg: Arc<Config>) -> Self {
        Self { config: cfg }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let (Some(ak), Some(sk)) = (&self.config.access_key_id, &self.config.secret_access_key)
        else {
            return Ok(None);
        };

        Ok(Some(Credential {
            access_key_id: ak.clone(),
            secret_access_key: sk.clone(),
            session_token: self.config.session_token.clone(),
            expires_in: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_credential_provider() -> anyhow::Result<()> {
        let cfg = Config {
            access_key_id: Some("ak".to_string()),
            secret_access_key: Some("sk".to_string()),
            session_token: Some("token".to_string()),
            ..Default::default()
        };

        let cred = ConfigCredentialProvider::new(Arc::new(cfg))
            .provide_credential(&Context::new())
            .await?
            .expect("credential must exist");
        assert_eq!(cred.access_key_id, "ak");
        assert_eq!(cred.secret_access_key, "sk");
        assert_eq!(cred.session_token.as_deref(), Some("token"));
        Ok(())
    }

    #[tokio::test]
    async fn test_config_credential_provider_without_secret() -> anyhow::Result<()> {
        let cfg = Config {
            access_key_id: Some("ak".to_string()),
            ..Default::default()
        };

        let cred = ConfigCredentialProvider::new(Arc::new(cfg))
            .provide_credential(&Context::new())
            .await?;
        assert!(cred.is_none());
        Ok(())
    }
}
