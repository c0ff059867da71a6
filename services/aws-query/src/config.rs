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

use std::fmt::{Debug, Formatter};

use querysign_core::utils::Redact;
use querysign_core::{Context, Error, Result};
use serde::Deserialize;

use crate::constants::*;
use crate::region::validate_region;
use crate::SignV2Options;

/// Config for query signing.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    pub region: Option<String>,
    /// Endpoint host, e.g. `ec2.us-east-1.amazonaws.com`.
    pub host: Option<String>,
    /// Endpoint port, default to 443.
    pub port: Option<u16>,
    /// Request path, default to `/`.
    pub path: Option<String>,
    /// API version sent as `Version`.
    pub version: Option<String>,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `session_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SESSION_TOKEN`]
    pub session_token: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("version", &self.version)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .finish()
    }
}

impl Config {
    /// Fill unset fields from the env of `ctx`.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let envs = ctx.env_vars();

        if self.region.is_none() {
            self.region = envs.get(AWS_REGION).cloned();
        }
        if self.access_key_id.is_none() {
            self.access_key_id = envs.get(AWS_ACCESS_KEY_ID).cloned();
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = envs.get(AWS_SECRET_ACCESS_KEY).cloned();
        }
        if self.session_token.is_none() {
            self.session_token = envs.get(AWS_SESSION_TOKEN).cloned();
        }

        self
    }

    /// Check the region against the host.
    ///
    /// A config without region is valid.
    pub fn validate(&self) -> Result<()> {
        match &self.region {
            Some(region) => validate_region(region, self.host.as_deref()),
            None => Ok(()),
        }
    }

    /// Build signature v2 options from this config.
    pub fn v2_options(&self) -> Result<SignV2Options> {
        let host = self
            .host
            .as_deref()
            .ok_or_else(|| Error::config_invalid("host is required for signing"))?;
        let version = self
            .version
            .as_deref()
            .ok_or_else(|| Error::config_invalid("version is required for signing"))?;

        let mut opts = SignV2Options::new(host, version);
        if let Some(port) = self.port {
            opts.port = port;
        }
        if let Some(path) = &self.path {
            opts.path = path.clone();
        }
        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use querysign_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    #[test]
    fn test_from_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (AWS_REGION.to_string(), "eu-west-1".to_string()),
                (AWS_ACCESS_KEY_ID.to_string(), "ak".to_string()),
                (AWS_SECRET_ACCESS_KEY.to_string(), "sk".to_string()),
            ]),
        });

        let cfg = Config {
            region: Some("us-east-1".to_string()),
            ..Default::default()
        }
        .from_env(&ctx);

        // Explicit values win over env.
        assert_eq!(cfg.region.as_deref(), Some("us-east-1"));
        assert_eq!(cfg.access_key_id.as_deref(), Some("ak"));
        assert_eq!(cfg.secret_access_key.as_deref(), Some("sk"));
        assert_eq!(cfg.session_token, None);
    }

    #[test]
    fn test_deserialize() -> anyhow::Result<()> {
        let cfg: Config = serde_json::from_str(
            r#"{"region": "us-west-2", "host": "ec2.us-west-2.amazonaws.com", "version": "2016-11-15"}"#,
        )?;

        assert_eq!(cfg.region.as_deref(), Some("us-west-2"));
        assert_eq!(cfg.port, None);
        cfg.validate()?;

        let opts = cfg.v2_options()?;
        assert_eq!(opts.host, "ec2.us-west-2.amazonaws.com");
        assert_eq!(opts.port, 443);
        assert_eq!(opts.path, "/");
        Ok(())
    }

    #[test]
    fn test_validate() {
        let cfg = Config {
            region: Some("mars-1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            cfg.validate().expect_err("must fail").kind(),
            ErrorKind::InvalidRegion
        );

        let cfg = Config {
            region: Some("mars-1".to_string()),
            host: Some("localhost".to_string()),
            ..Default::default()
        };
        cfg.validate().expect("custom host must skip region check");

        Config::default().validate().expect("empty config is valid");
    }

    #[test]
    fn test_v2_options_requires_host_and_version() {
        let cfg = Config {
            host: Some("ec2.amazonaws.com".to_string()),
            ..Default::default()
        };
        let err = cfg.v2_options().expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let cfg = Config {
            host: Some("localhost".to_string()),
            version: Some("2016-11-15".to_string()),
            port: Some(8773),
            path: Some("/services/Cloud".to_string()),
            ..Default::default()
        };
        let opts = cfg.v2_options().expect("must succeed");
        assert_eq!(opts.port, 8773);
        assert_eq!(opts.path, "/services/Cloud");
    }

    #[test]
    fn test_debug_is_redacted() {
        let cfg = Config {
            secret_access_key: Some("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string()),
            ..Default::default()
        };
        assert!(!format!("{cfg:?}").contains("wJalrXUtnFEMI"));
    }
}
