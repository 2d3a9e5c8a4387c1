// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8000` |
//! | `AUTH_SERVICE_URL` | Base URL of the auth service (token verification) | Required |
//! | `USER_SERVICE_URL` | Base URL of the user service | Required |
//! | `POST_SERVICE_URL` | Base URL of the post service (posts, categories, comments, likes) | Required |
//! | `RPC_TIMEOUT_SECS` | Timeout of every backend call, in seconds | `10` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

use url::Url;

use crate::logging::LogFormat;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const AUTH_SERVICE_URL_ENV: &str = "AUTH_SERVICE_URL";
pub const USER_SERVICE_URL_ENV: &str = "USER_SERVICE_URL";
pub const POST_SERVICE_URL_ENV: &str = "POST_SERVICE_URL";
pub const RPC_TIMEOUT_SECS_ENV: &str = "RPC_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub auth_service_url: Url,
    pub user_service_url: Url,
    pub post_service_url: Url,
    pub rpc_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |var: &'static str| lookup(var).filter(|v| !v.trim().is_empty());

        let port = match value(PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                var: PORT_ENV,
                message: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let rpc_timeout_secs: u64 = match value(RPC_TIMEOUT_SECS_ENV) {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                var: RPC_TIMEOUT_SECS_ENV,
                message: format!("{e}"),
            })?,
            None => DEFAULT_RPC_TIMEOUT_SECS,
        };
        if rpc_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: RPC_TIMEOUT_SECS_ENV,
                message: "must be greater than zero".to_string(),
            });
        }

        let log_format = match value(LOG_FORMAT_ENV) {
            Some(raw) => LogFormat::from_str(&raw).ok_or_else(|| ConfigError::Invalid {
                var: LOG_FORMAT_ENV,
                message: format!("expected `json` or `pretty`, got `{raw}`"),
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            host: value(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            auth_service_url: service_url(AUTH_SERVICE_URL_ENV, value(AUTH_SERVICE_URL_ENV))?,
            user_service_url: service_url(USER_SERVICE_URL_ENV, value(USER_SERVICE_URL_ENV))?,
            post_service_url: service_url(POST_SERVICE_URL_ENV, value(POST_SERVICE_URL_ENV))?,
            rpc_timeout: Duration::from_secs(rpc_timeout_secs),
            log_format,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn service_url(var: &'static str, raw: Option<String>) -> Result<Url, ConfigError> {
    let raw = raw.ok_or(ConfigError::Missing(var))?;
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        var,
        message: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            var,
            message: format!("unsupported scheme `{other}`"),
        }),
    }
}
