// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment exactly once at startup and
//! then passed by reference into the components that need it (the token
//! codec, the listener). Nothing reads the environment after startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | Token signing secret | Required |
//! | `JWT_ISSUER` | `iss` claim stamped on issued tokens | `gatehouse` |
//! | `TOKEN_TTL_SECS` | Token lifetime in seconds | `86400` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Process configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Process-wide token signing secret
    pub jwt_secret: String,
    /// Issuer stamped on every issued token
    pub issuer: String,
    /// Lifetime of issued tokens, in seconds
    pub token_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "gatehouse".to_string());

        let token_ttl_secs = match env::var("TOKEN_TTL_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("TOKEN_TTL_SECS", raw))?,
            Err(_) => 86_400,
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            issuer,
            token_ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var state is process-global and tests run in parallel, so the env
    // cases live in one test body.
    #[test]
    fn from_env_requires_secret_and_applies_defaults() {
        std::env::remove_var("JWT_SECRET");
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("JWT_ISSUER");
        std::env::remove_var("TOKEN_TTL_SECS");

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));

        std::env::set_var("JWT_SECRET", "test-secret");
        let config = Config::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.issuer, "gatehouse");
        assert_eq!(config.token_ttl_secs, 86_400);
        std::env::remove_var("JWT_SECRET");
    }
}
