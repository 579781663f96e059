//! Document security configuration.
//!
//! # Environment Variables
//!
//! - `SECURITY_PERMISSIONS`: comma separated `name=bit` pairs in schema order
//!   (default: `view=64,add=32,edit=16,delete=8,archive=4,live=2,security=1`)
//! - `SECURITY_ROLE_PREFIX`: prefix of the per-role node properties
//!   (default: `sec:role-`); must not contain `*` or `|`

use std::env;
use strata_core::permissions::{PermissionBit, PermissionSchema};
use strata_core::SchemaError;
use thiserror::Error;

pub const DEFAULT_ROLE_PREFIX: &str = "sec:role-";

/// Characters with a meaning in property name patterns.
const PATTERN_METACHARACTERS: [char; 2] = ['*', '|'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid SECURITY_PERMISSIONS entry '{0}', expected name=bit")]
    InvalidPermissionEntry(String),

    #[error("SECURITY_ROLE_PREFIX must not be empty")]
    EmptyRolePrefix,

    #[error("SECURITY_ROLE_PREFIX '{0}' must not contain '*' or '|'")]
    InvalidRolePrefix(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityConfig {
    /// Permission names and bits in schema order.
    pub permissions: Vec<PermissionBit>,

    /// Prefix of the per-role permission properties (`<prefix><role id>`).
    pub role_property_prefix: String,
}

impl SecurityConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup` instead of the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let permissions = match lookup("SECURITY_PERMISSIONS") {
            Some(raw) if !raw.trim().is_empty() => parse_permissions(&raw)?,
            _ => defaults.permissions,
        };

        let role_property_prefix = match lookup("SECURITY_ROLE_PREFIX") {
            Some(prefix) if prefix.trim().is_empty() => return Err(ConfigError::EmptyRolePrefix),
            Some(prefix) if prefix.contains(PATTERN_METACHARACTERS) => {
                return Err(ConfigError::InvalidRolePrefix(prefix));
            }
            Some(prefix) => prefix.trim().to_string(),
            None => defaults.role_property_prefix,
        };

        let config = Self {
            permissions,
            role_property_prefix,
        };
        config.schema()?;

        Ok(config)
    }

    /// Builds the validated permission schema.
    pub fn schema(&self) -> Result<PermissionSchema, SchemaError> {
        PermissionSchema::try_from(self.permissions.clone())
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            permissions: PermissionSchema::default().into(),
            role_property_prefix: DEFAULT_ROLE_PREFIX.into(),
        }
    }
}

fn parse_permissions(raw: &str) -> Result<Vec<PermissionBit>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, bit) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidPermissionEntry(entry.to_string()))?;
            let bit = bit
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPermissionEntry(entry.to_string()))?;

            Ok(PermissionBit {
                name: name.trim().to_string(),
                bit,
            })
        })
        .collect()
}
