//! Configuration for Warden.
//!
//! Configuration is a TOML document with two optional sections:
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [permissions]
//! "group:read" = [
//!     ["group_readable_by_world"],
//!     ["group_readable_by_members", "group_has_user_as_member"],
//! ]
//! ```
//!
//! The `permissions` table composes predicates that are already registered,
//! by name. It cannot define new predicates. When it is absent the
//! application falls back to its built-in permission map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::{ConfigError, Result};
use crate::model::{Clause, PermissionMap};
use crate::registry::PredicateRegistry;

/// Log level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every predicate result.
    Trace,

    /// Per-permission plans and denials.
    Debug,

    /// Resolution summaries.
    Info,

    /// Suspicious configuration.
    #[default]
    Warn,

    /// Errors only.
    Error,
}

impl LogLevel {
    /// Get the name of this log level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// The equivalent `tracing` level.
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    /// Case-insensitive; accepts `warning` and `err` as aliases.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            other => Err(ConfigError::Invalid(format!("unknown log level '{}'", other))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level to emit
    #[serde(default)]
    pub level: LogLevel,
}

/// Permission names mapped to clauses of predicate names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMapConfig {
    /// Clauses per permission; each clause lists predicate names.
    pub permissions: BTreeMap<String, Vec<Vec<String>>>,
}

impl PermissionMapConfig {
    /// Build a permission map by looking up every predicate name.
    ///
    /// # Arguments
    ///
    /// * `registry` - The registry to look names up in.
    ///
    /// # Returns
    ///
    /// * `Ok(PermissionMap)` - The permission map.
    /// * `Err(ConfigError::UnknownPredicate)` - If a name is not registered.
    pub fn to_permission_map<I, C>(
        &self,
        registry: &PredicateRegistry<I, C>,
    ) -> std::result::Result<PermissionMap, ConfigError> {
        let mut map = PermissionMap::new();

        for (permission, clauses) in &self.permissions {
            if clauses.is_empty() {
                warn!(permission, "Permission has no clauses and can never be granted");
            }

            let mut resolved_clauses = Vec::with_capacity(clauses.len());
            for names in clauses {
                if names.is_empty() {
                    warn!(permission, "Empty clause grants the permission to everyone");
                }

                let clause = names
                    .iter()
                    .map(|name| {
                        registry
                            .lookup(name)
                            .ok_or_else(|| ConfigError::UnknownPredicate {
                                permission: permission.clone(),
                                predicate: name.clone(),
                            })
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                resolved_clauses.push(Clause::from(clause));
            }

            map.insert(permission.clone(), resolved_clauses);
        }

        Ok(map)
    }

    /// Render a permission map back into names.
    pub fn from_permission_map<I, C>(
        map: &PermissionMap,
        registry: &PredicateRegistry<I, C>,
    ) -> std::result::Result<Self, ConfigError> {
        let mut permissions = BTreeMap::new();

        for (permission, clauses) in map.iter() {
            let named = clauses
                .iter()
                .map(|clause| {
                    clause
                        .predicates()
                        .iter()
                        .map(|id| {
                            registry.name(*id).map(str::to_string).ok_or_else(|| {
                                ConfigError::Invalid(format!(
                                    "permission '{}' references {} which is not registered",
                                    permission, id
                                ))
                            })
                        })
                        .collect::<std::result::Result<Vec<_>, _>>()
                })
                .collect::<std::result::Result<Vec<_>, _>>()?;

            permissions.insert(permission.to_string(), named);
        }

        Ok(Self { permissions })
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Permission map; `None` means use the built-in map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionMapConfig>,
}

impl WardenConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;

        info!(
            path = %path.display(),
            custom_permissions = config.permissions.is_some(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> std::result::Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }
}
