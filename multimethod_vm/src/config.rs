//! Dispatch configuration
//!
//! Settings can come from a TOML document, a file, or the environment:
//!
//! ```toml
//! concurrency = "freeze-on-first-dispatch"
//! trace_dispatch = true
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable enabling per-candidate dispatch tracing
pub const DISPATCH_DEBUG_ENV: &str = "MULTIMETHOD_VM_DISPATCH_DEBUG";

/// Environment variable selecting the freeze-on-first-dispatch policy
pub const FREEZE_METHODS_ENV: &str = "MULTIMETHOD_VM_FREEZE_METHODS";

/// How a multimethod reconciles method registration with dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConcurrencyPolicy {
    /// Methods may be added at any time; every call dispatches against a
    /// consistent snapshot of the method list.
    #[default]
    Serialized,
    /// Adding a method after the first call fails.
    FreezeOnFirstDispatch,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    pub concurrency: ConcurrencyPolicy,
    /// Emit a tracing event for every candidate tested during selection.
    pub trace_dispatch: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dispatch config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl DispatchConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `MULTIMETHOD_VM_DISPATCH_DEBUG` and `MULTIMETHOD_VM_FREEZE_METHODS`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| env::var(name).ok())
    }

    /// Apply overrides from `lookup`. A variable counts as set when present
    /// and not empty, `0` or `false`.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |name: &str| {
            lookup(name).is_some_and(|value| !matches!(value.trim(), "" | "0" | "false"))
        };
        if flag(DISPATCH_DEBUG_ENV) {
            self.trace_dispatch = true;
        }
        if flag(FREEZE_METHODS_ENV) {
            self.concurrency = ConcurrencyPolicy::FreezeOnFirstDispatch;
        }
        self
    }
}
