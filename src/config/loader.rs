//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the commission
//! policy from YAML files.

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{CommissionPolicy, PolicyConfig, RosterConfig};

/// Loads and provides access to the commission policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml   # Rates, headcount divisor, default VAT
/// └── roster.yaml   # Ordered employee identifiers
/// ```
///
/// # Example
///
/// ```no_run
/// use commission_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// assert!(loader.is_on_roster("Ting"));
/// # Ok::<(), commission_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: CommissionPolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML, or
    /// describes a policy the engine cannot apply.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;
        let roster = Self::load_yaml::<RosterConfig>(&path.join("roster.yaml"))?;

        let policy = CommissionPolicy::from_parts(policy, roster);
        Self::validate(&policy)?;

        info!(
            config_dir = %path.display(),
            headcount = policy.headcount,
            roster_size = policy.roster.len(),
            "Loaded commission policy"
        );

        Ok(Self { policy })
    }

    /// Wraps an already-built policy after validating it.
    pub fn from_policy(policy: CommissionPolicy) -> EngineResult<Self> {
        Self::validate(&policy)?;
        Ok(Self { policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(policy: &CommissionPolicy) -> EngineResult<()> {
        let fractions = [
            ("commission_rate", policy.commission_rate),
            ("employee_share", policy.employee_share),
            ("withholding_rate", policy.withholding_rate),
        ];
        for (field, value) in fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(EngineError::ConfigInvalid {
                    field: field.to_string(),
                    message: format!("must be between 0 and 1, got {}", value),
                });
            }
        }

        if policy.headcount == 0 {
            return Err(EngineError::ConfigInvalid {
                field: "headcount".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if policy.default_vat_percent < Decimal::ZERO {
            return Err(EngineError::ConfigInvalid {
                field: "default_vat_percent".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        if policy.roster.is_empty() {
            return Err(EngineError::ConfigInvalid {
                field: "employees".to_string(),
                message: "roster must name at least one employee".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for name in &policy.roster {
            if name.trim().is_empty() {
                return Err(EngineError::ConfigInvalid {
                    field: "employees".to_string(),
                    message: "employee names must not be blank".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(EngineError::ConfigInvalid {
                    field: "employees".to_string(),
                    message: format!("duplicate employee '{}'", name),
                });
            }
        }

        Ok(())
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &CommissionPolicy {
        &self.policy
    }

    /// Consumes the loader, returning the policy.
    pub fn into_policy(self) -> CommissionPolicy {
        self.policy
    }

    /// Returns the roster in creation order.
    pub fn roster(&self) -> &[String] {
        &self.policy.roster
    }

    /// Returns true if `name` is on the roster.
    pub fn is_on_roster(&self, name: &str) -> bool {
        self.policy.is_on_roster(name)
    }
}
