//! Engine configuration.
//!
//! Finite-difference shifts and batch settings are plain values passed to
//! the pricers. They load from TOML:
//!
//! ```toml
//! [finite_difference]
//! gamma_shift = 1e-5
//! theta_shift = 0.000114155
//!
//! [parallel]
//! batch_size = 128
//! parallel_threshold = 50
//! ```
//!
//! Missing keys fall back to their defaults.

use std::path::Path;

use pricer_core::types::PricingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parallel::ParallelConfig;

/// Default relative shift for spot and volatility bumps.
pub const DEFAULT_RELATIVE_SHIFT: f64 = 1e-5;

/// One hour in years (ACT/365).
pub const ONE_HOUR: f64 = 1.0 / 365.0 / 24.0;

/// One day in years (ACT/365).
pub const ONE_DAY: f64 = 1.0 / 365.0;

const MAX_RELATIVE_SHIFT: f64 = 0.1;
const MAX_TIME_SHIFT: f64 = 1.0;

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A shift is non-positive, non-finite or too large.
    #[error("Invalid shift {name}: {value}. Must be positive, finite and at most {max}")]
    InvalidShift {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Upper bound for the field.
        max: f64,
    },

    /// Batch size of zero.
    #[error("Invalid batch size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    /// The file could not be read.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// The document is not valid TOML for this configuration.
    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::InvalidArgument(err.to_string())
    }
}

/// Shifts used by the finite-difference Greeks.
///
/// Spot and volatility shifts are relative: a gamma shift `h` bumps spot to
/// `S(1 ± h)`. Time shifts are absolute year fractions.
///
/// # Examples
///
/// ```
/// use pricer_risk::config::FiniteDifferenceConfig;
///
/// let config = FiniteDifferenceConfig::builder()
///     .gamma_shift(1e-4)
///     .build()
///     .unwrap();
/// assert_eq!(config.gamma_shift(), 1e-4);
/// assert_eq!(config.vomma_shift(), 1e-5);
///
/// assert!(FiniteDifferenceConfig::builder().theta_shift(-1.0).build().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FiniteDifferenceConfig {
    gamma_shift: f64,
    vanna_shift: f64,
    vomma_shift: f64,
    theta_shift: f64,
    american_theta_shift: f64,
}

impl Default for FiniteDifferenceConfig {
    fn default() -> Self {
        Self {
            gamma_shift: DEFAULT_RELATIVE_SHIFT,
            vanna_shift: DEFAULT_RELATIVE_SHIFT,
            vomma_shift: DEFAULT_RELATIVE_SHIFT,
            theta_shift: ONE_HOUR,
            american_theta_shift: ONE_DAY,
        }
    }
}

impl FiniteDifferenceConfig {
    /// Starts a builder from the defaults.
    pub fn builder() -> FiniteDifferenceConfigBuilder {
        FiniteDifferenceConfigBuilder {
            config: Self::default(),
        }
    }

    /// Relative spot shift for gamma.
    #[inline]
    pub fn gamma_shift(&self) -> f64 {
        self.gamma_shift
    }

    /// Relative shift for vanna.
    #[inline]
    pub fn vanna_shift(&self) -> f64 {
        self.vanna_shift
    }

    /// Relative volatility shift for vomma.
    #[inline]
    pub fn vomma_shift(&self) -> f64 {
        self.vomma_shift
    }

    /// Expiry shift for the barrier theta.
    #[inline]
    pub fn theta_shift(&self) -> f64 {
        self.theta_shift
    }

    /// Expiry shift for the American theta.
    #[inline]
    pub fn american_theta_shift(&self) -> f64 {
        self.american_theta_shift
    }

    /// Checks every shift against its bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_shift("gamma_shift", self.gamma_shift, MAX_RELATIVE_SHIFT)?;
        check_shift("vanna_shift", self.vanna_shift, MAX_RELATIVE_SHIFT)?;
        check_shift("vomma_shift", self.vomma_shift, MAX_RELATIVE_SHIFT)?;
        check_shift("theta_shift", self.theta_shift, MAX_TIME_SHIFT)?;
        check_shift("american_theta_shift", self.american_theta_shift, MAX_TIME_SHIFT)
    }

    /// Parses and validates a TOML document with top-level shift keys.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads [`FiniteDifferenceConfig::from_toml_str`] from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_file(path.as_ref())?)
    }
}

fn check_shift(name: &'static str, value: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidShift { name, value, max })
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e)))
}

/// Builder for [`FiniteDifferenceConfig`].
#[derive(Debug, Clone)]
pub struct FiniteDifferenceConfigBuilder {
    config: FiniteDifferenceConfig,
}

impl FiniteDifferenceConfigBuilder {
    /// Sets the relative gamma shift.
    pub fn gamma_shift(mut self, shift: f64) -> Self {
        self.config.gamma_shift = shift;
        self
    }

    /// Sets the relative vanna shift.
    pub fn vanna_shift(mut self, shift: f64) -> Self {
        self.config.vanna_shift = shift;
        self
    }

    /// Sets the relative vomma shift.
    pub fn vomma_shift(mut self, shift: f64) -> Self {
        self.config.vomma_shift = shift;
        self
    }

    /// Sets the barrier theta shift in years.
    pub fn theta_shift(mut self, shift: f64) -> Self {
        self.config.theta_shift = shift;
        self
    }

    /// Sets the American theta shift in years.
    pub fn american_theta_shift(mut self, shift: f64) -> Self {
        self.config.american_theta_shift = shift;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<FiniteDifferenceConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Finite-difference shifts.
    pub finite_difference: FiniteDifferenceConfig,
    /// Batch valuation settings.
    pub parallel: ParallelConfig,
}

impl EngineConfig {
    /// Checks both sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.finite_difference.validate()?;
        self.parallel.validate()
    }

    /// Parses and validates a TOML document with `[finite_difference]` and
    /// `[parallel]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads [`EngineConfig::from_toml_str`] from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_file(path.as_ref())?)
    }
}
