//! Configuration for margin computation.
//!
//! All fields have defaults, so a TOML document only needs to name the
//! values it overrides:
//!
//! ```toml
//! epsilon = 1e-6
//! mode = "all"
//!
//! [solver]
//! max_iterations = 200
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_FREQUENCY_EPSILON, DEFAULT_MAX_ITERATIONS, DEFAULT_RTOL, DEFAULT_XTOL,
    DEFAULT_ROOT_ITERATIONS, REAL_ROOT_TOLERANCE,
};
use crate::error::{MarginError, Result};

/// Shape of the margin result
///
/// # Parsing formats
/// - `reduced` or `min` - worst-case margin per kind
/// - `all` - every crossover found
///
/// # Example
/// ```
/// use loopmargin::config::MarginMode;
///
/// let mode: MarginMode = "all".parse().unwrap();
/// assert_eq!(mode, MarginMode::All);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginMode {
    /// Minimum value of each margin and the frequency where it occurs
    #[default]
    Reduced,
    /// All margins at all candidate frequencies
    All,
}

impl fmt::Display for MarginMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reduced => write!(f, "reduced"),
            Self::All => write!(f, "all"),
        }
    }
}

impl FromStr for MarginMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reduced" | "min" => Ok(Self::Reduced),
            "all" => Ok(Self::All),
            other => Err(format!("invalid margin mode: {}", other)),
        }
    }
}

/// Margin computation configuration
///
/// Use `MarginConfig::default()` for the conventional settings.
///
/// # Example
/// ```
/// use loopmargin::config::{MarginConfig, MarginMode};
///
/// let mut config = MarginConfig::default();
/// config.mode = MarginMode::All;
/// config.epsilon = 1e-6;
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarginConfig {
    /// Frequencies below this are considered static gain and never reported
    pub epsilon: f64,
    /// Result shape
    pub mode: MarginMode,
    /// Bracketed root finder / minimizer settings (sampled responses)
    pub solver: SolverConfig,
    /// Polynomial root extraction settings (rational systems)
    pub roots: RootConfig,
}

/// Tolerances for bracketed scalar refinement
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Absolute bracket-width tolerance
    pub xtol: f64,
    /// Relative bracket-width tolerance
    pub rtol: f64,
    /// Iterations before a bracket is abandoned
    pub max_iterations: usize,
}

/// Settings for polynomial root extraction
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RootConfig {
    /// Relative imaginary-part threshold for accepting a root as real
    pub imaginary_tolerance: f64,
    /// Sweeps of the simultaneous root iteration before giving up
    pub max_iterations: usize,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_FREQUENCY_EPSILON,
            mode: MarginMode::default(),
            solver: SolverConfig::default(),
            roots: RootConfig::default(),
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            xtol: DEFAULT_XTOL,
            rtol: DEFAULT_RTOL,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            imaginary_tolerance: REAL_ROOT_TOLERANCE,
            max_iterations: DEFAULT_ROOT_ITERATIONS,
        }
    }
}

impl MarginConfig {
    /// Parse a (possibly partial) TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| MarginError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| MarginError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Reject values the engines cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(MarginError::Config(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        if !(self.solver.xtol > 0.0) || !(self.solver.rtol > 0.0) {
            return Err(MarginError::Config(
                "solver tolerances must be positive".to_string(),
            ));
        }
        if self.solver.max_iterations == 0 {
            return Err(MarginError::Config(
                "solver.max_iterations must be at least 1".to_string(),
            ));
        }
        if self.roots.max_iterations == 0 {
            return Err(MarginError::Config(
                "roots.max_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.roots.imaginary_tolerance >= 0.0) {
            return Err(MarginError::Config(
                "roots.imaginary_tolerance must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_mode_parse() {
        assert_eq!("reduced".parse::<MarginMode>().unwrap(), MarginMode::Reduced);
        assert_eq!("MIN".parse::<MarginMode>().unwrap(), MarginMode::Reduced);
        assert_eq!(" all ".parse::<MarginMode>().unwrap(), MarginMode::All);
    }

    #[test]
    fn test_margin_mode_invalid() {
        assert!("every".parse::<MarginMode>().is_err());
        assert!("".parse::<MarginMode>().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = MarginConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, MarginMode::Reduced);
        assert!((config.epsilon - 1e-8).abs() < 1e-20);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MarginConfig::from_toml_str(
            r#"
            mode = "all"

            [solver]
            max_iterations = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.mode, MarginMode::All);
        assert_eq!(config.solver.max_iterations, 250);
        assert!((config.solver.xtol - DEFAULT_XTOL).abs() < 1e-20);
        assert!((config.epsilon - DEFAULT_FREQUENCY_EPSILON).abs() < 1e-20);
    }

    #[test]
    fn test_toml_rejects_negative_epsilon() {
        let err = MarginConfig::from_toml_str("epsilon = -1.0").unwrap_err();
        assert!(matches!(err, MarginError::Config(_)));
    }

    #[test]
    fn test_root_iterations_are_bounded() {
        assert_eq!(RootConfig::default().max_iterations, DEFAULT_ROOT_ITERATIONS);
        let err = MarginConfig::from_toml_str("[roots]\nmax_iterations = 0").unwrap_err();
        assert!(matches!(err, MarginError::Config(_)));
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        assert!(MarginConfig::from_toml_str("epsw = 1e-3").is_err());
    }
}
