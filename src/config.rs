//! Sweep configuration.
use crate::errors::{Result, SweepError};
use crate::format::ValueFormat;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use sweep_doe::{LhsKind, Spacing};

/// A swept parameter: passed to the simulator as `--<flag_prefix><name>=<value>`
/// and abbreviated as `<tag>` in build rule identifiers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name as known by the simulator
    pub name: String,
    /// Short name used in identifiers
    pub tag: String,
    /// Lower bound of the parameter range
    pub lower: f64,
    /// Upper bound of the parameter range
    pub upper: f64,
}

impl ParamSpec {
    pub fn new(name: &str, tag: &str, lower: f64, upper: f64) -> Self {
        ParamSpec {
            name: name.to_string(),
            tag: tag.to_string(),
            lower,
            upper,
        }
    }
}

/// Scooby learning rate, discount factor and exploration rate
fn scooby_params(alpha: (f64, f64), gamma: (f64, f64), epsilon: (f64, f64)) -> Vec<ParamSpec> {
    vec![
        ParamSpec::new("alpha", "a", alpha.0, alpha.1),
        ParamSpec::new("gamma", "g", gamma.0, gamma.1),
        ParamSpec::new("epsilon", "e", epsilon.0, epsilon.1),
    ]
}

/// Sweep configuration
///
/// Grid sweeps use `n_levels` and `spacing`, Latin hypercube sweeps use
/// `n_samples`, `lhs_kind` and `seed`. Everything else shapes the emitted build rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Swept parameters, the first one varies slowest in a grid
    pub(crate) params: Vec<ParamSpec>,
    /// Number of levels per parameter of a grid sweep
    pub(crate) n_levels: usize,
    /// Level layout of a grid sweep
    pub(crate) spacing: Spacing,
    /// Number of samples of a Latin hypercube sweep
    pub(crate) n_samples: usize,
    /// Kind of Latin hypercube design
    pub(crate) lhs_kind: LhsKind,
    /// A random generator seed used to get reproducible Latin hypercube sweeps
    pub(crate) seed: Option<u64>,
    /// Identifier prefix of every build rule
    pub(crate) prefix: String,
    /// Tokens inserted between identifier and flags, usually make variables
    pub(crate) placeholders: Vec<String>,
    /// Prefix prepended to parameter names to get simulator flags
    pub(crate) flag_prefix: String,
    /// Rendering of parameter values
    pub(crate) value_format: ValueFormat,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig::grid()
    }
}

impl SweepConfig {
    /// Scooby grid search: 20 geometrically spaced levels per parameter
    pub fn grid() -> Self {
        SweepConfig {
            params: scooby_params((0.005, 0.75), (0.5, 0.75), (0.001, 0.3)),
            n_levels: 20,
            spacing: Spacing::Geometric,
            n_samples: 20,
            lhs_kind: LhsKind::Mdu,
            seed: None,
            prefix: "scooby_gs".to_string(),
            placeholders: vec!["$(BASE)".to_string(), "$(SCOOBY)".to_string()],
            flag_prefix: "scooby_".to_string(),
            value_format: ValueFormat::Repr,
        }
    }

    /// Scooby Latin hypercube exploration: 20 samples in the unit cube, 3 decimals
    pub fn lhs() -> Self {
        SweepConfig {
            params: scooby_params((0., 1.), (0., 1.), (0., 1.)),
            spacing: Spacing::Linear,
            prefix: "scooby_gs2".to_string(),
            placeholders: vec!["$(BASE)".to_string(), "$(SCOOBY_CMAC)".to_string()],
            value_format: ValueFormat::Fixed(3),
            ..SweepConfig::grid()
        }
    }

    /// Sets the swept parameters
    pub fn params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = params;
        self
    }

    /// Sets the number of levels per parameter of a grid sweep
    pub fn n_levels(mut self, n_levels: usize) -> Self {
        self.n_levels = n_levels;
        self
    }

    /// Sets the level spacing of a grid sweep
    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the number of samples of a Latin hypercube sweep
    pub fn n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    /// Sets the kind of Latin hypercube design
    pub fn lhs_kind(mut self, lhs_kind: LhsKind) -> Self {
        self.lhs_kind = lhs_kind;
        self
    }

    /// Allow to specify a seed for random number generator to allow
    /// reproducible Latin hypercube sweeps.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the build rule identifier prefix
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Sets the tokens written between identifier and flags
    pub fn placeholders(mut self, placeholders: &[&str]) -> Self {
        self.placeholders = placeholders.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Sets the prefix of simulator flags
    pub fn flag_prefix(mut self, flag_prefix: &str) -> Self {
        self.flag_prefix = flag_prefix.to_string();
        self
    }

    /// Sets the rendering of parameter values
    pub fn value_format(mut self, value_format: ValueFormat) -> Self {
        self.value_format = value_format;
        self
    }

    /// Design space as a (nparams, 2) matrix of \[lower, upper\] rows
    pub fn xlimits(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.params.len(), 2), |(i, j)| {
            if j == 0 {
                self.params[i].lower
            } else {
                self.params[i].upper
            }
        })
    }

    /// Checks parameters consistency
    pub fn validate(&self) -> Result<()> {
        if self.params.is_empty() {
            return Err(SweepError::InvalidConfigError(
                "at least one parameter is required".to_string(),
            ));
        }
        let mut tags = HashSet::new();
        for p in self.params.iter() {
            if p.name.is_empty() || p.tag.is_empty() {
                return Err(SweepError::InvalidConfigError(format!(
                    "parameter name and tag should not be empty, got name={:?} tag={:?}",
                    p.name, p.tag
                )));
            }
            if !tags.insert(p.tag.as_str()) {
                return Err(SweepError::InvalidConfigError(format!(
                    "duplicate parameter tag {:?}",
                    p.tag
                )));
            }
            if !p.lower.is_finite() || !p.upper.is_finite() || p.lower > p.upper {
                return Err(SweepError::InvalidConfigError(format!(
                    "bad bounds for {}: [{}, {}]",
                    p.name, p.lower, p.upper
                )));
            }
        }
        Ok(())
    }

    /// Serializes the configuration as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a JSON configuration, missing fields take their [SweepConfig::grid] value
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: SweepConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
