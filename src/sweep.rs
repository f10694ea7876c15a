//! Sweep drivers turning a [SweepConfig] into build rules.
use crate::config::SweepConfig;
use crate::errors::{Result, SweepError};
use crate::format::BuildRule;
use log::{debug, info};
use ndarray::{Array1, Array2};
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use std::io::Write;
use sweep_doe::{FullFactorial, Lhs, SamplingMethod, Spacing};

/// Largest number of build rules a grid sweep may generate
pub const MAX_GRID_RULES: usize = 10_000_000;

/// A sweep generates a (nsamples, nparams) matrix of parameter values,
/// each row giving one build rule.
pub trait Sweep {
    /// Returns the sweep configuration
    fn config(&self) -> &SweepConfig;

    /// Returns the sampled parameter values, columns follow the configured parameters
    fn points(&self) -> Array2<f64>;

    /// Returns the build rules, one per sample
    fn rules(&self) -> Vec<BuildRule> {
        let config = self.config();
        self.points()
            .rows()
            .into_iter()
            .map(|row| BuildRule::new(config, row))
            .collect()
    }

    /// Writes the build rules one per line, returns the number of lines written
    fn write_rules<W: Write>(&self, out: &mut W) -> Result<usize> {
        let rules = self.rules();
        for rule in rules.iter() {
            writeln!(out, "{rule}")?;
        }
        out.flush()?;
        Ok(rules.len())
    }
}

/// Full-factorial sweep: every combination of `n_levels` levels per parameter,
/// the first parameter varying slowest. Output is deterministic.
#[derive(Clone, Debug)]
pub struct GridSweep {
    config: SweepConfig,
}

impl GridSweep {
    pub fn new(config: SweepConfig) -> Result<Self> {
        config.validate()?;
        if config.n_levels == 0 {
            return Err(SweepError::InvalidConfigError(
                "grid sweep needs at least one level per parameter".to_string(),
            ));
        }
        let n_rules = FullFactorial::new(&config.xlimits()).n_samples(config.n_levels);
        match n_rules {
            Some(n) if n <= MAX_GRID_RULES => (),
            _ => {
                return Err(SweepError::InvalidConfigError(format!(
                    "{} levels for {} parameters exceed {MAX_GRID_RULES} build rules",
                    config.n_levels,
                    config.params.len()
                )));
            }
        }
        if config.spacing == Spacing::Geometric {
            if let Some(p) = config.params.iter().find(|p| p.lower <= 0.) {
                return Err(SweepError::InvalidConfigError(format!(
                    "geometric spacing needs positive bounds, got [{}, {}] for {}",
                    p.lower, p.upper, p.name
                )));
            }
        }
        Ok(GridSweep { config })
    }

    fn design(&self) -> FullFactorial<f64> {
        FullFactorial::new(&self.config.xlimits()).spacing(self.config.spacing)
    }

    /// Levels of each parameter
    pub fn levels(&self) -> Vec<Array1<f64>> {
        self.design().levels(self.config.n_levels)
    }
}

impl Sweep for GridSweep {
    fn config(&self) -> &SweepConfig {
        &self.config
    }

    fn points(&self) -> Array2<f64> {
        let levels = self.levels();
        for (param, lv) in self.config.params.iter().zip(levels.iter()) {
            debug!("{} levels: {}", param.name, lv);
        }
        let doe = FullFactorial::from_levels(levels).sample(self.config.n_levels);
        info!(
            "Grid sweep: {} parameters x {} levels ({:?}) = {} points",
            self.config.params.len(),
            self.config.n_levels,
            self.config.spacing,
            doe.nrows()
        );
        doe
    }
}

/// Latin hypercube sweep of `n_samples` samples.
///
/// Without a configured seed the random generator is seeded from system entropy,
/// so two sweeps give different designs while a given sweep always yields the same one.
#[derive(Clone, Debug)]
pub struct LhsSweep {
    config: SweepConfig,
    rng: Xoshiro256Plus,
}

impl LhsSweep {
    pub fn new(config: SweepConfig) -> Result<Self> {
        config.validate()?;
        if config.n_samples == 0 {
            return Err(SweepError::InvalidConfigError(
                "latin hypercube sweep needs at least one sample".to_string(),
            ));
        }
        let rng = match config.seed {
            Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
            None => Xoshiro256Plus::from_entropy(),
        };
        Ok(LhsSweep { config, rng })
    }
}

impl Sweep for LhsSweep {
    fn config(&self) -> &SweepConfig {
        &self.config
    }

    fn points(&self) -> Array2<f64> {
        info!(
            "Latin hypercube sweep: {} parameters, {} samples ({:?}, seed={:?})",
            self.config.params.len(),
            self.config.n_samples,
            self.config.lhs_kind,
            self.config.seed
        );
        let doe = Lhs::new_with_rng(&self.config.xlimits(), self.rng.clone())
            .kind(self.config.lhs_kind)
            .sample(self.config.n_samples);
        debug!("Latin hypercube design: {doe}");
        doe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParamSpec;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use sweep_doe::LhsKind;

    #[test]
    fn test_grid_levels_are_geometric() {
        let sweep = GridSweep::new(SweepConfig::grid()).unwrap();
        let levels = sweep.levels();
        assert_eq!(levels.len(), 3);
        for lv in levels.iter() {
            assert_eq!(lv.len(), 20);
            let ratio = lv[1] / lv[0];
            for w in lv.windows(2) {
                assert!(w[1] > w[0]);
                assert_abs_diff_eq!(w[1] / w[0], ratio, epsilon = 1e-9);
            }
        }
        assert_eq!(levels[0][0], 0.005);
        assert_eq!(levels[0][19], 0.75);
        assert_eq!(levels[1][0], 0.5);
        assert_eq!(levels[2][19], 0.3);
    }

    #[test]
    fn test_grid_order() {
        let config = SweepConfig::grid().n_levels(2);
        let points = GridSweep::new(config).unwrap().points();
        let expected = array![
            [0.005, 0.5, 0.001],
            [0.005, 0.5, 0.3],
            [0.005, 0.75, 0.001],
            [0.005, 0.75, 0.3],
            [0.75, 0.5, 0.001],
            [0.75, 0.5, 0.3],
            [0.75, 0.75, 0.001],
            [0.75, 0.75, 0.3],
        ];
        assert_abs_diff_eq!(points, expected, epsilon = 0.);
    }

    #[test]
    fn test_grid_rejects_non_positive_geometric_bounds() {
        let config = SweepConfig::grid().params(vec![ParamSpec::new("alpha", "a", 0., 1.)]);
        assert!(matches!(
            GridSweep::new(config),
            Err(SweepError::InvalidConfigError(_))
        ));
        let config = SweepConfig::grid()
            .params(vec![ParamSpec::new("alpha", "a", 0., 1.)])
            .spacing(Spacing::Linear);
        assert!(GridSweep::new(config).is_ok());
        assert!(GridSweep::new(SweepConfig::grid().n_levels(0)).is_err());
    }

    #[test]
    fn test_grid_rejects_too_many_levels() {
        for n_levels in [1000, usize::MAX] {
            let res = GridSweep::new(SweepConfig::grid().n_levels(n_levels));
            assert!(matches!(res, Err(SweepError::InvalidConfigError(_))));
        }
        assert!(GridSweep::new(SweepConfig::grid().n_levels(200)).is_ok());
    }

    #[test]
    fn test_grid_single_level_uses_lower_bounds() {
        let sweep = GridSweep::new(SweepConfig::grid().n_levels(1)).unwrap();
        let rules = sweep.rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "scooby_gs_a_0.005_g_0.5_e_0.001");
    }

    #[test]
    fn test_lhs_points() {
        let sweep = LhsSweep::new(SweepConfig::lhs().seed(42)).unwrap();
        let points = sweep.points();
        assert_eq!(points.dim(), (20, 3));
        // same sweep, same design
        assert_abs_diff_eq!(points, sweep.points(), epsilon = 0.);
        assert!(LhsSweep::new(SweepConfig::lhs().n_samples(0)).is_err());
    }

    #[test]
    fn test_lhs_scaled_bounds() {
        let config = SweepConfig::lhs()
            .params(vec![
                ParamSpec::new("alpha", "a", 0.005, 0.75),
                ParamSpec::new("gamma", "g", 0.5, 0.75),
            ])
            .lhs_kind(LhsKind::Classic)
            .n_samples(10)
            .seed(3);
        let points = LhsSweep::new(config).unwrap().points();
        for row in points.rows() {
            assert!((0.005..=0.75).contains(&row[0]));
            assert!((0.5..=0.75).contains(&row[1]));
        }
    }

    #[test]
    fn test_write_rules() {
        let sweep = GridSweep::new(SweepConfig::grid().n_levels(2)).unwrap();
        let mut out = Vec::new();
        let n = sweep.write_rules(&mut out).unwrap();
        assert_eq!(n, 8);
        let text = String::from_utf8(out).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(
            first,
            "scooby_gs_a_0.005_g_0.5_e_0.001  $(BASE) $(SCOOBY) \
             --scooby_alpha=0.005 --scooby_gamma=0.5 --scooby_epsilon=0.001"
        );
        assert_eq!(text.lines().count(), 8);
    }
}
