use linfa::Float;
use ndarray::{Array, Array1};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// How the levels of a component are laid out between its bounds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serializable", serde(rename_all = "lowercase"))]
pub enum Spacing {
    /// constant difference between consecutive levels
    #[default]
    Linear,
    /// constant ratio between consecutive levels, bounds must be strictly positive
    Geometric,
}

impl Spacing {
    /// Returns `n` levels within `[lower, upper]` according to the spacing kind
    pub fn levels<F: Float>(&self, lower: F, upper: F, n: usize) -> Array1<F> {
        match self {
            Spacing::Linear => linspace(lower, upper, n),
            Spacing::Geometric => geomspace(lower, upper, n),
        }
    }
}

/// Returns `n` evenly spaced values from `start` to `stop`, both included.
///
/// Ends are exact: the first value is `start` and the last one is `stop`.
pub fn linspace<F: Float>(start: F, stop: F, n: usize) -> Array1<F> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let step = (stop - start) / F::cast(n - 1);
            let mut values = Array::from_shape_fn(n, |i| start + F::cast(i) * step);
            values[n - 1] = stop;
            values
        }
    }
}

/// Returns `n` values from `start` to `stop` where consecutive values have a constant ratio.
///
/// Exponents are spaced evenly in base 10, then the ends are set to exactly `start` and `stop`
/// so that bounds survive the round trip through logarithms.
///
/// **Panics** if `start` or `stop` is not strictly positive.
///
/// ```
/// use sweep_doe::geomspace;
///
/// let values = geomspace(1f64, 1000., 4);
/// assert_eq!(values[0], 1.);
/// assert_eq!(values[3], 1000.);
/// assert!((values[1] - 10.).abs() < 1e-12);
/// ```
pub fn geomspace<F: Float>(start: F, stop: F, n: usize) -> Array1<F> {
    if start <= F::zero() || stop <= F::zero() {
        panic!("geomspace: bounds should be strictly positive");
    }
    let exponents = linspace(start.log10(), stop.log10(), n);
    let ten = F::cast(10.);
    let mut values = exponents.mapv(|e| ten.powf(e));
    if n > 0 {
        values[0] = start;
    }
    if n > 1 {
        values[n - 1] = stop;
    }
    values
}
