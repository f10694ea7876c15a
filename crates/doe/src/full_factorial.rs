use crate::Spacing;
use linfa::Float;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix2};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// The FullFactorial design consists of all possible combinations
/// of levels for all components within the design space.
///
/// Levels are either derived from the design space bounds and a [Spacing] kind
/// or given explicitly with [FullFactorial::from_levels].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct FullFactorial<F: Float> {
    /// Design space definition as
    /// The ith row is the [lower_bound, upper_bound] of xi, the ith component of a sample x
    xlimits: Array2<F>,
    /// Level layout between bounds
    spacing: Spacing,
    /// Explicit levels, take precedence over `xlimits` and `spacing` when set
    levels: Option<Vec<Array1<F>>>,
}

impl<F: Float> FullFactorial<F> {
    /// Constructor given a design space given a (nx, 2) matrix \[\[lower bound, upper bound\], ...\]
    ///
    /// ```
    /// use sweep_doe::{FullFactorial, Spacing};
    /// use ndarray::arr2;
    ///
    /// let doe = FullFactorial::new(&arr2(&[[0.1, 10.0], [5.0, 10.0]])).spacing(Spacing::Geometric);
    /// assert_eq!(doe.sample(3).nrows(), 9);
    /// ```
    pub fn new(xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Self {
        if xlimits.ncols() != 2 {
            panic!("xlimits must have 2 columns (lower, upper)");
        }
        FullFactorial {
            xlimits: xlimits.to_owned(),
            spacing: Spacing::default(),
            levels: None,
        }
    }

    /// Constructor given explicit levels for each component.
    /// Components may have different numbers of levels.
    pub fn from_levels(levels: Vec<Array1<F>>) -> Self {
        let xlimits = Array2::from_shape_fn((levels.len(), 2), |(i, j)| {
            let bound = if j == 0 {
                levels[i].iter().next()
            } else {
                levels[i].iter().last()
            };
            bound.copied().unwrap_or_else(F::zero)
        });
        FullFactorial {
            xlimits,
            spacing: Spacing::default(),
            levels: Some(levels),
        }
    }

    /// Sets the level spacing used when levels are derived from bounds
    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Returns the bounds of the design space as a (nx, 2) matrix
    pub fn sampling_space(&self) -> &Array2<F> {
        &self.xlimits
    }

    /// Returns the levels of each component, `n` levels per component when derived from bounds
    pub fn levels(&self, n: usize) -> Vec<Array1<F>> {
        match &self.levels {
            Some(levels) => levels.clone(),
            None => self
                .xlimits
                .rows()
                .into_iter()
                .map(|row| self.spacing.levels(row[0], row[1], n))
                .collect(),
        }
    }

    /// Number of level combinations with `n` levels per component when derived from bounds,
    /// `None` when it overflows `usize`
    pub fn n_samples(&self, n: usize) -> Option<usize> {
        match &self.levels {
            Some(levels) => levels.iter().try_fold(1usize, |acc, lv| acc.checked_mul(lv.len())),
            None => (0..self.xlimits.nrows()).try_fold(1usize, |acc, _| acc.checked_mul(n)),
        }
    }

    /// Generates the (n^nx, nx) matrix of all level combinations.
    ///
    /// The first component varies slowest and the last one fastest,
    /// the same order as nested loops over components taken in order.
    /// With explicit levels `n` is ignored.
    ///
    /// **Panics** if the number of combinations overflows `usize`.
    pub fn sample(&self, n: usize) -> Array2<F> {
        let nrows = match self.n_samples(n) {
            Some(nrows) => nrows,
            None => panic!("full factorial: number of combinations overflows usize"),
        };
        let levels = self.levels(n);
        let nx = levels.len();
        let mut doe = Array2::<F>::zeros((nrows, nx));

        let mut level_repeat = nrows;
        for (j, lv) in levels.iter().enumerate() {
            let n_lv = lv.len();
            if n_lv == 0 {
                break;
            }
            level_repeat /= n_lv;
            for (i, mut row) in doe.rows_mut().into_iter().enumerate() {
                row[j] = lv[(i / level_repeat) % n_lv];
            }
        }
        doe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr2, array};

    #[test]
    fn test_ffact() {
        let xlimits = arr2(&[[5., 10.], [0., 1.]]);
        let expected = array![
            [5., 0.],
            [5., 0.5],
            [5., 1.],
            [7.5, 0.],
            [7.5, 0.5],
            [7.5, 1.],
            [10., 0.],
            [10., 0.5],
            [10., 1.],
        ];
        let actual = FullFactorial::new(&xlimits).sample(3);
        assert_abs_diff_eq!(expected, actual, epsilon = 1e-6);
    }

    #[test]
    fn test_ffact_geometric() {
        let xlimits = arr2(&[[1., 100.], [0.1, 10.]]);
        let expected = array![
            [1., 0.1],
            [1., 1.],
            [1., 10.],
            [10., 0.1],
            [10., 1.],
            [10., 10.],
            [100., 0.1],
            [100., 1.],
            [100., 10.],
        ];
        let actual = FullFactorial::new(&xlimits)
            .spacing(Spacing::Geometric)
            .sample(3);
        assert_abs_diff_eq!(expected, actual, epsilon = 1e-9);
    }

    #[test]
    fn test_ffact_uneven_levels() {
        let doe = FullFactorial::from_levels(vec![array![1., 2.], array![0., 5., 10.], array![7.]]);
        let expected = array![
            [1., 0., 7.],
            [1., 5., 7.],
            [1., 10., 7.],
            [2., 0., 7.],
            [2., 5., 7.],
            [2., 10., 7.],
        ];
        assert_abs_diff_eq!(expected, doe.sample(0), epsilon = 1e-12);
        assert_abs_diff_eq!(
            doe.sampling_space().to_owned(),
            arr2(&[[1., 2.], [0., 10.], [7., 7.]]),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ffact_size() {
        let xlimits = arr2(&[[0.005, 0.75], [0.5, 0.75], [0.001, 0.3]]);
        let doe = FullFactorial::new(&xlimits)
            .spacing(Spacing::Geometric)
            .sample(20);
        assert_eq!(doe.dim(), (8000, 3));
        assert_eq!(doe[[0, 0]], 0.005);
        assert_eq!(doe[[7999, 2]], 0.3);
    }

    #[test]
    fn test_ffact_n_samples_overflow() {
        let xlimits = arr2(&[[0.005, 0.75], [0.5, 0.75], [0.001, 0.3]]);
        let doe = FullFactorial::new(&xlimits).spacing(Spacing::Geometric);
        assert_eq!(doe.n_samples(20), Some(8000));
        assert_eq!(doe.n_samples(usize::MAX), None);
        assert_eq!(doe.n_samples(1 << 22), None);
        let doe = FullFactorial::<f64>::from_levels(vec![array![1., 2.], array![0., 5., 10.]]);
        assert_eq!(doe.n_samples(0), Some(6));
    }

    #[test]
    #[should_panic]
    fn test_ffact_sample_overflow() {
        let xlimits = arr2(&[[0., 1.], [0., 1.], [0., 1.]]);
        FullFactorial::new(&xlimits).sample(1 << 22);
    }
}
