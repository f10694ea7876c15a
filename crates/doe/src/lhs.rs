use crate::SamplingMethod;
use crate::utils::{cdist, nearest_mean_distance};
use linfa::Float;
use ndarray::{Array, Array1, Array2, ArrayBase, Axis, Data, Ix2, ShapeBuilder, s};
use ndarray_rand::{
    RandomExt, rand::Rng, rand::SeedableRng, rand::seq::SliceRandom, rand_distr::Uniform,
};
use ndarray_stats::QuantileExt;
use rand_xoshiro::Xoshiro256Plus;
use std::sync::{Arc, RwLock};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Number of random realizations drawn per requested sample by [LhsKind::Mdu]
pub const MDU_SCALING: usize = 5;
/// Number of nearest neighbours averaged when ranking realizations in [LhsKind::Mdu]
pub const MDU_NEIGHBOURS: usize = 2;

/// Kinds of Latin Hypercube Design
#[derive(Clone, Debug, Default, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serializable", serde(rename_all = "lowercase"))]
pub enum LhsKind {
    /// sample is choosen randomly within its latin hypercube intervals
    Classic,
    /// sample is the middle of its latin hypercube intervals
    Centered,
    /// Latin hypercube with multi-dimensional uniformity: an oversampled random cloud
    /// is thinned by eliminating the most crowded realizations, the survivors ranks
    /// then give the intervals. See Deutsch, J.L. and Deutsch, C.V. (2012),
    /// "Latin hypercube sampling with multidimensional uniformity."
    /// Journal of Statistical Planning and Inference, 142:763-772.
    #[default]
    Mdu,
}

type RngRef<R> = Arc<RwLock<R>>;

/// The LHS design is built as follows: each dimension space is divided into ns sections
/// where ns is the number of sampling points, and one point in selected in each section.
/// The selection method gives different kind of LHS (see [LhsKind])
#[derive(Clone, Debug)]
pub struct Lhs<F: Float, R: Rng> {
    /// Sampling space definition as a (nx, 2) matrix
    /// The ith row is the [lower_bound, upper_bound] of xi, the ith component of x
    xlimits: Array2<F>,
    /// The requested kind of LHS
    kind: LhsKind,
    /// Random generator, shared between clones of the design
    rng: RngRef<R>,
}

/// LHS with default random generator
impl<F: Float> Lhs<F, Xoshiro256Plus> {
    /// Constructor given a design space given a (nx, 2) matrix \[\[lower bound, upper bound\], ...\]
    /// The random generator is seeded from system entropy, hence designs are not reproducible.
    ///
    /// ```
    /// use sweep_doe::{Lhs, SamplingMethod};
    /// use ndarray::arr2;
    ///
    /// let doe = Lhs::new(&arr2(&[[0.0, 1.0], [5.0, 10.0]])).sample(4);
    /// assert_eq!(doe.dim(), (4, 2));
    /// ```
    pub fn new(xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Self {
        Self::new_with_rng(xlimits, Xoshiro256Plus::from_entropy())
    }
}

impl<F: Float, R: Rng> SamplingMethod<F> for Lhs<F, R> {
    fn sampling_space(&self) -> &Array2<F> {
        &self.xlimits
    }

    fn normalized_sample(&self, ns: usize) -> Array2<F> {
        match &self.kind {
            LhsKind::Classic => self._classic_lhs(ns),
            LhsKind::Centered => self._centered_lhs(ns),
            LhsKind::Mdu => self._mdu_lhs(ns, MDU_SCALING, MDU_NEIGHBOURS),
        }
    }
}

impl<F: Float, R: Rng> Lhs<F, R> {
    /// Constructor with given design space and random generator.
    /// * `xlimits`: (nx, 2) matrix where nx is the dimension of the samples and the ith row
    ///   is the definition interval of the ith component of x.
    /// * `rng`: random generator used to draw and shuffle samples
    pub fn new_with_rng(xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>, rng: R) -> Self {
        if xlimits.ncols() != 2 {
            panic!("xlimits must have 2 columns (lower, upper)");
        }
        Lhs {
            xlimits: xlimits.to_owned(),
            kind: LhsKind::default(),
            rng: Arc::new(RwLock::new(rng)),
        }
    }

    /// Sets the kind of LHS
    pub fn kind(mut self, kind: LhsKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the random generator
    pub fn with_rng<R2: Rng>(self, rng: R2) -> Lhs<F, R2> {
        Lhs {
            xlimits: self.xlimits,
            kind: self.kind,
            rng: Arc::new(RwLock::new(rng)),
        }
    }

    fn _classic_lhs(&self, ns: usize) -> Array2<F> {
        let nx = self.xlimits.nrows();
        let cut = Array::linspace(0., 1., ns + 1);

        let mut rng = self.rng.write().unwrap();
        let rnd = Array::random_using((ns, nx).f(), Uniform::new(0., 1.), &mut *rng);
        let a = cut.slice(s![..ns]).to_owned();
        let b = cut.slice(s![1..(ns + 1)]);
        let c = &b - &a;
        let mut lhs = Array::zeros((ns, nx).f());
        for j in 0..nx {
            let mut colj = rnd.column(j).to_owned() * &c + &a;
            colj.as_slice_mut().unwrap().shuffle(&mut *rng);
            lhs.column_mut(j).assign(&colj);
        }
        lhs.mapv(|v: f64| F::cast(v))
    }

    fn _centered_lhs(&self, ns: usize) -> Array2<F> {
        let nx = self.xlimits.nrows();
        let cut = Array::linspace(0., 1., ns + 1);

        let a = cut.slice(s![..ns]).to_owned();
        let b = cut.slice(s![1..(ns + 1)]);
        let mut c = (a + b) / 2.;
        let mut lhs = Array::zeros((ns, nx).f());

        let mut rng = self.rng.write().unwrap();
        for j in 0..nx {
            c.as_slice_mut().unwrap().shuffle(&mut *rng);
            lhs.column_mut(j).assign(&c);
        }
        lhs.mapv(|v: f64| F::cast(v))
    }

    /// Draws `scaling * ns` realizations, removes the one with the smallest mean distance
    /// to its `n_neighbours` nearest neighbours until `ns` remain, then places each survivor
    /// at random within the interval given by its rank along each dimension.
    fn _mdu_lhs(&self, ns: usize, scaling: usize, n_neighbours: usize) -> Array2<F> {
        let nx = self.xlimits.nrows();
        if ns == 0 {
            return Array2::zeros((0, nx));
        }
        let n_realizations = scaling.max(1) * ns;

        let mut rng = self.rng.write().unwrap();
        let realizations: Array2<f64> =
            Array::random_using((n_realizations, nx), Uniform::new(0., 1.), &mut *rng);
        let dist = cdist(&realizations, &realizations);

        let mut alive: Vec<usize> = (0..n_realizations).collect();
        while alive.len() > ns {
            let crowding: Array1<f64> = alive
                .iter()
                .map(|&i| nearest_mean_distance(dist.row(i), &alive, i, n_neighbours))
                .collect();
            let most_crowded = crowding.argmin().unwrap();
            alive.remove(most_crowded);
        }
        let survivors = realizations.select(Axis(0), &alive);

        let jitter: Array2<f64> = Array::random_using((ns, nx), Uniform::new(0., 1.), &mut *rng);
        let mut lhs = Array2::<f64>::zeros((ns, nx));
        for j in 0..nx {
            let col = survivors.column(j);
            let mut ranks: Vec<usize> = (0..ns).collect();
            ranks.sort_by(|&a, &b| col[a].total_cmp(&col[b]));
            for (rank, &i) in ranks.iter().enumerate() {
                lhs[[i, j]] = (rank as f64 + jitter[[i, j]]) / ns as f64;
            }
        }
        lhs.mapv(|v| F::cast(v))
    }
}
