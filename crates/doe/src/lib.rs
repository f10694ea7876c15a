/*!
This library implements the Design of Experiments (DoE) methods used to generate
hyperparameter sweeps:
the [Full Factorial](crate::FullFactorial) design over linearly or
geometrically spaced levels, and the
[Latin Hypercube sampling](https://en.wikipedia.org/wiki/Latin_hypercube_sampling) design.

A DoE method generates a set of points (i.e. a DoE) within a design (or sample) space `xlimits`.
The design space is defined as a 2D ndarray `(nx, 2)`, specifying lower bound and upper bound
of each `nx` components of the samples `x`.

Example:
```
use sweep_doe::{FullFactorial, Lhs, LhsKind, SamplingMethod, Spacing};
use ndarray::arr2;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

// Design space is defined as [0.01, 1.] x [0.5, 1.], samples are 2-dimensional.
let xlimits = arr2(&[[0.01, 1.], [0.5, 1.]]);
// Every combination of 3 geometrically spaced levels per component: 9 samples
let samples = FullFactorial::new(&xlimits).spacing(Spacing::Geometric).sample(3);
// or five samples using Latin Hypercube sampling with multi-dimensional uniformity
let samples = Lhs::new(&xlimits).sample(5);
// or else centered LHS with a seeded random generator for reproducibility
let samples = Lhs::new(&xlimits)
    .kind(LhsKind::Centered)
    .with_rng(Xoshiro256Plus::seed_from_u64(42))
    .sample(5);
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod full_factorial;
mod lhs;
mod spacing;
mod traits;
mod utils;

pub use full_factorial::*;
pub use lhs::*;
pub use spacing::*;
pub use traits::*;
