use linfa::Float;
use ndarray::{Array2, ArrayBase, ArrayView1, Data, Ix2, Zip};
use ndarray_stats::DeviationExt;
use std::cmp::Ordering;

/// Computes the pairwise distances between rows of two 2D arrays using parallel processing
/// The resulting array has shape (ma, mb) where ma is the number of rows in xa and mb is the number of rows in xb
pub fn cdist<F: Float>(
    xa: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
    xb: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>,
) -> Array2<F> {
    let ma = xa.nrows();
    let mb = xb.nrows();
    let na = xa.ncols();
    let nb = xb.ncols();
    if na != nb {
        panic!("cdist: operands should have same nb of columns. Found {na} and {nb}");
    }

    let mut res = Array2::zeros((ma, mb));
    Zip::from(res.rows_mut())
        .and(xa.rows())
        .par_for_each(|mut row_res, row_a| {
            for (j, row_b) in xb.rows().into_iter().enumerate() {
                row_res[j] = F::cast(row_a.l2_dist(&row_b).unwrap());
            }
        });

    res
}

/// Mean distance from point `me` to its `k` nearest neighbours among `candidates`.
///
/// `dists` is the row of `me` in a full distance matrix. `me` itself is skipped
/// when present in `candidates`. Returns infinity when there is no neighbour.
pub fn nearest_mean_distance<F: Float>(
    dists: ArrayView1<F>,
    candidates: &[usize],
    me: usize,
    k: usize,
) -> F {
    let mut neighbours: Vec<F> = candidates
        .iter()
        .filter(|&&c| c != me)
        .map(|&c| dists[c])
        .collect();
    neighbours.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let k = k.min(neighbours.len());
    if k == 0 {
        return F::infinity();
    }
    neighbours[..k].iter().fold(F::zero(), |acc, &d| acc + d) / F::cast(k)
}
