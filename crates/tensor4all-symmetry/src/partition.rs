//! Size-balanced bipartition of a list of dimensions.

use crate::error::{Result, SymmetryError};

/// Find the most levelled partition of `dims`.
///
/// Returns the split point `p` in `1..dims.len()` that minimizes
/// `|prod(dims[..p]) - prod(dims[p..])|`. Among equally levelled splits the
/// one with the largest right-hand product wins, and among those the
/// smallest `p`.
///
/// # Errors
/// [`SymmetryError::TooFewDimensions`] if `dims.len() < 2`.
pub fn find_best_partition(dims: &[usize]) -> Result<usize> {
    if dims.len() < 2 {
        return Err(SymmetryError::TooFewDimensions { len: dims.len() });
    }

    let product = |ds: &[usize]| {
        ds.iter()
            .fold(1u128, |acc, &d| acc.saturating_mul(d as u128))
    };

    // (diff, right product, split)
    let mut best: Option<(u128, u128, usize)> = None;
    for p in 1..dims.len() {
        let left = product(&dims[..p]);
        let right = product(&dims[p..]);
        let diff = left.abs_diff(right);
        let better = match best {
            None => true,
            Some((best_diff, best_right, _)) => {
                diff < best_diff || (diff == best_diff && right > best_right)
            }
        };
        if better {
            best = Some((diff, right, p));
        }
    }
    Ok(best.map_or(1, |(_, _, p)| p))
}
