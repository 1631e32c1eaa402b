//! Flattening of leg metadata and stride arithmetic.

use crate::charge::Charge;
use crate::charge_array::ChargeArray;
use crate::error::{Result, SymmetryError};
use crate::index::Index;

/// Concatenate a sequence of sequences, preserving order.
pub fn flatten<T: Clone, L: AsRef<[T]>>(lists: &[L]) -> Vec<T> {
    lists
        .iter()
        .flat_map(|l| l.as_ref().iter().cloned())
        .collect()
}

/// Flat charges and flows of `indices`, in index order.
pub fn get_flat_meta_data<Q: Charge>(indices: &[Index<Q>]) -> (Vec<ChargeArray<Q>>, Vec<bool>) {
    let mut charges = Vec::new();
    let mut flows = Vec::new();
    for index in indices {
        charges.extend(index.flat_charges().iter().cloned());
        flows.extend_from_slice(index.flat_flows());
    }
    (charges, flows)
}

/// Row-major strides: `strides[i] = product(dims[i + 1..])`.
pub fn compute_strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; dims.len()];
    for i in (0..dims.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}

/// Outer sum of integer arrays in row-major order.
///
/// The result has `product(len)` entries; the sum over zero arrays is `[0]`.
pub fn fuse_offsets(arrays: &[Vec<usize>]) -> Vec<usize> {
    let mut fused = vec![0];
    for array in arrays {
        fused = fused
            .iter()
            .flat_map(|&a| array.iter().map(move |&b| a + b))
            .collect();
    }
    fused
}

/// Linear offsets of every coordinate tuple of `dims` under `strides`.
///
/// Coordinates are enumerated in row-major order of `dims`; passing the
/// strides of a permuted layout gives the offsets in the transposed buffer.
pub fn fuse_stride_arrays(dims: &[usize], strides: &[usize]) -> Result<Vec<usize>> {
    if dims.len() != strides.len() {
        return Err(SymmetryError::StrideCountMismatch {
            strides: strides.len(),
            legs: dims.len(),
        });
    }
    let per_leg: Vec<Vec<usize>> = dims
        .iter()
        .zip(strides)
        .map(|(&dim, &stride)| (0..dim).map(|k| k * stride).collect())
        .collect();
    Ok(fuse_offsets(&per_leg))
}

/// Length check shared by every entry point taking charges + flows.
pub(crate) fn check_flat_meta_data(
    num_charges: usize,
    num_flows: usize,
    require_legs: bool,
) -> Result<()> {
    if num_charges != num_flows {
        return Err(SymmetryError::FlowCountMismatch {
            charges: num_charges,
            flows: num_flows,
        });
    }
    if require_legs && num_charges == 0 {
        return Err(SymmetryError::EmptyCharges);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charge::U1Charge;

    #[test]
    fn test_flatten() {
        let lists = vec![vec![1, 2], vec![], vec![3]];
        assert_eq!(flatten(&lists), vec![1, 2, 3]);
        assert!(flatten::<i32, Vec<i32>>(&[]).is_empty());
    }

    #[test]
    fn test_compute_strides() {
        assert_eq!(compute_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(compute_strides(&[5]), vec![1]);
        assert!(compute_strides(&[]).is_empty());
    }

    #[test]
    fn test_fuse_stride_arrays_trivial_strides() {
        let dims = [2, 3];
        let offsets = fuse_stride_arrays(&dims, &compute_strides(&dims)).unwrap();
        assert_eq!(offsets, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_fuse_stride_arrays_transposed() {
        // A (2, 3) tensor stored as its (3, 2) transpose.
        let offsets = fuse_stride_arrays(&[2, 3], &[1, 2]).unwrap();
        assert_eq!(offsets, vec![0, 2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_fuse_stride_arrays_mismatch() {
        assert_eq!(
            fuse_stride_arrays(&[2, 3], &[1]),
            Err(SymmetryError::StrideCountMismatch { strides: 1, legs: 2 })
        );
    }

    #[test]
    fn test_get_flat_meta_data() {
        let a: ChargeArray<U1Charge> = [0, 1].iter().map(|&v| U1Charge(v)).collect();
        let b: ChargeArray<U1Charge> = [2].iter().map(|&v| U1Charge(v)).collect();
        let fused = Index::new(a.clone(), true).fuse(&Index::new(b.clone(), false));
        let (charges, flows) = get_flat_meta_data(&[fused, Index::new(a.clone(), false)]);
        assert_eq!(charges, vec![a.clone(), b, a]);
        assert_eq!(flows, vec![true, false, false]);
    }
}
