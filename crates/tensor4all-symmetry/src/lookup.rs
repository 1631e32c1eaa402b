//! Dense-to-sparse position lookup.

use crate::charge::Charge;
use crate::charge_array::{canonical_charges, fuse_charges, intersect, ChargeArray};
use crate::error::Result;
use crate::flat::check_flat_meta_data;

/// Positions of a fused leg whose charge is one of a set of targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseLookup<Q: Charge> {
    /// For every kept position (in row-major order), the index of its
    /// charge in `unique_charges`.
    pub lookup: Vec<usize>,
    /// Sorted distinct charges of the full fusion.
    pub unique_charges: Vec<Q>,
    /// Indices into `unique_charges` of the charges that are targets.
    pub kept_labels: Vec<usize>,
    /// Flat (row-major) positions that were kept; same length as `lookup`.
    pub positions: Vec<usize>,
}

/// Map dense positions of the fusion of `charges` onto the sparse positions
/// whose charge is in `target_charges`.
///
/// # Errors
/// If `charges` is empty or the number of flows differs.
pub fn compute_sparse_lookup<Q: Charge>(
    charges: &[ChargeArray<Q>],
    flows: &[bool],
    target_charges: &[Q],
) -> Result<SparseLookup<Q>> {
    check_flat_meta_data(charges.len(), flows.len(), true)?;

    let fused = fuse_charges(charges, flows)?;
    let (unique, inverse, _) = fused.unique();
    let targets = canonical_charges(target_charges);
    let (_, kept_labels, _) = intersect(unique.unique_charges(), &targets);

    let mut is_kept = vec![false; unique.num_unique()];
    for &label in &kept_labels {
        is_kept[label] = true;
    }

    let (positions, lookup) = inverse
        .into_iter()
        .enumerate()
        .filter(|&(_, label)| is_kept[label])
        .unzip();

    Ok(SparseLookup {
        lookup,
        unique_charges: unique.unique_charges().to_vec(),
        kept_labels,
        positions,
    })
}
