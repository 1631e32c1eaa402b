//! Fusion of several legs restricted to a set of target charges.
//!
//! Equivalent to fusing all legs with [`fuse_charges`] and keeping the
//! positions whose charge is a target, but the legs are split at a
//! size-balanced partition first. Each half is fused on its own and the
//! halves are only combined on the level of distinct charges, so the
//! per-position work is proportional to the size of the result.

use tracing::debug;

use crate::charge::Charge;
use crate::charge_array::{
    canonical_charges, fuse_charges, intersect, unique_with_inverse, ChargeArray,
};
use crate::error::{Result, SymmetryError};
use crate::flat::{check_flat_meta_data, fuse_stride_arrays};
use crate::partition::find_best_partition;

/// Reduced fusion of several legs.
#[derive(Debug, Clone)]
struct ReducedCharges<Q: Charge> {
    /// Charges of the kept positions; distinct charges are the surviving targets.
    charges: ChargeArray<Q>,
    /// Linear offsets of the kept positions, if requested.
    locations: Option<Vec<usize>>,
}

/// Fuse `charges` (with `flows`), keeping only positions whose charge is in
/// `target_charges`.
///
/// # Errors
/// If `charges` is empty or the number of flows differs.
pub fn reduce_charges<Q: Charge>(
    charges: &[ChargeArray<Q>],
    flows: &[bool],
    target_charges: &[Q],
) -> Result<ChargeArray<Q>> {
    Ok(reduce(charges, flows, target_charges, false, None)?.charges)
}

/// Like [`reduce_charges`], also returning the linear offset of every kept
/// position.
///
/// Offsets are computed with `strides` (one per leg) when given, which
/// addresses a permuted memory layout; otherwise row-major strides of the
/// leg dimensions are used.
///
/// # Errors
/// If `charges` is empty, or the number of flows or strides differs.
pub fn reduce_charges_with_locations<Q: Charge>(
    charges: &[ChargeArray<Q>],
    flows: &[bool],
    target_charges: &[Q],
    strides: Option<&[usize]>,
) -> Result<(ChargeArray<Q>, Vec<usize>)> {
    let reduced = reduce(charges, flows, target_charges, true, strides)?;
    Ok((reduced.charges, reduced.locations.unwrap_or_default()))
}

fn reduce<Q: Charge>(
    charges: &[ChargeArray<Q>],
    flows: &[bool],
    target_charges: &[Q],
    return_locations: bool,
    strides: Option<&[usize]>,
) -> Result<ReducedCharges<Q>> {
    check_flat_meta_data(charges.len(), flows.len(), true)?;
    if let Some(strides) = strides {
        if strides.len() != charges.len() {
            return Err(SymmetryError::StrideCountMismatch {
                strides: strides.len(),
                legs: charges.len(),
            });
        }
    }
    let targets = canonical_charges(target_charges);

    if charges.len() == 1 {
        let stride = strides.map_or(1, |s| s[0]);
        let (reduced, locations) = charges[0].dual(flows[0]).reduce(&targets, stride);
        return Ok(ReducedCharges {
            charges: reduced,
            locations: return_locations.then_some(locations),
        });
    }

    let dims: Vec<usize> = charges.iter().map(ChargeArray::len).collect();
    let partition = find_best_partition(&dims)?;
    debug!(?dims, partition, num_targets = targets.len(), "reducing charges");

    let left = fuse_charges(&charges[..partition], &flows[..partition])?;
    let right = fuse_charges(&charges[partition..], &flows[partition..])?;

    // Fused charge of every (left-unique, right-unique) pair, row-major.
    let num_right_unique = right.num_unique();
    let combined: Vec<Q> = left
        .unique_charges()
        .iter()
        .flat_map(|a| right.unique_charges().iter().map(move |b| a.fuse(b)))
        .collect();
    let (unique_combined, combined_labels) = unique_with_inverse(&combined);

    let (reduced_charges, label_to_unique, _) = intersect(&unique_combined, &targets);
    let mut map_to_kept: Vec<Option<usize>> = vec![None; unique_combined.len()];
    for (kept, &label) in label_to_unique.iter().enumerate() {
        map_to_kept[label] = Some(kept);
    }
    let kept_labels: Vec<Option<usize>> = combined_labels.iter().map(|&l| map_to_kept[l]).collect();

    // For each distinct left charge: kept labels along the right positions,
    // and which right positions they sit at.
    let mut reduced_rows: Vec<Vec<usize>> = Vec::with_capacity(left.num_unique());
    let mut row_locations: Vec<Vec<usize>> = Vec::with_capacity(left.num_unique());
    for n in 0..left.num_unique() {
        let row = &kept_labels[n * num_right_unique..(n + 1) * num_right_unique];
        let mut labels = Vec::new();
        let mut positions = Vec::new();
        for (pos, &r) in right.charge_labels().iter().enumerate() {
            if let Some(kept) = row[r] {
                labels.push(kept);
                if return_locations {
                    positions.push(pos);
                }
            }
        }
        reduced_rows.push(labels);
        row_locations.push(positions);
    }

    let reduced_labels: Vec<usize> = left
        .charge_labels()
        .iter()
        .flat_map(|&l| reduced_rows[l].iter().copied())
        .collect();
    let reduced = ChargeArray::from_parts(reduced_charges, reduced_labels);

    if !return_locations {
        return Ok(ReducedCharges {
            charges: reduced,
            locations: None,
        });
    }

    let mut locations = Vec::with_capacity(reduced.len());
    match strides {
        Some(strides) => {
            let row_offsets = fuse_stride_arrays(&dims[..partition], &strides[..partition])?;
            let col_offsets = fuse_stride_arrays(&dims[partition..], &strides[partition..])?;
            for (&row_offset, &l) in row_offsets.iter().zip(left.charge_labels()) {
                locations.extend(row_locations[l].iter().map(|&c| row_offset + col_offsets[c]));
            }
        }
        None => {
            let right_dim = right.len();
            for (n, &l) in left.charge_labels().iter().enumerate() {
                locations.extend(row_locations[l].iter().map(|&c| n * right_dim + c));
            }
        }
    }

    Ok(ReducedCharges {
        charges: reduced,
        locations: Some(locations),
    })
}
