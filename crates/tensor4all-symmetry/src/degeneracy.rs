//! Fused charges and their degeneracies.
//!
//! Legs are folded left to right on the level of distinct charges, i.e. as a
//! convolution over charge labels. The per-position outer product of all
//! legs is never formed.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::charge::Charge;
use crate::charge_array::ChargeArray;
use crate::error::Result;
use crate::flat::check_flat_meta_data;

/// Distinct fused charges of a group of legs and how often each occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusedDegeneracies<Q: Charge> {
    /// Sorted distinct fused charges.
    pub charges: Vec<Q>,
    /// `degeneracies[k]` index combinations fuse to `charges[k]`.
    pub degeneracies: Vec<usize>,
}

impl<Q: Charge> FusedDegeneracies<Q> {
    /// Degeneracy of `charge`, zero if it is unreachable.
    pub fn degeneracy_of(&self, charge: &Q) -> usize {
        self.charges
            .binary_search(charge)
            .map_or(0, |k| self.degeneracies[k])
    }

    /// Sum of all degeneracies (the total dimension of the legs).
    pub fn total(&self) -> usize {
        self.degeneracies.iter().sum()
    }
}

/// All charges reachable by fusing `charges` (with `flows`), and how many
/// index combinations reach each.
///
/// # Errors
/// If `charges` is empty or the number of flows differs.
pub fn compute_fused_charge_degeneracies<Q: Charge>(
    charges: &[ChargeArray<Q>],
    flows: &[bool],
) -> Result<FusedDegeneracies<Q>> {
    check_flat_meta_data(charges.len(), flows.len(), true)?;

    let (first, _, first_degeneracies) = charges[0].dual(flows[0]).unique();
    let mut accumulated = FusedDegeneracies {
        charges: first.unique_charges().to_vec(),
        degeneracies: first_degeneracies,
    };

    for (n, (leg, &flow)) in charges.iter().zip(flows).enumerate().skip(1) {
        let (leg_charges, _, leg_degeneracies) = leg.dual(flow).unique();
        let mut table: BTreeMap<Q, usize> = BTreeMap::new();
        let leg_unique = leg_charges.unique_charges();
        for (acc_charge, &acc_degen) in accumulated.charges.iter().zip(&accumulated.degeneracies) {
            for (leg_charge, &leg_degen) in leg_unique.iter().zip(&leg_degeneracies) {
                *table.entry(acc_charge.fuse(leg_charge)).or_insert(0) += acc_degen * leg_degen;
            }
        }
        let (fused_charges, fused_degeneracies) = table.into_iter().unzip();
        accumulated = FusedDegeneracies {
            charges: fused_charges,
            degeneracies: fused_degeneracies,
        };
        trace!(leg = n, num_charges = accumulated.charges.len(), "folded leg");
    }

    Ok(accumulated)
}

/// All charges reachable by fusing `charges` (with `flows`), sorted.
///
/// # Errors
/// If `charges` is empty or the number of flows differs.
pub fn compute_unique_fused_charges<Q: Charge>(
    charges: &[ChargeArray<Q>],
    flows: &[bool],
) -> Result<Vec<Q>> {
    check_flat_meta_data(charges.len(), flows.len(), true)?;

    let (first, _, _) = charges[0].dual(flows[0]).unique();
    let mut accumulated: Vec<Q> = first.unique_charges().to_vec();
    for (leg, &flow) in charges.iter().zip(flows).skip(1) {
        let (leg_charges, _, _) = leg.dual(flow).unique();
        let fused: BTreeSet<Q> = accumulated
            .iter()
            .flat_map(|a| leg_charges.unique_charges().iter().map(move |b| a.fuse(b)))
            .collect();
        accumulated = fused.into_iter().collect();
    }
    Ok(accumulated)
}

/// Number of charge-conserving elements of a tensor with legs `charges`.
///
/// These are the index combinations fusing to the identity charge.
///
/// # Errors
/// If `charges` is empty or the number of flows differs.
pub fn compute_num_nonzero<Q: Charge>(
    charges: &[ChargeArray<Q>],
    flows: &[bool],
) -> Result<usize> {
    check_flat_meta_data(charges.len(), flows.len(), true)?;
    if charges.iter().any(ChargeArray::is_empty) {
        return Ok(0);
    }
    let fused = compute_fused_charge_degeneracies(charges, flows)?;
    Ok(fused.degeneracy_of(&Q::identity()))
}
