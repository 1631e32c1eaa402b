//! Labelled charge arrays.
//!
//! A [`ChargeArray`] stores the charges of all basis positions of a leg as a
//! sorted list of distinct charges plus one label per position. Most block
//! computations work on the (small) set of distinct charges and only touch
//! the per-position labels when building the final result.

use crate::charge::Charge;
use crate::error::Result;
use crate::flat::check_flat_meta_data;

/// Charges of the basis positions of a leg (or of several fused legs).
///
/// Invariants: `unique_charges` is strictly increasing and every label is a
/// valid index into it. Distinct charges that no position references are
/// allowed; [`ChargeArray::unique`] drops them.
#[derive(Debug, Clone)]
pub struct ChargeArray<Q: Charge> {
    unique_charges: Vec<Q>,
    charge_labels: Vec<usize>,
}

impl<Q: Charge> ChargeArray<Q> {
    /// Create a charge array from per-position charge values.
    pub fn new(values: Vec<Q>) -> Self {
        let (unique_charges, charge_labels) = unique_with_inverse(&values);
        Self {
            unique_charges,
            charge_labels,
        }
    }

    /// Create a charge array from already sorted distinct charges and labels.
    ///
    /// # Panics
    /// In debug builds, if `unique_charges` is not strictly increasing or a
    /// label is out of range.
    pub fn from_parts(unique_charges: Vec<Q>, charge_labels: Vec<usize>) -> Self {
        debug_assert!(
            unique_charges.windows(2).all(|w| w[0] < w[1]),
            "unique charges must be strictly increasing"
        );
        debug_assert!(
            charge_labels.iter().all(|&l| l < unique_charges.len()),
            "charge label out of range"
        );
        Self {
            unique_charges,
            charge_labels,
        }
    }

    /// A charge array with no positions.
    pub fn empty() -> Self {
        Self {
            unique_charges: Vec::new(),
            charge_labels: Vec::new(),
        }
    }

    /// Number of positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.charge_labels.len()
    }

    /// Number of positions (dimension of the leg).
    #[inline]
    pub fn dim(&self) -> usize {
        self.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.charge_labels.is_empty()
    }

    /// Number of stored distinct charges.
    #[inline]
    pub fn num_unique(&self) -> usize {
        self.unique_charges.len()
    }

    /// Sorted distinct charges.
    #[inline]
    pub fn unique_charges(&self) -> &[Q] {
        &self.unique_charges
    }

    /// Per-position labels into [`ChargeArray::unique_charges`].
    #[inline]
    pub fn charge_labels(&self) -> &[usize] {
        &self.charge_labels
    }

    /// Charge at position `i`.
    ///
    /// # Panics
    /// If `i >= self.len()`.
    #[inline]
    pub fn get(&self, i: usize) -> &Q {
        &self.unique_charges[self.charge_labels[i]]
    }

    /// Iterate over the per-position charges.
    pub fn iter(&self) -> impl Iterator<Item = &Q> + '_ {
        self.charge_labels
            .iter()
            .map(move |&l| &self.unique_charges[l])
    }

    /// Materialize the per-position charges.
    pub fn to_vec(&self) -> Vec<Q> {
        self.iter().cloned().collect()
    }

    /// Mask of positions whose charge equals `value`.
    pub fn equals(&self, value: &Q) -> Vec<bool> {
        match self.unique_charges.binary_search(value) {
            Ok(label) => self.charge_labels.iter().map(|&l| l == label).collect(),
            Err(_) => vec![false; self.len()],
        }
    }

    /// Apply a flow: unchanged for `true`, dual of every charge for `false`.
    pub fn dual(&self, flow: bool) -> Self {
        if flow {
            return self.clone();
        }
        // Dualizing can reverse the order (U(1) negation), so relabel.
        let duals: Vec<Q> = self.unique_charges.iter().map(Charge::dual).collect();
        let (unique_charges, relabel) = unique_with_inverse(&duals);
        Self {
            unique_charges,
            charge_labels: self.charge_labels.iter().map(|&l| relabel[l]).collect(),
        }
    }

    /// Distinct charges actually present, with inverse labels and counts.
    ///
    /// Returns `(unique, inverse, counts)` where `unique` holds each present
    /// charge exactly once (sorted), `inverse[i]` is the index of position
    /// `i`'s charge in `unique`, and `counts[k]` is the number of positions
    /// carrying `unique[k]`.
    pub fn unique(&self) -> (Self, Vec<usize>, Vec<usize>) {
        let mut counts = vec![0usize; self.num_unique()];
        for &l in &self.charge_labels {
            counts[l] += 1;
        }

        let mut remap = vec![usize::MAX; self.num_unique()];
        let mut unique_charges = Vec::new();
        let mut unique_counts = Vec::new();
        for (label, &count) in counts.iter().enumerate() {
            if count > 0 {
                remap[label] = unique_charges.len();
                unique_charges.push(self.unique_charges[label].clone());
                unique_counts.push(count);
            }
        }

        let inverse = self.charge_labels.iter().map(|&l| remap[l]).collect();
        let num = unique_charges.len();
        (
            Self {
                unique_charges,
                charge_labels: (0..num).collect(),
            },
            inverse,
            unique_counts,
        )
    }

    /// Keep only positions whose charge is in `targets`.
    ///
    /// Returns the reduced charges (distinct charges = the surviving targets)
    /// and the kept positions multiplied by `stride`, in position order.
    pub fn reduce(&self, targets: &[Q], stride: usize) -> (Self, Vec<usize>) {
        let targets = canonical_charges(targets);
        let (common, label_to_unique, _) = intersect(&self.unique_charges, &targets);

        let mut map_to_kept: Vec<Option<usize>> = vec![None; self.num_unique()];
        for (kept, &label) in label_to_unique.iter().enumerate() {
            map_to_kept[label] = Some(kept);
        }

        let mut labels = Vec::new();
        let mut locations = Vec::new();
        for (pos, &l) in self.charge_labels.iter().enumerate() {
            if let Some(kept) = map_to_kept[l] {
                labels.push(kept);
                locations.push(pos * stride);
            }
        }
        (Self::from_parts(common, labels), locations)
    }

    /// Outer fusion with `other` in row-major order (`self` is the slow axis).
    pub fn fuse(&self, other: &Self) -> Self {
        let num_right = other.num_unique();
        let combined: Vec<Q> = self
            .unique_charges
            .iter()
            .flat_map(|a| other.unique_charges.iter().map(move |b| a.fuse(b)))
            .collect();
        let (unique_charges, combined_labels) = unique_with_inverse(&combined);

        let mut charge_labels = Vec::with_capacity(self.len() * other.len());
        for &l in &self.charge_labels {
            let row = &combined_labels[l * num_right..(l + 1) * num_right];
            charge_labels.extend(other.charge_labels.iter().map(|&r| row[r]));
        }
        Self {
            unique_charges,
            charge_labels,
        }
    }
}

impl<Q: Charge> PartialEq for ChargeArray<Q> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<Q: Charge> Eq for ChargeArray<Q> {}

impl<Q: Charge> FromIterator<Q> for ChargeArray<Q> {
    fn from_iter<I: IntoIterator<Item = Q>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Sorted distinct values and, for every input value, its index among them.
pub fn unique_with_inverse<Q: Ord + Clone>(values: &[Q]) -> (Vec<Q>, Vec<usize>) {
    let unique = canonical_charges(values);
    let inverse = values
        .iter()
        .map(|v| match unique.binary_search(v) {
            Ok(i) | Err(i) => i,
        })
        .collect();
    (unique, inverse)
}

/// Intersection of two sorted distinct slices.
///
/// Returns `(common, indices_into_a, indices_into_b)`; `common` is sorted.
pub fn intersect<Q: Ord + Clone>(a: &[Q], b: &[Q]) -> (Vec<Q>, Vec<usize>, Vec<usize>) {
    let mut common = Vec::new();
    let mut ia = Vec::new();
    let mut ib = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                common.push(a[i].clone());
                ia.push(i);
                ib.push(j);
                i += 1;
                j += 1;
            }
        }
    }
    (common, ia, ib)
}

/// Flat fusion of several legs, each dualized by its flow.
///
/// Positions are enumerated in row-major order over the legs. Fusing zero
/// legs yields a single position carrying the identity charge.
pub fn fuse_charges<Q: Charge>(
    charges: &[ChargeArray<Q>],
    flows: &[bool],
) -> Result<ChargeArray<Q>> {
    if charges.is_empty() {
        check_flat_meta_data(charges.len(), flows.len(), false)?;
        return Ok(ChargeArray::new(vec![Q::identity()]));
    }
    check_flat_meta_data(charges.len(), flows.len(), true)?;

    let mut fused = charges[0].dual(flows[0]);
    for (leg, &flow) in charges.iter().zip(flows).skip(1) {
        fused = fused.fuse(&leg.dual(flow));
    }
    Ok(fused)
}

/// Outer product of two degeneracy vectors in row-major order.
pub fn fuse_degeneracies(left: &[usize], right: &[usize]) -> Vec<usize> {
    left.iter()
        .flat_map(|&l| right.iter().map(move |&r| l * r))
        .collect()
}

pub(crate) fn canonical_charges<Q: Ord + Clone>(values: &[Q]) -> Vec<Q> {
    let mut sorted = values.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
}
