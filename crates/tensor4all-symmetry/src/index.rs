//! Leg metadata of symmetric tensors.

use crate::charge::Charge;
use crate::charge_array::{fuse_charges, ChargeArray};
use crate::error::Result;
use crate::flat::check_flat_meta_data;

/// A tensor leg with charges and flow direction.
///
/// A leg obtained by fusing several legs keeps the flat charges and flows of
/// all its constituents; block computations always work on the flat lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index<Q: Charge> {
    flat_charges: Vec<ChargeArray<Q>>,
    flat_flows: Vec<bool>,
}

impl<Q: Charge> Index<Q> {
    /// Create an elementary leg. `flow == true` is outflowing.
    pub fn new(charges: ChargeArray<Q>, flow: bool) -> Self {
        Self {
            flat_charges: vec![charges],
            flat_flows: vec![flow],
        }
    }

    /// Create a leg from flat charges and flows.
    pub fn from_flat(flat_charges: Vec<ChargeArray<Q>>, flat_flows: Vec<bool>) -> Result<Self> {
        check_flat_meta_data(flat_charges.len(), flat_flows.len(), true)?;
        Ok(Self {
            flat_charges,
            flat_flows,
        })
    }

    /// Charges of the elementary legs.
    pub fn flat_charges(&self) -> &[ChargeArray<Q>] {
        &self.flat_charges
    }

    /// Flows of the elementary legs.
    pub fn flat_flows(&self) -> &[bool] {
        &self.flat_flows
    }

    /// Number of elementary legs.
    pub fn rank(&self) -> usize {
        self.flat_charges.len()
    }

    /// Dimension (product of the elementary dimensions).
    pub fn dim(&self) -> usize {
        self.flat_charges.iter().map(ChargeArray::len).product()
    }

    /// The same leg with every flow reversed.
    pub fn flip_flow(&self) -> Self {
        Self {
            flat_charges: self.flat_charges.clone(),
            flat_flows: self.flat_flows.iter().map(|f| !f).collect(),
        }
    }

    /// Fuse with `other`; `self` becomes the slow (major) part.
    pub fn fuse(&self, other: &Self) -> Self {
        fuse_index_pair(self, other)
    }

    /// Per-position charges of the fused leg, with flows applied.
    pub fn fused_charges(&self) -> Result<ChargeArray<Q>> {
        fuse_charges(&self.flat_charges, &self.flat_flows)
    }
}

/// Fuse two legs into one by concatenating their flat metadata.
pub fn fuse_index_pair<Q: Charge>(left: &Index<Q>, right: &Index<Q>) -> Index<Q> {
    let mut flat_charges = left.flat_charges.clone();
    flat_charges.extend(right.flat_charges.iter().cloned());
    let mut flat_flows = left.flat_flows.clone();
    flat_flows.extend_from_slice(&right.flat_flows);
    Index {
        flat_charges,
        flat_flows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charge::U1Charge;
    use crate::error::SymmetryError;

    fn leg(values: &[i64], flow: bool) -> Index<U1Charge> {
        Index::new(values.iter().map(|&v| U1Charge(v)).collect(), flow)
    }

    #[test]
    fn test_fuse_index_pair() {
        let a = leg(&[0, 1], true);
        let b = leg(&[0, 1, 2], false);
        let ab = a.fuse(&b);
        assert_eq!(ab.rank(), 2);
        assert_eq!(ab.dim(), 6);
        assert_eq!(ab.flat_flows(), &[true, false]);

        let fused = ab.fused_charges().unwrap();
        let expected: Vec<U1Charge> = [0, -1, -2, 1, 0, -1].iter().map(|&v| U1Charge(v)).collect();
        assert_eq!(fused.to_vec(), expected);
    }

    #[test]
    fn test_flip_flow() {
        let ab = leg(&[0, 1], true).fuse(&leg(&[1], false));
        assert_eq!(ab.flip_flow().flat_flows(), &[false, true]);
        assert_eq!(ab.flip_flow().flip_flow(), ab);
    }

    #[test]
    fn test_from_flat_validates() {
        let charges: ChargeArray<U1Charge> = [0].iter().map(|&v| U1Charge(v)).collect();
        assert_eq!(
            Index::from_flat(vec![charges], vec![true, false]),
            Err(SymmetryError::FlowCountMismatch { charges: 1, flows: 2 })
        );
        assert_eq!(
            Index::<U1Charge>::from_flat(vec![], vec![]),
            Err(SymmetryError::EmptyCharges)
        );
    }
}
