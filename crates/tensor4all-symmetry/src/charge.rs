//! Abelian charge algebra.
//!
//! A [`Charge`] is a single conserved quantum number (or a tuple of them)
//! attached to one basis position of a tensor leg. All block computations in
//! this crate are generic over `Charge`, so the concrete charge type a caller
//! passes in is the one it gets back.
//!
//! # Example
//!
//! ```
//! use tensor4all_symmetry::{Charge, U1Charge, Z2Charge};
//!
//! let a = (U1Charge(2), Z2Charge::new(1));
//! let b = (U1Charge(-2), Z2Charge::new(1));
//! assert_eq!(a.fuse(&b), <(U1Charge, Z2Charge)>::identity());
//! assert_eq!(a.dual(), (U1Charge(-2), Z2Charge::new(1)));
//! ```

use std::fmt::Debug;
use std::hash::Hash;

/// Capability set of an abelian charge.
///
/// Implementations must make `fuse` associative and commutative with
/// `identity()` as neutral element, and `dual` must be the inverse under
/// `fuse`. The `Ord` implementation only has to be a stable total order;
/// it defines the canonical order of unique charges.
pub trait Charge: Clone + Ord + Hash + Debug {
    /// Neutral element of fusion.
    fn identity() -> Self;

    /// Combine two charges.
    fn fuse(&self, other: &Self) -> Self;

    /// Inverse charge under fusion.
    fn dual(&self) -> Self;

    /// Apply a flow direction: outflowing (`true`) charges are kept,
    /// inflowing (`false`) charges are replaced by their dual.
    fn with_flow(&self, flow: bool) -> Self {
        if flow {
            self.clone()
        } else {
            self.dual()
        }
    }

    /// Whether this is the neutral charge.
    fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

/// U(1) charge (e.g. particle number or magnetization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct U1Charge(pub i64);

impl Charge for U1Charge {
    fn identity() -> Self {
        U1Charge(0)
    }

    fn fuse(&self, other: &Self) -> Self {
        U1Charge(self.0 + other.0)
    }

    fn dual(&self) -> Self {
        U1Charge(-self.0)
    }
}

/// Z_N charge, stored as a residue in `0..N`.
///
/// `N` must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ZnCharge<const N: u32>(u32);

impl<const N: u32> ZnCharge<N> {
    /// Create a charge from any integer, reduced modulo `N`.
    pub fn new(value: i64) -> Self {
        Self(value.rem_euclid(i64::from(N)) as u32)
    }

    /// The residue in `0..N`.
    #[inline]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl<const N: u32> Charge for ZnCharge<N> {
    fn identity() -> Self {
        Self(0)
    }

    fn fuse(&self, other: &Self) -> Self {
        Self((self.0 + other.0) % N)
    }

    fn dual(&self) -> Self {
        Self((N - self.0) % N)
    }
}

/// Z_2 charge (parity).
pub type Z2Charge = ZnCharge<2>;

// Tuples carry several independent conserved quantities at once; every
// operation acts component-wise.
macro_rules! impl_charge_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Charge),+> Charge for ($($name,)+) {
            fn identity() -> Self {
                ($($name::identity(),)+)
            }

            fn fuse(&self, other: &Self) -> Self {
                ($(self.$idx.fuse(&other.$idx),)+)
            }

            fn dual(&self) -> Self {
                ($(self.$idx.dual(),)+)
            }
        }
    };
}

impl_charge_tuple!(A: 0, B: 1);
impl_charge_tuple!(A: 0, B: 1, C: 2);
