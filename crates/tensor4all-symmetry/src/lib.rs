//! Charge bookkeeping for block-sparse symmetric tensors.
//!
//! Tensors with abelian symmetries (U(1), Z_N and products thereof) only
//! store the elements whose leg charges fuse to the identity charge. This
//! crate computes which elements those are and where the dense symmetry
//! blocks of any row/column matricization live in the flat data vector.
//! The numeric payload itself is not handled here.
//!
//! # Core Types
//!
//! - [`Charge`]: the charge algebra (fusion, dual, identity)
//! - [`ChargeArray`]: per-position charges of a leg, stored as labels
//! - [`Index`]: a (possibly fused) leg with flat charges and flows
//! - [`DiagonalBlocks`]: block maps, charges and shapes of a matricization
//!
//! # Flow convention
//!
//! A flow of `true` marks an outflowing leg, whose charges enter fusion as
//! they are. Inflowing legs (`false`) contribute their dual charges.
//!
//! # Example
//!
//! ```
//! use tensor4all_symmetry::{find_diagonal_sparse_blocks, ChargeArray, U1Charge};
//!
//! let leg: ChargeArray<U1Charge> = [0, 1, 1].iter().map(|&q| U1Charge(q)).collect();
//! let charges = vec![leg.clone(), leg];
//! let flows = vec![true, false];
//!
//! let blocks = find_diagonal_sparse_blocks(&charges, &flows, 1).unwrap();
//! assert_eq!(blocks.num_blocks(), 2);
//! assert_eq!(blocks.block_dims, [vec![1, 2], vec![1, 2]]);
//! assert_eq!(blocks.block_maps[1], vec![1, 2, 3, 4]);
//! ```

mod blocks;
mod charge;
mod charge_array;
mod degeneracy;
mod error;
mod flat;
mod index;
mod lookup;
mod options;
mod partition;
mod reduce;

pub use blocks::{
    find_diagonal_sparse_blocks, find_diagonal_sparse_blocks_with_options, DiagonalBlocks,
};
pub use charge::{Charge, U1Charge, Z2Charge, ZnCharge};
pub use charge_array::{
    fuse_charges, fuse_degeneracies, intersect, unique_with_inverse, ChargeArray,
};
pub use degeneracy::{
    compute_fused_charge_degeneracies, compute_num_nonzero, compute_unique_fused_charges,
    FusedDegeneracies,
};
pub use error::{Result, SymmetryError};
pub use flat::{compute_strides, flatten, fuse_offsets, fuse_stride_arrays, get_flat_meta_data};
pub use index::{fuse_index_pair, Index};
pub use lookup::{compute_sparse_lookup, SparseLookup};
pub use options::{BlockFinderOptions, GatherStrategy, DEFAULT_DENSE_GATHER_THRESHOLD};
pub use partition::find_best_partition;
pub use reduce::{reduce_charges, reduce_charges_with_locations};
