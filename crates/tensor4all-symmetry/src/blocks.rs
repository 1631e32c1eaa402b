//! Location of symmetry blocks in the data vector of a block-sparse tensor.
//!
//! A block-sparse tensor stores only its charge-conserving elements, in
//! row-major order of the full index. Viewed as a matrix between
//! `charges[..partition]` (rows) and `charges[partition..]` (columns), those
//! elements form dense diagonal blocks, one per charge shared by rows and
//! columns. [`find_diagonal_sparse_blocks`] returns, for each block, the
//! positions of its elements in the data vector.
//!
//! Column flows are reversed when computing column charges, so that a row
//! with fused charge `q` couples exactly to the columns with (reversed)
//! fused charge `q`.

use tracing::debug;

use crate::charge::Charge;
use crate::charge_array::{intersect, ChargeArray};
use crate::degeneracy::{compute_fused_charge_degeneracies, compute_num_nonzero};
use crate::error::{Result, SymmetryError};
use crate::flat::check_flat_meta_data;
use crate::options::{BlockFinderOptions, GatherStrategy};
use crate::reduce::reduce_charges;

/// Diagonal blocks of a matricized block-sparse tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagonalBlocks<Q: Charge> {
    /// For each block, positions in the data vector, row-major within the block.
    pub block_maps: Vec<Vec<usize>>,
    /// Charge of each block (fused row charge).
    pub block_charges: Vec<Q>,
    /// `block_dims[0][b]` rows and `block_dims[1][b]` columns of block `b`.
    pub block_dims: [Vec<usize>; 2],
}

impl<Q: Charge> DiagonalBlocks<Q> {
    fn empty() -> Self {
        Self {
            block_maps: Vec::new(),
            block_charges: Vec::new(),
            block_dims: [Vec::new(), Vec::new()],
        }
    }

    /// Number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.block_maps.len()
    }

    /// `(rows, cols)` of block `b`.
    ///
    /// # Panics
    /// If `b >= self.num_blocks()`.
    pub fn block_shape(&self, b: usize) -> (usize, usize) {
        (self.block_dims[0][b], self.block_dims[1][b])
    }

    /// Total number of elements over all blocks.
    pub fn total_elements(&self) -> usize {
        self.block_maps.iter().map(Vec::len).sum()
    }

    /// Index of the block with charge `charge`, if any.
    pub fn find_block(&self, charge: &Q) -> Option<usize> {
        self.block_charges.iter().position(|c| c == charge)
    }
}

/// Find the diagonal blocks of a tensor with legs `charges` matricized at
/// `partition`, using default [`BlockFinderOptions`].
///
/// # Errors
/// If `charges` is empty, the number of flows differs, or
/// `partition > charges.len()`.
pub fn find_diagonal_sparse_blocks<Q: Charge>(
    charges: &[ChargeArray<Q>],
    flows: &[bool],
    partition: usize,
) -> Result<DiagonalBlocks<Q>> {
    find_diagonal_sparse_blocks_with_options(
        charges,
        flows,
        partition,
        &BlockFinderOptions::default(),
    )
}

/// Find the diagonal blocks of a tensor with legs `charges` matricized at
/// `partition`.
///
/// For `partition == 0` (or `charges.len()`) the matrix has a single row
/// (column), and there is one block, carrying the identity charge, that holds
/// every conserving element.
///
/// # Errors
/// If `charges` is empty, the number of flows differs, or
/// `partition > charges.len()`.
pub fn find_diagonal_sparse_blocks_with_options<Q: Charge>(
    charges: &[ChargeArray<Q>],
    flows: &[bool],
    partition: usize,
    options: &BlockFinderOptions,
) -> Result<DiagonalBlocks<Q>> {
    check_flat_meta_data(charges.len(), flows.len(), true)?;
    let num_legs = charges.len();
    if partition > num_legs {
        return Err(SymmetryError::PartitionOutOfRange {
            partition,
            num_legs,
        });
    }

    if partition == 0 || partition == num_legs {
        let num_nonzero = compute_num_nonzero(charges, flows)?;
        let mut block_dims = [vec![1], vec![num_nonzero]];
        if partition == num_legs {
            block_dims.swap(0, 1);
        }
        return Ok(DiagonalBlocks {
            block_maps: vec![(0..num_nonzero).collect()],
            block_charges: vec![Q::identity()],
            block_dims,
        });
    }

    let row_charges = &charges[..partition];
    let row_flows = &flows[..partition];
    let col_flows: Vec<bool> = flows[partition..].iter().map(|f| !f).collect();
    let rows = compute_fused_charge_degeneracies(row_charges, row_flows)?;
    let cols = compute_fused_charge_degeneracies(&charges[partition..], &col_flows)?;

    let (block_charges, row_to_block, col_to_block) = intersect(&rows.charges, &cols.charges);
    let num_blocks = block_charges.len();
    if num_blocks == 0 {
        debug!(partition, "no diagonal blocks");
        return Ok(DiagonalBlocks::empty());
    }

    let row_degen: Vec<usize> = row_to_block.iter().map(|&r| rows.degeneracies[r]).collect();
    let col_degen: Vec<usize> = col_to_block.iter().map(|&c| cols.degeneracies[c]).collect();

    // Block index of every row that has a block at all.
    let row_ind = reduce_charges(row_charges, row_flows, &block_charges)?;
    let label_to_block: Vec<usize> = row_ind
        .unique_charges()
        .iter()
        .map(|q| match block_charges.binary_search(q) {
            Ok(b) | Err(b) => b,
        })
        .collect();
    let row_blocks: Vec<usize> = row_ind
        .charge_labels()
        .iter()
        .map(|&l| label_to_block[l])
        .collect();

    // Start of each row's elements in the data vector.
    let mut row_offsets = Vec::with_capacity(row_blocks.len());
    let mut num_nonzero = 0;
    for &b in &row_blocks {
        row_offsets.push(num_nonzero);
        num_nonzero += col_degen[b];
    }

    let strategy = options.strategy_for(num_blocks);
    debug!(partition, num_blocks, num_nonzero, ?strategy, "finding diagonal blocks");
    let block_rows = gather_block_rows(&row_blocks, num_blocks, strategy);

    let block_maps = block_rows
        .iter()
        .zip(&col_degen)
        .map(|(block_row_list, &num_cols)| {
            let mut map = Vec::with_capacity(block_row_list.len() * num_cols);
            for &row in block_row_list {
                let start = row_offsets[row];
                map.extend(start..start + num_cols);
            }
            map
        })
        .collect();

    Ok(DiagonalBlocks {
        block_maps,
        block_charges,
        block_dims: [row_degen, col_degen],
    })
}

/// Rows of each block, in row order.
fn gather_block_rows(
    row_blocks: &[usize],
    num_blocks: usize,
    strategy: GatherStrategy,
) -> Vec<Vec<usize>> {
    match strategy {
        GatherStrategy::MaskScan => (0..num_blocks)
            .map(|b| {
                row_blocks
                    .iter()
                    .enumerate()
                    .filter_map(|(row, &rb)| (rb == b).then_some(row))
                    .collect()
            })
            .collect(),
        GatherStrategy::Scatter => {
            let mut block_rows = vec![Vec::new(); num_blocks];
            for (row, &b) in row_blocks.iter().enumerate() {
                block_rows[b].push(row);
            }
            block_rows
        }
    }
}
