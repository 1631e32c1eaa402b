//! Configuration options for block finding.

/// Default number of blocks from which the scatter gather is used.
pub const DEFAULT_DENSE_GATHER_THRESHOLD: usize = 15;

/// How rows are assigned to blocks when building block maps.
///
/// Both strategies produce identical output; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatherStrategy {
    /// One scan over all rows per block. Cheap for few blocks.
    MaskScan,
    /// A single pass scattering every row into its block.
    Scatter,
}

/// Options for [`find_diagonal_sparse_blocks_with_options`].
///
/// # Example
///
/// ```
/// use tensor4all_symmetry::{BlockFinderOptions, GatherStrategy};
///
/// let opts = BlockFinderOptions::default().with_dense_gather_threshold(4);
/// assert_eq!(opts.strategy_for(3), GatherStrategy::MaskScan);
/// assert_eq!(opts.strategy_for(4), GatherStrategy::Scatter);
/// ```
///
/// [`find_diagonal_sparse_blocks_with_options`]: crate::find_diagonal_sparse_blocks_with_options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFinderOptions {
    /// Block count from which [`GatherStrategy::Scatter`] replaces
    /// [`GatherStrategy::MaskScan`].
    pub dense_gather_threshold: usize,
}

impl Default for BlockFinderOptions {
    fn default() -> Self {
        Self {
            dense_gather_threshold: DEFAULT_DENSE_GATHER_THRESHOLD,
        }
    }
}

impl BlockFinderOptions {
    /// Set the block count from which the scatter gather is used.
    pub fn with_dense_gather_threshold(mut self, threshold: usize) -> Self {
        self.dense_gather_threshold = threshold;
        self
    }

    /// Always scan per block.
    pub fn mask_scan() -> Self {
        Self::default().with_dense_gather_threshold(usize::MAX)
    }

    /// Always scatter.
    pub fn scatter() -> Self {
        Self::default().with_dense_gather_threshold(0)
    }

    /// Strategy used for `num_blocks` blocks.
    pub fn strategy_for(&self, num_blocks: usize) -> GatherStrategy {
        if num_blocks < self.dense_gather_threshold {
            GatherStrategy::MaskScan
        } else {
            GatherStrategy::Scatter
        }
    }
}
