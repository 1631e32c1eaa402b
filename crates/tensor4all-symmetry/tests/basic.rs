use tensor4all_symmetry::{
    compute_num_nonzero, compute_sparse_lookup, find_best_partition, find_diagonal_sparse_blocks,
    get_flat_meta_data, ChargeArray, Index, SymmetryError, U1Charge, Z2Charge,
};

fn u1(values: &[i64]) -> ChargeArray<U1Charge> {
    values.iter().map(|&v| U1Charge(v)).collect()
}

#[test]
fn test_best_partition_examples() {
    assert_eq!(find_best_partition(&[2, 3, 4]).unwrap(), 2);
    assert_eq!(find_best_partition(&[4, 4]).unwrap(), 1);
    assert!(matches!(
        find_best_partition(&[4]),
        Err(SymmetryError::TooFewDimensions { len: 1 })
    ));
}

#[test]
fn test_sparse_lookup_positions() {
    let sparse = compute_sparse_lookup(&[u1(&[0, 1, 0, 1])], &[true], &[U1Charge(0)]).unwrap();
    assert_eq!(sparse.positions, vec![0, 2]);
    assert_eq!(sparse.lookup.len(), 2);
}

#[test]
fn test_partition_zero_single_block() {
    let charges = [u1(&[0, 1, -1]), u1(&[1, 0]), u1(&[0, 1])];
    let flows = [true, false, false];
    let nnz = compute_num_nonzero(&charges, &flows).unwrap();
    let blocks = find_diagonal_sparse_blocks(&charges, &flows, 0).unwrap();
    assert_eq!(blocks.num_blocks(), 1);
    assert_eq!(blocks.block_dims, [vec![1], vec![nnz]]);
    assert_eq!(blocks.block_maps[0], (0..nnz).collect::<Vec<_>>());
}

#[test]
fn test_blocks_from_fused_indices() {
    // A rank-4 tensor matricized as (a b) x (c d) through fused legs.
    let a = Index::new(u1(&[0, 1]), true);
    let b = Index::new(u1(&[0, 1]), true);
    let c = Index::new(u1(&[0, 1]), false);
    let d = Index::new(u1(&[0, 1]), false);
    let row = a.fuse(&b);
    let col = c.fuse(&d);
    let (charges, flows) = get_flat_meta_data(&[row.clone(), col]);
    assert_eq!(flows, vec![true, true, false, false]);

    let blocks = find_diagonal_sparse_blocks(&charges, &flows, row.rank()).unwrap();
    assert_eq!(blocks.block_charges, vec![U1Charge(0), U1Charge(1), U1Charge(2)]);
    assert_eq!(blocks.block_dims, [vec![1, 2, 1], vec![1, 2, 1]]);
    assert_eq!(blocks.total_elements(), 6);
    assert_eq!(compute_num_nonzero(&charges, &flows).unwrap(), 6);
}

#[test]
fn test_flipped_row_index_changes_blocks() {
    let a = Index::new(u1(&[0, 1, 2]), true);
    let b = Index::new(u1(&[0, 1, 2]), true);
    let (charges, flows) = get_flat_meta_data(&[a.flip_flow(), b.clone()]);
    // -qa + qb = 0 <=> qa == qb: three 1x1 blocks.
    let blocks = find_diagonal_sparse_blocks(&charges, &flows, 1).unwrap();
    assert_eq!(blocks.num_blocks(), 3);
    assert_eq!(blocks.block_charges, vec![U1Charge(-2), U1Charge(-1), U1Charge(0)]);

    // qa + qb = 0 only for qa == qb == 0.
    let (charges, flows) = get_flat_meta_data(&[a, b]);
    let blocks = find_diagonal_sparse_blocks(&charges, &flows, 1).unwrap();
    assert_eq!(blocks.num_blocks(), 1);
    assert_eq!(blocks.block_maps, vec![vec![0]]);
}

#[test]
fn test_u1_z2_product_charges() {
    let leg: ChargeArray<(U1Charge, Z2Charge)> = [(0, 0), (1, 1), (1, 0), (2, 1)]
        .iter()
        .map(|&(n, p)| (U1Charge(n), Z2Charge::new(p)))
        .collect();
    let charges = [leg.clone(), leg.clone(), leg];
    let flows = [true, true, false];

    let nnz = compute_num_nonzero(&charges, &flows).unwrap();
    for partition in 0..=3 {
        let blocks = find_diagonal_sparse_blocks(&charges, &flows, partition).unwrap();
        assert_eq!(blocks.total_elements(), nnz);
        for b in 0..blocks.num_blocks() {
            let (rows, cols) = blocks.block_shape(b);
            assert_eq!(rows * cols, blocks.block_maps[b].len());
        }
    }
}

#[test]
fn test_invalid_metadata() {
    assert_eq!(
        find_diagonal_sparse_blocks(&[u1(&[0])], &[true, false], 1),
        Err(SymmetryError::FlowCountMismatch { charges: 1, flows: 2 })
    );
    assert_eq!(
        find_diagonal_sparse_blocks::<U1Charge>(&[], &[], 0),
        Err(SymmetryError::EmptyCharges)
    );
}
