/// Mixes a tree-level seed with a node identifier (splitmix64 finalizer), so
/// sibling nodes and replicated trees draw independent weight sequences.
pub fn derive_seed(tree_seed: u64, node_id: u64) -> u64 {
    let mut z = tree_seed
        .wrapping_add(node_id.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
pub fn l1_norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v.abs()).sum()
}

/// Elementwise `|a - b|`.
#[inline]
pub fn abs_diff(a: &[f64], b: &[f64]) -> Vec<f64> {
    debug_assert_eq!(a.len(), b.len(), "abs_diff length mismatch");
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).collect()
}
