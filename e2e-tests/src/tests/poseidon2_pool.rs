//! Poseidon2 tables against the zero hashes hard-coded in the pool contract

use anyhow::Result;
use merkle_zeroes::{
    DefaultsCache, Digest, HashPrimitive, MAX_DEPTH, SparseTree, compute_empty_tree_defaults_from,
    empty_leaf_from_tag, empty_path,
};

use super::utils::{POOL_LEVELS, POOL_TAG, POOL_ZEROES, parse_table};

fn pool_leaf() -> Result<Digest> {
    Ok(empty_leaf_from_tag(POOL_TAG)?)
}

#[test]
fn tag_derives_the_pool_empty_leaf() -> Result<()> {
    let reference = parse_table(&POOL_ZEROES)?;
    assert_eq!(pool_leaf()?, reference[0]);
    Ok(())
}

#[test]
fn full_depth_table_matches_the_pool() -> Result<()> {
    let reference = parse_table(&POOL_ZEROES)?;
    let defaults = compute_empty_tree_defaults_from(&HashPrimitive::Poseidon2, MAX_DEPTH, pool_leaf()?)?;
    defaults.check_against(&reference)?;
    assert_eq!(defaults.root(), reference[MAX_DEPTH]);
    Ok(())
}

#[test]
fn production_depth_is_a_prefix() -> Result<()> {
    let reference = parse_table(&POOL_ZEROES)?;
    let defaults = DefaultsCache::new().get(HashPrimitive::Poseidon2, pool_leaf()?, POOL_LEVELS)?;
    defaults.check_against(&reference[..=POOL_LEVELS])?;
    defaults.check_root(&reference[POOL_LEVELS])?;
    Ok(())
}

#[test]
fn tampered_reference_reports_the_level() -> Result<()> {
    let mut reference = parse_table(&POOL_ZEROES)?;
    reference[7] = Digest::from_u64(7);
    let defaults = compute_empty_tree_defaults_from(&HashPrimitive::Poseidon2, MAX_DEPTH, pool_leaf()?)?;
    let err = defaults
        .check_against(&reference)
        .expect_err("tampered level");
    assert!(err.to_string().starts_with("level 7 mismatch"), "{err}");
    Ok(())
}

#[test]
fn empty_pool_tree_paths() -> Result<()> {
    let tree = SparseTree::new(HashPrimitive::Poseidon2, POOL_LEVELS, pool_leaf()?)?;
    let reference = parse_table(&POOL_ZEROES)?;
    assert_eq!(tree.root()?, reference[POOL_LEVELS]);

    let last = (1u64 << POOL_LEVELS) - 1;
    for index in [0, 1, 12_345, last] {
        let proof = tree.proof(index)?;
        assert_eq!(proof, empty_path(tree.defaults(), index)?);
        assert_eq!(proof.siblings, reference[..POOL_LEVELS]);
        assert_eq!(
            proof.compute_root(&HashPrimitive::Poseidon2, &reference[0])?,
            reference[POOL_LEVELS]
        );
    }
    Ok(())
}

#[test]
fn report_json_is_a_reference_document() -> Result<()> {
    let reference = parse_table(&POOL_ZEROES)?;
    let json = serde_json::to_string(&reference[..=4])?;
    let levels: Vec<Digest> = serde_json::from_str(&json)?;
    let defaults = compute_empty_tree_defaults_from(&HashPrimitive::Poseidon2, 4, pool_leaf()?)?;
    defaults.check_against(&levels)?;
    Ok(())
}
