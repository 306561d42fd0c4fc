//! Sparse trees and Merkle paths over level defaults
//!
//! A fixed-depth tree where only populated leaves are stored. Untouched
//! subtrees are never materialized: their hash at level `i` is the level
//! default, so roots and paths cost `O(populated leaves * depth)` hashes
//! instead of `O(2^depth)`.

use std::collections::BTreeMap;

use crate::{
    cache::DefaultsCache,
    defaults::{LevelDefaults, MAX_DEPTH, compute_empty_tree_defaults_from},
    digest::Digest,
    error::{Error, Result},
    hasher::{HashPrimitive, TwoToOneHasher},
};

/// Merkle path of one leaf
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerklePath {
    /// Sibling digests, leaf level first
    pub siblings: Vec<Digest>,
    /// Leaf index bits, LSB first: bit `i` set means the running node is the
    /// right child at level `i`
    pub path_indices: u64,
}

impl MerklePath {
    /// Number of levels in the path
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Fold `leaf` up the path into the root it proves
    ///
    /// Paths longer than [`MAX_DEPTH`] are rejected.
    pub fn compute_root<H>(&self, hasher: &H, leaf: &Digest) -> Result<Digest>
    where
        H: TwoToOneHasher + ?Sized,
    {
        if self.depth() > MAX_DEPTH {
            return Err(Error::InvalidDepth {
                depth: self.depth(),
                max: MAX_DEPTH,
            });
        }

        let mut current = *leaf;
        let mut bits = self.path_indices;
        for sibling in &self.siblings {
            let is_right = bits & 1 == 1;
            bits >>= 1;
            current = if is_right {
                hasher.hash(sibling, &current)?
            } else {
                hasher.hash(&current, sibling)?
            };
        }
        Ok(current)
    }
}

/// Number of leaves of a tree of `depth`
fn leaf_count(depth: usize) -> Result<u64> {
    u32::try_from(depth)
        .ok()
        .and_then(|d| 1u64.checked_shl(d))
        .ok_or(Error::LeafIndexOutOfRange { index: 0, depth })
}

fn check_index(index: u64, depth: usize) -> Result<()> {
    if index >= leaf_count(depth)? {
        return Err(Error::LeafIndexOutOfRange { index, depth });
    }
    Ok(())
}

/// Path of any leaf in an untouched tree: the sibling at level `i` is the
/// level default `defaults[i]`
pub fn empty_path(defaults: &LevelDefaults, index: u64) -> Result<MerklePath> {
    let depth = defaults.depth();
    check_index(index, depth)?;
    Ok(MerklePath {
        siblings: defaults.as_slice()[..depth].to_vec(),
        path_indices: index,
    })
}

/// Fixed-depth sparse Merkle tree
#[derive(Clone, Debug)]
pub struct SparseTree {
    primitive: HashPrimitive,
    defaults: LevelDefaults,
    leaves: BTreeMap<u64, Digest>,
}

impl SparseTree {
    /// Empty tree of `depth` whose untouched leaves hold `empty_leaf`
    ///
    /// Level defaults come from the process-wide [`DefaultsCache`].
    pub fn new(primitive: HashPrimitive, depth: usize, empty_leaf: Digest) -> Result<Self> {
        let defaults = DefaultsCache::global().get(primitive, empty_leaf, depth)?;
        Ok(Self::from_parts(primitive, defaults))
    }

    /// Empty tree over already computed defaults
    ///
    /// The table is recomputed with `primitive` from its empty leaf; a table
    /// built with another primitive fails with [`Error::HashMismatch`].
    pub fn with_defaults(primitive: HashPrimitive, defaults: LevelDefaults) -> Result<Self> {
        compute_empty_tree_defaults_from(&primitive, defaults.depth(), defaults.empty_leaf())?
            .check_against(defaults.as_slice())?;
        Ok(Self::from_parts(primitive, defaults))
    }

    fn from_parts(primitive: HashPrimitive, defaults: LevelDefaults) -> Self {
        Self {
            primitive,
            defaults,
            leaves: BTreeMap::new(),
        }
    }

    /// Hash primitive of the tree
    pub fn primitive(&self) -> HashPrimitive {
        self.primitive
    }

    /// Tree depth
    pub fn depth(&self) -> usize {
        self.defaults.depth()
    }

    /// Level defaults of the tree
    pub fn defaults(&self) -> &LevelDefaults {
        &self.defaults
    }

    /// Number of explicitly set leaves
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether no leaf has been set
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Set the leaf at `index`, returning the previously set value
    pub fn insert(&mut self, index: u64, leaf: Digest) -> Result<Option<Digest>> {
        check_index(index, self.depth())?;
        Ok(self.leaves.insert(index, leaf))
    }

    /// Leaf at `index`, the empty leaf if unset
    pub fn get(&self, index: u64) -> Result<Digest> {
        check_index(index, self.depth())?;
        Ok(self
            .leaves
            .get(&index)
            .copied()
            .unwrap_or_else(|| self.defaults.empty_leaf()))
    }

    /// Current root
    pub fn root(&self) -> Result<Digest> {
        self.walk(None).map(|(root, _)| root)
    }

    /// Merkle path of the leaf at `index`
    pub fn proof(&self, index: u64) -> Result<MerklePath> {
        check_index(index, self.depth())?;
        let (_, siblings) = self.walk(Some(index))?;
        Ok(MerklePath {
            siblings,
            path_indices: index,
        })
    }

    /// Hash populated nodes level by level, collecting the siblings of
    /// `tracked` on the way up
    fn walk(&self, mut tracked: Option<u64>) -> Result<(Digest, Vec<Digest>)> {
        let mut nodes = self.leaves.clone();
        let mut siblings = Vec::with_capacity(if tracked.is_some() { self.depth() } else { 0 });

        for level in 0..self.depth() {
            let default = self.defaults.as_slice()[level];
            let node = |index: u64| nodes.get(&index).copied().unwrap_or(default);

            if let Some(index) = tracked {
                siblings.push(node(index ^ 1));
                tracked = Some(index >> 1);
            }

            let mut parents = BTreeMap::new();
            for &index in nodes.keys() {
                let parent = index >> 1;
                if parents.contains_key(&parent) {
                    continue;
                }
                let left = node(index & !1);
                let right = node(index | 1);
                parents.insert(parent, self.primitive.hash(&left, &right)?);
            }
            nodes = parents;
        }

        let root = nodes
            .get(&0)
            .copied()
            .unwrap_or_else(|| self.defaults.root());
        Ok((root, siblings))
    }
}
