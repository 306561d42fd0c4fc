//! Level-default tables of empty trees
//!
//! Every node of an all-empty tree has identical children, so each level has
//! a single default value: `defaults[0]` is the empty leaf and
//! `defaults[i] = H(defaults[i - 1], defaults[i - 1])`. `defaults[depth]` is
//! the root of the empty tree and `defaults[i]` is the sibling every Merkle
//! path uses at level `i` while that subtree is untouched.

use crate::{
    digest::{Digest, ZERO_DIGEST},
    error::{Error, Result},
    hasher::TwoToOneHasher,
};

/// Deepest supported tree
pub const MAX_DEPTH: usize = 32;

/// Per-level defaults of an empty tree, from the leaf level (index 0) to
/// the root (index `depth`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelDefaults {
    levels: Vec<Digest>,
}

impl LevelDefaults {
    /// Tree depth (number of hashing levels)
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Digest of an empty leaf
    pub fn empty_leaf(&self) -> Digest {
        self.levels[0]
    }

    /// Root of the empty tree
    pub fn root(&self) -> Digest {
        self.levels[self.depth()]
    }

    /// Default digest at `level`, if the table reaches it
    pub fn level(&self, level: usize) -> Option<Digest> {
        self.levels.get(level).copied()
    }

    /// All levels, leaf first
    pub fn as_slice(&self) -> &[Digest] {
        &self.levels
    }

    /// Iterate over the levels, leaf first
    pub fn iter(&self) -> core::slice::Iter<'_, Digest> {
        self.levels.iter()
    }

    /// Consume the table into its levels
    pub fn into_vec(self) -> Vec<Digest> {
        self.levels
    }

    /// Table of a shallower tree with the same primitive and empty leaf
    pub fn truncated(&self, depth: usize) -> Result<LevelDefaults> {
        if depth == 0 || depth > self.depth() {
            return Err(Error::InvalidDepth {
                depth,
                max: self.depth(),
            });
        }
        Ok(LevelDefaults {
            levels: self.levels[..=depth].to_vec(),
        })
    }

    /// Compare against a table produced independently, e.g. by the circuit
    /// toolchain
    pub fn check_against(&self, reference: &[Digest]) -> Result<()> {
        if reference.len() != self.levels.len() {
            return Err(Error::ReferenceLength {
                expected: reference.len(),
                actual: self.levels.len(),
            });
        }

        let mismatch = self
            .levels
            .iter()
            .zip(reference)
            .enumerate()
            .find(|(_, (actual, expected))| actual != expected);

        match mismatch {
            Some((level, (actual, expected))) => Err(Error::HashMismatch {
                level,
                expected: *expected,
                actual: *actual,
            }),
            None => Ok(()),
        }
    }

    /// Compare the root against an independently computed one
    pub fn check_root(&self, expected: &Digest) -> Result<()> {
        let actual = self.root();
        if actual != *expected {
            return Err(Error::HashMismatch {
                level: self.depth(),
                expected: *expected,
                actual,
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a LevelDefaults {
    type Item = &'a Digest;
    type IntoIter = core::slice::Iter<'a, Digest>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Reject depths outside `1..=MAX_DEPTH`
pub fn validate_depth(depth: usize) -> Result<()> {
    if depth == 0 || depth > MAX_DEPTH {
        return Err(Error::InvalidDepth {
            depth,
            max: MAX_DEPTH,
        });
    }
    Ok(())
}

/// Level defaults of an empty tree of `depth` whose leaves are [`ZERO_DIGEST`]
pub fn compute_empty_tree_defaults<H>(hasher: &H, depth: usize) -> Result<LevelDefaults>
where
    H: TwoToOneHasher + ?Sized,
{
    compute_empty_tree_defaults_from(hasher, depth, ZERO_DIGEST)
}

/// Level defaults of an empty tree of `depth` whose leaves are `empty_leaf`
pub fn compute_empty_tree_defaults_from<H>(
    hasher: &H,
    depth: usize,
    empty_leaf: Digest,
) -> Result<LevelDefaults>
where
    H: TwoToOneHasher + ?Sized,
{
    validate_depth(depth)?;

    let capacity = depth.checked_add(1).ok_or(Error::InvalidDepth {
        depth,
        max: MAX_DEPTH,
    })?;
    let mut levels = Vec::with_capacity(capacity);
    levels.push(empty_leaf);

    let mut prev = empty_leaf;
    for level in 1..=depth {
        prev = hasher.hash(&prev, &prev)?;
        log::trace!("{} level {level}: {prev}", hasher.name());
        levels.push(prev);
    }

    log::debug!(
        "computed {} empty-tree defaults, depth {depth}, root {prev}",
        hasher.name()
    );
    Ok(LevelDefaults { levels })
}
