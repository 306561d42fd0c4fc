//! Empty-tree defaults for fixed-depth sparse Merkle trees
//!
//! Computes the per-level "zero hashes" of a binary Merkle tree whose leaves
//! all hold the canonical empty value, over the BN254 scalar field. The
//! resulting table must match the one embedded in the circuits and contracts
//! that verify paths against it, so the hash primitives are thin adapters
//! around the same implementations the circuits are built from.
//!
//! ```no_run
//! use merkle_zeroes::{HashPrimitive, ZERO_DIGEST, compute_empty_tree_defaults};
//!
//! let defaults = compute_empty_tree_defaults(&HashPrimitive::Poseidon2, 20)?;
//! assert_eq!(defaults.as_slice().len(), 21);
//! assert_eq!(defaults.empty_leaf(), ZERO_DIGEST);
//! println!("root: {}", defaults.root());
//! # Ok::<(), merkle_zeroes::Error>(())
//! ```
//!
//! # Modules
//! - [`digest`]: the 32-byte digest type and its hex/decimal encodings
//! - [`hasher`]: the two-to-one hash seam and the shipped primitives
//! - [`defaults`]: the level-default table calculator
//! - [`cache`]: process-wide memoization of computed tables
//! - [`merkle`]: sparse trees and Merkle paths built on the defaults

pub mod cache;
pub mod defaults;
pub mod digest;
pub mod error;
pub mod hasher;
pub mod merkle;

pub use cache::DefaultsCache;
pub use defaults::{
    LevelDefaults, MAX_DEPTH, compute_empty_tree_defaults, compute_empty_tree_defaults_from,
};
pub use digest::{Digest, FIELD_SIZE, ZERO_DIGEST};
pub use error::{Error, Result};
pub use hasher::{
    CircomPoseidon, HashPrimitive, Poseidon2Compression, TwoToOneHasher, empty_leaf_from_tag,
};
pub use merkle::{MerklePath, SparseTree, empty_path};
