//! Error type shared by every operation of the crate

use thiserror::Error;

use crate::digest::Digest;

/// Result alias with [`enum@Error`] as the default error
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while computing, checking or using level-default tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Requested depth is zero or exceeds the supported maximum
    #[error("depth {depth} is outside the supported range 1..={max}")]
    InvalidDepth {
        /// Requested depth
        depth: usize,
        /// Largest supported depth
        max: usize,
    },
    /// A hash input is not a canonical element of the primitive's field
    #[error("{primitive} cannot hash {input}: not a canonical field element")]
    UnsupportedInput {
        /// Name of the rejecting primitive
        primitive: &'static str,
        /// Offending input
        input: Digest,
    },
    /// A computed level disagrees with an independently produced reference
    #[error("level {level} mismatch: expected {expected}, computed {actual}")]
    HashMismatch {
        /// First level that differs
        level: usize,
        /// Value from the reference
        expected: Digest,
        /// Value computed here
        actual: Digest,
    },
    /// A reference table has a different number of levels
    #[error("reference table has {expected} levels but {actual} were computed")]
    ReferenceLength {
        /// Number of levels in the reference
        expected: usize,
        /// Number of levels computed
        actual: usize,
    },
    /// Leaf index does not address a leaf of the tree
    #[error("leaf index {index} does not fit a tree of depth {depth}")]
    LeafIndexOutOfRange {
        /// Requested leaf index
        index: u64,
        /// Tree depth
        depth: usize,
    },
    /// Text or byte input could not be decoded
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
    /// The backing hash library refused to run
    #[error("{primitive} failed: {reason}")]
    Primitive {
        /// Name of the failing primitive
        primitive: &'static str,
        /// Reason reported by the library
        reason: String,
    },
}
