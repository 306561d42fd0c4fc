//! Poseidon2 over BN254
//!
//! Matches the Circom circuit implementations and the Soroban pool
//! contract: Merkle nodes use the `t = 2` permutation in feed-forward
//! compression mode, tag leaves use the `t = 4` permutation with a zero
//! domain-separation lane.

use core::ops::Add;

use zkhash::{
    ark_ff::{BigInteger, PrimeField},
    fields::bn256::FpBN256 as Scalar,
    poseidon2::{
        poseidon2::Poseidon2,
        poseidon2_instance_bn256::{POSEIDON2_BN256_PARAMS_2, POSEIDON2_BN256_PARAMS_4},
    },
};

use super::TwoToOneHasher;
use crate::{
    digest::{Digest, FIELD_SIZE},
    error::{Error, Result},
};

const NAME: &str = "poseidon2";

/// Poseidon2 compression: `P(left, right)[0] + left`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Poseidon2Compression;

impl TwoToOneHasher for Poseidon2Compression {
    fn name(&self) -> &'static str {
        NAME
    }

    fn hash(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        let left = digest_to_scalar(left)?;
        let right = digest_to_scalar(right)?;
        Ok(scalar_to_digest(&poseidon2_compression(left, right)))
    }
}

/// Compression for merkle tree nodes
///
/// The permutation output is truncated to its first lane after the
/// feed-forward addition of the left input.
fn poseidon2_compression(left: Scalar, right: Scalar) -> Scalar {
    let poseidon2 = Poseidon2::new(&POSEIDON2_BN256_PARAMS_2);
    let input = [left, right];
    let perm = poseidon2.permutation(&input);
    perm[0].add(input[0])
}

/// Poseidon2 hash with 3 inputs and optional domain separation (t=4, r=3, c=1)
fn poseidon2_hash3(a: Scalar, b: Scalar, c: Scalar, domain: Option<Scalar>) -> Scalar {
    let poseidon2 = Poseidon2::new(&POSEIDON2_BN256_PARAMS_4);
    let input = [a, b, c, domain.unwrap_or_else(|| Scalar::from(0u64))];
    let perm = poseidon2.permutation(&input);
    perm[0]
}

/// Derive an empty leaf from a short ASCII tag
///
/// Each of the (at most three) bytes becomes one field element, missing
/// positions are zero, and the leaf is `Poseidon2(b0, b1, b2)` with domain 0.
/// `"XLM"` gives the empty leaf of the Stellar pool contract.
pub fn empty_leaf_from_tag(tag: &str) -> Result<Digest> {
    if tag.is_empty() || tag.len() > 3 || !tag.is_ascii() {
        return Err(Error::InvalidEncoding(format!(
            "empty leaf tag `{tag}` must be 1 to 3 ASCII characters"
        )));
    }

    let mut lanes = [Scalar::from(0u64); 3];
    for (lane, byte) in lanes.iter_mut().zip(tag.bytes()) {
        *lane = Scalar::from(u64::from(byte));
    }

    let leaf = poseidon2_hash3(lanes[0], lanes[1], lanes[2], None);
    log::debug!("derived empty leaf {} from tag {tag:?}", scalar_to_digest(&leaf));
    Ok(scalar_to_digest(&leaf))
}

/// Decode a canonical field element, rejecting values at or above the modulus
fn digest_to_scalar(digest: &Digest) -> Result<Scalar> {
    let scalar = Scalar::from_le_bytes_mod_order(&digest.to_le_bytes());
    if scalar_to_digest(&scalar) != *digest {
        return Err(Error::UnsupportedInput {
            primitive: NAME,
            input: *digest,
        });
    }
    Ok(scalar)
}

fn scalar_to_digest(scalar: &Scalar) -> Digest {
    let bytes = scalar.into_bigint().to_bytes_le();
    let mut out = [0u8; FIELD_SIZE];
    out.copy_from_slice(&bytes[..FIELD_SIZE]);
    Digest::from_le_bytes(out)
}
