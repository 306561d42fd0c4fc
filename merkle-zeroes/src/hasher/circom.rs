//! Circom-parameterized Poseidon over BN254
//!
//! Same permutation and constants as circomlib's `Poseidon(2)` and Noir's
//! `std::hash::poseidon::bn254::hash_2`.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use light_poseidon::{Poseidon, PoseidonHasher};

use super::TwoToOneHasher;
use crate::{
    digest::{Digest, FIELD_SIZE},
    error::{Error, Result},
};

const NAME: &str = "circom-poseidon";

/// Poseidon hash of two field elements with circom parameters (t = 3)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CircomPoseidon;

impl TwoToOneHasher for CircomPoseidon {
    fn name(&self) -> &'static str {
        NAME
    }

    fn hash(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        let inputs = [digest_to_fr(left)?, digest_to_fr(right)?];
        let mut hasher = Poseidon::<Fr>::new_circom(2).map_err(primitive_error)?;
        let out = hasher.hash(&inputs).map_err(primitive_error)?;
        Ok(fr_to_digest(&out))
    }
}

fn primitive_error(e: impl core::fmt::Display) -> Error {
    Error::Primitive {
        primitive: NAME,
        reason: e.to_string(),
    }
}

/// Decode a canonical field element, rejecting values at or above the modulus
fn digest_to_fr(digest: &Digest) -> Result<Fr> {
    let fr = Fr::from_le_bytes_mod_order(&digest.to_le_bytes());
    if fr_to_digest(&fr) != *digest {
        return Err(Error::UnsupportedInput {
            primitive: NAME,
            input: *digest,
        });
    }
    Ok(fr)
}

fn fr_to_digest(fr: &Fr) -> Digest {
    let bytes = fr.into_bigint().to_bytes_le();
    let mut out = [0u8; FIELD_SIZE];
    out.copy_from_slice(&bytes[..FIELD_SIZE]);
    Digest::from_le_bytes(out)
}
