use bls12_381::Scalar;
use sha2::{Digest, Sha256};

use crate::{
    codec::{bytes_to_bls_field, scalar_to_bytes},
    consts::FIAT_SHAMIR_PROTOCOL_DOMAIN,
    dtypes::CommitmentSequence,
    polynomial::Polynomial,
};

/// Derives the aggregation challenge `r` from the batch.
///
/// The transcript is, in order: the protocol domain separator, the domain
/// size and the number of polynomials (each as 8 little-endian bytes), every
/// evaluation of every polynomial as 32 canonical bytes, then every
/// compressed commitment. The SHA-256 digest is reduced into the field.
pub fn hash_to_bls_field<C: CommitmentSequence + ?Sized>(
    polynomials: &[Polynomial],
    commitments: &C,
    domain_size: usize,
) -> Scalar {
    let mut hasher = Sha256::new();

    hasher.update(FIAT_SHAMIR_PROTOCOL_DOMAIN);
    hasher.update((domain_size as u64).to_le_bytes());
    hasher.update((polynomials.len() as u64).to_le_bytes());

    for polynomial in polynomials {
        for evaluation in polynomial {
            hasher.update(scalar_to_bytes(evaluation));
        }
    }
    for i in 0..commitments.len() {
        hasher.update(commitments.at(i));
    }

    let digest: [u8; 32] = hasher.finalize().into();
    bytes_to_bls_field(&digest)
}
