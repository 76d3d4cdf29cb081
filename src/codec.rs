//! Conversions between wire bytes and field / group elements.
//!
//! Field elements travel as 32 big-endian bytes, `bls12_381` works on
//! little-endian limbs, so every conversion flips the byte order.

use alloc::string::ToString;
use bls12_381::{G1Affine, G1Projective, G2Affine, Scalar};

use crate::consts::{BYTES_PER_FIELD_ELEMENT, BYTES_PER_G1_POINT, BYTES_PER_G2_POINT};
use crate::dtypes::Bytes48;
use crate::enums::KzgError;

fn reversed(bytes: &[u8; BYTES_PER_FIELD_ELEMENT]) -> [u8; BYTES_PER_FIELD_ELEMENT] {
    let mut out = *bytes;
    out.reverse();
    out
}

/// Maps any 32 bytes to a field element by reducing the big-endian integer
/// modulo the scalar field order. Never fails.
pub fn bytes_to_bls_field(bytes: &[u8; BYTES_PER_FIELD_ELEMENT]) -> Scalar {
    let mut wide = [0u8; 64];
    wide[..BYTES_PER_FIELD_ELEMENT].copy_from_slice(&reversed(bytes));
    Scalar::from_bytes_wide(&wide)
}

/// Canonical big-endian encoding of a field element.
pub fn scalar_to_bytes(scalar: &Scalar) -> [u8; BYTES_PER_FIELD_ELEMENT] {
    let mut bytes = scalar.to_bytes();
    bytes.reverse();
    bytes
}

/// Strict decode: rejects encodings of integers that are not below the modulus.
pub fn scalar_from_bytes(bytes: &[u8; BYTES_PER_FIELD_ELEMENT]) -> Result<Scalar, KzgError> {
    Option::from(Scalar::from_bytes(&reversed(bytes))).ok_or(KzgError::InvalidScalar)
}

pub fn g1_from_compressed(bytes: &[u8; BYTES_PER_G1_POINT]) -> Result<G1Affine, KzgError> {
    Option::from(G1Affine::from_compressed(bytes)).ok_or_else(|| {
        KzgError::InvalidG1Point("Failed to parse G1Affine from bytes".to_string())
    })
}

pub fn g2_from_compressed(bytes: &[u8; BYTES_PER_G2_POINT]) -> Result<G2Affine, KzgError> {
    Option::from(G2Affine::from_compressed(bytes)).ok_or_else(|| {
        KzgError::InvalidG2Point("Failed to parse G2Affine from bytes".to_string())
    })
}

pub fn g1_to_compressed(point: &G1Projective) -> Bytes48 {
    Bytes48::new(G1Affine::from(point).to_compressed())
}
