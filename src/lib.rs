#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate alloc;
#[cfg(all(test, not(feature = "std")))]
extern crate std;

pub mod codec;
pub mod consts;
pub mod dtypes;
pub mod enums;
pub mod fiat_shamir;
pub mod kzg_proof;
pub mod msm;
pub mod pairings;
pub mod parse;
pub mod polynomial;
pub mod trusted_setup;

#[cfg(test)]
mod test_utils;

pub use codec::{bytes_to_bls_field, scalar_from_bytes, scalar_to_bytes};
pub use consts::*;
pub use dtypes::*;
pub use enums::KzgError;
pub use fiat_shamir::hash_to_bls_field;
pub use kzg_proof::KzgProof;
pub use parse::TrustedSetup;
pub use polynomial::{
    blob_to_polynomial, blobs_to_polynomials, compute_powers,
    evaluate_polynomial_in_evaluation_form, Polynomial,
};
pub use trusted_setup::{bit_reversal_permutation, KzgSettings};

use alloc::vec::Vec;

pub(crate) fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>, KzgError> {
    let trimmed_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    hex::decode(trimmed_str)
        .map_err(|e| KzgError::InvalidHexFormat(format!("Failed to decode hex: {}", e)))
}
