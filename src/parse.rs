use alloc::{format, string::String, vec::Vec};
use bls12_381::{G1Affine, G2Affine};
use serde::{Deserialize, Serialize};

use crate::codec::{g1_from_compressed, g2_from_compressed};
use crate::consts::{BYTES_PER_G1_POINT, BYTES_PER_G2_POINT};
use crate::enums::KzgError;
use crate::hex_to_bytes;

/// Serialized form of the trusted setup, as it is distributed.
///
/// Every entry is a hex encoded compressed point. `setup_G1_lagrange` is in
/// natural domain order; the bit-reversal happens when it is loaded into
/// [`KzgSettings`](crate::KzgSettings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedSetup {
    #[serde(rename = "setup_G1")]
    pub g1_monomial: Vec<String>,
    #[serde(rename = "setup_G2")]
    pub g2_monomial: Vec<String>,
    #[serde(rename = "setup_G1_lagrange")]
    pub g1_lagrange: Vec<String>,
}

impl TrustedSetup {
    pub fn from_json(json: &str) -> Result<Self, KzgError> {
        serde_json::from_str(json)
            .map_err(|e| KzgError::InvalidTrustedSetup(format!("malformed json: {e}")))
    }

    pub fn to_json(&self) -> Result<String, KzgError> {
        serde_json::to_string(self).map_err(|e| KzgError::InvalidTrustedSetup(format!("{e}")))
    }
}

fn fixed_bytes<const N: usize>(hex_str: &str) -> Result<[u8; N], KzgError> {
    let bytes = hex_to_bytes(hex_str)?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        KzgError::InvalidBytesLength(format!("expected {N} bytes, got {}", bytes.len()))
    })
}

pub(crate) fn parse_g1_points(name: &str, entries: &[String]) -> Result<Vec<G1Affine>, KzgError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            fixed_bytes::<BYTES_PER_G1_POINT>(entry)
                .and_then(|bytes| g1_from_compressed(&bytes))
                .map_err(|e| KzgError::InvalidTrustedSetup(format!("{name}[{i}]: {e}")))
        })
        .collect()
}

pub(crate) fn parse_g2_points(name: &str, entries: &[String]) -> Result<Vec<G2Affine>, KzgError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            fixed_bytes::<BYTES_PER_G2_POINT>(entry)
                .and_then(|bytes| g2_from_compressed(&bytes))
                .map_err(|e| KzgError::InvalidTrustedSetup(format!("{name}[{i}]: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_json_field_names() {
        let json = r#"{"setup_G1": ["0x01"], "setup_G2": [], "setup_G1_lagrange": ["02", "03"]}"#;
        let setup = TrustedSetup::from_json(json).unwrap();
        assert_eq!(setup.g1_monomial, ["0x01"]);
        assert!(setup.g2_monomial.is_empty());
        assert_eq!(setup.g1_lagrange.len(), 2);

        let reparsed = TrustedSetup::from_json(&setup.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, setup);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{"setup_G1": [], "setup_G2": []}"#;
        assert!(matches!(
            TrustedSetup::from_json(json),
            Err(KzgError::InvalidTrustedSetup(_))
        ));
    }

    #[test]
    fn test_parse_points() {
        let g1 = hex::encode(G1Affine::generator().to_compressed());
        let g2 = hex::encode(G2Affine::generator().to_compressed());

        assert_eq!(
            parse_g1_points("g1", &[g1.clone()]).unwrap(),
            [G1Affine::generator()]
        );
        assert_eq!(
            parse_g2_points("g2", &[format!("0x{g2}")]).unwrap(),
            [G2Affine::generator()]
        );

        // A G2 encoding is the wrong size for G1.
        assert!(matches!(
            parse_g1_points("g1", &[g2]),
            Err(KzgError::InvalidTrustedSetup(_))
        ));
        assert!(matches!(
            parse_g1_points("g1", &["not hex".to_string()]),
            Err(KzgError::InvalidTrustedSetup(_))
        ));
    }
}
