//! Small, insecure trusted setups for tests. The secret is a fixed constant.

use std::sync::OnceLock;

use alloc::{string::String, vec::Vec};
use bls12_381::{G1Affine, G2Affine, Scalar};

use crate::{
    parse::TrustedSetup,
    trusted_setup::{expand_root_of_unity, primitive_root_of_unity},
    KzgSettings,
};

pub(crate) const TEST_DOMAIN_SIZE: usize = 16;

const INSECURE_SECRET: u64 = 1337;

fn g1_hex(scalar: Scalar) -> String {
    hex::encode(G1Affine::from(G1Affine::generator() * scalar).to_compressed())
}

fn g2_hex(scalar: Scalar) -> String {
    format!(
        "0x{}",
        hex::encode(G2Affine::from(G2Affine::generator() * scalar).to_compressed())
    )
}

/// Builds the setup document for secret `tau`: `[tau^i]G1`, `[1]G2, [tau]G2`
/// and `[L_i(tau)]G1` in natural order, where
/// `L_i(tau) = w^i * (tau^n - 1) / (n * (tau - w^i))`.
pub(crate) fn insecure_trusted_setup(n: usize) -> TrustedSetup {
    let tau = Scalar::from(INSECURE_SECRET);
    let domain = expand_root_of_unity(primitive_root_of_unity(n).unwrap(), n).unwrap();

    let g1_monomial = (0..n as u64)
        .map(|i| g1_hex(tau.pow_vartime(&[i, 0, 0, 0])))
        .collect();
    let g2_monomial = [Scalar::one(), tau].into_iter().map(g2_hex).collect();

    let vanishing = tau.pow_vartime(&[n as u64, 0, 0, 0]) - Scalar::one();
    let n_scalar = Scalar::from(n as u64);
    let g1_lagrange = domain
        .iter()
        .map(|w| {
            let denominator = (n_scalar * (tau - w)).invert().unwrap();
            g1_hex(w * vanishing * denominator)
        })
        .collect::<Vec<_>>();

    TrustedSetup {
        g1_monomial,
        g2_monomial,
        g1_lagrange,
    }
}

/// Shared settings for the default test domain, loaded through the JSON path.
pub(crate) fn test_settings() -> &'static KzgSettings {
    static SETTINGS: OnceLock<KzgSettings> = OnceLock::new();
    SETTINGS.get_or_init(|| {
        let json = insecure_trusted_setup(TEST_DOMAIN_SIZE).to_json().unwrap();
        KzgSettings::from_json(&json).unwrap()
    })
}
