use bls12_381::{multi_miller_loop, G1Affine, G2Affine, G2Prepared, Gt};

/// Checks `e(a1, a2) == e(b1, b2)` with a single multi-Miller loop and one
/// final exponentiation.
pub fn pairings_verify(a1: &G1Affine, a2: &G2Affine, b1: &G1Affine, b2: &G2Affine) -> bool {
    let a2 = G2Prepared::from(*a2);
    let b2 = G2Prepared::from(*b2);
    multi_miller_loop(&[(&-a1, &a2), (b1, &b2)]).final_exponentiation() == Gt::identity()
}
