use alloc::{vec, vec::Vec};
use bls12_381::Scalar;
use ff::BatchInvert;

use crate::{
    codec::scalar_from_bytes, dtypes::Blob, enums::KzgError, trusted_setup::KzgSettings,
};

/// A polynomial in evaluation form: one value per domain point, in the
/// (bit-reversed) order of [`KzgSettings::roots_of_unity`].
pub type Polynomial = Vec<Scalar>;

pub(crate) fn check_polynomial_length(
    polynomial: &[Scalar],
    kzg_settings: &KzgSettings,
) -> Result<(), KzgError> {
    let expected = kzg_settings.domain_size();
    if polynomial.len() != expected {
        return Err(KzgError::PolynomialLengthMismatch {
            expected,
            got: polynomial.len(),
        });
    }
    Ok(())
}

/// Decodes every 32-byte element of the blob as a canonical field element.
/// Nothing is returned unless all of them decode.
pub fn blob_to_polynomial<B: Blob + ?Sized>(blob: &B) -> Result<Polynomial, KzgError> {
    (0..blob.len())
        .map(|i| scalar_from_bytes(&blob.at(i)))
        .collect()
}

pub fn blobs_to_polynomials<B: AsRef<S>, S: Blob + ?Sized>(
    blobs: &[B],
) -> Result<Vec<Polynomial>, KzgError> {
    blobs
        .iter()
        .map(|blob| blob_to_polynomial(blob.as_ref()))
        .collect()
}

/// `[1, r, r^2, ..., r^(count-1)]`
pub fn compute_powers(r: &Scalar, count: usize) -> Vec<Scalar> {
    let mut current_power = Scalar::one();
    let mut powers = Vec::with_capacity(count);
    for _ in 0..count {
        powers.push(current_power);
        current_power *= r;
    }
    powers
}

/// Evaluation-wise `sum(scalars[i] * polynomials[i])`.
pub(crate) fn poly_lincomb(
    polynomials: &[Polynomial],
    scalars: &[Scalar],
) -> Result<Polynomial, KzgError> {
    let Some(first) = polynomials.first() else {
        return Err(KzgError::EmptyBatch);
    };
    if polynomials.len() != scalars.len() {
        return Err(KzgError::BatchLengthMismatch {
            polynomials: polynomials.len(),
            commitments: scalars.len(),
        });
    }

    let mut result = vec![Scalar::zero(); first.len()];
    for (polynomial, scalar) in polynomials.iter().zip(scalars) {
        if polynomial.len() != result.len() {
            return Err(KzgError::PolynomialLengthMismatch {
                expected: result.len(),
                got: polynomial.len(),
            });
        }
        for (acc, value) in result.iter_mut().zip(polynomial) {
            *acc += scalar * value;
        }
    }
    Ok(result)
}

/// Evaluates a polynomial given in evaluation form at an arbitrary point `z`
/// using the barycentric formula
///
/// `p(z) = (z^n - 1) / n * sum(p_i * w_i / (z - w_i))`
///
/// When `z` is itself a domain point the stored value is returned directly.
pub fn evaluate_polynomial_in_evaluation_form(
    polynomial: &[Scalar],
    z: &Scalar,
    kzg_settings: &KzgSettings,
) -> Result<Scalar, KzgError> {
    check_polynomial_length(polynomial, kzg_settings)?;
    let roots = kzg_settings.roots_of_unity();

    if let Some(position) = roots.iter().position(|root| root == z) {
        return Ok(polynomial[position]);
    }

    // 1 / (z - w_i), none of which is zero here.
    let mut inverses: Vec<Scalar> = roots.iter().map(|root| z - root).collect();
    inverses.iter_mut().batch_invert();

    let sum = polynomial
        .iter()
        .zip(roots)
        .zip(&inverses)
        .fold(Scalar::zero(), |acc, ((value, root), inv)| {
            acc + value * root * inv
        });

    let width = roots.len() as u64;
    let vanishing = z.pow_vartime(&[width, 0, 0, 0]) - Scalar::one();
    Ok(sum * vanishing * kzg_settings.domain_size_inv())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::scalar_to_bytes,
        dtypes::Bytes32,
        test_utils::{test_settings, TEST_DOMAIN_SIZE},
        trusted_setup::bit_reversal_permutation,
    };
    use ff::Field;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_compute_powers() {
        let r = Scalar::from(3u64);
        let powers = compute_powers(&r, 6);
        assert_eq!(powers.len(), 6);
        assert_eq!(powers[0], Scalar::one());
        for (i, power) in powers.iter().enumerate() {
            assert_eq!(*power, r.pow_vartime(&[i as u64, 0, 0, 0]));
        }
        assert!(compute_powers(&r, 0).is_empty());
        assert_eq!(compute_powers(&Scalar::ZERO, 2), [Scalar::one(), Scalar::ZERO]);
    }

    #[test]
    fn test_blob_to_polynomial() {
        let values: Vec<Scalar> = (0..4u64).map(|i| Scalar::from(i * 1000 + 7)).collect();
        let blob: Vec<[u8; 32]> = values.iter().map(scalar_to_bytes).collect();
        assert_eq!(blob_to_polynomial(blob.as_slice()).unwrap(), values);

        let typed: Vec<Bytes32> = blob.iter().copied().map(Bytes32::from).collect();
        assert_eq!(blob_to_polynomial(typed.as_slice()).unwrap(), values);
    }

    #[test]
    fn test_blob_to_polynomial_fails_atomically() {
        let mut blob = vec![[0u8; 32]; 4];
        blob[2] = [0xff; 32];
        assert_eq!(
            blob_to_polynomial(blob.as_slice()),
            Err(KzgError::InvalidScalar)
        );
    }

    #[test]
    fn test_blobs_to_polynomials() {
        let good = vec![[0u8; 32]; 2];
        let mut bad = good.clone();
        bad[1] = [0xff; 32];

        let polys = blobs_to_polynomials::<_, [[u8; 32]]>(&[good.clone(), good.clone()]).unwrap();
        assert_eq!(polys.len(), 2);
        assert!(blobs_to_polynomials::<_, [[u8; 32]]>(&[good, bad]).is_err());
    }

    #[test]
    fn test_poly_lincomb() {
        let a = vec![Scalar::from(1u64), Scalar::from(2u64)];
        let b = vec![Scalar::from(10u64), Scalar::from(20u64)];
        let combined = poly_lincomb(&[a, b], &[Scalar::from(2u64), Scalar::from(3u64)]).unwrap();
        assert_eq!(combined, [Scalar::from(32u64), Scalar::from(64u64)]);

        assert_eq!(poly_lincomb(&[], &[]), Err(KzgError::EmptyBatch));
    }

    #[test]
    fn test_evaluate_at_domain_points() {
        let settings = test_settings();
        let mut rng = StdRng::seed_from_u64(1);
        let poly: Polynomial = (0..TEST_DOMAIN_SIZE).map(|_| Scalar::random(&mut rng)).collect();
        for (i, root) in settings.roots_of_unity().iter().enumerate() {
            assert_eq!(
                evaluate_polynomial_in_evaluation_form(&poly, root, settings).unwrap(),
                poly[i]
            );
        }
    }

    #[test]
    fn test_evaluate_matches_coefficient_form() {
        // p(X) = 3 + 5X + X^2, evaluated on the domain.
        let settings = test_settings();
        let p = |x: &Scalar| Scalar::from(3u64) + Scalar::from(5u64) * x + x.square();
        let poly: Polynomial = settings.roots_of_unity().iter().map(p).collect();

        let z = Scalar::from(123456789u64);
        assert_eq!(
            evaluate_polynomial_in_evaluation_form(&poly, &z, settings).unwrap(),
            p(&z)
        );
    }

    #[test]
    fn test_evaluate_depends_on_domain_order() {
        // The same values in natural order describe a different polynomial.
        let settings = test_settings();
        let poly: Polynomial = (0..TEST_DOMAIN_SIZE as u64).map(Scalar::from).collect();
        let natural = bit_reversal_permutation(&poly).unwrap();
        let z = Scalar::from(99u64);
        assert_ne!(
            evaluate_polynomial_in_evaluation_form(&poly, &z, settings).unwrap(),
            evaluate_polynomial_in_evaluation_form(&natural, &z, settings).unwrap()
        );
    }

    #[test]
    fn test_evaluate_rejects_wrong_length() {
        let settings = test_settings();
        assert_eq!(
            evaluate_polynomial_in_evaluation_form(&[Scalar::one()], &Scalar::one(), settings),
            Err(KzgError::PolynomialLengthMismatch {
                expected: TEST_DOMAIN_SIZE,
                got: 1
            })
        );
    }
}
