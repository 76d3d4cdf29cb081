use alloc::vec::Vec;
use bls12_381::{G1Affine, G1Projective, Scalar};
use ff::BatchInvert;

use crate::{
    codec::{g1_from_compressed, g1_to_compressed, scalar_from_bytes},
    dtypes::{Bytes32, Bytes48, CommitmentSequence, KzgCommitment},
    enums::KzgError,
    fiat_shamir::hash_to_bls_field,
    msm::g1_lincomb,
    pairings::pairings_verify,
    polynomial::{
        check_polynomial_length, compute_powers, evaluate_polynomial_in_evaluation_form,
        poly_lincomb, Polynomial,
    },
    trusted_setup::KzgSettings,
};

pub struct KzgProof {}

impl KzgProof {
    /// Commits to a polynomial in evaluation form: `sum(p_i * [L_i(tau)]G1)`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn polynomial_to_commitment(
        polynomial: &[Scalar],
        kzg_settings: &KzgSettings,
    ) -> Result<KzgCommitment, KzgError> {
        check_polynomial_length(polynomial, kzg_settings)?;
        let commitment = g1_lincomb(kzg_settings.g1_lagrange(), polynomial)?;
        Ok(g1_to_compressed(&commitment))
    }

    /// Proves the evaluation of `polynomial` at `z` with the quotient
    /// `q(X) = (p(X) - p(z)) / (X - z)`, computed in evaluation form.
    ///
    /// The quotient is undefined when `z` is a domain point, so that case is
    /// rejected even though the evaluation itself would be well defined.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn compute_kzg_proof(
        polynomial: &[Scalar],
        z: &Scalar,
        kzg_settings: &KzgSettings,
    ) -> Result<Bytes48, KzgError> {
        check_polynomial_length(polynomial, kzg_settings)?;
        if kzg_settings.roots_of_unity().contains(z) {
            return Err(KzgError::InvalidChallenge);
        }

        let y = evaluate_polynomial_in_evaluation_form(polynomial, z, kzg_settings)?;

        let mut denominators: Vec<Scalar> = kzg_settings
            .roots_of_unity()
            .iter()
            .map(|root| root - z)
            .collect();
        denominators.iter_mut().batch_invert();

        let quotient: Vec<Scalar> = polynomial
            .iter()
            .zip(&denominators)
            .map(|(value, inv)| (value - y) * inv)
            .collect();

        let proof = g1_lincomb(kzg_settings.g1_lagrange(), &quotient)?;
        Ok(g1_to_compressed(&proof))
    }

    /// Folds a batch into one polynomial, one commitment and one opening point.
    ///
    /// With `r` the Fiat-Shamir challenge over the batch, this returns
    /// `sum(r^i * p_i)`, `sum(r^i * C_i)` and `z = r^m` for `m` polynomials.
    pub fn compute_aggregated_poly_and_commitment<C: CommitmentSequence + ?Sized>(
        polynomials: &[Polynomial],
        commitments: &C,
        kzg_settings: &KzgSettings,
    ) -> Result<(Polynomial, G1Projective, Scalar), KzgError> {
        if polynomials.is_empty() {
            return Err(KzgError::EmptyBatch);
        }
        if polynomials.len() != commitments.len() {
            return Err(KzgError::BatchLengthMismatch {
                polynomials: polynomials.len(),
                commitments: commitments.len(),
            });
        }
        for polynomial in polynomials {
            check_polynomial_length(polynomial, kzg_settings)?;
        }

        let r = hash_to_bls_field(polynomials, commitments, kzg_settings.domain_size());
        let powers = compute_powers(&r, polynomials.len());
        let evaluation_challenge = powers
            .last()
            .map(|last| r * last)
            .ok_or(KzgError::EmptyBatch)?;

        let aggregated_poly = poly_lincomb(polynomials, &powers)?;

        let commitments_g1 = (0..commitments.len())
            .map(|i| g1_from_compressed(&commitments.at(i)))
            .collect::<Result<Vec<G1Affine>, _>>()?;
        let aggregated_commitment = g1_lincomb(&commitments_g1, &powers)?;

        Ok((aggregated_poly, aggregated_commitment, evaluation_challenge))
    }

    /// One proof for a whole batch of polynomials. Their commitments are
    /// computed here, the verifier is expected to already have them.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(batch = polynomials.len())))]
    pub fn compute_aggregate_kzg_proof(
        polynomials: &[Polynomial],
        kzg_settings: &KzgSettings,
    ) -> Result<Bytes48, KzgError> {
        if polynomials.is_empty() {
            return Err(KzgError::EmptyBatch);
        }
        let commitments = polynomials
            .iter()
            .map(|polynomial| Self::polynomial_to_commitment(polynomial, kzg_settings))
            .collect::<Result<Vec<_>, _>>()?;

        let (aggregated_poly, _, evaluation_challenge) = Self::compute_aggregated_poly_and_commitment(
            polynomials,
            commitments.as_slice(),
            kzg_settings,
        )?;
        Self::compute_kzg_proof(&aggregated_poly, &evaluation_challenge, kzg_settings)
    }

    /// Checks `e(C - [y]G1, G2) == e(proof, [tau]G2 - [z]G2)`.
    pub fn verify_kzg_proof_from_points(
        commitment: &G1Affine,
        z: &Scalar,
        y: &Scalar,
        proof: &G1Affine,
        kzg_settings: &KzgSettings,
    ) -> bool {
        let g2_points = kzg_settings.g2_points();
        let g2_generator = g2_points[0];
        let g2_x = g2_generator * z;
        let x_minus_z = g2_points[1] - g2_x;

        let g1_y = G1Affine::generator() * y;
        let p_minus_y = commitment - g1_y;

        pairings_verify(
            &p_minus_y.into(),
            &g2_generator,
            proof,
            &x_minus_z.into(),
        )
    }

    /// Verifies that `proof` opens `commitment` to `y` at `z`.
    ///
    /// Undecodable points are an error; a well formed proof that does not
    /// satisfy the pairing check is `Ok(false)`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn verify_kzg_proof(
        commitment_bytes: &Bytes48,
        z: &Scalar,
        y: &Scalar,
        proof_bytes: &Bytes48,
        kzg_settings: &KzgSettings,
    ) -> Result<bool, KzgError> {
        let commitment = g1_from_compressed(commitment_bytes.as_bytes())?;
        let proof = g1_from_compressed(proof_bytes.as_bytes())?;

        Ok(Self::verify_kzg_proof_from_points(
            &commitment,
            z,
            y,
            &proof,
            kzg_settings,
        ))
    }

    /// Byte-level variant of [`Self::verify_kzg_proof`]; `z` and `y` must be
    /// canonical field element encodings.
    pub fn verify_kzg_proof_from_bytes(
        commitment_bytes: &Bytes48,
        z_bytes: &Bytes32,
        y_bytes: &Bytes32,
        proof_bytes: &Bytes48,
        kzg_settings: &KzgSettings,
    ) -> Result<bool, KzgError> {
        let z = scalar_from_bytes(z_bytes.as_bytes())?;
        let y = scalar_from_bytes(y_bytes.as_bytes())?;
        Self::verify_kzg_proof(commitment_bytes, &z, &y, proof_bytes, kzg_settings)
    }

    /// Recomputes the aggregation from the polynomials and their claimed
    /// commitments, then checks the single opening proof.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(batch = polynomials.len())))]
    pub fn verify_aggregate_kzg_proof<C: CommitmentSequence + ?Sized>(
        polynomials: &[Polynomial],
        expected_commitments: &C,
        aggregated_proof: &Bytes48,
        kzg_settings: &KzgSettings,
    ) -> Result<bool, KzgError> {
        let (aggregated_poly, aggregated_commitment, evaluation_challenge) =
            Self::compute_aggregated_poly_and_commitment(
                polynomials,
                expected_commitments,
                kzg_settings,
            )?;
        let y = evaluate_polynomial_in_evaluation_form(
            &aggregated_poly,
            &evaluation_challenge,
            kzg_settings,
        )?;
        let proof = g1_from_compressed(aggregated_proof.as_bytes())?;

        Ok(Self::verify_kzg_proof_from_points(
            &aggregated_commitment.into(),
            &evaluation_challenge,
            &y,
            &proof,
            kzg_settings,
        ))
    }
}
