use alloc::{format, string::ToString, vec, vec::Vec};
use bls12_381::{G1Affine, G1Projective, G2Affine, Scalar};
use ff::PrimeField;

#[cfg(feature = "embedded-setup")]
use crate::consts::FIELD_ELEMENTS_PER_BLOB;
use crate::{
    consts::MAX_LOG2_DOMAIN_SIZE,
    enums::KzgError,
    pairings::pairings_verify,
    parse::{parse_g1_points, parse_g2_points, TrustedSetup},
};

/// The tables every commitment, proof and verification is computed against.
///
/// Built once from a [`TrustedSetup`] and immutable afterwards, so a single
/// instance can be shared across threads by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KzgSettings {
    roots_of_unity: Vec<Scalar>,
    g1_points: Vec<G1Affine>,
    g2_points: Vec<G2Affine>,
    g1_lagrange: Vec<G1Affine>,
    domain_size_inv: Scalar,
}

#[cfg(feature = "embedded-setup")]
const TRUSTED_SETUP_JSON: &str = include_str!("trusted_setup.json");

impl KzgSettings {
    /// Loads the embedded mainnet setup, whose domain is one blob wide.
    #[cfg(feature = "embedded-setup")]
    pub fn load_default() -> Result<Self, KzgError> {
        let settings = Self::from_json(TRUSTED_SETUP_JSON)?;
        if settings.domain_size() != FIELD_ELEMENTS_PER_BLOB {
            return Err(KzgError::InvalidTrustedSetup(format!(
                "embedded setup has {} points, expected {FIELD_ELEMENTS_PER_BLOB}",
                settings.domain_size()
            )));
        }
        Ok(settings)
    }

    /// Process-wide instance of [`Self::load_default`], built on first use.
    #[cfg(feature = "embedded-setup")]
    pub fn default_settings() -> Result<&'static Self, KzgError> {
        static DEFAULT: spin::Once<KzgSettings> = spin::Once::new();
        DEFAULT.try_call_once(Self::load_default)
    }

    pub fn from_json(json: &str) -> Result<Self, KzgError> {
        Self::from_trusted_setup(&TrustedSetup::from_json(json)?)
    }

    #[cfg(feature = "std")]
    pub fn load_trusted_setup_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, KzgError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            KzgError::InvalidTrustedSetup(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    pub fn from_trusted_setup(setup: &TrustedSetup) -> Result<Self, KzgError> {
        let result = Self::load(setup);
        #[cfg(feature = "tracing")]
        if let Err(e) = &result {
            tracing::warn!(error = %e, "rejected trusted setup");
        }
        result
    }

    fn load(setup: &TrustedSetup) -> Result<Self, KzgError> {
        let n = setup.g1_lagrange.len();
        if n < 2 || !n.is_power_of_two() || n.ilog2() > MAX_LOG2_DOMAIN_SIZE {
            return Err(KzgError::InvalidTrustedSetup(format!(
                "lagrange setup has {n} points, expected a power of two between 2 and 2^{MAX_LOG2_DOMAIN_SIZE}"
            )));
        }
        if setup.g1_monomial.len() < 2 {
            return Err(KzgError::InvalidTrustedSetup(format!(
                "need at least 2 G1 monomial points, got {}",
                setup.g1_monomial.len()
            )));
        }
        if setup.g2_monomial.len() < 2 {
            return Err(KzgError::InvalidTrustedSetup(format!(
                "need at least 2 G2 points, got {}",
                setup.g2_monomial.len()
            )));
        }

        let g1_points = parse_g1_points("setup_G1", &setup.g1_monomial)?;
        let g2_points = parse_g2_points("setup_G2", &setup.g2_monomial)?;
        let g1_lagrange = parse_g1_points("setup_G1_lagrange", &setup.g1_lagrange)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            g1 = g1_points.len(),
            g2 = g2_points.len(),
            lagrange = g1_lagrange.len(),
            "decoded trusted setup points"
        );

        // Verification computes `[y]G1` from the curve generator.
        if g1_points[0] != G1Affine::generator() {
            return Err(KzgError::InvalidTrustedSetup(
                "setup_G1[0] is not the G1 generator".to_string(),
            ));
        }
        is_trusted_setup_in_monomial_form(&g1_points, &g2_points)?;
        is_lagrange_consistent_with_monomial(&g1_lagrange, &g1_points)?;

        let roots_of_unity = compute_roots_of_unity(n)?;
        let domain_size_inv = Option::<Scalar>::from(Scalar::from(n as u64).invert())
            .ok_or(KzgError::InvalidTrustedSetup("domain size is not invertible".to_string()))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(domain_size = n, "trusted setup loaded");

        Ok(Self {
            roots_of_unity,
            g1_points,
            g2_points,
            g1_lagrange: bit_reversal_permutation(&g1_lagrange)?,
            domain_size_inv,
        })
    }

    /// Number of evaluation points, i.e. field elements per polynomial.
    pub fn domain_size(&self) -> usize {
        self.roots_of_unity.len()
    }

    /// Evaluation domain, bit-reversal permuted to line up with [`Self::g1_lagrange`].
    pub fn roots_of_unity(&self) -> &[Scalar] {
        &self.roots_of_unity
    }

    /// `[tau^i]G1`. Only the first point takes part in proving or verifying.
    pub fn g1_points(&self) -> &[G1Affine] {
        &self.g1_points
    }

    /// `[tau^i]G2`, at least two of them.
    pub fn g2_points(&self) -> &[G2Affine] {
        &self.g2_points
    }

    /// `[L_i(tau)]G1`, bit-reversal permuted.
    pub fn g1_lagrange(&self) -> &[G1Affine] {
        &self.g1_lagrange
    }

    pub(crate) fn domain_size_inv(&self) -> &Scalar {
        &self.domain_size_inv
    }
}

/// `e([tau]G1, G2) == e(G1, [tau]G2)`
fn is_trusted_setup_in_monomial_form(
    g1_points: &[G1Affine],
    g2_points: &[G2Affine],
) -> Result<(), KzgError> {
    if g1_points.len() < 2 || g2_points.len() < 2 {
        return Err(KzgError::InvalidTrustedSetup(
            "monomial form needs two points in each group".to_string(),
        ));
    }

    if !pairings_verify(&g1_points[1], &g2_points[0], &g1_points[0], &g2_points[1]) {
        return Err(KzgError::InvalidTrustedSetup(
            "not in monomial form".to_string(),
        ));
    }

    Ok(())
}

/// The Lagrange basis sums to the constant polynomial 1, so the Lagrange
/// points must sum to `[1]G1 = setup_G1[0]`.
fn is_lagrange_consistent_with_monomial(
    g1_lagrange: &[G1Affine],
    g1_points: &[G1Affine],
) -> Result<(), KzgError> {
    let sum = g1_lagrange
        .iter()
        .fold(G1Projective::identity(), |acc, p| acc.add_mixed(p));
    if G1Affine::from(sum) != g1_points[0] {
        return Err(KzgError::InvalidTrustedSetup(
            "lagrange points do not sum to the first monomial point".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn is_power_of_two(value: usize) -> bool {
    value > 0 && value & (value - 1) == 0
}

/// Reverses the low `log2(order)` bits of `n`. `order` must be a power of two.
pub fn reverse_bits(n: usize, order: usize) -> usize {
    debug_assert!(is_power_of_two(order));
    let bits = order.trailing_zeros();
    if bits == 0 {
        return 0;
    }
    n.reverse_bits() >> (usize::BITS - bits)
}

/// Returns a copy of `array` with `out[i] = array[reverse_bits(i)]`.
///
/// Applying it twice gives back the input.
pub fn bit_reversal_permutation<T: Copy>(array: &[T]) -> Result<Vec<T>, KzgError> {
    let n = array.len();
    if !is_power_of_two(n) {
        return Err(KzgError::BadArgs(format!(
            "bit reversal needs a power of two length, got {n}"
        )));
    }

    Ok((0..n).map(|i| array[reverse_bits(i, n)]).collect())
}

/// Primitive `width`-th root of unity, `width` a power of two.
///
/// `Scalar::ROOT_OF_UNITY` generates the subgroup of order `2^S`; squaring
/// it `S - log2(width)` times leaves a generator of the order `width` subgroup.
pub(crate) fn primitive_root_of_unity(width: usize) -> Result<Scalar, KzgError> {
    if !is_power_of_two(width) || width.ilog2() > Scalar::S {
        return Err(KzgError::BadArgs(format!(
            "no root of unity of order {width}"
        )));
    }
    Ok((width.ilog2()..Scalar::S).fold(Scalar::ROOT_OF_UNITY, |root, _| root.square()))
}

/// `[1, root, root^2, ..., root^(width-1)]`, checking that `root` has order exactly `width`.
pub(crate) fn expand_root_of_unity(root: Scalar, width: usize) -> Result<Vec<Scalar>, KzgError> {
    if width < 2 {
        return Err(KzgError::BadArgs(
            "The width must be greater or equal to 2".to_string(),
        ));
    }

    let mut expanded = vec![Scalar::one()];
    let mut current = root;
    while current != Scalar::one() {
        if expanded.len() == width {
            return Err(KzgError::BadArgs(
                "root of unity has order larger than the width".to_string(),
            ));
        }
        expanded.push(current);
        current *= root;
    }

    if expanded.len() != width {
        return Err(KzgError::BadArgs(format!(
            "root of unity has order {}, expected {width}",
            expanded.len()
        )));
    }

    Ok(expanded)
}

/// Evaluation domain of size `width` in bit-reversed order.
pub fn compute_roots_of_unity(width: usize) -> Result<Vec<Scalar>, KzgError> {
    let root = primitive_root_of_unity(width)?;
    bit_reversal_permutation(&expand_root_of_unity(root, width)?)
}
