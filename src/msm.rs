use alloc::{format, vec, vec::Vec};
use bls12_381::{G1Affine, G1Projective, Scalar};

use crate::enums::KzgError;

const SCALAR_NUM_BITS: usize = 255;

fn ln_without_floats(a: usize) -> usize {
    (log2(a) * 69 / 100) as usize
}

fn log2(x: usize) -> u32 {
    if x <= 1 {
        return 0;
    }

    let n = x.leading_zeros();
    core::mem::size_of::<usize>() as u32 * 8 - n
}

/// Reads `width` bits of a little-endian scalar encoding starting at bit `start`.
fn window_digit(le_bytes: &[u8; 32], start: usize, width: usize) -> usize {
    (0..width)
        .map(|bit| start + bit)
        .take_while(|&pos| pos < 256)
        .enumerate()
        .fold(0, |acc, (i, pos)| {
            acc | ((((le_bytes[pos / 8] >> (pos % 8)) & 1) as usize) << i)
        })
}

/// Computes `sum(scalars[i] * points[i])`.
///
/// Bucketed Pippenger over windows of `c` bits. The points and scalars must
/// have the same length.
pub fn g1_lincomb(points: &[G1Affine], scalars: &[Scalar]) -> Result<G1Projective, KzgError> {
    if points.len() != scalars.len() {
        return Err(KzgError::BadArgs(format!(
            "{} points but {} scalars in linear combination",
            points.len(),
            scalars.len()
        )));
    }
    Ok(msm_variable_base(points, scalars))
}

fn msm_variable_base(points: &[G1Affine], scalars: &[Scalar]) -> G1Projective {
    let c = if scalars.len() < 32 {
        3
    } else {
        ln_without_floats(scalars.len()) + 2
    };

    let zero = G1Projective::identity();
    let fr_one = Scalar::one();
    let one_bytes = fr_one.to_bytes();

    // Zero scalars contribute nothing and are dropped up front.
    let terms: Vec<([u8; 32], &G1Affine)> = scalars
        .iter()
        .zip(points)
        .filter(|(s, _)| **s != Scalar::zero())
        .map(|(s, p)| (s.to_bytes(), p))
        .collect();
    let unit_sum = scalars
        .iter()
        .zip(points)
        .filter(|(s, _)| **s == fr_one)
        .fold(zero, |acc, (_, p)| acc.add_mixed(p));

    let window_sums: Vec<G1Projective> = (0..SCALAR_NUM_BITS)
        .step_by(c)
        .map(|w_start| {
            // We don't need the "zero" bucket, so we only have 2^c - 1 buckets
            let mut buckets = vec![zero; (1 << c) - 1];
            for (le_bytes, base) in &terms {
                // Unit scalars are added once, outside the windows.
                if *le_bytes == one_bytes {
                    continue;
                }
                let digit = window_digit(le_bytes, w_start, c);
                if digit != 0 {
                    buckets[digit - 1] = buckets[digit - 1].add_mixed(base);
                }
            }

            let mut res = zero;
            let mut running_sum = zero;
            for b in buckets.into_iter().rev() {
                running_sum += b;
                res += &running_sum;
            }
            res
        })
        .collect();

    // We're traversing windows from high to low.
    let total = window_sums.iter().rev().fold(zero, |mut total, sum_i| {
        for _ in 0..c {
            total = total.double();
        }
        total + sum_i
    });
    total + unit_sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff::Field;
    use rand::{rngs::StdRng, SeedableRng};

    fn naive_lincomb(points: &[G1Affine], scalars: &[Scalar]) -> G1Projective {
        points
            .iter()
            .zip(scalars)
            .fold(G1Projective::identity(), |acc, (p, s)| acc + p * s)
    }

    fn random_points(n: usize, rng: &mut StdRng) -> Vec<G1Affine> {
        (0..n)
            .map(|_| G1Affine::from(G1Affine::generator() * Scalar::random(&mut *rng)))
            .collect()
    }

    #[test]
    fn test_window_digit() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0b1011_0110;
        bytes[1] = 0b0000_0001;
        assert_eq!(window_digit(&bytes, 0, 3), 0b110);
        assert_eq!(window_digit(&bytes, 3, 3), 0b110);
        assert_eq!(window_digit(&bytes, 6, 3), 0b110);
        assert_eq!(window_digit(&bytes, 254, 5), 0);
    }

    #[test]
    fn test_msm_matches_naive() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in [1, 5, 40] {
            let points = random_points(n, &mut rng);
            let scalars: Vec<Scalar> = (0..n).map(|_| Scalar::random(&mut rng)).collect();
            assert_eq!(
                g1_lincomb(&points, &scalars).unwrap(),
                naive_lincomb(&points, &scalars)
            );
        }
    }

    #[test]
    fn test_msm_special_scalars() {
        let mut rng = StdRng::seed_from_u64(11);
        let points = random_points(4, &mut rng);
        let scalars = [Scalar::ZERO, Scalar::ONE, -Scalar::ONE, Scalar::from(2u64)];
        assert_eq!(
            g1_lincomb(&points, &scalars).unwrap(),
            naive_lincomb(&points, &scalars)
        );
    }

    #[test]
    fn test_msm_empty_and_mismatched() {
        assert_eq!(g1_lincomb(&[], &[]).unwrap(), G1Projective::identity());
        assert!(matches!(
            g1_lincomb(&[G1Affine::generator()], &[]),
            Err(KzgError::BadArgs(_))
        ));
    }
}
