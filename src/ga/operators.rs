//! Reusable crossover and mutation operators.
//!
//! These are free functions over plain gene slices so problem
//! implementations can compose them inside [`GaProblem::crossover`] and
//! [`GaProblem::mutate`] without re-deriving the bookkeeping each time.
//! Discrete operators work on any `Copy` gene type (hub indices, permutation
//! entries); the blend operators are for real-valued genomes.
//!
//! [`GaProblem::crossover`]: super::types::GaProblem::crossover
//! [`GaProblem::mutate`]: super::types::GaProblem::mutate

use rand::Rng;

// ---------------------------------------------------------------------------
// Crossover
// ---------------------------------------------------------------------------

/// Single-point crossover.
///
/// Picks one cut point and swaps the tails, producing two children.
/// Returns clones of the parents when a slice is shorter than 2 genes.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn one_point<T: Copy, R: Rng>(p1: &[T], p2: &[T], rng: &mut R) -> (Vec<T>, Vec<T>) {
    assert_eq!(p1.len(), p2.len(), "parents must have equal length");
    let n = p1.len();
    if n < 2 {
        return (p1.to_vec(), p2.to_vec());
    }

    let point = rng.random_range(1..n);
    let mut c1 = Vec::with_capacity(n);
    let mut c2 = Vec::with_capacity(n);
    c1.extend_from_slice(&p1[..point]);
    c1.extend_from_slice(&p2[point..]);
    c2.extend_from_slice(&p2[..point]);
    c2.extend_from_slice(&p1[point..]);
    (c1, c2)
}

/// Two-point crossover.
///
/// Picks two cut points and swaps the middle segment.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn two_point<T: Copy, R: Rng>(p1: &[T], p2: &[T], rng: &mut R) -> (Vec<T>, Vec<T>) {
    assert_eq!(p1.len(), p2.len(), "parents must have equal length");
    let n = p1.len();
    if n < 3 {
        return one_point(p1, p2, rng);
    }

    let a = rng.random_range(1..n);
    let b = rng.random_range(1..n);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let mut c1 = p1.to_vec();
    let mut c2 = p2.to_vec();
    c1[lo..hi].copy_from_slice(&p2[lo..hi]);
    c2[lo..hi].copy_from_slice(&p1[lo..hi]);
    (c1, c2)
}

/// Uniform crossover.
///
/// Each gene is taken from either parent with probability 0.5, the
/// complement going to the second child.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn uniform<T: Copy, R: Rng>(p1: &[T], p2: &[T], rng: &mut R) -> (Vec<T>, Vec<T>) {
    assert_eq!(p1.len(), p2.len(), "parents must have equal length");
    let n = p1.len();
    let mut c1 = Vec::with_capacity(n);
    let mut c2 = Vec::with_capacity(n);
    for i in 0..n {
        if rng.random_bool(0.5) {
            c1.push(p1[i]);
            c2.push(p2[i]);
        } else {
            c1.push(p2[i]);
            c2.push(p1[i]);
        }
    }
    (c1, c2)
}

/// Arithmetic blend crossover for real-valued genomes.
///
/// Each child gene is `w * a + (1 - w) * b` with a single random weight
/// per call; the second child uses the complementary weight.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn arithmetic_blend<R: Rng>(p1: &[f64], p2: &[f64], rng: &mut R) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(p1.len(), p2.len(), "parents must have equal length");
    let w = rng.random_range(0.0..1.0);
    let c1 = p1
        .iter()
        .zip(p2)
        .map(|(&a, &b)| w * a + (1.0 - w) * b)
        .collect();
    let c2 = p1
        .iter()
        .zip(p2)
        .map(|(&a, &b)| (1.0 - w) * a + w * b)
        .collect();
    (c1, c2)
}

/// BLX-alpha crossover for real-valued genomes.
///
/// Each child gene is drawn uniformly from the parents' interval extended
/// by `alpha` times its width on both sides. Identical genes pass through
/// unchanged.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn blx_alpha<R: Rng>(p1: &[f64], p2: &[f64], alpha: f64, rng: &mut R) -> Vec<f64> {
    assert_eq!(p1.len(), p2.len(), "parents must have equal length");
    p1.iter()
        .zip(p2)
        .map(|(&a, &b)| {
            let lo = a.min(b);
            let hi = a.max(b);
            let range = hi - lo;
            if range < 1e-15 {
                lo
            } else {
                rng.random_range((lo - alpha * range)..(hi + alpha * range))
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Mutation
// ---------------------------------------------------------------------------

/// Swaps two randomly chosen genes in place.
///
/// Permutation-safe: the multiset of genes is unchanged. No-op for genomes
/// shorter than 2.
pub fn swap<T, R: Rng>(genes: &mut [T], rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    genes.swap(i, j);
}

/// Reverses a randomly chosen segment in place.
///
/// Permutation-safe. No-op for genomes shorter than 2.
pub fn invert_segment<T, R: Rng>(genes: &mut [T], rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    genes[lo..=hi].reverse();
}

/// Removes a randomly chosen gene and reinserts it at another position.
///
/// Permutation-safe. No-op for genomes shorter than 2.
pub fn insert_shift<T, R: Rng>(genes: &mut Vec<T>, rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    let from = rng.random_range(0..n);
    let to = rng.random_range(0..n);
    let gene = genes.remove(from);
    genes.insert(to, gene);
}

/// Adds a uniform perturbation in `[-magnitude, magnitude]` to one gene.
///
/// For real-valued genomes. No-op for empty genomes.
pub fn perturb<R: Rng>(genes: &mut [f64], magnitude: f64, rng: &mut R) {
    if genes.is_empty() {
        return;
    }
    let idx = rng.random_range(0..genes.len());
    genes[idx] += rng.random_range(-magnitude..magnitude);
}

/// Replaces one gene with a fresh uniform draw from `0..num_values`.
///
/// For categorical genomes such as hub assignments. No-op for empty
/// genomes or `num_values == 0`.
pub fn reassign<R: Rng>(genes: &mut [usize], num_values: usize, rng: &mut R) {
    if genes.is_empty() || num_values == 0 {
        return;
    }
    let idx = rng.random_range(0..genes.len());
    genes[idx] = rng.random_range(0..num_values);
}
