//! Integer helpers: gcd/lcm, merging of congruences and overflow-checked totals

use aoc_solver::SolveError;

/// Greatest common divisor; `gcd(0, n) == n`
pub fn gcd(mut m: u64, mut n: u64) -> u64 {
    while n != 0 {
        let rem = m % n;
        m = n;
        n = rem;
    }
    m
}

/// Least common multiple, `None` on overflow; zero if either side is zero
pub fn lcm(m: u64, n: u64) -> Option<u64> {
    if m == 0 || n == 0 {
        Some(0)
    } else {
        (m / gcd(m, n)).checked_mul(n)
    }
}

/// Sum that reports overflow instead of wrapping or panicking
pub fn checked_sum(values: impl IntoIterator<Item = u64>) -> Option<u64> {
    values.into_iter().try_fold(0u64, u64::checked_add)
}

/// The answer for `what` left the 64-bit range
pub fn overflow(what: &str) -> SolveError {
    SolveError::SolveFailed(format!("{} does not fit in 64 bits", what).into())
}

/// Returns `(g, x, y)` with `a * x + b * y == g == gcd(a, b)`
fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1, 0);
    let (mut old_t, mut t) = (0, 1);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }
    (old_r, old_s, old_t)
}

/// The set of integers `x` with `x ≡ residue (mod modulus)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Congruence {
    pub residue: u64,
    pub modulus: u64,
}

/// Why two congruences could not be merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("congruences have no common solution")]
    Incompatible,
    #[error("combined modulus does not fit in 64 bits")]
    Overflow,
}

impl Congruence {
    /// `residue` is reduced into `0..modulus`; `modulus` must be non-zero
    pub fn new(residue: u64, modulus: u64) -> Self {
        Self {
            residue: residue % modulus,
            modulus,
        }
    }

    pub fn contains(&self, value: u64) -> bool {
        value % self.modulus == self.residue
    }

    /// Intersect two congruences (generalised CRT, moduli need not be coprime)
    pub fn merge(self, other: Congruence) -> Result<Congruence, MergeError> {
        let (m1, m2) = (self.modulus as i128, other.modulus as i128);
        let (a1, a2) = (self.residue as i128, other.residue as i128);

        let (g, p, _) = extended_gcd(m1, m2);
        let diff = a2 - a1;
        if diff % g != 0 {
            return Err(MergeError::Incompatible);
        }

        let step = m2 / g;
        let modulus = m1
            .checked_mul(step)
            .filter(|m| *m <= u64::MAX as i128)
            .ok_or(MergeError::Overflow)?;

        // m1 * p ≡ g (mod m2), so k = diff / g * p solves m1 * k ≡ diff (mod m2)
        // both factors are below step <= 2^64, so the product fits u128
        let (x, y) = ((diff / g).rem_euclid(step) as u128, p.rem_euclid(step) as u128);
        let k = ((x * y) % step as u128) as i128;
        // k < step, so m1 * k < modulus <= u64::MAX
        let residue = (a1 + m1 * k).rem_euclid(modulus);

        Ok(Congruence {
            residue: residue as u64,
            modulus: modulus as u64,
        })
    }

    /// Smallest member of the congruence that is `>= floor`
    pub fn first_at_least(&self, floor: u64) -> Option<u64> {
        if floor <= self.residue {
            return Some(self.residue);
        }
        let gap = floor - self.residue;
        let periods = gap.div_ceil(self.modulus);
        periods
            .checked_mul(self.modulus)
            .and_then(|shift| shift.checked_add(self.residue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(5, 0), 5);
        assert_eq!(gcd(32, 48), 16);
        assert_eq!(gcd(5, 7), 1);
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(0, 5), Some(0));
        assert_eq!(lcm(32, 48), Some(96));
        assert_eq!(lcm(5, 7), Some(35));
        assert_eq!(lcm(u64::MAX, u64::MAX - 1), None);
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum(Vec::new()), Some(0));
        assert_eq!(checked_sum([1, 2, 3]), Some(6));
        assert_eq!(checked_sum([u64::MAX, 1]), None);
        assert!(overflow("total").to_string().contains("total does not fit"));
    }

    #[test]
    fn test_merge_coprime() {
        let merged = Congruence::new(2, 3).merge(Congruence::new(3, 5)).unwrap();
        assert_eq!(merged, Congruence::new(8, 15));
    }

    #[test]
    fn test_merge_shared_factor() {
        // x ≡ 2 (mod 6), x ≡ 0 (mod 4) -> x ≡ 8 (mod 12)
        let merged = Congruence::new(2, 6).merge(Congruence::new(4, 4)).unwrap();
        assert_eq!(merged, Congruence::new(8, 12));
    }

    #[test]
    fn test_merge_incompatible() {
        // even vs odd
        let merged = Congruence::new(2, 6).merge(Congruence::new(3, 4));
        assert_eq!(merged, Err(MergeError::Incompatible));
    }

    #[test]
    fn test_merge_moduli_near_u64_max() {
        // coprime neighbours: the combined modulus needs 128 bits
        let big = Congruence::new(0, u64::MAX).merge(Congruence::new(0, u64::MAX - 1));
        assert_eq!(big, Err(MergeError::Overflow));

        // equal moduli keep the modulus and agree on the residue
        let same = Congruence::new(7, u64::MAX).merge(Congruence::new(7, u64::MAX));
        assert_eq!(same, Ok(Congruence::new(7, u64::MAX)));
        let clash = Congruence::new(7, u64::MAX).merge(Congruence::new(8, u64::MAX));
        assert_eq!(clash, Err(MergeError::Incompatible));

        // one modulus divides the other
        let half = u64::MAX / 3;
        let nested = Congruence::new(1, half).merge(Congruence::new(1 + half, u64::MAX));
        assert_eq!(nested, Ok(Congruence::new(1 + half, u64::MAX)));
    }

    #[test]
    fn test_first_at_least() {
        let c = Congruence::new(8, 12);
        assert_eq!(c.first_at_least(0), Some(8));
        assert_eq!(c.first_at_least(8), Some(8));
        assert_eq!(c.first_at_least(9), Some(20));
        assert_eq!(c.first_at_least(20), Some(20));
        assert_eq!(Congruence::new(1, u64::MAX).first_at_least(u64::MAX), None);
    }

    proptest! {
        #[test]
        fn prop_merge_matches_brute_force(
            a in 0u64..30, m in 1u64..30,
            b in 0u64..30, n in 1u64..30,
        ) {
            let (x, y) = (Congruence::new(a, m), Congruence::new(b, n));
            let bound = m * n;
            let brute = (0..bound).find(|v| x.contains(*v) && y.contains(*v));

            match x.merge(y) {
                Ok(merged) => {
                    prop_assert_eq!(Some(merged.residue), brute);
                    prop_assert_eq!(merged.modulus, lcm(m, n).unwrap());
                }
                Err(e) => {
                    prop_assert_eq!(e, MergeError::Incompatible);
                    prop_assert_eq!(brute, None);
                }
            }
        }
    }
}
