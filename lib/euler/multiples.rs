//! Sum of all natural numbers below some bound that are multiples of at least
//! one of a set of divisors (Project Euler #1).
//!
//! The closed form rests on the sum of the multiples of a single $`d`$ below
//! $`n`$,
//! ```math
//! S_d(n) = d \sum_{j=1}^{k} j = d \frac{k (k + 1)}{2}
//!     ,~ k = \left\lfloor \frac{n - 1}{d} \right\rfloor
//! ```
//! combined over a set of divisors by inclusion-exclusion, where each subset
//! contributes $`\pm S_{\mathrm{lcm}}(n)`$ with the sign set by the parity of
//! its size.

use itertools::Itertools;
use num_traits::{
    PrimInt,
    Unsigned,
};
use tracing::debug;
use crate::{
    euler::{ EulerError, EulerResult },
    utils::{ lcm, triangular },
};

fn check_divisors<T>(divisors: &[T]) -> EulerResult<()>
where T: PrimInt + Unsigned
{
    return if divisors.iter().any(|d| d.is_zero()) {
        Err(EulerError::ZeroDivisor)
    } else {
        Ok(())
    };
}

/// Sum every `i` in `1..bound` divisible by at least one of `divisors` by
/// testing each one in turn.
pub fn sum_multiples_brute<T>(bound: T, divisors: &[T]) -> EulerResult<T>
where T: PrimInt + Unsigned
{
    check_divisors(divisors)?;
    let mut total = T::zero();
    let mut i = T::one();
    while i < bound {
        if divisors.iter().any(|d| (i % *d).is_zero()) {
            total = total.checked_add(&i).ok_or(EulerError::Overflow)?;
        }
        i = i + T::one();
    }
    return Ok(total);
}

/// Sum of the multiples of a single divisor `d` strictly below `bound`, in
/// closed form.
pub fn sum_multiples_of<T>(bound: T, d: T) -> EulerResult<T>
where T: PrimInt + Unsigned
{
    if d.is_zero() {
        return Err(EulerError::ZeroDivisor);
    }
    if bound <= T::one() {
        return Ok(T::zero());
    }
    let k = (bound - T::one()) / d;
    return triangular(k)
        .and_then(|t| t.checked_mul(&d))
        .ok_or(EulerError::Overflow);
}

/// Sum of the multiples of `a` or `b` below `bound`:
/// $`S_a + S_b - S_{\mathrm{lcm}(a, b)}`$.
pub fn sum_multiples_pair<T>(bound: T, a: T, b: T) -> EulerResult<T>
where T: PrimInt + Unsigned
{
    check_divisors(&[a, b])?;
    let sa = sum_multiples_of(bound, a)?;
    let sb = sum_multiples_of(bound, b)?;
    // an lcm too large for `T` is certainly not below `bound`
    let sab = match lcm(a, b) {
        Some(ab) => sum_multiples_of(bound, ab)?,
        None => T::zero(),
    };
    return sa.checked_add(&sb)
        .and_then(|s| s.checked_sub(&sab))
        .ok_or(EulerError::Overflow);
}

/// Sum every `i` in `1..bound` divisible by at least one of `divisors` by
/// inclusion-exclusion over all non-empty subsets of `divisors`.
///
/// The work is exponential in the number of divisors but independent of
/// `bound`. Duplicate divisors are allowed and don't change the result.
/// [`EulerError::Overflow`] is returned if either the positive or negative
/// partial sums overflow, even if the final difference would fit.
pub fn sum_multiples<T>(bound: T, divisors: &[T]) -> EulerResult<T>
where T: PrimInt + Unsigned
{
    check_divisors(divisors)?;
    let mut plus = T::zero();
    let mut minus = T::zero();
    for size in 1..=divisors.len() {
        for subset in divisors.iter().combinations(size) {
            let term
                = match subset.into_iter().try_fold(T::one(), |acc, d| lcm(acc, *d)) {
                    Some(l) => sum_multiples_of(bound, l)?,
                    None => T::zero(),
                };
            let acc = if size % 2 == 1 { &mut plus } else { &mut minus };
            *acc = acc.checked_add(&term).ok_or(EulerError::Overflow)?;
        }
    }
    debug!(divisors = divisors.len(), "inclusion-exclusion done");
    return plus.checked_sub(&minus).ok_or(EulerError::Overflow);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_euler_default() {
        assert_eq!(sum_multiples_brute(1000_u64, &[3, 5]), Ok(233168));
        assert_eq!(sum_multiples(1000_u64, &[3, 5]), Ok(233168));
        assert_eq!(sum_multiples_pair(1000_u64, 3, 5), Ok(233168));
    }

    #[test]
    fn three_and_seven_below_ten_thousand() {
        let brute = sum_multiples_brute(10000_u64, &[3, 7]);
        assert_eq!(brute, Ok(21426429));
        assert_eq!(sum_multiples(10000_u64, &[3, 7]), brute);
        assert_eq!(sum_multiples_pair(10000_u64, 3, 7), brute);
    }

    #[test]
    fn closed_form_matches_brute_force() {
        let sets: [&[u32]; 7] = [
            &[3, 5],
            &[4, 6],
            &[2, 3, 5],
            &[6, 10, 15],
            &[7],
            &[1, 9],
            &[12, 18, 8, 30],
        ];
        for divisors in sets {
            for bound in [0_u32, 1, 2, 17, 60, 61, 999, 5000] {
                assert_eq!(
                    sum_multiples(bound, divisors),
                    sum_multiples_brute(bound, divisors),
                    "bound = {}, divisors = {:?}", bound, divisors,
                );
            }
        }
    }

    #[test]
    fn pair_uses_lcm_for_shared_factors() {
        // 4 and 6 share the factor 2; multiples of 12 must be removed once
        assert_eq!(
            sum_multiples_pair(100_u32, 4, 6),
            sum_multiples_brute(100_u32, &[4, 6]),
        );
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(sum_multiples(0_u32, &[3, 5]), Ok(0));
        assert_eq!(sum_multiples(1_u32, &[3, 5]), Ok(0));
        assert_eq!(sum_multiples(100_u32, &[]), Ok(0));
        assert_eq!(sum_multiples_brute(100_u32, &[]), Ok(0));
        assert_eq!(sum_multiples(10_u32, &[3, 3, 3]), Ok(18));
        assert_eq!(sum_multiples(10_u32, &[1]), Ok(45));
    }

    #[test]
    fn zero_divisor_is_an_error() {
        assert_eq!(sum_multiples(10_u32, &[3, 0]), Err(EulerError::ZeroDivisor));
        assert_eq!(sum_multiples_brute(10_u32, &[0]), Err(EulerError::ZeroDivisor));
        assert_eq!(sum_multiples_of(10_u32, 0), Err(EulerError::ZeroDivisor));
        assert_eq!(sum_multiples_pair(10_u32, 0, 5), Err(EulerError::ZeroDivisor));
    }

    #[test]
    fn overflow_is_reported() {
        // 1 + 2 + ... + 254 = 32385
        assert_eq!(sum_multiples_brute(255_u8, &[1]), Err(EulerError::Overflow));
        assert_eq!(sum_multiples(255_u8, &[1]), Err(EulerError::Overflow));
        assert_eq!(sum_multiples(255_u16, &[1]), Ok(32385));
    }

    #[test]
    fn overflowing_lcm_contributes_nothing() {
        // lcm(300, 257) = 77100 doesn't fit in a u16
        assert_eq!(sum_multiples_pair(1000_u16, 300, 257), Ok(1800 + 1542));
        assert_eq!(sum_multiples(1000_u16, &[300, 257]), Ok(1800 + 1542));
        assert_eq!(sum_multiples_brute(1000_u16, &[300, 257]), Ok(3342));
    }
}
