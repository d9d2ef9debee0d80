//! Provides a flushing print macro and the integer helpers shared by the rest
//! of the crate.

use num_traits::{
    PrimInt,
    Unsigned,
};

/// Call `println!` and immediately flush.
///
/// Flush failures are propagated with `?`, so this can only be used in
/// functions returning a `Result` whose error type is `From<std::io::Error>`.
#[macro_export]
macro_rules! println_flush {
    ( $fmt:literal $(, $val:expr )* $(,)? ) => {
        println!($fmt $(, $val )*);
        std::io::Write::flush(&mut std::io::stdout())?;
    }
}

/// Greatest common divisor by Euclid's algorithm. `gcd(0, 0) == 0`.
pub fn gcd<T>(a: T, b: T) -> T
where T: PrimInt + Unsigned
{
    let (mut a, mut b) = (a, b);
    while !b.is_zero() {
        let r = a % b;
        a = b;
        b = r;
    }
    return a;
}

/// Least common multiple, or `None` if it doesn't fit in `T`.
///
/// `lcm(0, x) == 0` for all `x`.
pub fn lcm<T>(a: T, b: T) -> Option<T>
where T: PrimInt + Unsigned
{
    if a.is_zero() || b.is_zero() {
        return Some(T::zero());
    }
    return (a / gcd(a, b)).checked_mul(&b);
}

/// The `k`-th triangular number $`k (k + 1) / 2`$, or `None` on overflow.
///
/// The division is applied to whichever factor is even before multiplying, so
/// this only fails when the result itself doesn't fit.
pub fn triangular<T>(k: T) -> Option<T>
where T: PrimInt + Unsigned
{
    let two = T::one() + T::one();
    let kp1 = k.checked_add(&T::one())?;
    return if (k % two).is_zero() {
        (k / two).checked_mul(&kp1)
    } else {
        k.checked_mul(&(kp1 / two))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_lcm_small() {
        assert_eq!(gcd(12u32, 18), 6);
        assert_eq!(gcd(7u32, 0), 7);
        assert_eq!(gcd(0u32, 0), 0);
        assert_eq!(lcm(4u32, 6), Some(12));
        assert_eq!(lcm(3u64, 5), Some(15));
        assert_eq!(lcm(0u8, 9), Some(0));
        assert_eq!(lcm(200u8, 199), None);
    }

    #[test]
    fn triangular_numbers() {
        assert_eq!(triangular(0u32), Some(0));
        assert_eq!(triangular(4u32), Some(10));
        assert_eq!(triangular(333u64), Some(55611));
        // 22 * 23 / 2 = 253 fits a u8 only because the halving comes first
        assert_eq!(triangular(22u8), Some(253));
        assert_eq!(triangular(23u8), None);
        assert_eq!(triangular(u8::MAX), None);
    }
}
