//! Bounded generation of the Fibonacci sequence and sums of its even terms
//! (Project Euler #2).
//!
//! The sequence is indexed from one, with $`F_1 = F_2 = 1`$ (and $`F_0 = 0`$
//! where needed). Four ways to sum the even terms not exceeding a ceiling are
//! provided; they agree wherever none of them overflows:
//! - [`even_sum_brute`] builds the list and filters it,
//! - [`even_sum_pairwise`] keeps only a running pair of terms and stops early,
//! - [`even_sum_identity`] uses the fact that every third term is even and
//!   equal to the sum of the two odd terms before it, so that the even terms
//!   make up half of $`F_1 + \cdots + F_m = F_{m + 2} - 1`$ for $`m`$ a
//!   multiple of three,
//! - [`even_sum_recurrence`] walks only the even terms, which obey
//!   $`E_{k + 1} = 4 E_k + E_{k - 1}`$.

use num_traits::{
    PrimInt,
    Unsigned,
};
use crate::euler::{ EulerError, EulerResult };

fn is_even<T>(x: T) -> bool
where T: PrimInt + Unsigned
{
    return (x & T::one()).is_zero();
}

/// An iterator over $`F_1, F_2, \dots`$ that ends after the last term
/// representable in `T`.
#[derive(Clone, Debug)]
pub struct Fibonacci<T> {
    cur: Option<T>,
    next: Option<T>,
}

impl<T> Fibonacci<T>
where T: PrimInt + Unsigned
{
    pub fn new() -> Self {
        return Self { cur: Some(T::one()), next: Some(T::one()) };
    }
}

impl<T> Default for Fibonacci<T>
where T: PrimInt + Unsigned
{
    fn default() -> Self { Self::new() }
}

impl<T> Iterator for Fibonacci<T>
where T: PrimInt + Unsigned
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let out = self.cur?;
        self.cur = self.next;
        self.next = self.cur.and_then(|c| out.checked_add(&c));
        return Some(out);
    }
}

/// Build the list of the first (at most) `max_terms` terms, stopping at the
/// first one that exceeds `ceiling`.
pub fn fib_list<T>(max_terms: usize, ceiling: T) -> Vec<T>
where T: PrimInt + Unsigned
{
    return Fibonacci::new()
        .take(max_terms)
        .take_while(|f| *f <= ceiling)
        .collect();
}

/// A term of the sequence with its (one-based) index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FibTerm<T> {
    pub index: usize,
    pub value: T,
}

/// Find the last term not exceeding `ceiling` among the first `max_terms`
/// terms, keeping only the running pair of the two latest terms.
///
/// Returns `None` if `max_terms == 0` or `ceiling == 0`.
pub fn last_within<T>(ceiling: T, max_terms: usize) -> Option<FibTerm<T>>
where T: PrimInt + Unsigned
{
    if max_terms == 0 || ceiling.is_zero() {
        return None;
    }
    let mut a = T::zero();
    let mut b = T::one();
    let mut index: usize = 1;
    while index < max_terms {
        match a.checked_add(&b) {
            Some(f) if f <= ceiling => {
                a = b;
                b = f;
                index += 1;
            },
            _ => { break; },
        }
    }
    return Some(FibTerm { index, value: b });
}

/// Compute $`F_n`$, with $`F_0 = 0`$.
pub fn nth<T>(n: usize) -> EulerResult<T>
where T: PrimInt + Unsigned
{
    let mut a = T::zero();
    let mut b = T::one();
    if n == 0 {
        return Ok(a);
    }
    for _ in 1..n {
        let f = a.checked_add(&b).ok_or(EulerError::Overflow)?;
        a = b;
        b = f;
    }
    return Ok(b);
}

/// Sum the even terms not exceeding `ceiling` by building the full list and
/// filtering it.
pub fn even_sum_brute<T>(ceiling: T) -> EulerResult<T>
where T: PrimInt + Unsigned
{
    return fib_list(usize::MAX, ceiling)
        .into_iter()
        .filter(|f| is_even(*f))
        .try_fold(T::zero(), |acc, f| acc.checked_add(&f))
        .ok_or(EulerError::Overflow);
}

/// Sum the even terms not exceeding `ceiling` with a running pair of terms,
/// terminating as soon as the ceiling is passed.
pub fn even_sum_pairwise<T>(ceiling: T) -> EulerResult<T>
where T: PrimInt + Unsigned
{
    let mut total = T::zero();
    let mut a = T::zero();
    let mut b = T::one();
    while b <= ceiling {
        if is_even(b) {
            total = total.checked_add(&b).ok_or(EulerError::Overflow)?;
        }
        match a.checked_add(&b) {
            Some(f) => {
                a = b;
                b = f;
            },
            None => { break; },
        }
    }
    return Ok(total);
}

/// Sum the even terms not exceeding `ceiling` as $`(F_{m + 2} - 1) / 2`$,
/// where $`m`$ is the largest multiple of three no greater than the index of
/// the last term within the ceiling.
///
/// This needs $`F_{m + 2}`$ to be representable, so it can report
/// [`EulerError::Overflow`] for ceilings close to `T::max_value()` where the
/// other methods succeed.
pub fn even_sum_identity<T>(ceiling: T) -> EulerResult<T>
where T: PrimInt + Unsigned
{
    let Some(last) = last_within(ceiling, usize::MAX) else {
        return Ok(T::zero());
    };
    let m = last.index / 3 * 3;
    let total: T = nth(m + 2)?;
    return Ok((total - T::one()) / (T::one() + T::one()));
}

/// Sum the even terms not exceeding `ceiling` by generating only the even
/// terms, via $`E_{k + 1} = 4 E_k + E_{k - 1}`$ with $`E_0 = 0`$, $`E_1 = 2`$.
pub fn even_sum_recurrence<T>(ceiling: T) -> EulerResult<T>
where T: PrimInt + Unsigned
{
    let two = T::one() + T::one();
    let four = two + two;
    let mut total = T::zero();
    let mut prev = T::zero();
    let mut cur = two;
    while cur <= ceiling {
        total = total.checked_add(&cur).ok_or(EulerError::Overflow)?;
        match cur.checked_mul(&four).and_then(|c| c.checked_add(&prev)) {
            Some(next) => {
                prev = cur;
                cur = next;
            },
            None => { break; },
        }
    }
    return Ok(total);
}
