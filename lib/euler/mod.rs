//! Solutions to the first two Project Euler problems, each in a brute-force
//! form and one or more optimized forms that must agree with it.
//!
//! All routines are generic over unsigned primitive integers and use checked
//! arithmetic throughout: a result that doesn't fit in the chosen type is
//! reported as [`EulerError::Overflow`] rather than silently wrapped.

pub mod multiples;
pub mod fibonacci;

crate::mkerr!(
    /// Errors returned by the Project Euler routines.
    EulerError("euler") -> EulerResult : {
        /// A divisor of zero was supplied.
        ZeroDivisor => "divisors must be nonzero",
        /// An intermediate or final value didn't fit in the integer type.
        Overflow => "integer overflow",
    }
);
