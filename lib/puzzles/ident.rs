//! Check digits for Israeli identity numbers.
//!
//! An ID is nine decimal digits, the last of which is a Luhn-style check digit
//! computed from the first eight: digits at even (zero-based) positions count
//! once, digits at odd positions count twice with the digits of the product
//! summed, and the check digit brings the total up to a multiple of ten.
//!
//! Shorter inputs are left-padded with zeros to nine digits. Ten-digit inputs
//! are accepted as well; the check digit is still taken from the first eight
//! and compared against the last.

use std::{
    fmt,
    str::FromStr,
    sync::OnceLock,
};
use regex::Regex;

crate::mkerr!(
    /// Errors from parsing an ID.
    IdentError("ident") -> IdentResult : {
        BadFormat => "an ID must consist of 1 to 10 decimal digits",
        BadPattern => "couldn't compile the ID pattern",
    }
);

const MIN_LEN: usize = 9;

fn id_pattern() -> IdentResult<&'static Regex> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    return PATTERN.get_or_init(|| Regex::new(r"^[0-9]{1,10}$"))
        .as_ref()
        .map_err(|_| IdentError::BadPattern);
}

/// A parsed, zero-padded ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    digits: Vec<u8>,
}

/// Parse an ID from a string of digits, ignoring surrounding whitespace.
pub fn parse_id(s: &str) -> IdentResult<Ident> {
    let s = s.trim();
    if !id_pattern()?.is_match(s) {
        return Err(IdentError::BadFormat);
    }
    let pad = MIN_LEN.saturating_sub(s.len());
    let digits: Vec<u8>
        = std::iter::repeat(0).take(pad)
        .chain(s.bytes().map(|b| b - b'0'))
        .collect();
    return Ok(Ident { digits });
}

impl FromStr for Ident {
    type Err = IdentError;

    fn from_str(s: &str) -> IdentResult<Self> { parse_id(s) }
}

impl TryFrom<u64> for Ident {
    type Error = IdentError;

    fn try_from(n: u64) -> IdentResult<Self> { parse_id(&n.to_string()) }
}

impl Ident {
    pub fn digits(&self) -> &[u8] { &self.digits }

    /// Compute the check digit from the first eight digits.
    pub fn check_digit(&self) -> u8 {
        let total: u32
            = self.digits.iter().take(8).enumerate()
            .map(|(k, d)| {
                let d = u32::from(*d);
                if k % 2 == 0 {
                    d
                } else if d < 5 {
                    2 * d
                } else {
                    1 + (2 * d) % 10
                }
            })
            .sum();
        return ((10 - total % 10) % 10) as u8;
    }

    /// Return `true` if the last digit matches the check digit.
    pub fn is_valid(&self) -> bool {
        return self.digits.last() == Some(&self.check_digit());
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for d in self.digits.iter() {
            write!(f, "{}", d)?;
        }
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_digit_reference_value() {
        let id: Ident = "3201579484".parse().unwrap();
        assert_eq!(id.check_digit(), 4);
        assert!(id.is_valid());
        assert_eq!(Ident::try_from(3201579484_u64), Ok(id));
    }

    #[test]
    fn nine_digit_ids() {
        for (s, check) in [("123456782", 2), ("000000018", 8), ("999999998", 8), ("039400015", 5)] {
            let id = parse_id(s).unwrap();
            assert_eq!(id.check_digit(), check, "{}", s);
            assert!(id.is_valid(), "{}", s);
        }
        assert!(!parse_id("123456781").unwrap().is_valid());
        assert!(!parse_id("320157948").unwrap().is_valid());
    }

    #[test]
    fn short_ids_are_padded() {
        let id = parse_id("18").unwrap();
        assert_eq!(id.to_string(), "000000018");
        assert!(id.is_valid());
        assert_eq!(Ident::try_from(18_u64), Ok(id));
    }

    #[test]
    fn pattern_compiles_once() {
        let a = id_pattern().unwrap();
        let b = id_pattern().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(a.is_match("0123456789"));
        assert!(!a.is_match("01234567890"));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_id(""), Err(IdentError::BadFormat));
        assert_eq!(parse_id("12a4"), Err(IdentError::BadFormat));
        assert_eq!(parse_id("-12"), Err(IdentError::BadFormat));
        assert_eq!(parse_id("12345678901"), Err(IdentError::BadFormat));
        assert!(parse_id(" 123456782\n").is_ok());
    }
}
