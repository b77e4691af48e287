//! Fixed-point helpers over `u128` amounts.
//!
//! Every product is formed in a 256-bit intermediate before the single
//! final division, and every division floors. No floating point.

use crate::constants::MAX_POW10_EXP;
use primitive_types::U256;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    Overflow,
}

#[inline]
fn narrow(x: U256) -> Result<u128, ArithmeticError> {
    if x > U256::from(u128::MAX) {
        return Err(ArithmeticError::Overflow);
    }
    Ok(x.low_u128())
}

#[inline]
fn widen_product(factors: &[u128]) -> Result<U256, ArithmeticError> {
    let mut acc = U256::one();
    for f in factors {
        acc = acc
            .checked_mul(U256::from(*f))
            .ok_or(ArithmeticError::Overflow)?;
    }
    Ok(acc)
}

/// `floor(a * b / den)` without intermediate overflow.
pub fn mul_div_floor(a: u128, b: u128, den: u128) -> Result<u128, ArithmeticError> {
    if den == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    narrow(widen_product(&[a, b])? / U256::from(den))
}

/// `floor(a * b * c / den)`.
///
/// The product is exact whenever it fits in 256 bits, which always holds for
/// a `u128` amount multiplied by two `u64` factors.
pub fn mul3_div_floor(a: u128, b: u128, c: u128, den: u128) -> Result<u128, ArithmeticError> {
    if den == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    narrow(widen_product(&[a, b, c])? / U256::from(den))
}

/// Like [`mul3_div_floor`] but saturates at `u128::MAX` instead of failing
/// when the quotient does not fit 128 bits.
pub fn mul3_div_floor_saturating(
    a: u128,
    b: u128,
    c: u128,
    den: u128,
) -> Result<u128, ArithmeticError> {
    match mul3_div_floor(a, b, c, den) {
        Err(ArithmeticError::Overflow) => Ok(u128::MAX),
        other => other,
    }
}

/// `10^exp` as a `u128`.
pub const fn pow10(exp: u32) -> Result<u128, ArithmeticError> {
    if exp > MAX_POW10_EXP {
        return Err(ArithmeticError::Overflow);
    }
    Ok(10u128.pow(exp))
}

/// Express `whole` tokens in smallest units at `decimals` precision.
pub fn scale_units(whole: u128, decimals: u32) -> Result<u128, ArithmeticError> {
    whole
        .checked_mul(pow10(decimals)?)
        .ok_or(ArithmeticError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DECIMALS, UNITS_PER_TOKEN};

    #[test]
    fn floors_toward_zero() {
        assert_eq!(mul_div_floor(7, 3, 2), Ok(10));
        assert_eq!(mul3_div_floor(1, 1, 1, 3), Ok(0));
    }

    #[test]
    fn wide_intermediate_does_not_overflow() {
        // (2^128 - 1) * 2^64 / 2^64 fits again after division.
        let two64 = 1u128 << 64;
        assert_eq!(mul_div_floor(u128::MAX, two64, two64), Ok(u128::MAX));
        assert_eq!(
            mul3_div_floor(u128::MAX, u128::from(u64::MAX), u128::from(u64::MAX), u128::from(u64::MAX) * u128::from(u64::MAX)),
            Ok(u128::MAX)
        );
    }

    #[test]
    fn overflow_and_zero_divisor_are_reported() {
        assert_eq!(mul_div_floor(u128::MAX, 2, 1), Err(ArithmeticError::Overflow));
        assert_eq!(mul_div_floor(1, 1, 0), Err(ArithmeticError::DivisionByZero));
        assert_eq!(mul3_div_floor_saturating(u128::MAX, 3, 1, 2), Ok(u128::MAX));
        assert_eq!(mul3_div_floor(u128::MAX, u128::MAX, u128::MAX, 1), Err(ArithmeticError::Overflow));
    }

    #[test]
    fn pow10_and_scaling() {
        assert_eq!(pow10(DECIMALS), Ok(UNITS_PER_TOKEN));
        assert_eq!(pow10(0), Ok(1));
        assert!(pow10(39).is_err());
        assert_eq!(scale_units(10, DECIMALS), Ok(10 * UNITS_PER_TOKEN));
        assert_eq!(scale_units(u128::MAX, 1), Err(ArithmeticError::Overflow));
    }
}
