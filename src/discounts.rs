//! Discounts

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

// A real shop would validate codes against a server; here the code is a
// fixed in-process literal compared case-sensitively.
const DISCOUNT_CODE: &str = "JHKDF";
const DISCOUNT_RATE: f64 = 0.15;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Whether a discount code is currently applied to cart totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscountState {
    /// Totals are the plain sum of line totals.
    #[default]
    Inactive,

    /// Totals have the stored rate taken off the grand total.
    Active,
}

/// Check a discount code, returning the rate it grants.
///
/// Comparison is exact and case-sensitive.
pub fn verify_code(code: &str) -> Option<Percentage> {
    (code == DISCOUNT_CODE).then(|| Percentage::from(DISCOUNT_RATE))
}

/// Apply a percentage discount to a grand total.
///
/// The rate comes off the raw total in one step, rounded once to minor
/// units (midpoint away from zero).
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation cannot
/// be safely represented in minor units.
pub fn discounted_total<'a>(
    subtotal: Money<'a, Currency>,
    rate: &Percentage,
) -> Result<Money<'a, Currency>, DiscountError> {
    let minor_units =
        Decimal::from_i64(subtotal.to_minor_units()).ok_or(DiscountError::PercentConversion)?;

    let keep = Decimal::ONE - ((*rate) * Decimal::ONE);

    let discounted = keep
        .checked_mul(minor_units)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)?;

    Ok(Money::from_minor(discounted, subtotal.currency()))
}
