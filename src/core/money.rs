use rust_decimal::Decimal;

use crate::core::{AppError, Result};

/// Harmonized Sales Tax applied to gross commission income (Ontario, 13%)
pub const DEFAULT_HST_RATE: Decimal = Decimal::from_parts(13, 0, 0, false, 2);

/// Largest monetary amount accepted on input: one trillion (1_000_000_000_000)
///
/// Every price, cap and fee is bounded by this, which keeps GCI, tax and the
/// running and summary totals far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// One hundred, the denominator for every percentage field
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Returns `pct` percent of `amount`
///
/// Percentages are stored the way agents enter them (6 means 6%), so every
/// rate in the commission model goes through this helper.
pub fn percent_of(amount: Decimal, pct: Decimal) -> Decimal {
    amount * pct / HUNDRED
}

/// Share of `amount` left over after the agent keeps `retained_pct` percent
pub fn complement_of(amount: Decimal, retained_pct: Decimal) -> Decimal {
    amount * (Decimal::ONE - retained_pct / HUNDRED)
}

/// Remaining room under a cap, never negative
pub fn headroom(cap: Decimal, used: Decimal) -> Decimal {
    (cap - used).max(Decimal::ZERO)
}

/// Canonical string form for API responses (trailing zeros trimmed)
pub fn to_amount_string(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Validates that a percentage lies within 0..=100
pub fn validate_percentage(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value > HUNDRED {
        return Err(AppError::validation(format!(
            "{} must be between 0 and 100, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Validates that a monetary amount is not negative
pub fn validate_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "{} cannot be negative, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Validates that a monetary amount does not exceed [`MAX_AMOUNT`]
pub fn validate_max_amount(field: &str, value: Decimal) -> Result<()> {
    if value > MAX_AMOUNT {
        return Err(AppError::validation(format!(
            "{} cannot exceed {}, got {}",
            field, MAX_AMOUNT, value
        )));
    }
    Ok(())
}

/// Validates a tax rate expressed as a fraction (0.13 for 13%)
pub fn validate_tax_rate(rate: Decimal) -> Result<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(AppError::validation(format!(
            "Tax rate must be between 0 and 1, got {}",
            rate
        )));
    }
    Ok(())
}
