use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::{validate_max_amount, validate_non_negative, validate_percentage};
use crate::core::{AppError, Result};

/// An agent's commission plan
///
/// Royalty is taken off the top of GCI, then the brokerage keeps the
/// complement of `commission_split` until `commission_cap` is reached, after
/// which each deal pays `post_cap_transaction_fee` instead. Both caps reset on
/// the month/day of `cap_anniversary_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionProfile {
    pub user_id: String,
    /// Percentage of post-royalty GCI the agent keeps before capping
    pub commission_split: Decimal,
    /// Maximum company dollar per cap-year
    pub commission_cap: Decimal,
    pub post_cap_transaction_fee: Decimal,
    /// Franchise royalty, percentage of GCI
    pub royalty_fee: Decimal,
    /// Maximum royalty per cap-year
    pub royalty_fee_cap: Decimal,
    /// Only month and day are meaningful
    pub cap_anniversary_date: NaiveDate,
}

impl CommissionProfile {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(AppError::validation(
                "Commission profile user_id cannot be empty",
            ));
        }
        validate_percentage("commission_split", self.commission_split)?;
        validate_percentage("royalty_fee", self.royalty_fee)?;
        let amounts = [
            ("commission_cap", self.commission_cap),
            ("royalty_fee_cap", self.royalty_fee_cap),
            ("post_cap_transaction_fee", self.post_cap_transaction_fee),
        ];
        for (field, value) in amounts {
            validate_non_negative(field, value)?;
            validate_max_amount(field, value)?;
        }
        Ok(())
    }
}
