use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::money::{self, percent_of};
use crate::core::{AppError, Result};

/// Kind of deal; informational only, never used in the waterfall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "Listing Sale")]
    ListingSale,
    #[serde(rename = "Buyer Sale")]
    BuyerSale,
    #[serde(rename = "Lease")]
    Lease,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::ListingSale => write!(f, "Listing Sale"),
            TransactionType::BuyerSale => write!(f, "Buyer Sale"),
            TransactionType::Lease => write!(f, "Lease"),
        }
    }
}

/// A closed or accepted deal as recorded by an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    /// Commission accrual date, used to bucket the deal into a cap-year
    pub acceptance_date: NaiveDate,
    pub sale_price: Decimal,
    /// Percentage of the sale price owed to the agent (2.5 means 2.5%)
    pub commission_rate: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_center_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        acceptance_date: NaiveDate,
        sale_price: Decimal,
        commission_rate: Decimal,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            acceptance_date,
            sale_price,
            commission_rate,
            transaction_type,
            team_id: None,
            market_center_id: None,
            conditions_date: None,
            close_date: None,
            expiry_date: None,
        }
    }

    /// Gross commission income: sale price × commission rate
    pub fn gci(&self) -> Decimal {
        percent_of(self.sale_price, self.commission_rate)
    }

    /// Form-level checks applied before a transaction reaches the engine
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::validation("Transaction id cannot be empty"));
        }
        if self.user_id.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Transaction {} has no user_id",
                self.id
            )));
        }
        if self.sale_price <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Transaction {} sale_price must be positive, got {}",
                self.id, self.sale_price
            )));
        }
        money::validate_max_amount("sale_price", self.sale_price)?;
        money::validate_percentage("commission_rate", self.commission_rate)
    }
}
