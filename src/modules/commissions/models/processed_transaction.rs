use rust_decimal::Decimal;
use serde::Serialize;

use super::Transaction;

/// A transaction with its commission waterfall applied
///
/// Derived on every read and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub gci: Decimal,
    pub royalty_paid: Decimal,
    pub company_dollar_paid: Decimal,
    pub net_commission: Decimal,
    pub hst_on_gci: Decimal,
    /// Whether the deal counted toward the current cap-year totals
    pub in_current_cap_year: bool,
}

impl ProcessedTransaction {
    /// A deal with no royalty or company dollar withheld
    pub fn fully_net(
        transaction: Transaction,
        tax_rate: Decimal,
        in_current_cap_year: bool,
    ) -> Self {
        let gci = transaction.gci();
        Self {
            transaction,
            gci,
            royalty_paid: Decimal::ZERO,
            company_dollar_paid: Decimal::ZERO,
            net_commission: gci,
            hst_on_gci: gci * tax_rate,
            in_current_cap_year,
        }
    }

    /// Sum of every deduction and the agent's net; always equals `gci`
    pub fn accounted_total(&self) -> Decimal {
        self.net_commission + self.royalty_paid + self.company_dollar_paid
    }
}

/// A processed transaction annotated with its agent, for coach/admin views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentProcessedTransaction {
    #[serde(flatten)]
    pub processed: ProcessedTransaction,
    pub agent_name: String,
}
