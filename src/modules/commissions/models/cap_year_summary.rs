use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Cap progress for one agent over the current cap-year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapYearSummary {
    pub cap_year_start: NaiveDate,
    pub next_anniversary: NaiveDate,
    pub transaction_count: usize,
    pub total_gci: Decimal,
    pub total_royalty_paid: Decimal,
    pub total_company_dollar_paid: Decimal,
    pub total_net_commission: Decimal,
    pub total_hst_on_gci: Decimal,
    /// `None` when the agent has no commission profile
    pub royalty_cap_remaining: Option<Decimal>,
    pub commission_cap_remaining: Option<Decimal>,
    pub capped: bool,
}

/// Summary row in the coach/admin view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSummary {
    pub user_id: String,
    pub agent_name: String,
    #[serde(flatten)]
    pub summary: CapYearSummary,
}
