use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::core::money::{complement_of, headroom, percent_of, DEFAULT_HST_RATE};
use crate::modules::commissions::models::{CommissionProfile, ProcessedTransaction, Transaction};
use crate::modules::commissions::services::cap_year::CapYear;

/// Running totals for one agent within one cap-year
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaterfallState {
    pub running_royalty: Decimal,
    pub running_company_dollar: Decimal,
}

impl WaterfallState {
    /// Applies royalty, then company dollar, to one deal and accumulates both.
    ///
    /// Deals must be fed in ascending acceptance-date order.
    pub fn apply(
        &mut self,
        transaction: &Transaction,
        profile: &CommissionProfile,
        tax_rate: Decimal,
    ) -> ProcessedTransaction {
        let gci = transaction.gci();

        let potential_royalty = percent_of(gci, profile.royalty_fee);
        let royalty =
            potential_royalty.min(headroom(profile.royalty_fee_cap, self.running_royalty));
        let gci_after_royalty = gci - royalty;

        // Cap consumed before this deal: flat fee regardless of headroom,
        // which may push the running total past the cap.
        let company_dollar = if self.running_company_dollar >= profile.commission_cap {
            profile.post_cap_transaction_fee
        } else {
            let potential = complement_of(gci_after_royalty, profile.commission_split);
            potential.min(headroom(profile.commission_cap, self.running_company_dollar))
        };

        self.running_royalty += royalty;
        self.running_company_dollar += company_dollar;

        ProcessedTransaction {
            transaction: transaction.clone(),
            gci,
            royalty_paid: royalty,
            company_dollar_paid: company_dollar,
            net_commission: gci - royalty - company_dollar,
            hst_on_gci: gci * tax_rate,
            in_current_cap_year: true,
        }
    }
}

/// Commission waterfall engine
///
/// Pure and synchronous: the reference date is always passed in, and the same
/// inputs in the same order always produce the same output.
#[derive(Debug, Clone, Copy)]
pub struct CommissionCalculator {
    tax_rate: Decimal,
}

impl CommissionCalculator {
    pub fn new(tax_rate: Decimal) -> Self {
        Self { tax_rate }
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Net commission breakdown for one agent's transactions
    ///
    /// Current cap-year deals run through the waterfall oldest first. Deals
    /// before the cap-year start, and every deal of an agent without a
    /// profile, are reported fully net. Output is newest first.
    pub fn process_transactions_for_user(
        &self,
        transactions: &[Transaction],
        profile: Option<&CommissionProfile>,
        today: NaiveDate,
    ) -> Vec<ProcessedTransaction> {
        let cap_year = CapYear::for_profile(profile, today);

        let mut processed: Vec<ProcessedTransaction> = match profile {
            None => transactions
                .iter()
                .map(|tx| {
                    ProcessedTransaction::fully_net(
                        tx.clone(),
                        self.tax_rate,
                        cap_year.includes(tx.acceptance_date),
                    )
                })
                .collect(),
            Some(profile) => {
                let (current, prior) = cap_year.partition(transactions);
                let mut state = WaterfallState::default();

                let mut out: Vec<ProcessedTransaction> = current
                    .into_iter()
                    .map(|tx| state.apply(tx, profile, self.tax_rate))
                    .collect();
                out.extend(prior.into_iter().map(|tx| {
                    ProcessedTransaction::fully_net(tx.clone(), self.tax_rate, false)
                }));

                debug!(
                    user_id = %profile.user_id,
                    cap_year_start = %cap_year.start,
                    running_royalty = %state.running_royalty,
                    running_company_dollar = %state.running_company_dollar,
                    "Commission waterfall applied"
                );
                out
            }
        };

        sort_newest_first(&mut processed);
        processed
    }
}

impl Default for CommissionCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_HST_RATE)
    }
}

/// Descending by acceptance date; stable, so ties keep processing order
pub(crate) fn sort_newest_first(processed: &mut [ProcessedTransaction]) {
    processed.sort_by(|a, b| b.transaction.acceptance_date.cmp(&a.transaction.acceptance_date));
}
