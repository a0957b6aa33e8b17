use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::core::money::headroom;
use crate::core::AgentDirectory;
use crate::modules::commissions::models::{
    AgentProcessedTransaction, AgentSummary, CapYearSummary, CommissionProfile,
    ProcessedTransaction,
};
use crate::modules::commissions::services::cap_year::CapYear;
use crate::modules::commissions::services::fan_out::{index_profiles, resolve_agent_name};

/// Totals the current cap-year deals of one agent
///
/// `processed` must be the output of the waterfall for the same agent,
/// profile and reference date that produced `cap_year`.
pub fn summarize_cap_year<'a, I>(
    processed: I,
    profile: Option<&CommissionProfile>,
    cap_year: CapYear,
) -> CapYearSummary
where
    I: IntoIterator<Item = &'a ProcessedTransaction>,
{
    let mut summary = CapYearSummary {
        cap_year_start: cap_year.start,
        next_anniversary: cap_year.next_anniversary,
        transaction_count: 0,
        total_gci: Decimal::ZERO,
        total_royalty_paid: Decimal::ZERO,
        total_company_dollar_paid: Decimal::ZERO,
        total_net_commission: Decimal::ZERO,
        total_hst_on_gci: Decimal::ZERO,
        royalty_cap_remaining: None,
        commission_cap_remaining: None,
        capped: false,
    };

    for tx in processed.into_iter().filter(|tx| tx.in_current_cap_year) {
        summary.transaction_count += 1;
        summary.total_gci += tx.gci;
        summary.total_royalty_paid += tx.royalty_paid;
        summary.total_company_dollar_paid += tx.company_dollar_paid;
        summary.total_net_commission += tx.net_commission;
        summary.total_hst_on_gci += tx.hst_on_gci;
    }

    if let Some(profile) = profile {
        summary.royalty_cap_remaining =
            Some(headroom(profile.royalty_fee_cap, summary.total_royalty_paid));
        summary.commission_cap_remaining =
            Some(headroom(profile.commission_cap, summary.total_company_dollar_paid));
        summary.capped = summary.total_company_dollar_paid >= profile.commission_cap;
    }

    summary
}

/// One summary per agent for the coach/admin view
///
/// Covers every agent that has transactions or a profile, so agents with no
/// activity this cap-year still show their full cap headroom. Sorted by agent
/// name, then user id.
pub fn summarize_agents<D: AgentDirectory + ?Sized>(
    processed: &[AgentProcessedTransaction],
    profiles: &[CommissionProfile],
    directory: &D,
    today: NaiveDate,
) -> Vec<AgentSummary> {
    let profile_index = index_profiles(profiles);
    let user_ids: BTreeSet<&str> = processed
        .iter()
        .map(|tx| tx.processed.transaction.user_id.as_str())
        .chain(profiles.iter().map(|p| p.user_id.as_str()))
        .collect();

    let mut summaries: Vec<AgentSummary> = user_ids
        .into_iter()
        .map(|user_id| {
            let profile = profile_index.get(user_id).copied();
            let own = processed
                .iter()
                .filter(|tx| tx.processed.transaction.user_id == user_id)
                .map(|tx| &tx.processed);

            AgentSummary {
                user_id: user_id.to_string(),
                agent_name: resolve_agent_name(directory, user_id),
                summary: summarize_cap_year(own, profile, CapYear::for_profile(profile, today)),
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        a.agent_name
            .cmp(&b.agent_name)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    summaries
}
