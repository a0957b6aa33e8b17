use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::core::AgentDirectory;
use crate::modules::commissions::models::{
    AgentProcessedTransaction, CommissionProfile, Transaction,
};
use crate::modules::commissions::services::waterfall::CommissionCalculator;

/// Shown when a transaction's owner cannot be resolved
pub const UNKNOWN_AGENT: &str = "Unknown Agent";

/// Groups transactions by owning agent, preserving input order per agent
pub fn group_by_user(transactions: &[Transaction]) -> BTreeMap<&str, Vec<Transaction>> {
    let mut groups: BTreeMap<&str, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        groups.entry(tx.user_id.as_str()).or_default().push(tx.clone());
    }
    groups
}

/// Indexes profiles by user; a later duplicate replaces an earlier one
pub fn index_profiles(profiles: &[CommissionProfile]) -> HashMap<&str, &CommissionProfile> {
    profiles.iter().map(|p| (p.user_id.as_str(), p)).collect()
}

/// Display name for `user_id`, or the unknown-agent label
pub fn resolve_agent_name<D: AgentDirectory + ?Sized>(directory: &D, user_id: &str) -> String {
    directory
        .display_name(user_id)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(UNKNOWN_AGENT)
        .to_string()
}

impl CommissionCalculator {
    /// Waterfall for every agent in a coach/admin scope
    ///
    /// Each agent runs with isolated running totals; caps are never shared.
    /// Results from all agents are merged newest first.
    pub fn process_transactions_for_coach<D: AgentDirectory + ?Sized>(
        &self,
        transactions: &[Transaction],
        profiles: &[CommissionProfile],
        directory: &D,
        today: NaiveDate,
    ) -> Vec<AgentProcessedTransaction> {
        let profiles = index_profiles(profiles);
        let groups = group_by_user(transactions);
        let agent_count = groups.len();

        let mut merged: Vec<AgentProcessedTransaction> = Vec::with_capacity(transactions.len());
        for (user_id, user_transactions) in groups {
            let agent_name = resolve_agent_name(directory, user_id);
            let profile = profiles.get(user_id).copied();

            merged.extend(
                self.process_transactions_for_user(&user_transactions, profile, today)
                    .into_iter()
                    .map(|processed| AgentProcessedTransaction {
                        processed,
                        agent_name: agent_name.clone(),
                    }),
            );
        }

        merged.sort_by(|a, b| {
            b.processed
                .transaction
                .acceptance_date
                .cmp(&a.processed.transaction.acceptance_date)
        });

        debug!(
            agents = agent_count,
            transactions = merged.len(),
            "Commission waterfall fanned out"
        );
        merged
    }
}
