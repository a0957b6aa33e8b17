use chrono::{Datelike, NaiveDate};

use crate::core::calendar;
use crate::modules::commissions::models::{CommissionProfile, Transaction};

/// The cap-year window that contains a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapYear {
    pub start: NaiveDate,
    pub next_anniversary: NaiveDate,
}

impl CapYear {
    /// Cap-year anchored on `anniversary` that contains `today`
    pub fn containing(anniversary: NaiveDate, today: NaiveDate) -> Self {
        let start = calendar::cap_year_start(anniversary, today);
        Self {
            start,
            next_anniversary: calendar::next_anniversary(anniversary, start),
        }
    }

    /// Cap-year for an agent, falling back to the calendar year when the
    /// agent has no commission profile
    pub fn for_profile(profile: Option<&CommissionProfile>, today: NaiveDate) -> Self {
        let anniversary = match profile {
            Some(p) => p.cap_anniversary_date,
            None => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        };
        Self::containing(anniversary, today)
    }

    /// Deals accepted on or after the start accrue toward the caps.
    /// There is no upper bound: future-dated deals also count.
    pub fn includes(&self, date: NaiveDate) -> bool {
        date >= self.start
    }

    /// Splits transactions into current cap-year (ascending by acceptance
    /// date, ties in input order) and earlier ones (input order)
    pub fn partition<'a>(
        &self,
        transactions: &'a [Transaction],
    ) -> (Vec<&'a Transaction>, Vec<&'a Transaction>) {
        let (mut current, prior): (Vec<_>, Vec<_>) = transactions
            .iter()
            .partition(|tx| self.includes(tx.acceptance_date));
        current.sort_by_key(|tx| tx.acceptance_date);
        (current, prior)
    }
}
