pub mod cap_year_summary;
pub mod commission_profile;
pub mod processed_transaction;
pub mod transaction;

pub use cap_year_summary::{AgentSummary, CapYearSummary};
pub use commission_profile::CommissionProfile;
pub use processed_transaction::{AgentProcessedTransaction, ProcessedTransaction};
pub use transaction::{Transaction, TransactionType};
