pub mod cap_year;
pub mod fan_out;
pub mod summary;
pub mod waterfall;

pub use cap_year::CapYear;
pub use fan_out::{group_by_user, resolve_agent_name, UNKNOWN_AGENT};
pub use summary::{summarize_agents, summarize_cap_year};
pub use waterfall::{CommissionCalculator, WaterfallState};
