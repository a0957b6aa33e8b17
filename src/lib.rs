//! AgentGPS commission engine
//!
//! Turns an agent's raw real-estate transactions and commission plan into
//! per-deal royalty, company dollar and net commission figures, honoring
//! annual caps that reset on each agent's anniversary date. A thin HTTP
//! service exposes the engine to the dashboard.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

use actix_web::web;

// Re-export commonly used types
pub use modules::commissions;
pub use modules::commissions::models::{
    AgentProcessedTransaction, CommissionProfile, ProcessedTransaction, Transaction,
    TransactionType,
};
pub use modules::commissions::services::CommissionCalculator;

/// Registers every API route; shared by the binary and the HTTP tests
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.configure(modules::health::controllers::configure)
        .service(web::scope("/api/v1").configure(modules::commissions::controllers::configure));
}
