mod commission_controller;

pub use commission_controller::{
    AgentCommissionRequest, AgentCommissionResponse, TeamCommissionRequest,
    TeamCommissionResponse,
};

// Re-export configure for main.rs
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    commission_controller::configure(cfg);
}
