pub mod commissions;
pub mod health;
