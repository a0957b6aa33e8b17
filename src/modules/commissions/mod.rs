pub mod controllers;
pub mod models;
pub mod services;

pub use models::{CommissionProfile, ProcessedTransaction, Transaction};
pub use services::CommissionCalculator;
