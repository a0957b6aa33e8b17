use std::collections::{HashMap, HashSet};

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::calendar::today_utc;
use crate::core::error::AppError;
use crate::core::money::to_amount_string;
use crate::middleware::RequestIdentifier;
use crate::modules::commissions::models::{
    AgentProcessedTransaction, AgentSummary, CapYearSummary, CommissionProfile,
    ProcessedTransaction, Transaction,
};
use crate::modules::commissions::services::{
    summarize_agents, summarize_cap_year, CapYear, CommissionCalculator,
};

/// Request body for a single agent's commission breakdown
#[derive(Debug, Deserialize)]
pub struct AgentCommissionRequest {
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub profile: Option<CommissionProfile>,
    /// Reference date for the cap-year; defaults to today (UTC)
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for the coach/admin aggregate view
#[derive(Debug, Deserialize)]
pub struct TeamCommissionRequest {
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub profiles: Vec<CommissionProfile>,
    /// user_id -> display name
    #[serde(default)]
    pub agent_names: HashMap<String, String>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Processed transaction as returned by the API
#[derive(Debug, Serialize)]
pub struct ProcessedTransactionResponse {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub acceptance_date: String,
    pub sale_price: String, // Decimal as string for JSON precision
    pub commission_rate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_center_id: Option<String>,
    pub gci: String,
    pub royalty_paid: String,
    pub company_dollar_paid: String,
    pub net_commission: String,
    pub hst_on_gci: String,
    pub in_current_cap_year: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CapYearSummaryResponse {
    pub cap_year_start: String,
    pub next_anniversary: String,
    pub transaction_count: usize,
    pub total_gci: String,
    pub total_royalty_paid: String,
    pub total_company_dollar_paid: String,
    pub total_net_commission: String,
    pub total_hst_on_gci: String,
    pub royalty_cap_remaining: Option<String>,
    pub commission_cap_remaining: Option<String>,
    pub capped: bool,
}

#[derive(Debug, Serialize)]
pub struct AgentSummaryResponse {
    pub user_id: String,
    pub agent_name: String,
    #[serde(flatten)]
    pub summary: CapYearSummaryResponse,
}

#[derive(Debug, Serialize)]
pub struct AgentCommissionResponse {
    pub today: String,
    pub cap_year_start: String,
    pub transactions: Vec<ProcessedTransactionResponse>,
    pub summary: CapYearSummaryResponse,
}

#[derive(Debug, Serialize)]
pub struct TeamCommissionResponse {
    pub today: String,
    pub transactions: Vec<ProcessedTransactionResponse>,
    pub agents: Vec<AgentSummaryResponse>,
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl From<ProcessedTransaction> for ProcessedTransactionResponse {
    fn from(processed: ProcessedTransaction) -> Self {
        let tx = processed.transaction;
        Self {
            id: tx.id,
            user_id: tx.user_id,
            transaction_type: tx.transaction_type.to_string(),
            acceptance_date: format_date(tx.acceptance_date),
            sale_price: to_amount_string(tx.sale_price),
            commission_rate: to_amount_string(tx.commission_rate),
            team_id: tx.team_id,
            market_center_id: tx.market_center_id,
            gci: to_amount_string(processed.gci),
            royalty_paid: to_amount_string(processed.royalty_paid),
            company_dollar_paid: to_amount_string(processed.company_dollar_paid),
            net_commission: to_amount_string(processed.net_commission),
            hst_on_gci: to_amount_string(processed.hst_on_gci),
            in_current_cap_year: processed.in_current_cap_year,
            agent_name: None,
        }
    }
}

impl From<AgentProcessedTransaction> for ProcessedTransactionResponse {
    fn from(annotated: AgentProcessedTransaction) -> Self {
        let mut response = Self::from(annotated.processed);
        response.agent_name = Some(annotated.agent_name);
        response
    }
}

impl From<CapYearSummary> for CapYearSummaryResponse {
    fn from(summary: CapYearSummary) -> Self {
        Self {
            cap_year_start: format_date(summary.cap_year_start),
            next_anniversary: format_date(summary.next_anniversary),
            transaction_count: summary.transaction_count,
            total_gci: to_amount_string(summary.total_gci),
            total_royalty_paid: to_amount_string(summary.total_royalty_paid),
            total_company_dollar_paid: to_amount_string(summary.total_company_dollar_paid),
            total_net_commission: to_amount_string(summary.total_net_commission),
            total_hst_on_gci: to_amount_string(summary.total_hst_on_gci),
            royalty_cap_remaining: summary.royalty_cap_remaining.map(to_amount_string),
            commission_cap_remaining: summary.commission_cap_remaining.map(to_amount_string),
            capped: summary.capped,
        }
    }
}

impl From<AgentSummary> for AgentSummaryResponse {
    fn from(agent: AgentSummary) -> Self {
        Self {
            user_id: agent.user_id,
            agent_name: agent.agent_name,
            summary: CapYearSummaryResponse::from(agent.summary),
        }
    }
}

/// Validates every transaction and rejects duplicate ids
fn validate_transactions(transactions: &[Transaction]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for tx in transactions {
        tx.validate()?;
        if !seen.insert(tx.id.as_str()) {
            return Err(AppError::validation(format!(
                "Duplicate transaction id: {}",
                tx.id
            )));
        }
    }
    Ok(())
}

/// Validates profiles and rejects more than one per agent
fn validate_profiles(profiles: &[CommissionProfile]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for profile in profiles {
        profile.validate()?;
        if !seen.insert(profile.user_id.as_str()) {
            return Err(AppError::validation(format!(
                "Duplicate commission profile for user: {}",
                profile.user_id
            )));
        }
    }
    Ok(())
}

fn request_id_of(request_id: &Option<web::ReqData<RequestIdentifier>>) -> String {
    request_id
        .as_ref()
        .map(|id| id.0.clone())
        .unwrap_or_default()
}

/// Commission breakdown for one agent
/// POST /api/v1/commissions/agent
pub async fn process_agent_commissions(
    calculator: web::Data<CommissionCalculator>,
    request_id: Option<web::ReqData<RequestIdentifier>>,
    request: web::Json<AgentCommissionRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    validate_transactions(&request.transactions)?;
    if let Some(profile) = &request.profile {
        profile.validate()?;
        if let Some(foreign) = request
            .transactions
            .iter()
            .find(|tx| tx.user_id != profile.user_id)
        {
            return Err(AppError::validation(format!(
                "Transaction {} belongs to {}, not to profile owner {}",
                foreign.id, foreign.user_id, profile.user_id
            )));
        }
    }

    let today = request.today.unwrap_or_else(today_utc);
    let profile = request.profile.as_ref();
    let cap_year = CapYear::for_profile(profile, today);

    let processed = calculator.process_transactions_for_user(&request.transactions, profile, today);
    let summary = summarize_cap_year(&processed, profile, cap_year);

    info!(
        request_id = %request_id_of(&request_id),
        transactions = processed.len(),
        has_profile = profile.is_some(),
        capped = summary.capped,
        "Processed agent commissions"
    );

    Ok(HttpResponse::Ok().json(AgentCommissionResponse {
        today: format_date(today),
        cap_year_start: format_date(cap_year.start),
        transactions: processed
            .into_iter()
            .map(ProcessedTransactionResponse::from)
            .collect(),
        summary: CapYearSummaryResponse::from(summary),
    }))
}

/// Commission breakdown across every agent in a coach/admin scope
/// POST /api/v1/commissions/team
pub async fn process_team_commissions(
    calculator: web::Data<CommissionCalculator>,
    request_id: Option<web::ReqData<RequestIdentifier>>,
    request: web::Json<TeamCommissionRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    validate_transactions(&request.transactions)?;
    validate_profiles(&request.profiles)?;

    let today = request.today.unwrap_or_else(today_utc);
    let processed = calculator.process_transactions_for_coach(
        &request.transactions,
        &request.profiles,
        &request.agent_names,
        today,
    );
    let agents = summarize_agents(&processed, &request.profiles, &request.agent_names, today);

    info!(
        request_id = %request_id_of(&request_id),
        transactions = processed.len(),
        agents = agents.len(),
        "Processed team commissions"
    );

    Ok(HttpResponse::Ok().json(TeamCommissionResponse {
        today: format_date(today),
        transactions: processed
            .into_iter()
            .map(ProcessedTransactionResponse::from)
            .collect(),
        agents: agents.into_iter().map(AgentSummaryResponse::from).collect(),
    }))
}

/// Configure routes for the commissions module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/commissions")
            .route("/agent", web::post().to(process_agent_commissions))
            .route("/team", web::post().to(process_team_commissions)),
    );
}
