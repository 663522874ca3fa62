//! Schedule and summary reports wrapped in the standard computation
//! envelope, for the CLI and the Node bindings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::rounding::RoundingPolicy;
use super::schedule::{amortize, overflow, LoanSchedule};
use super::summary::{compute_summary_with, LoanSummary};
use super::terms::LoanTerms;
use crate::types::*;
use crate::LoanLedgerResult;

/// Input for a schedule report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub principal: Money,
    /// Annual interest rate as a percentage (e.g., 5.5 for 5.5%).
    pub annual_rate_percent: Percent,
    pub term_months: i64,
    #[serde(default)]
    pub rounding: RoundingPolicy,
}

/// Input for a summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_months: i64,
    /// Number of payments made; 0 means none yet.
    pub month_number: i64,
    #[serde(default)]
    pub rounding: RoundingPolicy,
}

impl ScheduleRequest {
    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.principal,
            annual_rate_percent: self.annual_rate_percent,
            term_months: self.term_months,
        }
    }
}

impl SummaryRequest {
    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.principal,
            annual_rate_percent: self.annual_rate_percent,
            term_months: self.term_months,
        }
    }
}

/// Schedule plus the loan-level totals derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub terms: LoanTerms,
    pub monthly_rate: Rate,
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    /// Reported balance after the final payment.
    pub terminal_residual: Money,
    pub entries: LoanSchedule,
}

pub fn build_schedule_report(
    input: &ScheduleRequest,
) -> LoanLedgerResult<ComputationOutput<ScheduleReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let policy = input.rounding;
    let terms = input.terms();

    let run = amortize(&terms, policy)?;

    let terminal_residual = policy.money(run.terminal_balance);
    if terminal_residual.abs() >= Decimal::ONE {
        tracing::warn!(
            residual = %terminal_residual,
            "terminal balance exceeds one currency unit"
        );
        warnings.push(format!(
            "Terminal balance {terminal_residual} exceeds one currency unit; \
             cent rounding of the level payment compounds over long terms at high rates"
        ));
    }

    let total_paid = run
        .monthly_payment
        .checked_mul(Decimal::from(terms.term_months))
        .ok_or_else(|| overflow("total paid"))?;
    let total_interest = terms
        .principal
        .checked_sub(terminal_residual)
        .and_then(|retired| total_paid.checked_sub(retired))
        .ok_or_else(|| overflow("total interest"))?;

    let output = ScheduleReport {
        monthly_rate: run.monthly_rate,
        monthly_payment: run.monthly_payment,
        total_paid,
        total_interest: policy.money(total_interest),
        terminal_residual,
        entries: run.entries,
        terms,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization (unrounded balance carry)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "term_months": input.term_months,
            "rounding": policy.label(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

pub fn build_summary_report(
    input: &SummaryRequest,
) -> LoanLedgerResult<ComputationOutput<LoanSummary>> {
    let start = Instant::now();
    let policy = input.rounding;
    let terms = input.terms();

    let run = amortize(&terms, policy)?;
    let summary = compute_summary_with(terms.principal, input.month_number, &run.entries, policy)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan summary (interest = total paid - principal retired)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "term_months": input.term_months,
            "month_number": input.month_number,
            "monthly_payment": run.monthly_payment.to_string(),
            "rounding": policy.label(),
        }),
        Vec::new(),
        elapsed,
        summary,
    ))
}
