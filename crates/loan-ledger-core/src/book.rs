//! Read-only loan lookup feeding the amortization engine.
//!
//! A `LoanBook` stands in for the data store that owns loan records. It
//! is loaded once from a JSON or YAML document and answers schedule and
//! summary queries by loan id; an unknown id is `NotFound`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::amortization::report::{
    build_schedule_report, build_summary_report, ScheduleReport, ScheduleRequest, SummaryRequest,
};
use crate::amortization::{normalize_stored_rate, LoanSummary, LoanTerms, RoundingPolicy};
use crate::error::LoanLedgerError;
use crate::types::{ComputationOutput, Money, Percent};
use crate::LoanLedgerResult;

/// A stored loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: u64,
    /// Amount borrowed, stored to cents.
    pub amount: Money,
    /// Annual percentage rate, stored to 4 fractional digits.
    pub annual_interest_rate: Percent,
    /// Term in months.
    pub loan_term: i64,
}

impl LoanRecord {
    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.amount,
            annual_rate_percent: self.annual_interest_rate,
            term_months: self.loan_term,
        }
    }

    /// Quantize amount and rate to their stored precision.
    pub fn normalized(self, policy: RoundingPolicy) -> Self {
        LoanRecord {
            amount: policy.money(self.amount),
            annual_interest_rate: normalize_stored_rate(self.annual_interest_rate, policy),
            ..self
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BookDocument {
    #[serde(default)]
    loans: Vec<LoanRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct LoanBook {
    loans: BTreeMap<u64, LoanRecord>,
}

impl LoanBook {
    /// Build a book from existing records. Amounts and rates are
    /// normalized to their stored precision (half-up) before validation;
    /// every record must then carry valid terms and a unique id.
    pub fn from_records(records: Vec<LoanRecord>) -> LoanLedgerResult<Self> {
        let mut loans = BTreeMap::new();
        for record in records {
            let record = record.normalized(RoundingPolicy::default());
            record.terms().validate().map_err(|e| match e {
                LoanLedgerError::InvalidInput { field, reason } => LoanLedgerError::InvalidInput {
                    field: format!("loans[{}].{field}", record.id),
                    reason,
                },
                other => other,
            })?;
            let id = record.id;
            if loans.insert(id, record).is_some() {
                return Err(LoanLedgerError::invalid(
                    "id",
                    format!("Duplicate loan id {id}"),
                ));
            }
        }
        tracing::debug!(loans = loans.len(), "loan book loaded");
        Ok(LoanBook { loans })
    }

    /// Parse `{ "loans": [ ... ] }`.
    pub fn from_json_str(s: &str) -> LoanLedgerResult<Self> {
        let doc: BookDocument = serde_json::from_str(s)?;
        Self::from_records(doc.loans)
    }

    /// Parse the YAML form of the same document.
    pub fn from_yaml_str(s: &str) -> LoanLedgerResult<Self> {
        let doc: BookDocument = serde_yaml::from_str(s)?;
        Self::from_records(doc.loans)
    }

    pub fn get(&self, id: u64) -> LoanLedgerResult<&LoanRecord> {
        self.loans
            .get(&id)
            .ok_or(LoanLedgerError::NotFound { loan_id: id })
    }

    /// Schedule report for a stored loan.
    pub fn schedule_report_for(
        &self,
        id: u64,
        policy: RoundingPolicy,
    ) -> LoanLedgerResult<ComputationOutput<ScheduleReport>> {
        let terms = self.get(id)?.terms();
        build_schedule_report(&ScheduleRequest {
            principal: terms.principal,
            annual_rate_percent: terms.annual_rate_percent,
            term_months: terms.term_months,
            rounding: policy,
        })
    }

    /// Summary report for a stored loan after `month_number` payments.
    pub fn summary_report_for(
        &self,
        id: u64,
        month_number: i64,
        policy: RoundingPolicy,
    ) -> LoanLedgerResult<ComputationOutput<LoanSummary>> {
        let terms = self.get(id)?.terms();
        build_summary_report(&SummaryRequest {
            principal: terms.principal,
            annual_rate_percent: terms.annual_rate_percent,
            term_months: terms.term_months,
            month_number,
            rounding: policy,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = &LoanRecord> {
        self.loans.values()
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }
}
