use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanLedgerError;
use crate::types::{Money, Percent, Rate};
use crate::LoanLedgerResult;

/// Longest accepted term: 500 years of monthly payments.
pub const MAX_TERM_MONTHS: i64 = 6_000;

/// Principal, quoted annual rate and term of a level-payment loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate as a percentage (e.g., 5.5 for 5.5%).
    pub annual_rate_percent: Percent,
    /// Number of monthly payment periods.
    pub term_months: i64,
}

impl LoanTerms {
    /// Build validated terms.
    pub fn new(principal: Money, annual_rate_percent: Percent, term_months: i64) -> LoanLedgerResult<Self> {
        let terms = LoanTerms {
            principal,
            annual_rate_percent,
            term_months,
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> LoanLedgerResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanLedgerError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        if self.annual_rate_percent <= Decimal::ZERO {
            return Err(LoanLedgerError::invalid(
                "annual_rate_percent",
                "Annual interest rate must be positive",
            ));
        }
        if self.term_months <= 0 {
            return Err(LoanLedgerError::invalid(
                "term_months",
                "Term must be at least 1 month",
            ));
        }
        if self.term_months > MAX_TERM_MONTHS {
            return Err(LoanLedgerError::invalid(
                "term_months",
                format!("Term must not exceed {MAX_TERM_MONTHS} months"),
            ));
        }
        Ok(())
    }

    /// Periodic rate as a decimal fraction: `annual_rate_percent / 12 / 100`.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate_percent / dec!(1200)
    }

    /// Term as a period count. Only meaningful after `validate`.
    pub(crate) fn periods(&self) -> u32 {
        self.term_months as u32
    }
}
