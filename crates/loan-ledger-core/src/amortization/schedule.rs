//! Level-payment schedule builder.
//!
//! The payment is computed once from the annuity formula and rounded to
//! cents; every period then accrues interest on the unrounded balance
//! carried over from the previous period. Only the reported balance is
//! rounded, so rounding error does not compound across months.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use super::rounding::RoundingPolicy;
use super::terms::LoanTerms;
use crate::error::LoanLedgerError;
use crate::types::{Money, Percent, Rate};
use crate::LoanLedgerResult;

/// One month of a level-payment schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Payment number, starting at 1.
    pub month: u32,
    pub monthly_payment: Money,
    /// Balance left after this month's payment.
    pub remaining_balance: Money,
}

/// Entries for months `1..=term_months`, in order.
pub type LoanSchedule = Vec<ScheduleEntry>;

/// Full-precision intermediate state of one schedule run.
#[derive(Debug, Clone)]
pub(crate) struct Amortization {
    pub monthly_rate: Rate,
    pub monthly_payment: Money,
    pub entries: LoanSchedule,
    pub terminal_balance: Decimal,
}

/// Build the schedule with the default half-up rounding policy.
pub fn compute_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: i64,
) -> LoanLedgerResult<LoanSchedule> {
    let terms = LoanTerms::new(principal, annual_rate_percent, term_months)?;
    compute_schedule_with(&terms, RoundingPolicy::default())
}

/// Build the schedule for validated terms under an explicit rounding policy.
pub fn compute_schedule_with(terms: &LoanTerms, policy: RoundingPolicy) -> LoanLedgerResult<LoanSchedule> {
    Ok(amortize(terms, policy)?.entries)
}

/// Level payment rounded to cents:
/// `P * r / (1 - (1 + r)^-n)`.
pub fn level_payment(terms: &LoanTerms, policy: RoundingPolicy) -> LoanLedgerResult<Money> {
    terms.validate()?;
    let raw = raw_payment(terms)?;
    Ok(policy.money(raw))
}

fn raw_payment(terms: &LoanTerms) -> LoanLedgerResult<Decimal> {
    let r = terms.monthly_rate();
    let n = terms.periods();

    // (1 + r)^-n as (1 / (1 + r))^n keeps the power inside (0, 1].
    let discount = (Decimal::ONE / (Decimal::ONE + r))
        .checked_powu(u64::from(n))
        .ok_or_else(|| overflow("discount factor (1 + r)^-n"))?;

    let annuity = Decimal::ONE - discount;
    if annuity.is_zero() {
        // Rate vanishes at 28 decimal places: the payment tends to P / n.
        return terms
            .principal
            .checked_div(Decimal::from(n))
            .ok_or_else(|| overflow("zero-rate level payment"));
    }

    terms
        .principal
        .checked_mul(r)
        .and_then(|interest| interest.checked_div(annuity))
        .ok_or_else(|| overflow("level payment annuity factor"))
}

pub(crate) fn overflow(context: &str) -> LoanLedgerError {
    LoanLedgerError::Overflow {
        context: context.into(),
    }
}

pub(crate) fn amortize(terms: &LoanTerms, policy: RoundingPolicy) -> LoanLedgerResult<Amortization> {
    terms.validate()?;

    let monthly_rate = terms.monthly_rate();
    let monthly_payment = policy.money(raw_payment(terms)?);
    let n = terms.periods();

    tracing::debug!(
        principal = %terms.principal,
        annual_rate = %terms.annual_rate_percent,
        term_months = n,
        payment = %monthly_payment,
        rounding = policy.label(),
        "building amortization schedule"
    );

    let mut balance = terms.principal;
    let mut entries = Vec::with_capacity(n as usize);

    for month in 1..=n {
        balance = balance
            .checked_mul(monthly_rate)
            .and_then(|interest| monthly_payment.checked_sub(interest))
            .and_then(|principal_portion| balance.checked_sub(principal_portion))
            .ok_or_else(|| overflow("balance carry"))?;

        entries.push(ScheduleEntry {
            month,
            monthly_payment,
            remaining_balance: policy.money(balance),
        });
    }

    tracing::debug!(terminal_balance = %balance, "schedule complete");

    Ok(Amortization {
        monthly_rate,
        monthly_payment,
        entries,
        terminal_balance: balance,
    })
}
