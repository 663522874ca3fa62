use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rounding::RoundingPolicy;
use super::schedule::{compute_schedule_with, overflow, ScheduleEntry};
use super::terms::LoanTerms;
use crate::error::LoanLedgerError;
use crate::types::Money;
use crate::LoanLedgerResult;

/// Where a loan stands after a given number of payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub current_principal_balance: Money,
    pub aggregate_principal_paid: Money,
    pub aggregate_interest_paid: Money,
}

/// Summarise a schedule after `month_number` payments, half-up rounding.
pub fn compute_summary(
    principal: Money,
    month_number: i64,
    schedule: &[ScheduleEntry],
) -> LoanLedgerResult<LoanSummary> {
    compute_summary_with(principal, month_number, schedule, RoundingPolicy::default())
}

/// Summarise a schedule after `month_number` payments.
///
/// Month 0 is "before any payment" and never touches the schedule.
/// Interest is derived as total paid minus principal retired, so
/// `aggregate_principal_paid + aggregate_interest_paid` always equals
/// `monthly_payment * month_number` exactly.
pub fn compute_summary_with(
    principal: Money,
    month_number: i64,
    schedule: &[ScheduleEntry],
    policy: RoundingPolicy,
) -> LoanLedgerResult<LoanSummary> {
    if principal <= Decimal::ZERO {
        return Err(LoanLedgerError::invalid(
            "principal",
            "Principal must be positive",
        ));
    }
    if month_number < 0 || month_number > schedule.len() as i64 {
        return Err(LoanLedgerError::invalid(
            "month_number",
            format!(
                "Month {month_number} is outside 0..={} for this schedule",
                schedule.len()
            ),
        ));
    }

    if month_number == 0 {
        return Ok(LoanSummary {
            current_principal_balance: policy.money(principal),
            aggregate_principal_paid: policy.money(Decimal::ZERO),
            aggregate_interest_paid: policy.money(Decimal::ZERO),
        });
    }

    let idx = (month_number - 1) as usize;
    let current_principal_balance = policy.money(schedule[idx].remaining_balance);
    let total_paid = schedule[0]
        .monthly_payment
        .checked_mul(Decimal::from(month_number))
        .map(|paid| policy.money(paid))
        .ok_or_else(|| overflow("total paid"))?;
    let principal_paid = principal
        .checked_sub(current_principal_balance)
        .map(|retired| policy.money(retired))
        .ok_or_else(|| overflow("principal retired"))?;
    let interest_paid = total_paid
        .checked_sub(principal_paid)
        .ok_or_else(|| overflow("interest paid"))?;

    Ok(LoanSummary {
        current_principal_balance,
        aggregate_principal_paid: principal_paid,
        aggregate_interest_paid: interest_paid,
    })
}

/// Recompute the schedule from `terms` and summarise it.
pub fn summarize_loan(
    terms: &LoanTerms,
    month_number: i64,
    policy: RoundingPolicy,
) -> LoanLedgerResult<LoanSummary> {
    let schedule = compute_schedule_with(terms, policy)?;
    compute_summary_with(terms.principal, month_number, &schedule, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute_schedule;
    use rust_decimal_macros::dec;

    fn three_percent() -> Vec<ScheduleEntry> {
        compute_schedule(dec!(10000), dec!(3), 12).unwrap()
    }

    #[test]
    fn test_summary_after_six_months() {
        let summary = compute_summary(dec!(10000), 6, &three_percent()).unwrap();
        assert_eq!(summary.current_principal_balance, dec!(5037.43));
        assert_eq!(summary.aggregate_principal_paid, dec!(4962.57));
        assert_eq!(summary.aggregate_interest_paid, dec!(119.07));
    }

    #[test]
    fn test_month_zero_is_before_any_payment() {
        let summary = compute_summary(dec!(10000), 0, &three_percent()).unwrap();
        assert_eq!(
            summary,
            LoanSummary {
                current_principal_balance: dec!(10000),
                aggregate_principal_paid: Decimal::ZERO,
                aggregate_interest_paid: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn test_split_adds_up_to_total_paid() {
        let schedule = three_percent();
        for month in 1..=12 {
            let s = compute_summary(dec!(10000), month, &schedule).unwrap();
            assert_eq!(
                s.aggregate_principal_paid + s.aggregate_interest_paid,
                dec!(846.94) * Decimal::from(month)
            );
        }
    }

    #[test]
    fn test_month_out_of_range() {
        let schedule = three_percent();
        assert!(matches!(
            compute_summary(dec!(10000), 13, &schedule),
            Err(LoanLedgerError::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_summary(dec!(10000), -1, &schedule),
            Err(LoanLedgerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_total_paid_beyond_decimal_range_is_overflow() {
        // The schedule itself fits; twelve payments of ~6.8e27 do not.
        let principal = dec!(70000000000000000000000000000);
        let schedule = compute_schedule(principal, dec!(30), 12).unwrap();
        assert!(matches!(
            compute_summary(principal, 12, &schedule),
            Err(LoanLedgerError::Overflow { .. })
        ));
        assert!(compute_summary(principal, 1, &schedule).is_ok());
    }

    #[test]
    fn test_summarize_loan_recomputes_schedule() {
        let terms = LoanTerms::new(dec!(10000), dec!(3), 12).unwrap();
        let direct = summarize_loan(&terms, 6, RoundingPolicy::HalfUp).unwrap();
        let via_schedule = compute_summary(dec!(10000), 6, &three_percent()).unwrap();
        assert_eq!(direct, via_schedule);
    }
}
