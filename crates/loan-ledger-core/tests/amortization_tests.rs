use loan_ledger_core::amortization::{
    compute_schedule, compute_schedule_with, compute_summary, compute_summary_with, LoanSummary,
    LoanTerms, RoundingPolicy, MAX_TERM_MONTHS,
};
use loan_ledger_core::LoanLedgerError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Schedule shape
// ===========================================================================

#[test]
fn test_schedule_length_and_months() {
    for (principal, rate, term) in [
        (dec!(10000), dec!(5.5), 12),
        (dec!(1000), dec!(12), 24),
        (dec!(20000), dec!(7.9), 60),
        (dec!(250000), dec!(6.5), 360),
    ] {
        let schedule = compute_schedule(principal, rate, term).unwrap();
        assert_eq!(schedule.len() as i64, term);
        for (i, entry) in schedule.iter().enumerate() {
            assert_eq!(entry.month as usize, i + 1);
        }
    }
}

#[test]
fn test_level_payment_is_constant() {
    let schedule = compute_schedule(dec!(250000), dec!(6.5), 360).unwrap();
    let payment = schedule[0].monthly_payment;
    assert_eq!(payment, dec!(1580.17));
    assert!(schedule.iter().all(|e| e.monthly_payment == payment));
}

#[test]
fn test_balances_carry_two_places() {
    let schedule = compute_schedule(dec!(10000), dec!(5.5), 12).unwrap();
    for entry in &schedule {
        assert_eq!(entry.remaining_balance.scale(), 2);
        assert_eq!(entry.monthly_payment.scale(), 2);
    }
}

#[test]
fn test_balance_declines_monotonically() {
    let schedule = compute_schedule(dec!(20000), dec!(7.9), 60).unwrap();
    for pair in schedule.windows(2) {
        assert!(pair[1].remaining_balance < pair[0].remaining_balance);
    }
}

// ===========================================================================
// Terminal residual
// ===========================================================================

#[test]
fn test_terminal_residual_known_answers() {
    let cases = [
        (dec!(10000), dec!(3), 12, dec!(-0.04)),
        (dec!(10000), dec!(5.5), 12, dec!(-0.03)),
        (dec!(1000), dec!(12), 24, dec!(0.09)),
        (dec!(20000), dec!(7.9), 60, dec!(0.10)),
        (dec!(250000), dec!(6.5), 360, dec!(0.06)),
        (dec!(5000), dec!(1), 360, dec!(0.83)),
    ];
    for (principal, rate, term, residual) in cases {
        let schedule = compute_schedule(principal, rate, term).unwrap();
        let last = schedule.last().unwrap();
        assert_eq!(last.remaining_balance, residual, "{principal} @ {rate}% / {term}");
        assert!(last.remaining_balance.abs() < Decimal::ONE);
    }
}

// ===========================================================================
// Summary
// ===========================================================================

#[test]
fn test_summary_month_six_known_answer() {
    let schedule = compute_schedule(dec!(10000), dec!(3), 12).unwrap();
    let summary = compute_summary(dec!(10000), 6, &schedule).unwrap();
    assert_eq!(
        summary,
        LoanSummary {
            current_principal_balance: dec!(5037.43),
            aggregate_principal_paid: dec!(4962.57),
            aggregate_interest_paid: dec!(119.07),
        }
    );
}

#[test]
fn test_summary_matches_reported_balance() {
    let schedule = compute_schedule(dec!(250000), dec!(6.5), 360).unwrap();
    let summary = compute_summary(dec!(250000), 120, &schedule).unwrap();
    assert_eq!(summary.current_principal_balance, schedule[119].remaining_balance);
    assert_eq!(summary.current_principal_balance, dec!(211940.33));
    assert_eq!(summary.aggregate_principal_paid, dec!(38059.67));
    assert_eq!(summary.aggregate_interest_paid, dec!(151560.73));
}

#[test]
fn test_summary_split_is_exact_for_every_month() {
    let schedule = compute_schedule(dec!(20000), dec!(7.9), 60).unwrap();
    let payment = schedule[0].monthly_payment;
    for month in 0..=60 {
        let s = compute_summary(dec!(20000), month, &schedule).unwrap();
        assert_eq!(
            s.aggregate_principal_paid + s.aggregate_interest_paid,
            payment * Decimal::from(month)
        );
    }
}

#[test]
fn test_summary_month_zero() {
    let schedule = compute_schedule(dec!(10000), dec!(5.5), 12).unwrap();
    let summary = compute_summary(dec!(10000), 0, &schedule).unwrap();
    assert_eq!(summary.current_principal_balance, dec!(10000));
    assert_eq!(summary.aggregate_principal_paid, Decimal::ZERO);
    assert_eq!(summary.aggregate_interest_paid, Decimal::ZERO);
}

#[test]
fn test_summary_final_month_counts_residual_as_principal() {
    let schedule = compute_schedule(dec!(10000), dec!(3), 12).unwrap();
    let summary = compute_summary(dec!(10000), 12, &schedule).unwrap();
    assert_eq!(summary.current_principal_balance, dec!(-0.04));
    assert_eq!(summary.aggregate_principal_paid, dec!(10000.04));
    assert_eq!(summary.aggregate_interest_paid, dec!(163.24));
}

// ===========================================================================
// Rounding policy
// ===========================================================================

#[test]
fn test_one_policy_drives_payment_and_balances() {
    let terms = LoanTerms::new(dec!(10000), dec!(5.5), 12).unwrap();
    let truncated = compute_schedule_with(&terms, RoundingPolicy::Truncate).unwrap();
    assert_eq!(truncated[0].monthly_payment, dec!(858.36));
    // 10000 - (858.36 - 45.8333..) = 9187.4733.. truncated
    assert_eq!(truncated[0].remaining_balance, dec!(9187.47));

    let summary =
        compute_summary_with(dec!(10000), 1, &truncated, RoundingPolicy::Truncate).unwrap();
    assert_eq!(
        summary.aggregate_principal_paid + summary.aggregate_interest_paid,
        dec!(858.36)
    );
}

// ===========================================================================
// Errors
// ===========================================================================

fn assert_invalid<T: std::fmt::Debug>(result: Result<T, LoanLedgerError>, field: &str) {
    match result {
        Err(LoanLedgerError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
        other => panic!("expected InvalidInput on {field}, got {other:?}"),
    }
}

#[test]
fn test_invalid_schedule_inputs() {
    assert_invalid(compute_schedule(dec!(0), dec!(3), 12), "principal");
    assert_invalid(compute_schedule(dec!(-10000), dec!(3), 12), "principal");
    assert_invalid(compute_schedule(dec!(10000), dec!(0), 12), "annual_rate_percent");
    assert_invalid(compute_schedule(dec!(10000), dec!(3), 0), "term_months");
    assert_invalid(compute_schedule(dec!(10000), dec!(3), -2), "term_months");
}

#[test]
fn test_invalid_month_numbers() {
    let schedule = compute_schedule(dec!(10000), dec!(3), 12).unwrap();
    assert_invalid(compute_summary(dec!(10000), -1, &schedule), "month_number");
    assert_invalid(compute_summary(dec!(10000), 13, &schedule), "month_number");
    assert_invalid(compute_summary(dec!(0), 1, &schedule), "principal");
}

#[test]
fn test_term_above_limit_rejected() {
    assert_invalid(compute_schedule(dec!(10000), dec!(3), MAX_TERM_MONTHS + 1), "term_months");
    assert_invalid(compute_schedule(dec!(10000), dec!(3), 4_000_000_000), "term_months");
}

#[test]
fn test_out_of_range_totals_are_overflow_errors() {
    let principal = dec!(70000000000000000000000000000);
    let schedule = compute_schedule(principal, dec!(30), 12).unwrap();
    assert!(matches!(
        compute_summary(principal, 12, &schedule),
        Err(LoanLedgerError::Overflow { .. })
    ));
}

#[test]
fn test_error_display() {
    let err = compute_schedule(dec!(10000), dec!(3), 0).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input: term_months — Term must be at least 1 month"
    );
}
